use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Raw `cargo stylus` output kept in the deployments file is cut at this many bytes.
const MAX_RECORDED_OUTPUT: usize = 16_000;

/// Deploy the minimal account with `cargo stylus deploy`, passing its constructor arguments,
/// then record the deployment in a JSON file keyed by contract name.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Directory of the Stylus contract crate, relative to where the deployer runs.
    #[arg(long, default_value = "src/minimal-account")]
    contract_dir: PathBuf,

    /// RPC URL used by `cargo stylus deploy`.
    #[arg(long, env = "RPC_URL")]
    rpc_url: String,

    /// Path to a file containing the deployer private key.
    #[arg(long, env = "PRIV_KEY_PATH", conflicts_with = "private_key")]
    private_key_path: Option<String>,

    /// Private key (hex string, 0x...).
    #[arg(long, env = "PKEY", conflicts_with = "private_key_path", hide_env_values = true)]
    private_key: Option<String>,

    /// Privileged caller (ERC-4337 EntryPoint) passed to the constructor.
    #[arg(long, env = "ENTRY_POINT", default_value = "0x0000000071727De22E5E9d8BAf0edAc6f37da032")]
    entry_point: String,

    /// Initial account owner passed to the constructor.
    #[arg(long, env = "OWNER")]
    owner: String,

    /// Gas bound for prefund payments to the entry point (0 = forward all gas).
    #[arg(long, default_value_t = 0)]
    prefund_gas_limit: u64,

    /// Deployments file to create or update (eg, deployments.devnet.json).
    #[arg(long, default_value = "deployments.devnet.json")]
    deployments_path: PathBuf,

    /// Key under `deployments` for this account (eg, minimal-account).
    #[arg(long, default_value = "minimal-account")]
    contract_key: String,

    /// Network label written to the deployments file (eg, devnet, arb-sepolia).
    #[arg(long, default_value = "devnet")]
    network: String,

    /// Extra args to pass through to `cargo stylus deploy` (after `--`), eg `-- --estimate-gas`.
    #[arg(last = true)]
    passthrough: Vec<String>,
}

/// `MinimalAccount(entryPoint, owner, prefundGasLimit)`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
struct ConstructorArgs {
    entry_point: String,
    owner: String,
    prefund_gas_limit: u64,
}

impl ConstructorArgs {
    fn from_cli(cli: &Cli) -> Result<Self> {
        validate_address_arg("--entry-point", &cli.entry_point)?;
        validate_address_arg("--owner", &cli.owner)?;
        Ok(Self {
            entry_point: cli.entry_point.clone(),
            owner: cli.owner.clone(),
            prefund_gas_limit: cli.prefund_gas_limit,
        })
    }

    fn to_args(&self) -> [String; 3] {
        [
            self.entry_point.clone(),
            self.owner.clone(),
            self.prefund_gas_limit.to_string(),
        ]
    }
}

/// What we pull out of `cargo stylus deploy` output.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DeployOutput {
    address: String,
    tx_hashes: Vec<String>,
}

/// One entry under `deployments.<contract_key>`.
#[derive(Serialize, Debug)]
struct DeploymentRecord<'a> {
    address: &'a str,
    rpc_url: &'a str,
    deployed_at: &'a str,
    constructor: &'a ConstructorArgs,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    tx_hashes: &'a [String],
    #[serde(skip_serializing_if = "str::is_empty")]
    cargo_stylus_output: &'a str,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let args = ConstructorArgs::from_cli(&cli)?;

    info!(
        contract = %cli.contract_key,
        network = %cli.network,
        entry_point = %args.entry_point,
        owner = %args.owner,
        prefund_gas_limit = args.prefund_gas_limit,
        "deploying"
    );
    let raw_output = run_cargo_stylus_deploy(&cli, &args)?;
    let deployed = parse_deploy_output(&raw_output)?;
    info!(address = %deployed.address, txs = deployed.tx_hashes.len(), "deployed");
    if deployed.tx_hashes.is_empty() {
        warn!("no confirmed tx hashes found in `cargo stylus deploy` output");
    }

    let now = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());
    let record = DeploymentRecord {
        address: &deployed.address,
        rpc_url: &cli.rpc_url,
        deployed_at: &now,
        constructor: &args,
        tx_hashes: &deployed.tx_hashes,
        cargo_stylus_output: truncate_output(&raw_output, MAX_RECORDED_OUTPUT),
    };

    let root = read_deployments(&cli.deployments_path)?;
    let root = merge_deployment(root, &cli.network, &now, &cli.contract_key, &record)?;
    write_json_atomic(&cli.deployments_path, &root)?;

    println!("Deployed `{}` to {}", cli.contract_key, deployed.address);
    Ok(())
}

fn validate_address_arg(flag: &str, value: &str) -> Result<()> {
    let re = Regex::new(r"^0x[a-fA-F0-9]{40}$")?;
    if !re.is_match(value) {
        return Err(anyhow!("{flag} must be a 0x-prefixed 20-byte hex address, got `{value}`"));
    }
    if value[2..].chars().all(|c| c == '0') {
        return Err(anyhow!("{flag} must not be the zero address"));
    }
    Ok(())
}

/// Run the deploy and return combined stdout/stderr.
fn run_cargo_stylus_deploy(cli: &Cli, args: &ConstructorArgs) -> Result<String> {
    let mut cmd = Command::new("cargo");
    cmd.current_dir(&cli.contract_dir)
        .args(["stylus", "deploy", "-e"])
        .arg(&cli.rpc_url);

    match (&cli.private_key_path, &cli.private_key) {
        (Some(path), _) => cmd.arg("--private-key-path").arg(path),
        (None, Some(key)) => cmd.arg("--private-key").arg(key),
        (None, None) => {
            return Err(anyhow!(
                "missing deployer key: provide --private-key-path or --private-key (or set PRIV_KEY_PATH/PKEY)"
            ))
        }
    };

    cmd.arg("--constructor-args").args(args.to_args());
    cmd.args(&cli.passthrough);
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    debug!(dir = %cli.contract_dir.display(), "running cargo stylus deploy");
    let output = cmd
        .output()
        .context("failed to run `cargo stylus deploy`")?;
    let combined = format!(
        "{}\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    if !output.status.success() {
        return Err(anyhow!(
            "`cargo stylus deploy` failed (exit {}):\n{}",
            output.status,
            combined
        ));
    }
    Ok(combined)
}

/// Pull the deployed address and confirmed tx hashes out of `cargo stylus deploy` output:
///   Deploying program to address 0x...
///   Confirmed tx 0x...
fn parse_deploy_output(output: &str) -> Result<DeployOutput> {
    let re_address = Regex::new(r"Deploying program to address (0x[a-fA-F0-9]{40})")?;
    let re_tx = Regex::new(r"Confirmed tx (0x[a-fA-F0-9]{64})")?;

    let address = re_address
        .captures(output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            anyhow!("could not parse deployed address from `cargo stylus deploy` output")
        })?;
    let tx_hashes = re_tx
        .captures_iter(output)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    Ok(DeployOutput { address, tx_hashes })
}

/// Trim and cut to at most `max` bytes on a char boundary.
fn truncate_output(raw: &str, max: usize) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() <= max {
        return trimmed;
    }
    let mut end = max;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    &trimmed[..end]
}

fn read_deployments(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Ok(json!({}));
    }
    let existing =
        fs::read_to_string(path).with_context(|| format!("failed reading {}", path.display()))?;
    if existing.trim().is_empty() {
        return Ok(json!({}));
    }
    serde_json::from_str(&existing)
        .with_context(|| format!("failed parsing JSON in {}", path.display()))
}

/// Set `network`, `updated_at` and `deployments.<key>`, keeping every other entry.
fn merge_deployment(
    mut root: Value,
    network: &str,
    now: &str,
    key: &str,
    record: &DeploymentRecord<'_>,
) -> Result<Value> {
    if !root.is_object() {
        warn!("deployments file is not a JSON object; replacing");
        root = json!({});
    }
    root["network"] = json!(network);
    root["updated_at"] = json!(now);
    if !root["deployments"].is_object() {
        root["deployments"] = json!({});
    }
    root["deployments"][key] =
        serde_json::to_value(record).context("failed serialising deployment record")?;
    Ok(root)
}

fn write_json_atomic(path: &Path, value: &Value) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("failed creating directory {}", parent.display()))?;

    let serialised =
        serde_json::to_string_pretty(value).context("failed serialising deployments JSON")?;
    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, serialised.as_bytes())
        .with_context(|| format!("failed writing temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("failed replacing {}", path.display()))?;
    info!(path = %path.display(), "wrote deployments");
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
