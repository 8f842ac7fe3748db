use alloy_primitives::{Address, Bytes, FixedBytes, U256};
use anyhow::{Context, Result};
use clap::Parser;
use k256::ecdsa::SigningKey;
use minimal_account_signer::{
    encoder::{encode_execute, pack_account_gas_limits, pack_gas_fees, sign_user_op, signer_address},
    types::PackedUserOperation,
};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Build a user operation that calls `execute(dest, value, data)` on the account, sign it with
/// the owner key, and print it as JSON for submission to a bundler.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Owner private key (hex, 0x...).
    #[arg(long, env = "OWNER_KEY", hide_env_values = true)]
    owner_key: FixedBytes<32>,

    /// EntryPoint the account was deployed with (v0.7 by default).
    #[arg(long, env = "ENTRY_POINT", default_value = "0x0000000071727De22E5E9d8BAf0edAc6f37da032")]
    entry_point: Address,

    #[arg(long, env = "CHAIN_ID")]
    chain_id: u64,

    /// The minimal account address (`userOp.sender`).
    #[arg(long)]
    account: Address,

    #[arg(long, default_value_t = U256::ZERO)]
    nonce: U256,

    /// Target of the forwarded call.
    #[arg(long)]
    dest: Address,

    /// Wei forwarded with the call.
    #[arg(long, default_value_t = U256::ZERO)]
    value: U256,

    /// Calldata for the target (hex, 0x...).
    #[arg(long, default_value = "0x")]
    data: Bytes,

    #[arg(long, default_value_t = 150_000)]
    verification_gas_limit: u128,

    #[arg(long, default_value_t = 300_000)]
    call_gas_limit: u128,

    #[arg(long, default_value_t = 50_000)]
    pre_verification_gas: u64,

    #[arg(long, default_value_t = 1_000_000_000)]
    max_priority_fee_per_gas: u128,

    #[arg(long, default_value_t = 20_000_000_000)]
    max_fee_per_gas: u128,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let signing_key =
        SigningKey::from_slice(cli.owner_key.as_slice()).context("invalid owner private key")?;

    let mut op = PackedUserOperation {
        sender: cli.account,
        nonce: cli.nonce,
        call_data: encode_execute(cli.dest, cli.value, &cli.data),
        account_gas_limits: pack_account_gas_limits(cli.verification_gas_limit, cli.call_gas_limit),
        pre_verification_gas: U256::from(cli.pre_verification_gas),
        gas_fees: pack_gas_fees(cli.max_priority_fee_per_gas, cli.max_fee_per_gas),
        ..Default::default()
    };
    let hash = sign_user_op(&mut op, cli.entry_point, cli.chain_id, &signing_key)
        .map_err(|e| anyhow::anyhow!("signing failed: {e}"))?;

    info!(
        owner = %signer_address(&signing_key),
        account = %cli.account,
        chain_id = cli.chain_id,
        user_op_hash = %hash,
        "signed user operation"
    );

    let out = json!({
        "userOpHash": hash.to_string(),
        "entryPoint": cli.entry_point.to_string(),
        "userOp": {
            "sender": op.sender.to_string(),
            "nonce": format!("{:#x}", op.nonce),
            "initCode": format!("0x{}", hex::encode(&op.init_code)),
            "callData": format!("0x{}", hex::encode(&op.call_data)),
            "accountGasLimits": op.account_gas_limits.to_string(),
            "preVerificationGas": format!("{:#x}", op.pre_verification_gas),
            "gasFees": op.gas_fees.to_string(),
            "paymasterAndData": format!("0x{}", hex::encode(&op.paymaster_and_data)),
            "signature": format!("0x{}", hex::encode(&op.signature)),
        },
    });
    println!("{}", serde_json::to_string_pretty(&out).context("failed serialising user op")?);
    Ok(())
}
