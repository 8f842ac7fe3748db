use alloy_primitives::{Address, FixedBytes, U256};
use alloy_sol_types::SolCall;
use k256::ecdsa::SigningKey;
use minimal_account_types::eth_signed_message_hash;
use sha3::{Digest, Keccak256};

use crate::types::{IMinimalAccount, PackedUserOperation};

pub(crate) fn keccak256_bytes(data: &[u8]) -> FixedBytes<32> {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    FixedBytes::from_slice(&hasher.finalize())
}

fn address_word(address: Address) -> [u8; 32] {
    let mut padded = [0u8; 32];
    padded[12..32].copy_from_slice(address.as_slice());
    padded
}

/// Two `u128`s packed high || low into one word, as EntryPoint v0.7 expects.
pub fn pack_u128_pair(high: u128, low: u128) -> FixedBytes<32> {
    let mut buf = [0u8; 32];
    buf[0..16].copy_from_slice(&high.to_be_bytes());
    buf[16..32].copy_from_slice(&low.to_be_bytes());
    FixedBytes(buf)
}

/// `accountGasLimits = verificationGasLimit || callGasLimit`.
pub fn pack_account_gas_limits(verification_gas_limit: u128, call_gas_limit: u128) -> FixedBytes<32> {
    pack_u128_pair(verification_gas_limit, call_gas_limit)
}

/// `gasFees = maxPriorityFeePerGas || maxFeePerGas`.
pub fn pack_gas_fees(max_priority_fee_per_gas: u128, max_fee_per_gas: u128) -> FixedBytes<32> {
    pack_u128_pair(max_priority_fee_per_gas, max_fee_per_gas)
}

/// ABI encoding of the user op without its signature (dynamic fields replaced by their hashes).
pub fn pack_user_op(op: &PackedUserOperation) -> Vec<u8> {
    let mut buf = Vec::with_capacity(32 * 8);
    buf.extend_from_slice(&address_word(op.sender));
    buf.extend_from_slice(&op.nonce.to_be_bytes::<32>());
    buf.extend_from_slice(keccak256_bytes(&op.init_code).as_slice());
    buf.extend_from_slice(keccak256_bytes(&op.call_data).as_slice());
    buf.extend_from_slice(op.account_gas_limits.as_slice());
    buf.extend_from_slice(&op.pre_verification_gas.to_be_bytes::<32>());
    buf.extend_from_slice(op.gas_fees.as_slice());
    buf.extend_from_slice(keccak256_bytes(&op.paymaster_and_data).as_slice());
    buf
}

/// The request digest the entry point hands to `validateUserOp`:
/// `keccak256(abi.encode(keccak256(pack(op)), entryPoint, chainId))`.
pub fn user_op_hash(op: &PackedUserOperation, entry_point: Address, chain_id: u64) -> FixedBytes<32> {
    let mut buf = Vec::with_capacity(32 * 3);
    buf.extend_from_slice(keccak256_bytes(&pack_user_op(op)).as_slice());
    buf.extend_from_slice(&address_word(entry_point));
    buf.extend_from_slice(&U256::from(chain_id).to_be_bytes::<32>());
    keccak256_bytes(&buf)
}

/// Sign the personal-message form of `digest`, returning `r || s || v` with v in {27, 28}.
pub fn sign_digest(digest: FixedBytes<32>, signing_key: &SigningKey) -> Result<Vec<u8>, k256::ecdsa::Error> {
    let prefixed = eth_signed_message_hash(digest);
    let (signature, recovery_id) = signing_key.sign_prehash_recoverable(prefixed.as_slice())?;

    let mut sig_bytes = Vec::with_capacity(65);
    sig_bytes.extend_from_slice(&signature.to_bytes());
    sig_bytes.push(recovery_id.to_byte() + 27);
    Ok(sig_bytes)
}

/// Sign the user op for `entry_point` on `chain_id` and write the signature into `op.signature`.
///
/// Returns the user-op hash that was signed.
pub fn sign_user_op(
    op: &mut PackedUserOperation,
    entry_point: Address,
    chain_id: u64,
    signing_key: &SigningKey,
) -> Result<FixedBytes<32>, k256::ecdsa::Error> {
    let hash = user_op_hash(op, entry_point, chain_id);
    op.signature = sign_digest(hash, signing_key)?;
    Ok(hash)
}

/// Calldata for `execute(address,uint256,bytes)` on the account.
pub fn encode_execute(dest: Address, value: U256, func_data: &[u8]) -> Vec<u8> {
    IMinimalAccount::executeCall {
        dest,
        value,
        funcData: func_data.to_vec().into(),
    }
    .abi_encode()
}

/// Address controlled by `signing_key`.
pub fn signer_address(signing_key: &SigningKey) -> Address {
    let encoded = signing_key.verifying_key().to_encoded_point(false);
    let hash = keccak256_bytes(&encoded.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}
