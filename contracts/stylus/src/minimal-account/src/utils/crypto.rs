//! Cryptographic helpers used by the account.
//!
//! Purpose: recover the bundle signer so it can be compared with the stored owner.

use minimal_account_types::RecoverableSignature;
use stylus_sdk::{
    alloy_primitives::{address, Address, FixedBytes},
    call::RawCall,
};

/// The `ecrecover` precompile.
pub const ECRECOVER: Address = address!("0000000000000000000000000000000000000001");

/// Gas handed to the precompile (it costs 3000).
pub const ECRECOVER_GAS_CAP: u64 = 50_000;

/// Recover an EOA address from a 32-byte digest and a parsed signature.
///
/// Notes:
/// - We use the EVM `ecrecover` precompile at address `0x01`.
/// - The precompile signals failure with empty output; that and the zero address map to `None`.
pub fn ecrecover_address(
    digest: FixedBytes<32>,
    sig: &RecoverableSignature,
    gas_cap: u64,
) -> Option<Address> {
    let input = ecrecover_input(digest, sig);
    let out = unsafe { RawCall::new_static().gas(gas_cap).call(ECRECOVER, &input) }.ok()?;
    if out.len() < 32 {
        return None;
    }
    // precompile returns 32-byte word with address in the low 20 bytes.
    let recovered = Address::from_slice(&out[12..32]);
    (recovered != Address::ZERO).then_some(recovered)
}

/// Precompile input: `digest || uint256(v) || r || s`.
pub fn ecrecover_input(digest: FixedBytes<32>, sig: &RecoverableSignature) -> [u8; 128] {
    let mut input = [0u8; 128];
    input[0..32].copy_from_slice(digest.as_slice());
    // v as 32-byte big-endian word.
    input[63] = sig.v;
    input[64..96].copy_from_slice(sig.r.as_slice());
    input[96..128].copy_from_slice(sig.s.as_slice());
    input
}
