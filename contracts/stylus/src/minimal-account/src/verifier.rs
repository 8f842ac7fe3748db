//! Owner signature check over the entry point's request digest.

use minimal_account_types::{eth_signed_message_hash, SignerRecovery, ValidationOutcome};
use stylus_sdk::alloy_primitives::{Address, FixedBytes};

/// Check that `signature` was produced by `owner` over the personal-message form of
/// `request_digest`.
///
/// Unrecoverable signatures and signatures by any other key both yield `Failure`.
pub fn validate_signature<R: SignerRecovery>(
    recovery: &R,
    signature: &[u8],
    request_digest: FixedBytes<32>,
    owner: Address,
) -> ValidationOutcome {
    let digest = eth_signed_message_hash(request_digest);
    match recovery.recover(digest, signature) {
        Some(signer) if signer != Address::ZERO && signer == owner => ValidationOutcome::Success,
        _ => ValidationOutcome::Failure,
    }
}
