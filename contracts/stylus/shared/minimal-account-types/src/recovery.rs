use alloy_primitives::{Address, FixedBytes};

/// Signer recovery abstraction, implemented differently on-chain vs off-chain.
///
/// Recovery never fails loudly: anything that cannot be recovered is `None`.
pub trait SignerRecovery {
    /// Recover the signing address of `signature` over the (already prefixed) `digest`.
    fn recover(&self, digest: FixedBytes<32>, signature: &[u8]) -> Option<Address>;
}

/// Pure-Rust recovery over secp256k1 (k256), for tooling and tests.
#[cfg(feature = "local-recovery")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalRecovery;

#[cfg(feature = "local-recovery")]
impl SignerRecovery for LocalRecovery {
    fn recover(&self, digest: FixedBytes<32>, signature: &[u8]) -> Option<Address> {
        use alloy_primitives::keccak256;
        use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

        use crate::RecoverableSignature;

        let parsed = RecoverableSignature::parse(signature)?;
        let sig = Signature::from_slice(&parsed.rs_bytes()).ok()?;
        let recovery_id = RecoveryId::from_byte(parsed.recovery_id())?;
        let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &sig, recovery_id).ok()?;

        let encoded = key.to_encoded_point(false);
        let pubkey = encoded.as_bytes();
        // uncompressed SEC1: 0x04 || x || y
        if pubkey.len() != 65 {
            return None;
        }
        let hash = keccak256(&pubkey[1..]);
        Some(Address::from_slice(&hash[12..]))
    }
}
