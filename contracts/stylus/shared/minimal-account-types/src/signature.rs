//! 65-byte ECDSA signature parsing and the personal-message prefix transform.
//!
//! Both the on-chain precompile path and the off-chain k256 path go through
//! [`RecoverableSignature::parse`], so they reject exactly the same inputs.

use alloy_primitives::{keccak256, uint, FixedBytes, U256};

/// `secp256k1n / 2`. Signatures with a larger `s` are malleable twins and are rejected.
pub const SECP256K1N_HALF: U256 =
    uint!(0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0_U256);

/// Length of an `r || s || v` signature.
pub const SIGNATURE_LEN: usize = 65;

/// A structurally valid `r || s || v` signature. `v` is always 27 or 28.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    pub r: FixedBytes<32>,
    pub s: FixedBytes<32>,
    pub v: u8,
}

impl RecoverableSignature {
    /// Parse `r || s || v`.
    ///
    /// Returns `None` for a wrong length, zero `r`/`s`, high `s`, or `v` outside {27,28}.
    /// A bare recovery id (`v` of 0 or 1) is rejected, as `ecrecover` does.
    pub fn parse(sig: &[u8]) -> Option<Self> {
        if sig.len() != SIGNATURE_LEN {
            return None;
        }
        let r = FixedBytes::<32>::from_slice(&sig[0..32]);
        let s = FixedBytes::<32>::from_slice(&sig[32..64]);
        let v = sig[64];
        if v != 27 && v != 28 {
            return None;
        }

        let s_word = U256::from_be_bytes(s.0);
        if r == FixedBytes::ZERO || s_word == U256::ZERO || s_word > SECP256K1N_HALF {
            return None;
        }
        Some(Self { r, s, v })
    }

    /// Recovery id in {0,1}.
    pub const fn recovery_id(&self) -> u8 {
        self.v - 27
    }

    /// `r || s` without the recovery byte.
    pub fn rs_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[0..32].copy_from_slice(self.r.as_slice());
        out[32..64].copy_from_slice(self.s.as_slice());
        out
    }
}

/// `keccak256("\x19Ethereum Signed Message:\n32" || digest)`.
pub fn eth_signed_message_hash(digest: FixedBytes<32>) -> FixedBytes<32> {
    let mut buf = [0u8; 28 + 32];
    buf[0..28].copy_from_slice(b"\x19Ethereum Signed Message:\n32");
    buf[28..60].copy_from_slice(digest.as_slice());
    keccak256(buf)
}
