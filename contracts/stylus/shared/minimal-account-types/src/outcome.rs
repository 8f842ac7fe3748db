use alloy_primitives::U256;

/// ERC-4337 validation data for a signature that recovered to the owner.
pub const SIG_VALIDATION_SUCCESS: U256 = U256::ZERO;
/// ERC-4337 validation data for any other signature.
pub const SIG_VALIDATION_FAILED: U256 = U256::from_limbs([1, 0, 0, 0]);

/// Result of checking a bundle's signature against the current owner.
///
/// `Failure` is not an error: the caller decides what to do with it. Malformed signatures and
/// signatures from the wrong key both end up here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Success,
    Failure,
}

impl ValidationOutcome {
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Packed validation-data word returned to the entry point (no time range, no aggregator).
    pub const fn validation_data(self) -> U256 {
        match self {
            Self::Success => SIG_VALIDATION_SUCCESS,
            Self::Failure => SIG_VALIDATION_FAILED,
        }
    }
}
