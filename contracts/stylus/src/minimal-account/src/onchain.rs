//! On-chain implementations of the recovery and call seams.

use alloc::vec::Vec;

use minimal_account_types::{CallExecutor, RecoverableSignature, SignerRecovery};
use stylus_sdk::{
    alloy_primitives::{Address, FixedBytes, U256},
    call::RawCall,
};

use crate::utils::crypto::{ecrecover_address, ECRECOVER_GAS_CAP};

/// Recovery through the `ecrecover` precompile with a per-call gas cap.
#[derive(Clone, Copy, Debug)]
pub struct PrecompileRecovery {
    pub gas_cap: u64,
}

impl Default for PrecompileRecovery {
    fn default() -> Self {
        Self {
            gas_cap: ECRECOVER_GAS_CAP,
        }
    }
}

impl SignerRecovery for PrecompileRecovery {
    fn recover(&self, digest: FixedBytes<32>, signature: &[u8]) -> Option<Address> {
        let sig = RecoverableSignature::parse(signature)?;
        ecrecover_address(digest, &sig, self.gas_cap)
    }
}

/// Value-carrying `call`s straight through the host.
///
/// Revert data comes back in `Err` untouched; the host has already rolled back the callee.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawCallExecutor;

impl CallExecutor for RawCallExecutor {
    fn call(
        &mut self,
        to: Address,
        value: U256,
        data: &[u8],
        gas: Option<u64>,
    ) -> Result<Vec<u8>, Vec<u8>> {
        let mut call = RawCall::new_with_value(value);
        if let Some(gas) = gas {
            call = call.gas(gas);
        }
        unsafe { call.call(to, data) }
    }
}
