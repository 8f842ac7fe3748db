use alloc::vec::Vec;

use alloy_primitives::{Address, U256};

/// Outbound value-carrying calls, implemented differently on-chain vs in tests.
///
/// Implementations must leave no observable effect behind when they return `Err`: on-chain this
/// is the EVM's sub-call rollback, off-chain mocks have to model it themselves.
pub trait CallExecutor {
    /// Call `to` with `value` wei attached and `data` as calldata.
    ///
    /// `gas` of `None` forwards everything that is left. `Err` carries the callee's revert data.
    fn call(
        &mut self,
        to: Address,
        value: U256,
        data: &[u8],
        gas: Option<u64>,
    ) -> Result<Vec<u8>, Vec<u8>>;
}
