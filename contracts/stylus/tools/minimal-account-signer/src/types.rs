use alloy_primitives::{Address, FixedBytes, U256};
use alloy_sol_types::sol;

sol! {
    /// Account entry points that off-chain tooling encodes calls for.
    interface IMinimalAccount {
        function execute(address dest, uint256 value, bytes funcData) external;
        function executeManual(address dest, uint256 value, bytes funcData) external;
        function transferOwnership(address newOwner) external;
    }
}

/// ERC-4337 v0.7 packed user operation, as assembled off-chain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackedUserOperation {
    /// The smart account the bundle targets.
    pub sender: Address,
    /// Entry-point managed replay nonce (key || sequence).
    pub nonce: U256,
    pub init_code: Vec<u8>,
    /// Usually an encoded `execute(...)` call on the account.
    pub call_data: Vec<u8>,
    /// `verificationGasLimit (u128) || callGasLimit (u128)`.
    pub account_gas_limits: FixedBytes<32>,
    pub pre_verification_gas: U256,
    /// `maxPriorityFeePerGas (u128) || maxFeePerGas (u128)`.
    pub gas_fees: FixedBytes<32>,
    pub paymaster_and_data: Vec<u8>,

    /// ECDSA signature (r||s||v) by the account owner over the prefixed user-op hash.
    pub signature: Vec<u8>,
}
