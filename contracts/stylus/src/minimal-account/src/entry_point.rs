//! ERC-4337 (EntryPoint v0.7) ABI shapes the account is called with.

use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{Address, FixedBytes, U256},
};

/// `PackedUserOperation` as an ABI tuple.
///
/// Stylus' `#[public]` glue supports tuples via `AbiType`, and a Solidity `struct` is
/// ABI-equivalent to a tuple:
/// (sender, nonce, initCode, callData, accountGasLimits, preVerificationGas, gasFees, paymasterAndData, signature)
///
/// Dynamic fields must be [`Bytes`]; a `Vec<u8>` would encode as `uint8[]` and change the
/// `validateUserOp` selector.
pub type PackedUserOperation = (
    Address,
    U256,
    Bytes,
    Bytes,
    FixedBytes<32>,
    U256,
    FixedBytes<32>,
    Bytes,
    Bytes,
);

/// The only field the account reads.
pub fn user_op_signature(user_op: &PackedUserOperation) -> &[u8] {
    user_op.8.as_slice()
}
