//! Single-owner ERC-4337 smart account for Arbitrum Stylus.
//!
//! The entry point drives validation and settlement; the owner's ECDSA key authorises bundles.
//! Gate, verifier and settlement logic are plain functions over the [`SignerRecovery`] and
//! [`CallExecutor`] seams so they run unchanged against mocks off-chain.
//!
//! [`SignerRecovery`]: minimal_account_types::SignerRecovery
//! [`CallExecutor`]: minimal_account_types::CallExecutor

// Allow `cargo stylus export-abi` to generate a main function.
#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
#![cfg_attr(not(any(test, feature = "export-abi")), no_std)]

#[macro_use]
extern crate alloc;

pub mod account;
pub mod entry_point;
pub mod errors;
pub mod gate;
pub mod onchain;
pub mod settlement;
pub mod utils;
pub mod verifier;

#[cfg(test)]
mod test_utils;

pub use account::MinimalAccount;
