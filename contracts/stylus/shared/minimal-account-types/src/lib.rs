//! Types shared between the Stylus minimal account and its off-chain tooling.
//!
//! The account itself only depends on the traits and parsers in here; the concrete
//! on-chain implementations (precompile recovery, raw calls) live in the contract crate.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod outcome;
pub mod recovery;
pub mod executor;
pub mod signature;

pub use executor::CallExecutor;
pub use outcome::ValidationOutcome;
pub use recovery::SignerRecovery;
pub use signature::{eth_signed_message_hash, RecoverableSignature};

#[cfg(feature = "local-recovery")]
pub use recovery::LocalRecovery;
