//! Off-chain assembly and signing of bundles for the Stylus minimal account.

pub mod encoder;
pub mod types;
