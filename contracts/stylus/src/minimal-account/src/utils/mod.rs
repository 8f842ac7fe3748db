//! Shared utilities for the account.
//!
//! These helpers are intentionally small and deterministic, as they run inside Stylus / WASM.

pub mod crypto;
