use alloc::vec::Vec;

use alloy_sol_types::sol;
use stylus_sdk::{
    alloy_primitives::{Address, Bytes, U256},
    stylus_proc::SolidityError,
};

sol! {
    error NotAuthorizedCaller(address caller);
    error NotAuthorizedCallerOrOwner(address caller);
    error PrefundTransferFailed(address payee, uint256 amount);
    error ForwardedCallFailed(bytes result);
    error InvalidNewOwner(address owner);
    error OwnableUnauthorizedAccount(address account);
    error InvalidEntryPoint(address entryPoint);
}

/// Revert payloads surfaced through the ABI.
#[derive(SolidityError)]
pub enum MinimalAccountError {
    NotAuthorizedCaller(NotAuthorizedCaller),
    NotAuthorizedCallerOrOwner(NotAuthorizedCallerOrOwner),
    PrefundTransferFailed(PrefundTransferFailed),
    ForwardedCallFailed(ForwardedCallFailed),
    InvalidNewOwner(InvalidNewOwner),
    OwnableUnauthorizedAccount(OwnableUnauthorizedAccount),
    InvalidEntryPoint(InvalidEntryPoint),
}

/// Errors raised by the gate, verifier and settlement modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    NotAuthorizedCaller(Address),
    NotAuthorizedCallerOrOwner(Address),
    PrefundTransferFailed { payee: Address, amount: U256 },
    /// Raw revert data of the forwarded call, untouched.
    ForwardedCallFailed(Vec<u8>),
    InvalidNewOwner(Address),
    NotOwner(Address),
    InvalidEntryPoint(Address),
}

impl From<AccountError> for MinimalAccountError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotAuthorizedCaller(caller) => {
                Self::NotAuthorizedCaller(NotAuthorizedCaller { caller })
            }
            AccountError::NotAuthorizedCallerOrOwner(caller) => {
                Self::NotAuthorizedCallerOrOwner(NotAuthorizedCallerOrOwner { caller })
            }
            AccountError::PrefundTransferFailed { payee, amount } => {
                Self::PrefundTransferFailed(PrefundTransferFailed { payee, amount })
            }
            AccountError::ForwardedCallFailed(result) => {
                Self::ForwardedCallFailed(ForwardedCallFailed {
                    result: Bytes::from(result),
                })
            }
            AccountError::InvalidNewOwner(owner) => Self::InvalidNewOwner(InvalidNewOwner { owner }),
            AccountError::NotOwner(account) => {
                Self::OwnableUnauthorizedAccount(OwnableUnauthorizedAccount { account })
            }
            AccountError::InvalidEntryPoint(entry_point) => {
                Self::InvalidEntryPoint(InvalidEntryPoint {
                    entryPoint: entry_point,
                })
            }
        }
    }
}
