//! Caller classification for gated entry points.
//!
//! Every gated method runs one of the `require_*` checks before it touches the bundle.

use stylus_sdk::alloy_primitives::Address;

use crate::errors::AccountError;

/// Who is calling, relative to the account's stored identities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallerRole {
    EntryPoint,
    Owner,
    Other,
}

/// Classify `caller`. The entry point wins if it is also the owner.
pub fn classify(caller: Address, entry_point: Address, owner: Address) -> CallerRole {
    if caller == entry_point {
        CallerRole::EntryPoint
    } else if caller == owner {
        CallerRole::Owner
    } else {
        CallerRole::Other
    }
}

pub fn require_from_entry_point(caller: Address, entry_point: Address) -> Result<(), AccountError> {
    if caller != entry_point {
        return Err(AccountError::NotAuthorizedCaller(caller));
    }
    Ok(())
}

pub fn require_from_entry_point_or_owner(
    caller: Address,
    entry_point: Address,
    owner: Address,
) -> Result<(), AccountError> {
    match classify(caller, entry_point, owner) {
        CallerRole::EntryPoint | CallerRole::Owner => Ok(()),
        CallerRole::Other => Err(AccountError::NotAuthorizedCallerOrOwner(caller)),
    }
}

pub fn require_from_owner(caller: Address, owner: Address) -> Result<(), AccountError> {
    if caller != owner {
        return Err(AccountError::NotOwner(caller));
    }
    Ok(())
}
