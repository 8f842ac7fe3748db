//! Stylus single-owner ERC-4337 account.
//!
//! Design notes:
//! - The entry point is the only caller that can validate bundles or pay itself a prefund.
//! - The owner's ECDSA key is the sole "who": bundles are authorised by a personal-message
//!   signature over the entry point's `userOpHash`.
//! - Replay protection and fee accounting belong to the entry point; the account only pays what
//!   it is told it owes.

use alloc::vec::Vec;

use alloy_sol_types::sol;
use minimal_account_types::{CallExecutor, SignerRecovery};
use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{Address, FixedBytes, U256, U64},
    prelude::*,
    stylus_core::log,
    ArbResult,
};

use crate::{
    entry_point::{user_op_signature, PackedUserOperation},
    errors::{AccountError, MinimalAccountError},
    gate::{require_from_entry_point, require_from_entry_point_or_owner, require_from_owner},
    onchain::{PrecompileRecovery, RawCallExecutor},
    settlement::{forward_call, prefund_gas_bound, validate_and_settle, Prefund},
};

sol! {
    event OwnershipTransferred(address indexed previousOwner, address indexed newOwner);
}

sol_storage! {
    #[entrypoint]
    pub struct MinimalAccount {
        /// Key whose signatures authorise bundles. Never zero after construction.
        address owner;

        /// Privileged caller (ERC-4337 EntryPoint). Written once, by the constructor.
        address entry_point;

        /// Gas bound for the prefund transfer; zero forwards all remaining gas.
        uint64 prefund_gas_limit;
    }
}

#[public]
impl MinimalAccount {
    #[constructor]
    pub fn constructor(
        &mut self,
        entry_point: Address,
        owner: Address,
        prefund_gas_limit: u64,
    ) -> Result<(), MinimalAccountError> {
        if entry_point == Address::ZERO {
            return Err(AccountError::InvalidEntryPoint(entry_point).into());
        }
        if owner == Address::ZERO {
            return Err(AccountError::InvalidNewOwner(owner).into());
        }

        self.entry_point.set(entry_point);
        self.prefund_gas_limit.set(U64::from(prefund_gas_limit));
        self.set_owner(owner);
        Ok(())
    }

    /// ERC-4337 `IAccount.validateUserOp`.
    ///
    /// Returns `0` when the bundle's signature recovers to the owner and `1` otherwise. On
    /// success `missing_account_funds` is paid to the entry point; a failed payment reverts.
    pub fn validate_user_op(
        &mut self,
        user_op: PackedUserOperation,
        user_op_hash: FixedBytes<32>,
        missing_account_funds: U256,
    ) -> Result<U256, MinimalAccountError> {
        self.validate_with(
            &PrecompileRecovery::default(),
            &mut RawCallExecutor,
            &user_op,
            user_op_hash,
            missing_account_funds,
        )
    }

    /// Forward a validated bundle's call. Entry point only.
    pub fn execute(
        &mut self,
        dest: Address,
        value: U256,
        func_data: Bytes,
    ) -> Result<(), MinimalAccountError> {
        require_from_entry_point(self.vm().msg_sender(), self.entry_point.get())?;
        forward_call(&mut RawCallExecutor, dest, value, &func_data)?;
        Ok(())
    }

    /// Forward a call directly, without a bundle. Entry point or owner.
    pub fn execute_manual(
        &mut self,
        dest: Address,
        value: U256,
        func_data: Bytes,
    ) -> Result<(), MinimalAccountError> {
        require_from_entry_point_or_owner(
            self.vm().msg_sender(),
            self.entry_point.get(),
            self.owner.get(),
        )?;
        forward_call(&mut RawCallExecutor, dest, value, &func_data)?;
        Ok(())
    }

    pub fn transfer_ownership(&mut self, new_owner: Address) -> Result<(), MinimalAccountError> {
        require_from_owner(self.vm().msg_sender(), self.owner.get())?;
        if new_owner == Address::ZERO {
            return Err(AccountError::InvalidNewOwner(new_owner).into());
        }
        self.set_owner(new_owner);
        Ok(())
    }

    pub fn owner(&self) -> Address {
        self.owner.get()
    }

    pub fn get_entry_point(&self) -> Address {
        self.entry_point.get()
    }

    pub fn prefund_gas_limit(&self) -> u64 {
        self.prefund_gas_limit.get().to::<u64>()
    }

    /// Plain value transfers are always accepted.
    #[receive]
    #[payable]
    pub fn receive(&mut self) -> Result<(), Vec<u8>> {
        Ok(())
    }

    /// Unknown selectors are accepted without touching state.
    #[fallback]
    #[payable]
    pub fn fallback(&mut self, _calldata: &[u8]) -> ArbResult {
        Ok(Vec::new())
    }
}

impl MinimalAccount {
    fn validate_with<R: SignerRecovery, E: CallExecutor>(
        &mut self,
        recovery: &R,
        executor: &mut E,
        user_op: &PackedUserOperation,
        user_op_hash: FixedBytes<32>,
        missing_account_funds: U256,
    ) -> Result<U256, MinimalAccountError> {
        let caller = self.vm().msg_sender();
        require_from_entry_point(caller, self.entry_point.get())?;

        let prefund = Prefund {
            payee: caller,
            amount: missing_account_funds,
            gas_limit: prefund_gas_bound(self.prefund_gas_limit.get().to::<u64>()),
        };
        let outcome = validate_and_settle(
            recovery,
            executor,
            self.owner.get(),
            user_op_signature(user_op),
            user_op_hash,
            prefund,
        )?;
        Ok(outcome.validation_data())
    }

    fn set_owner(&mut self, new_owner: Address) {
        let previous_owner = self.owner.get();
        self.owner.set(new_owner);
        log(
            self.vm(),
            OwnershipTransferred {
                previousOwner: previous_owner,
                newOwner: new_owner,
            },
        );
    }
}
