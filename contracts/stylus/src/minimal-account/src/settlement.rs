//! Settlement with the entry point and forwarding of the bundle's real call.

use alloc::vec::Vec;

use minimal_account_types::{CallExecutor, SignerRecovery, ValidationOutcome};
use stylus_sdk::alloy_primitives::{Address, FixedBytes, U256};

use crate::{errors::AccountError, verifier::validate_signature};

/// What the account owes for a bundle, and to whom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prefund {
    pub payee: Address,
    pub amount: U256,
    /// Gas handed to the payment call; `None` forwards all remaining gas.
    pub gas_limit: Option<u64>,
}

/// Map the stored gas bound to a call limit. Zero means unbounded.
pub fn prefund_gas_bound(stored: u64) -> Option<u64> {
    (stored != 0).then_some(stored)
}

/// Verify the owner's signature and, only on success, pay the prefund.
///
/// A failed signature returns `Failure` without moving any value. A failed payment aborts.
pub fn validate_and_settle<R: SignerRecovery, E: CallExecutor>(
    recovery: &R,
    executor: &mut E,
    owner: Address,
    signature: &[u8],
    request_digest: FixedBytes<32>,
    prefund: Prefund,
) -> Result<ValidationOutcome, AccountError> {
    let outcome = validate_signature(recovery, signature, request_digest, owner);
    if !outcome.is_success() {
        return Ok(outcome);
    }
    pay_prefund(executor, prefund)?;
    Ok(outcome)
}

/// Send exactly `prefund.amount` to `prefund.payee`. No-op for zero.
pub fn pay_prefund<E: CallExecutor>(executor: &mut E, prefund: Prefund) -> Result<(), AccountError> {
    if prefund.amount == U256::ZERO {
        return Ok(());
    }
    executor
        .call(prefund.payee, prefund.amount, &[], prefund.gas_limit)
        .map(|_| ())
        .map_err(|_| AccountError::PrefundTransferFailed {
            payee: prefund.payee,
            amount: prefund.amount,
        })
}

/// Call `dest` with `value` and `data`, surfacing its revert data verbatim on failure.
pub fn forward_call<E: CallExecutor>(
    executor: &mut E,
    dest: Address,
    value: U256,
    data: &[u8],
) -> Result<Vec<u8>, AccountError> {
    executor
        .call(dest, value, data, None)
        .map_err(AccountError::ForwardedCallFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{address_of, sign_digest, signing_key, LedgerExecutor};
    use minimal_account_types::LocalRecovery;
    use stylus_sdk::alloy_primitives::keccak256;

    const ENTRY_POINT: Address = Address::repeat_byte(0xee);
    const TARGET: Address = Address::repeat_byte(0x77);

    fn prefund(amount: u64) -> Prefund {
        Prefund {
            payee: ENTRY_POINT,
            amount: U256::from(amount),
            gas_limit: None,
        }
    }

    #[test]
    fn test_owner_signed_zero_owed_leaves_balance() {
        let owner_key = signing_key(1);
        let digest = keccak256(b"D1");
        let sig = sign_digest(&owner_key, digest);
        let mut ledger = LedgerExecutor::with_balance(U256::from(500u64));

        let outcome = validate_and_settle(
            &LocalRecovery,
            &mut ledger,
            address_of(&owner_key),
            &sig,
            digest,
            prefund(0),
        )
        .unwrap();

        assert_eq!(outcome, ValidationOutcome::Success);
        assert_eq!(ledger.balance, U256::from(500u64));
        assert!(ledger.calls.is_empty());
    }

    #[test]
    fn test_wrong_key_is_failure_and_never_pays() {
        let owner_key = signing_key(1);
        let digest = keccak256(b"D1");
        let sig = sign_digest(&signing_key(2), digest);

        for owed in [0u64, 1, 500, 10_000] {
            let mut ledger = LedgerExecutor::with_balance(U256::from(500u64));
            let outcome = validate_and_settle(
                &LocalRecovery,
                &mut ledger,
                address_of(&owner_key),
                &sig,
                digest,
                prefund(owed),
            )
            .unwrap();

            assert_eq!(outcome, ValidationOutcome::Failure);
            assert_eq!(ledger.balance, U256::from(500u64));
            assert!(ledger.calls.is_empty());
        }
    }

    #[test]
    fn test_malformed_signature_never_pays() {
        let owner_key = signing_key(1);
        let mut ledger = LedgerExecutor::with_balance(U256::from(500u64));

        let outcome = validate_and_settle(
            &LocalRecovery,
            &mut ledger,
            address_of(&owner_key),
            &[1, 2, 3],
            keccak256(b"D1"),
            prefund(100),
        )
        .unwrap();

        assert_eq!(outcome, ValidationOutcome::Failure);
        assert_eq!(ledger.balance, U256::from(500u64));
    }

    #[test]
    fn test_success_pays_exactly_owed() {
        let owner_key = signing_key(1);
        let digest = keccak256(b"D1");
        let sig = sign_digest(&owner_key, digest);

        for owed in [1u64, 250, 500] {
            let mut ledger = LedgerExecutor::with_balance(U256::from(500u64));
            let outcome = validate_and_settle(
                &LocalRecovery,
                &mut ledger,
                address_of(&owner_key),
                &sig,
                digest,
                prefund(owed),
            )
            .unwrap();

            assert_eq!(outcome, ValidationOutcome::Success);
            assert_eq!(ledger.balance, U256::from(500 - owed));
            assert_eq!(ledger.balance_of(ENTRY_POINT), U256::from(owed));
            assert_eq!(ledger.calls.len(), 1);
            assert!(ledger.calls[0].data.is_empty());
        }
    }

    #[test]
    fn test_insufficient_balance_aborts_and_keeps_balance() {
        let owner_key = signing_key(1);
        let digest = keccak256(b"D1");
        let sig = sign_digest(&owner_key, digest);
        let mut ledger = LedgerExecutor::with_balance(U256::from(500u64));

        let err = validate_and_settle(
            &LocalRecovery,
            &mut ledger,
            address_of(&owner_key),
            &sig,
            digest,
            prefund(1000),
        )
        .unwrap_err();

        assert_eq!(
            err,
            AccountError::PrefundTransferFailed {
                payee: ENTRY_POINT,
                amount: U256::from(1000u64),
            }
        );
        assert_eq!(ledger.balance, U256::from(500u64));
        assert_eq!(ledger.balance_of(ENTRY_POINT), U256::ZERO);
    }

    #[test]
    fn test_payee_rejecting_value_aborts() {
        let mut ledger = LedgerExecutor::with_balance(U256::from(500u64));
        ledger.revert_on(ENTRY_POINT, b"no thanks".to_vec());

        let err = pay_prefund(&mut ledger, prefund(10)).unwrap_err();
        assert!(matches!(err, AccountError::PrefundTransferFailed { .. }));
        assert_eq!(ledger.balance, U256::from(500u64));
    }

    #[test]
    fn test_prefund_gas_bound_is_forwarded() {
        let mut ledger = LedgerExecutor::with_balance(U256::from(500u64));
        ledger.require_gas(ENTRY_POINT, 30_000);

        let bounded = Prefund {
            gas_limit: prefund_gas_bound(2_300),
            ..prefund(10)
        };
        assert!(pay_prefund(&mut ledger, bounded).is_err());
        assert_eq!(ledger.balance, U256::from(500u64));

        let unbounded = Prefund {
            gas_limit: prefund_gas_bound(0),
            ..prefund(10)
        };
        assert!(pay_prefund(&mut ledger, unbounded).is_ok());
        assert_eq!(ledger.calls[0].gas, None);
        assert_eq!(ledger.balance, U256::from(490u64));
    }

    #[test]
    fn test_forward_call_passes_value_and_data() {
        let mut ledger = LedgerExecutor::with_balance(U256::from(100u64));
        ledger.respond_with(TARGET, alloc::vec![0xab; 32]);

        let out = forward_call(&mut ledger, TARGET, U256::from(40u64), b"\x12\x34\x56\x78").unwrap();

        assert_eq!(out, alloc::vec![0xab; 32]);
        assert_eq!(ledger.balance, U256::from(60u64));
        assert_eq!(ledger.balance_of(TARGET), U256::from(40u64));
        assert_eq!(ledger.calls[0].data, b"\x12\x34\x56\x78".to_vec());
        assert_eq!(ledger.calls[0].gas, None);
    }

    #[test]
    fn test_forward_call_failure_is_verbatim_and_atomic() {
        let revert_data = alloc::vec![0x08, 0xc3, 0x79, 0xa0, 0x00, 0x01, 0x02];
        let mut ledger = LedgerExecutor::with_balance(U256::from(100u64));
        ledger.revert_on(TARGET, revert_data.clone());

        let err = forward_call(&mut ledger, TARGET, U256::from(40u64), b"payload").unwrap_err();

        assert_eq!(err, AccountError::ForwardedCallFailed(revert_data));
        assert_eq!(ledger.balance, U256::from(100u64));
        assert_eq!(ledger.balance_of(TARGET), U256::ZERO);
        assert!(ledger.calls.is_empty());
    }

    #[test]
    fn test_forward_call_overspend_fails_with_empty_payload() {
        let mut ledger = LedgerExecutor::with_balance(U256::from(10u64));

        let err = forward_call(&mut ledger, TARGET, U256::from(11u64), &[]).unwrap_err();
        assert_eq!(err, AccountError::ForwardedCallFailed(Vec::new()));
        assert_eq!(ledger.balance, U256::from(10u64));
    }
}
