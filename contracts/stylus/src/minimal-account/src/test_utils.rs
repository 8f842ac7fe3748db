//! Key and signing helpers shared by the unit tests.

use alloc::{collections::BTreeMap, vec::Vec};

use k256::ecdsa::SigningKey;
use minimal_account_types::{eth_signed_message_hash, CallExecutor};
use stylus_sdk::alloy_primitives::{keccak256, Address, FixedBytes, U256};

/// Deterministic key whose scalar is `seed` (must be non-zero).
pub fn signing_key(seed: u8) -> SigningKey {
    let mut bytes = [0u8; 32];
    bytes[31] = seed;
    SigningKey::from_slice(&bytes).expect("valid scalar")
}

pub fn address_of(key: &SigningKey) -> Address {
    let encoded = key.verifying_key().to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// `r || s || v` over the bare digest, v in {27, 28}.
pub fn sign_raw(key: &SigningKey, digest: FixedBytes<32>) -> Vec<u8> {
    let (sig, recid) = key
        .sign_prehash_recoverable(digest.as_slice())
        .expect("sign digest");
    let mut out = sig.to_bytes().to_vec();
    out.push(recid.to_byte() + 27);
    out
}

/// Owner-style signature: personal-message prefix applied first.
pub fn sign_digest(key: &SigningKey, digest: FixedBytes<32>) -> Vec<u8> {
    sign_raw(key, eth_signed_message_hash(digest))
}

/// One successful outbound call seen by [`LedgerExecutor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall {
    pub to: Address,
    pub value: U256,
    pub data: Vec<u8>,
    pub gas: Option<u64>,
}

/// In-memory [`CallExecutor`] with EVM-style rollback: a failed call changes nothing.
#[derive(Debug, Default)]
pub struct LedgerExecutor {
    /// The account's own balance.
    pub balance: U256,
    pub calls: Vec<RecordedCall>,
    credited: BTreeMap<Address, U256>,
    reverts: BTreeMap<Address, Vec<u8>>,
    responses: BTreeMap<Address, Vec<u8>>,
    min_gas: BTreeMap<Address, u64>,
}

impl LedgerExecutor {
    pub fn with_balance(balance: U256) -> Self {
        Self {
            balance,
            ..Default::default()
        }
    }

    pub fn revert_on(&mut self, to: Address, data: Vec<u8>) {
        self.reverts.insert(to, data);
    }

    pub fn respond_with(&mut self, to: Address, data: Vec<u8>) {
        self.responses.insert(to, data);
    }

    /// Calls to `to` with a gas limit below `gas` run out of gas.
    pub fn require_gas(&mut self, to: Address, gas: u64) {
        self.min_gas.insert(to, gas);
    }

    pub fn balance_of(&self, who: Address) -> U256 {
        self.credited.get(&who).copied().unwrap_or_default()
    }
}

impl CallExecutor for LedgerExecutor {
    fn call(
        &mut self,
        to: Address,
        value: U256,
        data: &[u8],
        gas: Option<u64>,
    ) -> Result<Vec<u8>, Vec<u8>> {
        if value > self.balance {
            return Err(Vec::new());
        }
        if let (Some(limit), Some(needed)) = (gas, self.min_gas.get(&to)) {
            if limit < *needed {
                return Err(Vec::new());
            }
        }
        if let Some(revert) = self.reverts.get(&to) {
            return Err(revert.clone());
        }

        self.balance -= value;
        *self.credited.entry(to).or_default() += value;
        self.calls.push(RecordedCall {
            to,
            value,
            data: data.to_vec(),
            gas,
        });
        Ok(self.responses.get(&to).cloned().unwrap_or_default())
    }
}
