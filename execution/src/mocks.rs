//! Test doubles for the engine's collaborators.

use std::collections::BTreeMap;

use burrow_types::{Address, EngineError, RoundId, TokenKind};
use commonware_cryptography::ed25519::PrivateKey;
use commonware_cryptography::{Hasher, Sha256, Signer};
use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::entropy::SEED_LEN;
use crate::layer::TokenLedger;

/// Deterministic account address for tests.
pub fn create_account(seed: u64) -> Address {
    PrivateKey::from_seed(seed).public_key()
}

/// Round identifier derived from a tag, standing in for a transaction id.
pub fn create_round_id(tag: &[u8]) -> RoundId {
    Sha256::hash(tag)
}

/// Deterministic per-height randomness.
pub fn create_seed(seed: u64) -> [u8; SEED_LEN] {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bytes = [0u8; SEED_LEN];
    rng.fill_bytes(&mut bytes);
    bytes
}

/// In-memory token ledger with an unbounded treasury.
#[derive(Clone, Debug, Default)]
pub struct MockLedger {
    balances: BTreeMap<(Address, TokenKind), u64>,
    /// Total paid out of the treasury via [`TokenLedger::transfer`].
    pub paid_out: u64,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self, address: &Address, kind: TokenKind, amount: u64) {
        let entry = self.balances.entry((address.clone(), kind)).or_insert(0);
        *entry = entry.saturating_add(amount);
    }
}

impl TokenLedger for MockLedger {
    fn balance(&self, address: &Address, kind: TokenKind) -> u64 {
        self.balances
            .get(&(address.clone(), kind))
            .copied()
            .unwrap_or(0)
    }

    fn transfer(
        &mut self,
        to: &Address,
        kind: TokenKind,
        amount: u64,
    ) -> Result<(), EngineError> {
        self.mint(to, kind, amount);
        self.paid_out = self.paid_out.saturating_add(amount);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        from: &Address,
        to: &Address,
        kind: TokenKind,
        amount: u64,
    ) -> Result<(), EngineError> {
        let available = self.balance(from, kind);
        if available < amount {
            return Err(EngineError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        self.balances
            .insert((from.clone(), kind), available - amount);
        self.mint(to, kind, amount);
        Ok(())
    }
}
