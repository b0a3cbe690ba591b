//! In-memory store with all-or-nothing transactions.
//!
//! All state lives behind a single `Mutex`. A transaction clones the
//! state, lets the closure mutate the clone through [`StoreTx`], and
//! swaps the clone in only on `Ok`. Holding the lock for the whole
//! closure serializes competing transactions: the second bidder's
//! validation always sees the first bidder's committed price.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use gavel_types::{
    Auction, AuctionId, Bid, BidId, GavelError, LedgerEntry, Result, UserId,
};
use rust_decimal::Decimal;

use crate::store::{Store, StoreTx};

/// The complete store contents. Cloned per transaction.
#[derive(Debug, Clone, Default)]
struct StoreState {
    auctions: HashMap<AuctionId, Auction>,
    /// Creation order — the leading bid is the last active entry.
    bids: Vec<Bid>,
    balances: HashMap<UserId, Decimal>,
    /// Append-only.
    ledger: Vec<LedgerEntry>,
}

impl StoreTx for StoreState {
    fn auction(&self, id: AuctionId) -> Option<Auction> {
        self.auctions.get(&id).cloned()
    }

    fn put_auction(&mut self, auction: Auction) {
        self.auctions.insert(auction.id, auction);
    }

    fn active_bid(&self, auction_id: AuctionId, user_id: UserId) -> Option<Bid> {
        self.bids
            .iter()
            .find(|b| b.auction_id == auction_id && b.user_id == user_id && b.is_active())
            .cloned()
    }

    fn leading_bid_excluding(&self, auction_id: AuctionId, exclude: Option<BidId>) -> Option<Bid> {
        self.bids
            .iter()
            .rev()
            .find(|b| b.auction_id == auction_id && b.is_active() && Some(b.id) != exclude)
            .cloned()
    }

    fn insert_bid(&mut self, bid: Bid) {
        self.bids.push(bid);
    }

    fn update_bid(&mut self, bid: Bid) -> Result<()> {
        let slot = self
            .bids
            .iter_mut()
            .find(|b| b.id == bid.id)
            .ok_or(GavelError::BidNotFound(bid.id))?;
        *slot = bid;
        Ok(())
    }

    fn balance(&self, user_id: UserId) -> Decimal {
        self.balances.get(&user_id).copied().unwrap_or(Decimal::ZERO)
    }

    fn credit(&mut self, user_id: UserId, amount: Decimal) {
        *self.balances.entry(user_id).or_insert(Decimal::ZERO) += amount;
    }

    fn debit(&mut self, user_id: UserId, amount: Decimal) -> Result<()> {
        let balance = self.balances.entry(user_id).or_insert(Decimal::ZERO);
        if *balance < amount {
            return Err(GavelError::BalanceUnderflow);
        }
        *balance -= amount;
        Ok(())
    }

    fn append_entry(&mut self, entry: LedgerEntry) {
        self.ledger.push(entry);
    }

    fn entries_for(&self, auction_id: AuctionId, user_id: UserId) -> Vec<LedgerEntry> {
        self.ledger
            .iter()
            .filter(|e| e.auction_id == auction_id && e.user_id == user_id)
            .cloned()
            .collect()
    }

    fn all_bids(&self) -> Vec<Bid> {
        self.bids.clone()
    }

    fn all_entries(&self) -> Vec<LedgerEntry> {
        self.ledger.clone()
    }
}

/// Serialized in-memory [`Store`].
///
/// Also carries the seeding hooks for the external collaborators that
/// create auctions and fund accounts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an auction. Auction creation is a collaborator concern, not
    /// part of the bid transaction.
    pub fn insert_auction(&self, auction: Auction) {
        self.lock().auctions.insert(auction.id, auction);
    }

    /// Fund a user's spendable balance. Deposits are a collaborator
    /// concern and do not appear in the bid ledger.
    pub fn deposit(&self, user_id: UserId, amount: Decimal) {
        *self.lock().balances.entry(user_id).or_insert(Decimal::ZERO) += amount;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Store for MemoryStore {
    fn transaction<T>(&self, f: impl FnOnce(&mut dyn StoreTx) -> Result<T>) -> Result<T> {
        let mut guard = self.lock();
        let mut working = guard.clone();
        let out = f(&mut working)?;
        *guard = working;
        Ok(out)
    }

    fn read<T>(&self, f: impl FnOnce(&dyn StoreTx) -> T) -> T {
        f(&*self.lock())
    }
}
