//! Storage interface for the bid engine.
//!
//! The engine is storage-agnostic: it talks to a [`Store`] that hands out
//! transactional views. A transaction either commits every mutation made
//! through its [`StoreTx`] or none of them — no partially-applied state is
//! ever observable by other callers.

use gavel_types::{Auction, AuctionId, Bid, BidId, LedgerEntry, Result, UserId};
use rust_decimal::Decimal;

/// A transactional view over auctions, bids, balances, and the ledger.
///
/// Mutations made through this trait are staged; the enclosing
/// [`Store::transaction`] decides whether they become visible.
pub trait StoreTx {
    /// Look up an auction by id.
    fn auction(&self, id: AuctionId) -> Option<Auction>;

    /// Replace an auction record (used to raise the current price).
    fn put_auction(&mut self, auction: Auction);

    /// The user's non-refunded bid on the auction, if any.
    /// By invariant there is at most one.
    fn active_bid(&self, auction_id: AuctionId, user_id: UserId) -> Option<Bid>;

    /// The most recent non-refunded bid on the auction, skipping
    /// `exclude` (the caller's own bid when replacing). `None` when no
    /// other active bid exists.
    fn leading_bid_excluding(&self, auction_id: AuctionId, exclude: Option<BidId>) -> Option<Bid>;

    /// Append a freshly-placed bid.
    fn insert_bid(&mut self, bid: Bid);

    /// Overwrite an existing bid record (refunded-flag transition only).
    ///
    /// # Errors
    /// Returns [`gavel_types::GavelError::BidNotFound`] if the bid is
    /// not in the store.
    fn update_bid(&mut self, bid: Bid) -> Result<()>;

    /// The user's spendable balance; zero for unknown users.
    fn balance(&self, user_id: UserId) -> Decimal;

    /// Credit the user's balance.
    fn credit(&mut self, user_id: UserId, amount: Decimal);

    /// Debit the user's balance.
    ///
    /// # Errors
    /// Returns [`gavel_types::GavelError::BalanceUnderflow`] if the
    /// balance would go negative.
    fn debit(&mut self, user_id: UserId, amount: Decimal) -> Result<()>;

    /// Append an audit entry. The ledger is append-only.
    fn append_entry(&mut self, entry: LedgerEntry);

    /// The user's ledger entries for one auction, oldest first.
    fn entries_for(&self, auction_id: AuctionId, user_id: UserId) -> Vec<LedgerEntry>;

    /// Every bid in the store, creation order. Used by the audit.
    fn all_bids(&self) -> Vec<Bid>;

    /// Every ledger entry, append order. Used by the audit.
    fn all_entries(&self) -> Vec<LedgerEntry>;
}

/// Hands out transactional and read-only views of the underlying state.
pub trait Store {
    /// Run `f` inside a transaction. If `f` returns `Ok`, every staged
    /// mutation commits atomically; on `Err` nothing is applied.
    ///
    /// Concurrent transactions on the same store are serialized, so a
    /// competing bid committed first is visible to the next transaction's
    /// validation reads.
    ///
    /// # Errors
    /// Propagates the error returned by `f`.
    fn transaction<T>(&self, f: impl FnOnce(&mut dyn StoreTx) -> Result<T>) -> Result<T>;

    /// Run `f` against a read-only snapshot. No side effects.
    fn read<T>(&self, f: impl FnOnce(&dyn StoreTx) -> T) -> T;
}
