//! Read-only queries. No side effects, no locking beyond a snapshot read.

use gavel_types::{Auction, AuctionId, Bid, GavelError, LedgerEntry, Result, UserId};

use crate::store::Store;

/// The caller's own non-refunded bid on the auction, or `None`.
///
/// An unknown auction also yields `None` — a caller with no bid on a
/// missing auction and one on an existing auction look the same here.
///
/// # Errors
/// Returns [`GavelError::Unauthorized`] when `caller` is `None`.
pub fn current_user_bid<S: Store>(
    store: &S,
    caller: Option<UserId>,
    auction_id: AuctionId,
) -> Result<Option<Bid>> {
    let user_id = caller.ok_or(GavelError::Unauthorized)?;
    Ok(store.read(|tx| tx.active_bid(auction_id, user_id)))
}

/// Current state of an auction.
///
/// # Errors
/// Returns [`GavelError::AuctionNotFound`] on a miss.
pub fn auction_state<S: Store>(store: &S, auction_id: AuctionId) -> Result<Auction> {
    store
        .read(|tx| tx.auction(auction_id))
        .ok_or(GavelError::AuctionNotFound(auction_id))
}

/// The caller's ledger entries for one auction, oldest first.
///
/// # Errors
/// Returns [`GavelError::Unauthorized`] when `caller` is `None`.
pub fn user_ledger<S: Store>(
    store: &S,
    caller: Option<UserId>,
    auction_id: AuctionId,
) -> Result<Vec<LedgerEntry>> {
    let user_id = caller.ok_or(GavelError::Unauthorized)?;
    Ok(store.read(|tx| tx.entries_for(auction_id, user_id)))
}
