//! Ledger conservation invariant checker.
//!
//! Invariant enforced over the whole store:
//! ```text
//! ∀ (user, auction): Σ(BidHold) − Σ(BidRefund) == Σ(active bid amounts)
//! ```
//!
//! If this ever breaks, a balance moved without its audit entry (or an
//! entry was written without the move) — the ultimate safety net for the
//! bid transaction.

use std::collections::{HashMap, HashSet};

use gavel_types::{AuctionId, GavelError, Result, UserId};
use rust_decimal::Decimal;

use crate::store::Store;

/// Verify that the ledger net matches the funds held by active bids,
/// per (user, auction).
///
/// # Errors
/// Returns [`GavelError::ConservationViolation`] naming the first
/// mismatching pair.
pub fn verify_conservation<S: Store>(store: &S) -> Result<()> {
    let (held, net) = store.read(|tx| {
        let mut held: HashMap<(UserId, AuctionId), Decimal> = HashMap::new();
        for bid in tx.all_bids() {
            if bid.is_active() {
                *held
                    .entry((bid.user_id, bid.auction_id))
                    .or_insert(Decimal::ZERO) += bid.amount;
            }
        }

        let mut net: HashMap<(UserId, AuctionId), Decimal> = HashMap::new();
        for entry in tx.all_entries() {
            *net.entry((entry.user_id, entry.auction_id))
                .or_insert(Decimal::ZERO) += entry.held_delta();
        }

        (held, net)
    });

    let keys: HashSet<_> = held.keys().chain(net.keys()).copied().collect();
    for key in keys {
        let held_amount = held.get(&key).copied().unwrap_or(Decimal::ZERO);
        let net_amount = net.get(&key).copied().unwrap_or(Decimal::ZERO);
        if held_amount != net_amount {
            let (user, auction) = key;
            return Err(GavelError::ConservationViolation {
                reason: format!(
                    "user {user} auction {auction}: ledger net {net_amount} != active holds {held_amount}"
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidding::place_bid;
    use crate::memory::MemoryStore;
    use crate::store::{Store, StoreTx};
    use chrono::{Duration, Utc};
    use gavel_types::{Auction, Bid, LedgerEntry};

    fn dollars(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    fn setup() -> (MemoryStore, AuctionId) {
        let store = MemoryStore::new();
        let auction = Auction::new(
            "Armchair",
            dollars(50),
            Utc::now() + Duration::hours(1),
        );
        let id = auction.id;
        store.insert_auction(auction);
        (store, id)
    }

    #[test]
    fn empty_store_conserves() {
        let (store, _) = setup();
        verify_conservation(&store).unwrap();
    }

    #[test]
    fn conserves_through_placements_and_refunds() {
        let (store, auction_id) = setup();
        let alice = UserId::new();
        let bob = UserId::new();
        store.deposit(alice, dollars(200));
        store.deposit(bob, dollars(200));

        place_bid(&store, Some(alice), auction_id, dollars(60)).unwrap();
        verify_conservation(&store).unwrap();

        place_bid(&store, Some(bob), auction_id, dollars(70)).unwrap();
        verify_conservation(&store).unwrap();

        place_bid(&store, Some(alice), auction_id, dollars(80)).unwrap();
        place_bid(&store, Some(alice), auction_id, dollars(90)).unwrap();
        verify_conservation(&store).unwrap();
    }

    #[test]
    fn detects_unaudited_hold() {
        let (store, auction_id) = setup();
        let user = UserId::new();
        store.deposit(user, dollars(100));

        // A bid inserted without its ledger entry must trip the audit.
        store
            .transaction(|tx| {
                let bid = Bid::place(auction_id, user, dollars(60), Utc::now());
                tx.insert_bid(bid);
                tx.debit(user, dollars(60))
            })
            .unwrap();

        let err = verify_conservation(&store).unwrap_err();
        assert!(matches!(err, GavelError::ConservationViolation { .. }));
    }

    #[test]
    fn detects_orphan_entry() {
        let (store, auction_id) = setup();
        let user = UserId::new();

        store
            .transaction(|tx| {
                tx.append_entry(LedgerEntry::hold(
                    user,
                    auction_id,
                    gavel_types::BidId::new(),
                    dollars(60),
                    "stray",
                    Utc::now(),
                ));
                Ok(())
            })
            .unwrap();

        let err = verify_conservation(&store).unwrap_err();
        assert!(matches!(err, GavelError::ConservationViolation { .. }));
    }
}
