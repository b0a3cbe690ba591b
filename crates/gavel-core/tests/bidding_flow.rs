//! End-to-end tests for the bid placement transaction.
//!
//! These exercise the full flow through the public API of the crate:
//! validation, place-or-replace, outbid refunds, repricing, the ledger
//! audit trail, and serialization of competing bids.

use std::sync::Arc;

use chrono::{Duration, Utc};
use gavel_core::{
    MemoryStore, Store, StoreTx, current_user_bid, place_bid, user_ledger, verify_conservation,
};
use gavel_types::{Auction, AuctionId, GavelError, LedgerEntryType, UserId};
use rust_decimal::Decimal;

fn dollars(n: i64) -> Decimal {
    Decimal::new(n, 0)
}

fn open_auction(store: &MemoryStore, starting_price: i64) -> AuctionId {
    let auction = Auction::new(
        "Mid-century lamp",
        dollars(starting_price),
        Utc::now() + Duration::hours(1),
    );
    let id = auction.id;
    store.insert_auction(auction);
    id
}

fn funded_user(store: &MemoryStore, amount: i64) -> UserId {
    let user = UserId::new();
    store.deposit(user, dollars(amount));
    user
}

// =============================================================================
// Test: first bid on a fresh auction charges and reprices
// =============================================================================
#[test]
fn first_bid_reprices_and_charges() {
    let store = MemoryStore::new();
    let auction_id = open_auction(&store, 50);
    let alice = funded_user(&store, 100);

    let outcome = place_bid(&store, Some(alice), auction_id, dollars(60)).unwrap();
    assert_eq!(outcome.previous_price, dollars(50));
    assert_eq!(outcome.new_price, dollars(60));
    assert_eq!(outcome.bid.amount, dollars(60));
    assert!(!outcome.bid.refunded);

    assert_eq!(store.read(|tx| tx.balance(alice)), dollars(40));
    assert_eq!(
        store.read(|tx| tx.auction(auction_id)).unwrap().current_price,
        dollars(60)
    );
    verify_conservation(&store).unwrap();
}

// =============================================================================
// Test: replacing one's own bid charges only the delta
// =============================================================================
#[test]
fn replace_own_bid_nets_the_delta() {
    let store = MemoryStore::new();
    let auction_id = open_auction(&store, 50);
    let alice = funded_user(&store, 100);

    place_bid(&store, Some(alice), auction_id, dollars(60)).unwrap();
    assert_eq!(store.read(|tx| tx.balance(alice)), dollars(40));

    // Balance is only 40, but the 60 hold comes back in the same
    // transaction — the net charge is 10.
    place_bid(&store, Some(alice), auction_id, dollars(70)).unwrap();
    assert_eq!(store.read(|tx| tx.balance(alice)), dollars(30));
    assert_eq!(
        store.read(|tx| tx.auction(auction_id)).unwrap().current_price,
        dollars(70)
    );

    // The replaced bid is refunded; exactly one bid stays active.
    let bid = current_user_bid(&store, Some(alice), auction_id)
        .unwrap()
        .unwrap();
    assert_eq!(bid.amount, dollars(70));
    let active = store
        .read(|tx: &dyn StoreTx| tx.all_bids())
        .into_iter()
        .filter(gavel_types::Bid::is_active)
        .count();
    assert_eq!(active, 1);
    verify_conservation(&store).unwrap();
}

// =============================================================================
// Test: outbidding refunds the previous leader
// =============================================================================
#[test]
fn outbid_refunds_previous_leader() {
    let store = MemoryStore::new();
    let auction_id = open_auction(&store, 50);
    let alice = funded_user(&store, 100);
    let bob = funded_user(&store, 100);

    place_bid(&store, Some(alice), auction_id, dollars(60)).unwrap();
    place_bid(&store, Some(bob), auction_id, dollars(70)).unwrap();

    // Alice has her money back and no active bid.
    assert_eq!(store.read(|tx| tx.balance(alice)), dollars(100));
    assert!(
        current_user_bid(&store, Some(alice), auction_id)
            .unwrap()
            .is_none()
    );

    // Her ledger shows hold then refund for the same bid.
    let entries = user_ledger(&store, Some(alice), auction_id).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].entry_type, LedgerEntryType::BidHold);
    assert_eq!(entries[1].entry_type, LedgerEntryType::BidRefund);
    assert_eq!(entries[0].bid_id, entries[1].bid_id);
    assert_eq!(entries[0].amount, dollars(60));

    assert_eq!(store.read(|tx| tx.balance(bob)), dollars(30));
    verify_conservation(&store).unwrap();
}

// =============================================================================
// Test: closed auction rejects without mutation
// =============================================================================
#[test]
fn past_closing_date_rejects_all_bids() {
    let store = MemoryStore::new();
    let auction = Auction::new("Old radio", dollars(50), Utc::now() - Duration::minutes(1));
    let auction_id = auction.id;
    store.insert_auction(auction);
    let alice = funded_user(&store, 100);

    let err = place_bid(&store, Some(alice), auction_id, dollars(60)).unwrap_err();
    assert!(matches!(err, GavelError::BiddingClosed { .. }));

    assert_eq!(store.read(|tx| tx.balance(alice)), dollars(100));
    assert!(store.read(|tx: &dyn StoreTx| tx.all_bids()).is_empty());
    assert!(store.read(|tx: &dyn StoreTx| tx.all_entries()).is_empty());
}

// =============================================================================
// Test: low bid rejected
// =============================================================================
#[test]
fn bid_below_current_price_rejected() {
    let store = MemoryStore::new();
    let auction_id = open_auction(&store, 50);
    let alice = funded_user(&store, 100);

    let err = place_bid(&store, Some(alice), auction_id, dollars(40)).unwrap_err();
    assert!(matches!(
        err,
        GavelError::BidTooLow { offered, current }
            if offered == dollars(40) && current == dollars(50)
    ));
    assert!(store.read(|tx: &dyn StoreTx| tx.all_bids()).is_empty());
}

// =============================================================================
// Test: competing concurrent bids, exactly one wins
// =============================================================================
#[test]
fn concurrent_equal_bids_serialize() {
    let store = Arc::new(MemoryStore::new());
    let auction_id = open_auction(&store, 50);
    let alice = funded_user(&store, 100);
    let bob = funded_user(&store, 100);

    let handles: Vec<_> = [alice, bob]
        .into_iter()
        .map(|user| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || place_bid(&*store, Some(user), auction_id, dollars(70)))
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("bidder thread panicked"))
        .collect();

    let wins = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1, "exactly one of two equal bids must win");
    let loss = results.into_iter().find_map(std::result::Result::err).unwrap();
    assert!(
        matches!(loss, GavelError::BidTooLow { current, .. } if current == dollars(70)),
        "loser must observe the committed price: {loss}"
    );

    // Price reflects the single winner; the loser paid nothing.
    assert_eq!(
        store.read(|tx| tx.auction(auction_id)).unwrap().current_price,
        dollars(70)
    );
    let balances = store.read(|tx| (tx.balance(alice), tx.balance(bob)));
    assert_eq!(
        [balances.0, balances.1].iter().filter(|b| **b == dollars(30)).count(),
        1
    );
    assert_eq!(
        [balances.0, balances.1].iter().filter(|b| **b == dollars(100)).count(),
        1
    );
    verify_conservation(&*store).unwrap();
}

// =============================================================================
// Test: a long bidding war conserves every balance
// =============================================================================
#[test]
fn bidding_war_conserves_funds() {
    let store = MemoryStore::new();
    let auction_id = open_auction(&store, 10);
    let alice = funded_user(&store, 1_000);
    let bob = funded_user(&store, 1_000);

    let mut price = 10;
    for round in 0..10 {
        price += 5;
        let bidder = if round % 2 == 0 { alice } else { bob };
        place_bid(&store, Some(bidder), auction_id, dollars(price)).unwrap();
        verify_conservation(&store).unwrap();
    }

    // Bob placed the last bid; alice is fully refunded.
    assert_eq!(store.read(|tx| tx.balance(alice)), dollars(1_000));
    assert_eq!(store.read(|tx| tx.balance(bob)), dollars(1_000 - 60));
    assert_eq!(
        store.read(|tx| tx.auction(auction_id)).unwrap().current_price,
        dollars(60)
    );

    // Only the final bid is still active.
    let active: Vec<_> = store
        .read(|tx: &dyn StoreTx| tx.all_bids())
        .into_iter()
        .filter(gavel_types::Bid::is_active)
        .collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].user_id, bob);
    assert_eq!(active[0].amount, dollars(60));
}

// =============================================================================
// Test: price only ever moves up
// =============================================================================
#[test]
fn current_price_is_monotonic() {
    let store = MemoryStore::new();
    let auction_id = open_auction(&store, 50);
    let alice = funded_user(&store, 10_000);
    let bob = funded_user(&store, 10_000);

    let mut last = dollars(50);
    for amount in [60, 75, 80, 120, 121] {
        let bidder = if amount % 2 == 0 { alice } else { bob };
        place_bid(&store, Some(bidder), auction_id, dollars(amount)).unwrap();
        let price = store.read(|tx| tx.auction(auction_id)).unwrap().current_price;
        assert!(price > last, "price must strictly increase");
        last = price;
    }

    // A stale re-read of an old price can never be accepted.
    let err = place_bid(&store, Some(alice), auction_id, dollars(100)).unwrap_err();
    assert!(matches!(err, GavelError::BidTooLow { .. }));
}
