//! Bid placement — the atomic place-or-replace transaction.
//!
//! The whole sequence runs inside one [`Store::transaction`]:
//! 1. Validate (auction exists, open, amount beats price, funds cover it)
//! 2. Refund the caller's own superseded bid, if any
//! 3. Insert the new bid and hold its amount
//! 4. Refund the previously-leading bidder, if a different user
//! 5. Raise the auction's current price
//!
//! If any step fails, nothing is applied. A replaced bid only ever costs
//! the caller the delta between old and new amount, and an outbid bid is
//! marked refunded in the same step that returns its funds, so a
//! non-refunded bid row always corresponds to held money.

use chrono::Utc;
use gavel_types::{Auction, AuctionId, Bid, GavelError, LedgerEntry, Result, UserId, constants};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::store::{Store, StoreTx};

/// Confirmation returned on a successful placement.
#[derive(Debug, Clone, Serialize)]
pub struct BidOutcome {
    /// The newly-created bid.
    pub bid: Bid,
    /// Auction price before this placement.
    pub previous_price: Decimal,
    /// Auction price after this placement (equals the bid amount).
    pub new_price: Decimal,
}

/// Place or replace a bid on an auction.
///
/// `caller` is the explicit authenticated identity; `None` means the
/// request carried no session.
///
/// # Errors
/// - [`GavelError::Unauthorized`] — no caller
/// - [`GavelError::InvalidInput`] — non-positive or sub-cent amount
/// - [`GavelError::AuctionNotFound`] — unknown auction
/// - [`GavelError::BiddingClosed`] — inactive, locked, or past closing
/// - [`GavelError::BidTooLow`] — amount does not beat the current price
/// - [`GavelError::InsufficientBalance`] — balance plus the caller's own
///   active hold does not cover the amount
pub fn place_bid<S: Store>(
    store: &S,
    caller: Option<UserId>,
    auction_id: AuctionId,
    amount: Decimal,
) -> Result<BidOutcome> {
    let user_id = caller.ok_or(GavelError::Unauthorized)?;
    if amount <= Decimal::ZERO {
        return Err(GavelError::InvalidInput {
            reason: format!("bid amount must be positive, got {amount}"),
        });
    }
    // Trailing zeros are stripped first, so 60.00 passes and 60.001 fails.
    if amount.normalize().scale() > constants::MONEY_PRECISION {
        return Err(GavelError::InvalidInput {
            reason: format!(
                "bid amount exceeds {} decimal places: {amount}",
                constants::MONEY_PRECISION
            ),
        });
    }

    let outcome = store.transaction(|tx| execute(tx, user_id, auction_id, amount))?;

    info!(
        auction = %auction_id,
        user = %user_id,
        amount = %outcome.new_price,
        previous_price = %outcome.previous_price,
        "bid placed"
    );
    Ok(outcome)
}

/// The transactional body. Validation runs inside the transaction so a
/// competing bid committed first is always visible here.
fn execute(
    tx: &mut dyn StoreTx,
    user_id: UserId,
    auction_id: AuctionId,
    amount: Decimal,
) -> Result<BidOutcome> {
    let now = Utc::now();

    let mut auction = tx
        .auction(auction_id)
        .ok_or(GavelError::AuctionNotFound(auction_id))?;

    if let Some(reason) = auction.closed_reason(now) {
        return Err(GavelError::BiddingClosed {
            reason: reason.to_string(),
        });
    }

    if amount <= auction.current_price {
        return Err(GavelError::BidTooLow {
            offered: amount,
            current: auction.current_price,
        });
    }

    let existing = tx.active_bid(auction_id, user_id);

    // The caller's own hold is released in this same transaction, so it
    // counts toward covering the new amount. Net charge is the delta.
    let own_hold = existing.as_ref().map_or(Decimal::ZERO, |b| b.amount);
    let available = tx.balance(user_id) + own_hold;
    if available < amount {
        return Err(GavelError::InsufficientBalance {
            needed: amount,
            available,
        });
    }

    // Identify the bidder to refund as outbid before the bid table moves.
    let outbid = tx.leading_bid_excluding(auction_id, existing.as_ref().map(|b| b.id));

    if let Some(prior) = existing {
        refund_bid(
            tx,
            prior,
            format!("Previous bid refunded on auction: {}", auction.title),
        )?;
    }

    let bid = Bid::place(auction_id, user_id, amount, now);
    tx.insert_bid(bid.clone());
    tx.debit(user_id, amount)?;
    tx.append_entry(LedgerEntry::hold(
        user_id,
        auction_id,
        bid.id,
        amount,
        format!("Bid placed on auction: {}", auction.title),
        now,
    ));

    if let Some(prev) = outbid {
        if prev.user_id != user_id {
            refund_bid(
                tx,
                prev,
                format!("Bid refunded - outbid on auction: {}", auction.title),
            )?;
        }
    }

    let previous_price = auction.current_price;
    auction.raise_price(amount, now)?;
    tx.put_auction(auction);

    Ok(BidOutcome {
        bid,
        previous_price,
        new_price: amount,
    })
}

/// Flip a bid to refunded, credit its amount back, and append the audit
/// entry — the three legs of every refund, in one place.
fn refund_bid(tx: &mut dyn StoreTx, mut bid: Bid, description: String) -> Result<()> {
    let now = Utc::now();
    bid.mark_refunded(now)?;
    tx.update_bid(bid.clone())?;
    tx.credit(bid.user_id, bid.amount);
    tx.append_entry(LedgerEntry::refund(
        bid.user_id,
        bid.auction_id,
        bid.id,
        bid.amount,
        description,
        now,
    ));
    Ok(())
}
