//! Bid record and its single state transition.
//!
//! A bid's `amount` is immutable after creation; only `refunded` (and
//! `updated_at`) ever change, and only once.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AuctionId, BidId, GavelError, Result, UserId};

/// A single bid on an auction.
///
/// Invariant: at most one non-refunded bid per (auction, user) pair at
/// any time. The bid placement transaction is the sole writer of
/// `refunded`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bid {
    pub id: BidId,
    pub auction_id: AuctionId,
    pub user_id: UserId,
    /// Amount recorded at creation; never mutated.
    pub amount: Decimal,
    /// Set exactly once, when the bid is superseded or outbid.
    pub refunded: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bid {
    /// Create a fresh, active (non-refunded) bid.
    #[must_use]
    pub fn place(
        auction_id: AuctionId,
        user_id: UserId,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: BidId::new(),
            auction_id,
            user_id,
            amount,
            refunded: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this bid still holds the bidder's funds.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.refunded
    }

    /// Transition `refunded` false → true. One-way.
    ///
    /// # Errors
    /// Returns [`GavelError::Internal`] if the bid was already refunded;
    /// a double refund would double-credit the bidder.
    pub fn mark_refunded(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.refunded {
            return Err(GavelError::Internal(format!(
                "bid {} already refunded",
                self.id
            )));
        }
        self.refunded = true;
        self.updated_at = now;
        Ok(())
    }
}
