//! Auction record.
//!
//! Auctions are created and closed by an external collaborator; the bid
//! engine only ever raises `current_price` while the auction is open.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AuctionId, GavelError, Result};

/// A single auction listing.
///
/// Invariant: `current_price` is non-negative and monotonically
/// non-decreasing — it only moves on a successful bid placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auction {
    pub id: AuctionId,
    pub title: String,
    /// Price of the leading bid, or the starting price if no bids yet.
    pub current_price: Decimal,
    pub is_active: bool,
    /// Administrative lock; a locked auction rejects all bids.
    pub is_locked: bool,
    pub closing_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Auction {
    /// Create a new open auction with the given starting price.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        starting_price: Decimal,
        closing_date: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: AuctionId::new(),
            title: title.into(),
            current_price: starting_price,
            is_active: true,
            is_locked: false,
            closing_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether bids are accepted at `now`.
    #[must_use]
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_locked && now <= self.closing_date
    }

    /// Why the auction is closed at `now`, or `None` if it is open.
    #[must_use]
    pub fn closed_reason(&self, now: DateTime<Utc>) -> Option<&'static str> {
        if !self.is_active {
            Some("auction is inactive")
        } else if self.is_locked {
            Some("auction is locked")
        } else if now > self.closing_date {
            Some("closing date has passed")
        } else {
            None
        }
    }

    /// Raise the current price to `amount`.
    ///
    /// # Errors
    /// Returns [`GavelError::BidTooLow`] if `amount` does not exceed the
    /// current price, preserving the monotonicity invariant.
    pub fn raise_price(&mut self, amount: Decimal, now: DateTime<Utc>) -> Result<()> {
        if amount <= self.current_price {
            return Err(GavelError::BidTooLow {
                offered: amount,
                current: self.current_price,
            });
        }
        self.current_price = amount;
        self.updated_at = now;
        Ok(())
    }
}
