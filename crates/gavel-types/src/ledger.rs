//! Balance ledger types for the Gavel audit trail.
//!
//! Every balance mutation (hold or refund) produces exactly one
//! [`LedgerEntry`]. Entries are append-only — never updated or deleted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AuctionId, BidId, EntryId, UserId};

/// The kind of balance movement this entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerEntryType {
    /// Funds debited from a user's balance for an active bid.
    BidHold,
    /// Funds credited back when a bid is superseded or outbid.
    BidRefund,
}

impl std::fmt::Display for LedgerEntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BidHold => write!(f, "BID_HOLD"),
            Self::BidRefund => write!(f, "BID_REFUND"),
        }
    }
}

/// One append-only audit record of a balance mutation.
///
/// The ledger is the source of truth for reconciling balances against
/// active bids: per (user, auction), Σ holds − Σ refunds must equal the
/// amount currently held by that user's active bids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: EntryId,
    pub user_id: UserId,
    pub auction_id: AuctionId,
    /// The bid whose funds moved.
    pub bid_id: BidId,
    pub entry_type: LedgerEntryType,
    pub amount: Decimal,
    /// Human-readable context for account statements.
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Record a hold: `amount` debited for `bid_id`.
    #[must_use]
    pub fn hold(
        user_id: UserId,
        auction_id: AuctionId,
        bid_id: BidId,
        amount: Decimal,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            user_id,
            auction_id,
            bid_id,
            entry_type: LedgerEntryType::BidHold,
            amount,
            description: description.into(),
            created_at: now,
        }
    }

    /// Record a refund: `amount` credited back for `bid_id`.
    #[must_use]
    pub fn refund(
        user_id: UserId,
        auction_id: AuctionId,
        bid_id: BidId,
        amount: Decimal,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            user_id,
            auction_id,
            bid_id,
            entry_type: LedgerEntryType::BidRefund,
            amount,
            description: description.into(),
            created_at: now,
        }
    }

    /// Signed effect of this entry on the user's held amount:
    /// positive for holds, negative for refunds.
    #[must_use]
    pub fn held_delta(&self) -> Decimal {
        match self.entry_type {
            LedgerEntryType::BidHold => self.amount,
            LedgerEntryType::BidRefund => -self.amount,
        }
    }
}
