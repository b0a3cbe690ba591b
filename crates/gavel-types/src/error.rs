//! Error types for the Gavel bidding service.
//!
//! All errors use the `GV_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Request / auth errors
//! - 2xx: Bidding errors
//! - 3xx: Balance / ledger errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AuctionId, BidId};

/// Central error enum for all Gavel operations.
#[derive(Debug, Error)]
pub enum GavelError {
    // =================================================================
    // Request / Auth Errors (1xx)
    // =================================================================
    /// The caller carried no valid session.
    #[error("GV_ERR_100: Unauthorized: no authenticated caller")]
    Unauthorized,

    /// The requested auction does not exist.
    #[error("GV_ERR_101: Auction not found: {0}")]
    AuctionNotFound(AuctionId),

    /// The request was malformed (bad id, non-positive amount, etc.).
    #[error("GV_ERR_102: Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A bid referenced during a mutation was missing from the store.
    #[error("GV_ERR_103: Bid not found: {0}")]
    BidNotFound(BidId),

    // =================================================================
    // Bidding Errors (2xx)
    // =================================================================
    /// The auction is inactive, locked, or past its closing date.
    #[error("GV_ERR_200: Bidding is closed for this auction: {reason}")]
    BiddingClosed { reason: String },

    /// The offered amount does not beat the current price.
    #[error("GV_ERR_201: Bid must be higher than current price: offered {offered}, current {current}")]
    BidTooLow { offered: Decimal, current: Decimal },

    // =================================================================
    // Balance / Ledger Errors (3xx)
    // =================================================================
    /// Not enough spendable balance to cover the new bid.
    #[error("GV_ERR_300: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    /// A balance operation would produce a negative value.
    #[error("GV_ERR_301: Balance underflow")]
    BalanceUnderflow,

    /// The ledger net does not match the funds held by active bids —
    /// critical safety alert.
    #[error("GV_ERR_302: Ledger conservation violation: {reason}")]
    ConservationViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error (storage fault mid-transaction, etc.).
    #[error("GV_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("GV_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (bad listen address, missing env, etc.).
    #[error("GV_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, GavelError>;
