//! # gavel-types
//!
//! Shared types, errors, and configuration for the **Gavel** bidding service.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AuctionId`], [`BidId`], [`UserId`], [`EntryId`]
//! - **Auction record**: [`Auction`]
//! - **Bid record**: [`Bid`]
//! - **Ledger model**: [`LedgerEntry`], [`LedgerEntryType`]
//! - **Configuration**: [`ServerConfig`]
//! - **Errors**: [`GavelError`] with `GV_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod auction;
pub mod bid;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod ledger;

// Re-export all primary types at crate root for ergonomic imports:
//   use gavel_types::{Auction, Bid, LedgerEntry, GavelError, ...};

pub use auction::*;
pub use bid::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use ledger::*;

// Constants are accessed via `gavel_types::constants::FOO`
// (not re-exported to avoid name collisions).
