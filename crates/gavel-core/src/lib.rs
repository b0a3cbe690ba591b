//! # gavel-core
//!
//! The bid placement engine: validation, the atomic place-or-replace
//! transaction, and read-only queries over auction and ledger state.
//!
//! ## Architecture
//!
//! The engine sits between the API layer and storage:
//! 1. **Store / StoreTx**: small storage interface with all-or-nothing
//!    transactions (read auction, read/write bid, read/write balance,
//!    append ledger entry)
//! 2. **MemoryStore**: serialized in-memory store; a transaction commits
//!    fully or leaves no trace
//! 3. **place_bid**: the core transaction — validate, refund-replace,
//!    hold, refund-outbid, reprice
//! 4. **queries**: current user bid, auction state, ledger statement
//! 5. **verify_conservation**: ledger-vs-holds invariant checker
//!
//! ## Bid Flow
//!
//! ```text
//! API → place_bid → Store.transaction → [validate → refund own bid
//!     → insert bid + hold → refund outbid → raise price] → commit
//! ```
//!
//! Identity is passed in explicitly; the engine never reads ambient
//! session state.

pub mod audit;
pub mod bidding;
pub mod memory;
pub mod query;
pub mod session;
pub mod store;

pub use audit::verify_conservation;
pub use bidding::{BidOutcome, place_bid};
pub use memory::MemoryStore;
pub use query::{auction_state, current_user_bid, user_ledger};
pub use session::{SessionProvider, StaticSessions};
pub use store::{Store, StoreTx};
