//! # gavel-api
//!
//! Thin HTTP surface over the bid engine:
//!
//! - `POST /auctions/{id}/bids` — place or replace a bid
//! - `GET  /auctions/{id}/bids` — the caller's current bid
//! - `GET  /auctions/{id}` — auction state
//! - `GET  /auctions/{id}/ledger` — the caller's audit entries
//!
//! Sessions arrive as `Authorization: Bearer <token>` and are resolved by
//! a [`gavel_core::SessionProvider`] before the engine is called; the
//! engine itself only ever sees an explicit `Option<UserId>`.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use gavel_core::{MemoryStore, StaticSessions};
use tower_http::cors::{Any, CorsLayer};

pub mod error;
pub mod handlers;

pub use error::ApiError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub sessions: Arc<StaticSessions>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<MemoryStore>, sessions: Arc<StaticSessions>) -> Self {
        Self { store, sessions }
    }
}

/// Build the application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/auctions/{id}/bids",
            post(handlers::handle_place_bid).get(handlers::handle_get_user_bid),
        )
        .route("/auctions/{id}", get(handlers::handle_get_auction))
        .route("/auctions/{id}/ledger", get(handlers::handle_get_ledger))
        .layer(cors)
        .with_state(state)
}
