//! Request handlers.
//!
//! Each handler resolves the session token to an explicit identity, then
//! delegates to the engine. Malformed path ids and bodies never get this
//! far — the `Path`/`Json` extractors reject them first.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, header};
use gavel_core::{auction_state, current_user_bid, place_bid, user_ledger};
use gavel_core::SessionProvider;
use gavel_types::{Auction, AuctionId, Bid, LedgerEntry, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{ApiError, AppState};

/// Body of `POST /auctions/{id}/bids`.
#[derive(Debug, Deserialize)]
pub struct PlaceBidRequest {
    pub amount: Decimal,
}

/// Success body of `POST /auctions/{id}/bids`.
#[derive(Debug, Serialize)]
pub struct PlaceBidResponse {
    pub message: String,
    pub bid_id: gavel_types::BidId,
    pub current_price: Decimal,
}

/// Body of `GET /auctions/{id}/bids`.
#[derive(Debug, Serialize)]
pub struct UserBidResponse {
    pub bid: Option<Bid>,
}

/// Body of `GET /auctions/{id}/ledger`.
#[derive(Debug, Serialize)]
pub struct LedgerResponse {
    pub entries: Vec<LedgerEntry>,
}

/// Resolve `Authorization: Bearer <token>` to a user, if any.
fn caller(state: &AppState, headers: &HeaderMap) -> Option<UserId> {
    let token = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    state.sessions.authenticate(token)
}

/// Place or replace a bid.
pub async fn handle_place_bid(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<PlaceBidRequest>,
) -> Result<Json<PlaceBidResponse>, ApiError> {
    let auction_id = AuctionId(id);
    info!(auction = %auction_id, amount = %req.amount, "bid request");

    let outcome = place_bid(
        &*state.store,
        caller(&state, &headers),
        auction_id,
        req.amount,
    )?;

    Ok(Json(PlaceBidResponse {
        message: "Bid placed successfully".to_string(),
        bid_id: outcome.bid.id,
        current_price: outcome.new_price,
    }))
}

/// The caller's current (non-refunded) bid on the auction.
pub async fn handle_get_user_bid(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<UserBidResponse>, ApiError> {
    let bid = current_user_bid(&*state.store, caller(&state, &headers), AuctionId(id))?;
    Ok(Json(UserBidResponse { bid }))
}

/// Current auction state.
pub async fn handle_get_auction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Auction>, ApiError> {
    let auction = auction_state(&*state.store, AuctionId(id))?;
    Ok(Json(auction))
}

/// The caller's ledger entries for this auction, oldest first.
pub async fn handle_get_ledger(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<LedgerResponse>, ApiError> {
    let entries = user_ledger(&*state.store, caller(&state, &headers), AuctionId(id))?;
    Ok(Json(LedgerResponse { entries }))
}
