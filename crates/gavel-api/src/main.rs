//! Gavel API server binary.

use std::sync::Arc;

use chrono::{Duration, Utc};
use gavel_api::{AppState, router};
use gavel_core::{MemoryStore, StaticSessions};
use gavel_types::{Auction, ServerConfig, UserId, constants};
use rust_decimal::Decimal;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::from_env()?;

    let store = Arc::new(MemoryStore::new());
    let sessions = Arc::new(StaticSessions::new());

    // Auction creation and account funding are external collaborators;
    // GAVEL_DEMO=1 stands in for them with a seeded auction and bidders.
    if std::env::var("GAVEL_DEMO").is_ok_and(|v| v == "1") {
        seed_demo(&store, &sessions);
    }

    let state = AppState::new(store, sessions);
    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(
        "{} v{} listening on {}",
        constants::SERVICE_NAME,
        constants::VERSION,
        listener.local_addr()?
    );

    axum::serve(listener, router(state).into_make_service()).await?;
    Ok(())
}

/// One open auction and two funded bidders with fixed tokens.
fn seed_demo(store: &MemoryStore, sessions: &StaticSessions) {
    let auction = Auction::new(
        "Demo auction",
        Decimal::new(50, 0),
        Utc::now() + Duration::hours(24),
    );
    info!(auction = %auction.id, "demo auction seeded");
    store.insert_auction(auction);

    for (token, funds) in [("tok-alice", 100), ("tok-bob", 100)] {
        let user = UserId::new();
        store.deposit(user, Decimal::new(funds, 0));
        sessions.issue(token, user);
        info!(%user, token, "demo bidder seeded");
    }
}
