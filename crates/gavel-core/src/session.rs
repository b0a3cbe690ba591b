//! Session resolution — the identity collaborator boundary.
//!
//! The engine never reads ambient request state; callers resolve their
//! credentials to an explicit `Option<UserId>` up front. The real
//! identity provider lives outside this service; [`StaticSessions`] is
//! the in-process implementation used by the API layer and tests.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use gavel_types::UserId;

/// Resolves opaque bearer tokens to authenticated users.
pub trait SessionProvider: Send + Sync {
    /// `Some(user)` for a live session, `None` otherwise.
    fn authenticate(&self, token: &str) -> Option<UserId>;
}

/// Token → user map for in-process session management.
#[derive(Debug, Default)]
pub struct StaticSessions {
    tokens: RwLock<HashMap<String, UserId>>,
}

impl StaticSessions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session token for a user.
    pub fn issue(&self, token: impl Into<String>, user_id: UserId) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.into(), user_id);
    }

    /// Invalidate a session token.
    pub fn revoke(&self, token: &str) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);
    }
}

impl SessionProvider for StaticSessions {
    fn authenticate(&self, token: &str) -> Option<UserId> {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .copied()
    }
}
