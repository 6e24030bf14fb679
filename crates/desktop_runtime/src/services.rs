//! Optional external service contracts consumed by the shell.
//!
//! The core treats all of these as optional: an absent or failing
//! implementation only disables the feature that depends on it and must
//! never take the window/session core down with it. `Noop` variants are
//! the default wiring and the test baseline.

use std::{future::Future, pin::Pin};

use serde::{Deserialize, Serialize};

/// Object-safe boxed future used by the service traits.
pub type ServiceFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Display identity of the signed-in user as reported by the auth endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserIdentity {
    /// Human-readable display name.
    pub display_name: String,
    /// Avatar reference, if any.
    pub avatar_url: Option<String>,
}

/// One entry from the notification/broadcast feed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BroadcastMessage {
    /// Stable message id.
    pub id: u64,
    /// Headline.
    pub title: String,
    /// Body text.
    pub body: String,
}

/// Auth/identity endpoint returning the current user's display identity.
pub trait IdentityService {
    /// Fetches the current identity; `Ok(None)` means signed out.
    fn current_identity(&self) -> ServiceFuture<'_, Result<Option<UserIdentity>, String>>;
}

/// Admin/ownership-status endpoint gating privileged shell sections.
pub trait OwnershipService {
    /// Whether the current user owns this installation.
    fn is_owner(&self) -> ServiceFuture<'_, Result<bool, String>>;
}

/// Periodically polled notification/broadcast feed.
pub trait BroadcastFeed {
    /// Fetches messages newer than `after_id`.
    fn poll(&self, after_id: u64) -> ServiceFuture<'_, Result<Vec<BroadcastMessage>, String>>;
}

/// Signed-out, featureless identity service.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopIdentityService;

impl IdentityService for NoopIdentityService {
    fn current_identity(&self) -> ServiceFuture<'_, Result<Option<UserIdentity>, String>> {
        Box::pin(async { Ok(None) })
    }
}

/// Ownership service that never grants privileged sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopOwnershipService;

impl OwnershipService for NoopOwnershipService {
    fn is_owner(&self) -> ServiceFuture<'_, Result<bool, String>> {
        Box::pin(async { Ok(false) })
    }
}

/// Empty broadcast feed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBroadcastFeed;

impl BroadcastFeed for NoopBroadcastFeed {
    fn poll(&self, _after_id: u64) -> ServiceFuture<'_, Result<Vec<BroadcastMessage>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}
