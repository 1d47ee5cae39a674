use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::token::IssuedToken;

/// Process-wide single slot holding the most recently issued token.
///
/// Every clone shares the same slot, so it cannot tell callers apart. It is
/// only constructed when the session fallback is switched on.
#[derive(Clone, Debug, Default)]
pub(crate) struct SessionCache {
    slot: Arc<RwLock<Option<IssuedToken>>>,
}

impl SessionCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn store(&self, token: IssuedToken) {
        *self.slot.write().await = Some(token);
    }

    pub(crate) async fn fetch(&self) -> Option<String> {
        self.fetch_at(Utc::now()).await
    }

    /// Stale entries stay in the slot but read as empty.
    pub(crate) async fn fetch_at(&self, now: DateTime<Utc>) -> Option<String> {
        self.slot
            .read()
            .await
            .as_ref()
            .filter(|entry| now < entry.expires_at)
            .map(|entry| entry.token.clone())
    }

    pub(crate) async fn clear(&self) {
        self.slot.write().await.take();
    }
}
