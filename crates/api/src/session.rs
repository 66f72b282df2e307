use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

/// Holds the bearer token attached to every outgoing request.
/// Clones share the same token; `subscribe` lets a UI react to login/logout.
#[derive(Debug, Clone)]
pub struct Session {
    token: Arc<watch::Sender<Option<String>>>,
}

impl Session {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { token: Arc::new(tx) }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    pub fn set_token(&self, token: impl Into<String>) {
        debug!("Session token updated");
        self.token.send_replace(Some(token.into()));
    }

    pub fn clear(&self) {
        debug!("Session cleared");
        self.token.send_replace(None);
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.borrow().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.token.subscribe()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
