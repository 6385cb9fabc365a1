//! Application state shared across handlers.

use std::sync::Arc;

use crate::{config::AdminConfig, store::MockStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: MockStore,
}

impl AppState {
    #[must_use]
    pub fn new(config: AdminConfig, store: MockStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn store(&self) -> &MockStore {
        &self.inner.store
    }
}
