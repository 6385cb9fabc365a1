//! One-shot toast messages carried in the session between a mutation and the
//! next rendered page.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Session key holding pending flashes.
pub const FLASH_KEY: &str = "flash";

/// Kind of toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    /// CSS modifier class.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Success => "toast-success",
            Self::Error => "toast-error",
        }
    }
}

/// A toast message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

/// Queue a flash for the next rendered page.
///
/// Session failures are logged and otherwise ignored.
pub async fn push(session: &Session, flash: Flash) {
    let mut pending: Vec<Flash> = session
        .get(FLASH_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    pending.push(flash);

    if let Err(e) = session.insert(FLASH_KEY, pending).await {
        tracing::warn!(error = %e, "Failed to store flash message");
    }
}

/// Take every pending flash, clearing them from the session.
pub async fn take(session: &Session) -> Vec<Flash> {
    match session.remove::<Vec<Flash>>(FLASH_KEY).await {
        Ok(pending) => pending.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read flash messages");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_take_drains_pending_flashes() {
        let session = session();
        push(&session, Flash::success("Product created")).await;
        push(&session, Flash::error("service unavailable")).await;

        let flashes = take(&session).await;
        assert_eq!(
            flashes,
            vec![Flash::success("Product created"), Flash::error("service unavailable")]
        );
        assert!(take(&session).await.is_empty());
    }

    #[test]
    fn test_kind_classes() {
        assert_eq!(FlashKind::Success.class(), "toast-success");
        assert_eq!(FlashKind::Error.class(), "toast-error");
    }
}
