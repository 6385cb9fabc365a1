//! Session layer for flash messages.
//!
//! Sessions only carry one-shot toasts, so they live in memory and vanish on
//! restart along with the mock data. `MemoryStore` drops an expired record
//! only when its cookie comes back; abandoned sessions stay resident until
//! restart, so the expiry is kept short.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::AdminConfig;

/// Session cookie name for admin.
pub const SESSION_COOKIE_NAME: &str = "pressroom_admin_session";

/// Session expiry time in seconds (15 minutes of inactivity).
pub const SESSION_EXPIRY_SECONDS: i64 = 15 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &AdminConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}
