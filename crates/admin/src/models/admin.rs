//! Admin user records.
//!
//! The dashboard has no login; these records are managed like any other
//! entity.

use chrono::{DateTime, Utc};
use pressroom_core::{AdminId, AdminRole, Email};
use serde::{Deserialize, Serialize};

/// An admin panel user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: AdminId,
    pub name: String,
    pub email: Email,
    pub role: AdminRole,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

const fn default_active() -> bool {
    true
}
