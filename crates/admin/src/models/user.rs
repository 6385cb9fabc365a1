//! Storefront customer accounts.

use chrono::{DateTime, Utc};
use pressroom_core::{AccountStatus, Email, UserId};
use serde::{Deserialize, Serialize};

/// A storefront customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(default)]
    pub phone: String,
    pub status: AccountStatus,
    #[serde(default)]
    pub orders_count: u32,
    pub created_at: DateTime<Utc>,
}
