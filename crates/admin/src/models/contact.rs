//! Contact form submissions from the storefront.

use chrono::{DateTime, Utc};
use pressroom_core::{ContactId, ContactStatus, Email};
use serde::{Deserialize, Serialize};

/// A message sent through the storefront contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: ContactId,
    pub name: String,
    pub email: Email,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
}

impl ContactSubmission {
    /// First line of the message, shortened for list views.
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        let first_line = self.message.lines().next().unwrap_or_default().trim();
        if first_line.chars().count() <= max_chars {
            first_line.to_string()
        } else {
            let cut: String = first_line.chars().take(max_chars).collect();
            format!("{}…", cut.trim_end())
        }
    }
}
