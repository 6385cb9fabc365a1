//! Product reviews awaiting or past moderation.

use chrono::{DateTime, Utc};
use pressroom_core::{Email, EntityRef, ReviewId, ReviewStatus};
use serde::{Deserialize, Serialize};

/// Lowest and highest star ratings.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// A customer review of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductReview {
    pub id: ReviewId,
    pub product: EntityRef,
    pub author_name: String,
    pub author_email: Email,
    /// Star rating in [`RATING_RANGE`].
    pub rating: u8,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
}

impl ProductReview {
    /// Rating rendered as filled and empty stars (`"★★★☆☆"`).
    #[must_use]
    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating.min(*RATING_RANGE.end()));
        let empty = usize::from(*RATING_RANGE.end()) - filled;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}
