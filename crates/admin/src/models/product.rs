//! Catalog products.

use chrono::{DateTime, Utc};
use pressroom_core::{EntityRef, Money, ProductId, PublishStatus};
use serde::{Deserialize, Serialize};

/// Stock level at or below which a product is flagged as running low.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// A product in the catalog.
///
/// Category, tag, collection, label and print option references are
/// denormalized `{id, name}` pairs captured when the product was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub sku: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<Money>,
    pub stock: i32,
    #[serde(default)]
    pub status: PublishStatus,
    #[serde(default)]
    pub categories: Vec<EntityRef>,
    #[serde(default)]
    pub tags: Vec<EntityRef>,
    #[serde(default)]
    pub collections: Vec<EntityRef>,
    #[serde(default)]
    pub labels: Vec<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_option_group: Option<EntityRef>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product shows a strike-through "was" price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.compare_at_price.is_some_and(|was| was > self.price)
    }

    /// Stock display text (`"Out of stock"`, `"4 (low)"`, `"120"`).
    #[must_use]
    pub fn stock_label(&self) -> String {
        match self.stock {
            s if s <= 0 => "Out of stock".to_string(),
            s if s <= LOW_STOCK_THRESHOLD => format!("{s} (low)"),
            s => s.to_string(),
        }
    }

    /// Whether any of the product's references of a kind points at `id`.
    #[must_use]
    pub fn references(refs: &[EntityRef], id: i32) -> bool {
        refs.iter().any(|r| r.id == id)
    }
}
