//! Seed data for the mock store.
//!
//! The built-in dataset is compiled into the binary from
//! `fixtures/seed.yaml`. A file with the same shape can replace it at startup
//! (`ADMIN_FIXTURES_PATH`) and is what `pressroom-cli fixtures export` writes.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Record, StoreError};
use crate::models::{
    Admin, Collection, ContactSubmission, FlashSale, Order, PrintOptionGroup, Product,
    ProductCategory, ProductLabel, ProductReview, ProductTag, User, is_hex_color,
    review::RATING_RANGE,
};

const SEED: &str = include_str!("../../fixtures/seed.yaml");

/// A complete dataset, one list per entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixtures {
    pub products: Vec<Product>,
    pub categories: Vec<ProductCategory>,
    pub tags: Vec<ProductTag>,
    pub labels: Vec<ProductLabel>,
    pub collections: Vec<Collection>,
    pub flash_sales: Vec<FlashSale>,
    pub reviews: Vec<ProductReview>,
    pub orders: Vec<Order>,
    pub users: Vec<User>,
    pub admins: Vec<Admin>,
    pub contacts: Vec<ContactSubmission>,
    pub print_options: Vec<PrintOptionGroup>,
}

impl Fixtures {
    /// The dataset compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Fixtures` if the embedded YAML does not parse.
    pub fn builtin() -> Result<Self, StoreError> {
        Self::from_yaml_str(SEED)
    }

    /// Parse a YAML dataset.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Fixtures` with the parser's message.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, StoreError> {
        serde_yaml::from_str(yaml).map_err(|e| StoreError::Fixtures(e.to_string()))
    }

    /// Read and parse a YAML dataset from disk.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Fixtures` if the file cannot be read or parsed.
    pub async fn from_path(path: &Path) -> Result<Self, StoreError> {
        let yaml = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::Fixtures(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&yaml)
    }

    /// Serialize the dataset as YAML.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Fixtures` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, StoreError> {
        serde_yaml::to_string(self).map_err(|e| StoreError::Fixtures(e.to_string()))
    }

    /// Check the invariants that deserialization alone can't enforce.
    ///
    /// Returns one message per problem; an empty list means the data is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        check_unique_ids(&self.products, &mut problems);
        check_unique_ids(&self.categories, &mut problems);
        check_unique_ids(&self.tags, &mut problems);
        check_unique_ids(&self.labels, &mut problems);
        check_unique_ids(&self.collections, &mut problems);
        check_unique_ids(&self.flash_sales, &mut problems);
        check_unique_ids(&self.reviews, &mut problems);
        check_unique_ids(&self.orders, &mut problems);
        check_unique_ids(&self.users, &mut problems);
        check_unique_ids(&self.admins, &mut problems);
        check_unique_ids(&self.contacts, &mut problems);
        check_unique_ids(&self.print_options, &mut problems);

        for group in &self.print_options {
            if let Err(e) = group.configuration.validate() {
                problems.push(format!("print option group {}: {e}", group.id));
            }
        }

        for sale in &self.flash_sales {
            if sale.ends_at <= sale.starts_at {
                problems.push(format!("flash sale {}: ends before it starts", sale.id));
            }
            if sale.discount_percent <= rust_decimal::Decimal::ZERO
                || sale.discount_percent > rust_decimal::Decimal::ONE_HUNDRED
            {
                problems.push(format!(
                    "flash sale {}: discount must be between 0 and 100",
                    sale.id
                ));
            }
        }

        for review in &self.reviews {
            if !RATING_RANGE.contains(&review.rating) {
                problems.push(format!("review {}: rating must be 1 to 5", review.id));
            }
        }

        for label in &self.labels {
            if !is_hex_color(&label.color) {
                problems.push(format!("label {}: color must be #rrggbb", label.id));
            }
        }

        for product in &self.products {
            if product
                .compare_at_price
                .is_some_and(|was| was <= product.price)
            {
                problems.push(format!(
                    "product {}: compare-at price must exceed the price",
                    product.id
                ));
            }
        }

        problems
    }
}

fn check_unique_ids<T: Record>(rows: &[T], problems: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for row in rows {
        if row.id() <= 0 {
            problems.push(format!("{} id {} must be positive", T::KIND, row.id()));
        } else if !seen.insert(row.id()) {
            problems.push(format!("{} id {} is used more than once", T::KIND, row.id()));
        }
    }
}
