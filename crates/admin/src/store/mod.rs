//! Mock backend for the admin.
//!
//! There is no database: every entity lives in an in-memory [`Table`] seeded
//! from [`Fixtures`]. Each call waits out a configurable [`Latency`] and can
//! fail at a configurable rate, standing in for the REST API the dashboard
//! would otherwise talk to. Nothing is persisted; a restart reloads the seed.

pub mod fixtures;
pub mod latency;
pub mod table;

use pressroom_core::EntityRef;
use thiserror::Error;

use crate::config::MockConfig;
use crate::models::{
    Admin, Collection, ContactSubmission, FlashSale, Order, PrintOptionGroup, Product,
    ProductCategory, ProductLabel, ProductReview, ProductTag, User,
};

pub use fixtures::Fixtures;
pub use latency::Latency;
pub use table::{Record, Table};
pub(crate) use table::impl_record;

impl_record!(Product, ProductId, "product");
impl_record!(ProductCategory, CategoryId, "category");
impl_record!(ProductTag, TagId, "tag");
impl_record!(ProductLabel, LabelId, "label");
impl_record!(Collection, CollectionId, "collection");
impl_record!(FlashSale, FlashSaleId, "flash sale");
impl_record!(ProductReview, ReviewId, "review");
impl_record!(Order, OrderId, "order");
impl_record!(User, UserId, "user");
impl_record!(Admin, AdminId, "admin");
impl_record!(ContactSubmission, ContactId, "contact submission");
impl_record!(PrintOptionGroup, PrintOptionGroupId, "print option group");

/// Errors that can occur during mock store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Requested record does not exist.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Entity kind (e.g. "product").
        kind: &'static str,
        /// Requested id.
        id: i32,
    },

    /// Simulated network failure.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Fixture data could not be read or parsed.
    #[error("fixtures error: {0}")]
    Fixtures(String),
}

impl StoreError {
    pub(crate) const fn not_found<T: Record>(id: i32) -> Self {
        Self::NotFound { kind: T::KIND, id }
    }
}

/// Reference lists offered by form selects, captured in one simulated call.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub categories: Vec<EntityRef>,
    pub tags: Vec<EntityRef>,
    pub collections: Vec<EntityRef>,
    pub labels: Vec<EntityRef>,
    pub products: Vec<EntityRef>,
    pub print_options: Vec<EntityRef>,
}

impl ReferenceData {
    /// Resolve submitted ids against a reference list, keeping submission order.
    ///
    /// # Errors
    ///
    /// Returns the first id that is not in `list`.
    pub fn resolve(list: &[EntityRef], ids: &[i32]) -> Result<Vec<EntityRef>, i32> {
        let mut resolved = Vec::with_capacity(ids.len());
        for id in ids {
            let found = list.iter().find(|r| r.id == *id).ok_or(*id)?;
            if !resolved.contains(found) {
                resolved.push(found.clone());
            }
        }
        Ok(resolved)
    }
}

/// All mock tables.
pub struct MockStore {
    latency: Latency,
    products: Table<Product>,
    categories: Table<ProductCategory>,
    tags: Table<ProductTag>,
    labels: Table<ProductLabel>,
    collections: Table<Collection>,
    flash_sales: Table<FlashSale>,
    reviews: Table<ProductReview>,
    orders: Table<Order>,
    users: Table<User>,
    admins: Table<Admin>,
    contacts: Table<ContactSubmission>,
    print_options: Table<PrintOptionGroup>,
}

impl MockStore {
    /// Build a store from a dataset.
    #[must_use]
    pub fn from_fixtures(fixtures: Fixtures, latency: Latency) -> Self {
        Self {
            latency,
            products: Table::new(fixtures.products, latency),
            categories: Table::new(fixtures.categories, latency),
            tags: Table::new(fixtures.tags, latency),
            labels: Table::new(fixtures.labels, latency),
            collections: Table::new(fixtures.collections, latency),
            flash_sales: Table::new(fixtures.flash_sales, latency),
            reviews: Table::new(fixtures.reviews, latency),
            orders: Table::new(fixtures.orders, latency),
            users: Table::new(fixtures.users, latency),
            admins: Table::new(fixtures.admins, latency),
            contacts: Table::new(fixtures.contacts, latency),
            print_options: Table::new(fixtures.print_options, latency),
        }
    }

    /// Load the configured dataset (fixture file or built-in seed).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Fixtures` if the fixture file cannot be read,
    /// parsed or fails validation.
    pub async fn load(config: &MockConfig) -> Result<Self, StoreError> {
        let fixtures = match &config.fixtures_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading fixtures from file");
                Fixtures::from_path(path).await?
            }
            None => Fixtures::builtin()?,
        };

        let problems = fixtures.validate();
        if !problems.is_empty() {
            return Err(StoreError::Fixtures(problems.join("; ")));
        }

        tracing::info!(
            products = fixtures.products.len(),
            orders = fixtures.orders.len(),
            print_options = fixtures.print_options.len(),
            "Mock data loaded"
        );

        let latency = Latency::new(config.latency, config.failure_rate);
        Ok(Self::from_fixtures(fixtures, latency))
    }

    pub const fn products(&self) -> &Table<Product> {
        &self.products
    }

    pub const fn categories(&self) -> &Table<ProductCategory> {
        &self.categories
    }

    pub const fn tags(&self) -> &Table<ProductTag> {
        &self.tags
    }

    pub const fn labels(&self) -> &Table<ProductLabel> {
        &self.labels
    }

    pub const fn collections(&self) -> &Table<Collection> {
        &self.collections
    }

    pub const fn flash_sales(&self) -> &Table<FlashSale> {
        &self.flash_sales
    }

    pub const fn reviews(&self) -> &Table<ProductReview> {
        &self.reviews
    }

    pub const fn orders(&self) -> &Table<Order> {
        &self.orders
    }

    pub const fn users(&self) -> &Table<User> {
        &self.users
    }

    pub const fn admins(&self) -> &Table<Admin> {
        &self.admins
    }

    pub const fn contacts(&self) -> &Table<ContactSubmission> {
        &self.contacts
    }

    pub const fn print_options(&self) -> &Table<PrintOptionGroup> {
        &self.print_options
    }

    /// Names and ids of everything a form can reference, in one call.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` on a simulated failure.
    pub async fn reference_data(&self) -> Result<ReferenceData, StoreError> {
        self.latency.simulate("list", "reference data").await?;

        Ok(ReferenceData {
            categories: self
                .categories
                .snapshot()
                .await
                .into_iter()
                .map(|c| EntityRef::new(c.id, c.name))
                .collect(),
            tags: self
                .tags
                .snapshot()
                .await
                .into_iter()
                .map(|t| EntityRef::new(t.id, t.name))
                .collect(),
            collections: self
                .collections
                .snapshot()
                .await
                .into_iter()
                .map(|c| EntityRef::new(c.id, c.name))
                .collect(),
            labels: self
                .labels
                .snapshot()
                .await
                .into_iter()
                .map(|l| EntityRef::new(l.id, l.name))
                .collect(),
            products: self
                .products
                .snapshot()
                .await
                .into_iter()
                .map(|p| EntityRef::new(p.id, p.name))
                .collect(),
            print_options: self
                .print_options
                .snapshot()
                .await
                .into_iter()
                .map(|g| EntityRef::new(g.id, g.name))
                .collect(),
        })
    }

    /// Snapshot of the current data as a fixture set.
    pub async fn export(&self) -> Fixtures {
        Fixtures {
            products: self.products.snapshot().await,
            categories: self.categories.snapshot().await,
            tags: self.tags.snapshot().await,
            labels: self.labels.snapshot().await,
            collections: self.collections.snapshot().await,
            flash_sales: self.flash_sales.snapshot().await,
            reviews: self.reviews.snapshot().await,
            orders: self.orders.snapshot().await,
            users: self.users.snapshot().await,
            admins: self.admins.snapshot().await,
            contacts: self.contacts.snapshot().await,
            print_options: self.print_options.snapshot().await,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_keeps_order_and_dedupes() {
        let list = vec![EntityRef::new(1, "Cards"), EntityRef::new(2, "Flyers")];
        let resolved = ReferenceData::resolve(&list, &[2, 1, 2]).unwrap();
        assert_eq!(resolved, vec![EntityRef::new(2, "Flyers"), EntityRef::new(1, "Cards")]);
        assert_eq!(ReferenceData::resolve(&list, &[3]), Err(3));
    }

    #[tokio::test]
    async fn test_builtin_store_reference_data() {
        let store = MockStore::from_fixtures(Fixtures::builtin().unwrap(), Latency::none());
        let refs = store.reference_data().await.unwrap();
        assert_eq!(refs.products.len(), store.products().count().await.unwrap());
        assert!(!refs.categories.is_empty());
        assert!(!refs.print_options.is_empty());
    }

    #[tokio::test]
    async fn test_export_reflects_mutations() {
        let store = MockStore::from_fixtures(Fixtures::builtin().unwrap(), Latency::none());
        let before = store.tags().count().await.unwrap();
        store.tags().delete_many(&[1]).await.unwrap();
        assert_eq!(store.export().await.tags.len(), before - 1);
    }
}
