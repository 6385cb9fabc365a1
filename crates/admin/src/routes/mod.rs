//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check (registered in `app`)
//!
//! # Dashboard
//! GET  /                       - Counts, revenue and recent orders
//!
//! # Every resource (products, categories, tags, labels, collections,
//! # flash-sales, reviews, orders, users, admins, contacts, print-options)
//! GET  /{slug}                 - List with search, filters, sort, pagination
//! GET  /{slug}/new             - Blank form (creatable resources only)
//! POST /{slug}                 - Create
//! GET  /{slug}/{id}            - Detail
//! GET  /{slug}/{id}/edit       - Edit form
//! POST /{slug}/{id}            - Update
//! POST /{slug}/{id}/delete     - Delete
//! POST /{slug}/bulk            - Bulk action on selected rows
//! GET  /api/{slug}             - JSON page
//! GET  /api/{slug}/{id}        - JSON record
//!
//! # Print options
//! PUT  /api/print-options/{id}/configuration - Replace the attribute tree
//! GET  /api/print-options/{id}/quote         - Price a selection
//! ```

pub mod dashboard;
pub mod print_options;
pub mod resource;

use axum::{Router, routing::get};

use crate::{
    models::{
        Admin, Collection, ContactSubmission, FlashSale, Order, PrintOptionGroup, Product,
        ProductCategory, ProductLabel, ProductReview, ProductTag, User,
    },
    state::AppState,
};

pub use resource::resource_routes;

/// Build the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        // Catalog
        .merge(resource_routes::<Product>())
        .merge(resource_routes::<ProductCategory>())
        .merge(resource_routes::<ProductTag>())
        .merge(resource_routes::<ProductLabel>())
        .merge(resource_routes::<Collection>())
        .merge(resource_routes::<FlashSale>())
        .merge(resource_routes::<ProductReview>())
        .merge(resource_routes::<PrintOptionGroup>())
        .merge(print_options::routes())
        // Sales
        .merge(resource_routes::<Order>())
        .merge(resource_routes::<User>())
        .merge(resource_routes::<ContactSubmission>())
        // Team
        .merge(resource_routes::<Admin>())
}
