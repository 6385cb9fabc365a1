//! Domain models for the admin.
//!
//! Plain serde records. Everything here is data plus small derived values;
//! storage lives in [`crate::store`] and screen behavior in
//! [`crate::resources`].

pub mod admin;
pub mod catalog;
pub mod contact;
pub mod flash_sale;
pub mod order;
pub mod print_option;
pub mod product;
pub mod review;
pub mod user;

pub use admin::Admin;
pub use catalog::{Collection, ProductCategory, ProductLabel, ProductTag, is_hex_color};
pub use contact::ContactSubmission;
pub use flash_sale::{FlashSale, SalePhase};
pub use order::{Order, OrderItem};
pub use print_option::{
    AttributeKind, AttributeValue, DesignArea, PrintConfiguration, PrintOptionError,
    PrintOptionGroup, Quote, QuoteError, QuoteLine, VariationAttribute,
};
pub use product::Product;
pub use review::ProductReview;
pub use user::User;
