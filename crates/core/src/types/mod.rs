//! Core types for Pressroom.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod entity_ref;
pub mod id;
pub mod money;
pub mod slug;
pub mod status;

pub use email::{Email, EmailError};
pub use entity_ref::EntityRef;
pub use id::*;
pub use money::{Money, MoneyError};
pub use slug::slugify;
pub use status::*;
