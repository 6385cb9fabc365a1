//! Pressroom Core - Shared types library.
//!
//! This crate provides the domain types used across all Pressroom components:
//! - `admin` - The administration dashboard (mock-data backed)
//! - `cli` - Command-line tools for fixtures and print quotes
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no storage. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, money, emails, statuses, references and slugs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
