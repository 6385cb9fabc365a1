//! Status enums for the admin's entities.
//!
//! Every status has a stable snake_case key (`as_str`, used in URLs, forms
//! and fixtures) and a human label (`label`, used in tables and badges).

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown status key.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {value}")]
pub struct ParseStatusError {
    /// Name of the status type.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

macro_rules! define_status {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => ($key:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stable key used in forms, query strings and fixtures.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $key),+
                }
            }

            /// Human-readable label.
            #[must_use]
            pub const fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ParseStatusError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($key => Ok(Self::$variant),)+
                    other => Err(ParseStatusError {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

define_status! {
    /// Publication state shared by products, collections and print option groups.
    PublishStatus("publish status") {
        Active => ("active", "Active"),
        Draft => ("draft", "Draft"),
        Archived => ("archived", "Archived"),
    }
}

define_status! {
    /// Order fulfillment lifecycle.
    OrderStatus("order status") {
        Pending => ("pending", "Pending"),
        Processing => ("processing", "Processing"),
        Shipped => ("shipped", "Shipped"),
        Delivered => ("delivered", "Delivered"),
        Cancelled => ("cancelled", "Cancelled"),
    }
}

define_status! {
    /// Order payment state.
    PaymentStatus("payment status") {
        Unpaid => ("unpaid", "Unpaid"),
        Paid => ("paid", "Paid"),
        Refunded => ("refunded", "Refunded"),
    }
}

define_status! {
    /// Moderation state of a product review.
    ReviewStatus("review status") {
        Pending => ("pending", "Pending"),
        Approved => ("approved", "Approved"),
        Rejected => ("rejected", "Rejected"),
    }
}

define_status! {
    /// Triage state of a contact form submission.
    ContactStatus("contact status") {
        New => ("new", "New"),
        Read => ("read", "Read"),
        Replied => ("replied", "Replied"),
        Archived => ("archived", "Archived"),
    }
}

define_status! {
    /// Storefront customer account state.
    AccountStatus("account status") {
        Active => ("active", "Active"),
        Blocked => ("blocked", "Blocked"),
    }
}

define_status! {
    /// Admin role with different permission levels.
    AdminRole("admin role") {
        /// Full access to all admin features including admin management.
        SuperAdmin => ("super_admin", "Super Admin"),
        /// Full access to store management features.
        Admin => ("admin", "Admin"),
        /// Read-only access to store data.
        Viewer => ("viewer", "Viewer"),
    }
}

#[allow(clippy::derivable_impls)]
impl Default for PublishStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl OrderStatus {
    /// Whether the order can still move forward in fulfillment.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Processing | Self::Shipped)
    }
}
