//! Flash sales: time-boxed percentage discounts on a set of products.

use chrono::{DateTime, Utc};
use pressroom_core::{EntityRef, FlashSaleId, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A time-boxed promotional price override applied to a set of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashSale {
    pub id: FlashSaleId,
    pub name: String,
    /// Percentage taken off the regular price, in `(0, 100]`.
    pub discount_percent: Decimal,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub products: Vec<EntityRef>,
}

const fn default_enabled() -> bool {
    true
}

/// Where a flash sale is in its lifecycle at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SalePhase {
    Disabled,
    Scheduled,
    Running,
    Ended,
}

impl SalePhase {
    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Disabled => "Disabled",
            Self::Scheduled => "Scheduled",
            Self::Running => "Running",
            Self::Ended => "Ended",
        }
    }

    /// Stable key used by the list filter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Scheduled => "scheduled",
            Self::Running => "running",
            Self::Ended => "ended",
        }
    }
}

impl FlashSale {
    /// Lifecycle phase at `now`. The window is `[starts_at, ends_at)`.
    #[must_use]
    pub fn phase(&self, now: DateTime<Utc>) -> SalePhase {
        if !self.enabled {
            SalePhase::Disabled
        } else if now < self.starts_at {
            SalePhase::Scheduled
        } else if now < self.ends_at {
            SalePhase::Running
        } else {
            SalePhase::Ended
        }
    }

    /// The discounted price for a regular price.
    #[must_use]
    pub fn sale_price(&self, price: Money) -> Money {
        price.percent_off(self.discount_percent)
    }

    /// Whether the sale applies to a product.
    #[must_use]
    pub fn includes(&self, product_id: i32) -> bool {
        self.products.iter().any(|p| p.id == product_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn sale() -> FlashSale {
        FlashSale {
            id: FlashSaleId::new(1),
            name: "Weekend Cards".to_string(),
            discount_percent: Decimal::new(20, 0),
            starts_at: Utc.with_ymd_and_hms(2026, 3, 6, 9, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2026, 3, 8, 23, 0, 0).unwrap(),
            enabled: true,
            products: vec![EntityRef::new(4, "Business Cards")],
        }
    }

    #[test]
    fn test_phase_follows_window() {
        let sale = sale();
        assert_eq!(sale.phase(sale.starts_at - Duration::minutes(1)), SalePhase::Scheduled);
        assert_eq!(sale.phase(sale.starts_at), SalePhase::Running);
        assert_eq!(sale.phase(sale.ends_at), SalePhase::Ended);
    }

    #[test]
    fn test_disabled_sale_never_runs() {
        let mut sale = sale();
        sale.enabled = false;
        assert_eq!(sale.phase(sale.starts_at), SalePhase::Disabled);
    }

    #[test]
    fn test_sale_price_and_membership() {
        let sale = sale();
        assert_eq!(sale.sale_price(Money::from_cents(2_500)), Money::from_cents(2_000));
        assert!(sale.includes(4));
        assert!(!sale.includes(5));
    }
}
