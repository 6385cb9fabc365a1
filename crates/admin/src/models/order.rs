//! Customer orders.

use chrono::{DateTime, Utc};
use pressroom_core::{Email, Money, OrderId, OrderStatus, PaymentStatus};
use serde::{Deserialize, Serialize};

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Customer-facing order number, e.g. `ORD-1001`.
    pub number: String,
    pub customer_name: String,
    pub customer_email: Email,
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub notes: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// A line on an order. Product details are copied at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_name: String,
    pub sku: String,
    pub quantity: u32,
    pub unit_price: Money,
    /// Print options chosen for the line, e.g. `"A5 / Silk 170gsm / Gloss"`.
    #[serde(default)]
    pub options: String,
}

impl OrderItem {
    /// Quantity times unit price.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

impl Order {
    /// Sum of all line totals.
    #[must_use]
    pub fn total(&self) -> Money {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Whether the order counts towards revenue.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(quantity: u32, cents: u32) -> OrderItem {
        OrderItem {
            product_name: "Flyers".to_string(),
            sku: "FLY-A5".to_string(),
            quantity,
            unit_price: Money::from_cents(cents),
            options: String::new(),
        }
    }

    #[test]
    fn test_totals() {
        let order = Order {
            id: OrderId::new(1),
            number: "ORD-1001".to_string(),
            customer_name: "Ada".to_string(),
            customer_email: Email::parse("ada@example.com").unwrap(),
            items: vec![item(2, 1_999), item(1, 500)],
            shipping_address: String::new(),
            notes: String::new(),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Paid,
            created_at: Utc::now(),
        };

        assert_eq!(order.total(), Money::from_cents(4_498));
        assert_eq!(order.item_count(), 3);
        assert!(order.is_paid());
    }
}
