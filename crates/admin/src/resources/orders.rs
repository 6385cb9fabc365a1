//! Orders screen.
//!
//! Orders come from checkout, so there is no create form. Editing covers the
//! fulfillment fields an operator changes by hand.

use pressroom_core::{OrderStatus, PaymentStatus};

use super::{Resource, filter_options};
use crate::components::{
    BulkAction, Cell, DataTableConfig, DetailRow, DetailSection, FormField, TableColumn,
    TableFilter, Tone,
};
use crate::models::Order;
use crate::query::{Listable, SortKey};
use crate::store::{MockStore, ReferenceData, Table};
use crate::validation::{FormData, ValidationErrors};

pub(crate) fn status_badge(status: OrderStatus) -> Cell {
    let tone = match status {
        OrderStatus::Pending => Tone::Warning,
        OrderStatus::Processing | OrderStatus::Shipped => Tone::Info,
        OrderStatus::Delivered => Tone::Success,
        OrderStatus::Cancelled => Tone::Danger,
    };
    Cell::badge(status.label(), tone)
}

fn payment_badge(status: PaymentStatus) -> Cell {
    let tone = match status {
        PaymentStatus::Paid => Tone::Success,
        PaymentStatus::Unpaid => Tone::Warning,
        PaymentStatus::Refunded => Tone::Neutral,
    };
    Cell::badge(status.label(), tone)
}

impl Listable for Order {
    fn list_id(&self) -> i32 {
        self.id.as_i32()
    }

    fn search_text(&self) -> String {
        let skus: Vec<&str> = self.items.iter().map(|i| i.sku.as_str()).collect();
        format!(
            "{} {} {} {}",
            self.number,
            self.customer_name,
            self.customer_email.as_str(),
            skus.join(" ")
        )
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "number" => Some(SortKey::text(&self.number)),
            "customer" => Some(SortKey::text(&self.customer_name)),
            "items" => Some(SortKey::int(self.item_count())),
            "total" => Some(SortKey::Decimal(self.total().amount())),
            "status" => Some(SortKey::text(self.status.as_str())),
            "payment_status" => Some(SortKey::text(self.payment_status.as_str())),
            "created_at" => Some(SortKey::Date(self.created_at)),
            _ => None,
        }
    }

    fn matches_filter(&self, key: &str, value: &str) -> bool {
        match key {
            "status" => self.status.as_str() == value,
            "payment_status" => self.payment_status.as_str() == value,
            "customer" => self.customer_email.as_str() == value.to_lowercase(),
            _ => true,
        }
    }
}

impl Resource for Order {
    const SLUG: &'static str = "orders";
    const SINGULAR: &'static str = "Order";
    const PLURAL: &'static str = "Orders";
    const CREATABLE: bool = false;

    fn table(store: &MockStore) -> &Table<Self> {
        store.orders()
    }

    fn table_config() -> DataTableConfig {
        DataTableConfig::new("orders")
            .column(TableColumn::sortable("number", "Order"))
            .column(TableColumn::sortable("customer", "Customer"))
            .column(TableColumn::sortable("items", "Items"))
            .column(TableColumn::sortable("total", "Total"))
            .column(TableColumn::sortable("status", "Status"))
            .column(TableColumn::sortable("payment_status", "Payment"))
            .column(TableColumn::sortable("created_at", "Placed"))
            .filter(TableFilter::select(
                "status",
                "Status",
                filter_options(OrderStatus::ALL.iter().map(|s| (s.as_str(), s.label()))),
            ))
            .filter(TableFilter::select(
                "payment_status",
                "Payment",
                filter_options(PaymentStatus::ALL.iter().map(|s| (s.as_str(), s.label()))),
            ))
            .bulk_action(BulkAction::new("mark_processing", "Mark processing", "ph-gear"))
            .bulk_action(BulkAction::new("mark_shipped", "Mark shipped", "ph-truck"))
            .bulk_action(BulkAction::new("mark_delivered", "Mark delivered", "ph-package"))
            .bulk_action(BulkAction::new("cancel", "Cancel", "ph-x-circle").destructive())
            .bulk_action(BulkAction::delete())
            .search_placeholder("Search order number, customer or SKU...")
            .empty_state(
                "ph-receipt",
                "No orders found",
                Some("Orders appear here once customers check out"),
            )
    }

    fn label(&self) -> String {
        self.number.clone()
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::link(self.number.clone(), self.show_path()),
            Cell::text(self.customer_name.clone()),
            Cell::text(self.item_count().to_string()),
            Cell::money(self.total()),
            status_badge(self.status),
            payment_badge(self.payment_status),
            Cell::date(self.created_at),
        ]
    }

    fn detail_rows(&self) -> Vec<DetailRow> {
        vec![
            DetailRow::new("Order", Cell::text(self.number.clone())),
            DetailRow::new("Status", status_badge(self.status)),
            DetailRow::new("Payment", payment_badge(self.payment_status)),
            DetailRow::new("Customer", Cell::text(self.customer_name.clone())),
            DetailRow::new(
                "Email",
                Cell::link(
                    self.customer_email.to_string(),
                    format!("mailto:{}", self.customer_email),
                ),
            ),
            DetailRow::new("Shipping address", Cell::multiline(self.shipping_address.clone())),
            DetailRow::new("Notes", Cell::multiline(self.notes.clone())),
            DetailRow::new("Total", Cell::money(self.total())),
            DetailRow::new("Placed", Cell::datetime(self.created_at)),
        ]
    }

    fn detail_sections(&self) -> Vec<DetailSection> {
        let headers = ["Product", "SKU", "Options", "Qty", "Unit price", "Line total"]
            .map(String::from)
            .to_vec();
        let section = self.items.iter().fold(
            DetailSection::new("Items", headers)
                .note(format!("{} items, total {}", self.item_count(), self.total())),
            |section, item| {
                section.row(vec![
                    Cell::text(item.product_name.clone()),
                    Cell::text(item.sku.clone()),
                    Cell::or_dash(item.options.clone()),
                    Cell::text(item.quantity.to_string()),
                    Cell::money(item.unit_price),
                    Cell::money(item.line_total()),
                ])
            },
        );
        vec![section]
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("status", self.status.as_str())
            .with("payment_status", self.payment_status.as_str())
            .with("shipping_address", &self.shipping_address)
            .with("notes", &self.notes)
    }

    fn form_fields(values: &FormData, _refs: &ReferenceData) -> Vec<FormField> {
        vec![
            FormField::select(
                "status",
                "Status",
                values,
                None,
                OrderStatus::ALL.iter().map(|s| (s.as_str(), s.label())),
            )
            .required(),
            FormField::select(
                "payment_status",
                "Payment",
                values,
                None,
                PaymentStatus::ALL.iter().map(|s| (s.as_str(), s.label())),
            )
            .required(),
            FormField::textarea("shipping_address", "Shipping address", values),
            FormField::textarea("notes", "Notes", values),
        ]
    }

    fn from_form(
        form: &FormData,
        existing: Option<&Self>,
        _refs: &ReferenceData,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let Some(existing) = existing else {
            errors.add("status", "orders can only be created at checkout");
            return Err(errors);
        };

        let status = form.choice::<OrderStatus>("status", &mut errors);
        let payment_status = form.choice::<PaymentStatus>("payment_status", &mut errors);
        let (Some(status), Some(payment_status)) = (status, payment_status) else {
            return Err(errors);
        };

        errors.finish(Self {
            status,
            payment_status,
            shipping_address: form.optional("shipping_address"),
            notes: form.optional("notes"),
            ..existing.clone()
        })
    }

    fn bulk_update(action: &str) -> Option<fn(&mut Self)> {
        match action {
            "mark_processing" => Some(|o| o.status = OrderStatus::Processing),
            "mark_shipped" => Some(|o| o.status = OrderStatus::Shipped),
            "mark_delivered" => Some(|o| o.status = OrderStatus::Delivered),
            "cancel" => Some(|o| o.status = OrderStatus::Cancelled),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::store::Fixtures;

    fn order() -> Order {
        Fixtures::builtin().unwrap().orders.remove(0)
    }

    #[test]
    fn test_edit_changes_only_fulfillment_fields() {
        let existing = order();
        let form = existing.to_form().with("status", "cancelled").with("notes", "Customer called");
        let updated = Order::from_form(&form, Some(&existing), &ReferenceData::default()).unwrap();
        assert_eq!(updated.status, OrderStatus::Cancelled);
        assert_eq!(updated.notes, "Customer called");
        assert_eq!(updated.items, existing.items);
        assert_eq!(updated.number, "ORD-1001");
    }

    #[test]
    fn test_cannot_create() {
        let form = order().to_form();
        assert!(Order::from_form(&form, None, &ReferenceData::default()).is_err());
    }

    #[test]
    fn test_items_section_has_one_row_per_item() {
        let order = order();
        let sections = order.detail_sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].rows.len(), order.items.len());
        assert_eq!(sections[0].headers.len(), sections[0].rows[0].len());
    }

    #[test]
    fn test_bulk_cancel() {
        let mut order = order();
        (Order::bulk_update("cancel").unwrap())(&mut order);
        assert_eq!(order.status, OrderStatus::Cancelled);
    }
}
