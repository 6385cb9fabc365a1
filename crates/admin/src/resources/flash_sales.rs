//! Flash sales screen.

use chrono::Utc;
use pressroom_core::{EntityRef, FlashSaleId};
use rust_decimal::Decimal;

use super::{Resource, filter_options, has_ref, ref_choices, resolve_refs};
use crate::components::{
    BulkAction, Cell, DataTableConfig, DetailRow, DetailSection, FormField, TableColumn,
    TableFilter, Tone,
};
use crate::models::{FlashSale, Product, SalePhase};
use crate::query::{Listable, SortKey};
use crate::store::{MockStore, ReferenceData, Table};
use crate::validation::{FormData, ValidationErrors, format_datetime_local};

const PHASES: [SalePhase; 4] = [
    SalePhase::Scheduled,
    SalePhase::Running,
    SalePhase::Ended,
    SalePhase::Disabled,
];

fn phase_badge(sale: &FlashSale) -> Cell {
    let phase = sale.phase(Utc::now());
    let tone = match phase {
        SalePhase::Running => Tone::Success,
        SalePhase::Scheduled => Tone::Info,
        SalePhase::Ended => Tone::Neutral,
        SalePhase::Disabled => Tone::Warning,
    };
    Cell::badge(phase.label(), tone)
}

fn percent(value: Decimal) -> String {
    format!("{}%", value.normalize())
}

impl Listable for FlashSale {
    fn list_id(&self) -> i32 {
        self.id.as_i32()
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.name, EntityRef::join_names(&self.products))
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "name" => Some(SortKey::text(&self.name)),
            "discount" => Some(SortKey::Decimal(self.discount_percent)),
            "starts_at" => Some(SortKey::Date(self.starts_at)),
            "ends_at" => Some(SortKey::Date(self.ends_at)),
            _ => None,
        }
    }

    fn matches_filter(&self, key: &str, value: &str) -> bool {
        match key {
            "phase" => self.phase(Utc::now()).as_str() == value,
            "product" => has_ref(&self.products, value),
            _ => true,
        }
    }
}

impl Resource for FlashSale {
    const SLUG: &'static str = "flash-sales";
    const SINGULAR: &'static str = "Flash sale";
    const PLURAL: &'static str = "Flash sales";
    const NEEDS_REFERENCES: bool = true;
    const NEEDS_PRODUCTS: bool = true;

    fn table(store: &MockStore) -> &Table<Self> {
        store.flash_sales()
    }

    fn table_config() -> DataTableConfig {
        DataTableConfig::new("flash-sales")
            .column(TableColumn::sortable("name", "Name"))
            .column(TableColumn::sortable("discount", "Discount"))
            .column(TableColumn::sortable("starts_at", "Starts"))
            .column(TableColumn::sortable("ends_at", "Ends"))
            .column(TableColumn::new("phase", "Phase"))
            .column(TableColumn::new("products", "Products"))
            .filter(TableFilter::select(
                "phase",
                "Phase",
                filter_options(PHASES.iter().map(|p| (p.as_str(), p.label()))),
            ))
            .bulk_action(BulkAction::new("enable", "Enable", "ph-toggle-right"))
            .bulk_action(BulkAction::new("disable", "Disable", "ph-toggle-left"))
            .bulk_action(BulkAction::delete())
            .search_placeholder("Search sales or products...")
            .empty_state(
                "ph-lightning",
                "No flash sales found",
                Some("Schedule a sale to discount products for a limited time"),
            )
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::link(self.name.clone(), self.show_path()),
            Cell::text(percent(self.discount_percent)),
            Cell::datetime(self.starts_at),
            Cell::datetime(self.ends_at),
            phase_badge(self),
            Cell::refs(&self.products),
        ]
    }

    fn detail_rows(&self) -> Vec<DetailRow> {
        vec![
            DetailRow::new("Name", Cell::text(self.name.clone())),
            DetailRow::new("Discount", Cell::text(percent(self.discount_percent))),
            DetailRow::new("Starts", Cell::datetime(self.starts_at)),
            DetailRow::new("Ends", Cell::datetime(self.ends_at)),
            DetailRow::new("Enabled", Cell::yes_no(self.enabled)),
            DetailRow::new("Phase", phase_badge(self)),
            DetailRow::new("Products", Cell::refs(&self.products)),
        ]
    }

    fn product_sections(&self, products: &[Product]) -> Vec<DetailSection> {
        let headers = ["Product", "Regular price", "Sale price"]
            .map(String::from)
            .to_vec();
        let mut section = DetailSection::new("Sale prices", headers);
        if self.products.is_empty() {
            section = section.note("No products in this sale.");
        }

        let on_sale: Vec<&Product> = products
            .iter()
            .filter(|p| self.includes(p.id.as_i32()))
            .collect();
        for product in &on_sale {
            section = section.row(vec![
                Cell::link(product.name.clone(), product.show_path()),
                Cell::money(product.price),
                Cell::money(self.sale_price(product.price)),
            ]);
        }
        for missing in self
            .products
            .iter()
            .filter(|r| !on_sale.iter().any(|p| p.id.as_i32() == r.id))
        {
            section = section.row(vec![
                Cell::text(missing.name.clone()),
                Cell::muted("Deleted"),
                Cell::muted("—"),
            ]);
        }
        vec![section]
    }

    fn blank_form() -> FormData {
        let starts = Utc::now();
        FormData::new()
            .with("discount_percent", 10)
            .with("starts_at", format_datetime_local(starts))
            .with("ends_at", format_datetime_local(starts + chrono::Duration::days(7)))
            .with("enabled", "on")
    }

    fn to_form(&self) -> FormData {
        let form = FormData::new()
            .with("name", &self.name)
            .with("discount_percent", self.discount_percent.normalize())
            .with("starts_at", format_datetime_local(self.starts_at))
            .with("ends_at", format_datetime_local(self.ends_at))
            .with_all("products", self.products.iter().map(|p| p.id));
        if self.enabled {
            form.with("enabled", "on")
        } else {
            form
        }
    }

    fn form_fields(values: &FormData, refs: &ReferenceData) -> Vec<FormField> {
        vec![
            FormField::text("name", "Name", values).required(),
            FormField::text("discount_percent", "Discount (%)", values)
                .required()
                .help("Greater than 0, at most 100"),
            FormField::datetime("starts_at", "Starts at (UTC)", values).required(),
            FormField::datetime("ends_at", "Ends at (UTC)", values).required(),
            FormField::checkbox("enabled", "Enabled", values),
            FormField::multi_select("products", "Products", values, ref_choices(&refs.products)),
        ]
    }

    fn from_form(
        form: &FormData,
        existing: Option<&Self>,
        refs: &ReferenceData,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = form.name("name", &mut errors);
        let discount = form.decimal("discount_percent", &mut errors);
        let starts_at = form.datetime("starts_at", &mut errors);
        let ends_at = form.datetime("ends_at", &mut errors);
        let products = resolve_refs(form, "products", &refs.products, &mut errors);

        if discount.is_some_and(|d| d <= Decimal::ZERO || d > Decimal::ONE_HUNDRED) {
            errors.add("discount_percent", "must be greater than 0 and at most 100");
        }
        if starts_at.is_some_and(|start| ends_at.is_some_and(|end| end <= start)) {
            errors.add("ends_at", "must be after the start");
        }

        let (Some(discount_percent), Some(starts_at), Some(ends_at)) =
            (discount, starts_at, ends_at)
        else {
            return Err(errors);
        };

        errors.finish(Self {
            id: existing.map_or(FlashSaleId::new(0), |s| s.id),
            name,
            discount_percent,
            starts_at,
            ends_at,
            enabled: form.checkbox("enabled"),
            products,
        })
    }

    fn bulk_update(action: &str) -> Option<fn(&mut Self)> {
        match action {
            "enable" => Some(|s| s.enabled = true),
            "disable" => Some(|s| s.enabled = false),
            _ => None,
        }
    }
}
