//! Products screen.

use chrono::Utc;
use pressroom_core::{EntityRef, ProductId, PublishStatus};

use super::{
    Resource, filter_options, has_ref, has_ref_named, publish_badge, publish_filter, ref_choices,
    resolve_ref, resolve_refs,
};
use crate::components::{
    BulkAction, Cell, DataTableConfig, DetailRow, FormField, TableColumn, TableFilter, Tone,
};
use crate::models::Product;
use crate::models::product::LOW_STOCK_THRESHOLD;
use crate::query::{Listable, SortKey};
use crate::store::{MockStore, ReferenceData, Table};
use crate::validation::{FormData, ValidationErrors};

impl Listable for Product {
    fn list_id(&self) -> i32 {
        self.id.as_i32()
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.sku, self.slug)
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "name" => Some(SortKey::text(&self.name)),
            "sku" => Some(SortKey::text(&self.sku)),
            "price" => Some(SortKey::Decimal(self.price.amount())),
            "stock" => Some(SortKey::int(self.stock)),
            "status" => Some(SortKey::text(self.status.as_str())),
            "created_at" => Some(SortKey::Date(self.created_at)),
            _ => None,
        }
    }

    fn matches_filter(&self, key: &str, value: &str) -> bool {
        match key {
            "status" => self.status.as_str() == value,
            "stock" => match value {
                "out" => self.stock <= 0,
                "low" => self.stock > 0 && self.stock <= LOW_STOCK_THRESHOLD,
                "in_stock" => self.stock > LOW_STOCK_THRESHOLD,
                _ => true,
            },
            "category" => {
                has_ref(&self.categories, value) || has_ref_named(&self.categories, value)
            }
            "tag" => has_ref(&self.tags, value) || has_ref_named(&self.tags, value),
            "collection" => has_ref(&self.collections, value),
            "print_option_group" => self
                .print_option_group
                .as_ref()
                .is_some_and(|g| g.id.to_string() == value),
            _ => true,
        }
    }
}

fn stock_cell(product: &Product) -> Cell {
    match product.stock {
        s if s <= 0 => Cell::badge(product.stock_label(), Tone::Danger),
        s if s <= LOW_STOCK_THRESHOLD => Cell::badge(product.stock_label(), Tone::Warning),
        _ => Cell::text(product.stock_label()),
    }
}

impl Resource for Product {
    const SLUG: &'static str = "products";
    const SINGULAR: &'static str = "Product";
    const PLURAL: &'static str = "Products";
    const NEEDS_REFERENCES: bool = true;

    fn table(store: &MockStore) -> &Table<Self> {
        store.products()
    }

    fn table_config() -> DataTableConfig {
        DataTableConfig::new("products")
            .column(TableColumn::sortable("name", "Product"))
            .column(TableColumn::sortable("sku", "SKU"))
            .column(TableColumn::sortable("price", "Price"))
            .column(TableColumn::sortable("stock", "Stock"))
            .column(TableColumn::sortable("status", "Status"))
            .column(TableColumn::new("categories", "Categories"))
            .column(TableColumn::new("labels", "Labels").visible(false))
            .column(TableColumn::sortable("created_at", "Created").visible(false))
            .filter(publish_filter())
            .filter(TableFilter::select(
                "stock",
                "Stock",
                filter_options([
                    ("in_stock", "In stock"),
                    ("low", "Low stock"),
                    ("out", "Out of stock"),
                ]),
            ))
            .filter(TableFilter::text("category", "Category", "Category name..."))
            .bulk_action(BulkAction::new("activate", "Activate", "ph-check-circle"))
            .bulk_action(BulkAction::new("draft", "Move to draft", "ph-pencil-simple"))
            .bulk_action(BulkAction::new("archive", "Archive", "ph-archive"))
            .bulk_action(BulkAction::delete())
            .search_placeholder("Search by name or SKU...")
            .empty_state(
                "ph-package",
                "No products found",
                Some("Try adjusting your search or filters"),
            )
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::link(self.name.clone(), self.show_path()),
            Cell::text(self.sku.clone()),
            Cell::money(self.price),
            stock_cell(self),
            publish_badge(self.status),
            Cell::refs(&self.categories),
            Cell::refs(&self.labels),
            Cell::date(self.created_at),
        ]
    }

    fn detail_rows(&self) -> Vec<DetailRow> {
        vec![
            DetailRow::new("Name", Cell::text(self.name.clone())),
            DetailRow::new("Slug", Cell::text(self.slug.clone())),
            DetailRow::new("SKU", Cell::text(self.sku.clone())),
            DetailRow::new("Status", publish_badge(self.status)),
            DetailRow::new("Price", Cell::money(self.price)),
            DetailRow::new("Compare-at price", Cell::maybe_money(self.compare_at_price)),
            DetailRow::new("Stock", stock_cell(self)),
            DetailRow::new("Categories", Cell::refs(&self.categories)),
            DetailRow::new("Tags", Cell::refs(&self.tags)),
            DetailRow::new("Collections", Cell::refs(&self.collections)),
            DetailRow::new("Labels", Cell::refs(&self.labels)),
            DetailRow::new(
                "Print options",
                Cell::maybe_ref(self.print_option_group.as_ref(), "print-options"),
            ),
            DetailRow::new("Description", Cell::multiline(self.description.clone())),
            DetailRow::new("Created", Cell::datetime(self.created_at)),
        ]
    }

    fn blank_form() -> FormData {
        FormData::new()
            .with("status", PublishStatus::Draft.as_str())
            .with("stock", 0)
    }

    fn to_form(&self) -> FormData {
        let ids = |refs: &[EntityRef]| refs.iter().map(|r| r.id).collect::<Vec<_>>();
        FormData::new()
            .with("name", &self.name)
            .with("slug", &self.slug)
            .with("sku", &self.sku)
            .with("description", &self.description)
            .with("price", self.price.to_input_value())
            .with(
                "compare_at_price",
                self.compare_at_price
                    .map(|p| p.to_input_value())
                    .unwrap_or_default(),
            )
            .with("stock", self.stock)
            .with("status", self.status.as_str())
            .with_all("categories", ids(&self.categories))
            .with_all("tags", ids(&self.tags))
            .with_all("collections", ids(&self.collections))
            .with_all("labels", ids(&self.labels))
            .with(
                "print_option_group",
                self.print_option_group
                    .as_ref()
                    .map(|g| g.id.to_string())
                    .unwrap_or_default(),
            )
    }

    fn form_fields(values: &FormData, refs: &ReferenceData) -> Vec<FormField> {
        vec![
            FormField::text("name", "Name", values).required(),
            FormField::text("slug", "Slug", values).help("Leave blank to generate from the name"),
            FormField::text("sku", "SKU", values).required(),
            FormField::textarea("description", "Description", values),
            FormField::money("price", "Price", values).required(),
            FormField::money("compare_at_price", "Compare-at price", values)
                .help("Original price shown struck through; must be higher than the price"),
            FormField::number("stock", "Stock", values).required(),
            FormField::select(
                "status",
                "Status",
                values,
                None,
                PublishStatus::ALL.iter().map(|s| (s.as_str(), s.label())),
            ),
            FormField::multi_select("categories", "Categories", values, ref_choices(&refs.categories)),
            FormField::multi_select("tags", "Tags", values, ref_choices(&refs.tags)),
            FormField::multi_select(
                "collections",
                "Collections",
                values,
                ref_choices(&refs.collections),
            ),
            FormField::multi_select("labels", "Labels", values, ref_choices(&refs.labels)),
            FormField::select(
                "print_option_group",
                "Print options",
                values,
                Some("None"),
                ref_choices(&refs.print_options),
            ),
        ]
    }

    fn from_form(
        form: &FormData,
        existing: Option<&Self>,
        refs: &ReferenceData,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = form.name("name", &mut errors);
        let slug = form.slug("slug", &name, &mut errors);
        let sku = form.required("sku", 64, &mut errors);
        let price = form.money("price", &mut errors);
        let compare_at_price = form.optional_money("compare_at_price", &mut errors);
        let stock = form.integer::<i32>("stock", &mut errors);
        let status = form.choice::<PublishStatus>("status", &mut errors);

        if stock.is_some_and(|s| s < 0) {
            errors.add("stock", "cannot be negative");
        }
        if compare_at_price.is_some_and(|was| price.is_some_and(|price| was <= price)) {
            errors.add("compare_at_price", "must be greater than the price");
        }

        let categories = resolve_refs(form, "categories", &refs.categories, &mut errors);
        let tags = resolve_refs(form, "tags", &refs.tags, &mut errors);
        let collections = resolve_refs(form, "collections", &refs.collections, &mut errors);
        let labels = resolve_refs(form, "labels", &refs.labels, &mut errors);
        let print_option_group =
            resolve_ref(form, "print_option_group", &refs.print_options, &mut errors);

        let (Some(price), Some(stock), Some(status)) = (price, stock, status) else {
            return Err(errors);
        };

        errors.finish(Self {
            id: existing.map_or(ProductId::new(0), |p| p.id),
            name,
            slug,
            sku,
            description: form.optional("description"),
            price,
            compare_at_price,
            stock,
            status,
            categories,
            tags,
            collections,
            labels,
            print_option_group,
            created_at: existing.map_or_else(Utc::now, |p| p.created_at),
        })
    }

    fn bulk_update(action: &str) -> Option<fn(&mut Self)> {
        match action {
            "activate" => Some(|p| p.status = PublishStatus::Active),
            "draft" => Some(|p| p.status = PublishStatus::Draft),
            "archive" => Some(|p| p.status = PublishStatus::Archived),
            _ => None,
        }
    }
}
