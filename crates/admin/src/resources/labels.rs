//! Product labels screen. Labels are the colored badges shown on product
//! cards ("New", "Limited", ...).

use pressroom_core::LabelId;

use super::Resource;
use crate::components::{BulkAction, Cell, DataTableConfig, DetailRow, FormField, TableColumn};
use crate::models::{ProductLabel, is_hex_color};
use crate::query::{Listable, SortKey};
use crate::store::{MockStore, ReferenceData, Table};
use crate::validation::{FormData, ValidationErrors};

const DEFAULT_COLOR: &str = "#6b7280";

impl Listable for ProductLabel {
    fn list_id(&self) -> i32 {
        self.id.as_i32()
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.name, self.color)
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "name" => Some(SortKey::text(&self.name)),
            "color" => Some(SortKey::text(&self.color)),
            _ => None,
        }
    }

    fn matches_filter(&self, _key: &str, _value: &str) -> bool {
        true
    }
}

impl Resource for ProductLabel {
    const SLUG: &'static str = "labels";
    const SINGULAR: &'static str = "Label";
    const PLURAL: &'static str = "Labels";

    fn table(store: &MockStore) -> &Table<Self> {
        store.labels()
    }

    fn table_config() -> DataTableConfig {
        DataTableConfig::new("labels")
            .column(TableColumn::sortable("name", "Name"))
            .column(TableColumn::sortable("color", "Color"))
            .bulk_action(BulkAction::delete())
            .search_placeholder("Search labels...")
            .empty_state("ph-bookmark-simple", "No labels found", None)
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::link(self.name.clone(), self.show_path()),
            Cell::swatch(&self.color),
        ]
    }

    fn detail_rows(&self) -> Vec<DetailRow> {
        vec![
            DetailRow::new("Name", Cell::text(self.name.clone())),
            DetailRow::new("Color", Cell::swatch(&self.color)),
        ]
    }

    fn blank_form() -> FormData {
        FormData::new().with("color", DEFAULT_COLOR)
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("name", &self.name)
            .with("color", &self.color)
    }

    fn form_fields(values: &FormData, _refs: &ReferenceData) -> Vec<FormField> {
        vec![
            FormField::text("name", "Name", values).required(),
            FormField::color("color", "Color", values)
                .required()
                .help("Hex color such as #16a34a"),
        ]
    }

    fn from_form(
        form: &FormData,
        existing: Option<&Self>,
        _refs: &ReferenceData,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = form.name("name", &mut errors);
        let color = form.get("color").to_lowercase();
        if !is_hex_color(&color) {
            errors.add("color", "must be a hex color like #1a2b3c");
        }

        errors.finish(Self {
            id: existing.map_or(LabelId::new(0), |l| l.id),
            name,
            color,
        })
    }

    fn bulk_update(_action: &str) -> Option<fn(&mut Self)> {
        None
    }
}
