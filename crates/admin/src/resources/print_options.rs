//! Print option groups screen.
//!
//! The attribute tree is edited as one JSON document; the detail page renders
//! it back as one price matrix per attribute.

use chrono::Utc;
use pressroom_core::{PrintOptionGroupId, PublishStatus};

use super::{Resource, publish_badge, publish_filter};
use crate::components::{
    BulkAction, Cell, DataTableConfig, DetailRow, DetailSection, FormField, TableColumn,
};
use crate::models::{PrintConfiguration, PrintOptionGroup, VariationAttribute};
use crate::query::{Listable, SortKey};
use crate::store::{MockStore, ReferenceData, Table};
use crate::validation::{FormData, ValidationErrors};

const CONFIGURATION_HELP: &str = "quantity_tiers is a strictly increasing list. Every attribute \
     value needs one price per tier and may carry a design_area in millimetres.";

fn tiers_text(configuration: &PrintConfiguration) -> String {
    configuration
        .quantity_tiers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" / ")
}

fn attribute_names(configuration: &PrintConfiguration) -> String {
    configuration
        .attributes
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn price_matrix(tiers: &[u32], attribute: &VariationAttribute) -> DetailSection {
    let headers = std::iter::once("Value".to_string())
        .chain(tiers.iter().map(|t| format!("× {t}")))
        .chain(std::iter::once("Design area".to_string()))
        .collect();

    attribute.values.iter().fold(
        DetailSection::new(attribute.name.clone(), headers).note(attribute.kind.label()),
        |section, value| {
            let mut cells = vec![Cell::text(value.label.clone())];
            cells.extend(value.prices.iter().copied().map(Cell::money));
            cells.push(
                value
                    .design_area
                    .map_or_else(|| Cell::muted("—"), |area| Cell::text(area.describe())),
            );
            section.row(cells)
        },
    )
}

fn parse_configuration(form: &FormData, errors: &mut ValidationErrors) -> Option<PrintConfiguration> {
    let raw = form.get("configuration");
    if raw.is_empty() {
        errors.add("configuration", "is required");
        return None;
    }

    let configuration = match serde_json::from_str::<PrintConfiguration>(raw) {
        Ok(configuration) => configuration,
        Err(e) => {
            errors.add("configuration", format!("is not valid JSON: {e}"));
            return None;
        }
    };

    match configuration.validate() {
        Ok(()) => Some(configuration),
        Err(e) => {
            errors.add("configuration", e.to_string());
            None
        }
    }
}

impl Listable for PrintOptionGroup {
    fn list_id(&self) -> i32 {
        self.id.as_i32()
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.name,
            self.description,
            attribute_names(&self.configuration)
        )
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "name" => Some(SortKey::text(&self.name)),
            "variants" => Some(SortKey::int(
                i64::try_from(self.configuration.variant_count()).unwrap_or(i64::MAX),
            )),
            "status" => Some(SortKey::text(self.status.as_str())),
            "created_at" => Some(SortKey::Date(self.created_at)),
            _ => None,
        }
    }

    fn matches_filter(&self, key: &str, value: &str) -> bool {
        match key {
            "status" => self.status.as_str() == value,
            "attribute" => self.configuration.find_attribute(value).is_some(),
            _ => true,
        }
    }
}

impl Resource for PrintOptionGroup {
    const SLUG: &'static str = "print-options";
    const SINGULAR: &'static str = "Print option group";
    const PLURAL: &'static str = "Print option groups";

    fn table(store: &MockStore) -> &Table<Self> {
        store.print_options()
    }

    fn table_config() -> DataTableConfig {
        DataTableConfig::new("print-options")
            .column(TableColumn::sortable("name", "Name"))
            .column(TableColumn::new("tiers", "Quantity tiers"))
            .column(TableColumn::new("attributes", "Attributes"))
            .column(TableColumn::sortable("variants", "Variants"))
            .column(TableColumn::sortable("status", "Status"))
            .column(TableColumn::sortable("created_at", "Created").visible(false))
            .filter(publish_filter())
            .bulk_action(BulkAction::new("activate", "Activate", "ph-check-circle"))
            .bulk_action(BulkAction::new("draft", "Move to draft", "ph-pencil-simple"))
            .bulk_action(BulkAction::new("archive", "Archive", "ph-archive"))
            .bulk_action(BulkAction::delete())
            .search_placeholder("Search groups or attributes...")
            .empty_state(
                "ph-sliders",
                "No print option groups found",
                Some("Groups define the sizes, stocks and finishes a product can be ordered in"),
            )
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::link(self.name.clone(), self.show_path()),
            Cell::text(tiers_text(&self.configuration)),
            Cell::or_dash(attribute_names(&self.configuration)),
            Cell::text(self.configuration.variant_count().to_string()),
            publish_badge(self.status),
            Cell::date(self.created_at),
        ]
    }

    fn detail_rows(&self) -> Vec<DetailRow> {
        vec![
            DetailRow::new("Name", Cell::text(self.name.clone())),
            DetailRow::new("Status", publish_badge(self.status)),
            DetailRow::new("Description", Cell::multiline(self.description.clone())),
            DetailRow::new("Quantity tiers", Cell::text(tiers_text(&self.configuration))),
            DetailRow::new(
                "Variants",
                Cell::text(self.configuration.variant_count().to_string()),
            ),
            DetailRow::new("Created", Cell::datetime(self.created_at)),
        ]
    }

    fn detail_sections(&self) -> Vec<DetailSection> {
        let tiers = &self.configuration.quantity_tiers;
        let mut sections: Vec<DetailSection> = self
            .configuration
            .attributes
            .iter()
            .map(|attribute| price_matrix(tiers, attribute))
            .collect();

        let starting = self.configuration.starting_prices().into_iter().fold(
            DetailSection::new("Starting prices", vec!["Quantity".to_string(), "From".to_string()])
                .note("Cheapest value of every attribute"),
            |section, (quantity, price)| {
                section.row(vec![Cell::text(quantity.to_string()), Cell::money(price)])
            },
        );
        sections.push(starting);
        sections
    }

    fn blank_form() -> FormData {
        let starter = PrintConfiguration {
            quantity_tiers: vec![100, 250, 500],
            attributes: Vec::new(),
        };
        FormData::new()
            .with("status", PublishStatus::Draft.as_str())
            .with(
                "configuration",
                serde_json::to_string_pretty(&starter).unwrap_or_default(),
            )
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("name", &self.name)
            .with("description", &self.description)
            .with("status", self.status.as_str())
            .with(
                "configuration",
                serde_json::to_string_pretty(&self.configuration).unwrap_or_default(),
            )
    }

    fn form_fields(values: &FormData, _refs: &ReferenceData) -> Vec<FormField> {
        vec![
            FormField::text("name", "Name", values).required(),
            FormField::textarea("description", "Description", values),
            FormField::select(
                "status",
                "Status",
                values,
                None,
                PublishStatus::ALL.iter().map(|s| (s.as_str(), s.label())),
            ),
            FormField::json("configuration", "Configuration (JSON)", values)
                .required()
                .help(CONFIGURATION_HELP),
        ]
    }

    fn from_form(
        form: &FormData,
        existing: Option<&Self>,
        _refs: &ReferenceData,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = form.name("name", &mut errors);
        let status = form.choice::<PublishStatus>("status", &mut errors);
        let configuration = parse_configuration(form, &mut errors);

        let (Some(status), Some(configuration)) = (status, configuration) else {
            return Err(errors);
        };

        errors.finish(Self {
            id: existing.map_or(PrintOptionGroupId::new(0), |g| g.id),
            name,
            description: form.optional("description"),
            status,
            configuration,
            created_at: existing.map_or_else(Utc::now, |g| g.created_at),
        })
    }

    fn bulk_update(action: &str) -> Option<fn(&mut Self)> {
        match action {
            "activate" => Some(|g| g.status = PublishStatus::Active),
            "draft" => Some(|g| g.status = PublishStatus::Draft),
            "archive" => Some(|g| g.status = PublishStatus::Archived),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::store::Fixtures;

    fn flyers() -> PrintOptionGroup {
        Fixtures::builtin().unwrap().print_options.remove(1)
    }

    #[test]
    fn test_round_trip_through_json_field() {
        let existing = flyers();
        let updated = PrintOptionGroup::from_form(
            &existing.to_form(),
            Some(&existing),
            &ReferenceData::default(),
        )
        .unwrap();
        assert_eq!(updated, existing);
    }

    #[test]
    fn test_malformed_json_reported_on_field() {
        let form = flyers().to_form().with("configuration", "{\"quantity_tiers\": [100,");
        let errors =
            PrintOptionGroup::from_form(&form, None, &ReferenceData::default()).unwrap_err();
        assert!(errors.get("configuration").unwrap().starts_with("is not valid JSON"));
    }

    #[test]
    fn test_invalid_configuration_reported_on_field() {
        let form = flyers()
            .to_form()
            .with("configuration", r#"{"quantity_tiers": [500, 100]}"#);
        let errors =
            PrintOptionGroup::from_form(&form, None, &ReferenceData::default()).unwrap_err();
        assert_eq!(
            errors.get("configuration"),
            Some("quantity tiers must be positive and strictly increasing")
        );
    }

    #[test]
    fn test_blank_form_configuration_is_valid() {
        let form = PrintOptionGroup::blank_form().with("name", "Poster Options");
        let group = PrintOptionGroup::from_form(&form, None, &ReferenceData::default()).unwrap();
        assert_eq!(group.configuration.quantity_tiers, vec![100, 250, 500]);
        assert_eq!(group.status, PublishStatus::Draft);
    }

    #[test]
    fn test_detail_sections_render_price_matrices() {
        let group = flyers();
        let sections = group.detail_sections();
        // Paper Size, Paper Type, Finishing, then starting prices.
        assert_eq!(sections.len(), 4);

        let sizes = &sections[0];
        assert_eq!(sizes.title, "Paper Size");
        assert_eq!(sizes.headers, vec!["Value", "× 100", "× 250", "× 500", "Design area"]);
        assert_eq!(sizes.rows.len(), 3);
        assert_eq!(sizes.rows[1][2].text, "$30.00");
        assert_eq!(
            sizes.rows[1][4].text,
            "148 × 210 mm (bleed 3, safe 5); canvas 154 × 216, safe area 138 × 200"
        );

        let starting = &sections[3];
        assert_eq!(starting.rows[0][1].text, "$12.00");
    }

    #[test]
    fn test_attribute_filter() {
        let group = flyers();
        assert!(group.matches_filter("attribute", "paper type"));
        assert!(!group.matches_filter("attribute", "Lamination"));
    }
}
