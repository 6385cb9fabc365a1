//! Collections screen.

use pressroom_core::{CollectionId, PublishStatus};

use super::{Resource, publish_badge, publish_filter};
use crate::components::{
    BulkAction, Cell, DataTableConfig, DetailRow, FilterOption, FormField, TableColumn, TableFilter,
};
use crate::models::Collection;
use crate::query::{Listable, SortKey};
use crate::store::{MockStore, ReferenceData, Table};
use crate::validation::{FormData, ValidationErrors};

impl Listable for Collection {
    fn list_id(&self) -> i32 {
        self.id.as_i32()
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.slug, self.description)
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "name" => Some(SortKey::text(&self.name)),
            "status" => Some(SortKey::text(self.status.as_str())),
            "featured" => Some(SortKey::int(i64::from(self.featured))),
            _ => None,
        }
    }

    fn matches_filter(&self, key: &str, value: &str) -> bool {
        match key {
            "status" => self.status.as_str() == value,
            "featured" => (value == "true") == self.featured,
            _ => true,
        }
    }
}

impl Resource for Collection {
    const SLUG: &'static str = "collections";
    const SINGULAR: &'static str = "Collection";
    const PLURAL: &'static str = "Collections";

    fn table(store: &MockStore) -> &Table<Self> {
        store.collections()
    }

    fn table_config() -> DataTableConfig {
        DataTableConfig::new("collections")
            .column(TableColumn::sortable("name", "Name"))
            .column(TableColumn::new("slug", "Slug"))
            .column(TableColumn::sortable("featured", "Featured"))
            .column(TableColumn::sortable("status", "Status"))
            .filter(publish_filter())
            .filter(TableFilter::select("featured", "Featured", FilterOption::yes_no()))
            .bulk_action(BulkAction::new("feature", "Feature", "ph-star"))
            .bulk_action(BulkAction::new("unfeature", "Unfeature", "ph-star-half"))
            .bulk_action(BulkAction::delete())
            .search_placeholder("Search collections...")
            .empty_state("ph-stack", "No collections found", None)
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::link(self.name.clone(), self.show_path()),
            Cell::text(self.slug.clone()),
            Cell::yes_no(self.featured),
            publish_badge(self.status),
        ]
    }

    fn detail_rows(&self) -> Vec<DetailRow> {
        vec![
            DetailRow::new("Name", Cell::text(self.name.clone())),
            DetailRow::new("Slug", Cell::text(self.slug.clone())),
            DetailRow::new("Status", publish_badge(self.status)),
            DetailRow::new("Featured", Cell::yes_no(self.featured)),
            DetailRow::new("Description", Cell::multiline(self.description.clone())),
        ]
    }

    fn blank_form() -> FormData {
        FormData::new().with("status", PublishStatus::Draft.as_str())
    }

    fn to_form(&self) -> FormData {
        let form = FormData::new()
            .with("name", &self.name)
            .with("slug", &self.slug)
            .with("description", &self.description)
            .with("status", self.status.as_str());
        if self.featured {
            form.with("featured", "on")
        } else {
            form
        }
    }

    fn form_fields(values: &FormData, _refs: &ReferenceData) -> Vec<FormField> {
        vec![
            FormField::text("name", "Name", values).required(),
            FormField::text("slug", "Slug", values).help("Leave blank to generate from the name"),
            FormField::textarea("description", "Description", values),
            FormField::select(
                "status",
                "Status",
                values,
                None,
                PublishStatus::ALL.iter().map(|s| (s.as_str(), s.label())),
            ),
            FormField::checkbox("featured", "Featured on the storefront", values),
        ]
    }

    fn from_form(
        form: &FormData,
        existing: Option<&Self>,
        _refs: &ReferenceData,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = form.name("name", &mut errors);
        let slug = form.slug("slug", &name, &mut errors);
        let status = form.choice::<PublishStatus>("status", &mut errors);

        let Some(status) = status else {
            return Err(errors);
        };

        errors.finish(Self {
            id: existing.map_or(CollectionId::new(0), |c| c.id),
            name,
            slug,
            description: form.optional("description"),
            featured: form.checkbox("featured"),
            status,
        })
    }

    fn bulk_update(action: &str) -> Option<fn(&mut Self)> {
        match action {
            "feature" => Some(|c| c.featured = true),
            "unfeature" => Some(|c| c.featured = false),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::Fixtures;

    #[test]
    fn test_unchecked_box_clears_featured() {
        let existing = Fixtures::builtin().unwrap().collections.remove(0);
        assert!(existing.featured);

        let form = FormData::new().with("name", &existing.name).with("status", "active");
        let updated =
            Collection::from_form(&form, Some(&existing), &ReferenceData::default()).unwrap();
        assert!(!updated.featured);
        assert_eq!(updated.id, existing.id);
    }

    #[test]
    fn test_round_trip_through_form() {
        let existing = Fixtures::builtin().unwrap().collections.remove(1);
        let updated =
            Collection::from_form(&existing.to_form(), Some(&existing), &ReferenceData::default())
                .unwrap();
        assert_eq!(updated, existing);
    }

    #[test]
    fn test_featured_filter() {
        let collections = Fixtures::builtin().unwrap().collections;
        let featured = collections
            .iter()
            .filter(|c| c.matches_filter("featured", "true"))
            .count();
        assert_eq!(featured, 2);
    }
}
