//! Product tags screen.

use pressroom_core::TagId;

use super::Resource;
use crate::components::{BulkAction, Cell, DataTableConfig, DetailRow, FormField, TableColumn};
use crate::models::ProductTag;
use crate::query::{Listable, SortKey};
use crate::store::{MockStore, ReferenceData, Table};
use crate::validation::{FormData, ValidationErrors};

impl Listable for ProductTag {
    fn list_id(&self) -> i32 {
        self.id.as_i32()
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.name, self.slug)
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "name" => Some(SortKey::text(&self.name)),
            "slug" => Some(SortKey::text(&self.slug)),
            _ => None,
        }
    }

    fn matches_filter(&self, _key: &str, _value: &str) -> bool {
        true
    }
}

impl Resource for ProductTag {
    const SLUG: &'static str = "tags";
    const SINGULAR: &'static str = "Tag";
    const PLURAL: &'static str = "Tags";

    fn table(store: &MockStore) -> &Table<Self> {
        store.tags()
    }

    fn table_config() -> DataTableConfig {
        DataTableConfig::new("tags")
            .column(TableColumn::sortable("name", "Name"))
            .column(TableColumn::sortable("slug", "Slug"))
            .bulk_action(BulkAction::delete())
            .search_placeholder("Search tags...")
            .empty_state("ph-tag", "No tags found", None)
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::link(self.name.clone(), self.show_path()),
            Cell::text(self.slug.clone()),
        ]
    }

    fn detail_rows(&self) -> Vec<DetailRow> {
        vec![
            DetailRow::new("Name", Cell::text(self.name.clone())),
            DetailRow::new("Slug", Cell::text(self.slug.clone())),
        ]
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("name", &self.name)
            .with("slug", &self.slug)
    }

    fn form_fields(values: &FormData, _refs: &ReferenceData) -> Vec<FormField> {
        vec![
            FormField::text("name", "Name", values).required(),
            FormField::text("slug", "Slug", values).help("Leave blank to generate from the name"),
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

        errors.finish(Self {
            id: existing.map_or(TagId::new(0), |t| t.id),
            name,
            slug,
        })
    }

    fn bulk_update(_action: &str) -> Option<fn(&mut Self)> {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_required() {
        let errors =
            ProductTag::from_form(&FormData::new(), None, &ReferenceData::default()).unwrap_err();
        assert_eq!(errors.get("name"), Some("is required"));
    }

    #[test]
    fn test_explicit_slug_is_normalized() {
        let form = FormData::new().with("name", "Same day").with("slug", "Rush Jobs!");
        let tag = ProductTag::from_form(&form, None, &ReferenceData::default()).unwrap();
        assert_eq!(tag.slug, "rush-jobs");
    }
}
