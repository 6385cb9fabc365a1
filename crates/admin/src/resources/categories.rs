//! Product categories screen.

use pressroom_core::CategoryId;

use super::{Resource, ref_choices, resolve_ref};
use crate::components::{
    BulkAction, Cell, DataTableConfig, DetailRow, FilterOption, FormField, TableColumn, TableFilter,
};
use crate::models::ProductCategory;
use crate::query::{Listable, SortKey};
use crate::store::{MockStore, ReferenceData, Table};
use crate::validation::{FormData, ValidationErrors};

impl Listable for ProductCategory {
    fn list_id(&self) -> i32 {
        self.id.as_i32()
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.slug, self.description)
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "name" => Some(SortKey::text(&self.name)),
            "slug" => Some(SortKey::text(&self.slug)),
            "parent" => Some(
                self.parent
                    .as_ref()
                    .map_or(SortKey::Empty, |p| SortKey::text(&p.name)),
            ),
            _ => None,
        }
    }

    fn matches_filter(&self, key: &str, value: &str) -> bool {
        match key {
            "top_level" => (value == "true") == self.parent.is_none(),
            _ => true,
        }
    }
}

impl Resource for ProductCategory {
    const SLUG: &'static str = "categories";
    const SINGULAR: &'static str = "Category";
    const PLURAL: &'static str = "Categories";
    const NEEDS_REFERENCES: bool = true;

    fn table(store: &MockStore) -> &Table<Self> {
        store.categories()
    }

    fn table_config() -> DataTableConfig {
        DataTableConfig::new("categories")
            .column(TableColumn::sortable("name", "Name"))
            .column(TableColumn::sortable("slug", "Slug"))
            .column(TableColumn::sortable("parent", "Parent"))
            .column(TableColumn::new("description", "Description"))
            .filter(TableFilter::select("top_level", "Top level", FilterOption::yes_no()))
            .bulk_action(BulkAction::delete())
            .search_placeholder("Search categories...")
            .empty_state("ph-folders", "No categories found", None)
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::link(self.name.clone(), self.show_path()),
            Cell::text(self.slug.clone()),
            Cell::maybe_ref(self.parent.as_ref(), Self::SLUG),
            Cell::or_dash(self.description.clone()),
        ]
    }

    fn detail_rows(&self) -> Vec<DetailRow> {
        vec![
            DetailRow::new("Name", Cell::text(self.name.clone())),
            DetailRow::new("Slug", Cell::text(self.slug.clone())),
            DetailRow::new("Parent", Cell::maybe_ref(self.parent.as_ref(), Self::SLUG)),
            DetailRow::new("Description", Cell::multiline(self.description.clone())),
        ]
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("name", &self.name)
            .with("slug", &self.slug)
            .with("description", &self.description)
            .with(
                "parent",
                self.parent
                    .as_ref()
                    .map(|p| p.id.to_string())
                    .unwrap_or_default(),
            )
    }

    fn form_fields(values: &FormData, refs: &ReferenceData) -> Vec<FormField> {
        vec![
            FormField::text("name", "Name", values).required(),
            FormField::text("slug", "Slug", values).help("Leave blank to generate from the name"),
            FormField::select(
                "parent",
                "Parent category",
                values,
                Some("None (top level)"),
                ref_choices(&refs.categories),
            ),
            FormField::textarea("description", "Description", values),
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
        let parent = resolve_ref(form, "parent", &refs.categories, &mut errors);

        let own_id = existing.map(|c| c.id.as_i32());
        if parent.as_ref().is_some_and(|p| Some(p.id) == own_id) {
            errors.add("parent", "a category cannot be its own parent");
        }

        errors.finish(Self {
            id: existing.map_or(CategoryId::new(0), |c| c.id),
            name,
            slug,
            description: form.optional("description"),
            parent,
        })
    }

    fn bulk_update(_action: &str) -> Option<fn(&mut Self)> {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pressroom_core::EntityRef;

    use super::*;

    fn refs() -> ReferenceData {
        ReferenceData {
            categories: vec![EntityRef::new(4, "Stationery"), EntityRef::new(5, "Letterheads")],
            ..ReferenceData::default()
        }
    }

    #[test]
    fn test_create_with_parent() {
        let form = FormData::new().with("name", "Envelopes").with("parent", "4");
        let category = ProductCategory::from_form(&form, None, &refs()).unwrap();
        assert_eq!(category.slug, "envelopes");
        assert_eq!(category.parent, Some(EntityRef::new(4, "Stationery")));
    }

    #[test]
    fn test_cannot_be_own_parent() {
        let existing = ProductCategory {
            id: CategoryId::new(5),
            name: "Letterheads".to_string(),
            slug: "letterheads".to_string(),
            description: String::new(),
            parent: None,
        };
        let form = existing.to_form().with("parent", "5");
        let errors = ProductCategory::from_form(&form, Some(&existing), &refs()).unwrap_err();
        assert_eq!(errors.get("parent"), Some("a category cannot be its own parent"));
    }

    #[test]
    fn test_top_level_filter() {
        let child = ProductCategory {
            id: CategoryId::new(5),
            name: "Letterheads".to_string(),
            slug: "letterheads".to_string(),
            description: String::new(),
            parent: Some(EntityRef::new(4, "Stationery")),
        };
        assert!(child.matches_filter("top_level", "false"));
        assert!(!child.matches_filter("top_level", "true"));
    }
}
