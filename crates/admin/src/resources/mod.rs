//! Admin screens, one [`Resource`] per entity.
//!
//! A resource describes everything the generic handlers in
//! [`crate::routes::resource`] need: where its rows live, how the list looks,
//! what the detail page shows, which form fields it has and how a submitted
//! form becomes a record. Adding an entity screen means implementing this
//! trait and registering it in [`crate::routes::routes`].

pub mod admins;
pub mod categories;
pub mod collections;
pub mod contacts;
pub mod flash_sales;
pub mod labels;
pub mod orders;
pub mod print_options;
pub mod products;
pub mod reviews;
pub mod tags;
pub mod users;

use pressroom_core::{EntityRef, PublishStatus};
use serde::Serialize;

use crate::components::{
    Cell, DataTableConfig, DetailRow, DetailSection, FilterOption, FormField, TableFilter, Tone,
};
use crate::models::Product;
use crate::query::Listable;
use crate::store::{MockStore, Record, ReferenceData, Table};
use crate::validation::{FormData, ValidationErrors};

/// An entity screen served by the generic list/detail/form handlers.
pub trait Resource: Record + Listable + Serialize {
    /// URL segment, e.g. `flash-sales`.
    const SLUG: &'static str;
    /// Capitalized singular, e.g. "Flash sale".
    const SINGULAR: &'static str;
    /// Capitalized plural, e.g. "Flash sales".
    const PLURAL: &'static str;
    /// Whether `/new` and `POST /{slug}` are available.
    const CREATABLE: bool = true;
    /// Whether the form needs [`ReferenceData`] (selects of other entities).
    const NEEDS_REFERENCES: bool = false;
    /// Whether the detail page needs the product catalog, see
    /// [`Resource::product_sections`].
    const NEEDS_PRODUCTS: bool = false;

    fn table(store: &MockStore) -> &Table<Self>;

    fn table_config() -> DataTableConfig;

    /// Short human label used in titles, breadcrumbs and flashes.
    fn label(&self) -> String;

    /// One cell per configured column, in column order.
    fn cells(&self) -> Vec<Cell>;

    fn detail_rows(&self) -> Vec<DetailRow>;

    /// Nested tables shown below the detail rows.
    fn detail_sections(&self) -> Vec<DetailSection> {
        Vec::new()
    }

    /// Detail tables that read current product data (prices, stock).
    /// Only called when [`Resource::NEEDS_PRODUCTS`] is set.
    fn product_sections(&self, _products: &[Product]) -> Vec<DetailSection> {
        Vec::new()
    }

    /// Values prefilled on the "new" form.
    fn blank_form() -> FormData {
        FormData::new()
    }

    /// Form values for editing this record.
    fn to_form(&self) -> FormData;

    fn form_fields(values: &FormData, refs: &ReferenceData) -> Vec<FormField>;

    /// Validate a submitted form into a record.
    ///
    /// `existing` is the stored record on update; fields the form does not
    /// edit are carried over from it.
    ///
    /// # Errors
    ///
    /// Returns every field problem found.
    fn from_form(
        form: &FormData,
        existing: Option<&Self>,
        refs: &ReferenceData,
    ) -> Result<Self, ValidationErrors>;

    /// Mutation applied by a non-delete bulk action.
    fn bulk_update(action: &str) -> Option<fn(&mut Self)>;

    /// Path of the list page.
    #[must_use]
    fn index_path() -> String {
        format!("/{}", Self::SLUG)
    }

    /// Path of this record's detail page.
    #[must_use]
    fn show_path(&self) -> String {
        format!("/{}/{}", Self::SLUG, self.id())
    }
}

/// Resolve a multi-select of ids against a reference list.
pub(crate) fn resolve_refs(
    form: &FormData,
    key: &str,
    list: &[EntityRef],
    errors: &mut ValidationErrors,
) -> Vec<EntityRef> {
    let ids = form.ids(key, errors);
    ReferenceData::resolve(list, &ids).unwrap_or_else(|id| {
        errors.add(key, format!("{id} does not exist"));
        Vec::new()
    })
}

/// Resolve an optional single id against a reference list.
pub(crate) fn resolve_ref(
    form: &FormData,
    key: &str,
    list: &[EntityRef],
    errors: &mut ValidationErrors,
) -> Option<EntityRef> {
    let id = form.optional_id(key, errors)?;
    let found = list.iter().find(|r| r.id == id).cloned();
    if found.is_none() {
        errors.add(key, format!("{id} does not exist"));
    }
    found
}

/// Select choices for a reference list.
pub(crate) fn ref_choices(list: &[EntityRef]) -> Vec<(i32, String)> {
    list.iter().map(|r| (r.id, r.name.clone())).collect()
}

/// Filter options from `(value, label)` pairs.
pub(crate) fn filter_options<'a>(
    pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Vec<FilterOption> {
    pairs
        .into_iter()
        .map(|(value, label)| FilterOption::new(value, label))
        .collect()
}

/// Badge for the publication state shared by several resources.
pub(crate) fn publish_badge(status: PublishStatus) -> Cell {
    let tone = match status {
        PublishStatus::Active => Tone::Success,
        PublishStatus::Draft => Tone::Warning,
        PublishStatus::Archived => Tone::Neutral,
    };
    Cell::badge(status.label(), tone)
}

/// Select filter over every publication state.
pub(crate) fn publish_filter() -> TableFilter {
    TableFilter::select(
        "status",
        "Status",
        filter_options(PublishStatus::ALL.iter().map(|s| (s.as_str(), s.label()))),
    )
}

/// Whether any reference in `refs` has the id in `value`.
pub(crate) fn has_ref(refs: &[EntityRef], value: &str) -> bool {
    value
        .parse::<i32>()
        .is_ok_and(|id| refs.iter().any(|r| r.id == id))
}

/// Case-insensitive name match for text filters on references.
pub(crate) fn has_ref_named(refs: &[EntityRef], value: &str) -> bool {
    let needle = value.to_lowercase();
    refs.iter().any(|r| r.name.to_lowercase().contains(&needle))
}
