//! Data table component types.
//!
//! These types define the configuration for the list view of every resource:
//! columns, filters, bulk actions and the empty state. The `*_views` methods
//! combine a configuration with the current [`ListQuery`] into what the
//! template renders.

use serde::{Deserialize, Serialize};

use crate::query::ListQuery;

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    /// Unique key for the column (also the `sort` value).
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Whether the column is sortable.
    pub sortable: bool,
    /// Whether the column is visible by default.
    pub default_visible: bool,
}

impl TableColumn {
    /// Create a new sortable column.
    #[must_use]
    pub fn sortable(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: true,
            default_visible: true,
        }
    }

    /// Create a new non-sortable column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: false,
            default_visible: true,
        }
    }

    /// Set whether the column is visible by default.
    #[must_use]
    pub const fn visible(mut self, visible: bool) -> Self {
        self.default_visible = visible;
        self
    }
}

/// Filter type for data tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Text input filter.
    Text,
    /// Single-select dropdown.
    Select,
}

/// Filter definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFilter {
    /// Filter parameter key.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Filter type.
    pub filter_type: FilterType,
    /// Placeholder text (for text inputs).
    pub placeholder: Option<String>,
    /// Available options (for selects).
    pub options: Vec<FilterOption>,
}

/// Option for select filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOption {
    /// Option value.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl FilterOption {
    /// Create a new filter option.
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }

    /// `true`/`false` options labelled Yes/No.
    #[must_use]
    pub fn yes_no() -> Vec<Self> {
        vec![Self::new("true", "Yes"), Self::new("false", "No")]
    }
}

impl TableFilter {
    /// Create a text filter.
    #[must_use]
    pub fn text(key: &str, label: &str, placeholder: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Text,
            placeholder: Some(placeholder.to_string()),
            options: vec![],
        }
    }

    /// Create a select filter.
    #[must_use]
    pub fn select(key: &str, label: &str, options: Vec<FilterOption>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Select,
            placeholder: None,
            options,
        }
    }
}

/// Bulk action definition for data tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkAction {
    /// Action key (posted as `action`).
    pub key: String,
    /// Display label.
    pub label: String,
    /// Phosphor icon class.
    pub icon: String,
    /// Whether this is a destructive action.
    pub destructive: bool,
}

impl BulkAction {
    /// Create a new bulk action.
    #[must_use]
    pub fn new(key: &str, label: &str, icon: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            icon: icon.to_string(),
            destructive: false,
        }
    }

    /// The standard destructive delete action.
    #[must_use]
    pub fn delete() -> Self {
        Self::new("delete", "Delete", "ph-trash").destructive()
    }

    /// Mark this action as destructive.
    #[must_use]
    pub const fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Filter definitions.
    pub filters: Vec<TableFilter>,
    /// Bulk action definitions.
    pub bulk_actions: Vec<BulkAction>,
    /// Search placeholder text.
    pub search_placeholder: String,
    /// Icon for empty state.
    pub empty_icon: String,
    /// Title for empty state.
    pub empty_title: String,
    /// Description for empty state.
    pub empty_description: Option<String>,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            filters: vec![],
            bulk_actions: vec![],
            search_placeholder: "Search...".to_string(),
            empty_icon: "ph-list".to_string(),
            empty_title: "No items found".to_string(),
            empty_description: None,
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Add a filter.
    #[must_use]
    pub fn filter(mut self, filter: TableFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add a bulk action.
    #[must_use]
    pub fn bulk_action(mut self, action: BulkAction) -> Self {
        self.bulk_actions.push(action);
        self
    }

    /// Set search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, placeholder: &str) -> Self {
        self.search_placeholder = placeholder.to_string();
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(mut self, icon: &str, title: &str, description: Option<&str>) -> Self {
        self.empty_icon = icon.to_string();
        self.empty_title = title.to_string();
        self.empty_description = description.map(ToString::to_string);
        self
    }

    /// Positions of the default-visible columns, for picking row cells.
    #[must_use]
    pub fn visible_indices(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.default_visible)
            .map(|(i, _)| i)
            .collect()
    }

    /// Look up a bulk action by key.
    #[must_use]
    pub fn find_bulk_action(&self, key: &str) -> Option<&BulkAction> {
        self.bulk_actions.iter().find(|a| a.key == key)
    }

    /// Header cells for the visible columns with their sort links.
    #[must_use]
    pub fn column_views(&self, query: &ListQuery) -> Vec<ColumnView> {
        self.columns
            .iter()
            .filter(|c| c.default_visible)
            .map(|c| ColumnView {
                label: c.label.clone(),
                sort_href: c.sortable.then(|| query.sort_href(&c.key)),
                sorted: query.is_sorted_by(&c.key).then(|| query.dir.as_str()),
            })
            .collect()
    }

    /// Filter controls prefilled from the current query.
    #[must_use]
    pub fn filter_views(&self, query: &ListQuery) -> Vec<FilterView> {
        self.filters
            .iter()
            .map(|f| {
                let value = query.filter(&f.key).to_string();
                FilterView {
                    key: f.key.clone(),
                    label: f.label.clone(),
                    is_select: f.filter_type == FilterType::Select,
                    placeholder: f.placeholder.clone().unwrap_or_default(),
                    options: f
                        .options
                        .iter()
                        .map(|o| OptionView {
                            value: o.value.clone(),
                            label: o.label.clone(),
                            selected: o.value == value,
                        })
                        .collect(),
                    value,
                }
            })
            .collect()
    }
}

/// A rendered column header.
#[derive(Debug, Clone)]
pub struct ColumnView {
    pub label: String,
    /// Link that sorts by this column, for sortable columns.
    pub sort_href: Option<String>,
    /// `"asc"`/`"desc"` when the list is sorted by this column.
    pub sorted: Option<&'static str>,
}

impl ColumnView {
    /// `aria-sort` value, empty when unsorted.
    #[must_use]
    pub fn aria_sort(&self) -> &'static str {
        match self.sorted {
            Some("asc") => "ascending",
            Some(_) => "descending",
            None => "",
        }
    }

    /// Direction marker shown after the label.
    #[must_use]
    pub fn arrow(&self) -> &'static str {
        match self.sorted {
            Some("asc") => " ▲",
            Some(_) => " ▼",
            None => "",
        }
    }
}

/// A rendered filter control.
#[derive(Debug, Clone)]
pub struct FilterView {
    pub key: String,
    pub label: String,
    pub is_select: bool,
    pub placeholder: String,
    pub value: String,
    pub options: Vec<OptionView>,
}

/// A `<option>` with its selected state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn config() -> DataTableConfig {
        DataTableConfig::new("things")
            .column(TableColumn::sortable("name", "Name"))
            .column(TableColumn::new("notes", "Notes").visible(false))
            .column(TableColumn::new("tags", "Tags"))
            .filter(TableFilter::select(
                "status",
                "Status",
                vec![FilterOption::new("active", "Active"), FilterOption::new("draft", "Draft")],
            ))
            .bulk_action(BulkAction::delete())
    }

    fn query(pairs: &[(&str, &str)]) -> ListQuery {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ListQuery::from_pairs(&pairs, 10)
    }

    #[test]
    fn test_visible_columns() {
        let config = config();
        assert_eq!(config.visible_indices(), vec![0, 2]);
    }

    #[test]
    fn test_column_views_mark_sorted_column() {
        let views = config().column_views(&query(&[("sort", "name"), ("dir", "desc")]));
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].sorted, Some("desc"));
        assert_eq!((views[0].aria_sort(), views[0].arrow()), ("descending", " ▼"));
        assert!(views[0].sort_href.as_deref().unwrap().contains("dir=asc"));
        assert!(views[1].sort_href.is_none());
        assert_eq!(views[1].aria_sort(), "");
    }

    #[test]
    fn test_filter_views_select_current_value() {
        let views = config().filter_views(&query(&[("status", "draft")]));
        assert_eq!(views[0].value, "draft");
        assert!(!views[0].options[0].selected);
        assert!(views[0].options[1].selected);
    }

    #[test]
    fn test_bulk_action_lookup() {
        let config = config();
        assert!(config.find_bulk_action("delete").unwrap().destructive);
        assert!(config.find_bulk_action("publish").is_none());
    }
}
