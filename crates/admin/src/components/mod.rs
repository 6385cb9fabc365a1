//! Reusable view pieces shared by every admin screen.

pub mod breadcrumbs;
pub mod data_table;
pub mod flash;
pub mod form;
pub mod nav;
pub mod view;

use tower_sessions::Session;

pub use breadcrumbs::{Crumb, breadcrumbs};
pub use data_table::{
    BulkAction, ColumnView, DataTableConfig, FilterOption, FilterView, OptionView, TableColumn,
    TableFilter,
};
pub use flash::{Flash, FlashKind};
pub use form::{FieldKind, FormField, attach_errors};
pub use nav::{NavLink, SECTIONS, nav_links, section_label};
pub use view::{Cell, DetailRow, DetailSection, Tone};

/// Page chrome rendered by `base.html`.
#[derive(Debug, Clone)]
pub struct Layout {
    pub title: String,
    pub nav: Vec<NavLink>,
    pub breadcrumbs: Vec<Crumb>,
    pub flashes: Vec<Flash>,
}

impl Layout {
    #[must_use]
    pub fn new(path: &str, title: impl Into<String>, record_label: Option<&str>) -> Self {
        Self {
            title: title.into(),
            nav: nav_links(path),
            breadcrumbs: breadcrumbs(path, record_label),
            flashes: Vec::new(),
        }
    }

    /// Layout with the session's pending flashes consumed.
    pub async fn with_flashes(
        session: &Session,
        path: &str,
        title: impl Into<String>,
        record_label: Option<&str>,
    ) -> Self {
        Self {
            flashes: flash::take(session).await,
            ..Self::new(path, title, record_label)
        }
    }
}
