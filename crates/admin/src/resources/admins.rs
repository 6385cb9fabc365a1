//! Admin accounts screen.

use chrono::Utc;
use pressroom_core::{AdminId, AdminRole};

use super::{Resource, filter_options};
use crate::components::{
    BulkAction, Cell, DataTableConfig, DetailRow, FilterOption, FormField, TableColumn,
    TableFilter, Tone,
};
use crate::models::Admin;
use crate::query::{Listable, SortKey};
use crate::store::{MockStore, ReferenceData, Table};
use crate::validation::{FormData, ValidationErrors};

fn role_badge(role: AdminRole) -> Cell {
    let tone = match role {
        AdminRole::SuperAdmin => Tone::Danger,
        AdminRole::Admin => Tone::Info,
        AdminRole::Viewer => Tone::Neutral,
    };
    Cell::badge(role.label(), tone)
}

impl Listable for Admin {
    fn list_id(&self) -> i32 {
        self.id.as_i32()
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.name, self.email.as_str())
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "name" => Some(SortKey::text(&self.name)),
            "email" => Some(SortKey::text(self.email.as_str())),
            "role" => Some(SortKey::text(self.role.as_str())),
            "active" => Some(SortKey::int(i64::from(self.active))),
            "last_login_at" => Some(SortKey::maybe_date(self.last_login_at)),
            _ => None,
        }
    }

    fn matches_filter(&self, key: &str, value: &str) -> bool {
        match key {
            "role" => self.role.as_str() == value,
            "active" => (value == "true") == self.active,
            _ => true,
        }
    }
}

impl Resource for Admin {
    const SLUG: &'static str = "admins";
    const SINGULAR: &'static str = "Admin";
    const PLURAL: &'static str = "Admins";

    fn table(store: &MockStore) -> &Table<Self> {
        store.admins()
    }

    fn table_config() -> DataTableConfig {
        DataTableConfig::new("admins")
            .column(TableColumn::sortable("name", "Name"))
            .column(TableColumn::sortable("email", "Email"))
            .column(TableColumn::sortable("role", "Role"))
            .column(TableColumn::sortable("active", "Active"))
            .column(TableColumn::sortable("last_login_at", "Last login"))
            .filter(TableFilter::select(
                "role",
                "Role",
                filter_options(AdminRole::ALL.iter().map(|r| (r.as_str(), r.label()))),
            ))
            .filter(TableFilter::select("active", "Active", FilterOption::yes_no()))
            .bulk_action(BulkAction::new("activate", "Activate", "ph-check-circle"))
            .bulk_action(BulkAction::new("deactivate", "Deactivate", "ph-pause-circle"))
            .bulk_action(BulkAction::delete())
            .search_placeholder("Search name or email...")
            .empty_state("ph-shield", "No admins found", None)
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::link(self.name.clone(), self.show_path()),
            Cell::text(self.email.to_string()),
            role_badge(self.role),
            Cell::yes_no(self.active),
            self.last_login_at
                .map_or_else(|| Cell::muted("Never"), Cell::datetime),
        ]
    }

    fn detail_rows(&self) -> Vec<DetailRow> {
        vec![
            DetailRow::new("Name", Cell::text(self.name.clone())),
            DetailRow::new("Email", Cell::text(self.email.to_string())),
            DetailRow::new("Role", role_badge(self.role)),
            DetailRow::new("Active", Cell::yes_no(self.active)),
            DetailRow::new(
                "Last login",
                self.last_login_at
                    .map_or_else(|| Cell::muted("Never"), Cell::datetime),
            ),
            DetailRow::new("Created", Cell::datetime(self.created_at)),
        ]
    }

    fn blank_form() -> FormData {
        FormData::new()
            .with("role", AdminRole::Viewer.as_str())
            .with("active", "on")
    }

    fn to_form(&self) -> FormData {
        let form = FormData::new()
            .with("name", &self.name)
            .with("email", &self.email)
            .with("role", self.role.as_str());
        if self.active {
            form.with("active", "on")
        } else {
            form
        }
    }

    fn form_fields(values: &FormData, _refs: &ReferenceData) -> Vec<FormField> {
        vec![
            FormField::text("name", "Name", values).required(),
            FormField::email("email", "Email", values).required(),
            FormField::select(
                "role",
                "Role",
                values,
                None,
                AdminRole::ALL.iter().map(|r| (r.as_str(), r.label())),
            )
            .required()
            .help("Viewers can browse but not change anything"),
            FormField::checkbox("active", "Active", values),
        ]
    }

    fn from_form(
        form: &FormData,
        existing: Option<&Self>,
        _refs: &ReferenceData,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = form.name("name", &mut errors);
        let email = form.email("email", &mut errors);
        let role = form.choice::<AdminRole>("role", &mut errors);

        let (Some(email), Some(role)) = (email, role) else {
            return Err(errors);
        };

        errors.finish(Self {
            id: existing.map_or(AdminId::new(0), |a| a.id),
            name,
            email,
            role,
            active: form.checkbox("active"),
            last_login_at: existing.and_then(|a| a.last_login_at),
            created_at: existing.map_or_else(Utc::now, |a| a.created_at),
        })
    }

    fn bulk_update(action: &str) -> Option<fn(&mut Self)> {
        match action {
            "activate" => Some(|a| a.active = true),
            "deactivate" => Some(|a| a.active = false),
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
    fn test_round_trip_keeps_last_login() {
        let existing = Fixtures::builtin().unwrap().admins.remove(0);
        assert!(existing.last_login_at.is_some());
        let updated =
            Admin::from_form(&existing.to_form(), Some(&existing), &ReferenceData::default())
                .unwrap();
        assert_eq!(updated, existing);
    }

    #[test]
    fn test_unknown_role_rejected() {
        let form = Admin::blank_form()
            .with("name", "Sam")
            .with("email", "sam@example.com")
            .with("role", "owner");
        let errors = Admin::from_form(&form, None, &ReferenceData::default()).unwrap_err();
        assert!(errors.has("role"));
    }

    #[test]
    fn test_inactive_filter() {
        let admins = Fixtures::builtin().unwrap().admins;
        let inactive: Vec<_> = admins
            .iter()
            .filter(|a| a.matches_filter("active", "false"))
            .map(|a| a.id.as_i32())
            .collect();
        assert_eq!(inactive, vec![3]);
    }
}
