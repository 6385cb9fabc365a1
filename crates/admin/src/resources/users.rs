//! Storefront customers screen.

use chrono::Utc;
use pressroom_core::{AccountStatus, UserId};

use super::{Resource, filter_options};
use crate::components::{
    BulkAction, Cell, DataTableConfig, DetailRow, FormField, TableColumn, TableFilter, Tone,
};
use crate::models::User;
use crate::query::{Listable, SortKey};
use crate::store::{MockStore, ReferenceData, Table};
use crate::validation::{FormData, ValidationErrors};

fn status_badge(status: AccountStatus) -> Cell {
    let tone = match status {
        AccountStatus::Active => Tone::Success,
        AccountStatus::Blocked => Tone::Danger,
    };
    Cell::badge(status.label(), tone)
}

impl Listable for User {
    fn list_id(&self) -> i32 {
        self.id.as_i32()
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.email.as_str(), self.phone)
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "name" => Some(SortKey::text(&self.name)),
            "email" => Some(SortKey::text(self.email.as_str())),
            "orders" => Some(SortKey::int(self.orders_count)),
            "status" => Some(SortKey::text(self.status.as_str())),
            "created_at" => Some(SortKey::Date(self.created_at)),
            _ => None,
        }
    }

    fn matches_filter(&self, key: &str, value: &str) -> bool {
        match key {
            "status" => self.status.as_str() == value,
            "has_orders" => (value == "true") == (self.orders_count > 0),
            _ => true,
        }
    }
}

impl Resource for User {
    const SLUG: &'static str = "users";
    const SINGULAR: &'static str = "User";
    const PLURAL: &'static str = "Users";

    fn table(store: &MockStore) -> &Table<Self> {
        store.users()
    }

    fn table_config() -> DataTableConfig {
        DataTableConfig::new("users")
            .column(TableColumn::sortable("name", "Name"))
            .column(TableColumn::sortable("email", "Email"))
            .column(TableColumn::new("phone", "Phone").visible(false))
            .column(TableColumn::sortable("orders", "Orders"))
            .column(TableColumn::sortable("status", "Status"))
            .column(TableColumn::sortable("created_at", "Joined"))
            .filter(TableFilter::select(
                "status",
                "Status",
                filter_options(AccountStatus::ALL.iter().map(|s| (s.as_str(), s.label()))),
            ))
            .filter(TableFilter::select(
                "has_orders",
                "Has orders",
                crate::components::FilterOption::yes_no(),
            ))
            .bulk_action(BulkAction::new("activate", "Activate", "ph-user-check"))
            .bulk_action(BulkAction::new("block", "Block", "ph-prohibit").destructive())
            .bulk_action(BulkAction::delete())
            .search_placeholder("Search name, email or phone...")
            .empty_state("ph-users", "No users found", None)
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::link(self.name.clone(), self.show_path()),
            Cell::text(self.email.to_string()),
            Cell::or_dash(self.phone.clone()),
            Cell::text(self.orders_count.to_string()),
            status_badge(self.status),
            Cell::date(self.created_at),
        ]
    }

    fn detail_rows(&self) -> Vec<DetailRow> {
        vec![
            DetailRow::new("Name", Cell::text(self.name.clone())),
            DetailRow::new(
                "Email",
                Cell::link(self.email.to_string(), format!("mailto:{}", self.email)),
            ),
            DetailRow::new("Phone", Cell::or_dash(self.phone.clone())),
            DetailRow::new("Status", status_badge(self.status)),
            DetailRow::new(
                "Orders",
                Cell::link(
                    self.orders_count.to_string(),
                    format!("/orders?customer={}", urlencoding::encode(self.email.as_str())),
                ),
            ),
            DetailRow::new("Joined", Cell::datetime(self.created_at)),
        ]
    }

    fn blank_form() -> FormData {
        FormData::new().with("status", AccountStatus::Active.as_str())
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("name", &self.name)
            .with("email", &self.email)
            .with("phone", &self.phone)
            .with("status", self.status.as_str())
    }

    fn form_fields(values: &FormData, _refs: &ReferenceData) -> Vec<FormField> {
        vec![
            FormField::text("name", "Name", values).required(),
            FormField::email("email", "Email", values).required(),
            FormField::text("phone", "Phone", values),
            FormField::select(
                "status",
                "Status",
                values,
                None,
                AccountStatus::ALL.iter().map(|s| (s.as_str(), s.label())),
            ),
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
        let phone = form.optional("phone");
        if phone.chars().count() > 32 {
            errors.add("phone", "must be at most 32 characters");
        }
        let status = form.choice::<AccountStatus>("status", &mut errors);

        let (Some(email), Some(status)) = (email, status) else {
            return Err(errors);
        };

        errors.finish(Self {
            id: existing.map_or(UserId::new(0), |u| u.id),
            name,
            email,
            phone,
            status,
            orders_count: existing.map_or(0, |u| u.orders_count),
            created_at: existing.map_or_else(Utc::now, |u| u.created_at),
        })
    }

    fn bulk_update(action: &str) -> Option<fn(&mut Self)> {
        match action {
            "activate" => Some(|u| u.status = AccountStatus::Active),
            "block" => Some(|u| u.status = AccountStatus::Blocked),
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
    fn test_invalid_email_is_reported() {
        let form = FormData::new()
            .with("name", "Robin")
            .with("email", "robin-at-example")
            .with("status", "active");
        let errors = User::from_form(&form, None, &ReferenceData::default()).unwrap_err();
        assert!(errors.has("email"));
    }

    #[test]
    fn test_edit_keeps_order_count() {
        let existing = Fixtures::builtin().unwrap().users.remove(0);
        let form = existing.to_form().with("status", "blocked");
        let updated = User::from_form(&form, Some(&existing), &ReferenceData::default()).unwrap();
        assert_eq!(updated.orders_count, existing.orders_count);
        assert_eq!(updated.status, AccountStatus::Blocked);
    }
}
