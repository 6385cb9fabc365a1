//! Contact form inbox.
//!
//! Submissions arrive from the storefront; the admin only triages them.

use pressroom_core::ContactStatus;

use super::{Resource, filter_options};
use crate::components::{
    BulkAction, Cell, DataTableConfig, DetailRow, FormField, TableColumn, TableFilter, Tone,
};
use crate::models::ContactSubmission;
use crate::query::{Listable, SortKey};
use crate::store::{MockStore, ReferenceData, Table};
use crate::validation::{FormData, ValidationErrors};

const PREVIEW_CHARS: usize = 80;

fn status_badge(status: ContactStatus) -> Cell {
    let tone = match status {
        ContactStatus::New => Tone::Info,
        ContactStatus::Read => Tone::Neutral,
        ContactStatus::Replied => Tone::Success,
        ContactStatus::Archived => Tone::Warning,
    };
    Cell::badge(status.label(), tone)
}

impl Listable for ContactSubmission {
    fn list_id(&self) -> i32 {
        self.id.as_i32()
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name,
            self.email.as_str(),
            self.subject,
            self.message
        )
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "name" => Some(SortKey::text(&self.name)),
            "subject" => Some(SortKey::text(&self.subject)),
            "status" => Some(SortKey::text(self.status.as_str())),
            "created_at" => Some(SortKey::Date(self.created_at)),
            _ => None,
        }
    }

    fn matches_filter(&self, key: &str, value: &str) -> bool {
        match key {
            "status" => self.status.as_str() == value,
            _ => true,
        }
    }
}

impl Resource for ContactSubmission {
    const SLUG: &'static str = "contacts";
    const SINGULAR: &'static str = "Contact submission";
    const PLURAL: &'static str = "Contact submissions";
    const CREATABLE: bool = false;

    fn table(store: &MockStore) -> &Table<Self> {
        store.contacts()
    }

    fn table_config() -> DataTableConfig {
        DataTableConfig::new("contacts")
            .column(TableColumn::sortable("name", "From"))
            .column(TableColumn::sortable("subject", "Subject"))
            .column(TableColumn::new("message", "Message"))
            .column(TableColumn::sortable("status", "Status"))
            .column(TableColumn::sortable("created_at", "Received"))
            .filter(TableFilter::select(
                "status",
                "Status",
                filter_options(ContactStatus::ALL.iter().map(|s| (s.as_str(), s.label()))),
            ))
            .bulk_action(BulkAction::new("mark_read", "Mark read", "ph-envelope-open"))
            .bulk_action(BulkAction::new("mark_replied", "Mark replied", "ph-arrow-bend-up-left"))
            .bulk_action(BulkAction::new("archive", "Archive", "ph-archive"))
            .bulk_action(BulkAction::delete())
            .search_placeholder("Search sender, subject or message...")
            .empty_state("ph-envelope", "Inbox is empty", None)
    }

    fn label(&self) -> String {
        self.subject.clone()
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::link(self.name.clone(), self.show_path()),
            Cell::text(self.subject.clone()),
            Cell::or_dash(self.preview(PREVIEW_CHARS)),
            status_badge(self.status),
            Cell::datetime(self.created_at),
        ]
    }

    fn detail_rows(&self) -> Vec<DetailRow> {
        vec![
            DetailRow::new("From", Cell::text(self.name.clone())),
            DetailRow::new(
                "Email",
                Cell::link(
                    self.email.to_string(),
                    format!(
                        "mailto:{}?subject={}",
                        self.email,
                        urlencoding::encode(&format!("Re: {}", self.subject))
                    ),
                ),
            ),
            DetailRow::new("Subject", Cell::text(self.subject.clone())),
            DetailRow::new("Status", status_badge(self.status)),
            DetailRow::new("Message", Cell::multiline(self.message.clone())),
            DetailRow::new("Received", Cell::datetime(self.created_at)),
        ]
    }

    fn to_form(&self) -> FormData {
        FormData::new().with("status", self.status.as_str())
    }

    fn form_fields(values: &FormData, _refs: &ReferenceData) -> Vec<FormField> {
        vec![
            FormField::select(
                "status",
                "Status",
                values,
                None,
                ContactStatus::ALL.iter().map(|s| (s.as_str(), s.label())),
            )
            .required(),
        ]
    }

    fn from_form(
        form: &FormData,
        existing: Option<&Self>,
        _refs: &ReferenceData,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let Some(existing) = existing else {
            errors.add("status", "submissions arrive from the storefront");
            return Err(errors);
        };
        let Some(status) = form.choice::<ContactStatus>("status", &mut errors) else {
            return Err(errors);
        };

        errors.finish(Self {
            status,
            ..existing.clone()
        })
    }

    fn bulk_update(action: &str) -> Option<fn(&mut Self)> {
        match action {
            "mark_read" => Some(|c| c.status = ContactStatus::Read),
            "mark_replied" => Some(|c| c.status = ContactStatus::Replied),
            "archive" => Some(|c| c.status = ContactStatus::Archived),
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
    fn test_status_edit_keeps_message() {
        let existing = Fixtures::builtin().unwrap().contacts.remove(0);
        let form = FormData::new().with("status", "replied");
        let updated =
            ContactSubmission::from_form(&form, Some(&existing), &ReferenceData::default())
                .unwrap();
        assert_eq!(updated.status, ContactStatus::Replied);
        assert_eq!(updated.message, existing.message);
    }

    #[test]
    fn test_new_filter_matches_seed() {
        let contacts = Fixtures::builtin().unwrap().contacts;
        let new: Vec<_> = contacts
            .iter()
            .filter(|c| c.matches_filter("status", "new"))
            .map(|c| c.id.as_i32())
            .collect();
        assert_eq!(new, vec![1, 4, 6]);
    }
}
