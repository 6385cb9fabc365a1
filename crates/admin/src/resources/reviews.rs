//! Product reviews moderation screen.

use chrono::Utc;
use pressroom_core::{ReviewId, ReviewStatus};

use super::{Resource, filter_options, ref_choices, resolve_ref};
use crate::components::{
    BulkAction, Cell, DataTableConfig, DetailRow, FormField, TableColumn, TableFilter, Tone,
};
use crate::models::ProductReview;
use crate::models::review::RATING_RANGE;
use crate::query::{Listable, SortKey};
use crate::store::{MockStore, ReferenceData, Table};
use crate::validation::{FormData, ValidationErrors};

const RATING_OPTIONS: [(&str, &str); 5] = [
    ("5", "★★★★★"),
    ("4", "★★★★☆"),
    ("3", "★★★☆☆"),
    ("2", "★★☆☆☆"),
    ("1", "★☆☆☆☆"),
];

fn status_badge(status: ReviewStatus) -> Cell {
    let tone = match status {
        ReviewStatus::Pending => Tone::Warning,
        ReviewStatus::Approved => Tone::Success,
        ReviewStatus::Rejected => Tone::Danger,
    };
    Cell::badge(status.label(), tone)
}

impl Listable for ProductReview {
    fn list_id(&self) -> i32 {
        self.id.as_i32()
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title,
            self.author_name,
            self.author_email.as_str(),
            self.product.name
        )
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "title" => Some(SortKey::text(&self.title)),
            "product" => Some(SortKey::text(&self.product.name)),
            "author" => Some(SortKey::text(&self.author_name)),
            "rating" => Some(SortKey::int(self.rating)),
            "status" => Some(SortKey::text(self.status.as_str())),
            "created_at" => Some(SortKey::Date(self.created_at)),
            _ => None,
        }
    }

    fn matches_filter(&self, key: &str, value: &str) -> bool {
        match key {
            "status" => self.status.as_str() == value,
            "rating" => value.parse::<u8>().is_ok_and(|r| r == self.rating),
            "product" => self.product.id.to_string() == value,
            _ => true,
        }
    }
}

impl Resource for ProductReview {
    const SLUG: &'static str = "reviews";
    const SINGULAR: &'static str = "Review";
    const PLURAL: &'static str = "Reviews";
    const NEEDS_REFERENCES: bool = true;

    fn table(store: &MockStore) -> &Table<Self> {
        store.reviews()
    }

    fn table_config() -> DataTableConfig {
        DataTableConfig::new("reviews")
            .column(TableColumn::sortable("title", "Review"))
            .column(TableColumn::sortable("product", "Product"))
            .column(TableColumn::sortable("author", "Author"))
            .column(TableColumn::sortable("rating", "Rating"))
            .column(TableColumn::sortable("status", "Status"))
            .column(TableColumn::sortable("created_at", "Submitted"))
            .filter(TableFilter::select(
                "status",
                "Status",
                filter_options(ReviewStatus::ALL.iter().map(|s| (s.as_str(), s.label()))),
            ))
            .filter(TableFilter::select("rating", "Rating", filter_options(RATING_OPTIONS)))
            .bulk_action(BulkAction::new("approve", "Approve", "ph-check"))
            .bulk_action(BulkAction::new("reject", "Reject", "ph-x"))
            .bulk_action(BulkAction::delete())
            .search_placeholder("Search title, author or product...")
            .empty_state("ph-star", "No reviews found", None)
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::link(self.title.clone(), self.show_path()),
            Cell::maybe_ref(Some(&self.product), "products"),
            Cell::text(self.author_name.clone()),
            Cell::text(self.stars()),
            status_badge(self.status),
            Cell::date(self.created_at),
        ]
    }

    fn detail_rows(&self) -> Vec<DetailRow> {
        vec![
            DetailRow::new("Title", Cell::text(self.title.clone())),
            DetailRow::new("Product", Cell::maybe_ref(Some(&self.product), "products")),
            DetailRow::new("Rating", Cell::text(self.stars())),
            DetailRow::new("Status", status_badge(self.status)),
            DetailRow::new("Author", Cell::text(self.author_name.clone())),
            DetailRow::new(
                "Email",
                Cell::link(
                    self.author_email.to_string(),
                    format!("mailto:{}", self.author_email),
                ),
            ),
            DetailRow::new("Review", Cell::multiline(self.body.clone())),
            DetailRow::new("Submitted", Cell::datetime(self.created_at)),
        ]
    }

    fn blank_form() -> FormData {
        FormData::new()
            .with("rating", RATING_RANGE.end())
            .with("status", ReviewStatus::Pending.as_str())
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("product", self.product.id)
            .with("author_name", &self.author_name)
            .with("author_email", &self.author_email)
            .with("rating", self.rating)
            .with("title", &self.title)
            .with("body", &self.body)
            .with("status", self.status.as_str())
    }

    fn form_fields(values: &FormData, refs: &ReferenceData) -> Vec<FormField> {
        vec![
            FormField::select(
                "product",
                "Product",
                values,
                Some("Choose a product"),
                ref_choices(&refs.products),
            )
            .required(),
            FormField::text("title", "Title", values).required(),
            FormField::select("rating", "Rating", values, None, RATING_OPTIONS).required(),
            FormField::textarea("body", "Review", values),
            FormField::text("author_name", "Author name", values).required(),
            FormField::email("author_email", "Author email", values).required(),
            FormField::select(
                "status",
                "Status",
                values,
                None,
                ReviewStatus::ALL.iter().map(|s| (s.as_str(), s.label())),
            ),
        ]
    }

    fn from_form(
        form: &FormData,
        existing: Option<&Self>,
        refs: &ReferenceData,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let product = resolve_ref(form, "product", &refs.products, &mut errors);
        if form.get("product").is_empty() {
            errors.add("product", "is required");
        }
        let title = form.name("title", &mut errors);
        let author_name = form.name("author_name", &mut errors);
        let author_email = form.email("author_email", &mut errors);
        let rating = form.integer::<u8>("rating", &mut errors);
        if rating.is_some_and(|r| !RATING_RANGE.contains(&r)) {
            errors.add("rating", "must be between 1 and 5");
        }
        let status = form.choice::<ReviewStatus>("status", &mut errors);

        let (Some(product), Some(author_email), Some(rating), Some(status)) =
            (product, author_email, rating, status)
        else {
            return Err(errors);
        };

        errors.finish(Self {
            id: existing.map_or(ReviewId::new(0), |r| r.id),
            product,
            author_name,
            author_email,
            rating,
            title,
            body: form.optional("body"),
            status,
            created_at: existing.map_or_else(Utc::now, |r| r.created_at),
        })
    }

    fn bulk_update(action: &str) -> Option<fn(&mut Self)> {
        match action {
            "approve" => Some(|r| r.status = ReviewStatus::Approved),
            "reject" => Some(|r| r.status = ReviewStatus::Rejected),
            _ => None,
        }
    }
}
