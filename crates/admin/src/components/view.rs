//! Display values for table cells and detail pages.

use pressroom_core::{EntityRef, Money};

/// Color family of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

impl Tone {
    /// CSS modifier class.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Neutral => "badge-neutral",
            Self::Info => "badge-info",
            Self::Success => "badge-success",
            Self::Warning => "badge-warning",
            Self::Danger => "badge-danger",
        }
    }
}

/// One rendered value: plain text, a link, a status badge or a color swatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub href: Option<String>,
    /// Badge CSS class when the value is a status.
    pub badge: Option<&'static str>,
    /// `#rrggbb` to draw a swatch before the text.
    pub swatch: Option<String>,
    /// De-emphasized (placeholders like "None").
    pub muted: bool,
    /// Keep line breaks (long free text).
    pub multiline: bool,
}

impl Cell {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: None,
            badge: None,
            swatch: None,
            muted: false,
            multiline: false,
        }
    }

    /// Text, or a muted dash when empty.
    #[must_use]
    pub fn or_dash(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Self::muted("—")
        } else {
            Self::text(text)
        }
    }

    #[must_use]
    pub fn muted(text: impl Into<String>) -> Self {
        Self {
            muted: true,
            ..Self::text(text)
        }
    }

    #[must_use]
    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Self::text(text)
        }
    }

    #[must_use]
    pub fn badge(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            badge: Some(tone.class()),
            ..Self::text(text)
        }
    }

    #[must_use]
    pub fn swatch(color: &str) -> Self {
        Self {
            swatch: Some(color.to_string()),
            ..Self::text(color)
        }
    }

    #[must_use]
    pub fn money(amount: Money) -> Self {
        Self::text(amount.to_string())
    }

    /// Optional amount, muted dash when absent.
    #[must_use]
    pub fn maybe_money(amount: Option<Money>) -> Self {
        amount.map_or_else(|| Self::muted("—"), Self::money)
    }

    /// Comma-joined reference names.
    #[must_use]
    pub fn refs(refs: &[EntityRef]) -> Self {
        Self::or_dash(EntityRef::join_names(refs))
    }

    /// Link to a referenced record, or a muted dash.
    #[must_use]
    pub fn maybe_ref(reference: Option<&EntityRef>, slug: &str) -> Self {
        reference.map_or_else(
            || Self::muted("—"),
            |r| Self::link(r.name.clone(), format!("/{slug}/{}", r.id)),
        )
    }

    #[must_use]
    pub fn yes_no(value: bool) -> Self {
        if value {
            Self::badge("Yes", Tone::Success)
        } else {
            Self::badge("No", Tone::Neutral)
        }
    }

    #[must_use]
    pub fn date(value: chrono::DateTime<chrono::Utc>) -> Self {
        Self::text(value.format("%b %-d, %Y").to_string())
    }

    #[must_use]
    pub fn datetime(value: chrono::DateTime<chrono::Utc>) -> Self {
        Self::text(value.format("%b %-d, %Y %H:%M").to_string())
    }

    #[must_use]
    pub fn multiline(text: impl Into<String>) -> Self {
        Self {
            multiline: true,
            ..Self::or_dash(text)
        }
    }
}

/// A label/value pair on a detail page.
#[derive(Debug, Clone)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: Cell,
}

impl DetailRow {
    #[must_use]
    pub const fn new(label: &'static str, value: Cell) -> Self {
        Self { label, value }
    }
}

/// A nested table on a detail page (order items, price matrix, ...).
#[derive(Debug, Clone, Default)]
pub struct DetailSection {
    pub title: String,
    pub note: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl DetailSection {
    #[must_use]
    pub fn new(title: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            title: title.into(),
            headers,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn row(mut self, cells: Vec<Cell>) -> Self {
        self.rows.push(cells);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_becomes_muted_dash() {
        let cell = Cell::or_dash("");
        assert!(cell.muted);
        assert_eq!(cell.text, "—");
        assert!(!Cell::or_dash("x").muted);
    }

    #[test]
    fn test_maybe_ref_links_to_record() {
        let reference = EntityRef::new(3, "Flyer Options");
        let cell = Cell::maybe_ref(Some(&reference), "print-options");
        assert_eq!(cell.href.as_deref(), Some("/print-options/3"));
        assert!(Cell::maybe_ref(None, "print-options").muted);
    }

    #[test]
    fn test_badge_and_money() {
        assert_eq!(Cell::badge("Paid", Tone::Success).badge, Some("badge-success"));
        assert_eq!(Cell::money(Money::from_cents(1_999)).text, "$19.99");
    }
}
