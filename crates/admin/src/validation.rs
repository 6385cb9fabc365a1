//! Form parsing and field validation.
//!
//! Handlers receive forms as raw url-encoded pairs ([`FormData`]) so that
//! multi-selects can repeat a key and a failed submission can be rendered
//! back exactly as typed. Each typed accessor records a message in
//! [`ValidationErrors`] instead of failing fast, so one submit reports every
//! bad field at once.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use pressroom_core::{Email, Money, slugify};
use rust_decimal::Decimal;
use serde::Serialize;

/// Longest accepted name.
pub const MAX_NAME_LEN: usize = 120;

/// Format used by `<input type="datetime-local">`.
const DATETIME_LOCAL: &str = "%Y-%m-%dT%H:%M";

/// Field name to first error message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field. Later messages for the same field are
    /// dropped so the first problem is the one shown.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(value)` if nothing was recorded, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns the collected errors when there is at least one.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        f.write_str(&messages.join("; "))
    }
}

/// A submitted form as ordered key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

impl FormData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter replacing any earlier values of `key`.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.retain(|(k, _)| k != key);
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Add one value per item under the same key (multi-selects).
    #[must_use]
    pub fn with_all<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        self.pairs
            .extend(values.into_iter().map(|v| (key.to_string(), v.to_string())));
        self
    }

    /// First value for a key, trimmed; `""` when absent.
    #[must_use]
    pub fn get(&self, key: &str) -> &str {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map_or("", |(_, v)| v.trim())
    }

    /// Every value submitted for a key.
    #[must_use]
    pub fn all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
            .collect()
    }

    /// Whether `value` is among the values of `key` (select/checkbox state).
    #[must_use]
    pub fn contains(&self, key: &str, value: &str) -> bool {
        self.all(key).contains(&value)
    }

    /// Required single-line text, at most `max_len` characters.
    pub fn required(&self, key: &str, max_len: usize, errors: &mut ValidationErrors) -> String {
        let value = self.get(key);
        if value.is_empty() {
            errors.add(key, "is required");
        } else if value.chars().count() > max_len {
            errors.add(key, format!("must be at most {max_len} characters"));
        }
        value.to_string()
    }

    /// Required name (at most [`MAX_NAME_LEN`] characters).
    pub fn name(&self, key: &str, errors: &mut ValidationErrors) -> String {
        self.required(key, MAX_NAME_LEN, errors)
    }

    /// Optional free text; line breaks are kept.
    #[must_use]
    pub fn optional(&self, key: &str) -> String {
        self.get(key).to_string()
    }

    /// Slug from the field, or derived from `name` when left blank.
    pub fn slug(&self, key: &str, name: &str, errors: &mut ValidationErrors) -> String {
        let raw = self.get(key);
        let slug = slugify(if raw.is_empty() { name } else { raw });
        if slug.is_empty() && !name.is_empty() {
            errors.add(key, "must contain letters or digits");
        }
        slug
    }

    /// Required integer of any `FromStr` integer type.
    pub fn integer<T>(&self, key: &str, errors: &mut ValidationErrors) -> Option<T>
    where
        T: FromStr,
    {
        let raw = self.get(key);
        if raw.is_empty() {
            errors.add(key, "is required");
            return None;
        }
        raw.parse::<T>().map_or_else(
            |_| {
                errors.add(key, "must be a whole number");
                None
            },
            Some,
        )
    }

    /// Required decimal number.
    pub fn decimal(&self, key: &str, errors: &mut ValidationErrors) -> Option<Decimal> {
        let raw = self.get(key);
        if raw.is_empty() {
            errors.add(key, "is required");
            return None;
        }
        raw.parse::<Decimal>().map_or_else(
            |_| {
                errors.add(key, "must be a number");
                None
            },
            Some,
        )
    }

    /// Required, non-negative money amount.
    pub fn money(&self, key: &str, errors: &mut ValidationErrors) -> Option<Money> {
        if self.get(key).is_empty() {
            errors.add(key, "is required");
            return None;
        }
        self.optional_money(key, errors)
    }

    /// Money amount that may be left blank.
    pub fn optional_money(&self, key: &str, errors: &mut ValidationErrors) -> Option<Money> {
        let raw = self.get(key);
        if raw.is_empty() {
            return None;
        }
        Money::parse(raw).map_or_else(
            |e| {
                errors.add(key, e.to_string());
                None
            },
            Some,
        )
    }

    /// Checkbox state. Browsers omit unchecked boxes entirely.
    #[must_use]
    pub fn checkbox(&self, key: &str) -> bool {
        matches!(self.get(key), "on" | "true" | "1" | "yes")
    }

    /// Required `datetime-local` value, read as UTC.
    pub fn datetime(&self, key: &str, errors: &mut ValidationErrors) -> Option<DateTime<Utc>> {
        let raw = self.get(key);
        if raw.is_empty() {
            errors.add(key, "is required");
            return None;
        }
        parse_datetime_local(raw).or_else(|| {
            errors.add(key, "must be a date and time");
            None
        })
    }

    /// Required, normalized email address.
    pub fn email(&self, key: &str, errors: &mut ValidationErrors) -> Option<Email> {
        Email::parse(self.get(key)).map_or_else(
            |e| {
                errors.add(key, e.to_string());
                None
            },
            Some,
        )
    }

    /// Ids from a multi-select or a comma-separated list. Blank entries are
    /// skipped; anything non-numeric is an error.
    pub fn ids(&self, key: &str, errors: &mut ValidationErrors) -> Vec<i32> {
        let mut ids = Vec::new();
        for part in self
            .all(key)
            .into_iter()
            .flat_map(|v| v.split(','))
            .map(str::trim)
            .filter(|p| !p.is_empty())
        {
            match part.parse::<i32>() {
                Ok(id) if id > 0 => {
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
                _ => errors.add(key, format!("'{part}' is not a valid id")),
            }
        }
        ids
    }

    /// Optional single id (a select with a blank "None" option).
    pub fn optional_id(&self, key: &str, errors: &mut ValidationErrors) -> Option<i32> {
        let raw = self.get(key);
        if raw.is_empty() {
            return None;
        }
        match raw.parse::<i32>() {
            Ok(id) if id > 0 => Some(id),
            _ => {
                errors.add(key, format!("'{raw}' is not a valid id"));
                None
            }
        }
    }

    /// Required choice parsed with the type's `FromStr` (status enums).
    pub fn choice<T>(&self, key: &str, errors: &mut ValidationErrors) -> Option<T>
    where
        T: FromStr,
    {
        let raw = self.get(key);
        if raw.is_empty() {
            errors.add(key, "is required");
            return None;
        }
        raw.parse::<T>().map_or_else(
            |_| {
                errors.add(key, format!("'{raw}' is not a valid choice"));
                None
            },
            Some,
        )
    }
}

/// Parse a `datetime-local` value (with or without seconds) as UTC.
#[must_use]
pub fn parse_datetime_local(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, DATETIME_LOCAL)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format a timestamp for a `datetime-local` input.
#[must_use]
pub fn format_datetime_local(value: DateTime<Utc>) -> String {
    value.format(DATETIME_LOCAL).to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        FormData::from(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_first_error_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "is required");
        errors.add("name", "is too long");
        assert_eq!(errors.get("name"), Some("is required"));
        assert_eq!(errors.len(), 1);
        assert!(errors.finish(()).is_err());
    }

    #[test]
    fn test_required_and_length() {
        let data = form(&[("name", "  "), ("title", &"x".repeat(121))]);
        let mut errors = ValidationErrors::new();
        data.name("name", &mut errors);
        data.name("title", &mut errors);
        assert_eq!(errors.get("name"), Some("is required"));
        assert_eq!(errors.get("title"), Some("must be at most 120 characters"));
    }

    #[test]
    fn test_slug_falls_back_to_name() {
        let mut errors = ValidationErrors::new();
        let data = form(&[("slug", "")]);
        assert_eq!(data.slug("slug", "Flyers & Leaflets", &mut errors), "flyers-leaflets");

        let data = form(&[("slug", "Custom Slug")]);
        assert_eq!(data.slug("slug", "ignored", &mut errors), "custom-slug");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_numbers_and_money() {
        let data = form(&[("stock", "12"), ("bad", "1.5"), ("price", "$9.5"), ("neg", "-1")]);
        let mut errors = ValidationErrors::new();
        assert_eq!(data.integer::<i32>("stock", &mut errors), Some(12));
        assert_eq!(data.integer::<i32>("bad", &mut errors), None);
        assert_eq!(data.money("price", &mut errors), Some(Money::from_cents(950)));
        assert_eq!(data.money("neg", &mut errors), None);
        assert_eq!(data.optional_money("missing", &mut errors), None);
        assert_eq!(errors.get("bad"), Some("must be a whole number"));
        assert_eq!(errors.get("neg"), Some("amount cannot be negative"));
        assert!(!errors.has("missing"));
    }

    #[test]
    fn test_ids_accept_repeats_and_commas() {
        let data = form(&[("tags", "3"), ("tags", "1, 2,,3"), ("bad", "x")]);
        let mut errors = ValidationErrors::new();
        assert_eq!(data.ids("tags", &mut errors), vec![3, 1, 2]);
        assert!(errors.is_empty());
        assert!(data.ids("bad", &mut errors).is_empty());
        assert!(errors.has("bad"));
    }

    #[test]
    fn test_datetime_local_round_trip() {
        let parsed = parse_datetime_local("2026-03-01T09:30").unwrap();
        assert_eq!(format_datetime_local(parsed), "2026-03-01T09:30");
        assert!(parse_datetime_local("2026-03-01").is_none());
    }

    #[test]
    fn test_checkbox_and_choice() {
        let data = form(&[("featured", "on"), ("status", "archived"), ("role", "owner")]);
        let mut errors = ValidationErrors::new();
        assert!(data.checkbox("featured"));
        assert!(!data.checkbox("enabled"));
        assert_eq!(
            data.choice::<pressroom_core::PublishStatus>("status", &mut errors),
            Some(pressroom_core::PublishStatus::Archived)
        );
        assert_eq!(data.choice::<pressroom_core::AdminRole>("role", &mut errors), None);
        assert_eq!(errors.get("role"), Some("'owner' is not a valid choice"));
    }

    #[test]
    fn test_email_is_normalized() {
        let data = form(&[("email", " Ada@Example.COM ")]);
        let mut errors = ValidationErrors::new();
        assert_eq!(data.email("email", &mut errors).unwrap().as_str(), "ada@example.com");
    }
}
