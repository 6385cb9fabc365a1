//! Search, filter, sort and pagination for list views.
//!
//! A [`ListQuery`] is built from the raw query string pairs. Known keys
//! (`q`, `sort`, `dir`, `page`, `per_page`) drive the common behavior; every
//! other key is handed to the resource as a filter.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::ALLOWED_PAGE_SIZES;

const RESERVED_KEYS: [&str; 5] = ["q", "sort", "dir", "page", "per_page"];

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub const fn reversed(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// A comparable value for one sortable column.
///
/// Variants are only ever compared against the same column, so rows of one
/// resource always produce the same variant for a given key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    /// Missing value; sorts before everything else.
    Empty,
    Int(i64),
    Decimal(Decimal),
    Date(DateTime<Utc>),
    /// Lowercased text.
    Text(String),
}

impl SortKey {
    /// Case-insensitive text key.
    #[must_use]
    pub fn text(value: &str) -> Self {
        Self::Text(value.to_lowercase())
    }

    #[must_use]
    pub fn int(value: impl Into<i64>) -> Self {
        Self::Int(value.into())
    }

    /// Key for an optional timestamp.
    #[must_use]
    pub fn maybe_date(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(Self::Empty, Self::Date)
    }
}

/// What a resource exposes to list querying.
pub trait Listable {
    /// Raw id, used for the default newest-first ordering.
    fn list_id(&self) -> i32;

    /// Text searched by `q`.
    fn search_text(&self) -> String;

    /// Value to sort by for a column, or `None` if the column isn't sortable.
    fn sort_key(&self, column: &str) -> Option<SortKey>;

    /// Whether the row passes a filter. Unknown filter keys should pass.
    fn matches_filter(&self, key: &str, value: &str) -> bool;
}

/// Parsed list query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub q: String,
    pub sort: Option<String>,
    pub dir: SortDir,
    pub page: usize,
    pub per_page: usize,
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    /// Build from query string pairs, falling back to `default_per_page`
    /// for missing or unsupported page sizes.
    #[must_use]
    pub fn from_pairs(pairs: &[(String, String)], default_per_page: usize) -> Self {
        let mut query = Self {
            q: String::new(),
            sort: None,
            dir: SortDir::Asc,
            page: 1,
            per_page: default_per_page,
            filters: BTreeMap::new(),
        };

        for (key, value) in pairs {
            let value = value.trim();
            match key.as_str() {
                "q" => value.clone_into(&mut query.q),
                "sort" if !value.is_empty() => query.sort = Some(value.to_string()),
                "dir" => {
                    query.dir = if value.eq_ignore_ascii_case("desc") {
                        SortDir::Desc
                    } else {
                        SortDir::Asc
                    };
                }
                "page" => query.page = value.parse::<usize>().unwrap_or(1).max(1),
                "per_page" => {
                    if let Some(size) = value
                        .parse::<usize>()
                        .ok()
                        .filter(|size| ALLOWED_PAGE_SIZES.contains(size))
                    {
                        query.per_page = size;
                    }
                }
                key if !RESERVED_KEYS.contains(&key) && !value.is_empty() => {
                    query.filters.insert(key.to_string(), value.to_string());
                }
                _ => {}
            }
        }

        query
    }

    /// Current value of a filter, or `""`.
    #[must_use]
    pub fn filter(&self, key: &str) -> &str {
        self.filters.get(key).map_or("", String::as_str)
    }

    /// Whether any search or filter narrows the list.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        !self.q.is_empty() || !self.filters.is_empty()
    }

    /// Whether the list is currently sorted by `column`.
    #[must_use]
    pub fn is_sorted_by(&self, column: &str) -> bool {
        self.sort.as_deref() == Some(column)
    }

    /// Search, filter, sort and paginate `rows`.
    #[must_use]
    pub fn apply<T: Listable>(&self, mut rows: Vec<T>) -> Page<T> {
        let needle = self.q.to_lowercase();
        rows.retain(|row| {
            (needle.is_empty() || row.search_text().to_lowercase().contains(&needle))
                && self
                    .filters
                    .iter()
                    .all(|(key, value)| row.matches_filter(key, value))
        });

        rows.sort_by_key(|row| std::cmp::Reverse(row.list_id()));

        if let Some(column) = &self.sort {
            let keys: Option<Vec<SortKey>> = rows.iter().map(|row| row.sort_key(column)).collect();
            if let Some(keys) = keys {
                let mut keyed: Vec<(SortKey, T)> = keys.into_iter().zip(rows).collect();
                keyed.sort_by(|(a, _), (b, _)| match self.dir {
                    SortDir::Asc => a.cmp(b),
                    SortDir::Desc => b.cmp(a),
                });
                rows = keyed.into_iter().map(|(_, row)| row).collect();
            }
        }

        Page::paginate(rows, self.page, self.per_page)
    }

    /// Query string for this query with a different page.
    #[must_use]
    pub fn page_href(&self, page: usize) -> String {
        self.href(self.sort.as_deref(), self.dir, page)
    }

    /// Query string that sorts by `column`, flipping the direction when the
    /// list is already sorted by it. Resets to the first page.
    #[must_use]
    pub fn sort_href(&self, column: &str) -> String {
        let dir = if self.is_sorted_by(column) {
            self.dir.reversed()
        } else {
            SortDir::Asc
        };
        self.href(Some(column), dir, 1)
    }

    fn href(&self, sort: Option<&str>, dir: SortDir, page: usize) -> String {
        let mut params: Vec<(String, String)> = Vec::new();
        if !self.q.is_empty() {
            params.push(("q".to_string(), self.q.clone()));
        }
        for (key, value) in &self.filters {
            params.push((key.clone(), value.clone()));
        }
        if let Some(sort) = sort {
            params.push(("sort".to_string(), sort.to_string()));
            params.push(("dir".to_string(), dir.as_str().to_string()));
        }
        params.push(("page".to_string(), page.to_string()));
        params.push(("per_page".to_string(), self.per_page.to_string()));

        let encoded: Vec<String> = params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("?{}", encoded.join("&"))
    }
}

/// One page of a list.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Slice a full result set. `page` is clamped into `1..=total_pages`.
    #[must_use]
    pub fn paginate(rows: Vec<T>, page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total = rows.len();
        let total_pages = total.div_ceil(per_page).max(1);
        let page = page.clamp(1, total_pages);

        let items = rows
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .collect();

        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
        }
    }

    /// 1-based position of the first item on this page (0 when empty).
    #[must_use]
    pub fn first_item(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.per_page + 1
        }
    }

    /// 1-based position of the last item on this page.
    #[must_use]
    pub fn last_item(&self) -> usize {
        (self.page - 1) * self.per_page + self.items.len()
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Transform the items, keeping the pagination numbers.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i32,
        name: &'static str,
        color: &'static str,
    }

    impl Listable for Row {
        fn list_id(&self) -> i32 {
            self.id
        }

        fn search_text(&self) -> String {
            self.name.to_string()
        }

        fn sort_key(&self, column: &str) -> Option<SortKey> {
            match column {
                "name" => Some(SortKey::text(self.name)),
                "id" => Some(SortKey::int(self.id)),
                _ => None,
            }
        }

        fn matches_filter(&self, key: &str, value: &str) -> bool {
            match key {
                "color" => self.color == value,
                _ => true,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, name: "banana", color: "yellow" },
            Row { id: 2, name: "Apple", color: "red" },
            Row { id: 3, name: "cherry", color: "red" },
            Row { id: 4, name: "apple pie", color: "brown" },
        ]
    }

    fn query(pairs: &[(&str, &str)]) -> ListQuery {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ListQuery::from_pairs(&pairs, 10)
    }

    fn ids(page: &Page<Row>) -> Vec<i32> {
        page.items.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_defaults_and_filters() {
        let q = query(&[("status", "active"), ("empty", ""), ("per_page", "7")]);
        assert_eq!(q.page, 1);
        assert_eq!(q.per_page, 10);
        assert_eq!(q.filter("status"), "active");
        assert!(!q.filters.contains_key("empty"));
        assert!(q.is_filtered());
    }

    #[test]
    fn test_default_order_is_newest_first() {
        assert_eq!(ids(&query(&[]).apply(rows())), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let page = query(&[("q", "APPLE")]).apply(rows());
        assert_eq!(ids(&page), vec![4, 2]);
    }

    #[test]
    fn test_filter_and_sort() {
        let page = query(&[("color", "red"), ("sort", "name")]).apply(rows());
        assert_eq!(ids(&page), vec![2, 3]);

        let page = query(&[("sort", "name"), ("dir", "desc")]).apply(rows());
        assert_eq!(ids(&page), vec![3, 1, 4, 2]);
    }

    #[test]
    fn test_unknown_sort_column_keeps_default_order() {
        let page = query(&[("sort", "weight")]).apply(rows());
        assert_eq!(ids(&page), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_pagination_clamps_page() {
        let page = Page::paginate((1..=23).collect::<Vec<_>>(), 9, 10);
        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, vec![21, 22, 23]);
        assert_eq!((page.first_item(), page.last_item()), (21, 23));
        assert!(page.has_prev());
        assert!(!page.has_next());

        let empty = Page::paginate(Vec::<i32>::new(), 0, 10);
        assert_eq!((empty.page, empty.total_pages, empty.first_item()), (1, 1, 0));
    }

    #[test]
    fn test_hrefs_keep_filters() {
        let q = query(&[("q", "a b"), ("color", "red"), ("sort", "name")]);
        assert_eq!(
            q.page_href(2),
            "?q=a%20b&color=red&sort=name&dir=asc&page=2&per_page=10"
        );
        assert_eq!(
            q.sort_href("name"),
            "?q=a%20b&color=red&sort=name&dir=desc&page=1&per_page=10"
        );
        assert!(q.sort_href("id").contains("sort=id&dir=asc"));
    }
}
