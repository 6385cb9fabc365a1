//! Breadcrumbs derived from the request path.

use super::nav::section_label;

/// One breadcrumb. The last crumb has no link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub href: Option<String>,
}

/// Build breadcrumbs for a path such as `/products/4/edit`.
///
/// `/` is "Dashboard". Known section slugs use their plural label, numeric
/// segments become `record_label` (or `#<id>` without one), `new` and `edit`
/// are capitalized, and anything else is title-cased from kebab-case. Every
/// crumb but the last links to its cumulative path.
#[must_use]
pub fn breadcrumbs(path: &str, record_label: Option<&str>) -> Vec<Crumb> {
    let segments: Vec<&str> = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    let mut crumbs = vec![Crumb {
        label: "Dashboard".to_string(),
        href: Some("/".to_string()),
    }];

    let mut cumulative = String::new();
    for segment in &segments {
        cumulative.push('/');
        cumulative.push_str(segment);
        crumbs.push(Crumb {
            label: segment_label(segment, record_label),
            href: Some(cumulative.clone()),
        });
    }

    if let Some(last) = crumbs.last_mut() {
        last.href = None;
    }
    crumbs
}

fn segment_label(segment: &str, record_label: Option<&str>) -> String {
    if let Some(label) = section_label(segment) {
        return label.to_string();
    }
    if segment.chars().all(|c| c.is_ascii_digit()) {
        return record_label.map_or_else(|| format!("#{segment}"), ToString::to_string);
    }
    match segment {
        "new" => "New".to_string(),
        "edit" => "Edit".to_string(),
        other => title_case(other),
    }
}

fn title_case(kebab: &str) -> String {
    kebab
        .split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(crumbs: &[Crumb]) -> Vec<&str> {
        crumbs.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn test_root_is_dashboard() {
        let crumbs = breadcrumbs("/", None);
        assert_eq!(labels(&crumbs), vec!["Dashboard"]);
        assert_eq!(crumbs[0].href, None);
    }

    #[test]
    fn test_record_edit_path() {
        let crumbs = breadcrumbs("/products/4/edit", Some("Recycled Flyers"));
        assert_eq!(labels(&crumbs), vec!["Dashboard", "Products", "Recycled Flyers", "Edit"]);
        assert_eq!(crumbs[1].href.as_deref(), Some("/products"));
        assert_eq!(crumbs[2].href.as_deref(), Some("/products/4"));
        assert_eq!(crumbs[3].href, None);
    }

    #[test]
    fn test_ids_without_label_and_unknown_segments() {
        let crumbs = breadcrumbs("/flash-sales/12?tab=items", None);
        assert_eq!(labels(&crumbs), vec!["Dashboard", "Flash Sales", "#12"]);

        let crumbs = breadcrumbs("/price-matrix-export/new", None);
        assert_eq!(labels(&crumbs), vec!["Dashboard", "Price Matrix Export", "New"]);
    }
}
