//! Sidebar navigation.

/// One entry in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

/// A resource section of the admin.
#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub slug: &'static str,
    pub href: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

const fn section(
    slug: &'static str,
    href: &'static str,
    label: &'static str,
    icon: &'static str,
) -> Section {
    Section {
        slug,
        href,
        label,
        icon,
    }
}

/// Resource sections in sidebar order.
pub const SECTIONS: &[Section] = &[
    section("products", "/products", "Products", "ph-package"),
    section("print-options", "/print-options", "Print Options", "ph-printer"),
    section("categories", "/categories", "Categories", "ph-folders"),
    section("collections", "/collections", "Collections", "ph-stack"),
    section("tags", "/tags", "Tags", "ph-tag"),
    section("labels", "/labels", "Labels", "ph-bookmark-simple"),
    section("flash-sales", "/flash-sales", "Flash Sales", "ph-lightning"),
    section("reviews", "/reviews", "Reviews", "ph-star"),
    section("orders", "/orders", "Orders", "ph-receipt"),
    section("users", "/users", "Users", "ph-users"),
    section("contacts", "/contacts", "Contacts", "ph-envelope"),
    section("admins", "/admins", "Admins", "ph-shield-check"),
];

/// Plural label of a known section slug.
#[must_use]
pub fn section_label(slug: &str) -> Option<&'static str> {
    SECTIONS.iter().find(|s| s.slug == slug).map(|s| s.label)
}

/// Build the sidebar for the current path.
///
/// Dashboard is active only on `/`; a section is active on its own path and
/// everything below it.
#[must_use]
pub fn nav_links(current_path: &str) -> Vec<NavLink> {
    let first_segment = current_path
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default();

    let mut links = vec![NavLink {
        href: "/",
        label: "Dashboard",
        icon: "ph-house",
        active: current_path == "/",
    }];

    links.extend(SECTIONS.iter().map(|s| NavLink {
        href: s.href,
        label: s.label,
        icon: s.icon,
        active: first_segment == s.slug,
    }));

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(path: &str) -> Vec<&'static str> {
        nav_links(path)
            .into_iter()
            .filter(|l| l.active)
            .map(|l| l.label)
            .collect()
    }

    #[test]
    fn test_active_by_prefix() {
        assert_eq!(active("/"), vec!["Dashboard"]);
        assert_eq!(active("/products/4/edit"), vec!["Products"]);
        assert_eq!(active("/print-options"), vec!["Print Options"]);
    }

    #[test]
    fn test_similar_prefixes_do_not_collide() {
        assert!(active("/products-archive").is_empty());
    }

    #[test]
    fn test_section_hrefs_match_slugs() {
        for s in SECTIONS {
            assert_eq!(s.href, format!("/{}", s.slug));
        }
        assert_eq!(section_label("flash-sales"), Some("Flash Sales"));
        assert_eq!(section_label("nope"), None);
    }
}
