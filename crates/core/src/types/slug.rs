//! URL slug generation.

/// Convert a display name into a URL slug.
///
/// Keeps ASCII letters and digits (lowercased) and collapses every other run
/// of characters into a single hyphen. Leading and trailing hyphens are
/// dropped.
///
/// ```
/// use pressroom_core::slugify;
///
/// assert_eq!(slugify("Premium  Business Cards!"), "premium-business-cards");
/// ```
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("A5 Flyers -- Glossy"), "a5-flyers-glossy");
        assert_eq!(slugify("  --Leading and trailing--  "), "leading-and-trailing");
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        assert_eq!(slugify("Café Menus"), "caf-menus");
        assert_eq!(slugify("!!!"), "");
    }
}
