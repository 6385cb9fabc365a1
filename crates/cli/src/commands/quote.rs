//! Print quote command.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use pressroom_admin::models::{PrintOptionError, Quote, QuoteError};
use pressroom_admin::store::{Fixtures, StoreError};
use thiserror::Error;

/// Errors that can occur while quoting.
#[derive(Debug, Error)]
pub enum QuoteCommandError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("No print option group with id {0}")]
    UnknownGroup(i32),

    #[error("Print option group {id} is invalid: {source}")]
    InvalidGroup { id: i32, source: PrintOptionError },

    #[error("Invalid selection '{0}', expected ATTR=VALUE")]
    InvalidSelection(String),

    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse `attribute=value` pairs. Later pairs win.
fn parse_selections(raw: &[String]) -> Result<BTreeMap<String, String>, QuoteCommandError> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .filter(|(k, v)| !k.is_empty() && !v.is_empty())
                .ok_or_else(|| QuoteCommandError::InvalidSelection(pair.clone()))
        })
        .collect()
}

fn render(name: &str, quote: &Quote) -> String {
    let width = quote
        .lines
        .iter()
        .map(|line| line.attribute.len() + line.value.len() + 2)
        .max()
        .unwrap_or(0)
        .max("Total".len());

    let mut out = format!("{name} × {}\n", quote.quantity);
    for line in &quote.lines {
        let label = format!("{}: {}", line.attribute, line.value);
        out.push_str(&format!("  {label:<width$}  {}\n", line.price));
    }
    out.push_str(&format!("  {:<width$}  {}\n", "Total", quote.total));
    out
}

/// Price a group from the built-in dataset or `fixtures`.
///
/// # Errors
///
/// Returns an error if the group is unknown or invalid, or the selection
/// can't be priced.
pub async fn run(
    group_id: i32,
    quantity: u32,
    selections: &[String],
    fixtures: Option<&Path>,
) -> Result<(), QuoteCommandError> {
    let selections = parse_selections(selections)?;
    let fixtures = match fixtures {
        Some(path) => Fixtures::from_path(path).await?,
        None => Fixtures::builtin()?,
    };

    let group = fixtures
        .print_options
        .iter()
        .find(|g| g.id.as_i32() == group_id)
        .ok_or(QuoteCommandError::UnknownGroup(group_id))?;

    group
        .configuration
        .validate()
        .map_err(|source| QuoteCommandError::InvalidGroup {
            id: group_id,
            source,
        })?;

    let quote = group.configuration.quote(quantity, &selections)?;
    tracing::debug!(group = group_id, total = %quote.total, "Quote computed");

    std::io::stdout()
        .lock()
        .write_all(render(&group.name, &quote).as_bytes())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selections() {
        let parsed = parse_selections(&[
            "Paper Size = A5".to_string(),
            "Finishing=Gloss".to_string(),
        ])
        .unwrap();
        assert_eq!(parsed.get("Paper Size").map(String::as_str), Some("A5"));
        assert_eq!(parsed.len(), 2);

        assert!(matches!(
            parse_selections(&["Finishing".to_string()]),
            Err(QuoteCommandError::InvalidSelection(_))
        ));
        assert!(parse_selections(&["=A5".to_string()]).is_err());
    }

    const SHORT_PRICES: &str = r#"
print_options:
  - id: 1
    name: Postcards
    created_at: "2026-01-05T09:00:00Z"
    quantity_tiers: [100, 250]
    attributes:
      - name: Size
        kind: paper_size
        values:
          - label: A5
            prices: ["5.00"]
"#;

    async fn write_fixture(name: &str, yaml: &str) -> std::path::PathBuf {
        let file = format!("pressroom-cli-{}-{name}.yaml", std::process::id());
        let path = std::env::temp_dir().join(file);
        tokio::fs::write(&path, yaml).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_group() {
        let path = write_fixture("short-prices", SHORT_PRICES).await;
        let result = run(1, 250, &["Size=A5".to_string()], Some(&path)).await;
        tokio::fs::remove_file(&path).await.ok();

        match result {
            Err(QuoteCommandError::InvalidGroup { id, source }) => {
                assert_eq!(id, 1);
                assert!(matches!(
                    source,
                    PrintOptionError::PriceCountMismatch { expected: 2, found: 1, .. }
                ));
            }
            other => panic!("expected an invalid group error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_run_reports_unknown_group() {
        let path = write_fixture("unknown-group", SHORT_PRICES).await;
        let result = run(9, 100, &[], Some(&path)).await;
        tokio::fs::remove_file(&path).await.ok();
        assert!(matches!(result, Err(QuoteCommandError::UnknownGroup(9))));
    }

    #[tokio::test]
    async fn test_run_quotes_builtin_group() {
        let selections = [
            "Paper Size=A5".to_string(),
            "Paper Type=Silk 170gsm".to_string(),
            "Finishing=None".to_string(),
        ];
        assert!(run(2, 250, &selections, None).await.is_ok());
    }

    #[test]
    fn test_render_aligns_lines() {
        let fixtures = Fixtures::builtin().unwrap();
        let group = &fixtures.print_options[1];
        let mut selections = BTreeMap::new();
        for attribute in &group.configuration.attributes {
            selections.insert(attribute.name.clone(), attribute.values[0].label.clone());
        }
        let tier = group.configuration.quantity_tiers[0];
        let quote = group.configuration.quote(tier, &selections).unwrap();

        let text = render(&group.name, &quote);
        assert!(text.starts_with(&format!("{} × {tier}", group.name)));
        assert!(text.trim_end().ends_with(&quote.total.to_string()));
        assert_eq!(text.lines().count(), quote.lines.len() + 2);
    }
}
