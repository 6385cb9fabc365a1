//! Fixture file commands.
//!
//! # Usage
//!
//! ```bash
//! pressroom-cli fixtures export -o fixtures.yaml
//! pressroom-cli fixtures check fixtures.yaml
//! ```

use std::io::Write;
use std::path::Path;

use pressroom_admin::store::{Fixtures, StoreError};
use thiserror::Error;

/// Errors that can occur during fixture operations.
#[derive(Debug, Error)]
pub enum FixturesError {
    /// Dataset could not be read, parsed or serialized.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Output could not be written.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// File parsed but breaks data invariants.
    #[error("{0} problem(s) found in {1}")]
    Invalid(usize, String),
}

/// Write the built-in dataset as YAML to `output`, or stdout.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub async fn export(output: Option<&Path>) -> Result<(), FixturesError> {
    let yaml = Fixtures::builtin()?.to_yaml()?;

    match output {
        Some(path) => {
            tokio::fs::write(path, &yaml).await?;
            tracing::info!(path = %path.display(), bytes = yaml.len(), "Fixtures exported");
        }
        None => std::io::stdout().lock().write_all(yaml.as_bytes())?,
    }
    Ok(())
}

/// Load a fixture file and report every invariant it breaks.
///
/// # Errors
///
/// Returns an error if the file can't be parsed or has any problem.
pub async fn check(path: &Path) -> Result<(), FixturesError> {
    let fixtures = Fixtures::from_path(path).await?;
    let problems = fixtures.validate();

    if problems.is_empty() {
        tracing::info!(
            path = %path.display(),
            products = fixtures.products.len(),
            orders = fixtures.orders.len(),
            print_options = fixtures.print_options.len(),
            "Fixtures are valid"
        );
        return Ok(());
    }

    for problem in &problems {
        tracing::error!("  - {problem}");
    }
    Err(FixturesError::Invalid(
        problems.len(),
        path.display().to_string(),
    ))
}
