//! `folio index` command implementation.

use folio_config::CliSettings;

use super::{CommonArgs, build_site, print_index};
use crate::error::CliError;
use crate::output::Output;

/// Execute the index command.
///
/// # Errors
///
/// Returns an error if configuration fails or the index cannot be loaded.
pub(crate) async fn execute(common: &CommonArgs) -> Result<(), CliError> {
    let output = Output::new();
    let config = common.load_config(CliSettings::default())?;

    let site = build_site(&config);
    let loaded = site.index().await?;
    print_index(&output, loaded.index());

    output.success(&format!(
        "{} documents in {} sections",
        loaded.known_slugs().len(),
        loaded.index().sections.len()
    ));

    Ok(())
}
