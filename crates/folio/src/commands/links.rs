//! `folio links` command implementation.
//!
//! Lists the links of one document and whether a click on each would stay
//! inside the browser.

use clap::Args;
use folio_browser::{ClickOutcome, LinkInterceptor};
use folio_config::CliSettings;
use tokio::sync::mpsc;

use super::{CommonArgs, build_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the links command.
#[derive(Args)]
pub(crate) struct LinksArgs {
    /// Slug of the document to inspect.
    slug: String,
}

impl LinksArgs {
    /// Execute the links command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the index cannot be loaded,
    /// or the document cannot be rendered.
    pub(crate) async fn execute(self, common: &CommonArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = common.load_config(CliSettings::default())?;
        let scheme = config.location_scheme();
        let site = build_site(&config);

        let index = site.index().await?;
        let content = site
            .render(&self.slug)
            .await
            .map_err(|_| CliError::DocumentNotFound(self.slug.clone()))?;

        // Intents are never consumed; only the classification is reported.
        let (intents, _rx) = mpsc::unbounded_channel();
        let interceptor = LinkInterceptor::new(scheme.variant(), index, intents)
            .with_extension(&config.docs.extension);

        if content.links.is_empty() {
            output.info(&format!("{} has no links", self.slug));
            return Ok(());
        }

        for href in &content.links {
            match interceptor.classify(Some(href)) {
                ClickOutcome::Navigate(slug) => {
                    output.print(&format!("{href} -> {}", scheme.location_for(Some(&slug))));
                }
                ClickOutcome::Default => output.print_dim(&format!("{href} (default)")),
            }
        }

        Ok(())
    }
}
