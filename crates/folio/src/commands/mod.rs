//! CLI command implementations.

pub(crate) mod index;
pub(crate) mod links;
pub(crate) mod serve;
pub(crate) mod show;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_site::{DocIndex, Site};
use folio_source::{FsSource, HttpSource, Source};

use crate::error::CliError;
use crate::output::Output;

pub(crate) use links::LinksArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use show::ShowArgs;

/// Flags shared by every command.
#[derive(Args, Debug, Default)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long, global = true, env = "FOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the index and documents (overrides config).
    #[arg(short, long, global = true, conflicts_with = "base_url")]
    pub source_dir: Option<PathBuf>,

    /// Base URL to fetch the index and documents from (overrides config).
    #[arg(short, long, global = true)]
    pub base_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load configuration, applying these flags and any extra settings.
    pub(crate) fn load_config(&self, mut settings: CliSettings) -> Result<Config, CliError> {
        settings.source_dir.clone_from(&self.source_dir);
        settings.base_url.clone_from(&self.base_url);
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }
}

/// Build the documentation site described by `config`.
pub(crate) fn build_site(config: &Config) -> Site {
    let source = &config.source_resolved;
    let source: Arc<dyn Source> = match &source.base_url {
        Some(base_url) => {
            tracing::debug!(base_url = %base_url, "Using HTTP source");
            Arc::new(HttpSource::with_timeout(base_url, source.timeout))
        }
        None => {
            tracing::debug!(dir = %source.dir.display(), "Using filesystem source");
            Arc::new(FsSource::new(source.dir.clone()))
        }
    };
    Site::new(source, config.site_config())
}

/// Print an index grouped by section.
pub(crate) fn print_index(output: &Output, index: &DocIndex) {
    if !index.title.is_empty() {
        output.heading(&index.title);
        output.print("");
    }

    let width = index.items().map(|item| item.slug.len()).max().unwrap_or(0);

    for section in &index.sections {
        output.heading(&section.title);
        for item in &section.items {
            output.print(&format!("  {:<width$}  {}", item.slug, item.title));
            if !item.description.is_empty() {
                output.print_dim(&format!("  {:<width$}  {}", "", item.description));
            }
        }
        output.print("");
    }
}
