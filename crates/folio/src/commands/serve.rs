//! `folio serve` command implementation.

use std::sync::Arc;

use clap::Args;
use folio_config::CliSettings;
use folio_server::{ServerConfig, run_server};

use super::{CommonArgs, build_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, common: &CommonArgs) -> Result<(), CliError> {
        let output = Output::new();

        let config = common.load_config(CliSettings {
            host: self.host,
            port: self.port,
            ..CliSettings::default()
        })?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        match &config.source_resolved.base_url {
            Some(base_url) => output.info(&format!("Source URL: {base_url}")),
            None => output.info(&format!(
                "Source directory: {}",
                config.source_resolved.dir.display()
            )),
        }

        let site = Arc::new(build_site(&config));
        let server_config = ServerConfig {
            host: config.server.host.clone(),
            port: config.server.port,
        };
        run_server(site, server_config).await?;

        Ok(())
    }
}
