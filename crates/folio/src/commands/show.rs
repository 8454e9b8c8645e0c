//! `folio show` command implementation.
//!
//! Drives a [`ViewRouter`] through a single navigation and prints the view
//! it settles on.

use std::sync::Arc;

use clap::Args;
use folio_browser::{LocationScheme, NavigationState, View, ViewRouter};
use folio_config::CliSettings;
use folio_site::{DocItem, Site};

use super::{CommonArgs, build_site, print_index};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Location to open (e.g. "#docs/install" or "/app/docs/install").
    location: String,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the location is outside the
    /// documentation area, or the document cannot be loaded.
    pub(crate) async fn execute(self, common: &CommonArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = common.load_config(CliSettings::default())?;
        let scheme = config.location_scheme();
        let site = Arc::new(build_site(&config));

        let router = ViewRouter::new(Arc::clone(&site), scheme.clone());
        router.navigate(&self.location);
        let state = router.settled().await;
        router.shutdown();
        tracing::debug!(location = %self.location, view = ?state.view, "View settled");

        match state.view {
            View::Other => Err(CliError::OutsideDocs(self.location)),
            View::Index => {
                match &state.index {
                    Some(loaded) => print_index(&output, loaded.index()),
                    None => output.warning("Documentation index unavailable"),
                }
                Ok(())
            }
            View::Document => print_document(&output, &scheme, &site, state.navigation),
        }
    }
}

/// Print a settled document view.
fn print_document(
    output: &Output,
    scheme: &LocationScheme,
    site: &Site,
    navigation: NavigationState,
) -> Result<(), CliError> {
    let slug = navigation.slug.unwrap_or_default();

    let Some(content) = navigation.content else {
        let message = site.not_found_message();
        output.print(message.message);
        output.print(&format!(
            "{}: {}",
            message.index_link_label,
            scheme.location_for(None)
        ));
        return Err(CliError::DocumentNotFound(slug));
    };

    let title = if navigation.title.is_empty() {
        content.title.unwrap_or_default()
    } else {
        navigation.title
    };
    if !title.is_empty() {
        output.heading(&title);
    }
    if !navigation.description.is_empty() {
        output.print_dim(&navigation.description);
    }
    output.print("");
    output.print(&content.html);

    print_neighbour(output, scheme, "Previous", navigation.prev.as_ref());
    print_neighbour(output, scheme, "Next", navigation.next.as_ref());

    Ok(())
}

fn print_neighbour(output: &Output, scheme: &LocationScheme, label: &str, item: Option<&DocItem>) {
    if let Some(item) = item {
        output.print_dim(&format!(
            "{label}: {} ({})",
            item.title,
            scheme.location_for(Some(&item.slug))
        ));
    }
}
