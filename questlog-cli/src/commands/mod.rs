pub(crate) mod generate;
pub(crate) mod single;
pub(crate) mod token;

use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use questlog_core::CatalogEntry;
use questlog_igdb::{AuthClient, FileCredentialStore, IgdbClient, IgdbConfig, IgdbError};

use crate::error::CliError;
use crate::spinner;

pub(crate) type Client = IgdbClient<FileCredentialStore>;

/// Build an authenticated client, obtaining a token up front so credential
/// problems surface before any entry is processed.
pub(crate) async fn connect_igdb(quiet: bool) -> Result<Client, CliError> {
    let pb = spinner::new_spinner(quiet, "Connecting to IGDB...");

    let result = async {
        let config = IgdbConfig::load();
        let store = FileCredentialStore::new(config.token_path.clone());
        let client = IgdbClient::new(AuthClient::new(config, store)?)?;
        client.auth().get_valid_token().await?;
        Ok::<_, IgdbError>(client)
    }
    .await;
    pb.finish_and_clear();

    match result {
        Ok(client) => {
            log::info!(
                "{} Connected to IGDB",
                "\u{2714}".if_supports_color(Stderr, |t| t.green()),
            );
            Ok(client)
        }
        Err(e) => Err(e.into()),
    }
}

/// Point the user at the credential settings after a configuration error.
pub(crate) fn print_credential_help() {
    log::error!("");
    log::error!("Set credentials via environment variables:");
    log::error!("  IGDB_CLIENT_ID, IGDB_CLIENT_SECRET");
    if let Some(path) = questlog_igdb::config_path() {
        log::error!("");
        log::error!("Or add them to the [igdb] table of {}", path.display());
    }
}

/// Read the catalog, logging how many entries it holds.
pub(crate) fn load_catalog(path: &Path) -> Result<Vec<CatalogEntry>, CliError> {
    let entries =
        questlog_core::read_catalog(path).map_err(|e| CliError::catalog(path, e))?;
    log::info!(
        "Catalog: {} ({} entries)",
        path.display().if_supports_color(Stderr, |t| t.cyan()),
        entries.len(),
    );
    Ok(entries)
}

/// Build the tokio runtime the async commands run on.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))
}
