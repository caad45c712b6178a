use chrono::{DateTime, Local};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use questlog_igdb::{AuthClient, Credential, CredentialStore, FileCredentialStore, IgdbConfig, IgdbError};

use crate::commands::runtime;
use crate::error::CliError;
use crate::spinner;

fn mask_value(s: &str) -> String {
    match s.char_indices().nth(4) {
        Some((idx, _)) => format!("{}****", &s[..idx]),
        None => "****".to_string(),
    }
}

fn format_expiry(expires_at_ms: i64) -> String {
    DateTime::from_timestamp_millis(expires_at_ms)
        .map(|d| {
            d.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S %Z")
                .to_string()
        })
        .unwrap_or_else(|| format!("{} (epoch ms)", expires_at_ms))
}

/// Run the `token` command: show the cached token, exchanging credentials
/// when it is missing or expired (or always with `--refresh`).
pub(crate) fn run_token(refresh: bool, quiet: bool) -> Result<(), CliError> {
    let config = IgdbConfig::load();
    let token_path = config.token_path.clone();
    let auth = AuthClient::new(config, FileCredentialStore::new(&token_path))?;

    let rt = runtime()?;
    let credential = rt.block_on(async {
        let pb = spinner::new_spinner(quiet, "Contacting identity provider...");
        let result = obtain(&auth, refresh).await;
        pb.finish_and_clear();
        result
    })?;

    log::info!("{}", "IGDB Access Token".if_supports_color(Stderr, |t| t.bold()));
    log::info!("");
    log::info!(
        "  Token file: {}",
        token_path.display().if_supports_color(Stderr, |t| t.cyan()),
    );
    log::info!("  Token:      {}", mask_value(&credential.access_token));
    log::info!("  Type:       {}", credential.token_type);
    log::info!("  Expires:    {}", format_expiry(credential.expires_at));

    Ok(())
}

async fn obtain(
    auth: &AuthClient<FileCredentialStore>,
    refresh: bool,
) -> Result<Credential, IgdbError> {
    if refresh {
        return auth.refresh_token().await;
    }
    let token = auth.get_valid_token().await?;
    // get_valid_token either served the stored credential or saved a new one
    match auth.store().load() {
        Some(credential) if credential.access_token == token => Ok(credential),
        _ => Err(IgdbError::CredentialStore(format!(
            "Token was not persisted to {}",
            auth.store().path().display()
        ))),
    }
}

#[cfg(test)]
#[path = "../tests/token_tests.rs"]
mod tests;
