use std::io::Write;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use questlog_core::{CatalogEntry, ProcessingOutcome, ResolvedRecord, normalize_key};
use questlog_igdb::{EntryReport, GenerateOptions, Generator, PacingOptions, TokioPacer};
use questlog_render::{MarkdownWriter, RenderError, Renderer, render_markdown};

use crate::commands::{Client, connect_igdb, load_catalog, runtime};
use crate::error::CliError;
use crate::spinner;

/// Prints the document to stdout instead of writing a file.
struct StdoutPreview;

impl Renderer for StdoutPreview {
    fn render(
        &self,
        entry: &CatalogEntry,
        record: &ResolvedRecord,
    ) -> Result<PathBuf, RenderError> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(render_markdown(entry, record).as_bytes())?;
        stdout.flush()?;
        Ok(PathBuf::from("<stdout>"))
    }
}

/// Run the `generate:single` command.
pub(crate) fn run_single(
    catalog: &Path,
    name: &str,
    save: bool,
    output: &Path,
    quiet: bool,
) -> Result<(), CliError> {
    let entry = find_entry(catalog, name)?;

    let rt = runtime()?;
    let report = rt.block_on(async {
        let client = connect_igdb(quiet).await?;
        if save {
            generate_one(client, MarkdownWriter::new(output), &entry, quiet).await
        } else {
            generate_one(client, StdoutPreview, &entry, quiet).await
        }
    })?;

    match report.outcome {
        ProcessingOutcome::Succeeded => {
            if let Some(path) = report.document.filter(|_| save) {
                log::info!(
                    "{} {} -> {}",
                    "\u{2714}".if_supports_color(Stderr, |t| t.green()),
                    entry.name,
                    path.display(),
                );
            }
        }
        ProcessingOutcome::Unmatched(reason) => {
            log::warn!(
                "{} {}: {}",
                "?".if_supports_color(Stderr, |t| t.yellow()),
                entry.name,
                reason,
            );
        }
        ProcessingOutcome::Failed(reason) => {
            log::warn!(
                "{} {}: {}",
                "\u{2718}".if_supports_color(Stderr, |t| t.red()),
                entry.name,
                reason,
            );
        }
    }

    Ok(())
}

/// The catalog row whose key matches `name`, or a stand-in entry.
///
/// A missing catalog file is not an error here; an unreadable one is.
fn find_entry(catalog: &Path, name: &str) -> Result<CatalogEntry, CliError> {
    if catalog.exists() {
        let key = normalize_key(name);
        if let Some(entry) = load_catalog(catalog)?.into_iter().find(|e| e.key() == key) {
            return Ok(entry);
        }
        log::debug!("'{}' not in {}, using defaults", name, catalog.display());
    }
    Ok(fallback_entry(name))
}

fn fallback_entry(name: &str) -> CatalogEntry {
    CatalogEntry::new(name.trim(), "Unknown", "unknown")
}

async fn generate_one<R: Renderer>(
    client: Client,
    renderer: R,
    entry: &CatalogEntry,
    quiet: bool,
) -> Result<EntryReport, CliError> {
    let options = GenerateOptions {
        pacing: PacingOptions::none(),
        ..Default::default()
    };
    let generator = Generator::new(client, renderer, TokioPacer, options);

    let pb = spinner::new_spinner(quiet, format!("Looking up {}...", entry.name));
    // Progress is shown by the spinner alone.
    let (event_tx, _event_rx) = tokio::sync::mpsc::unbounded_channel();
    let result = generator.process_entry(0, entry, &event_tx).await;
    pb.finish_and_clear();

    Ok(result?)
}

#[cfg(test)]
#[path = "../tests/single_tests.rs"]
mod tests;
