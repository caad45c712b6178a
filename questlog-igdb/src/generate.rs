use std::path::PathBuf;
use std::time::Duration;

use questlog_core::{CatalogEntry, ProcessingOutcome, ResolvedRecord};
use questlog_render::Renderer;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;

use crate::error::{GenerateAborted, IgdbError};
use crate::matcher;
use crate::pacing::{Pacer, PacingOptions, sample_delay};
use crate::report::{EntryReport, GenerateReport};
use crate::resolve::MetadataSource;

/// How many search results are considered per entry.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

pub const REASON_NO_DATA: &str = "No IGDB data found";
pub const REASON_NO_MATCH: &str = "No matching game found";

/// Options for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Pause bounds between consecutive entries
    pub pacing: PacingOptions,
    /// Maximum search results requested per entry
    pub search_limit: usize,
    /// Process only the first N catalog entries
    pub limit: Option<usize>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            pacing: PacingOptions::default(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            limit: None,
        }
    }
}

/// Progress events emitted during generation, consumed by the CLI.
#[derive(Debug, Clone)]
pub enum GenerateEvent {
    /// Run started with this many entries.
    Started { total: usize },
    /// Searching the service for an entry.
    Searching { index: usize, name: String },
    /// A candidate was chosen and its relations are being fetched.
    Resolving {
        index: usize,
        name: String,
        game_name: String,
        score: f64,
    },
    /// Document written.
    Rendered {
        index: usize,
        name: String,
        path: PathBuf,
    },
    /// No usable data for the entry (non-fatal).
    Unmatched {
        index: usize,
        name: String,
        reason: String,
    },
    /// Processing the entry failed (non-fatal).
    Failed {
        index: usize,
        name: String,
        reason: String,
    },
    /// Pausing before the next entry.
    Waiting { index: usize, duration: Duration },
    /// A fatal error occurred (configuration, auth). Generation stops.
    FatalError { message: String },
    /// All entries processed.
    Done,
}

/// Where the search-match-resolve stages left an entry.
enum Stage {
    Ready(ResolvedRecord),
    Unmatched(String),
}

/// Terminal state of an entry that did not error.
enum Finished {
    Written(PathBuf),
    Unmatched(String),
}

/// Drives catalog entries through search, match, resolve and render.
///
/// Entries run one at a time in input order, with a random pause between
/// consecutive entries. A failing entry is recorded and the run continues;
/// only fatal errors abort it.
pub struct Generator<M, R, P> {
    source: M,
    renderer: R,
    pacer: P,
    options: GenerateOptions,
    rng: StdRng,
}

impl<M: MetadataSource, R: Renderer, P: Pacer> Generator<M, R, P> {
    pub fn new(source: M, renderer: R, pacer: P, options: GenerateOptions) -> Self {
        Self {
            source,
            renderer,
            pacer,
            options,
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a deterministic pause sequence.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn source(&self) -> &M {
        &self.source
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Process every entry and return the per-entry outcomes.
    ///
    /// Returns `Err` only for fatal errors; everything else is contained in
    /// the report. An aborted run still hands back the outcomes so far, with
    /// the entry that hit the error recorded as failed.
    pub async fn run(
        &mut self,
        entries: &[CatalogEntry],
        events: &mpsc::UnboundedSender<GenerateEvent>,
    ) -> Result<GenerateReport, GenerateAborted> {
        let entries = match self.options.limit {
            Some(max) => &entries[..max.min(entries.len())],
            None => entries,
        };
        let total = entries.len();
        let _ = events.send(GenerateEvent::Started { total });
        log::info!("Generating documents for {} entries", total);

        let mut report = GenerateReport::new();

        for (index, entry) in entries.iter().enumerate() {
            let entry_report = match self.process_entry(index, entry, events).await {
                Ok(r) => r,
                Err(error) => {
                    log::error!("Stopping at '{}': {}", entry.name, error);
                    let message = error.to_string();
                    let _ = events.send(GenerateEvent::FatalError {
                        message: message.clone(),
                    });
                    report.add(EntryReport {
                        entry: entry.clone(),
                        outcome: ProcessingOutcome::Failed(message),
                        document: None,
                    });
                    return Err(GenerateAborted { report, error });
                }
            };
            report.add(entry_report);

            if index + 1 < total {
                let delay = sample_delay(&mut self.rng, &self.options.pacing);
                let _ = events.send(GenerateEvent::Waiting {
                    index,
                    duration: delay,
                });
                log::debug!("Waiting {:.1}s before next entry", delay.as_secs_f64());
                self.pacer.pause(delay).await;
            }
        }

        let summary = report.summary();
        log::info!(
            "Generation finished: {} succeeded, {} unmatched, {} failed",
            summary.succeeded,
            summary.unmatched,
            summary.failed
        );
        let _ = events.send(GenerateEvent::Done);

        Ok(report)
    }

    /// Run one entry through the pipeline and classify the result.
    ///
    /// Non-fatal errors become [`ProcessingOutcome::Failed`]; fatal ones are
    /// returned.
    pub async fn process_entry(
        &self,
        index: usize,
        entry: &CatalogEntry,
        events: &mpsc::UnboundedSender<GenerateEvent>,
    ) -> Result<EntryReport, IgdbError> {
        let name = entry.name.clone();

        let result = match self.resolve_entry(index, entry, events).await {
            Ok(Stage::Ready(record)) => self
                .renderer
                .render(entry, &record)
                .map(Finished::Written)
                .map_err(IgdbError::from),
            Ok(Stage::Unmatched(reason)) => Ok(Finished::Unmatched(reason)),
            Err(e) => Err(e),
        };

        let (outcome, document) = match result {
            Ok(Finished::Written(path)) => {
                log::info!("'{}' -> {}", name, path.display());
                let _ = events.send(GenerateEvent::Rendered {
                    index,
                    name,
                    path: path.clone(),
                });
                (ProcessingOutcome::Succeeded, Some(path))
            }
            Ok(Finished::Unmatched(reason)) => {
                log::warn!("'{}' unmatched: {}", name, reason);
                let _ = events.send(GenerateEvent::Unmatched {
                    index,
                    name,
                    reason: reason.clone(),
                });
                (ProcessingOutcome::Unmatched(reason), None)
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                let reason = e.to_string();
                log::warn!("'{}' failed: {}", name, reason);
                let _ = events.send(GenerateEvent::Failed {
                    index,
                    name,
                    reason: reason.clone(),
                });
                (ProcessingOutcome::Failed(reason), None)
            }
        };

        Ok(EntryReport {
            entry: entry.clone(),
            outcome,
            document,
        })
    }

    /// Search, match and resolve without rendering.
    async fn resolve_entry(
        &self,
        index: usize,
        entry: &CatalogEntry,
        events: &mpsc::UnboundedSender<GenerateEvent>,
    ) -> Result<Stage, IgdbError> {
        let _ = events.send(GenerateEvent::Searching {
            index,
            name: entry.name.clone(),
        });

        let candidates = self
            .source
            .search_by_name(&entry.name, self.options.search_limit)
            .await?;
        if candidates.is_empty() {
            return Ok(Stage::Unmatched(REASON_NO_DATA.to_string()));
        }

        let Some(matched) = matcher::best_match(&entry.name, &candidates) else {
            return Ok(Stage::Unmatched(REASON_NO_MATCH.to_string()));
        };
        log::debug!(
            "'{}' matched '{}' (id {}, score {:.2})",
            entry.name,
            matched.candidate.name,
            matched.candidate.id,
            matched.score
        );

        let _ = events.send(GenerateEvent::Resolving {
            index,
            name: entry.name.clone(),
            game_name: matched.candidate.name.clone(),
            score: matched.score,
        });

        let game_id = matched.candidate.id;
        match self.source.resolve_entity_graph(game_id).await? {
            Some(record) => Ok(Stage::Ready(record)),
            None => Ok(Stage::Unmatched(format!("IGDB game {} not found", game_id))),
        }
    }
}

#[cfg(test)]
#[path = "tests/generate_tests.rs"]
mod tests;
