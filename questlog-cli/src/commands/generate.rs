use std::path::Path;
use std::time::Duration;

use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use questlog_core::ProcessingOutcome;
use questlog_igdb::{
    GenerateEvent, GenerateOptions, GenerateReport, Generator, PacingOptions, TokioPacer,
};
use questlog_render::MarkdownWriter;

use crate::cli_types::GenerateArgs;
use crate::commands::{connect_igdb, load_catalog, runtime};
use crate::error::CliError;
use crate::events::run_with_events;
use crate::spinner;

/// Run the batch `generate` command.
pub(crate) fn run_generate(catalog: &Path, args: GenerateArgs, quiet: bool) -> Result<(), CliError> {
    let entries = load_catalog(catalog)?;
    let report_path = args
        .report
        .clone()
        .unwrap_or_else(|| args.output.join("follow-up.csv"));

    let options = GenerateOptions {
        pacing: PacingOptions::new(
            Duration::from_secs(args.min_delay),
            Duration::from_secs(args.max_delay),
        ),
        limit: args.limit,
        ..Default::default()
    };

    log::info!(
        "Output: {}",
        args.output.display().if_supports_color(Stderr, |t| t.dimmed()),
    );
    log::info!(
        "Report: {}",
        report_path.display().if_supports_color(Stderr, |t| t.dimmed()),
    );
    if let Some(n) = args.limit {
        log::info!(
            "{}",
            format!("Limit: {} entries", n).if_supports_color(Stderr, |t| t.dimmed()),
        );
    }
    log::info!(
        "{}",
        format!(
            "Pause between entries: {}-{}s",
            options.pacing.min.as_secs(),
            options.pacing.max.as_secs()
        )
        .if_supports_color(Stderr, |t| t.dimmed()),
    );
    log::info!("");

    let rt = runtime()?;
    let report = rt.block_on(async {
        let client = connect_igdb(quiet).await?;
        log::info!("");

        let renderer = MarkdownWriter::new(&args.output);
        let mut generator = Generator::new(client, renderer, TokioPacer, options);

        let pb = spinner::new_spinner(quiet, "Starting...");
        let mut total = 0usize;

        let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel::<GenerateEvent>();
        let task = async {
            let event_tx = event_tx;
            generator.run(&entries, &event_tx).await
        };

        let result = run_with_events(task, event_rx, |e| match e {
            GenerateEvent::Started { total: n } => total = n,
            GenerateEvent::Searching { index, ref name } => {
                pb.set_message(format!("[{}/{}] Searching {}", index + 1, total, name));
            }
            GenerateEvent::Resolving {
                index,
                ref name,
                ref game_name,
                score,
            } => {
                pb.set_message(format!(
                    "[{}/{}] Resolving {} -> \"{}\" ({:.2})",
                    index + 1,
                    total,
                    name,
                    game_name,
                    score
                ));
            }
            GenerateEvent::Rendered {
                index,
                ref name,
                ref path,
            } => pb.suspend(|| {
                log::info!(
                    "  {} [{}/{}] {} -> {}",
                    "\u{2714}".if_supports_color(Stderr, |t| t.green()),
                    index + 1,
                    total,
                    name,
                    path.display().if_supports_color(Stderr, |t| t.dimmed()),
                );
            }),
            GenerateEvent::Unmatched {
                index,
                ref name,
                ref reason,
            } => pb.suspend(|| {
                log::warn!(
                    "  {} [{}/{}] {}: {}",
                    "?".if_supports_color(Stderr, |t| t.yellow()),
                    index + 1,
                    total,
                    name,
                    reason,
                );
            }),
            GenerateEvent::Failed {
                index,
                ref name,
                ref reason,
            } => pb.suspend(|| {
                log::warn!(
                    "  {} [{}/{}] {}: {}",
                    "\u{2718}".if_supports_color(Stderr, |t| t.red()),
                    index + 1,
                    total,
                    name,
                    reason,
                );
            }),
            GenerateEvent::Waiting { index, duration } => {
                pb.set_message(format!(
                    "[{}/{}] Waiting {:.1}s before next entry",
                    index + 1,
                    total,
                    duration.as_secs_f64()
                ));
            }
            // The error itself is reported by the caller.
            GenerateEvent::FatalError { .. } | GenerateEvent::Done => pb.finish_and_clear(),
        })
        .await;

        pb.finish_and_clear();
        match result {
            Ok(report) => Ok(report),
            Err(aborted) => {
                write_partial_report(&aborted.report, &report_path);
                Err(CliError::from(aborted.error))
            }
        }
    })?;

    let rows = report.write_follow_up(&report_path)?;
    let summary = report.summary();

    log::info!("");
    if summary.failed + summary.unmatched > 0 && log::max_level() < LevelFilter::Info {
        log::warn!("Generation summary:");
    }
    log::info!(
        "  {} {} documents written",
        "\u{2714}".if_supports_color(Stderr, |t| t.green()),
        summary.succeeded,
    );
    if summary.unmatched > 0 {
        log::warn!(
            "  {} {} unmatched",
            "?".if_supports_color(Stderr, |t| t.yellow()),
            summary.unmatched,
        );
    }
    if summary.failed > 0 {
        log::warn!(
            "  {} {} failed",
            "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            summary.failed,
        );
    }

    if rows > 0 {
        log::warn!("");
        log::warn!(
            "Follow-up needed for {} entries (see {}):",
            rows,
            report_path.display(),
        );
        for entry in report.follow_up() {
            let (marker, reason) = match &entry.outcome {
                ProcessingOutcome::Unmatched(r) => ("?", r.as_str()),
                ProcessingOutcome::Failed(r) => ("\u{2718}", r.as_str()),
                ProcessingOutcome::Succeeded => continue,
            };
            log::warn!("  {} {}: {}", marker, entry.entry.name, reason);
        }
    } else {
        log::info!(
            "{}",
            format!("Follow-up report: {} (empty)", report_path.display())
                .if_supports_color(Stderr, |t| t.dimmed()),
        );
    }

    Ok(())
}

/// Keep the follow-up rows gathered before a run was aborted.
fn write_partial_report(report: &GenerateReport, path: &Path) {
    match report.write_follow_up(path) {
        Ok(rows) => log::warn!(
            "Partial follow-up report ({} entries) written to {}",
            rows,
            path.display(),
        ),
        Err(e) => log::warn!(
            "Failed to write partial follow-up report {}: {}",
            path.display(),
            e,
        ),
    }
}
