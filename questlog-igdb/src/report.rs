use std::path::{Path, PathBuf};

use questlog_core::{CatalogEntry, OutcomeKind, ProcessingOutcome};

use crate::error::IgdbError;

/// Outcome of one catalog entry.
#[derive(Debug, Clone)]
pub struct EntryReport {
    pub entry: CatalogEntry,
    pub outcome: ProcessingOutcome,
    /// Document written for a successful entry
    pub document: Option<PathBuf>,
}

/// Collects per-entry outcomes in input order.
#[derive(Debug, Default)]
pub struct GenerateReport {
    entries: Vec<EntryReport>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub succeeded: usize,
    pub unmatched: usize,
    pub failed: usize,
}

impl ReportSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.unmatched + self.failed
    }
}

impl GenerateReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: EntryReport) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[EntryReport] {
        &self.entries
    }

    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary::default();
        for entry in &self.entries {
            match entry.outcome.kind() {
                OutcomeKind::Succeeded => summary.succeeded += 1,
                OutcomeKind::Unmatched => summary.unmatched += 1,
                OutcomeKind::Failed => summary.failed += 1,
            }
        }
        summary
    }

    /// Entries that need manual follow-up (everything not succeeded).
    pub fn follow_up(&self) -> impl Iterator<Item = &EntryReport> {
        self.entries.iter().filter(|e| !e.outcome.is_success())
    }

    /// Write the follow-up CSV, one row per unmatched or failed entry.
    ///
    /// The header is always written so a clean run replaces a stale report.
    /// Returns the number of rows written.
    pub fn write_follow_up(&self, path: &Path) -> Result<usize, IgdbError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["name", "status", "platform", "notes", "outcome", "reason"])?;

        let mut rows = 0;
        for report in self.follow_up() {
            let kind = report.outcome.kind().to_string();
            writer.write_record([
                report.entry.name.as_str(),
                report.entry.status.as_str(),
                report.entry.platform.as_str(),
                report.entry.notes.as_deref().unwrap_or(""),
                kind.as_str(),
                report.outcome.reason().unwrap_or(""),
            ])?;
            rows += 1;
        }
        writer.flush()?;

        Ok(rows)
    }
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
