use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use questlog_core::{CatalogEntry, ResolvedRecord};

use crate::sanitize::sanitize_filename;
use crate::{RenderError, Renderer};

/// Writes one markdown file per game into an output directory.
pub struct MarkdownWriter {
    output_dir: PathBuf,
}

impl MarkdownWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path the document for an entry is written to.
    pub fn document_path(&self, entry: &CatalogEntry) -> PathBuf {
        self.output_dir
            .join(format!("{}.md", sanitize_filename(&entry.name)))
    }
}

impl Renderer for MarkdownWriter {
    fn render(
        &self,
        entry: &CatalogEntry,
        record: &ResolvedRecord,
    ) -> Result<PathBuf, RenderError> {
        fs::create_dir_all(&self.output_dir)?;

        let path = self.document_path(entry);
        let mut file = fs::File::create(&path)?;
        file.write_all(render_markdown(entry, record).as_bytes())?;

        Ok(path)
    }
}

/// Build the markdown document for a catalog entry and its resolved record.
///
/// The catalog title is used for the heading; the service's canonical name is
/// kept in the front matter.
pub fn render_markdown(entry: &CatalogEntry, record: &ResolvedRecord) -> String {
    let mut md = String::new();

    md.push_str("---\n");
    write_field(&mut md, "title", &entry.name);
    write_field(&mut md, "igdb_name", &record.name);
    md.push_str(&format!("igdb_id: {}\n", record.id));
    write_field(&mut md, "status", &entry.status);
    write_field(&mut md, "platform", &entry.platform);
    if let Some(ref date) = record.release_date {
        write_field(&mut md, "release_date", date);
    }
    if let Some(rating) = record.rating {
        md.push_str(&format!("rating: {:.1}\n", rating));
    }
    write_list_field(&mut md, "genres", &record.genres);
    write_list_field(&mut md, "platforms", &record.platforms);
    write_list_field(&mut md, "developers", &record.developers);
    write_list_field(&mut md, "publishers", &record.publishers);
    write_field(
        &mut md,
        "updated",
        &chrono::Local::now().format("%Y-%m-%d").to_string(),
    );
    md.push_str("---\n\n");

    md.push_str(&format!("# {}\n\n", entry.name));

    if let Some(ref summary) = record.summary {
        md.push_str("## Summary\n\n");
        md.push_str(summary.trim());
        md.push_str("\n\n");
    }
    if let Some(ref storyline) = record.storyline {
        md.push_str("## Storyline\n\n");
        md.push_str(storyline.trim());
        md.push_str("\n\n");
    }

    md.push_str("## Details\n\n");
    write_bullet(&mut md, "Status", &entry.status);
    write_bullet(&mut md, "Played on", &entry.platform);
    if let Some(ref date) = record.release_date {
        write_bullet(&mut md, "Released", date);
    }
    write_list_bullet(&mut md, "Developers", &record.developers);
    write_list_bullet(&mut md, "Publishers", &record.publishers);
    write_list_bullet(&mut md, "Genres", &record.genres);
    write_list_bullet(&mut md, "Themes", &record.themes);
    write_list_bullet(&mut md, "Game modes", &record.game_modes);
    write_list_bullet(&mut md, "Perspectives", &record.player_perspectives);
    write_list_bullet(&mut md, "Engines", &record.game_engines);
    write_list_bullet(&mut md, "Platforms", &record.platforms);
    if let Some(ref url) = record.url {
        md.push_str(&format!("- **IGDB:** <{}>\n", url));
    }
    md.push('\n');

    if let Some(ref notes) = entry.notes {
        md.push_str("## Notes\n\n");
        md.push_str(notes.trim());
        md.push('\n');
    }

    md
}

fn write_field(md: &mut String, key: &str, value: &str) {
    md.push_str(key);
    md.push_str(": ");
    md.push_str(&quote_yaml(value));
    md.push('\n');
}

fn write_list_field(md: &mut String, key: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    let items: Vec<String> = values.iter().map(|v| quote_yaml(v)).collect();
    md.push_str(&format!("{}: [{}]\n", key, items.join(", ")));
}

fn write_bullet(md: &mut String, label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    md.push_str(&format!("- **{}:** {}\n", label, value));
}

fn write_list_bullet(md: &mut String, label: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    write_bullet(md, label, &values.join(", "));
}

fn quote_yaml(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
#[path = "tests/markdown_tests.rs"]
mod tests;
