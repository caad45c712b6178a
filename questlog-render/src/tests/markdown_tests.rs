use super::*;

fn chrono_trigger() -> (CatalogEntry, ResolvedRecord) {
    let entry = CatalogEntry::new("Chrono Trigger", "Completed", "pc")
        .with_notes("Got the dream ending.");
    let record = ResolvedRecord {
        id: 1234,
        name: "Chrono Trigger".to_string(),
        summary: Some("A time-travelling RPG.".to_string()),
        release_date: Some("1995-03-11".to_string()),
        rating: Some(93.46),
        genres: vec!["Role-playing (RPG)".to_string()],
        platforms: vec!["SNES".to_string(), "PC (Microsoft Windows)".to_string()],
        developers: vec!["Square".to_string()],
        publishers: vec!["Square".to_string(), "Square Enix".to_string()],
        ..Default::default()
    };
    (entry, record)
}

#[test]
fn front_matter_contains_entry_and_record_fields() {
    let (entry, record) = chrono_trigger();
    let md = render_markdown(&entry, &record);

    assert!(md.starts_with("---\n"));
    assert!(md.contains("title: \"Chrono Trigger\"\n"));
    assert!(md.contains("igdb_id: 1234\n"));
    assert!(md.contains("status: \"Completed\"\n"));
    assert!(md.contains("rating: 93.5\n"));
    assert!(md.contains("publishers: [\"Square\", \"Square Enix\"]\n"));
}

#[test]
fn body_sections_follow_front_matter() {
    let (entry, record) = chrono_trigger();
    let md = render_markdown(&entry, &record);

    assert!(md.contains("# Chrono Trigger\n"));
    assert!(md.contains("## Summary\n\nA time-travelling RPG.\n"));
    assert!(md.contains("- **Developers:** Square\n"));
    assert!(md.contains("## Notes\n\nGot the dream ending.\n"));
    assert!(!md.contains("## Storyline"));
    assert!(!md.contains("**Themes:**"));
}

#[test]
fn quotes_are_escaped_in_front_matter() {
    let entry = CatalogEntry::new("The \"Best\" Game", "Playing", "pc");
    let record = ResolvedRecord {
        id: 1,
        name: "The \"Best\" Game".to_string(),
        ..Default::default()
    };
    let md = render_markdown(&entry, &record);
    assert!(md.contains("title: \"The \\\"Best\\\" Game\"\n"));
}

#[test]
fn writer_uses_sanitized_title_as_filename() {
    let dir = tempfile::tempdir().unwrap();
    let writer = MarkdownWriter::new(dir.path().join("notes"));
    let entry = CatalogEntry::new("Halo: Reach", "Completed", "xbox");
    let record = ResolvedRecord {
        id: 7,
        name: "Halo: Reach".to_string(),
        ..Default::default()
    };

    let path = writer.render(&entry, &record).unwrap();
    assert_eq!(path, dir.path().join("notes").join("Halo Reach.md"));

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("# Halo: Reach\n"));
}

#[test]
fn writer_reports_io_failure() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let writer = MarkdownWriter::new(&blocker);
    let entry = CatalogEntry::new("Celeste", "Completed", "switch");
    let err = writer.render(&entry, &ResolvedRecord::default()).unwrap_err();
    assert!(matches!(err, RenderError::Io(_)));
}

#[test]
fn writer_renders_through_trait_object() {
    let dir = tempfile::tempdir().unwrap();
    let writer = MarkdownWriter::new(dir.path());
    let renderer: &dyn Renderer = &writer;

    let (entry, record) = chrono_trigger();
    let path = renderer.render(&entry, &record).unwrap();
    assert_eq!(path, writer.document_path(&entry));
    assert!(path.exists());
}
