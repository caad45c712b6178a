use super::*;

#[test]
fn key_ignores_case_and_punctuation() {
    let a = CatalogEntry::new("Chrono Trigger", "Completed", "pc");
    let b = CatalogEntry::new("  chrono-trigger! ", "Playing", "snes");
    assert_eq!(a.key(), "chronotrigger");
    assert_eq!(a.key(), b.key());
}

#[test]
fn key_keeps_digits() {
    assert_eq!(normalize_key("Final Fantasy VII: Remake 2"), "finalfantasyviiremake2");
}

#[test]
fn blank_notes_become_none() {
    let entry = CatalogEntry::new("Celeste", "Completed", "switch").with_notes("   ");
    assert!(entry.notes.is_none());

    let entry = CatalogEntry::new("Celeste", "Completed", "switch").with_notes("B-sides done");
    assert_eq!(entry.notes.as_deref(), Some("B-sides done"));
}
