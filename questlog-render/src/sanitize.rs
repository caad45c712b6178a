/// Turn a game title into a name that is safe on common filesystems.
///
/// Drops `<>:"/\|?*` and control characters, collapses runs of whitespace,
/// and strips trailing dots and spaces (rejected on Windows). Titles that
/// sanitize to nothing become `untitled`.
pub fn sanitize_filename(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .filter(|c| !c.is_control())
        .collect();

    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = collapsed.trim_end_matches(['.', ' ']).trim_start();

    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
#[path = "tests/sanitize_tests.rs"]
mod tests;
