use regex::Regex;
use std::sync::LazyLock;

/// Characters Windows refuses in folder names.
static ILLEGAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());

/// Rewrites `name` into a folder name every supported filesystem accepts:
/// illegal characters become `_`, leading whitespace is trimmed, and any
/// trailing run of whitespace and dots is stripped (Windows rejects names
/// ending in a dot). Total and idempotent.
pub fn sanitize_folder_name(name: &str) -> String {
    ILLEGAL_CHARS
        .replace_all(name, "_")
        .trim_start()
        .trim_end_matches(|c: char| c.is_whitespace() || c == '.')
        .to_string()
}

/// Canonical deployment folder name for a mod: `{folder}_{version}`, both
/// halves sanitized. An empty version reads as "unknown".
pub fn standardized_folder_name(source_folder_name: &str, version: &str) -> String {
    let version = if version.is_empty() { "unknown" } else { version };
    format!(
        "{}_{}",
        sanitize_folder_name(source_folder_name),
        sanitize_folder_name(version)
    )
}
