//! Text hygiene for rendered output.
//!
//! Descriptions and notes come from file contents and upstream callers,
//! so anything landing in the document is reduced to printable ASCII with
//! normalized whitespace and provenance markers removed.

/// Strips every trailing period, then appends exactly one.
pub(crate) fn ensure_single_trailing_period(s: &str) -> String {
    let mut out = s.trim().to_string();
    if out.is_empty() {
        return out;
    }
    while out.ends_with('.') {
        out.pop();
        out.truncate(out.trim_end().len());
    }
    out.push('.');
    out
}

fn ascii_collapse(s: &str) -> String {
    let kept: String = s
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sanitizes description text (never paths): ASCII-only, collapsed
/// whitespace, provenance markers removed, exactly one trailing period.
/// Returns an empty string when nothing printable remains.
pub(crate) fn sanitize_description(desc: &str) -> String {
    let cleaned = ascii_collapse(desc)
        .replace("source:", "")
        .replace("evidence:", "");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        return cleaned;
    }
    ensure_single_trailing_period(&cleaned)
}

/// Light sanitization for analyzer notes. A note still carrying a
/// provenance marker after cleanup is dropped entirely.
pub(crate) fn sanitize_note(note: &str) -> Option<String> {
    let cleaned = ascii_collapse(note);
    if cleaned.is_empty() || cleaned.contains("source:") || cleaned.contains("evidence:") {
        return None;
    }
    Some(cleaned)
}
