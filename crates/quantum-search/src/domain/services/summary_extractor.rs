//! Summary Extractor
//!
//! Turns the provider's semi-structured completion into an [`AiSummary`].
//! The expected shape is:
//!
//! ```text
//! Summary: <two or three sentences>
//!
//! Key Points:
//! - <point>
//! - <point>
//! ```
//!
//! Providers do not always honor it, so every missing piece degrades to a
//! sensible default instead of an error.

use crate::domain::entities::{AiSummary, MAX_KEY_POINTS};

const SUMMARY_MARKER: &str = "summary:";
const KEY_POINTS_MARKER: &str = "key points:";

/// Extract a summary and key points from free-form provider text.
///
/// - The summary is the text after `Summary:` up to `Key Points:` (or the end).
///   Without the marker it is the first paragraph, and without a paragraph
///   break it is the whole text.
/// - Key points are the non-empty lines after `Key Points:`, with a leading
///   `-` or `•` removed. Other list markers are kept as written.
///
/// Markers match case-insensitively and only at the start of a line. Never
/// fails.
pub fn extract_summary(raw: &str) -> AiSummary {
    let text = raw.replace("\r\n", "\n");

    let summary = explicit_summary(&text).unwrap_or_else(|| first_paragraph(&text));
    let key_points = find_marker(&text, KEY_POINTS_MARKER, 0)
        .map(|at| parse_key_points(&text[at + KEY_POINTS_MARKER.len()..]))
        .unwrap_or_default();

    AiSummary::new(summary, key_points)
}

fn explicit_summary(text: &str) -> Option<String> {
    let start = find_marker(text, SUMMARY_MARKER, 0)? + SUMMARY_MARKER.len();
    let end = find_marker(text, KEY_POINTS_MARKER, start).unwrap_or(text.len());

    let captured = text[start..end].trim();
    if captured.is_empty() {
        None
    } else {
        Some(captured.to_string())
    }
}

fn first_paragraph(text: &str) -> String {
    text.split("\n\n").next().unwrap_or_default().trim().to_string()
}

fn parse_key_points(section: &str) -> Vec<String> {
    section
        .lines()
        .map(strip_bullet)
        .filter(|point| !point.is_empty())
        .take(MAX_KEY_POINTS)
        .map(str::to_string)
        .collect()
}

fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix(|c: char| c == '-' || c == '•')
        .unwrap_or(line)
        .trim()
}

/// Byte offset of `marker` (lowercase ASCII) at the start of a line, at or
/// after `from`. Leading spaces and tabs on the line are skipped. Markers are
/// ASCII, so any match sits on a char boundary.
fn find_marker(haystack: &str, marker: &str, from: usize) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let line_starts = std::iter::once(0).chain(
        bytes
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == b'\n')
            .map(|(i, _)| i + 1),
    );

    line_starts.filter(|start| *start >= from).find_map(|start| {
        let indent = bytes[start..]
            .iter()
            .take_while(|b| **b == b' ' || **b == b'\t')
            .count();
        let at = start + indent;
        bytes
            .get(at..at + marker.len())
            .filter(|candidate| candidate.eq_ignore_ascii_case(marker.as_bytes()))
            .map(|_| at)
    })
}
