use std::sync::OnceLock;

use regex::Regex;

use crate::grammar::LineRange;

/// `@@ -old_start[,old_len] +new_start[,new_len] @@`
fn hunk_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^@@ -\d+(?:,\d+)? \+(\d+)(?:,(\d+))? @@").expect("hunk header regex")
    })
}

/// Extract the new-side changed-line ranges from a file's unified-diff patch
/// text, one range per hunk. Only `@@` headers are required; malformed
/// headers are skipped, pure-deletion hunks (new length 0) produce no range.
///
/// Hunk headers are 1-based; the returned ranges are 0-indexed to match the
/// resolver's line model.
pub fn changed_ranges(patch: &str) -> Vec<LineRange> {
    let mut ranges = Vec::new();
    for caps in hunk_header_re().captures_iter(patch) {
        let Some(start) = caps.get(1).and_then(|m| m.as_str().parse::<usize>().ok()) else {
            continue;
        };
        let len = caps
            .get(2)
            .and_then(|m| m.as_str().parse::<usize>().ok())
            .unwrap_or(1);
        if start == 0 || len == 0 {
            // `+0,0` marks a deletion-only hunk — nothing on the new side.
            continue;
        }
        let start = start - 1;
        if let Some(range) = LineRange::new(start, start + len - 1) {
            ranges.push(range);
        }
    }
    ranges
}
