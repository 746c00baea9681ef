//! Word-level content diffs between two message versions.

use msglog_core::{DiffKind, DiffPart};
use similar::{Algorithm, ChangeTag, TextDiff};

/// Diff `old_content` against `new_content` at word granularity.
///
/// Concatenating the `Unchanged` and `Added` parts yields `new_content`;
/// concatenating `Unchanged` and `Removed` yields `old_content`. Adjacent
/// parts never share a kind and no part is empty.
#[must_use]
pub fn create_message_diff(new_content: &str, old_content: &str) -> Vec<DiffPart> {
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_words(old_content, new_content);

    let mut parts: Vec<DiffPart> = Vec::new();
    for change in diff.iter_all_changes() {
        let text = change.value();
        if text.is_empty() {
            continue;
        }
        let kind = match change.tag() {
            ChangeTag::Equal => DiffKind::Unchanged,
            ChangeTag::Insert => DiffKind::Added,
            ChangeTag::Delete => DiffKind::Removed,
        };
        match parts.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(text),
            _ => parts.push(DiffPart::new(kind, text)),
        }
    }
    parts
}

/// Text of the newer side of a diff
#[must_use]
pub fn new_side(parts: &[DiffPart]) -> String {
    side(parts, DiffKind::Added)
}

/// Text of the older side of a diff
#[must_use]
pub fn old_side(parts: &[DiffPart]) -> String {
    side(parts, DiffKind::Removed)
}

fn side(parts: &[DiffPart], changed: DiffKind) -> String {
    parts
        .iter()
        .filter(|p| p.kind == DiffKind::Unchanged || p.kind == changed)
        .map(|p| p.text.as_str())
        .collect()
}
