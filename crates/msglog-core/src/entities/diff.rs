//! Diff spans between two versions of a message's content

use serde::{Deserialize, Serialize};

/// Label of a diff span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Unchanged,
    Added,
    Removed,
}

/// A contiguous run of text with a single label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffPart {
    #[serde(rename = "type")]
    pub kind: DiffKind,
    pub text: String,
}

impl DiffPart {
    pub fn new(kind: DiffKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn unchanged(text: impl Into<String>) -> Self {
        Self::new(DiffKind::Unchanged, text)
    }

    pub fn added(text: impl Into<String>) -> Self {
        Self::new(DiffKind::Added, text)
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self::new(DiffKind::Removed, text)
    }
}
