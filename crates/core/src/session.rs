//! Session-level pieces of the summarizer: instruction presets, text
//! assembly, and the append-only summary history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RecapError;

/// Summary styles offered to the user.
pub const INSTRUCTION_PRESETS: &[&str] = &[
    "Summarize in bullet points",
    "Explain in simple terms",
    "Extract only key points",
    "Highlight only action items",
    "Detailed summary",
];

/// Preset selected when the user has not chosen anything yet.
pub const DEFAULT_PRESET: &str = "Summarize in bullet points";

/// Instruction sent to the model when the merged instruction is empty.
pub const FALLBACK_INSTRUCTION: &str = "Summarize the text in a structured way.";

/// Instruction label recorded in history when the merged instruction is empty.
pub const DEFAULT_HISTORY_LABEL: &str = "(default summary)";

/// Message shown when there is nothing to summarize.
pub const EMPTY_INPUT_MESSAGE: &str = "Please upload or enter some text.";

/// Join the selected styles and an optional custom instruction with `"; "`.
///
/// The custom instruction is only added when it has non-whitespace content
/// and is kept as typed.
pub fn merge_instructions<S: AsRef<str>>(selected: &[S], custom: Option<&str>) -> String {
    let mut parts: Vec<&str> = selected
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| !s.is_empty())
        .collect();
    if let Some(custom) = custom.filter(|c| !c.trim().is_empty()) {
        parts.push(custom);
    }
    parts.join("; ")
}

/// The instruction actually sent to the model.
pub fn effective_instruction(merged: &str) -> &str {
    if merged.is_empty() {
        FALLBACK_INSTRUCTION
    } else {
        merged
    }
}

/// The instruction label stored alongside a summary in history.
pub fn history_label(merged: &str) -> &str {
    if merged.is_empty() {
        DEFAULT_HISTORY_LABEL
    } else {
        merged
    }
}

/// Build the text blob sent for summarization.
///
/// Every extracted text is followed by a newline, in upload order. Manual
/// text, when it is not blank, is appended trimmed after one more newline.
pub fn assemble_text<S: AsRef<str>>(extracted: &[S], manual_text: &str) -> String {
    let mut text = String::new();
    for chunk in extracted {
        text.push_str(chunk.as_ref());
        text.push('\n');
    }
    let manual = manual_text.trim();
    if !manual.is_empty() {
        text.push('\n');
        text.push_str(manual);
    }
    text
}

/// Reject a blob that has no non-whitespace content.
pub fn require_text(text: &str) -> Result<&str, RecapError> {
    if text.trim().is_empty() {
        return Err(RecapError::InvalidInput(EMPTY_INPUT_MESSAGE.to_string()));
    }
    Ok(text)
}

// ── History ───────────────────────────────────────────────────

/// One past summary and the instruction that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 1-based position in the log.
    pub number: usize,
    pub instruction: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// Append-only log of summaries for one session.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, instruction: impl Into<String>, summary: impl Into<String>) -> &HistoryEntry {
        let entry = HistoryEntry {
            number: self.entries.len() + 1,
            instruction: instruction.into(),
            summary: summary.into(),
            created_at: Utc::now(),
        };
        tracing::debug!(number = entry.number, "history entry appended");
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its 1-based number.
    pub fn get(&self, number: usize) -> Option<&HistoryEntry> {
        number.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn entry(&self, number: usize) -> Result<&HistoryEntry, RecapError> {
        self.get(number).ok_or(RecapError::HistoryEntryNotFound(number))
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn iter_newest_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }
}
