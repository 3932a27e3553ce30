//! Document model
//!
//! Immutable text plus the mutable multi-layer annotation store. The text
//! never changes after construction; all edits are annotation edits. The
//! persistence/versioning service loads a document into memory and later
//! serializes the resulting store through the JSON helpers here.

use serde::{Deserialize, Serialize};

use super::span::Span;
use super::store::AnnotationStore;

/// A document: text buffer plus annotation store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    text: String,
    /// Code-point view of the text, rebuilt on deserialization
    #[serde(skip)]
    chars: Vec<char>,
    pub store: AnnotationStore,
}

impl Document {
    /// Create a document over the given text with an empty store
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let chars = text.chars().collect();
        Self {
            text,
            chars,
            store: AnnotationStore::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in code points
    pub fn char_len(&self) -> usize {
        self.chars.len()
    }

    /// The text covered by a span
    pub fn covered_text(&self, span: Span) -> String {
        self.chars[span.begin.min(self.chars.len())..span.end.min(self.chars.len())]
            .iter()
            .collect()
    }

    /// Check that a span lies within the text
    pub fn contains_span(&self, span: Span) -> bool {
        span.begin <= span.end && span.end <= self.chars.len()
    }

    /// Trim leading and trailing whitespace off a span, adjusting offsets
    ///
    /// Returns a zero-width span at the original begin when the whole
    /// range is whitespace.
    pub fn trim_span(&self, span: Span) -> Span {
        let mut begin = span.begin;
        let mut end = span.end;
        while begin < end && self.chars[begin].is_whitespace() {
            begin += 1;
        }
        while end > begin && self.chars[end - 1].is_whitespace() {
            end -= 1;
        }
        if begin >= end {
            Span::point(span.begin)
        } else {
            Span::new(begin, end)
        }
    }

    /// Serialize the document (text and store) to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Restore a document from its JSON snapshot
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut doc: Document = serde_json::from_str(json)?;
        doc.chars = doc.text.chars().collect();
        Ok(doc)
    }
}
