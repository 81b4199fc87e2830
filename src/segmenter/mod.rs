// WHY: Main segmenter interface with a borrowed detection pass and an owned convenience API
// The borrowed pass keeps byte spans for callers that highlight sentences in the source text

use std::ops::Range;
use tracing::debug;

pub mod normalization;
pub mod tokenizer;

pub use normalization::{is_space, normalize_line_endings, normalize_sentence, normalize_sentence_into};
pub use tokenizer::{Token, TokenKind, Tokenizer};

/// Chinese and Latin terminators plus ellipsis and dash
pub const DEFAULT_MARKERS: [char; 8] = ['。', '！', '？', '.', '!', '?', '…', '—'];

/// Configuration for sentence boundary detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryRules {
    /// Characters that end a sentence; line breaks always do
    pub markers: Vec<char>,
}

impl Default for BoundaryRules {
    fn default() -> Self {
        Self {
            markers: DEFAULT_MARKERS.to_vec(),
        }
    }
}

impl BoundaryRules {
    pub fn is_marker(&self, ch: char) -> bool {
        self.markers.contains(&ch)
    }
}

/// Borrowed sentence slice, including its trailing separators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSentence<'a> {
    pub index: usize,
    pub raw: &'a str,
    /// Byte range of `raw` within the scanned text
    pub span: Range<usize>,
}

impl RawSentence<'_> {
    /// Normalize content with new allocation
    pub fn normalize(&self) -> String {
        normalize_sentence(self.raw)
    }

    /// Normalize content into supplied buffer
    pub fn normalize_into(&self, buffer: &mut String) {
        normalize_sentence_into(self.raw, buffer);
    }
}

/// Sentence segmenter for guide documents
///
/// Stateless apart from its rules; one instance can be shared across
/// threads and reused for any number of documents.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    rules: BoundaryRules,
}

impl Segmenter {
    pub fn new(rules: BoundaryRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &BoundaryRules {
        &self.rules
    }

    /// Split `text` into raw sentence slices without normalizing them
    ///
    /// Each slice runs from the start of a content token to the start of the
    /// next one, so it carries the separators that close it. Separators
    /// before the first content token are dropped.
    pub fn detect_borrowed<'a>(&self, text: &'a str) -> Vec<RawSentence<'a>> {
        let mut sentences = Vec::new();
        let mut current_start: Option<usize> = None;

        for token in Tokenizer::new(text, &self.rules) {
            if token.is_separator() {
                continue;
            }
            if let Some(start) = current_start {
                push_sentence(&mut sentences, text, start..token.offset);
            }
            current_start = Some(token.offset);
        }

        if let Some(start) = current_start {
            push_sentence(&mut sentences, text, start..text.len());
        }

        sentences
    }

    /// Segment a document into display-ready sentences
    ///
    /// Total over all inputs: blank or separator-only text yields an empty
    /// vector, never an error.
    pub fn segment(&self, text: &str) -> Vec<String> {
        debug!("Starting segmentation of {} bytes", text.len());

        let normalized = normalize_line_endings(text);
        let raw_sentences = self.detect_borrowed(&normalized);

        let mut buffer = String::new();
        let mut result = Vec::with_capacity(raw_sentences.len());
        for sentence in &raw_sentences {
            sentence.normalize_into(&mut buffer);
            if !buffer.is_empty() {
                result.push(buffer.clone());
            }
        }

        debug!(
            "Segmentation produced {} sentences from {} raw slices",
            result.len(),
            raw_sentences.len()
        );
        result
    }
}

fn push_sentence<'a>(sentences: &mut Vec<RawSentence<'a>>, text: &'a str, span: Range<usize>) {
    sentences.push(RawSentence {
        index: sentences.len(),
        raw: &text[span.clone()],
        span,
    });
}

/// Segment with the default marker set
pub fn segment(text: &str) -> Vec<String> {
    Segmenter::default().segment(text)
}
