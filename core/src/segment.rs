//! Word segmentation backends.
//!
//! The engine treats segmentation as a black box: given normalized text it
//! expects word-like substrings in left-to-right order. Languages written
//! without spaces need a dictionary segmenter plugged in through
//! [`Segmenter`]; the built-in ones cover space-delimited text.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

pub trait Segmenter: Send + Sync {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;

    fn name(&self) -> &'static str;
}

/// Unicode (UAX #29) word boundaries, keeping only segments that contain
/// a letter or digit.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordSegmenter;

impl Segmenter for UnicodeWordSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.unicode_words().collect()
    }

    fn name(&self) -> &'static str {
        "unicode_words"
    }
}

/// Splits on whitespace only. Suited to datasets that are already
/// segmented, e.g. Thai symptom lists separated by spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceSegmenter;

impl Segmenter for WhitespaceSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_whitespace().collect()
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

/// Built-in segmenter selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmenterKind {
    #[default]
    UnicodeWords,
    Whitespace,
}

impl SegmenterKind {
    pub fn build(self) -> Arc<dyn Segmenter> {
        match self {
            SegmenterKind::UnicodeWords => Arc::new(UnicodeWordSegmenter),
            SegmenterKind::Whitespace => Arc::new(WhitespaceSegmenter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unicode_words_drop_punctuation() {
        let words = UnicodeWordSegmenter.segment("red, itchy bump! (face)");
        assert_eq!(words, vec!["red", "itchy", "bump", "face"]);
    }

    #[test]
    fn whitespace_keeps_pre_segmented_words() {
        let words = WhitespaceSegmenter.segment("ตุ่มแดง  เจ็บ หน้ามัน");
        assert_eq!(words, vec!["ตุ่มแดง", "เจ็บ", "หน้ามัน"]);
    }

    #[test]
    fn kind_builds_named_segmenter() {
        assert_eq!(SegmenterKind::Whitespace.build().name(), "whitespace");
        let kind: SegmenterKind = serde_json::from_str("\"unicode_words\"").unwrap();
        assert_eq!(kind, SegmenterKind::UnicodeWords);
    }
}
