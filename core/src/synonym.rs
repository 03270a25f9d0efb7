use crate::lexicon::SynonymTable;
use crate::tokenizer::normalize;

/// Appends canonical terms to text that mentions one of their colloquial
/// phrases. Original words are kept, so later stages see both forms.
///
/// Matching is plain substring search over the normalized input, which also
/// works for scripts written without spaces. One pass only: canonical terms
/// appended by this call are not matched again.
#[derive(Debug, Clone, Default)]
pub struct SynonymExpander {
    entries: Vec<(String, Vec<String>)>,
}

impl SynonymExpander {
    pub fn new(table: &SynonymTable) -> Self {
        let entries = table
            .iter()
            .filter_map(|entry| {
                let canonical = normalize(&entry.canonical);
                let phrases: Vec<String> = entry
                    .phrases
                    .iter()
                    .map(|p| normalize(p))
                    .filter(|p| !p.is_empty())
                    .collect();
                if canonical.is_empty() || phrases.is_empty() {
                    return None;
                }
                Some((canonical, phrases))
            })
            .collect();
        Self { entries }
    }

    pub fn expand(&self, text: &str) -> String {
        let source = normalize(text);
        let mut expanded = source.clone();
        for (canonical, phrases) in &self.entries {
            if phrases.iter().any(|p| source.contains(p.as_str())) {
                if !expanded.is_empty() {
                    expanded.push(' ');
                }
                expanded.push_str(canonical);
            }
        }
        expanded
    }
}
