use crate::synonym::SynonymExpander;
use crate::tokenizer::Tokenizer;

/// Synonym expansion followed by tokenization, plus n-gram generation for
/// the vectorizer. Documents and queries go through the same instance.
#[derive(Debug, Clone)]
pub struct Analyzer {
    expander: SynonymExpander,
    tokenizer: Tokenizer,
    ngram_min: usize,
    ngram_max: usize,
}

impl Analyzer {
    pub fn new(expander: SynonymExpander, tokenizer: Tokenizer, ngram_min: usize, ngram_max: usize) -> Self {
        let ngram_min = ngram_min.max(1);
        Self { expander, tokenizer, ngram_min, ngram_max: ngram_max.max(ngram_min) }
    }

    pub fn tokenizer(&self) -> &Tokenizer { &self.tokenizer }

    /// Filtered, boosted tokens of `text` after synonym expansion.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize(&self.expander.expand(text))
    }

    /// Vocabulary terms for a token stream: every contiguous run of
    /// `ngram_min..=ngram_max` tokens, joined by a space.
    pub fn terms(&self, tokens: &[String]) -> Vec<String> {
        let mut terms = Vec::new();
        for n in self.ngram_min..=self.ngram_max {
            if n == 1 {
                terms.extend(tokens.iter().cloned());
                continue;
            }
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }
}
