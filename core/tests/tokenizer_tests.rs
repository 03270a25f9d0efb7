use std::sync::Arc;
use symptom_core::segment::UnicodeWordSegmenter;
use symptom_core::tokenizer::Tokenizer;
use symptom_core::{KeywordWeightTable, Lexicon, StopwordSet};

fn default_tokenizer() -> Tokenizer {
    let lexicon = Lexicon::default();
    Tokenizer::new(
        Arc::new(UnicodeWordSegmenter),
        lexicon.stopwords.clone(),
        lexicon.symptom_keywords.merged(&lexicon.location_keywords),
        false,
    )
}

#[test]
fn it_never_emits_stopwords_short_or_numeric_tokens() {
    let stopwords = StopwordSet::english();
    let tokenizer = default_tokenizer();
    let inputs = [
        "I have had a red rash on my face for 3 days",
        "It's itchy and it hurts, 2 or 3 times a day, about 38.5 degrees",
        "The   SKIN is   dry  & flaky x y z 1 22 333",
        "",
    ];
    for input in inputs {
        for token in tokenizer.tokenize(input) {
            assert!(!stopwords.contains(&token), "stopword {token:?} from {input:?}");
            assert!(token.chars().count() > 1, "short token {token:?} from {input:?}");
            assert!(!token.chars().all(|c| c.is_numeric() || c == '.'), "numeric token {token:?} from {input:?}");
        }
    }
}

#[test]
fn it_boosts_symptom_and_location_keywords() {
    let toks = default_tokenizer().tokenize("Rash on the face, dry elsewhere");
    assert_eq!(toks, vec!["rash", "rash", "face", "face", "dry", "elsewhere"]);
}

#[test]
fn it_normalizes_full_width_and_case() {
    let tokenizer = Tokenizer::new(Arc::new(UnicodeWordSegmenter), StopwordSet::default(), KeywordWeightTable::new(), false);
    assert_eq!(tokenizer.tokenize("ＲＥＤ Bump"), vec!["red", "bump"]);
}
