use crate::core::types::Term;
use regex::Regex;
use std::sync::OnceLock;

/// `[#@\w](['\-]?\w){2,24}`: a word starting with a word character, `#` or
/// `@`, followed by 2-24 more word characters optionally separated by a
/// single apostrophe or hyphen. Matches hashtags, @-mentions and
/// contractions/hyphenated words as single tokens.
const TERM_PATTERN: &str = r"[#@\w](['\-]?\w){2,24}";

static TERM_REGEX: OnceLock<Regex> = OnceLock::new();

fn term_regex() -> &'static Regex {
    TERM_REGEX.get_or_init(|| Regex::new(TERM_PATTERN).expect("TERM_PATTERN is a valid regex"))
}

/// Tokenize `text` into the ordered sequence of normalized terms: lowercase,
/// stopwords dropped, duplicates retained (tf accumulation needs the
/// repetition), left-to-right order preserved.
///
/// This is the single entry point both the builder and the query engine
/// call — there is no separate build-time/query-time tokenizer, so the
/// "identical token sequences" precondition in the spec holds by
/// construction rather than by convention.
pub fn tokenize(text: &str) -> Vec<Term> {
    let lowered = text.to_lowercase();
    term_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|term| !crate::analysis::stopwords::is_stopword(term))
        .map(Term::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_stopwords_and_lowercases() {
        let terms = tokenize("The Rust Programming Language");
        let words: Vec<&str> = terms.iter().map(Term::as_str).collect();
        assert_eq!(words, vec!["rust", "programming", "language"]);
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let terms = tokenize("rust rust wikipedia rust");
        let words: Vec<&str> = terms.iter().map(Term::as_str).collect();
        assert_eq!(words, vec!["rust", "rust", "wikipedia", "rust"]);
    }

    #[test]
    fn empty_or_all_stopwords_yields_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("the of and").is_empty());
    }

    #[test]
    fn build_and_query_time_tokenization_agree() {
        let text = "Wikipedia's search-engine, built for #rust and @mentions.";
        assert_eq!(tokenize(text), tokenize(text));
    }

    #[test]
    fn hyphenated_and_possessive_words_are_single_tokens() {
        let terms = tokenize("well-known wikipedia's");
        let words: Vec<&str> = terms.iter().map(Term::as_str).collect();
        assert_eq!(words, vec!["well-known", "wikipedia's"]);
    }
}
