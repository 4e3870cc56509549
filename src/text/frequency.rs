//! Frequency counting and top-N selection.

use std::collections::HashMap;

use crate::text::normalize::{strip_punctuation, strip_tags};
use crate::text::segment::tokenize;

/// Upper bound on how many ranked entries a caller can request.
pub const MAX_TOP_WORDS: usize = 100;

/// A token and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCount {
    pub token: String,
    pub count: usize,
}

/// Count occurrences per distinct token, preserving first-encounter order.
pub fn count_tokens<I>(tokens: I) -> Vec<TokenCount>
where
    I: IntoIterator<Item = String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<TokenCount> = Vec::new();

    for token in tokens {
        match index.get(&token) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(token.clone(), counts.len());
                counts.push(TokenCount { token, count: 1 });
            }
        }
    }

    counts
}

/// The `n` most frequent tokens in `text`, count-descending.
///
/// Ties keep first-encounter order (the sort is stable over an
/// insertion-ordered count table). `n` is clamped to `1..=MAX_TOP_WORDS`.
/// Input producing no tokens yields an empty vec.
pub fn top_words(text: &str, n: usize) -> Vec<TokenCount> {
    let n = n.clamp(1, MAX_TOP_WORDS);
    let stripped = strip_punctuation(&strip_tags(text));
    let mut counts = count_tokens(tokenize(&stripped));
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tc(token: &str, count: usize) -> TokenCount {
        TokenCount {
            token: token.to_string(),
            count,
        }
    }

    #[test]
    fn ascii_example() {
        assert_eq!(
            top_words("hello hello world", 2),
            vec![tc("hello", 2), tc("world", 1)]
        );
    }

    #[test]
    fn chinese_example() {
        assert_eq!(
            top_words("你好 你好 世界", 2),
            vec![tc("你好", 2), tc("世界", 1)]
        );
    }

    #[test]
    fn empty_input_yields_empty_ranking() {
        assert!(top_words("", 10).is_empty());
        assert!(top_words("   \n ", 10).is_empty());
    }

    #[test]
    fn returns_at_most_n() {
        let ranked = top_words("a b c d e", 3);
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn n_is_clamped_to_the_cap() {
        let ranked = top_words("a b", 5000);
        assert_eq!(ranked.len(), 2);
        let ranked = top_words("a b", 0);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn ties_keep_first_encounter_order() {
        let ranked = top_words("zeta alpha zeta alpha mid", 5);
        assert_eq!(
            ranked,
            vec![tc("zeta", 2), tc("alpha", 2), tc("mid", 1)]
        );
    }

    #[test]
    fn counting_is_case_sensitive() {
        let ranked = top_words("Word word", 5);
        assert_eq!(ranked, vec![tc("Word", 1), tc("word", 1)]);
    }

    #[test]
    fn punctuation_does_not_leak_into_tokens() {
        let ranked = top_words("stop. stop! stop?", 5);
        assert_eq!(ranked, vec![tc("stop", 3)]);
    }

    #[test]
    fn markup_is_ignored() {
        let ranked = top_words("<p>rust</p> <b>rust</b>", 5);
        assert_eq!(ranked, vec![tc("rust", 2)]);
    }
}
