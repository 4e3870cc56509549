//! Script detection and tokenization.
//!
//! Chinese text goes through jieba's dictionary segmentation; everything
//! else through Unicode word tokenization. The segmentation dictionary is a
//! process-wide resource: loaded once on first use, read-only afterwards.

use jieba_rs::Jieba;
use once_cell::sync::Lazy;
use unicode_segmentation::UnicodeSegmentation;

use crate::text::normalize::strip_whitespace;

static JIEBA: Lazy<Jieba> = Lazy::new(Jieba::new);

/// Whether any character falls in the CJK Unified Ideographs range.
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c))
}

/// Dictionary-based segmentation for Chinese text.
pub fn segment_chinese(text: &str) -> Vec<String> {
    JIEBA
        .cut(text, true)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Whitespace/punctuation-aware tokenization for space-delimited scripts.
pub fn tokenize_general(text: &str) -> Vec<String> {
    text.unicode_words().map(str::to_string).collect()
}

/// Tokenize text that has already had tags and punctuation stripped.
///
/// The Chinese path strips remaining whitespace first (boundaries carry no
/// information there); the general path keeps it, since it is the only
/// boundary signal left.
pub fn tokenize(text: &str) -> Vec<String> {
    if contains_cjk(text) {
        segment_chinese(&strip_whitespace(text))
    } else {
        tokenize_general(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_cjk() {
        assert!(contains_cjk("hello 世界"));
        assert!(!contains_cjk("hello world"));
        assert!(!contains_cjk(""));
    }

    #[test]
    fn segments_chinese_words() {
        let tokens = segment_chinese("你好你好世界");
        assert_eq!(tokens, vec!["你好", "你好", "世界"]);
    }

    #[test]
    fn general_tokenizer_splits_on_whitespace() {
        let tokens = tokenize_general("hello hello world");
        assert_eq!(tokens, vec!["hello", "hello", "world"]);
    }

    #[test]
    fn mixed_input_takes_the_chinese_path() {
        let tokens = tokenize("春天 spring");
        assert!(tokens.contains(&"春天".to_string()));
        assert!(tokens.contains(&"spring".to_string()));
    }
}
