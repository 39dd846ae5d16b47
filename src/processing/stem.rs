//! Token stemming

use rust_stemmers::Algorithm;
use std::borrow::Cow;

pub trait Stemmer {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str>;
}

/// English Snowball (Porter2) stemmer
pub struct SnowballStemmer {
    inner: rust_stemmers::Stemmer,
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl SnowballStemmer {
    pub fn new() -> Self {
        Self {
            inner: rust_stemmers::Stemmer::create(Algorithm::English),
        }
    }
}

impl Stemmer for SnowballStemmer {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        self.inner.stem(word)
    }
}

/// Stem every whitespace-separated token of an already normalized string
pub fn stem_with(text: &str, stemmer: &dyn Stemmer) -> String {
    text.split_whitespace()
        .map(|token| stemmer.stem(token))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn stem(text: &str) -> String {
    stem_with(text, &SnowballStemmer::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_joins_with_single_spaces() {
        assert_eq!(stem("running   jumps\tcats"), "run jump cat");
    }

    #[test]
    fn test_stem_empty() {
        assert_eq!(stem("   "), "");
    }

    struct Truncate;

    impl Stemmer for Truncate {
        fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
            Cow::Borrowed(&word[..word.len().min(3)])
        }
    }

    #[test]
    fn test_custom_stemmer() {
        assert_eq!(stem_with("movies were amazing", &Truncate), "mov wer ama");
    }
}
