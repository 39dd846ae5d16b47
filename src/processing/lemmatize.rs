//! Token lemmatization
//!
//! Lemmas come from a dictionary of inflected form to base form. Words the
//! dictionary does not know fall back to a handful of English plural rules and
//! are otherwise returned unchanged.

use crate::error::{Result, TextBaselinesError};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

pub trait Lemmatizer {
    fn lemmatize<'a>(&self, word: &'a str) -> Cow<'a, str>;
}

#[derive(Debug, Clone, Default)]
pub struct LookupLemmatizer {
    lemmas: HashMap<String, String>,
}

impl LookupLemmatizer {
    pub fn new() -> Self {
        Self {
            lemmas: Self::irregular_forms(),
        }
    }

    pub fn with_lemmas(lemmas: HashMap<String, String>) -> Self {
        let mut base = Self::new();
        base.lemmas.extend(lemmas);
        base
    }

    /// Load a tab-separated `form<TAB>lemma` dictionary on top of the built-in forms
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut lemmas = HashMap::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (form, lemma) = line.split_once('\t').ok_or_else(|| {
                TextBaselinesError::Parse(format!(
                    "{}:{}: expected 'form<TAB>lemma'",
                    path.display(),
                    line_no + 1
                ))
            })?;
            lemmas.insert(form.trim().to_lowercase(), lemma.trim().to_lowercase());
        }

        Ok(Self::with_lemmas(lemmas))
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }

    fn irregular_forms() -> HashMap<String, String> {
        [
            ("children", "child"),
            ("men", "man"),
            ("women", "woman"),
            ("people", "person"),
            ("feet", "foot"),
            ("teeth", "tooth"),
            ("mice", "mouse"),
            ("geese", "goose"),
            ("wolves", "wolf"),
            ("knives", "knife"),
            ("lives", "life"),
            ("wives", "wife"),
            ("leaves", "leaf"),
            ("movies", "movie"),
            ("series", "series"),
            ("species", "species"),
            ("news", "news"),
        ]
        .iter()
        .map(|(form, lemma)| (form.to_string(), lemma.to_string()))
        .collect()
    }

    fn plural_rule(word: &str) -> Option<String> {
        if let Some(stem) = word.strip_suffix("ies") {
            if stem.len() > 1 {
                return Some(format!("{}y", stem));
            }
        }
        if let Some(stem) = word.strip_suffix("sses") {
            return Some(format!("{}ss", stem));
        }
        if word.len() > 3
            && word.ends_with('s')
            && !["ss", "us", "is"].iter().any(|suffix| word.ends_with(suffix))
        {
            return Some(word[..word.len() - 1].to_string());
        }
        None
    }
}

impl Lemmatizer for LookupLemmatizer {
    fn lemmatize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if let Some(lemma) = self.lemmas.get(word) {
            return Cow::Owned(lemma.clone());
        }
        match Self::plural_rule(word) {
            Some(lemma) => Cow::Owned(lemma),
            None => Cow::Borrowed(word),
        }
    }
}

/// Lemmatize every whitespace-separated token of an already normalized string
pub fn lemmatize(text: &str, lemmatizer: &dyn Lemmatizer) -> String {
    text.split_whitespace()
        .map(|token| lemmatizer.lemmatize(token))
        .collect::<Vec<_>>()
        .join(" ")
}
