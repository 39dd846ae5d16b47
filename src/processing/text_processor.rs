//! Text normalization: lowercasing, word tokenization and stopword removal

use crate::error::{Result, TextBaselinesError};
use log::debug;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Shape of the normalizer output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputType {
    #[default]
    List,
    String,
}

impl FromStr for OutputType {
    type Err = TextBaselinesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "list" => Ok(OutputType::List),
            "string" => Ok(OutputType::String),
            _ => Err(TextBaselinesError::invalid_argument(format!(
                "output type must be either 'list' or 'string', got '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputType::List => write!(f, "list"),
            OutputType::String => write!(f, "string"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Tokens(Vec<String>),
    Joined(String),
}

impl fmt::Display for Normalized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Normalized::Tokens(tokens) => write!(f, "{:?}", tokens),
            Normalized::Joined(joined) => write!(f, "{}", joined),
        }
    }
}

pub struct TextProcessor {
    word_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let word_regex = Regex::new(r"\w+").expect("Invalid word regex");
        Self { word_regex }
    }

    /// Lowercase, split into `\w+` runs and optionally drop stopwords
    pub fn normalize(
        &self,
        text: &str,
        remove_stopwords: bool,
        stopwords: Option<&HashSet<String>>,
    ) -> Result<Vec<String>> {
        let stopwords = match (remove_stopwords, stopwords) {
            (false, _) => None,
            (true, Some(set)) => Some(set),
            (true, None) => {
                return Err(TextBaselinesError::invalid_argument(
                    "stopword removal requested but no stopword set was supplied",
                ))
            }
        };

        let lowered = text.to_lowercase();
        let tokens: Vec<String> = self
            .word_regex
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|token| stopwords.map_or(true, |set| !set.contains(*token)))
            .map(String::from)
            .collect();

        debug!("Normalized {} chars into {} tokens", text.len(), tokens.len());
        Ok(tokens)
    }

    /// Same as [`normalize`](Self::normalize), shaped as a token list or a space-joined string
    pub fn normalize_as(
        &self,
        text: &str,
        remove_stopwords: bool,
        stopwords: Option<&HashSet<String>>,
        output: OutputType,
    ) -> Result<Normalized> {
        let tokens = self.normalize(text, remove_stopwords, stopwords)?;
        Ok(match output {
            OutputType::List => Normalized::Tokens(tokens),
            OutputType::String => Normalized::Joined(tokens.join(" ")),
        })
    }
}

pub(crate) fn shared() -> &'static TextProcessor {
    static PROCESSOR: OnceLock<TextProcessor> = OnceLock::new();
    PROCESSOR.get_or_init(TextProcessor::new)
}

/// Normalize `text` with a process-wide [`TextProcessor`].
pub fn normalize(
    text: &str,
    remove_stopwords: bool,
    stopwords: Option<&HashSet<String>>,
) -> Result<Vec<String>> {
    shared().normalize(text, remove_stopwords, stopwords)
}

pub fn normalize_as(
    text: &str,
    remove_stopwords: bool,
    stopwords: Option<&HashSet<String>>,
    output: OutputType,
) -> Result<Normalized> {
    shared().normalize_as(text, remove_stopwords, stopwords, output)
}
