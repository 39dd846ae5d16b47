//! Regex baseline classifiers for binary sentiment labels

use crate::config::ClassifierConfig;
use crate::error::{Result, TextBaselinesError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum Label {
    Negative = 0,
    Positive = 1,
}

impl Label {
    pub fn flip(self) -> Self {
        match self {
            Label::Negative => Label::Positive,
            Label::Positive => Label::Negative,
        }
    }
}

impl TryFrom<i64> for Label {
    type Error = TextBaselinesError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Label::Negative),
            1 => Ok(Label::Positive),
            other => Err(TextBaselinesError::invalid_argument(format!(
                "label must be 0 or 1, got {}",
                other
            ))),
        }
    }
}

impl From<Label> for i64 {
    fn from(label: Label) -> Self {
        label as i64
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as i64)
    }
}

/// `match_label` when `pattern` matches anywhere in `text`, the other label otherwise
pub fn classify_single(text: &str, pattern: &Regex, match_label: Label) -> Label {
    if pattern.is_match(text) {
        match_label
    } else {
        match_label.flip()
    }
}

/// Positive only when positive matches strictly outnumber negative ones
pub fn classify_dual(text: &str, pattern_pos: &Regex, pattern_neg: &Regex) -> Label {
    let count_pos = pattern_pos.find_iter(text).count();
    let count_neg = pattern_neg.find_iter(text).count();

    if count_pos > count_neg {
        Label::Positive
    } else {
        Label::Negative
    }
}

pub enum RegexClassifier {
    Single { pattern: Regex, match_label: Label },
    Dual { positive: Regex, negative: Regex },
}

impl RegexClassifier {
    pub fn single(pattern: &str, match_label: Label) -> Result<Self> {
        Ok(RegexClassifier::Single {
            pattern: Regex::new(pattern)?,
            match_label,
        })
    }

    pub fn dual(positive: &str, negative: &str) -> Result<Self> {
        Ok(RegexClassifier::Dual {
            positive: Regex::new(positive)?,
            negative: Regex::new(negative)?,
        })
    }

    /// Dual classifier when a negative pattern is configured, single otherwise
    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        match &config.negative_pattern {
            Some(negative) => Self::dual(&config.positive_pattern, negative),
            None => Self::single(&config.positive_pattern, Label::try_from(config.match_label)?),
        }
    }

    /// Every baseline the config describes: the single-pattern classifier, plus
    /// the dual one when a negative pattern is set
    pub fn baselines(config: &ClassifierConfig) -> Result<Vec<Self>> {
        let match_label = Label::try_from(config.match_label)?;
        let mut baselines = vec![Self::single(&config.positive_pattern, match_label)?];
        if let Some(negative) = &config.negative_pattern {
            baselines.push(Self::dual(&config.positive_pattern, negative)?);
        }
        Ok(baselines)
    }

    pub fn name(&self) -> &'static str {
        match self {
            RegexClassifier::Single { .. } => "Regex (single pattern)",
            RegexClassifier::Dual { .. } => "Regex (positive vs negative)",
        }
    }

    pub fn classify(&self, text: &str) -> Label {
        match self {
            RegexClassifier::Single { pattern, match_label } => {
                classify_single(text, pattern, *match_label)
            }
            RegexClassifier::Dual { positive, negative } => classify_dual(text, positive, negative),
        }
    }

    pub fn classify_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Label> {
        texts.iter().map(|text| self.classify(text.as_ref())).collect()
    }
}
