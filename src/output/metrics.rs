//! Classification metrics collected per method

use crate::error::{Result, TextBaselinesError};
use colored::{Color, Colorize};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// How per-class precision/recall/F1 are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Average {
    #[default]
    Macro,
    Micro,
    Weighted,
}

impl FromStr for Average {
    type Err = TextBaselinesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "macro" => Ok(Average::Macro),
            "micro" => Ok(Average::Micro),
            "weighted" => Ok(Average::Weighted),
            _ => Err(TextBaselinesError::invalid_argument(format!(
                "average must be one of 'macro', 'micro', 'weighted', got '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Average::Macro => write!(f, "macro"),
            Average::Micro => write!(f, "micro"),
            Average::Weighted => write!(f, "weighted"),
        }
    }
}

/// Scores in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MethodScores {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl MethodScores {
    pub const NAMES: [&'static str; 4] = ["Accuracy", "Precision", "Recall", "F1 Score"];

    pub fn values(&self) -> [f64; 4] {
        [self.accuracy, self.precision, self.recall, self.f1]
    }

    pub fn compute<L: Copy + Ord + Hash>(
        y_true: &[L],
        y_pred: &[L],
        average: Average,
    ) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            return Err(TextBaselinesError::invalid_argument(format!(
                "{} true labels but {} predictions",
                y_true.len(),
                y_pred.len()
            )));
        }
        if y_true.is_empty() {
            return Err(TextBaselinesError::invalid_argument("cannot score empty label sequences"));
        }

        let n = y_true.len() as f64;
        let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();

        let classes: BTreeSet<L> = y_true.iter().chain(y_pred).copied().collect();
        let mut counts: HashMap<L, ClassCounts> =
            classes.iter().map(|&c| (c, ClassCounts::default())).collect();
        for (&t, &p) in y_true.iter().zip(y_pred) {
            if t == p {
                counts.entry(t).or_default().tp += 1;
            } else {
                counts.entry(p).or_default().fp += 1;
                counts.entry(t).or_default().fn_ += 1;
            }
        }

        let (precision, recall, f1) = match average {
            Average::Micro => {
                let total = counts.values().fold(ClassCounts::default(), |acc, c| acc + *c);
                (total.precision(), total.recall(), total.f1())
            }
            Average::Macro => {
                let k = classes.len() as f64;
                let (p, r, f) = counts.values().fold((0.0, 0.0, 0.0), |(p, r, f), c| {
                    (p + c.precision(), r + c.recall(), f + c.f1())
                });
                (p / k, r / k, f / k)
            }
            Average::Weighted => {
                let (p, r, f) = counts.values().fold((0.0, 0.0, 0.0), |(p, r, f), c| {
                    let support = c.support() as f64;
                    (
                        p + support * c.precision(),
                        r + support * c.recall(),
                        f + support * c.f1(),
                    )
                });
                (p / n, r / n, f / n)
            }
        };

        Ok(Self {
            accuracy: correct as f64 / n * 100.0,
            precision: precision * 100.0,
            recall: recall * 100.0,
            f1: f1 * 100.0,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ClassCounts {
    tp: usize,
    fp: usize,
    fn_: usize,
}

impl std::ops::Add for ClassCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            tp: self.tp + other.tp,
            fp: self.fp + other.fp,
            fn_: self.fn_ + other.fn_,
        }
    }
}

// A zero denominator scores 0.
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl ClassCounts {
    fn support(&self) -> usize {
        self.tp + self.fn_
    }

    fn precision(&self) -> f64 {
        ratio(self.tp, self.tp + self.fp)
    }

    fn recall(&self) -> f64 {
        ratio(self.tp, self.tp + self.fn_)
    }

    fn f1(&self) -> f64 {
        ratio(2 * self.tp, 2 * self.tp + self.fp + self.fn_)
    }
}

/// Scores for several methods, kept in the order they were first run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metrics {
    results: Vec<(String, MethodScores)>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score `y_pred` against `y_true` and store it under `method_name`
    pub fn run<L: Copy + Ord + Hash>(
        &mut self,
        y_true: &[L],
        y_pred: &[L],
        method_name: &str,
        average: Average,
    ) -> Result<MethodScores> {
        let scores = MethodScores::compute(y_true, y_pred, average)?;

        match self.results.iter_mut().find(|(name, _)| name == method_name) {
            Some((_, existing)) => *existing = scores,
            None => self.results.push((method_name.to_string(), scores)),
        }

        info!("Metrics calculated for: {}", method_name);
        Ok(scores)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, method_name: &str) -> Option<&MethodScores> {
        self.results
            .iter()
            .find(|(name, _)| name == method_name)
            .map(|(_, scores)| scores)
    }

    pub fn results(&self) -> &[(String, MethodScores)] {
        &self.results
    }

    /// One block per method with every score to two decimals
    pub fn render_table(&self, use_colors: bool) -> String {
        if self.results.is_empty() {
            return "No metrics data to display. Use the .run() method first.".to_string();
        }

        let rule = "=".repeat(40);
        let mut output = String::new();
        for (method, scores) in &self.results {
            let title = format!("Metrics for {}", method);
            output.push_str(&format!("\n{}\n", rule));
            if use_colors {
                output.push_str(&format!("{}\n", title.color(Color::Blue).bold()));
            } else {
                output.push_str(&format!("{}\n", title));
            }
            output.push_str(&format!("{}\n", rule));

            for (name, value) in MethodScores::NAMES.iter().zip(scores.values()) {
                let value = format!("{:.2}%", value);
                let value = if use_colors {
                    value.color(Self::score_color(scores.f1)).to_string()
                } else {
                    value
                };
                output.push_str(&format!("\n{}: {}\n", name, value));
            }
        }
        output
    }

    fn score_color(score: f64) -> Color {
        match score {
            s if s >= 80.0 => Color::Green,
            s if s >= 60.0 => Color::Yellow,
            _ => Color::Red,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_perfect_predictions() {
        let labels = [1, 0, 1, 1];
        let scores = MethodScores::compute(&labels, &labels, Average::Macro).unwrap();
        assert_eq!(scores.values(), [100.0; 4]);
    }

    #[test]
    fn test_binary_macro_scores() {
        // class 1: tp=2 fp=1 fn=1, class 0: tp=1 fp=1 fn=1
        let y_true = [1, 1, 1, 0, 0];
        let y_pred = [1, 1, 0, 1, 0];
        let scores = MethodScores::compute(&y_true, &y_pred, Average::Macro).unwrap();

        assert!(close(scores.accuracy, 60.0));
        assert!(close(scores.precision, (2.0 / 3.0 + 0.5) / 2.0 * 100.0));
        assert!(close(scores.recall, (2.0 / 3.0 + 0.5) / 2.0 * 100.0));
    }

    #[test]
    fn test_micro_equals_accuracy_for_single_label() {
        let y_true = [2, 0, 1, 1, 0];
        let y_pred = [2, 1, 1, 0, 0];
        let scores = MethodScores::compute(&y_true, &y_pred, Average::Micro).unwrap();

        assert!(close(scores.precision, scores.accuracy));
        assert!(close(scores.recall, scores.accuracy));
        assert!(close(scores.f1, scores.accuracy));
    }

    #[test]
    fn test_weighted_uses_support() {
        // class 0 (support 3) perfect recall, class 1 (support 1) missed
        let y_true = [0, 0, 0, 1];
        let y_pred = [0, 0, 0, 0];
        let scores = MethodScores::compute(&y_true, &y_pred, Average::Weighted).unwrap();

        assert!(close(scores.recall, 75.0));
        assert!(close(scores.precision, 0.75 * 75.0));
    }

    #[test]
    fn test_class_never_predicted_scores_zero_not_nan() {
        let y_true = [1, 1];
        let y_pred = [0, 0];
        let scores = MethodScores::compute(&y_true, &y_pred, Average::Macro).unwrap();
        assert_eq!(scores.values(), [0.0; 4]);
    }

    #[test]
    fn test_length_mismatch_and_empty_rejected() {
        assert!(MethodScores::compute(&[1, 0], &[1], Average::Macro).is_err());
        assert!(MethodScores::compute::<i32>(&[], &[], Average::Macro).is_err());
    }

    #[test]
    fn test_average_parsing() {
        assert_eq!("Weighted".parse::<Average>().unwrap(), Average::Weighted);
        assert!(matches!(
            "binary".parse::<Average>(),
            Err(TextBaselinesError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rerun_replaces_in_place() {
        let mut metrics = Metrics::new();
        metrics.run(&[1, 0], &[1, 0], "regex", Average::Macro).unwrap();
        metrics.run(&[1, 0], &[0, 0], "embeddings", Average::Macro).unwrap();
        metrics.run(&[1, 0], &[0, 1], "regex", Average::Macro).unwrap();

        let names: Vec<&str> = metrics.results().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["regex", "embeddings"]);
        assert_eq!(metrics.get("regex").unwrap().accuracy, 0.0);
    }

    #[test]
    fn test_render_table() {
        let mut metrics = Metrics::new();
        assert!(metrics.render_table(false).starts_with("No metrics data"));

        metrics.run(&[1, 0, 1, 0], &[1, 0, 0, 0], "regex", Average::Macro).unwrap();
        let table = metrics.render_table(false);
        assert!(table.contains("Metrics for regex"));
        assert!(table.contains("Accuracy: 75.00%"));
        assert!(table.contains("F1 Score:"));
    }
}
