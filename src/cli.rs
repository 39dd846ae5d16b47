//! CLI interface for text baselines

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "text-baselines")]
#[command(about = "Text preprocessing, document embeddings and baseline classifiers")]
#[command(long_about = "Normalize text, build mean or TF-IDF weighted word-vector embeddings, run regex baselines and compare classification metrics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lowercase and tokenize text
    Normalize {
        /// Text to normalize
        #[arg(short, long)]
        text: String,

        /// Drop stopwords (overrides the configured default)
        #[arg(long)]
        remove_stopwords: Option<bool>,

        /// Output type: list, string
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Stem a normalized, space-separated string
    Stem {
        #[arg(short, long)]
        text: String,
    },

    /// Lemmatize a normalized, space-separated string
    Lemmatize {
        #[arg(short, long)]
        text: String,

        /// Tab-separated form/lemma dictionary
        #[arg(short, long)]
        dictionary: Option<PathBuf>,
    },

    /// Build one embedding per document
    Embed {
        /// Word vectors in word2vec text format
        #[arg(long)]
        vectors: PathBuf,

        /// Documents (JSON array of strings, or TXT with one per line)
        #[arg(short, long)]
        input: PathBuf,

        /// Weight word vectors by TF-IDF fitted on the input documents
        #[arg(short, long)]
        weighted: bool,

        /// Drop stopwords (overrides the configured default)
        #[arg(long)]
        remove_stopwords: Option<bool>,

        /// Save embeddings as JSON
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Classify documents with the configured regex patterns
    Classify {
        /// Documents (JSON array of strings, or TXT with one per line)
        #[arg(short, long)]
        input: PathBuf,

        /// True labels (JSON array of 0/1, or TXT with one per line) to score against
        #[arg(short, long)]
        labels: Option<PathBuf>,

        /// Averaging mode: macro, micro, weighted
        #[arg(short, long)]
        average: Option<String>,

        /// Also write the metrics chart
        #[arg(long)]
        plot: bool,
    },

    /// Measure how far tuned word vectors moved from the originals
    Drift {
        /// Original vectors in word2vec text format
        #[arg(long)]
        original: PathBuf,

        /// Tuned vectors in word2vec text format, same row order
        #[arg(long)]
        tuned: PathBuf,

        /// Only consider the first N rows
        #[arg(long)]
        vocab_size: Option<usize>,

        /// Save the full report as JSON
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the default configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_embed() {
        let cli = Cli::parse_from([
            "text-baselines",
            "embed",
            "--vectors",
            "w2v.txt",
            "--input",
            "docs.json",
            "--weighted",
            "--remove-stopwords",
            "false",
        ]);
        match cli.command {
            Commands::Embed { weighted, remove_stopwords, save, .. } => {
                assert!(weighted);
                assert_eq!(remove_stopwords, Some(false));
                assert!(save.is_none());
            }
            _ => panic!("expected embed command"),
        }
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("vectors.TXT"), &["txt", "vec"]).is_ok());
        assert!(validate_file_extension(Path::new("vectors.bin"), &["txt", "vec"]).is_err());
        assert!(validate_file_extension(Path::new("vectors"), &["txt"]).is_err());
    }
}
