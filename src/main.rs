//! text-baselines: preprocessing, embeddings and baseline classifiers from the command line

use anyhow::{bail, Context};
use clap::Parser;
use log::{error, info};
use std::collections::HashSet;
use std::path::Path;
use std::process;
use text_baselines::cli::{self, Cli, Commands, ConfigAction};
use text_baselines::input::manager::InputManager;
use text_baselines::output::writer::{save_to_file, to_json, EmbeddingsOutput};
use text_baselines::processing::lemmatize::{lemmatize, LookupLemmatizer};
use text_baselines::processing::{stem, stopwords};
use text_baselines::{
    analyze_drift, embed_mean, embed_tfidf_weighted, normalize_as, Average, Config, KeyedVectors,
    Metrics, OutputType, RegexClassifier, TfidfVectorizer,
};

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config) {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_stopwords(config: &Config, remove: bool) -> anyhow::Result<Option<HashSet<String>>> {
    if !remove {
        return Ok(None);
    }
    match &config.preprocessing.stopwords_file {
        Some(path) => {
            let words = stopwords::load(path)
                .with_context(|| format!("reading stopwords from {}", path.display()))?;
            Ok(Some(words))
        }
        None => Ok(Some(stopwords::english())),
    }
}

fn load_vectors(path: &Path) -> anyhow::Result<KeyedVectors> {
    cli::validate_file_extension(path, &["txt", "vec"]).map_err(anyhow::Error::msg)?;
    KeyedVectors::load(path)
        .with_context(|| format!("loading word vectors from {}", path.display()))
}

fn run_command(command: Commands, config: Config) -> anyhow::Result<()> {
    match command {
        Commands::Normalize {
            text,
            remove_stopwords,
            output,
        } => {
            let remove = remove_stopwords.unwrap_or(config.preprocessing.remove_stopwords);
            let output_type: OutputType = match output {
                Some(output) => output.parse()?,
                None => config.output_type()?,
            };
            let stopwords = load_stopwords(&config, remove)?;

            let normalized = normalize_as(&text, remove, stopwords.as_ref(), output_type)?;
            println!("{}", normalized);
        }

        Commands::Stem { text } => {
            println!("{}", stem::stem(&text));
        }

        Commands::Lemmatize { text, dictionary } => {
            let lemmatizer = match dictionary {
                Some(path) => LookupLemmatizer::from_file(&path)
                    .with_context(|| format!("loading lemma dictionary {}", path.display()))?,
                None => LookupLemmatizer::new(),
            };
            info!("Lemmatizing with {} dictionary entries", lemmatizer.len());
            println!("{}", lemmatize(&text, &lemmatizer));
        }

        Commands::Embed {
            vectors,
            input,
            weighted,
            remove_stopwords,
            save,
        } => {
            let remove = remove_stopwords.unwrap_or(config.preprocessing.remove_stopwords);
            let stopwords = load_stopwords(&config, remove)?;
            let vectors = load_vectors(&vectors)?;
            let documents = InputManager::new().load_documents(&input)?;

            let (method, embeddings) = if weighted {
                // The vocabulary is learned from the same normalized text the embedder feeds it.
                let corpus = documents
                    .iter()
                    .map(|doc| {
                        normalize_as(doc, remove, stopwords.as_ref(), OutputType::String)
                            .map(|n| n.to_string())
                    })
                    .collect::<text_baselines::Result<Vec<_>>>()?;
                let mut tfidf = TfidfVectorizer::new();
                tfidf.fit(&corpus)?;
                let embeddings = embed_tfidf_weighted(
                    &documents,
                    &vectors,
                    &tfidf,
                    remove,
                    stopwords.as_ref(),
                )?;
                ("tfidf-weighted", embeddings)
            } else {
                ("mean", embed_mean(&documents, &vectors, remove, stopwords.as_ref())?)
            };

            println!(
                "Built {} {} embeddings of dimension {}",
                embeddings.nrows(),
                method,
                embeddings.ncols()
            );

            let json = to_json(&EmbeddingsOutput::new(method, &embeddings), true)?;
            match save {
                Some(path) => {
                    save_to_file(&json, &path)?;
                    println!("Saved embeddings to {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Classify {
            input,
            labels,
            average,
            plot,
        } => {
            let average: Average = match average {
                Some(average) => average.parse()?,
                None => config.average()?,
            };

            let mut manager = InputManager::new();
            let documents = manager.load_documents(&input)?;

            let Some(labels) = labels else {
                let classifier = RegexClassifier::from_config(&config.classifier)?;
                for label in classifier.classify_all(&documents) {
                    println!("{}", label);
                }
                return Ok(());
            };

            let truth = manager.load_labels(&labels)?;
            if truth.len() != documents.len() {
                bail!("{} documents but {} labels", documents.len(), truth.len());
            }

            let mut metrics = Metrics::new();
            for baseline in RegexClassifier::baselines(&config.classifier)? {
                let predictions = baseline.classify_all(&documents);
                metrics.run(&truth, &predictions, baseline.name(), average)?;
            }
            println!("{}", metrics.render_table(config.metrics.color_output));

            if plot && metrics.plot(&config.metrics.plot_path)? {
                println!("Saved chart to {}", config.metrics.plot_path.display());
            }
        }

        Commands::Drift {
            original,
            tuned,
            vocab_size,
            save,
        } => {
            let original = load_vectors(&original)?;
            let tuned = load_vectors(&tuned)?;
            if original.words() != tuned.words() {
                bail!("original and tuned vectors must list the same words in the same order");
            }

            let vocab_size = vocab_size.unwrap_or(original.len());
            let report = analyze_drift(
                original.matrix().view(),
                tuned.matrix().view(),
                original.word_index(),
                vocab_size,
            )?;

            let summary = report.summary();
            println!("Words with embeddings: {}", summary.valid_count);
            for (name, stats) in [
                ("Cosine similarity", summary.similarity),
                ("Euclidean distance", summary.distance),
                ("Relative change", summary.relative_change),
            ] {
                if let Some(stats) = stats {
                    println!(
                        "  {}: mean {:.4}, min {:.4}, max {:.4}",
                        name, stats.mean, stats.min, stats.max
                    );
                }
            }

            if let Some(path) = save {
                save_to_file(&to_json(&report, true)?, &path)?;
                println!("Saved drift report to {}", path.display());
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("{}", toml::to_string_pretty(&config)?);
            }
            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
            Some(ConfigAction::Reset) => {
                Config::default().save()?;
                println!("Configuration reset to defaults at {}", Config::config_path().display());
            }
        },
    }

    Ok(())
}
