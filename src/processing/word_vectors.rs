//! Word-vector lookup
//!
//! [`WordVectors`] is the narrow view the document embedders need from a
//! pretrained embedding model. [`KeyedVectors`] is an in-memory implementation
//! that reads and writes the word2vec text format:
//!
//! ```text
//! 2 3
//! cat 0.1 0.2 0.3
//! dog 0.4 0.5 0.6
//! ```

use crate::error::{Result, TextBaselinesError};
use log::info;
use ndarray::{Array2, ArrayView1};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub trait WordVectors {
    /// Vector for `token`, or `None` when the model has no entry.
    fn get(&self, token: &str) -> Option<ArrayView1<'_, f32>>;

    fn dimension(&self) -> usize;

    fn contains(&self, token: &str) -> bool {
        self.get(token).is_some()
    }
}

#[derive(Debug, Clone)]
pub struct KeyedVectors {
    word_index: HashMap<String, usize>,
    words: Vec<String>,
    vectors: Array2<f32>,
}

impl KeyedVectors {
    /// Build from row-aligned words and vectors. Later duplicates shadow earlier rows.
    pub fn new(words: Vec<String>, vectors: Array2<f32>) -> Result<Self> {
        if words.len() != vectors.nrows() {
            return Err(TextBaselinesError::invalid_argument(format!(
                "{} words but {} vector rows",
                words.len(),
                vectors.nrows()
            )));
        }

        let word_index = words
            .iter()
            .enumerate()
            .map(|(idx, word)| (word.clone(), idx))
            .collect();

        Ok(Self {
            word_index,
            words,
            vectors,
        })
    }

    pub fn from_pairs<I, S>(pairs: I, dimension: usize) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let mut words = Vec::new();
        let mut data = Vec::new();

        for (word, vector) in pairs {
            let word = word.into();
            if vector.len() != dimension {
                return Err(TextBaselinesError::invalid_argument(format!(
                    "vector for '{}' has {} components, expected {}",
                    word,
                    vector.len(),
                    dimension
                )));
            }
            words.push(word);
            data.extend(vector);
        }

        let vectors = Array2::from_shape_vec((words.len(), dimension), data)
            .map_err(|e| TextBaselinesError::invalid_argument(e.to_string()))?;
        Self::new(words, vectors)
    }

    /// Load vectors stored in the word2vec text format
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        let header = lines
            .next()
            .ok_or_else(|| TextBaselinesError::Parse(format!("{}: empty file", path.display())))??;
        let parts: Vec<&str> = header.split_whitespace().collect();
        if parts.len() != 2 {
            return Err(TextBaselinesError::Parse(format!(
                "{}: header must be '<count> <dimension>', got '{}'",
                path.display(),
                header
            )));
        }
        let count: usize = parts[0]
            .parse()
            .map_err(|_| {
                TextBaselinesError::Parse(format!("invalid vocabulary size '{}'", parts[0]))
            })?;
        let dim: usize = parts[1]
            .parse()
            .map_err(|_| TextBaselinesError::Parse(format!("invalid dimension '{}'", parts[1])))?;

        if count.checked_mul(dim).is_none() {
            return Err(TextBaselinesError::Parse(format!(
                "{}: header size {} x {} is too large",
                path.display(),
                count,
                dim
            )));
        }

        // Sized from the rows actually read, not from the header.
        let mut words = Vec::new();
        let mut data = Vec::new();

        for (line_no, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let word = fields.next().unwrap_or_default().to_string();
            let values = fields
                .map(|v| v.parse::<f32>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| {
                    TextBaselinesError::Parse(format!("line {}: {}", line_no + 2, e))
                })?;
            if values.len() != dim {
                return Err(TextBaselinesError::Parse(format!(
                    "line {}: '{}' has {} components, expected {}",
                    line_no + 2,
                    word,
                    values.len(),
                    dim
                )));
            }
            words.push(word);
            data.extend(values);
        }

        if words.len() != count {
            return Err(TextBaselinesError::Parse(format!(
                "{}: header announces {} words, found {}",
                path.display(),
                count,
                words.len()
            )));
        }

        let vectors = Array2::from_shape_vec((count, dim), data)
            .map_err(|e| TextBaselinesError::Parse(e.to_string()))?;
        info!("Loaded {} word vectors of dimension {} from {}", count, dim, path.display());
        Self::new(words, vectors)
    }

    /// Write vectors in the word2vec text format
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{} {}", self.words.len(), self.dimension())?;
        for (word, row) in self.words.iter().zip(self.vectors.rows()) {
            write!(writer, "{}", word)?;
            for value in row {
                write!(writer, " {}", value)?;
            }
            writeln!(writer)?;
        }
        writer.flush()?;

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_index(&self) -> &HashMap<String, usize> {
        &self.word_index
    }

    pub fn matrix(&self) -> &Array2<f32> {
        &self.vectors
    }
}

impl WordVectors for KeyedVectors {
    fn get(&self, token: &str) -> Option<ArrayView1<'_, f32>> {
        self.word_index.get(token).map(|&idx| self.vectors.row(idx))
    }

    fn dimension(&self) -> usize {
        self.vectors.ncols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_lookup() {
        let kv =
            KeyedVectors::from_pairs(vec![("cat", vec![1.0, 0.0]), ("dog", vec![3.0, 0.0])], 2)
                .unwrap();

        assert_eq!(kv.dimension(), 2);
        assert!(kv.contains("cat"));
        assert!(!kv.contains("bird"));
        assert_eq!(kv.get("dog").unwrap().to_vec(), vec![3.0, 0.0]);
    }

    #[test]
    fn test_wrong_width_rejected() {
        let err = KeyedVectors::from_pairs(vec![("cat", vec![1.0])], 2).unwrap_err();
        assert!(matches!(err, TextBaselinesError::InvalidArgument(_)));
    }

    #[test]
    fn test_save_and_load() {
        let kv = KeyedVectors::from_pairs(
            vec![("good", vec![0.5, -1.25, 2.0]), ("bad", vec![-0.5, 1.0, 0.0])],
            3,
        )
        .unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();

        kv.save(file.path()).unwrap();
        let loaded = KeyedVectors::load(file.path()).unwrap();

        assert_eq!(loaded.words(), kv.words());
        assert_eq!(loaded.matrix(), kv.matrix());
    }

    #[test]
    fn test_load_rejects_short_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1 3").unwrap();
        writeln!(file, "cat 0.1 0.2").unwrap();

        let err = KeyedVectors::load(file.path()).unwrap_err();
        assert!(matches!(err, TextBaselinesError::Parse(_)));
    }

    #[test]
    fn test_load_rejects_oversized_header() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "100000000000 100000000000").unwrap();
        writeln!(file, "cat 0.1 0.2").unwrap();

        let err = KeyedVectors::load(file.path()).unwrap_err();
        assert!(matches!(err, TextBaselinesError::Parse(_)));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{} 2", usize::MAX).unwrap();
        let err = KeyedVectors::load(file.path()).unwrap_err();
        assert!(matches!(err, TextBaselinesError::Parse(_)));
    }

    #[test]
    fn test_load_rejects_bad_header() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "three 3").unwrap();

        let err = KeyedVectors::load(file.path()).unwrap_err();
        assert!(matches!(err, TextBaselinesError::Parse(_)));
    }
}
