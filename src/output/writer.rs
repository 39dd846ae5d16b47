//! JSON result files

use crate::error::Result;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsOutput {
    pub method: String,
    pub dimension: usize,
    pub embeddings: Vec<Vec<f32>>,
}

impl EmbeddingsOutput {
    pub fn new(method: &str, matrix: &Array2<f32>) -> Self {
        Self {
            method: method.to_string(),
            dimension: matrix.ncols(),
            embeddings: matrix.rows().into_iter().map(|row| row.to_vec()).collect(),
        }
    }
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

pub fn save_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}
