//! Input manager for document and label files

use crate::error::{Result, TextBaselinesError};
use crate::input::documents::{labels_from_json, texts_from_json};
use crate::input::file_detector::FileType;
use crate::processing::regex_classifier::Label;
use log::info;
use std::collections::HashMap;
use std::path::Path;

/// Reads JSON arrays or plain text (one entry per non-empty line)
pub struct InputManager {
    cache: HashMap<String, String>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    pub fn load_documents(&mut self, path: &Path) -> Result<Vec<String>> {
        let (file_type, content) = self.read(path)?;
        let documents = match file_type {
            FileType::Json => texts_from_json(&serde_json::from_str(&content)?)?,
            _ => Self::lines(&content).map(String::from).collect(),
        };
        info!("Loaded {} documents from {}", documents.len(), path.display());
        Ok(documents)
    }

    pub fn load_labels(&mut self, path: &Path) -> Result<Vec<Label>> {
        let (file_type, content) = self.read(path)?;
        match file_type {
            FileType::Json => labels_from_json(&serde_json::from_str(&content)?),
            _ => Self::lines(&content)
                .map(|line| {
                    let value: i64 = line.trim().parse().map_err(|_| {
                        TextBaselinesError::Parse(format!(
                            "invalid label '{}' in {}",
                            line,
                            path.display()
                        ))
                    })?;
                    Label::try_from(value)
                })
                .collect(),
        }
    }

    fn lines(content: &str) -> impl Iterator<Item = &str> {
        content.lines().filter(|line| !line.trim().is_empty())
    }

    fn read(&mut self, path: &Path) -> Result<(FileType, String)> {
        let file_type = self.detect_file_type(path)?;
        if file_type == FileType::Unknown {
            return Err(TextBaselinesError::invalid_argument(format!(
                "Unsupported file type for: {} (expected .json or .txt)",
                path.display()
            )));
        }

        let path_str = path.to_string_lossy().to_string();
        if let Some(cached) = self.cache.get(&path_str) {
            info!("Using cached contents for: {}", path.display());
            return Ok((file_type, cached.clone()));
        }

        if !path.exists() {
            return Err(TextBaselinesError::invalid_argument(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        self.cache.insert(path_str, content.clone());
        Ok((file_type, content))
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                TextBaselinesError::invalid_argument(format!(
                    "File has no extension: {}",
                    path.display()
                ))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
