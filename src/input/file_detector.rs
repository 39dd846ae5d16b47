//! File type detection

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Json,
    Text,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "json" => FileType::Json,
            "txt" | "text" => FileType::Text,
            _ => FileType::Unknown,
        }
    }
}
