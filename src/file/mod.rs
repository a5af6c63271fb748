// src/file/mod.rs
use anyhow::{Result, Context};
use std::path::Path;
use std::fs;

pub mod report;

pub use report::{AnalysisReport, ReportFileHandler};

// Core trait for file operations
pub trait FileHandler<T> {
    fn load(&self, path: &Path) -> Result<T>;
    fn save(&self, data: &T, path: &Path) -> Result<()>;
}

/// Writes the annotated image exactly as the backend served it.
pub fn save_annotated_image(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, bytes)
        .with_context(|| format!("Failed to save annotated image to {}", path.display()))
}

/// Suggested file name for the annotated image, taken from the download path.
pub fn annotated_file_name(download_url: &str) -> String {
    download_url
        .split(['?', '#'])
        .next()
        .and_then(|path| path.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "annotated.jpg".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotated_file_name() {
        assert_eq!(annotated_file_name("/download/result_42.jpg"), "result_42.jpg");
        assert_eq!(annotated_file_name("/download/result.png?ts=1"), "result.png");
        assert_eq!(annotated_file_name("/download/"), "annotated.jpg");
        assert_eq!(annotated_file_name(""), "annotated.jpg");
    }

    #[test]
    fn test_save_annotated_image_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exports").join("roof.jpg");
        save_annotated_image(b"jpeg-bytes", &path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"jpeg-bytes");
    }
}
