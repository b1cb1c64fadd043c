// ============================================================
// CSV SOURCE
// ============================================================
// Fetch the reference dataset from a URL or a local file, never cached

use crate::domain::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use std::path::PathBuf;

/// Something that can hand over the raw bytes of the reference CSV.
#[async_trait]
pub trait CsvSource {
    async fn fetch(&self) -> Result<Vec<u8>>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// Where the reference dataset lives, as written in configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceLocation {
    Url(url::Url),
    File(PathBuf),
}

impl SourceLocation {
    /// `http://` and `https://` locations are fetched over the network,
    /// everything else is a filesystem path.
    pub fn parse(location: &str) -> Result<Self> {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            let url = url::Url::parse(trimmed)
                .map_err(|e| AppError::ConfigError(format!("Invalid options URL: {}", e)))?;
            Ok(SourceLocation::Url(url))
        } else {
            Ok(SourceLocation::File(PathBuf::from(trimmed)))
        }
    }
}

pub struct HttpCsvSource {
    client: reqwest::Client,
    url: url::Url,
}

impl HttpCsvSource {
    pub fn new(client: reqwest::Client, url: url::Url) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl CsvSource for HttpCsvSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(self.url.clone())
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| AppError::LoadError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::LoadError(format!(
                "Failed to load CSV ({})",
                response.status().as_u16()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::LoadError(format!("Failed to read CSV body: {}", e)))?;

        Ok(bytes.to_vec())
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

pub struct FileCsvSource {
    path: PathBuf,
}

impl FileCsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CsvSource for FileCsvSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path).await.map_err(|e| {
            AppError::LoadError(format!(
                "Failed to load CSV ({}): {}",
                self.path.display(),
                e
            ))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Build the source for a configured location.
pub fn source_for(
    location: &SourceLocation,
    client: reqwest::Client,
) -> Box<dyn CsvSource + Send + Sync> {
    match location {
        SourceLocation::Url(url) => Box::new(HttpCsvSource::new(client, url.clone())),
        SourceLocation::File(path) => Box::new(FileCsvSource::new(path.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_location() {
        assert!(matches!(
            SourceLocation::parse("https://example.org/data/odisha-crop-data.csv").unwrap(),
            SourceLocation::Url(_)
        ));
        assert_eq!(
            SourceLocation::parse("data/odisha-crop-data.csv").unwrap(),
            SourceLocation::File(PathBuf::from("data/odisha-crop-data.csv"))
        );
    }

    #[tokio::test]
    async fn test_file_source_reads_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Crop,District,Soil\nRice,Puri,RED SOIL\n").unwrap();

        let source = FileCsvSource::new(file.path());
        let bytes = source.fetch().await.unwrap();
        assert!(bytes.starts_with(b"Crop,District,Soil"));
    }

    #[tokio::test]
    async fn test_missing_file_is_load_error() {
        let source = FileCsvSource::new("/nonexistent/odisha-crop-data.csv");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, AppError::LoadError(_)));
    }
}
