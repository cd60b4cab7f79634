//! # Catalog Source
//!
//! Fetches catalog bytes once, from a local file or an `http(s)://` URL.
//!
//! There is no retry and no refresh. A failed fetch is reported as
//! [`SiftError::CatalogUnavailable`]; callers decide whether that is fatal.

use serde_json::Value;
use sift_core::{Catalog, Profile, SiftError, parse_records};
use std::fmt;
use std::path::{Path, PathBuf};

/// Maximum catalog size (100 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
const MAX_CATALOG_SIZE: u64 = 100 * 1024 * 1024;

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Http(String),
}

impl CatalogSource {
    /// Classify a `--catalog` argument.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let lower = value.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Http(value.to_string())
        } else {
            Self::File(PathBuf::from(value))
        }
    }

    /// Fetch the raw catalog bytes.
    pub async fn fetch(&self) -> Result<Vec<u8>, SiftError> {
        match self {
            Self::File(path) => read_file(path).await,
            Self::Http(url) => fetch_http(url).await,
        }
    }

    /// Fetch and split into raw records. Malformed documents yield no records.
    pub async fn records(&self) -> Result<Vec<Value>, SiftError> {
        Ok(parse_records(&self.fetch().await?))
    }

    /// Fetch, normalize and index the catalog for `profile`.
    pub async fn load(&self, profile: &Profile) -> Result<Catalog, SiftError> {
        let catalog = Catalog::from_records(&self.records().await?, profile);
        tracing::info!(
            "Loaded {} {} item(s) from {}",
            catalog.len(),
            profile.name,
            self
        );
        Ok(catalog)
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Http(url) => f.write_str(url),
        }
    }
}

// =============================================================================
// FILE SOURCE
// =============================================================================

/// Validate file path for security.
///
/// Canonicalizes the path (resolving symlinks and "..") and requires a
/// regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, SiftError> {
    let canonical = path.canonicalize().map_err(|e| {
        SiftError::CatalogUnavailable(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(SiftError::CatalogUnavailable(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), SiftError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| SiftError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(SiftError::CatalogUnavailable(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

async fn read_file(path: &Path) -> Result<Vec<u8>, SiftError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_CATALOG_SIZE)?;

    tokio::fs::read(&validated)
        .await
        .map_err(|e| SiftError::CatalogUnavailable(format!("Read file: {}", e)))
}

// =============================================================================
// HTTP SOURCE
// =============================================================================

async fn fetch_http(url: &str) -> Result<Vec<u8>, SiftError> {
    let response = reqwest::Client::new()
        .get(url)
        .header(reqwest::header::CACHE_CONTROL, "no-store")
        .send()
        .await
        .map_err(|e| SiftError::CatalogUnavailable(format!("Cannot fetch {}: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SiftError::CatalogUnavailable(format!(
            "HTTP {}",
            status.as_u16()
        )));
    }

    if response
        .content_length()
        .is_some_and(|len| len > MAX_CATALOG_SIZE)
    {
        return Err(SiftError::CatalogUnavailable(format!(
            "Response exceeds maximum allowed {} bytes",
            MAX_CATALOG_SIZE
        )));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| SiftError::CatalogUnavailable(format!("Read body: {}", e)))?;
    if body.len() as u64 > MAX_CATALOG_SIZE {
        return Err(SiftError::CatalogUnavailable(format!(
            "Response exceeds maximum allowed {} bytes",
            MAX_CATALOG_SIZE
        )));
    }
    Ok(body.to_vec())
}

// =============================================================================
// TESTS
// =============================================================================
