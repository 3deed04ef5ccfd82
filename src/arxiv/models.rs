// src/arxiv/models.rs
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const E_PRINT_BASE_URL: &str = "https://arxiv.org/e-print";

/// A paper identifier as accepted by arXiv, e.g. `2010.11645` or `hep-th/9901001`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArxivId(String);

impl ArxivId {
    /// Trims the input and rejects empty ids or ids with inner whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let id = raw.trim();
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            return None;
        }
        Some(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Source archive endpoint for this paper.
    pub fn e_print_url(&self) -> String {
        format!("{}/{}", E_PRINT_BASE_URL, self.0)
    }

    /// Local file name; old-style ids carry a `/` that cannot go into a file name.
    pub fn archive_file_name(&self) -> String {
        format!("{}.tar.gz", self.0.replace('/', "_"))
    }
}

/// Sidecar metadata written next to a downloaded archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveInfo {
    pub arxiv_id: String,
    pub url: String,
    pub path: PathBuf,
    pub size_bytes: usize,
    pub downloaded_at: String, // RFC 3339
}
