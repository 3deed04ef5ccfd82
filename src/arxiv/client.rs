// src/arxiv/client.rs
use std::fs;
use std::path::Path;

use reqwest::header;

use crate::arxiv::models::{ArchiveInfo, ArxivId};
use crate::utils::error::ArxivError;

// arXiv asks automated clients to identify themselves.
const ARXIV_USER_AGENT: &str = concat!("tex_extractor/", env!("CARGO_PKG_VERSION"));

/// Creates a reqwest client configured for arXiv downloads.
fn build_arxiv_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(ARXIV_USER_AGENT)
        .build()
}

/// Fetches the raw e-print body for `id`.
pub async fn fetch_e_print(id: &ArxivId) -> Result<Vec<u8>, ArxivError> {
    let client = build_arxiv_client()?;
    let url = id.e_print_url();

    tracing::info!("Downloading source archive from: {}", url);

    let response = client
        .get(&url)
        .header(header::ACCEPT, "application/gzip,application/x-eprint-tar,*/*")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ArxivError::NotFound(id.as_str().to_string()));
        }
        return Err(ArxivError::Http(status));
    }

    let body = response.bytes().await?;
    tracing::debug!("Downloaded {} bytes from {}", body.len(), url);
    Ok(body.to_vec())
}

/// Saves an archive body plus its `.meta.json` sidecar under `dest_dir`.
pub fn save_archive(id: &ArxivId, body: &[u8], dest_dir: &Path) -> Result<ArchiveInfo, ArxivError> {
    if !dest_dir.exists() {
        fs::create_dir_all(dest_dir)?;
    }

    let path = dest_dir.join(id.archive_file_name());
    fs::write(&path, body)?;

    let info = ArchiveInfo {
        arxiv_id: id.as_str().to_string(),
        url: id.e_print_url(),
        path: path.clone(),
        size_bytes: body.len(),
        downloaded_at: chrono::Utc::now().to_rfc3339(),
    };

    let meta_path = dest_dir.join(format!("{}.meta.json", id.archive_file_name()));
    fs::write(&meta_path, serde_json::to_string_pretty(&info)?)?;

    tracing::info!("Saved archive to {} ({} bytes)", path.display(), info.size_bytes);
    Ok(info)
}

/// Downloads the source archive of `raw_id` into `dest_dir`.
pub async fn download_source(raw_id: &str, dest_dir: &Path) -> Result<ArchiveInfo, ArxivError> {
    let id = ArxivId::parse(raw_id).ok_or_else(|| ArxivError::InvalidId(raw_id.to_string()))?;
    let body = fetch_e_print(&id).await?;
    save_archive(&id, &body, dest_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saves_archive_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("downloads");
        let id = ArxivId::parse("2010.11644").unwrap();

        let info = save_archive(&id, b"\x1f\x8bfake", &dest).unwrap();

        assert_eq!(info.size_bytes, 6);
        assert_eq!(fs::read(dest.join("2010.11644.tar.gz")).unwrap(), b"\x1f\x8bfake");

        let meta: ArchiveInfo =
            serde_json::from_str(&fs::read_to_string(dest.join("2010.11644.tar.gz.meta.json")).unwrap()).unwrap();
        assert_eq!(meta.arxiv_id, "2010.11644");
        assert_eq!(meta.url, "https://arxiv.org/e-print/2010.11644");
        assert!(chrono::DateTime::parse_from_rfc3339(&meta.downloaded_at).is_ok());
    }

    #[test]
    fn invalid_id_fails_before_any_request() {
        let dir = tempfile::tempdir().unwrap();
        let result = tokio_test::block_on(download_source("  ", dir.path()));
        assert!(matches!(result, Err(ArxivError::InvalidId(_))));
    }
}
