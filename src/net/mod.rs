/// Network access for image bytes
///
/// This module handles:
/// - Building the shared HTTP client
/// - Fetching image bytes for thumbnails and downloads
/// - Saving downloaded images to disk

pub mod download;

pub use download::DownloadError;

use std::time::Duration;

/// Build the HTTP client shared by thumbnail fetches and downloads
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(concat!("pinboard/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
}

/// Fetch the bytes behind an image URI
pub async fn fetch_bytes(client: reqwest::Client, url: String) -> Result<Vec<u8>, DownloadError> {
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| DownloadError::Fetch(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::Status(status.as_u16()));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| DownloadError::Fetch(e.to_string()))?;

    if bytes.is_empty() {
        return Err(DownloadError::Empty);
    }

    Ok(bytes.to_vec())
}
