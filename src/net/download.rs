use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::state::data::ImageId;

/// Why a download (or thumbnail fetch) did not complete
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DownloadError {
    #[error("could not fetch image: {0}")]
    Fetch(String),
    #[error("server answered with status {0}")]
    Status(u16),
    #[error("server returned an empty image")]
    Empty,
    #[error("download cancelled")]
    Cancelled,
    #[error("could not save image: {0}")]
    Write(String),
}

/// Fetch a pin's image, ask the user where to put it, and write it there.
///
/// Returns the path the image was saved to.
pub async fn download(client: reqwest::Client, id: ImageId, url: String) -> Result<PathBuf, DownloadError> {
    let bytes = super::fetch_bytes(client, url).await?;
    let file_name = suggested_file_name(id, &bytes);

    let handle = rfd::AsyncFileDialog::new()
        .set_title("Save Image")
        .set_file_name(&file_name)
        .save_file()
        .await
        .ok_or(DownloadError::Cancelled)?;

    let path = handle.path().to_path_buf();
    save(&path, &bytes).await?;

    tracing::info!(%id, path = %path.display(), bytes = bytes.len(), "image saved");
    Ok(path)
}

/// Write downloaded bytes to disk
pub async fn save(path: &Path, bytes: &[u8]) -> Result<(), DownloadError> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| DownloadError::Write(e.to_string()))
}

/// File name offered in the save dialog, with an extension matching the image format
pub fn suggested_file_name(id: ImageId, bytes: &[u8]) -> String {
    let extension = image::guess_format(bytes)
        .ok()
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("jpg");

    format!("pin-{}.{}", id, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

    #[test]
    fn test_file_name_follows_format() {
        assert_eq!(suggested_file_name(ImageId(3), PNG_MAGIC), "pin-3.png");
        assert_eq!(suggested_file_name(ImageId(4), JPEG_MAGIC), "pin-4.jpg");
    }

    #[test]
    fn test_unknown_format_defaults_to_jpg() {
        assert_eq!(suggested_file_name(ImageId(9), b"<html>"), "pin-9.jpg");
    }

    #[tokio::test]
    async fn test_save_writes_bytes() {
        let path = std::env::temp_dir().join(format!("pinboard-save-{}.png", std::process::id()));

        save(&path, PNG_MAGIC).await.unwrap();
        let written = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(written, PNG_MAGIC);
    }

    #[tokio::test]
    async fn test_save_into_missing_dir_fails() {
        let path = std::env::temp_dir().join("pinboard-missing-dir/nested/pin.png");
        let result = save(&path, PNG_MAGIC).await;
        assert!(matches!(result, Err(DownloadError::Write(_))));
    }
}
