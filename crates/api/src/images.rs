//! Gallery image validation and storage.
//!
//! Uploaded files are sniffed by magic bytes before they are accepted; the
//! declared content type is never trusted. Storage itself sits behind the
//! [`ImageStore`] trait so tests can swap the HTTP backend for a stub.

use async_trait::async_trait;

/// Error from an image store backend.
#[derive(Debug, thiserror::Error)]
#[error("image store: {0}")]
pub struct ImageStoreError(pub String);

/// Persists uploaded gallery files and returns their public URLs.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `bytes` under a name derived from `filename`, returning the
    /// public URL the gallery should reference.
    async fn upload(&self, filename: &str, bytes: &[u8]) -> Result<String, ImageStoreError>;
}

/// Image store that PUTs files to an HTTP object store (e.g. a bucket
/// gateway) and serves them back from the same base URL.
pub struct HttpImageStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpImageStore {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ImageStore for HttpImageStore {
    async fn upload(&self, filename: &str, bytes: &[u8]) -> Result<String, ImageStoreError> {
        let key = object_key(filename);
        let url = format!("{}/{key}", self.base_url);

        let response = self
            .client
            .put(&url)
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|err| ImageStoreError(err.to_string()))?;

        if !response.status().is_success() {
            return Err(ImageStoreError(format!(
                "upload of {filename} failed with status {}",
                response.status()
            )));
        }

        Ok(url)
    }
}

/// Unique object key preserving the original file extension.
fn object_key(filename: &str) -> String {
    let extension = filename.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("bin");
    format!("{}.{extension}", uuid::Uuid::new_v4())
}

/// Check the leading magic bytes for a supported image format.
///
/// Accepts JPEG (`FF D8 FF`), PNG (`89 50 4E 47`) and RIFF containers
/// (covers WebP). Anything else is rejected regardless of file name or
/// declared content type.
pub fn is_valid_image(bytes: &[u8]) -> bool {
    if bytes.len() < 4 {
        return false;
    }

    if bytes[0] == 0xFF && bytes[1] == 0xD8 && bytes[2] == 0xFF {
        return true; // JPEG
    }
    if bytes[0] == 0x89 && bytes[1] == 0x50 && bytes[2] == 0x4E && bytes[3] == 0x47 {
        return true; // PNG
    }
    if &bytes[0..4] == b"RIFF" {
        return true; // WebP container
    }

    false
}
