//! Firebase Storage REST client for watch face images

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use watchly_common::{GalleryError, GalleryResult};

use super::BlobStore;

const USER_AGENT: &str = "Watchly/1.0";

/// Client for the Firebase Storage download endpoint
pub struct StorageClient {
    client: Client,
    base_url: String,
    bucket: String,
}

impl StorageClient {
    pub fn new(base_url: &str, bucket: &str) -> Self {
        log::debug!("Creating storage client for bucket {}", bucket);
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
        }
    }

    /// Object names are a single path segment, so `/` must be escaped
    fn object_url(&self, key: &str) -> String {
        format!(
            "{}/v0/b/{}/o/{}",
            self.base_url,
            self.bucket,
            urlencoding::encode(key)
        )
    }
}

#[async_trait]
impl BlobStore for StorageClient {
    async fn get_data(&self, key: &str, max_size: usize) -> GalleryResult<Vec<u8>> {
        let url = self.object_url(key);
        log::debug!("Fetching object: {}", url);

        let mut response = self
            .client
            .get(&url)
            .query(&[("alt", "media")])
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GalleryError::NotFound(key.to_string()));
        }
        if !status.is_success() {
            return Err(GalleryError::HttpStatus(status));
        }

        let too_large = || GalleryError::TooLarge {
            key: key.to_string(),
            limit: max_size,
        };

        if let Some(length) = response.content_length() {
            if length > max_size as u64 {
                return Err(too_large());
            }
        }

        // Content-Length may be missing or wrong, so enforce the limit while reading
        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if bytes.len() + chunk.len() > max_size {
                return Err(too_large());
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(bytes)
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
