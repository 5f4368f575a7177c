use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Pixel dimensions of a fetched image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    /// The measurement recorded per image: `2 * (width + height)`.
    pub fn perimeter(self) -> u64 {
        2 * (u64::from(self.width) + u64::from(self.height))
    }
}

/// Collaborator that downloads an image and reports its decoded dimensions.
///
/// The executor only sees this trait, so tests substitute a scripted
/// fetcher and assert on call counts.
#[async_trait]
pub trait FetchImageDimensions: Send + Sync {
    async fn fetch_dimensions(&self, url: &str) -> Result<ImageDimensions, FetchError>;
}

/// HTTP implementation backed by reqwest and the `image` crate.
pub struct ImageClient {
    http: Client,
}

impl ImageClient {
    pub fn new(fetch_timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(fetch_timeout).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl FetchImageDimensions for ImageClient {
    async fn fetch_dimensions(&self, url: &str) -> Result<ImageDimensions, FetchError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let bytes = response.bytes().await?;

        // Dimension probe only; no full pixel decode.
        let (width, height) = image::ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .map_err(image::ImageError::IoError)?
            .into_dimensions()?;

        Ok(ImageDimensions { width, height })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to fetch image: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to fetch image: unexpected status {0}")]
    Status(StatusCode),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}
