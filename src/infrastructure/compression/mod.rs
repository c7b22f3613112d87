pub mod tinify;

use crate::domain::error::Result;
use async_trait::async_trait;

pub use tinify::{RawResponse, TinifyClient};

/// Successful upload: where to fetch the compressed bytes and how many to expect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionResult {
    pub location: String,
    pub size: u64,
    pub compression_count: Option<String>,
}

/// Remote compression service.
///
/// Errors are `TransportError` for timeouts and connection failures,
/// `ProviderError` for non-success statuses and `ParseError` for
/// malformed response bodies.
#[async_trait]
pub trait CompressionClient {
    async fn shrink(&self, image: Vec<u8>) -> Result<CompressionResult>;
    async fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}
