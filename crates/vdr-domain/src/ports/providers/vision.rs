//! Vision-language answer port

use async_trait::async_trait;

use crate::error::Result;

/// Vision-capable language model answering a question about one page image
#[async_trait]
pub trait VisionAnswerProvider: Send + Sync {
    /// Answer `query` using the PNG/JPEG encoded `image`
    async fn answer(&self, image: &[u8], query: &str) -> Result<String>;

    /// Provider identifier
    fn provider_name(&self) -> &str;
}
