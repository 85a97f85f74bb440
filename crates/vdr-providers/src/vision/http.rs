//! HTTP vision-language answer provider
//!
//! Sends one page image and the user's question to a vision model host and
//! returns the generated text.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::Serialize;
use vdr_domain::error::{Error, Result};
use vdr_domain::ports::providers::VisionAnswerProvider;

use crate::constants::{CONTENT_TYPE_JSON, VISION_DEFAULT_MAX_NEW_TOKENS, VISION_PREDICT_ROUTE};
use crate::utils::{HttpResponseUtils, JsonExt, ProviderErrorKind};

const PROVIDER: &str = "Vision";

#[derive(Serialize)]
struct PredictRequest<'a> {
    image_base64: String,
    user_query: &'a str,
    max_new_tokens: u32,
}

/// Vision host client
pub struct HttpVisionProvider {
    base_url: String,
    max_new_tokens: u32,
    timeout: Duration,
    http_client: Client,
}

impl HttpVisionProvider {
    /// Create a client for the host at `base_url`
    pub fn new(base_url: &str, timeout: Duration, http_client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            max_new_tokens: VISION_DEFAULT_MAX_NEW_TOKENS,
            timeout,
            http_client,
        }
    }

    /// Set the generation budget
    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }
}

#[async_trait]
impl VisionAnswerProvider for HttpVisionProvider {
    async fn answer(&self, image: &[u8], query: &str) -> Result<String> {
        let request = PredictRequest {
            image_base64: STANDARD.encode(image),
            user_query: query,
            max_new_tokens: self.max_new_tokens,
        };
        let response = self
            .http_client
            .post(format!("{}/{}", self.base_url, VISION_PREDICT_ROUTE))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                HttpResponseUtils::request_error(e, "vision_predict", self.timeout, ProviderErrorKind::Vision)
            })?;

        let body =
            HttpResponseUtils::check_and_parse(response, PROVIDER, ProviderErrorKind::Vision)
                .await?;
        body.opt_str("output")
            .map(str::to_string)
            .ok_or_else(|| Error::vision_model("Vision response missing 'output'"))
    }

    fn provider_name(&self) -> &str {
        "http"
    }
}
