//! HTTP Response Utilities
//!
//! Helper functions for processing HTTP responses from remote providers.
//! These are shared utilities, not ports.

use std::time::Duration;

use reqwest::Response;
use vdr_domain::error::{Error, Result};

/// Which error family a failed response maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Embedding model server
    Embedding,
    /// Vector or metadata store
    Store,
    /// Vision-language host
    Vision,
}

impl ProviderErrorKind {
    /// Build an error of this family
    pub fn error(self, message: String) -> Error {
        match self {
            Self::Embedding => Error::embedding_inference(message),
            Self::Store => Error::store_transport(message),
            Self::Vision => Error::vision_model(message),
        }
    }
}

/// Format error message for a provider
fn provider_error(kind: ProviderErrorKind, provider: &str, context: &str, details: &str) -> Error {
    kind.error(format!("{provider} {context}: {details}"))
}

/// Utilities for processing HTTP responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Check response status and parse JSON
    ///
    /// # Arguments
    /// * `response` - The HTTP response to check
    /// * `provider_name` - Name of the provider for error messages
    /// * `kind` - Error family used for failures
    pub async fn check_and_parse(
        response: Response,
        provider_name: &str,
        kind: ProviderErrorKind,
    ) -> Result<serde_json::Value> {
        let response = Self::check_status(response, provider_name, kind).await?;
        response
            .json()
            .await
            .map_err(|e| provider_error(kind, provider_name, "response parse failed", &e.to_string()))
    }

    /// Fail on non-success statuses, returning the response otherwise
    pub async fn check_status(
        response: Response,
        provider_name: &str,
        kind: ProviderErrorKind,
    ) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let code = status.as_u16();

        Err(match code {
            401 | 403 => provider_error(kind, provider_name, "authentication failed", &error_text),
            429 => provider_error(kind, provider_name, "rate limit exceeded", &error_text),
            500..=599 => provider_error(
                kind,
                provider_name,
                &format!("server error ({code})"),
                &error_text,
            ),
            _ => provider_error(
                kind,
                provider_name,
                &format!("request failed ({code})"),
                &error_text,
            ),
        })
    }

    /// Map a transport-level reqwest failure
    pub fn request_error(
        error: reqwest::Error,
        operation: &str,
        timeout: Duration,
        kind: ProviderErrorKind,
    ) -> Error {
        if error.is_timeout() {
            return Error::timeout(operation, timeout);
        }
        match kind {
            ProviderErrorKind::Store => {
                Error::store_transport_with_source(format!("{operation} request failed"), error)
            }
            other => other.error(format!("{operation} request failed: {error}")),
        }
    }
}
