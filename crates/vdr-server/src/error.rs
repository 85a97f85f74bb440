//! HTTP error responses
//!
//! Every failure leaves the API as `{"detail": <message>}` with a status
//! derived from the domain error kind.
//!
//! | Error | Status |
//! |-------|--------|
//! | `UnsupportedArtifactKind`, `InvalidArgument` | 400 |
//! | `NoMatch`, `CollectionNotFound`, `NotFound` | 404 |
//! | `CollectionExists` | 409 |
//! | `ModelLoad` | 503 |
//! | `Timeout` | 504 |
//! | anything else | 500 |
//!
//! On the query path a missing collection is 503 instead of 404; only an
//! empty result is 404 there.

use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::{Request, catch};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use vdr_domain::error::Error;

/// Error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human readable message
    pub detail: String,
}

/// An error leaving the HTTP API
#[derive(Debug)]
pub struct ApiError {
    /// Response status
    pub status: Status,
    /// Message sent as `detail`
    pub detail: String,
}

impl ApiError {
    /// Create an error with an explicit status
    pub fn new(status: Status, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// 400 Bad Request
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(Status::BadRequest, detail)
    }
}

/// Map a domain error to its HTTP status
pub fn status_for(error: &Error) -> Status {
    match error {
        Error::UnsupportedArtifactKind { .. } | Error::InvalidArgument { .. } => {
            Status::BadRequest
        }
        Error::NoMatch { .. } | Error::CollectionNotFound { .. } | Error::NotFound { .. } => {
            Status::NotFound
        }
        Error::CollectionExists { .. } => Status::Conflict,
        Error::ModelLoad { .. } => Status::ServiceUnavailable,
        Error::Timeout { .. } => Status::GatewayTimeout,
        _ => Status::InternalServerError,
    }
}

/// Status of a failed query: a missing collection is unavailable, not empty
pub fn status_for_query(error: &Error) -> Status {
    match error {
        Error::CollectionNotFound { .. } => Status::ServiceUnavailable,
        other => status_for(other),
    }
}

impl ApiError {
    /// Error of the retrieval path, see [`status_for_query`]
    pub fn from_query(error: Error) -> Self {
        Self::logged(status_for_query(&error), error)
    }

    fn logged(status: Status, error: Error) -> Self {
        if status.code >= 500 {
            error!(status = status.code, error = %error, "Request failed");
        } else {
            warn!(status = status.code, error = %error, "Request rejected");
        }
        Self::new(status, error.to_string())
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self::logged(status_for(&error), error)
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        (
            self.status,
            Json(ErrorBody {
                detail: self.detail,
            }),
        )
            .respond_to(request)
    }
}

// ============================================================================
// Catchers
// ============================================================================

fn catcher_body(status: Status) -> Json<ErrorBody> {
    Json(ErrorBody {
        detail: status.reason_lossy().to_string(),
    })
}

/// Malformed request
#[catch(400)]
pub fn bad_request(_request: &Request<'_>) -> Json<ErrorBody> {
    catcher_body(Status::BadRequest)
}

/// Unknown route
#[catch(404)]
pub fn not_found(_request: &Request<'_>) -> Json<ErrorBody> {
    catcher_body(Status::NotFound)
}

/// Upload or body over the configured limit
#[catch(413)]
pub fn payload_too_large(_request: &Request<'_>) -> Json<ErrorBody> {
    catcher_body(Status::PayloadTooLarge)
}

/// Body that does not match the expected form or JSON shape
#[catch(422)]
pub fn unprocessable_entity(_request: &Request<'_>) -> Json<ErrorBody> {
    catcher_body(Status::UnprocessableEntity)
}

/// Unhandled failure
#[catch(500)]
pub fn internal_error(_request: &Request<'_>) -> Json<ErrorBody> {
    catcher_body(Status::InternalServerError)
}
