//! Domain error to HTTP status mapping

use std::time::Duration;

use rocket::http::Status;
use vdr_domain::error::Error;
use vdr_server::error::{ApiError, status_for, status_for_query};

#[test]
fn test_client_errors() {
    assert_eq!(
        status_for(&Error::unsupported_artifact("notes.txt")),
        Status::BadRequest
    );
    assert_eq!(
        status_for(&Error::invalid_argument("query must not be empty")),
        Status::BadRequest
    );
    assert_eq!(status_for(&Error::no_match("pages")), Status::NotFound);
    assert_eq!(
        status_for(&Error::collection_not_found("pages")),
        Status::NotFound
    );
    assert_eq!(
        status_for(&Error::collection_exists("pages")),
        Status::Conflict
    );
}

#[test]
fn test_server_errors() {
    assert_eq!(
        status_for(&Error::timeout("query_points", Duration::from_secs(30))),
        Status::GatewayTimeout
    );
    assert_eq!(
        status_for(&Error::model_load("server unreachable")),
        Status::ServiceUnavailable
    );
    assert_eq!(
        status_for(&Error::store_transport("connection refused")),
        Status::InternalServerError
    );
    assert_eq!(
        status_for(&Error::embedding_inference("bad shape")),
        Status::InternalServerError
    );
}

#[test]
fn test_api_error_carries_message() {
    let error = ApiError::from(Error::collection_exists("pages"));
    assert_eq!(error.status, Status::Conflict);
    assert_eq!(error.detail, "Collection 'pages' already exists");
}

#[test]
fn test_query_path_separates_missing_collection_from_no_match() {
    assert_eq!(
        status_for_query(&Error::collection_not_found("pages")),
        Status::ServiceUnavailable
    );
    assert_eq!(status_for_query(&Error::no_match("pages")), Status::NotFound);
    assert_eq!(
        status_for_query(&Error::timeout("query_points", Duration::from_secs(1))),
        Status::GatewayTimeout
    );

    let error = ApiError::from_query(Error::collection_not_found("pages"));
    assert_eq!(error.status, Status::ServiceUnavailable);
}
