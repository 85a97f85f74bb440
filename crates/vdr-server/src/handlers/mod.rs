//! HTTP handlers
//!
//! | Path | Method | Handler |
//! |------|--------|---------|
//! | `/document_embed` | POST | [`documents::document_embed`] |
//! | `/document_retrieval` | POST | [`documents::document_retrieval`] |
//! | `/create_qdrant_collection` | POST | [`collections::create_collection`] |
//! | `/delete_qdrant_collection` | POST | [`collections::delete_collection`] |
//! | `/get_qdrant_collections` | POST | [`collections::list_collections`] |
//! | `/health` | GET | [`system::health`] |
//! | `/images/<path..>` | GET | [`system::page_image`] |
//! | `/` | GET | [`web::index`] |

pub mod collections;
pub mod documents;
pub mod system;
pub mod web;

use rocket::{Catcher, Route, catchers, routes};

use crate::error;

/// Every API and UI route
pub fn api_routes() -> Vec<Route> {
    routes![
        documents::document_embed,
        documents::document_retrieval,
        collections::create_collection,
        collections::delete_collection,
        collections::list_collections,
        system::health,
        system::page_image,
        web::index,
    ]
}

/// JSON catchers for errors raised before a handler runs
pub fn api_catchers() -> Vec<Catcher> {
    catchers![
        error::bad_request,
        error::not_found,
        error::payload_too_large,
        error::unprocessable_entity,
        error::internal_error,
    ]
}
