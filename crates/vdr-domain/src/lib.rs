//! # Visual Document Retrieval - Domain Layer
//!
//! Core types for a page-image retrieval pipeline: artifacts are turned into
//! page images, embedded with a multimodal encoder, indexed into a vector
//! store and retrieved with text queries.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`error`] | Error taxonomy and `Result` alias |
//! | [`value_objects`] | Artifacts, pages, vectors, points, hits, collections |
//! | [`ports`] | Provider traits implemented by adapters |
//! | [`constants`] | Domain defaults |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
