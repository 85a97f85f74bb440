//! Application ports
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`registry`] | Provider auto-registration |
//! | [`services`] | Service interfaces used by the presentation layer |

pub mod registry;
pub mod services;

pub use services::{
    CollectionServiceInterface, DocumentEmbedServiceInterface, RetrievalServiceInterface,
};
