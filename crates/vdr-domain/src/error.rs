//! Error handling types

use std::time::Duration;

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Visual Document Retrieval
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Base64 decoding error
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The uploaded artifact is not a PDF, ZIP or supported image
    #[error("Unsupported artifact kind: {name}")]
    UnsupportedArtifactKind {
        /// Original file name of the artifact
        name: String,
    },

    /// An artifact could be classified but not opened or decoded
    #[error("Ingestion error: {message}")]
    Ingestion {
        /// Description of the ingestion failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// The embedding model could not be loaded (fatal, startup only)
    #[error("Model load error: {message}")]
    ModelLoad {
        /// Description of the load failure
        message: String,
    },

    /// Embedding inference failed for a request
    #[error("Embedding inference error: {message}")]
    EmbeddingInference {
        /// Description of the inference failure
        message: String,
    },

    /// Network, authentication or protocol failure talking to a store
    #[error("Store transport error: {message}")]
    StoreTransport {
        /// Description of the transport failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A collection with this name already exists
    #[error("Collection '{name}' already exists")]
    CollectionExists {
        /// Collection name
        name: String,
    },

    /// No collection with this name exists
    #[error("Collection '{name}' not found")]
    CollectionNotFound {
        /// Collection name
        name: String,
    },

    /// A search completed but produced no hits
    #[error("No matching documents found in collection '{collection}'")]
    NoMatch {
        /// Collection that was searched
        collection: String,
    },

    /// An operation exceeded its deadline
    #[error("Operation '{operation}' timed out after {timeout_ms}ms")]
    Timeout {
        /// Name of the operation that timed out
        operation: String,
        /// Deadline in milliseconds
        timeout_ms: u64,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Vision-language answer generation failed
    #[error("Vision model error: {message}")]
    VisionModel {
        /// Description of the failure
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Basic error creation methods
impl Error {
    /// Create an unsupported artifact kind error
    pub fn unsupported_artifact<S: Into<String>>(name: S) -> Self {
        Self::UnsupportedArtifactKind { name: name.into() }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Ingestion and I/O error creation methods
impl Error {
    /// Create an ingestion error
    pub fn ingestion<S: Into<String>>(message: S) -> Self {
        Self::Ingestion {
            message: message.into(),
            source: None,
        }
    }

    /// Create an ingestion error with source
    pub fn ingestion_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Ingestion {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Model error creation methods
impl Error {
    /// Create a model load error
    pub fn model_load<S: Into<String>>(message: S) -> Self {
        Self::ModelLoad {
            message: message.into(),
        }
    }

    /// Create an embedding inference error
    pub fn embedding_inference<S: Into<String>>(message: S) -> Self {
        Self::EmbeddingInference {
            message: message.into(),
        }
    }

    /// Create a vision model error
    pub fn vision_model<S: Into<String>>(message: S) -> Self {
        Self::VisionModel {
            message: message.into(),
        }
    }
}

// Store error creation methods
impl Error {
    /// Create a store transport error
    pub fn store_transport<S: Into<String>>(message: S) -> Self {
        Self::StoreTransport {
            message: message.into(),
            source: None,
        }
    }

    /// Create a store transport error with source
    pub fn store_transport_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::StoreTransport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a collection exists error
    pub fn collection_exists<S: Into<String>>(name: S) -> Self {
        Self::CollectionExists { name: name.into() }
    }

    /// Create a collection not found error
    pub fn collection_not_found<S: Into<String>>(name: S) -> Self {
        Self::CollectionNotFound { name: name.into() }
    }

    /// Create a no match error
    pub fn no_match<S: Into<String>>(collection: S) -> Self {
        Self::NoMatch {
            collection: collection.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout<S: Into<String>>(operation: S, timeout: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification
impl Error {
    /// Whether the failure may succeed if the operation is repeated
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::StoreTransport { .. }
                | Self::Timeout { .. }
                | Self::EmbeddingInference { .. }
                | Self::IoSimple { .. }
                | Self::Io { .. }
        )
    }

    /// Whether the failure is an empty but valid search outcome
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch { .. })
    }
}
