//! Error types for the application

use thiserror::Error;

/// Result type alias using our ServiceError
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Main error type for service and adapter operations
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A product ticker is absent from the reference table or a state store
    #[error("unknown product: {0}")]
    UnknownProduct(String),

    /// A trading book is absent from a position's book set
    #[error("unknown book: {0}")]
    UnknownBook(String),

    /// A keyed lookup found no entry in a service's state store
    #[error("no entry for key: {0}")]
    NotFound(String),

    /// An order book arrived with an empty bid or offer stack
    #[error("degenerate order book for {0}")]
    DegenerateBook(String),

    /// An input line could not be decoded into a domain event
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    /// I/O errors from adapters
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record sink's writer task has gone away
    #[error("record sink closed: {0}")]
    SinkClosed(String),
}
