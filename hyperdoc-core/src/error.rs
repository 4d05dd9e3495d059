//! Error types and result types for document marshaling operations.
//!
//! This module provides error handling for the marshal and unmarshal engines
//! as well as for repositories built on top of them. Use [`DocumentResult<T>`]
//! as the return type for fallible operations.

use serde_json::Error as SerdeJsonError;
use std::num::ParseIntError;
use thiserror::Error;

/// Represents all possible errors that can occur when producing or consuming
/// a document.
///
/// This enum covers type resolution mismatches, attribute encoding failures,
/// relationship parsing, and the record-store errors surfaced by repository
/// implementations.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The primary data's type name does not match the destination record's
    /// resolved type name, or an input had an unusable shape.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    /// A document contained no primary data where a record was required.
    #[error("document contains no primary data")]
    MissingData,
    /// An attribute payload could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Encoding(String),
    /// An identifier in a relationship block could not be converted to the
    /// destination record's identifier representation.
    #[error("relationship parse error: {0}")]
    RelationshipParse(String),
    /// A record rejected a relationship name it does not recognize.
    /// Signaled by the record itself and propagated verbatim.
    #[error("unknown relationship: {0}")]
    UnknownRelationship(String),
    /// A record with the given ID already exists in the repository.
    /// The first argument is the record ID, the second is the collection name.
    #[error("record {0} already exists in collection {1}")]
    RecordAlreadyExists(String, String),
    /// The requested record was not found in the repository.
    /// The first argument is the record ID, the second is the collection name.
    #[error("record not found {0} in collection {1}")]
    RecordNotFound(String, String),
    /// Page query parameters were missing, zero, or inconsistent.
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),
}

/// A specialized `Result` type for document marshaling operations.
///
/// This type alias is used throughout the crate to indicate operations that
/// may fail with a [`DocumentError`].
pub type DocumentResult<T> = Result<T, DocumentError>;

impl From<SerdeJsonError> for DocumentError {
    fn from(err: SerdeJsonError) -> Self {
        DocumentError::Encoding(err.to_string())
    }
}

impl From<ParseIntError> for DocumentError {
    fn from(err: ParseIntError) -> Self {
        DocumentError::RelationshipParse(err.to_string())
    }
}
