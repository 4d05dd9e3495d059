//! Convenient re-exports of commonly used types from hyperdoc.
//!
//! Import this prelude module to quickly access the most frequently used
//! types and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use hyperdoc::prelude::*;
//! ```
//!
//! This provides access to:
//! - The capability traits and their value objects
//! - The document model
//! - The marshal and unmarshal engine entry points
//! - Pagination parameters
//! - Error types and the in-memory repository

pub use hyperdoc_core::{
    document::{
        Attributes, Document, Identifier, Link, Links, Meta, PrimaryData, Relationship,
        RelationshipData, ResourceObject,
    },
    error::{DocumentError, DocumentResult},
    marshal::{marshal, marshal_collection},
    page::PageParams,
    resource::{
        Cardinality, Reference, ReferenceId, Resource, ResourceTarget, ServerInformation,
        encode_attributes, resolved_type_name,
    },
    unmarshal::{unmarshal_collection, unmarshal_into, unmarshal_one},
};

pub use hyperdoc_memory::InMemoryRepository;
