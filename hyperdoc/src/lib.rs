//! Main hyperdoc crate providing a unified interface for JSON:API document
//! marshaling.
//!
//! This crate is the primary entry point for users of the hyperdoc project.
//! It re-exports the core types and functionality from the sub-crates:
//! the capability traits records implement, the document model, the marshal
//! and unmarshal engines, and a simple in-memory repository for example
//! resources and tests.
//!
//! # Quick Start
//!
//! ```ignore
//! use hyperdoc::prelude::*;
//! use serde::Serialize;
//!
//! #[derive(Debug, Clone, Default, Serialize)]
//! pub struct Chocolate {
//!     #[serde(skip)]
//!     pub id: String,
//!     pub name: String,
//!     pub taste: String,
//! }
//!
//! impl Resource for Chocolate {
//!     fn kind(&self) -> &str {
//!         "chocolate"
//!     }
//!
//!     fn identifier(&self) -> Identifier {
//!         Identifier::new(&self.id)
//!     }
//!
//!     fn attributes(&self) -> DocumentResult<Attributes> {
//!         encode_attributes(self)
//!     }
//! }
//!
//! fn main() -> DocumentResult<()> {
//!     let bar = Chocolate {
//!         id: "1".to_string(),
//!         name: "Ritter Sport".to_string(),
//!         taste: "Very Good".to_string(),
//!     };
//!
//!     // {"data": {"type": "chocolates", "id": "1", "attributes": {...}}}
//!     let document = marshal(&bar, None)?;
//!     let bytes = document.to_vec()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Relationships and side-loading
//!
//! Records declare relationship slots with [`resource::Resource::references`]
//! and resolve them with [`resource::Resource::reference_ids`]; records that
//! also implement [`resource::Resource::referenced_records`] get their
//! related records side-loaded into the document's `included` array, with
//! cycles deduplicated by (type, id).
//!
//! The inverse direction mirrors the capabilities: destinations implement
//! [`resource::ResourceTarget`] and the engines populate identity,
//! attributes, and relationship ids from a parsed document.
//!
//! # Storage
//!
//! - [`memory`] - A synchronous in-memory repository for development and
//!   testing

pub mod prelude;

pub use hyperdoc_core::{document, error, marshal, naming, page, resource, unmarshal};

/// In-memory storage implementations.
pub mod memory {
    pub use hyperdoc_memory::InMemoryRepository;
}
