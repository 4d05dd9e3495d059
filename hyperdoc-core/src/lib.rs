//! A thin JSON:API document marshaling layer that turns plain records into
//! hypermedia documents and back.
//!
//! This crate is the core of the hyperdoc project and provides:
//!
//! - **Capability traits** ([`resource`]) - The contract records implement to
//!   participate in marshaling; identity is mandatory, everything else is
//!   optional
//! - **Document model** ([`document`]) - The typed wire representation:
//!   primary data, relationships, included resources, links, meta
//! - **Marshal engine** ([`marshal`]) - Records into documents, with
//!   relationship blocks and a deduplicated `included` closure
//! - **Unmarshal engine** ([`unmarshal`]) - Documents into destination
//!   records via the mirrored setter capabilities
//! - **Name derivation** ([`naming`]) - Pluralization and member-name rules
//!   behind collection type names and default cardinality
//! - **Pagination** ([`page`]) - Page parameter parsing and navigation links
//! - **Error handling** ([`error`]) - Error and result types
//!
//! # Example
//!
//! ```ignore
//! use hyperdoc_core::marshal::marshal;
//! use hyperdoc_core::resource::{encode_attributes, Resource};
//! use hyperdoc_core::document::{Attributes, Identifier};
//! use hyperdoc_core::error::DocumentResult;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! pub struct User {
//!     #[serde(skip)]
//!     pub id: String,
//!     pub name: String,
//! }
//!
//! impl Resource for User {
//!     fn kind(&self) -> &str {
//!         "user"
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
//! let user = User { id: "1".to_string(), name: "Alice".to_string() };
//! let document = marshal(&user, None)?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as hyperdoc_core;

pub mod document;
pub mod error;
pub mod marshal;
pub mod naming;
pub mod page;
pub mod resource;
pub mod unmarshal;

#[cfg(test)]
pub(crate) mod fixtures;
