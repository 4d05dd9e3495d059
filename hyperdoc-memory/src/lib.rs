//! In-memory record storage for the hyperdoc project.
//!
//! This crate provides a simple synchronous repository that stores records
//! keyed by their id string. It backs example resources and tests; for
//! anything persistent, put a real database behind the same record types.
//!
//! # Example
//!
//! ```ignore
//! use hyperdoc_memory::InMemoryRepository;
//!
//! let mut chocolates = InMemoryRepository::new();
//! let id = chocolates.insert(Chocolate {
//!     id: String::new(),
//!     name: "Ritter Sport".to_string(),
//!     taste: "Very Good".to_string(),
//! })?;
//!
//! let bar = chocolates.get(&id)?;
//! ```

mod store;

pub use store::InMemoryRepository;
