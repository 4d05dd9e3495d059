//! Capability traits for records that participate in marshaling.
//!
//! Records are polymorphic over an open capability set. The marshal side is
//! the [`Resource`] trait: identity and a kind name are mandatory, everything
//! else — relationship declaration, relationship resolution, side-loading,
//! custom links and meta — is an optional method whose default returns
//! `None`. Returning `None` means the capability is absent; the engine then
//! degrades its output (for example by omitting the `relationships` block)
//! instead of failing. The unmarshal side is the [`ResourceTarget`] trait
//! with the mirrored setter capabilities.
//!
//! # Example
//!
//! ```ignore
//! use hyperdoc_core::resource::{encode_attributes, Resource};
//! use hyperdoc_core::document::{Attributes, Identifier};
//! use hyperdoc_core::error::DocumentResult;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Category {
//!     #[serde(skip)]
//!     id: String,
//!     name: String,
//! }
//!
//! impl Resource for Category {
//!     fn kind(&self) -> &str {
//!         "category"
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
//! ```

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::document::{Attributes, Identifier, Links, Meta};
use crate::error::{DocumentError, DocumentResult};

/// The cardinality of a relationship.
///
/// `Default` resolves through the naming rules: a plural relation name means
/// to-many, a singular one means to-one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cardinality {
    /// Derive the cardinality from the relation name.
    #[default]
    Default,
    /// Exactly one related resource (or none).
    ToOne,
    /// An ordered sequence of related resources.
    ToMany,
}

/// A declared relationship slot of a record.
///
/// If `not_loaded` is set, the relationship's `data` member is omitted and
/// only links are emitted. Declare this when references exist but you do not
/// want to load them; otherwise a declared relation with zero resolved ids
/// gets an explicitly empty `data` member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reference {
    /// Collection type name of the referenced resources.
    pub type_name: String,
    /// The relation name.
    pub name: String,
    /// Suppress the `data` member for this relation.
    pub not_loaded: bool,
    /// Explicit cardinality, or `Default` to derive it from the name.
    pub cardinality: Cardinality,
}

impl Reference {
    /// Declares a loaded relation with default cardinality.
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            not_loaded: false,
            cardinality: Cardinality::Default,
        }
    }
}

/// A concrete relationship edge resolved by a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceId {
    /// Id of the referenced resource.
    pub id: String,
    /// Local id of the referenced resource, if any.
    pub lid: Option<String>,
    /// Collection type name of the referenced resource.
    pub type_name: String,
    /// The relation name this edge belongs to.
    pub name: String,
    /// Explicit cardinality, or `Default` to derive it from the name.
    pub cardinality: Cardinality,
}

impl ReferenceId {
    /// Creates an edge with default cardinality and no local id.
    pub fn new(
        id: impl Into<String>,
        type_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            lid: None,
            type_name: type_name.into(),
            name: name.into(),
            cardinality: Cardinality::Default,
        }
    }

    /// Returns the wire identifier for this edge.
    pub fn identifier(&self) -> Identifier {
        Identifier {
            id: self.id.clone(),
            lid: self.lid.clone(),
            type_name: Some(self.type_name.clone()),
        }
    }
}

/// A record that can be marshaled into a document.
///
/// `kind` and `identifier` are mandatory; every other method is an optional
/// capability with a no-op default. The engine probes each capability
/// independently at its dispatch point, so a record implements exactly the
/// subset it needs.
pub trait Resource: Send + Sync {
    /// The singular name of this record's kind (for example `"category"`).
    ///
    /// The collection type name on the wire is derived from it by
    /// pluralization unless [`Resource::identifier`] carries an explicit
    /// `type_name` override.
    fn kind(&self) -> &str;

    /// Returns this record's identifier.
    fn identifier(&self) -> Identifier;

    /// Returns the opaque attribute payload, typically
    /// `encode_attributes(self)` for serde-serializable records.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if the payload cannot be serialized; this
    /// aborts the whole marshal call.
    fn attributes(&self) -> DocumentResult<Attributes> {
        Ok(Attributes::new())
    }

    /// Declares the record's possible relationship slots.
    ///
    /// Declared relations with zero resolved edges still appear in the
    /// output, as an empty array (to-many), `null` (to-one), or links-only
    /// (`not_loaded`).
    fn references(&self) -> Option<Vec<Reference>> {
        None
    }

    /// Resolves the record's concrete relationship edges.
    ///
    /// Relationship blocks are only built when this capability is present.
    fn reference_ids(&self) -> Option<Vec<ReferenceId>> {
        None
    }

    /// Returns the directly referenced records for side-loading into
    /// `included`. The engine discovers the transitive closure itself.
    fn referenced_records(&self) -> Option<Vec<&dyn Resource>> {
        None
    }

    /// Returns custom resource-level links. Only consulted when server
    /// information was supplied; `base_url` is the resource's own URL.
    fn links(&self, base_url: &str) -> Option<Links> {
        let _ = base_url;
        None
    }

    /// Returns custom resource-level meta.
    fn meta(&self) -> Option<Meta> {
        None
    }

    /// Returns relationship-scoped meta keyed by relation name. Only
    /// consulted when server information was supplied.
    fn relationship_meta(&self, base_url: &str) -> Option<BTreeMap<String, Meta>> {
        let _ = base_url;
        None
    }
}

impl<R: Resource + ?Sized> Resource for &R {
    fn kind(&self) -> &str {
        (**self).kind()
    }

    fn identifier(&self) -> Identifier {
        (**self).identifier()
    }

    fn attributes(&self) -> DocumentResult<Attributes> {
        (**self).attributes()
    }

    fn references(&self) -> Option<Vec<Reference>> {
        (**self).references()
    }

    fn reference_ids(&self) -> Option<Vec<ReferenceId>> {
        (**self).reference_ids()
    }

    fn referenced_records(&self) -> Option<Vec<&dyn Resource>> {
        (**self).referenced_records()
    }

    fn links(&self, base_url: &str) -> Option<Links> {
        (**self).links(base_url)
    }

    fn meta(&self) -> Option<Meta> {
        (**self).meta()
    }

    fn relationship_meta(&self, base_url: &str) -> Option<BTreeMap<String, Meta>> {
        (**self).relationship_meta(base_url)
    }
}

/// A destination record that can be populated from a document.
///
/// `kind` and `set_identifier` are mandatory. The relationship setters
/// default to no-ops, so a destination that implements neither simply
/// ignores relationship data. A setter that rejects a relation name should
/// return [`DocumentError::UnknownRelationship`]; any setter error aborts
/// the whole unmarshal call.
pub trait ResourceTarget {
    /// The singular name of this record's kind; the document's primary type
    /// name must match its pluralized form.
    fn kind(&self) -> &str;

    /// Populates the record's identity.
    ///
    /// # Errors
    ///
    /// Returns a relationship parse error if the id string cannot be
    /// converted to the record's identifier representation.
    fn set_identifier(&mut self, identifier: Identifier) -> DocumentResult<()>;

    /// Populates the record's attribute fields from the payload.
    fn set_attributes(&mut self, attributes: &Attributes) -> DocumentResult<()> {
        let _ = attributes;
        Ok(())
    }

    /// Sets a to-one relationship; `None` clears it.
    fn set_to_one_reference(
        &mut self,
        name: &str,
        identifier: Option<&Identifier>,
    ) -> DocumentResult<()> {
        let _ = (name, identifier);
        Ok(())
    }

    /// Sets a to-many relationship to the given ordered identifiers.
    fn set_to_many_references(
        &mut self,
        name: &str,
        identifiers: &[Identifier],
    ) -> DocumentResult<()> {
        let _ = (name, identifiers);
        Ok(())
    }
}

/// Server deployment details used to build absolute `self`/`related` link
/// URLs. When no implementor is supplied, link construction is skipped
/// entirely; no partial URLs are fabricated.
pub trait ServerInformation {
    /// The server base URL, for example `http://my.domain`.
    fn base_url(&self) -> String;

    /// The path prefix mounted in front of all resources, for example `v1`.
    fn path_prefix(&self) -> String;
}

/// Encodes a serde-serializable record into an attribute payload.
///
/// Fields managed by the engine (id, lid, relationship id fields) should be
/// marked `#[serde(skip)]` so they stay out of the payload.
///
/// # Errors
///
/// Returns an encoding error if serialization fails or does not produce an
/// object.
pub fn encode_attributes<T: Serialize>(record: &T) -> DocumentResult<Attributes> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(DocumentError::Encoding(format!(
            "attribute payload must encode to an object, got {other}"
        ))),
    }
}

/// Resolves the collection type name of a record: the identity's explicit
/// `type_name` override if present, else the pluralized member-name form of
/// the record's kind.
pub fn resolved_type_name(record: &dyn Resource) -> String {
    match record.identifier().type_name {
        Some(type_name) if !type_name.is_empty() => type_name,
        _ => crate::naming::collection_name(record.kind()),
    }
}
