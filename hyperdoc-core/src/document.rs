//! The wire document model.
//!
//! This module provides the typed representation of a JSON:API document:
//! primary data (a single resource object or an array), relationship blocks,
//! the `included` array of side-loaded resources, links, and meta. All types
//! serialize with serde; empty optional sections are omitted from the wire.
//!
//! Two encodings in this model are deliberately asymmetric around `null`:
//!
//! - a relationship whose `data` key is **omitted** means "not loaded", while
//!   an explicit `"data": null` means "empty to-one relationship";
//! - a [`Link`] serializes as a bare string when it carries no meta and as a
//!   `{ "href", "meta" }` object otherwise.
//!
//! Both distinctions survive a parse/serialize round trip.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::DocumentResult;

/// Free-form meta object attached to documents, resources, relationships, and
/// links.
pub type Meta = serde_json::Map<String, Value>;

/// The opaque attribute payload of a resource object, produced by the
/// caller's own encoding. The engine never looks inside.
pub type Attributes = serde_json::Map<String, Value>;

/// Named links attached to documents, resources, and relationships.
pub type Links = BTreeMap<String, Link>;

/// A single link: a URL plus optional meta.
///
/// On the wire a link without meta is a bare string; a link with meta is an
/// object with `href` and `meta` members.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Link {
    /// The link URL.
    pub href: String,
    /// Optional meta describing the link.
    pub meta: Meta,
}

impl Link {
    /// Creates a link with no meta.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            meta: Meta::new(),
        }
    }

    /// Creates a link carrying meta.
    pub fn with_meta(href: impl Into<String>, meta: Meta) -> Self {
        Self {
            href: href.into(),
            meta,
        }
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.meta.is_empty() {
            serializer.serialize_str(&self.href)
        } else {
            let mut map = serializer.serialize_map(Some(2))?;
            map.serialize_entry("href", &self.href)?;
            map.serialize_entry("meta", &self.meta)?;
            map.end()
        }
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Href(String),
            Object {
                href: String,
                #[serde(default)]
                meta: Meta,
            },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Href(href) => Link {
                href,
                meta: Meta::new(),
            },
            Repr::Object { href, meta } => Link { href, meta },
        })
    }
}

/// A resource identifier: id, optional local id, and optional type-name
/// override.
///
/// Within one document, the pair (resolved type name, identifier) uniquely
/// identifies a resource. The local id (`lid`) correlates client-generated
/// resources before a server-assigned id exists and is only meaningful until
/// then. The `type_name` overrides the collection name otherwise derived from
/// the record's kind by pluralization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    /// The server-assigned id, empty while the resource is transient.
    pub id: String,
    /// Client-generated local id, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lid: Option<String>,
    /// Explicit type-name override, if any.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl Identifier {
    /// Creates an identifier with the given id and no local id or type
    /// override.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lid: None,
            type_name: None,
        }
    }

    /// Creates an identifier with an explicit type name.
    pub fn typed(id: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lid: None,
            type_name: Some(type_name.into()),
        }
    }
}

/// The `data` member of a relationship block: a single nullable identifier
/// for to-one relationships, an ordered sequence for to-many relationships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    /// To-one linkage; `None` serializes as `null`.
    ToOne(Option<Identifier>),
    /// To-many linkage; an empty vector serializes as `[]`.
    ToMany(Vec<Identifier>),
}

/// One relationship block of a resource object.
///
/// `data: None` means the key is omitted entirely (the relationship exists
/// but was not loaded); `Some(RelationshipData::ToOne(None))` is an
/// explicitly empty to-one; `Some(RelationshipData::ToMany(vec![]))` is an
/// explicitly empty to-many.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Relationship linkage, if loaded.
    #[serde(
        default,
        deserialize_with = "nullable_relationship_data",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<RelationshipData>,
    /// `self`/`related` links for the relationship.
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
    /// Relationship-scoped meta.
    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

// An explicit `"data": null` must parse as ToOne(None), not as an absent key.
fn nullable_relationship_data<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<RelationshipData>, D::Error> {
    RelationshipData::deserialize(deserializer).map(Some)
}

/// One resource object: type, identity, opaque attributes, relationship
/// blocks, links, and meta.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    /// The resolved collection type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// The server-assigned id, empty for client-created resources.
    #[serde(default)]
    pub id: String,
    /// Client-generated local id, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lid: Option<String>,
    /// The caller-defined attribute payload.
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    /// Relationship blocks keyed by relation name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, Relationship>,
    /// Resource-level links.
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
    /// Resource-level meta.
    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

impl ResourceObject {
    /// Returns this resource's identifier, carrying the type name.
    pub fn identifier(&self) -> Identifier {
        Identifier {
            id: self.id.clone(),
            lid: self.lid.clone(),
            type_name: Some(self.type_name.clone()),
        }
    }
}

/// The primary data of a document: one (nullable) resource object or an
/// array of resource objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    /// A single primary resource; `None` serializes as `null`.
    Single(Option<ResourceObject>),
    /// An array of primary resources, in input order.
    Collection(Vec<ResourceObject>),
}

/// A complete document: primary data, deduplicated `included` resources, and
/// top-level links and meta.
///
/// Documents are constructed fresh per marshal call and discarded after
/// encoding; [`Document::default`] is the empty document `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Primary data, if any.
    #[serde(
        default,
        deserialize_with = "nullable_primary_data",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<PrimaryData>,
    /// Side-loaded resources, breadth-first by discovery, first seen wins.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<ResourceObject>,
    /// Top-level links (for example pagination links).
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
    /// Top-level meta.
    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

fn nullable_primary_data<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<PrimaryData>, D::Error> {
    PrimaryData::deserialize(deserializer).map(Some)
}

impl Document {
    /// Converts this document to a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> DocumentResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Encodes this document as JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_vec(&self) -> DocumentResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Parses a document from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the structure is invalid.
    pub fn from_json(value: Value) -> DocumentResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parses a document from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the structure is invalid.
    pub fn from_slice(bytes: &[u8]) -> DocumentResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
