//! The unmarshal engine: documents into records.
//!
//! The inverse of the marshal engine: given a parsed [`Document`], populate
//! identity, attributes, and relationship ids on a destination record
//! through its [`ResourceTarget`] capabilities. The document's primary type
//! name must match the destination's resolved type name; relationship blocks
//! whose `data` member is omitted (not loaded) are skipped; destinations
//! implementing no relationship setters silently ignore relationship data.
//!
//! Any setter error — a relationship id that does not parse, an unknown
//! relation name — aborts the whole call. [`unmarshal_one`] and
//! [`unmarshal_collection`] build fresh records, and [`unmarshal_into`]
//! commits through a scratch clone, so a failed call never hands back a
//! partially-populated record.

use crate::document::{Document, PrimaryData, Relationship, RelationshipData, ResourceObject};
use crate::error::{DocumentError, DocumentResult};
use crate::naming;
use crate::resource::ResourceTarget;

/// Builds one record from a document with single primary data.
///
/// # Errors
///
/// Returns [`DocumentError::MissingData`] when the document has no primary
/// resource, [`DocumentError::TypeMismatch`] when the primary data is a
/// collection or of the wrong type, and propagates setter errors verbatim.
pub fn unmarshal_one<T: ResourceTarget + Default>(document: &Document) -> DocumentResult<T> {
    let mut target = T::default();
    populate(single_entry(document)?, &mut target)?;
    Ok(target)
}

/// Builds a vector of records from a document's primary data.
///
/// An array of primary resources yields one record per entry in document
/// order; a single primary resource yields one record.
///
/// # Errors
///
/// See [`unmarshal_one`]; the first failing entry aborts the whole call.
pub fn unmarshal_collection<T: ResourceTarget + Default>(
    document: &Document,
) -> DocumentResult<Vec<T>> {
    let entries: &[ResourceObject] = match &document.data {
        Some(PrimaryData::Collection(entries)) => entries,
        Some(PrimaryData::Single(Some(entry))) => std::slice::from_ref(entry),
        Some(PrimaryData::Single(None)) | None => return Err(DocumentError::MissingData),
    };

    let mut targets = Vec::with_capacity(entries.len());
    for entry in entries {
        let mut target = T::default();
        populate(entry, &mut target)?;
        targets.push(target);
    }

    Ok(targets)
}

/// Populates an existing record from a document with single primary data.
///
/// The document is applied to a scratch clone which replaces the destination
/// only on success; on error the destination is left untouched.
///
/// # Errors
///
/// See [`unmarshal_one`].
pub fn unmarshal_into<T: ResourceTarget + Clone>(
    document: &Document,
    target: &mut T,
) -> DocumentResult<()> {
    let entry = single_entry(document)?;

    let mut scratch = target.clone();
    populate(entry, &mut scratch)?;
    *target = scratch;
    Ok(())
}

fn single_entry(document: &Document) -> DocumentResult<&ResourceObject> {
    match &document.data {
        Some(PrimaryData::Single(Some(entry))) => Ok(entry),
        Some(PrimaryData::Single(None)) | None => Err(DocumentError::MissingData),
        Some(PrimaryData::Collection(_)) => Err(DocumentError::TypeMismatch(
            "expected a single primary resource, found a collection".to_string(),
        )),
    }
}

fn populate<T: ResourceTarget>(entry: &ResourceObject, target: &mut T) -> DocumentResult<()> {
    let expected = naming::collection_name(target.kind());
    if entry.type_name != expected {
        return Err(DocumentError::TypeMismatch(format!(
            "document is of type {}, destination expects {}",
            entry.type_name, expected
        )));
    }

    target.set_identifier(entry.identifier())?;
    target.set_attributes(&entry.attributes)?;

    for (name, relationship) in &entry.relationships {
        apply_relationship(name, relationship, target)?;
    }

    Ok(())
}

fn apply_relationship<T: ResourceTarget>(
    name: &str,
    relationship: &Relationship,
    target: &mut T,
) -> DocumentResult<()> {
    match &relationship.data {
        // No data member: the relationship was not loaded.
        None => Ok(()),
        Some(RelationshipData::ToOne(identifier)) => {
            target.set_to_one_reference(name, identifier.as_ref())
        }
        Some(RelationshipData::ToMany(identifiers)) => {
            target.set_to_many_references(name, identifiers)
        }
    }
}
