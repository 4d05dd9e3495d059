//! The marshal engine: records into documents.
//!
//! [`marshal`] and [`marshal_collection`] walk one record or a sequence of
//! records, probe each optional capability of the [`Resource`] trait at its
//! dispatch point, build relationship blocks, and discover the transitive
//! closure of referenced records for the `included` array.
//!
//! Output is deterministic for a fixed input: primary array order is input
//! order, relationship members keep the order returned by
//! [`Resource::reference_ids`], relationship names serialize in sorted
//! order, and `included` is breadth-first by discovery with the first
//! occurrence of a (type, identifier) pair winning. Cyclic record graphs are
//! allowed; the worklist terminates through deduplication, not through a
//! depth limit.
//!
//! # Example
//!
//! ```ignore
//! use hyperdoc_core::marshal::marshal;
//!
//! let document = marshal(&record, None)?;
//! let bytes = document.to_vec()?;
//! ```

use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::document::{
    Document, Identifier, Link, Links, PrimaryData, Relationship, RelationshipData, ResourceObject,
};
use crate::error::DocumentResult;
use crate::naming;
use crate::resource::{
    Cardinality, ReferenceId, Resource, ServerInformation, resolved_type_name,
};

/// Marshals a single record into a document.
///
/// The record's directly referenced records (if it resolves any) seed the
/// `included` array, which is populated with their transitive closure.
///
/// # Errors
///
/// Returns an error if an attribute payload fails to encode; no partial
/// document is returned.
pub fn marshal<R: Resource>(
    record: &R,
    information: Option<&dyn ServerInformation>,
) -> DocumentResult<Document> {
    let record: &dyn Resource = record;
    let entry = marshal_resource_object(record, information)?;
    let included = collect_included(record.referenced_records().unwrap_or_default(), information)?;

    Ok(Document {
        data: Some(PrimaryData::Single(Some(entry))),
        included,
        ..Document::default()
    })
}

/// Marshals a sequence of records into a document with an array of primary
/// data, preserving input order.
///
/// # Errors
///
/// Returns an error if any element's attribute payload fails to encode; no
/// partial document is returned.
pub fn marshal_collection<R: Resource>(
    records: &[R],
    information: Option<&dyn ServerInformation>,
) -> DocumentResult<Document> {
    let mut entries = Vec::with_capacity(records.len());
    let mut seeds: Vec<&dyn Resource> = Vec::new();

    for record in records {
        let record: &dyn Resource = record;
        entries.push(marshal_resource_object(record, information)?);
        seeds.extend(record.referenced_records().unwrap_or_default());
    }

    let included = collect_included(seeds, information)?;

    Ok(Document {
        data: Some(PrimaryData::Collection(entries)),
        included,
        ..Document::default()
    })
}

fn marshal_resource_object(
    record: &dyn Resource,
    information: Option<&dyn ServerInformation>,
) -> DocumentResult<ResourceObject> {
    let identifier = record.identifier();

    let mut entry = ResourceObject {
        type_name: resolved_type_name(record),
        id: identifier.id,
        lid: identifier.lid,
        attributes: record.attributes()?,
        ..ResourceObject::default()
    };

    if let Some(information) = information {
        let base = record_base_url(&entry.type_name, &entry.id, information);
        if let Some(links) = record.links(&base) {
            entry.links = links;
        }
    }

    if let Some(meta) = record.meta() {
        entry.meta = meta;
    }

    if let Some(reference_ids) = record.reference_ids() {
        entry.relationships = build_relationships(
            record,
            &entry.type_name,
            &entry.id,
            reference_ids,
            information,
        );
    }

    Ok(entry)
}

/// Builds the relationship blocks for one record.
///
/// Resolved edges are grouped by relation name, keeping the resolution order
/// within each relation. Declared relations with no resolved edges still get
/// an entry: an empty array (to-many), `null` (to-one), or links-only when
/// marked not loaded.
fn build_relationships(
    record: &dyn Resource,
    type_name: &str,
    id: &str,
    reference_ids: Vec<ReferenceId>,
    information: Option<&dyn ServerInformation>,
) -> BTreeMap<String, Relationship> {
    let mut grouped: BTreeMap<String, Vec<ReferenceId>> = BTreeMap::new();
    for reference_id in reference_ids {
        grouped
            .entry(reference_id.name.clone())
            .or_default()
            .push(reference_id);
    }

    let relationship_meta = information
        .and_then(|information| {
            record.relationship_meta(&record_base_url(type_name, id, information))
        })
        .unwrap_or_default();

    let mut relationships = BTreeMap::new();

    for (name, edges) in &grouped {
        let data = if is_to_many(edges[0].cardinality, name) {
            RelationshipData::ToMany(edges.iter().map(ReferenceId::identifier).collect())
        } else {
            RelationshipData::ToOne(Some(edges[0].identifier()))
        };

        relationships.insert(
            name.clone(),
            Relationship {
                data: Some(data),
                links: relationship_links(type_name, id, name, information),
                meta: relationship_meta.get(name).cloned().unwrap_or_default(),
            },
        );
    }

    for reference in record.references().unwrap_or_default() {
        if relationships.contains_key(&reference.name) {
            continue;
        }

        let data = if reference.not_loaded {
            None
        } else if is_to_many(reference.cardinality, &reference.name) {
            Some(RelationshipData::ToMany(Vec::new()))
        } else {
            Some(RelationshipData::ToOne(None))
        };

        let relationship = Relationship {
            data,
            links: relationship_links(type_name, id, &reference.name, information),
            meta: relationship_meta
                .get(&reference.name)
                .cloned()
                .unwrap_or_default(),
        };
        relationships.insert(reference.name, relationship);
    }

    relationships
}

fn is_to_many(cardinality: Cardinality, name: &str) -> bool {
    match cardinality {
        Cardinality::Default => naming::is_plural(name),
        Cardinality::ToOne => false,
        Cardinality::ToMany => true,
    }
}

/// Collects the transitive closure of referenced records, breadth-first.
///
/// An explicit worklist plus a visited set keyed by (resolved type,
/// identifier) makes the traversal terminate on cyclic graphs; the first
/// occurrence of a pair wins, later duplicates are dropped silently.
fn collect_included<'a>(
    seeds: Vec<&'a dyn Resource>,
    information: Option<&dyn ServerInformation>,
) -> DocumentResult<Vec<ResourceObject>> {
    let mut queue: VecDeque<&'a dyn Resource> = seeds.into();
    let mut seen: HashSet<(String, Identifier)> = HashSet::new();
    let mut included = Vec::new();

    while let Some(record) = queue.pop_front() {
        let key = (resolved_type_name(record), record.identifier());
        if !seen.insert(key) {
            continue;
        }

        included.push(marshal_resource_object(record, information)?);

        if let Some(children) = record.referenced_records() {
            queue.extend(children);
        }
    }

    Ok(included)
}

fn record_base_url(type_name: &str, id: &str, information: &dyn ServerInformation) -> String {
    let base_url = information.base_url();
    let prefix = information.path_prefix();
    let mut base = base_url.trim_matches('/').to_string();
    let prefix = prefix.trim_matches('/');

    if !prefix.is_empty() {
        base.push('/');
        base.push_str(prefix);
    }

    format!("{base}/{type_name}/{id}")
}

fn relationship_links(
    type_name: &str,
    id: &str,
    name: &str,
    information: Option<&dyn ServerInformation>,
) -> Links {
    let Some(information) = information else {
        return Links::new();
    };

    let base = record_base_url(type_name, id, information);
    let mut links = Links::new();
    links.insert(
        "self".to_string(),
        Link::new(format!("{base}/relationships/{name}")),
    );
    links.insert("related".to_string(), Link::new(format!("{base}/{name}")));
    links
}
