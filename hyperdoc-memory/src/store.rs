//! The in-memory repository implementation.

use std::collections::HashMap;

use hyperdoc_core::document::Identifier;
use hyperdoc_core::error::{DocumentError, DocumentResult};
use hyperdoc_core::naming;
use hyperdoc_core::page::PageParams;
use hyperdoc_core::resource::{Resource, ResourceTarget};

/// A synchronous in-memory repository of one record type, keyed by id.
///
/// Records keep their own identity: a record inserted with a non-empty id
/// keeps it (colliding ids are refused), a record inserted with an empty id
/// is assigned the next auto-incremented numeric id through its
/// [`ResourceTarget::set_identifier`] capability.
///
/// Listing returns records ordered by id, numerically where ids are numeric,
/// which keeps paginated listings stable.
///
/// # Example
///
/// ```ignore
/// let mut users = InMemoryRepository::<User>::new();
/// let id = users.insert(User::default())?;
/// assert_eq!(id, "1");
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryRepository<R> {
    collection: String,
    records: HashMap<String, R>,
    next_id: u64,
}

impl<R> InMemoryRepository<R>
where
    R: Resource + ResourceTarget + Clone + Default,
{
    /// Creates an empty repository for the record type's collection.
    pub fn new() -> Self {
        Self {
            collection: naming::collection_name(ResourceTarget::kind(&R::default())),
            records: HashMap::new(),
            next_id: 1,
        }
    }

    /// Returns the collection name this repository holds.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Inserts a record and returns its id.
    ///
    /// A record without an id gets the next auto-incremented numeric id
    /// assigned via `set_identifier`.
    ///
    /// # Errors
    ///
    /// Returns a record-exists error when a record with the same id is
    /// already stored, and propagates `set_identifier` failures.
    pub fn insert(&mut self, mut record: R) -> DocumentResult<String> {
        let id = record.identifier().id;

        let id = if id.is_empty() {
            let id = self.next_id.to_string();
            self.next_id += 1;
            record.set_identifier(Identifier::new(id.clone()))?;
            id
        } else {
            if self.records.contains_key(&id) {
                return Err(DocumentError::RecordAlreadyExists(
                    id,
                    self.collection.clone(),
                ));
            }
            // Keep the counter ahead of client-supplied numeric ids.
            if let Ok(numeric) = id.parse::<u64>() {
                self.next_id = self.next_id.max(numeric + 1);
            }
            id
        };

        self.records.insert(id.clone(), record);
        Ok(id)
    }

    /// Returns the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no record has the id.
    pub fn get(&self, id: &str) -> DocumentResult<&R> {
        self.records
            .get(id)
            .ok_or_else(|| DocumentError::RecordNotFound(id.to_string(), self.collection.clone()))
    }

    /// Replaces the stored record with the same id.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no record has the record's id.
    pub fn update(&mut self, record: R) -> DocumentResult<()> {
        let id = record.identifier().id;

        if !self.records.contains_key(&id) {
            return Err(DocumentError::RecordNotFound(id, self.collection.clone()));
        }

        self.records.insert(id, record);
        Ok(())
    }

    /// Removes and returns the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no record has the id.
    pub fn remove(&mut self, id: &str) -> DocumentResult<R> {
        self.records
            .remove(id)
            .ok_or_else(|| DocumentError::RecordNotFound(id.to_string(), self.collection.clone()))
    }

    /// Returns all records ordered by id, numeric ids first in numeric
    /// order, remaining ids lexically.
    pub fn all(&self) -> Vec<R> {
        let mut records: Vec<R> = self.records.values().cloned().collect();
        records.sort_by_key(|record| sort_key(&record.identifier().id));
        records
    }

    /// Returns one page of the ordered records.
    pub fn page(&self, params: &PageParams) -> Vec<R> {
        let records = self.all();
        params.slice(&records).to_vec()
    }
}

impl<R> Default for InMemoryRepository<R>
where
    R: Resource + ResourceTarget + Clone + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

fn sort_key(id: &str) -> (bool, u64, String) {
    let numeric = id.parse::<u64>().ok();
    (numeric.is_none(), numeric.unwrap_or_default(), id.to_string())
}
