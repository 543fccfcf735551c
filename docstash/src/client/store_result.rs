use bson::Bson;

/// The outcome of a [`store`](crate::client::DocumentClient::store) call.
///
/// Mirrors the write result reported by the backend: how many records
/// matched the key filter, how many were actually changed, and the
/// identifier the store generated when the upsert inserted a new record.
///
/// # Examples
///
/// ```rust
/// use docstash::client::StoreResult;
/// use bson::{oid::ObjectId, Bson};
///
/// let inserted = StoreResult::new(0, 0, Some(Bson::ObjectId(ObjectId::new())));
/// assert!(inserted.is_insert());
///
/// let replaced = StoreResult::new(1, 1, None);
/// assert!(replaced.is_replace());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StoreResult {
    matched_count: u64,
    modified_count: u64,
    upserted_id: Option<Bson>,
}

impl StoreResult {
    pub fn new(matched_count: u64, modified_count: u64, upserted_id: Option<Bson>) -> Self {
        StoreResult {
            matched_count,
            modified_count,
            upserted_id,
        }
    }

    pub fn matched_count(&self) -> u64 {
        self.matched_count
    }

    pub fn modified_count(&self) -> u64 {
        self.modified_count
    }

    /// The generated identifier, present only when a new record was inserted.
    pub fn upserted_id(&self) -> Option<&Bson> {
        self.upserted_id.as_ref()
    }

    pub fn is_insert(&self) -> bool {
        self.upserted_id.is_some()
    }

    /// True when an existing record was replaced, even if the replacement was
    /// identical and nothing was modified.
    pub fn is_replace(&self) -> bool {
        self.upserted_id.is_none() && self.matched_count > 0
    }
}
