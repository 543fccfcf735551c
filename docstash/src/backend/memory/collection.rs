use super::InMemoryServer;
use crate::backend::{CollectionProvider, WriteOptions};
use crate::client::StoreResult;
use crate::common::{lookup_path, DOC_ID};
use crate::errors::{DocstashError, DocstashResult, ErrorKind};
use crate::storable::Record;
use bson::oid::ObjectId;
use bson::Bson;
use parking_lot::RwLock;
use std::sync::Arc;

/// An in-memory collection.
///
/// Records are kept in insertion order. Filters are equality matches on
/// (possibly dotted) field paths, which covers the key lookups the document
/// client issues. Replacing a record keeps its `_id`; inserting one without
/// an `_id` assigns a fresh `ObjectId`.
pub struct InMemoryCollection {
    namespace: String,
    server: Arc<InMemoryServer>,
    records: Arc<RwLock<Vec<Record>>>,
}

impl InMemoryCollection {
    pub(crate) fn new(namespace: String, server: Arc<InMemoryServer>) -> Self {
        let records = server.records(&namespace);
        InMemoryCollection {
            namespace,
            server,
            records,
        }
    }

    fn check_online(&self, error_kind: ErrorKind) -> DocstashResult<()> {
        if self.server.is_online() {
            Ok(())
        } else {
            log::error!("In-memory server for {} is offline", self.namespace);
            Err(DocstashError::new(
                &format!("Server for {} is offline", self.namespace),
                error_kind,
            ))
        }
    }
}

impl CollectionProvider for InMemoryCollection {
    fn namespace(&self) -> String {
        self.namespace.clone()
    }

    fn upsert_one(
        &self,
        filter: Record,
        replacement: Record,
        _options: &WriteOptions,
    ) -> DocstashResult<StoreResult> {
        self.check_online(ErrorKind::StoreError)?;

        let mut records = self.records.write();
        let position = records.iter().position(|record| matches(record, &filter));
        match position {
            Some(index) => {
                let existing = &mut records[index];
                let id = existing.get(DOC_ID).cloned().unwrap_or(Bson::Null);
                if let Some(new_id) = replacement.get(DOC_ID) {
                    if !values_equal(new_id, &id) {
                        log::error!("Replacement for {} attempts to change {}", self.namespace, DOC_ID);
                        return Err(DocstashError::new(
                            &format!("Cannot change the {} of an existing record", DOC_ID),
                            ErrorKind::StoreError,
                        ));
                    }
                }

                let replacement = with_id_first(id, replacement);
                let modified = if *existing == replacement { 0 } else { 1 };
                *existing = replacement;
                Ok(StoreResult::new(1, modified, None))
            }
            None => {
                let id = replacement
                    .get(DOC_ID)
                    .cloned()
                    .unwrap_or_else(|| Bson::ObjectId(ObjectId::new()));
                records.push(with_id_first(id.clone(), replacement));
                Ok(StoreResult::new(0, 0, Some(id)))
            }
        }
    }

    fn find_one(&self, filter: Record) -> DocstashResult<Option<Record>> {
        self.check_online(ErrorKind::ConnectionError)?;

        let records = self.records.read();
        Ok(records.iter().find(|record| matches(record, &filter)).cloned())
    }

    fn count(&self, filter: Record, limit: u64) -> DocstashResult<u64> {
        self.check_online(ErrorKind::ConnectionError)?;

        let records = self.records.read();
        let matching = records.iter().filter(|record| matches(record, &filter));
        let count = if limit == 0 {
            matching.count()
        } else {
            matching.take(limit as usize).count()
        };
        Ok(count as u64)
    }
}

fn matches(record: &Record, filter: &Record) -> bool {
    filter.iter().all(|(path, expected)| {
        lookup_path(record, path).is_some_and(|actual| values_equal(actual, expected))
    })
}

/// Equality as the server applies it: numbers compare by value whatever
/// their BSON width, so `Int32(7)`, `Int64(7)` and `Double(7.0)` are equal.
fn values_equal(left: &Bson, right: &Bson) -> bool {
    if let (Some(l), Some(r)) = (as_integer(left), as_integer(right)) {
        return l == r;
    }
    match (left, right) {
        (Bson::Double(l), Bson::Double(r)) => l == r,
        (Bson::Double(d), other) | (other, Bson::Double(d)) => match as_integer(other) {
            Some(i) => integral_double(*d) == Some(i),
            None => false,
        },
        _ => left == right,
    }
}

fn as_integer(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(i) => Some(i64::from(*i)),
        Bson::Int64(i) => Some(*i),
        _ => None,
    }
}

fn integral_double(value: f64) -> Option<i64> {
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

fn with_id_first(id: Bson, record: Record) -> Record {
    let mut result = Record::new();
    result.insert(DOC_ID, id);
    for (key, value) in record {
        if key != DOC_ID {
            result.insert(key, value);
        }
    }
    result
}
