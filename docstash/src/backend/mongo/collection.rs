use crate::backend::{CollectionProvider, WriteOptions};
use crate::client::StoreResult;
use crate::errors::{DocstashError, DocstashResult, ErrorKind};
use crate::storable::Record;
use mongodb::options::{
    Acknowledgment, CountOptions, FindOneOptions, ReplaceOptions, WriteConcern,
};
use mongodb::sync::Collection;
use std::time::Duration;

/// A MongoDB collection opened by [`MongoConnector`](super::MongoConnector).
pub struct MongoCollection {
    collection: Collection<Record>,
    namespace: String,
    socket_timeout: Duration,
}

impl MongoCollection {
    pub(crate) fn new(collection: Collection<Record>, namespace: String, socket_timeout: Duration) -> Self {
        MongoCollection {
            collection,
            namespace,
            socket_timeout,
        }
    }

    fn write_concern(&self, options: &WriteOptions) -> WriteConcern {
        WriteConcern::builder()
            .w(Acknowledgment::Nodes(1))
            .journal(options.journal)
            .w_timeout(self.socket_timeout)
            .build()
    }

    fn driver_error(&self, action: &str, kind: ErrorKind, err: mongodb::error::Error) -> DocstashError {
        log::error!("Failed to {} in {}: {}", action, self.namespace, err);
        DocstashError::new_with_cause(
            &format!("Failed to {} in {}", action, self.namespace),
            kind,
            err.into(),
        )
    }
}

impl CollectionProvider for MongoCollection {
    fn namespace(&self) -> String {
        self.namespace.clone()
    }

    fn upsert_one(
        &self,
        filter: Record,
        replacement: Record,
        options: &WriteOptions,
    ) -> DocstashResult<StoreResult> {
        let replace_options = ReplaceOptions::builder()
            .upsert(true)
            .write_concern(self.write_concern(options))
            .build();

        let result = self
            .collection
            .replace_one(filter, replacement, replace_options)
            .map_err(|err| self.driver_error("store record", ErrorKind::StoreError, err))?;

        Ok(StoreResult::new(
            result.matched_count,
            result.modified_count,
            result.upserted_id,
        ))
    }

    fn find_one(&self, filter: Record) -> DocstashResult<Option<Record>> {
        let find_options = FindOneOptions::builder()
            .max_time(self.socket_timeout)
            .build();

        self.collection
            .find_one(filter, find_options)
            .map_err(|err| self.driver_error("find record", ErrorKind::ConnectionError, err))
    }

    fn count(&self, filter: Record, limit: u64) -> DocstashResult<u64> {
        let mut count_options = CountOptions::builder()
            .max_time(self.socket_timeout)
            .build();
        if limit > 0 {
            count_options.limit = Some(limit);
        }

        self.collection
            .count_documents(filter, count_options)
            .map_err(|err| self.driver_error("count records", ErrorKind::ConnectionError, err))
    }
}
