use super::MongoCollection;
use crate::backend::{CollectionHandle, Connector};
use crate::errors::{DocstashError, DocstashResult, ErrorKind};
use crate::registry::ConnectionIdentity;
use crate::storable::Record;
use bson::doc;
use mongodb::options::{ClientOptions, ServerAddress};
use mongodb::sync::Client;

/// Connector for MongoDB servers.
///
/// Each `connect` builds a dedicated driver client for the identity's host
/// and port. The driver pools sockets internally, and the registry makes sure
/// `connect` runs once per identity.
///
/// Timeouts map onto the driver as follows:
/// - connect timeout: `ClientOptions::connect_timeout`
/// - socket timeout: `ClientOptions::server_selection_timeout`, plus
///   `max_time` on reads and `w_timeout` on writes
///
/// Server selection includes opening the first connection, so the socket
/// timeout also caps connection setup. A connect timeout longer than the
/// socket timeout never takes full effect.
#[derive(Debug, Clone, Default)]
pub struct MongoConnector {
    app_name: Option<String>,
}

impl MongoConnector {
    pub fn new() -> Self {
        MongoConnector::default()
    }

    /// Reports `app_name` to the server in the connection handshake.
    pub fn with_app_name(app_name: &str) -> Self {
        MongoConnector {
            app_name: Some(app_name.to_string()),
        }
    }

    pub(crate) fn client_options(&self, identity: &ConnectionIdentity) -> ClientOptions {
        ClientOptions::builder()
            .hosts(vec![ServerAddress::Tcp {
                host: identity.host().to_string(),
                port: Some(identity.port()),
            }])
            .connect_timeout(identity.connect_timeout())
            .server_selection_timeout(identity.socket_timeout())
            .app_name(self.app_name.clone())
            .build()
    }
}

impl Connector for MongoConnector {
    fn connect(&self, identity: &ConnectionIdentity) -> DocstashResult<CollectionHandle> {
        let client = Client::with_options(self.client_options(identity)).map_err(|err| {
            log::error!("Failed to create MongoDB client for {}: {}", identity, err);
            DocstashError::new_with_cause(
                &format!("Failed to create MongoDB client for {}", identity),
                ErrorKind::ConnectionError,
                err.into(),
            )
        })?;

        let database = client.database(identity.database());
        database.run_command(doc! { "ping": 1 }, None).map_err(|err| {
            log::error!("Failed to reach MongoDB at {}: {}", identity, err);
            DocstashError::new_with_cause(
                &format!("Failed to reach MongoDB at {}", identity),
                ErrorKind::ConnectionError,
                err.into(),
            )
        })?;

        let collection = database.collection::<Record>(identity.collection());
        log::debug!("Opened MongoDB collection {}", identity);
        Ok(CollectionHandle::new(MongoCollection::new(
            collection,
            identity.namespace(),
            identity.socket_timeout(),
        )))
    }
}
