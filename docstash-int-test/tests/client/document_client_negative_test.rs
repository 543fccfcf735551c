use crate::client::Paper;
use bson::{doc, Bson};
use docstash::backend::memory::InMemoryConnector;
use docstash::backend::{CollectionHandle, Connector, WriteOptions};
use docstash::client::DocumentClient;
use docstash::errors::{DocstashError, DocstashResult, ErrorKind};
use docstash::registry::{ConnectionIdentity, ConnectionRegistry};
use docstash::storable::{Storable, UnpackOptions};
use docstash_derive::{Packable, Storable};
use docstash_int_test::test_util::{cleanup, create_test_context, run_test};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Packable, Storable)]
#[storage(key = "code", database = "library", collection = "drafts")]
pub struct Draft {
    pub code: Option<String>,
    pub text: String,
}

struct UnreachableConnector {
    attempts: Arc<AtomicUsize>,
}

impl Connector for UnreachableConnector {
    fn connect(&self, identity: &ConnectionIdentity) -> DocstashResult<CollectionHandle> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(DocstashError::new(
            &format!("Cannot reach {}", identity),
            ErrorKind::ConnectionError,
        ))
    }
}

fn unreachable_client<T: Storable>() -> DocstashResult<(DocumentClient<T>, Arc<AtomicUsize>)> {
    let attempts = Arc::new(AtomicUsize::new(0));
    let registry = ConnectionRegistry::new(UnreachableConnector {
        attempts: attempts.clone(),
    });
    Ok((DocumentClient::new(registry)?, attempts))
}

#[test]
fn test_store_with_null_key_is_invalid() {
    run_test(
        create_test_context,
        |ctx| {
            let client = ctx.client::<Draft>()?;
            let draft = Draft {
                code: None,
                text: "untitled".to_string(),
            };

            let err = client.store(&draft).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidArgument);
            assert!(ctx.registry().is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_null_key_never_contacts_store() {
    let (client, attempts) = unreachable_client::<Draft>().unwrap();

    let err = client
        .store(&Draft {
            code: None,
            text: "untitled".to_string(),
        })
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidArgument);

    let err = client.load(Bson::Null, &UnpackOptions::default()).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidArgument);

    let err = client.exists(Bson::Null).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidArgument);

    assert_eq!(attempts.load(Ordering::SeqCst), 0);
}

#[test]
fn test_unreachable_store_is_connection_error() {
    let (client, attempts) = unreachable_client::<Paper>().unwrap();

    let err = client.store(&Paper::fake("p-1")).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ConnectionError);
    let err = client.load("p-1", &UnpackOptions::default()).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ConnectionError);
    let err = client.exists("p-1").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ConnectionError);

    // nothing is cached, so every call tries again
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert!(client.registry().is_empty());
}

#[test]
fn test_server_going_down_after_connect() {
    let connector = InMemoryConnector::new();
    let client = DocumentClient::<Paper>::new(ConnectionRegistry::new(connector.clone())).unwrap();
    client.store(&Paper::fake("p-1")).unwrap();

    connector.set_online("localhost", 27017, false);
    let err = client.store(&Paper::fake("p-2")).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::StoreError);
    let err = client.load("p-1", &UnpackOptions::default()).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ConnectionError);
    let err = client.exists("p-1").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ConnectionError);

    connector.set_online("localhost", 27017, true);
    assert!(client.exists("p-1").unwrap());
    assert!(!client.exists("p-2").unwrap());
}

#[test]
fn test_load_malformed_record_is_mapping_error() {
    run_test(
        create_test_context,
        |ctx| {
            let client = ctx.client::<Paper>()?;
            let handle = ctx.registry().get_collection(client.config().identity())?;
            handle.upsert_one(
                doc! { "doc_id": "broken" },
                doc! { "doc_id": "broken", "title": 42 },
                &WriteOptions::default(),
            )?;

            assert!(client.exists("broken")?);
            let err = client
                .load("broken", &UnpackOptions::default())
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::ObjectMappingError);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_load_with_wrong_key_type_finds_nothing() {
    run_test(
        create_test_context,
        |ctx| {
            let client = ctx.client::<Paper>()?;
            client.store(&Paper::fake("12"))?;

            assert!(client.load(12i32, &UnpackOptions::default())?.is_none());
            assert!(!client.exists(12i32)?);
            assert!(client.exists("12")?);
            Ok(())
        },
        cleanup,
    )
}
