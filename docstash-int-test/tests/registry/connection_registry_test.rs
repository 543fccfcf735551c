use crate::client::{Paper, Report};
use docstash::client::DocumentClient;
use docstash::registry::ConnectionIdentity;
use docstash::storable::{Storable, UnpackOptions};
use docstash_int_test::test_util::{cleanup, create_test_context, run_test};
use std::time::Duration;

#[test]
fn test_clients_of_same_identity_share_handle() {
    run_test(
        create_test_context,
        |ctx| {
            let first = ctx.client::<Paper>()?;
            let second = ctx.client::<Paper>()?;
            first.store(&Paper::fake("p-1"))?;
            second.store(&Paper::fake("p-2"))?;

            let registry = ctx.registry();
            assert_eq!(registry.len(), 1);

            let identity = first.config().identity();
            let a = registry.get_collection(identity)?;
            let b = registry.get_collection(second.config().identity())?;
            assert!(a.same_handle(&b));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_different_collections_get_independent_handles() {
    run_test(
        create_test_context,
        |ctx| {
            let papers = ctx.client::<Paper>()?;
            let reports = ctx.client::<Report>()?;
            papers.store(&Paper::fake("x-1"))?;
            reports.store(&Report::fake("x-1"))?;

            let registry = ctx.registry();
            assert_eq!(registry.len(), 2);
            let a = registry.get_collection(papers.config().identity())?;
            let b = registry.get_collection(reports.config().identity())?;
            assert!(!a.same_handle(&b));

            assert!(papers.exists("x-1")?);
            assert!(reports.exists("x-1")?);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_different_timeouts_get_independent_handles() {
    run_test(
        create_test_context,
        |ctx| {
            let fast = ctx.client::<Paper>()?;
            let slow_config = fast
                .config()
                .to_builder()
                .connect_timeout_ms(20_000)
                .socket_timeout_ms(60_000)
                .build()?;
            let slow = DocumentClient::<Paper>::with_config(ctx.registry(), slow_config);

            fast.store(&Paper::fake("t-1"))?;
            // same server, same collection: the data is shared even though the
            // handles are not
            assert!(slow.exists("t-1")?);

            let registry = ctx.registry();
            assert_eq!(registry.len(), 2);
            let a = registry.get_collection(fast.config().identity())?;
            let b = registry.get_collection(slow.config().identity())?;
            assert!(!a.same_handle(&b));
            assert_eq!(
                slow.config().identity().socket_timeout(),
                Duration::from_secs(60)
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_handle_is_opened_lazily() {
    run_test(
        create_test_context,
        |ctx| {
            let client = ctx.client::<Paper>()?;
            let registry = ctx.registry();
            assert!(!registry.has_collection(client.config().identity()));

            client.load("nothing", &UnpackOptions::default())?;
            assert!(registry.has_collection(client.config().identity()));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_identity_from_storage_config() {
    let config = Paper::storage_config().unwrap();
    let identity = ConnectionIdentity::new("library", "papers");
    assert_eq!(config.identity(), &identity);
    assert_eq!(identity.to_string(), "localhost:27017/library.papers");
}
