use docstash::client::DocumentClient;
use docstash::errors::DocstashResult;
use docstash::registry::ConnectionRegistry;
use docstash::storable::Storable;
use std::backtrace::Backtrace;
use std::thread;
use std::time::{Duration, Instant};

/// Runs a test with retry logic and error handling.
///
/// `after` runs whether or not the test body fails, but not when `before`
/// fails. Each attempt gets a fresh context.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> DocstashResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    B: Fn() -> DocstashResult<TestContext> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    A: Fn(TestContext) -> DocstashResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    const MAX_RETRIES: u32 = 3;
    let mut last_error: Option<String> = None;
    let mut last_backtrace: Option<String> = None;

    for attempt in 1..=MAX_RETRIES {
        let start_time = Instant::now();

        let result = std::panic::catch_unwind(|| {
            let backtrace = Backtrace::capture();
            match before() {
                Ok(ctx) => match test(ctx.clone()) {
                    Ok(_) => after(ctx).map_err(|e| {
                        (format!("After run failed: {:?}", e), backtrace.to_string())
                    }),
                    Err(e) => {
                        let _ = after(ctx);
                        Err((format!("Test failed: {:?}", e), backtrace.to_string()))
                    }
                },
                Err(e) => Err((format!("Before run failed: {:?}", e), backtrace.to_string())),
            }
        });

        let elapsed = start_time.elapsed();

        let (error, backtrace) = match result {
            Ok(Ok(_)) => return,
            Ok(Err((e, bt))) => (e, bt),
            Err(panic_err) => {
                let err_msg = if let Some(s) = panic_err.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_err.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                (format!("Panic: {}", err_msg), Backtrace::capture().to_string())
            }
        };

        if attempt < MAX_RETRIES {
            eprintln!(
                "\n========== Test Attempt {}/{} Failed (took {:?}) ==========",
                attempt, MAX_RETRIES, elapsed
            );
            eprintln!("Error: {}", error);
            eprintln!("Retrying in {}ms...\n", 100 * attempt);
            thread::sleep(Duration::from_millis(100 * attempt as u64));
        }
        last_error = Some(error);
        last_backtrace = Some(backtrace);
    }

    eprintln!("\n==================== TEST FAILED ====================");
    eprintln!("Failed after {} attempts", MAX_RETRIES);
    eprintln!("Last error: {}", last_error.as_deref().unwrap_or("Unknown"));
    if let Some(bt) = &last_backtrace {
        if !bt.is_empty() && !bt.contains("disabled") {
            eprintln!("\nBacktrace:\n{}", bt);
        }
    }
    eprintln!("=====================================================\n");

    panic!(
        "Test failed after {} attempts. Last error: {}",
        MAX_RETRIES,
        last_error.unwrap_or_default()
    );
}

/// A registry plus a database name private to one test run.
#[derive(Clone)]
pub struct TestContext {
    database: String,
    registry: ConnectionRegistry,
}

impl TestContext {
    pub fn new(database: String, registry: ConnectionRegistry) -> Self {
        Self { database, registry }
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn registry(&self) -> ConnectionRegistry {
        self.registry.clone()
    }

    /// A client for `T` whose database is redirected to this context's
    /// database. Everything else comes from `T`'s storage attributes.
    pub fn client<T: Storable>(&self) -> DocstashResult<DocumentClient<T>> {
        let config = T::storage_config()?
            .to_builder()
            .database(&self.database)
            .build()?;
        Ok(DocumentClient::with_config(self.registry(), config))
    }
}

pub fn random_database() -> String {
    format!("test_{}", uuid::Uuid::new_v4().simple())
}

#[cfg(not(feature = "mongodb"))]
pub fn create_test_context() -> DocstashResult<TestContext> {
    Ok(TestContext::new(random_database(), ConnectionRegistry::in_memory()))
}

#[cfg(feature = "mongodb")]
pub fn create_test_context() -> DocstashResult<TestContext> {
    Ok(TestContext::new(random_database(), ConnectionRegistry::mongo()))
}

#[cfg(not(feature = "mongodb"))]
pub fn cleanup(_ctx: TestContext) -> DocstashResult<()> {
    Ok(())
}

#[cfg(feature = "mongodb")]
pub fn cleanup(ctx: TestContext) -> DocstashResult<()> {
    use docstash::common::{DEFAULT_HOST, DEFAULT_PORT};
    use mongodb::options::{ClientOptions, ServerAddress};
    use mongodb::sync::Client;

    let options = ClientOptions::builder()
        .hosts(vec![ServerAddress::Tcp {
            host: DEFAULT_HOST.to_string(),
            port: Some(DEFAULT_PORT),
        }])
        .build();
    let client = Client::with_options(options)?;
    client.database(ctx.database()).drop(None)?;
    Ok(())
}
