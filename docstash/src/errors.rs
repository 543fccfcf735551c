use backtrace::Backtrace;
use parking_lot::Mutex;
use serde::{de, ser};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;
use std::sync::Arc;

/// Error kinds for docstash operations.
///
/// A lookup miss is not an error: `load` returns `Ok(None)` and `exists`
/// returns `Ok(false)`.
///
/// # Examples
///
/// ```rust
/// use docstash::errors::{DocstashError, ErrorKind, DocstashResult};
///
/// fn example() -> DocstashResult<()> {
///     Err(DocstashError::new("key value is null", ErrorKind::InvalidArgument))
/// }
///
/// assert_eq!(example().unwrap_err().kind(), &ErrorKind::InvalidArgument);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// The store could not be reached, or the database/collection could not be resolved
    ConnectionError,
    /// A write failed after the connection succeeded
    StoreError,
    /// A required argument (usually the key value) is missing or null
    InvalidArgument,
    /// Packing an object into a record or unpacking it back failed
    ObjectMappingError,
    /// The storage configuration is incomplete or malformed
    InvalidConfiguration,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ConnectionError => write!(f, "Connection error"),
            ErrorKind::StoreError => write!(f, "Store error"),
            ErrorKind::InvalidArgument => write!(f, "Invalid argument"),
            ErrorKind::ObjectMappingError => write!(f, "Object mapping error"),
            ErrorKind::InvalidConfiguration => write!(f, "Invalid configuration"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Error type returned by every fallible docstash operation.
///
/// Carries a message, an [`ErrorKind`], an optional cause and a backtrace
/// captured at construction. The backtrace is resolved lazily, the first
/// time the error is printed with `{:?}`.
#[derive(Clone)]
pub struct DocstashError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<DocstashError>>,
    backtrace: Arc<Mutex<Backtrace>>,
}

impl DocstashError {
    /// Creates a new `DocstashError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        DocstashError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Arc::new(Mutex::new(Backtrace::new_unresolved())),
        }
    }

    /// Creates a new `DocstashError` wrapping an underlying cause.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: DocstashError) -> Self {
        DocstashError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Arc::new(Mutex::new(Backtrace::new_unresolved())),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&DocstashError> {
        self.cause.as_deref()
    }
}

impl Display for DocstashError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for DocstashError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => {
                let mut backtrace = self.backtrace.lock();
                backtrace.resolve();
                write!(f, "{}\n{:?}", self.message, *backtrace)
            }
        }
    }
}

impl Error for DocstashError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// `DocstashResult<T>` is shorthand for `Result<T, DocstashError>`.
pub type DocstashResult<T> = Result<T, DocstashError>;

impl de::Error for DocstashError {
    fn custom<T: Display>(msg: T) -> Self {
        DocstashError::new(&msg.to_string(), ErrorKind::ObjectMappingError)
    }
}

impl ser::Error for DocstashError {
    fn custom<T: Display>(msg: T) -> Self {
        DocstashError::new(&msg.to_string(), ErrorKind::ObjectMappingError)
    }
}

impl From<bson::ser::Error> for DocstashError {
    fn from(err: bson::ser::Error) -> Self {
        DocstashError::new(
            &format!("Failed to pack value into a record: {}", err),
            ErrorKind::ObjectMappingError,
        )
    }
}

impl From<bson::de::Error> for DocstashError {
    fn from(err: bson::de::Error) -> Self {
        DocstashError::new(
            &format!("Failed to unpack record: {}", err),
            ErrorKind::ObjectMappingError,
        )
    }
}

#[cfg(feature = "mongodb")]
impl From<mongodb::error::Error> for DocstashError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind as DriverErrorKind;

        let error_kind = match err.kind.as_ref() {
            DriverErrorKind::Io(_)
            | DriverErrorKind::ServerSelection { .. }
            | DriverErrorKind::Authentication { .. }
            | DriverErrorKind::DnsResolve { .. }
            | DriverErrorKind::ConnectionPoolCleared { .. }
            | DriverErrorKind::InvalidArgument { .. } => ErrorKind::ConnectionError,
            DriverErrorKind::Write(_) | DriverErrorKind::BulkWrite(_) => ErrorKind::StoreError,
            DriverErrorKind::BsonSerialization(_) | DriverErrorKind::BsonDeserialization(_) => {
                ErrorKind::ObjectMappingError
            }
            _ => ErrorKind::InternalError,
        };
        DocstashError::new(&format!("MongoDB driver error: {}", err), error_kind)
    }
}
