// record constants
pub const DOC_ID: &str = "_id";

// connection defaults
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 27017;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_SOCKET_TIMEOUT_MS: u64 = 30_000;

// name constraints
pub const INVALID_DATABASE_CHARS: [char; 7] = ['/', '\\', '.', ' ', '"', '$', '\0'];
pub const INVALID_COLLECTION_CHARS: [char; 2] = ['$', '\0'];
pub const SYSTEM_COLLECTION_PREFIX: &str = "system.";
