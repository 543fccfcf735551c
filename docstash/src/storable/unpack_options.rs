use crate::storable::Record;
use bson::Bson;

/// Options forwarded to [`Packable::unpack`](crate::storable::Packable::unpack)
/// by [`DocumentClient::load`](crate::client::DocumentClient::load).
///
/// - `inject`: fields laid over the loaded record before unpacking, for
///   values that are supplied at load time rather than stored.
/// - `strip_id`: whether the client removes the store-generated `_id`
///   before unpacking (default `true`). Ignored when the key attribute is
///   `_id` itself.
///
/// # Examples
///
/// ```rust
/// use docstash::storable::UnpackOptions;
/// use bson::doc;
///
/// let options = UnpackOptions::new().inject("loaded_by", "nightly-job");
/// let record = options.apply(doc! { "doc_id": "foo12" });
/// assert_eq!(record.get_str("loaded_by").unwrap(), "nightly-job");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UnpackOptions {
    inject: Record,
    strip_id: bool,
}

impl Default for UnpackOptions {
    fn default() -> Self {
        UnpackOptions {
            inject: Record::new(),
            strip_id: true,
        }
    }
}

impl UnpackOptions {
    pub fn new() -> Self {
        UnpackOptions::default()
    }

    /// Adds one field to inject; later calls win over earlier ones.
    pub fn inject(mut self, key: &str, value: impl Into<Bson>) -> Self {
        self.inject.insert(key, value.into());
        self
    }

    /// Adds every field of `fields` to inject.
    pub fn inject_all(mut self, fields: Record) -> Self {
        for (key, value) in fields {
            self.inject.insert(key, value);
        }
        self
    }

    /// Keeps the store's `_id` in the record handed to `unpack`.
    pub fn keep_id(mut self) -> Self {
        self.strip_id = false;
        self
    }

    pub fn injected(&self) -> &Record {
        &self.inject
    }

    pub fn strip_id(&self) -> bool {
        self.strip_id
    }

    /// Lays the injected fields over `record`.
    pub fn apply(&self, mut record: Record) -> Record {
        for (key, value) in self.inject.iter() {
            record.insert(key.clone(), value.clone());
        }
        record
    }
}
