use crate::storable::Record;
use bson::Bson;

/// Resolves a dotted field path (`authors.bsmith.name`) inside a record.
///
/// A path without dots is a plain top-level lookup. Returns `None` as soon
/// as a segment is missing or an intermediate value is not a document.
pub fn lookup_path<'a>(record: &'a Record, path: &str) -> Option<&'a Bson> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = record.get(first)?;
    for segment in segments {
        current = match current {
            Bson::Document(inner) => inner.get(segment)?,
            _ => return None,
        };
    }
    Some(current)
}
