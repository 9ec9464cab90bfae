// Query matching over cached repositories.
// Case-insensitive substring match on the repository name only.

use crate::repo::RepositoryRecord;

/// True if `query` (case-insensitively) occurs in the record's name.
/// An empty query matches everything.
pub fn matches(record: &RepositoryRecord, query: &str) -> bool {
    record.name.to_lowercase().contains(&query.to_lowercase())
}

/// Records matching `query`, in cache order.
pub fn filter<'a>(
    records: &'a [RepositoryRecord],
    query: &str,
) -> impl Iterator<Item = &'a RepositoryRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(move |record| record.name.to_lowercase().contains(&needle))
}
