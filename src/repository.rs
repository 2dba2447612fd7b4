/// Error enumeration shared by the storage adapters.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Numeric suffix of a generated `prefix-NNNNNN` id, if it has one.
///
/// Ordering generated ids by this value keeps `apr-1000000` after `apr-999999`.
pub fn sequence_number(id: &str) -> Option<u64> {
    id.rsplit_once('-')
        .and_then(|(_, digits)| digits.parse::<u64>().ok())
}
