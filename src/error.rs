use thiserror::Error;

/// Errors raised by [`Collection`](crate::Collection) operations.
///
/// Both variants are raised synchronously at the offending call; no partial
/// work happens before the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// A random draw or an unseeded reduction needs at least one entry.
    #[error("cannot draw from an empty collection")]
    EmptyCollection,

    /// Deep equality was requested, but no deep-equality function has been
    /// installed on this collection.
    #[error("deep equality requested without an installed deep-equality function")]
    MissingDeepEqual,
}
