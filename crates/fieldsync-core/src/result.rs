//! Result type aliases for Fieldsync.

use crate::FieldSyncError;

/// A specialized `Result` type for Fieldsync operations.
pub type FieldSyncResult<T> = Result<T, FieldSyncError>;
