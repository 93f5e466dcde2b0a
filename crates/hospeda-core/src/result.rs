//! Result type aliases for Hospeda.

use crate::HospedaError;

/// A specialized `Result` type for Hospeda operations.
pub type HospedaResult<T> = Result<T, HospedaError>;
