//! Crate-wide result alias.

use super::errors::CloakError;

/// Shorthand for `std::result::Result` with a [`CloakError`] payload.
/// Fallible functions below the CLI layer return this type.
pub type Result<T> = std::result::Result<T, CloakError>;
