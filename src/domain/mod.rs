//! Domain models and types for Cloak.
//!
//! This module contains the core domain models, types, and invariants
//! shared by every pipeline stage.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **The category vocabulary** ([`EntityCategory`], [`Grouping`])
//! - **Entities and replacement ids** ([`Entity`], [`EntityId`])
//! - **Substitution counters** ([`ReplacementCounts`])
//! - **Error types** ([`CloakError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Replacement ids are persisted as plain strings so replacement files
//! stay hand-editable, but every load path re-parses them through
//! [`EntityId`] before substitution runs:
//!
//! ```rust
//! use cloak::domain::{EntityCategory, EntityId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let id = EntityId::parse("<PERSON_1>")?;
//! assert_eq!(id.category(), EntityCategory::Person);
//! assert_eq!(id.number(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, CloakError>`]:
//!
//! ```rust
//! use cloak::domain::{CloakError, Result};
//!
//! fn example(id: &str) -> Result<()> {
//!     // Errors are automatically converted using the ? operator
//!     let _parsed = cloak::domain::EntityId::parse(id)?;
//!     Ok(())
//! }
//! ```

pub mod category;
pub mod counts;
pub mod entity;
pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use category::{EntityCategory, Grouping};
pub use counts::ReplacementCounts;
pub use entity::{Entity, EntityId};
pub use errors::CloakError;
pub use result::Result;
