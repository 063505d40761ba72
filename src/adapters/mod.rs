//! Boundary layer between documents and the anonymization core.
//!
//! This module provides adapters for the two outward-facing concerns:
//!
//! - [`recognizer`] - PII span detection over raw text (pattern catalog
//!   plus a digit-density heuristic)
//! - [`formats`] - reading and rewriting the supported document types
//!   (markdown, plain text, LaTeX, BibTeX)
//!
//! # Design Pattern
//!
//! Recognizers follow a trait-based design so detection sources can be
//! combined and replaced with mock implementations in tests:
//!
//! ```rust
//! use cloak::adapters::recognizer::{CompositeRecognizer, PatternRecognizer, Recognizer};
//!
//! # fn example() -> cloak::domain::Result<()> {
//! let patterns = PatternRecognizer::bundled()?;
//! let recognizer = CompositeRecognizer::standard(patterns);
//! let spans = recognizer.detect("Write to maria.garcia@example.com", "en")?;
//! assert_eq!(spans[0].label, "EMAIL_ADDRESS");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod formats;
pub mod recognizer;
