// Cloak - Document pseudonymization tool
// Copyright (c) 2025 Cloak Contributors
// Licensed under the MIT License

//! # Cloak - Document Pseudonymization
//!
//! Cloak is a command-line tool that pseudonymizes personal data in text
//! documents. Detected strings are grouped into variants of one entity and
//! replaced with stable ids, so "John Doe", "Jon Doe" and "J. Doe" all
//! become `<PERSON_1>` everywhere they appear.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Detecting** personal data with a regex recognizer catalog
//! - **Clustering** detected strings into variants of one real-world entity
//! - **Minting** stable `<LABEL_n>` replacement ids per entity
//! - **Substituting** every variant occurrence across supported file formats
//!
//! ## Architecture
//!
//! Cloak follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (normalize, cluster, substitute, audit)
//! - [`adapters`] - Recognizers and document format handling
//! - [`domain`] - Core domain types and models
//! - [`config`] - Settings and replacements file management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cloak::config::load_replacements;
//! use cloak::core::substitute::{OutputPolicy, SubstitutionEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load the reviewed replacements file
//!     let registry = load_replacements("replacements.yaml")?;
//!
//!     // Build a substitution engine
//!     let engine = SubstitutionEngine::new(&registry, &OutputPolicy::default())?;
//!
//!     // Rewrite a document
//!     let result = engine.anonymize("John Doe called on 12 34 56 78.");
//!
//!     println!("Replaced {} occurrences", result.counts.total_replaced());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! ### Variant Clustering
//!
//! Real documents spell the same person several ways. Cloak groups
//! detected strings by normalized similarity, then folds abbreviations
//! like "J. Doe" into the cluster they unambiguously belong to:
//!
//! ```rust,no_run
//! use cloak::core::cluster::cluster_category;
//! use cloak::domain::EntityCategory;
//!
//! # fn example() {
//! let detected = vec![
//!     "John Doe".to_string(),
//!     "Jon Doe".to_string(),
//!     "J. Doe".to_string(),
//! ];
//!
//! // All three spellings group as variants of one person
//! let clusters = cluster_category(EntityCategory::Person, &detected, None, &[]);
//! assert_eq!(clusters.len(), 1);
//! # }
//! ```
//!
//! ### Deterministic Substitution
//!
//! Ids are assigned in cluster order and substitution is longest-variant
//! first, so rerunning a document with the same replacements file always
//! produces the same output. Numeric categories can be quoted to keep
//! downstream parsers from reading ids as malformed numbers:
//!
//! ```rust,no_run
//! use cloak::core::registry::Registry;
//! use cloak::core::substitute::{OutputPolicy, SubstitutionEngine};
//! use cloak::domain::EntityCategory;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = Registry::new();
//! registry.assign_ids(
//!     EntityCategory::PhoneNumber,
//!     vec![vec!["12 34 56 78".to_string()]],
//! );
//!
//! let engine = SubstitutionEngine::new(&registry, &OutputPolicy::default())?;
//! let result = engine.anonymize("Call 12 34 56 78 today.");
//! assert_eq!(result.text, "Call \"<PHONE_NUMBER_1>\" today.");
//! # Ok(())
//! # }
//! ```
//!
//! ### File Formats
//!
//! Markdown, plain text, LaTeX and BibTeX documents are handled end to
//! end, with format-aware extraction and rewriting:
//!
//! ```rust,no_run
//! use cloak::adapters::formats::{anonymize_file, default_output_path};
//! # use cloak::core::registry::Registry;
//! # use cloak::core::substitute::{OutputPolicy, SubstitutionEngine};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! # let registry = Registry::new();
//! # let engine = SubstitutionEngine::new(&registry, &OutputPolicy::default())?;
//! let input = Path::new("notes.md");
//! let document = anonymize_file(input, &engine)?;
//!
//! std::fs::write(default_output_path(input), &document.content)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Cloak uses the [`domain::CloakError`] type for all errors, following
//! Rust best practices:
//!
//! ```rust,no_run
//! use cloak::domain::CloakError;
//!
//! fn example() -> Result<(), CloakError> {
//!     // Errors are automatically converted using the ? operator
//!     let _registry = cloak::config::parse_replacements("PERSON: []")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Cloak uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn, error};
//!
//! # let err = std::io::Error::new(std::io::ErrorKind::Other, "unreadable");
//! info!("Starting extraction");
//! warn!(category = "PERSON", "No entities found");
//! error!(error = ?err, "Anonymization failed");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
