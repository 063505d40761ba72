//! Core pseudonymization pipeline for Cloak.
//!
//! This module contains the pure, single-threaded transformations at
//! the heart of the tool. Nothing here performs I/O except the audit
//! logger; everything else maps strings to strings and is trivially
//! parallelizable across documents as long as each run owns its
//! Registry.
//!
//! # Modules
//!
//! - [`normalize`] - Canonical forms compared during clustering
//! - [`similarity`] - 0 to 100 similarity scoring
//! - [`cluster`] - Seed-linkage variant clustering and abbreviation merging
//! - [`registry`] - Entity registry and id minting
//! - [`substitute`] - Deterministic variant-to-id substitution
//! - [`audit`] - Append-only audit trail of substitution runs
//!
//! # Pipeline
//!
//! The typical flow from detections to rewritten text:
//!
//! 1. **Cluster**: group each category's detected strings into variant
//!    clusters
//! 2. **Mint ids**: assign `<LABEL_n>` ids in cluster order
//! 3. **Persist**: write the registry to a replacements file for review
//! 4. **Substitute**: replace every variant with its id, longest first
//! 5. **Audit** (optional): append a hashed record of the run
//!
//! # Example
//!
//! ```rust
//! use cloak::core::cluster::cluster_category;
//! use cloak::core::registry::Registry;
//! use cloak::core::substitute::{OutputPolicy, SubstitutionEngine};
//! use cloak::domain::EntityCategory;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let detected = vec!["John Doe".to_string(), "Jon Doe".to_string()];
//! let clusters = cluster_category(EntityCategory::Person, &detected, None, &[]);
//!
//! let mut registry = Registry::new();
//! registry.assign_ids(EntityCategory::Person, clusters);
//!
//! let engine = SubstitutionEngine::new(&registry, &OutputPolicy::default())?;
//! let result = engine.anonymize("John Doe wrote to Jon Doe.");
//! assert_eq!(result.text, "<PERSON_1> wrote to <PERSON_1>.");
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod cluster;
pub mod normalize;
pub mod registry;
pub mod similarity;
pub mod substitute;
