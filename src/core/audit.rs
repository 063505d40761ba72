//! Audit logger for substitution runs

use crate::core::registry::Registry;
use crate::domain::ReplacementCounts;
use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Audit log entry, one JSON line per processed document
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    document: String,
    total_found: usize,
    total_replaced: usize,
    counts: BTreeMap<String, usize>,
    entities: Vec<AuditEntity>,
}

/// Audit entity entry (with hashed variants)
#[derive(Debug, Serialize)]
struct AuditEntity {
    id: String,
    category: String,
    /// SHA-256 hashes of the variant strings (never log plaintext PII)
    variant_hashes: Vec<String>,
}

/// Audit logger for substitution runs
pub struct AuditLogger {
    log_path: PathBuf,
    enabled: bool,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, enabled: bool) -> Result<Self> {
        if enabled {
            // Ensure parent directory exists
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self { log_path, enabled })
    }

    /// Log one document's substitution run. Only categories that
    /// actually replaced something contribute entity entries.
    pub fn record(
        &self,
        document: &str,
        registry: &Registry,
        counts: &ReplacementCounts,
    ) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let mut entities = Vec::new();
        for (category, list) in registry.iter() {
            if counts.replaced(category) == 0 {
                continue;
            }
            for entity in list {
                entities.push(AuditEntity {
                    id: entity.id.clone(),
                    category: category.label().to_string(),
                    variant_hashes: entity
                        .variants
                        .iter()
                        .map(|v| hash_variant(v))
                        .collect(),
                });
            }
        }

        let entry = AuditLogEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            document: document.to_string(),
            total_found: counts.total_found(),
            total_replaced: counts.total_replaced(),
            counts: counts.to_flat_map(),
            entities,
        };

        self.write_entry(&entry)
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        let json_line = serde_json::to_string(entry).context("Failed to serialize audit entry")?;
        writeln!(file, "{json_line}").context("Failed to write audit entry")?;

        Ok(())
    }
}

/// Hash a variant string using SHA-256
fn hash_variant(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}
