//! Replacements file persistence
//!
//! The replacements file is the YAML contract between `extract` and
//! `pseudo`: top-level keys are category labels, each holding a list
//! of entities (`id`, `variants`, optional `pattern`). Categories are
//! written in their canonical order so diffs stay stable across runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::core::registry::Registry;
use crate::domain::errors::CloakError;
use crate::domain::result::Result;
use crate::domain::{Entity, EntityCategory};

/// Parses replacements YAML into a validated [`Registry`].
///
/// # Errors
///
/// Returns an error if the YAML is malformed, a top-level key is not a
/// known category label, or the resulting registry fails validation.
pub fn parse_replacements(content: &str) -> Result<Registry> {
    if content.trim().is_empty() {
        return Ok(Registry::new());
    }

    let raw: BTreeMap<String, Vec<Entity>> = serde_yaml::from_str(content)
        .map_err(|e| CloakError::Configuration(format!("Malformed replacements file: {}", e)))?;

    let mut registry = Registry::new();
    for (label, entities) in raw {
        let category = EntityCategory::from_label(&label)?;
        for entity in entities {
            registry.insert(category, entity);
        }
    }
    registry.validate()?;
    Ok(registry)
}

/// Loads and validates the replacements file at `path`.
pub fn load_replacements(path: impl AsRef<Path>) -> Result<Registry> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CloakError::Configuration(format!(
            "Replacements file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CloakError::Configuration(format!(
            "Failed to read replacements file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_replacements(&contents)
}

/// Renders `registry` as replacements YAML.
///
/// Categories appear in canonical declaration order; empty categories
/// are skipped.
pub fn to_yaml(registry: &Registry) -> Result<String> {
    let mut document = serde_yaml::Mapping::new();
    for category in EntityCategory::ALL {
        let entities = registry.entities(category);
        if entities.is_empty() {
            continue;
        }
        document.insert(
            serde_yaml::Value::String(category.label().to_string()),
            serde_yaml::to_value(entities)?,
        );
    }
    Ok(serde_yaml::to_string(&document)?)
}

/// Writes `registry` to `path`, creating parent directories as needed.
pub fn save_replacements(path: impl AsRef<Path>, registry: &Registry) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, to_yaml(registry)?)?;
    Ok(())
}
