//! Entity and entity id types
//!
//! An entity is one real-world referent (a person, a phone number)
//! together with all the surface variants the detector grouped for it.
//! Its id is the replacement token substituted into documents.

use crate::domain::category::EntityCategory;
use crate::domain::errors::CloakError;
use crate::domain::result::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Replacement token identity: a category label plus a 1-based ordinal.
///
/// Rendered as `<LABEL_n>`, e.g. `<PERSON_3>`. Ordinals within a
/// category are assigned in cluster order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    category: EntityCategory,
    number: usize,
}

impl EntityId {
    /// Creates an id. Numbering starts at 1; ordinal 0 is never minted.
    pub fn new(category: EntityCategory, number: usize) -> Self {
        Self { category, number }
    }

    pub fn category(&self) -> EntityCategory {
        self.category
    }

    pub fn number(&self) -> usize {
        self.number
    }

    /// Parses an id string of the form `<LABEL_n>`.
    ///
    /// # Errors
    ///
    /// Returns `CloakError::Validation` when the delimiters are missing,
    /// the label is not a known category, or the ordinal is not a
    /// positive integer.
    pub fn parse(s: &str) -> Result<Self> {
        let inner = s
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .ok_or_else(|| CloakError::Validation {
                field: "id".to_string(),
                message: format!("Replacement id must look like <LABEL_n>, got: {s}"),
            })?;

        let (label, ordinal) = inner.rsplit_once('_').ok_or_else(|| CloakError::Validation {
            field: "id".to_string(),
            message: format!("Replacement id is missing an ordinal: {s}"),
        })?;

        let category =
            EntityCategory::from_label(label).map_err(|_| CloakError::Validation {
                field: "id".to_string(),
                message: format!("Replacement id has unknown category label: {s}"),
            })?;

        let number: usize = ordinal.parse().map_err(|_| CloakError::Validation {
            field: "id".to_string(),
            message: format!("Replacement id ordinal is not a number: {s}"),
        })?;
        if number == 0 {
            return Err(CloakError::Validation {
                field: "id".to_string(),
                message: format!("Replacement id ordinals start at 1: {s}"),
            });
        }

        Ok(Self { category, number })
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}_{}>", self.category.label(), self.number)
    }
}

impl FromStr for EntityId {
    type Err = CloakError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// One pseudonymized entity: a replacement id and the detected surface
/// strings it stands for.
///
/// The id is stored as its rendered string so replacement files stay
/// hand-editable; [`EntityId::parse`] re-validates it on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entity {
    /// Replacement token, e.g. `<PERSON_1>`.
    pub id: String,
    /// Surface variants in first-detection order, duplicates removed.
    pub variants: Vec<String>,
    /// Optional format descriptor for numeric entities, recorded so a
    /// reviewer can see which recognizer shape matched the variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Entity {
    /// Builds an entity, dropping duplicate variants while keeping the
    /// first occurrence of each.
    pub fn new(id: EntityId, variants: Vec<String>) -> Self {
        let mut seen = HashSet::new();
        let variants = variants
            .into_iter()
            .filter(|v| seen.insert(v.clone()))
            .collect();
        Self {
            id: id.to_string(),
            variants,
            pattern: None,
        }
    }

    pub fn with_pattern(mut self, pattern: Option<String>) -> Self {
        self.pattern = pattern;
        self
    }

    /// The variant with the most characters, ties going to the earlier
    /// one. Used as the cluster representative.
    pub fn longest_variant(&self) -> Option<&str> {
        self.variants
            .iter()
            .fold(None::<&str>, |best, v| match best {
                Some(b) if v.chars().count() <= b.chars().count() => Some(b),
                _ => Some(v.as_str()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_renders_with_angle_brackets() {
        let id = EntityId::new(EntityCategory::Person, 3);
        assert_eq!(id.to_string(), "<PERSON_3>");
    }

    #[test]
    fn test_id_parse_round_trip() {
        let id = EntityId::parse("<PHONE_NUMBER_12>").unwrap();
        assert_eq!(id.category(), EntityCategory::PhoneNumber);
        assert_eq!(id.number(), 12);
        assert_eq!(id.to_string(), "<PHONE_NUMBER_12>");
    }

    #[test]
    fn test_id_parse_rejects_missing_brackets() {
        assert!(EntityId::parse("PERSON_1").is_err());
    }

    #[test]
    fn test_id_parse_rejects_unknown_label() {
        let err = EntityId::parse("<WIDGET_1>").unwrap_err();
        assert!(err.to_string().contains("unknown category label"));
    }

    #[test]
    fn test_id_parse_rejects_zero_ordinal() {
        assert!(EntityId::parse("<PERSON_0>").is_err());
    }

    #[test]
    fn test_id_parse_rejects_non_numeric_ordinal() {
        assert!(EntityId::parse("<PERSON_one>").is_err());
    }

    #[test]
    fn test_id_implements_from_str() {
        let id: EntityId = "<LOCATION_2>".parse().unwrap();
        assert_eq!(id.category(), EntityCategory::Location);
    }

    #[test]
    fn test_entity_dedups_variants_keeping_first() {
        let entity = Entity::new(
            EntityId::new(EntityCategory::Person, 1),
            vec![
                "John Doe".to_string(),
                "john doe".to_string(),
                "John Doe".to_string(),
            ],
        );
        assert_eq!(entity.variants, vec!["John Doe", "john doe"]);
    }

    #[test]
    fn test_longest_variant_prefers_earlier_on_tie() {
        let entity = Entity::new(
            EntityId::new(EntityCategory::Person, 1),
            vec!["Jane Doe".to_string(), "John Doe".to_string()],
        );
        assert_eq!(entity.longest_variant(), Some("Jane Doe"));
    }

    #[test]
    fn test_longest_variant_counts_chars_not_bytes() {
        let entity = Entity::new(
            EntityId::new(EntityCategory::Person, 1),
            vec!["Søren Å".to_string(), "Ab Cdefg".to_string()],
        );
        assert_eq!(entity.longest_variant(), Some("Ab Cdefg"));
    }

    #[test]
    fn test_pattern_is_omitted_from_serialization_when_absent() {
        let entity = Entity::new(
            EntityId::new(EntityCategory::Email, 1),
            vec!["a@b.com".to_string()],
        );
        let yaml = serde_yaml::to_string(&entity).unwrap();
        assert!(!yaml.contains("pattern"));
    }
}
