//! Entity registry
//!
//! Owns the category-to-entities mapping produced by clustering and
//! consumed by substitution. Ids are minted here and nowhere else, in
//! cluster order, so a re-run over identical detections reproduces
//! identical ids.

use crate::domain::{CloakError, Entity, EntityCategory, EntityId, Result};
use std::collections::BTreeMap;

/// Registry of pseudonymized entities, keyed by category.
///
/// Categories iterate in canonical order regardless of insertion order.
/// A registry loaded from a replacements file and one built live from
/// the same detections behave identically under substitution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    entities: BTreeMap<EntityCategory, Vec<Entity>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints ids for `clusters` and appends the resulting entities.
    ///
    /// Ids are `<LABEL_n>` with `n` continuing from the entities the
    /// category already holds, so repeated calls never reuse an
    /// ordinal. Empty clusters are skipped without consuming one.
    /// Returns the category's full entity list.
    pub fn assign_ids(&mut self, category: EntityCategory, clusters: Vec<Vec<String>>) -> &[Entity] {
        let list = self.entities.entry(category).or_default();
        for cluster in clusters {
            if cluster.is_empty() {
                continue;
            }
            let id = EntityId::new(category, list.len() + 1);
            list.push(Entity::new(id, cluster));
        }
        list
    }

    /// Appends an already-built entity, for the load path. Callers are
    /// expected to run [`validate`](Self::validate) after bulk loading.
    pub fn insert(&mut self, category: EntityCategory, entity: Entity) {
        self.entities.entry(category).or_default().push(entity);
    }

    /// Checks every invariant substitution relies on: non-empty variant
    /// lists, parseable ids, ids filed under their own category, and
    /// strictly increasing ordinals within each category.
    pub fn validate(&self) -> Result<()> {
        for (category, entities) in &self.entities {
            let mut last_number = 0;
            for entity in entities {
                let field = format!("{}.{}", category.label(), entity.id);
                if entity.variants.is_empty() {
                    return Err(CloakError::Validation {
                        field,
                        message: "entity has no variants".to_string(),
                    });
                }
                if entity.variants.iter().any(|v| v.is_empty()) {
                    return Err(CloakError::Validation {
                        field,
                        message: "entity has an empty variant string".to_string(),
                    });
                }
                let id = EntityId::parse(&entity.id)?;
                if id.category() != *category {
                    return Err(CloakError::Validation {
                        field,
                        message: format!(
                            "id belongs to {} but is filed under {}",
                            id.category().label(),
                            category.label()
                        ),
                    });
                }
                if id.number() <= last_number {
                    return Err(CloakError::Validation {
                        field,
                        message: "ids must be strictly increasing within a category".to_string(),
                    });
                }
                last_number = id.number();
            }
        }
        Ok(())
    }

    /// Entities of one category, empty if the category has none.
    pub fn entities(&self, category: EntityCategory) -> &[Entity] {
        self.entities
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Mutable access to one category's entities, for attaching format
    /// descriptors after minting.
    pub fn entities_mut(&mut self, category: EntityCategory) -> impl Iterator<Item = &mut Entity> {
        self.entities.entry(category).or_default().iter_mut()
    }

    /// Iterates categories in canonical order with their entities.
    pub fn iter(&self) -> impl Iterator<Item = (EntityCategory, &[Entity])> {
        self.entities
            .iter()
            .map(|(category, list)| (*category, list.as_slice()))
    }

    pub fn total_entities(&self) -> usize {
        self.entities.values().map(Vec::len).sum()
    }

    pub fn total_variants(&self) -> usize {
        self.entities
            .values()
            .flat_map(|list| list.iter())
            .map(|entity| entity.variants.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_entities() == 0
    }

    /// Inverted view for export: category label to variant to id.
    pub fn variant_map(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        let mut map = BTreeMap::new();
        for (category, entities) in &self.entities {
            if entities.is_empty() {
                continue;
            }
            let inner: &mut BTreeMap<String, String> =
                map.entry(category.label().to_string()).or_default();
            for entity in entities {
                for variant in &entity.variants {
                    inner.insert(variant.clone(), entity.id.clone());
                }
            }
        }
        map
    }
}
