use std::collections::{HashMap, hash_map::Entry};

use crate::{Entity, EntityId};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum CatalogError {
    #[display("entity id {id} appears more than once (rows {first_row} and {second_row})")]
    DuplicateEntityId {
        id: EntityId,
        first_row: usize,
        second_row: usize,
    },
}

/// The table of entities, indexed by id.
///
/// Rows keep their source order; lookups by [`EntityId`] go through a hash index
/// built once at construction.
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    entities: Vec<Entity>,
    index: HashMap<EntityId, usize>,
}

impl EntityCatalog {
    /// Builds a catalog, rejecting duplicate ids.
    pub fn new(entities: Vec<Entity>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(entities.len());
        for (row, entity) in entities.iter().enumerate() {
            match index.entry(entity.id) {
                Entry::Occupied(entry) => {
                    return Err(CatalogError::DuplicateEntityId {
                        id: entity.id,
                        first_row: *entry.get(),
                        second_row: row,
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(row);
                }
            }
        }
        Ok(Self { entities, index })
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index.get(&id).map(|&row| &self.entities[row])
    }

    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<'a> IntoIterator for &'a EntityCatalog {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}
