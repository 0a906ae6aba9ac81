//! Mean attribute profile of legendary and non-legendary entities.

use std::fmt;

use pokestat_data::{Attribute, Entity, EntityCatalog};
use pokestat_stats::descriptive::DescriptiveStats;
use serde::{Deserialize, Serialize};

/// Which entities a profile row averages over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileGroup {
    Legendary,
    NonLegendary,
    Overall,
}

impl ProfileGroup {
    pub const ALL: [ProfileGroup; 3] = [
        ProfileGroup::Legendary,
        ProfileGroup::NonLegendary,
        ProfileGroup::Overall,
    ];

    #[must_use]
    pub fn contains(self, entity: &Entity) -> bool {
        match self {
            ProfileGroup::Legendary => entity.is_legendary(),
            ProfileGroup::NonLegendary => !entity.is_legendary(),
            ProfileGroup::Overall => true,
        }
    }
}

impl fmt::Display for ProfileGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProfileGroup::Legendary => "Legendary",
            ProfileGroup::NonLegendary => "Non-legendary",
            ProfileGroup::Overall => "Overall",
        };
        f.write_str(name)
    }
}

/// Mean of one attribute over one group, in long format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeMean {
    pub group: ProfileGroup,
    pub attribute: Attribute,
    pub mean: f64,
}

/// Averages the six attributes per [`ProfileGroup`].
///
/// Rows come grouped in [`ProfileGroup::ALL`] order with attributes in
/// [`Attribute::ALL`] order. A group without members has no rows.
#[must_use]
pub fn attribute_profile(catalog: &EntityCatalog) -> Vec<AttributeMean> {
    let mut rows = Vec::with_capacity(ProfileGroup::ALL.len() * Attribute::ALL.len());
    for group in ProfileGroup::ALL {
        let members = catalog
            .iter()
            .filter(|entity| group.contains(entity))
            .collect::<Vec<_>>();
        for attribute in Attribute::ALL {
            let values = members.iter().map(|entity| entity.attribute(attribute));
            if let Some((mean, _)) = DescriptiveStats::mean_std(values) {
                rows.push(AttributeMean {
                    group,
                    attribute,
                    mean,
                });
            }
        }
    }
    tracing::debug!(
        entities = catalog.len(),
        rows = rows.len(),
        "computed attribute profile"
    );
    rows
}

/// Looks up one cell of a profile; `None` if the group has no members.
#[must_use]
pub fn mean_of(rows: &[AttributeMean], group: ProfileGroup, attribute: Attribute) -> Option<f64> {
    rows.iter()
        .find(|row| row.group == group && row.attribute == attribute)
        .map(|row| row.mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{pikachu_mewtwo, starters};

    #[test]
    fn test_groups() {
        let rows = attribute_profile(&pikachu_mewtwo());
        assert_eq!(rows.len(), 18);
        let hp = |group| mean_of(&rows, group, Attribute::Hp);
        assert_eq!(hp(ProfileGroup::Legendary), Some(106.0));
        assert_eq!(hp(ProfileGroup::NonLegendary), Some(35.0));
        assert_eq!(hp(ProfileGroup::Overall), Some(70.5));
        let speed = mean_of(&rows, ProfileGroup::Overall, Attribute::Speed);
        assert_eq!(speed, Some(110.0));
    }

    #[test]
    fn test_order() {
        let rows = attribute_profile(&starters());
        assert_eq!(rows[0].group, ProfileGroup::Legendary);
        assert_eq!(rows[0].attribute, Attribute::Hp);
        assert_eq!(rows[5].attribute, Attribute::Speed);
        assert_eq!(rows[6].group, ProfileGroup::NonLegendary);
        assert_eq!(rows[17].group, ProfileGroup::Overall);
    }

    #[test]
    fn test_empty_group_is_omitted() {
        let catalog = EntityCatalog::new(
            starters()
                .iter()
                .filter(|entity| !entity.is_legendary())
                .cloned()
                .collect(),
        )
        .unwrap();
        let rows = attribute_profile(&catalog);
        assert_eq!(rows.len(), 12);
        assert!(rows.iter().all(|row| row.group != ProfileGroup::Legendary));
        assert_eq!(mean_of(&rows, ProfileGroup::Legendary, Attribute::Hp), None);
    }

    #[test]
    fn test_empty_catalog() {
        assert!(attribute_profile(&EntityCatalog::default()).is_empty());
    }
}
