use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier of a Pokémon in the entity catalog.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct EntityId(pub i64);

/// The six numeric battle attributes every entity carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Hp,
    Attack,
    Defense,
    SpAttack,
    SpDefense,
    Speed,
}

impl Attribute {
    /// All attributes in column order.
    pub const ALL: [Attribute; 6] = [
        Attribute::Hp,
        Attribute::Attack,
        Attribute::Defense,
        Attribute::SpAttack,
        Attribute::SpDefense,
        Attribute::Speed,
    ];

    /// Column name in the entity table (e.g. `sp_attack`).
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Attribute::Hp => "hp",
            Attribute::Attack => "attack",
            Attribute::Defense => "defense",
            Attribute::SpAttack => "sp_attack",
            Attribute::SpDefense => "sp_defense",
            Attribute::Speed => "speed",
        }
    }

    /// Human-readable name (e.g. `Sp. Attack`).
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Attribute::Hp => "HP",
            Attribute::Attack => "Attack",
            Attribute::Defense => "Defense",
            Attribute::SpAttack => "Sp. Attack",
            Attribute::SpDefense => "Sp. Defense",
            Attribute::Speed => "Speed",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.display_name(), f)
    }
}

/// Raw `legendary` cell as found in the source data.
///
/// Sources encode the flag either as a JSON boolean or as a string; any other
/// JSON value is kept verbatim so that it can be normalized (to `false`)
/// instead of failing the load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Legendary {
    Bool(bool),
    Text(String),
    Other(serde_json::Value),
}

impl Legendary {
    #[must_use]
    pub fn is_legendary(&self) -> bool {
        normalize_legendary(self)
    }
}

impl From<bool> for Legendary {
    fn from(value: bool) -> Self {
        Legendary::Bool(value)
    }
}

/// Normalizes a raw `legendary` cell to a strict boolean.
///
/// | raw value                                   | result  |
/// |---------------------------------------------|---------|
/// | `true`                                      | `true`  |
/// | `false`                                     | `false` |
/// | `"true"`, `"True"` (any letter case)        | `true`  |
/// | `"false"`, `"False"` (any letter case)      | `false` |
/// | anything else (`"yes"`, `1`, `null`, …)     | `false` |
///
/// Unrecognized encodings are treated as "not legendary" rather than rejected.
///
/// # Examples
///
/// ```
/// use pokestat_data::{Legendary, normalize_legendary};
///
/// assert!(normalize_legendary(&Legendary::Text("True".into())));
/// assert!(!normalize_legendary(&Legendary::Text("maybe".into())));
/// ```
#[must_use]
pub fn normalize_legendary(raw: &Legendary) -> bool {
    match raw {
        Legendary::Bool(value) => *value,
        Legendary::Text(text) if text.eq_ignore_ascii_case("true") => true,
        Legendary::Text(_) | Legendary::Other(_) => false,
    }
}

/// The one or two category labels of an entity (e.g. `Fire/Flying`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TypeLabels {
    labels: Vec<String>,
}

impl TypeLabels {
    /// Splits a `types` cell into distinct labels.
    ///
    /// Only the first two `/`-separated parts are used. Parts are trimmed, empty
    /// parts are skipped and a repeated label is kept once.
    ///
    /// ```
    /// use pokestat_data::TypeLabels;
    ///
    /// let labels = TypeLabels::parse("Fire / Flying");
    /// assert_eq!(labels.iter().collect::<Vec<_>>(), ["Fire", "Flying"]);
    /// assert_eq!(TypeLabels::parse("Electric").len(), 1);
    /// ```
    #[must_use]
    pub fn parse(types: &str) -> Self {
        let mut labels = Vec::with_capacity(2);
        for part in types.split('/').take(2) {
            let part = part.trim();
            if !part.is_empty() && !labels.iter().any(|label| label == part) {
                labels.push(part.to_owned());
            }
        }
        Self { labels }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// One row of the entity catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub hp: f64,
    pub attack: f64,
    pub defense: f64,
    pub sp_attack: f64,
    pub sp_defense: f64,
    pub speed: f64,
    pub generation: i64,
    pub legendary: Legendary,
    pub types: String,
}

impl Entity {
    /// Value of a numeric attribute.
    #[must_use]
    pub fn attribute(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Hp => self.hp,
            Attribute::Attack => self.attack,
            Attribute::Defense => self.defense,
            Attribute::SpAttack => self.sp_attack,
            Attribute::SpDefense => self.sp_defense,
            Attribute::Speed => self.speed,
        }
    }

    #[must_use]
    pub fn is_legendary(&self) -> bool {
        self.legendary.is_legendary()
    }

    #[must_use]
    pub fn type_labels(&self) -> TypeLabels {
        TypeLabels::parse(&self.types)
    }
}
