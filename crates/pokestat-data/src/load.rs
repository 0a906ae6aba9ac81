//! JSON ingestion of the entity catalog and the battle log
//!
//! Both sources are JSON arrays of row objects whose keys are the table's
//! column names:
//!
//! ```text
//! pokemon.json  [{"id": 25, "name": "Pikachu", "hp": 35, "attack": 55, "defense": 40,
//!                 "sp_attack": 50, "sp_defense": 50, "speed": 90, "generation": 1,
//!                 "legendary": false, "types": "Electric"}, ...]
//! combats.json  [{"first_pokemon": 25, "second_pokemon": 150, "winner": 150}, ...]
//! ```
//!
//! Loading either succeeds completely or fails with a [`LoadError`]; callers
//! never see a partially loaded table.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::{BattleLog, BattleLogError, BattleRecord, CatalogError, Entity, EntityCatalog};

/// Which of the two input tables a source holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SourceKind {
    #[display("entity catalog")]
    EntityCatalog,
    #[display("battle log")]
    BattleLog,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("{kind} source not found: {}", path.display())]
    MissingSource { kind: SourceKind, path: PathBuf },
    #[display("failed to read {kind} source {}: {error}", path.display())]
    Io {
        kind: SourceKind,
        path: PathBuf,
        #[error(source)]
        error: io::Error,
    },
    #[display("{kind} source {} is not valid JSON: {error}", path.display())]
    Malformed {
        kind: SourceKind,
        path: PathBuf,
        #[error(source)]
        error: serde_json::Error,
    },
    #[display("{kind} source {} does not match the expected columns: {error}", path.display())]
    SchemaMismatch {
        kind: SourceKind,
        path: PathBuf,
        #[error(source)]
        error: serde_json::Error,
    },
    #[display("invalid entity catalog {}: {error}", path.display())]
    InvalidCatalog {
        path: PathBuf,
        #[error(source)]
        error: CatalogError,
    },
    #[display("invalid battle log {}: {error}", path.display())]
    InvalidBattleLog {
        path: PathBuf,
        #[error(source)]
        error: BattleLogError,
    },
}

impl LoadError {
    /// Whether the error means the source file does not exist.
    #[must_use]
    pub fn is_missing_source(&self) -> bool {
        matches!(self, LoadError::MissingSource { .. })
    }
}

/// Both input tables, loaded together.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub catalog: EntityCatalog,
    pub battles: BattleLog,
}

/// Loads the entity catalog from a JSON file.
pub fn load_catalog<P>(path: P) -> Result<EntityCatalog, LoadError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = read_source(SourceKind::EntityCatalog, path)?;
    let catalog = parse_catalog(path, &text)?;
    tracing::info!(path = %path.display(), rows = catalog.len(), "loaded entity catalog");
    Ok(catalog)
}

/// Loads the battle log from a JSON file and checks the winner invariant.
pub fn load_battle_log<P>(path: P) -> Result<BattleLog, LoadError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = read_source(SourceKind::BattleLog, path)?;
    let battles = parse_battle_log(path, &text)?;
    tracing::info!(path = %path.display(), rows = battles.len(), "loaded battle log");
    Ok(battles)
}

/// Loads both tables; the first failure aborts the whole load.
pub fn load_dataset<P, Q>(catalog_path: P, battles_path: Q) -> Result<Dataset, LoadError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    Ok(Dataset {
        catalog: load_catalog(catalog_path)?,
        battles: load_battle_log(battles_path)?,
    })
}

fn read_source(kind: SourceKind, path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|error| {
        if error.kind() == io::ErrorKind::NotFound {
            LoadError::MissingSource {
                kind,
                path: path.to_owned(),
            }
        } else {
            LoadError::Io {
                kind,
                path: path.to_owned(),
                error,
            }
        }
    })
}

fn parse_rows<T>(kind: SourceKind, path: &Path, text: &str) -> Result<Vec<T>, LoadError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(text).map_err(|error| {
        let path = path.to_owned();
        match error.classify() {
            Category::Data => LoadError::SchemaMismatch { kind, path, error },
            Category::Io | Category::Syntax | Category::Eof => {
                LoadError::Malformed { kind, path, error }
            }
        }
    })
}

fn parse_catalog(path: &Path, text: &str) -> Result<EntityCatalog, LoadError> {
    let rows = parse_rows::<Entity>(SourceKind::EntityCatalog, path, text)?;
    EntityCatalog::new(rows).map_err(|error| LoadError::InvalidCatalog {
        path: path.to_owned(),
        error,
    })
}

fn parse_battle_log(path: &Path, text: &str) -> Result<BattleLog, LoadError> {
    let battles = BattleLog::new(parse_rows::<BattleRecord>(
        SourceKind::BattleLog,
        path,
        text,
    )?);
    battles
        .validate()
        .map_err(|error| LoadError::InvalidBattleLog {
            path: path.to_owned(),
            error,
        })?;
    Ok(battles)
}
