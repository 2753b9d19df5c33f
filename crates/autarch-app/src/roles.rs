//! Loads the role registry (spec.md §3's "Role" type) from an external
//! JSON data file. The set of concrete unit/building type codes for a
//! given game and faction is the one piece of game-specific knowledge
//! this repository never hard-codes (spec.md §1): it is read as data at
//! startup, never compiled in.

use std::collections::HashMap;
use std::path::Path;

use autarch_core::role::RoleRegistry;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RolesError {
    #[error("failed to read role file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("role file {path} did not parse as JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk shape: `{"barracks": {"queue": "Building", "type_codes": ["tent", "barr"]}, ...}`.
#[derive(Debug, Deserialize)]
struct RoleFile(HashMap<String, RoleFileEntry>);

#[derive(Debug, Deserialize)]
struct RoleFileEntry {
    queue: String,
    type_codes: Vec<String>,
}

pub fn load_from_path(path: &Path) -> Result<RoleRegistry, RolesError> {
    let text = std::fs::read_to_string(path).map_err(|source| RolesError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse(&text, path)
}

fn parse(text: &str, path: &Path) -> Result<RoleRegistry, RolesError> {
    let file: RoleFile = serde_json::from_str(text).map_err(|source| RolesError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    let mut registry = RoleRegistry::new();
    for (role, entry) in file.0 {
        registry.insert(&role, &entry.queue, entry.type_codes);
    }
    Ok(registry)
}
