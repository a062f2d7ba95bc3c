//! YAML persistence for adjacency rule tables
//!
//! The file maps each tile index, in ascending order, to its four direction
//! lists:
//!
//! ```yaml
//! 0:
//!   top: [0, 1]
//!   bottom: [1]
//!   left: []
//!   right: [0]
//! ```
//!
//! All four fields are always written and always required when reading.

use crate::analysis::rules::AdjacencyRules;
use crate::io::error::{AlgorithmError, Result, WithContext, rule_load_error};
use crate::spatial::direction::{Direction, DirectionTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleEntry {
    top: Vec<usize>,
    bottom: Vec<usize>,
    left: Vec<usize>,
    right: Vec<usize>,
}

impl RuleEntry {
    fn from_table(table: &DirectionTable<Vec<usize>>) -> Self {
        Self {
            top: table.get(Direction::Top).clone(),
            bottom: table.get(Direction::Bottom).clone(),
            left: table.get(Direction::Left).clone(),
            right: table.get(Direction::Right).clone(),
        }
    }

    fn into_table(self) -> DirectionTable<Vec<usize>> {
        let mut table = DirectionTable::default();
        *table.get_mut(Direction::Top) = self.top;
        *table.get_mut(Direction::Bottom) = self.bottom;
        *table.get_mut(Direction::Left) = self.left;
        *table.get_mut(Direction::Right) = self.right;
        table
    }
}

/// Serialize a rule table to YAML text
///
/// # Errors
///
/// Returns a rule format error if serialization fails
pub fn to_yaml_string(rules: &AdjacencyRules) -> Result<String> {
    let document: BTreeMap<usize, RuleEntry> = rules
        .entries()
        .iter()
        .enumerate()
        .map(|(tile, table)| (tile, RuleEntry::from_table(table)))
        .collect();

    Ok(serde_yaml::to_string(&document)?)
}

/// Parse a rule table from YAML text
///
/// # Errors
///
/// Returns an error if:
/// - The text is not a valid rule document
/// - The document has no tile entries
/// - Tile keys are not exactly `0..n`
/// - A list references a tile index outside `0..n`
pub fn from_yaml_str(text: &str) -> Result<AdjacencyRules> {
    let document: Option<BTreeMap<usize, RuleEntry>> = serde_yaml::from_str(text)?;
    let document = document.unwrap_or_default();
    if document.is_empty() {
        return Err(rule_load_error("rule file describes no tiles"));
    }

    for (expected, &key) in document.keys().enumerate() {
        if key != expected {
            return Err(rule_load_error(&format!(
                "tile {expected} has no entry (keys must run from 0 without gaps)"
            )));
        }
    }

    let rules = AdjacencyRules::new(document.into_values().map(RuleEntry::into_table).collect());
    rules.check_tile_count(rules.tile_count())?;
    Ok(rules)
}

/// Write a rule table to a file, creating parent directories
///
/// # Errors
///
/// Returns an error if serialization or any file system operation fails
pub fn save(rules: &AdjacencyRules, path: &Path) -> Result<()> {
    let text = to_yaml_string(rules).with_path(path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    std::fs::write(path, text).map_err(|e| AlgorithmError::FileSystem {
        path: path.to_path_buf(),
        operation: "write rules",
        source: e,
    })
}

/// Read a rule table from a file
///
/// # Errors
///
/// Returns a rule load error if the file is missing, unreadable or malformed
pub fn load(path: &Path) -> Result<AdjacencyRules> {
    let text = std::fs::read_to_string(path).map_err(|e| AlgorithmError::RuleLoad {
        path: Some(path.to_path_buf()),
        reason: e.to_string(),
    })?;

    from_yaml_str(&text).with_path(path)
}

/// Read a rule table, first writing one with empty lists if the file is missing
///
/// Meant for authoring workflows where rules are filled in by hand.
///
/// # Errors
///
/// Returns an error if the file cannot be created, read or parsed
pub fn load_or_create(path: &Path, tile_count: usize) -> Result<AdjacencyRules> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), tile_count, "rule file missing, creating empty rules");
        save(&AdjacencyRules::empty(tile_count), path)?;
    }

    load(path)
}

/// Read a rule table and check it against the tile set size
///
/// # Errors
///
/// Returns a rule load error if the file cannot be loaded or describes a
/// different number of tiles
pub fn load_for_tiles(path: &Path, tile_count: usize, create_missing: bool) -> Result<AdjacencyRules> {
    let rules = if create_missing {
        load_or_create(path, tile_count)?
    } else {
        load(path)?
    };

    rules.check_tile_count(tile_count).with_path(path)?;
    Ok(rules)
}
