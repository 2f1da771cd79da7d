use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::core::player::PlayerRecord;
use crate::core::types::Mode;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read player dataset: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse player dataset: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate canonical name: {0}")]
    DuplicateName(String),
}

/// Dataset format version written on export
pub const DATASET_VERSION: &str = "1.0.0";

/// Exported dataset with provenance metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetExport {
    pub version: String,
    pub created_at: String,
    pub players: IndexMap<String, PlayerRecord>,
}

/// Accepted on-disk shapes: the bare name-keyed object, or an export envelope
#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetFile {
    Export(DatasetExport),
    Bare(IndexMap<String, PlayerRecord>),
}

/// All player records, keyed by canonical name, in insertion order
#[derive(Debug, Default)]
pub struct PlayerStore {
    players: Vec<PlayerRecord>,

    /// Index: canonical name -> index in players vec
    name_to_index: HashMap<String, usize>,

    /// Index: lower-cased canonical name -> index of the first such player
    folded_to_index: HashMap<String, usize>,
}

impl PlayerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the embedded default dataset
    pub fn load_embedded() -> Result<Self, StoreError> {
        // Validated at compile time by build.rs
        const EMBEDDED_DATASET: &str = include_str!("../../data/players.json");
        Self::from_json(EMBEDDED_DATASET)
    }

    /// Load a dataset from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a dataset from a JSON string
    ///
    /// Aggregate multi-team season rows are dropped while loading.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let players = match serde_json::from_str::<DatasetFile>(json)? {
            DatasetFile::Export(export) => {
                if export.version != DATASET_VERSION {
                    tracing::warn!(
                        "Dataset version mismatch (expected {}, found {})",
                        DATASET_VERSION,
                        export.version
                    );
                }
                export.players
            }
            DatasetFile::Bare(players) => players,
        };

        let mut store = Self::new();
        let mut stripped_players = 0usize;
        for (name, mut record) in players {
            record.name = name;
            let removed = record.strip_aggregate_seasons();
            if removed > 0 {
                tracing::debug!("{}: removed {} aggregate season(s)", record.name, removed);
                stripped_players += 1;
            }
            store.add_player(record)?;
        }

        tracing::info!(
            "Loaded {} players ({} had aggregate seasons removed)",
            store.len(),
            stripped_players
        );

        Ok(store)
    }

    /// Add a player to the store
    pub fn add_player(&mut self, record: PlayerRecord) -> Result<(), StoreError> {
        if self.name_to_index.contains_key(&record.name) {
            return Err(StoreError::DuplicateName(record.name));
        }

        let index = self.players.len();
        self.name_to_index.insert(record.name.clone(), index);
        self.folded_to_index
            .entry(record.name.to_lowercase())
            .or_insert(index);
        self.players.push(record);
        Ok(())
    }

    /// Get a player by exact canonical name
    pub fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.name_to_index.get(name).map(|&idx| &self.players[idx])
    }

    /// Case-insensitive exact match against canonical names
    pub fn lookup_exact(&self, name: &str) -> Option<&PlayerRecord> {
        self.folded_to_index
            .get(&name.to_lowercase())
            .map(|&idx| &self.players[idx])
    }

    /// Canonical names eligible under `mode`, in insertion order
    pub fn all_names(&self, mode: Mode) -> Vec<&str> {
        self.eligible(mode).map(|p| p.name.as_str()).collect()
    }

    /// Records eligible under `mode`, in insertion order
    pub fn eligible(&self, mode: Mode) -> impl Iterator<Item = &PlayerRecord> + '_ {
        self.players.iter().filter(move |p| mode.admits(p))
    }

    /// All records in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, PlayerRecord> {
        self.players.iter()
    }

    /// Export the store to JSON
    pub fn to_json(&self) -> Result<String, StoreError> {
        let data = DatasetExport {
            version: DATASET_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            players: self
                .players
                .iter()
                .map(|p| (p.name.clone(), p.clone()))
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of players in the store
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
