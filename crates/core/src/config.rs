use crate::CARD_BACK;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_MAX_PLAYERS: usize = 4;

/// Session settings shared by every host. Missing fields take defaults, so
/// an empty JSON object is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Fixed seed for reproducible sessions; a fresh one is drawn when absent.
    pub seed: Option<u64>,
    pub max_players: usize,
    pub card_back: String,
    /// JSON ability-set catalogue merged over the built-in table.
    pub catalog: Option<PathBuf>,
    /// Directory with one sub-folder of ability card images per monster.
    pub ability_dir: Option<PathBuf>,
    pub ability_url_prefix: String,
    pub log_level: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_players: DEFAULT_MAX_PLAYERS,
            card_back: CARD_BACK.to_string(),
            catalog: None,
            ability_dir: None,
            ability_url_prefix: "/imgs/monster-ability-cards/jaws-of-the-lion".to_string(),
            log_level: "info".to_string(),
        }
    }
}
