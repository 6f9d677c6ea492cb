//! Configuration for game replays.
//!
//! A replay file names the players, optionally the board size, and a list
//! of scripted actions applied in turn order.
//!
//! This module is only available behind the `binary` feature flag.

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::board::{Position, WallOrientation, WallPiece};
use crate::grid::{MIN_BOARD_SIDE, STANDARD_BOARD_SIDE};

/// Top-level replay file. Unknown sections are ignored.
#[derive(Debug, Deserialize)]
pub struct ReplayConfig {
    /// Game parameters.
    pub quoridor: QuoridorConfig,

    #[serde(default)]
    pub actions: Vec<ScriptedAction>,
}

#[derive(Debug, Deserialize)]
pub struct QuoridorConfig {
    #[serde(default = "default_board_side")]
    pub board_side: i32,
    pub players: Vec<String>,
}

fn default_board_side() -> i32 {
    STANDARD_BOARD_SIDE
}

/// One turn of a replay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptedAction {
    Move { player: String, to: Position },
    Wall { at: Position, orientation: WallOrientation },
}

impl ScriptedAction {
    /// The wall this action places, if it is a wall placement.
    pub fn wall(&self) -> Option<WallPiece> {
        match self {
            ScriptedAction::Wall { at, orientation } => Some(WallPiece::new(*at, *orientation)),
            ScriptedAction::Move { .. } => None,
        }
    }
}

/// Load a `ReplayConfig` from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ReplayConfig> {
    let contents = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
    let config: ReplayConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
    ensure!(
        config.quoridor.board_side >= MIN_BOARD_SIDE,
        "board_side must be at least {}, got {}",
        MIN_BOARD_SIDE,
        config.quoridor.board_side
    );
    Ok(config)
}
