//! Session snapshot - the serializable image handed to persistence
//!
//! A snapshot captures everything needed to resume a session exactly:
//! board, scores, collection, counters, phase, and the undo ring. The
//! session owns the conversion in both directions.

use serde::{Deserialize, Serialize};

use crate::types::{Cell, Letter, SessionPhase, UndoPolicy, GRID_SIZE};

/// One retained undo state (what a single undo restores)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub cells: [[Cell; GRID_SIZE]; GRID_SIZE],
    pub score: u32,
    pub collected: Vec<Letter>,
}

/// Full serializable session image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub cells: [[Cell; GRID_SIZE]; GRID_SIZE],
    pub score: u32,
    pub best_score: u32,
    pub collected: Vec<Letter>,
    pub move_count: u32,
    /// Moves since the last letter spawn (pity counter)
    pub moves_since_letter: u32,
    pub min_tile: u32,
    pub phase: SessionPhase,
    pub victory_achieved: bool,
    pub easter_egg_pending: bool,
    pub easter_egg_1048576: bool,
    pub undo_policy: UndoPolicy,
    pub undo_token: bool,
    pub history: Vec<HistoryEntry>,
    /// RNG state at capture time; restoring replays the same draws
    pub seed: u32,
}
