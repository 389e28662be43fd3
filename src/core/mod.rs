//! Core module - pure game logic with no external dependencies
//!
//! This module contains all the game rules, state management, and logic.
//! It has zero dependencies on UI, networking, or I/O.

pub mod board;
pub mod letters;
pub mod line;
pub mod moves;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod spawn;

// Re-export commonly used types
pub use board::Board;
pub use line::{Collision, LineResult};
pub use moves::{resolve_move, MoveOutcome};
pub use rng::SimpleRng;
pub use session::{GameSession, MoveEvents};
pub use snapshot::SessionSnapshot;
pub use spawn::{spawn_tile, Spawned};
