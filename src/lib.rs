//! TRAE 1024 core engine.
//!
//! A pure state-transition library for a 2048-style tile-merging puzzle
//! extended with an ordered letter collection (`T`→`R`→`A`→`E`, then the
//! bonus letters `N` and `B`), per-letter board-wide effects, pity-timed
//! letter spawns, and hidden end-of-run triggers. Rendering, input, and
//! storage are the embedder's concern; this crate resolves moves.
//!
//! The simulation is deterministic from a single `u32` seed: every random
//! draw flows through one injected LCG, so a session can be replayed or
//! asserted against exactly.

pub mod adapter;
pub mod core;
pub mod types;

pub use crate::core::{Board, GameSession, MoveEvents, SessionSnapshot, SimpleRng};
pub use crate::types::{
    Cell, CommandError, Direction, Letter, Position, SessionPhase, UndoPolicy, VictoryChoice,
};
