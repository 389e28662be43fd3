//! Adapter module - contracts for external collaborators
//!
//! Persistence and the remote leaderboard are specified as traits plus
//! serialized payload types; the core never talks to storage or the
//! network itself.

pub mod leaderboard;
pub mod persist;

pub use leaderboard::{
    sanitize_player_name, Leaderboard, LeaderboardEntry, RejectReason, SubmissionPayload,
    SubmitOutcome,
};
pub use persist::{checkpoint, clear, resume_or_new, MemoryStore, SessionStore};
