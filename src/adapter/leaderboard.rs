//! Leaderboard contract - submission payloads and the collaborator trait
//!
//! The core only supplies truthful fields; plausibility checks, letter
//! re-verification, and rate limiting all belong to the collaborator
//! behind the `Leaderboard` trait. Wire names match the service's table
//! columns.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::session::GameSession;

/// Player names are trimmed, stripped of risky characters, and capped
pub const MAX_NAME_LEN: usize = 20;

/// Marker the hidden 1024x1024 run submits instead of its letter list
pub const MEGA_EGG_MARKER: &str = "TRAENB4EVER";

/// Fixed move count the hidden run reports
pub const MEGA_EGG_MOVE_COUNT: u32 = 1024;

/// Strip `<>"'`, trim, and cap the player name. Empty output means the
/// name is unusable and the submission should not be attempted.
pub fn sanitize_player_name(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\''))
        .take(MAX_NAME_LEN)
        .collect()
}

/// Submission payload, serialized with the service's column names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub player_name: String,
    pub score: u32,
    pub max_tile: u32,
    /// Letter characters in collection order
    pub letters_collected: Vec<String>,
    pub is_victory: bool,
    #[serde(rename = "play_time")]
    pub move_count: u32,
}

impl SubmissionPayload {
    /// Build a truthful payload from a session. The hidden 1024x1024 run
    /// gets its special marker form.
    pub fn from_session(player_name: &str, session: &GameSession) -> Self {
        let player_name = sanitize_player_name(player_name);

        if session.easter_egg_1048576() {
            return Self {
                player_name,
                score: session.score(),
                max_tile: session.score(),
                letters_collected: vec![MEGA_EGG_MARKER.to_string()],
                is_victory: true,
                move_count: MEGA_EGG_MOVE_COUNT,
            };
        }

        Self {
            player_name,
            score: session.score(),
            max_tile: session.board().max_tile(),
            letters_collected: session
                .collected_letters()
                .iter()
                .map(|letter| letter.as_char().to_string())
                .collect(),
            is_victory: session.victory_achieved(),
            move_count: session.move_count(),
        }
    }
}

/// One fetched leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub score: u32,
    pub max_tile: u32,
    pub letters_collected: Vec<String>,
    pub is_victory: bool,
    #[serde(rename = "play_time")]
    pub move_count: u32,
}

/// Why the collaborator refused a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyName,
    TooManyMoves,
    ScoreTooHigh,
    LettersIncomplete,
    LetterOrder,
    MissingVictoryTile,
    TooFewMoves,
    RateLimited,
}

/// Collaborator verdict on a submission that reached the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected(RejectReason),
}

/// The remote leaderboard, as seen by this core. Implementations own all
/// anti-cheat validation; transport failures surface through `Result`.
pub trait Leaderboard {
    fn submit(&mut self, payload: &SubmissionPayload) -> Result<SubmitOutcome>;
    fn fetch_top(&self, n: usize) -> Result<Vec<LeaderboardEntry>>;
}
