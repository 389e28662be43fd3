//! Game session - the aggregate root and its state machine
//!
//! Owns the board, scores, letter collection, counters, undo ring, and the
//! RNG. One move command fully resolves (orchestration, letter effects,
//! spawn, status recomputation) before the next is accepted; a move is
//! atomic from the caller's perspective.

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::core::letters::{self, CollectedLetters};
use crate::core::moves::resolve_move;
use crate::core::rng::SimpleRng;
use crate::core::snapshot::{HistoryEntry, SessionSnapshot};
use crate::core::spawn::spawn_tile;
use crate::types::{
    CommandError, Direction, Letter, Position, SessionPhase, UndoPolicy, VictoryChoice,
    DEFAULT_MIN_TILE, EASTER_EGG_STAT, MEGA_TILE, RAISED_MIN_TILE_B, RAISED_MIN_TILE_N,
    UNDO_HISTORY_CAP, VICTORY_TILE,
};

/// What a single move command produced (consumed by the caller, then
/// discarded)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveEvents {
    /// False means the command changed nothing and was ignored entirely
    pub moved: bool,
    /// Score delta from numeric merges this move
    pub merge_score: u32,
    /// Letters collected this turn, in collection order
    pub letters_collected: ArrayVec<Letter, 6>,
    /// Letter token that appeared in the spawn step, if any
    pub spawned_letter: Option<Letter>,
    /// Where the most recent merge happened (animation hand-off)
    pub merged_position: Option<Position>,
}

impl MoveEvents {
    fn no_op() -> Self {
        Self {
            moved: false,
            merge_score: 0,
            letters_collected: ArrayVec::new(),
            spawned_letter: None,
            merged_position: None,
        }
    }
}

/// One retained undo state
#[derive(Debug, Clone)]
struct UndoState {
    board: Board,
    score: u32,
    collected: CollectedLetters,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    /// Score is the current max tile, per the ruleset
    score: u32,
    best_score: u32,
    collected: CollectedLetters,
    move_count: u32,
    /// Moves since the last letter spawn (pity counter)
    moves_since_letter: u32,
    /// Minimum spawn tier, raised by the bonus letter effects
    min_tile: u32,
    phase: SessionPhase,
    /// Victory was reached at some point this session (survives continue)
    victory_achieved: bool,
    /// Score and move count currently sit at the hidden 1024/1024 pair
    easter_egg_pending: bool,
    /// A 1024x1024 tile was reached
    easter_egg_1048576: bool,
    undo_policy: UndoPolicy,
    undo_token: bool,
    history: ArrayVec<UndoState, UNDO_HISTORY_CAP>,
    rng: SimpleRng,
}

impl GameSession {
    /// Create a new session with the given RNG seed and two starting tiles
    pub fn new(seed: u32) -> Self {
        Self::with_undo_policy(seed, UndoPolicy::EngineerReward)
    }

    pub fn with_undo_policy(seed: u32, undo_policy: UndoPolicy) -> Self {
        let mut session = Self {
            board: Board::new(),
            score: 0,
            best_score: 0,
            collected: CollectedLetters::new(),
            move_count: 0,
            moves_since_letter: 0,
            min_tile: DEFAULT_MIN_TILE,
            phase: SessionPhase::Active,
            victory_achieved: false,
            easter_egg_pending: false,
            easter_egg_1048576: false,
            undo_policy,
            undo_token: false,
            history: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        };

        let _ = spawn_tile(&mut session.board, &[], DEFAULT_MIN_TILE, 0, &mut session.rng);
        let _ = spawn_tile(&mut session.board, &[], DEFAULT_MIN_TILE, 0, &mut session.rng);
        session.score = session.board.max_tile();
        session.best_score = session.score;
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn collected_letters(&self) -> &[Letter] {
        &self.collected
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn moves_since_letter(&self) -> u32 {
        self.moves_since_letter
    }

    pub fn min_tile(&self) -> u32 {
        self.min_tile
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    /// A continue-or-end decision is waiting on the caller
    pub fn victory_pending(&self) -> bool {
        self.phase == SessionPhase::VictoryPending
    }

    pub fn victory_achieved(&self) -> bool {
        self.victory_achieved
    }

    pub fn easter_egg_pending(&self) -> bool {
        self.easter_egg_pending
    }

    pub fn easter_egg_1048576(&self) -> bool {
        self.easter_egg_1048576
    }

    pub fn undo_available(&self) -> bool {
        self.undo_token && !self.history.is_empty()
    }

    /// Current RNG state (usable to replay the remainder of the session)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    fn trae_complete(&self) -> bool {
        letters::sequence_complete(&self.collected)
    }

    fn accepting_moves(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Active | SessionPhase::ContinuingPostVictory
        )
    }

    fn push_history(&mut self) {
        if self.history.is_full() {
            self.history.remove(0);
        }
        self.history.push(UndoState {
            board: self.board.clone(),
            score: self.score,
            collected: self.collected.clone(),
        });
    }

    /// Execute one move command.
    ///
    /// A direction that changes nothing returns `moved == false` and leaves
    /// the session untouched (no spawn, no counters) except that a dead
    /// board still transitions to game over.
    pub fn apply_move(&mut self, direction: Direction) -> Result<MoveEvents, CommandError> {
        if !self.accepting_moves() {
            return Err(CommandError::MovesNotAccepted);
        }

        let outcome = resolve_move(&self.board, direction, &self.collected);
        if !outcome.moved {
            if !self.board.can_move() {
                self.phase = SessionPhase::GameOver;
                if self.easter_egg_pending {
                    self.victory_achieved = true;
                }
            }
            return Ok(MoveEvents::no_op());
        }

        self.push_history();
        self.board = outcome.board;

        // Letter effects run in collision order, before the spawn
        let mut letters_collected = ArrayVec::new();
        for collision in &outcome.collisions {
            if !letters::collect(collision.letter, &mut self.collected) {
                continue;
            }
            letters_collected.push(collision.letter);
            let transform = letters::board_transform(collision.letter);
            self.board = transform(&self.board, &mut self.rng);

            match collision.letter {
                Letter::N => self.min_tile = RAISED_MIN_TILE_N,
                Letter::B => self.min_tile = RAISED_MIN_TILE_B,
                Letter::E if self.undo_policy == UndoPolicy::EngineerReward => {
                    self.undo_token = true;
                }
                _ => {}
            }
        }

        let spawned = spawn_tile(
            &mut self.board,
            &self.collected,
            self.min_tile,
            self.moves_since_letter,
            &mut self.rng,
        );
        let spawned_letter = spawned.and_then(|s| s.letter());

        self.score = self.board.max_tile();
        self.best_score = self.best_score.max(self.score);

        self.move_count += 1;
        if spawned_letter.is_some() {
            self.moves_since_letter = 0;
        } else {
            self.moves_since_letter += 1;
        }

        self.easter_egg_pending =
            self.score == EASTER_EGG_STAT && self.move_count == EASTER_EGG_STAT;
        if self.score >= MEGA_TILE {
            self.easter_egg_1048576 = true;
        }

        if self.phase == SessionPhase::Active
            && self.trae_complete()
            && self.score >= VICTORY_TILE
        {
            self.phase = SessionPhase::VictoryPending;
            self.victory_achieved = true;
        }

        // A dead board ends the session even on the victory move
        if !self.board.can_move() {
            self.phase = SessionPhase::GameOver;
            if self.easter_egg_pending {
                self.victory_achieved = true;
            }
        }

        Ok(MoveEvents {
            moved: true,
            merge_score: outcome.merge_score,
            letters_collected,
            spawned_letter,
            merged_position: outcome.merged_position,
        })
    }

    /// Resolve the continue-or-end decision exposed by `VictoryPending`
    pub fn resolve_victory_choice(&mut self, choice: VictoryChoice) -> Result<(), CommandError> {
        if self.phase != SessionPhase::VictoryPending {
            return Err(CommandError::InvalidVictoryChoice);
        }

        match choice {
            VictoryChoice::Continue => {
                self.phase = SessionPhase::ContinuingPostVictory;
            }
            VictoryChoice::End => {
                self.victory_achieved = (self.trae_complete() && self.score >= VICTORY_TILE)
                    || self.easter_egg_pending;
                self.phase = SessionPhase::GameOver;
            }
        }
        Ok(())
    }

    /// Restore the most recent retained state and consume the undo token
    pub fn request_undo(&mut self) -> Result<(), CommandError> {
        if !self.undo_token {
            return Err(CommandError::UndoUnavailable);
        }
        let Some(previous) = self.history.pop() else {
            return Err(CommandError::UndoUnavailable);
        };

        self.board = previous.board;
        self.score = previous.score;
        self.collected = previous.collected;
        self.undo_token = false;
        Ok(())
    }

    /// Start over, reseeding from the current RNG state. Best score and
    /// undo policy survive the restart.
    pub fn restart(&mut self) {
        let seed = self.rng.state();
        let best = self.best_score;
        let policy = self.undo_policy;
        *self = Self::with_undo_policy(seed, policy);
        self.best_score = best.max(self.best_score);
    }

    /// Capture a serializable image of the session
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            cells: self.board.to_cells(),
            score: self.score,
            best_score: self.best_score,
            collected: self.collected.to_vec(),
            move_count: self.move_count,
            moves_since_letter: self.moves_since_letter,
            min_tile: self.min_tile,
            phase: self.phase,
            victory_achieved: self.victory_achieved,
            easter_egg_pending: self.easter_egg_pending,
            easter_egg_1048576: self.easter_egg_1048576,
            undo_policy: self.undo_policy,
            undo_token: self.undo_token,
            history: self
                .history
                .iter()
                .map(|entry| HistoryEntry {
                    cells: entry.board.to_cells(),
                    score: entry.score,
                    collected: entry.collected.to_vec(),
                })
                .collect(),
            seed: self.rng.state(),
        }
    }

    /// Rebuild a session from a snapshot
    pub fn restore(snapshot: &SessionSnapshot) -> Self {
        let mut collected = CollectedLetters::new();
        collected.extend(snapshot.collected.iter().copied().take(6));

        let mut history = ArrayVec::new();
        for entry in snapshot.history.iter().take(UNDO_HISTORY_CAP) {
            let mut entry_collected = CollectedLetters::new();
            entry_collected.extend(entry.collected.iter().copied().take(6));
            history.push(UndoState {
                board: Board::from_cells(entry.cells),
                score: entry.score,
                collected: entry_collected,
            });
        }

        Self {
            board: Board::from_cells(snapshot.cells),
            score: snapshot.score,
            best_score: snapshot.best_score,
            collected,
            move_count: snapshot.move_count,
            moves_since_letter: snapshot.moves_since_letter,
            min_tile: snapshot.min_tile,
            phase: snapshot.phase,
            victory_achieved: snapshot.victory_achieved,
            easter_egg_pending: snapshot.easter_egg_pending,
            easter_egg_1048576: snapshot.easter_egg_1048576,
            undo_policy: snapshot.undo_policy,
            undo_token: snapshot.undo_token,
            history,
            rng: SimpleRng::new(snapshot.seed),
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
