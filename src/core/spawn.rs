//! Tile spawn generator - fills one empty cell per move
//!
//! A single unit-interval roll drives the whole decision chain (bonus
//! letter, sequence letter, then a plain number), mirroring how the pity
//! counter can override any roll once its threshold is reached. Position
//! picks draw fresh rolls. Returning `None` on a full board is the
//! caller's no-op signal, not an error.

use crate::core::board::Board;
use crate::core::letters::sequence_complete;
use crate::core::rng::SimpleRng;
use crate::types::{
    Cell, Letter, Position, BONUS_B_PITY_THRESHOLD, BONUS_B_PROBABILITY, BONUS_N_PITY_THRESHOLD,
    BONUS_N_PROBABILITY, LETTER_PITY_THRESHOLDS, LETTER_PROBABILITIES, LETTER_SEQUENCE,
    LOW_TIER_PROBABILITY, RAISED_MIN_TILE_B, RAISED_MIN_TILE_N,
};

/// What a spawn call placed, and where
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawned {
    pub position: Position,
    pub cell: Cell,
}

impl Spawned {
    /// The spawned letter, if the new cell is a letter token
    pub fn letter(&self) -> Option<Letter> {
        self.cell.letter()
    }
}

/// The two consecutive number tiers for the current minimum-tile setting.
/// The 512 check precedes the 128 check so the higher elevation wins.
fn number_tiers(min_tile: u32) -> (u32, u32) {
    if min_tile >= RAISED_MIN_TILE_B {
        (512, 1024)
    } else if min_tile >= RAISED_MIN_TILE_N {
        (128, 256)
    } else {
        (4, 8)
    }
}

fn random_position(positions: &[Position], rng: &mut SimpleRng) -> Position {
    positions[rng.next_range(positions.len() as u32) as usize]
}

/// Placement for `R`: prefer a cell horizontally adjacent to the largest
/// numeric tile, fall back to a uniform random empty cell.
fn r_position(board: &Board, empties: &[Position], rng: &mut SimpleRng) -> Position {
    if let Some(max_pos) = board.max_tile_position() {
        let adjacent = board.adjacent_empty_horizontal(max_pos);
        if !adjacent.is_empty() {
            return random_position(&adjacent, rng);
        }
    }
    random_position(empties, rng)
}

/// Spawn one cell. `pity` counts moves since the last letter spawn; when a
/// letter's threshold is reached the roll no longer matters.
pub fn spawn_tile(
    board: &mut Board,
    collected: &[Letter],
    min_tile: u32,
    pity: u32,
    rng: &mut SimpleRng,
) -> Option<Spawned> {
    let empties = board.empty_positions();
    if empties.is_empty() {
        return None;
    }

    let roll = rng.next_unit();
    let no_letter_on_board = board.letters_on_board() == 0;

    // Bonus letters, only once TRAE is done. B is checked first so the
    // rarer letter wins when both pity thresholds are satisfied at once.
    if no_letter_on_board && sequence_complete(collected) {
        let has_b = collected.contains(&Letter::B);
        let has_n = collected.contains(&Letter::N);

        if !has_b && (pity >= BONUS_B_PITY_THRESHOLD || roll < BONUS_B_PROBABILITY) {
            let pos = random_position(&empties, rng);
            let cell = Cell::Letter(Letter::B);
            board.set(pos.row, pos.col, cell);
            return Some(Spawned {
                position: pos,
                cell,
            });
        }

        let n_window = (BONUS_B_PROBABILITY..BONUS_B_PROBABILITY + BONUS_N_PROBABILITY)
            .contains(&roll);
        if !has_n && (pity >= BONUS_N_PITY_THRESHOLD || n_window) {
            let pos = random_position(&empties, rng);
            let cell = Cell::Letter(Letter::N);
            board.set(pos.row, pos.col, cell);
            return Some(Spawned {
                position: pos,
                cell,
            });
        }
    }

    // Next sequence letter, probability falling as the collection grows
    if no_letter_on_board && !sequence_complete(collected) {
        let idx = collected.len();
        if pity >= LETTER_PITY_THRESHOLDS[idx] || roll < LETTER_PROBABILITIES[idx] {
            let letter = LETTER_SEQUENCE[idx];
            let pos = if letter == Letter::R {
                r_position(board, &empties, rng)
            } else {
                random_position(&empties, rng)
            };
            let cell = Cell::Letter(letter);
            board.set(pos.row, pos.col, cell);
            return Some(Spawned {
                position: pos,
                cell,
            });
        }
    }

    // Plain number, 70/30 between two consecutive tiers
    let (low, high) = number_tiers(min_tile);
    let value = if roll < LOW_TIER_PROBABILITY { low } else { high };
    let pos = random_position(&empties, rng);
    let cell = Cell::Number(value);
    board.set(pos.row, pos.col, cell);
    Some(Spawned {
        position: pos,
        cell,
    })
}
