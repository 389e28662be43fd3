//! Letter system - collection gating and per-letter board effects
//!
//! Sequence letters must be collected in `TRAE` order; bonus letters come
//! only after the sequence is complete, each at most once. Every letter's
//! board-wide effect is a pure transform dispatched through a strategy
//! table so each one stays independently testable.

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::core::rng::SimpleRng;
use crate::types::{
    Cell, Letter, ADAPTIVE_KEEP_MIN, ADAPTIVE_RESEED_COUNT, FLOOR_EFFECT_TILE, GRID_SIZE,
    LETTER_SEQUENCE, PEAK_EFFECT_TILE,
};

/// Collected letters: `TRAE` prefix plus at most one each of `N` and `B`
pub type CollectedLetters = ArrayVec<Letter, 6>;

/// Next sequence letter the player is expected to collect
pub fn next_expected(collected: &[Letter]) -> Option<Letter> {
    LETTER_SEQUENCE.get(collected.len()).copied()
}

/// Whether the primary sequence is fully collected
pub fn sequence_complete(collected: &[Letter]) -> bool {
    collected.len() >= LETTER_SEQUENCE.len()
}

/// Whether a letter may be appended to the collection right now
pub fn can_collect(letter: Letter, collected: &[Letter]) -> bool {
    if letter.is_bonus() {
        return sequence_complete(collected) && !collected.contains(&letter);
    }
    next_expected(collected) == Some(letter)
}

/// Append a letter if the gate allows it. Returns whether it was collected.
pub fn collect(letter: Letter, collected: &mut CollectedLetters) -> bool {
    if !can_collect(letter, collected) {
        return false;
    }
    collected.push(letter);
    true
}

/// A board-wide letter effect
pub type BoardTransform = fn(&Board, &mut SimpleRng) -> Board;

/// Strategy table: the transform bound to each letter
pub fn board_transform(letter: Letter) -> BoardTransform {
    match letter {
        Letter::T => reflow_descending,
        Letter::R => identity,
        Letter::A => prune_and_reseed,
        Letter::E => collapse_to_max,
        Letter::N => raise_floor,
        Letter::B => boost_peak,
    }
}

/// `R` has no board-wide effect; its doubling happens at contact time
fn identity(board: &Board, _rng: &mut SimpleRng) -> Board {
    board.clone()
}

/// `T`: gather every number, sort descending, refill row-major from the
/// top-left. Prior layout (and any stray letter) is discarded.
fn reflow_descending(board: &Board, _rng: &mut SimpleRng) -> Board {
    let mut numbers: ArrayVec<u32, { GRID_SIZE * GRID_SIZE }> = board
        .cells()
        .iter()
        .filter_map(|cell| cell.number())
        .collect();
    numbers.sort_unstable_by(|a, b| b.cmp(a));

    let mut out = Board::new();
    let mut iter = numbers.into_iter();
    'fill: for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            match iter.next() {
                Some(n) => out.set(row, col, Cell::Number(n)),
                None => break 'fill,
            };
        }
    }
    out
}

/// `A`: drop every number below 32, keep the rest in place, then seed 32s
/// into up to eight empty cells chosen uniformly without replacement.
fn prune_and_reseed(board: &Board, rng: &mut SimpleRng) -> Board {
    let mut out = Board::new();
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            if let Some(n) = board.get(row, col).and_then(|cell| cell.number()) {
                if n >= ADAPTIVE_KEEP_MIN {
                    out.set(row, col, Cell::Number(n));
                }
            }
        }
    }

    let mut empties = out.empty_positions();
    rng.shuffle(&mut empties);
    for pos in empties.iter().take(ADAPTIVE_RESEED_COUNT) {
        out.set(pos.row, pos.col, Cell::Number(ADAPTIVE_KEEP_MIN));
    }
    out
}

/// `E`: clear everything, put `max * 4` back where the max tile sat
fn collapse_to_max(board: &Board, _rng: &mut SimpleRng) -> Board {
    let mut out = Board::new();
    if let Some(pos) = board.max_tile_position() {
        out.set(pos.row, pos.col, Cell::Number(board.max_tile() * 4));
    }
    out
}

/// `N`: clear every tile below `max(max_tile, 1024)`; if nothing reached
/// 1024 yet, seed a fresh 1024 into the first empty cell.
fn raise_floor(board: &Board, _rng: &mut SimpleRng) -> Board {
    let max = board.max_tile();
    let target = max.max(FLOOR_EFFECT_TILE);

    let mut out = Board::new();
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            if let Some(n) = board.get(row, col).and_then(|cell| cell.number()) {
                if n >= target {
                    out.set(row, col, Cell::Number(n));
                }
            }
        }
    }

    if max < FLOOR_EFFECT_TILE {
        if let Some(pos) = out.empty_positions().first().copied() {
            out.set(pos.row, pos.col, Cell::Number(FLOOR_EFFECT_TILE));
        }
    }
    out
}

/// `B`: raise the max tile to 8192 in place if it is below that; the rest
/// of the board is untouched.
fn boost_peak(board: &Board, _rng: &mut SimpleRng) -> Board {
    let mut out = board.clone();
    if let Some(pos) = board.max_tile_position() {
        if board.max_tile() < PEAK_EFFECT_TILE {
            out.set(pos.row, pos.col, Cell::Number(PEAK_EFFECT_TILE));
        }
    }
    out
}
