//! Letter system tests - gating, effects, and pity-timed spawns

use trae_1024::core::letters::{board_transform, can_collect, next_expected};
use trae_1024::core::spawn_tile;
use trae_1024::types::{
    Cell, Letter, DEFAULT_MIN_TILE, GRID_SIZE, LETTER_PITY_THRESHOLDS, LETTER_SEQUENCE,
    RAISED_MIN_TILE_B, RAISED_MIN_TILE_N,
};
use trae_1024::{Board, SimpleRng};

const E: Cell = Cell::Empty;
const TRAE: [Letter; 4] = [Letter::T, Letter::R, Letter::A, Letter::E];
const ALL_SIX: [Letter; 6] = [
    Letter::T,
    Letter::R,
    Letter::A,
    Letter::E,
    Letter::N,
    Letter::B,
];

fn n(v: u32) -> Cell {
    Cell::Number(v)
}

#[test]
fn test_sequence_order_is_strict() {
    assert_eq!(next_expected(&[]), Some(Letter::T));

    for (idx, letter) in LETTER_SEQUENCE.iter().enumerate() {
        let collected = &TRAE[..idx];
        assert!(can_collect(*letter, collected));

        // No other sequence letter is collectible right now
        for other in LETTER_SEQUENCE.iter().filter(|o| *o != letter) {
            assert!(!can_collect(*other, collected), "{:?} before {:?}", other, letter);
        }
    }
}

#[test]
fn test_bonus_letters_after_trae_only() {
    assert!(!can_collect(Letter::N, &TRAE[..3]));
    assert!(!can_collect(Letter::B, &TRAE[..3]));
    assert!(can_collect(Letter::N, &TRAE));
    assert!(can_collect(Letter::B, &TRAE));

    // B then N is as valid as N then B
    let with_b = [Letter::T, Letter::R, Letter::A, Letter::E, Letter::B];
    assert!(can_collect(Letter::N, &with_b));
    assert!(!can_collect(Letter::B, &with_b));
}

#[test]
fn test_think_effect_sorts_descending_row_major() {
    let board = Board::from_cells([
        [n(4), E, n(1024), E],
        [E, n(16), E, E],
        [n(256), E, E, n(2)],
        [E, E, n(64), E],
    ]);

    let out = board_transform(Letter::T)(&board, &mut SimpleRng::new(1));
    let expected = [1024, 256, 64, 16, 4, 2];
    for (i, value) in expected.iter().enumerate() {
        let row = i / GRID_SIZE;
        let col = i % GRID_SIZE;
        assert_eq!(out.get(row, col), Some(n(*value)));
    }
    assert_eq!(out.get(1, 2), Some(E));
}

#[test]
fn test_adaptive_effect_prunes_below_32() {
    let board = Board::from_cells([
        [n(2), n(4), n(8), n(16)],
        [n(32), n(64), E, E],
        [E, E, E, E],
        [E, E, E, E],
    ]);

    let out = board_transform(Letter::A)(&board, &mut SimpleRng::new(7));
    // The 32 and 64 stay put
    assert_eq!(out.get(1, 0), Some(n(32)));
    assert_eq!(out.get(1, 1), Some(n(64)));
    // Everything on the board is now >= 32
    assert!(out
        .cells()
        .iter()
        .filter_map(|cell| cell.number())
        .all(|v| v >= 32));
    // Eight fresh 32s beyond the kept one
    let thirty_twos = out
        .cells()
        .iter()
        .filter(|cell| cell.number() == Some(32))
        .count();
    assert_eq!(thirty_twos, 9);
}

#[test]
fn test_engineer_effect_collapses_to_quadrupled_max() {
    let board = Board::from_cells([
        [n(2), n(4), E, E],
        [E, n(512), E, E],
        [E, E, n(8), E],
        [E, E, E, E],
    ]);

    let out = board_transform(Letter::E)(&board, &mut SimpleRng::new(1));
    assert_eq!(out.get(1, 1), Some(n(2048)));
    let filled = out.cells().iter().filter(|c| !c.is_empty()).count();
    assert_eq!(filled, 1);
}

#[test]
fn test_bonus_n_effect_seeds_1024_when_absent() {
    let board = Board::from_cells([
        [n(512), n(8), E, E],
        [E, E, E, E],
        [E, E, E, E],
        [E, E, E, E],
    ]);

    let out = board_transform(Letter::N)(&board, &mut SimpleRng::new(1));
    assert_eq!(out.max_tile(), 1024);
    let filled = out.cells().iter().filter(|c| !c.is_empty()).count();
    assert_eq!(filled, 1);
}

#[test]
fn test_bonus_n_effect_keeps_peak_tiles() {
    let board = Board::from_cells([
        [n(2048), n(8), E, E],
        [E, n(2048), E, E],
        [E, E, E, E],
        [E, E, E, E],
    ]);

    let out = board_transform(Letter::N)(&board, &mut SimpleRng::new(1));
    assert_eq!(out.get(0, 0), Some(n(2048)));
    assert_eq!(out.get(1, 1), Some(n(2048)));
    assert_eq!(out.get(0, 1), Some(E));
}

#[test]
fn test_bonus_b_effect_raises_max_in_place() {
    let board = Board::from_cells([
        [n(2), E, E, E],
        [E, E, n(1024), E],
        [E, E, E, E],
        [E, n(16), E, E],
    ]);

    let out = board_transform(Letter::B)(&board, &mut SimpleRng::new(1));
    assert_eq!(out.get(1, 2), Some(n(8192)));
    // Nothing else is cleared
    assert_eq!(out.get(0, 0), Some(n(2)));
    assert_eq!(out.get(3, 1), Some(n(16)));
}

#[test]
fn test_pity_timer_forces_t_spawn() {
    // 20 moves without a letter: the next spawn must be T no matter what
    // the roll says
    let mut rng = SimpleRng::new(2024);
    for _ in 0..100 {
        let mut board = Board::new();
        board.set(0, 0, Cell::Number(4));

        let spawned = spawn_tile(
            &mut board,
            &[],
            DEFAULT_MIN_TILE,
            LETTER_PITY_THRESHOLDS[0],
            &mut rng,
        )
        .unwrap();
        assert_eq!(spawned.letter(), Some(Letter::T));
    }
}

#[test]
fn test_spawn_tier_elevation() {
    let mut rng = SimpleRng::new(55);

    for _ in 0..100 {
        let mut board = Board::new();
        let spawned = spawn_tile(&mut board, &ALL_SIX, RAISED_MIN_TILE_N, 0, &mut rng).unwrap();
        let value = spawned.cell.number().unwrap();
        assert!(value == 128 || value == 256, "N tier gave {}", value);
    }

    for _ in 0..100 {
        let mut board = Board::new();
        let spawned = spawn_tile(&mut board, &ALL_SIX, RAISED_MIN_TILE_B, 0, &mut rng).unwrap();
        let value = spawned.cell.number().unwrap();
        assert!(value == 512 || value == 1024, "B tier gave {}", value);
    }
}

#[test]
fn test_spawn_never_overwrites_occupied_cells() {
    let mut rng = SimpleRng::new(88);
    let mut board = Board::new();
    board.set(0, 0, Cell::Number(2));
    board.set(1, 1, Cell::Number(4));

    let before_filled = 2;
    for step in 0..14 {
        let spawned = spawn_tile(&mut board, &ALL_SIX, DEFAULT_MIN_TILE, 0, &mut rng);
        assert!(spawned.is_some(), "board filled early at step {}", step);
    }
    let filled = board.cells().iter().filter(|c| !c.is_empty()).count();
    assert_eq!(filled, before_filled + 14);

    // Board is now full: spawn is a silent no-op
    assert!(spawn_tile(&mut board, &ALL_SIX, DEFAULT_MIN_TILE, 0, &mut rng).is_none());
}

#[test]
fn test_single_letter_invariant_at_spawn() {
    // With a letter already on the board, even a forced-pity spawn
    // produces a number instead
    let mut rng = SimpleRng::new(3);
    let mut board = Board::new();
    board.set(3, 3, Cell::Letter(Letter::T));

    for _ in 0..10 {
        let spawned = spawn_tile(
            &mut board,
            &[],
            DEFAULT_MIN_TILE,
            LETTER_PITY_THRESHOLDS[0],
            &mut rng,
        )
        .unwrap();
        assert!(spawned.letter().is_none());
    }
    assert_eq!(board.letters_on_board(), 1);
}
