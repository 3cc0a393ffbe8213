use drop_stack::core::{DropOutcome, EngineConfig, GameSnapshot, GameState};
use drop_stack::types::{ColorToken, Command};

fn fnv1a64_bytes(bytes: impl Iterator<Item = u8>) -> u64 {
    // FNV-1a 64-bit.
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

fn fnv1a64_board(snap: &GameSnapshot) -> u64 {
    fnv1a64_bytes(
        snap.board
            .iter()
            .map(|cell| cell.map_or(0, |c| c.opacity_percent().max(1))),
    )
}

fn started(seed: u64) -> GameState {
    let mut gs = GameState::new(&EngineConfig::default().with_seed(seed)).unwrap();
    gs.apply_command(Command::Start, 0);
    gs
}

#[test]
fn snapshot_into_sets_board_hash() {
    let mut gs = started(1);

    let mut snap = GameSnapshot::default();
    gs.snapshot_into(&mut snap);
    assert_eq!(snap.board_hash, fnv1a64_board(&snap));
    let empty = snap.board_hash;

    while !matches!(gs.soft_drop(), DropOutcome::Locked(_)) {}

    gs.snapshot_into(&mut snap);
    assert_eq!(snap.board_hash, fnv1a64_board(&snap));
    assert_ne!(snap.board_hash, empty);
}

#[test]
fn moving_the_active_piece_does_not_change_board_hash() {
    let mut gs = started(1);
    let before = gs.snapshot();

    gs.apply_command(Command::MoveLeft, 0);
    gs.apply_command(Command::Rotate, 0);
    gs.tick(600);

    let after = gs.snapshot();
    assert_eq!(after.board_hash, before.board_hash);
    assert_eq!(after.board, before.board);
}

#[test]
fn snapshot_into_reuses_buffer_without_stale_cells() {
    let mut gs = started(2);
    let mut snap = gs.snapshot();
    let capacity = snap.board.capacity();

    gs.apply_command(Command::Exit, 0);
    gs.apply_command(Command::Start, 0);
    gs.snapshot_into(&mut snap);

    assert_eq!(snap.board.len(), 300);
    assert_eq!(snap.board.capacity(), capacity);
    assert_eq!(snap, gs.snapshot());
}

#[test]
fn board_hash_covers_cell_colors_not_just_occupancy() {
    let mut gs = started(3);
    gs.board_mut().set(0, 14, Some(ColorToken::new(55)));
    let first = gs.snapshot().board_hash;

    gs.board_mut().set(0, 14, Some(ColorToken::new(85)));
    let snap = gs.snapshot();

    assert_ne!(snap.board_hash, first);
    assert_eq!(snap.board_hash, fnv1a64_board(&snap));
}
