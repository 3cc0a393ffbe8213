//! Game state module - manages the complete game state
//!
//! This module ties together the board, the shape table, piece generation,
//! scoring and gravity. It owns the Idle / Playing / GameOver state machine and
//! decides which commands are accepted in each phase.
//!
//! Lock, line clear and spawn always run together inside one `&mut self` call,
//! so no caller can observe a locked piece whose rows have not been cleared yet.

use arrayvec::ArrayVec;
use rand::RngCore;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::board::Board;
use crate::config::{ConfigError, EngineConfig};
use crate::gravity::Gravity;
use crate::rng::PieceGenerator;
use crate::scoring::{apply_line_clear, ScoreTable};
use crate::shapes::{base_shape, rotate_cw, Shape};
use crate::snapshot::GameSnapshot;
use crate::types::{
    ColorToken, Command, LockEvent, Phase, ShapeKind, NOTICE_DURATION_MS, SPAWN_ROW,
};

/// Falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: ShapeKind,
    pub shape: Shape,
    /// Board column of the shape's left edge
    pub x: i32,
    /// Board row of the shape's top edge; negative while above the board
    pub y: i32,
    pub color: ColorToken,
}

impl Piece {
    /// Create a piece of `kind` turned `turns` quarter turns clockwise, at (0, 0)
    pub fn new(kind: ShapeKind, turns: u8, color: ColorToken) -> Self {
        Self {
            kind,
            shape: base_shape(kind).rotated(turns),
            x: 0,
            y: 0,
            color,
        }
    }

    /// The same piece moved to (x, y)
    pub fn at(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }

    /// Absolute board coordinates of the occupied cells
    pub fn cells(&self) -> ArrayVec<(i32, i32), 16> {
        self.shape
            .offsets()
            .iter()
            .map(|&(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    pub fn collides_with(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y)
    }
}

impl Default for Piece {
    fn default() -> Self {
        Self::new(ShapeKind::I, 0, ColorToken::default())
    }
}

/// Result of a single soft drop step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece moved down one row
    Moved,
    /// The piece could not move and was locked
    Locked(LockEvent),
    /// Nothing to drop (not playing, or no active piece)
    Ignored,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = ChaCha8Rng> {
    board: Board,
    active: Option<Piece>,
    next: Piece,
    generator: PieceGenerator<R>,
    gravity: Gravity,
    score_table: ScoreTable,
    score: u32,
    phase: Phase,
    /// Monotonic-clock deadline (ms) of the "game exited" notice
    notice_until: Option<u64>,
    /// Number of resets performed (increments on every start/restart)
    episode_id: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState<ChaCha8Rng> {
    /// Create a new idle game from a configuration.
    ///
    /// Uses `config.seed` when present, otherwise seeds from the OS.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        let generator = match config.seed {
            Some(seed) => PieceGenerator::new(seed),
            None => PieceGenerator::from_entropy(),
        };
        Self::with_generator(config, generator)
    }
}

impl<R: RngCore> GameState<R> {
    /// Create a new idle game with an injected piece generator
    pub fn with_generator(
        config: &EngineConfig,
        mut generator: PieceGenerator<R>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let board = Board::new(config.columns as usize, config.rows as usize);
        let (x, y) = spawn_position(board.width());
        let next = generator.draw(x, y);

        Ok(Self {
            board,
            active: None,
            next,
            generator,
            gravity: Gravity::new(config.drop_interval_ms),
            score_table: config.score_table.clone(),
            score: 0,
            phase: Phase::Idle,
            notice_until: None,
            episode_id: 0,
            last_event: None,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next(&self) -> Piece {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scenario setup and tooling.
    ///
    /// Writing cells directly bypasses lock and clear; callers own the result.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn gravity(&self) -> &Gravity {
        &self.gravity
    }

    pub fn notice_until(&self) -> Option<u64> {
        self.notice_until
    }

    /// Whether the exit notice should still be displayed at `now_ms`
    pub fn notice_visible(&self, now_ms: u64) -> bool {
        self.notice_until.is_some_and(|until| now_ms < until)
    }

    /// Replace the queued next piece (scripted scenarios, tooling)
    pub fn set_next(&mut self, piece: Piece) {
        self.next = piece;
    }

    /// Put `piece` in play as the active piece if it does not collide.
    ///
    /// Only valid while playing; returns false otherwise.
    pub fn place_active(&mut self, piece: Piece) -> bool {
        if self.phase != Phase::Playing || piece.collides_with(&self.board) {
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Full reset: empty board, zero score, fresh pieces, Playing
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.gravity.reset();
        self.active = None;
        self.last_event = None;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.phase = Phase::Playing;

        let (x, y) = self.spawn_position();
        self.next = self.generator.draw(x, y);
        self.spawn();

        debug!(episode = self.episode_id, "game reset");
    }

    /// Spawn column and row for new pieces
    pub fn spawn_position(&self) -> (i32, i32) {
        spawn_position(self.board.width())
    }

    /// Promote `next` to the active piece and draw a fresh `next`.
    ///
    /// If the promoted piece collides at the spawn position the game is over:
    /// the piece is discarded without touching the board. Only meaningful while
    /// playing; returns false in any other phase.
    pub fn spawn(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let (x, y) = self.spawn_position();
        let piece = self.next.at(x, y);
        self.next = self.generator.draw(x, y);

        if piece.collides_with(&self.board) {
            self.active = None;
            self.phase = Phase::GameOver;
            debug!(score = self.score, kind = piece.kind.as_str(), "spawn blocked, game over");
            return false;
        }

        self.active = Some(piece);
        true
    }

    fn playing_piece(&self) -> Option<Piece> {
        if self.phase != Phase::Playing {
            return None;
        }
        self.active
    }

    /// Shift the active piece horizontally; blocked moves are no-ops
    pub fn move_horizontal(&mut self, delta: i32) -> bool {
        let Some(active) = self.playing_piece() else {
            return false;
        };

        let nx = active.x + delta;
        if self.board.collides(&active.shape, nx, active.y) {
            return false;
        }
        self.active = Some(active.at(nx, active.y));
        true
    }

    /// Move the active piece down one row, locking it if it cannot move
    pub fn soft_drop(&mut self) -> DropOutcome {
        let Some(active) = self.playing_piece() else {
            return DropOutcome::Ignored;
        };

        let ny = active.y + 1;
        if !self.board.collides(&active.shape, active.x, ny) {
            self.active = Some(active.at(active.x, ny));
            return DropOutcome::Moved;
        }

        DropOutcome::Locked(self.lock_active(active))
    }

    /// Lock, clear, score and spawn as one step
    fn lock_active(&mut self, piece: Piece) -> LockEvent {
        self.board.lock(&piece.shape, piece.x, piece.y, piece.color);
        self.active = None;

        let cleared = self.board.clear_full_rows();
        let before = self.score;
        self.score = apply_line_clear(self.score, &self.score_table, cleared);
        let points = self.score - before;

        let spawned = self.spawn();
        let event = LockEvent {
            lines_cleared: cleared as u32,
            points,
            game_over: !spawned,
        };

        debug!(
            lines_cleared = cleared,
            points,
            score = self.score,
            "piece locked"
        );
        self.last_event = Some(event);
        event
    }

    /// Rotate the active piece clockwise.
    ///
    /// Candidate positions are tried in order: in place, one column left, one
    /// column right. There is no vertical kick. If all three collide the piece
    /// is left untouched.
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.playing_piece() else {
            return false;
        };

        let rotated = rotate_cw(&active.shape);
        for dx in [0, -1, 1] {
            let nx = active.x + dx;
            if !self.board.collides(&rotated, nx, active.y) {
                self.active = Some(Piece {
                    shape: rotated,
                    x: nx,
                    ..active
                });
                return true;
            }
        }

        trace!(x = active.x, y = active.y, "rotation rejected");
        false
    }

    /// Leave the current game: back to Idle with the exit notice armed.
    ///
    /// Accepted while playing and after a game over. Board and score stay as
    /// they were until the next start.
    pub fn exit(&mut self, now_ms: u64) -> bool {
        if self.phase == Phase::Idle {
            return false;
        }
        self.active = None;
        self.gravity.reset();
        self.phase = Phase::Idle;
        self.notice_until = Some(now_ms.saturating_add(NOTICE_DURATION_MS));
        debug!(score = self.score, "game exited");
        true
    }

    /// Main game tick - advance gravity by `elapsed_ms`.
    ///
    /// At most one forced drop happens per call. Returns true if one did.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.playing_piece().is_none() {
            return false;
        }
        if !self.gravity.advance(elapsed_ms) {
            return false;
        }
        self.soft_drop();
        true
    }

    /// Apply a command if the current phase accepts it.
    ///
    /// `now_ms` is the caller's monotonic clock reading, used only by `Exit`.
    /// Returns true if the command changed anything.
    pub fn apply_command(&mut self, command: Command, now_ms: u64) -> bool {
        match (self.phase, command) {
            (Phase::Idle, Command::Start | Command::Restart)
            | (Phase::GameOver, Command::Restart) => {
                self.reset();
                true
            }
            (Phase::Playing, Command::MoveLeft) => self.move_horizontal(-1),
            (Phase::Playing, Command::MoveRight) => self.move_horizontal(1),
            (Phase::Playing, Command::SoftDrop) => {
                !matches!(self.soft_drop(), DropOutcome::Ignored)
            }
            (Phase::Playing, Command::Rotate) => self.rotate(),
            (Phase::Playing | Phase::GameOver, Command::Exit) => self.exit(now_ms),
            (phase, command) => {
                trace!(
                    phase = phase.as_str(),
                    command = command.as_str(),
                    "command ignored"
                );
                false
            }
        }
    }

    /// Write a read-only view into `out`, reusing its board buffer
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.columns = self.board.width() as u16;
        out.rows = self.board.height() as u16;
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());
        out.board_hash = self.board.grid_hash();
        out.active = self.active;
        out.next = self.next;
        out.score = self.score;
        out.phase = self.phase;
        out.notice_active_until = self.notice_until;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

/// Column `width / 2 - 2`, two rows above the board
pub fn spawn_position(width: usize) -> (i32, i32) {
    ((width / 2) as i32 - 2, SPAWN_ROW)
}
