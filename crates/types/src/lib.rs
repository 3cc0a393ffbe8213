//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! They are plain data, usable from the core simulation, from renderers that
//! consume snapshots, and from input sources that produce [`Command`]s.
//!
//! # Board Dimensions
//!
//! The default playfield is wide and shallow:
//!
//! - **Columns**: 20 (indexed 0-19)
//! - **Rows**: 15 (indexed 0-14, row 0 at the top)
//! - **Spawn position**: column `columns / 2 - 2`, row [`SPAWN_ROW`] (above the board)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Default host frame interval (~60 FPS) |
//! | `DEFAULT_DROP_INTERVAL_MS` | 520 | Gravity step interval |
//! | `NOTICE_DURATION_MS` | 2000 | How long the "game exited" notice stays up |
//!
//! # Examples
//!
//! ```
//! use drop_stack_types::{Command, Phase, ShapeKind, DEFAULT_COLUMNS, DEFAULT_ROWS};
//!
//! let kind = ShapeKind::from_str("t").unwrap();
//! assert_eq!(kind, ShapeKind::T);
//!
//! assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
//! assert_eq!(Phase::default(), Phase::Idle);
//!
//! assert_eq!(DEFAULT_COLUMNS, 20);
//! assert_eq!(DEFAULT_ROWS, 15);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells
pub const DEFAULT_COLUMNS: u16 = 20;

/// Default board height in cells
pub const DEFAULT_ROWS: u16 = 15;

/// Side length of the square bounding box every shape lives in
pub const SHAPE_SIZE: usize = 4;

/// Row at which new pieces appear (two rows above the visible board)
pub const SPAWN_ROW: i32 = -2;

/// Default host frame interval in milliseconds
pub const TICK_MS: u32 = 16;

/// Default gravity interval in milliseconds
pub const DEFAULT_DROP_INTERVAL_MS: u32 = 520;

/// Display window of the exit notice, in milliseconds
pub const NOTICE_DURATION_MS: u64 = 2000;

/// Default line clear scores, indexed by the number of rows cleared at once
pub const DEFAULT_SCORE_TABLE: [u32; 5] = [0, 100, 300, 500, 800];

/// Range of piece opacity tokens, in percent (lower inclusive, upper exclusive)
pub const COLOR_OPACITY_MIN: u8 = 50;
pub const COLOR_OPACITY_MAX: u8 = 90;

/// Tetromino shape kinds
///
/// The declaration order matches the shape table in the core crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl ShapeKind {
    /// All kinds, in shape table order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Index into the shape table
    pub fn index(&self) -> usize {
        match self {
            ShapeKind::I => 0,
            ShapeKind::O => 1,
            ShapeKind::T => 2,
            ShapeKind::L => 3,
            ShapeKind::J => 4,
            ShapeKind::S => 5,
            ShapeKind::Z => 6,
        }
    }

    /// Parse shape kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
        }
    }
}

/// Opaque color token attached to a piece and to every cell it locks into.
///
/// The engine only stores and copies it. The value is an opacity in percent
/// within `COLOR_OPACITY_MIN..COLOR_OPACITY_MAX`; renderers decide how to use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorToken(u8);

impl ColorToken {
    pub const fn new(opacity_percent: u8) -> Self {
        Self(opacity_percent)
    }

    pub fn opacity_percent(&self) -> u8 {
        self.0
    }

    /// Opacity as a 0.0..=1.0 alpha value
    pub fn alpha(&self) -> f32 {
        f32::from(self.0.min(100)) / 100.0
    }
}

impl Default for ColorToken {
    fn default() -> Self {
        Self(COLOR_OPACITY_MIN)
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(ColorToken)`: Cell locked with the color of the piece that filled it
pub type Cell = Option<ColorToken>;

/// Game state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Start screen; nothing falls until a start command arrives
    #[default]
    Idle,
    /// A piece is falling and movement commands are accepted
    Playing,
    /// A freshly spawned piece was blocked; only restart is accepted
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Playing => "playing",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Discrete commands delivered by an input source
///
/// Commands that are not valid in the current [`Phase`] are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Reset and begin playing (from the start screen)
    Start,
    /// Reset and begin playing (after a game over)
    Restart,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot move
    SoftDrop,
    /// Rotate piece 90° clockwise with a one-column wall kick
    Rotate,
    /// Abandon the current game and return to the start screen
    Exit,
}

impl Command {
    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use drop_stack_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATE"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(Command::Start),
            "restart" => Some(Command::Restart),
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "rotate" => Some(Command::Rotate),
            "exit" => Some(Command::Exit),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Restart => "restart",
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::Rotate => "rotate",
            Command::Exit => "exit",
        }
    }
}

/// Event emitted after a piece locks (consumed by observers, e.g. a renderer flash)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEvent {
    /// Rows removed by this lock
    pub lines_cleared: u32,
    /// Points added to the score by this lock
    pub points: u32,
    /// Whether the replacement piece failed to spawn
    pub game_over: bool,
}
