//! Rules of the block-stacking game, with no rendering, input devices or I/O.
//!
//! Everything here is driven by explicit calls: the host passes elapsed time to
//! [`GameState::tick`] and a clock reading to [`GameState::apply_command`].
//! With a fixed seed two games fed the same calls stay identical, which is what
//! the scenario tests rely on.
//!
//! # Module Structure
//!
//! - [`board`]: configurable game board with collision detection and line clearing
//! - [`game_state`]: Complete game state: active piece, phase machine, commands
//! - [`shapes`]: 4x4 tetromino matrices and the clockwise rotation operator
//! - [`rng`]: uniform random pieces with random orientation and color
//! - [`scoring`]: flat line clear score table
//! - [`gravity`]: accumulator timer for forced drops
//! - [`config`]: construction-time configuration and validation
//!
//! # Game Rules
//!
//! These rules are deliberately simpler than the modern guidelines:
//!
//! - **Uniform randomizer**: every draw picks any of the 7 shapes, no bag
//! - **Random spawn orientation**: each piece arrives turned 0-3 quarter turns
//! - **One-column kick**: rotation tries in place, then one column left, then right
//! - **No lock delay**: a piece locks the moment a downward step is blocked
//! - **Scoring**: `[0, 100, 300, 500, 800]` for 0-4 rows, nothing else
//!
//! # Example
//!
//! ```
//! use drop_stack_core::{EngineConfig, GameState};
//! use drop_stack_types::{Command, Phase};
//!
//! // Create and start a game
//! let mut game = GameState::new(&EngineConfig::default().with_seed(12345)).unwrap();
//! game.apply_command(Command::Start, 0);
//! assert_eq!(game.phase(), Phase::Playing);
//!
//! // Apply commands
//! game.apply_command(Command::MoveRight, 0);
//! game.apply_command(Command::Rotate, 0);
//! game.apply_command(Command::SoftDrop, 0);
//!
//! // Advance gravity by one frame
//! game.tick(16);
//! assert!(game.active().is_some());
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed milliseconds. Gravity moves the piece one row per
//! `drop_interval_ms` (520ms by default), never more than one row per call.

pub mod board;
pub mod config;
pub mod game_state;
pub mod gravity;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use drop_stack_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, EngineConfig};
pub use game_state::{DropOutcome, GameState, Piece};
pub use gravity::Gravity;
pub use rng::PieceGenerator;
pub use scoring::ScoreTable;
pub use shapes::{base_shape, rotate_cw, Shape, SHAPES};
pub use snapshot::GameSnapshot;
