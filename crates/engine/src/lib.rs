//! Engine façade crate.
//!
//! Wraps the deterministic core in the surface hosts actually use:
//!
//! - [`Engine`]: `tick(dt)` + `command(kind)` + `snapshot()` over an owned game
//!   and an injected monotonic [`Clock`]
//! - [`runtime`]: a single-writer tokio service for hosts that receive input on
//!   other threads or tasks
//!
//! # Example
//!
//! ```
//! use drop_stack_engine::{Engine, ManualClock};
//! use drop_stack_engine::core::EngineConfig;
//! use drop_stack_engine::types::{Command, Phase};
//!
//! let clock = ManualClock::new(0);
//! let mut engine = Engine::with_clock(EngineConfig::default().with_seed(1), clock.clone()).unwrap();
//!
//! engine.command(Command::Start);
//! for _ in 0..60 {
//!     clock.advance(16);
//!     engine.tick(16);
//! }
//! assert_eq!(engine.snapshot().phase, Phase::Playing);
//! ```

pub mod clock;
pub mod engine;
pub mod runtime;

pub use drop_stack_core as core;
pub use drop_stack_types as types;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use engine::Engine;
pub use runtime::{spawn, EngineHandle, ServiceConfig};
