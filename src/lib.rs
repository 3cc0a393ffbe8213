//! Drop Stack (workspace facade crate).
//!
//! Re-exports the workspace crates under stable paths:
//! `drop_stack::{core, engine, types}`. The implementation lives in dedicated
//! crates under `crates/`.

pub use drop_stack_core as core;
pub use drop_stack_engine as engine;
pub use drop_stack_types as types;
