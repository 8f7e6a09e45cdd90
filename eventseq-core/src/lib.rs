//! # eventseq-core
//!
//! Step-sequencing engine for a two-bank hardware sequencer module. The engine
//! tracks which step of a pattern is active, stores per-step parameter values
//! in two selectable banks, and advances once per clock pulse, creating steps
//! the first time they are reached.
//!
//! ## Quick Start
//!
//! ```rust
//! use eventseq_core::engine::SequenceEngine;
//!
//! let mut engine = SequenceEngine::new(4).unwrap();
//! assert_eq!(engine.advance().get(), 1);
//! engine.set_sync(500).unwrap();
//! engine.toggle_bank();
//! engine.set_sync(999).unwrap();
//! engine.toggle_bank();
//! assert_eq!(engine.sync(), Ok(500));
//! ```
//!
//! ## Module Overview
//!
//! - [`engine`] — `SequenceEngine`: step arena, cursor, banks, direction, the wrap rule
//! - [`output`] — `NoteOutput` trait the engine drives on every pulse
//! - [`dispatch`] — `dispatch_action()` mapping `SequencerAction`s onto the engine
//! - [`handle`] — `SequencerHandle`: the engine on its own thread, one writer only
//! - [`snapshot`] — serializable engine view
//! - [`config`] — TOML configuration (embedded defaults + user override)

pub mod commands;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod handle;
pub mod output;
mod seq_thread;
pub mod snapshot;

pub use eventseq_types as types;
