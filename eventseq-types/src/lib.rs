//! # eventseq-types
//!
//! Shared type definitions for the eventseq step sequencer.
//! Plain data only: handles, banks, per-step value tables, the action enum
//! a control layer sends, and the error taxonomy. No engine logic lives here.

pub mod action;
mod error;
pub mod state;

pub use action::SequencerAction;
pub use error::SequenceError;

// Re-export all state types at crate root for convenience
pub use state::*;

/// Stable handle to a step record inside the engine's arena.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct StepId(u32);

impl StepId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-based ordinal of a step within the pattern. Assigned at creation, never changed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct StepIndex(u16);

impl StepIndex {
    pub const FIRST: StepIndex = StepIndex(1);

    /// Create a StepIndex. Panics if index == 0; use `try_from` for unchecked input.
    pub fn new(index: u16) -> Self {
        assert!(index > 0, "StepIndex is 1-based");
        Self(index)
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// The following ordinal, or None at u16::MAX.
    pub fn succ(self) -> Option<StepIndex> {
        self.0.checked_add(1).map(StepIndex)
    }

    /// The preceding ordinal, or None at the first step.
    pub fn pred(self) -> Option<StepIndex> {
        if self.0 > 1 {
            Some(StepIndex(self.0 - 1))
        } else {
            None
        }
    }
}

/// A zero was given where a 1-based step index was expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroStepIndex;

impl std::fmt::Display for ZeroStepIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "step indices start at 1")
    }
}

impl std::error::Error for ZeroStepIndex {}

impl TryFrom<u16> for StepIndex {
    type Error = ZeroStepIndex;

    fn try_from(index: u16) -> Result<Self, Self::Error> {
        if index == 0 {
            Err(ZeroStepIndex)
        } else {
            Ok(Self(index))
        }
    }
}

impl std::fmt::Display for StepIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
