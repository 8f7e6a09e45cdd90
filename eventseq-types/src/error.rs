use serde::{Deserialize, Serialize};

use crate::StepIndex;

/// Recoverable failures surfaced by the sequence engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceError {
    /// A per-step accessor was called before the first advance.
    UseBeforeStart,
    /// The current step already holds `capacity` notes in the active bank.
    PolyphonyExceeded { step: StepIndex, capacity: usize },
    /// Pattern length must be at least 1.
    InvalidLength(u16),
}

impl std::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UseBeforeStart => write!(f, "engine not started: advance has not been called"),
            Self::PolyphonyExceeded { step, capacity } => {
                write!(f, "step {} polyphony exceeded (capacity {})", step, capacity)
            }
            Self::InvalidLength(len) => write!(f, "invalid pattern length {}", len),
        }
    }
}

impl std::error::Error for SequenceError {}
