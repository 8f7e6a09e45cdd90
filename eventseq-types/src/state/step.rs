//! Per-step storage: named parameter slots and a bounded note list, both per bank.

use serde::{Deserialize, Serialize};

use super::bank::Bank;
use crate::{SequenceError, StepIndex};

/// Maximum simultaneous notes a step can hold in one bank.
pub const STEP_POLYPHONY: usize = 4;

/// Named parameter slot on a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepParam {
    Sync,
    Phase1,
    Phase2,
    Decay1,
    Decay2,
}

impl StepParam {
    pub const COUNT: usize = 5;

    pub fn all() -> &'static [StepParam] {
        &[
            StepParam::Sync,
            StepParam::Phase1,
            StepParam::Phase2,
            StepParam::Decay1,
            StepParam::Decay2,
        ]
    }

    /// Column of this parameter in a `StepValues` row.
    pub fn slot(self) -> usize {
        match self {
            StepParam::Sync => 0,
            StepParam::Phase1 => 1,
            StepParam::Phase2 => 2,
            StepParam::Decay1 => 3,
            StepParam::Decay2 => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StepParam::Sync => "sync",
            StepParam::Phase1 => "phase1",
            StepParam::Phase2 => "phase2",
            StepParam::Decay1 => "decay1",
            StepParam::Decay2 => "decay2",
        }
    }

    pub fn parse(s: &str) -> Option<StepParam> {
        let s = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s))
    }
}

/// Parameter values of one step, one row per bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepValues {
    rows: [[u16; StepParam::COUNT]; 2],
}

impl StepValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, bank: Bank, param: StepParam) -> u16 {
        self.rows[bank.as_index()][param.slot()]
    }

    pub fn set(&mut self, bank: Bank, param: StepParam, value: u16) {
        self.rows[bank.as_index()][param.slot()] = value;
    }
}

/// Fixed-capacity list of note numbers sounding together on a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoteSlots {
    notes: [u8; STEP_POLYPHONY],
    len: u8,
}

impl NoteSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a note. Fails without modifying the list when it is full.
    pub fn push(&mut self, step: StepIndex, note: u8) -> Result<(), SequenceError> {
        if self.is_full() {
            return Err(SequenceError::PolyphonyExceeded {
                step,
                capacity: STEP_POLYPHONY,
            });
        }
        self.notes[self.len as usize] = note;
        self.len += 1;
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.notes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len as usize >= STEP_POLYPHONY
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
