//! Actions a control layer sends to the sequencer.

use serde::{Deserialize, Serialize};

use crate::{Bank, Direction, StepParam};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SequencerAction {
    /// One clock pulse.
    Advance,
    ToggleBank,
    SetBank(Bank),
    ToggleDirection,
    SetDirection(Direction),
    SetLength(u16),
    /// Write a parameter of the current step in the active bank.
    SetParam(StepParam, u16),
    /// Add a note to the current step in the active bank.
    AddNote(u8),
    ClearNotes,
}

impl SequencerAction {
    /// Whether this action moves the cursor.
    pub fn is_clock(&self) -> bool {
        matches!(self, SequencerAction::Advance)
    }

    /// Whether this action touches the current step and so needs a started engine.
    pub fn needs_cursor(&self) -> bool {
        matches!(
            self,
            SequencerAction::SetParam(..) | SequencerAction::AddNote(_) | SequencerAction::ClearNotes
        )
    }
}
