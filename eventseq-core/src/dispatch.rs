//! `dispatch_action()`: the single entry point mapping control-layer actions
//! onto engine operations.

use eventseq_types::{SequenceError, SequencerAction, StepIndex};

use crate::engine::SequenceEngine;

/// What a dispatched action did to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    /// Cursor after the action (None while unstarted).
    pub cursor: Option<StepIndex>,
    /// Whether the action advanced the cursor.
    pub moved: bool,
}

pub fn dispatch_action(
    action: &SequencerAction,
    engine: &mut SequenceEngine,
) -> Result<DispatchResult, SequenceError> {
    if action.needs_cursor() && !engine.is_started() {
        return Err(SequenceError::UseBeforeStart);
    }
    let moved = action.is_clock();
    match action {
        SequencerAction::Advance => {
            engine.advance();
        }
        SequencerAction::ToggleBank => engine.toggle_bank(),
        SequencerAction::SetBank(bank) => engine.set_bank(*bank),
        SequencerAction::ToggleDirection => engine.toggle_direction(),
        SequencerAction::SetDirection(direction) => engine.set_direction(*direction),
        SequencerAction::SetLength(length) => engine.set_length(*length)?,
        SequencerAction::SetParam(param, value) => engine.set_param(*param, *value)?,
        SequencerAction::AddNote(note) => engine.add_note(*note)?,
        SequencerAction::ClearNotes => engine.clear_notes()?,
    }
    Ok(DispatchResult {
        cursor: engine.cursor_index(),
        moved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventseq_types::{Bank, Direction, StepParam};

    #[test]
    fn advance_reports_movement() {
        let mut engine = SequenceEngine::new(2).unwrap();
        let result = dispatch_action(&SequencerAction::Advance, &mut engine).unwrap();
        assert!(result.moved);
        assert_eq!(result.cursor, Some(StepIndex::FIRST));

        let result = dispatch_action(&SequencerAction::ToggleBank, &mut engine).unwrap();
        assert!(!result.moved);
        assert_eq!(engine.bank(), Bank::B);
    }

    #[test]
    fn edits_before_start_fail() {
        let mut engine = SequenceEngine::new(2).unwrap();
        let err = dispatch_action(&SequencerAction::SetParam(StepParam::Sync, 1), &mut engine)
            .unwrap_err();
        assert_eq!(err, SequenceError::UseBeforeStart);
        let err = dispatch_action(&SequencerAction::ClearNotes, &mut engine).unwrap_err();
        assert_eq!(err, SequenceError::UseBeforeStart);
        assert_eq!(engine.step_count(), 0);
        // Non-cursor actions are fine while unstarted.
        let result =
            dispatch_action(&SequencerAction::SetDirection(Direction::Reverse), &mut engine).unwrap();
        assert_eq!(result.cursor, None);
    }

    #[test]
    fn scripted_session() {
        let script = [
            SequencerAction::Advance,
            SequencerAction::SetParam(StepParam::Phase2, 7),
            SequencerAction::AddNote(36),
            SequencerAction::Advance,
            SequencerAction::SetLength(1),
            SequencerAction::Advance,
        ];
        let mut engine = SequenceEngine::new(4).unwrap();
        for action in &script {
            dispatch_action(action, &mut engine).unwrap();
        }
        assert_eq!(engine.cursor_index(), Some(StepIndex::FIRST));
        assert_eq!(engine.phase2(), Ok(7));
        assert_eq!(engine.notes().unwrap(), &[36]);

        assert_eq!(
            dispatch_action(&SequencerAction::SetLength(0), &mut engine),
            Err(SequenceError::InvalidLength(0))
        );
        dispatch_action(&SequencerAction::ClearNotes, &mut engine).unwrap();
        assert!(engine.notes().unwrap().is_empty());
    }
}
