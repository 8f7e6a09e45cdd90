//! Note output seam: what the engine asks the sound layer to do on each pulse.
//!
//! `NoteOutput` captures the two transitions the engine drives (release the
//! notes of the step being left, trigger the notes of the step being entered)
//! independently of how the hardware layer produces sound. This keeps the
//! stop-before-move / trigger-after-move ordering testable without hardware.

use std::fmt;
use std::sync::{Arc, Mutex};

use eventseq_types::{Bank, StepIndex};

/// Result type for output operations.
pub type OutputResult<T = ()> = Result<T, OutputError>;

/// Error from a note output.
#[derive(Debug, Clone)]
pub struct OutputError(pub String);

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for OutputError {}

impl From<String> for OutputError {
    fn from(s: String) -> Self {
        OutputError(s)
    }
}

/// Receiver of note transitions. Only called with non-empty note lists.
pub trait NoteOutput: Send {
    /// Release notes sounding on `step` before the cursor leaves it.
    fn stop_notes(&self, step: StepIndex, bank: Bank, notes: &[u8]) -> OutputResult;

    /// Start notes stored on `step` after the cursor arrives.
    fn trigger_notes(&self, step: StepIndex, bank: Bank, notes: &[u8]) -> OutputResult;
}

impl<T: NoteOutput + Sync> NoteOutput for Arc<T> {
    fn stop_notes(&self, step: StepIndex, bank: Bank, notes: &[u8]) -> OutputResult {
        (**self).stop_notes(step, bank, notes)
    }

    fn trigger_notes(&self, step: StepIndex, bank: Bank, notes: &[u8]) -> OutputResult {
        (**self).trigger_notes(step, bank, notes)
    }
}

/// Discards every transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOutput;

impl NoteOutput for NullOutput {
    fn stop_notes(&self, _step: StepIndex, _bank: Bank, _notes: &[u8]) -> OutputResult {
        Ok(())
    }

    fn trigger_notes(&self, _step: StepIndex, _bank: Bank, _notes: &[u8]) -> OutputResult {
        Ok(())
    }
}

/// Writes transitions to the log under target `output`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOutput;

impl NoteOutput for LogOutput {
    fn stop_notes(&self, step: StepIndex, bank: Bank, notes: &[u8]) -> OutputResult {
        log::debug!(target: "output", "note off step={} bank={:?} notes={:?}", step, bank, notes);
        Ok(())
    }

    fn trigger_notes(&self, step: StepIndex, bank: Bank, notes: &[u8]) -> OutputResult {
        log::debug!(target: "output", "note on step={} bank={:?} notes={:?}", step, bank, notes);
        Ok(())
    }
}

// ─── Test Output ────────────────────────────────────────────────────

/// A transition recorded by `TestOutput`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputOp {
    Stop {
        step: StepIndex,
        bank: Bank,
        notes: Vec<u8>,
    },
    Trigger {
        step: StepIndex,
        bank: Bank,
        notes: Vec<u8>,
    },
}

/// Records all transitions for assertions. Share it with the engine through
/// `Arc<TestOutput>` and inspect it from the test.
pub struct TestOutput {
    ops: Mutex<Vec<OutputOp>>,
    fail: Mutex<bool>,
}

impl TestOutput {
    pub fn new() -> Self {
        Self {
            ops: Mutex::new(Vec::new()),
            fail: Mutex::new(false),
        }
    }

    /// Return all recorded operations.
    pub fn operations(&self) -> Vec<OutputOp> {
        self.ops.lock().map(|ops| ops.clone()).unwrap_or_default()
    }

    /// Clear recorded operations.
    pub fn clear(&self) {
        if let Ok(mut ops) = self.ops.lock() {
            ops.clear();
        }
    }

    /// Make every subsequent call fail (after recording it).
    pub fn set_failing(&self, failing: bool) {
        if let Ok(mut fail) = self.fail.lock() {
            *fail = failing;
        }
    }

    fn record(&self, op: OutputOp) -> OutputResult {
        if let Ok(mut ops) = self.ops.lock() {
            ops.push(op);
        }
        match self.fail.lock() {
            Ok(fail) if *fail => Err(OutputError("test output failure".to_string())),
            _ => Ok(()),
        }
    }
}

impl Default for TestOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteOutput for TestOutput {
    fn stop_notes(&self, step: StepIndex, bank: Bank, notes: &[u8]) -> OutputResult {
        self.record(OutputOp::Stop {
            step,
            bank,
            notes: notes.to_vec(),
        })
    }

    fn trigger_notes(&self, step: StepIndex, bank: Bank, notes: &[u8]) -> OutputResult {
        self.record(OutputOp::Trigger {
            step,
            bank,
            notes: notes.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_records_in_order() {
        let out = Arc::new(TestOutput::new());
        let step = StepIndex::new(2);
        out.stop_notes(step, Bank::A, &[60]).unwrap();
        out.trigger_notes(step, Bank::B, &[64, 67]).unwrap();

        assert_eq!(
            out.operations(),
            vec![
                OutputOp::Stop { step, bank: Bank::A, notes: vec![60] },
                OutputOp::Trigger { step, bank: Bank::B, notes: vec![64, 67] },
            ]
        );
        out.clear();
        assert!(out.operations().is_empty());
    }

    #[test]
    fn failing_output_still_records() {
        let out = TestOutput::new();
        out.set_failing(true);
        assert!(out.trigger_notes(StepIndex::FIRST, Bank::A, &[1]).is_err());
        assert_eq!(out.operations().len(), 1);
    }
}
