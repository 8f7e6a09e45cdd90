//! Messages between `SequencerHandle` and the sequencer thread.

use std::sync::mpsc::Sender;

use eventseq_types::{Bank, SequenceError, SequencerAction, StepIndex, StepParam};

use crate::dispatch::DispatchResult;
use crate::snapshot::EngineSnapshot;

pub type Reply<T> = Sender<Result<T, SequenceError>>;

pub enum SeqCmd {
    /// One clock pulse.
    Tick,
    /// Apply an action. With a reply channel the caller waits for the outcome;
    /// without one, failures come back as `SeqFeedback::Error`.
    Action {
        action: SequencerAction,
        reply: Option<Reply<DispatchResult>>,
    },
    QueryParam {
        param: StepParam,
        reply: Reply<u16>,
    },
    QueryNotes {
        reply: Reply<Vec<u8>>,
    },
    Snapshot {
        reply: Sender<EngineSnapshot>,
    },
    Shutdown,
}

/// Events the sequencer thread reports back.
#[derive(Debug, Clone, PartialEq)]
pub enum SeqFeedback {
    StepChanged { index: StepIndex, bank: Bank },
    Error(SequenceError),
}
