//! SequencerHandle: control-layer interface to the sequencer thread.
//!
//! The engine is not reentrant. Instead of locking it, the handle moves it
//! onto a dedicated thread and funnels every tick, edit and query through one
//! FIFO channel, so exactly one writer ever touches it and commands apply in
//! the order they were sent.

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender as CrossbeamSender;

use eventseq_types::{SequenceError, SequencerAction, StepParam};

use crate::commands::{SeqCmd, SeqFeedback};
use crate::dispatch::DispatchResult;
use crate::engine::SequenceEngine;
use crate::seq_thread::SequencerThread;
use crate::snapshot::EngineSnapshot;

/// Error from a handle call.
#[derive(Debug, Clone, PartialEq)]
pub enum HandleError {
    /// The sequencer thread has exited.
    Disconnected,
    Sequence(SequenceError),
}

impl From<SequenceError> for HandleError {
    fn from(e: SequenceError) -> Self {
        Self::Sequence(e)
    }
}

impl std::fmt::Display for HandleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disconnected => write!(f, "sequencer thread disconnected"),
            Self::Sequence(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for HandleError {}

pub struct SequencerHandle {
    cmd_tx: CrossbeamSender<SeqCmd>,
    feedback_rx: Receiver<SeqFeedback>,
    join_handle: Option<JoinHandle<()>>,
}

impl SequencerHandle {
    /// Move `engine` onto its own thread.
    pub fn spawn(engine: SequenceEngine) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded();
        let (feedback_tx, feedback_rx) = mpsc::channel();

        let join_handle = thread::Builder::new()
            .name("eventseq".to_string())
            .spawn(move || {
                SequencerThread::new(engine, cmd_rx, feedback_tx).run();
            })
            .ok();
        if join_handle.is_none() {
            log::warn!(target: "handle", "failed to spawn sequencer thread");
        }

        Self {
            cmd_tx,
            feedback_rx,
            join_handle,
        }
    }

    /// Queue a command behind everything sent before it.
    pub fn send_cmd(&self, cmd: SeqCmd) -> Result<(), HandleError> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| HandleError::Disconnected)
    }

    /// One clock pulse.
    pub fn tick(&self) -> Result<(), HandleError> {
        self.send_cmd(SeqCmd::Tick)
    }

    /// Fire-and-forget: failures arrive later as `SeqFeedback::Error`.
    pub fn send(&self, action: SequencerAction) {
        if let Err(e) = self.send_cmd(SeqCmd::Action { action, reply: None }) {
            log::warn!(target: "handle", "action dropped: {}", e);
        }
    }

    /// Apply an action and wait for its outcome.
    pub fn apply(&self, action: SequencerAction) -> Result<DispatchResult, HandleError> {
        let (reply, rx) = mpsc::channel();
        self.send_cmd(SeqCmd::Action {
            action,
            reply: Some(reply),
        })?;
        Ok(rx.recv().map_err(|_| HandleError::Disconnected)??)
    }

    pub fn param(&self, param: StepParam) -> Result<u16, HandleError> {
        let (reply, rx) = mpsc::channel();
        self.send_cmd(SeqCmd::QueryParam { param, reply })?;
        Ok(rx.recv().map_err(|_| HandleError::Disconnected)??)
    }

    pub fn notes(&self) -> Result<Vec<u8>, HandleError> {
        let (reply, rx) = mpsc::channel();
        self.send_cmd(SeqCmd::QueryNotes { reply })?;
        Ok(rx.recv().map_err(|_| HandleError::Disconnected)??)
    }

    pub fn snapshot(&self) -> Result<EngineSnapshot, HandleError> {
        let (reply, rx) = mpsc::channel();
        self.send_cmd(SeqCmd::Snapshot { reply })?;
        rx.recv().map_err(|_| HandleError::Disconnected)
    }

    pub fn drain_feedback(&self) -> Vec<SeqFeedback> {
        self.feedback_rx.try_iter().collect()
    }

    /// Stop the thread after it finishes everything already queued.
    pub fn shutdown(&mut self) {
        let _ = self.cmd_tx.send(SeqCmd::Shutdown);
        if let Some(handle) = self.join_handle.take() {
            if handle.join().is_err() {
                log::warn!(target: "handle", "sequencer thread panicked");
            }
        }
    }
}

impl Drop for SequencerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
