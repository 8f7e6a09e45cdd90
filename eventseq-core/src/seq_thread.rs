use std::sync::mpsc::Sender;

use crossbeam_channel::Receiver;

use crate::commands::{SeqCmd, SeqFeedback};
use crate::dispatch::dispatch_action;
use crate::engine::SequenceEngine;

/// Sole owner of the engine. Commands are handled strictly in the order they
/// were sent, each to completion, so an advance never overlaps an accessor and
/// an edit sent between two pulses lands on the step between them.
pub(crate) struct SequencerThread {
    engine: SequenceEngine,
    cmd_rx: Receiver<SeqCmd>,
    feedback_tx: Sender<SeqFeedback>,
}

impl SequencerThread {
    pub fn new(
        engine: SequenceEngine,
        cmd_rx: Receiver<SeqCmd>,
        feedback_tx: Sender<SeqFeedback>,
    ) -> Self {
        Self {
            engine,
            cmd_rx,
            feedback_tx,
        }
    }

    pub fn run(mut self) {
        log::debug!(target: "handle", "sequencer thread started: {:?}", self.engine);
        // Ends when every sender is gone or on Shutdown.
        while let Ok(cmd) = self.cmd_rx.recv() {
            if !self.handle(cmd) {
                break;
            }
        }
        log::debug!(target: "handle", "sequencer thread stopped");
    }

    fn handle(&mut self, cmd: SeqCmd) -> bool {
        match cmd {
            SeqCmd::Tick => {
                let index = self.engine.advance();
                self.step_changed(index);
            }
            SeqCmd::Action { action, reply } => {
                let result = dispatch_action(&action, &mut self.engine);
                if action.is_clock() {
                    if let Ok(r) = &result {
                        if let Some(index) = r.cursor {
                            self.step_changed(index);
                        }
                    }
                }
                match reply {
                    Some(reply) => {
                        let _ = reply.send(result);
                    }
                    None => {
                        if let Err(e) = result {
                            log::warn!(target: "handle", "{:?} failed: {}", action, e);
                            self.feedback(SeqFeedback::Error(e));
                        }
                    }
                }
            }
            SeqCmd::QueryParam { param, reply } => {
                let _ = reply.send(self.engine.param(param));
            }
            SeqCmd::QueryNotes { reply } => {
                let _ = reply.send(self.engine.notes().map(|n| n.to_vec()));
            }
            SeqCmd::Snapshot { reply } => {
                let _ = reply.send(self.engine.snapshot());
            }
            SeqCmd::Shutdown => return false,
        }
        true
    }

    fn step_changed(&self, index: eventseq_types::StepIndex) {
        self.feedback(SeqFeedback::StepChanged {
            index,
            bank: self.engine.bank(),
        });
    }

    fn feedback(&self, msg: SeqFeedback) {
        // Receiver gone means the handle is shutting down.
        let _ = self.feedback_tx.send(msg);
    }
}
