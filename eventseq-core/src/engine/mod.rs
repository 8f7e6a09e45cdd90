//! The sequence engine: an append-only arena of steps, a cursor, a bank
//! selector and a traversal direction, advanced once per clock pulse.

mod arena;
mod wrap;

pub use arena::Step;
pub use wrap::{next_move, Move};

use eventseq_types::{Bank, Direction, NoteSlots, SequenceError, StepId, StepIndex, StepParam};

use crate::config::SequenceDefaults;
use crate::output::{NoteOutput, NullOutput};
use crate::snapshot::{EngineSnapshot, StepSnapshot};
use arena::StepArena;

pub struct SequenceEngine {
    steps: StepArena,
    cursor: Option<StepId>,
    length: u16,
    bank: Bank,
    direction: Direction,
    output: Box<dyn NoteOutput>,
    /// Notes triggered on the last advance, released on the next one.
    sounding: Option<(StepIndex, Bank, NoteSlots)>,
}

impl std::fmt::Debug for SequenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceEngine")
            .field("length", &self.length)
            .field("bank", &self.bank)
            .field("direction", &self.direction)
            .field("cursor", &self.cursor_index())
            .field("steps", &self.steps.len())
            .finish()
    }
}

impl SequenceEngine {
    /// Create an unstarted engine. No steps exist until the first `advance`.
    pub fn new(length: u16) -> Result<Self, SequenceError> {
        if length == 0 {
            return Err(SequenceError::InvalidLength(length));
        }
        Ok(Self {
            steps: StepArena::new(),
            cursor: None,
            length,
            bank: Bank::A,
            direction: Direction::Forward,
            output: Box::new(NullOutput),
            sounding: None,
        })
    }

    /// Create an engine from configured defaults (length, bank, direction).
    pub fn from_defaults(defaults: &SequenceDefaults) -> Result<Self, SequenceError> {
        let mut engine = Self::new(defaults.length)?;
        engine.bank = defaults.bank;
        engine.direction = defaults.direction;
        Ok(engine)
    }

    /// Route note transitions to `output` instead of discarding them.
    pub fn with_output(mut self, output: Box<dyn NoteOutput>) -> Self {
        self.output = output;
        self
    }

    // ── Clock ──────────────────────────────────────────────────────

    /// Move the cursor one step and return its new index.
    ///
    /// The first call creates step 1. Afterwards the cursor walks existing
    /// steps, creates the next one on first visit (forward only), or wraps
    /// at the pattern boundary. Notes triggered on the previous pulse are
    /// stopped before the move; notes of the new step in the active bank are
    /// triggered after it.
    pub fn advance(&mut self) -> StepIndex {
        self.stop_current();

        let next = match self.cursor {
            None => {
                log::debug!(target: "sequencer", "started, creating step 1 of {}", self.length);
                self.steps.push_tail(StepIndex::FIRST)
            }
            Some(cur) => self.step_from(cur),
        };
        self.cursor = Some(next);

        self.trigger_current();
        self.steps.get(next).index()
    }

    fn step_from(&mut self, cur: StepId) -> StepId {
        let from = self.steps.get(cur);
        let (from_index, next, prev) = (from.index(), from.next(), from.prev());

        match next_move(from_index, self.steps.materialized(), self.length, self.direction) {
            Move::Grow(index) => {
                log::trace!(target: "sequencer", "creating step {}", index);
                self.steps.push_tail(index)
            }
            Move::Step(index) => {
                let linked = if Some(index) == from_index.succ() {
                    next
                } else if Some(index) == from_index.pred() {
                    prev
                } else {
                    self.steps.id_of(index)
                };
                debug_assert!(linked.is_some(), "step {} must exist", index);
                linked.unwrap_or(cur)
            }
            Move::Wrap(index) => {
                log::trace!(target: "sequencer", "wrap {} -> {}", from_index, index);
                let target = if index == StepIndex::FIRST {
                    self.steps.head()
                } else {
                    self.steps.id_of(index)
                };
                debug_assert!(target.is_some(), "wrap target {} must exist", index);
                target.unwrap_or(cur)
            }
        }
    }

    fn stop_current(&mut self) {
        if let Some((index, bank, notes)) = self.sounding.take() {
            if let Err(e) = self.output.stop_notes(index, bank, notes.as_slice()) {
                log::warn!(target: "sequencer", "stop notes at step {} failed: {}", index, e);
            }
        }
    }

    fn trigger_current(&mut self) {
        let Some(id) = self.cursor else { return };
        let step = self.steps.get(id);
        let notes = *step.notes(self.bank);
        if notes.is_empty() {
            return;
        }
        let index = step.index();
        if let Err(e) = self.output.trigger_notes(index, self.bank, notes.as_slice()) {
            log::warn!(target: "sequencer", "trigger notes at step {} failed: {}", index, e);
        }
        self.sounding = Some((index, self.bank, notes));
    }

    // ── Configuration ──────────────────────────────────────────────

    pub fn length(&self) -> u16 {
        self.length
    }

    /// Change the pattern length. Existing steps are kept; the new length
    /// takes effect on the next `advance`.
    pub fn set_length(&mut self, length: u16) -> Result<(), SequenceError> {
        if length == 0 {
            return Err(SequenceError::InvalidLength(length));
        }
        if length != self.length {
            log::debug!(target: "sequencer", "length {} -> {}", self.length, length);
            self.length = length;
        }
        Ok(())
    }

    pub fn bank(&self) -> Bank {
        self.bank
    }

    pub fn toggle_bank(&mut self) {
        self.bank = self.bank.toggled();
    }

    pub fn set_bank(&mut self, bank: Bank) {
        self.bank = bank;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.toggled();
    }

    // ── Inspection ─────────────────────────────────────────────────

    pub fn is_started(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn cursor_index(&self) -> Option<StepIndex> {
        self.cursor.map(|id| self.steps.get(id).index())
    }

    /// Number of steps created so far.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// All created steps in creation order.
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    pub fn step(&self, index: StepIndex) -> Option<&Step> {
        self.steps.id_of(index).map(|id| self.steps.get(id))
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            length: self.length,
            bank: self.bank,
            direction: self.direction,
            cursor: self.cursor_index(),
            steps: self
                .steps
                .iter()
                .map(|s| StepSnapshot {
                    index: s.index(),
                    values: *s.values(),
                    notes: [Bank::A, Bank::B].map(|b| s.notes(b).as_slice().to_vec()),
                })
                .collect(),
        }
    }

    // ── Current-step accessors ─────────────────────────────────────

    fn current(&self) -> Result<&Step, SequenceError> {
        self.cursor
            .map(|id| self.steps.get(id))
            .ok_or(SequenceError::UseBeforeStart)
    }

    fn current_mut(&mut self) -> Result<&mut Step, SequenceError> {
        let id = self.cursor.ok_or(SequenceError::UseBeforeStart)?;
        Ok(self.steps.get_mut(id))
    }

    /// Read a parameter of the current step in the active bank.
    pub fn param(&self, param: StepParam) -> Result<u16, SequenceError> {
        Ok(self.current()?.values().get(self.bank, param))
    }

    /// Write a parameter of the current step in the active bank.
    pub fn set_param(&mut self, param: StepParam, value: u16) -> Result<(), SequenceError> {
        let bank = self.bank;
        self.current_mut()?.values_mut().set(bank, param, value);
        Ok(())
    }

    pub fn sync(&self) -> Result<u16, SequenceError> {
        self.param(StepParam::Sync)
    }

    pub fn set_sync(&mut self, value: u16) -> Result<(), SequenceError> {
        self.set_param(StepParam::Sync, value)
    }

    pub fn phase1(&self) -> Result<u16, SequenceError> {
        self.param(StepParam::Phase1)
    }

    pub fn set_phase1(&mut self, value: u16) -> Result<(), SequenceError> {
        self.set_param(StepParam::Phase1, value)
    }

    pub fn phase2(&self) -> Result<u16, SequenceError> {
        self.param(StepParam::Phase2)
    }

    pub fn set_phase2(&mut self, value: u16) -> Result<(), SequenceError> {
        self.set_param(StepParam::Phase2, value)
    }

    pub fn decay1(&self) -> Result<u16, SequenceError> {
        self.param(StepParam::Decay1)
    }

    pub fn set_decay1(&mut self, value: u16) -> Result<(), SequenceError> {
        self.set_param(StepParam::Decay1, value)
    }

    pub fn decay2(&self) -> Result<u16, SequenceError> {
        self.param(StepParam::Decay2)
    }

    pub fn set_decay2(&mut self, value: u16) -> Result<(), SequenceError> {
        self.set_param(StepParam::Decay2, value)
    }

    /// Notes stored on the current step in the active bank.
    pub fn notes(&self) -> Result<&[u8], SequenceError> {
        let bank = self.bank;
        Ok(self.current()?.notes(bank).as_slice())
    }

    /// Add a note to the current step in the active bank.
    pub fn add_note(&mut self, note: u8) -> Result<(), SequenceError> {
        let bank = self.bank;
        let step = self.current_mut()?;
        let index = step.index();
        step.notes_mut(bank).push(index, note)
    }

    pub fn clear_notes(&mut self) -> Result<(), SequenceError> {
        let bank = self.bank;
        self.current_mut()?.notes_mut(bank).clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(engine: &mut SequenceEngine, n: usize) -> Vec<u16> {
        (0..n).map(|_| engine.advance().get()).collect()
    }

    #[test]
    fn zero_length_is_rejected() {
        assert_eq!(SequenceEngine::new(0).unwrap_err(), SequenceError::InvalidLength(0));
    }

    #[test]
    fn new_engine_is_unstarted() {
        let engine = SequenceEngine::new(8).unwrap();
        assert!(!engine.is_started());
        assert_eq!(engine.cursor_index(), None);
        assert_eq!(engine.step_count(), 0);
        assert_eq!(engine.bank(), Bank::A);
        assert_eq!(engine.direction(), Direction::Forward);
    }

    #[test]
    fn accessors_fail_before_start() {
        let mut engine = SequenceEngine::new(4).unwrap();
        assert_eq!(engine.sync(), Err(SequenceError::UseBeforeStart));
        assert_eq!(engine.set_decay1(3), Err(SequenceError::UseBeforeStart));
        assert_eq!(engine.add_note(60), Err(SequenceError::UseBeforeStart));
        assert_eq!(engine.notes().unwrap_err(), SequenceError::UseBeforeStart);
        assert_eq!(engine.step_count(), 0);
    }

    #[test]
    fn forward_walk_grows_then_wraps() {
        let mut engine = SequenceEngine::new(4).unwrap();
        assert_eq!(walk(&mut engine, 4), vec![1, 2, 3, 4]);
        assert_eq!(engine.step_count(), 4);
        assert_eq!(walk(&mut engine, 5), vec![1, 2, 3, 4, 1]);
        assert_eq!(engine.step_count(), 4);
    }

    #[test]
    fn bank_isolation() {
        let mut engine = SequenceEngine::new(4).unwrap();
        engine.advance();
        engine.set_sync(500).unwrap();
        engine.toggle_bank();
        engine.set_sync(999).unwrap();
        engine.toggle_bank();
        assert_eq!(engine.sync(), Ok(500));
        engine.toggle_bank();
        assert_eq!(engine.sync(), Ok(999));
    }

    #[test]
    fn named_accessors_use_distinct_slots() {
        let mut engine = SequenceEngine::new(2).unwrap();
        engine.advance();
        engine.set_phase1(1).unwrap();
        engine.set_phase2(2).unwrap();
        engine.set_decay1(3).unwrap();
        engine.set_decay2(4).unwrap();
        engine.set_sync(5).unwrap();
        assert_eq!(engine.phase1(), Ok(1));
        assert_eq!(engine.phase2(), Ok(2));
        assert_eq!(engine.decay1(), Ok(3));
        assert_eq!(engine.decay2(), Ok(4));
        assert_eq!(engine.sync(), Ok(5));
    }

    #[test]
    fn reverse_from_last_step() {
        let mut engine = SequenceEngine::new(4).unwrap();
        walk(&mut engine, 4);
        engine.set_direction(Direction::Reverse);
        assert_eq!(walk(&mut engine, 4), vec![3, 2, 1, 4]);
        assert_eq!(engine.step_count(), 4);
    }

    #[test]
    fn reverse_never_grows() {
        let mut engine = SequenceEngine::new(8).unwrap();
        walk(&mut engine, 3);
        engine.toggle_direction();
        assert_eq!(walk(&mut engine, 4), vec![2, 1, 3, 2]);
        assert_eq!(engine.step_count(), 3);
    }

    #[test]
    fn shrinking_length_keeps_steps_and_wraps_next_pulse() {
        let mut engine = SequenceEngine::new(8).unwrap();
        walk(&mut engine, 6);
        engine.set_sync(66).unwrap();
        engine.set_length(4).unwrap();
        assert_eq!(engine.cursor_index(), Some(StepIndex::new(6)));

        assert_eq!(walk(&mut engine, 5), vec![1, 2, 3, 4, 1]);
        assert_eq!(engine.step_count(), 6);

        engine.set_length(8).unwrap();
        assert_eq!(walk(&mut engine, 5), vec![2, 3, 4, 5, 6]);
        assert_eq!(engine.sync(), Ok(66));
        assert_eq!(walk(&mut engine, 3), vec![7, 8, 1]);
        assert_eq!(engine.step_count(), 8);
    }

    #[test]
    fn set_length_rejects_zero_and_keeps_old() {
        let mut engine = SequenceEngine::new(3).unwrap();
        assert_eq!(engine.set_length(0), Err(SequenceError::InvalidLength(0)));
        assert_eq!(engine.length(), 3);
    }

    #[test]
    fn notes_fill_to_capacity() {
        use eventseq_types::STEP_POLYPHONY;

        let mut engine = SequenceEngine::new(1).unwrap();
        engine.advance();
        for n in 0..STEP_POLYPHONY as u8 {
            engine.add_note(40 + n).unwrap();
        }
        let err = engine.add_note(99).unwrap_err();
        assert!(matches!(err, SequenceError::PolyphonyExceeded { .. }));
        assert_eq!(engine.notes().unwrap().len(), STEP_POLYPHONY);
        assert_eq!(engine.step_count(), 1);

        engine.clear_notes().unwrap();
        assert!(engine.notes().unwrap().is_empty());
    }

    #[test]
    fn from_defaults_applies_bank_and_direction() {
        let defaults = SequenceDefaults {
            length: 5,
            direction: Direction::Reverse,
            bank: Bank::B,
        };
        let engine = SequenceEngine::from_defaults(&defaults).unwrap();
        assert_eq!(engine.length(), 5);
        assert_eq!(engine.bank(), Bank::B);
        assert_eq!(engine.direction(), Direction::Reverse);

        let bad = SequenceDefaults { length: 0, ..defaults };
        assert!(SequenceEngine::from_defaults(&bad).is_err());
    }
}
