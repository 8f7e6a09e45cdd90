//! Step records and the arena that owns them.
//!
//! Steps are only ever appended. A step's `StepId` is its position in the
//! arena, and since indices are contiguous from 1, index `i` lives at id `i - 1`.

use eventseq_types::{Bank, NoteSlots, StepId, StepIndex, StepValues};

/// One position in the pattern.
#[derive(Debug, Clone)]
pub struct Step {
    index: StepIndex,
    values: StepValues,
    notes: [NoteSlots; 2],
    next: Option<StepId>,
    prev: Option<StepId>,
}

impl Step {
    fn new(index: StepIndex, prev: Option<StepId>) -> Self {
        Self {
            index,
            values: StepValues::new(),
            notes: [NoteSlots::new(); 2],
            next: None,
            prev,
        }
    }

    pub fn index(&self) -> StepIndex {
        self.index
    }

    pub fn values(&self) -> &StepValues {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut StepValues {
        &mut self.values
    }

    pub fn notes(&self, bank: Bank) -> &NoteSlots {
        &self.notes[bank.as_index()]
    }

    pub(crate) fn notes_mut(&mut self, bank: Bank) -> &mut NoteSlots {
        &mut self.notes[bank.as_index()]
    }

    pub fn next(&self) -> Option<StepId> {
        self.next
    }

    pub fn prev(&self) -> Option<StepId> {
        self.prev
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct StepArena {
    steps: Vec<Step>,
}

impl StepArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Number of materialized steps, saturating at u16::MAX.
    pub fn materialized(&self) -> u16 {
        u16::try_from(self.steps.len()).unwrap_or(u16::MAX)
    }

    pub fn head(&self) -> Option<StepId> {
        if self.steps.is_empty() {
            None
        } else {
            Some(StepId::new(0))
        }
    }

    pub fn tail(&self) -> Option<StepId> {
        self.steps.len().checked_sub(1).map(|i| StepId::new(i as u32))
    }

    pub fn get(&self, id: StepId) -> &Step {
        &self.steps[id.get() as usize]
    }

    pub fn get_mut(&mut self, id: StepId) -> &mut Step {
        &mut self.steps[id.get() as usize]
    }

    /// Handle of the step with the given ordinal, if it has been created.
    pub fn id_of(&self, index: StepIndex) -> Option<StepId> {
        let slot = index.get() as usize - 1;
        (slot < self.steps.len()).then(|| StepId::new(slot as u32))
    }

    /// Append a new tail step and link it to the previous tail.
    pub fn push_tail(&mut self, index: StepIndex) -> StepId {
        debug_assert_eq!(
            index.get() as usize,
            self.steps.len() + 1,
            "step indices must stay contiguous"
        );
        let prev = self.tail();
        let id = StepId::new(self.steps.len() as u32);
        self.steps.push(Step::new(index, prev));
        if let Some(prev) = prev {
            self.get_mut(prev).next = Some(id);
        }
        id
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }
}
