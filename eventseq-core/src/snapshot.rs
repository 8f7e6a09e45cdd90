//! Serializable view of the engine for display and debug dumps.

use serde::{Deserialize, Serialize};

use eventseq_types::{Bank, Direction, StepIndex, StepParam, StepValues};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSnapshot {
    pub index: StepIndex,
    pub values: StepValues,
    /// Notes per bank, indexed by `Bank::as_index`.
    pub notes: [Vec<u8>; 2],
}

impl StepSnapshot {
    pub fn notes(&self, bank: Bank) -> &[u8] {
        &self.notes[bank.as_index()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub length: u16,
    pub bank: Bank,
    pub direction: Direction,
    /// None until the first advance.
    pub cursor: Option<StepIndex>,
    /// Created steps in creation order.
    pub steps: Vec<StepSnapshot>,
}

impl EngineSnapshot {
    pub fn current(&self) -> Option<&StepSnapshot> {
        let cursor = self.cursor?;
        self.steps.iter().find(|s| s.index == cursor)
    }

    /// Value of `param` on every created step, in the active bank.
    pub fn lane(&self, param: StepParam) -> Vec<u16> {
        self.steps
            .iter()
            .map(|s| s.values.get(self.bank, param))
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
