//! The growth/wrap rule: where the cursor goes on the next clock pulse.

use eventseq_types::{Direction, StepIndex};

/// Outcome of one advance from an existing cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Move to an already created step.
    Step(StepIndex),
    /// Create the step with this index as the new tail and move onto it.
    Grow(StepIndex),
    /// Pattern boundary reached; jump to this existing step.
    Wrap(StepIndex),
}

/// Decide the next cursor position.
///
/// `materialized` is the number of steps created so far and `length` the
/// configured pattern length; both are at least 1 once the engine has started.
/// Reverse traversal never grows the pattern: it walks down to 1 and wraps to
/// the last live step, `min(length, materialized)`. A cursor left beyond
/// `length` by a shrink wraps to 1 (forward) or clamps to the last live step
/// (reverse) on this pulse.
pub fn next_move(cursor: StepIndex, materialized: u16, length: u16, direction: Direction) -> Move {
    let c = cursor.get();
    match direction {
        Direction::Forward => {
            if c >= length {
                Move::Wrap(StepIndex::FIRST)
            } else if c < materialized {
                Move::Step(StepIndex::new(c + 1))
            } else {
                Move::Grow(StepIndex::new(c + 1))
            }
        }
        Direction::Reverse => {
            let last_live = StepIndex::new(length.min(materialized).max(1));
            if c > last_live.get() {
                Move::Step(last_live)
            } else {
                match cursor.pred() {
                    Some(prev) => Move::Step(prev),
                    None => Move::Wrap(last_live),
                }
            }
        }
    }
}
