//! Bank selector and traversal direction.

use serde::{Deserialize, Serialize};

/// One of the two parallel value planes every step carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Bank {
    /// Bank 0
    #[default]
    A,
    /// Bank 1
    B,
}

impl Bank {
    pub fn toggled(self) -> Bank {
        match self {
            Bank::A => Bank::B,
            Bank::B => Bank::A,
        }
    }

    /// Position of this bank in per-step storage (0 or 1).
    pub fn as_index(self) -> usize {
        match self {
            Bank::A => 0,
            Bank::B => 1,
        }
    }

    pub fn from_index(index: u8) -> Option<Bank> {
        match index {
            0 => Some(Bank::A),
            1 => Some(Bank::B),
            _ => None,
        }
    }
}

/// Which way the cursor walks on each advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    pub fn toggled(self) -> Direction {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    /// Human-readable name for display.
    pub fn name(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        }
    }

    /// Parse a config-style name ("forward", "fwd", "reverse", "rev").
    pub fn parse(s: &str) -> Option<Direction> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" | "fwd" => Some(Direction::Forward),
            "reverse" | "rev" | "backward" => Some(Direction::Reverse),
            _ => None,
        }
    }
}
