//! Digital line states.
//!
//! A supervised output channel is a two-state digital line: ASSERTED drives
//! the indicator on, DEASSERTED drives it off. Lines power up deasserted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a digital output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineState {
    /// Line driven inactive.
    #[default]
    Deasserted,
    /// Line driven active.
    Asserted,
}

impl LineState {
    /// Returns true if the line is driven active.
    #[must_use]
    pub fn is_asserted(&self) -> bool {
        matches!(self, Self::Asserted)
    }

    /// The logical negation of this state.
    #[must_use]
    pub fn toggled(&self) -> Self {
        match self {
            Self::Asserted => Self::Deasserted,
            Self::Deasserted => Self::Asserted,
        }
    }
}

impl From<bool> for LineState {
    fn from(level: bool) -> Self {
        if level {
            Self::Asserted
        } else {
            Self::Deasserted
        }
    }
}

impl From<LineState> for bool {
    fn from(state: LineState) -> bool {
        state.is_asserted()
    }
}

impl fmt::Display for LineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asserted => write!(f, "ASSERTED"),
            Self::Deasserted => write!(f, "DEASSERTED"),
        }
    }
}
