//! HP state classification.
//!
//! `HpState` is never stored. It is recomputed from a stats block's
//! current and maximum HP every time it is asked for.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Health classification of an entity.
///
/// Exactly one variant holds for any `(current_hp, max_hp)` pair.
///
/// # Examples
///
/// ```rust
/// use colony_vitals::HpState;
///
/// assert_eq!(HpState::classify(0.0, 100.0), HpState::Dead);
/// assert_eq!(HpState::classify(100.0, 100.0), HpState::FullHealth);
/// assert_eq!(HpState::classify(40.0, 100.0), HpState::Alive);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HpState {
    /// Above zero HP but below the maximum.
    Alive,
    /// Zero HP or less.
    Dead,
    /// At the maximum, which itself is above zero.
    FullHealth,
}

impl HpState {
    /// Classify a pair of HP values.
    ///
    /// The dead check wins over full health, so a degenerate block with
    /// `max_hp == 0` and `current_hp == 0` is `Dead`.
    pub fn classify(current_hp: f64, max_hp: f64) -> Self {
        if current_hp <= 0.0 {
            HpState::Dead
        } else if current_hp == max_hp && max_hp > 0.0 {
            HpState::FullHealth
        } else {
            HpState::Alive
        }
    }

    /// Human-readable label drawn by the debug overlay.
    pub fn label(self) -> &'static str {
        match self {
            HpState::Alive => "Alive",
            HpState::Dead => "Dead",
            HpState::FullHealth => "FullHealth",
        }
    }
}

impl fmt::Display for HpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
