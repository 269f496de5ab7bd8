//! Resolved stat results module.
//!
//! Contains the `ResolvedStat` type, an effective stat value together
//! with the breakdown the debug overlay shows when inspecting an entity.

use crate::modifier::StatTarget;
use serde::{Deserialize, Serialize};

/// An effective stat value with full breakdown information.
///
/// # Examples
///
/// ```rust
/// use colony_vitals::ResolvedStat;
/// use colony_vitals::modifier::StatTarget;
///
/// let mut resolved = ResolvedStat::new(StatTarget::Speed, 4.0);
/// resolved.add_modifier("boots +2.00", 6.0);
/// resolved.add_modifier("haste ×1.50", 9.0);
/// resolved.value = 9.0;
///
/// assert_eq!(resolved.base, 4.0);
/// assert_eq!(resolved.modifiers.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedStat {
    /// The stat this value was resolved for.
    pub target: StatTarget,

    /// Base value before any modifier.
    pub base: f64,

    /// The final effective value.
    pub value: f64,

    /// Each applied step as `(description, value_after_step)`, in
    /// application order.
    pub modifiers: Vec<(String, f64)>,
}

impl ResolvedStat {
    /// Create a breakdown whose value is still the base.
    pub fn new(target: StatTarget, base: f64) -> Self {
        Self {
            target,
            base,
            value: base,
            modifiers: Vec::new(),
        }
    }

    /// Record an applied step.
    pub fn add_modifier(&mut self, description: impl Into<String>, value: f64) {
        self.modifiers.push((description.into(), value));
    }

    /// One-line summary, e.g. `speed 4.00 -> 9.00 (2 modifiers)`.
    pub fn summary(&self) -> String {
        format!(
            "{} {:.2} -> {:.2} ({} modifiers)",
            self.target,
            self.base,
            self.value,
            self.modifiers.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_stat_creation() {
        let stat = ResolvedStat::new(StatTarget::AttackPower, 12.0);
        assert_eq!(stat.value, 12.0);
        assert!(stat.modifiers.is_empty());
    }

    #[test]
    fn test_resolved_stat_breakdown_order() {
        let mut stat = ResolvedStat::new(StatTarget::Speed, 2.0);
        stat.add_modifier("a +1.00", 3.0);
        stat.add_modifier("b ×2.00", 6.0);

        assert_eq!(stat.modifiers[0].0, "a +1.00");
        assert_eq!(stat.modifiers[1].1, 6.0);
    }

    #[test]
    fn test_summary() {
        let mut stat = ResolvedStat::new(StatTarget::Speed, 4.0);
        stat.add_modifier("boots +2.00", 6.0);
        stat.value = 6.0;
        assert_eq!(stat.summary(), "speed 4.00 -> 6.00 (1 modifiers)");
    }
}
