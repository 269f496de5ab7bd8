//! Stat modifiers module.
//!
//! Modifiers are buffs and debuffs layered over a stats block's base
//! values. Each targets one stat, is either additive or percentage, and
//! may expire at a game-clock tick.
//!
//! Resolution is phase-based and independent of insertion order across
//! kinds:
//!
//! ```text
//! base → [Additive: sum] → [Percentage: product of (1 + p)] → [Final: floor at 0]
//! ```
//!
//! Within a phase, values are folded in a canonical order so the result
//! is bit-identical for any permutation of same-kind modifiers.

use crate::id::ModifierId;
use crate::resolved::ResolvedStat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The derived stat a modifier adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatTarget {
    /// Movement speed.
    Speed,
    /// Attack power.
    AttackPower,
}

impl fmt::Display for StatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatTarget::Speed => f.write_str("speed"),
            StatTarget::AttackPower => f.write_str("attack_power"),
        }
    }
}

/// Phase in which a modifier is applied.
///
/// Phases are applied in ascending order.
///
/// # Examples
///
/// ```rust
/// use colony_vitals::modifier::ModifierPhase;
///
/// assert!(ModifierPhase::Additive < ModifierPhase::Percentage);
/// assert!(ModifierPhase::Percentage < ModifierPhase::Final);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModifierPhase {
    /// Flat bonuses, summed onto the base.
    Additive,
    /// Percentage bonuses, multiplied onto the running total.
    Percentage,
    /// Final floor at zero.
    Final,
}

/// How a modifier changes its target stat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ModifierKind {
    /// Flat amount added to the base (negative for a penalty).
    Additive(f64),
    /// Fraction of the running total, e.g. `0.20` for +20%, `-0.5` for -50%.
    Percentage(f64),
}

impl ModifierKind {
    pub fn phase(self) -> ModifierPhase {
        match self {
            ModifierKind::Additive(_) => ModifierPhase::Additive,
            ModifierKind::Percentage(_) => ModifierPhase::Percentage,
        }
    }

    pub fn magnitude(self) -> f64 {
        match self {
            ModifierKind::Additive(v) | ModifierKind::Percentage(v) => v,
        }
    }
}

/// A buff or debuff on one stat.
///
/// # Examples
///
/// ```rust
/// use colony_vitals::modifier::{Modifier, StatTarget};
///
/// let haste = Modifier::percent("haste", StatTarget::Speed, 0.25).until(120);
/// assert!(haste.is_active(119));
/// assert!(!haste.is_active(120));
///
/// let boots = Modifier::flat("boots", StatTarget::Speed, 1.5);
/// assert!(boots.is_active(u64::MAX));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub id: ModifierId,
    pub target: StatTarget,
    pub kind: ModifierKind,
    /// Tick at which the modifier stops applying. `None` means permanent.
    pub expires_at: Option<u64>,
}

impl Modifier {
    /// Create a permanent additive modifier.
    pub fn flat(id: impl Into<ModifierId>, target: StatTarget, amount: f64) -> Self {
        Self {
            id: id.into(),
            target,
            kind: ModifierKind::Additive(amount),
            expires_at: None,
        }
    }

    /// Create a permanent percentage modifier.
    ///
    /// `fraction` is relative: `0.10` multiplies the running total by `1.10`.
    pub fn percent(id: impl Into<ModifierId>, target: StatTarget, fraction: f64) -> Self {
        Self {
            id: id.into(),
            target,
            kind: ModifierKind::Percentage(fraction),
            expires_at: None,
        }
    }

    /// Make the modifier expire at `tick`.
    pub fn until(mut self, tick: u64) -> Self {
        self.expires_at = Some(tick);
        self
    }

    /// Whether the modifier still applies at `clock`.
    pub fn is_active(&self, clock: u64) -> bool {
        self.expires_at.map_or(true, |t| clock < t)
    }

    pub fn phase(&self) -> ModifierPhase {
        self.kind.phase()
    }

    /// Human-readable description used in breakdowns.
    pub fn description(&self) -> String {
        match self.kind {
            ModifierKind::Additive(v) => format!("{} {:+.2}", self.id, v),
            ModifierKind::Percentage(p) => format!("{} ×{:.2}", self.id, 1.0 + p),
        }
    }
}

/// Fold the active modifiers targeting `target` onto `base`.
///
/// Non-finite magnitudes are skipped. The returned breakdown lists each
/// applied modifier with the running value after it.
pub fn fold_modifiers<'a, I>(
    target: StatTarget,
    base: f64,
    modifiers: I,
    clock: u64,
) -> ResolvedStat
where
    I: IntoIterator<Item = &'a Modifier>,
{
    let mut additive: Vec<&Modifier> = Vec::new();
    let mut percentage: Vec<&Modifier> = Vec::new();
    for modifier in modifiers {
        if modifier.target != target
            || !modifier.is_active(clock)
            || !modifier.kind.magnitude().is_finite()
        {
            continue;
        }
        match modifier.phase() {
            ModifierPhase::Additive => additive.push(modifier),
            ModifierPhase::Percentage => percentage.push(modifier),
            ModifierPhase::Final => {}
        }
    }

    // Canonical order within a phase: by magnitude, then id.
    let canonical = |a: &&Modifier, b: &&Modifier| {
        a.kind
            .magnitude()
            .total_cmp(&b.kind.magnitude())
            .then_with(|| a.id.cmp(&b.id))
    };
    additive.sort_by(canonical);
    percentage.sort_by(canonical);

    let mut resolved = ResolvedStat::new(target, base);
    let mut current = base;

    for modifier in additive {
        current += modifier.kind.magnitude();
        resolved.add_modifier(modifier.description(), current);
    }
    for modifier in percentage {
        current *= 1.0 + modifier.kind.magnitude();
        resolved.add_modifier(modifier.description(), current);
    }

    if current < 0.0 || current.is_nan() {
        current = 0.0;
        resolved.add_modifier("clamp_min(0.00)", current);
    }

    resolved.value = current;
    resolved
}
