//! Stats engine module.
//!
//! Provides `StatsBlock`, the per-entity record of health, experience,
//! speed and attack power, together with the operations that mutate it.
//! A block is exclusively owned by one entity and only changes through
//! the methods here.
//!
//! Health policy:
//! - Damage drains temp HP first, then current HP. Both floor at zero.
//! - Healing raises current HP up to `max_hp` and never touches temp HP.
//! - Out-of-range deltas are clamped, never rejected.

use crate::error::VitalError;
use crate::id::ModifierId;
use crate::modifier::{fold_modifiers, Modifier, StatTarget};
use crate::resolved::ResolvedStat;
use crate::state::HpState;
use tracing::{debug, trace};

/// Per-entity vital statistics.
///
/// Invariants: `0 <= current_hp <= max_hp`, `temp_hp >= 0`, and
/// `experience` never decreases.
///
/// # Examples
///
/// ```rust
/// use colony_vitals::{HpState, StatsBlock};
///
/// let mut stats = StatsBlock::new(100.0, 3.0, 8.0);
/// assert_eq!(stats.hp_state(), HpState::FullHealth);
///
/// assert_eq!(stats.apply_health_delta(-30.0), HpState::Alive);
/// assert_eq!(stats.current_hp(), 70.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StatsBlock {
    current_hp: f64,
    max_hp: f64,
    temp_hp: f64,
    experience: f64,
    base_speed: f64,
    attack_power: f64,
    modifiers: Vec<Modifier>,
    clock: u64,
}

impl StatsBlock {
    /// Create a block at full health with no buffs.
    ///
    /// A negative or NaN `max_hp` is floored to zero.
    pub fn new(max_hp: f64, base_speed: f64, attack_power: f64) -> Self {
        let max_hp = max_hp.max(0.0);
        Self {
            current_hp: max_hp,
            max_hp,
            temp_hp: 0.0,
            experience: 0.0,
            base_speed,
            attack_power,
            modifiers: Vec::new(),
            clock: 0,
        }
    }

    /// Start the block at `hp`, clamped into `[0, max_hp]`.
    pub fn with_current_hp(mut self, hp: f64) -> Self {
        self.current_hp = hp.max(0.0).min(self.max_hp);
        self
    }

    /// Start the block with a temp-HP buffer, floored at zero.
    ///
    /// A non-finite buffer is treated as none.
    pub fn with_temp_hp(mut self, hp: f64) -> Self {
        self.temp_hp = if hp.is_finite() { hp.max(0.0) } else { 0.0 };
        self
    }

    /// Apply damage (negative) or healing (positive) and return the new state.
    ///
    /// NaN is treated as no change.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use colony_vitals::{HpState, StatsBlock};
    ///
    /// let mut stats = StatsBlock::new(100.0, 3.0, 8.0)
    ///     .with_current_hp(10.0)
    ///     .with_temp_hp(5.0);
    ///
    /// stats.apply_health_delta(-12.0);
    /// assert_eq!(stats.temp_hp(), 0.0);
    /// assert_eq!(stats.current_hp(), 3.0);
    /// ```
    pub fn apply_health_delta(&mut self, delta: f64) -> HpState {
        let before = self.hp_state();
        let delta = if delta.is_nan() { 0.0 } else { delta };

        if delta < 0.0 {
            let damage = -delta;
            if damage >= self.temp_hp {
                let spill = damage - self.temp_hp;
                self.temp_hp = 0.0;
                self.current_hp = (self.current_hp - spill).max(0.0);
            } else {
                self.temp_hp -= damage;
            }
        } else if delta > 0.0 {
            self.current_hp = (self.current_hp + delta).min(self.max_hp);
        }

        let after = self.hp_state();
        if after != before {
            debug!(
                from = %before,
                to = %after,
                current_hp = self.current_hp,
                temp_hp = self.temp_hp,
                "hp state changed"
            );
        }
        after
    }

    /// Classify the block's current health.
    pub fn hp_state(&self) -> HpState {
        HpState::classify(self.current_hp, self.max_hp)
    }

    /// Add non-negative experience and return the new total.
    ///
    /// # Errors
    ///
    /// `VitalError::InvalidArgument` if `amount` is negative or not finite.
    /// The block is left unchanged.
    pub fn grant_experience(&mut self, amount: f64) -> Result<f64, VitalError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(VitalError::invalid("experience", amount));
        }
        self.experience += amount;
        Ok(self.experience)
    }

    /// Add a temp-HP buffer and return the new buffer size.
    ///
    /// Temp HP stacks and is not bounded by `max_hp`.
    ///
    /// # Errors
    ///
    /// `VitalError::InvalidArgument` if `amount` is negative or not finite.
    pub fn grant_temp_hp(&mut self, amount: f64) -> Result<f64, VitalError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(VitalError::invalid("temp_hp", amount));
        }
        self.temp_hp = (self.temp_hp + amount).min(f64::MAX);
        Ok(self.temp_hp)
    }

    /// Append a modifier.
    ///
    /// A modifier with an id already present replaces the old one and
    /// moves to the end of the sequence.
    pub fn add_modifier(&mut self, modifier: Modifier) {
        self.modifiers.retain(|m| m.id != modifier.id);
        trace!(id = %modifier.id, target = %modifier.target, "modifier added");
        self.modifiers.push(modifier);
    }

    /// Remove a modifier by id. Unknown ids are a no-op.
    pub fn remove_modifier(&mut self, id: &ModifierId) -> Option<Modifier> {
        let idx = self.modifiers.iter().position(|m| &m.id == id)?;
        Some(self.modifiers.remove(idx))
    }

    /// Move the clock forward to `tick` and drop expired modifiers.
    ///
    /// The clock never moves backwards. Returns the number of modifiers
    /// dropped.
    pub fn advance_to(&mut self, tick: u64) -> usize {
        self.clock = self.clock.max(tick);
        let clock = self.clock;
        let before = self.modifiers.len();
        self.modifiers.retain(|m| m.is_active(clock));
        let expired = before - self.modifiers.len();
        if expired > 0 {
            debug!(clock, expired, "modifiers expired");
        }
        expired
    }

    /// Base speed with every active speed modifier applied.
    ///
    /// Additive modifiers are summed first, then percentage modifiers
    /// multiply the total. The result never goes below zero.
    pub fn effective_movement_speed(&self) -> f64 {
        self.resolve(StatTarget::Speed).value
    }

    /// Attack power with every active attack modifier applied.
    pub fn effective_attack_power(&self) -> f64 {
        self.resolve(StatTarget::AttackPower).value
    }

    /// Effective value of `target` with its full breakdown.
    pub fn resolve(&self, target: StatTarget) -> ResolvedStat {
        let base = match target {
            StatTarget::Speed => self.base_speed,
            StatTarget::AttackPower => self.attack_power,
        };
        fold_modifiers(target, base, &self.modifiers, self.clock)
    }

    /// Take over experience and health ratio from a previous profile.
    ///
    /// A previous profile at full health yields full health, a dead one
    /// yields zero HP. The game clock carries over so modifiers added
    /// afterwards expire against the same timeline. Temp HP and modifiers
    /// are not carried.
    pub(crate) fn inherit_progress(&mut self, previous: &StatsBlock) {
        self.experience = previous.experience;
        self.clock = previous.clock;
        self.current_hp = match previous.hp_state() {
            HpState::FullHealth => self.max_hp,
            HpState::Dead => 0.0,
            HpState::Alive => {
                (previous.current_hp * self.max_hp / previous.max_hp).clamp(0.0, self.max_hp)
            }
        };
    }

    pub fn current_hp(&self) -> f64 {
        self.current_hp
    }

    pub fn max_hp(&self) -> f64 {
        self.max_hp
    }

    pub fn temp_hp(&self) -> f64 {
        self.temp_hp
    }

    pub fn experience(&self) -> f64 {
        self.experience
    }

    pub fn base_speed(&self) -> f64 {
        self.base_speed
    }

    pub fn attack_power(&self) -> f64 {
        self.attack_power
    }

    /// Active and not-yet-pruned modifiers, in insertion order.
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// `current_hp / max_hp`, or `0.0` for a zero maximum.
    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp <= 0.0 {
            0.0
        } else {
            self.current_hp / self.max_hp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> StatsBlock {
        StatsBlock::new(100.0, 4.0, 10.0)
    }

    #[test]
    fn test_new_block_is_full() {
        let stats = block();
        assert_eq!(stats.current_hp(), 100.0);
        assert_eq!(stats.temp_hp(), 0.0);
        assert_eq!(stats.experience(), 0.0);
        assert_eq!(stats.hp_state(), HpState::FullHealth);
    }

    #[test]
    fn test_damage_drains_temp_first() {
        let mut stats = block().with_temp_hp(20.0);
        stats.apply_health_delta(-15.0);
        assert_eq!(stats.temp_hp(), 5.0);
        assert_eq!(stats.current_hp(), 100.0);
    }

    #[test]
    fn test_overkill_floors_at_zero() {
        let mut stats = block().with_temp_hp(5.0);
        assert_eq!(stats.apply_health_delta(-1_000.0), HpState::Dead);
        assert_eq!(stats.temp_hp(), 0.0);
        assert_eq!(stats.current_hp(), 0.0);
    }

    #[test]
    fn test_infinite_damage_clamps() {
        let mut stats = block();
        assert_eq!(stats.apply_health_delta(f64::NEG_INFINITY), HpState::Dead);
        assert_eq!(stats.current_hp(), 0.0);
    }

    #[test]
    fn test_infinite_temp_hp_cannot_poison_health() {
        let mut stats = block().with_temp_hp(f64::INFINITY);
        assert_eq!(stats.temp_hp(), 0.0);

        stats.apply_health_delta(f64::NEG_INFINITY);
        assert_eq!(stats.temp_hp(), 0.0);
        assert_eq!(stats.hp_state(), HpState::Dead);

        let mut stats = block().with_temp_hp(f64::MAX);
        stats.grant_temp_hp(f64::MAX).unwrap();
        assert!(stats.temp_hp().is_finite());

        stats.apply_health_delta(f64::NEG_INFINITY);
        assert_eq!(stats.temp_hp(), 0.0);
        assert_eq!(stats.current_hp(), 0.0);
        assert_eq!(stats.apply_health_delta(10.0), HpState::Alive);
        assert_eq!(stats.current_hp(), 10.0);
    }

    #[test]
    fn test_nan_delta_is_no_op() {
        let mut stats = block().with_current_hp(40.0);
        assert_eq!(stats.apply_health_delta(f64::NAN), HpState::Alive);
        assert_eq!(stats.current_hp(), 40.0);
    }

    #[test]
    fn test_healing_never_raises_temp() {
        let mut stats = block().with_current_hp(50.0).with_temp_hp(3.0);
        stats.apply_health_delta(500.0);
        assert_eq!(stats.current_hp(), 100.0);
        assert_eq!(stats.temp_hp(), 3.0);
    }

    #[test]
    fn test_zero_max_is_dead() {
        let stats = StatsBlock::new(0.0, 1.0, 1.0);
        assert_eq!(stats.hp_state(), HpState::Dead);
    }

    #[test]
    fn test_negative_max_floored() {
        let stats = StatsBlock::new(-10.0, 1.0, 1.0);
        assert_eq!(stats.max_hp(), 0.0);
        assert_eq!(stats.current_hp(), 0.0);
    }

    #[test]
    fn test_with_current_hp_clamps() {
        assert_eq!(block().with_current_hp(250.0).current_hp(), 100.0);
        assert_eq!(block().with_current_hp(-3.0).current_hp(), 0.0);
    }

    #[test]
    fn test_grant_experience() {
        let mut stats = block();
        assert_eq!(stats.grant_experience(12.5), Ok(12.5));
        assert_eq!(stats.grant_experience(0.0), Ok(12.5));
        assert_eq!(
            stats.grant_experience(-1.0),
            Err(VitalError::InvalidArgument {
                name: "experience",
                value: -1.0
            })
        );
        assert!(stats.grant_experience(f64::INFINITY).is_err());
        assert_eq!(stats.experience(), 12.5);
    }

    #[test]
    fn test_grant_temp_hp() {
        let mut stats = block();
        assert_eq!(stats.grant_temp_hp(30.0), Ok(30.0));
        assert_eq!(stats.grant_temp_hp(200.0), Ok(230.0));
        assert!(stats.grant_temp_hp(-5.0).is_err());
        assert_eq!(stats.temp_hp(), 230.0);
    }

    #[test]
    fn test_modifier_refresh_replaces() {
        let mut stats = block();
        stats.add_modifier(Modifier::flat("boots", StatTarget::Speed, 1.0));
        stats.add_modifier(Modifier::flat("pack", StatTarget::Speed, -0.5));
        stats.add_modifier(Modifier::flat("boots", StatTarget::Speed, 2.0));

        assert_eq!(stats.modifiers().len(), 2);
        assert_eq!(stats.modifiers()[1].id.as_str(), "boots");
        assert_eq!(stats.effective_movement_speed(), 5.5);
    }

    #[test]
    fn test_remove_unknown_modifier_is_no_op() {
        let mut stats = block();
        stats.add_modifier(Modifier::flat("boots", StatTarget::Speed, 1.0));
        assert!(stats.remove_modifier(&ModifierId::from("ghost")).is_none());
        assert!(stats.remove_modifier(&ModifierId::from("boots")).is_some());
        assert!(stats.remove_modifier(&ModifierId::from("boots")).is_none());
        assert_eq!(stats.effective_movement_speed(), 4.0);
    }

    #[test]
    fn test_advance_prunes_expired() {
        let mut stats = block();
        stats.add_modifier(Modifier::percent("haste", StatTarget::Speed, 1.0).until(10));
        stats.add_modifier(Modifier::flat("boots", StatTarget::Speed, 1.0));
        assert_eq!(stats.effective_movement_speed(), 10.0);

        assert_eq!(stats.advance_to(10), 1);
        assert_eq!(stats.effective_movement_speed(), 5.0);

        // Clock never rewinds.
        assert_eq!(stats.advance_to(3), 0);
        assert_eq!(stats.clock(), 10);
    }

    #[test]
    fn test_attack_power_modifiers() {
        let mut stats = block();
        stats.add_modifier(Modifier::percent("rage", StatTarget::AttackPower, 0.5));
        stats.add_modifier(Modifier::flat("mandibles", StatTarget::AttackPower, 2.0));
        assert_eq!(stats.effective_attack_power(), 18.0);
        assert_eq!(stats.effective_movement_speed(), 4.0);
    }

    #[test]
    fn test_inherit_progress_keeps_ratio() {
        let mut old = block().with_current_hp(70.0);
        old.grant_experience(40.0).unwrap();
        let mut new = StatsBlock::new(80.0, 2.0, 5.0);
        new.inherit_progress(&old);
        assert_eq!(new.current_hp(), 56.0);
        assert_eq!(new.experience(), 40.0);
    }

    #[test]
    fn test_inherit_progress_keeps_clock() {
        let mut old = block();
        old.advance_to(1_000);
        let mut new = StatsBlock::new(80.0, 2.0, 5.0);
        new.inherit_progress(&old);
        assert_eq!(new.clock(), 1_000);

        new.add_modifier(Modifier::flat("stale", StatTarget::Speed, 5.0).until(500));
        assert_eq!(new.effective_movement_speed(), 2.0);
    }

    #[test]
    fn test_hp_fraction() {
        assert_eq!(block().with_current_hp(25.0).hp_fraction(), 0.25);
        assert_eq!(StatsBlock::new(0.0, 1.0, 1.0).hp_fraction(), 0.0);
    }
}
