//! Entity composition module.
//!
//! An `Entity` owns its identity, faction and position, and holds at most
//! one active stats block: either a bare block or the block inside its
//! `JobComponent`. Behaviour and rendering code read it through the
//! accessors here.

use crate::component::JobComponent;
use crate::error::VitalError;
use crate::job::JobRegistry;
use crate::id::JobId;
use crate::stats::StatsBlock;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Label reported by `Entity::current_state` when no stats are bound.
pub const UNBOUND_STATE: &str = "Unbound";

/// Opaque entity handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// World position in tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A colony agent.
///
/// # Examples
///
/// ```rust
/// use colony_vitals::{Entity, EntityId, JobRegistry, Position};
///
/// let registry = JobRegistry::builtin();
/// let mut ant = Entity::new(EntityId(1), "red", Position::new(4.0, 2.0));
/// assert_eq!(ant.current_state(), "Unbound");
/// assert_eq!(ant.effective_movement_speed(), None);
///
/// ant.assign_job(&registry, "Scout").unwrap();
/// assert_eq!(ant.current_state(), "FullHealth");
/// assert_eq!(ant.effective_movement_speed(), Some(6.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: EntityId,
    faction: String,
    position: Position,
    stats: Option<StatsBlock>,
    job: Option<JobComponent>,
}

impl Entity {
    /// Create an entity with no stats and no job.
    pub fn new(id: EntityId, faction: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            faction: faction.into(),
            position,
            stats: None,
            job: None,
        }
    }

    /// Create an entity with a bare stats block and no job.
    ///
    /// The block is handed over to the first job assigned.
    pub fn with_stats(
        id: EntityId,
        faction: impl Into<String>,
        position: Position,
        stats: StatsBlock,
    ) -> Self {
        Self {
            stats: Some(stats),
            ..Self::new(id, faction, position)
        }
    }

    /// Assign or replace the entity's job.
    ///
    /// The previous profile (the current job's block, or a bare block)
    /// hands over experience and HP ratio as in `JobComponent::reassign`.
    /// On error nothing changes.
    pub fn assign_job(&mut self, registry: &JobRegistry, job_id: &str) -> Result<(), VitalError> {
        let next = match self.stats() {
            Some(previous) => JobComponent::from_previous(registry, job_id, previous)?,
            None => JobComponent::new(registry, job_id)?,
        };
        debug!(entity = %self.id, job = %next.name, "job assigned");
        self.stats = None;
        self.job = Some(next);
        Ok(())
    }

    /// The active stats block, if any.
    pub fn stats(&self) -> Option<&StatsBlock> {
        match &self.job {
            Some(job) => Some(&job.stats),
            None => self.stats.as_ref(),
        }
    }

    pub fn stats_mut(&mut self) -> Option<&mut StatsBlock> {
        match &mut self.job {
            Some(job) => Some(&mut job.stats),
            None => self.stats.as_mut(),
        }
    }

    pub fn job(&self) -> Option<&JobComponent> {
        self.job.as_ref()
    }

    pub fn job_name(&self) -> Option<&JobId> {
        self.job.as_ref().map(|job| &job.name)
    }

    /// HP state label, or `"Unbound"` without stats.
    pub fn current_state(&self) -> &'static str {
        self.stats()
            .map_or(UNBOUND_STATE, |stats| stats.hp_state().label())
    }

    /// Effective movement speed, or `None` without stats.
    pub fn effective_movement_speed(&self) -> Option<f64> {
        self.stats().map(StatsBlock::effective_movement_speed)
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn faction(&self) -> &str {
        &self.faction
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}
