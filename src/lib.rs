//! # colony-vitals - Entity Vital-Stat & Role-Assignment Engine
//!
//! Per-agent vital statistics and job ("role") assignment for a colony
//! simulation:
//! - **Health state machine** with a temp-HP buffer and clamped deltas
//! - **Derived stats** (movement speed, attack power) from phased modifiers
//! - **Job registry** holding the baseline stat profile of every role
//! - **Debug overlay boundary** that never lets a fault escape a frame
//!
//! ## Core Concepts
//!
//! ### Health
//!
//! ```text
//! damage  → [temp_hp] → [current_hp] → floor 0
//! healing → [current_hp] → cap max_hp
//! ```
//!
//! `HpState` (`Alive`, `Dead`, `FullHealth`) is always derived from the
//! numbers after the mutation, never stored.
//!
//! ### Modifiers
//!
//! ```text
//! base → [Additive: sum] → [Percentage: ×(1 + p)] → [Final: floor 0]
//! ```
//!
//! Results do not depend on the insertion order of modifiers.
//!
//! ### Jobs
//!
//! A `JobRegistry` is built once from a `JobTable` and is read-only from
//! then on. A `JobComponent` copies a job's baseline into an entity;
//! reassignment keeps experience and the HP ratio.
//!
//! ## Example
//!
//! ```rust
//! use colony_vitals::*;
//! use colony_vitals::modifier::{Modifier, StatTarget};
//!
//! let registry = JobRegistry::builtin();
//! let mut ant = Entity::new(EntityId(1), "red", Position::new(0.0, 0.0));
//! ant.assign_job(&registry, "Builder").unwrap();
//!
//! let stats = ant.stats_mut().unwrap();
//! stats.add_modifier(Modifier::flat("road", StatTarget::Speed, 0.5));
//! stats.add_modifier(Modifier::percent("haste", StatTarget::Speed, 1.0).until(60));
//! assert_eq!(stats.effective_movement_speed(), 6.0); // (2.5 + 0.5) × 2
//!
//! assert_eq!(stats.apply_health_delta(-30.0), HpState::Alive);
//! assert_eq!(ant.current_state(), "Alive");
//! ```
//!
//! ## Modules
//!
//! - [`stats`] - The stats engine (`StatsBlock`)
//! - [`state`] - HP state classification
//! - [`modifier`] - Modifiers and the phased fold
//! - [`resolved`] - Effective-value breakdowns
//! - [`job`] - Job registry
//! - [`component`] - Per-entity job binding
//! - [`config`] - Job balancing table
//! - [`entity`] - Entity composition
//! - [`overlay`] - Guarded debug overlay readouts
//! - [`id`] - Job and modifier identifier types
//! - [`error`] - Error types

pub mod component;
pub mod config;
pub mod entity;
pub mod error;
pub mod id;
pub mod job;
pub mod modifier;
pub mod overlay;
pub mod resolved;
pub mod state;
pub mod stats;

// Re-export main types for convenience
pub use component::JobComponent;
pub use config::{JobSpec, JobTable};
pub use entity::{Entity, EntityId, Position};
pub use error::VitalError;
pub use job::{JobCategory, JobDescriptor, JobRegistry};
pub use id::{JobId, ModifierId};
pub use resolved::ResolvedStat;
pub use state::HpState;
pub use stats::StatsBlock;

pub use modifier::{Modifier, ModifierKind, StatTarget};
pub use overlay::{collect_readouts, guarded, DebugReadout};
