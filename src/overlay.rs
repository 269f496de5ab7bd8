//! Debug overlay boundary.
//!
//! The overlay draws per-entity vitals every frame and must never take
//! the render loop down. Each step runs through [`guarded`], which turns
//! errors and panics into a logged skip.

use crate::entity::{Entity, EntityId, Position};
use crate::error::VitalError;
use crate::job::{JobCategory, JobRegistry};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::warn;

/// Snapshot of everything the overlay draws for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugReadout {
    pub entity: EntityId,
    pub faction: String,
    /// Job id and category, when a job is bound.
    pub job: Option<(String, JobCategory)>,
    pub position: Position,
    pub state: &'static str,
    pub speed: Option<f64>,
    /// `(current, max, temp)` HP, when stats are bound.
    pub hp: Option<(f64, f64, f64)>,
}

impl DebugReadout {
    /// Read an entity's vitals.
    ///
    /// # Errors
    ///
    /// `VitalError::UnknownJob` if the entity's job is not in `registry`.
    pub fn capture(registry: &JobRegistry, entity: &Entity) -> Result<Self, VitalError> {
        let job = match entity.job_name() {
            Some(name) => {
                let descriptor = registry
                    .descriptor(name.as_str())
                    .ok_or_else(|| VitalError::UnknownJob(name.clone()))?;
                Some((descriptor.id.to_string(), descriptor.category))
            }
            None => None,
        };
        Ok(Self {
            entity: entity.id(),
            faction: entity.faction().to_string(),
            job,
            position: entity.position(),
            state: entity.current_state(),
            speed: entity.effective_movement_speed(),
            hp: entity
                .stats()
                .map(|s| (s.current_hp(), s.max_hp(), s.temp_hp())),
        })
    }

    /// Single text line for the overlay.
    ///
    /// ```text
    /// #1 red Scout [FullHealth] hp 50/50 (+0) spd 6.00 @ (4.0, 2.0)
    /// ```
    pub fn line(&self) -> String {
        let mut out = format!("{} {}", self.entity, self.faction);
        if let Some((job, _)) = &self.job {
            out.push(' ');
            out.push_str(job);
        }
        out.push_str(&format!(" [{}]", self.state));
        if let Some((current, max, temp)) = self.hp {
            out.push_str(&format!(" hp {current:.0}/{max:.0} (+{temp:.0})"));
        }
        if let Some(speed) = self.speed {
            out.push_str(&format!(" spd {speed:.2}"));
        }
        out.push_str(&format!(
            " @ ({:.1}, {:.1})",
            self.position.x, self.position.y
        ));
        out
    }
}

/// Run one overlay step, logging and swallowing any failure.
///
/// Returns `None` when `step` errors or panics.
///
/// # Examples
///
/// ```rust
/// use colony_vitals::overlay::guarded;
/// use colony_vitals::VitalError;
///
/// assert_eq!(guarded("ok", || Ok::<_, VitalError>(3)), Some(3));
/// assert_eq!(
///     guarded("bad", || Err::<u8, _>(VitalError::InvalidJobTable("x".into()))),
///     None
/// );
/// ```
pub fn guarded<T, F>(label: &str, step: F) -> Option<T>
where
    F: FnOnce() -> Result<T, VitalError>,
{
    match panic::catch_unwind(AssertUnwindSafe(step)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(err)) => {
            warn!(step = label, error = %err, "overlay step failed, skipping");
            None
        }
        Err(payload) => {
            warn!(
                step = label,
                panic = panic_message(&*payload),
                "overlay step panicked, skipping"
            );
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}

/// Capture a readout per entity, skipping any that fail.
pub fn collect_readouts<'a, I>(registry: &JobRegistry, entities: I) -> Vec<DebugReadout>
where
    I: IntoIterator<Item = &'a Entity>,
{
    entities
        .into_iter()
        .filter_map(|entity| guarded("readout", || DebugReadout::capture(registry, entity)))
        .collect()
}
