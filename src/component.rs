//! Job component module.
//!
//! A `JobComponent` binds a job id to a stats block created from that
//! job's registry baseline. Reassignment replaces the whole profile.

use crate::error::VitalError;
use crate::job::JobRegistry;
use crate::id::JobId;
use crate::stats::StatsBlock;
use tracing::debug;

/// A job assignment and the stats profile that came with it.
///
/// # Examples
///
/// ```rust
/// use colony_vitals::{JobComponent, JobRegistry};
///
/// let registry = JobRegistry::builtin();
/// let builder = JobComponent::new(&registry, "Builder").unwrap();
///
/// assert_eq!(builder.name.as_str(), "Builder");
/// assert_eq!(builder.stats, registry.job_stats("Builder").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JobComponent {
    /// The bound job id.
    pub name: JobId,
    /// This entity's copy of the job's baseline.
    pub stats: StatsBlock,
}

impl JobComponent {
    /// Bind `job_id` with a fresh copy of its baseline.
    ///
    /// # Errors
    ///
    /// `VitalError::UnknownJob` if `job_id` is not registered.
    pub fn new(registry: &JobRegistry, job_id: &str) -> Result<Self, VitalError> {
        let stats = registry.job_stats(job_id)?;
        Ok(Self {
            name: JobId::new(job_id),
            stats,
        })
    }

    /// Bind `job_id` from the process-wide registry.
    pub fn from_global(job_id: &str) -> Result<Self, VitalError> {
        Self::new(JobRegistry::global(), job_id)
    }

    /// Switch to another job.
    ///
    /// The new job's baseline replaces the current profile. Experience,
    /// the game clock and the `current_hp / max_hp` ratio carry over;
    /// temp HP and modifiers are discarded. On error the component is
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use colony_vitals::{JobComponent, JobRegistry};
    ///
    /// let registry = JobRegistry::builtin();
    /// let mut job = JobComponent::new(&registry, "Warrior").unwrap();
    /// job.stats.apply_health_delta(-60.0); // 60 / 120
    /// job.stats.grant_experience(15.0).unwrap();
    ///
    /// job.reassign(&registry, "Scout").unwrap();
    /// assert_eq!(job.stats.current_hp(), 25.0); // half of 50
    /// assert_eq!(job.stats.experience(), 15.0);
    /// ```
    pub fn reassign(&mut self, registry: &JobRegistry, job_id: &str) -> Result<(), VitalError> {
        let next = Self::from_previous(registry, job_id, &self.stats)?;
        debug!(from = %self.name, to = %next.name, "job reassigned");
        *self = next;
        Ok(())
    }

    /// Bind `job_id`, carrying progress over from a previous profile.
    pub(crate) fn from_previous(
        registry: &JobRegistry,
        job_id: &str,
        previous: &StatsBlock,
    ) -> Result<Self, VitalError> {
        let mut component = Self::new(registry, job_id)?;
        component.stats.inherit_progress(previous);
        Ok(component)
    }
}
