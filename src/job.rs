//! Job registry module.
//!
//! The registry is the single source of truth for job baselines. It is
//! built once from a `JobTable` and exposes no writer afterwards, so it
//! can be shared freely across systems. Balancing changes made to the
//! table reach every new assignment; live `JobComponent`s keep the
//! baseline they were created with until reassigned.

use crate::config::{JobSpec, JobTable};
use crate::error::VitalError;
use crate::id::JobId;
use crate::stats::StatsBlock;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

static GLOBAL_REGISTRY: Lazy<JobRegistry> = Lazy::new(JobRegistry::builtin);

/// Category a job belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobCategory {
    /// Regular worker roles.
    General,
    /// Roles queried separately from general jobs (queens, bosses).
    Special,
}

impl fmt::Display for JobCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobCategory::General => f.write_str("general"),
            JobCategory::Special => f.write_str("special"),
        }
    }
}

/// A registered job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobDescriptor {
    pub id: JobId,
    pub category: JobCategory,
}

/// Read-only catalog of jobs and their baseline stats.
///
/// # Examples
///
/// ```rust
/// use colony_vitals::JobRegistry;
///
/// let registry = JobRegistry::builtin();
/// let builder = registry.job_stats("Builder").unwrap();
/// let scout = registry.job_stats("Scout").unwrap();
/// assert!(builder.base_speed() < scout.base_speed());
///
/// assert_eq!(
///     registry.all_jobs().len(),
///     registry.job_list().len() + registry.special_jobs().len()
/// );
/// ```
#[derive(Debug, Clone)]
pub struct JobRegistry {
    /// General jobs in insertion order.
    general: Vec<JobDescriptor>,

    /// Special jobs in insertion order.
    special: Vec<JobDescriptor>,

    /// Baseline per job id.
    baselines: HashMap<JobId, (JobCategory, StatsBlock)>,
}

impl JobRegistry {
    fn empty() -> Self {
        Self {
            general: Vec::new(),
            special: Vec::new(),
            baselines: HashMap::new(),
        }
    }

    /// The process-wide registry holding the built-in roster.
    ///
    /// Initialised on first use and never mutated afterwards.
    pub fn global() -> &'static JobRegistry {
        &GLOBAL_REGISTRY
    }

    /// Registry for the built-in roster from `JobTable::builtin`.
    pub fn builtin() -> Self {
        let table = JobTable::builtin();
        let mut registry = Self::empty();
        for spec in &table.general {
            let inserted = registry.insert(JobCategory::General, spec);
            debug_assert!(inserted, "builtin roster repeats {}", spec.id);
        }
        for spec in &table.special {
            let inserted = registry.insert(JobCategory::Special, spec);
            debug_assert!(inserted, "builtin roster repeats {}", spec.id);
        }
        registry
    }

    /// Build a registry from a balancing table.
    ///
    /// # Errors
    ///
    /// * `VitalError::InvalidArgument` - a baseline number is negative or not finite
    /// * `VitalError::DuplicateJob` - an id appears twice, in either category
    pub fn from_table(table: JobTable) -> Result<Self, VitalError> {
        let mut registry = Self::empty();
        let entries = table
            .general
            .iter()
            .map(|spec| (JobCategory::General, spec))
            .chain(table.special.iter().map(|spec| (JobCategory::Special, spec)));

        for (category, spec) in entries {
            spec.validate()?;
            if !registry.insert(category, spec) {
                return Err(VitalError::DuplicateJob(spec.id.clone()));
            }
        }

        debug!(
            general = registry.general.len(),
            special = registry.special.len(),
            "job registry built"
        );
        Ok(registry)
    }

    /// Parse a JSON balancing table and build a registry from it.
    pub fn from_json(json: &str) -> Result<Self, VitalError> {
        Self::from_table(JobTable::from_json(json)?)
    }

    fn insert(&mut self, category: JobCategory, spec: &JobSpec) -> bool {
        if self.baselines.contains_key(&spec.id) {
            return false;
        }
        let descriptor = JobDescriptor {
            id: spec.id.clone(),
            category,
        };
        match category {
            JobCategory::General => self.general.push(descriptor),
            JobCategory::Special => self.special.push(descriptor),
        }
        self.baselines
            .insert(spec.id.clone(), (category, spec.baseline()));
        true
    }

    /// General jobs, in registration order.
    pub fn job_list(&self) -> &[JobDescriptor] {
        &self.general
    }

    /// Special jobs, in registration order.
    pub fn special_jobs(&self) -> &[JobDescriptor] {
        &self.special
    }

    /// General jobs followed by special jobs.
    pub fn all_jobs(&self) -> Vec<JobDescriptor> {
        self.general.iter().chain(&self.special).cloned().collect()
    }

    /// Whether `job_id` is registered, in either category.
    pub fn contains(&self, job_id: &str) -> bool {
        self.baselines.contains_key(job_id)
    }

    /// Descriptor for `job_id`, if registered.
    pub fn descriptor(&self, job_id: &str) -> Option<JobDescriptor> {
        self.baselines
            .get_key_value(job_id)
            .map(|(id, (category, _))| JobDescriptor {
                id: id.clone(),
                category: *category,
            })
    }

    /// A fresh copy of the baseline stats for `job_id`.
    ///
    /// # Errors
    ///
    /// `VitalError::UnknownJob` if `job_id` is not registered.
    pub fn job_stats(&self, job_id: &str) -> Result<StatsBlock, VitalError> {
        self.baselines
            .get(job_id)
            .map(|(_, baseline)| baseline.clone())
            .ok_or_else(|| VitalError::UnknownJob(JobId::new(job_id)))
    }

    pub fn len(&self) -> usize {
        self.baselines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.baselines.is_empty()
    }
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
