//! Job balancing table.
//!
//! The table is the tuning data a `JobRegistry` is built from: one
//! baseline per job, grouped by category. It is plain serde data so
//! balancing can live in a JSON file next to the game's other assets.
//!
//! ```json
//! {
//!   "general": [
//!     { "id": "Builder", "max_hp": 80, "base_speed": 2.5, "attack_power": 4 }
//!   ],
//!   "special": [
//!     { "id": "Queen", "max_hp": 400, "base_speed": 0.5, "attack_power": 2, "temp_hp": 50 }
//!   ]
//! }
//! ```

use crate::error::VitalError;
use crate::id::JobId;
use crate::stats::StatsBlock;
use serde::{Deserialize, Serialize};

/// Baseline numbers for one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSpec {
    pub id: JobId,
    pub max_hp: f64,
    pub base_speed: f64,
    pub attack_power: f64,
    /// Starting temp-HP buffer.
    #[serde(default)]
    pub temp_hp: f64,
}

impl JobSpec {
    pub fn new(id: impl Into<JobId>, max_hp: f64, base_speed: f64, attack_power: f64) -> Self {
        Self {
            id: id.into(),
            max_hp,
            base_speed,
            attack_power,
            temp_hp: 0.0,
        }
    }

    pub fn with_temp_hp(mut self, temp_hp: f64) -> Self {
        self.temp_hp = temp_hp;
        self
    }

    /// Check every number is finite and non-negative.
    pub fn validate(&self) -> Result<(), VitalError> {
        let fields = [
            ("max_hp", self.max_hp),
            ("base_speed", self.base_speed),
            ("attack_power", self.attack_power),
            ("temp_hp", self.temp_hp),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(VitalError::invalid(name, value));
            }
        }
        Ok(())
    }

    /// Fresh stats block at this job's baseline.
    pub fn baseline(&self) -> StatsBlock {
        StatsBlock::new(self.max_hp, self.base_speed, self.attack_power).with_temp_hp(self.temp_hp)
    }
}

/// All jobs known to a registry, general jobs first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobTable {
    #[serde(default)]
    pub general: Vec<JobSpec>,
    #[serde(default)]
    pub special: Vec<JobSpec>,
}

impl JobTable {
    /// Parse a table from JSON.
    ///
    /// # Errors
    ///
    /// `VitalError::InvalidJobTable` if the text is not a valid table.
    pub fn from_json(json: &str) -> Result<Self, VitalError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The colony's default roster.
    pub fn builtin() -> Self {
        Self {
            general: vec![
                JobSpec::new("Builder", 80.0, 2.5, 4.0),
                JobSpec::new("Scout", 50.0, 6.0, 3.0),
                JobSpec::new("Farmer", 60.0, 3.0, 2.0),
                JobSpec::new("Warrior", 120.0, 3.5, 12.0),
                JobSpec::new("Spitter", 70.0, 3.0, 9.0),
            ],
            special: vec![
                JobSpec::new("Queen", 400.0, 0.5, 2.0).with_temp_hp(50.0),
                JobSpec::new("Spider", 250.0, 5.0, 20.0),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.general.len() + self.special.len()
    }

    pub fn is_empty(&self) -> bool {
        self.general.is_empty() && self.special.is_empty()
    }
}
