use crate::{
    error::ConfigError,
    model::constants::{
        DAYS_INACTIVE_THRESHOLD, MIXED_MULTIPLIER, SEEDED_MULTIPLIER, TOTAL_DECAY_DAYS, TOURNAMENT_LIMIT
    }
};
use serde::{Deserialize, Serialize};

/// Settings for a full leaderboard recompute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Minimum number of tournaments a player needs in a pool to be ranked.
    /// Zero disables the floor.
    pub tournament_limit: u32,
    /// Repeat count of a seeded match in the mixed pool
    pub seeded_multiplier: u32,
    /// Repeat count of a mixed-format match in the mixed pool
    pub mixed_multiplier: u32
}

impl ProcessorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seeded_multiplier < 1 {
            return Err(ConfigError::SeededMultiplier(self.seeded_multiplier));
        }

        if self.mixed_multiplier < 1 {
            return Err(ConfigError::MixedMultiplier(self.mixed_multiplier));
        }

        Ok(())
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            tournament_limit: TOURNAMENT_LIMIT,
            seeded_multiplier: SEEDED_MULTIPLIER,
            mixed_multiplier: MIXED_MULTIPLIER
        }
    }
}

/// Settings for the read-time inactivity decay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecayConfig {
    /// Days without activity before decay applies
    pub days_inactive_threshold: u32,
    /// Days of inactivity that remove the full exposure
    pub total_decay_days: u32
}

impl DecayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_decay_days < 1 {
            return Err(ConfigError::TotalDecayDays(self.total_decay_days));
        }

        Ok(())
    }
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            days_inactive_threshold: DAYS_INACTIVE_THRESHOLD,
            total_decay_days: TOTAL_DECAY_DAYS
        }
    }
}
