//! # Configuration
//!
//! Builder policy, input limits and service settings, read from a TOML file.
//! Every section is optional; a missing section takes its default.
//!
//! ## TOML Example
//!
//! ```toml
//! [policy]
//! reinforcement_formula = "legacy_b"
//! dual_profile_thickness = true
//! joint_offset_enabled = true
//! wide_stiffener_threshold_mm = 1500
//!
//! [limits]
//! min_width_mm = 600
//! max_width_mm = 2000
//! min_height_mm = 100
//! max_height_mm = 3000
//! min_step_height_mm = 150
//! max_step_height_mm = 200
//!
//! [service]
//! url = "http://localhost:5000"
//! timeout_secs = 15
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{StairError, StairResult};
use crate::policy::GeometryPolicy;
use crate::validation::ValidationLimits;

/// Request timeout used when the config gives none
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how to reach the calculation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL; `None` keeps the client offline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Complete client configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StairConfig {
    pub policy: GeometryPolicy,
    pub limits: ValidationLimits,
    pub service: ServiceConfig,
}

impl StairConfig {
    /// Named variant: `eco` or `optima`, both with wide limits
    pub fn preset(name: &str) -> StairResult<Self> {
        Ok(StairConfig {
            policy: GeometryPolicy::preset(name)?,
            limits: ValidationLimits::wide(),
            service: ServiceConfig::default(),
        })
    }

    /// Parse TOML text
    pub fn from_toml_str(text: &str) -> StairResult<Self> {
        Self::parse(text, "<inline>")
    }

    /// Read and parse a TOML file
    pub fn load(path: &Path) -> StairResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| StairError::config_error(path.display().to_string(), e.to_string()))?;
        Self::parse(&text, &path.display().to_string())
    }

    fn parse(text: &str, origin: &str) -> StairResult<Self> {
        let config: StairConfig =
            toml::from_str(text).map_err(|e| StairError::config_error(origin, e.to_string()))?;
        config
            .validate()
            .map_err(|e| StairError::config_error(origin, e.to_string()))?;
        Ok(config)
    }

    /// Reject settings that cannot work
    pub fn validate(&self) -> StairResult<()> {
        self.policy.validate()?;
        let l = &self.limits;
        if !(l.min_width_mm < l.max_width_mm && l.min_height_mm < l.max_height_mm) {
            return Err(StairError::invalid_input(
                "limits",
                format!("{:?}", l),
                "Each minimum must be below its maximum",
            ));
        }
        if let (Some(min), Some(max)) = (l.min_step_height_mm, l.max_step_height_mm) {
            if min >= max {
                return Err(StairError::invalid_input(
                    "limits",
                    format!("{}..{}", min, max),
                    "Step height minimum must be below its maximum",
                ));
            }
        }
        if self.service.timeout_secs == 0 {
            return Err(StairError::invalid_input("service.timeout_secs", "0", "Timeout must be positive"));
        }
        Ok(())
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> StairResult<String> {
        toml::to_string_pretty(self).map_err(|e| StairError::SerializationError {
            reason: e.to_string(),
        })
    }
}
