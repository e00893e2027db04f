//! # Geometry Policy
//!
//! Two maintained variants of the staircase builder disagree on a handful of
//! details: how many reinforcement columns a given width gets, whether the
//! frame uses one profile size or two, and whether intermediate reinforcement
//! stands start half a profile below the previous step. [`GeometryPolicy`]
//! makes each of those an explicit setting instead of picking one silently.
//!
//! ## Presets
//!
//! - [`GeometryPolicy::eco`]: formula A, single 20 mm profile, no joint offset
//! - [`GeometryPolicy::optima`]: formula B, 40×20 mm profile, joint offset on
//!
//! ## Example
//!
//! ```rust
//! use stair_core::policy::{GeometryPolicy, ReinforcementFormula};
//!
//! let policy = GeometryPolicy::eco();
//! assert_eq!(policy.reinforcement_formula, ReinforcementFormula::LegacyA);
//! assert_eq!(policy.default_reinforcement_count(1000.0), 1);
//! assert_eq!(policy.default_reinforcement_count(1600.0), 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{StairError, StairResult};

/// Default square profile size (mm)
pub const DEFAULT_PROFILE_THICKNESS_MM: f64 = 20.0;

/// Wide side of the rectangular profile used in dual-thickness frames (mm)
pub const DEFAULT_SECONDARY_PROFILE_THICKNESS_MM: f64 = 40.0;

/// Widths at or above this get a middle longitudinal base beam (mm)
pub const DEFAULT_WIDE_STIFFENER_THRESHOLD_MM: f64 = 1500.0;

/// How the reinforcement column count is derived from the staircase width
/// when the caller does not supply one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReinforcementFormula {
    /// `w ≤ 1000 → 1`, otherwise `ceil((w − 1000) / 300) + 1`
    #[default]
    LegacyA,
    /// `w ≤ 1000 → 1`, `w ≤ 1200 → 2`, otherwise `ceil((w − 80) / 400) − 1`
    LegacyB,
}

impl ReinforcementFormula {
    /// Raw formula value, before the minimum-one floor
    pub fn raw_count(&self, width_mm: f64) -> i64 {
        match self {
            ReinforcementFormula::LegacyA => {
                if width_mm <= 1000.0 {
                    1
                } else {
                    ((width_mm - 1000.0) / 300.0).ceil() as i64 + 1
                }
            }
            ReinforcementFormula::LegacyB => {
                if width_mm <= 1000.0 {
                    1
                } else if width_mm <= 1200.0 {
                    2
                } else {
                    ((width_mm - 80.0) / 400.0).ceil() as i64 - 1
                }
            }
        }
    }

    /// Parse `legacy_a` / `a` / `eco` style names
    pub fn from_str_flexible(s: &str) -> StairResult<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "legacy_a" | "a" | "eco" => Ok(ReinforcementFormula::LegacyA),
            "legacy_b" | "b" | "optima" => Ok(ReinforcementFormula::LegacyB),
            other => Err(StairError::invalid_input(
                "reinforcement_formula",
                other,
                "Expected 'legacy_a' or 'legacy_b'",
            )),
        }
    }
}

/// Builder configuration consolidating the divergent builder variants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryPolicy {
    /// Which width → column count rule to use
    pub reinforcement_formula: ReinforcementFormula,

    /// Use a `secondary × primary` rectangular profile instead of a square one
    pub dual_profile_thickness: bool,

    /// Wide side of the rectangular profile (mm), used when `dual_profile_thickness`
    pub secondary_profile_thickness_mm: f64,

    /// Start intermediate reinforcement stands half a profile lower
    pub joint_offset_enabled: bool,

    /// Width at which the middle longitudinal base beam is added (mm)
    pub wide_stiffener_threshold_mm: f64,
}

impl Default for GeometryPolicy {
    fn default() -> Self {
        GeometryPolicy::eco()
    }
}

impl GeometryPolicy {
    /// Square 20 mm profile, formula A
    pub fn eco() -> Self {
        GeometryPolicy {
            reinforcement_formula: ReinforcementFormula::LegacyA,
            dual_profile_thickness: false,
            secondary_profile_thickness_mm: DEFAULT_SECONDARY_PROFILE_THICKNESS_MM,
            joint_offset_enabled: false,
            wide_stiffener_threshold_mm: DEFAULT_WIDE_STIFFENER_THRESHOLD_MM,
        }
    }

    /// Rectangular 40×20 mm profile, formula B, joint offset
    pub fn optima() -> Self {
        GeometryPolicy {
            reinforcement_formula: ReinforcementFormula::LegacyB,
            dual_profile_thickness: true,
            secondary_profile_thickness_mm: DEFAULT_SECONDARY_PROFILE_THICKNESS_MM,
            joint_offset_enabled: true,
            wide_stiffener_threshold_mm: DEFAULT_WIDE_STIFFENER_THRESHOLD_MM,
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> StairResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "eco" => Ok(GeometryPolicy::eco()),
            "optima" => Ok(GeometryPolicy::optima()),
            other => Err(StairError::invalid_input(
                "variant",
                other,
                "Expected 'eco' or 'optima'",
            )),
        }
    }

    /// Column count derived from width, never below one.
    pub fn default_reinforcement_count(&self, width_mm: f64) -> u32 {
        self.reinforcement_formula.raw_count(width_mm).max(1) as u32
    }

    /// Cross-section size of a member across its wide face (mm)
    pub fn cross_thickness(&self, profile_thickness_mm: f64) -> f64 {
        if self.dual_profile_thickness {
            self.secondary_profile_thickness_mm.max(profile_thickness_mm)
        } else {
            profile_thickness_mm
        }
    }

    /// Vertical drop applied to intermediate reinforcement stands (mm)
    pub fn joint_offset(&self, profile_thickness_mm: f64) -> f64 {
        if self.joint_offset_enabled {
            profile_thickness_mm / 2.0
        } else {
            0.0
        }
    }

    /// Validate the policy's own numeric settings.
    pub fn validate(&self) -> StairResult<()> {
        if !(self.secondary_profile_thickness_mm > 0.0) {
            return Err(StairError::invalid_input(
                "secondary_profile_thickness_mm",
                self.secondary_profile_thickness_mm.to_string(),
                "Secondary profile thickness must be positive",
            ));
        }
        if !(self.wide_stiffener_threshold_mm > 0.0) {
            return Err(StairError::invalid_input(
                "wide_stiffener_threshold_mm",
                self.wide_stiffener_threshold_mm.to_string(),
                "Stiffener threshold must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_a() {
        let f = ReinforcementFormula::LegacyA;
        assert_eq!(f.raw_count(600.0), 1);
        assert_eq!(f.raw_count(1000.0), 1);
        assert_eq!(f.raw_count(1001.0), 2);
        assert_eq!(f.raw_count(1300.0), 2);
        assert_eq!(f.raw_count(1600.0), 3);
    }

    #[test]
    fn test_formula_b() {
        let f = ReinforcementFormula::LegacyB;
        assert_eq!(f.raw_count(1000.0), 1);
        assert_eq!(f.raw_count(1100.0), 2);
        assert_eq!(f.raw_count(1200.0), 2);
        // ceil(1520 / 400) - 1 = 3
        assert_eq!(f.raw_count(1600.0), 3);
        // ceil(5920 / 400) - 1 = 14
        assert_eq!(f.raw_count(6000.0), 14);
    }

    #[test]
    fn test_count_is_floored_at_one() {
        let policy = GeometryPolicy::optima();
        for width in [300.0, 480.0, 600.0, 1000.0] {
            assert!(policy.default_reinforcement_count(width) >= 1);
        }
    }

    #[test]
    fn test_cross_thickness_and_offset() {
        let eco = GeometryPolicy::eco();
        assert_eq!(eco.cross_thickness(20.0), 20.0);
        assert_eq!(eco.joint_offset(20.0), 0.0);

        let optima = GeometryPolicy::optima();
        assert_eq!(optima.cross_thickness(20.0), 40.0);
        assert_eq!(optima.joint_offset(20.0), 10.0);
    }

    #[test]
    fn test_presets_and_toml_names() {
        assert_eq!(GeometryPolicy::preset("OPTIMA").unwrap(), GeometryPolicy::optima());
        assert!(GeometryPolicy::preset("deluxe").is_err());
        assert_eq!(
            ReinforcementFormula::from_str_flexible("legacy-b").unwrap(),
            ReinforcementFormula::LegacyB
        );

        let json = serde_json::to_string(&ReinforcementFormula::LegacyB).unwrap();
        assert_eq!(json, "\"legacy_b\"");
    }
}
