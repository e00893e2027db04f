//! Tread materials and the structural rules keyed on them.
//!
//! Which steps get a horizontal reinforcement bar, which get composite
//! boards versus a grated sheet, and when a landing needs a depth
//! reinforcement are all pure functions of the material and step index.

use serde::{Deserialize, Serialize};

use crate::errors::{StairError, StairResult};

/// Grated landings deeper than this (mm) need a depth reinforcement.
pub const DEPTH_REINFORCEMENT_THRESHOLD_MM: f64 = 305.0;

/// Step tread material.
///
/// Serializes to the wire names used by the calculation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreadMaterial {
    /// Composite decking boards on every step
    #[serde(rename = "ДПК", alias = "DPK")]
    Dpk,
    /// Grated sheet on every step
    #[serde(rename = "ПВЛ", alias = "PVL")]
    Pvl,
    /// Grated sheet on the first step, composite boards on the rest
    #[serde(rename = "ДПК+1 ПВЛ", alias = "DPK+1PVL", alias = "DPK_PLUS_ONE_PVL")]
    DpkPlusOnePvl,
}

/// What covers a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreadCovering {
    CompositeBoards,
    GratedSheet,
}

impl TreadMaterial {
    /// All tread materials for UI selection
    pub const ALL: [TreadMaterial; 3] = [
        TreadMaterial::Dpk,
        TreadMaterial::Pvl,
        TreadMaterial::DpkPlusOnePvl,
    ];

    /// Wire name understood by the calculation service
    pub fn code(&self) -> &'static str {
        match self {
            TreadMaterial::Dpk => "ДПК",
            TreadMaterial::Pvl => "ПВЛ",
            TreadMaterial::DpkPlusOnePvl => "ДПК+1 ПВЛ",
        }
    }

    /// Parse from the wire name or an ASCII alias
    pub fn from_str_flexible(s: &str) -> StairResult<Self> {
        let normalized = s.trim().to_uppercase().replace([' ', '-'], "");
        match normalized.as_str() {
            "ДПК" | "DPK" | "COMPOSITE" => Ok(TreadMaterial::Dpk),
            "ПВЛ" | "PVL" | "GRATED" => Ok(TreadMaterial::Pvl),
            "ДПК+1ПВЛ" | "DPK+1PVL" | "DPK_PLUS_ONE_PVL" | "MIXED" => {
                Ok(TreadMaterial::DpkPlusOnePvl)
            }
            _ => Err(StairError::unknown_material(s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            TreadMaterial::Dpk => "Composite board (ДПК)",
            TreadMaterial::Pvl => "Grated sheet (ПВЛ)",
            TreadMaterial::DpkPlusOnePvl => "Composite board, grated first step (ДПК+1 ПВЛ)",
        }
    }

    /// Vertical lift of composite boards above the step frame (mm)
    pub fn default_board_elevation_mm(&self) -> f64 {
        match self {
            TreadMaterial::Dpk | TreadMaterial::DpkPlusOnePvl => 10.0,
            TreadMaterial::Pvl => 0.0,
        }
    }

    /// Nominal tread depth when none is supplied (mm)
    pub fn nominal_step_depth_mm(&self) -> f64 {
        match self {
            TreadMaterial::Dpk | TreadMaterial::DpkPlusOnePvl => 305.0,
            TreadMaterial::Pvl => 300.0,
        }
    }

    /// Whether step `step_index` gets a horizontal bar at each reinforcement column.
    ///
    /// | material  | step 0 | step > 0 |
    /// |-----------|--------|----------|
    /// | ПВЛ       | no     | no       |
    /// | ДПК       | yes    | yes      |
    /// | ДПК+1 ПВЛ | no     | yes      |
    pub fn needs_horizontal_reinforcement(&self, step_index: usize) -> bool {
        match self {
            TreadMaterial::Pvl => false,
            TreadMaterial::Dpk => true,
            TreadMaterial::DpkPlusOnePvl => step_index > 0,
        }
    }

    /// Whether a landing of `depth_mm` needs a cross-member under the grating
    pub fn needs_depth_reinforcement(&self, depth_mm: f64) -> bool {
        *self == TreadMaterial::Pvl && depth_mm > DEPTH_REINFORCEMENT_THRESHOLD_MM
    }

    /// Covering laid on step `step_index`
    pub fn covering_for_step(&self, step_index: usize) -> TreadCovering {
        match self {
            TreadMaterial::Dpk => TreadCovering::CompositeBoards,
            TreadMaterial::Pvl => TreadCovering::GratedSheet,
            TreadMaterial::DpkPlusOnePvl if step_index == 0 => TreadCovering::GratedSheet,
            TreadMaterial::DpkPlusOnePvl => TreadCovering::CompositeBoards,
        }
    }

    /// True when any step is covered with composite boards
    pub fn uses_composite_boards(&self) -> bool {
        !matches!(self, TreadMaterial::Pvl)
    }
}

impl std::fmt::Display for TreadMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
