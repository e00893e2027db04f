//! # Input Validation
//!
//! Range checks on form input, run before any geometry is built or any
//! request is sent. Two limit sets exist: the wide one used by the current
//! calculators and the narrow one of the first calculator, which also
//! bounds the height of a single step.
//!
//! ## Example
//!
//! ```rust
//! use stair_core::validation::{validate_request, ValidationLimits};
//! use stair_core::service::CalculateRequest;
//! use stair_core::materials::TreadMaterial;
//!
//! let request = CalculateRequest::new(7000.0, 800.0, 4, TreadMaterial::Dpk);
//! let err = validate_request(&request, &ValidationLimits::wide()).unwrap_err();
//! assert!(err.to_string().contains("Width must be between 300 and 6000 mm"));
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{StairError, StairResult};
use crate::service::CalculateRequest;
use crate::staircase::MAX_STEP_COUNT;

/// Accepted input ranges (mm, inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    pub min_width_mm: f64,
    pub max_width_mm: f64,
    pub min_height_mm: f64,
    pub max_height_mm: f64,
    /// Per-step rise bounds, checked only for more than one step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_step_height_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_step_height_mm: Option<f64>,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        ValidationLimits::wide()
    }
}

impl ValidationLimits {
    /// 300–6000 mm wide, 100–3400 mm high
    pub fn wide() -> Self {
        ValidationLimits {
            min_width_mm: 300.0,
            max_width_mm: 6000.0,
            min_height_mm: 100.0,
            max_height_mm: 3400.0,
            min_step_height_mm: None,
            max_step_height_mm: None,
        }
    }

    /// 600–2000 mm wide, 100–3000 mm high, 150–200 mm per step
    pub fn narrow() -> Self {
        ValidationLimits {
            min_width_mm: 600.0,
            max_width_mm: 2000.0,
            min_height_mm: 100.0,
            max_height_mm: 3000.0,
            min_step_height_mm: Some(150.0),
            max_step_height_mm: Some(200.0),
        }
    }

    /// Look up a limit set by name
    pub fn preset(name: &str) -> StairResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "wide" => Ok(ValidationLimits::wide()),
            "narrow" => Ok(ValidationLimits::narrow()),
            other => Err(StairError::invalid_input("limits", other, "Expected 'wide' or 'narrow'")),
        }
    }
}

fn in_range(value: f64, min: f64, max: f64) -> bool {
    value.is_finite() && value >= min && value <= max
}

/// Check a request against `limits`; the first violation is returned.
pub fn validate_request(request: &CalculateRequest, limits: &ValidationLimits) -> StairResult<()> {
    if !in_range(request.width, limits.min_width_mm, limits.max_width_mm) {
        return Err(StairError::invalid_input(
            "width",
            request.width.to_string(),
            format!(
                "Width must be between {} and {} mm",
                limits.min_width_mm, limits.max_width_mm
            ),
        ));
    }

    if !in_range(request.height, limits.min_height_mm, limits.max_height_mm) {
        return Err(StairError::invalid_input(
            "height",
            request.height.to_string(),
            format!(
                "Height must be between {} and {} mm",
                limits.min_height_mm, limits.max_height_mm
            ),
        ));
    }

    if request.steps == 0 {
        return Err(StairError::invalid_input("steps", "0", "At least one step is required"));
    }
    if request.steps as usize > MAX_STEP_COUNT {
        return Err(StairError::invalid_input(
            "steps",
            request.steps.to_string(),
            format!("Step count cannot exceed {}", MAX_STEP_COUNT),
        ));
    }

    // A single step may be any height.
    if request.steps > 1 {
        if let (Some(min), Some(max)) = (limits.min_step_height_mm, limits.max_step_height_mm) {
            let step_height = request.step_height();
            if !in_range(step_height, min, max) {
                return Err(StairError::invalid_input(
                    "step_height",
                    format!("{:.1}", step_height),
                    format!("Step height ({:.1} mm) must be between {} and {} mm", step_height, min, max),
                ));
            }
        }
    }

    if request.has_platform && !(request.platform_depth.is_finite() && request.platform_depth > 0.0) {
        return Err(StairError::invalid_input(
            "platform_depth",
            request.platform_depth.to_string(),
            "Platform depth must be positive",
        ));
    }

    if !(request.paint_consumption.is_finite() && request.paint_consumption >= 0.0) {
        return Err(StairError::invalid_input(
            "paint_consumption",
            request.paint_consumption.to_string(),
            "Paint consumption cannot be negative",
        ));
    }

    Ok(())
}
