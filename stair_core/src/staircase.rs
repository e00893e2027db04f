//! # Staircase Dimensions
//!
//! [`StaircaseSpec`] is the immutable input of one geometry build. Its JSON
//! shape is exactly the `dimensions` object the calculation service echoes
//! back, so a service response can be fed to the builder verbatim.
//!
//! ## Derived quantities
//!
//! - `step_count = round(height / step_height)`, never below one
//! - `last_step_depth = platform_depth` when a platform is present, else `step_depth`
//! - `total_depth = step_depth × (n − 1) + last_step_depth − joint overlap`
//! - reinforcement columns spaced evenly between the inner faces of the side profiles
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "width": 1000,
//!   "height": 800,
//!   "step_height": 200,
//!   "step_depth": 305,
//!   "profile_thickness": 20,
//!   "has_platform": false,
//!   "platform_depth": 0,
//!   "reinforcements_count": 1,
//!   "material": "ДПК",
//!   "board_elevation": 10,
//!   "paint_consumption": 150,
//!   "frame_color": "RAL9005"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{StairError, StairResult};
use crate::materials::{FrameColor, TreadMaterial};
use crate::policy::{GeometryPolicy, DEFAULT_PROFILE_THICKNESS_MM};
use crate::service::CalculateRequest;

/// Most steps a single staircase may have; every step adds a full frame and covering
pub const MAX_STEP_COUNT: usize = 100;

/// Dimensions record consumed by the geometry builder.
///
/// All lengths are in millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaircaseSpec {
    /// Overall width across the treads
    pub width: f64,

    /// Overall rise from the ground to the top of the last step frame
    pub height: f64,

    /// Rise of a single step
    pub step_height: f64,

    /// Going of a regular step
    pub step_depth: f64,

    /// Square profile size of the frame tube
    pub profile_thickness: f64,

    /// Whether the top step is a landing of its own depth
    pub has_platform: bool,

    /// Landing depth, used only with `has_platform`
    #[serde(default)]
    pub platform_depth: f64,

    /// Explicit reinforcement column count; `None` or `0` means derive from width
    #[serde(default)]
    pub reinforcements_count: Option<u32>,

    /// Tread material
    pub material: TreadMaterial,

    /// Lift of composite boards above the frame; `None` means material default
    #[serde(default)]
    pub board_elevation: Option<f64>,

    /// Paint consumption (g/m²), carried through for the report only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paint_consumption: Option<f64>,

    /// Frame powder-coat color
    #[serde(default)]
    pub frame_color: FrameColor,
}

impl StaircaseSpec {
    /// Create a spec with material defaults for depth and profile.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stair_core::staircase::StaircaseSpec;
    /// use stair_core::materials::TreadMaterial;
    ///
    /// let spec = StaircaseSpec::new(1000.0, 800.0, 200.0, TreadMaterial::Dpk);
    /// assert_eq!(spec.step_count(), 4);
    /// assert_eq!(spec.step_depth, 305.0);
    /// ```
    pub fn new(width: f64, height: f64, step_height: f64, material: TreadMaterial) -> Self {
        StaircaseSpec {
            width,
            height,
            step_height,
            step_depth: material.nominal_step_depth_mm(),
            profile_thickness: DEFAULT_PROFILE_THICKNESS_MM,
            has_platform: false,
            platform_depth: 0.0,
            reinforcements_count: None,
            material,
            board_elevation: None,
            paint_consumption: None,
            frame_color: FrameColor::default(),
        }
    }

    /// Derive the local spec from what the user typed into the form.
    ///
    /// `step_height = height / steps`, so `step_count()` gives `steps` back.
    pub fn from_request(request: &CalculateRequest) -> Self {
        let steps = request.steps.max(1) as f64;
        let mut spec = StaircaseSpec::new(request.width, request.height, request.height / steps, request.material);
        if request.has_platform {
            spec = spec.with_platform(request.platform_depth);
        }
        spec.reinforcements_count = Some(request.reinforcements_count).filter(|&n| n > 0);
        spec.paint_consumption = Some(request.paint_consumption);
        spec.frame_color = request.frame_color;
        spec
    }

    /// Add a landing of the given depth as the last step
    pub fn with_platform(mut self, platform_depth: f64) -> Self {
        self.has_platform = true;
        self.platform_depth = platform_depth;
        self
    }

    /// Override the derived reinforcement column count
    pub fn with_reinforcements(mut self, count: u32) -> Self {
        self.reinforcements_count = Some(count);
        self
    }

    /// Set the regular step depth
    pub fn with_step_depth(mut self, step_depth: f64) -> Self {
        self.step_depth = step_depth;
        self
    }

    /// Set the frame color
    pub fn with_frame_color(mut self, color: FrameColor) -> Self {
        self.frame_color = color;
        self
    }

    /// Set the composite board elevation
    pub fn with_board_elevation(mut self, elevation: f64) -> Self {
        self.board_elevation = Some(elevation);
        self
    }

    /// Validate geometric sanity (positivity, profile fits inside width).
    ///
    /// Range limits for user input live in [`crate::validation`]; this only
    /// rejects values no staircase could be built from.
    pub fn validate(&self) -> StairResult<()> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("step_height", self.step_height),
            ("step_depth", self.step_depth),
            ("profile_thickness", self.profile_thickness),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(StairError::invalid_input(field, value.to_string(), "Must be a positive number"));
            }
        }
        if self.raw_step_count() > MAX_STEP_COUNT as f64 {
            return Err(StairError::invalid_input(
                "step_height",
                self.step_height.to_string(),
                format!("Step count cannot exceed {}", MAX_STEP_COUNT),
            ));
        }
        if self.width <= 2.0 * self.profile_thickness {
            return Err(StairError::invalid_input(
                "width",
                self.width.to_string(),
                "Width must exceed two profile thicknesses",
            ));
        }
        if self.step_depth <= self.profile_thickness {
            return Err(StairError::invalid_input(
                "step_depth",
                self.step_depth.to_string(),
                "Step depth must exceed the profile thickness",
            ));
        }
        if self.has_platform && (!self.platform_depth.is_finite() || self.platform_depth < 0.0) {
            return Err(StairError::invalid_input(
                "platform_depth",
                self.platform_depth.to_string(),
                "Platform depth cannot be negative",
            ));
        }
        if let Some(elevation) = self.board_elevation {
            if !elevation.is_finite() || elevation < 0.0 {
                return Err(StairError::invalid_input(
                    "board_elevation",
                    elevation.to_string(),
                    "Board elevation cannot be negative",
                ));
            }
        }
        Ok(())
    }

    /// Number of steps, `round(height / step_height)` clamped to at least one
    pub fn step_count(&self) -> usize {
        let raw = self.raw_step_count();
        if raw.is_finite() && raw >= 1.0 {
            raw as usize
        } else {
            1
        }
    }

    /// `round(height / step_height)` before clamping; may be zero or NaN
    pub fn raw_step_count(&self) -> f64 {
        (self.height / self.step_height).round()
    }

    /// True when the last step is a landing with a usable depth
    pub fn platform_active(&self) -> bool {
        self.has_platform && self.platform_depth > 0.0
    }

    /// Depth of the top step (landing depth when a platform is present)
    pub fn last_step_depth(&self) -> f64 {
        if self.platform_active() {
            self.platform_depth
        } else {
            self.step_depth
        }
    }

    /// Depth of step `index`
    pub fn step_depth_at(&self, index: usize) -> f64 {
        if index + 1 == self.step_count() {
            self.last_step_depth()
        } else {
            self.step_depth
        }
    }

    /// Front edge z of step `index`; every step starts one regular depth after the previous
    pub fn step_z(&self, index: usize) -> f64 {
        index as f64 * self.step_depth
    }

    /// Top of the frame of step `index`
    pub fn step_top_y(&self, index: usize) -> f64 {
        (index + 1) as f64 * self.step_height
    }

    /// Length of the longitudinal base beams: full run minus one joint overlap
    pub fn total_depth(&self, policy: &GeometryPolicy) -> f64 {
        let n = self.step_count() as f64;
        self.step_depth * (n - 1.0) + self.last_step_depth() - policy.cross_thickness(self.profile_thickness)
    }

    /// Reinforcement columns: explicit count when positive, else the policy's formula
    pub fn reinforcement_count(&self, policy: &GeometryPolicy) -> u32 {
        match self.reinforcements_count {
            Some(n) if n > 0 => n,
            _ => policy.default_reinforcement_count(self.width),
        }
    }

    /// Gap between neighbouring reinforcement columns
    pub fn reinforcement_spacing(&self, policy: &GeometryPolicy) -> f64 {
        (self.width - 2.0 * self.profile_thickness) / (self.reinforcement_count(policy) as f64 + 1.0)
    }

    /// X centre of every reinforcement column, left to right
    pub fn reinforcement_positions(&self, policy: &GeometryPolicy) -> Vec<f64> {
        let spacing = self.reinforcement_spacing(policy);
        let start = -self.width / 2.0 + self.profile_thickness;
        (0..self.reinforcement_count(policy))
            .map(|j| start + spacing * (j as f64 + 1.0))
            .collect()
    }

    /// Composite board elevation, explicit or material default
    pub fn board_elevation_mm(&self) -> f64 {
        self.board_elevation
            .unwrap_or_else(|| self.material.default_board_elevation_mm())
    }
}
