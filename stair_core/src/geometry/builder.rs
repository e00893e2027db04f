//! The geometry builder: one pure function from spec to model.

use tracing::{debug, info, instrument, warn};

use super::covering::add_coverings;
use super::elements::Model;
use super::frame::{add_base, add_step_frames};
use super::layout::{Layout, ModelSink};
use super::reinforcement::{add_depth_reinforcements, add_reinforcements};
use super::vector::Vec3;
use crate::errors::StairResult;
use crate::policy::GeometryPolicy;
use crate::staircase::StaircaseSpec;

/// Builds staircase models under a fixed [`GeometryPolicy`].
///
/// The builder holds no state between builds; every call returns a fresh
/// [`Model`] and the same input always produces the same output.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeometryBuilder {
    policy: GeometryPolicy,
}

impl GeometryBuilder {
    pub fn new(policy: GeometryPolicy) -> Self {
        GeometryBuilder { policy }
    }

    pub fn policy(&self) -> &GeometryPolicy {
        &self.policy
    }

    /// Derive every frame member, covering piece and fastener for `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::StairError::InvalidInput`] when the dimensions or
    /// policy hold values no frame can be built from.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stair_core::geometry::GeometryBuilder;
    /// use stair_core::materials::TreadMaterial;
    /// use stair_core::policy::GeometryPolicy;
    /// use stair_core::staircase::StaircaseSpec;
    ///
    /// let spec = StaircaseSpec::new(1000.0, 800.0, 200.0, TreadMaterial::Dpk);
    /// let model = GeometryBuilder::new(GeometryPolicy::eco()).build(&spec).unwrap();
    /// assert_eq!(model.step_count, 4);
    /// ```
    #[instrument(skip(self, spec), fields(width = spec.width, height = spec.height, material = %spec.material))]
    pub fn build(&self, spec: &StaircaseSpec) -> StairResult<Model> {
        self.policy.validate()?;
        spec.validate()?;

        let raw_steps = spec.raw_step_count();
        if !(raw_steps >= 1.0) {
            warn!(
                height = spec.height,
                step_height = spec.step_height,
                "step count rounds below one, building a single step"
            );
        }

        let layout = Layout::new(spec, &self.policy);
        debug!(
            steps = layout.steps,
            columns = layout.columns.len(),
            total_depth = layout.total_depth,
            "derived layout"
        );

        let mut sink = ModelSink::new(layout.palette);
        add_base(&layout, &mut sink);
        add_step_frames(&layout, &mut sink);
        add_reinforcements(&layout, &mut sink);
        add_depth_reinforcements(&layout, &mut sink);
        add_coverings(&layout, &mut sink);

        let model = Model {
            material: spec.material,
            frame_color: spec.frame_color,
            step_count: layout.steps,
            reinforcement_count: layout.columns.len() as u32,
            total_depth: layout.total_depth,
            display_offset: Vec3::new(0.0, 0.0, -spec.step_depth * (layout.steps as f64 - 1.0) / 2.0),
            frame: sink.frame,
            coverings: sink.coverings,
            fasteners: sink.fasteners,
        };

        info!(
            members = model.frame.len(),
            coverings = model.coverings.len(),
            fasteners = model.fasteners.len(),
            skipped = sink.skipped,
            "built staircase model"
        );
        Ok(model)
    }
}

/// Build `spec` under `policy` without keeping a builder around.
pub fn build(spec: &StaircaseSpec, policy: &GeometryPolicy) -> StairResult<Model> {
    GeometryBuilder::new(*policy).build(spec)
}
