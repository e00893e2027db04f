//! Shared per-build state: derived dimensions and the element sink.

use tracing::debug;

use super::elements::{
    ColorRole, CoveringElement, CoveringElementKind, Cylinder, Fastener, MemberKind, Side,
    StructuralElement,
};
use super::vector::Vec3;
use crate::materials::{PaletteEntry, FASTENER_COLOR};
use crate::policy::GeometryPolicy;
use crate::staircase::StaircaseSpec;

/// Sizes at or below this are treated as zero.
pub(crate) const SIZE_EPSILON: f64 = 1e-9;

/// Dimensions derived once per build and read by every generator.
pub(crate) struct Layout<'a> {
    pub spec: &'a StaircaseSpec,
    pub policy: &'a GeometryPolicy,
    pub steps: usize,
    pub width: f64,
    /// Square profile size
    pub profile: f64,
    /// Profile size across the member's wide face
    pub cross: f64,
    /// Inward shift of transverse beams so their outer face stays flush
    pub shift: f64,
    pub total_depth: f64,
    /// X centre of each reinforcement column
    pub columns: Vec<f64>,
    pub palette: PaletteEntry,
}

impl<'a> Layout<'a> {
    pub fn new(spec: &'a StaircaseSpec, policy: &'a GeometryPolicy) -> Self {
        let profile = spec.profile_thickness;
        let cross = policy.cross_thickness(profile);
        Layout {
            spec,
            policy,
            steps: spec.step_count(),
            width: spec.width,
            profile,
            cross,
            shift: (cross - profile) / 2.0,
            total_depth: spec.total_depth(policy),
            columns: spec.reinforcement_positions(policy),
            palette: spec.frame_color.palette(),
        }
    }

    pub fn is_last(&self, step: usize) -> bool {
        step + 1 == self.steps
    }

    /// Depth of step `step`, the landing depth on the last step when present
    pub fn step_depth(&self, step: usize) -> f64 {
        self.spec.step_depth_at(step)
    }

    pub fn step_z(&self, step: usize) -> f64 {
        self.spec.step_z(step)
    }

    pub fn step_top(&self, step: usize) -> f64 {
        self.spec.step_top_y(step)
    }

    /// X centre of a side member, flush with the outer edge
    pub fn side_x(&self, side: Side) -> f64 {
        side.sign() * (self.width / 2.0 - self.cross / 2.0)
    }
}

/// Collects elements, dropping any with a non-positive size.
pub(crate) struct ModelSink {
    pub frame: Vec<StructuralElement>,
    pub coverings: Vec<CoveringElement>,
    pub fasteners: Vec<Fastener>,
    palette: PaletteEntry,
    pub skipped: usize,
}

impl ModelSink {
    pub fn new(palette: PaletteEntry) -> Self {
        ModelSink {
            frame: Vec::new(),
            coverings: Vec::new(),
            fasteners: Vec::new(),
            palette,
            skipped: 0,
        }
    }

    fn degenerate(dimensions: &Vec3) -> bool {
        [dimensions.x, dimensions.y, dimensions.z]
            .iter()
            .any(|v| !v.is_finite() || *v <= SIZE_EPSILON)
    }

    pub fn member(&mut self, kind: MemberKind, step: Option<usize>, dimensions: Vec3, position: Vec3) {
        if Self::degenerate(&dimensions) {
            debug!(?kind, ?step, ?dimensions, "skipping degenerate member");
            self.skipped += 1;
            return;
        }
        self.frame.push(StructuralElement {
            kind,
            step,
            dimensions,
            position,
            color_role: ColorRole::Frame,
            color: self.palette.frame,
        });
    }

    pub fn covering(&mut self, kind: CoveringElementKind, step: usize, dimensions: Vec3, position: Vec3) {
        if Self::degenerate(&dimensions) {
            debug!(?kind, step, ?dimensions, "skipping degenerate covering");
            self.skipped += 1;
            return;
        }
        // Grating is painted metal and follows the frame.
        let (color_role, color) = match kind {
            CoveringElementKind::CompositeBoard => (ColorRole::CompositeBoard, self.palette.composite_board),
            CoveringElementKind::GratedPanel | CoveringElementKind::GridLine => {
                (ColorRole::Frame, self.palette.frame)
            }
        };
        self.coverings.push(CoveringElement {
            kind,
            step,
            dimensions,
            position,
            color_role,
            color,
        });
    }

    pub fn fastener(&mut self, step: usize, board: usize, side: Side, position: Vec3, head: Cylinder, shank: Cylinder) {
        self.fasteners.push(Fastener {
            step,
            board,
            side,
            position,
            head,
            shank,
            color_role: ColorRole::Fastener,
            color: FASTENER_COLOR,
        });
    }
}
