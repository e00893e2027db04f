//! Output types of a geometry build.
//!
//! Every element is an axis-aligned box (or, for fasteners, a pair of
//! cylinders) given by its centre `position` and its full `dimensions`
//! `(w, h, d)` along `(x, y, z)`. Each element carries its resolved color,
//! so a host never has to consult shared material state.

use serde::{Deserialize, Serialize};

use super::vector::Vec3;
use crate::materials::{FrameColor, Rgb, TreadMaterial};
use crate::units::{Meters, Millimeters};

/// Left or right side of the staircase, seen from the front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// -1 for left, +1 for right
    pub fn sign(&self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Position of a base beam in the ground frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseBeamRole {
    Longitudinal(Side),
    LongitudinalMiddle,
    TransverseFront,
    TransverseBack,
}

/// Front or back transverse beam of a step frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepEdge {
    Front,
    Back,
}

/// Corner of a step where a vertical stand sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandCorner {
    FrontLeft,
    FrontRight,
    BackLeft,
    BackRight,
}

impl StandCorner {
    pub fn is_back(&self) -> bool {
        matches!(self, StandCorner::BackLeft | StandCorner::BackRight)
    }
}

/// What a reinforcement member does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReinforcementRole {
    /// Vertical column under a step, one step high
    Column,
    /// Full-height column behind the last step
    RearColumn,
    /// Bar running front-to-back under the tread
    Horizontal,
}

/// Structural member kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "role")]
pub enum MemberKind {
    BaseBeam(BaseBeamRole),
    StepBeam(StepEdge),
    SideSupport(Side),
    Stand(StandCorner),
    Reinforcement(ReinforcementRole),
    DepthReinforcement,
}

/// Which palette slot an element's color comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorRole {
    Frame,
    CompositeBoard,
    Fastener,
}

/// One profile member of the welded frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralElement {
    pub kind: MemberKind,
    /// Step the member belongs to; `None` for base beams and rear columns
    pub step: Option<usize>,
    pub dimensions: Vec3,
    pub position: Vec3,
    pub color_role: ColorRole,
    pub color: Rgb,
}

impl StructuralElement {
    /// Running length of the profile
    pub fn length(&self) -> f64 {
        self.dimensions.max_component()
    }
}

/// Covering element kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoveringElementKind {
    CompositeBoard,
    GratedPanel,
    GridLine,
}

/// One piece of tread covering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoveringElement {
    pub kind: CoveringElementKind,
    pub step: usize,
    pub dimensions: Vec3,
    pub position: Vec3,
    pub color_role: ColorRole,
    pub color: Rgb,
}

/// Upright cylinder given by its centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cylinder {
    pub center: Vec3,
    pub radius: f64,
    pub height: f64,
}

/// Bolt holding a composite board to the side support
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fastener {
    pub step: usize,
    /// Index of the board on its step, front to back
    pub board: usize,
    pub side: Side,
    /// Centre of the bolt head
    pub position: Vec3,
    pub head: Cylinder,
    pub shank: Cylinder,
    pub color_role: ColorRole,
    pub color: Rgb,
}

/// Element counts and material totals of a built model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub step_count: usize,
    pub reinforcement_count: u32,
    pub base_beams: usize,
    pub step_beams: usize,
    pub side_supports: usize,
    pub stands: usize,
    pub reinforcements: usize,
    pub depth_reinforcements: usize,
    pub composite_boards: usize,
    pub grated_panels: usize,
    pub grid_lines: usize,
    pub bolts: usize,
    pub nuts: usize,
    /// Sum of every frame member's running length
    pub frame_profile_length: Millimeters,
    pub frame_profile_length_m: Meters,
    /// Sum of composite board lengths (each board spans the full width)
    pub composite_board_length_m: Meters,
}

/// Result of one geometry build.
///
/// Built fresh every time; nothing is shared with a previous build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub material: TreadMaterial,
    pub frame_color: FrameColor,
    pub step_count: usize,
    pub reinforcement_count: u32,
    /// Length of the longitudinal base beams
    pub total_depth: f64,
    /// Translation a host can apply to centre the staircase on the origin
    pub display_offset: Vec3,
    pub frame: Vec<StructuralElement>,
    pub coverings: Vec<CoveringElement>,
    pub fasteners: Vec<Fastener>,
}

impl Model {
    /// Members of a given kind
    pub fn members(&self, kind: MemberKind) -> impl Iterator<Item = &StructuralElement> {
        self.frame.iter().filter(move |e| e.kind == kind)
    }

    /// Number of members matching a predicate on their kind
    pub fn count_members(&self, pred: impl Fn(&MemberKind) -> bool) -> usize {
        self.frame.iter().filter(|e| pred(&e.kind)).count()
    }

    /// Covering pieces of a given kind
    pub fn coverings_of(&self, kind: CoveringElementKind) -> impl Iterator<Item = &CoveringElement> {
        self.coverings.iter().filter(move |c| c.kind == kind)
    }

    /// Members belonging to step `index`
    pub fn step_members(&self, index: usize) -> impl Iterator<Item = &StructuralElement> {
        self.frame.iter().filter(move |e| e.step == Some(index))
    }

    /// A copy with the frame repainted.
    ///
    /// Frame members and grated covering take the new frame color.
    /// Composite boards and fasteners keep their color.
    pub fn recolor(&self, frame_color: FrameColor) -> Model {
        let frame_rgb = frame_color.palette().frame;
        let mut model = self.clone();
        model.frame_color = frame_color;
        for member in &mut model.frame {
            member.color = frame_rgb;
        }
        for covering in &mut model.coverings {
            if covering.color_role == ColorRole::Frame {
                covering.color = frame_rgb;
            }
        }
        model
    }

    /// Count elements and total up profile and board lengths
    pub fn summary(&self) -> ModelSummary {
        let count = |pred: fn(&MemberKind) -> bool| self.count_members(pred);
        let frame_profile_length = Millimeters(self.frame.iter().map(StructuralElement::length).sum());
        let board_length_mm: f64 = self
            .coverings_of(CoveringElementKind::CompositeBoard)
            .map(|b| b.dimensions.x)
            .sum();

        ModelSummary {
            step_count: self.step_count,
            reinforcement_count: self.reinforcement_count,
            base_beams: count(|k| matches!(k, MemberKind::BaseBeam(_))),
            step_beams: count(|k| matches!(k, MemberKind::StepBeam(_))),
            side_supports: count(|k| matches!(k, MemberKind::SideSupport(_))),
            stands: count(|k| matches!(k, MemberKind::Stand(_))),
            reinforcements: count(|k| matches!(k, MemberKind::Reinforcement(_))),
            depth_reinforcements: count(|k| matches!(k, MemberKind::DepthReinforcement)),
            composite_boards: self.coverings_of(CoveringElementKind::CompositeBoard).count(),
            grated_panels: self.coverings_of(CoveringElementKind::GratedPanel).count(),
            grid_lines: self.coverings_of(CoveringElementKind::GridLine).count(),
            bolts: self.fasteners.len(),
            nuts: self.fasteners.len(),
            frame_profile_length,
            frame_profile_length_m: frame_profile_length.into(),
            composite_board_length_m: Millimeters(board_length_mm).into(),
        }
    }
}
