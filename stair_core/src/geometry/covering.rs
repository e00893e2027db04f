//! Tread covering: composite boards or a grated sheet per step.
//!
//! ## Board tiling
//!
//! Boards are 150 mm wide with a 5 mm gap. A step of depth `d` holds
//! `n = floor((d + gap) / (width + gap))` full boards; whatever is left past
//! the last full board becomes one narrower remainder board laid directly
//! against it. A step shallower than one board gets a single board cut to
//! the step depth.
//!
//! ## Grated sheet
//!
//! A 2 mm panel fills the inside of the step frame, with a 30 mm grid of
//! 1 mm lines drawn over it.

use serde::{Deserialize, Serialize};

use super::elements::CoveringElementKind;
use super::fasteners::add_bolt_pair;
use super::layout::{Layout, ModelSink, SIZE_EPSILON};
use super::vector::Vec3;
use crate::materials::TreadCovering;

/// Composite board width (mm)
pub const BOARD_WIDTH_MM: f64 = 150.0;

/// Composite board thickness (mm)
pub const BOARD_THICKNESS_MM: f64 = 25.0;

/// Gap between neighbouring boards (mm)
pub const BOARD_GAP_MM: f64 = 5.0;

/// Boards overhang the front of the step frame by this much (mm)
pub const BOARD_FRONT_OVERHANG_MM: f64 = 10.0;

/// Grated panel thickness (mm)
pub const GRATE_PANEL_THICKNESS_MM: f64 = 2.0;

/// Grid pitch of the grated sheet (mm)
pub const GRATE_GRID_PITCH_MM: f64 = 30.0;

/// One board position across the step depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardSlot {
    /// Distance of the board's front edge from the step's front edge
    pub offset: f64,
    pub width: f64,
}

/// Result of tiling one step with composite boards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub full_boards: usize,
    /// Width of the trailing narrow board, if any
    pub remainder: Option<f64>,
    pub boards: Vec<BoardSlot>,
}

/// Tile a step of `depth_mm` with boards, front to back.
///
/// # Example
///
/// ```rust
/// use stair_core::geometry::layout_boards;
///
/// let layout = layout_boards(400.0);
/// assert_eq!(layout.full_boards, 2);
/// assert_eq!(layout.remainder, Some(95.0));
///
/// let exact = layout_boards(305.0);
/// assert_eq!(exact.full_boards, 2);
/// assert_eq!(exact.remainder, None);
/// ```
pub fn layout_boards(depth_mm: f64) -> BoardLayout {
    if !(depth_mm > SIZE_EPSILON) {
        return BoardLayout {
            full_boards: 0,
            remainder: None,
            boards: Vec::new(),
        };
    }

    let pitch = BOARD_WIDTH_MM + BOARD_GAP_MM;
    let full_boards = ((depth_mm + BOARD_GAP_MM) / pitch).floor() as usize;

    if full_boards == 0 {
        return BoardLayout {
            full_boards: 0,
            remainder: Some(depth_mm),
            boards: vec![BoardSlot {
                offset: 0.0,
                width: depth_mm,
            }],
        };
    }

    let mut boards: Vec<BoardSlot> = (0..full_boards)
        .map(|k| BoardSlot {
            offset: k as f64 * pitch,
            width: BOARD_WIDTH_MM,
        })
        .collect();

    let covered = full_boards as f64 * BOARD_WIDTH_MM + (full_boards - 1) as f64 * BOARD_GAP_MM;
    let rest = depth_mm - covered;
    let remainder = (rest > SIZE_EPSILON).then_some(rest);
    if let Some(width) = remainder {
        boards.push(BoardSlot { offset: covered, width });
    }

    BoardLayout {
        full_boards,
        remainder,
        boards,
    }
}

/// Lay the covering on every step.
pub(crate) fn add_coverings(layout: &Layout, sink: &mut ModelSink) {
    for i in 0..layout.steps {
        match layout.spec.material.covering_for_step(i) {
            TreadCovering::CompositeBoards => add_boards(layout, sink, i),
            TreadCovering::GratedSheet => add_grating(layout, sink, i),
        }
    }
}

fn add_boards(layout: &Layout, sink: &mut ModelSink, step: usize) {
    let w = layout.width;
    let elevation = layout.spec.board_elevation_mm();
    let y = layout.step_top(step) + BOARD_THICKNESS_MM / 2.0 + elevation;
    let z0 = layout.step_z(step);

    for (index, slot) in layout_boards(layout.step_depth(step)).boards.iter().enumerate() {
        let z = z0 + slot.offset + slot.width / 2.0 - BOARD_FRONT_OVERHANG_MM;
        sink.covering(
            CoveringElementKind::CompositeBoard,
            step,
            Vec3::new(w, BOARD_THICKNESS_MM, slot.width),
            Vec3::new(0.0, y, z),
        );
        let board_top = layout.step_top(step) + BOARD_THICKNESS_MM + elevation;
        add_bolt_pair(sink, step, index, w, board_top, z);
    }
}

fn add_grating(layout: &Layout, sink: &mut ModelSink, step: usize) {
    let t = layout.profile;
    let inner_w = layout.width - 2.0 * t;
    let inner_d = layout.step_depth(step) - 2.0 * t;
    let y = layout.step_top(step) + GRATE_PANEL_THICKNESS_MM / 2.0;
    let z0 = layout.step_z(step) + t;

    sink.covering(
        CoveringElementKind::GratedPanel,
        step,
        Vec3::new(inner_w, GRATE_PANEL_THICKNESS_MM, inner_d),
        Vec3::new(0.0, y, z0 + inner_d / 2.0),
    );

    if !(inner_w > SIZE_EPSILON && inner_d > SIZE_EPSILON) {
        return;
    }

    let line_height = GRATE_PANEL_THICKNESS_MM + 1.0;
    let left = -layout.width / 2.0 + t;
    for k in 0..=(inner_w / GRATE_GRID_PITCH_MM).floor() as usize {
        sink.covering(
            CoveringElementKind::GridLine,
            step,
            Vec3::new(1.0, line_height, inner_d),
            Vec3::new(left + k as f64 * GRATE_GRID_PITCH_MM, y, z0 + inner_d / 2.0),
        );
    }
    for k in 0..=(inner_d / GRATE_GRID_PITCH_MM).floor() as usize {
        sink.covering(
            CoveringElementKind::GridLine,
            step,
            Vec3::new(inner_w, line_height, 1.0),
            Vec3::new(0.0, y, z0 + k as f64 * GRATE_GRID_PITCH_MM),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::TreadMaterial;
    use crate::policy::GeometryPolicy;
    use crate::staircase::StaircaseSpec;

    fn build(spec: &StaircaseSpec) -> ModelSink {
        let policy = GeometryPolicy::eco();
        let layout = Layout::new(spec, &policy);
        let mut sink = ModelSink::new(layout.palette);
        add_coverings(&layout, &mut sink);
        sink
    }

    #[test]
    fn test_tiling_regular_step() {
        let layout = layout_boards(400.0);
        assert_eq!(layout.full_boards, 2);
        assert_eq!(layout.boards.len(), 3);
        assert_eq!(layout.boards[1].offset, 155.0);
        assert_eq!(layout.boards[2].offset, 305.0);
        assert_eq!(layout.boards[2].width, 95.0);
    }

    #[test]
    fn test_tiling_exact_fit() {
        let exact = layout_boards(305.0 + 150.0 + 5.0);
        assert_eq!(exact.full_boards, 3);
        assert!(exact.remainder.is_none());
        assert_eq!(exact.boards.last().unwrap().offset, 310.0);
    }

    #[test]
    fn test_tiling_shallow_step() {
        let layout = layout_boards(120.0);
        assert_eq!(layout.full_boards, 0);
        assert_eq!(layout.boards, vec![BoardSlot { offset: 0.0, width: 120.0 }]);

        assert!(layout_boards(0.0).boards.is_empty());
    }

    #[test]
    fn test_tiling_covers_depth() {
        for depth in [150.0, 151.0, 300.0, 305.0, 600.0, 1234.5] {
            let layout = layout_boards(depth);
            let last = layout.boards.last().unwrap();
            assert!((last.offset + last.width - depth).abs() < 1e-9, "depth {depth}");
        }
    }

    #[test]
    fn test_dpk_boards_and_bolts() {
        let spec = StaircaseSpec::new(1000.0, 800.0, 200.0, TreadMaterial::Dpk);
        let sink = build(&spec);
        // two boards per 305 mm step
        assert_eq!(sink.coverings.len(), 8);
        assert_eq!(sink.fasteners.len(), 16);

        let first = &sink.coverings[0];
        // 200 + 12.5 + 10
        assert!((first.position.y - 222.5).abs() < 1e-9);
        // 0 + 75 - 10
        assert!((first.position.z - 65.0).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_material_first_step_grated() {
        let spec = StaircaseSpec::new(1000.0, 600.0, 200.0, TreadMaterial::DpkPlusOnePvl);
        let sink = build(&spec);
        assert!(sink
            .coverings
            .iter()
            .filter(|c| c.step == 0)
            .all(|c| c.kind != CoveringElementKind::CompositeBoard));
        assert!(sink
            .coverings
            .iter()
            .filter(|c| c.step > 0)
            .all(|c| c.kind == CoveringElementKind::CompositeBoard));
    }

    #[test]
    fn test_grid_line_counts() {
        let spec = StaircaseSpec::new(1000.0, 200.0, 200.0, TreadMaterial::Pvl);
        let sink = build(&spec);
        let panels = sink
            .coverings
            .iter()
            .filter(|c| c.kind == CoveringElementKind::GratedPanel)
            .count();
        assert_eq!(panels, 1);

        // inner 960 x 260: floor(960/30)+1 + floor(260/30)+1
        let lines = sink
            .coverings
            .iter()
            .filter(|c| c.kind == CoveringElementKind::GridLine)
            .count();
        assert_eq!(lines, 33 + 9);
        assert!(sink.fasteners.is_empty());
    }
}
