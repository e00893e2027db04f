//! Bolts holding composite boards to the side supports.
//!
//! Every board gets one bolt near each end. A bolt is a short head cylinder
//! sitting on the board with a shank running down through it. Nuts are
//! implied, one per bolt, and only show up in the summary counts.

use super::elements::{Cylinder, Side};
use super::layout::ModelSink;
use super::vector::Vec3;

/// Distance of a bolt from the board end (mm)
pub const BOLT_EDGE_INSET_MM: f64 = 10.0;

pub const BOLT_HEAD_RADIUS_MM: f64 = 4.0;
pub const BOLT_HEAD_HEIGHT_MM: f64 = 2.0;
pub const BOLT_SHANK_RADIUS_MM: f64 = 2.0;
pub const BOLT_SHANK_LENGTH_MM: f64 = 30.0;

/// Head and shank of a bolt whose head centre is at `head_center`.
pub fn bolt_geometry(head_center: Vec3) -> (Cylinder, Cylinder) {
    let head = Cylinder {
        center: head_center,
        radius: BOLT_HEAD_RADIUS_MM,
        height: BOLT_HEAD_HEIGHT_MM,
    };
    let shank = Cylinder {
        center: head_center - Vec3::new(0.0, BOLT_SHANK_LENGTH_MM / 2.0, 0.0),
        radius: BOLT_SHANK_RADIUS_MM,
        height: BOLT_SHANK_LENGTH_MM,
    };
    (head, shank)
}

/// Two bolts for board `board` of `step`, centred at depth `z` on a board
/// of full `width` whose top face is at `board_top`.
pub(crate) fn add_bolt_pair(sink: &mut ModelSink, step: usize, board: usize, width: f64, board_top: f64, z: f64) {
    let y = board_top + BOLT_HEAD_HEIGHT_MM / 2.0;
    for side in Side::BOTH {
        let position = Vec3::new(side.sign() * (width / 2.0 - BOLT_EDGE_INSET_MM), y, z);
        let (head, shank) = bolt_geometry(position);
        sink.fastener(step, board, side, position, head, shank);
    }
}
