//! Base frame, step frames and corner stands.
//!
//! The frame is a cantilevered stack: every step has front stands down to
//! the ground, but only the top step closes the rear with back stands.

use super::elements::{BaseBeamRole, MemberKind, Side, StandCorner, StepEdge};
use super::layout::{Layout, ModelSink};
use super::vector::Vec3;

/// Ground frame: two longitudinal beams along the sides, front and back
/// cross beams, and a middle longitudinal beam on wide staircases.
pub(crate) fn add_base(layout: &Layout, sink: &mut ModelSink) {
    let (t, c, d) = (layout.profile, layout.cross, layout.total_depth);
    let longitudinal = Vec3::new(c, t, d);

    for side in Side::BOTH {
        sink.member(
            MemberKind::BaseBeam(BaseBeamRole::Longitudinal(side)),
            None,
            longitudinal,
            Vec3::new(layout.side_x(side), 0.0, d / 2.0),
        );
    }

    let transverse = Vec3::new(layout.width, t, c);
    sink.member(
        MemberKind::BaseBeam(BaseBeamRole::TransverseFront),
        None,
        transverse,
        Vec3::new(0.0, 0.0, layout.shift),
    );
    sink.member(
        MemberKind::BaseBeam(BaseBeamRole::TransverseBack),
        None,
        transverse,
        Vec3::new(0.0, 0.0, d + layout.shift),
    );

    if layout.width >= layout.policy.wide_stiffener_threshold_mm {
        sink.member(
            MemberKind::BaseBeam(BaseBeamRole::LongitudinalMiddle),
            None,
            longitudinal,
            Vec3::new(0.0, 0.0, d / 2.0),
        );
    }
}

/// Per-step rectangle (front, back, two sides) and the stands holding it up.
pub(crate) fn add_step_frames(layout: &Layout, sink: &mut ModelSink) {
    let (t, c) = (layout.profile, layout.cross);

    for i in 0..layout.steps {
        let depth = layout.step_depth(i);
        let y = layout.step_top(i);
        let z = layout.step_z(i);

        let transverse = Vec3::new(layout.width, t, c);
        sink.member(
            MemberKind::StepBeam(StepEdge::Front),
            Some(i),
            transverse,
            Vec3::new(0.0, y, z + layout.shift),
        );
        sink.member(
            MemberKind::StepBeam(StepEdge::Back),
            Some(i),
            transverse,
            Vec3::new(0.0, y, z + depth - t - layout.shift),
        );

        let side_support = Vec3::new(c, t, depth - c);
        for side in Side::BOTH {
            sink.member(
                MemberKind::SideSupport(side),
                Some(i),
                side_support,
                Vec3::new(layout.side_x(side), y, z + (depth - t) / 2.0),
            );
        }

        let stand = Vec3::new(c, y, t);
        let front = [(Side::Left, StandCorner::FrontLeft), (Side::Right, StandCorner::FrontRight)];
        for (side, corner) in front {
            sink.member(
                MemberKind::Stand(corner),
                Some(i),
                stand,
                Vec3::new(layout.side_x(side), y / 2.0, z),
            );
        }

        if layout.is_last(i) {
            let back = [(Side::Left, StandCorner::BackLeft), (Side::Right, StandCorner::BackRight)];
            for (side, corner) in back {
                sink.member(
                    MemberKind::Stand(corner),
                    Some(i),
                    stand,
                    Vec3::new(layout.side_x(side), y / 2.0, z + depth - t),
                );
            }
        }
    }
}
