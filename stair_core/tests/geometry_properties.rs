//! Property-based tests for staircase geometry using the `proptest` crate.

use approx::assert_abs_diff_eq;
use proptest::prelude::*;

use stair_core::geometry::covering::{BOARD_GAP_MM, BOARD_WIDTH_MM};
use stair_core::geometry::{build, layout_boards, ColorRole, CoveringElementKind, MemberKind, StandCorner};
use stair_core::materials::{FrameColor, TreadMaterial};
use stair_core::{GeometryPolicy, StaircaseSpec};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_material() -> impl Strategy<Value = TreadMaterial> {
    prop_oneof![
        Just(TreadMaterial::Dpk),
        Just(TreadMaterial::Pvl),
        Just(TreadMaterial::DpkPlusOnePvl),
    ]
}

fn arb_color() -> impl Strategy<Value = FrameColor> {
    prop_oneof![
        Just(FrameColor::Ral9005),
        Just(FrameColor::Ral8017),
        Just(FrameColor::Ral7024),
    ]
}

fn arb_policy() -> impl Strategy<Value = GeometryPolicy> {
    prop_oneof![Just(GeometryPolicy::eco()), Just(GeometryPolicy::optima())]
}

/// Width, height and step height inside the wide input range
fn arb_spec() -> impl Strategy<Value = StaircaseSpec> {
    (
        300.0f64..3000.0,
        100.0f64..2000.0,
        120.0f64..250.0,
        arb_material(),
        prop::option::of(200.0f64..1200.0),
    )
        .prop_map(|(width, height, step_height, material, platform)| {
            let spec = StaircaseSpec::new(width, height, step_height, material);
            match platform {
                Some(depth) => spec.with_platform(depth),
                None => spec,
            }
        })
}

const TOL: f64 = 1e-6;

// ---------------------------------------------------------------------------
// 1. One pair of front stands per step, never fewer than one step
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn front_stands_match_step_count(spec in arb_spec(), policy in arb_policy()) {
        let model = build(&spec, &policy).unwrap();
        let expected = ((spec.height / spec.step_height).round() as usize).max(1);

        prop_assert_eq!(model.step_count, expected);
        prop_assert_eq!(model.members(MemberKind::Stand(StandCorner::FrontLeft)).count(), expected);
        prop_assert_eq!(model.members(MemberKind::Stand(StandCorner::FrontRight)).count(), expected);
    }
}

// ---------------------------------------------------------------------------
// 2. Board tiling covers the depth with no gap or overlap
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn board_tiling_is_exact(depth in BOARD_WIDTH_MM..3000.0f64) {
        let layout = layout_boards(depth);
        let pitch = BOARD_WIDTH_MM + BOARD_GAP_MM;
        prop_assert_eq!(layout.full_boards, ((depth + BOARD_GAP_MM) / pitch).floor() as usize);

        let full = layout.full_boards as f64;
        let covered = full * BOARD_WIDTH_MM + (full - 1.0) * BOARD_GAP_MM + layout.remainder.unwrap_or(0.0);
        assert_abs_diff_eq!(covered, depth, epsilon = TOL);

        let last = layout.boards.last().unwrap();
        assert_abs_diff_eq!(last.offset + last.width, depth, epsilon = TOL);
        for board in &layout.boards {
            prop_assert!(board.width > 0.0);
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Back stands close the frame on the last step only
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn back_stands_only_on_last_step(spec in arb_spec(), policy in arb_policy()) {
        let model = build(&spec, &policy).unwrap();
        let last = model.step_count - 1;
        let back: Vec<_> = model
            .frame
            .iter()
            .filter(|e| matches!(e.kind, MemberKind::Stand(corner) if corner.is_back()))
            .collect();

        prop_assert_eq!(back.len(), 2);
        for stand in back {
            prop_assert_eq!(stand.step, Some(last));
        }
    }
}

// ---------------------------------------------------------------------------
// 4. Repainting touches frame-colored elements only
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn recolor_never_touches_boards(spec in arb_spec(), color in arb_color()) {
        let model = build(&spec, &GeometryPolicy::eco()).unwrap();
        let repainted = model.recolor(color);
        let frame_rgb = color.palette().frame;

        prop_assert!(repainted.frame.iter().all(|e| e.color == frame_rgb));
        for (before, after) in model.coverings.iter().zip(&repainted.coverings) {
            match after.kind {
                CoveringElementKind::CompositeBoard => {
                    prop_assert_eq!(after.color_role, ColorRole::CompositeBoard);
                    prop_assert_eq!(after.color, before.color);
                }
                CoveringElementKind::GratedPanel | CoveringElementKind::GridLine => {
                    prop_assert_eq!(after.color, frame_rgb);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 5. No element comes out with a zero or negative size
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn no_degenerate_elements(spec in arb_spec(), policy in arb_policy()) {
        let model = build(&spec, &policy).unwrap();
        for e in &model.frame {
            prop_assert!(e.dimensions.x > 0.0 && e.dimensions.y > 0.0 && e.dimensions.z > 0.0,
                "{:?} has size {:?}", e.kind, e.dimensions);
        }
        for c in &model.coverings {
            prop_assert!(c.dimensions.x > 0.0 && c.dimensions.y > 0.0 && c.dimensions.z > 0.0);
        }
    }
}

// ---------------------------------------------------------------------------
// 6. Depth reinforcement only under a deep grated landing
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn depth_reinforcement_rule(spec in arb_spec()) {
        let model = build(&spec, &GeometryPolicy::eco()).unwrap();
        let present = model.members(MemberKind::DepthReinforcement).count() > 0;
        let expected = spec.material == TreadMaterial::Pvl && spec.last_step_depth() > 305.0;
        prop_assert_eq!(present, expected);
    }
}
