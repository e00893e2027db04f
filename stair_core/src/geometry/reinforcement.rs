//! Intermediate reinforcement columns, horizontal bars and landing
//! depth reinforcement.
//!
//! Every column position from [`Layout::columns`] gets one stand per step.
//! Whether a step also gets a horizontal bar under the tread depends only on
//! the material and the step index, see
//! [`TreadMaterial::needs_horizontal_reinforcement`](crate::materials::TreadMaterial::needs_horizontal_reinforcement).

use super::elements::{MemberKind, ReinforcementRole};
use super::layout::{Layout, ModelSink};
use super::vector::Vec3;

/// Column stands, rear columns and horizontal bars.
pub(crate) fn add_reinforcements(layout: &Layout, sink: &mut ModelSink) {
    let (t, c) = (layout.profile, layout.cross);
    let sh = layout.spec.step_height;
    let sd = layout.spec.step_depth;
    let drop = layout.policy.joint_offset(t);
    let material = layout.spec.material;

    for &x in &layout.columns {
        for i in 0..layout.steps {
            // Step 0 stands on the ground; the rest sit on the previous step frame.
            let (y, z) = if i == 0 {
                (sh / 2.0, 0.0)
            } else {
                (i as f64 * sh - drop + sh / 2.0, i as f64 * sd)
            };
            sink.member(
                MemberKind::Reinforcement(ReinforcementRole::Column),
                Some(i),
                Vec3::new(c, sh, t),
                Vec3::new(x, y, z),
            );

            if material.needs_horizontal_reinforcement(i) {
                let depth = layout.step_depth(i);
                sink.member(
                    MemberKind::Reinforcement(ReinforcementRole::Horizontal),
                    Some(i),
                    Vec3::new(c, t, depth - t),
                    Vec3::new(x, layout.step_top(i), layout.step_z(i) + (depth - t) / 2.0),
                );
            }
        }

        if layout.steps > 1 {
            let n = layout.steps;
            let full_height = n as f64 * sh;
            let last = n - 1;
            sink.member(
                MemberKind::Reinforcement(ReinforcementRole::RearColumn),
                None,
                Vec3::new(c, full_height, t),
                Vec3::new(x, full_height / 2.0, layout.step_z(last) + layout.step_depth(last) - t),
            );
        }
    }
}

/// Cross-members under a deep grated landing, one per column.
pub(crate) fn add_depth_reinforcements(layout: &Layout, sink: &mut ModelSink) {
    let last = layout.steps - 1;
    let depth = layout.step_depth(last);
    if !layout.spec.material.needs_depth_reinforcement(depth) {
        return;
    }

    let t = layout.profile;
    let y = layout.step_top(last);
    let z = layout.step_z(last) + depth / 2.0;
    for &x in &layout.columns {
        sink.member(
            MemberKind::DepthReinforcement,
            Some(last),
            Vec3::new(t, t, depth - 2.0 * t),
            Vec3::new(x, y, z),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::TreadMaterial;
    use crate::policy::GeometryPolicy;
    use crate::staircase::StaircaseSpec;

    fn build(spec: &StaircaseSpec, policy: &GeometryPolicy) -> ModelSink {
        let layout = Layout::new(spec, policy);
        let mut sink = ModelSink::new(layout.palette);
        add_reinforcements(&layout, &mut sink);
        add_depth_reinforcements(&layout, &mut sink);
        sink
    }

    fn count(sink: &ModelSink, kind: MemberKind) -> usize {
        sink.frame.iter().filter(|e| e.kind == kind).count()
    }

    fn horizontal_steps(sink: &ModelSink) -> Vec<usize> {
        sink.frame
            .iter()
            .filter(|e| e.kind == MemberKind::Reinforcement(ReinforcementRole::Horizontal))
            .filter_map(|e| e.step)
            .collect()
    }

    #[test]
    fn test_columns_per_step_and_rear() {
        let spec = StaircaseSpec::new(1000.0, 800.0, 200.0, TreadMaterial::Dpk);
        let sink = build(&spec, &GeometryPolicy::eco());
        assert_eq!(count(&sink, MemberKind::Reinforcement(ReinforcementRole::Column)), 4);
        assert_eq!(count(&sink, MemberKind::Reinforcement(ReinforcementRole::RearColumn)), 1);

        let rear = sink
            .frame
            .iter()
            .find(|e| e.kind == MemberKind::Reinforcement(ReinforcementRole::RearColumn))
            .unwrap();
        assert!((rear.dimensions.y - 800.0).abs() < 1e-9);
        assert!(rear.position.x.abs() < 1e-9);
    }

    #[test]
    fn test_single_step_has_no_rear_column() {
        let spec = StaircaseSpec::new(1000.0, 200.0, 200.0, TreadMaterial::Dpk);
        let sink = build(&spec, &GeometryPolicy::eco());
        assert_eq!(count(&sink, MemberKind::Reinforcement(ReinforcementRole::RearColumn)), 0);
        assert_eq!(count(&sink, MemberKind::Reinforcement(ReinforcementRole::Column)), 1);
    }

    #[test]
    fn test_horizontal_presence_by_material() {
        let policy = GeometryPolicy::eco();

        let dpk = build(&StaircaseSpec::new(1000.0, 800.0, 200.0, TreadMaterial::Dpk), &policy);
        assert_eq!(horizontal_steps(&dpk), vec![0, 1, 2, 3]);

        let pvl = build(&StaircaseSpec::new(1000.0, 800.0, 200.0, TreadMaterial::Pvl), &policy);
        assert!(horizontal_steps(&pvl).is_empty());

        let mixed = build(
            &StaircaseSpec::new(1000.0, 800.0, 200.0, TreadMaterial::DpkPlusOnePvl),
            &policy,
        );
        assert_eq!(horizontal_steps(&mixed), vec![1, 2, 3]);
    }

    #[test]
    fn test_joint_offset_lowers_upper_stands() {
        let spec = StaircaseSpec::new(1000.0, 800.0, 200.0, TreadMaterial::Dpk);
        let mut policy = GeometryPolicy::eco();
        let plain = build(&spec, &policy);
        policy.joint_offset_enabled = true;
        let offset = build(&spec, &policy);

        let columns = |sink: &ModelSink| -> Vec<f64> {
            sink.frame
                .iter()
                .filter(|e| e.kind == MemberKind::Reinforcement(ReinforcementRole::Column))
                .map(|e| e.position.y)
                .collect()
        };
        let (a, b) = (columns(&plain), columns(&offset));
        assert_eq!(a[0], b[0]);
        for i in 1..a.len() {
            assert!((a[i] - b[i] - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_depth_reinforcement_on_deep_grated_landing() {
        let spec = StaircaseSpec::new(1600.0, 1000.0, 200.0, TreadMaterial::Pvl).with_platform(320.0);
        let sink = build(&spec, &GeometryPolicy::eco());
        // formula A at 1600 mm gives three columns
        assert_eq!(count(&sink, MemberKind::DepthReinforcement), 3);

        let member = sink
            .frame
            .iter()
            .find(|e| e.kind == MemberKind::DepthReinforcement)
            .unwrap();
        assert_eq!(member.step, Some(4));
        assert!((member.dimensions.z - 280.0).abs() < 1e-9);
        assert!((member.position.z - (4.0 * 300.0 + 160.0)).abs() < 1e-9);
    }

    #[test]
    fn test_no_depth_reinforcement_at_threshold_or_other_material() {
        let policy = GeometryPolicy::eco();
        let at_threshold = StaircaseSpec::new(1000.0, 800.0, 200.0, TreadMaterial::Pvl).with_platform(305.0);
        assert_eq!(count(&build(&at_threshold, &policy), MemberKind::DepthReinforcement), 0);

        let dpk = StaircaseSpec::new(1000.0, 800.0, 200.0, TreadMaterial::Dpk).with_platform(900.0);
        assert_eq!(count(&build(&dpk, &policy), MemberKind::DepthReinforcement), 0);
    }
}
