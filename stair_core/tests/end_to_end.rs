//! End-to-end scenarios: form input through the builder to the model, and
//! service answers fed back through a session.

use approx::assert_relative_eq;

use stair_core::geometry::{BaseBeamRole, ColorRole, MemberKind, ReinforcementRole};
use stair_core::materials::{FrameColor, TreadMaterial};
use stair_core::service::{interpret_response, CalculateRequest};
use stair_core::session::{ApplyOutcome, Session};
use stair_core::validation::{validate_request, ValidationLimits};
use stair_core::{build, GeometryPolicy, StaircaseSpec};

fn service_body(dimensions: &StaircaseSpec) -> String {
    serde_json::json!({
        "dimensions": dimensions,
        "total_length": {"mm": 21340, "m": 21.34},
        "paint": {"total_area": 1.71, "total_weight": 256.5},
        "additional_materials": {"dpk_color": "Венге", "dpk_boards": 8, "bolts_count": 16, "nuts_count": 16}
    })
    .to_string()
}

#[test]
fn composite_staircase_one_metre_wide() {
    let spec = StaircaseSpec::new(1000.0, 800.0, 200.0, TreadMaterial::Dpk);
    let policy = GeometryPolicy::eco();
    let model = build(&spec, &policy).unwrap();

    assert_eq!(model.step_count, 4);
    assert_eq!(model.reinforcement_count, 1);

    let columns: Vec<_> = model
        .members(MemberKind::Reinforcement(ReinforcementRole::Column))
        .collect();
    assert_eq!(columns.len(), 4);
    for column in &columns {
        assert_relative_eq!(column.position.x, 0.0, epsilon = 1e-9);
    }

    let mut bar_steps: Vec<_> = model
        .members(MemberKind::Reinforcement(ReinforcementRole::Horizontal))
        .filter_map(|e| e.step)
        .collect();
    bar_steps.sort_unstable();
    assert_eq!(bar_steps, vec![0, 1, 2, 3]);
}

#[test]
fn grated_staircase_with_deep_landing() {
    let spec = StaircaseSpec::new(1600.0, 1000.0, 200.0, TreadMaterial::Pvl).with_platform(320.0);
    let model = build(&spec, &GeometryPolicy::eco()).unwrap();

    assert_eq!(model.step_count, 5);
    let depth: Vec<_> = model.members(MemberKind::DepthReinforcement).collect();
    assert!(!depth.is_empty());
    assert!(depth.iter().all(|e| e.step == Some(4)));

    assert_eq!(
        model
            .members(MemberKind::BaseBeam(BaseBeamRole::LongitudinalMiddle))
            .count(),
        1
    );
    assert!(model.fasteners.is_empty());
}

#[test]
fn form_to_model_through_validation() {
    let request = CalculateRequest::new(1000.0, 800.0, 4, TreadMaterial::Dpk).with_frame_color(FrameColor::Ral8017);
    validate_request(&request, &ValidationLimits::narrow()).unwrap();

    let policy = GeometryPolicy::eco();
    let resolved = request.resolved(&policy);
    let spec = StaircaseSpec::from_request(&resolved);
    let model = build(&spec, &policy).unwrap();

    assert_eq!(model.step_count, 4);
    assert_eq!(model.frame_color, FrameColor::Ral8017);
    assert_eq!(model.frame[0].color, FrameColor::Ral8017.palette().frame);
}

#[test]
fn out_of_range_form_never_reaches_builder() {
    let request = CalculateRequest::new(250.0, 800.0, 4, TreadMaterial::Dpk);
    let err = validate_request(&request, &ValidationLimits::wide()).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");
    assert!(err.user_message().contains("Width must be between 300 and 6000 mm"));
}

#[test]
fn echoed_dimensions_build_the_same_model() {
    let spec = StaircaseSpec::new(1200.0, 900.0, 180.0, TreadMaterial::DpkPlusOnePvl)
        .with_reinforcements(2)
        .with_platform(500.0);
    let policy = GeometryPolicy::optima();
    let local = build(&spec, &policy).unwrap();

    let response = interpret_response(200, &service_body(&spec)).unwrap();
    let mut session = Session::new(policy);
    let ticket = session.begin_submission();
    assert_eq!(session.apply_response(ticket, response).unwrap(), ApplyOutcome::Applied);

    assert_eq!(session.model(), Some(&local));
    assert!(session.last_response().is_some());
}

#[test]
fn late_answer_does_not_replace_newer_model() {
    let policy = GeometryPolicy::eco();
    let older = StaircaseSpec::new(1000.0, 800.0, 200.0, TreadMaterial::Dpk);
    let newer = StaircaseSpec::new(1400.0, 600.0, 200.0, TreadMaterial::Pvl);

    let mut session = Session::new(policy);
    let first = session.begin_submission();
    let second = session.begin_submission();

    let newer_response = interpret_response(200, &service_body(&newer)).unwrap();
    let older_response = interpret_response(200, &service_body(&older)).unwrap();

    session.apply_response(second, newer_response).unwrap();
    let outcome = session.apply_response(first, older_response).unwrap();

    assert_eq!(outcome, ApplyOutcome::Stale { ticket: first, current: second });
    assert_eq!(session.model().unwrap().material, TreadMaterial::Pvl);
    assert_eq!(session.spec(), Some(&newer));
}

#[test]
fn recolor_keeps_geometry_and_board_color() {
    let spec = StaircaseSpec::new(1000.0, 800.0, 200.0, TreadMaterial::DpkPlusOnePvl);
    let model = build(&spec, &GeometryPolicy::eco()).unwrap();
    let repainted = model.recolor(FrameColor::Ral7024);
    let frame_rgb = FrameColor::Ral7024.palette().frame;

    assert_eq!(repainted.frame.len(), model.frame.len());
    assert!(repainted.frame.iter().all(|e| e.color == frame_rgb));
    for (before, after) in model.coverings.iter().zip(&repainted.coverings) {
        assert_eq!(before.position, after.position);
        match after.color_role {
            ColorRole::Frame => assert_eq!(after.color, frame_rgb),
            _ => assert_eq!(after.color, before.color),
        }
    }
    assert_eq!(repainted.fasteners, model.fasteners);
}

#[test]
fn server_error_message_reaches_the_user() {
    let err = interpret_response(400, r#"{"error": "Неверный материал"}"#).unwrap_err();
    assert_eq!(err.user_message(), "Неверный материал");
    assert!(!err.is_recoverable());
}

#[test]
fn model_json_is_stable() {
    let spec = StaircaseSpec::new(900.0, 600.0, 200.0, TreadMaterial::Dpk);
    let a = serde_json::to_string(&build(&spec, &GeometryPolicy::eco()).unwrap()).unwrap();
    let b = serde_json::to_string(&build(&spec, &GeometryPolicy::eco()).unwrap()).unwrap();
    assert_eq!(a, b);
}
