//! # Text Reports
//!
//! Plain-text renderings of a service answer and of a locally built model.
//! Optional sections are printed only when they carry something.

use std::fmt::Write;

use crate::geometry::ModelSummary;
use crate::service::CalculateResponse;

/// Render the bill of materials the service returned.
///
/// # Example
///
/// ```rust
/// use stair_core::report::render_text;
/// use stair_core::service::interpret_response;
/// # let body = r#"{"dimensions": {"width": 1000, "height": 800, "step_height": 200,
/// #   "step_depth": 305, "profile_thickness": 20, "has_platform": false, "platform_depth": 0,
/// #   "reinforcements_count": 1, "material": "ДПК", "board_elevation": 10,
/// #   "paint_consumption": 150, "frame_color": "RAL9005"},
/// #   "total_length": {"mm": 21340, "m": 21.34}, "paint": {"total_area": 1.71, "total_weight": 256.5}}"#;
///
/// let response = interpret_response(200, body).unwrap();
/// let text = render_text(&response);
/// assert!(text.contains("Total profile length: 21340 mm (21.34 m)"));
/// assert!(!text.contains("Additional materials"));
/// ```
pub fn render_text(response: &CalculateResponse) -> String {
    let dims = &response.dimensions;
    let extra = &response.additional_materials;
    let mut out = String::new();

    let _ = writeln!(out, "Parameters:");
    let _ = writeln!(out, "  Material: {}", dims.material.code());
    let _ = writeln!(out, "  Frame color: {}", dims.frame_color.code());
    if dims.material.uses_composite_boards() {
        if let Some(color) = &extra.dpk_color {
            let _ = writeln!(out, "  Composite board color: {}", color);
        }
    }
    let _ = writeln!(out, "  Width: {} mm", dims.width);
    let _ = writeln!(out, "  Height: {} mm", dims.height);
    let _ = writeln!(out, "  Steps: {}", dims.step_count());

    let _ = writeln!(out);
    let _ = writeln!(out, "Metal frame:");
    let _ = writeln!(
        out,
        "  Total profile length: {} mm ({} m)",
        response.total_length.mm.value(),
        response.total_length.m.value()
    );
    let _ = writeln!(out, "  Paint area: {} m²", response.paint.total_area.value());
    let _ = writeln!(out, "  Paint weight: {} g", response.paint.total_weight.value());

    let mut rows = Vec::new();
    if let Some(length) = extra.dpk_length {
        rows.push(format!("Composite board length: {} m", length));
    }
    if let Some(boards) = extra.dpk_boards {
        rows.push(format!("Composite boards: {} pcs", boards));
    }
    if let Some(bolts) = extra.bolts_count {
        rows.push(format!("Bolts: {} pcs", bolts));
        rows.push(format!("Nuts: {} pcs", extra.nuts_count.unwrap_or(bolts)));
    }
    if !rows.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Additional materials:");
        for row in rows {
            let _ = writeln!(out, "  {}", row);
        }
    }

    out
}

/// Render element counts of a locally built model.
pub fn render_summary(summary: &ModelSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Model:");
    let _ = writeln!(out, "  Steps: {}", summary.step_count);
    let _ = writeln!(out, "  Reinforcement columns: {}", summary.reinforcement_count);
    let _ = writeln!(out, "  Base beams: {}", summary.base_beams);
    let _ = writeln!(out, "  Step beams: {}", summary.step_beams);
    let _ = writeln!(out, "  Side supports: {}", summary.side_supports);
    let _ = writeln!(out, "  Stands: {}", summary.stands);
    let _ = writeln!(out, "  Reinforcements: {}", summary.reinforcements);
    if summary.depth_reinforcements > 0 {
        let _ = writeln!(out, "  Depth reinforcements: {}", summary.depth_reinforcements);
    }
    let _ = writeln!(
        out,
        "  Frame profile: {:.0} mm ({:.2} m)",
        summary.frame_profile_length.value(),
        summary.frame_profile_length_m.value()
    );
    if summary.composite_boards > 0 {
        let _ = writeln!(
            out,
            "  Composite boards: {} ({:.2} m)",
            summary.composite_boards,
            summary.composite_board_length_m.value()
        );
        let _ = writeln!(out, "  Bolts: {}", summary.bolts);
        let _ = writeln!(out, "  Nuts: {}", summary.nuts);
    }
    if summary.grated_panels > 0 {
        let _ = writeln!(
            out,
            "  Grated panels: {} ({} grid lines)",
            summary.grated_panels, summary.grid_lines
        );
    }
    out
}
