//! # Calculation Service Contract
//!
//! Request and response records of the remote bill-of-materials service
//! (`POST /api/calculate`), plus [`interpret_response`], which turns a raw
//! HTTP status and body into either a validated [`CalculateResponse`] or a
//! [`StairError`]. Transport lives in the CLI; this module never touches
//! the network.
//!
//! The response's `dimensions` object deserializes straight into a
//! [`StaircaseSpec`], so whatever the service echoes back can be handed to
//! the geometry builder without translation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{StairError, StairResult};
use crate::materials::{FrameColor, TreadMaterial};
use crate::policy::GeometryPolicy;
use crate::staircase::StaircaseSpec;
use crate::units::{Grams, Meters, Millimeters, SquareMeters};

/// Path of the calculation endpoint, relative to the service base URL
pub const CALCULATE_PATH: &str = "/api/calculate";

/// Paint consumption used when the caller gives none (g/m²)
pub const DEFAULT_PAINT_CONSUMPTION: f64 = 150.0;

/// Message used when an error response carries no `error` field
pub const FALLBACK_SERVER_MESSAGE: &str = "Server error";

/// Form input submitted to the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateRequest {
    pub width: f64,
    pub height: f64,
    pub steps: u32,
    pub material: TreadMaterial,
    pub has_platform: bool,
    /// Sent as 0 when there is no platform
    pub platform_depth: f64,
    /// 0 asks for the count derived from width
    pub reinforcements_count: u32,
    pub paint_consumption: f64,
    pub frame_color: FrameColor,
}

impl CalculateRequest {
    pub fn new(width: f64, height: f64, steps: u32, material: TreadMaterial) -> Self {
        CalculateRequest {
            width,
            height,
            steps,
            material,
            has_platform: false,
            platform_depth: 0.0,
            reinforcements_count: 0,
            paint_consumption: DEFAULT_PAINT_CONSUMPTION,
            frame_color: FrameColor::default(),
        }
    }

    pub fn with_platform(mut self, depth: f64) -> Self {
        self.has_platform = true;
        self.platform_depth = depth;
        self
    }

    pub fn with_reinforcements(mut self, count: u32) -> Self {
        self.reinforcements_count = count;
        self
    }

    pub fn with_frame_color(mut self, color: FrameColor) -> Self {
        self.frame_color = color;
        self
    }

    pub fn with_paint_consumption(mut self, grams_per_m2: f64) -> Self {
        self.paint_consumption = grams_per_m2;
        self
    }

    /// Copy with a derived reinforcement count filled in where none was given.
    ///
    /// The service always receives a concrete column count, so it prices the
    /// same frame the local builder draws.
    pub fn resolved(&self, policy: &GeometryPolicy) -> Self {
        let mut request = self.clone();
        if request.reinforcements_count == 0 {
            request.reinforcements_count = policy.default_reinforcement_count(self.width);
        }
        if !request.has_platform {
            request.platform_depth = 0.0;
        }
        request
    }

    /// Step height implied by the form
    pub fn step_height(&self) -> f64 {
        self.height / self.steps.max(1) as f64
    }
}

/// Total frame profile length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalLength {
    pub mm: Millimeters,
    pub m: Meters,
}

/// Paint estimate for the frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintEstimate {
    pub total_area: SquareMeters,
    pub total_weight: Grams,
}

/// Optional extras; each field is present only when it applies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalMaterials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpk_color: Option<String>,
    /// m
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpk_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpk_boards: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bolts_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nuts_count: Option<u32>,
}

/// Successful service answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateResponse {
    /// Echo of the dimensions the service computed with
    pub dimensions: StaircaseSpec,
    pub total_length: TotalLength,
    pub paint: PaintEstimate,
    #[serde(default)]
    pub additional_materials: AdditionalMaterials,
}

/// Body of a non-2xx answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    pub error: String,
}

const REQUIRED_FIELDS: [&str; 3] = ["dimensions", "total_length", "paint"];

/// Turn an HTTP status and body into a response or an error.
///
/// Non-2xx statuses become [`StairError::ServerError`] carrying the body's
/// `error` string verbatim. A 2xx body missing required fields, or echoing
/// dimensions no frame can be built from, becomes
/// [`StairError::MalformedResponse`] before any field is used.
///
/// # Example
///
/// ```rust
/// use stair_core::service::interpret_response;
/// use stair_core::errors::StairError;
///
/// let err = interpret_response(400, r#"{"error": "Неверный материал"}"#).unwrap_err();
/// assert_eq!(err, StairError::server_error(400, "Неверный материал"));
/// ```
pub fn interpret_response(status: u16, body: &str) -> StairResult<CalculateResponse> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ServiceErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_else(|_| FALLBACK_SERVER_MESSAGE.to_string());
        debug!(status, %message, "service returned an error status");
        return Err(StairError::server_error(status, message));
    }

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| StairError::malformed_response(format!("body is not JSON: {}", e)))?;
    let object = value
        .as_object()
        .ok_or_else(|| StairError::malformed_response("body is not a JSON object"))?;
    for field in REQUIRED_FIELDS {
        if !object.contains_key(field) {
            return Err(StairError::malformed_response(format!("missing '{}'", field)));
        }
    }

    let response: CalculateResponse =
        serde_json::from_value(value).map_err(|e| StairError::malformed_response(e.to_string()))?;
    response
        .dimensions
        .validate()
        .map_err(|e| StairError::malformed_response(format!("unusable dimensions: {}", e)))?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OK_BODY: &str = r#"{
        "dimensions": {
            "width": 1000, "height": 800, "step_height": 200, "step_depth": 305,
            "profile_thickness": 20, "has_platform": false, "platform_depth": 0,
            "reinforcements_count": 1, "material": "ДПК", "board_elevation": 10,
            "paint_consumption": 150, "frame_color": "RAL9005"
        },
        "total_length": {"mm": 21340, "m": 21.34},
        "paint": {"total_area": 1.71, "total_weight": 256.1},
        "additional_materials": {"dpk_color": "Венге", "dpk_boards": 8, "bolts_count": 16, "nuts_count": 16}
    }"#;

    #[test]
    fn test_ok_response() {
        let response = interpret_response(200, OK_BODY).unwrap();
        assert_eq!(response.dimensions.step_count(), 4);
        assert_eq!(response.total_length.m, Meters(21.34));
        assert_eq!(response.additional_materials.bolts_count, Some(16));
        assert_eq!(response.additional_materials.dpk_length, None);
    }

    #[test]
    fn test_error_status_passes_message_through() {
        let err = interpret_response(400, r#"{"error": "'width'"}"#).unwrap_err();
        assert_eq!(err.user_message(), "'width'");
    }

    #[test]
    fn test_error_status_without_message() {
        let err = interpret_response(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err, StairError::server_error(502, FALLBACK_SERVER_MESSAGE));
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let body = r#"{"dimensions": {}, "total_length": {"mm": 1, "m": 0.001}}"#;
        let err = interpret_response(200, body).unwrap_err();
        assert_eq!(err, StairError::malformed_response("missing 'paint'"));
    }

    #[test]
    fn test_zero_step_height_echo_is_malformed() {
        let body = OK_BODY.replace("\"step_height\": 200", "\"step_height\": 0");
        let err = interpret_response(200, &body).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_RESPONSE");
    }

    #[test]
    fn test_tiny_step_height_echo_is_malformed() {
        // 800 / 0.001 rounds to 800000 steps
        let body = OK_BODY.replace("\"step_height\": 200", "\"step_height\": 0.001");
        let err = interpret_response(200, &body).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_RESPONSE");
    }

    #[test]
    fn test_resolved_request() {
        let request = CalculateRequest::new(1600.0, 1000.0, 5, TreadMaterial::Pvl);
        let resolved = request.resolved(&GeometryPolicy::eco());
        assert_eq!(resolved.reinforcements_count, 3);
        assert_eq!(request.with_reinforcements(2).resolved(&GeometryPolicy::eco()).reinforcements_count, 2);
    }

    #[test]
    fn test_request_json_shape() {
        let request = CalculateRequest::new(1000.0, 800.0, 4, TreadMaterial::DpkPlusOnePvl).with_platform(600.0);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["material"], "ДПК+1 ПВЛ");
        assert_eq!(json["frame_color"], "RAL9005");
        assert_eq!(json["has_platform"], true);
        assert_eq!(json["steps"], 4);
    }

    #[test]
    fn test_spec_from_request_matches_echo() {
        let request = CalculateRequest::new(1000.0, 800.0, 4, TreadMaterial::Dpk);
        let local = StaircaseSpec::from_request(&request);
        let echoed = interpret_response(200, OK_BODY).unwrap().dimensions;
        assert_eq!(local.step_count(), echoed.step_count());
        assert_eq!(local.step_height, echoed.step_height);
    }
}
