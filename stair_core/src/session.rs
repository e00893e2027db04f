//! # Session
//!
//! Owns the current model and decides whether an incoming service response
//! may replace it.
//!
//! Submissions are not cancelled or de-duplicated, so two requests can be in
//! flight at once and their responses can arrive in either order. Every
//! submission takes a [`SubmissionTicket`]; a response is applied only when
//! its ticket is newer than the one behind the current model. An older
//! response is reported as [`ApplyOutcome::Stale`] and dropped.
//!
//! ## Example
//!
//! ```rust
//! use stair_core::session::{ApplyOutcome, Session};
//! use stair_core::policy::GeometryPolicy;
//! use stair_core::service::interpret_response;
//! # let body = r#"{"dimensions": {"width": 1000, "height": 800, "step_height": 200,
//! #   "step_depth": 305, "profile_thickness": 20, "has_platform": false, "platform_depth": 0,
//! #   "reinforcements_count": 1, "material": "ДПК", "board_elevation": 10,
//! #   "paint_consumption": 150, "frame_color": "RAL9005"},
//! #   "total_length": {"mm": 21340, "m": 21.34}, "paint": {"total_area": 1.7, "total_weight": 256}}"#;
//!
//! let mut session = Session::new(GeometryPolicy::eco());
//! let first = session.begin_submission();
//! let second = session.begin_submission();
//!
//! let response = interpret_response(200, body).unwrap();
//! assert_eq!(session.apply_response(second, response.clone()).unwrap(), ApplyOutcome::Applied);
//! // the older answer arrives late and is ignored
//! assert!(matches!(session.apply_response(first, response).unwrap(), ApplyOutcome::Stale { .. }));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::StairResult;
use crate::geometry::{GeometryBuilder, Model};
use crate::materials::FrameColor;
use crate::policy::GeometryPolicy;
use crate::service::CalculateResponse;
use crate::staircase::StaircaseSpec;

/// Monotonic submission number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubmissionTicket(pub u64);

/// What happened to a response handed to [`Session::apply_response`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyOutcome {
    /// The model was rebuilt from the response
    Applied,
    /// A newer submission already produced the current model
    Stale {
        ticket: SubmissionTicket,
        current: SubmissionTicket,
    },
}

/// Current model and its provenance
#[derive(Debug, Clone)]
pub struct Session {
    builder: GeometryBuilder,
    next_ticket: u64,
    applied: Option<SubmissionTicket>,
    spec: Option<StaircaseSpec>,
    model: Option<Model>,
    response: Option<CalculateResponse>,
    built_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(policy: GeometryPolicy) -> Self {
        Session {
            builder: GeometryBuilder::new(policy),
            next_ticket: 0,
            applied: None,
            spec: None,
            model: None,
            response: None,
            built_at: None,
        }
    }

    pub fn policy(&self) -> &GeometryPolicy {
        self.builder.policy()
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    /// Spec the current model was built from
    pub fn spec(&self) -> Option<&StaircaseSpec> {
        self.spec.as_ref()
    }

    /// Service response behind the current model, if it came from one
    pub fn last_response(&self) -> Option<&CalculateResponse> {
        self.response.as_ref()
    }

    pub fn built_at(&self) -> Option<DateTime<Utc>> {
        self.built_at
    }

    /// Ticket behind the current model
    pub fn current_ticket(&self) -> Option<SubmissionTicket> {
        self.applied
    }

    /// Issue the ticket for a new submission
    pub fn begin_submission(&mut self) -> SubmissionTicket {
        self.next_ticket += 1;
        SubmissionTicket(self.next_ticket)
    }

    fn is_stale(&self, ticket: SubmissionTicket) -> Option<SubmissionTicket> {
        self.applied.filter(|&current| ticket <= current)
    }

    /// Rebuild from the dimensions a response echoes, unless a newer
    /// submission got there first.
    ///
    /// A failed build leaves the current model in place.
    pub fn apply_response(
        &mut self,
        ticket: SubmissionTicket,
        response: CalculateResponse,
    ) -> StairResult<ApplyOutcome> {
        if let Some(current) = self.is_stale(ticket) {
            debug!(?ticket, ?current, "dropping stale response");
            return Ok(ApplyOutcome::Stale { ticket, current });
        }

        let model = self.builder.build(&response.dimensions)?;
        self.install(ticket, response.dimensions.clone(), model);
        self.response = Some(response);
        Ok(ApplyOutcome::Applied)
    }

    /// Build locally, without the service. Takes a ticket of its own, so any
    /// response still in flight becomes stale.
    pub fn rebuild(&mut self, spec: StaircaseSpec) -> StairResult<&Model> {
        let ticket = self.begin_submission();
        let model = self.builder.build(&spec)?;
        self.response = None;
        Ok(self.install(ticket, spec, model))
    }

    /// Repaint the current model's frame. Returns false when there is no model.
    pub fn recolor(&mut self, color: FrameColor) -> bool {
        match self.model.as_mut() {
            Some(model) => {
                *model = model.recolor(color);
                if let Some(spec) = self.spec.as_mut() {
                    spec.frame_color = color;
                }
                true
            }
            None => false,
        }
    }

    fn install(&mut self, ticket: SubmissionTicket, spec: StaircaseSpec, model: Model) -> &Model {
        let now = Utc::now();
        info!(?ticket, steps = model.step_count, built_at = %now, "model replaced");
        self.applied = Some(ticket);
        self.spec = Some(spec);
        self.built_at = Some(now);
        self.model.insert(model)
    }
}
