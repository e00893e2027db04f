//! # stair_core - Parametric Metal Staircase Engine
//!
//! `stair_core` turns a handful of staircase parameters (width, height, step
//! rise, tread material, optional landing) into a complete 3D model of a
//! welded metal staircase: base frame, step frames, stands, reinforcement
//! columns and bars, tread covering and fasteners. All inputs and outputs are
//! JSON-serializable so any renderer can consume the model.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: the builder is a pure function from spec to model
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Explicit policy**: every point where builder variants differ is a
//!   [`policy::GeometryPolicy`] setting
//!
//! ## Quick Start
//!
//! ```rust
//! use stair_core::geometry::GeometryBuilder;
//! use stair_core::materials::TreadMaterial;
//! use stair_core::policy::GeometryPolicy;
//! use stair_core::staircase::StaircaseSpec;
//!
//! let spec = StaircaseSpec::new(1000.0, 800.0, 200.0, TreadMaterial::Dpk);
//! let model = GeometryBuilder::new(GeometryPolicy::eco()).build(&spec).unwrap();
//!
//! let summary = model.summary();
//! assert_eq!(summary.step_count, 4);
//!
//! let json = serde_json::to_string_pretty(&model).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`staircase`] - Input dimensions and derived quantities
//! - [`policy`] - Builder variant settings
//! - [`geometry`] - The geometry builder and its output types
//! - [`materials`] - Tread materials and the color palette
//! - [`validation`] - Input range checks
//! - [`service`] - Calculation service request/response contract
//! - [`session`] - Current model and stale-response handling
//! - [`config`] - TOML configuration
//! - [`report`] / [`pdf`] - Text and PDF bill of materials
//! - [`file_io`] - Atomic model document saves
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod config;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod materials;
pub mod pdf;
pub mod policy;
pub mod report;
pub mod service;
pub mod session;
pub mod staircase;
pub mod units;
pub mod validation;

pub use errors::{StairError, StairResult};
pub use geometry::{build, GeometryBuilder, Model, ModelSummary};
pub use policy::GeometryPolicy;
pub use staircase::StaircaseSpec;
