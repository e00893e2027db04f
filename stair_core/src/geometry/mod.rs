//! # Geometry
//!
//! Parametric derivation of a staircase model from a [`StaircaseSpec`](crate::staircase::StaircaseSpec).
//!
//! The build runs in a fixed order: base frame, step frames with their
//! stands, reinforcement columns, landing depth reinforcement, then tread
//! covering with fasteners. Each stage appends to the same element lists;
//! nothing is mutated after it has been placed.
//!
//! ## Coordinates
//!
//! Millimeters throughout. `x` runs across the width centred on zero, `y` up
//! from the ground, `z` from the front of the first step backwards. Elements
//! are positioned by their centre.
//!
//! ## Example
//!
//! ```rust
//! use stair_core::geometry::{build, MemberKind, BaseBeamRole};
//! use stair_core::materials::TreadMaterial;
//! use stair_core::policy::GeometryPolicy;
//! use stair_core::staircase::StaircaseSpec;
//!
//! let spec = StaircaseSpec::new(1600.0, 1000.0, 200.0, TreadMaterial::Pvl).with_platform(320.0);
//! let model = build(&spec, &GeometryPolicy::eco()).unwrap();
//!
//! assert_eq!(model.members(MemberKind::BaseBeam(BaseBeamRole::LongitudinalMiddle)).count(), 1);
//! assert!(model.summary().depth_reinforcements > 0);
//! ```

pub mod builder;
pub mod covering;
pub mod elements;
pub mod fasteners;
mod frame;
mod layout;
mod reinforcement;
pub mod vector;

pub use builder::{build, GeometryBuilder};
pub use covering::{layout_boards, BoardLayout, BoardSlot};
pub use elements::{
    BaseBeamRole, ColorRole, CoveringElement, CoveringElementKind, Cylinder, Fastener, MemberKind, Model,
    ModelSummary, ReinforcementRole, Side, StandCorner, StepEdge, StructuralElement,
};
pub use fasteners::bolt_geometry;
pub use vector::Vec3;
