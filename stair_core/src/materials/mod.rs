//! # Materials
//!
//! Tread materials and the frame color palette.
//!
//! ## Material Types
//!
//! - **ДПК (composite board)**: extruded decking boards laid across each step
//! - **ПВЛ (grated sheet)**: expanded metal sheet welded into the step frame
//! - **ДПК+1 ПВЛ**: grated sheet on the first step, composite boards above
//!
//! ## Example
//!
//! ```rust
//! use stair_core::materials::{FrameColor, TreadMaterial};
//!
//! let material = TreadMaterial::from_str_flexible("DPK").unwrap();
//! assert!(material.needs_horizontal_reinforcement(0));
//!
//! let colors = FrameColor::Ral8017.palette();
//! assert_eq!(colors.frame.to_hex(), "#44322D");
//! ```

pub mod palette;
pub mod tread;

pub use palette::{FrameColor, PaletteEntry, Rgb, FASTENER_COLOR};
pub use tread::{TreadCovering, TreadMaterial, DEPTH_REINFORCEMENT_THRESHOLD_MM};
