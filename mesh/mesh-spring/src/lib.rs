//! Procedural coiled spring meshes.
//!
//! This crate turns a handful of numbers (helix radius, tube radius, turns,
//! length and two sampling resolutions) into the vertices and quad faces of
//! a helical tube.
//!
//! # Pipeline
//!
//! 1. **Centerline** - [`sample_centerline`] samples the helix along +Z
//! 2. **Rings** - [`build_ring`] / [`RingFrame`] place a circle of points
//!    around each centerline point
//! 3. **Stitching** - [`stitch_rings`] joins neighbouring rings with quads
//!
//! [`generate_spring_mesh`] runs all three and returns a [`SpringMesh`].
//!
//! # Quick Start
//!
//! ```
//! use mesh_spring::{generate_spring_mesh, SpringParams};
//!
//! let params = SpringParams::default()
//!     .with_turns(3)
//!     .with_resolution(96, 12);
//!
//! let mesh = generate_spring_mesh(&params).unwrap();
//! assert_eq!(mesh.vertex_count(), 96 * (1 + 12));
//! assert_eq!(mesh.face_count(), 95 * 12);
//! ```
//!
//! # Host Integration
//!
//! The generator knows nothing about scene graphs. Implement [`MeshSink`]
//! for the host and call [`SpringMesh::emit_into`]:
//!
//! ```
//! use mesh_spring::{generate_spring_mesh, SpringParams};
//!
//! let mesh = generate_spring_mesh(&SpringParams::preview()).unwrap();
//!
//! let mut arrays: (Vec<[f64; 3]>, Vec<[u32; 4]>) = (Vec::new(), Vec::new());
//! mesh.emit_into("Spring", &mut arrays);
//! assert_eq!(arrays.0.len(), mesh.vertex_count());
//! ```
//!
//! # Coordinate System
//!
//! Right-handed, spring axis along +Z starting at the origin. Faces wind
//! counter-clockwise when viewed from outside the tube.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod centerline;
mod error;
mod generate;
mod mesh;
mod params;
mod ring;
mod stitch;
pub mod vector;

pub use centerline::{HelixCenterline, centerline_arc_length, sample_centerline};
pub use error::{DegenerateKind, SpringError, SpringResult};
pub use generate::generate_spring_mesh;
pub use mesh::{MeshSink, SpringMesh};
pub use params::{DegeneratePolicy, SpringParams, StartTangent};
pub use ring::{RingFrame, build_ring, profile_angles, ring_frame, ring_frames};
pub use stitch::{Quad, contiguous_offsets, stitch_pairs, stitch_rings, stitch_rings_into};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
