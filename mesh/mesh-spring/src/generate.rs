//! Spring mesh generation pipeline.
//!
//! Validation, centerline sampling, frame computation, ring filling and
//! stitching. Rings and ring pairs are independent, so above the parallel
//! threshold each one is written by rayon into its own pre-sized chunk of
//! the output buffers.

// Vertex counts are validated to fit in u32 before any index is produced.
#![allow(clippy::cast_possible_truncation)]

use nalgebra::Point3;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::centerline::HelixCenterline;
use crate::error::{SpringError, SpringResult};
use crate::mesh::SpringMesh;
use crate::params::{DegeneratePolicy, SpringParams};
use crate::ring::{RingFrame, profile_angles, ring_frame};
use crate::stitch::{Quad, stitch_pair_into, stitch_pairs, stitch_rings_into};

/// Generate the vertices and quad faces of a coiled spring.
///
/// # Arguments
///
/// * `params` - Geometry and generation options
///
/// # Returns
///
/// A [`SpringMesh`] whose vertex buffer starts with the centerline points
/// (when `include_centerline` is set) followed by one ring per centerline
/// point.
///
/// # Errors
///
/// Returns an error if:
/// - Any parameter is out of range ([`SpringError::InvalidParameter`])
/// - A ring's frame is degenerate and the policy is
///   [`DegeneratePolicy::Abort`], or every ring is degenerate
///   ([`SpringError::DegenerateGeometry`])
///
/// # Example
///
/// ```
/// use mesh_spring::{generate_spring_mesh, SpringParams};
///
/// let params = SpringParams::default();
/// let mesh = generate_spring_mesh(&params).unwrap();
///
/// assert_eq!(mesh.vertex_count(), 512 + 512 * 16);
/// assert_eq!(mesh.face_count(), 511 * 16);
/// ```
pub fn generate_spring_mesh(params: &SpringParams) -> SpringResult<SpringMesh> {
    params.validate()?;

    let parallel = params.uses_parallel();
    info!(
        helix_resolution = params.helix_resolution,
        profile_resolution = params.profile_resolution,
        turns = params.num_turns,
        parallel,
        "Starting spring generation"
    );

    let helix = HelixCenterline::new(params)?;
    let centerline = helix.points();
    debug!(
        pitch = helix.pitch(),
        t_max = helix.t_max(),
        "Sampled {} centerline points",
        centerline.len()
    );

    let frames = compute_frames(&centerline, params, parallel);
    let mesh = assemble(&centerline, frames, params, parallel)?;

    info!(
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        skipped = mesh.skipped_rings.len(),
        "Spring generation complete"
    );

    Ok(mesh)
}

/// Lay out vertices and faces from per-ring frame results.
fn assemble(
    centerline: &[Point3<f64>],
    frames: Vec<SpringResult<RingFrame>>,
    params: &SpringParams,
    parallel: bool,
) -> SpringResult<SpringMesh> {
    let retained = retain_frames(frames, params.degenerate_policy)?;

    let m = params.profile_resolution;
    let centerline_len = if params.include_centerline {
        centerline.len()
    } else {
        0
    };

    let mut ring_offsets = vec![None; centerline.len()];
    for (slot, (ring, _)) in retained.iter().enumerate() {
        ring_offsets[*ring] = Some((centerline_len + slot * m) as u32);
    }
    let skipped_rings: Vec<usize> = ring_offsets
        .iter()
        .enumerate()
        .filter_map(|(i, offset)| offset.is_none().then_some(i))
        .collect();

    let mut vertices = vec![Point3::origin(); centerline_len + retained.len() * m];
    vertices[..centerline_len].copy_from_slice(&centerline[..centerline_len]);
    fill_rings(
        &mut vertices[centerline_len..],
        &retained,
        params.profile_radius,
        m,
        parallel,
    );

    let pairs = stitch_pairs(&ring_offsets);
    let mut faces: Vec<Quad> = vec![[0; 4]; pairs.len() * m];
    stitch(&mut faces, &pairs, m, parallel);

    debug!(
        rings = retained.len(),
        pairs = pairs.len(),
        "Stitched {} quads",
        faces.len()
    );

    Ok(SpringMesh {
        vertices,
        faces,
        centerline_len,
        profile_resolution: m,
        ring_offsets,
        skipped_rings,
    })
}

fn compute_frames(
    centerline: &[Point3<f64>],
    params: &SpringParams,
    parallel: bool,
) -> Vec<SpringResult<RingFrame>> {
    let start = params.start_tangent;
    if parallel {
        (0..centerline.len())
            .into_par_iter()
            .map(|i| ring_frame(centerline, i, start))
            .collect()
    } else {
        (0..centerline.len())
            .map(|i| ring_frame(centerline, i, start))
            .collect()
    }
}

/// Apply the degenerate policy, keeping `(ring index, frame)` for every
/// usable ring in order.
fn retain_frames(
    frames: Vec<SpringResult<RingFrame>>,
    policy: DegeneratePolicy,
) -> SpringResult<Vec<(usize, RingFrame)>> {
    let mut retained = Vec::with_capacity(frames.len());
    let mut first_error: Option<SpringError> = None;

    for (ring, frame) in frames.into_iter().enumerate() {
        match frame {
            Ok(frame) => retained.push((ring, frame)),
            Err(err) => match policy {
                DegeneratePolicy::Abort => return Err(err),
                DegeneratePolicy::SkipRing => {
                    warn!(ring, error = %err, "Skipping degenerate ring");
                    first_error = first_error.or(Some(err));
                }
            },
        }
    }

    match first_error {
        Some(err) if retained.is_empty() => Err(err),
        _ => Ok(retained),
    }
}

fn fill_rings(
    ring_vertices: &mut [Point3<f64>],
    retained: &[(usize, RingFrame)],
    radius: f64,
    m: usize,
    parallel: bool,
) {
    let angles = profile_angles(m);
    if parallel {
        ring_vertices
            .par_chunks_mut(m)
            .zip(retained.par_iter())
            .for_each(|(chunk, (_, frame))| frame.fill(radius, &angles, chunk));
    } else {
        for (chunk, (_, frame)) in ring_vertices.chunks_mut(m).zip(retained) {
            frame.fill(radius, &angles, chunk);
        }
    }
}

fn stitch(faces: &mut [Quad], pairs: &[(u32, u32)], m: usize, parallel: bool) {
    if parallel {
        faces
            .par_chunks_mut(m)
            .zip(pairs.par_iter())
            .for_each(|(chunk, &(prev, cur))| stitch_pair_into(prev, cur, chunk));
    } else {
        stitch_rings_into(faces, pairs, m);
    }
}
