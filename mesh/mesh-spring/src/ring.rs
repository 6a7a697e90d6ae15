//! Profile ring construction.
//!
//! Each ring is a circle of `profile_radius` sampled in the plane spanned by
//! a local frame `{a, b}` at its centerline point:
//!
//! - `b` points from the ring center toward the spring axis
//! - `c` approximates the tangent by `center - previous`
//! - `a = b x c`
//!
//! Ring point `k` is `center + r cos(theta_k) a + r sin(theta_k) b`.

use nalgebra::{Point3, Vector3};
use std::f64::consts::TAU;

use crate::error::{DegenerateKind, SpringError, SpringResult};
use crate::params::StartTangent;
use crate::vector;

/// Local frame of one profile ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingFrame {
    /// Ring center on the centerline.
    pub center: Point3<f64>,
    /// In-plane axis orthogonal to `b` and the tangent.
    pub a: Vector3<f64>,
    /// Radial-inward axis, toward the spring axis.
    pub b: Vector3<f64>,
    /// Tangent estimate (direction of travel).
    pub c: Vector3<f64>,
}

impl RingFrame {
    /// Build the frame at `center` with the tangent taken as
    /// `center - prev`.
    ///
    /// # Errors
    ///
    /// Returns [`SpringError::DegenerateGeometry`] tagged with `ring` when
    /// `center` lies on the Z axis, coincides with `prev`, or the tangent is
    /// parallel to the radial direction.
    pub fn at(center: Point3<f64>, prev: Point3<f64>, ring: usize) -> SpringResult<Self> {
        Self::from_tangent(center, center - prev, ring)
    }

    /// Build the frame at `center` from an explicit (unnormalized) tangent.
    ///
    /// # Errors
    ///
    /// See [`RingFrame::at`].
    pub fn from_tangent(
        center: Point3<f64>,
        tangent: Vector3<f64>,
        ring: usize,
    ) -> SpringResult<Self> {
        let b = vector::normalize(&(vector::axis_point(&center) - center))
            .ok_or(SpringError::degenerate(ring, DegenerateKind::RadialVector))?;
        let c = vector::normalize(&tangent)
            .ok_or(SpringError::degenerate(ring, DegenerateKind::Tangent))?;
        let a = vector::normalize(&vector::cross(&b, &c))
            .ok_or(SpringError::degenerate(ring, DegenerateKind::Frame))?;

        Ok(Self { center, a, b, c })
    }

    /// Point on the ring at angle `theta`.
    #[inline]
    #[must_use]
    pub fn point(&self, radius: f64, theta: f64) -> Point3<f64> {
        let (sin_t, cos_t) = theta.sin_cos();
        self.center + self.a * (radius * cos_t) + self.b * (radius * sin_t)
    }

    /// Direction from the ring center to the point at `theta`.
    #[inline]
    #[must_use]
    pub fn outward(&self, theta: f64) -> Vector3<f64> {
        let (sin_t, cos_t) = theta.sin_cos();
        self.a * cos_t + self.b * sin_t
    }

    /// Write the ring's points into `out`, one per angle.
    pub fn fill(&self, radius: f64, angles: &[f64], out: &mut [Point3<f64>]) {
        for (slot, &theta) in out.iter_mut().zip(angles) {
            *slot = self.point(radius, theta);
        }
    }
}

/// Sample angles for a ring of `resolution` points over `[0, 2pi)`.
///
/// Built as `resolution + 1` evenly spaced values over the closed interval
/// with the duplicate `2pi` sample dropped.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn profile_angles(resolution: usize) -> Vec<f64> {
    if resolution == 0 {
        return Vec::new();
    }
    let step = TAU / resolution as f64;
    (0..resolution).map(|k| k as f64 * step).collect()
}

/// Unnormalized tangent estimate for ring `index` of `centerline`.
///
/// Rings after the first use the backward difference. Ring 0 follows
/// `start_tangent`.
fn tangent_estimate(
    centerline: &[Point3<f64>],
    index: usize,
    start_tangent: StartTangent,
) -> Vector3<f64> {
    if index > 0 {
        return centerline[index] - centerline[index - 1];
    }
    match start_tangent {
        StartTangent::ForwardDifference => centerline[1] - centerline[0],
        // center - (-p1)
        StartTangent::MirroredSecondPoint => centerline[0].coords + centerline[1].coords,
    }
}

/// Compute the frame of ring `index` along `centerline`.
///
/// # Errors
///
/// Returns [`SpringError::DegenerateGeometry`] for ring `index` when the
/// frame vanishes. Returns [`SpringError::InvalidParameter`] if the
/// centerline has fewer than two points or `index` is out of range.
pub fn ring_frame(
    centerline: &[Point3<f64>],
    index: usize,
    start_tangent: StartTangent,
) -> SpringResult<RingFrame> {
    if centerline.len() < 2 {
        return Err(SpringError::invalid(
            "centerline",
            format!("needs at least 2 points, got {}", centerline.len()),
        ));
    }
    let Some(&center) = centerline.get(index) else {
        return Err(SpringError::invalid(
            "ring",
            format!("index {index} out of range for {} points", centerline.len()),
        ));
    };

    RingFrame::from_tangent(center, tangent_estimate(centerline, index, start_tangent), index)
}

/// Compute one frame result per centerline point.
///
/// Failures are reported per ring so the caller can abort or skip.
#[must_use]
pub fn ring_frames(
    centerline: &[Point3<f64>],
    start_tangent: StartTangent,
) -> Vec<SpringResult<RingFrame>> {
    (0..centerline.len())
        .map(|i| ring_frame(centerline, i, start_tangent))
        .collect()
}

/// Build one profile ring around `center`.
///
/// `prev` is the previous centerline point (or a stand-in for ring 0).
///
/// # Errors
///
/// Returns [`SpringError::InvalidParameter`] for a non-positive radius or a
/// resolution below 3, and [`SpringError::DegenerateGeometry`] when the frame
/// at `center` cannot be computed.
///
/// # Example
///
/// ```
/// use mesh_spring::build_ring;
/// use nalgebra::Point3;
///
/// let center = Point3::new(0.0, 2.0, 1.0);
/// let prev = Point3::new(-0.1, 2.0, 0.95);
/// let ring = build_ring(center, prev, 0.3, 16, 1).unwrap();
///
/// assert_eq!(ring.len(), 16);
/// for p in &ring {
///     assert!(((p - center).norm() - 0.3).abs() < 1e-12);
/// }
/// ```
pub fn build_ring(
    center: Point3<f64>,
    prev: Point3<f64>,
    radius: f64,
    resolution: usize,
    ring: usize,
) -> SpringResult<Vec<Point3<f64>>> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(SpringError::invalid(
            "profile_radius",
            format!("must be finite and positive, got {radius}"),
        ));
    }
    if resolution < 3 {
        return Err(SpringError::invalid(
            "profile_resolution",
            format!("must be at least 3, got {resolution}"),
        ));
    }

    let frame = RingFrame::at(center, prev, ring)?;
    let angles = profile_angles(resolution);
    let mut points = vec![Point3::origin(); resolution];
    frame.fill(radius, &angles, &mut points);
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centerline::sample_centerline;
    use crate::params::SpringParams;
    use approx::assert_relative_eq;

    fn helix() -> Vec<Point3<f64>> {
        sample_centerline(&SpringParams::default().with_resolution(64, 16)).expect("valid")
    }

    #[test]
    fn angles_drop_closing_sample() {
        let angles = profile_angles(4);
        assert_eq!(angles.len(), 4);
        assert_relative_eq!(angles[0], 0.0);
        assert_relative_eq!(angles[1], TAU / 4.0, epsilon = 1e-12);
        assert_relative_eq!(angles[3], 3.0 * TAU / 4.0, epsilon = 1e-12);
        assert!(angles.iter().all(|&t| t < TAU));
        assert!(profile_angles(0).is_empty());
    }

    #[test]
    fn frame_is_orthonormal() {
        let points = helix();
        for (i, frame) in ring_frames(&points, StartTangent::ForwardDifference)
            .into_iter()
            .enumerate()
        {
            let frame = frame.expect("non-degenerate");
            assert_relative_eq!(frame.a.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(frame.b.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(frame.c.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(frame.a.dot(&frame.b), 0.0, epsilon = 1e-12);
            assert_relative_eq!(frame.a.dot(&frame.c), 0.0, epsilon = 1e-12);
            // b is horizontal and points at the axis
            assert_relative_eq!(frame.b.z, 0.0, epsilon = 1e-12);
            let inward = -points[i].coords.xy().normalize();
            assert_relative_eq!(frame.b.xy(), inward, epsilon = 1e-12);
        }
    }

    #[test]
    fn ring_points_at_profile_radius() {
        let points = helix();
        let frame = ring_frame(&points, 10, StartTangent::ForwardDifference).expect("valid");
        let angles = profile_angles(16);
        let mut ring = vec![Point3::origin(); 16];
        frame.fill(0.3, &angles, &mut ring);

        for p in &ring {
            assert_relative_eq!(vector::distance(p, &points[10]), 0.3, max_relative = 1e-9);
        }
    }

    #[test]
    fn first_point_along_a() {
        let points = helix();
        let frame = ring_frame(&points, 5, StartTangent::ForwardDifference).expect("valid");
        let p0 = frame.point(0.5, 0.0);
        assert_relative_eq!(p0, points[5] + frame.a * 0.5, epsilon = 1e-12);
        let quarter = frame.point(0.5, TAU / 4.0);
        assert_relative_eq!(quarter, points[5] + frame.b * 0.5, epsilon = 1e-12);
        let theta = 1.3;
        assert_relative_eq!(
            frame.point(0.5, theta),
            points[5] + frame.outward(theta) * 0.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn forward_difference_start_matches_next_ring() {
        let points = helix();
        let first = ring_frame(&points, 0, StartTangent::ForwardDifference).expect("valid");
        let second = ring_frame(&points, 1, StartTangent::ForwardDifference).expect("valid");
        // Both use the chord p1 - p0
        assert_relative_eq!(first.c, second.c, epsilon = 1e-12);
    }

    #[test]
    fn mirrored_start_uses_negated_second_point() {
        let points = helix();
        let frame = ring_frame(&points, 0, StartTangent::MirroredSecondPoint).expect("valid");
        let expected = (points[0].coords + points[1].coords).normalize();
        assert_relative_eq!(frame.c, expected, epsilon = 1e-12);
    }

    #[test]
    fn later_rings_ignore_start_tangent() {
        let points = helix();
        let forward = ring_frame(&points, 7, StartTangent::ForwardDifference).expect("valid");
        let mirrored = ring_frame(&points, 7, StartTangent::MirroredSecondPoint).expect("valid");
        assert_eq!(forward, mirrored);
    }

    #[test]
    fn center_on_axis_is_degenerate() {
        let err = RingFrame::at(Point3::new(0.0, 0.0, 1.0), Point3::origin(), 3)
            .expect_err("on axis");
        assert_eq!(err, SpringError::degenerate(3, DegenerateKind::RadialVector));
    }

    #[test]
    fn coincident_points_are_degenerate() {
        let p = Point3::new(1.0, 0.0, 0.0);
        let err = RingFrame::at(p, p, 4).expect_err("zero tangent");
        assert_eq!(err, SpringError::degenerate(4, DegenerateKind::Tangent));
    }

    #[test]
    fn radial_tangent_is_degenerate() {
        let center = Point3::new(1.0, 0.0, 0.0);
        let err = RingFrame::at(center, Point3::new(2.0, 0.0, 0.0), 2).expect_err("parallel");
        assert_eq!(err, SpringError::degenerate(2, DegenerateKind::Frame));
    }

    #[test]
    fn build_ring_validates_inputs() {
        let center = Point3::new(0.0, 2.0, 0.0);
        let prev = Point3::new(-0.1, 2.0, -0.1);
        assert!(matches!(
            build_ring(center, prev, 0.0, 16, 0),
            Err(SpringError::InvalidParameter {
                name: "profile_radius",
                ..
            })
        ));
        assert!(matches!(
            build_ring(center, prev, 0.3, 2, 0),
            Err(SpringError::InvalidParameter {
                name: "profile_resolution",
                ..
            })
        ));
    }

    #[test]
    fn ring_frame_rejects_short_centerline() {
        let result = ring_frame(&[Point3::origin()], 0, StartTangent::ForwardDifference);
        assert!(matches!(result, Err(SpringError::InvalidParameter { .. })));
        let points = helix();
        let result = ring_frame(&points, points.len(), StartTangent::ForwardDifference);
        assert!(matches!(result, Err(SpringError::InvalidParameter { name: "ring", .. })));
    }
}
