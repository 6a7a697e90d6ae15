//! Helical centerline sampling.
//!
//! The spring advances along +Z from the origin to `(0, 0, length)`. The
//! angular parameter `t` runs over `[0, num_turns * 2pi]` and maps to
//!
//! ```text
//! x = R sin t
//! y = R cos t
//! z = pitch * t,   pitch = length / (num_turns * 2pi)
//! ```

use nalgebra::Point3;
use std::f64::consts::TAU;

use crate::error::{SpringError, SpringResult};
use crate::params::SpringParams;
use crate::vector;

/// A sampled helix described by its derived constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelixCenterline {
    radius: f64,
    pitch: f64,
    t_max: f64,
    samples: usize,
}

impl HelixCenterline {
    /// Derive the helix from spring parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SpringError::InvalidParameter`] if fewer than two samples are
    /// requested or if the length or turn count cannot define a pitch.
    pub fn new(params: &SpringParams) -> SpringResult<Self> {
        if params.helix_resolution < 2 {
            return Err(SpringError::invalid(
                "helix_resolution",
                format!("must be at least 2, got {}", params.helix_resolution),
            ));
        }
        if params.num_turns < 1 {
            return Err(SpringError::invalid(
                "num_turns",
                format!("must be at least 1, got {}", params.num_turns),
            ));
        }
        if !params.length.is_finite() || params.length <= 0.0 {
            return Err(SpringError::invalid(
                "length",
                format!("must be finite and positive, got {}", params.length),
            ));
        }

        // The helix runs from the origin straight up the axis
        let distance = params.length;
        let pitch = distance / (f64::from(params.num_turns) * TAU);
        let t_max = distance / pitch;

        Ok(Self {
            radius: params.helix_radius,
            pitch,
            t_max,
            samples: params.helix_resolution,
        })
    }

    /// Axial advance per radian of the angular parameter.
    #[must_use]
    pub const fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Total angular sweep.
    #[must_use]
    pub const fn t_max(&self) -> f64 {
        self.t_max
    }

    /// Number of samples.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.samples
    }

    /// Always false; a centerline has at least two samples.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.samples == 0
    }

    /// Angular parameter of sample `index`.
    ///
    /// The last sample lands exactly on [`t_max`](Self::t_max).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn parameter_at(&self, index: usize) -> f64 {
        let last = self.samples - 1;
        if index >= last {
            return self.t_max;
        }
        let step = self.t_max / last as f64;
        index as f64 * step
    }

    /// Point on the helix at angular parameter `t`.
    #[must_use]
    pub fn point_at_parameter(&self, t: f64) -> Point3<f64> {
        let (sin_t, cos_t) = t.sin_cos();
        Point3::new(self.radius * sin_t, self.radius * cos_t, self.pitch * t)
    }

    /// All sample points, in traversal order.
    #[must_use]
    pub fn points(&self) -> Vec<Point3<f64>> {
        (0..self.samples)
            .map(|i| self.point_at_parameter(self.parameter_at(i)))
            .collect()
    }
}

/// Sample the spring centerline.
///
/// # Errors
///
/// Returns [`SpringError::InvalidParameter`] if `helix_resolution < 2`, or if
/// `length`/`num_turns` are out of range.
///
/// # Example
///
/// ```
/// use mesh_spring::{sample_centerline, SpringParams};
///
/// let params = SpringParams::default();
/// let points = sample_centerline(&params).unwrap();
///
/// assert_eq!(points.len(), 512);
/// assert!(points[0].z.abs() < 1e-12);
/// assert!((points[511].z - 10.0).abs() < 1e-9);
/// ```
pub fn sample_centerline(params: &SpringParams) -> SpringResult<Vec<Point3<f64>>> {
    Ok(HelixCenterline::new(params)?.points())
}

/// Total length of the polyline through `points`.
#[must_use]
pub fn centerline_arc_length(points: &[Point3<f64>]) -> f64 {
    points
        .windows(2)
        .map(|w| vector::distance(&w[0], &w[1]))
        .sum()
}
