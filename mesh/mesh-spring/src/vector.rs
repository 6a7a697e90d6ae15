//! Vector primitives used by the frame computation.
//!
//! Thin wrappers over nalgebra that make the failure case of normalization
//! explicit.

use nalgebra::{Point3, Vector3};

/// Length below which a vector is treated as zero.
pub const DEGENERATE_EPSILON: f64 = f64::EPSILON;

/// Normalize `v`, returning `None` when its length is at or below
/// [`DEGENERATE_EPSILON`].
///
/// The vector is scaled by its largest component first, so lengths whose
/// square would overflow or underflow still normalize.
///
/// # Example
///
/// ```
/// use mesh_spring::vector::normalize;
/// use nalgebra::Vector3;
///
/// let unit = normalize(&Vector3::new(3.0, 0.0, 4.0)).unwrap();
/// assert!((unit.norm() - 1.0).abs() < 1e-12);
/// assert!(normalize(&Vector3::zeros()).is_none());
/// ```
#[inline]
#[must_use]
pub fn normalize(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    let (scale, scaled) = prescale(v)?;
    let norm = scaled.norm();
    (norm * scale > DEGENERATE_EPSILON).then(|| scaled / norm)
}

/// Euclidean length of `v` without intermediate overflow.
#[inline]
#[must_use]
pub fn length(v: &Vector3<f64>) -> f64 {
    prescale(v).map_or(0.0, |(scale, scaled)| scale * scaled.norm())
}

fn prescale(v: &Vector3<f64>) -> Option<(f64, Vector3<f64>)> {
    let scale = v.amax();
    (scale > 0.0 && scale.is_finite()).then(|| (scale, v / scale))
}

/// Right-handed cross product `a x b`.
#[inline]
#[must_use]
pub fn cross(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    a.cross(b)
}

/// Euclidean distance between two points.
#[inline]
#[must_use]
pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    length(&(b - a))
}

/// Point on the Z axis at the same height as `p`.
#[inline]
#[must_use]
pub fn axis_point(p: &Point3<f64>) -> Point3<f64> {
    Point3::new(0.0, 0.0, p.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_unit_length() {
        let v = normalize(&Vector3::new(1.0, 2.0, 2.0)).expect("non-zero");
        assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(v.x, 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn normalize_zero_is_none() {
        assert!(normalize(&Vector3::zeros()).is_none());
        assert!(normalize(&Vector3::new(1e-17, 0.0, 0.0)).is_none());
    }

    #[test]
    fn normalize_survives_extreme_magnitudes() {
        for scale in [1e-170, 1e-160, 1e155, 1e300] {
            let v = normalize(&Vector3::new(3.0 * scale, 0.0, 4.0 * scale)).expect("non-zero");
            assert_relative_eq!(v, Vector3::new(0.6, 0.0, 0.8), epsilon = 1e-12);
        }
    }

    #[test]
    fn length_survives_extreme_magnitudes() {
        assert_relative_eq!(length(&Vector3::new(0.0, 0.0, 1e200)), 1e200, max_relative = 1e-15);
        assert_relative_eq!(length(&Vector3::new(3e-200, 4e-200, 0.0)), 5e-200, max_relative = 1e-15);
        assert_relative_eq!(length(&Vector3::zeros()), 0.0);
    }

    #[test]
    fn cross_is_right_handed() {
        let z = cross(&Vector3::x(), &Vector3::y());
        assert_relative_eq!(z, Vector3::z(), epsilon = 1e-12);
        let neg = cross(&Vector3::y(), &Vector3::x());
        assert_relative_eq!(neg, -Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn cross_of_parallel_vanishes() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert!(normalize(&cross(&v, &(v * 2.0))).is_none());
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 6.0, 3.0);
        assert_relative_eq!(distance(&a, &b), 5.0, epsilon = 1e-12);
        assert_relative_eq!(distance(&b, &a), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn axis_point_keeps_height() {
        let p = axis_point(&Point3::new(3.0, -1.0, 7.5));
        assert_relative_eq!(p, Point3::new(0.0, 0.0, 7.5), epsilon = 1e-12);
    }
}
