//! Parameters for spring mesh generation.
//!
//! [`SpringParams`] bundles the geometric description of the spring with the
//! options that control how it is generated.
//!
//! # Presets
//!
//! - [`SpringParams::default()`] - The stock spring (512 x 16 samples)
//! - [`SpringParams::preview()`] - Coarse sampling for interactive previews
//! - [`SpringParams::fine()`] - Dense sampling for final output
//!
//! # Example
//!
//! ```
//! use mesh_spring::{DegeneratePolicy, SpringParams};
//!
//! let params = SpringParams::default()
//!     .with_turns(8)
//!     .with_length(20.0)
//!     .with_degenerate_policy(DegeneratePolicy::SkipRing);
//!
//! assert!(params.validate().is_ok());
//! ```

use crate::error::{SpringError, SpringResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the tangent of the first ring is obtained.
///
/// Every other ring uses the backward difference `center - previous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StartTangent {
    /// Forward difference `centerline[1] - centerline[0]`.
    #[default]
    ForwardDifference,

    /// Use the negated second centerline point as the previous point.
    ///
    /// Reproduces meshes built by the original spring add-on. The tangent
    /// estimate is nearly radial; only its small along-track component
    /// survives the cross product, so the ring still lands close to the
    /// forward-difference one.
    MirroredSecondPoint,
}

/// What to do when a ring's frame cannot be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DegeneratePolicy {
    /// Fail the whole generation with the first ring error.
    #[default]
    Abort,

    /// Leave the ring out and drop every face that would touch it.
    SkipRing,
}

/// Parameters for a single spring generation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpringParams {
    /// Distance from the spring axis to the tube centerline.
    pub helix_radius: f64,

    /// Radius of the tube cross-section.
    pub profile_radius: f64,

    /// Number of full coils.
    pub num_turns: u32,

    /// Axial length of the spring along +Z.
    pub length: f64,

    /// Number of centerline samples (rings).
    pub helix_resolution: usize,

    /// Number of points per ring.
    pub profile_resolution: usize,

    /// Tangent rule for ring 0.
    pub start_tangent: StartTangent,

    /// Handling of rings whose frame is degenerate.
    pub degenerate_policy: DegeneratePolicy,

    /// Emit the centerline points as the leading vertices of the mesh.
    ///
    /// They are referenced by no face.
    pub include_centerline: bool,

    /// Whether to use parallel processing (via rayon).
    pub parallel: bool,

    /// Minimum ring count before the parallel path is taken.
    pub parallel_threshold: usize,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            helix_radius: 2.0,
            profile_radius: 0.3,
            num_turns: 5,
            length: 10.0,
            helix_resolution: 512,
            profile_resolution: 16,
            start_tangent: StartTangent::default(),
            degenerate_policy: DegeneratePolicy::default(),
            include_centerline: true,
            parallel: true,
            parallel_threshold: 256,
        }
    }
}

impl SpringParams {
    /// Coarse sampling suitable for interactive previews.
    ///
    /// ```
    /// use mesh_spring::SpringParams;
    ///
    /// let preview = SpringParams::preview();
    /// assert!(preview.helix_resolution < SpringParams::default().helix_resolution);
    /// ```
    #[must_use]
    pub fn preview() -> Self {
        Self {
            helix_resolution: 128,
            profile_resolution: 8,
            ..Self::default()
        }
    }

    /// Dense sampling for final output.
    #[must_use]
    pub fn fine() -> Self {
        Self {
            helix_resolution: 2048,
            profile_resolution: 32,
            ..Self::default()
        }
    }

    /// Set the helix radius.
    #[must_use]
    pub fn with_helix_radius(mut self, radius: f64) -> Self {
        self.helix_radius = radius;
        self
    }

    /// Set the tube cross-section radius.
    #[must_use]
    pub fn with_profile_radius(mut self, radius: f64) -> Self {
        self.profile_radius = radius;
        self
    }

    /// Set the number of coils.
    #[must_use]
    pub fn with_turns(mut self, turns: u32) -> Self {
        self.num_turns = turns;
        self
    }

    /// Set the axial length.
    #[must_use]
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Set both sampling resolutions.
    #[must_use]
    pub fn with_resolution(mut self, helix: usize, profile: usize) -> Self {
        self.helix_resolution = helix;
        self.profile_resolution = profile;
        self
    }

    /// Set the tangent rule for ring 0.
    #[must_use]
    pub fn with_start_tangent(mut self, start_tangent: StartTangent) -> Self {
        self.start_tangent = start_tangent;
        self
    }

    /// Set the degenerate ring policy.
    #[must_use]
    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    /// Choose whether centerline points are emitted as vertices.
    #[must_use]
    pub fn with_centerline(mut self, include: bool) -> Self {
        self.include_centerline = include;
        self
    }

    /// Enable or disable parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the ring count at which the parallel path kicks in.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Number of vertices a successful run produces when no ring is skipped.
    ///
    /// Returns `None` on overflow.
    #[must_use]
    pub fn expected_vertex_count(&self) -> Option<usize> {
        let rings = self.helix_resolution.checked_mul(self.profile_resolution)?;
        if self.include_centerline {
            rings.checked_add(self.helix_resolution)
        } else {
            Some(rings)
        }
    }

    /// Number of quads a successful run produces when no ring is skipped.
    #[must_use]
    pub fn expected_face_count(&self) -> usize {
        self.helix_resolution.saturating_sub(1) * self.profile_resolution
    }

    /// Whether the parallel path will be used for this parameter set.
    #[must_use]
    pub const fn uses_parallel(&self) -> bool {
        self.parallel && self.helix_resolution >= self.parallel_threshold
    }

    /// Check every parameter against its domain.
    ///
    /// `helix_radius` may be zero: that input is geometrically degenerate and
    /// is reported by the ring builder, not here.
    ///
    /// # Errors
    ///
    /// Returns [`SpringError::InvalidParameter`] naming the first parameter
    /// that fails its check.
    pub fn validate(&self) -> SpringResult<()> {
        if !self.helix_radius.is_finite() || self.helix_radius < 0.0 {
            return Err(SpringError::invalid(
                "helix_radius",
                format!("must be finite and non-negative, got {}", self.helix_radius),
            ));
        }
        require_positive("profile_radius", self.profile_radius)?;
        require_positive("length", self.length)?;
        if self.num_turns < 1 {
            return Err(SpringError::invalid(
                "num_turns",
                format!("must be at least 1, got {}", self.num_turns),
            ));
        }
        require_at_least("helix_resolution", self.helix_resolution, 2)?;
        require_at_least("profile_resolution", self.profile_resolution, 3)?;
        require_at_least("parallel_threshold", self.parallel_threshold, 1)?;

        let fits = self
            .expected_vertex_count()
            .is_some_and(|count| u32::try_from(count).is_ok());
        if !fits {
            return Err(SpringError::invalid(
                "helix_resolution",
                format!(
                    "{} x {} samples exceed the u32 index range",
                    self.helix_resolution, self.profile_resolution
                ),
            ));
        }

        Ok(())
    }
}

fn require_positive(name: &'static str, value: f64) -> SpringResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SpringError::invalid(
            name,
            format!("must be finite and positive, got {value}"),
        ))
    }
}

fn require_at_least(name: &'static str, value: usize, min: usize) -> SpringResult<()> {
    if value >= min {
        Ok(())
    } else {
        Err(SpringError::invalid(
            name,
            format!("must be at least {min}, got {value}"),
        ))
    }
}
