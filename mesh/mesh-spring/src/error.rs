//! Error types for spring mesh generation.

use std::fmt;

use thiserror::Error;

/// Result type for spring generation operations.
pub type SpringResult<T> = Result<T, SpringError>;

/// Errors that can occur while generating a spring mesh.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpringError {
    /// A supplied parameter violates its domain constraint.
    ///
    /// Reported before any geometry is computed.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// What the check expected and what it got.
        reason: String,
    },

    /// A ring's local frame could not be computed because two of its
    /// defining points coincide.
    #[error("ring {ring}: degenerate {kind}")]
    DegenerateGeometry {
        /// Index of the ring (and centerline point) that failed.
        ring: usize,
        /// Which frame vector vanished.
        kind: DegenerateKind,
    },
}

impl SpringError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) const fn degenerate(ring: usize, kind: DegenerateKind) -> Self {
        Self::DegenerateGeometry { ring, kind }
    }

    /// Ring index for geometry errors, `None` for parameter errors.
    #[must_use]
    pub const fn ring(&self) -> Option<usize> {
        match self {
            Self::DegenerateGeometry { ring, .. } => Some(*ring),
            Self::InvalidParameter { .. } => None,
        }
    }
}

/// The frame vector that could not be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DegenerateKind {
    /// The ring center lies on the spring axis.
    RadialVector,
    /// The ring center coincides with the previous centerline point.
    Tangent,
    /// The tangent is parallel to the radial vector.
    Frame,
}

impl fmt::Display for DegenerateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RadialVector => "radial vector",
            Self::Tangent => "tangent",
            Self::Frame => "frame",
        };
        f.write_str(name)
    }
}
