#![warn(missing_docs)]

//! Math types for the raycell CSG kernel.
//!
//! Thin wrappers around nalgebra providing domain-specific types for
//! quadric-surface geometry — points, vectors, unit directions — plus the
//! tolerance constants shared by the side tests and the ray tracer.

use nalgebra::{Unit, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// Tolerance constants for geometric comparisons.
///
/// All kernel queries share one tolerance bundle so a point classified "on
/// surface" by `side` is also the point the ray tracer treats as a single
/// crossing event.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Half-width of the on-surface band, as a geometric distance.
    pub surface: f64,
    /// Two quadratic roots closer than this collapse to one (tangent line).
    pub root_merge: f64,
    /// Ray-parameter distance under which crossing events are clustered.
    pub track: f64,
}

impl Tolerance {
    /// Default kernel tolerances, in the caller's native length unit.
    pub const DEFAULT: Self = Self {
        surface: 1e-8,
        root_merge: 1e-8,
        track: 1e-8,
    };

    /// Check if a scalar residual is inside the on-surface band.
    #[inline]
    pub fn on_surface(&self, residual: f64) -> bool {
        residual.abs() < self.surface
    }

    /// Check if two ray parameters describe the same crossing event.
    #[inline]
    pub fn same_event(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.track
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Sign of a residual with the on-surface band mapped to zero.
///
/// Returns `-1`, `0`, or `+1`; `0` only when `residual` lies within
/// `tol.surface` of the surface.
#[inline]
pub fn banded_sign(residual: f64, tol: &Tolerance) -> i8 {
    if tol.on_surface(residual) {
        0
    } else if residual > 0.0 {
        1
    } else {
        -1
    }
}
