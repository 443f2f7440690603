//! Sphere (ray-sphere intersection via the quadratic equation).

use crate::error::SurfaceError;
use crate::roots::{solve_quadratic, QuadraticRoots};
use raycell_math::{Dir3, Point3, Tolerance};

/// A sphere defined by center and radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    /// Center of the sphere.
    pub center: Point3,
    /// Radius, strictly positive.
    pub radius: f64,
}

impl Sphere {
    /// Create a sphere with the given center and radius.
    pub fn new(center: Point3, radius: f64) -> Result<Self, SurfaceError> {
        if !(radius > 0.0) {
            return Err(SurfaceError::degenerate(format!(
                "sphere radius must be positive, got {radius}"
            )));
        }
        Ok(Self { center, radius })
    }

    /// Sphere centered at the origin.
    pub fn at_origin(radius: f64) -> Result<Self, SurfaceError> {
        Self::new(Point3::origin(), radius)
    }

    /// Distance from the spherical shell; negative inside.
    pub fn eval(&self, p: &Point3) -> f64 {
        (p - self.center).norm() - self.radius
    }

    /// Line-sphere crossing parameters.
    ///
    /// Substitutes `origin + t * direction` into `|p - c|^2 = r^2`; with a
    /// unit direction the leading coefficient is 1.
    pub fn intersect(&self, origin: &Point3, direction: &Dir3, tol: &Tolerance) -> QuadraticRoots {
        let oc = origin - self.center;
        let d = direction.as_ref();
        let b = 2.0 * oc.dot(d);
        let c = oc.dot(&oc) - self.radius * self.radius;
        solve_quadratic(1.0, b, c, tol)
    }
}
