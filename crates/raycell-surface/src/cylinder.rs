//! Infinite cylinder (ray intersection in the plane perpendicular to the axis).

use crate::error::SurfaceError;
use crate::roots::{solve_quadratic, QuadraticRoots};
use raycell_math::{Dir3, Point3, Tolerance, Vec3};

/// An infinite cylindrical surface defined by a point on the axis, the axis
/// direction, and the radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    /// A point on the axis.
    pub center: Point3,
    /// Unit direction of the axis.
    pub axis: Dir3,
    /// Radius, strictly positive.
    pub radius: f64,
}

impl Cylinder {
    /// Create a cylinder from an axis point, axis vector, and radius.
    pub fn new(center: Point3, axis: Vec3, radius: f64) -> Result<Self, SurfaceError> {
        if !(radius > 0.0) {
            return Err(SurfaceError::degenerate(format!(
                "cylinder radius must be positive, got {radius}"
            )));
        }
        let len = axis.norm();
        if len < 1e-12 {
            return Err(SurfaceError::degenerate("cylinder axis has zero length"));
        }
        Ok(Self {
            center,
            axis: Dir3::new_unchecked(axis / len),
            radius,
        })
    }

    /// Cylinder along the x axis through the origin.
    pub fn along_x(radius: f64) -> Result<Self, SurfaceError> {
        Self::new(Point3::origin(), Vec3::x(), radius)
    }

    /// Cylinder along the y axis through the origin.
    pub fn along_y(radius: f64) -> Result<Self, SurfaceError> {
        Self::new(Point3::origin(), Vec3::y(), radius)
    }

    /// Cylinder along the z axis through the origin.
    pub fn along_z(radius: f64) -> Result<Self, SurfaceError> {
        Self::new(Point3::origin(), Vec3::z(), radius)
    }

    /// Distance from the cylindrical shell; negative inside.
    pub fn eval(&self, p: &Point3) -> f64 {
        let v = p - self.center;
        let along = v.dot(self.axis.as_ref());
        let perp = v - along * self.axis.as_ref();
        perp.norm() - self.radius
    }

    /// Line-cylinder crossing parameters.
    ///
    /// Projects origin and direction onto the plane perpendicular to the
    /// axis and solves the resulting circle equation.
    pub fn intersect(&self, origin: &Point3, direction: &Dir3, tol: &Tolerance) -> QuadraticRoots {
        let a_dir = self.axis.as_ref();
        let oc = origin - self.center;
        let d_perp = direction.as_ref() - direction.as_ref().dot(a_dir) * a_dir;
        let oc_perp = oc - oc.dot(a_dir) * a_dir;

        let a = d_perp.dot(&d_perp);
        let b = 2.0 * d_perp.dot(&oc_perp);
        let c = oc_perp.dot(&oc_perp) - self.radius * self.radius;
        // A line parallel to the axis has a == 0 and falls through to the
        // constant case: no isolated crossing.
        solve_quadratic(a, b, c, tol)
    }
}
