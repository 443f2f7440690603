//! Infinite plane (first-degree surface).

use crate::error::SurfaceError;
use crate::roots::QuadraticRoots;
use raycell_math::{Dir3, Point3, Vec3};

/// Direction magnitude under which a line counts as parallel to the plane.
const PARALLEL_EPS: f64 = 1e-12;

/// An infinite plane `n · p = d` with unit normal `n`.
///
/// The constructor normalizes, so `eval` is the signed distance from the
/// plane and the side tolerance band has geometric meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// Unit normal.
    pub normal: Dir3,
    /// Signed offset along the normal (distance from the origin).
    pub distance: f64,
}

impl Plane {
    /// Create a plane from `a*x + b*y + c*z = d` coefficients.
    ///
    /// The normal is normalized and `d` rescaled to match.
    pub fn new(normal: Vec3, d: f64) -> Result<Self, SurfaceError> {
        let len = normal.norm();
        if len < PARALLEL_EPS {
            return Err(SurfaceError::degenerate("plane normal has zero length"));
        }
        Ok(Self {
            normal: Dir3::new_unchecked(normal / len),
            distance: d / len,
        })
    }

    /// Plane `x = d`.
    pub fn x_at(d: f64) -> Self {
        Self {
            normal: Dir3::new_unchecked(Vec3::x()),
            distance: d,
        }
    }

    /// Plane `y = d`.
    pub fn y_at(d: f64) -> Self {
        Self {
            normal: Dir3::new_unchecked(Vec3::y()),
            distance: d,
        }
    }

    /// Plane `z = d`.
    pub fn z_at(d: f64) -> Self {
        Self {
            normal: Dir3::new_unchecked(Vec3::z()),
            distance: d,
        }
    }

    /// Signed distance from the plane; positive on the normal side.
    pub fn eval(&self, p: &Point3) -> f64 {
        p.coords.dot(self.normal.as_ref()) - self.distance
    }

    /// Parameter of the line-plane crossing, if the line is not parallel.
    pub fn intersect(&self, origin: &Point3, direction: &Dir3) -> QuadraticRoots {
        let denom = direction.as_ref().dot(self.normal.as_ref());
        if denom.abs() < PARALLEL_EPS {
            // Parallel lines never cross; a line inside the plane has no
            // isolated crossing either.
            return QuadraticRoots::None;
        }
        QuadraticRoots::One(-self.eval(origin) / denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_signed_distance() {
        let p = Plane::z_at(2.0);
        assert_relative_eq!(p.eval(&Point3::new(0.0, 0.0, 5.0)), 3.0);
        assert_relative_eq!(p.eval(&Point3::new(10.0, -4.0, -1.0)), -3.0);
        assert_relative_eq!(p.eval(&Point3::new(1.0, 1.0, 2.0)), 0.0);
    }

    #[test]
    fn test_new_normalizes() {
        // 2x + 0y + 0z = 6 is the plane x = 3.
        let p = Plane::new(Vec3::new(2.0, 0.0, 0.0), 6.0).unwrap();
        assert_relative_eq!(p.distance, 3.0);
        assert_relative_eq!(p.eval(&Point3::new(4.0, 0.0, 0.0)), 1.0);
    }

    #[test]
    fn test_zero_normal_rejected() {
        assert!(Plane::new(Vec3::zeros(), 1.0).is_err());
    }

    #[test]
    fn test_intersect() {
        let p = Plane::x_at(2.0);
        let origin = Point3::new(-5.0, 0.0, 0.0);
        let dir = Dir3::new_normalize(Vec3::x());
        match p.intersect(&origin, &dir) {
            QuadraticRoots::One(t) => assert_relative_eq!(t, 7.0),
            other => panic!("expected one root, got {other:?}"),
        }
    }

    #[test]
    fn test_intersect_parallel() {
        let p = Plane::z_at(0.0);
        let origin = Point3::new(0.0, 0.0, 1.0);
        let dir = Dir3::new_normalize(Vec3::x());
        assert_eq!(p.intersect(&origin, &dir), QuadraticRoots::None);
        // A line lying inside the plane is also not an isolated crossing.
        let origin_on = Point3::new(0.0, 0.0, 0.0);
        assert_eq!(p.intersect(&origin_on, &dir), QuadraticRoots::None);
    }
}
