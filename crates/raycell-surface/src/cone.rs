//! Double cone (ray intersection via the cone quadratic).

use crate::error::SurfaceError;
use crate::roots::{solve_quadratic, QuadraticRoots};
use raycell_math::{Dir3, Point3, Tolerance, Vec3};

/// An infinite double cone defined by apex, axis, and half-angle.
///
/// Both nappes are part of the surface, as the quadric form implies. The
/// interior is the region within `half_angle` of the axis on either side of
/// the apex.
#[derive(Debug, Clone, PartialEq)]
pub struct Cone {
    /// Apex (tip) of the cone.
    pub apex: Point3,
    /// Unit direction of the axis.
    pub axis: Dir3,
    /// Half-angle in radians, in the open interval (0, pi/2).
    pub half_angle: f64,
}

impl Cone {
    /// Create a cone from apex, axis vector, and half-angle in radians.
    pub fn new(apex: Point3, axis: Vec3, half_angle: f64) -> Result<Self, SurfaceError> {
        let len = axis.norm();
        if len < 1e-12 {
            return Err(SurfaceError::degenerate("cone axis has zero length"));
        }
        if !(half_angle > 0.0 && half_angle < std::f64::consts::FRAC_PI_2) {
            return Err(SurfaceError::degenerate(format!(
                "cone half-angle must lie in (0, pi/2) radians, got {half_angle}"
            )));
        }
        Ok(Self {
            apex,
            axis: Dir3::new_unchecked(axis / len),
            half_angle,
        })
    }

    /// Approximate distance from the cone surface; negative inside.
    ///
    /// Computed as `|v| * sin(theta - half_angle)` where `theta` is the angle
    /// between `p - apex` and the axis, so the tolerance band stays a
    /// geometric distance near the surface. The apex itself is on the surface.
    pub fn eval(&self, p: &Point3) -> f64 {
        let v = p - self.apex;
        let r = v.norm();
        if r < 1e-12 {
            return 0.0;
        }
        let cos_theta = (v.dot(self.axis.as_ref()) / r).abs().clamp(0.0, 1.0);
        let theta = cos_theta.acos();
        r * (theta - self.half_angle).sin()
    }

    /// Line-cone crossing parameters.
    pub fn intersect(&self, origin: &Point3, direction: &Dir3, tol: &Tolerance) -> QuadraticRoots {
        let cos_sq = self.half_angle.cos().powi(2);
        let a_dir = self.axis.as_ref();
        let d = direction.as_ref();
        let m = origin - self.apex;

        let dv = d.dot(a_dir);
        let mv = m.dot(a_dir);

        let a = dv * dv - cos_sq;
        let b = 2.0 * (mv * dv - cos_sq * m.dot(d));
        let c = mv * mv - cos_sq * m.dot(&m);
        solve_quadratic(a, b, c, tol)
    }
}
