//! General second-degree surface (10-coefficient quadric).

use crate::error::SurfaceError;
use crate::roots::{solve_quadratic, QuadraticRoots};
use raycell_math::{Dir3, Point3, Tolerance};

/// A general quadric
/// `a*x^2 + b*y^2 + c*z^2 + d*xy + e*yz + f*zx + g*x + h*y + j*z + k = 0`.
///
/// Unlike the specialized variants, `eval` is the raw form value, not a
/// distance — the side tolerance band on a quadric therefore depends on the
/// coefficient scale. Surfaces with a distance form should use the
/// specialized variants.
#[derive(Debug, Clone, PartialEq)]
pub struct Quadric {
    /// Coefficients in the order `[a, b, c, d, e, f, g, h, j, k]`.
    pub coeffs: [f64; 10],
}

impl Quadric {
    /// Create a quadric from its 10 coefficients.
    pub fn new(coeffs: [f64; 10]) -> Result<Self, SurfaceError> {
        let degree_terms = &coeffs[..9];
        if degree_terms.iter().all(|c| c.abs() < 1e-12) {
            return Err(SurfaceError::degenerate(
                "quadric has no second-degree or linear term",
            ));
        }
        Ok(Self { coeffs })
    }

    /// The implicit form value at `p`.
    pub fn eval(&self, p: &Point3) -> f64 {
        let [a, b, c, d, e, f, g, h, j, k] = self.coeffs;
        let (x, y, z) = (p.x, p.y, p.z);
        a * x * x
            + b * y * y
            + c * z * z
            + d * x * y
            + e * y * z
            + f * z * x
            + g * x
            + h * y
            + j * z
            + k
    }

    /// Line-quadric crossing parameters.
    ///
    /// Substituting `origin + t * direction` gives a quadratic in `t` whose
    /// coefficients are assembled term by term below.
    pub fn intersect(&self, origin: &Point3, direction: &Dir3, tol: &Tolerance) -> QuadraticRoots {
        let [a, b, c, d, e, f, g, h, j, _k] = self.coeffs;
        let (ox, oy, oz) = (origin.x, origin.y, origin.z);
        let dv = direction.as_ref();
        let (dx, dy, dz) = (dv.x, dv.y, dv.z);

        let qa = a * dx * dx + b * dy * dy + c * dz * dz + d * dx * dy + e * dy * dz + f * dz * dx;
        let qb = 2.0 * (a * ox * dx + b * oy * dy + c * oz * dz)
            + d * (ox * dy + oy * dx)
            + e * (oy * dz + oz * dy)
            + f * (oz * dx + ox * dz)
            + g * dx
            + h * dy
            + j * dz;
        let qc = self.eval(origin);
        solve_quadratic(qa, qb, qc, tol)
    }
}
