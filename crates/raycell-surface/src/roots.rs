//! Closed-form root finding for the line-quadric equation.

use raycell_math::Tolerance;

/// Coefficient magnitude under which a quadratic degrades to a linear
/// equation (or a linear one to a constant).
const COEFF_EPS: f64 = 1e-12;

/// Real roots of `a*t^2 + b*t + c = 0`, multiplicity collapsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadraticRoots {
    /// No real root.
    None,
    /// A single root: a linear equation, or a double root reported once.
    One(f64),
    /// Two distinct roots, ascending.
    Two(f64, f64),
}

impl QuadraticRoots {
    /// The roots as an ordered list.
    pub fn to_vec(self) -> Vec<f64> {
        match self {
            Self::None => Vec::new(),
            Self::One(t) => vec![t],
            Self::Two(t1, t2) => vec![t1, t2],
        }
    }

    /// Number of distinct roots.
    pub fn count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::One(_) => 1,
            Self::Two(_, _) => 2,
        }
    }
}

/// Solve `a*t^2 + b*t + c = 0` for real `t`.
///
/// Uses the numerically stable citardauq form so the smaller-magnitude root
/// does not suffer cancellation. A root pair separated by less than
/// `tol.root_merge` collapses to a single root at the pair midpoint — a line
/// tangent to a quadric reports one crossing, not two.
pub fn solve_quadratic(a: f64, b: f64, c: f64, tol: &Tolerance) -> QuadraticRoots {
    if a.abs() < COEFF_EPS {
        if b.abs() < COEFF_EPS {
            // Constant equation: either no solution or the whole line.
            // Neither produces an isolated crossing.
            return QuadraticRoots::None;
        }
        return QuadraticRoots::One(-c / b);
    }

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return QuadraticRoots::None;
    }

    let sqrt_disc = disc.sqrt();
    let q = -0.5 * (b + b.signum() * sqrt_disc);
    let (t1, t2) = if q.abs() < COEFF_EPS {
        let t = -b / (2.0 * a);
        (t, t)
    } else {
        (q / a, c / q)
    };

    if (t1 - t2).abs() <= tol.root_merge {
        QuadraticRoots::One(0.5 * (t1 + t2))
    } else if t1 < t2 {
        QuadraticRoots::Two(t1, t2)
    } else {
        QuadraticRoots::Two(t2, t1)
    }
}
