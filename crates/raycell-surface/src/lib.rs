#![warn(missing_docs)]

//! Quadric surface types for the raycell CSG kernel.
//!
//! Provides the closed set of second-degree implicit surfaces (plane,
//! sphere, cylinder, cone, general quadric) with side-test and
//! line-intersection operations, the surface definition-line parser, and the
//! registry that owns parsed surfaces for sharing across cells.

mod cone;
mod cylinder;
mod error;
mod parse;
mod plane;
mod quadric;
mod registry;
mod roots;
mod sphere;

pub use cone::Cone;
pub use cylinder::Cylinder;
pub use error::SurfaceError;
pub use plane::Plane;
pub use quadric::Quadric;
pub use registry::SurfaceRegistry;
pub use roots::{solve_quadratic, QuadraticRoots};
pub use sphere::Sphere;

use raycell_math::{banded_sign, Dir3, Point3, Tolerance};

/// The kind of a surface (for match-based dispatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Infinite plane.
    Plane,
    /// Sphere.
    Sphere,
    /// Infinite cylinder.
    Cylinder,
    /// Infinite double cone.
    Cone,
    /// General 10-coefficient quadric.
    Quadric,
}

/// Geometry of a surface: one of the closed set of quadric variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Infinite plane.
    Plane(Plane),
    /// Sphere.
    Sphere(Sphere),
    /// Infinite cylinder.
    Cylinder(Cylinder),
    /// Infinite double cone.
    Cone(Cone),
    /// General quadric.
    Quadric(Quadric),
}

impl Shape {
    /// The kind of this shape.
    pub fn kind(&self) -> SurfaceKind {
        match self {
            Self::Plane(_) => SurfaceKind::Plane,
            Self::Sphere(_) => SurfaceKind::Sphere,
            Self::Cylinder(_) => SurfaceKind::Cylinder,
            Self::Cone(_) => SurfaceKind::Cone,
            Self::Quadric(_) => SurfaceKind::Quadric,
        }
    }

    /// Implicit-form residual at `p`; negative on the interior side.
    pub fn eval(&self, p: &Point3) -> f64 {
        match self {
            Self::Plane(s) => s.eval(p),
            Self::Sphere(s) => s.eval(p),
            Self::Cylinder(s) => s.eval(p),
            Self::Cone(s) => s.eval(p),
            Self::Quadric(s) => s.eval(p),
        }
    }

    /// Crossing parameters of the line `origin + t * direction`.
    pub fn intersect(&self, origin: &Point3, direction: &Dir3, tol: &Tolerance) -> QuadraticRoots {
        match self {
            Self::Plane(s) => s.intersect(origin, direction),
            Self::Sphere(s) => s.intersect(origin, direction, tol),
            Self::Cylinder(s) => s.intersect(origin, direction, tol),
            Self::Cone(s) => s.intersect(origin, direction, tol),
            Self::Quadric(s) => s.intersect(origin, direction, tol),
        }
    }
}

/// A registered surface: a signed id plus its geometry.
///
/// Immutable once parsed; owned by a [`SurfaceRegistry`] and shared by
/// reference (`Arc`) into the rule trees that cite it.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    id: i32,
    shape: Shape,
}

impl Surface {
    /// Create a surface with the given id.
    pub fn new(id: i32, shape: Shape) -> Self {
        Self { id, shape }
    }

    /// The surface id cited by cell algebra.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// The kind of this surface.
    pub fn kind(&self) -> SurfaceKind {
        self.shape.kind()
    }

    /// The underlying geometry.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Implicit-form residual at `p`; negative on the interior side.
    pub fn eval(&self, p: &Point3) -> f64 {
        self.shape.eval(p)
    }

    /// Which side of the surface `p` lies on: `-1`, `0` (within the
    /// tolerance band), or `+1`.
    pub fn side(&self, p: &Point3) -> i8 {
        self.side_with(p, &Tolerance::DEFAULT)
    }

    /// [`side`](Self::side) with an explicit tolerance.
    pub fn side_with(&self, p: &Point3, tol: &Tolerance) -> i8 {
        banded_sign(self.shape.eval(p), tol)
    }

    /// Distances along `origin + t * direction` at which the line crosses
    /// this surface, ascending, of any sign, tangencies collapsed to one.
    pub fn intersection_distances(&self, origin: &Point3, direction: &Dir3) -> Vec<f64> {
        self.shape
            .intersect(origin, direction, &Tolerance::DEFAULT)
            .to_vec()
    }
}
