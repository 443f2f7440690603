//! Track: the ordered output of a ray query.

use crate::error::CellError;
use raycell_math::{Dir3, Point3, Tolerance, Vec3};

/// One maximal interval along the ray for which the cell is valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Distance at which the ray enters the solid.
    pub entry: f64,
    /// Distance at which the ray exits; `+inf` when the solid is unbounded
    /// in the ray direction.
    pub exit: f64,
}

impl Link {
    /// Path length through the solid for this link.
    pub fn length(&self) -> f64 {
        self.exit - self.entry
    }
}

/// The ordered sequence of entry/exit intervals a directed line cuts
/// through one solid.
///
/// Links are increasing and non-overlapping; links that touch within the
/// track tolerance are merged as they are added, so two regions sharing a
/// boundary produce one interval. Tracks are transient: created per query
/// and consumed immediately by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    origin: Point3,
    direction: Dir3,
    links: Vec<Link>,
}

impl Track {
    /// Create an empty track for the given ray.
    ///
    /// The direction is normalized, so link distances are geometric lengths.
    /// Rejects a zero-length direction and non-finite inputs.
    pub fn new(origin: Point3, direction: Vec3) -> Result<Self, CellError> {
        if !origin.coords.iter().all(|c| c.is_finite())
            || !direction.iter().all(|c| c.is_finite())
        {
            return Err(CellError::NotFinite);
        }
        let len = direction.norm();
        if len < 1e-12 {
            return Err(CellError::ZeroDirection);
        }
        Ok(Self {
            origin,
            direction: Dir3::new_unchecked(direction / len),
            links: Vec::new(),
        })
    }

    /// Ray origin.
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Unit ray direction.
    pub fn direction(&self) -> &Dir3 {
        &self.direction
    }

    /// Evaluate the ray at distance `t`.
    #[inline]
    pub fn point_at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction.as_ref()
    }

    /// The links cut so far, ordered by entry distance.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the ray missed the solid entirely.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Total path length through the solid; `+inf` if any link is unbounded.
    pub fn total_path_length(&self) -> f64 {
        self.links.iter().map(Link::length).sum()
    }

    /// Append an interval, keeping links ordered and merging any that touch
    /// within the track tolerance.
    pub fn add_link(&mut self, entry: f64, exit: f64) {
        debug_assert!(exit >= entry, "link exits before it enters");
        let idx = self.links.partition_point(|l| l.entry < entry);
        self.links.insert(idx, Link { entry, exit });
        self.coalesce();
    }

    fn coalesce(&mut self) {
        let tol = Tolerance::DEFAULT;
        let mut merged: Vec<Link> = Vec::with_capacity(self.links.len());
        for link in self.links.drain(..) {
            match merged.last_mut() {
                Some(prev) if link.entry <= prev.exit + tol.track => {
                    prev.exit = prev.exit.max(link.exit);
                }
                _ => merged.push(link),
            }
        }
        self.links = merged;
    }
}
