//! Ray tracing: building a track of entry/exit intervals through a cell.

use crate::cell::Cell;
use crate::error::CellError;
use crate::track::Track;
use raycell_math::{Point3, Tolerance, Vec3};

impl Cell {
    /// Convenience wrapper: build a [`Track`] for the given ray and fill it.
    pub fn trace(&self, origin: Point3, direction: Vec3) -> Result<Track, CellError> {
        let mut track = Track::new(origin, direction)?;
        self.intercept_surface(&mut track)?;
        Ok(track)
    }

    /// Trace the track's ray through this solid, appending one link per
    /// maximal inside interval. Returns the number of links appended.
    ///
    /// Candidate crossings are gathered from every surface in the cell's
    /// surface list, sorted, and clustered within the track tolerance so
    /// coincident and tangent crossings form a single event. The interval
    /// between consecutive events has constant validity, so each interval is
    /// classified by probing its midpoint; validity flips open and close
    /// links. A solid still valid past the last event yields a final link
    /// with an infinite exit distance.
    pub fn intercept_surface(&self, track: &mut Track) -> Result<usize, CellError> {
        if !self.is_populated() {
            return Err(CellError::Unpopulated(self.id()));
        }
        let tol = Tolerance::DEFAULT;
        let origin = *track.origin();
        let direction = *track.direction();

        let mut events: Vec<f64> = Vec::new();
        for surface in self.surfaces() {
            for t in surface.intersection_distances(&origin, &direction) {
                if t > tol.track {
                    events.push(t);
                }
            }
        }

        if events.is_empty() {
            // No crossing ahead: the ray is either entirely outside or
            // entirely inside an unbounded solid.
            if self.is_valid(&origin) {
                track.add_link(0.0, f64::INFINITY);
                return Ok(1);
            }
            return Ok(0);
        }

        events.sort_unstable_by(f64::total_cmp);
        let mut clustered: Vec<f64> = Vec::with_capacity(events.len());
        for t in events {
            match clustered.last() {
                Some(&last) if tol.same_event(last, t) => {}
                _ => clustered.push(t),
            }
        }

        let mut appended = 0;
        let mut open: Option<f64> = None;
        let count = clustered.len();
        for i in 0..=count {
            let (start, probe) = if i == 0 {
                (0.0, 0.5 * clustered[0])
            } else if i == count {
                (clustered[count - 1], clustered[count - 1] + 1.0)
            } else {
                (clustered[i - 1], 0.5 * (clustered[i - 1] + clustered[i]))
            };
            let inside = self.is_valid(&track.point_at(probe));
            match (inside, open) {
                (true, None) => open = Some(start),
                (false, Some(entry)) => {
                    track.add_link(entry, start);
                    appended += 1;
                    open = None;
                }
                _ => {}
            }
        }
        if let Some(entry) = open {
            track.add_link(entry, f64::INFINITY);
            appended += 1;
        }
        Ok(appended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use raycell_surface::SurfaceRegistry;

    fn registry() -> SurfaceRegistry {
        SurfaceRegistry::parse(
            "1 so 2\n\
             2 so 4\n\
             3 s 6 0 0 2\n\
             4 pz 0\n\
             5 s 4 0 0 2\n\
             11 px -1\n\
             12 px 1\n\
             13 py -1\n\
             14 py 1\n\
             15 pz -1\n\
             16 pz 1\n",
        )
        .unwrap()
    }

    fn populated_cell(expr: &str) -> Cell {
        let mut cell = Cell::with_definition(1, expr).unwrap();
        cell.populate(&registry()).unwrap();
        cell
    }

    #[test]
    fn test_ray_through_sphere() {
        let cell = populated_cell("-1");
        let track = cell
            .trace(Point3::new(-5.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0))
            .unwrap();
        assert_eq!(track.len(), 1);
        assert_relative_eq!(track.links()[0].entry, 3.0, max_relative = 1e-10);
        assert_relative_eq!(track.links()[0].exit, 7.0, max_relative = 1e-10);
    }

    #[test]
    fn test_ray_misses_sphere() {
        let cell = populated_cell("-1");
        let track = cell
            .trace(Point3::new(-5.0, 3.0, 0.0), Vec3::x())
            .unwrap();
        assert!(track.is_empty());
    }

    #[test]
    fn test_ray_from_inside_sphere() {
        let cell = populated_cell("-1");
        let track = cell.trace(Point3::origin(), Vec3::x()).unwrap();
        assert_eq!(track.len(), 1);
        assert_relative_eq!(track.links()[0].entry, 0.0);
        assert_relative_eq!(track.links()[0].exit, 2.0, max_relative = 1e-10);
    }

    #[test]
    fn test_ray_through_shell() {
        // Between spheres 1 and 2: two separate links.
        let cell = populated_cell("-2 1");
        let track = cell
            .trace(Point3::new(-10.0, 0.0, 0.0), Vec3::x())
            .unwrap();
        assert_eq!(track.len(), 2);
        assert_relative_eq!(track.links()[0].entry, 6.0, max_relative = 1e-10);
        assert_relative_eq!(track.links()[0].exit, 8.0, max_relative = 1e-10);
        assert_relative_eq!(track.links()[1].entry, 12.0, max_relative = 1e-10);
        assert_relative_eq!(track.links()[1].exit, 14.0, max_relative = 1e-10);
        assert_relative_eq!(track.total_path_length(), 4.0, max_relative = 1e-10);
    }

    #[test]
    fn test_cuboid_two_events_any_order() {
        // The same six planes combined in several orders must give the
        // same single [4, 6] link for a ray through the center.
        let expressions = [
            "11 -12 13 -14 15 -16",
            "-16 15 -14 13 -12 11",
            "13 11 -16 -12 15 -14",
        ];
        for expr in expressions {
            let cell = populated_cell(expr);
            let track = cell
                .trace(Point3::new(-5.0, 0.0, 0.0), Vec3::x())
                .unwrap();
            assert_eq!(track.len(), 1, "for {expr:?}");
            assert_relative_eq!(track.links()[0].entry, 4.0, max_relative = 1e-10);
            assert_relative_eq!(track.links()[0].exit, 6.0, max_relative = 1e-10);
        }
    }

    #[test]
    fn test_tangent_ray_is_non_crossing() {
        // Ray grazing the sphere at (0, 2, 0): one collapsed event,
        // validity never flips, no link.
        let cell = populated_cell("-1");
        let track = cell
            .trace(Point3::new(-5.0, 2.0, 0.0), Vec3::x())
            .unwrap();
        assert!(track.is_empty());
    }

    #[test]
    fn test_touching_union_merges() {
        // Spheres of radius 2 at x = 6 and x = 4 overlap; with sphere 5
        // tangent to sphere 1 at (2, 0, 0) the union is contiguous.
        let cell = populated_cell("-1 : -5");
        let track = cell
            .trace(Point3::new(-5.0, 0.0, 0.0), Vec3::x())
            .unwrap();
        assert_eq!(track.len(), 1);
        assert_relative_eq!(track.links()[0].entry, 3.0, max_relative = 1e-10);
        assert_relative_eq!(track.links()[0].exit, 11.0, max_relative = 1e-10);
    }

    #[test]
    fn test_disjoint_union_two_links() {
        // Spheres at the origin and at x = 6 leave a gap of 2.
        let cell = populated_cell("-1 : -3");
        let track = cell
            .trace(Point3::new(-5.0, 0.0, 0.0), Vec3::x())
            .unwrap();
        assert_eq!(track.len(), 2);
        assert_relative_eq!(track.links()[0].exit, 7.0, max_relative = 1e-10);
        assert_relative_eq!(track.links()[1].entry, 9.0, max_relative = 1e-10);
    }

    #[test]
    fn test_unbounded_half_space() {
        let cell = populated_cell("4");
        let track = cell
            .trace(Point3::new(0.0, 0.0, -3.0), Vec3::z())
            .unwrap();
        assert_eq!(track.len(), 1);
        assert_relative_eq!(track.links()[0].entry, 3.0, max_relative = 1e-10);
        assert!(track.links()[0].exit.is_infinite());
        assert!(track.total_path_length().is_infinite());

        // Fully inside, pointing away from the boundary: no event ahead.
        let inside = cell.trace(Point3::new(0.0, 0.0, 5.0), Vec3::z()).unwrap();
        assert_eq!(inside.len(), 1);
        assert_relative_eq!(inside.links()[0].entry, 0.0);
        assert!(inside.links()[0].exit.is_infinite());
    }

    #[test]
    fn test_unpopulated_cell_errors() {
        let cell = Cell::with_definition(1, "-1").unwrap();
        let mut track = Track::new(Point3::origin(), Vec3::x()).unwrap();
        assert!(matches!(
            cell.intercept_surface(&mut track),
            Err(CellError::Unpopulated(1))
        ));
    }

    #[test]
    fn test_returns_appended_count() {
        let cell = populated_cell("-2 1");
        let mut track = Track::new(Point3::new(-10.0, 0.0, 0.0), Vec3::x()).unwrap();
        let appended = cell.intercept_surface(&mut track).unwrap();
        assert_eq!(appended, 2);
        assert_eq!(track.len(), 2);
    }
}
