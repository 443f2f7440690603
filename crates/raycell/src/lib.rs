#![warn(missing_docs)]

//! raycell — CSG kernel for arbitrarily shaped sample volumes.
//!
//! Solids are boolean combinations of signed quadric half-spaces, written
//! in a textual cell algebra; the two queries the attenuation integrators
//! need are point classification and ray tracing:
//!
//! ```
//! use raycell::{Geometry, Point3, Vec3};
//!
//! let mut geometry = Geometry::new();
//! geometry.add_surfaces("1 so 2").unwrap();
//! geometry.add_cell(1, "-1").unwrap();
//! geometry.finalize().unwrap();
//!
//! let sphere = geometry.cell(1).unwrap();
//! assert!(sphere.is_valid(&Point3::origin()));
//!
//! let track = sphere
//!     .trace(Point3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0))
//!     .unwrap();
//! assert_eq!(track.len(), 1);
//! ```

pub use raycell_algebra::{AlgebraError, Clause, Rule, Sense, Tristate};
pub use raycell_cell::{Cell, CellError, Link, Material, Track};
pub use raycell_math::{Dir3, Point3, Tolerance, Vec3};
pub use raycell_surface::{
    Cone, Cylinder, Plane, Quadric, QuadraticRoots, Shape, Sphere, Surface, SurfaceError,
    SurfaceKind, SurfaceRegistry,
};

use log::debug;
use std::collections::BTreeMap;

/// A complete sample description: one surface registry plus the cells
/// defined over it.
///
/// Cells are assembled in three phases driven by [`finalize`]: every
/// `#<cell>` reference is substituted (ascending cell id), every rule is
/// populated against the registry, and from then on the geometry is frozen —
/// queries take `&self` and the whole value is safe to share across
/// integrator worker threads.
///
/// [`finalize`]: Geometry::finalize
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    registry: SurfaceRegistry,
    cells: BTreeMap<i32, Cell>,
}

impl Geometry {
    /// Create an empty geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a block of surface definition lines into the registry.
    pub fn add_surfaces(&mut self, text: &str) -> Result<(), SurfaceError> {
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            self.registry
                .parse_line(line)
                .map_err(|e| e.at_line(index + 1))?;
        }
        Ok(())
    }

    /// Parse a cell-algebra expression and register it under `id`.
    ///
    /// A parse failure never partially constructs the cell and leaves the
    /// sibling cells untouched.
    pub fn add_cell(&mut self, id: i32, expression: &str) -> Result<(), CellError> {
        let cell = Cell::with_definition(id, expression)?;
        self.cells.insert(id, cell);
        Ok(())
    }

    /// Register a cell with material metadata attached.
    pub fn add_cell_with_material(
        &mut self,
        id: i32,
        expression: &str,
        material: Material,
    ) -> Result<(), CellError> {
        let mut cell = Cell::with_definition(id, expression)?;
        cell.set_material(material);
        self.cells.insert(id, cell);
        Ok(())
    }

    /// Resolve `#<cell>` references and populate every cell.
    ///
    /// Conversion runs in ascending cell-id order, so a cell may reference
    /// any other registered cell regardless of id ordering; cycles error.
    pub fn finalize(&mut self) -> Result<(), CellError> {
        let ids: Vec<i32> = self.cells.keys().copied().collect();
        for id in &ids {
            let mut cell = self
                .cells
                .remove(id)
                .expect("id collected from the map above");
            let result = cell.convert_complement(&self.cells);
            self.cells.insert(*id, cell);
            result?;
        }
        for cell in self.cells.values_mut() {
            cell.populate(&self.registry)?;
        }
        debug!(
            "finalized geometry: {} surfaces, {} cells",
            self.registry.len(),
            self.cells.len()
        );
        Ok(())
    }

    /// The surface registry.
    pub fn registry(&self) -> &SurfaceRegistry {
        &self.registry
    }

    /// Look up a cell by id.
    pub fn cell(&self, id: i32) -> Option<&Cell> {
        self.cells.get(&id)
    }

    /// Registered cell ids, ascending.
    pub fn cell_ids(&self) -> Vec<i32> {
        self.cells.keys().copied().collect()
    }
}
