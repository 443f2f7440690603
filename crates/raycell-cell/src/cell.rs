//! A named solid: rule tree, resolved surface list, and material metadata.

use crate::error::CellError;
use crate::material::Material;
use log::debug;
use raycell_algebra::{Rule, Tristate};
use raycell_math::Point3;
use raycell_surface::{Surface, SurfaceRegistry};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// A solid region defined by a boolean combination of quadric half-spaces.
///
/// Built in three steps: [`set_definition`](Cell::set_definition) parses the
/// cell algebra, [`convert_complement`](Cell::convert_complement) substitutes
/// `#<cell>` references, and [`populate`](Cell::populate) resolves surface
/// ids against a registry. Only then do point and ray queries answer; after
/// population a cell is immutable in practice and safe to share across
/// worker threads.
#[derive(Debug, Clone)]
pub struct Cell {
    id: i32,
    rule: Option<Rule>,
    surfaces: Vec<Arc<Surface>>,
    material: Option<Material>,
    populated: bool,
}

impl Cell {
    /// Create a cell with no definition.
    pub fn new(id: i32) -> Self {
        Self {
            id,
            rule: None,
            surfaces: Vec::new(),
            material: None,
            populated: false,
        }
    }

    /// Create a cell and parse its definition in one step.
    pub fn with_definition(id: i32, expression: &str) -> Result<Self, CellError> {
        let mut cell = Self::new(id);
        cell.set_definition(expression)?;
        Ok(cell)
    }

    /// The cell id.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// The rule tree, if a definition has been set.
    pub fn rule(&self) -> Option<&Rule> {
        self.rule.as_ref()
    }

    /// The resolved surface list (empty until populated), id-ascending.
    pub fn surfaces(&self) -> &[Arc<Surface>] {
        &self.surfaces
    }

    /// The material filling this cell, if any.
    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    /// Attach material metadata.
    pub fn set_material(&mut self, material: Material) {
        self.material = Some(material);
    }

    /// Parse a cell-algebra expression into this cell's rule tree.
    ///
    /// Resets population state; `populate` must run again before queries.
    pub fn set_definition(&mut self, expression: &str) -> Result<(), CellError> {
        self.rule = Some(Rule::from_expression(expression)?);
        self.surfaces.clear();
        self.populated = false;
        Ok(())
    }

    /// Wrap the current rule in a complement, turning the cell inside out.
    pub fn make_complement(&mut self) {
        if let Some(rule) = self.rule.take() {
            self.rule = Some(Rule::complement(rule));
        }
    }

    /// Substitute every `#<cell>` placeholder with the complement of a
    /// structural clone of the referenced cell's rule tree, then simplify to
    /// bound the growth. Returns the number of nodes simplification removed.
    ///
    /// References resolve recursively; a reference cycle is an error, as the
    /// tree must stay acyclic.
    pub fn convert_complement(&mut self, cells: &BTreeMap<i32, Cell>) -> Result<usize, CellError> {
        let rule = self.rule.as_mut().ok_or(CellError::NoDefinition(self.id))?;
        let mut active = vec![self.id];
        substitute_cell_refs(rule, cells, &mut active)?;
        let removed = rule.simplify();
        self.surfaces.clear();
        self.populated = false;
        if removed > 0 {
            debug!("cell {}: simplify removed {removed} nodes", self.id);
        }
        Ok(removed)
    }

    /// Resolve every surface reference against the registry and rebuild the
    /// surface list. All-or-nothing: on error the cell stays unpopulated and
    /// no sibling state is touched.
    pub fn populate(&mut self, registry: &SurfaceRegistry) -> Result<(), CellError> {
        self.surfaces.clear();
        self.populated = false;
        let rule = self.rule.as_mut().ok_or(CellError::NoDefinition(self.id))?;
        rule.populate(registry)?;
        self.create_surface_list();
        self.populated = true;
        debug!(
            "cell {}: populated with {} surfaces",
            self.id,
            self.surfaces.len()
        );
        Ok(())
    }

    /// Whether `populate` has succeeded since the last definition change.
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    fn create_surface_list(&mut self) {
        self.surfaces = self
            .rule
            .as_ref()
            .map(Rule::resolved_surfaces)
            .unwrap_or_default();
    }

    /// Whether the point lies inside (or on the boundary of) the solid.
    ///
    /// An unpopulated cell admits no interior and answers false.
    pub fn is_valid(&self, p: &Point3) -> bool {
        match &self.rule {
            Some(rule) if self.populated => rule.is_valid(p),
            _ => false,
        }
    }

    /// Whether the point lies on the skin of the solid.
    ///
    /// Surfaces whose tolerance band contains the point are enumerated over
    /// both senses; the point is on the skin iff validity depends on the
    /// assignment — a boundary surface passing through the interior of a
    /// union does not count.
    pub fn is_on_side(&self, p: &Point3) -> bool {
        let Some(rule) = &self.rule else {
            return false;
        };
        if !self.populated {
            return false;
        }

        let mut known: HashMap<i32, i8> = HashMap::new();
        let mut boundary: Vec<i32> = Vec::new();
        for surface in &self.surfaces {
            match surface.side(p) {
                0 => boundary.push(surface.id()),
                side => {
                    known.insert(surface.id(), side);
                }
            }
        }
        if boundary.is_empty() {
            return false;
        }

        let mut any_valid = false;
        let mut any_invalid = false;
        for bits in 0u32..(1 << boundary.len()) {
            for (i, id) in boundary.iter().enumerate() {
                known.insert(*id, if bits & (1 << i) != 0 { 1 } else { -1 });
            }
            match rule.eval_sides(&known) {
                Tristate::True => any_valid = true,
                Tristate::False => any_invalid = true,
                // Every referenced surface has an assigned side.
                Tristate::Unknown => {}
            }
            if any_valid && any_invalid {
                return true;
            }
        }
        false
    }
}

fn substitute_cell_refs(
    rule: &mut Rule,
    cells: &BTreeMap<i32, Cell>,
    active: &mut Vec<i32>,
) -> Result<(), CellError> {
    match rule {
        Rule::Intersection(l, r) | Rule::Union(l, r) => {
            substitute_cell_refs(l, cells, active)?;
            substitute_cell_refs(r, cells, active)
        }
        Rule::Complement(c) => substitute_cell_refs(c, cells, active),
        Rule::CellRef(id) => {
            let id = *id;
            if active.contains(&id) {
                return Err(CellError::CircularReference(id));
            }
            let target = cells.get(&id).ok_or(CellError::UnresolvedCell(id))?;
            let mut cloned = target
                .rule
                .clone()
                .ok_or(CellError::UnresolvedCell(id))?;
            active.push(id);
            substitute_cell_refs(&mut cloned, cells, active)?;
            active.pop();
            *rule = Rule::complement(cloned);
            Ok(())
        }
        Rule::Clause(_) | Rule::Constant(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SurfaceRegistry {
        SurfaceRegistry::parse(
            "1 so 2\n\
             2 so 4\n\
             11 px -1\n\
             12 px 1\n\
             13 py -1\n\
             14 py 1\n\
             15 pz -1\n\
             16 pz 1\n",
        )
        .unwrap()
    }

    fn populated_cell(id: i32, expr: &str) -> Cell {
        let mut cell = Cell::with_definition(id, expr).unwrap();
        cell.populate(&registry()).unwrap();
        cell
    }

    #[test]
    fn test_sphere_cell() {
        let cell = populated_cell(1, "-1");
        assert!(cell.is_valid(&Point3::origin()));
        assert!(cell.is_valid(&Point3::new(2.0, 0.0, 0.0)));
        assert!(!cell.is_valid(&Point3::new(2.1, 0.0, 0.0)));
        assert_eq!(cell.surfaces().len(), 1);
    }

    #[test]
    fn test_unpopulated_cell_rejects_queries() {
        let cell = Cell::with_definition(1, "-1").unwrap();
        assert!(!cell.is_populated());
        assert!(!cell.is_valid(&Point3::origin()));
        assert!(!cell.is_on_side(&Point3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_populate_failure_leaves_cell_unpopulated() {
        let mut cell = Cell::with_definition(1, "-1 -99").unwrap();
        assert!(cell.populate(&registry()).is_err());
        assert!(!cell.is_populated());
        assert!(cell.surfaces().is_empty());
    }

    #[test]
    fn test_surface_list_deduplicated() {
        let cell = populated_cell(1, "-1 (1 : -2) -1");
        let ids: Vec<i32> = cell.surfaces().iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_make_complement_flips_validity() {
        let mut cell = populated_cell(1, "-1");
        cell.make_complement();
        assert!(!cell.is_valid(&Point3::origin()));
        assert!(cell.is_valid(&Point3::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn test_convert_complement() {
        let inner = populated_cell(1, "-1");
        let mut cells = BTreeMap::new();
        cells.insert(1, inner);

        let mut outer = Cell::with_definition(2, "-2 #1").unwrap();
        outer.convert_complement(&cells).unwrap();
        outer.populate(&registry()).unwrap();

        // Inside sphere 2 but not inside sphere 1: a shell.
        assert!(outer.is_valid(&Point3::new(3.0, 0.0, 0.0)));
        assert!(!outer.is_valid(&Point3::origin()));
        assert!(!outer.is_valid(&Point3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_convert_complement_nested() {
        // Cell 3 references cell 2, which references cell 1.
        let mut cells = BTreeMap::new();
        cells.insert(1, Cell::with_definition(1, "-1").unwrap());
        cells.insert(2, Cell::with_definition(2, "-2 #1").unwrap());

        let mut outer = Cell::with_definition(3, "#2").unwrap();
        outer.convert_complement(&cells).unwrap();
        outer.populate(&registry()).unwrap();

        // Complement of the shell: inside sphere 1, or outside sphere 2.
        assert!(outer.is_valid(&Point3::origin()));
        assert!(outer.is_valid(&Point3::new(5.0, 0.0, 0.0)));
        assert!(!outer.is_valid(&Point3::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn test_convert_complement_missing_cell() {
        let cells = BTreeMap::new();
        let mut cell = Cell::with_definition(2, "#9").unwrap();
        assert!(matches!(
            cell.convert_complement(&cells),
            Err(CellError::UnresolvedCell(9))
        ));
    }

    #[test]
    fn test_convert_complement_cycle() {
        let mut cells = BTreeMap::new();
        cells.insert(1, Cell::with_definition(1, "#2").unwrap());
        cells.insert(2, Cell::with_definition(2, "#1").unwrap());

        let mut cell = Cell::with_definition(3, "#1").unwrap();
        assert!(matches!(
            cell.convert_complement(&cells),
            Err(CellError::CircularReference(_))
        ));

        // Self-reference is the smallest cycle.
        let mut own = Cell::with_definition(4, "-1 #4").unwrap();
        assert!(matches!(
            own.convert_complement(&BTreeMap::new()),
            Err(CellError::CircularReference(4))
        ));
    }

    #[test]
    fn test_is_on_side_cuboid() {
        let cell = populated_cell(1, "11 -12 13 -14 15 -16");

        // Strictly inside and strictly outside.
        assert!(!cell.is_on_side(&Point3::origin()));
        assert!(!cell.is_on_side(&Point3::new(5.0, 5.0, 5.0)));

        // A face, an edge, and a corner.
        assert!(cell.is_on_side(&Point3::new(1.0, 0.0, 0.0)));
        assert!(cell.is_on_side(&Point3::new(1.0, 1.0, 0.0)));
        assert!(cell.is_on_side(&Point3::new(1.0, 1.0, 1.0)));

        // On the extended plane x = 1 but far from the cuboid.
        assert!(!cell.is_on_side(&Point3::new(1.0, 9.0, 0.0)));
    }

    #[test]
    fn test_material_metadata() {
        let mut cell = populated_cell(1, "-1");
        assert!(cell.material().is_none());
        cell.set_material(Material::new(3, 0.07, 300.0));
        assert_eq!(cell.material().unwrap().id, 3);
    }

    #[test]
    fn test_determinism_across_reparses() {
        let a = populated_cell(1, "-2 (1 : -1)");
        let b = populated_cell(1, "-2 (1 : -1)");
        let mut rng = fastrand::Rng::with_seed(99);
        for _ in 0..10_000 {
            let p = Point3::new(
                rng.f64() * 10.0 - 5.0,
                rng.f64() * 10.0 - 5.0,
                rng.f64() * 10.0 - 5.0,
            );
            assert_eq!(a.is_valid(&p), b.is_valid(&p));
        }
    }

    #[test]
    fn test_shared_surfaces_across_cells() {
        let reg = registry();
        let mut a = Cell::with_definition(1, "-1").unwrap();
        let mut b = Cell::with_definition(2, "-1 -2").unwrap();
        a.populate(&reg).unwrap();
        b.populate(&reg).unwrap();
        assert!(Arc::ptr_eq(&a.surfaces()[0], &b.surfaces()[0]));
    }
}
