//! The boolean rule tree combining signed surface references into a solid.

use crate::error::AlgebraError;
use raycell_math::Point3;
use raycell_surface::{Surface, SurfaceRegistry};
use std::collections::HashMap;
use std::sync::Arc;

/// Which side of an oriented surface a clause selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// The side where the implicit form is negative (interior of closed
    /// surfaces).
    Negative,
    /// The side where the implicit form is positive.
    Positive,
}

impl Sense {
    /// The sign this sense matches against [`Surface::side`].
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Self::Negative => -1,
            Self::Positive => 1,
        }
    }
}

/// Three-valued logic for evaluation under partial knowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tristate {
    /// Definitely false.
    False,
    /// Definitely true.
    True,
    /// Not decidable from the given sides.
    Unknown,
}

impl Tristate {
    /// Lift a boolean.
    #[inline]
    pub fn from_bool(b: bool) -> Self {
        if b {
            Self::True
        } else {
            Self::False
        }
    }

    /// Ternary AND.
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::False, _) | (_, Self::False) => Self::False,
            (Self::True, Self::True) => Self::True,
            _ => Self::Unknown,
        }
    }

    /// Ternary OR.
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::True, _) | (_, Self::True) => Self::True,
            (Self::False, Self::False) => Self::False,
            _ => Self::Unknown,
        }
    }

    /// Ternary NOT.
    pub fn not(self) -> Self {
        match self {
            Self::False => Self::True,
            Self::True => Self::False,
            Self::Unknown => Self::Unknown,
        }
    }
}

/// A signed surface reference: the rule-tree literal.
///
/// `resolved` is filled by [`Rule::populate`]; an unresolved clause rejects
/// point queries by evaluating to false.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    /// Cited surface id.
    pub surface: i32,
    /// Which side of the surface satisfies the clause.
    pub sense: Sense,
    resolved: Option<Arc<Surface>>,
}

impl Clause {
    /// Create an unresolved clause.
    pub fn new(surface: i32, sense: Sense) -> Self {
        Self {
            surface,
            sense,
            resolved: None,
        }
    }

    /// The resolved surface, if populated.
    pub fn surface_ref(&self) -> Option<&Arc<Surface>> {
        self.resolved.as_ref()
    }

    fn matches(&self, side: i8) -> bool {
        // The tolerance band satisfies either sense, so solids are closed
        // sets and boundary points count as inside.
        side == 0 || side == self.sense.sign()
    }
}

/// A node of the boolean algebra over signed surface references.
///
/// Owned tagged union; strictly a tree, never a graph — `#<cell>`
/// references are resolved by structural cloning, not back-references.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Logical AND of both children.
    Intersection(Box<Rule>, Box<Rule>),
    /// Logical OR of both children.
    Union(Box<Rule>, Box<Rule>),
    /// Logical NOT of the child.
    Complement(Box<Rule>),
    /// A signed surface reference.
    Clause(Clause),
    /// A constant truth value.
    Constant(Tristate),
    /// Placeholder for `#<cell>`, substituted by complement conversion.
    CellRef(i32),
}

impl Rule {
    /// Shorthand for an intersection node.
    pub fn intersection(left: Rule, right: Rule) -> Self {
        Self::Intersection(Box::new(left), Box::new(right))
    }

    /// Shorthand for a union node.
    pub fn union(left: Rule, right: Rule) -> Self {
        Self::Union(Box::new(left), Box::new(right))
    }

    /// Shorthand for a complement node.
    pub fn complement(child: Rule) -> Self {
        Self::Complement(Box::new(child))
    }

    /// Shorthand for a signed surface clause.
    pub fn clause(surface: i32, sense: Sense) -> Self {
        Self::Clause(Clause::new(surface, sense))
    }

    /// Recursive ternary evaluation at a point.
    ///
    /// Unresolved clauses and cell references evaluate to false, as does
    /// `Constant(Unknown)` — an unpopulated tree admits no interior.
    pub fn is_valid(&self, p: &Point3) -> bool {
        match self {
            Self::Intersection(l, r) => l.is_valid(p) && r.is_valid(p),
            Self::Union(l, r) => l.is_valid(p) || r.is_valid(p),
            Self::Complement(c) => !c.is_valid(p),
            Self::Clause(clause) => match &clause.resolved {
                Some(surface) => clause.matches(surface.side(p)),
                None => false,
            },
            Self::Constant(t) => *t == Tristate::True,
            Self::CellRef(_) => false,
        }
    }

    /// Evaluation driven by a map of known surface sides.
    ///
    /// Surfaces absent from the map are unknown. Short-circuits:
    /// intersection is false once either child is false, union is true once
    /// either child is true; otherwise unknowns propagate.
    pub fn eval_sides(&self, sides: &HashMap<i32, i8>) -> Tristate {
        match self {
            Self::Intersection(l, r) => {
                let left = l.eval_sides(sides);
                if left == Tristate::False {
                    return Tristate::False;
                }
                left.and(r.eval_sides(sides))
            }
            Self::Union(l, r) => {
                let left = l.eval_sides(sides);
                if left == Tristate::True {
                    return Tristate::True;
                }
                left.or(r.eval_sides(sides))
            }
            Self::Complement(c) => c.eval_sides(sides).not(),
            Self::Clause(clause) => match sides.get(&clause.surface) {
                Some(&side) => Tristate::from_bool(clause.matches(side)),
                None => Tristate::Unknown,
            },
            Self::Constant(t) => *t,
            Self::CellRef(_) => Tristate::Unknown,
        }
    }

    /// Resolve every clause against the registry.
    ///
    /// Fails on the first unknown surface id or leftover `#<cell>`
    /// reference; callers treat a failed populate as leaving the whole tree
    /// unpopulated.
    pub fn populate(&mut self, registry: &SurfaceRegistry) -> Result<(), AlgebraError> {
        match self {
            Self::Intersection(l, r) | Self::Union(l, r) => {
                l.populate(registry)?;
                r.populate(registry)
            }
            Self::Complement(c) => c.populate(registry),
            Self::Clause(clause) => match registry.get(clause.surface) {
                Some(surface) => {
                    clause.resolved = Some(surface.clone());
                    Ok(())
                }
                None => Err(AlgebraError::UnresolvedSurface(clause.surface)),
            },
            Self::Constant(_) => Ok(()),
            Self::CellRef(id) => Err(AlgebraError::UnresolvedCell(*id)),
        }
    }

    /// Whether every clause is resolved and no cell reference remains.
    pub fn is_populated(&self) -> bool {
        match self {
            Self::Intersection(l, r) | Self::Union(l, r) => l.is_populated() && r.is_populated(),
            Self::Complement(c) => c.is_populated(),
            Self::Clause(clause) => clause.resolved.is_some(),
            Self::Constant(_) => true,
            Self::CellRef(_) => false,
        }
    }

    /// Distinct surface ids cited by the tree, ascending.
    pub fn surface_ids(&self) -> Vec<i32> {
        let mut ids = Vec::new();
        self.collect_surface_ids(&mut ids);
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn collect_surface_ids(&self, ids: &mut Vec<i32>) {
        match self {
            Self::Intersection(l, r) | Self::Union(l, r) => {
                l.collect_surface_ids(ids);
                r.collect_surface_ids(ids);
            }
            Self::Complement(c) => c.collect_surface_ids(ids),
            Self::Clause(clause) => ids.push(clause.surface),
            Self::Constant(_) | Self::CellRef(_) => {}
        }
    }

    /// Resolved surfaces reachable from the tree, deduplicated by id and
    /// sorted ascending by id.
    pub fn resolved_surfaces(&self) -> Vec<Arc<Surface>> {
        let mut map: HashMap<i32, Arc<Surface>> = HashMap::new();
        self.collect_resolved(&mut map);
        let mut surfaces: Vec<Arc<Surface>> = map.into_values().collect();
        surfaces.sort_unstable_by_key(|s| s.id());
        surfaces
    }

    fn collect_resolved(&self, map: &mut HashMap<i32, Arc<Surface>>) {
        match self {
            Self::Intersection(l, r) | Self::Union(l, r) => {
                l.collect_resolved(map);
                r.collect_resolved(map);
            }
            Self::Complement(c) => c.collect_resolved(map),
            Self::Clause(clause) => {
                if let Some(surface) = &clause.resolved {
                    map.entry(clause.surface).or_insert_with(|| surface.clone());
                }
            }
            Self::Constant(_) | Self::CellRef(_) => {}
        }
    }

    /// Cell ids cited by `#<cell>` placeholders, ascending.
    pub fn cell_refs(&self) -> Vec<i32> {
        let mut ids = Vec::new();
        self.collect_cell_refs(&mut ids);
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn collect_cell_refs(&self, ids: &mut Vec<i32>) {
        match self {
            Self::Intersection(l, r) | Self::Union(l, r) => {
                l.collect_cell_refs(ids);
                r.collect_cell_refs(ids);
            }
            Self::Complement(c) => c.collect_cell_refs(ids),
            Self::CellRef(id) => ids.push(*id),
            Self::Clause(_) | Self::Constant(_) => {}
        }
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Intersection(l, r) | Self::Union(l, r) => 1 + l.node_count() + r.node_count(),
            Self::Complement(c) => 1 + c.node_count(),
            Self::Clause(_) | Self::Constant(_) | Self::CellRef(_) => 1,
        }
    }
}
