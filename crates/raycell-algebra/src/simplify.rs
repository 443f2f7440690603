//! Algebraic simplification of rule trees.
//!
//! A single bottom-up pass over the boolean identities: constant absorption,
//! identity elements, complement of a constant, double negation. The rewrite
//! set only ever produces subtrees that are themselves fully simplified,
//! which makes the pass idempotent; none of the rewrites change the value of
//! the tree at any point.

use crate::rule::{Rule, Tristate};

impl Rule {
    /// Apply boolean identities bottom-up, returning the number of nodes
    /// removed.
    pub fn simplify(&mut self) -> usize {
        let before = self.node_count();
        let owned = std::mem::replace(self, Rule::Constant(Tristate::Unknown));
        *self = simplify_node(owned);
        before - self.node_count()
    }
}

fn simplify_node(rule: Rule) -> Rule {
    match rule {
        Rule::Intersection(left, right) => {
            let left = simplify_node(*left);
            let right = simplify_node(*right);
            match (left, right) {
                (Rule::Constant(Tristate::False), _) | (_, Rule::Constant(Tristate::False)) => {
                    Rule::Constant(Tristate::False)
                }
                (Rule::Constant(Tristate::True), keep) | (keep, Rule::Constant(Tristate::True)) => {
                    keep
                }
                (left, right) => Rule::Intersection(Box::new(left), Box::new(right)),
            }
        }
        Rule::Union(left, right) => {
            let left = simplify_node(*left);
            let right = simplify_node(*right);
            match (left, right) {
                (Rule::Constant(Tristate::True), _) | (_, Rule::Constant(Tristate::True)) => {
                    Rule::Constant(Tristate::True)
                }
                (Rule::Constant(Tristate::False), keep)
                | (keep, Rule::Constant(Tristate::False)) => keep,
                (left, right) => Rule::Union(Box::new(left), Box::new(right)),
            }
        }
        Rule::Complement(child) => {
            let child = simplify_node(*child);
            match child {
                // Only definite constants fold; point evaluation reads
                // Unknown as false, so NOT(Unknown) is not Unknown there.
                Rule::Constant(t @ (Tristate::True | Tristate::False)) => Rule::Constant(t.not()),
                Rule::Complement(inner) => *inner,
                child => Rule::Complement(Box::new(child)),
            }
        }
        leaf => leaf,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Sense;
    use raycell_math::Point3;
    use raycell_surface::SurfaceRegistry;

    #[test]
    fn test_constant_absorption() {
        let mut rule = Rule::intersection(
            Rule::clause(1, Sense::Negative),
            Rule::Constant(Tristate::True),
        );
        let removed = rule.simplify();
        assert_eq!(removed, 2);
        assert_eq!(rule, Rule::clause(1, Sense::Negative));

        let mut rule = Rule::intersection(
            Rule::clause(1, Sense::Negative),
            Rule::Constant(Tristate::False),
        );
        rule.simplify();
        assert_eq!(rule, Rule::Constant(Tristate::False));

        let mut rule = Rule::union(
            Rule::clause(1, Sense::Negative),
            Rule::Constant(Tristate::False),
        );
        rule.simplify();
        assert_eq!(rule, Rule::clause(1, Sense::Negative));

        let mut rule = Rule::union(
            Rule::clause(1, Sense::Negative),
            Rule::Constant(Tristate::True),
        );
        rule.simplify();
        assert_eq!(rule, Rule::Constant(Tristate::True));
    }

    #[test]
    fn test_double_negation() {
        let mut rule = Rule::complement(Rule::complement(Rule::clause(4, Sense::Positive)));
        let removed = rule.simplify();
        assert_eq!(removed, 2);
        assert_eq!(rule, Rule::clause(4, Sense::Positive));
    }

    #[test]
    fn test_complement_of_constant() {
        let mut rule = Rule::complement(Rule::Constant(Tristate::False));
        rule.simplify();
        assert_eq!(rule, Rule::Constant(Tristate::True));

        // Unknown does not fold.
        let mut rule = Rule::complement(Rule::Constant(Tristate::Unknown));
        assert_eq!(rule.simplify(), 0);
        assert_eq!(rule, Rule::complement(Rule::Constant(Tristate::Unknown)));
    }

    #[test]
    fn test_nested_constants_collapse() {
        // ((T AND F) OR x) -> x
        let mut rule = Rule::union(
            Rule::intersection(
                Rule::Constant(Tristate::True),
                Rule::Constant(Tristate::False),
            ),
            Rule::clause(2, Sense::Negative),
        );
        rule.simplify();
        assert_eq!(rule, Rule::clause(2, Sense::Negative));
    }

    /// Build a random tree over clauses of the given surface ids.
    fn random_tree(rng: &mut fastrand::Rng, depth: usize, ids: &[i32]) -> Rule {
        if depth == 0 || rng.u8(0..4) == 0 {
            return match rng.u8(0..4) {
                0 => Rule::Constant(Tristate::True),
                1 => Rule::Constant(Tristate::False),
                _ => {
                    let id = ids[rng.usize(0..ids.len())];
                    let sense = if rng.bool() {
                        Sense::Negative
                    } else {
                        Sense::Positive
                    };
                    Rule::clause(id, sense)
                }
            };
        }
        match rng.u8(0..3) {
            0 => Rule::intersection(
                random_tree(rng, depth - 1, ids),
                random_tree(rng, depth - 1, ids),
            ),
            1 => Rule::union(
                random_tree(rng, depth - 1, ids),
                random_tree(rng, depth - 1, ids),
            ),
            _ => Rule::complement(random_tree(rng, depth - 1, ids)),
        }
    }

    #[test]
    fn test_simplify_idempotent_and_semantics_preserving() {
        let registry = SurfaceRegistry::parse("1 so 2\n2 so 3\n3 pz 0\n4 cz 1\n").unwrap();
        let ids = [1, 2, 3, 4];
        let mut rng = fastrand::Rng::with_seed(42);

        for _ in 0..1000 {
            let mut rule = random_tree(&mut rng, 4, &ids);
            rule.populate(&registry).unwrap();
            let original = rule.clone();

            rule.simplify();
            let once = rule.clone();
            let removed_again = rule.simplify();
            assert_eq!(removed_again, 0, "second pass must be a no-op");
            assert_eq!(rule, once, "simplify must be idempotent");

            let p = Point3::new(
                rng.f64() * 8.0 - 4.0,
                rng.f64() * 8.0 - 4.0,
                rng.f64() * 8.0 - 4.0,
            );
            assert_eq!(
                original.is_valid(&p),
                rule.is_valid(&p),
                "simplify changed semantics for {original:?} at {p:?}"
            );
        }
    }
}
