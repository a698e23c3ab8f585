use std::cmp::Ordering;

use tracing::{debug, trace};

use super::heuristics;
use super::Csp;
use crate::constraint::ConstraintId;
use crate::value::Value;
use crate::variable::VarId;

/// An element of the AC-3 worklist: "constraint `c` restricts `u` given
/// `w`'s current domain". Ordered lexicographically on `(u, w, c)` by handle
/// identity, matching the reference implementation's `std::set<Arc<C>>` so
/// the worklist deduplicates and iterates deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Arc {
    pub(crate) u: VarId,
    pub(crate) w: VarId,
    pub(crate) c: ConstraintId,
}

impl PartialOrd for Arc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Arc {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.u, self.w, self.c).cmp(&(other.u, other.w, other.c))
    }
}

impl<V: Value> Csp<'_, V> {
    /// Backtracking with AC-3 propagation: before recursing on `x ← d`,
    /// enforces arc consistency rooted at `x` instead of the plain FC
    /// neighborhood scan.
    pub fn solve_arc(&mut self) -> bool {
        self.bump_recursive_call();
        trace!(calls = self.recursive_call_counter(), "entering solve_arc");

        if self.graph.all_variables_assigned() {
            return true;
        }

        let x = heuristics::min_rem_val(self.graph).expect("all_variables_assigned was false");
        let domain: Vec<V> = self.graph.variable(x).get_domain().iter().copied().collect();
        let snapshot = self.save_state(x);

        for d in domain {
            self.bump_iteration();
            trace!(var = %x, value = %d, "solve_arc assigning");
            self.graph.variable_mut(x).assign(d);

            if self.check_arc_consistency(x) && self.solve_arc() {
                return true;
            }

            self.graph.variable_mut(x).unassign().expect("just assigned");
            self.load_state(&snapshot);
        }

        debug!(var = %x, "solve_arc exhausted domain");
        false
    }

    /// AIMA-style AC-3: propagates from `start` outward, returning `false`
    /// as soon as some variable's domain is emptied.
    pub(super) fn check_arc_consistency(&mut self, start: VarId) -> bool {
        self.arc_consistency.clear();
        self.insert_all_arcs_to(start);
        trace!(var = %start, arcs = self.arc_consistency.len(), "check_arc_consistency seeded worklist");

        while let Some(arc) = self.arc_consistency.pop_first() {
            trace!(u = %arc.u, w = %arc.w, "propagating arc");
            if self.remove_inconsistent_values(arc.u, arc.w, arc.c) {
                if self.graph.variable(arc.u).is_impossible() {
                    trace!(var = %arc.u, "check_arc_consistency emptied a domain");
                    return false;
                }
                let neighbors: Vec<VarId> = self
                    .graph
                    .get_neighbors(arc.u)
                    .iter()
                    .copied()
                    .filter(|&y| y != arc.w)
                    .collect();
                for y in neighbors {
                    let cids: Vec<ConstraintId> = self
                        .graph
                        .get_connecting_constraints(y, arc.u)
                        .iter()
                        .copied()
                        .collect();
                    for c in cids {
                        self.arc_consistency.insert(Arc { u: y, w: arc.u, c });
                    }
                }
            }
        }

        true
    }

    /// For every neighbor `y` of `cv` and every constraint connecting them,
    /// inserts the arc `(y, cv, c)` — `cv` is the target whose recent
    /// assignment may have invalidated support for its neighbors.
    pub(super) fn insert_all_arcs_to(&mut self, cv: VarId) {
        let neighbors: Vec<VarId> = self.graph.get_neighbors(cv).iter().copied().collect();
        for y in neighbors {
            let cids: Vec<ConstraintId> = self
                .graph
                .get_connecting_constraints(y, cv)
                .iter()
                .copied()
                .collect();
            for c in cids {
                self.arc_consistency.insert(Arc { u: y, w: cv, c });
            }
        }
    }

    /// Removes every value `a` from `u`'s domain for which no `b` in `w`'s
    /// domain makes `c` satisfiable with `u=a, w=b`. Returns whether
    /// anything was removed.
    pub(super) fn remove_inconsistent_values(&mut self, u: VarId, w: VarId, c: ConstraintId) -> bool {
        let mut removed = false;
        let u_values: Vec<V> = self.graph.variable(u).get_domain().iter().copied().collect();
        let w_values: Vec<V> = self.graph.variable(w).get_domain().iter().copied().collect();

        for a in u_values {
            self.graph.variable_mut(u).assign(a);
            let mut supported = false;

            for &b in &w_values {
                self.graph.variable_mut(w).assign(b);
                if self.graph.constraint(c).satisfiable(self.graph.arena()) {
                    supported = true;
                }
                self.graph.variable_mut(w).unassign().expect("just assigned");
                if supported {
                    break;
                }
            }

            self.graph.variable_mut(u).unassign().expect("just assigned");
            if !supported {
                trace!(var = %u, value = %a, w = %w, "AC-3 pruning unsupported value");
                self.graph.variable_mut(u).remove_value(&a).expect("value was in domain");
                removed = true;
            }
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::constraint::difference_not_equal;
    use crate::csp_graph::ConstraintGraph;

    fn chain_graph(domain_size: i32) -> ConstraintGraph<i32> {
        let mut g = ConstraintGraph::new();
        g.insert_variable("x", 0..domain_size).unwrap();
        g.insert_variable("y", 0..domain_size).unwrap();
        g.insert_variable("z", 0..domain_size).unwrap();
        g.insert_constraint(difference_not_equal("x", "y", 0)).unwrap();
        g.insert_constraint(difference_not_equal("y", "z", 0)).unwrap();
        g.preprocess();
        g
    }

    proptest! {
        #[test]
        fn ac3_only_shrinks_domains(domain_size in 1..8i32) {
            let mut g = chain_graph(domain_size);
            let before: Vec<usize> = g
                .get_all_variables()
                .iter()
                .map(|v| v.size_domain())
                .collect();

            let x = g.variable_id("x").unwrap();
            let mut csp = Csp::new(&mut g);
            csp.check_arc_consistency(x);
            let graph = csp.graph();

            for (var, &before_size) in graph.get_all_variables().iter().zip(&before) {
                prop_assert!(var.size_domain() <= before_size);
            }
        }

        #[test]
        fn ac3_fixed_point_every_value_has_support(domain_size in 1..8i32) {
            let mut g = chain_graph(domain_size);
            let x = g.variable_id("x").unwrap();
            let y = g.variable_id("y").unwrap();
            let z = g.variable_id("z").unwrap();

            let consistent = Csp::new(&mut g).check_arc_consistency(x);
            prop_assume!(consistent);

            for (u, w) in [(x, y), (y, x), (y, z), (z, y)] {
                let cids: Vec<_> = g.get_connecting_constraints(u, w).iter().copied().collect();
                for cid in cids {
                    let u_values: Vec<i32> = g.variable(u).get_domain().iter().copied().collect();
                    for a in u_values {
                        prop_assert!(
                            has_support(&mut g, u, w, cid, a),
                            "value {a} of {u} lost all support from {w} for constraint {cid:?}"
                        );
                    }
                }
            }
        }
    }

    fn has_support(g: &mut ConstraintGraph<i32>, u: VarId, w: VarId, c: ConstraintId, a: i32) -> bool {
        let w_values: Vec<i32> = g.variable(w).get_domain().iter().copied().collect();
        g.variable_mut(u).assign(a);
        let mut supported = false;
        for b in w_values {
            g.variable_mut(w).assign(b);
            if g.constraint(c).satisfiable(g.arena()) {
                supported = true;
            }
            g.variable_mut(w).unassign().unwrap();
            if supported {
                break;
            }
        }
        g.variable_mut(u).unassign().unwrap();
        supported
    }
}
