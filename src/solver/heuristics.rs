//! Variable-selection heuristics and the consistency check used by tests.

use crate::csp_graph::ConstraintGraph;
use crate::value::Value;
use crate::variable::VarId;

use super::Csp;

/// Minimum-remaining-values: the unassigned variable with the smallest
/// domain. Ties are broken by insertion order — the strict `<` below keeps
/// the first candidate found on a tie.
///
/// Returns `None` iff every variable is assigned.
pub fn min_rem_val<V: Value>(graph: &ConstraintGraph<V>) -> Option<VarId> {
    let mut best: Option<VarId> = None;
    for variable in graph.get_all_variables() {
        if variable.is_assigned() {
            continue;
        }
        match best {
            None => best = Some(variable.id()),
            Some(b) if variable.size_domain() < graph.variable(b).size_domain() => {
                best = Some(variable.id())
            }
            _ => {}
        }
    }
    best
}

/// Max-degree: the unassigned variable with the most unassigned neighbors.
/// A secondary heuristic, not used by any `solve_*` method directly.
pub fn max_degree_heuristic<V: Value>(graph: &ConstraintGraph<V>) -> Option<VarId> {
    graph
        .get_all_variables()
        .iter()
        .filter(|v| !v.is_assigned())
        .max_by_key(|v| {
            graph
                .get_neighbors(v.id())
                .iter()
                .filter(|&&n| !graph.variable(n).is_assigned())
                .count()
        })
        .map(|v| v.id())
}

impl<V: Value> Csp<'_, V> {
    /// `true` iff every active constraint incident to `p_var` is satisfiable
    /// under the current (possibly partial) assignment.
    pub fn assignment_is_consistent(&self, p_var: VarId) -> bool {
        self.graph
            .get_constraints(p_var)
            .iter()
            .map(|&cid| self.graph.constraint(cid))
            .filter(|c| c.is_active())
            .all(|c| c.satisfiable(self.graph.arena()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp_graph::ConstraintGraph;

    #[test]
    fn ties_are_broken_by_insertion_order() {
        let mut g = ConstraintGraph::<i32>::new();
        let first = g.insert_variable("first", [1, 2]).unwrap();
        g.insert_variable("second", [1, 2]).unwrap();
        assert_eq!(min_rem_val(&g), Some(first));
    }

    #[test]
    fn smaller_domain_wins_regardless_of_order() {
        let mut g = ConstraintGraph::<i32>::new();
        g.insert_variable("big", [1, 2, 3]).unwrap();
        let small = g.insert_variable("small", [1]).unwrap();
        assert_eq!(min_rem_val(&g), Some(small));
    }

    #[test]
    fn assigned_variables_are_skipped() {
        let mut g = ConstraintGraph::<i32>::new();
        let first = g.insert_variable("first", [1, 2]).unwrap();
        let second = g.insert_variable("second", [1]).unwrap();
        g.variable_mut(second).assign(1);
        assert_eq!(min_rem_val(&g), Some(first));
    }

    #[test]
    fn none_when_fully_assigned() {
        let mut g = ConstraintGraph::<i32>::new();
        let only = g.insert_variable("only", [1]).unwrap();
        g.variable_mut(only).assign(1);
        assert_eq!(min_rem_val(&g), None);
    }
}
