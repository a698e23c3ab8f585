use tracing::{debug, trace};

use super::heuristics;
use super::Csp;
use crate::constraint::ConstraintId;
use crate::value::Value;
use crate::variable::VarId;

impl<V: Value> Csp<'_, V> {
    /// Backtracking with forward checking: after assigning `x`, prunes the
    /// domains of its unassigned neighbors and abandons the value
    /// immediately if any neighbor is left with an empty domain.
    pub fn solve_fc(&mut self) -> bool {
        self.bump_recursive_call();
        trace!(calls = self.recursive_call_counter(), "entering solve_fc");

        if self.graph.all_variables_assigned() {
            return true;
        }

        let x = heuristics::min_rem_val(self.graph).expect("all_variables_assigned was false");
        let domain: Vec<V> = self.graph.variable(x).get_domain().iter().copied().collect();
        let snapshot = self.save_state(x);

        for d in domain {
            self.bump_iteration();
            trace!(var = %x, value = %d, "solve_fc assigning");
            self.graph.variable_mut(x).assign(d);

            if self.forward_check(x) && self.solve_fc() {
                return true;
            }

            self.graph.variable_mut(x).unassign().expect("just assigned");
            self.load_state(&snapshot);
        }

        debug!(var = %x, "solve_fc exhausted domain");
        false
    }

    /// Counting variant: never returns early on success, instead bumping
    /// `solution_counter` at every complete assignment. Returns `true` iff
    /// at least one was found.
    ///
    /// The reference implementation declares this but never implements it;
    /// this is the "keep searching" reading of forward checking implied by
    /// its name.
    pub fn solve_fc_count(&mut self) -> bool {
        self.bump_recursive_call();
        trace!(calls = self.recursive_call_counter(), "entering solve_fc_count");

        if self.graph.all_variables_assigned() {
            self.bump_solution();
            debug!(solutions = self.solution_counter(), "solve_fc_count found a solution");
            return true;
        }

        let x = heuristics::min_rem_val(self.graph).expect("all_variables_assigned was false");
        let domain: Vec<V> = self.graph.variable(x).get_domain().iter().copied().collect();
        let snapshot = self.save_state(x);
        let mut found_any = false;

        for d in domain {
            self.bump_iteration();
            trace!(var = %x, value = %d, "solve_fc_count assigning");
            self.graph.variable_mut(x).assign(d);

            if self.forward_check(x) && self.solve_fc_count() {
                found_any = true;
            }

            self.graph.variable_mut(x).unassign().expect("just assigned");
            self.load_state(&snapshot);
        }

        found_any
    }

    /// Prunes the domains of `x`'s unassigned neighbors to only the values
    /// consistent with `x`'s current assignment. Returns `false` as soon as
    /// a neighbor's domain is left empty.
    pub(super) fn forward_check(&mut self, x: VarId) -> bool {
        let neighbors: Vec<VarId> = self
            .graph
            .get_neighbors(x)
            .iter()
            .copied()
            .filter(|&y| !self.graph.variable(y).is_assigned())
            .collect();

        for y in neighbors {
            let values: Vec<V> = self.graph.variable(y).get_domain().iter().copied().collect();
            let connecting: Vec<ConstraintId> = self
                .graph
                .get_connecting_constraints(x, y)
                .iter()
                .copied()
                .collect();

            for e in values {
                self.graph.variable_mut(y).assign(e);

                let mut consistent = true;
                for &cid in &connecting {
                    if !self.graph.constraint(cid).satisfiable(self.graph.arena()) {
                        consistent = false;
                        break;
                    }
                }

                if !consistent {
                    trace!(var = %y, value = %e, "forward check pruning inconsistent value");
                    self.graph.variable_mut(y).remove_value(&e).expect("value was in domain");
                }
                self.graph.variable_mut(y).unassign().expect("just assigned");
            }

            if self.graph.variable(y).is_impossible() {
                trace!(var = %y, "forward check emptied a neighbor's domain");
                return false;
            }
        }

        true
    }
}
