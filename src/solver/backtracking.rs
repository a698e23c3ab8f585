use std::collections::{BTreeSet, HashMap};

use tracing::{debug, trace};

use super::arc_consistency::Arc;
use super::heuristics;
use crate::csp_graph::ConstraintGraph;
use crate::value::Value;
use crate::variable::VarId;

/// Drives a backtracking search over a borrowed [`ConstraintGraph`].
///
/// Owns no domain state of its own beyond the AC-3 worklist and the three
/// counters; every mutation happens on the graph's variables through
/// [`save_state`](Csp::save_state)/[`load_state`](Csp::load_state) snapshots.
pub struct Csp<'g, V: Value> {
    pub(super) graph: &'g mut ConstraintGraph<V>,
    pub(super) arc_consistency: BTreeSet<Arc>,
    solution_counter: u64,
    recursive_call_counter: u64,
    iteration_counter: u64,
}

impl<'g, V: Value> Csp<'g, V> {
    pub fn new(graph: &'g mut ConstraintGraph<V>) -> Self {
        Csp {
            graph,
            arc_consistency: BTreeSet::new(),
            solution_counter: 0,
            recursive_call_counter: 0,
            iteration_counter: 0,
        }
    }

    /// Number of complete satisfying assignments found so far. Only ever
    /// exceeds 1 under [`Csp::solve_fc_count`].
    pub fn solution_counter(&self) -> u64 {
        self.solution_counter
    }

    /// Number of times a `solve_*` method has been entered, including the
    /// current call.
    pub fn recursive_call_counter(&self) -> u64 {
        self.recursive_call_counter
    }

    /// Number of candidate-value attempts across the whole search so far.
    pub fn iteration_counter(&self) -> u64 {
        self.iteration_counter
    }

    /// Read-only access to the graph being searched.
    pub fn graph(&self) -> &ConstraintGraph<V> {
        self.graph
    }

    pub(super) fn bump_recursive_call(&mut self) {
        self.recursive_call_counter += 1;
    }

    pub(super) fn bump_iteration(&mut self) {
        self.iteration_counter += 1;
    }

    pub(super) fn bump_solution(&mut self) {
        self.solution_counter += 1;
    }

    /// Captures the domains of every currently-unassigned variable other
    /// than `except`.
    pub(super) fn save_state(&self, except: VarId) -> HashMap<VarId, BTreeSet<V>> {
        self.graph
            .get_all_variables()
            .iter()
            .filter(|v| !v.is_assigned() && v.id() != except)
            .map(|v| (v.id(), v.get_domain().clone()))
            .collect()
    }

    /// Restores domains captured by [`Csp::save_state`]. Inverse of
    /// `save_state` provided the set of assigned variables hasn't changed
    /// in between.
    pub(super) fn load_state(&mut self, saved: &HashMap<VarId, BTreeSet<V>>) {
        for (&id, domain) in saved {
            self.graph.variable_mut(id).set_domain(domain.clone());
        }
    }

    /// Plain backtracking: no domain pruning, so no snapshotting is needed.
    /// `satisfiable()` is checked only on constraints incident to the
    /// variable just assigned.
    pub fn solve_dfs(&mut self) -> bool {
        self.bump_recursive_call();
        trace!(calls = self.recursive_call_counter, "entering solve_dfs");

        if self.graph.all_variables_assigned() {
            return true;
        }

        let x = heuristics::min_rem_val(self.graph).expect("all_variables_assigned was false");
        let domain: Vec<V> = self.graph.variable(x).get_domain().iter().copied().collect();

        for d in domain {
            self.bump_iteration();
            self.graph.variable_mut(x).assign(d);

            let satisfied = self
                .graph
                .get_constraints(x)
                .iter()
                .all(|&cid| self.graph.constraint(cid).satisfiable(self.graph.arena()));

            if satisfied && self.solve_dfs() {
                return true;
            }

            self.graph.variable_mut(x).unassign().expect("just assigned");
        }

        debug!(var = %x, "solve_dfs exhausted domain");
        false
    }
}
