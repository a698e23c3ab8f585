//! Registry of variables and constraints; precomputes, per variable, the set
//! of incident constraints, the set of neighbor variables, and, per ordered
//! variable pair, the set of constraints connecting them.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::constraint::{Constraint, ConstraintId, UnresolvedConstraint};
use crate::error::{CspError, CspResult};
use crate::value::Value;
use crate::variable::{VarId, Variable};

/// Owns the variable arena and the constraint set, and the adjacency indices
/// built over them by [`ConstraintGraph::preprocess`].
pub struct ConstraintGraph<V: Value> {
    variables: Vec<Variable<V>>,
    name_index: HashMap<String, VarId>,
    constraints: Vec<Constraint<V>>,
    incident: Vec<Vec<ConstraintId>>,
    neighbors: Vec<BTreeSet<VarId>>,
    connecting: BTreeMap<(VarId, VarId), BTreeSet<ConstraintId>>,
    empty_constraints: BTreeSet<ConstraintId>,
}

impl<V: Value> Default for ConstraintGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Value> ConstraintGraph<V> {
    pub fn new() -> Self {
        ConstraintGraph {
            variables: Vec::new(),
            name_index: HashMap::new(),
            constraints: Vec::new(),
            incident: Vec::new(),
            neighbors: Vec::new(),
            connecting: BTreeMap::new(),
            empty_constraints: BTreeSet::new(),
        }
    }

    /// Registers a new variable with the given name and initial domain.
    ///
    /// Fails with [`CspError::DuplicateName`] if the name is already in use.
    pub fn insert_variable(
        &mut self,
        name: impl Into<String>,
        initial_values: impl IntoIterator<Item = V>,
    ) -> CspResult<VarId> {
        let name = name.into();
        if self.name_index.contains_key(&name) {
            return Err(CspError::DuplicateName(name));
        }
        let id = VarId(self.variables.len());
        self.variables.push(Variable::new(id, name.clone(), initial_values));
        self.name_index.insert(name, id);
        self.incident.push(Vec::new());
        self.neighbors.push(BTreeSet::new());
        Ok(id)
    }

    /// Resolves an [`UnresolvedConstraint`]'s variable names, clones it into
    /// the graph, and appends it to each referenced variable's incident list.
    ///
    /// Fails with [`CspError::UnknownVariable`] if any name is unresolvable;
    /// the graph is left unchanged on failure. Referencing the same variable
    /// twice appends the constraint to its incident list twice — callers
    /// should avoid that, the graph does not deduplicate for them.
    pub fn insert_constraint(
        &mut self,
        unresolved: UnresolvedConstraint<V>,
    ) -> CspResult<ConstraintId> {
        let mut vars = Vec::with_capacity(unresolved.var_names.len());
        for name in &unresolved.var_names {
            let id = *self
                .name_index
                .get(name)
                .ok_or_else(|| CspError::UnknownVariable(name.clone()))?;
            vars.push(id);
        }

        let id = ConstraintId(self.constraints.len());
        let constraint = Constraint::new(vars.clone(), unresolved.var_names, unresolved.kind);
        self.constraints.push(constraint);
        for v in vars {
            self.incident[v.index()].push(id);
        }
        Ok(id)
    }

    /// Rebuilds `neighbors` and `connecting` from `incident`. Idempotent.
    pub fn preprocess(&mut self) {
        for n in &mut self.neighbors {
            n.clear();
        }
        self.connecting.clear();

        for v in 0..self.variables.len() {
            let x = VarId(v);
            for &cid in &self.incident[v] {
                let constraint = &self.constraints[cid.0];
                for &w in constraint.vars() {
                    if w != x {
                        self.neighbors[v].insert(w);
                        self.connecting.entry((x, w)).or_default().insert(cid);
                    }
                }
            }
        }
    }

    /// Variables sharing at least one constraint with `v` (excludes `v`).
    pub fn get_neighbors(&self, v: VarId) -> &BTreeSet<VarId> {
        &self.neighbors[v.index()]
    }

    /// Constraints referencing `v`, in insertion order (incident list).
    pub fn get_constraints(&self, v: VarId) -> &[ConstraintId] {
        &self.incident[v.index()]
    }

    /// Constraints whose variable list contains both `x` and `y`.
    pub fn get_connecting_constraints(&self, x: VarId, y: VarId) -> &BTreeSet<ConstraintId> {
        self.connecting
            .get(&(x, y))
            .unwrap_or(&self.empty_constraints)
    }

    /// All variables, in insertion order — doubles as MRV tie-break order.
    pub fn get_all_variables(&self) -> &[Variable<V>] {
        &self.variables
    }

    pub(crate) fn arena(&self) -> &[Variable<V>] {
        &self.variables
    }

    /// Looks up a variable's handle by the name it was inserted under.
    pub fn variable_id(&self, name: &str) -> Option<VarId> {
        self.name_index.get(name).copied()
    }

    /// Immutable access to a single variable.
    pub fn variable(&self, id: VarId) -> &Variable<V> {
        &self.variables[id.index()]
    }

    /// Mutable access to a single variable; the only way engine code changes
    /// variable state.
    pub fn variable_mut(&mut self, id: VarId) -> &mut Variable<V> {
        &mut self.variables[id.index()]
    }

    /// Immutable access to a single constraint.
    pub fn constraint(&self, id: ConstraintId) -> &Constraint<V> {
        &self.constraints[id.0]
    }

    /// `true` iff every variable in the graph is assigned.
    pub fn all_variables_assigned(&self) -> bool {
        self.variables.iter().all(|v| v.is_assigned())
    }

    /// Recomputes `active` on every constraint.
    pub fn check_activity(&mut self) {
        let variables = &self.variables;
        for constraint in &mut self.constraints {
            constraint.set_active(variables);
        }
    }
}

impl<V: Value> std::fmt::Display for ConstraintGraph<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "ConstraintGraph with {} variables and {} constraints:",
            self.variables.len(),
            self.constraints.len()
        )?;
        writeln!(f, "Variables:")?;
        for v in &self.variables {
            writeln!(f, "  {v}")?;
        }
        writeln!(f, "Constraints:")?;
        for (i, c) in self.constraints.iter().enumerate() {
            writeln!(f, "  {}: {c}", i + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{all_diff2, sum_equal};

    #[test]
    fn duplicate_name_is_rejected() {
        let mut g = ConstraintGraph::<i32>::new();
        g.insert_variable("x", [1, 2]).unwrap();
        assert!(matches!(
            g.insert_variable("x", [3, 4]),
            Err(CspError::DuplicateName(_))
        ));
    }

    #[test]
    fn unknown_variable_leaves_graph_unchanged() {
        let mut g = ConstraintGraph::<i32>::new();
        g.insert_variable("x", [1, 2]).unwrap();
        let before = g.get_constraints(VarId(0)).len();
        assert!(matches!(
            g.insert_constraint(all_diff2("x", "ghost")),
            Err(CspError::UnknownVariable(_))
        ));
        assert_eq!(g.get_constraints(VarId(0)).len(), before);
    }

    #[test]
    fn preprocess_is_symmetric() {
        let mut g = ConstraintGraph::<i32>::new();
        let x = g.insert_variable("x", [1, 2, 3]).unwrap();
        let y = g.insert_variable("y", [1, 2, 3]).unwrap();
        let z = g.insert_variable("z", [1, 2, 3]).unwrap();
        g.insert_constraint(sum_equal(&["x", "y", "z"], 5)).unwrap();
        g.preprocess();

        assert!(g.get_neighbors(x).contains(&y));
        assert!(g.get_neighbors(y).contains(&x));
        assert_eq!(
            g.get_connecting_constraints(x, y),
            g.get_connecting_constraints(y, x)
        );
        assert!(g.get_connecting_constraints(x, x).is_empty());
        assert!(g.get_neighbors(z).contains(&x));
    }

    #[test]
    fn preprocess_is_idempotent() {
        let mut g = ConstraintGraph::<i32>::new();
        let x = g.insert_variable("x", [1, 2]).unwrap();
        let y = g.insert_variable("y", [1, 2]).unwrap();
        g.insert_constraint(all_diff2("x", "y")).unwrap();
        g.preprocess();
        let first: Vec<_> = g.get_neighbors(x).iter().copied().collect();
        g.preprocess();
        let second: Vec<_> = g.get_neighbors(x).iter().copied().collect();
        assert_eq!(first, second);
        assert!(g.get_neighbors(x).contains(&y));
    }
}
