//! The constraint family: `AllDiff`, `AllDiff2`, `SumEqual`, `DifferenceNotEqual`,
//! plus a pluggable `Custom` predicate, all sharing one `Satisfiable` contract.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::value::{Value, abs_diff};
use crate::variable::{VarId, Variable};

/// Stable handle for a constraint stored in a [`crate::csp_graph::ConstraintGraph`].
///
/// Used as part of the identity of an AC-3 worklist arc and as the key type
/// in the graph's `connecting` index, so the worklist can dedup by identity
/// the way the reference implementation's `std::set<Arc<C>>` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstraintId(pub(crate) usize);

/// The concrete shape of a constraint's `Satisfiable` check.
enum ConstraintKind<V: Value> {
    /// Among currently assigned variables, no two share a value.
    AllDiff,
    /// Binary specialization: trivially true if either variable is unassigned.
    AllDiff2,
    /// `lo = Σ get_min_value`, `hi = Σ get_max_value`; satisfiable iff `lo <= K <= hi`.
    SumEqual(V),
    /// Binary: trivially true if either variable is unassigned, else
    /// `|v1 - v2| != |K|`. The stored constant is always non-negative —
    /// normalized once at construction, not on every check.
    DifferenceNotEqual(V),
    /// A pluggable predicate over the current values (`None` if unassigned),
    /// given in constraint-variable order.
    Custom(Rc<dyn Fn(&[Option<V>]) -> bool>),
}

impl<V: Value> Clone for ConstraintKind<V> {
    fn clone(&self) -> Self {
        match self {
            ConstraintKind::AllDiff => ConstraintKind::AllDiff,
            ConstraintKind::AllDiff2 => ConstraintKind::AllDiff2,
            ConstraintKind::SumEqual(k) => ConstraintKind::SumEqual(*k),
            ConstraintKind::DifferenceNotEqual(k) => ConstraintKind::DifferenceNotEqual(*k),
            ConstraintKind::Custom(f) => ConstraintKind::Custom(Rc::clone(f)),
        }
    }
}

/// A constraint over an ordered tuple of variables.
///
/// `Clone` performs a deep copy of the constraint object itself (a fresh
/// `Vec<VarId>`, a fresh `active` flag) while sharing the referenced
/// variables — here, sharing just means the `VarId`s are `Copy`, and a
/// `Custom` predicate's `Rc` is cheaply cloned rather than re-allocated.
#[derive(Clone)]
pub struct Constraint<V: Value> {
    vars: Vec<VarId>,
    var_names: Vec<String>,
    kind: ConstraintKind<V>,
    active: bool,
}

impl<V: Value> Constraint<V> {
    pub(crate) fn new(vars: Vec<VarId>, var_names: Vec<String>, kind: ConstraintKind<V>) -> Self {
        Constraint {
            vars,
            var_names,
            kind,
            active: true,
        }
    }

    /// The variables this constraint was built over, in order.
    pub fn vars(&self) -> &[VarId] {
        &self.vars
    }

    /// `true` iff at least one referenced variable is unassigned.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Recomputes `active` as "some referenced variable is unassigned".
    pub fn set_active(&mut self, arena: &[Variable<V>]) {
        self.active = self.vars.iter().any(|id| !arena[id.index()].is_assigned());
    }

    /// A necessary (not sufficient) condition: `false` means no completion of
    /// the current partial assignment can satisfy this constraint.
    pub fn satisfiable(&self, arena: &[Variable<V>]) -> bool {
        match &self.kind {
            ConstraintKind::AllDiff => {
                let mut seen = HashSet::with_capacity(self.vars.len());
                let mut count = 0usize;
                for id in &self.vars {
                    let var = &arena[id.index()];
                    if let Ok(value) = var.get_value() {
                        count += 1;
                        seen.insert(value);
                        if seen.len() != count {
                            return false;
                        }
                    }
                }
                true
            }
            ConstraintKind::AllDiff2 => {
                let a = &arena[self.vars[0].index()];
                let b = &arena[self.vars[1].index()];
                match (a.get_value(), b.get_value()) {
                    (Ok(va), Ok(vb)) => va != vb,
                    _ => true,
                }
            }
            ConstraintKind::SumEqual(target) => {
                let mut lo = V::zero();
                let mut hi = V::zero();
                for id in &self.vars {
                    let var = &arena[id.index()];
                    let (Ok(min), Ok(max)) = (var.get_min_value(), var.get_max_value()) else {
                        return false;
                    };
                    lo = lo + min;
                    hi = hi + max;
                }
                lo <= *target && *target <= hi
            }
            ConstraintKind::DifferenceNotEqual(k) => {
                let a = &arena[self.vars[0].index()];
                let b = &arena[self.vars[1].index()];
                match (a.get_value(), b.get_value()) {
                    (Ok(va), Ok(vb)) => abs_diff(va, vb) != *k,
                    _ => true,
                }
            }
            ConstraintKind::Custom(predicate) => {
                let values: Vec<Option<V>> = self
                    .vars
                    .iter()
                    .map(|id| arena[id.index()].get_value().ok())
                    .collect();
                predicate(&values)
            }
        }
    }

    /// `true` iff every referenced variable is assigned and [`Self::satisfiable`] holds.
    pub fn check(&self, arena: &[Variable<V>]) -> bool {
        self.vars
            .iter()
            .all(|id| arena[id.index()].is_assigned())
            && self.satisfiable(arena)
    }
}

impl<V: Value> fmt::Display for Constraint<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConstraintKind::AllDiff | ConstraintKind::AllDiff2 => {
                write!(f, "all different of ")?;
                write_names(f, &self.var_names)
            }
            ConstraintKind::SumEqual(k) => {
                write!(f, "sum of ")?;
                write_names(f, &self.var_names)?;
                write!(f, " is {k}")
            }
            ConstraintKind::DifferenceNotEqual(k) => {
                write!(f, "abs of difference of 2 vars is NOT {k} ")?;
                write_names(f, &self.var_names)
            }
            ConstraintKind::Custom(_) => {
                write!(f, "custom constraint on ")?;
                write_names(f, &self.var_names)
            }
        }
    }
}

fn write_names(f: &mut fmt::Formatter<'_>, names: &[String]) -> fmt::Result {
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{name}")?;
    }
    Ok(())
}

/// An unresolved constraint: variable *names*, not yet validated against a
/// graph. `ConstraintGraph::insert_constraint` resolves the names (failing
/// with `UnknownVariable` if one is absent) and produces a [`Constraint`].
pub struct UnresolvedConstraint<V: Value> {
    pub(crate) var_names: Vec<String>,
    pub(crate) kind: ConstraintKind<V>,
}

/// `AllDiff(v1..vn)`: among currently assigned variables, no two share a value.
pub fn all_diff<V: Value>(vars: &[&str]) -> UnresolvedConstraint<V> {
    UnresolvedConstraint {
        var_names: vars.iter().map(|s| s.to_string()).collect(),
        kind: ConstraintKind::AllDiff,
    }
}

/// `AllDiff2(v1, v2)`: trivially true if either is unassigned.
pub fn all_diff2<V: Value>(v1: &str, v2: &str) -> UnresolvedConstraint<V> {
    UnresolvedConstraint {
        var_names: vec![v1.to_string(), v2.to_string()],
        kind: ConstraintKind::AllDiff2,
    }
}

/// `SumEqual<K>(v1..vn)`: satisfiable iff `K` falls between the sum of the
/// variables' min and max values.
pub fn sum_equal<V: Value>(vars: &[&str], target: V) -> UnresolvedConstraint<V> {
    UnresolvedConstraint {
        var_names: vars.iter().map(|s| s.to_string()).collect(),
        kind: ConstraintKind::SumEqual(target),
    }
}

/// `DifferenceNotEqual<K>(v1, v2)`: trivially true if either is unassigned,
/// else `|v1 - v2| != |K|`. `k` is normalized to its absolute value here, at
/// construction, so a caller passing a negative constant can't silently
/// defeat the check (matches the original source's `constant(c>0 ? c:-c)`).
pub fn difference_not_equal<V: Value>(v1: &str, v2: &str, k: V) -> UnresolvedConstraint<V> {
    UnresolvedConstraint {
        var_names: vec![v1.to_string(), v2.to_string()],
        kind: ConstraintKind::DifferenceNotEqual(abs_diff(V::zero(), k)),
    }
}

/// A pluggable predicate over `vars`, evaluated with each variable's current
/// value (`None` if unassigned) in the same order.
pub fn custom<V: Value>(
    vars: &[&str],
    predicate: impl Fn(&[Option<V>]) -> bool + 'static,
) -> UnresolvedConstraint<V> {
    UnresolvedConstraint {
        var_names: vars.iter().map(|s| s.to_string()).collect(),
        kind: ConstraintKind::Custom(Rc::new(predicate)),
    }
}
