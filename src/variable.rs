//! A variable in a constraint satisfaction problem: a name, an ordered
//! domain of candidate values, and an optional assigned value.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{CspError, CspResult};
use crate::value::Value;

/// Stable handle into a [`crate::csp_graph::ConstraintGraph`]'s variable arena.
///
/// The graph owns the `Vec<Variable<V>>`; everything else — constraints,
/// adjacency indices, the AC-3 worklist — refers to a variable by this index
/// rather than by reference, which is the arena/handle translation of the
/// reference implementation's non-owning `Variable*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub(crate) usize);

impl VarId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A variable: a unique name, a stable id, an ordered domain, and an
/// optional assigned value.
///
/// The domain is a [`BTreeSet`] rather than a hash set so iteration is
/// ascending and deterministic — MRV tie-breaking and the AC-3 inner loops
/// both rely on predictable ordering — and removal is `O(log n)`.
///
/// Assignment does not narrow the domain: `domain` and `assigned_value` are
/// independent. Rather than track `is_assigned` as a separate boolean next
/// to `assigned_value` (as the reference implementation does), this keeps a
/// single `Option<V>` — the same two states, collapsed into the idiomatic
/// Rust representation.
#[derive(Debug, Clone)]
pub struct Variable<V: Value> {
    pub(crate) id: VarId,
    name: String,
    domain: BTreeSet<V>,
    assigned_value: Option<V>,
}

impl<V: Value> Variable<V> {
    pub(crate) fn new(
        id: VarId,
        name: impl Into<String>,
        initial_values: impl IntoIterator<Item = V>,
    ) -> Self {
        Variable {
            id,
            name: name.into(),
            domain: initial_values.into_iter().collect(),
            assigned_value: None,
        }
    }

    /// This variable's stable handle.
    pub fn id(&self) -> VarId {
        self.id
    }

    /// The name given at insertion; unique within its graph.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Removes `value` from the domain.
    ///
    /// Fails with [`CspError::DomainError`] if `value` was not present.
    pub fn remove_value(&mut self, value: &V) -> CspResult<()> {
        if self.domain.remove(value) {
            Ok(())
        } else {
            Err(CspError::DomainError(format!(
                "{} has no value {} to remove",
                self.name, value
            )))
        }
    }

    /// Replaces the domain wholesale.
    pub fn set_domain(&mut self, domain: BTreeSet<V>) {
        self.domain = domain;
    }

    /// A read-only, ascending view of the remaining domain.
    pub fn get_domain(&self) -> &BTreeSet<V> {
        &self.domain
    }

    /// Marks the variable assigned with `value`.
    ///
    /// Debug builds assert `value` is (or was) a domain member; release
    /// builds trust the caller, matching the reference implementation's
    /// unchecked `Assign`.
    pub fn assign(&mut self, value: V) {
        debug_assert!(
            self.domain.contains(&value) || self.assigned_value == Some(value),
            "assigning {value} to {} outside its domain",
            self.name
        );
        self.assigned_value = Some(value);
    }

    /// Assigns the smallest remaining domain value.
    ///
    /// Fails with [`CspError::DomainError`] if the domain is empty.
    pub fn assign_smallest(&mut self) -> CspResult<V> {
        let value = *self
            .domain
            .iter()
            .next()
            .ok_or_else(|| CspError::DomainError(format!("{} has an empty domain", self.name)))?;
        self.assigned_value = Some(value);
        Ok(value)
    }

    /// Clears the assigned flag. The domain is untouched — callers that need
    /// domain restoration use the graph's snapshot protocol.
    ///
    /// Fails with [`CspError::StateError`] if already unassigned.
    pub fn unassign(&mut self) -> CspResult<()> {
        if self.assigned_value.take().is_none() {
            return Err(CspError::StateError(format!(
                "{} is already unassigned",
                self.name
            )));
        }
        Ok(())
    }

    /// `true` iff an assignment is currently set.
    pub fn is_assigned(&self) -> bool {
        self.assigned_value.is_some()
    }

    /// `true` iff the domain is empty. An impossible, unassigned variable has
    /// no value that could ever complete a solution.
    pub fn is_impossible(&self) -> bool {
        self.domain.is_empty()
    }

    /// Number of values still in the domain.
    pub fn size_domain(&self) -> usize {
        self.domain.len()
    }

    /// The assigned value, if any (else the smallest domain value). Fails if
    /// unassigned and the domain is empty.
    pub fn get_min_value(&self) -> CspResult<V> {
        if let Some(v) = self.assigned_value {
            return Ok(v);
        }
        self.domain
            .iter()
            .next()
            .copied()
            .ok_or_else(|| CspError::DomainError(format!("{} has an empty domain", self.name)))
    }

    /// The assigned value, if any (else the largest domain value). Fails if
    /// unassigned and the domain is empty.
    pub fn get_max_value(&self) -> CspResult<V> {
        if let Some(v) = self.assigned_value {
            return Ok(v);
        }
        self.domain
            .iter()
            .next_back()
            .copied()
            .ok_or_else(|| CspError::DomainError(format!("{} has an empty domain", self.name)))
    }

    /// The assigned value. Fails with [`CspError::StateError`] if unassigned.
    pub fn get_value(&self) -> CspResult<V> {
        self.assigned_value
            .ok_or_else(|| CspError::StateError(format!("{} is not assigned", self.name)))
    }
}

impl<V: Value> fmt::Display for Variable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {{", self.name)?;
        let mut first = true;
        for v in &self.domain {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
            first = false;
        }
        write!(f, "}}")?;
        if let Some(v) = self.assigned_value {
            write!(f, " assigned {v}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(values: impl IntoIterator<Item = i32>) -> Variable<i32> {
        Variable::new(VarId(0), "x", values)
    }

    #[test]
    fn domain_is_deduped_and_ordered() {
        let v = var([3, 1, 2, 1, 3]);
        assert_eq!(
            v.get_domain().iter().copied().collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn min_max_prefer_assigned_value() {
        let mut v = var([1, 2, 3]);
        assert_eq!(v.get_min_value().unwrap(), 1);
        assert_eq!(v.get_max_value().unwrap(), 3);
        v.assign(2);
        assert_eq!(v.get_min_value().unwrap(), 2);
        assert_eq!(v.get_max_value().unwrap(), 2);
    }

    #[test]
    fn assignment_does_not_narrow_domain() {
        let mut v = var([1, 2, 3]);
        v.assign(2);
        assert_eq!(v.size_domain(), 3);
    }

    #[test]
    fn unassign_twice_is_a_state_error() {
        let mut v = var([1]);
        v.assign(1);
        v.unassign().unwrap();
        assert!(matches!(v.unassign(), Err(CspError::StateError(_))));
    }

    #[test]
    fn remove_absent_value_is_a_domain_error() {
        let mut v = var([1, 2]);
        assert!(matches!(v.remove_value(&5), Err(CspError::DomainError(_))));
        v.remove_value(&1).unwrap();
        assert_eq!(v.size_domain(), 1);
    }

    #[test]
    fn is_impossible_iff_domain_empty() {
        let mut v = var([1]);
        assert!(!v.is_impossible());
        v.remove_value(&1).unwrap();
        assert!(v.is_impossible());
    }

    #[test]
    fn get_value_requires_assignment() {
        let v = var([1, 2]);
        assert!(matches!(v.get_value(), Err(CspError::StateError(_))));
    }
}
