//! Builders for example CSPs. Not part of the solver core — external
//! collaborators that exercise it end to end.

pub mod magic_square;
pub mod queens;
