//! Goal Module
//!
//! Goal kinds, their event rules, and the ordered collection they live in.

pub mod collection;
pub mod definition;

pub use collection::{GoalCollection, parse_selection};
pub use definition::{Goal, GoalKind, GoalTag, NewGoal, NewGoalKind, RawNewGoal};
