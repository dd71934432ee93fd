//! Schema-driven query building: keys, predicates and ordering.

pub mod key;
pub mod ordering;
pub mod predicate;

pub use key::Key;
pub use ordering::{OrderBy, OrderTerm};
pub use predicate::{Comparison, Condition, LIKE_ESCAPE, Predicate};
