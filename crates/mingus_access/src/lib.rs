//! Tier-based feature access evaluation.
//!
//! [`AccessEvaluator`] answers "may a user on tier T use feature F?" by
//! comparing tier ranks against the catalog. Evaluation is pure: no I/O, no
//! locking, identical inputs give identical decisions.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod evaluator;

pub use evaluator::AccessEvaluator;
