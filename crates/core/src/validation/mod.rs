//! Human Being validation engine.
//!
//! Provides violation types, a pure-logic evaluator, and the machine-gun
//! default normalization step, all without database dependencies.

pub mod evaluator;
pub mod normalize;
pub mod rules;
