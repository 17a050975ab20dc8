//! Route evaluation and response assembly.
//!
//! - [`RouteEvaluator`] — route distance, distance-dimension checks, objective
//! - [`assemble`] — raw solver output to per-vehicle [`RouteResult`](crate::models::RouteResult)s

mod assembler;
mod evaluator;

pub use assembler::assemble;
pub use evaluator::{DistanceDimension, Evaluation, RouteEvaluator, Violation};
