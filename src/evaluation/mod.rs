//! Route cost evaluation and solution accounting.

mod evaluator;

pub use evaluator::RouteEvaluator;
