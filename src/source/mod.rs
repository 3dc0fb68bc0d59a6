mod errors;
mod evaluator;
mod options;

pub use errors::*;
pub use evaluator::*;
pub use options::*;
