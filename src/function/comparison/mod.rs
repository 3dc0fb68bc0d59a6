mod comparison_function;
mod default_comparison;

pub use comparison_function::*;
pub use default_comparison::*;
