mod comparison;
mod errors;

pub use comparison::*;
pub use errors::*;
