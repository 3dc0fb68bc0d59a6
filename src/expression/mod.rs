mod builder;
mod errors;
#[allow(clippy::module_inception)]
mod expr;
mod operator;

pub use builder::*;
pub use errors::*;
pub use expr::*;
pub use operator::*;
