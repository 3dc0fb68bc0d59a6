mod accessor;
mod available_types;
mod errors;
mod schema;

pub use accessor::*;
pub use available_types::*;
pub use errors::*;
pub use schema::*;
