mod error;
#[allow(clippy::module_inception)]
mod schema;
mod validation;

pub use error::SchemaViolation;
pub use schema::{Schema, SchemaKind};
pub use validation::validate_value;
