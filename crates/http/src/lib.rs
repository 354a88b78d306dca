pub mod error;
pub mod schema;

#[cfg(test)]
mod tests;

pub use error::{ErrorBody, ErrorResponse, ErrorResponseBuilder, FieldError};
pub use schema::{safe_parse, Violation};
