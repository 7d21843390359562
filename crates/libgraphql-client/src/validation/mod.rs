mod document_validator;
mod validation_error;

pub use document_validator::validate_document;
pub use validation_error::ValidationError;
pub use validation_error::ValidationMessage;
