use crate::document::Document;
use crate::loc;

/// One error reported by a [`SchemaValidator`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SchemaValidationMessage {
    pub locations: Vec<loc::FilePosition>,
    pub message: String,
}
impl SchemaValidationMessage {
    pub fn new(message: impl Into<String>, locations: Vec<loc::FilePosition>) -> Self {
        Self {
            locations,
            message: message.into(),
        }
    }
}
impl std::fmt::Display for SchemaValidationMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Checks a document against a schema's type system.
///
/// Implementations report every problem they find rather than stopping at
/// the first one. Unused fragments are not the validator's concern: they are
/// detected by [`validate_document()`](crate::validation::validate_document)
/// from the fragment graph itself.
pub trait SchemaValidator: std::fmt::Debug + Send + Sync {
    fn validate(&self, document: &Document) -> Vec<SchemaValidationMessage>;
}
