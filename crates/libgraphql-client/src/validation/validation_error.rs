use crate::document::ResolveError;
use crate::loc;
use crate::schema::SchemaValidationMessage;
use thiserror::Error;

/// One problem found while validating a document.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationMessage {
    /// The document's fragment graph is incomplete (only possible for
    /// documents assembled by hand rather than by the registry).
    #[error("{0}")]
    FragmentGraph(ResolveError),

    #[error("{0}")]
    Schema(SchemaValidationMessage),

    #[error("Fragment {fragment_name} was defined, but not used")]
    UnusedFragment {
        fragment_name: String,
        location: loc::SourceLocation,
    },
}
impl ValidationMessage {
    pub fn locations(&self) -> Vec<loc::FilePosition> {
        match self {
            Self::FragmentGraph(_) => vec![],
            Self::Schema(msg) => msg.locations.to_owned(),
            Self::UnusedFragment { location, .. } =>
                location.file_position().cloned().into_iter().collect(),
        }
    }
}

/// Every problem found by
/// [`validate_document()`](crate::validation::validate_document), reported
/// together.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{}", .messages.iter().map(|msg| msg.to_string()).collect::<Vec<_>>().join("\n"))]
pub struct ValidationError {
    messages: Vec<ValidationMessage>,
}
impl ValidationError {
    pub(crate) fn new(messages: Vec<ValidationMessage>) -> Self {
        Self { messages }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[ValidationMessage] {
        &self.messages
    }

    /// Global names of the fragments reported as unused.
    pub fn unused_fragments(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().filter_map(|msg| match msg {
            ValidationMessage::UnusedFragment { fragment_name, .. } =>
                Some(fragment_name.as_str()),
            _ => None,
        })
    }
}
