use crate::definition::Definition;
use crate::definition::ScopePath;
use std::sync::Arc;

/// Handle on everything one call to
/// [`Registry::register_source()`](crate::registry::Registry::register_source)
/// registered, in source order.
#[derive(Clone, Debug)]
pub struct ParsedSource {
    pub(crate) definitions: Vec<Arc<Definition>>,
    pub(crate) scope_path: ScopePath,
}
impl ParsedSource {
    /// Look a definition up by the name it was given in the source.
    pub fn definition(&self, local_name: &str) -> Option<&Arc<Definition>> {
        self.definitions.iter()
            .find(|def| def.local_name() == Some(local_name))
    }

    pub fn definitions(&self) -> &[Arc<Definition>] {
        &self.definitions
    }

    /// The global name of the first operation in the source, if it has one.
    pub fn operation_name(&self) -> Option<&str> {
        self.definitions.iter().find_map(|def| def.operation_name())
    }

    pub fn scope_path(&self) -> &ScopePath {
        &self.scope_path
    }

    /// The source's only definition, when it declares exactly one.
    pub fn sole_definition(&self) -> Option<&Arc<Definition>> {
        match self.definitions.as_slice() {
            [def] => Some(def),
            _ => None,
        }
    }
}
