use crate::ast;
use crate::definition::Definition;
use crate::document::printer;
use crate::document::DefinitionMap;
use crate::document::FragmentResolver;
use crate::document::ResolveError;
use std::sync::Arc;

/// An ordered, deduplicated list of definitions that prints as one GraphQL
/// document.
///
/// Documents are derived from the registry on demand and are never updated
/// after construction.
#[derive(Clone, Debug, Default)]
pub struct Document {
    definitions: Vec<Arc<Definition>>,
}
impl Document {
    pub fn new(definitions: Vec<Arc<Definition>>) -> Self {
        Self { definitions }
    }

    /// Build the document holding `roots` and their transitive fragment
    /// closure (see [`FragmentResolver::resolve()`]).
    pub fn resolve(
        definitions: &DefinitionMap,
        roots: &[Arc<Definition>],
    ) -> Result<Self, ResolveError> {
        Ok(Self::new(FragmentResolver::new(definitions).resolve(roots)?))
    }

    pub fn definition(&self, global_name: &str) -> Option<&Arc<Definition>> {
        self.definitions.iter().find(|def| def.global_name() == global_name)
    }

    pub fn definitions(&self) -> &[Arc<Definition>] {
        &self.definitions
    }

    pub fn fragments(&self) -> impl Iterator<Item = &Arc<Definition>> {
        self.definitions.iter().filter(|def| def.is_fragment())
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn operations(&self) -> impl Iterator<Item = &Arc<Definition>> {
        self.definitions.iter().filter(|def| def.is_operation())
    }

    /// The document as a `graphql_parser` AST, for validators that prefer a
    /// tree over text.
    pub fn to_ast(&self) -> ast::operation::Document {
        ast::operation::Document {
            definitions: self.definitions.iter()
                .map(|def| def.ast().to_owned())
                .collect(),
        }
    }

    pub fn to_query_string(&self) -> String {
        printer::print_definitions(self.definitions.iter().map(|def| def.as_ref()))
    }
}
impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}
