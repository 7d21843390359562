#[allow(clippy::module_inception)]
mod definition;
mod definition_builder;
mod definition_kind;
mod parsed_source;
mod scope_path;
pub(crate) mod source_preprocessor;

pub use definition::Definition;
pub use definition::FragmentSpreadRef;
pub(crate) use definition::selection_set_of;
pub(crate) use definition_builder::DefinitionBuilder;
pub use definition_builder::DefinitionBuildError;
pub use definition_kind::DefinitionKind;
pub use definition_kind::OperationKind;
pub use parsed_source::ParsedSource;
pub use scope_path::is_graphql_name;
pub use scope_path::ScopePath;
pub use scope_path::ScopePathError;
pub use scope_path::ScopeReference;

#[cfg(test)]
mod tests;
