#[allow(clippy::module_inception)]
mod document;
mod fragment_resolver;
pub mod printer;

pub use document::Document;
pub use fragment_resolver::DefinitionMap;
pub use fragment_resolver::FragmentResolver;
pub use fragment_resolver::ResolveError;

#[cfg(test)]
mod tests;
