use crate::definition::Definition;
use crate::definition::DefinitionBuildError;
use crate::definition::DefinitionBuilder;
use crate::definition::ParsedSource;
use crate::definition::ScopePath;
use crate::definition::ScopePathError;
use crate::document::DefinitionMap;
use crate::document::Document;
use crate::document::FragmentResolver;
use crate::document::ResolveError;
use crate::file_reader;
use crate::loc;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use thiserror::Error;

type Result<T> = std::result::Result<T, RegistrationError>;

#[derive(Debug, Default)]
struct RegistryState {
    definitions: DefinitionMap,
    frozen: bool,
}

/// Append-only store of every [`Definition`], keyed by global name.
///
/// Registration is all-or-nothing per source: the source's definitions are
/// named, checked for collisions, and resolved against a staged copy of the
/// registry while holding the write lock. The live map is only replaced once
/// every check has passed, so readers never observe a partially registered
/// fragment graph.
#[derive(Debug)]
pub struct Registry {
    separator: String,
    state: RwLock<RegistryState>,
}

impl Registry {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            state: RwLock::new(RegistryState::default()),
        }
    }

    /// Every registered definition, in registration order.
    pub fn definitions(&self) -> Vec<Arc<Definition>> {
        self.read().definitions.values().cloned().collect()
    }

    /// The global document: every registered definition in registration
    /// order.
    pub fn document(&self) -> std::result::Result<Document, ResolveError> {
        let state = self.read();
        let roots: Vec<Arc<Definition>> = state.definitions.values().cloned().collect();
        Document::resolve(&state.definitions, &roots)
    }

    /// The document holding `roots` followed by their fragment closure.
    pub fn document_for(
        &self,
        roots: &[Arc<Definition>],
    ) -> std::result::Result<Document, ResolveError> {
        Document::resolve(&self.read().definitions, roots)
    }

    /// End the load phase. Every later registration fails with
    /// [`RegistrationError::RegistryFrozen`].
    pub fn freeze(&self) {
        self.state.write().unwrap_or_else(PoisonError::into_inner).frozen = true;
        log::debug!("Registry frozen.");
    }

    pub fn get(&self, global_name: &str) -> Option<Arc<Definition>> {
        self.read().definitions.get(global_name).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.read().definitions.is_empty()
    }

    pub fn is_frozen(&self) -> bool {
        self.read().frozen
    }

    pub fn len(&self) -> usize {
        self.read().definitions.len()
    }

    pub fn register_file(
        &self,
        scope_path: &ScopePath,
        file_path: impl AsRef<Path>,
    ) -> Result<ParsedSource> {
        let file_path = file_path.as_ref();
        let content = file_reader::read_content(file_path)
            .map_err(|err| RegistrationError::FileRead(Box::new(err)))?;
        self.register_impl(scope_path, content.as_str(), Some(file_path))
    }

    /// Name every definition in `source` after `scope_path` and add them to
    /// the registry.
    ///
    /// Registering a source whose definitions are already registered with
    /// identical content succeeds and returns the existing definitions.
    pub fn register_source(
        &self,
        scope_path: &ScopePath,
        source: &str,
    ) -> Result<ParsedSource> {
        self.register_impl(scope_path, source, None)
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Run `f` with read access to the definitions map.
    pub fn with_definitions<R>(&self, f: impl FnOnce(&DefinitionMap) -> R) -> R {
        f(&self.read().definitions)
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn register_impl(
        &self,
        scope_path: &ScopePath,
        source: &str,
        file_path: Option<&Path>,
    ) -> Result<ParsedSource> {
        let built_defs =
            DefinitionBuilder::new(scope_path, &self.separator, file_path)
                .build_from_str(source)?;

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.frozen {
            return Err(RegistrationError::RegistryFrozen {
                scope_path: scope_path.to_string(),
            });
        }

        let mut staged = state.definitions.clone();
        let mut source_names = HashSet::new();
        let mut new_defs: Vec<Arc<Definition>> = vec![];
        let mut registered: Vec<Arc<Definition>> = vec![];
        for def in built_defs {
            if !source_names.insert(def.global_name().to_string()) {
                let first_location =
                    registered.iter()
                        .find(|existing| existing.global_name() == def.global_name())
                        .map(|existing| existing.def_location().to_owned())
                        .unwrap_or(loc::SourceLocation::Unknown);
                return Err(RegistrationError::DuplicateName {
                    existing_location: first_location,
                    global_name: def.global_name().to_string(),
                    new_location: def.def_location().to_owned(),
                    scope_path: scope_path.to_string(),
                });
            }

            match state.definitions.get(def.global_name()) {
                Some(existing) if existing.is_equivalent_to(&def) => {
                    log::trace!(
                        "`{}` is already registered with identical content.",
                        def.global_name(),
                    );
                    registered.push(existing.clone());
                },

                Some(existing) => return Err(RegistrationError::DuplicateName {
                    existing_location: existing.def_location().to_owned(),
                    global_name: def.global_name().to_string(),
                    new_location: def.def_location().to_owned(),
                    scope_path: scope_path.to_string(),
                }),

                None => {
                    let def = Arc::new(def);
                    staged.insert(def.global_name().to_string(), def.clone());
                    new_defs.push(def.clone());
                    registered.push(def);
                },
            }
        }

        // Every spread of a newly added definition must land on a registered
        // fragment without closing a cycle.
        FragmentResolver::new(&staged).resolve(&new_defs)?;

        log::debug!(
            "Registered {} new definition(s) at `{scope_path}`: {}",
            new_defs.len(),
            new_defs.iter()
                .map(|def| def.global_name())
                .collect::<Vec<_>>()
                .join(", "),
        );
        state.definitions = staged;

        Ok(ParsedSource {
            definitions: registered,
            scope_path: scope_path.to_owned(),
        })
    }
}

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("{0}")]
    Build(#[from] DefinitionBuildError),

    #[error("Fragment cycle detected: {}", .cycle.join(" → "))]
    CyclicFragment {
        cycle: Vec<String>,
    },

    #[error(
        "A different definition named `{global_name}` is already registered \
        (at {existing_location}); the source registered at `{scope_path}` \
        declares another one at {new_location}"
    )]
    DuplicateName {
        existing_location: loc::SourceLocation,
        global_name: String,
        new_location: loc::SourceLocation,
        scope_path: String,
    },

    #[error("Failure while trying to read a GraphQL source file from disk: {0}")]
    FileRead(Box<file_reader::ReadContentError>),

    #[error("Invalid scope path: {0}")]
    InvalidScopePath(#[from] ScopePathError),

    #[error(
        "`{referenced_by}` spreads `{name}` at {location}, but `{name}` is an \
        operation rather than a fragment"
    )]
    NotAFragment {
        location: loc::SourceLocation,
        name: String,
        referenced_by: String,
    },

    #[error(
        "Cannot register the source at `{scope_path}`: the registry has been \
        frozen"
    )]
    RegistryFrozen {
        scope_path: String,
    },

    #[error(
        "`{referenced_by}` spreads `{reference}` at {location}, but no fragment \
        named `{fragment_name}` has been registered"
    )]
    UnresolvedFragment {
        fragment_name: String,
        location: loc::SourceLocation,
        reference: String,
        referenced_by: String,
    },
}
impl std::convert::From<ResolveError> for RegistrationError {
    fn from(value: ResolveError) -> Self {
        match value {
            ResolveError::CyclicFragment { cycle } =>
                Self::CyclicFragment { cycle },

            ResolveError::NotAFragment { location, name, referenced_by } =>
                Self::NotAFragment { location, name, referenced_by },

            ResolveError::UnresolvedFragment {
                fragment_name,
                location,
                reference,
                referenced_by,
            } => Self::UnresolvedFragment {
                fragment_name,
                location,
                reference,
                referenced_by,
            },
        }
    }
}
