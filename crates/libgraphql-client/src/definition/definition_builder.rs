use crate::ast;
use crate::definition::source_preprocessor;
use crate::definition::source_preprocessor::PreprocessedSource;
use crate::definition::Definition;
use crate::definition::DefinitionKind;
use crate::definition::FragmentSpreadRef;
use crate::definition::OperationKind;
use crate::definition::ScopePath;
use crate::definition::ScopePathError;
use crate::loc;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

type Result<T> = std::result::Result<T, DefinitionBuildError>;

/// Turns one source string into [`Definition`]s named after the scope path
/// the source is declared under.
///
/// Every spread is rewritten to a global name here, but nothing is checked
/// against the registry: whether the targets exist (and form no cycles) is
/// decided when the definitions are registered.
#[derive(Clone, Debug)]
pub(crate) struct DefinitionBuilder<'a> {
    file_path: Option<&'a Path>,
    scope_path: &'a ScopePath,
    separator: &'a str,
}

struct SpreadRewriteContext<'a> {
    local_fragments: &'a HashSet<String>,
    preprocessed: &'a PreprocessedSource,
}

impl<'a> DefinitionBuilder<'a> {
    pub(crate) fn new(
        scope_path: &'a ScopePath,
        separator: &'a str,
        file_path: Option<&'a Path>,
    ) -> Self {
        Self {
            file_path,
            scope_path,
            separator,
        }
    }

    pub(crate) fn build_from_str(&self, source: &str) -> Result<Vec<Definition>> {
        let preprocessed = source_preprocessor::preprocess(source)
            .map_err(|err| DefinitionBuildError::InvalidScopeReference {
                scope_path: self.scope_path.to_string(),
                err,
            })?;

        let ast_doc = ast::operation::parse(preprocessed.text.as_str())
            .map_err(|err| DefinitionBuildError::Parse {
                scope_path: self.scope_path.to_string(),
                message: err.to_string(),
            })?;

        if ast_doc.definitions.is_empty() {
            return Err(DefinitionBuildError::NoDefinitions {
                scope_path: self.scope_path.to_string(),
            });
        }

        let local_fragments: HashSet<String> =
            ast_doc.definitions.iter()
                .filter_map(|def| match def {
                    ast::operation::Definition::Fragment(frag) =>
                        Some(frag.name.to_string()),
                    ast::operation::Definition::Operation(_) => None,
                })
                .collect();

        let ctx = SpreadRewriteContext {
            local_fragments: &local_fragments,
            preprocessed: &preprocessed,
        };

        Ok(ast_doc.definitions
            .into_iter()
            .map(|ast_def| self.build_definition(&ctx, ast_def))
            .collect())
    }

    fn build_definition(
        &self,
        ctx: &SpreadRewriteContext<'_>,
        ast_def: ast::operation::Definition,
    ) -> Definition {
        use ast::operation::Definition as Def;
        use ast::operation::OperationDefinition as OpDef;

        let mut spreads = IndexMap::new();
        match ast_def {
            Def::Fragment(mut frag) => {
                let local_name =
                    if source_preprocessor::is_anonymous_fragment_name(&frag.name) {
                        None
                    } else {
                        Some(frag.name.to_string())
                    };
                let global_name =
                    self.scope_path.global_name(self.separator, local_name.as_deref());
                let ast::operation::TypeCondition::On(type_condition) =
                    frag.type_condition.clone();

                self.rewrite_spreads(ctx, &mut frag.selection_set, &mut spreads);
                frag.name = global_name.to_owned();

                Definition {
                    def_location: self.location(&frag.position),
                    ast: Def::Fragment(frag),
                    global_name,
                    kind: DefinitionKind::Fragment { type_condition },
                    local_name,
                    scope_path: self.scope_path.to_owned(),
                    spreads,
                }
            },

            Def::Operation(op_def) => {
                // The `{ .. }` shorthand becomes a named query so that it can
                // carry its global name.
                let (op_kind, position, local_name, mut selection_set, variable_definitions, directives) =
                    match op_def {
                        OpDef::SelectionSet(selection_set) => (
                            OperationKind::Query,
                            selection_set.span.0,
                            None,
                            selection_set,
                            vec![],
                            vec![],
                        ),
                        OpDef::Query(op) => (
                            OperationKind::Query,
                            op.position,
                            op.name,
                            op.selection_set,
                            op.variable_definitions,
                            op.directives,
                        ),
                        OpDef::Mutation(op) => (
                            OperationKind::Mutation,
                            op.position,
                            op.name,
                            op.selection_set,
                            op.variable_definitions,
                            op.directives,
                        ),
                        OpDef::Subscription(op) => (
                            OperationKind::Subscription,
                            op.position,
                            op.name,
                            op.selection_set,
                            op.variable_definitions,
                            op.directives,
                        ),
                    };

                let global_name =
                    self.scope_path.global_name(self.separator, local_name.as_deref());
                self.rewrite_spreads(ctx, &mut selection_set, &mut spreads);

                let name = Some(global_name.to_owned());
                let op_def = match op_kind {
                    OperationKind::Query => OpDef::Query(ast::operation::Query {
                        position,
                        name,
                        variable_definitions,
                        directives,
                        selection_set,
                    }),
                    OperationKind::Mutation => OpDef::Mutation(ast::operation::Mutation {
                        position,
                        name,
                        variable_definitions,
                        directives,
                        selection_set,
                    }),
                    OperationKind::Subscription => OpDef::Subscription(ast::operation::Subscription {
                        position,
                        name,
                        variable_definitions,
                        directives,
                        selection_set,
                    }),
                };

                Definition {
                    ast: Def::Operation(op_def),
                    def_location: self.location(&position),
                    global_name,
                    kind: DefinitionKind::Operation(op_kind),
                    local_name,
                    scope_path: self.scope_path.to_owned(),
                    spreads,
                }
            },
        }
    }

    fn location(&self, pos: &ast::AstPos) -> loc::SourceLocation {
        loc::SourceLocation::from_ast_position(self.file_path, pos)
    }

    /// Spread names resolve in this order:
    ///
    /// 1. A scope-qualified reference (`...A::B.frag`) names its target's
    ///    global name directly.
    /// 2. A plain name declared as a fragment in the same source refers to
    ///    that fragment.
    /// 3. Anything else is taken to already be a global name.
    fn resolve_spread_name(
        &self,
        ctx: &SpreadRewriteContext<'_>,
        written_name: &str,
    ) -> (String, String) {
        if let Some(reference) = ctx.preprocessed.qualified_spreads.get(written_name) {
            return (reference.global_name(self.separator), reference.to_string());
        }

        if ctx.local_fragments.contains(written_name) {
            return (
                self.scope_path.global_name(self.separator, Some(written_name)),
                written_name.to_string(),
            );
        }

        (written_name.to_string(), written_name.to_string())
    }

    fn rewrite_spreads(
        &self,
        ctx: &SpreadRewriteContext<'_>,
        selection_set: &mut ast::operation::SelectionSet,
        spreads: &mut IndexMap<String, FragmentSpreadRef>,
    ) {
        for selection in selection_set.items.iter_mut() {
            match selection {
                ast::operation::Selection::Field(field) =>
                    self.rewrite_spreads(ctx, &mut field.selection_set, spreads),

                ast::operation::Selection::InlineFragment(inline) =>
                    self.rewrite_spreads(ctx, &mut inline.selection_set, spreads),

                ast::operation::Selection::FragmentSpread(spread) => {
                    let (global_name, written) =
                        self.resolve_spread_name(ctx, &spread.fragment_name);
                    spreads.entry(global_name.to_owned())
                        .or_insert_with(|| FragmentSpreadRef {
                            global_name: global_name.to_owned(),
                            location: self.location(&spread.position),
                            written,
                        });
                    spread.fragment_name = global_name;
                },
            }
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DefinitionBuildError {
    #[error("Invalid scope reference in the source registered at `{scope_path}`: {err}")]
    InvalidScopeReference {
        scope_path: String,
        err: ScopePathError,
    },

    #[error("The source registered at `{scope_path}` contains no definitions")]
    NoDefinitions {
        scope_path: String,
    },

    #[error("Error parsing the source registered at `{scope_path}`: {message}")]
    Parse {
        scope_path: String,
        message: String,
    },
}
