use crate::ast;
use crate::definition::DefinitionKind;
use crate::definition::OperationKind;
use crate::definition::ScopePath;
use crate::document::printer;
use crate::loc;
use indexmap::IndexMap;

/// A fragment spread found somewhere inside a [`Definition`]'s selection
/// tree, already resolved to the global name of the fragment it targets.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FragmentSpreadRef {
    pub(crate) global_name: String,
    pub(crate) location: loc::SourceLocation,
    pub(crate) written: String,
}
impl FragmentSpreadRef {
    pub fn global_name(&self) -> &str {
        &self.global_name
    }

    pub fn location(&self) -> &loc::SourceLocation {
        &self.location
    }

    /// The reference exactly as it appeared after the `...` in the source
    /// (e.g. `friendFields` or `App::Fragments::User`).
    pub fn written(&self) -> &str {
        &self.written
    }
}

/// A registered operation or fragment.
///
/// The stored AST has already been rewritten to the registry's flat
/// namespace: the definition itself carries its global name and every
/// fragment spread targets a global name.
#[derive(Clone, Debug)]
pub struct Definition {
    pub(crate) ast: ast::operation::Definition,
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) global_name: String,
    pub(crate) kind: DefinitionKind,
    pub(crate) local_name: Option<String>,
    pub(crate) scope_path: ScopePath,
    pub(crate) spreads: IndexMap<String, FragmentSpreadRef>,
}
impl Definition {
    pub fn ast(&self) -> &ast::operation::Definition {
        &self.ast
    }

    pub fn def_location(&self) -> &loc::SourceLocation {
        &self.def_location
    }

    pub fn directives(&self) -> &[ast::operation::Directive] {
        use ast::operation::Definition as Def;
        use ast::operation::OperationDefinition as OpDef;
        match &self.ast {
            Def::Fragment(frag) => &frag.directives,
            Def::Operation(OpDef::Query(op)) => &op.directives,
            Def::Operation(OpDef::Mutation(op)) => &op.directives,
            Def::Operation(OpDef::Subscription(op)) => &op.directives,
            Def::Operation(OpDef::SelectionSet(_)) => &[],
        }
    }

    pub fn global_name(&self) -> &str {
        &self.global_name
    }

    pub fn is_fragment(&self) -> bool {
        matches!(self.kind, DefinitionKind::Fragment { .. })
    }

    pub fn is_operation(&self) -> bool {
        matches!(self.kind, DefinitionKind::Operation(_))
    }

    /// Two definitions are interchangeable when they are of the same kind and
    /// print to the same canonical text.
    pub fn is_equivalent_to(&self, other: &Definition) -> bool {
        self.kind == other.kind
            && self.global_name == other.global_name
            && self.to_query_string() == other.to_query_string()
    }

    pub fn kind(&self) -> &DefinitionKind {
        &self.kind
    }

    /// The name this definition was given in its source, if any.
    pub fn local_name(&self) -> Option<&str> {
        self.local_name.as_deref()
    }

    pub fn operation_kind(&self) -> Option<OperationKind> {
        match self.kind {
            DefinitionKind::Operation(kind) => Some(kind),
            DefinitionKind::Fragment { .. } => None,
        }
    }

    /// The name to send as `operationName` alongside this definition's
    /// document. Fragments have none.
    pub fn operation_name(&self) -> Option<&str> {
        self.is_operation().then_some(self.global_name.as_str())
    }

    pub fn scope_path(&self) -> &ScopePath {
        &self.scope_path
    }

    pub fn selection_set(&self) -> &ast::operation::SelectionSet {
        selection_set_of(&self.ast)
    }

    /// Fragments spread directly by this definition (at any depth of its own
    /// selection tree, but not through other fragments), keyed by global
    /// name in first-encountered order.
    pub fn spreads(&self) -> &IndexMap<String, FragmentSpreadRef> {
        &self.spreads
    }

    /// Canonical source text of this definition alone.
    pub fn to_query_string(&self) -> String {
        printer::print_definition(self)
    }

    pub fn type_condition(&self) -> Option<&str> {
        match &self.kind {
            DefinitionKind::Fragment { type_condition } => Some(type_condition),
            DefinitionKind::Operation(_) => None,
        }
    }

    pub fn variable_definitions(&self) -> &[ast::operation::VariableDefinition] {
        use ast::operation::Definition as Def;
        use ast::operation::OperationDefinition as OpDef;
        match &self.ast {
            Def::Operation(OpDef::Query(op)) => &op.variable_definitions,
            Def::Operation(OpDef::Mutation(op)) => &op.variable_definitions,
            Def::Operation(OpDef::Subscription(op)) => &op.variable_definitions,
            Def::Fragment(_) | Def::Operation(OpDef::SelectionSet(_)) => &[],
        }
    }
}
impl std::fmt::Display for Definition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

pub(crate) fn selection_set_of(
    def: &ast::operation::Definition,
) -> &ast::operation::SelectionSet {
    use ast::operation::Definition as Def;
    use ast::operation::OperationDefinition as OpDef;
    match def {
        Def::Fragment(frag) => &frag.selection_set,
        Def::Operation(OpDef::Query(op)) => &op.selection_set,
        Def::Operation(OpDef::Mutation(op)) => &op.selection_set,
        Def::Operation(OpDef::Subscription(op)) => &op.selection_set,
        Def::Operation(OpDef::SelectionSet(selection_set)) => selection_set,
    }
}
