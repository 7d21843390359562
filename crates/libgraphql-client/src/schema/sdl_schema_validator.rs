use crate::ast;
use crate::definition::Definition;
use crate::document::Document;
use crate::loc;
use crate::schema::sdl_schema;
use crate::schema::SchemaTypeKind;
use crate::schema::SchemaValidationMessage;
use crate::schema::SchemaValidator;
use crate::schema::SdlSchema;
use inherent::inherent;
use std::path::PathBuf;

#[inherent]
impl SchemaValidator for SdlSchema {
    /// Structural checks of every definition in `document` against this
    /// schema. Messages follow the wording of the reference GraphQL
    /// validator.
    pub fn validate(&self, document: &Document) -> Vec<SchemaValidationMessage> {
        let mut walker = ValidationWalker {
            document,
            file: None,
            messages: vec![],
            schema: self,
        };
        for def in document.definitions() {
            walker.validate_definition(def);
        }
        log::debug!(
            "Schema validation of {} definition(s) found {} problem(s).",
            document.len(),
            walker.messages.len(),
        );
        walker.messages
    }
}

struct ValidationWalker<'a> {
    document: &'a Document,
    file: Option<PathBuf>,
    messages: Vec<SchemaValidationMessage>,
    schema: &'a SdlSchema,
}
impl ValidationWalker<'_> {
    fn validate_definition(&mut self, def: &Definition) {
        self.file = def.def_location()
            .file_position()
            .and_then(|pos| pos.file.to_owned());

        let def_pos = def.def_location().file_position().cloned();
        let parent_type = match (def.operation_kind(), def.type_condition()) {
            (Some(op_kind), _) => match self.schema.root_type(op_kind) {
                Some(root_type) => root_type.to_string(),
                None => {
                    self.messages.push(SchemaValidationMessage::new(
                        format!(
                            "Schema is not configured to execute {} operation.",
                            op_kind.keyword(),
                        ),
                        def_pos.into_iter().collect(),
                    ));
                    return;
                },
            },
            (None, Some(type_condition)) => {
                let message = self.check_type_condition(type_condition);
                if let Some(message) = message {
                    self.messages.push(SchemaValidationMessage::new(
                        message,
                        def_pos.into_iter().collect(),
                    ));
                    return;
                }
                type_condition.to_string()
            },
            (None, None) => return,
        };

        self.validate_selection_set(def.selection_set(), &parent_type);
    }

    fn validate_selection_set(
        &mut self,
        selection_set: &ast::operation::SelectionSet,
        parent_type: &str,
    ) {
        for selection in &selection_set.items {
            match selection {
                ast::operation::Selection::Field(field) =>
                    self.validate_field(field, parent_type),

                ast::operation::Selection::InlineFragment(inline) => {
                    let Some(ast::operation::TypeCondition::On(type_condition)) =
                        &inline.type_condition else {
                        self.validate_selection_set(&inline.selection_set, parent_type);
                        continue
                    };

                    if let Some(message) = self.check_type_condition(type_condition) {
                        self.report(message, &inline.position);
                        continue;
                    }
                    if !self.schema.types_overlap(parent_type, type_condition) {
                        self.report(
                            format!(
                                "Fragment cannot be spread here as objects of type \
                                \"{parent_type}\" can never be of type \
                                \"{type_condition}\".",
                            ),
                            &inline.position,
                        );
                        continue;
                    }
                    self.validate_selection_set(&inline.selection_set, type_condition);
                },

                ast::operation::Selection::FragmentSpread(spread) => {
                    let document = self.document;
                    let type_condition = document
                        .definition(&spread.fragment_name)
                        .and_then(|frag| frag.type_condition());
                    let Some(type_condition) = type_condition else {
                        continue
                    };
                    let known_composite = self.schema.type_kind(type_condition)
                        .is_some_and(|kind| kind.is_composite());
                    if known_composite
                        && !self.schema.types_overlap(parent_type, type_condition) {
                        self.report(
                            format!(
                                "Fragment \"{}\" cannot be spread here as objects \
                                of type \"{parent_type}\" can never be of type \
                                \"{type_condition}\".",
                                spread.fragment_name,
                            ),
                            &spread.position,
                        );
                    }
                },
            }
        }
    }

    fn validate_field(&mut self, field: &ast::operation::Field, parent_type: &str) {
        if field.name == "__typename" {
            return;
        }

        let schema = self.schema;
        let parent_is_union =
            schema.type_kind(parent_type) == Some(SchemaTypeKind::Union);
        let field_type = schema.field_type_annotation(parent_type, &field.name)
            .filter(|_| !parent_is_union);
        let Some(field_type) = field_type else {
            self.report(
                format!(
                    "Cannot query field \"{}\" on type \"{parent_type}\".",
                    field.name,
                ),
                &field.position,
            );
            return;
        };

        let named_type = field_type.innermost_named_type_annotation().graphql_type_name();
        let has_selection = !field.selection_set.items.is_empty();
        match self.schema.type_kind(named_type) {
            Some(kind) if kind.is_leaf() && has_selection => self.report(
                format!(
                    "Field \"{}\" must not have a selection since type \"{}\" has \
                    no subfields.",
                    field.name,
                    sdl_schema::type_annotation_to_sdl(field_type),
                ),
                &field.position,
            ),

            Some(kind) if kind.is_composite() && !has_selection => self.report(
                format!(
                    "Field \"{0}\" of type \"{1}\" must have a selection of \
                    subfields. Did you mean \"{0} {{ ... }}\"?",
                    field.name,
                    sdl_schema::type_annotation_to_sdl(field_type),
                ),
                &field.position,
            ),

            Some(kind) if kind.is_composite() =>
                self.validate_selection_set(&field.selection_set, named_type),

            _ => (),
        }
    }

    fn check_type_condition(&self, type_condition: &str) -> Option<String> {
        match self.schema.type_kind(type_condition) {
            None => Some(format!("Unknown type \"{type_condition}\".")),
            Some(kind) if !kind.is_composite() => Some(format!(
                "Fragment cannot condition on non composite type \
                \"{type_condition}\".",
            )),
            Some(_) => None,
        }
    }

    fn report(&mut self, message: String, pos: &ast::AstPos) {
        self.messages.push(SchemaValidationMessage::new(
            message,
            vec![loc::FilePosition::from_pos(self.file.as_ref(), *pos)],
        ));
    }
}
