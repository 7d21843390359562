use crate::config::ClientConfig;
use crate::config::SpreadMode;
use crate::projection::accessor_naming;
use crate::projection::selection_plan::DefinitionPlan;
use crate::projection::selection_plan::PlanItem;
use crate::projection::selection_plan::SelectionPlan;
use crate::projection::AccessorObject;
use crate::projection::AccessorValue;
use crate::schema::SchemaTypes;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::sync::Arc;
use thiserror::Error;

type Result<T> = std::result::Result<T, ProjectionError>;

/// Interprets compiled [`DefinitionPlan`]s over JSON payloads.
///
/// Holds no state of its own; every call is a pure function of the plan, the
/// payload, the config and the (optional) schema.
pub(crate) struct Projector<'a> {
    config: &'a ClientConfig,
    schema: Option<&'a dyn SchemaTypes>,
}

/// A field gathered from every active branch of an object level, keyed by
/// response key by the caller.
struct CollectedField<'p> {
    field_name: &'p str,
    parent_type: Option<String>,
    sub_selections: Vec<&'p SelectionPlan>,
}

impl<'a> Projector<'a> {
    pub(crate) fn new(
        config: &'a ClientConfig,
        schema: Option<&'a dyn SchemaTypes>,
    ) -> Self {
        Self { config, schema }
    }

    pub(crate) fn project(
        &self,
        plan: &DefinitionPlan,
        payload: &serde_json::Value,
    ) -> Result<AccessorObject> {
        let static_type = match (&plan.type_condition, plan.operation_kind, self.schema) {
            (Some(type_condition), _, _) => Some(type_condition.to_string()),
            (None, Some(op_kind), Some(schema)) =>
                schema.root_type(op_kind).map(str::to_string),
            _ => None,
        };

        // A root accessor can always be cast back to its own definition.
        let mut spreads = IndexSet::with_capacity(plan.selection.spread_closure.len() + 1);
        spreads.insert(plan.global_name.to_string());
        spreads.extend(plan.selection.spread_closure.iter().cloned());

        self.project_object(
            &[&plan.selection],
            static_type.as_deref(),
            payload,
            "$",
            Arc::new(spreads),
        )
    }

    /// `within_match` is set once collection has entered a type-conditioned
    /// branch that matched the payload's runtime type.
    fn collect_fields<'p>(
        &self,
        selection: &'p SelectionPlan,
        static_type: Option<&str>,
        typename: Option<&str>,
        within_match: bool,
        collected: &mut IndexMap<String, CollectedField<'p>>,
    ) {
        for item in &selection.items {
            match item {
                PlanItem::Field { field_name, response_key, selection } => {
                    let field = collected.entry(response_key.to_string())
                        .or_insert_with(|| CollectedField {
                            field_name,
                            parent_type: static_type.map(str::to_string),
                            sub_selections: vec![],
                        });
                    if let Some(selection) = selection {
                        field.sub_selections.push(selection);
                    }
                },

                PlanItem::Conditional { selection, type_condition } => {
                    let type_condition = type_condition.as_deref();
                    let branch = self.branch_match(type_condition, static_type, typename, within_match);
                    if let Some(within_match) = branch {
                        self.collect_fields(
                            selection,
                            type_condition.or(static_type),
                            typename,
                            within_match,
                            collected,
                        );
                    }
                },

                PlanItem::Spread(target) => {
                    if self.config.spread_mode == SpreadMode::Masked {
                        continue;
                    }
                    let type_condition = target.type_condition.as_deref();
                    let branch = self.branch_match(type_condition, static_type, typename, within_match);
                    if let Some(within_match) = branch {
                        self.collect_fields(
                            &target.selection,
                            type_condition.or(static_type),
                            typename,
                            within_match,
                            collected,
                        );
                    }
                },
            }
        }
    }

    /// A type condition applies unless the payload names a runtime type that
    /// is unrelated to it. Without a discriminator every branch applies.
    ///
    /// Relatedness is decided by the schema when it knows both types. Past
    /// that, a condition with a different name only applies when it restates
    /// the enclosing type or is nested inside a branch that already matched.
    ///
    /// Returns `None` for an inactive branch, and otherwise whether the
    /// branch's contents sit inside a matched condition.
    fn branch_match(
        &self,
        type_condition: Option<&str>,
        static_type: Option<&str>,
        typename: Option<&str>,
        within_match: bool,
    ) -> Option<bool> {
        let (Some(type_condition), Some(typename)) = (type_condition, typename) else {
            return Some(within_match);
        };
        if type_condition == typename {
            return Some(true);
        }
        if static_type == Some(type_condition) {
            return Some(within_match);
        }
        let is_match = match self.schema {
            Some(schema) if schema.has_type(type_condition) && schema.has_type(typename) =>
                schema.is_subtype(typename, type_condition)
                    || schema.is_subtype(type_condition, typename),
            _ => within_match,
        };
        is_match.then_some(true)
    }

    fn project_field(
        &self,
        field: &CollectedField<'_>,
        value: Option<&serde_json::Value>,
        path: &str,
    ) -> Result<AccessorValue> {
        let shape = match (self.schema, field.parent_type.as_deref()) {
            (Some(schema), Some(parent_type)) =>
                schema.field_type(parent_type, field.field_name),
            _ => None,
        };

        let Some(value) = value else {
            return Ok(match shape {
                Some(shape) if shape.is_list => AccessorValue::List(vec![]),
                _ => AccessorValue::Null,
            });
        };

        if field.sub_selections.is_empty() {
            return Ok(match value {
                serde_json::Value::Null => AccessorValue::Null,
                value => AccessorValue::Scalar(value.to_owned()),
            });
        }

        let mut spreads = IndexSet::new();
        for selection in &field.sub_selections {
            spreads.extend(selection.spread_closure.iter().cloned());
        }
        self.project_nested(
            &field.sub_selections,
            shape.as_ref().map(|shape| shape.named_type.as_str()),
            value,
            path,
            &Arc::new(spreads),
        )
    }

    fn project_nested(
        &self,
        selections: &[&SelectionPlan],
        static_type: Option<&str>,
        value: &serde_json::Value,
        path: &str,
        spreads: &Arc<IndexSet<String>>,
    ) -> Result<AccessorValue> {
        match value {
            serde_json::Value::Null => Ok(AccessorValue::Null),

            serde_json::Value::Array(items) => Ok(AccessorValue::List(
                items.iter()
                    .enumerate()
                    .map(|(idx, item)| self.project_nested(
                        selections,
                        static_type,
                        item,
                        &format!("{path}[{idx}]"),
                        spreads,
                    ))
                    .collect::<Result<Vec<_>>>()?,
            )),

            serde_json::Value::Object(_) => Ok(AccessorValue::Object(self.project_object(
                selections,
                static_type,
                value,
                path,
                spreads.clone(),
            )?)),

            other => Err(ProjectionError::UnexpectedValue {
                expected: "an object or a list of objects",
                found: json_kind(other),
                path: path.to_string(),
            }),
        }
    }

    fn project_object(
        &self,
        selections: &[&SelectionPlan],
        static_type: Option<&str>,
        payload: &serde_json::Value,
        path: &str,
        spreads: Arc<IndexSet<String>>,
    ) -> Result<AccessorObject> {
        let serde_json::Value::Object(payload_obj) = payload else {
            return Err(ProjectionError::PayloadNotAnObject {
                found: json_kind(payload),
                path: path.to_string(),
            });
        };
        let typename = payload_obj.get(&self.config.typename_key)
            .and_then(serde_json::Value::as_str);

        let mut collected = IndexMap::new();
        for selection in selections {
            self.collect_fields(selection, static_type, typename, false, &mut collected);
        }

        let mut accessor_names: IndexMap<String, String> =
            IndexMap::with_capacity(collected.len());
        let mut fields = IndexMap::with_capacity(collected.len());
        for (response_key, field) in &collected {
            let value = self.project_field(
                field,
                payload_obj.get(response_key),
                &format!("{path}.{response_key}"),
            )?;
            let accessor_name =
                if self.config.snake_case_accessors {
                    accessor_naming::to_snake_case(response_key)
                } else {
                    response_key.to_string()
                };
            // A converted name never shadows another selected response key
            // or an earlier accessor; the field keeps its response key then.
            let accessor_name =
                if accessor_name != *response_key
                    && (collected.contains_key(&accessor_name)
                        || accessor_names.contains_key(&accessor_name)) {
                    response_key.to_string()
                } else {
                    accessor_name
                };
            accessor_names.insert(accessor_name, response_key.to_string());
            fields.insert(response_key.to_string(), value);
        }

        Ok(AccessorObject {
            accessor_names,
            fields,
            payload: Arc::new(payload.to_owned()),
            spreads,
            typename: typename.map(str::to_string),
        })
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Null => "null",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::Object(_) => "an object",
        serde_json::Value::String(_) => "a string",
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error("Expected an object at `{path}`, but found {found}")]
    PayloadNotAnObject {
        found: &'static str,
        path: String,
    },

    #[error("Expected {expected} at `{path}`, but found {found}")]
    UnexpectedValue {
        expected: &'static str,
        found: &'static str,
        path: String,
    },

    #[error(
        "`{referenced_by}` spreads `{fragment_name}`, which is not registered \
        with this client"
    )]
    UnknownFragment {
        fragment_name: String,
        referenced_by: String,
    },
}
