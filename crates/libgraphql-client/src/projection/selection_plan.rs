use crate::ast;
use crate::definition::Definition;
use crate::definition::OperationKind;
use crate::projection::ProjectionError;
use indexmap::IndexSet;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

type Result<T> = std::result::Result<T, ProjectionError>;

/// A [`Definition`]'s selection set compiled into the table the projector
/// interprets for every payload.
#[derive(Debug)]
pub(crate) struct DefinitionPlan {
    pub(crate) global_name: String,
    pub(crate) operation_kind: Option<OperationKind>,
    pub(crate) selection: SelectionPlan,
    pub(crate) type_condition: Option<String>,
}

/// One selection set. `spread_closure` holds the global names of every
/// fragment whose fields are statically guaranteed at this object level:
/// fragments spread here directly, from inside inline fragments at this
/// level, and (transitively) the fragments those fragments spread at their
/// own top level.
#[derive(Debug, Default)]
pub(crate) struct SelectionPlan {
    pub(crate) items: Vec<PlanItem>,
    pub(crate) spread_closure: IndexSet<String>,
}

#[derive(Debug)]
pub(crate) enum PlanItem {
    /// An inline fragment (`... on Type { .. }` or a bare `... { .. }`).
    Conditional {
        selection: SelectionPlan,
        type_condition: Option<String>,
    },

    Field {
        field_name: String,
        response_key: String,
        /// `None` for leaf fields.
        selection: Option<SelectionPlan>,
    },

    Spread(Arc<DefinitionPlan>),
}

fn compile(
    def: &Definition,
    resolve_spread: &dyn Fn(&str) -> Result<Arc<DefinitionPlan>>,
) -> Result<DefinitionPlan> {
    Ok(DefinitionPlan {
        global_name: def.global_name().to_string(),
        operation_kind: def.operation_kind(),
        selection: compile_selection_set(def.selection_set(), resolve_spread)?,
        type_condition: def.type_condition().map(str::to_string),
    })
}

fn compile_selection_set(
    selection_set: &ast::operation::SelectionSet,
    resolve_spread: &dyn Fn(&str) -> Result<Arc<DefinitionPlan>>,
) -> Result<SelectionPlan> {
    let mut plan = SelectionPlan::default();
    for selection in &selection_set.items {
        match selection {
            ast::operation::Selection::Field(field) => {
                let selection =
                    if field.selection_set.items.is_empty() {
                        None
                    } else {
                        Some(compile_selection_set(&field.selection_set, resolve_spread)?)
                    };
                plan.items.push(PlanItem::Field {
                    field_name: field.name.to_string(),
                    response_key: field.alias.as_ref().unwrap_or(&field.name).to_string(),
                    selection,
                });
            },

            ast::operation::Selection::InlineFragment(inline) => {
                let selection = compile_selection_set(&inline.selection_set, resolve_spread)?;
                plan.spread_closure.extend(selection.spread_closure.iter().cloned());
                plan.items.push(PlanItem::Conditional {
                    selection,
                    type_condition: inline.type_condition.as_ref()
                        .map(|ast::operation::TypeCondition::On(type_name)| type_name.to_string()),
                });
            },

            ast::operation::Selection::FragmentSpread(spread) => {
                let target = resolve_spread(&spread.fragment_name)?;
                plan.spread_closure.insert(target.global_name.to_string());
                plan.spread_closure.extend(target.selection.spread_closure.iter().cloned());
                plan.items.push(PlanItem::Spread(target));
            },
        }
    }
    Ok(plan)
}

/// Compiled plans keyed by global name. Registered definitions never
/// change, so a plan stays valid for the life of the registry.
#[derive(Debug, Default)]
pub(crate) struct PlanCache {
    plans: RwLock<HashMap<String, Arc<DefinitionPlan>>>,
}
impl PlanCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.plans.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// The cached plan for `def`, compiling it (and the plans of every
    /// fragment it spreads) on first use. `lookup` finds spread targets by
    /// global name.
    pub(crate) fn plan_for(
        &self,
        def: &Definition,
        lookup: &dyn Fn(&str) -> Option<Arc<Definition>>,
    ) -> Result<Arc<DefinitionPlan>> {
        let cached = self.plans.read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(def.global_name())
            .cloned();
        if let Some(plan) = cached {
            return Ok(plan);
        }

        let resolve_spread = |fragment_name: &str| -> Result<Arc<DefinitionPlan>> {
            let target = lookup(fragment_name).ok_or_else(||
                ProjectionError::UnknownFragment {
                    fragment_name: fragment_name.to_string(),
                    referenced_by: def.global_name().to_string(),
                }
            )?;
            self.plan_for(&target, lookup)
        };
        let plan = Arc::new(compile(def, &resolve_spread)?);
        log::trace!(
            "Compiled the selection plan of `{}` ({} item(s), {} spread fragment(s)).",
            def.global_name(),
            plan.selection.items.len(),
            plan.selection.spread_closure.len(),
        );

        let mut plans = self.plans.write().unwrap_or_else(PoisonError::into_inner);
        Ok(plans.entry(def.global_name().to_string()).or_insert(plan).clone())
    }
}
