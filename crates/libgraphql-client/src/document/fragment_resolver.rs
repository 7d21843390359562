use crate::definition::Definition;
use crate::loc;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

type Result<T> = std::result::Result<T, ResolveError>;

/// Definitions keyed by global name, in registration order.
pub type DefinitionMap = IndexMap<String, Arc<Definition>>;

/// Computes the fragment closure of a set of root definitions.
///
/// The output lists the roots first (in the order given, deduplicated),
/// followed by every non-root fragment they transitively spread. Those
/// fragments are emitted in post-order: a fragment is appended only after
/// every fragment it spreads has been appended, so a fragment never appears
/// before its own dependencies.
#[derive(Clone, Debug)]
pub struct FragmentResolver<'a> {
    definitions: &'a DefinitionMap,
}

#[derive(Default)]
struct Traversal {
    completed: HashSet<String>,
    in_progress: Vec<String>,
    output: IndexMap<String, Arc<Definition>>,
    reached: IndexSet<String>,
}

impl<'a> FragmentResolver<'a> {
    pub fn new(definitions: &'a DefinitionMap) -> Self {
        Self { definitions }
    }

    /// The roots plus their transitive fragment closure, each exactly once.
    pub fn resolve(&self, roots: &[Arc<Definition>]) -> Result<Vec<Arc<Definition>>> {
        let traversal = self.traverse(roots)?;
        Ok(traversal.output.into_values().collect())
    }

    /// Global names of every fragment spread (directly or transitively) by
    /// the roots, in first-spread order. A root only appears here if some
    /// root spreads it.
    pub fn reachable_fragments(&self, roots: &[Arc<Definition>]) -> Result<IndexSet<String>> {
        let traversal = self.traverse(roots)?;
        Ok(traversal.reached)
    }

    fn traverse(&self, roots: &[Arc<Definition>]) -> Result<Traversal> {
        let mut traversal = Traversal::default();
        for root in roots {
            traversal.output
                .entry(root.global_name().to_string())
                .or_insert_with(|| root.clone());
        }
        for root in roots {
            self.visit(root, &mut traversal)?;
        }
        log::trace!(
            "Resolved {} root(s) to {} definition(s).",
            roots.len(),
            traversal.output.len(),
        );
        Ok(traversal)
    }

    fn visit(&self, def: &Arc<Definition>, traversal: &mut Traversal) -> Result<()> {
        if traversal.completed.contains(def.global_name()) {
            return Ok(());
        }

        traversal.in_progress.push(def.global_name().to_string());
        for (fragment_name, spread) in def.spreads() {
            if let Some(cycle_start) =
                traversal.in_progress.iter().position(|name| name == fragment_name) {
                let mut cycle = traversal.in_progress[cycle_start..].to_vec();
                cycle.push(fragment_name.to_string());
                return Err(ResolveError::CyclicFragment { cycle });
            }

            traversal.reached.insert(fragment_name.to_string());
            if traversal.completed.contains(fragment_name) {
                continue;
            }

            let target = self.definitions.get(fragment_name).ok_or_else(||
                ResolveError::UnresolvedFragment {
                    fragment_name: fragment_name.to_string(),
                    location: spread.location().to_owned(),
                    reference: spread.written().to_string(),
                    referenced_by: def.global_name().to_string(),
                }
            )?;
            if !target.is_fragment() {
                return Err(ResolveError::NotAFragment {
                    location: spread.location().to_owned(),
                    name: fragment_name.to_string(),
                    referenced_by: def.global_name().to_string(),
                });
            }

            self.visit(target, traversal)?;
            traversal.output
                .entry(fragment_name.to_string())
                .or_insert_with(|| target.clone());
        }
        traversal.in_progress.pop();
        traversal.completed.insert(def.global_name().to_string());

        Ok(())
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ResolveError {
    #[error("Fragment cycle detected: {}", .cycle.join(" → "))]
    CyclicFragment {
        cycle: Vec<String>,
    },

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
