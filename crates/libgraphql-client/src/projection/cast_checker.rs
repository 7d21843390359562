use crate::definition::Definition;
use crate::projection::AccessorObject;
use crate::projection::ProjectionError;
use thiserror::Error;

/// Decide whether `source` may be reinterpreted through `target`.
///
/// The decision is purely static: `target` must have been spread into the
/// selection that produced `source`. Whether the payload happens to carry
/// `target`'s fields is irrelevant.
pub(crate) fn check_cast(
    target: &Definition,
    source: &AccessorObject,
) -> Result<(), CastError> {
    if source.spreads_fragment(target.global_name()) {
        return Ok(());
    }
    log::debug!(
        "Rejected cast to `{}`; the source object only spreads [{}].",
        target.global_name(),
        source.spreads().collect::<Vec<_>>().join(", "),
    );
    Err(CastError::NotSpread {
        spread_fragments: source.spreads().map(str::to_string).collect(),
        target: target.global_name().to_string(),
    })
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum CastError {
    #[error(
        "Cannot cast to `{target}`: it is not spread into the selection this \
        object was built from (spread fragments: [{}])",
        .spread_fragments.join(", "),
    )]
    NotSpread {
        spread_fragments: Vec<String>,
        target: String,
    },

    #[error("Failed to project the cast object through `{target}`: {err}")]
    Projection {
        err: ProjectionError,
        target: String,
    },
}
