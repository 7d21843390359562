use crate::definition::Definition;
use crate::document::DefinitionMap;
use crate::document::Document;
use crate::document::FragmentResolver;
use crate::schema::SchemaValidator;
use crate::validation::ValidationError;
use crate::validation::ValidationMessage;
use std::sync::Arc;

/// Check `document` against `validator` (when one is given) and report every
/// fragment that no operation of the document reaches.
///
/// All problems are collected before returning: schema messages first, in
/// the order the validator reported them, then one
/// `Fragment <GlobalName> was defined, but not used` message per unused
/// fragment in document order.
pub fn validate_document(
    document: &Document,
    validator: Option<&dyn SchemaValidator>,
) -> Result<(), ValidationError> {
    let mut messages: Vec<ValidationMessage> = validator
        .map(|validator| validator.validate(document))
        .unwrap_or_default()
        .into_iter()
        .map(ValidationMessage::Schema)
        .collect();

    let definitions: DefinitionMap =
        document.definitions()
            .iter()
            .map(|def| (def.global_name().to_string(), def.clone()))
            .collect();
    let operations: Vec<Arc<Definition>> = document.operations().cloned().collect();
    match FragmentResolver::new(&definitions).reachable_fragments(&operations) {
        Ok(reachable) => messages.extend(
            document.fragments()
                .filter(|frag| !reachable.contains(frag.global_name()))
                .map(|frag| ValidationMessage::UnusedFragment {
                    fragment_name: frag.global_name().to_string(),
                    location: frag.def_location().to_owned(),
                }),
        ),
        Err(err) => messages.push(ValidationMessage::FragmentGraph(err)),
    }

    log::debug!(
        "Validated {} definition(s): {} problem(s).",
        document.len(),
        messages.len(),
    );
    if messages.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(messages))
    }
}
