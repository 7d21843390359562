use crate::projection::AccessorValue;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::sync::Arc;
use thiserror::Error;

static FALSE: AccessorValue = AccessorValue::Scalar(serde_json::Value::Bool(false));
static TRUE: AccessorValue = AccessorValue::Scalar(serde_json::Value::Bool(true));

/// A read-only view of one JSON object in a response, shaped by the
/// selection set it was projected through.
///
/// Only fields selected by a branch that is active for the payload's runtime
/// type have accessors. Looking up anything else is a [`MissingFieldError`],
/// never a silent `null`.
#[derive(Clone, Debug, PartialEq)]
pub struct AccessorObject {
    /// Accessor name → response key.
    pub(crate) accessor_names: IndexMap<String, String>,
    /// Response key → projected value.
    pub(crate) fields: IndexMap<String, AccessorValue>,
    pub(crate) payload: Arc<serde_json::Value>,
    pub(crate) spreads: Arc<IndexSet<String>>,
    pub(crate) typename: Option<String>,
}
impl AccessorObject {
    /// Names of every accessor on this object, in selection order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.accessor_names.keys().map(String::as_str)
    }

    /// Look up a field by response key (`firstName`) or by accessor name
    /// (`first_name`). A selected response key always wins.
    ///
    /// A trailing `?` asks whether the field is truthy instead (see
    /// [`AccessorObject::is()`]) and yields a boolean scalar.
    pub fn get(&self, name: &str) -> Result<&AccessorValue, MissingFieldError> {
        if name.ends_with('?') {
            return self.is(name).map(|truthy| if truthy { &TRUE } else { &FALSE });
        }
        self.lookup(name).ok_or_else(|| self.missing_field(name))
    }

    /// Whether the named field holds anything other than `null` or `false`.
    /// Accepts `is_cool` as well as `is_cool?`.
    pub fn is(&self, name: &str) -> Result<bool, MissingFieldError> {
        let name = name.strip_suffix('?').unwrap_or(name);
        self.lookup(name)
            .map(AccessorValue::is_truthy)
            .ok_or_else(|| self.missing_field(name))
    }

    /// The JSON object this accessor was built from, unmodified.
    pub fn raw_payload(&self) -> &serde_json::Value {
        &self.payload
    }

    pub fn responds_to(&self, name: &str) -> bool {
        let name = name.strip_suffix('?').unwrap_or(name);
        self.lookup(name).is_some()
    }

    /// Response keys of every accessor on this object, in selection order.
    pub fn response_keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Whether the selection this object was built from statically spreads
    /// the fragment named `global_name` (which makes casting to it legal).
    pub fn spreads_fragment(&self, global_name: &str) -> bool {
        self.spreads.contains(global_name)
    }

    /// Global names of every fragment this object can be cast to.
    pub fn spreads(&self) -> impl Iterator<Item = &str> {
        self.spreads.iter().map(String::as_str)
    }

    /// The runtime type named by the payload's discriminator key, if present.
    pub fn typename(&self) -> Option<&str> {
        self.typename.as_deref()
    }

    fn lookup(&self, name: &str) -> Option<&AccessorValue> {
        self.fields.get(name).or_else(||
            self.accessor_names.get(name)
                .and_then(|response_key| self.fields.get(response_key))
        )
    }

    fn missing_field(&self, name: &str) -> MissingFieldError {
        MissingFieldError {
            available: self.accessor_names.keys().cloned().collect(),
            field_name: name.to_string(),
            typename: self.typename.to_owned(),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
#[error(
    "No field `{field_name}` is selected on this {} object (available: {})",
    .typename.as_deref().unwrap_or("untyped"),
    .available.join(", "),
)]
pub struct MissingFieldError {
    pub available: Vec<String>,
    pub field_name: String,
    pub typename: Option<String>,
}
