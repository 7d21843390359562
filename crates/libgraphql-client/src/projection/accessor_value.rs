use crate::projection::AccessorObject;

/// The value behind one accessor of an [`AccessorObject`].
#[derive(Clone, Debug, PartialEq)]
pub enum AccessorValue {
    /// A list-typed field. Nested lists are lists of lists.
    List(Vec<AccessorValue>),

    /// A `null` in the payload, or a field the payload omits.
    Null,

    /// A field with a sub-selection, projected through it.
    Object(AccessorObject),

    /// A leaf field, exactly as it appears in the payload.
    Scalar(serde_json::Value),
}
impl AccessorValue {
    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar()?.as_bool()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar()?.as_f64()
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar()?.as_i64()
    }

    pub fn as_list(&self) -> Option<&[AccessorValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&AccessorObject> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar()?.as_str()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Only `null` (or an omitted field) and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Null | Self::Scalar(serde_json::Value::Bool(false)))
    }
}
