use crate::definition::OperationKind;

/// The shape of a field's declared type that matters when projecting a
/// response: the innermost named type and whether any list wraps it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldTypeShape {
    pub is_list: bool,
    pub named_type: String,
}

/// Type-system facts the projector consults at runtime.
///
/// Everything here is optional knowledge: without a schema the projector
/// falls back to exact type-name matching and treats absent fields as null.
pub trait SchemaTypes: std::fmt::Debug + Send + Sync {
    fn field_type(&self, parent_type: &str, field_name: &str) -> Option<FieldTypeShape>;

    fn has_type(&self, type_name: &str) -> bool;

    /// Whether `maybe_subtype` is `supertype` itself, implements it
    /// (directly or through other interfaces), or is a member of it.
    fn is_subtype(&self, maybe_subtype: &str, supertype: &str) -> bool;

    fn root_type(&self, kind: OperationKind) -> Option<&str>;
}
