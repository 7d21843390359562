use crate::definition::OperationKind;
use crate::schema::FieldTypeShape;
use crate::schema::SchemaTypes;
use inherent::inherent;
use libgraphql::schema::Schema;
use libgraphql::schema::SchemaBuilder;
use libgraphql::types::GraphQLType;
use libgraphql::types::GraphQLTypeKind;
use libgraphql::types::TypeAnnotation;
use std::collections::HashSet;
use std::path::Path;

pub use libgraphql::schema::SchemaBuildError;

type Result<T> = std::result::Result<T, SchemaBuildError>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SchemaTypeKind {
    Enum,
    InputObject,
    Interface,
    Object,
    Scalar,
    Union,
}
impl SchemaTypeKind {
    /// Object, interface and union types are the ones selections can be
    /// made on.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Interface | Self::Object | Self::Union)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Enum | Self::Scalar)
    }
}
impl std::convert::From<GraphQLTypeKind> for SchemaTypeKind {
    fn from(value: GraphQLTypeKind) -> Self {
        match value {
            GraphQLTypeKind::Bool
                | GraphQLTypeKind::Float
                | GraphQLTypeKind::ID
                | GraphQLTypeKind::Int
                | GraphQLTypeKind::Scalar
                | GraphQLTypeKind::String => Self::Scalar,
            GraphQLTypeKind::Enum => Self::Enum,
            GraphQLTypeKind::InputObject => Self::InputObject,
            GraphQLTypeKind::Interface => Self::Interface,
            GraphQLTypeKind::Object => Self::Object,
            GraphQLTypeKind::Union => Self::Union,
        }
    }
}

/// A built and type-checked `libgraphql` [`Schema`], exposing the facts the
/// client needs for structural validation and for projecting responses.
#[derive(Debug)]
pub struct SdlSchema {
    schema: Schema,
}

impl SdlSchema {
    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self> {
        let schema = SchemaBuilder::new()
            .load_file(file_path.as_ref())?
            .build()?;
        Ok(Self::from(schema))
    }

    pub fn from_sdl(content: &str) -> Result<Self> {
        let schema = SchemaBuilder::new()
            .load_str(None, content)?
            .build()?;
        Ok(Self::from(schema))
    }

    pub fn libgraphql_schema(&self) -> &Schema {
        &self.schema
    }

    /// Every object type that a value of `type_name` could be at runtime.
    pub fn possible_types(&self, type_name: &str) -> HashSet<&str> {
        match self.type_kind(type_name) {
            Some(SchemaTypeKind::Object) => self.schema.all_types()
                .get_key_value(type_name)
                .map(|(name, _)| name.as_str())
                .into_iter()
                .collect(),
            Some(SchemaTypeKind::Interface | SchemaTypeKind::Union) => {
                let all_types = self.schema.all_types();
                all_types
                    .iter()
                    .filter(|(name, graphql_type)| {
                        matches!(graphql_type, GraphQLType::Object(_))
                            && self.is_subtype_impl(name, type_name)
                    })
                    .filter_map(|(name, _)| all_types.get_key_value(name.as_str()))
                    .map(|(name, _)| name.as_str())
                    .collect()
            },
            _ => HashSet::new(),
        }
    }

    pub fn type_kind(&self, type_name: &str) -> Option<SchemaTypeKind> {
        self.schema.all_types()
            .get(type_name)
            .map(|graphql_type| GraphQLTypeKind::from(graphql_type).into())
    }

    /// Whether some runtime object could satisfy both type conditions.
    pub fn types_overlap(&self, type_a: &str, type_b: &str) -> bool {
        if self.is_subtype_impl(type_a, type_b) || self.is_subtype_impl(type_b, type_a) {
            return true;
        }
        let possible_a = self.possible_types(type_a);
        self.possible_types(type_b)
            .iter()
            .any(|name| possible_a.contains(name))
    }

    /// The declared type of `parent_type.field_name`. Only object and
    /// interface types have fields.
    pub(crate) fn field_type_annotation(
        &self,
        parent_type: &str,
        field_name: &str,
    ) -> Option<&TypeAnnotation> {
        let field = match self.schema.all_types().get(parent_type)? {
            GraphQLType::Interface(iface_type) => iface_type.fields().get(field_name),
            GraphQLType::Object(obj_type) => obj_type.fields().get(field_name),
            _ => None,
        }?;
        Some(field.type_annotation())
    }

    fn interface_names(&self, type_name: &str) -> Vec<&str> {
        match self.schema.all_types().get(type_name) {
            Some(GraphQLType::Interface(iface_type)) => iface_type.interface_names(),
            Some(GraphQLType::Object(obj_type)) => obj_type.interface_names(),
            _ => vec![],
        }
    }

    fn is_subtype_impl(&self, maybe_subtype: &str, supertype: &str) -> bool {
        let mut visited = HashSet::new();
        self.is_subtype_rec(maybe_subtype, supertype, &mut visited)
    }

    fn is_subtype_rec<'a>(
        &'a self,
        maybe_subtype: &'a str,
        supertype: &str,
        visited: &mut HashSet<&'a str>,
    ) -> bool {
        if maybe_subtype == supertype {
            return true;
        }
        if !visited.insert(maybe_subtype) {
            return false;
        }
        let is_union_member = match self.schema.all_types().get(supertype) {
            Some(GraphQLType::Union(union_type)) =>
                union_type.member_type_names().contains(&maybe_subtype),
            _ => false,
        };
        is_union_member
            || self.interface_names(maybe_subtype)
                .into_iter()
                .any(|iface| self.is_subtype_rec(iface, supertype, visited))
    }
}

impl std::convert::From<Schema> for SdlSchema {
    fn from(schema: Schema) -> Self {
        Self { schema }
    }
}

#[inherent]
impl SchemaTypes for SdlSchema {
    pub fn field_type(&self, parent_type: &str, field_name: &str) -> Option<FieldTypeShape> {
        let annot = self.field_type_annotation(parent_type, field_name)?;
        Some(FieldTypeShape {
            is_list: annot.as_list_annotation().is_some(),
            named_type: annot.innermost_named_type_annotation()
                .graphql_type_name()
                .to_string(),
        })
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.schema.all_types().contains_key(type_name)
    }

    pub fn is_subtype(&self, maybe_subtype: &str, supertype: &str) -> bool {
        self.is_subtype_impl(maybe_subtype, supertype)
    }

    pub fn root_type(&self, kind: OperationKind) -> Option<&str> {
        let root_type = match kind {
            OperationKind::Mutation => self.schema.mutation_type()?,
            OperationKind::Query => self.schema.query_type(),
            OperationKind::Subscription => self.schema.subscription_type()?,
        };
        Some(root_type.name())
    }
}

/// Render `annot` the way it is written in SDL (`[Repository!]!`).
pub(crate) fn type_annotation_to_sdl(annot: &TypeAnnotation) -> String {
    let type_str = match annot.as_list_annotation() {
        Some(list_annot) =>
            format!("[{}]", type_annotation_to_sdl(list_annot.inner_type_annotation())),
        None => annot.innermost_named_type_annotation()
            .graphql_type_name()
            .to_string(),
    };
    if annot.nullable() {
        type_str
    } else {
        format!("{type_str}!")
    }
}
