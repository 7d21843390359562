use crate::definition::OperationKind;
use crate::schema::tests::test_schema::test_schema;
use crate::schema::FieldTypeShape;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaTypeKind;
use crate::schema::SdlSchema;

#[test]
fn root_types_default_to_conventional_names() {
    let schema = test_schema();
    assert_eq!(schema.root_type(OperationKind::Query), Some("Query"));
    assert_eq!(schema.root_type(OperationKind::Mutation), Some("Mutation"));
    assert_eq!(schema.root_type(OperationKind::Subscription), None);
}

#[test]
fn schema_definition_overrides_root_types() -> Result<(), SchemaBuildError> {
    let schema = SdlSchema::from_sdl(
        "schema { query: RootQuery subscription: Events }
         type RootQuery { ok: Boolean }
         type Events { tick: Int }",
    )?;
    assert_eq!(schema.root_type(OperationKind::Query), Some("RootQuery"));
    assert_eq!(schema.root_type(OperationKind::Mutation), None);
    assert_eq!(schema.root_type(OperationKind::Subscription), Some("Events"));
    Ok(())
}

#[test]
fn type_kinds_include_builtin_scalars() {
    let schema = test_schema();
    assert_eq!(schema.type_kind("String"), Some(SchemaTypeKind::Scalar));
    assert_eq!(schema.type_kind("User"), Some(SchemaTypeKind::Interface));
    assert_eq!(schema.type_kind("AdminUser"), Some(SchemaTypeKind::Object));
    assert_eq!(schema.type_kind("SearchResult"), Some(SchemaTypeKind::Union));
    assert_eq!(schema.type_kind("Visibility"), Some(SchemaTypeKind::Enum));
    assert_eq!(schema.type_kind("Nope"), None);
}

#[test]
fn field_type_shapes_unwrap_non_null_and_lists() {
    let schema = test_schema();
    assert_eq!(
        schema.field_type("Repository", "watchers"),
        Some(FieldTypeShape { is_list: true, named_type: "User".to_string() }),
    );
    assert_eq!(
        schema.field_type("Repository", "tags"),
        Some(FieldTypeShape { is_list: true, named_type: "String".to_string() }),
    );
    assert_eq!(
        schema.field_type("Repository", "owner"),
        Some(FieldTypeShape { is_list: false, named_type: "User".to_string() }),
    );
    assert_eq!(schema.field_type("Repository", "missing"), None);
}

#[test]
fn subtyping_follows_interfaces_and_unions() {
    let schema = test_schema();
    assert!(schema.is_subtype("AdminUser", "AdminUser"));
    assert!(schema.is_subtype("AdminUser", "User"));
    assert!(schema.is_subtype("AdminUser", "Node"));
    assert!(schema.is_subtype("User", "Node"));
    assert!(schema.is_subtype("Repository", "SearchResult"));
    assert!(!schema.is_subtype("User", "AdminUser"));
    assert!(!schema.is_subtype("Organization", "User"));
    assert!(!schema.is_subtype("Unknown", "Node"));
}

#[test]
fn possible_types_and_overlap() {
    let schema = test_schema();
    let mut user_types: Vec<_> = schema.possible_types("User").into_iter().collect();
    user_types.sort();
    assert_eq!(user_types, ["AdminUser", "Member"]);

    assert!(schema.types_overlap("Node", "User"));
    assert!(schema.types_overlap("SearchResult", "Node"));
    assert!(schema.types_overlap("SearchResult", "Organization"));
    assert!(!schema.types_overlap("SearchResult", "User"));
    assert!(!schema.types_overlap("Repository", "Organization"));
}

#[test]
fn extensions_add_fields_and_members() -> Result<(), SchemaBuildError> {
    let schema = SdlSchema::from_sdl(
        "type Query { a: A }
         type A { x: Int }
         type B { y: Int }
         interface Named { name: String }
         union AB = A
         extend type A implements Named { name: String }
         extend interface Named { nickname: String }
         extend union AB = B",
    )?;
    assert!(schema.field_type("A", "name").is_some());
    assert!(schema.field_type("Named", "nickname").is_some());
    assert!(schema.is_subtype("A", "Named"));
    assert!(schema.is_subtype("B", "AB"));
    Ok(())
}

#[test]
fn structural_errors() {
    assert!(matches!(
        SdlSchema::from_sdl("type Query { a: Int } type A { x: Int } type A { y: Int }"),
        Err(SchemaBuildError::DuplicateTypeDefinition { .. }),
    ));
    assert!(matches!(
        SdlSchema::from_sdl("type Query { a: Int } extend type Missing { x: Int }"),
        Err(SchemaBuildError::ExtensionOfUndefinedType { .. }),
    ));
    assert!(matches!(
        SdlSchema::from_sdl("type Mutation { a: Int }"),
        Err(SchemaBuildError::NoQueryOperationTypeDefined { .. }),
    ));
    assert!(matches!(
        SdlSchema::from_sdl("type Query {"),
        Err(SchemaBuildError::ParseError { .. }),
    ));
    assert!(SdlSchema::from_sdl("type Query { a: Missing }").is_err());
}

#[test]
fn builtin_scalars_and_typename_are_known() {
    let schema = test_schema();
    for scalar in ["Boolean", "Float", "ID", "Int", "String"] {
        assert!(schema.has_type(scalar), "{scalar} should be a known type");
    }
    assert_eq!(
        schema.field_type("Repository", "__typename").map(|shape| shape.is_list),
        Some(false),
    );
}

#[test]
fn sdl_rendering_of_field_types() {
    let schema = test_schema();
    let rendered = |parent_type: &str, field_name: &str| {
        schema.field_type_annotation(parent_type, field_name)
            .map(crate::schema::sdl_schema::type_annotation_to_sdl)
    };
    assert_eq!(rendered("Repository", "owner").as_deref(), Some("User!"));
    assert_eq!(rendered("Repository", "watchers").as_deref(), Some("[User!]"));
    assert_eq!(rendered("Repository", "tags").as_deref(), Some("[[String!]!]"));
    assert_eq!(rendered("Query", "viewer").as_deref(), Some("User"));
}
