use crate::definition::ScopePath;
use crate::registry::Registry;
use crate::schema::tests::test_schema::test_schema;
use crate::schema::SchemaValidationMessage;
use crate::schema::SdlSchema;

fn validate(schema: &SdlSchema, sources: &[(&str, &str)]) -> Vec<SchemaValidationMessage> {
    let registry = Registry::new("__");
    for (scope_path, source) in sources {
        let scope_path: ScopePath = scope_path.parse().expect("valid scope path");
        registry.register_source(&scope_path, source).expect("source registers");
    }
    let document = registry.document().expect("document resolves");
    schema.validate(&document)
}

fn messages(schema: &SdlSchema, sources: &[(&str, &str)]) -> Vec<String> {
    validate(schema, sources).into_iter().map(|msg| msg.message).collect()
}

#[test]
fn valid_document_has_no_messages() {
    let schema = test_schema();
    let found = messages(&schema, &[
        ("App::UserFields", "fragment on User { __typename id login ... on AdminUser { password } }"),
        ("App::Query", "query { viewer { ...App::UserFields repositories { name owner { id } } } }"),
        ("App::Search", "{ search(query: \"x\") { __typename ... on Repository { name } ... on Node { id } } }"),
        ("App::Star", "mutation { starRepository(name: \"x\") { id } }"),
    ]);
    assert_eq!(found, Vec::<String>::new());
}

#[test]
fn unknown_fields_are_reported() {
    let schema = test_schema();
    let found = messages(&schema, &[
        ("App::Query", "{ viewer { id email } bogus }"),
    ]);
    assert_eq!(found, [
        "Cannot query field \"email\" on type \"User\".",
        "Cannot query field \"bogus\" on type \"Query\".",
    ]);
}

#[test]
fn union_fields_need_a_type_condition() {
    let schema = test_schema();
    let found = messages(&schema, &[
        ("App::Search", "{ search(query: \"x\") { __typename id } }"),
    ]);
    assert_eq!(found, ["Cannot query field \"id\" on type \"SearchResult\"."]);
}

#[test]
fn leaf_and_composite_selections_are_checked() {
    let schema = test_schema();
    let found = messages(&schema, &[
        ("App::Query", "{ viewer { id { value } repositories } }"),
    ]);
    assert_eq!(found, [
        "Field \"id\" must not have a selection since type \"ID!\" has no subfields.",
        "Field \"repositories\" of type \"[Repository!]!\" must have a selection of subfields. Did you mean \"repositories { ... }\"?",
    ]);
}

#[test]
fn type_conditions_must_name_composite_types() {
    let schema = test_schema();
    let found = messages(&schema, &[
        ("App::Unknown", "fragment on Robot { id }"),
        ("App::Scalar", "fragment on String { length }"),
        ("App::Query", "{ viewer { ... on Robot { id } } }"),
    ]);
    assert_eq!(found, [
        "Unknown type \"Robot\".",
        "Fragment cannot condition on non composite type \"String\".",
        "Unknown type \"Robot\".",
    ]);
}

#[test]
fn impossible_spreads_are_reported() {
    let schema = test_schema();
    let found = messages(&schema, &[
        ("App::OrgFields", "fragment on Organization { name }"),
        ("App::Query", "{ viewer { ...App::OrgFields ... on Repository { name } } }"),
    ]);
    assert_eq!(found, [
        "Fragment \"App__OrgFields\" cannot be spread here as objects of type \"User\" can never be of type \"Organization\".",
        "Fragment cannot be spread here as objects of type \"User\" can never be of type \"Repository\".",
    ]);
}

#[test]
fn missing_root_types_are_reported() {
    let schema = test_schema();
    let found = messages(&schema, &[
        ("App::Ticks", "subscription { tick }"),
    ]);
    assert_eq!(found, ["Schema is not configured to execute subscription operation."]);
}

#[test]
fn messages_carry_source_positions() {
    let schema = test_schema();
    let found = validate(&schema, &[
        ("App::Query", "{\n  viewer {\n    email\n  }\n}"),
    ]);
    assert_eq!(found.len(), 1);
    let pos = &found[0].locations[0];
    assert_eq!((pos.line, pos.col), (3, 5));
}
