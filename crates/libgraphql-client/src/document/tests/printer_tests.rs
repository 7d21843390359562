use crate::definition::DefinitionBuilder;
use crate::definition::ScopePath;
use crate::document::printer;
use pretty_assertions::assert_eq;

fn print_source(scope_path: &str, source: &str) -> String {
    let scope_path: ScopePath = scope_path.parse().expect("valid scope path");
    let defs = DefinitionBuilder::new(&scope_path, "__", None)
        .build_from_str(source)
        .expect("valid source");
    printer::print_definitions(defs.iter())
}

#[test]
fn prints_operations_with_arguments_and_nesting() {
    let printed = print_source(
        "TestClient::Temp::LikeMutation",
        "mutation { likeStory(storyID: 12345) { story { likeCount } } }",
    );
    assert_eq!(printed, [
        "mutation TestClient__Temp__LikeMutation {",
        "  likeStory(storyID: 12345) {",
        "    story {",
        "      likeCount",
        "    }",
        "  }",
        "}",
    ].join("\n"));
}

#[test]
fn prints_variables_directives_aliases_and_values() {
    let printed = print_source(
        "App::Search",
        r#"query search($q: String!, $first: Int = 10, $tags: [String!]) @live {
            results: search(
              query: $q,
              first: $first,
              filter: {kind: REPO, minStars: 1.5, tags: ["a", "b\"c"], archived: false, owner: null}
            ) @include(if: true) {
              __typename
              ... on Repository @skip(if: false) { name }
              ... { id }
            }
        }"#,
    );
    assert_eq!(printed, [
        "query App__Search__search($q: String!, $first: Int = 10, $tags: [String!]) @live {",
        "  results: search(query: $q, first: $first, filter: {archived: false, kind: REPO, minStars: 1.5, owner: null, tags: [\"a\", \"b\\\"c\"]}) @include(if: true) {",
        "    __typename",
        "    ... on Repository @skip(if: false) {",
        "      name",
        "    }",
        "    ... {",
        "      id",
        "    }",
        "  }",
        "}",
    ].join("\n"));
}

#[test]
fn prints_fragments_and_joins_definitions_with_a_blank_line() {
    let printed = print_source(
        "TestClient::Temp::UserDocument",
        "query withNestedFragments {
           user(id: 4) { friends(first: 10) { ...friendFields } }
         }
         fragment friendFields on User { id name ...standardProfilePic }
         fragment standardProfilePic on User { profilePic(size: 50) }",
    );
    assert_eq!(printed, [
        "query TestClient__Temp__UserDocument__withNestedFragments {",
        "  user(id: 4) {",
        "    friends(first: 10) {",
        "      ... TestClient__Temp__UserDocument__friendFields",
        "    }",
        "  }",
        "}",
        "",
        "fragment TestClient__Temp__UserDocument__friendFields on User {",
        "  id",
        "  name",
        "  ... TestClient__Temp__UserDocument__standardProfilePic",
        "}",
        "",
        "fragment TestClient__Temp__UserDocument__standardProfilePic on User {",
        "  profilePic(size: 50)",
        "}",
    ].join("\n"));
}

#[test]
fn printed_text_reparses_to_the_same_text() {
    let printed = print_source(
        "App::Query",
        r#"query($id: ID!) { node(id: $id) { id ... on User { login avatar(size: 2) } } }"#,
    );
    let reparsed = crate::ast::operation::parse(&printed).expect("printed text parses");
    let reprinted = reparsed.definitions.iter()
        .map(printer::print_ast_definition)
        .collect::<Vec<_>>()
        .join("\n\n");
    assert_eq!(reprinted, printed);
}
