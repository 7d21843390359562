use crate::definition::source_preprocessor;
use crate::definition::ScopePathError;

type Result<T> = std::result::Result<T, ScopePathError>;

#[test]
fn plain_graphql_is_untouched() -> Result<()> {
    let source = "query getUser { viewer { ...userFields ... on User { id } } }";
    let preprocessed = source_preprocessor::preprocess(source)?;
    assert_eq!(preprocessed.text, source);
    assert!(preprocessed.qualified_spreads.is_empty());
    Ok(())
}

#[test]
fn qualified_spreads_keep_their_length() -> Result<()> {
    let source = "{ user { ...App::Fragments::User ...App::Docs.friendFields } }";
    let preprocessed = source_preprocessor::preprocess(source)?;
    assert_eq!(
        preprocessed.text,
        "{ user { ...App__Fragments__User ...App__Docs_friendFields } }",
    );
    assert_eq!(preprocessed.text.len(), source.len());

    let user_ref = &preprocessed.qualified_spreads["App__Fragments__User"];
    assert_eq!(user_ref.to_string(), "App::Fragments::User");
    assert_eq!(user_ref.local_name(), None);

    let friend_ref = &preprocessed.qualified_spreads["App__Docs_friendFields"];
    assert_eq!(friend_ref.path().to_string(), "App::Docs");
    assert_eq!(friend_ref.local_name(), Some("friendFields"));
    Ok(())
}

#[test]
fn whitespace_after_spread_dots_is_allowed() -> Result<()> {
    let preprocessed = source_preprocessor::preprocess("{ ... App::User }")?;
    assert_eq!(preprocessed.text, "{ ... App__User }");
    Ok(())
}

#[test]
fn anonymous_fragments_get_placeholder_names() -> Result<()> {
    let preprocessed = source_preprocessor::preprocess(
        "fragment on User { id }\nfragment named on User { id }\nfragment on Repository { name }",
    )?;
    assert_eq!(
        preprocessed.text,
        "fragment __anonymous_fragment_0 on User { id }\n\
        fragment named on User { id }\n\
        fragment __anonymous_fragment_1 on Repository { name }",
    );
    assert!(source_preprocessor::is_anonymous_fragment_name("__anonymous_fragment_1"));
    assert!(!source_preprocessor::is_anonymous_fragment_name("named"));
    Ok(())
}

#[test]
fn fields_named_fragment_are_not_rewritten() -> Result<()> {
    let source = "{ post { fragment on } }";
    let preprocessed = source_preprocessor::preprocess(source)?;
    assert_eq!(preprocessed.text, source);
    Ok(())
}

#[test]
fn strings_and_comments_are_copied_verbatim() -> Result<()> {
    let source = concat!(
        "# ...A::B in a comment\n",
        "{ search(q: \"...A::B\", doc: \"\"\"fragment on X \\\"\"\" ...C::D\"\"\") { id } }",
    );
    let preprocessed = source_preprocessor::preprocess(source)?;
    assert_eq!(preprocessed.text, source);
    assert!(preprocessed.qualified_spreads.is_empty());
    Ok(())
}
