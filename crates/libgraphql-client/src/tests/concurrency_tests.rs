use crate::schema::tests::test_schema::test_schema;
use crate::Client;
use rayon::prelude::*;
use serde_json::json;

const OWNER_FRAGMENT: &str = "fragment on User { login firstName }";
const REPO_QUERY: &str = "
    query($name: String!) {
      repository(name: $name) {
        name
        owner {
          ...App::Owner
        }
      }
    }
";

#[test]
fn concurrent_registration_of_identical_sources_is_idempotent() {
    let client = Client::default();
    let results: Vec<_> = (0..64)
        .into_par_iter()
        .map(|_| client.parse("App::Owner", OWNER_FRAGMENT))
        .collect();

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(client.registry().len(), 1);
}

#[test]
fn concurrent_registration_of_distinct_sources() {
    let client = Client::default();
    (0..32).into_par_iter().for_each(|idx| {
        client.parse(&format!("App::Fragment{idx}"), "fragment on User { id }")
            .expect("distinct scopes never conflict");
    });
    assert_eq!(client.registry().len(), 32);
}

#[test]
fn documents_validation_and_projection_from_many_threads() {
    let client = Client::builder().schema(test_schema()).build();
    client.parse("App::Owner", OWNER_FRAGMENT).expect("fragment registers");
    let query = client.parse("App::RepoQuery", REPO_QUERY)
        .expect("query registers")
        .sole_definition()
        .cloned()
        .expect("one definition");
    client.freeze();

    let expected_doc = client.document_for(&[query.clone()])
        .expect("fragments resolve")
        .to_query_string();

    (0..128).into_par_iter().for_each(|idx| {
        let doc = client.document_for(&[query.clone()]).expect("fragments resolve");
        assert_eq!(doc.to_query_string(), expected_doc);
        client.validate().expect("document is valid");

        let login = format!("user{idx}");
        let repo_query = client.project(&query, &json!({
            "repository": {
                "__typename": "Repository",
                "name": "rails",
                "owner": {"__typename": "Member", "login": login, "firstName": null},
            },
        })).expect("payload projects");
        let repo = repo_query.get("repository").expect("selected")
            .as_object().expect("an object");
        let owner = repo.get("owner").expect("selected")
            .as_object().expect("an object");
        assert_eq!(owner.get("login").expect("selected").as_str(), Some(login.as_str()));
        assert!(owner.get("first_name").expect("selected").is_null());
    });
}
