use crate::definition::ScopePath;
use crate::definition::ScopePathError;
use crate::definition::ScopeReference;
use proptest::prelude::*;

type Result<T> = std::result::Result<T, ScopePathError>;

#[test]
fn global_name_joins_segments_and_local_name() -> Result<()> {
    let path: ScopePath = "TestClient::Temp::UserDocument".parse()?;
    assert_eq!(path.segments(), ["TestClient", "Temp", "UserDocument"]);
    assert_eq!(
        path.global_name("__", Some("getUser")),
        "TestClient__Temp__UserDocument__getUser",
    );
    assert_eq!(path.global_name("__", None), "TestClient__Temp__UserDocument");
    assert_eq!(path.global_name("_", None), "TestClient_Temp_UserDocument");
    Ok(())
}

#[test]
fn single_segment_path() -> Result<()> {
    let path: ScopePath = "Query".parse()?;
    assert_eq!(path.global_name("__", None), "Query");
    assert_eq!(path.to_string(), "Query");
    Ok(())
}

#[test]
fn join_appends_a_segment() -> Result<()> {
    let path: ScopePath = "App::Fragments".parse()?;
    let joined = path.join("User")?;
    assert_eq!(joined.to_string(), "App::Fragments::User");
    assert!(matches!(
        path.join("not-a-name"),
        Err(ScopePathError::InvalidSegment { .. }),
    ));
    Ok(())
}

#[test]
fn empty_path_is_rejected() {
    assert_eq!(
        ScopePath::new(Vec::<String>::new()),
        Err(ScopePathError::EmptyScopePath),
    );
}

#[test]
fn invalid_segments_are_rejected() {
    assert_eq!(
        "App::1Fragments".parse::<ScopePath>(),
        Err(ScopePathError::InvalidSegment {
            path: "App::1Fragments".to_string(),
            segment: "1Fragments".to_string(),
        }),
    );
    assert!("App::::User".parse::<ScopePath>().is_err());
    assert!("".parse::<ScopePath>().is_err());
}

#[test]
fn scope_reference_with_local_name() -> Result<()> {
    let reference: ScopeReference = "TestClient::Temp::ProfileFragments.friendFields".parse()?;
    assert_eq!(reference.local_name(), Some("friendFields"));
    assert_eq!(reference.path().to_string(), "TestClient::Temp::ProfileFragments");
    assert_eq!(
        reference.global_name("__"),
        "TestClient__Temp__ProfileFragments__friendFields",
    );
    assert_eq!(reference.to_string(), "TestClient::Temp::ProfileFragments.friendFields");
    Ok(())
}

#[test]
fn scope_reference_without_local_name() -> Result<()> {
    let reference: ScopeReference = "TestClient::Temp::FriendFragment".parse()?;
    assert_eq!(reference.local_name(), None);
    assert_eq!(reference.global_name("__"), "TestClient__Temp__FriendFragment");
    Ok(())
}

#[test]
fn scope_reference_with_invalid_local_name() {
    assert!(matches!(
        "App::Fragments.".parse::<ScopeReference>(),
        Err(ScopePathError::InvalidSegment { .. }),
    ));
}

fn segment_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9]{0,8}"
}

proptest! {
    #[test]
    fn global_names_are_deterministic_and_scoped(
        segments in prop::collection::vec(segment_strategy(), 1..5),
        local_name in prop::option::of(segment_strategy()),
    ) {
        let path = ScopePath::new(segments.clone()).unwrap();
        let name = path.global_name("__", local_name.as_deref());
        prop_assert_eq!(&name, &path.global_name("__", local_name.as_deref()));
        prop_assert!(name.starts_with(&segments.join("__")));
        if let Some(local_name) = &local_name {
            let suffix = format!("__{local_name}");
            prop_assert!(name.ends_with(&suffix));
        }
    }

    #[test]
    fn displayed_paths_parse_back(
        segments in prop::collection::vec(segment_strategy(), 1..5),
    ) {
        let path = ScopePath::new(segments).unwrap();
        let reparsed: ScopePath = path.to_string().parse().unwrap();
        prop_assert_eq!(path, reparsed);
    }
}
