use crate::definition::Definition;
use crate::definition::DefinitionBuilder;
use crate::definition::ScopePath;
use crate::document::DefinitionMap;
use crate::document::Document;
use crate::document::FragmentResolver;
use crate::document::ResolveError;
use std::sync::Arc;

/// Build a definition map without the registry's checks, so that broken
/// graphs can be handed to the resolver directly.
fn definition_map(sources: &[(&str, &str)]) -> DefinitionMap {
    let mut map = DefinitionMap::new();
    for (scope_path, source) in sources {
        let scope_path: ScopePath = scope_path.parse().expect("valid scope path");
        let defs = DefinitionBuilder::new(&scope_path, "__", None)
            .build_from_str(source)
            .expect("valid source");
        for def in defs {
            map.insert(def.global_name().to_string(), Arc::new(def));
        }
    }
    map
}

fn names(defs: &[Arc<Definition>]) -> Vec<&str> {
    defs.iter().map(|def| def.global_name()).collect()
}

#[test]
fn dependencies_follow_the_root_in_post_order() -> Result<(), ResolveError> {
    let map = definition_map(&[
        ("Docs::ProfilePic", "fragment on User { profilePic(size: 50) }"),
        ("Docs::Friend", "fragment on User { id ...Docs__ProfilePic }"),
        ("Docs::Query", "{ user { friends { ...Docs__Friend } mutual { ...Docs__Friend } } }"),
    ]);

    let resolved = FragmentResolver::new(&map).resolve(&[map["Docs__Query"].clone()])?;
    assert_eq!(names(&resolved), ["Docs__Query", "Docs__ProfilePic", "Docs__Friend"]);
    Ok(())
}

#[test]
fn shared_fragments_appear_once() -> Result<(), ResolveError> {
    let map = definition_map(&[
        ("Docs::Friend", "fragment on User { id name }"),
        ("Docs::Friends", "{ user { friends { ...Docs__Friend } } }"),
        ("Docs::Mutual", "{ user { mutualFriends { ...Docs__Friend } } }"),
    ]);

    let roots = [map["Docs__Friends"].clone(), map["Docs__Mutual"].clone()];
    let resolved = FragmentResolver::new(&map).resolve(&roots)?;
    assert_eq!(names(&resolved), ["Docs__Friends", "Docs__Mutual", "Docs__Friend"]);
    Ok(())
}

#[test]
fn roots_are_deduplicated_and_keep_their_position() -> Result<(), ResolveError> {
    let map = definition_map(&[
        ("Docs::Leaf", "fragment on User { id }"),
        ("Docs::Mid", "fragment on User { ...Docs__Leaf }"),
        ("Docs::Query", "{ viewer { ...Docs__Mid } }"),
    ]);

    let roots = [
        map["Docs__Leaf"].clone(),
        map["Docs__Query"].clone(),
        map["Docs__Leaf"].clone(),
    ];
    let resolved = FragmentResolver::new(&map).resolve(&roots)?;
    assert_eq!(names(&resolved), ["Docs__Leaf", "Docs__Query", "Docs__Mid"]);
    Ok(())
}

#[test]
fn spreads_inside_inline_fragments_are_followed() -> Result<(), ResolveError> {
    let map = definition_map(&[
        ("Docs::Admin", "fragment on AdminUser { password }"),
        ("Docs::Node", "fragment on Node { id ... on User { ... on AdminUser { ...Docs__Admin } } }"),
    ]);

    let resolved = FragmentResolver::new(&map).resolve(&[map["Docs__Node"].clone()])?;
    assert_eq!(names(&resolved), ["Docs__Node", "Docs__Admin"]);
    Ok(())
}

#[test]
fn cycles_are_reported_with_their_path() {
    let map = definition_map(&[
        ("Docs::A", "fragment on User { ...Docs__B }"),
        ("Docs::B", "fragment on User { friends { ...Docs__C } }"),
        ("Docs::C", "fragment on User { ...Docs__A }"),
        ("Docs::Query", "{ viewer { ...Docs__A } }"),
    ]);

    let result = FragmentResolver::new(&map).resolve(&[map["Docs__Query"].clone()]);
    assert_eq!(result.err(), Some(ResolveError::CyclicFragment {
        cycle: vec![
            "Docs__A".to_string(),
            "Docs__B".to_string(),
            "Docs__C".to_string(),
            "Docs__A".to_string(),
        ],
    }));
}

#[test]
fn self_spread_is_a_cycle() {
    let map = definition_map(&[("Docs::A", "fragment on User { id ...Docs__A }")]);
    let result = FragmentResolver::new(&map).resolve(&[map["Docs__A"].clone()]);
    assert!(matches!(result, Err(ResolveError::CyclicFragment { .. })));
}

#[test]
fn unresolved_spreads_name_the_reference_as_written() {
    let map = definition_map(&[("Docs::Query", "{ viewer { ...App::Missing.frag } }")]);
    let result = FragmentResolver::new(&map).resolve(&[map["Docs__Query"].clone()]);
    match result {
        Err(ResolveError::UnresolvedFragment {
            fragment_name,
            reference,
            referenced_by,
            ..
        }) => {
            assert_eq!(fragment_name, "App__Missing__frag");
            assert_eq!(reference, "App::Missing.frag");
            assert_eq!(referenced_by, "Docs__Query");
        },
        other => panic!("expected an unresolved fragment, got {other:?}"),
    }
}

#[test]
fn spreading_an_operation_is_an_error() {
    let map = definition_map(&[
        ("Docs::Op", "{ viewer { id } }"),
        ("Docs::Frag", "fragment on User { ...Docs__Op }"),
    ]);
    let result = FragmentResolver::new(&map).resolve(&[map["Docs__Frag"].clone()]);
    assert!(matches!(result, Err(ResolveError::NotAFragment { .. })));
}

#[test]
fn reachable_fragments_exclude_unspread_roots() -> Result<(), ResolveError> {
    let map = definition_map(&[
        ("Docs::Used", "fragment on User { id }"),
        ("Docs::Unused", "fragment on User { name }"),
        ("Docs::Query", "{ viewer { ...Docs__Used } }"),
    ]);

    let reachable = FragmentResolver::new(&map)
        .reachable_fragments(&[map["Docs__Query"].clone()])?;
    assert!(reachable.contains("Docs__Used"));
    assert!(!reachable.contains("Docs__Unused"));
    assert!(!reachable.contains("Docs__Query"));
    Ok(())
}

#[test]
fn resolved_documents_print_idempotently() -> Result<(), ResolveError> {
    let map = definition_map(&[
        ("Docs::Friend", "fragment on User { id name }"),
        ("Docs::Query", "query($first: Int = 10) { user(id: 4) { friends(first: $first) { ...Docs__Friend } } }"),
    ]);

    let document = Document::resolve(&map, &[map["Docs__Query"].clone()])?;
    let printed = document.to_query_string();
    assert_eq!(printed, document.to_query_string());
    assert_eq!(printed, document.to_string());
    assert_eq!(document.len(), 2);
    assert_eq!(document.operations().count(), 1);
    assert_eq!(document.fragments().count(), 1);
    Ok(())
}
