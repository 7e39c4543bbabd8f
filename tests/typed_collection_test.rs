mod common;

#[path = "data/test_orm.rs"]
#[allow(dead_code)]
mod test_orm;

use common::*;
use serde_json::{json, Map};
use test_orm::{StatusField, TagField, TestCollectionCollection};
use zenkit::http::Method;
use zenkit::{CollectionRegistry, TypedCollection, Zenkit};

fn registry() -> CollectionRegistry {
    let mut registry = CollectionRegistry::new();
    test_orm::register(&mut registry);
    registry
}

#[tokio::test]
async fn registered_collections_come_back_typed() {
    let (_, api) = session();
    let zenkit = Zenkit::with_api(api, registry()).await.unwrap();
    assert!(zenkit.registry().contains(LIST_UUID));
    let workspace = zenkit.workspace_by_id(WORKSPACE_ID).unwrap();

    let bound = workspace.collection_by_pattern("^Test").unwrap();
    assert!(bound.is_typed());
    assert_eq!(bound.collection().id(), LIST_ID);
    let typed: TestCollectionCollection = bound.downcast().unwrap();
    assert_eq!(typed.name(), "Test Collection");

    let archive = workspace.collection_by_pattern("Archive").unwrap();
    assert!(!archive.is_typed());
    assert!(archive.downcast::<TestCollectionCollection>().is_none());
}

#[tokio::test]
async fn typed_lookup_works_without_registration() {
    let (_, api) = session();
    let zenkit = Zenkit::with_api(api, CollectionRegistry::new()).await.unwrap();
    let workspace = zenkit.workspace_by_id(TestCollectionCollection::WORKSPACE_ID).unwrap();
    assert!(!workspace.collection_by_id(LIST_ID).unwrap().is_typed());
    let typed = workspace.typed_collection::<TestCollectionCollection>().unwrap();
    assert_eq!(typed.collection().uuid(), TestCollectionCollection::UUID);
}

#[tokio::test]
async fn typed_accessors_read_and_edit_the_entry() {
    let (mock, api) = session();
    mock.ok(Method::PUT, &entry_path(1), json!({"id": 1}));
    let zenkit = Zenkit::with_api(api, registry()).await.unwrap();
    let mut tasks = zenkit.workspace_by_id(WORKSPACE_ID).unwrap().typed_collection::<TestCollectionCollection>().unwrap();
    assert_eq!(tasks.populate(Default::default()).await.unwrap(), 3);

    let mut entry = tasks.entry("Eine Neue Aufgabe").unwrap();
    assert_eq!(entry.number_field().unwrap().as_f64(), Some(42.0));
    let status = entry.status_field().unwrap().label_ids();
    assert_eq!(status.into_iter().filter_map(StatusField::from_id).collect::<Vec<_>>(), vec![StatusField::ZU_BEARBEITEN]);
    assert!(entry.tag_field().unwrap().has_label(TagField::BUG));

    assert!(entry.status_field().unwrap().add_label(StatusField::IN_BEARBEITUNG));
    assert!(entry.tag_field().unwrap().remove_label(TagField::NEW));
    assert!(entry.commit().await.unwrap());

    let put = mock.calls_with(&Method::PUT).pop().unwrap();
    assert_eq!(put.body, Some(json!({STATUS_KEY: [13389241], TAG_KEY: [13391155]})));
    assert_eq!(tasks.entries().count(), 3);
}

#[tokio::test]
async fn typed_create_entry_narrows_the_primary_value() {
    let (mock, api) = session();
    mock.ok(
        Method::POST,
        &format!("lists/{}/entries", LIST_ID),
        json!({"id": 4, "uuid": "e-4", "listId": LIST_ID, PRIMARY_KEY: "Vierte Aufgabe"}),
    );
    let zenkit = Zenkit::with_api(api, registry()).await.unwrap();
    let mut tasks = zenkit.workspace_by_id(WORKSPACE_ID).unwrap().typed_collection::<TestCollectionCollection>().unwrap();
    tasks.elements().await.unwrap();

    let mut entry = tasks.create_entry("Vierte Aufgabe".to_string(), Map::new()).await.unwrap();
    assert_eq!(entry.id(), 4);
    assert_eq!(entry.primary_text_field().unwrap().as_str(), Some("Vierte Aufgabe"));
}
