#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::Arc;
use zenkit::http::Method;
use zenkit::testing::MockTransport;
use zenkit::{Api, Collection, CollectionInfo};

pub const LIST_ID: u64 = 3207438;
pub const LIST_UUID: &str = "dfda7cb2-65a9-4a70-b317-5988b3ba7b59";
pub const WORKSPACE_ID: u64 = 1281787;

pub const PRIMARY_KEY: &str = "a1b2c3d4-0001-4000-8000-000000000001_text";
pub const STATUS_KEY: &str = "a1b2c3d4-0002-4000-8000-000000000002_categories";
pub const DATE_KEY: &str = "a1b2c3d4-0004-4000-8000-000000000004_date";
pub const DATE_END_KEY: &str = "a1b2c3d4-0004-4000-8000-000000000004_endDate";
pub const DATE_HAS_TIME_KEY: &str = "a1b2c3d4-0004-4000-8000-000000000004_hasTime";
pub const NUMBER_KEY: &str = "a1b2c3d4-0007-4000-8000-000000000007_number";
pub const TAG_KEY: &str = "a1b2c3d4-0008-4000-8000-000000000008_categories";

pub fn fixture(text: &str) -> Value {
    serde_json::from_str(text).expect("fixture is valid json")
}

pub fn elements() -> Value {
    fixture(include_str!("../data/elements.json"))
}

pub fn entries() -> Value {
    fixture(include_str!("../data/entries.json"))
}

pub fn workspaces() -> Value {
    fixture(include_str!("../data/workspaces.json"))
}

pub fn entries_path() -> String {
    format!("lists/{}/entries/filter", LIST_ID)
}

pub fn entry_path(id: u64) -> String {
    format!("lists/{}/entries/{}", LIST_ID, id)
}

/// Mock serving the fixture user, workspace listing, schema and entries.
pub fn session() -> (Arc<MockTransport>, Api) {
    let (mock, api) = MockTransport::pair();
    mock.ok(Method::GET, "auth/currentuser", json!({"id": 7, "shortId": "u7", "uuid": "u-7", "fullname": "Test User", "username": "tester"}));
    mock.ok(Method::GET, "users/me/workspacesWithLists", workspaces());
    mock.ok(Method::GET, &format!("lists/{}/elements", LIST_ID), elements());
    mock.ok(Method::POST, &entries_path(), entries());
    (mock, api)
}

pub fn collection_info() -> CollectionInfo {
    CollectionInfo {
        id: LIST_ID,
        short_id: "lS1".into(),
        uuid: LIST_UUID.into(),
        name: "Test Collection".into(),
        workspace_id: WORKSPACE_ID,
        visibility: 1,
    }
}

pub async fn populated() -> (Arc<MockTransport>, Collection) {
    let (mock, api) = session();
    let mut collection = Collection::new(collection_info(), api);
    collection.populate(Default::default()).await.expect("fixture collection populates");
    mock.clear_calls();
    (mock, collection)
}
