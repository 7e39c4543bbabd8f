use crate::api::Api;
use crate::collection::{Collection, CollectionInfo};
use crate::pattern;
use crate::registry::{BoundCollection, CollectionRegistry, TypedCollection};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceInfo {
    pub id: u64,
    #[serde(default)]
    pub short_id: String,
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lists: Vec<CollectionInfo>,
}

/// A workspace and the collections it contains, as listed at connect time.
#[derive(Debug, Clone)]
pub struct Workspace {
    info: WorkspaceInfo,
    api: Api,
    registry: Arc<CollectionRegistry>,
}

impl Workspace {
    pub fn new(mut info: WorkspaceInfo, api: Api, registry: Arc<CollectionRegistry>) -> Self {
        for list in info.lists.iter_mut().filter(|l| l.workspace_id == 0) {
            list.workspace_id = info.id;
        }
        Workspace { info, api, registry }
    }

    pub fn info(&self) -> &WorkspaceInfo {
        &self.info
    }

    pub fn id(&self) -> u64 {
        self.info.id
    }

    pub fn uuid(&self) -> &str {
        &self.info.uuid
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn collections(&self) -> &[CollectionInfo] {
        &self.info.lists
    }

    fn bind(&self, info: &CollectionInfo) -> BoundCollection {
        self.registry.bind(Collection::new(info.clone(), self.api.clone()))
    }

    pub fn collection_by_id(&self, id: u64) -> Option<BoundCollection> {
        self.info.lists.iter().find(|l| l.id == id).map(|info| self.bind(info))
    }

    /// First collection, in listing order, whose name matches `pattern`.
    pub fn collection_by_pattern(&self, pattern: &str) -> Option<BoundCollection> {
        pattern::first_match(&self.info.lists, pattern, "collection", |l: &CollectionInfo| l.name.as_str()).map(|info| self.bind(info))
    }

    /// The collection `T` was generated for, wrapped in `T` whether or not it is registered.
    pub fn typed_collection<T: TypedCollection>(&self) -> Option<T> {
        self.info
            .lists
            .iter()
            .find(|l| l.id == T::ID || l.uuid == T::UUID)
            .map(|info| T::from_collection(Collection::new(info.clone(), self.api.clone())))
    }
}
