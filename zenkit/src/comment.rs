use crate::api::Api;
use crate::error::ZenkitError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A chat message attached to a collection or one of its entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub uuid: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "parentUUID")]
    pub parent_uuid: Option<String>,
    #[serde(default)]
    pub list_id: Option<u64>,
    #[serde(default, rename = "listUUID")]
    pub list_uuid: Option<String>,
    #[serde(default)]
    pub workspace_id: Option<u64>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default, rename = "created_at")]
    pub created_at: Option<String>,
    #[serde(default, rename = "updated_at")]
    pub updated_at: Option<String>,
}

/// Any entry of an activity feed. Comments are the activities of type 2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u64,
    pub uuid: String,
    #[serde(default, rename = "type")]
    pub kind: u32,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityFilter {
    All,
    Comments,
    Other(u32),
}

impl ActivityFilter {
    pub fn code(self) -> u32 {
        match self {
            ActivityFilter::All => 0,
            ActivityFilter::Comments => 2,
            ActivityFilter::Other(code) => code,
        }
    }
}

/// Collection or entry whose comment feed is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentScope {
    pub list_id: u64,
    pub entry_id: Option<u64>,
}

impl CommentScope {
    pub fn collection(list_id: u64) -> Self {
        CommentScope { list_id, entry_id: None }
    }

    pub fn entry(list_id: u64, entry_id: u64) -> Self {
        CommentScope { list_id, entry_id: Some(entry_id) }
    }

    fn resource(&self) -> String {
        match self.entry_id {
            Some(entry_id) => format!("lists/{}/entries/{}", self.list_id, entry_id),
            None => format!("lists/{}", self.list_id),
        }
    }

    pub fn comments_path(&self) -> String {
        format!("users/me/{}/activities", self.resource())
    }

    pub fn activities_path(&self, filter: ActivityFilter, limit: usize, skip: usize) -> String {
        format!("{}/activities?filter={}&limit={}&skip={}", self.resource(), filter.code(), limit, skip)
    }

    pub async fn comment(&self, api: &Api, message: &str, parent: Option<&str>) -> Result<Comment, ZenkitError> {
        let body = json!({ "message": message, "parentUUID": parent });
        api.post(&self.comments_path(), body).await?.json()
    }

    pub async fn activities(&self, api: &Api, filter: ActivityFilter, limit: usize, skip: usize) -> Result<Vec<Activity>, ZenkitError> {
        let response = api.get(&self.activities_path(filter, limit, skip)).await?.expect_status(200)?;
        match response.data.get("activities") {
            Some(activities) => Ok(serde_json::from_value(activities.clone())?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn comments(&self, api: &Api, limit: usize, skip: usize) -> Result<Vec<Activity>, ZenkitError> {
        self.activities(api, ActivityFilter::Comments, limit, skip).await
    }

    /// Entry comments are deleted through the user scope, collection comments through the list itself.
    pub fn delete_path(&self, uuid: &str) -> String {
        match self.entry_id {
            Some(_) => format!("{}/{}", self.comments_path(), uuid),
            None => format!("{}/activities/{}", self.resource(), uuid),
        }
    }

    pub async fn delete_comment(&self, api: &Api, comment: &Comment) -> Result<bool, ZenkitError> {
        Ok(api.delete(&self.delete_path(&comment.uuid)).await?.status == 200)
    }
}
