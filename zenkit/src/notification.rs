use crate::api::Api;
use crate::error::ZenkitError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const NOTIFICATIONS: &str = "users/me/notifications";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    #[serde(default)]
    pub short_id: String,
    pub uuid: String,
    #[serde(default)]
    pub notification_type: String,
    #[serde(default)]
    pub app_type: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default, rename = "created_at")]
    pub created_at: Option<String>,
    #[serde(default, rename = "updated_at")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub sender_id: Option<u64>,
    #[serde(default)]
    pub sender_displayname: Option<String>,
    #[serde(default)]
    pub workspace_id: Option<u64>,
    #[serde(default)]
    pub list_id: Option<u64>,
    #[serde(default)]
    pub list_entry_id: Option<u64>,
    #[serde(default)]
    pub element_id: Option<u64>,
}

/// Which notifications a read marker applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadScope {
    Notification(u64),
    Workspace(u64),
    List(u64),
}

impl ReadScope {
    fn condition(self) -> Value {
        match self {
            ReadScope::Notification(id) => json!({ "notificationId": id }),
            ReadScope::Workspace(id) => json!({ "workspaceId": id }),
            ReadScope::List(id) => json!({ "listId": id }),
        }
    }
}

/// Notifications of the current user, optionally only read or unread ones.
pub async fn notifications(api: &Api, is_read: Option<bool>) -> Result<Vec<Notification>, ZenkitError> {
    let path = match is_read {
        Some(is_read) => format!("{}?isRead={}", NOTIFICATIONS, is_read),
        None => NOTIFICATIONS.to_string(),
    };
    let response = api.get(&path).await?.expect_status(200)?;
    match response.data.get("notifications") {
        Some(list) => Ok(serde_json::from_value(list.clone())?),
        None => Err(ZenkitError::malformed("notification response without notifications")),
    }
}

pub async fn mark_read(api: &Api, scope: ReadScope) -> Result<(), ZenkitError> {
    let body = json!({
        "update": { "isNew": false, "isRead": true },
        "where": scope.condition(),
    });
    api.put(NOTIFICATIONS, body).await?.expect_status(200)?;
    Ok(())
}

impl Notification {
    pub async fn mark_read(&self, api: &Api) -> Result<(), ZenkitError> {
        mark_read(api, ReadScope::Notification(self.id)).await
    }

    /// Marks everything in the notification's workspace read. False when it has no workspace.
    pub async fn mark_workspace_read(&self, api: &Api) -> Result<bool, ZenkitError> {
        match self.workspace_id {
            Some(id) => mark_read(api, ReadScope::Workspace(id)).await.map(|_| true),
            None => Ok(false),
        }
    }

    /// Marks everything in the notification's collection read. False when it has no collection.
    pub async fn mark_list_read(&self, api: &Api) -> Result<bool, ZenkitError> {
        match self.list_id {
            Some(id) => mark_read(api, ReadScope::List(id)).await.map(|_| true),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use http::Method;

    fn listing() -> Value {
        json!({"notifications": [
            {"id": 130356251, "uuid": "n-1", "notificationType": "comment", "isRead": false, "isNew": true, "workspaceId": 4, "listId": 9},
            {"id": 130356252, "uuid": "n-2", "notificationType": "mention", "isRead": false, "isNew": false, "workspaceId": 4, "listId": null}
        ]})
    }

    #[tokio::test]
    async fn unread_filter_goes_into_the_query() {
        let (mock, api) = MockTransport::pair();
        mock.ok(Method::GET, "users/me/notifications?isRead=false", listing());
        let unread = notifications(&api, Some(false)).await.unwrap();
        assert_eq!(unread.len(), 2);
        assert_eq!(unread[0].list_id, Some(9));
        assert!(unread[0].is_new);
        assert!(matches!(notifications(&api, None).await, Err(ZenkitError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn read_markers_address_notification_workspace_and_list() {
        let (mock, api) = MockTransport::pair();
        mock.ok(Method::GET, "users/me/notifications", listing());
        mock.ok(Method::PUT, "users/me/notifications", json!({}));
        let all = notifications(&api, None).await.unwrap();

        all[0].mark_read(&api).await.unwrap();
        assert!(all[0].mark_workspace_read(&api).await.unwrap());
        assert!(all[0].mark_list_read(&api).await.unwrap());
        assert!(!all[1].mark_list_read(&api).await.unwrap());

        let wheres: Vec<Value> = mock.calls_with(&Method::PUT).into_iter().filter_map(|c| c.body).map(|b| b["where"].clone()).collect();
        assert_eq!(wheres, vec![json!({"notificationId": 130356251}), json!({"workspaceId": 4}), json!({"listId": 9})]);
        assert_eq!(mock.calls_with(&Method::PUT)[0].body.as_ref().map(|b| b["update"].clone()), Some(json!({"isNew": false, "isRead": true})));
    }
}
