use crate::api::Api;
use crate::config::ZenkitConfig;
use crate::error::ZenkitError;
use crate::notification::{self, Notification, ReadScope};
use crate::registry::CollectionRegistry;
use crate::rest_client::HttpTransport;
use crate::user::{current_user, User};
use crate::webhook::Webhook;
use crate::workspace::{Workspace, WorkspaceInfo};
use crate::{info, pattern};
use std::sync::Arc;

/// Entry point: the logged in user and every workspace visible to it.
#[derive(Debug, Clone)]
pub struct Zenkit {
    user: User,
    workspaces: Vec<Workspace>,
    api: Api,
    registry: Arc<CollectionRegistry>,
}

impl Zenkit {
    pub async fn connect(config: &ZenkitConfig, registry: CollectionRegistry) -> Result<Self, ZenkitError> {
        let api = HttpTransport::new(config)?.into_api();
        Self::with_api(api, registry).await
    }

    pub async fn with_api(api: Api, registry: CollectionRegistry) -> Result<Self, ZenkitError> {
        let user = current_user(&api).await?.ok_or(ZenkitError::NotLoggedIn)?;
        let infos: Vec<WorkspaceInfo> = api.get("users/me/workspacesWithLists").await?.expect_status(200)?.json()?;
        let registry = Arc::new(registry);
        let workspaces: Vec<Workspace> = infos.into_iter().map(|ws| Workspace::new(ws, api.clone(), Arc::clone(&registry))).collect();
        info!("Logged in as '{}' with {} workspaces and {} typed collections", user.username, workspaces.len(), registry.len());
        Ok(Zenkit { user, workspaces, api, registry })
    }

    pub fn me(&self) -> &User {
        &self.user
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn registry(&self) -> &CollectionRegistry {
        &self.registry
    }

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn workspace_by_id(&self, id: u64) -> Option<&Workspace> {
        self.workspaces.iter().find(|ws| ws.id() == id)
    }

    /// First workspace whose name matches `pattern`.
    pub fn workspace_by_pattern(&self, pattern: &str) -> Option<&Workspace> {
        pattern::first_match(&self.workspaces, pattern, "workspace", |ws: &Workspace| ws.name())
    }

    pub async fn webhooks(&self) -> Result<Vec<Webhook>, ZenkitError> {
        Webhook::list(&self.api).await
    }

    pub async fn notifications(&self, is_read: Option<bool>) -> Result<Vec<Notification>, ZenkitError> {
        notification::notifications(&self.api, is_read).await
    }

    pub async fn mark_read(&self, scope: ReadScope) -> Result<(), ZenkitError> {
        notification::mark_read(&self.api, scope).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use http::Method;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn connect_requires_a_user() {
        let (mock, api) = MockTransport::pair();
        mock.ok(Method::GET, "auth/currentuser", Value::Null);
        assert!(matches!(Zenkit::with_api(api, CollectionRegistry::new()).await, Err(ZenkitError::NotLoggedIn)));
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn workspaces_are_listed_and_searchable() {
        let (mock, api) = MockTransport::pair();
        mock.ok(Method::GET, "auth/currentuser", json!({"id": 1, "uuid": "u-1", "username": "ada"}));
        mock.ok(
            Method::GET,
            "users/me/workspacesWithLists",
            json!([
                {"id": 10, "uuid": "w-10", "name": "Private", "lists": []},
                {"id": 11, "uuid": "w-11", "name": "Team Space", "lists": [{"id": 5, "uuid": "c-5", "name": "Tasks"}]}
            ]),
        );
        mock.ok(Method::GET, "users/me/webhooks", json!([{"id": 2, "triggerType": 2, "url": "https://hook"}]));
        let zenkit = Zenkit::with_api(api, CollectionRegistry::new()).await.unwrap();
        assert_eq!(zenkit.me().username, "ada");
        assert_eq!(zenkit.workspace_by_id(11).map(Workspace::name), Some("Team Space"));
        assert_eq!(zenkit.workspace_by_pattern("Team").map(Workspace::id), Some(11));
        assert!(zenkit.workspace_by_pattern("Nope").is_none());
        assert_eq!(zenkit.webhooks().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn notifications_of_the_session_user() {
        let (mock, api) = MockTransport::pair();
        mock.ok(Method::GET, "auth/currentuser", json!({"id": 1, "uuid": "u-1"}));
        mock.ok(Method::GET, "users/me/workspacesWithLists", json!([]));
        mock.ok(Method::GET, "users/me/notifications?isRead=false", json!({"notifications": [{"id": 3, "uuid": "n-3", "workspaceId": 10}]}));
        mock.ok(Method::PUT, "users/me/notifications", json!({}));
        let zenkit = Zenkit::with_api(api, CollectionRegistry::new()).await.unwrap();
        let unread = zenkit.notifications(Some(false)).await.unwrap();
        assert_eq!(unread[0].workspace_id, Some(10));
        zenkit.mark_read(ReadScope::Workspace(10)).await.unwrap();
        let put = mock.calls_with(&Method::PUT).pop().unwrap();
        assert_eq!(put.body, Some(json!({"update": {"isNew": false, "isRead": true}, "where": {"workspaceId": 10}})));
    }
}
