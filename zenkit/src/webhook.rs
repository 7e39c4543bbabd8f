use crate::api::Api;
use crate::error::ZenkitError;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TriggerType {
    Notification,
    Comment,
}

impl From<TriggerType> for u8 {
    fn from(trigger: TriggerType) -> Self {
        match trigger {
            TriggerType::Notification => 2,
            TriggerType::Comment => 4,
        }
    }
}

impl TryFrom<u8> for TriggerType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            2 => Ok(TriggerType::Notification),
            4 => Ok(TriggerType::Comment),
            other => Err(format!("unknown webhook trigger type {}", other)),
        }
    }
}

/// What a webhook listens to; unset levels widen the scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WebhookTarget {
    pub workspace_id: Option<u64>,
    pub list_id: Option<u64>,
    pub list_entry_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub id: u64,
    pub trigger_type: TriggerType,
    pub url: String,
    #[serde(default)]
    pub workspace_id: Option<u64>,
    #[serde(default)]
    pub list_id: Option<u64>,
    #[serde(default)]
    pub list_entry_id: Option<u64>,
}

impl Webhook {
    pub async fn create(api: &Api, address: &str, trigger: TriggerType, target: WebhookTarget) -> Result<Webhook, ZenkitError> {
        let body = json!({
            "triggerType": u8::from(trigger),
            "url": address,
            "workspaceId": target.workspace_id,
            "listId": target.list_id,
            "listEntryId": target.list_entry_id,
        });
        let webhook: Webhook = api.post("webhooks", body).await?.json()?;
        crate::info!("Created webhook {} for {}", webhook.id, webhook.url);
        Ok(webhook)
    }

    pub async fn list(api: &Api) -> Result<Vec<Webhook>, ZenkitError> {
        api.get("users/me/webhooks").await?.json()
    }

    pub async fn delete(&self, api: &Api) -> Result<bool, ZenkitError> {
        Ok(api.delete(&format!("webhooks/{}", self.id)).await?.status == 200)
    }
}
