use crate::api::Api;
use crate::error;
use crate::error::ZenkitError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub short_id: String,
    pub uuid: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub initials: String,
    #[serde(default)]
    pub username: String,
}

/// The user the api key belongs to; `None` when the remote does not recognise the key.
pub async fn current_user(api: &Api) -> Result<Option<User>, ZenkitError> {
    match api.get("auth/currentuser").await {
        Ok(response) if response.status == 200 && !response.data.is_null() => Ok(Some(response.json()?)),
        Ok(_) | Err(ZenkitError::Status { status: 401, .. }) => {
            error!("Did not receive a valid user response. Is your API key valid?");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
