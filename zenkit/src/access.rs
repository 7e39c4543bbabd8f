use crate::api::Api;
use crate::error::ZenkitError;
use crate::user::User;
use crate::warn;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Permission level on a collection, ordered from no access to owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum UserRole {
    #[default]
    Unknown,
    ReadOnly,
    WriteOnly,
    Commenter,
    Contributor,
    User,
    Admin,
    Owner,
}

impl UserRole {
    /// Role name on the wire, `None` for [`UserRole::Unknown`].
    pub fn role_id(self) -> Option<&'static str> {
        match self {
            UserRole::Unknown => None,
            UserRole::ReadOnly => Some("readOnlyListUser"),
            UserRole::WriteOnly => Some("writeOnlyListUser"),
            UserRole::Commenter => Some("commentOnlyListUser"),
            UserRole::Contributor => Some("listContributor"),
            UserRole::User => Some("listUser"),
            UserRole::Admin => Some("listAdmin"),
            UserRole::Owner => Some("listOwner"),
        }
    }

    pub fn from_role_id(role_id: &str) -> Self {
        match role_id {
            "readOnlyListUser" => UserRole::ReadOnly,
            "writeOnlyListUser" => UserRole::WriteOnly,
            "commentOnlyListUser" => UserRole::Commenter,
            "listContributor" => UserRole::Contributor,
            "listUser" => UserRole::User,
            "listAdmin" => UserRole::Admin,
            "listOwner" => UserRole::Owner,
            _ => UserRole::Unknown,
        }
    }

    fn grantable(self) -> Result<&'static str, ZenkitError> {
        self.role_id().ok_or_else(|| ZenkitError::UnassignableRole(format!("{:?}", self)))
    }
}

/// One access record of a collection, granted to a user or a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionAccess {
    pub uuid: String,
    #[serde(default)]
    pub workspace_id: Option<u64>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub group_id: Option<u64>,
    pub role_id: String,
}

impl CollectionAccess {
    pub fn role(&self) -> UserRole {
        UserRole::from_role_id(&self.role_id)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Group {
    id: u64,
    #[serde(default)]
    user_ids: Vec<u64>,
}

#[derive(Debug, Clone, Deserialize)]
struct AccessListing {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    accesses: Vec<CollectionAccess>,
    #[serde(default)]
    groups: Vec<Group>,
}

/// Everything a single user is granted on a collection, directly or through groups.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAccess {
    pub user: User,
    pub user_accesses: Vec<(String, UserRole)>,
    pub group_accesses: Vec<(String, UserRole)>,
}

impl UserAccess {
    /// Highest role among direct and group grants.
    pub fn role(&self) -> UserRole {
        self.user_accesses.iter().chain(&self.group_accesses).map(|(_, role)| *role).max().unwrap_or_default()
    }
}

/// A user addressed by id only, or by the full record (which also allows granting new access).
#[derive(Debug, Clone, Copy)]
pub enum UserRef<'a> {
    Id(u64),
    User(&'a User),
}

impl UserRef<'_> {
    pub fn id(&self) -> u64 {
        match self {
            UserRef::Id(id) => *id,
            UserRef::User(user) => user.id,
        }
    }
}

impl From<u64> for UserRef<'_> {
    fn from(id: u64) -> Self {
        UserRef::Id(id)
    }
}

impl<'a> From<&'a User> for UserRef<'a> {
    fn from(user: &'a User) -> Self {
        UserRef::User(user)
    }
}

/// Access control calls of one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessScope {
    pub list_id: u64,
    pub workspace_id: u64,
    pub visibility: u32,
}

impl AccessScope {
    fn accesses_path(&self) -> String {
        format!("lists/{}/accesses", self.list_id)
    }

    fn access_path(&self, access_uuid: &str) -> String {
        format!("{}/{}", self.accesses_path(), access_uuid)
    }

    fn access_reply(data: Value) -> Result<Option<CollectionAccess>, ZenkitError> {
        match data.get("access") {
            Some(access) if !access.is_null() => Ok(Some(serde_json::from_value(access.clone())?)),
            _ => Ok(None),
        }
    }

    /// Per user id, the grants of every user listed on the collection.
    pub async fn access_info(&self, api: &Api) -> Result<BTreeMap<u64, UserAccess>, ZenkitError> {
        let listing: AccessListing = api.get(&self.accesses_path()).await?.json()?;
        let mut mapping: BTreeMap<u64, UserAccess> = listing
            .users
            .into_iter()
            .map(|user| (user.id, UserAccess { user, user_accesses: Vec::new(), group_accesses: Vec::new() }))
            .collect();
        let groups: BTreeMap<u64, Vec<u64>> = listing.groups.into_iter().map(|g| (g.id, g.user_ids)).collect();

        for access in listing.accesses {
            let grant = (access.uuid.clone(), access.role());
            if let Some(user_id) = access.user_id {
                match mapping.get_mut(&user_id) {
                    Some(user) => user.user_accesses.push(grant),
                    None => warn!("Access {} references unlisted user {}", access.uuid, user_id),
                }
            } else if let Some(group_id) = access.group_id {
                for user_id in groups.get(&group_id).into_iter().flatten() {
                    if let Some(user) = mapping.get_mut(user_id) {
                        user.group_accesses.push(grant.clone());
                    }
                }
            }
        }
        Ok(mapping)
    }

    pub async fn add_access(&self, api: &Api, user_uuid: &str, role: UserRole) -> Result<Option<CollectionAccess>, ZenkitError> {
        let body = json!({ "roleId": role.grantable()?, "userUUID": user_uuid });
        Self::access_reply(api.post(&self.accesses_path(), body).await?.data)
    }

    pub async fn set_access(&self, api: &Api, access_uuid: &str, role: UserRole) -> Result<Option<CollectionAccess>, ZenkitError> {
        let body = json!({ "roleId": role.grantable()? });
        let response = api.put(&self.access_path(access_uuid), body).await?.expect_status(200)?;
        Self::access_reply(response.data)
    }

    pub async fn remove_access(&self, api: &Api, access_uuid: &str) -> Result<Option<CollectionAccess>, ZenkitError> {
        let response = api.delete(&self.access_path(access_uuid)).await?.expect_status(200)?;
        Self::access_reply(response.data)
    }

    /// Users holding at least one direct grant with one of `roles`. An empty filter lists every user with access,
    /// including workspace members when the collection is visible to the workspace.
    pub async fn users(&self, api: &Api, roles: &[UserRole]) -> Result<Vec<User>, ZenkitError> {
        if roles.is_empty() {
            let mut users: Vec<User> = listed_users(api, &self.accesses_path()).await?;
            if self.visibility > 0 {
                users.extend(listed_users(api, &format!("workspaces/{}/accesses", self.workspace_id)).await?);
            }
            return Ok(users);
        }
        let access = self.access_info(api).await?;
        Ok(access
            .into_values()
            .filter(|ua| ua.user_accesses.iter().any(|(_, role)| roles.contains(role)))
            .map(|ua| ua.user)
            .collect())
    }

    pub async fn user_role(&self, api: &Api, user_id: u64) -> Result<UserRole, ZenkitError> {
        Ok(self.access_info(api).await?.get(&user_id).map(UserAccess::role).unwrap_or_default())
    }

    /// Changes the first direct grant of the user, or grants a new one when a full user record is given.
    /// Returns false when an id-only user has no direct grant to change.
    pub async fn set_user_role(&self, api: &Api, user: UserRef<'_>, role: UserRole) -> Result<bool, ZenkitError> {
        let access = self.access_info(api).await?;
        let first = access.get(&user.id()).and_then(|ua| ua.user_accesses.first());
        match (first, user) {
            (Some((access_uuid, _)), _) => Ok(self.set_access(api, access_uuid, role).await?.is_some()),
            (None, UserRef::User(user)) => Ok(self.add_access(api, &user.uuid, role).await?.is_some()),
            (None, UserRef::Id(_)) => Ok(false),
        }
    }

    /// Revokes every direct grant of the user. Group grants are left alone.
    pub async fn remove_user(&self, api: &Api, user_id: u64) -> Result<bool, ZenkitError> {
        if let Some(ua) = self.access_info(api).await?.get(&user_id) {
            for (access_uuid, _) in &ua.user_accesses {
                self.remove_access(api, access_uuid).await?;
            }
        }
        Ok(true)
    }
}

async fn listed_users(api: &Api, path: &str) -> Result<Vec<User>, ZenkitError> {
    let response = api.get(path).await?;
    match response.data.get("users") {
        Some(users) => Ok(serde_json::from_value(users.clone())?),
        None => Ok(Vec::new()),
    }
}
