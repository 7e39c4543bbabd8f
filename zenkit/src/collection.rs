use crate::access::{AccessScope, CollectionAccess, UserAccess, UserRef, UserRole};
use crate::api::Api;
use crate::comment::{Activity, ActivityFilter, Comment, CommentScope};
use crate::element::{Element, ValueType};
use crate::entry::Entry;
use crate::error::ZenkitError;
use crate::record::{stringify, RawEntry};
use crate::user::User;
use crate::webhook::{TriggerType, Webhook, WebhookTarget};
use crate::{error, info, pattern};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Remote description of a collection (a "list" on the wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionInfo {
    pub id: u64,
    #[serde(default)]
    pub short_id: String,
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub workspace_id: u64,
    #[serde(default)]
    pub visibility: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<u64>,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn column(column: impl Into<String>, direction: SortDirection) -> Self {
        OrderBy { column: Some(column.into()), element_id: None, direction }
    }

    pub fn element(element_id: u64, direction: SortDirection) -> Self {
        OrderBy { column: None, element_id: Some(element_id), direction }
    }
}

/// Single page request of [`Collection::populate`].
#[derive(Debug, Clone, PartialEq)]
pub struct PopulateQuery {
    pub limit: usize,
    pub skip: usize,
    pub order_by: Vec<OrderBy>,
}

impl Default for PopulateQuery {
    fn default() -> Self {
        PopulateQuery { limit: 100, skip: 0, order_by: Vec::new() }
    }
}

impl PopulateQuery {
    fn body(&self) -> Value {
        json!({
            "filter": {},
            "limit": self.limit,
            "skip": self.skip,
            "allowDeprecated": false,
            "orderBy": self.order_by,
        })
    }
}

/// Entry lookup either by numeric id or by a regex over the primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryLookup {
    Id(u64),
    Pattern(String),
}

impl From<u64> for EntryLookup {
    fn from(id: u64) -> Self {
        EntryLookup::Id(id)
    }
}

impl From<&str> for EntryLookup {
    fn from(pattern: &str) -> Self {
        EntryLookup::Pattern(pattern.to_string())
    }
}

impl From<String> for EntryLookup {
    fn from(pattern: String) -> Self {
        EntryLookup::Pattern(pattern)
    }
}

/// Bulk fetches answer with a bare array or wrap it in `listEntries` / `entries`.
fn entry_records(data: Value) -> Result<Vec<RawEntry>, ZenkitError> {
    let items = match data {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("listEntries").or_else(|| map.remove("entries")) {
            Some(Value::Array(items)) => items,
            _ => return Err(ZenkitError::malformed("entry list response without entries")),
        },
        _ => return Err(ZenkitError::malformed("entry list response is not a list")),
    };
    items
        .into_iter()
        .map(|item| RawEntry::from_value(item).ok_or_else(|| ZenkitError::malformed("entry record is not an object")))
        .collect()
}

pub struct Collection {
    info: CollectionInfo,
    api: Api,
    elements: Option<Arc<[Element]>>,
    entries: Vec<Entry>,
}

impl Collection {
    pub fn new(info: CollectionInfo, api: Api) -> Self {
        Collection { info, api, elements: None, entries: Vec::new() }
    }

    pub fn info(&self) -> &CollectionInfo {
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

    pub fn workspace_id(&self) -> u64 {
        self.info.workspace_id
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Schema of this collection, fetched on first use and cached afterwards.
    pub async fn elements(&mut self) -> Result<Arc<[Element]>, ZenkitError> {
        if let Some(elements) = &self.elements {
            return Ok(Arc::clone(elements));
        }
        let response = self.api.get(&format!("lists/{}/elements", self.id())).await?;
        let elements: Vec<Element> = match response.data {
            Value::Null => Vec::new(),
            data => serde_json::from_value(data)?,
        };
        info!("Fetched {} elements of collection '{}'", elements.len(), self.name());
        let elements: Arc<[Element]> = Arc::from(elements);
        self.elements = Some(Arc::clone(&elements));
        Ok(elements)
    }

    pub fn cached_elements(&self) -> Option<&Arc<[Element]>> {
        self.elements.as_ref()
    }

    pub fn primary_element(&self) -> Option<&Element> {
        self.elements.as_deref()?.iter().find(|e| e.is_primary)
    }

    /// Replaces the local entries with one freshly fetched page. Returns the number of entries.
    pub async fn populate(&mut self, query: PopulateQuery) -> Result<usize, ZenkitError> {
        let elements = self.elements().await?;
        self.entries.clear();
        let path = format!("lists/{}/entries/filter", self.id());
        let response = self.api.post(&path, query.body()).await?.expect_status(200)?;
        let entries = entry_records(response.data)?
            .into_iter()
            .map(|record| Entry::new(record, Arc::clone(&elements), self.api.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        info!("Populated collection '{}' with {} entries", self.name(), entries.len());
        self.entries = entries;
        Ok(self.entries.len())
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }

    fn position(&self, lookup: &EntryLookup) -> Option<usize> {
        match lookup {
            EntryLookup::Id(id) => self.entries.iter().position(|e| e.id() == *id),
            EntryLookup::Pattern(source) => {
                let rx = pattern::compile(source, "entry")?;
                self.entries.iter().position(|e| {
                    let key = e.primary_key();
                    !key.is_empty() && rx.is_match(&key)
                })
            }
        }
    }

    /// Looks up a loaded entry; nothing is fetched, so every lookup misses before `populate`.
    pub fn entry(&self, lookup: impl Into<EntryLookup>) -> Option<&Entry> {
        let index = self.position(&lookup.into())?;
        self.entries.get(index)
    }

    pub fn entry_mut(&mut self, lookup: impl Into<EntryLookup>) -> Option<&mut Entry> {
        let index = self.position(&lookup.into())?;
        self.entries.get_mut(index)
    }

    pub fn entry_by_id(&self, id: u64) -> Option<&Entry> {
        self.entry(EntryLookup::Id(id))
    }

    pub fn entry_by_id_mut(&mut self, id: u64) -> Option<&mut Entry> {
        self.entry_mut(EntryLookup::Id(id))
    }

    /// First entry, in list order, whose non-empty primary key matches `pattern`.
    pub fn entry_by_pattern(&self, pattern: &str) -> Option<&Entry> {
        self.entry(pattern)
    }

    pub fn entry_by_pattern_mut(&mut self, pattern: &str) -> Option<&mut Entry> {
        self.entry_mut(pattern)
    }

    /// Creates an entry whose primary field holds `primary_value`, merged over `data`.
    ///
    /// The schema must have been fetched (by [`Collection::elements`] or [`Collection::populate`])
    /// and the runtime type of `primary_value` must match the primary element. Both are checked
    /// before anything is sent.
    pub async fn create_entry(&mut self, primary_value: impl Into<Value>, data: Map<String, Value>) -> Result<&mut Entry, ZenkitError> {
        let Some(elements) = self.elements.clone() else {
            error!("Primary key not set! Please call populate once before creating entries.");
            return Err(ZenkitError::SchemaNotFetched { collection: self.info.name.clone() });
        };
        let primary = elements
            .iter()
            .find(|e| e.is_primary)
            .ok_or_else(|| ZenkitError::MissingPrimaryKey { collection: self.info.name.clone() })?;
        let expected = primary.value_type().ok_or_else(|| ZenkitError::PrimaryKeyNotScalar {
            element: primary.name.clone(),
            kind: primary.field_kind().map(|k| k.name()).unwrap_or("system"),
        })?;
        let value = primary_value.into();
        let actual = ValueType::of(&value);
        if actual != expected {
            error!(
                "Passed primary key value '{}' is not valid for primary key '{}' with type '{}'",
                stringify(&value),
                primary.name,
                expected.name()
            );
            return Err(ZenkitError::PrimaryTypeMismatch {
                value: stringify(&value),
                element: primary.name.clone(),
                expected: expected.name(),
                actual: actual.name(),
            });
        }

        let mut payload = data;
        payload.insert(primary.storage_key(), value);
        let response = self.api.post(&format!("lists/{}/entries", self.id()), Value::Object(payload)).await?;
        if response.status != 200 {
            return Err(ZenkitError::malformed(format!("create entry answered with status {}", response.status)));
        }
        let record = RawEntry::from_value(response.data).ok_or_else(|| ZenkitError::malformed("create entry answered without a record"))?;
        let entry = Entry::new(record, Arc::clone(&elements), self.api.clone())?;
        info!("Created entry {} in collection '{}'", entry.id(), self.name());
        self.entries.push(entry);
        self.entries.last_mut().ok_or_else(|| ZenkitError::malformed("entry list is empty after create"))
    }

    /// Re-populates, sorts by `compare` and persists the new position of every entry whose
    /// stored sort order differs from it. Returns the number of position writes.
    pub async fn sort_entries<F>(&mut self, mut compare: F) -> Result<usize, ZenkitError>
    where
        F: FnMut(&Entry, &Entry) -> Ordering,
    {
        self.populate(PopulateQuery::default()).await?;
        self.entries.sort_by(|a, b| compare(a, b));
        let mut updated = 0;
        for (index, entry) in self.entries.iter_mut().enumerate() {
            if entry.sort_order() != index.to_string() {
                entry.set_sort_order(index).await?;
                updated += 1;
            }
        }
        info!("Moved {} of {} entries in collection '{}'", updated, self.entries.len(), self.info.name);
        Ok(updated)
    }

    /// Deletes an entry remotely and drops it from the local list on success.
    pub async fn delete_entry(&mut self, id: u64) -> Result<bool, ZenkitError> {
        let response = self.api.delete(&format!("lists/{}/entries/{}", self.id(), id)).await?;
        let deleted = response.status == 200;
        if deleted {
            self.entries.retain(|e| e.id() != id);
        }
        Ok(deleted)
    }

    fn comment_scope(&self) -> CommentScope {
        CommentScope::collection(self.id())
    }

    pub async fn comment(&self, message: &str, parent: Option<&str>) -> Result<Comment, ZenkitError> {
        self.comment_scope().comment(&self.api, message, parent).await
    }

    pub async fn comments(&self, limit: usize, skip: usize) -> Result<Vec<Activity>, ZenkitError> {
        self.comment_scope().comments(&self.api, limit, skip).await
    }

    pub async fn activities(&self, filter: ActivityFilter, limit: usize, skip: usize) -> Result<Vec<Activity>, ZenkitError> {
        self.comment_scope().activities(&self.api, filter, limit, skip).await
    }

    pub async fn delete_comment(&self, comment: &Comment) -> Result<bool, ZenkitError> {
        self.comment_scope().delete_comment(&self.api, comment).await
    }

    pub async fn create_comment_webhook(&self, address: &str) -> Result<Webhook, ZenkitError> {
        let target = WebhookTarget { workspace_id: None, list_id: Some(self.id()), list_entry_id: None };
        Webhook::create(&self.api, address, TriggerType::Comment, target).await
    }

    fn access_scope(&self) -> AccessScope {
        AccessScope { list_id: self.id(), workspace_id: self.workspace_id(), visibility: self.info.visibility }
    }

    pub async fn access_info(&self) -> Result<BTreeMap<u64, UserAccess>, ZenkitError> {
        self.access_scope().access_info(&self.api).await
    }

    pub async fn add_access(&self, user_uuid: &str, role: UserRole) -> Result<Option<CollectionAccess>, ZenkitError> {
        self.access_scope().add_access(&self.api, user_uuid, role).await
    }

    pub async fn set_access(&self, access_uuid: &str, role: UserRole) -> Result<Option<CollectionAccess>, ZenkitError> {
        self.access_scope().set_access(&self.api, access_uuid, role).await
    }

    pub async fn remove_access(&self, access_uuid: &str) -> Result<Option<CollectionAccess>, ZenkitError> {
        self.access_scope().remove_access(&self.api, access_uuid).await
    }

    pub async fn users(&self, roles: &[UserRole]) -> Result<Vec<User>, ZenkitError> {
        self.access_scope().users(&self.api, roles).await
    }

    pub async fn user_role(&self, user_id: u64) -> Result<UserRole, ZenkitError> {
        self.access_scope().user_role(&self.api, user_id).await
    }

    pub async fn set_user_role<'u>(&self, user: impl Into<UserRef<'u>>, role: UserRole) -> Result<bool, ZenkitError> {
        self.access_scope().set_user_role(&self.api, user.into(), role).await
    }

    pub async fn remove_user(&self, user_id: u64) -> Result<bool, ZenkitError> {
        self.access_scope().remove_user(&self.api, user_id).await
    }

    /// Fetches the schema if needed and renders the typed wrapper module for it.
    pub async fn generate_orm(&mut self, prefix: &str) -> Result<String, ZenkitError> {
        self.elements().await?;
        crate::orm::generate_orm(self, prefix)
    }
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("info", &self.info)
            .field("elements", &self.elements.as_ref().map(|e| e.len()))
            .field("entries", &self.entries.len())
            .finish()
    }
}
