use crate::api::Api;
use crate::comment::{Activity, ActivityFilter, Comment, CommentScope};
use crate::element::{Element, FieldKind};
use crate::error::ZenkitError;
use crate::fields::{wire_pairs, Field, FieldRef};
use crate::record::{self, RawEntry};
use crate::webhook::{TriggerType, Webhook, WebhookTarget};
use crate::{error, info};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct FieldSlot {
    element: usize,
    kind: FieldKind,
    edited: bool,
}

/// One record of a collection, decomposed into dirty-tracked fields.
///
/// The entry exclusively owns its [`RawEntry`]; fields are borrowed views into it, so a value
/// read through a field is always the value that will be sent on [`Entry::commit`].
#[derive(Debug, Clone)]
pub struct Entry {
    record: RawEntry,
    elements: Arc<[Element]>,
    slots: Vec<FieldSlot>,
    by_name: HashMap<String, usize>,
    primary: Option<usize>,
    api: Api,
}

impl Entry {
    /// Binds every element with a field kind to a field slot. Fails when the primary element is
    /// not a scalar kind.
    pub fn new(record: RawEntry, elements: Arc<[Element]>, api: Api) -> Result<Self, ZenkitError> {
        let mut slots = Vec::with_capacity(elements.len());
        let mut by_name = HashMap::new();
        let mut primary = None;
        for (index, element) in elements.iter().enumerate() {
            let Some(kind) = element.field_kind() else { continue };
            if element.is_primary {
                if !kind.is_scalar() {
                    error!("Primary element '{}' is a {}", element.name, kind);
                    return Err(ZenkitError::PrimaryKeyNotScalar { element: element.name.clone(), kind: kind.name() });
                }
                primary = Some(slots.len());
            }
            by_name.insert(element.name.clone(), slots.len());
            slots.push(FieldSlot { element: index, kind, edited: false });
        }
        Ok(Entry { record, elements, slots, by_name, primary, api })
    }

    pub fn record(&self) -> &RawEntry {
        &self.record
    }

    pub fn elements(&self) -> &Arc<[Element]> {
        &self.elements
    }

    pub fn id(&self) -> u64 {
        self.record.id()
    }

    pub fn uuid(&self) -> &str {
        self.record.uuid()
    }

    pub fn short_id(&self) -> &str {
        self.record.short_id()
    }

    pub fn list_id(&self) -> u64 {
        self.record.list_id()
    }

    pub fn sort_order(&self) -> String {
        self.record.sort_order()
    }

    pub fn display_string(&self) -> &str {
        self.record.display_string()
    }

    pub fn comment_count(&self) -> u64 {
        self.record.comment_count()
    }

    fn view(&self, slot: usize) -> FieldRef<'_> {
        let s = &self.slots[slot];
        FieldRef { kind: s.kind, element: &self.elements[s.element], record: &self.record, edited: s.edited }
    }

    fn bind(&mut self, slot: usize) -> Field<'_> {
        let s = &mut self.slots[slot];
        Field::bind(s.kind, &self.elements[s.element], &mut self.record, &mut s.edited)
    }

    /// Exact, case-sensitive lookup by element display name.
    pub fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        self.by_name.get(name).map(|&slot| self.view(slot))
    }

    pub fn field_mut(&mut self, name: &str) -> Option<Field<'_>> {
        let slot = *self.by_name.get(name)?;
        Some(self.bind(slot))
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldRef<'_>> + '_ {
        (0..self.slots.len()).map(move |slot| self.view(slot))
    }

    /// Field names in schema order. System elements have no field and are not listed.
    pub fn field_names(&self) -> Vec<&str> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(slot, s)| self.by_name.get(&self.elements[s.element].name) == Some(slot))
            .map(|(_, s)| self.elements[s.element].name.as_str())
            .collect()
    }

    pub fn primary_field(&self) -> Option<FieldRef<'_>> {
        self.primary.map(|slot| self.view(slot))
    }

    pub fn primary_field_mut(&mut self) -> Option<Field<'_>> {
        let slot = self.primary?;
        Some(self.bind(slot))
    }

    /// Primary value stringified; empty without a primary field or with a null value.
    pub fn primary_key(&self) -> String {
        self.primary_field().and_then(|f| f.value()).map(record::stringify).unwrap_or_default()
    }

    pub fn is_dirty(&self) -> bool {
        self.slots.iter().any(|s| s.edited)
    }

    fn path(&self) -> String {
        format!("lists/{}/entries/{}", self.list_id(), self.id())
    }

    /// Merges the pairs of every edited field and clears their flags.
    pub(crate) fn take_changes(&mut self) -> Map<String, Value> {
        let mut payload = Map::new();
        for s in self.slots.iter_mut().filter(|s| s.edited) {
            for (key, value) in wire_pairs(s.kind, &self.elements[s.element], &self.record) {
                payload.insert(key, value);
            }
            s.edited = false;
        }
        payload
    }

    /// Sends all local edits in a single write. Returns whether a write was issued.
    /// The edited flags are cleared before the write, a failed write does not restore them.
    pub async fn commit(&mut self) -> Result<bool, ZenkitError> {
        let payload = self.take_changes();
        if payload.is_empty() {
            return Ok(false);
        }
        info!("Committing {} values of entry {}", payload.len(), self.id());
        self.api.put(&self.path(), Value::Object(payload)).await?;
        Ok(true)
    }

    pub async fn set_sort_order(&mut self, index: usize) -> Result<(), ZenkitError> {
        self.api.put(&self.path(), json!({ "sortOrder": index })).await?.expect_status(200)?;
        self.record.insert(record::SORT_ORDER, Value::String(index.to_string()));
        Ok(())
    }

    pub async fn delete(&self) -> Result<bool, ZenkitError> {
        Ok(self.api.delete(&self.path()).await?.status == 200)
    }

    fn comment_scope(&self) -> CommentScope {
        CommentScope::entry(self.list_id(), self.id())
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
        let target = WebhookTarget { workspace_id: None, list_id: Some(self.list_id()), list_entry_id: Some(self.id()) };
        Webhook::create(&self.api, address, TriggerType::Comment, target).await
    }
}
