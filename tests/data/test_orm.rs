//! Typed wrappers for the collection "Test Collection" (3207438).
//!
//! Generated by zenkit_orm, regenerate instead of editing.
/// Labels of the element "Status Field".
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum StatusField {
    ZU_BEARBEITEN = 13389240,
    IN_BEARBEITUNG = 13389241,
    ERLEDIGT = 13389242,
}
impl StatusField {
    pub fn id(self) -> u64 {
        self as u64
    }
    pub fn from_id(id: u64) -> Option<Self> {
        match id {
            13389240 => Some(Self::ZU_BEARBEITEN),
            13389241 => Some(Self::IN_BEARBEITUNG),
            13389242 => Some(Self::ERLEDIGT),
            _ => None,
        }
    }
}
impl From<StatusField> for zenkit::LabelRef<'static> {
    fn from(label: StatusField) -> Self {
        zenkit::LabelRef::Id(label.id())
    }
}
/// Labels of the element "Tag Field".
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum TagField {
    NEW = 13391152,
    STALE = 13391153,
    UNCONFIRMED = 13391154,
    BUG = 13391155,
}
impl TagField {
    pub fn id(self) -> u64 {
        self as u64
    }
    pub fn from_id(id: u64) -> Option<Self> {
        match id {
            13391152 => Some(Self::NEW),
            13391153 => Some(Self::STALE),
            13391154 => Some(Self::UNCONFIRMED),
            13391155 => Some(Self::BUG),
            _ => None,
        }
    }
}
impl From<TagField> for zenkit::LabelRef<'static> {
    fn from(label: TagField) -> Self {
        zenkit::LabelRef::Id(label.id())
    }
}
pub struct TestCollectionEntry<'a>(&'a mut zenkit::Entry);
impl<'a> TestCollectionEntry<'a> {
    pub fn new(entry: &'a mut zenkit::Entry) -> Self {
        Self(entry)
    }
    pub fn primary_text_field(&mut self) -> Option<zenkit::fields::TextField<'_>> {
        self.0.field_mut("Primary Text Field").and_then(zenkit::Field::into_text)
    }
    pub fn status_field(&mut self) -> Option<zenkit::fields::CategoriesField<'_>> {
        self.0.field_mut("Status Field").and_then(zenkit::Field::into_categories)
    }
    pub fn text_field(&mut self) -> Option<zenkit::fields::TextField<'_>> {
        self.0.field_mut("Text Field").and_then(zenkit::Field::into_text)
    }
    pub fn date_field(&mut self) -> Option<zenkit::fields::DateField<'_>> {
        self.0.field_mut("Date Field").and_then(zenkit::Field::into_date)
    }
    pub fn time_field(&mut self) -> Option<zenkit::fields::DateField<'_>> {
        self.0.field_mut("Time Field").and_then(zenkit::Field::into_date)
    }
    pub fn member_field(&mut self) -> Option<zenkit::fields::PersonsField<'_>> {
        self.0.field_mut("Member Field").and_then(zenkit::Field::into_persons)
    }
    pub fn number_field(&mut self) -> Option<zenkit::fields::NumberField<'_>> {
        self.0.field_mut("Number Field").and_then(zenkit::Field::into_number)
    }
    pub fn tag_field(&mut self) -> Option<zenkit::fields::CategoriesField<'_>> {
        self.0.field_mut("Tag Field").and_then(zenkit::Field::into_categories)
    }
    pub fn reference_field(&mut self) -> Option<zenkit::fields::ReferencesField<'_>> {
        self.0.field_mut("Reference Field").and_then(zenkit::Field::into_references)
    }
}
impl std::ops::Deref for TestCollectionEntry<'_> {
    type Target = zenkit::Entry;
    fn deref(&self) -> &zenkit::Entry {
        &*self.0
    }
}
impl std::ops::DerefMut for TestCollectionEntry<'_> {
    fn deref_mut(&mut self) -> &mut zenkit::Entry {
        &mut *self.0
    }
}
pub struct TestCollectionCollection(zenkit::Collection);
impl zenkit::TypedCollection for TestCollectionCollection {
    const ID: u64 = 3207438;
    const UUID: &'static str = "dfda7cb2-65a9-4a70-b317-5988b3ba7b59";
    const WORKSPACE_ID: u64 = 1281787;
    fn from_collection(collection: zenkit::Collection) -> Self {
        Self(collection)
    }
    fn into_collection(self) -> zenkit::Collection {
        self.0
    }
    fn collection(&self) -> &zenkit::Collection {
        &self.0
    }
    fn collection_mut(&mut self) -> &mut zenkit::Collection {
        &mut self.0
    }
}
impl TestCollectionCollection {
    pub fn entry(
        &mut self,
        lookup: impl Into<zenkit::EntryLookup>,
    ) -> Option<TestCollectionEntry<'_>> {
        self.0.entry_mut(lookup).map(TestCollectionEntry)
    }
    pub fn entries(&mut self) -> impl Iterator<Item = TestCollectionEntry<'_>> + '_ {
        self.0.entries_mut().iter_mut().map(TestCollectionEntry)
    }
    pub async fn create_entry(
        &mut self,
        primary_value: String,
        data: zenkit::serde_json::Map<String, zenkit::serde_json::Value>,
    ) -> Result<TestCollectionEntry<'_>, zenkit::ZenkitError> {
        self.0.create_entry(primary_value, data).await.map(TestCollectionEntry)
    }
}
impl std::ops::Deref for TestCollectionCollection {
    type Target = zenkit::Collection;
    fn deref(&self) -> &zenkit::Collection {
        &self.0
    }
}
impl std::ops::DerefMut for TestCollectionCollection {
    fn deref_mut(&mut self) -> &mut zenkit::Collection {
        &mut self.0
    }
}
pub fn register(registry: &mut zenkit::CollectionRegistry) {
    registry.register::<TestCollectionCollection>();
}
