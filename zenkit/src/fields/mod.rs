//! Typed, dirty-tracked views over one attribute of an entry.
//!
//! A field never owns data: every read goes to the entry's [`RawEntry`] under the element's
//! storage key and every write goes straight back into it. The only state a field adds is the
//! `edited` flag, which decides whether the attribute is part of the next commit.

mod array;
mod categories;
mod date;
mod value;

pub use array::ArrayField;
pub use categories::{CategoriesField, LabelRef};
pub use date::DateField;
pub use value::ValueField;

use crate::element::{Element, FieldKind};
use crate::record::RawEntry;
use serde_json::Value;

pub type TextField<'a> = ValueField<'a>;
pub type NumberField<'a> = ValueField<'a>;
pub type LinkField<'a> = ValueField<'a>;
pub type PersonsField<'a> = ArrayField<'a>;
pub type ReferencesField<'a> = ArrayField<'a>;

/// `(storage key, value)` pair merged into a commit payload.
pub type WirePair = (String, Value);

/// Mutable access to one element of one entry.
pub(crate) struct Binding<'a> {
    pub(crate) element: &'a Element,
    pub(crate) record: &'a mut RawEntry,
    pub(crate) edited: &'a mut bool,
}

impl<'a> Binding<'a> {
    pub(crate) fn new(element: &'a Element, record: &'a mut RawEntry, edited: &'a mut bool) -> Self {
        Binding { element, record, edited }
    }

    pub(crate) fn key(&self) -> String {
        self.element.storage_key()
    }

    pub(crate) fn current(&self) -> Option<&Value> {
        self.record.get(&self.key())
    }
}

/// Exhaustive variant over every mutable field kind.
pub enum Field<'a> {
    Text(TextField<'a>),
    Number(NumberField<'a>),
    Link(LinkField<'a>),
    Date(DateField<'a>),
    Categories(CategoriesField<'a>),
    Persons(PersonsField<'a>),
    References(ReferencesField<'a>),
}

impl<'a> Field<'a> {
    pub(crate) fn bind(kind: FieldKind, element: &'a Element, record: &'a mut RawEntry, edited: &'a mut bool) -> Self {
        let binding = Binding::new(element, record, edited);
        match kind {
            FieldKind::Text => Field::Text(ValueField::new(binding)),
            FieldKind::Number => Field::Number(ValueField::new(binding)),
            FieldKind::Link => Field::Link(ValueField::new(binding)),
            FieldKind::Date => Field::Date(DateField::new(ValueField::new(binding))),
            FieldKind::Categories => Field::Categories(CategoriesField::new(ArrayField::new(binding))),
            FieldKind::Persons => Field::Persons(ArrayField::new(binding)),
            FieldKind::References => Field::References(ArrayField::new(binding)),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Text(_) => FieldKind::Text,
            Field::Number(_) => FieldKind::Number,
            Field::Link(_) => FieldKind::Link,
            Field::Date(_) => FieldKind::Date,
            Field::Categories(_) => FieldKind::Categories,
            Field::Persons(_) => FieldKind::Persons,
            Field::References(_) => FieldKind::References,
        }
    }

    pub fn element(&self) -> &Element {
        match self {
            Field::Text(f) | Field::Number(f) | Field::Link(f) => f.element(),
            Field::Date(f) => f.element(),
            Field::Categories(f) => f.element(),
            Field::Persons(f) | Field::References(f) => f.element(),
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Field::Text(f) | Field::Number(f) | Field::Link(f) => f.value(),
            Field::Date(f) => f.value(),
            Field::Categories(f) => f.value(),
            Field::Persons(f) | Field::References(f) => f.value(),
        }
    }

    pub fn edited(&self) -> bool {
        match self {
            Field::Text(f) | Field::Number(f) | Field::Link(f) => f.edited(),
            Field::Date(f) => f.edited(),
            Field::Categories(f) => f.edited(),
            Field::Persons(f) | Field::References(f) => f.edited(),
        }
    }

    pub fn data(&self) -> Vec<WirePair> {
        match self {
            Field::Text(f) | Field::Number(f) | Field::Link(f) => f.data(),
            Field::Date(f) => f.data(),
            Field::Categories(f) => f.data(),
            Field::Persons(f) | Field::References(f) => f.data(),
        }
    }

    pub fn into_text(self) -> Option<TextField<'a>> {
        match self {
            Field::Text(f) => Some(f),
            _ => None,
        }
    }

    pub fn into_number(self) -> Option<NumberField<'a>> {
        match self {
            Field::Number(f) => Some(f),
            _ => None,
        }
    }

    pub fn into_link(self) -> Option<LinkField<'a>> {
        match self {
            Field::Link(f) => Some(f),
            _ => None,
        }
    }

    pub fn into_date(self) -> Option<DateField<'a>> {
        match self {
            Field::Date(f) => Some(f),
            _ => None,
        }
    }

    pub fn into_categories(self) -> Option<CategoriesField<'a>> {
        match self {
            Field::Categories(f) => Some(f),
            _ => None,
        }
    }

    pub fn into_persons(self) -> Option<PersonsField<'a>> {
        match self {
            Field::Persons(f) => Some(f),
            _ => None,
        }
    }

    pub fn into_references(self) -> Option<ReferencesField<'a>> {
        match self {
            Field::References(f) => Some(f),
            _ => None,
        }
    }

    /// The scalar view of text, number, link and date fields.
    pub fn into_value(self) -> Option<ValueField<'a>> {
        match self {
            Field::Text(f) | Field::Number(f) | Field::Link(f) => Some(f),
            Field::Date(f) => Some(f.into_inner()),
            _ => None,
        }
    }

    /// The sequence view of categories, persons and references fields.
    pub fn into_array(self) -> Option<ArrayField<'a>> {
        match self {
            Field::Persons(f) | Field::References(f) => Some(f),
            Field::Categories(f) => Some(f.into_inner()),
            _ => None,
        }
    }
}

/// Read-only view of one field, available through a shared borrow of the entry.
#[derive(Debug, Clone, Copy)]
pub struct FieldRef<'a> {
    pub(crate) kind: FieldKind,
    pub(crate) element: &'a Element,
    pub(crate) record: &'a RawEntry,
    pub(crate) edited: bool,
}

impl<'a> FieldRef<'a> {
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn element(&self) -> &'a Element {
        self.element
    }

    pub fn name(&self) -> &'a str {
        &self.element.name
    }

    pub fn storage_key(&self) -> String {
        self.element.storage_key()
    }

    pub fn value(&self) -> Option<&'a Value> {
        self.record.get(&self.element.storage_key())
    }

    pub fn edited(&self) -> bool {
        self.edited
    }

    pub fn data(&self) -> Vec<WirePair> {
        wire_pairs(self.kind, self.element, self.record)
    }
}

/// Commit payload contribution of one field, dispatched on its kind.
pub(crate) fn wire_pairs(kind: FieldKind, element: &Element, record: &RawEntry) -> Vec<WirePair> {
    let key = element.storage_key();
    let value = record.get(&key).cloned().unwrap_or(Value::Null);
    match kind {
        FieldKind::Date => {
            let end_key = element.end_date_key();
            let end = record.get(&end_key).cloned().unwrap_or(Value::Null);
            let has_time = date::has_time(&value) || date::has_time(&end);
            vec![(key, value), (element.has_time_key(), Value::Bool(has_time)), (end_key, end)]
        }
        FieldKind::Text
        | FieldKind::Number
        | FieldKind::Link
        | FieldKind::Categories
        | FieldKind::Persons
        | FieldKind::References => vec![(key, value)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::test_utils::element;
    use serde_json::json;

    #[test]
    fn bind_maps_every_kind_to_its_variant() {
        for kind in FieldKind::ALL {
            let el = element(1, "F", 1, false);
            let mut record = RawEntry::default();
            let mut edited = false;
            assert_eq!(Field::bind(kind, &el, &mut record, &mut edited).kind(), kind);
        }
    }

    #[test]
    fn field_ref_reads_through_to_the_record() {
        let el = element(3, "Count", 2, false);
        let record = RawEntry::from_value(json!({"uuid-3_number": 42})).unwrap();
        let view = FieldRef { kind: FieldKind::Number, element: &el, record: &record, edited: false };
        assert_eq!(view.value(), Some(&json!(42)));
        assert_eq!(view.name(), "Count");
        assert_eq!(view.data(), vec![("uuid-3_number".to_string(), json!(42))]);
    }

    #[test]
    fn wrong_variant_conversions_yield_none() {
        let el = element(1, "Title", 1, false);
        let mut record = RawEntry::default();
        let mut edited = false;
        assert!(Field::bind(FieldKind::Text, &el, &mut record, &mut edited).into_number().is_none());
        assert!(Field::bind(FieldKind::Text, &el, &mut record, &mut edited).into_array().is_none());
        assert!(Field::bind(FieldKind::Date, &el, &mut record, &mut edited).into_value().is_some());
        assert!(Field::bind(FieldKind::Categories, &el, &mut record, &mut edited).into_array().is_some());
    }
}
