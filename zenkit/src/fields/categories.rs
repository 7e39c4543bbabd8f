use super::{ArrayField, WirePair};
use crate::element::{Element, Label};
use serde_json::Value;

/// Label reference accepted by [`CategoriesField`]: a numeric label id, or a regex matched against
/// predefined label names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRef<'s> {
    Id(u64),
    Pattern(&'s str),
}

impl From<u64> for LabelRef<'_> {
    fn from(id: u64) -> Self {
        LabelRef::Id(id)
    }
}

impl<'s> From<&'s str> for LabelRef<'s> {
    fn from(pattern: &'s str) -> Self {
        LabelRef::Pattern(pattern)
    }
}

/// Label selection, stored as a sequence of label ids.
pub struct CategoriesField<'a> {
    inner: ArrayField<'a>,
}

impl<'a> CategoriesField<'a> {
    pub(crate) fn new(inner: ArrayField<'a>) -> Self {
        CategoriesField { inner }
    }

    pub fn into_inner(self) -> ArrayField<'a> {
        self.inner
    }

    pub fn element(&self) -> &Element {
        self.inner.element()
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn edited(&self) -> bool {
        self.inner.edited()
    }

    pub fn value(&self) -> Option<&Value> {
        self.inner.value()
    }

    pub fn label_ids(&self) -> Vec<u64> {
        self.inner.values().iter().filter_map(Value::as_u64).collect()
    }

    /// Selected labels that are still predefined on the element.
    pub fn labels(&self) -> Vec<&Label> {
        self.label_ids().into_iter().filter_map(|id| self.element().label_by_id(id)).collect()
    }

    pub fn has_label<'s>(&self, label: impl Into<LabelRef<'s>>) -> bool {
        self.resolve(label.into()).is_some_and(|id| self.inner.contains(&Value::from(id)))
    }

    /// Selects a label. Single-select elements drop their current selection first.
    /// Returns false when a pattern matches no predefined label.
    pub fn add_label<'s>(&mut self, label: impl Into<LabelRef<'s>>) -> bool {
        match self.resolve(label.into()) {
            Some(id) => {
                if !self.element().is_multiple() {
                    self.inner.clear();
                }
                self.inner.add(id);
                true
            }
            None => false,
        }
    }

    /// Deselects a label. Returns false when a pattern matches no predefined label.
    pub fn remove_label<'s>(&mut self, label: impl Into<LabelRef<'s>>) -> bool {
        match self.resolve(label.into()) {
            Some(id) => {
                self.inner.remove_value(&Value::from(id));
                true
            }
            None => false,
        }
    }

    pub fn add_label_by_id(&mut self, id: u64) -> bool {
        self.add_label(LabelRef::Id(id))
    }

    pub fn add_label_by_name(&mut self, pattern: &str) -> bool {
        self.add_label(LabelRef::Pattern(pattern))
    }

    pub fn remove_label_by_id(&mut self, id: u64) -> bool {
        self.remove_label(LabelRef::Id(id))
    }

    pub fn remove_label_by_name(&mut self, pattern: &str) -> bool {
        self.remove_label(LabelRef::Pattern(pattern))
    }

    pub fn clear(&mut self) {
        self.inner.clear()
    }

    pub fn data(&self) -> Vec<WirePair> {
        self.inner.data()
    }

    fn resolve(&self, label: LabelRef<'_>) -> Option<u64> {
        match label {
            LabelRef::Id(id) => Some(id),
            LabelRef::Pattern(pattern) => self.element().label(pattern).map(|l| l.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::element::test_utils::label_element;
    use crate::element::FieldKind;
    use crate::fields::Field;
    use crate::record::RawEntry;
    use serde_json::json;

    const STATUS: &[(u64, &str)] = &[(10, "Zu bearbeiten"), (11, "In Bearbeitung"), (12, "Erledigt")];

    #[test]
    fn single_select_replaces_the_previous_label() {
        let el = label_element(7, "Status", false, STATUS);
        let mut record = RawEntry::default();
        let mut edited = false;
        let mut field = Field::bind(FieldKind::Categories, &el, &mut record, &mut edited).into_categories().unwrap();
        assert!(field.add_label_by_id(10));
        assert!(field.add_label_by_name("Erledigt"));
        assert_eq!(field.label_ids(), vec![12]);
        assert_eq!(field.labels()[0].name, "Erledigt");
        assert!(field.edited());
    }

    #[test]
    fn multi_select_accumulates_without_duplicates() {
        let el = label_element(8, "Tags", true, &[(1, "NEW"), (2, "STALE"), (3, "BUG")]);
        let mut record = RawEntry::from_value(json!({"uuid-8_categories": [1]})).unwrap();
        let mut edited = false;
        let mut field = Field::bind(FieldKind::Categories, &el, &mut record, &mut edited).into_categories().unwrap();
        assert!(field.add_label_by_name("BUG"));
        assert!(field.add_label_by_id(1));
        assert_eq!(field.label_ids(), vec![1, 3]);
        assert!(field.has_label("NEW"));
        assert!(field.remove_label_by_name("NEW"));
        assert_eq!(field.label_ids(), vec![3]);
    }

    #[test]
    fn generic_label_refs_accept_ids_and_patterns() {
        let el = label_element(8, "Tags", true, &[(1, "NEW"), (2, "STALE"), (3, "BUG")]);
        let mut record = RawEntry::default();
        let mut edited = false;
        let mut field = Field::bind(FieldKind::Categories, &el, &mut record, &mut edited).into_categories().unwrap();
        let pattern = String::from("^STA");
        assert!(field.add_label(pattern.as_str()));
        assert!(field.add_label(3u64));
        assert!(field.has_label(2u64));
        assert!(field.remove_label("BUG"));
        assert!(!field.has_label(3u64));
        assert_eq!(field.label_ids(), vec![2]);
    }

    #[test]
    fn unknown_pattern_is_a_miss_and_leaves_the_field_clean() {
        let el = label_element(7, "Status", false, STATUS);
        let mut record = RawEntry::from_value(json!({"uuid-7_categories": [10]})).unwrap();
        let mut edited = false;
        let mut field = Field::bind(FieldKind::Categories, &el, &mut record, &mut edited).into_categories().unwrap();
        assert!(!field.add_label_by_name("Archiviert"));
        assert!(!field.remove_label_by_name("(broken"));
        assert!(!field.edited());
        assert_eq!(field.label_ids(), vec![10]);
    }
}
