use super::{Binding, WirePair};
use crate::element::Element;
use crate::record::same_value;
use serde_json::Value;

/// Ordered sequence field with set-like `add`: persons, references and the label ids of categories.
pub struct ArrayField<'a> {
    binding: Binding<'a>,
}

impl<'a> ArrayField<'a> {
    pub(crate) fn new(binding: Binding<'a>) -> Self {
        ArrayField { binding }
    }

    pub fn element(&self) -> &Element {
        self.binding.element
    }

    pub fn name(&self) -> &str {
        &self.binding.element.name
    }

    pub fn storage_key(&self) -> String {
        self.binding.key()
    }

    pub fn edited(&self) -> bool {
        *self.binding.edited
    }

    pub fn value(&self) -> Option<&Value> {
        self.binding.current()
    }

    /// Current items; an absent or non-array value reads as empty.
    pub fn values(&self) -> &[Value] {
        match self.binding.current() {
            Some(Value::Array(items)) => items,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.values().iter().any(|v| same_value(v, value))
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values().get(index)
    }

    /// Appends `value` unless already present. Returns whether it was appended.
    pub fn add(&mut self, value: impl Into<Value>) -> bool {
        let value = value.into();
        if self.contains(&value) {
            return false;
        }
        self.update(|items| items.push(value));
        true
    }

    /// Removes the first occurrence of `value`. Absent values are a silent no-op.
    pub fn remove_value(&mut self, value: &Value) -> bool {
        match self.values().iter().position(|v| same_value(v, value)) {
            Some(index) => {
                self.update(|items| items.remove(index));
                true
            }
            None => false,
        }
    }

    /// Removes and returns the item at `index`; out of range is a no-op returning `None`.
    pub fn remove_index(&mut self, index: usize) -> Option<Value> {
        if index >= self.len() {
            return None;
        }
        Some(self.update(|items| items.remove(index)))
    }

    pub fn clear(&mut self) {
        let key = self.binding.key();
        self.binding.record.insert(key, Value::Array(Vec::new()));
        *self.binding.edited = true;
    }

    pub fn data(&self) -> Vec<WirePair> {
        vec![(self.binding.key(), self.value().cloned().unwrap_or(Value::Null))]
    }

    fn update<R>(&mut self, f: impl FnOnce(&mut Vec<Value>) -> R) -> R {
        let key = self.binding.key();
        let mut items = match self.binding.record.get_mut(&key) {
            Some(Value::Array(items)) => std::mem::take(items),
            _ => Vec::new(),
        };
        let out = f(&mut items);
        self.binding.record.insert(key, Value::Array(items));
        *self.binding.edited = true;
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::element::test_utils::element;
    use crate::element::FieldKind;
    use crate::fields::Field;
    use crate::record::RawEntry;
    use serde_json::json;

    fn persons() -> (crate::element::Element, RawEntry) {
        (element(4, "Members", 14, false), RawEntry::from_value(json!({"uuid-4_persons": [1, 2]})).unwrap())
    }

    #[test]
    fn add_suppresses_duplicates() {
        let (el, mut record) = persons();
        let mut edited = false;
        let mut field = Field::bind(FieldKind::Persons, &el, &mut record, &mut edited).into_persons().unwrap();
        assert!(!field.add(2));
        assert!(!field.edited());
        assert!(field.add(3));
        assert!(field.edited());
        assert_eq!(field.values(), &[json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn add_initializes_an_absent_sequence() {
        let el = element(5, "Refs", 16, false);
        let mut record = RawEntry::default();
        let mut edited = false;
        let mut field = Field::bind(FieldKind::References, &el, &mut record, &mut edited).into_references().unwrap();
        assert!(field.is_empty());
        field.add("entry-uuid");
        assert_eq!(field.get(0), Some(&json!("entry-uuid")));
        drop(field);
        assert_eq!(record.get("uuid-5_references"), Some(&json!(["entry-uuid"])));
    }

    #[test]
    fn removals_touch_at_most_one_item() {
        let (el, mut record) = persons();
        let mut edited = false;
        let mut field = Field::bind(FieldKind::Persons, &el, &mut record, &mut edited).into_persons().unwrap();
        assert!(!field.remove_value(&json!(9)));
        assert!(!field.edited());
        assert_eq!(field.remove_index(5), None);
        assert!(!field.edited());
        assert_eq!(field.remove_index(0), Some(json!(1)));
        assert!(field.edited());
        assert!(field.remove_value(&json!(2)));
        assert!(field.is_empty());
    }

    #[test]
    fn clear_leaves_an_empty_sequence_and_marks_edited() {
        let (el, mut record) = persons();
        let mut edited = false;
        let mut field = Field::bind(FieldKind::Persons, &el, &mut record, &mut edited).into_persons().unwrap();
        field.clear();
        assert!(field.edited());
        assert_eq!(field.data(), vec![("uuid-4_persons".to_string(), json!([]))]);
    }
}
