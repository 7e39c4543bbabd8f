use super::{wire_pairs, Binding, WirePair};
use crate::element::Element;
use crate::record::same_value;
use serde_json::Value;

/// Scalar field: text, number, link and the start value of dates.
pub struct ValueField<'a> {
    binding: Binding<'a>,
}

impl<'a> ValueField<'a> {
    pub(crate) fn new(binding: Binding<'a>) -> Self {
        ValueField { binding }
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

    pub fn as_str(&self) -> Option<&str> {
        self.value().and_then(Value::as_str)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.value().and_then(Value::as_f64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.value().and_then(Value::as_bool)
    }

    /// Writes `value` through to the record. Only a value differing from the current one
    /// (an absent key reads as null) marks the field edited.
    pub fn set(&mut self, value: impl Into<Value>) {
        let key = self.binding.key();
        self.write(key, value.into());
    }

    pub fn data(&self) -> Vec<WirePair> {
        let kind = self.binding.element.field_kind();
        match kind {
            Some(kind) => wire_pairs(kind, self.binding.element, self.binding.record),
            None => Vec::new(),
        }
    }

    pub(crate) fn write(&mut self, key: String, value: Value) {
        let changed = self.binding.record.get(&key).map_or(!value.is_null(), |current| !same_value(current, &value));
        if changed {
            *self.binding.edited = true;
        }
        self.binding.record.insert(key, value);
    }

    pub(crate) fn record_value(&self, key: &str) -> Option<&Value> {
        self.binding.record.get(key)
    }
}

#[cfg(test)]
mod tests {
    use crate::element::test_utils::element;
    use crate::fields::Field;
    use crate::element::FieldKind;
    use crate::record::RawEntry;
    use serde_json::{json, Value};

    #[test]
    fn set_with_a_new_value_marks_edited_and_writes_through() {
        let el = element(1, "Title", 1, true);
        let mut record = RawEntry::from_value(json!({"uuid-1_text": "old"})).unwrap();
        let mut edited = false;
        {
            let mut field = Field::bind(FieldKind::Text, &el, &mut record, &mut edited).into_text().unwrap();
            field.set("new");
            assert!(field.edited());
            assert_eq!(field.as_str(), Some("new"));
        }
        assert!(edited);
        assert_eq!(record.get("uuid-1_text"), Some(&json!("new")));
    }

    #[test]
    fn setting_the_current_value_keeps_the_field_clean() {
        let el = element(2, "Count", 2, false);
        let mut record = RawEntry::from_value(json!({"uuid-2_number": 42})).unwrap();
        let mut edited = false;
        let mut field = Field::bind(FieldKind::Number, &el, &mut record, &mut edited).into_number().unwrap();
        field.set(42);
        assert!(!field.edited());
        assert_eq!(field.as_f64(), Some(42.0));
    }

    #[test]
    fn integral_float_over_an_integer_is_not_an_edit() {
        let el = element(2, "Count", 2, false);
        let mut record = RawEntry::from_value(json!({"uuid-2_number": 42})).unwrap();
        let mut edited = false;
        let mut field = Field::bind(FieldKind::Number, &el, &mut record, &mut edited).into_number().unwrap();
        field.set(42.0);
        assert!(!field.edited());
        field.set(42.5);
        assert!(field.edited());
    }

    #[test]
    fn null_over_an_absent_key_is_not_an_edit() {
        let el = element(3, "Link", 3, false);
        let mut record = RawEntry::default();
        let mut edited = false;
        let mut field = Field::bind(FieldKind::Link, &el, &mut record, &mut edited).into_link().unwrap();
        field.set(Value::Null);
        assert!(!field.edited());
        assert_eq!(field.value(), Some(&Value::Null));
        field.set("https://zenkit.com");
        assert!(field.edited());
        assert_eq!(field.data(), vec![("uuid-3_link".to_string(), json!("https://zenkit.com"))]);
    }
}
