use super::{ValueField, WirePair};
use crate::element::Element;
use serde_json::Value;

/// A date or time string carries a time component when it contains a `:`.
pub(crate) fn has_time(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.contains(':'))
}

/// Date field with an optional end of range stored under `{uuid}_endDate`.
pub struct DateField<'a> {
    inner: ValueField<'a>,
}

impl<'a> DateField<'a> {
    pub(crate) fn new(inner: ValueField<'a>) -> Self {
        DateField { inner }
    }

    pub fn into_inner(self) -> ValueField<'a> {
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

    pub fn date(&self) -> Option<&str> {
        self.inner.as_str()
    }

    pub fn start_date(&self) -> Option<&str> {
        self.date()
    }

    /// Raw end value; a stored null stays `Some(Value::Null)`.
    pub fn end_value(&self) -> Option<&Value> {
        self.inner.record_value(&self.inner.element().end_date_key())
    }

    pub fn end_date(&self) -> Option<&str> {
        self.end_value().and_then(Value::as_str)
    }

    pub fn has_time(&self) -> bool {
        self.value().is_some_and(has_time) || self.end_value().is_some_and(has_time)
    }

    pub fn set(&mut self, value: impl Into<Value>) {
        self.inner.set(value)
    }

    pub fn set_date(&mut self, value: impl Into<Value>) {
        self.set(value)
    }

    pub fn set_end_date(&mut self, value: impl Into<Value>) {
        let key = self.inner.element().end_date_key();
        self.inner.write(key, value.into());
    }

    /// Start, `hasTime` and end pairs.
    pub fn data(&self) -> Vec<WirePair> {
        self.inner.data()
    }
}
