use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const ID: &str = "id";
pub const SHORT_ID: &str = "shortId";
pub const UUID: &str = "uuid";
pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";
pub const CREATED_BY: &str = "created_by";
pub const UPDATED_BY: &str = "updated_by";
pub const DISPLAY_STRING: &str = "displayString";
pub const COMMENT_COUNT: &str = "comment_count";
pub const LIST_ID: &str = "listId";
pub const SORT_ORDER: &str = "sortOrder";

/// One remote record exactly as received: fixed metadata keys plus one attribute per element storage key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawEntry(Map<String, Value>);

impl RawEntry {
    pub fn new(map: Map<String, Value>) -> Self {
        RawEntry(map)
    }

    /// Accepts only JSON objects.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(RawEntry(map)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn id(&self) -> u64 {
        self.u64_of(ID)
    }

    pub fn short_id(&self) -> &str {
        self.str_of(SHORT_ID)
    }

    pub fn uuid(&self) -> &str {
        self.str_of(UUID)
    }

    pub fn list_id(&self) -> u64 {
        self.u64_of(LIST_ID)
    }

    pub fn display_string(&self) -> &str {
        self.str_of(DISPLAY_STRING)
    }

    pub fn comment_count(&self) -> u64 {
        self.u64_of(COMMENT_COUNT)
    }

    pub fn created_at(&self) -> &str {
        self.str_of(CREATED_AT)
    }

    pub fn updated_at(&self) -> &str {
        self.str_of(UPDATED_AT)
    }

    pub fn created_by(&self) -> u64 {
        self.u64_of(CREATED_BY)
    }

    pub fn updated_by(&self) -> u64 {
        self.u64_of(UPDATED_BY)
    }

    /// Persisted sort order, stringified whether the remote sent a string or a number.
    pub fn sort_order(&self) -> String {
        self.get(SORT_ORDER).map(stringify).unwrap_or_default()
    }

    fn str_of(&self, key: &str) -> &str {
        self.get(key).and_then(Value::as_str).unwrap_or("")
    }

    fn u64_of(&self, key: &str) -> u64 {
        self.get(key).and_then(Value::as_u64).unwrap_or(0)
    }
}

/// Display form of a wire value: strings verbatim, null as empty, everything else as JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (f as i64).to_string(),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Equality by value: numbers compare numerically, so `42` and `42.0` are the same value.
pub fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y || x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}
