use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Numeric element category tag as sent by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum ElementCategory {
    Text,
    Number,
    Link,
    Date,
    Categories,
    CreatedAt,
    UpdatedAt,
    DeprecatedAt,
    CreatedBy,
    UpdatedBy,
    DeprecatedBy,
    Persons,
    Files,
    References,
    Other(u32),
}

impl From<u32> for ElementCategory {
    fn from(tag: u32) -> Self {
        match tag {
            1 => ElementCategory::Text,
            2 => ElementCategory::Number,
            3 => ElementCategory::Link,
            4 => ElementCategory::Date,
            6 => ElementCategory::Categories,
            8 => ElementCategory::CreatedAt,
            9 => ElementCategory::UpdatedAt,
            10 => ElementCategory::DeprecatedAt,
            11 => ElementCategory::CreatedBy,
            12 => ElementCategory::UpdatedBy,
            13 => ElementCategory::DeprecatedBy,
            14 => ElementCategory::Persons,
            15 => ElementCategory::Files,
            16 => ElementCategory::References,
            other => ElementCategory::Other(other),
        }
    }
}

impl From<ElementCategory> for u32 {
    fn from(category: ElementCategory) -> Self {
        match category {
            ElementCategory::Text => 1,
            ElementCategory::Number => 2,
            ElementCategory::Link => 3,
            ElementCategory::Date => 4,
            ElementCategory::Categories => 6,
            ElementCategory::CreatedAt => 8,
            ElementCategory::UpdatedAt => 9,
            ElementCategory::DeprecatedAt => 10,
            ElementCategory::CreatedBy => 11,
            ElementCategory::UpdatedBy => 12,
            ElementCategory::DeprecatedBy => 13,
            ElementCategory::Persons => 14,
            ElementCategory::Files => 15,
            ElementCategory::References => 16,
            ElementCategory::Other(tag) => tag,
        }
    }
}

impl ElementCategory {
    /// The mutable field kind this category is exposed as; system and unknown categories have none.
    pub fn field_kind(self) -> Option<FieldKind> {
        match self {
            ElementCategory::Text => Some(FieldKind::Text),
            ElementCategory::Number => Some(FieldKind::Number),
            ElementCategory::Link => Some(FieldKind::Link),
            ElementCategory::Date => Some(FieldKind::Date),
            ElementCategory::Categories => Some(FieldKind::Categories),
            ElementCategory::Persons => Some(FieldKind::Persons),
            ElementCategory::References => Some(FieldKind::References),
            ElementCategory::CreatedAt
            | ElementCategory::UpdatedAt
            | ElementCategory::DeprecatedAt
            | ElementCategory::CreatedBy
            | ElementCategory::UpdatedBy
            | ElementCategory::DeprecatedBy
            | ElementCategory::Files
            | ElementCategory::Other(_) => None,
        }
    }
}

/// Closed set of element kinds that become mutable fields of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Number,
    Link,
    Date,
    Categories,
    Persons,
    References,
}

impl FieldKind {
    pub const ALL: [FieldKind; 7] = [
        FieldKind::Text,
        FieldKind::Number,
        FieldKind::Link,
        FieldKind::Date,
        FieldKind::Categories,
        FieldKind::Persons,
        FieldKind::References,
    ];

    /// Suffix appended to the element uuid to form the wire attribute name.
    pub fn suffix(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Link => "link",
            FieldKind::Date => "date",
            FieldKind::Categories => "categories",
            FieldKind::Persons => "persons",
            FieldKind::References => "references",
        }
    }

    pub fn is_scalar(self) -> bool {
        self.value_type().is_some()
    }

    /// Runtime type of the value held by scalar kinds.
    pub fn value_type(self) -> Option<ValueType> {
        match self {
            FieldKind::Text | FieldKind::Link | FieldKind::Date => Some(ValueType::String),
            FieldKind::Number => Some(ValueType::Number),
            FieldKind::Categories | FieldKind::Persons | FieldKind::References => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Text => "TextField",
            FieldKind::Number => "NumberField",
            FieldKind::Link => "LinkField",
            FieldKind::Date => "DateField",
            FieldKind::Categories => "CategoriesField",
            FieldKind::Persons => "PersonsField",
            FieldKind::References => "ReferencesField",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime type tag of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Boolean,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Boolean => "boolean",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        }
    }
}

/// Predefined label of a categories element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: u64,
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementData {
    #[serde(default)]
    pub predefined_categories: Option<Vec<Label>>,
    #[serde(default)]
    pub multiple: bool,
}

/// Immutable schema description of one collection attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: u64,
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(rename = "elementcategory")]
    pub category: ElementCategory,
    #[serde(default)]
    pub element_data: ElementData,
}

impl Element {
    pub fn field_kind(&self) -> Option<FieldKind> {
        self.category.field_kind()
    }

    /// Wire attribute name, `{uuid}_{suffix}`. System categories fall back to the bare uuid.
    pub fn storage_key(&self) -> String {
        match self.field_kind() {
            Some(kind) => format!("{}_{}", self.uuid, kind.suffix()),
            None => self.uuid.clone(),
        }
    }

    pub fn end_date_key(&self) -> String {
        format!("{}_endDate", self.uuid)
    }

    pub fn has_time_key(&self) -> String {
        format!("{}_hasTime", self.uuid)
    }

    pub fn value_type(&self) -> Option<ValueType> {
        self.field_kind().and_then(FieldKind::value_type)
    }

    pub fn is_multiple(&self) -> bool {
        self.element_data.multiple
    }

    pub fn labels(&self) -> &[Label] {
        self.element_data.predefined_categories.as_deref().unwrap_or(&[])
    }

    pub fn label_by_id(&self, id: u64) -> Option<&Label> {
        self.labels().iter().find(|l| l.id == id)
    }

    /// First predefined label (in declaration order) whose name matches `pattern`.
    pub fn label(&self, pattern: &str) -> Option<&Label> {
        crate::pattern::first_match(self.labels(), pattern, "label", |l: &Label| l.name.as_str())
    }
}
