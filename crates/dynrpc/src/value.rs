use std::collections::BTreeMap;

use crate::schema::Schema;

pub(crate) static NULL: Value = Value::Null;

/// A dynamically shaped value exchanged at the encode/decode boundary.
///
/// Maps are ordered by key, so encoding a map always emits its entries in
/// the same order.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent. Encodes as the zero value of whatever the schema asks for.
    #[default]
    Null,
    Int16(i16),
    Int32(i32),
    Int64(i64),
    /// An integer without a declared width, such as a JSON number.
    /// The encoder accepts it for `int32` nodes when it fits.
    Int(i64),
    Double(f64),
    Bool(bool),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// The value a decoder produces for data encoded from `Value::Null`.
    pub fn zero_of(schema: &Schema) -> Value {
        match schema {
            Schema::Int16 => Value::Int16(0),
            Schema::Int32 => Value::Int32(0),
            Schema::Int64 => Value::Int64(0),
            Schema::Double => Value::Double(0.0),
            Schema::Bool => Value::Bool(false),
            Schema::String => Value::String(String::new()),
            Schema::Object(fields) => Value::Map(
                fields
                    .iter()
                    .map(|f| (f.name.clone(), Value::zero_of(&f.ty)))
                    .collect(),
            ),
            Schema::Array(_) => Value::List(Vec::new()),
            Schema::Map(_) => Value::Map(BTreeMap::new()),
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int16(_) => "int16",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Looks up `key` in a map value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(key))
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self { Value::Int16(v) }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self { Value::Int32(v) }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self { Value::Int64(v) }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self { Value::Double(v) }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self { Value::Bool(v) }
}

impl From<String> for Value {
    fn from(v: String) -> Self { Value::String(v) }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self { Value::String(v.to_string()) }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self { Value::List(v) }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self { Value::Map(v) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
