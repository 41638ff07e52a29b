//! Bridging between `serde_json` documents and [`Value`] trees.
//!
//! JSON numbers carry no width, so integers come in as [`Value::Int`].
//! [`Value::conform`] narrows them to whatever the schema declares.

use std::collections::BTreeMap;

use serde_json::Number;

use crate::schema::Kind;
use crate::schema::Schema;
use crate::types::Error;
use crate::types::Result;
use crate::value::Value;

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(entries) => {
                Value::Map(entries.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Int16(v) => v.into(),
            Value::Int32(v) => v.into(),
            Value::Int64(v) | Value::Int(v) => v.into(),
            // NaN and infinities have no JSON form.
            Value::Double(v) => Number::from_f64(v).map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Bool(v) => v.into(),
            Value::String(v) => v.into(),
            Value::List(items) => serde_json::Value::Array(items.into_iter().map(Into::into).collect()),
            Value::Map(entries) => {
                serde_json::Value::Object(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl Value {
    /// Narrows width-less integers to the widths `schema` declares, recursively.
    ///
    /// `Int` becomes `Int16`/`Int32`/`Int64`, or `Double` for double nodes;
    /// out of range integers fail with `Error::OutOfRange`. Values already of
    /// the right shape pass through, `Null` stays `Null`, and map keys that
    /// an object schema does not declare are kept untouched.
    pub fn conform(self, schema: &Schema) -> Result<Value> {
        let value = match (schema, self) {
            (_, Value::Null) => Value::Null,

            (Schema::Int16, Value::Int(v)) => Value::Int16(narrow(Kind::Int16, v)?),
            (Schema::Int32, Value::Int(v)) => Value::Int32(narrow(Kind::Int32, v)?),
            (Schema::Int64, Value::Int(v)) => Value::Int64(v),
            (Schema::Double, Value::Int(v)) => Value::Double(v as f64),

            (Schema::Int16, v @ Value::Int16(_))
            | (Schema::Int32, v @ Value::Int32(_))
            | (Schema::Int64, v @ Value::Int64(_))
            | (Schema::Double, v @ Value::Double(_))
            | (Schema::Bool, v @ Value::Bool(_))
            | (Schema::String, v @ Value::String(_)) => v,

            (Schema::Object(fields), Value::Map(mut entries)) => {
                for field in fields {
                    if let Some(item) = entries.remove(&field.name) {
                        entries.insert(field.name.clone(), item.conform(&field.ty)?);
                    }
                }
                Value::Map(entries)
            }

            (Schema::Array(element), Value::List(items)) => Value::List(
                items
                    .into_iter()
                    .map(|item| item.conform(element))
                    .collect::<Result<Vec<_>>>()?,
            ),

            (Schema::Map(element), Value::Map(entries)) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, item)| Ok((k, item.conform(element)?)))
                    .collect::<Result<BTreeMap<_, _>>>()?,
            ),

            (schema, other) => {
                return Err(Error::TypeMismatch { expected: schema.kind(), actual: other.type_name() });
            }
        };
        Ok(value)
    }
}

fn narrow<T: TryFrom<i64>>(expected: Kind, v: i64) -> Result<T> {
    T::try_from(v).map_err(|_| Error::OutOfRange { expected, value: v })
}
