// crates/dynrpc/src/encode.rs
use dynpack::ProtocolWriter;
use dynpack::WireType;
use tracing::trace;

use crate::config::Config;
use crate::schema::Kind;
use crate::schema::Schema;
use crate::types::Error;
use crate::types::Result;
use crate::value::Value;
use crate::value::NULL;

/// Struct name handed to `write_struct_begin`. The binary format never writes it.
const STRUCT_NAME: &str = "DynObject";

/// Encode `value` as described by `schema`.
///
/// `Value::Null`, and object fields missing from the value, encode as the
/// zero value of their schema node. Bytes already handed to `out` stay
/// written when an error is returned; the stream must then be discarded.
#[tracing::instrument(level = "trace", skip_all, fields(kind = %schema.kind()))]
pub fn encode<W: ProtocolWriter + ?Sized>(schema: &Schema, value: &Value, out: &mut W) -> Result<()> {
    encode_impl(schema, value, out, Config::DEFAULT_MAX_DEPTH, 0)
}

/// Like [`encode`], with an explicit configuration.
#[tracing::instrument(level = "trace", skip_all, fields(kind = %schema.kind()))]
pub fn encode_with<W: ProtocolWriter + ?Sized>(schema: &Schema, value: &Value, out: &mut W, config: &Config) -> Result<()> {
    encode_impl(schema, value, out, config.max_depth, 0)
}

fn mismatch(expected: Kind, actual: &Value) -> Error {
    Error::TypeMismatch { expected, actual: actual.type_name() }
}

fn encode_impl<W: ProtocolWriter + ?Sized>(
    schema: &Schema,
    value: &Value,
    out: &mut W,
    max_depth: usize,
    depth: usize,
) -> Result<()> {
    if depth > max_depth {
        return Err(Error::RecursionLimitExceeded);
    }

    match schema {
        Schema::Int16 => match value {
            Value::Null => out.write_i16(0)?,
            Value::Int16(v) => out.write_i16(*v)?,
            other => return Err(mismatch(Kind::Int16, other)),
        },

        Schema::Int32 => match value {
            Value::Null => out.write_i32(0)?,
            Value::Int32(v) => out.write_i32(*v)?,
            Value::Int(v) => {
                let v = i32::try_from(*v).map_err(|_| Error::OutOfRange { expected: Kind::Int32, value: *v })?;
                out.write_i32(v)?
            }
            other => return Err(mismatch(Kind::Int32, other)),
        },

        Schema::Int64 => match value {
            Value::Null => out.write_i64(0)?,
            Value::Int64(v) => out.write_i64(*v)?,
            other => return Err(mismatch(Kind::Int64, other)),
        },

        Schema::Double => match value {
            Value::Null => out.write_double(0.0)?,
            Value::Double(v) => out.write_double(*v)?,
            other => return Err(mismatch(Kind::Double, other)),
        },

        Schema::Bool => match value {
            Value::Null => out.write_bool(false)?,
            Value::Bool(v) => out.write_bool(*v)?,
            other => return Err(mismatch(Kind::Bool, other)),
        },

        Schema::String => match value {
            Value::Null => out.write_string("")?,
            Value::String(v) => out.write_string(v)?,
            other => return Err(mismatch(Kind::String, other)),
        },

        Schema::Object(fields) => {
            let entries = match value {
                Value::Null => None,
                Value::Map(m) => Some(m),
                other => return Err(mismatch(Kind::Object, other)),
            };

            out.write_struct_begin(STRUCT_NAME)?;
            for field in fields {
                trace!(field = %field.name, id = field.id, "write field");
                out.write_field_begin(&field.name, field.ty.wire_type(), field.id)?;
                let item = entries.and_then(|m| m.get(&field.name)).unwrap_or(&NULL);
                encode_impl(&field.ty, item, out, max_depth, depth + 1)?;
                out.write_field_end()?;
            }
            out.write_field_stop()?;
            out.write_struct_end()?;
        }

        Schema::Array(element) => {
            let items: &[Value] = match value {
                Value::Null => &[],
                Value::List(items) => items,
                other => return Err(mismatch(Kind::Array, other)),
            };

            out.write_list_begin(element.wire_type(), items.len())?;
            for item in items {
                encode_impl(element, item, out, max_depth, depth + 1)?;
            }
            out.write_list_end()?;
        }

        Schema::Map(element) => {
            let entries = match value {
                Value::Null => None,
                Value::Map(m) => Some(m),
                other => return Err(mismatch(Kind::Map, other)),
            };

            let len = entries.map_or(0, |m| m.len());
            out.write_map_begin(WireType::String, element.wire_type(), len)?;
            for (key, item) in entries.into_iter().flatten() {
                out.write_string(key)?;
                encode_impl(element, item, out, max_depth, depth + 1)?;
            }
            out.write_map_end()?;
        }
    }
    Ok(())
}
