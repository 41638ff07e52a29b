// crates/dynrpc/src/decode.rs
use std::collections::BTreeMap;

use dynpack::ProtocolReader;
use dynpack::WireType;
use tracing::debug;
use tracing::trace;

use crate::config::Config;
use crate::schema::Field;
use crate::schema::Schema;
use crate::types::Error;
use crate::types::Result;
use crate::value::Value;

/// Upper bound on up-front allocation for a declared container length.
const MAX_PREALLOC: usize = 4096;

/// Decode one value described by `schema`.
#[tracing::instrument(level = "trace", skip_all, fields(kind = %schema.kind()))]
pub fn decode<R: ProtocolReader + ?Sized>(schema: &Schema, input: &mut R) -> Result<Value> {
    let mut slot = Value::Null;
    decode_impl(schema, input, &mut slot, Config::DEFAULT_MAX_DEPTH, 0)?;
    Ok(slot)
}

/// Like [`decode`], with an explicit configuration.
#[tracing::instrument(level = "trace", skip_all, fields(kind = %schema.kind()))]
pub fn decode_with<R: ProtocolReader + ?Sized>(schema: &Schema, input: &mut R, config: &Config) -> Result<Value> {
    let mut slot = Value::Null;
    decode_impl(schema, input, &mut slot, config.max_depth, 0)?;
    Ok(slot)
}

/// Decode into `slot`.
///
/// On failure `slot` keeps whatever was decoded before the error: containers
/// hold every complete entry plus the partially decoded one that failed.
#[tracing::instrument(level = "trace", skip_all, fields(kind = %schema.kind()))]
pub fn decode_into<R: ProtocolReader + ?Sized>(
    schema: &Schema,
    input: &mut R,
    slot: &mut Value,
    config: &Config,
) -> Result<()> {
    decode_impl(schema, input, slot, config.max_depth, 0)
}

fn expect_wire_type(expected: WireType, actual: WireType) -> Result<()> {
    if expected != actual {
        return Err(Error::WireTypeMismatch { expected, actual });
    }
    Ok(())
}

fn decode_impl<R: ProtocolReader + ?Sized>(
    schema: &Schema,
    input: &mut R,
    slot: &mut Value,
    max_depth: usize,
    depth: usize,
) -> Result<()> {
    if depth > max_depth {
        return Err(Error::RecursionLimitExceeded);
    }

    match schema {
        Schema::Int16 => *slot = Value::Int16(input.read_i16()?),
        Schema::Int32 => *slot = Value::Int32(input.read_i32()?),
        Schema::Int64 => *slot = Value::Int64(input.read_i64()?),
        Schema::Double => *slot = Value::Double(input.read_double()?),
        Schema::Bool => *slot = Value::Bool(input.read_bool()?),
        Schema::String => *slot = Value::String(input.read_string()?),

        Schema::Object(fields) => {
            let mut entries = BTreeMap::new();
            let result = decode_fields(fields, input, &mut entries, max_depth, depth);
            *slot = Value::Map(entries);
            result?;
        }

        Schema::Array(element) => {
            let mut items = Vec::new();
            let result = decode_items(element, input, &mut items, max_depth, depth);
            *slot = Value::List(items);
            result?;
        }

        Schema::Map(element) => {
            let mut entries = BTreeMap::new();
            let result = decode_entries(element, input, &mut entries, max_depth, depth);
            *slot = Value::Map(entries);
            result?;
        }
    }
    Ok(())
}

/// Fields must arrive in exactly the declared order; nothing is skipped.
fn decode_fields<R: ProtocolReader + ?Sized>(
    fields: &[Field],
    input: &mut R,
    entries: &mut BTreeMap<String, Value>,
    max_depth: usize,
    depth: usize,
) -> Result<()> {
    input.read_struct_begin()?;

    for field in fields {
        let header = input.read_field_begin()?;
        if header.id != field.id {
            debug!(field = %field.name, expected = field.id, actual = header.id, "field identity mismatch");
            return Err(Error::FieldIdentityMismatch {
                field: field.name.clone(),
                expected: field.id,
                actual: header.id,
            });
        }
        expect_wire_type(field.ty.wire_type(), header.wire_type)?;
        trace!(field = %field.name, id = field.id, "read field");

        let mut item = Value::Null;
        let result = decode_impl(&field.ty, input, &mut item, max_depth, depth + 1);
        entries.insert(field.name.clone(), item);
        result?;

        input.read_field_end()?;
    }

    let trailer = input.read_field_begin()?;
    if !trailer.is_stop() {
        debug!(id = trailer.id, wire_type = ?trailer.wire_type, "unexpected trailing field");
        return Err(Error::UnexpectedField { id: trailer.id, wire_type: trailer.wire_type });
    }

    input.read_struct_end()?;
    Ok(())
}

/// Decodes exactly the declared number of elements.
fn decode_items<R: ProtocolReader + ?Sized>(
    element: &Schema,
    input: &mut R,
    items: &mut Vec<Value>,
    max_depth: usize,
    depth: usize,
) -> Result<()> {
    let header = input.read_list_begin()?;
    if header.len > 0 {
        expect_wire_type(element.wire_type(), header.elem)?;
    }

    items.reserve(header.len.min(MAX_PREALLOC));
    for _ in 0..header.len {
        let mut item = Value::Null;
        let result = decode_impl(element, input, &mut item, max_depth, depth + 1);
        items.push(item);
        result?;
    }

    input.read_list_end()?;
    Ok(())
}

fn decode_entries<R: ProtocolReader + ?Sized>(
    element: &Schema,
    input: &mut R,
    entries: &mut BTreeMap<String, Value>,
    max_depth: usize,
    depth: usize,
) -> Result<()> {
    let header = input.read_map_begin()?;
    if header.len > 0 {
        expect_wire_type(WireType::String, header.key)?;
        expect_wire_type(element.wire_type(), header.value)?;
    }

    for _ in 0..header.len {
        let key = input.read_string()?;
        let mut item = Value::Null;
        let result = decode_impl(element, input, &mut item, max_depth, depth + 1);
        entries.insert(key, item);
        result?;
    }

    input.read_map_end()?;
    Ok(())
}
