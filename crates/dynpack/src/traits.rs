//! Reader and writer capabilities for dynpack protocols

use crate::types::FieldHeader;
use crate::types::ListHeader;
use crate::types::MapHeader;
use crate::types::MessageHeader;
use crate::types::Result;
use crate::types::WireType;

/// The writing half of a protocol.
///
/// Structs, lists and maps are framed with begin/end pairs. Formats that have
/// nothing to write for a given frame (the binary format writes nothing for
/// struct begin/end, for instance) still receive every call, so a writer can
/// track nesting or record the exact call sequence.
pub trait ProtocolWriter {
    fn write_message_begin(&mut self, header: &MessageHeader) -> Result<()>;
    fn write_message_end(&mut self) -> Result<()>;

    fn write_struct_begin(&mut self, name: &str) -> Result<()>;
    fn write_struct_end(&mut self) -> Result<()>;

    fn write_field_begin(&mut self, name: &str, wire_type: WireType, id: i16) -> Result<()>;
    fn write_field_end(&mut self) -> Result<()>;
    /// Terminates the field sequence of the current struct.
    fn write_field_stop(&mut self) -> Result<()>;

    fn write_list_begin(&mut self, elem: WireType, len: usize) -> Result<()>;
    fn write_list_end(&mut self) -> Result<()>;

    fn write_map_begin(&mut self, key: WireType, value: WireType, len: usize) -> Result<()>;
    fn write_map_end(&mut self) -> Result<()>;

    // Scalars
    fn write_bool(&mut self, v: bool) -> Result<()>;
    fn write_i16(&mut self, v: i16) -> Result<()>;
    fn write_i32(&mut self, v: i32) -> Result<()>;
    fn write_i64(&mut self, v: i64) -> Result<()>;
    fn write_double(&mut self, v: f64) -> Result<()>;
    fn write_string(&mut self, v: &str) -> Result<()>;
}

/// The reading half of a protocol.
///
/// Readers cannot be asked what comes next; the caller must know the shape
/// of the stream and call the matching method.
pub trait ProtocolReader {
    fn read_message_begin(&mut self) -> Result<MessageHeader>;
    fn read_message_end(&mut self) -> Result<()>;

    fn read_struct_begin(&mut self) -> Result<()>;
    fn read_struct_end(&mut self) -> Result<()>;

    /// Reads the next field header, or `FieldHeader::stop()` at the end of a struct.
    fn read_field_begin(&mut self) -> Result<FieldHeader>;
    fn read_field_end(&mut self) -> Result<()>;

    fn read_list_begin(&mut self) -> Result<ListHeader>;
    fn read_list_end(&mut self) -> Result<()>;

    fn read_map_begin(&mut self) -> Result<MapHeader>;
    fn read_map_end(&mut self) -> Result<()>;

    // Scalars
    fn read_bool(&mut self) -> Result<bool>;
    fn read_i16(&mut self) -> Result<i16>;
    fn read_i32(&mut self) -> Result<i32>;
    fn read_i64(&mut self) -> Result<i64>;
    fn read_double(&mut self) -> Result<f64>;
    fn read_string(&mut self) -> Result<String>;
}

/// A full duplex protocol.
pub trait Protocol: ProtocolWriter + ProtocolReader {}

impl<T: ProtocolWriter + ProtocolReader> Protocol for T {}

impl<W: ProtocolWriter + ?Sized> ProtocolWriter for &mut W {
    fn write_message_begin(&mut self, header: &MessageHeader) -> Result<()> { (**self).write_message_begin(header) }
    fn write_message_end(&mut self) -> Result<()> { (**self).write_message_end() }
    fn write_struct_begin(&mut self, name: &str) -> Result<()> { (**self).write_struct_begin(name) }
    fn write_struct_end(&mut self) -> Result<()> { (**self).write_struct_end() }
    fn write_field_begin(&mut self, name: &str, wire_type: WireType, id: i16) -> Result<()> {
        (**self).write_field_begin(name, wire_type, id)
    }
    fn write_field_end(&mut self) -> Result<()> { (**self).write_field_end() }
    fn write_field_stop(&mut self) -> Result<()> { (**self).write_field_stop() }
    fn write_list_begin(&mut self, elem: WireType, len: usize) -> Result<()> { (**self).write_list_begin(elem, len) }
    fn write_list_end(&mut self) -> Result<()> { (**self).write_list_end() }
    fn write_map_begin(&mut self, key: WireType, value: WireType, len: usize) -> Result<()> {
        (**self).write_map_begin(key, value, len)
    }
    fn write_map_end(&mut self) -> Result<()> { (**self).write_map_end() }
    fn write_bool(&mut self, v: bool) -> Result<()> { (**self).write_bool(v) }
    fn write_i16(&mut self, v: i16) -> Result<()> { (**self).write_i16(v) }
    fn write_i32(&mut self, v: i32) -> Result<()> { (**self).write_i32(v) }
    fn write_i64(&mut self, v: i64) -> Result<()> { (**self).write_i64(v) }
    fn write_double(&mut self, v: f64) -> Result<()> { (**self).write_double(v) }
    fn write_string(&mut self, v: &str) -> Result<()> { (**self).write_string(v) }
}

impl<R: ProtocolReader + ?Sized> ProtocolReader for &mut R {
    fn read_message_begin(&mut self) -> Result<MessageHeader> { (**self).read_message_begin() }
    fn read_message_end(&mut self) -> Result<()> { (**self).read_message_end() }
    fn read_struct_begin(&mut self) -> Result<()> { (**self).read_struct_begin() }
    fn read_struct_end(&mut self) -> Result<()> { (**self).read_struct_end() }
    fn read_field_begin(&mut self) -> Result<FieldHeader> { (**self).read_field_begin() }
    fn read_field_end(&mut self) -> Result<()> { (**self).read_field_end() }
    fn read_list_begin(&mut self) -> Result<ListHeader> { (**self).read_list_begin() }
    fn read_list_end(&mut self) -> Result<()> { (**self).read_list_end() }
    fn read_map_begin(&mut self) -> Result<MapHeader> { (**self).read_map_begin() }
    fn read_map_end(&mut self) -> Result<()> { (**self).read_map_end() }
    fn read_bool(&mut self) -> Result<bool> { (**self).read_bool() }
    fn read_i16(&mut self) -> Result<i16> { (**self).read_i16() }
    fn read_i32(&mut self) -> Result<i32> { (**self).read_i32() }
    fn read_i64(&mut self) -> Result<i64> { (**self).read_i64() }
    fn read_double(&mut self) -> Result<f64> { (**self).read_double() }
    fn read_string(&mut self) -> Result<String> { (**self).read_string() }
}
