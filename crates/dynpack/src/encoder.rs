use crate::macros::encode_fixed;
use crate::macros::for_each_fixed_scalar;
use crate::traits::ProtocolWriter;
use crate::types::Error;
use crate::types::MessageHeader;
use crate::types::Result;
use crate::types::WireType;

/// Strict message version word; the low byte carries the `MessageKind`.
pub(crate) const VERSION_1: u32 = 0x8001_0000;
pub(crate) const VERSION_MASK: u32 = 0xffff_0000;

/// A growable buffer that encodes data in the Thrift binary format.
#[derive(Debug, Default, Clone)]
pub struct BinaryWriter {
    buf: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline(always)]
    fn write_type(&mut self, wire_type: WireType) {
        self.buf.push(wire_type as u8);
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        if len > i32::MAX as usize {
            return Err(Error::TooLarge(len));
        }
        self.buf.extend_from_slice(&(len as i32).to_be_bytes());
        Ok(())
    }
}

impl ProtocolWriter for BinaryWriter {
    fn write_message_begin(&mut self, header: &MessageHeader) -> Result<()> {
        let version = VERSION_1 | header.kind as u32;
        self.buf.extend_from_slice(&version.to_be_bytes());
        self.write_string(&header.name)?;
        self.write_i32(header.seq)
    }

    fn write_message_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_struct_begin(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    fn write_struct_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_field_begin(&mut self, _name: &str, wire_type: WireType, id: i16) -> Result<()> {
        self.write_type(wire_type);
        self.write_i16(id)
    }

    fn write_field_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_field_stop(&mut self) -> Result<()> {
        self.write_type(WireType::Stop);
        Ok(())
    }

    fn write_list_begin(&mut self, elem: WireType, len: usize) -> Result<()> {
        self.write_type(elem);
        self.write_len(len)
    }

    fn write_list_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_map_begin(&mut self, key: WireType, value: WireType, len: usize) -> Result<()> {
        self.write_type(key);
        self.write_type(value);
        self.write_len(len)
    }

    fn write_map_end(&mut self) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn write_bool(&mut self, v: bool) -> Result<()> {
        self.buf.push(v as u8);
        Ok(())
    }

    for_each_fixed_scalar!(encode_fixed);

    fn write_string(&mut self, v: &str) -> Result<()> {
        self.write_len(v.len())?;
        self.buf.extend_from_slice(v.as_bytes());
        Ok(())
    }
}
