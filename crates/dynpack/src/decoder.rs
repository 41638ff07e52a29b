use crate::cursor::Cursor;
use crate::encoder::VERSION_1;
use crate::encoder::VERSION_MASK;
use crate::macros::decode_fixed;
use crate::macros::for_each_fixed_scalar;
use crate::traits::ProtocolReader;
use crate::types::Error;
use crate::types::FieldHeader;
use crate::types::Limits;
use crate::types::ListHeader;
use crate::types::MapHeader;
use crate::types::MessageHeader;
use crate::types::MessageKind;
use crate::types::Result;
use crate::types::WireType;

/// Reads Thrift binary data out of a borrowed buffer.
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    cursor: Cursor<'a>,
    limits: Limits,
}

impl<'a> BinaryReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_limits(buf, Limits::default())
    }

    pub fn with_limits(buf: &'a [u8], limits: Limits) -> Self {
        Self { cursor: Cursor::new(buf), limits }
    }

    pub fn pos(&self) -> usize {
        self.cursor.pos()
    }

    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    fn read_type(&mut self) -> Result<WireType> {
        let byte = self.cursor.read_byte()?;
        WireType::from_u8(byte).ok_or(Error::InvalidWireType(byte))
    }

    fn read_len(&mut self, limit: usize) -> Result<usize> {
        let raw = self.read_i32()?;
        if raw < 0 {
            return Err(Error::NegativeLength(raw));
        }
        let len = raw as usize;
        if len > limit {
            return Err(Error::LengthLimit { len, limit });
        }
        Ok(len)
    }

    fn read_utf8(&mut self, len: usize) -> Result<String> {
        let bytes = self.cursor.read_bytes(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| Error::InvalidUtf8)
    }
}

impl ProtocolReader for BinaryReader<'_> {
    fn read_message_begin(&mut self) -> Result<MessageHeader> {
        let word = self.read_i32()?;
        if word < 0 {
            let word = word as u32;
            if word & VERSION_MASK != VERSION_1 {
                return Err(Error::BadVersion(word));
            }
            let kind_byte = (word & 0xff) as u8;
            let kind = MessageKind::from_u8(kind_byte).ok_or(Error::InvalidMessageKind(kind_byte))?;
            let name = self.read_string()?;
            let seq = self.read_i32()?;
            return Ok(MessageHeader { name, kind, seq });
        }

        // Non-strict header: the first word is the name length.
        let len = word as usize;
        if len > self.limits.max_string_len {
            return Err(Error::LengthLimit { len, limit: self.limits.max_string_len });
        }
        let name = self.read_utf8(len)?;
        let kind_byte = self.cursor.read_byte()?;
        let kind = MessageKind::from_u8(kind_byte).ok_or(Error::InvalidMessageKind(kind_byte))?;
        let seq = self.read_i32()?;
        Ok(MessageHeader { name, kind, seq })
    }

    fn read_message_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_struct_begin(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_struct_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_field_begin(&mut self) -> Result<FieldHeader> {
        let wire_type = self.read_type()?;
        if wire_type == WireType::Stop {
            return Ok(FieldHeader::stop());
        }
        let id = self.read_i16()?;
        Ok(FieldHeader { name: String::new(), wire_type, id })
    }

    fn read_field_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_list_begin(&mut self) -> Result<ListHeader> {
        let elem = self.read_type()?;
        let len = self.read_len(self.limits.max_container_len)?;
        Ok(ListHeader { elem, len })
    }

    fn read_list_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_map_begin(&mut self) -> Result<MapHeader> {
        let key = self.read_type()?;
        let value = self.read_type()?;
        let len = self.read_len(self.limits.max_container_len)?;
        Ok(MapHeader { key, value, len })
    }

    fn read_map_end(&mut self) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn read_bool(&mut self) -> Result<bool> {
        Ok(self.cursor.read_byte()? != 0)
    }

    for_each_fixed_scalar!(decode_fixed);

    fn read_string(&mut self) -> Result<String> {
        let len = self.read_len(self.limits.max_string_len)?;
        self.read_utf8(len)
    }
}
