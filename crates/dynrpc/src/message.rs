// crates/dynrpc/src/message.rs
use std::sync::OnceLock;

use dynpack::MessageHeader;
use dynpack::MessageKind;
use dynpack::ProtocolReader;
use dynpack::ProtocolWriter;
use tracing::debug;

use crate::decode::decode;
use crate::encode::encode;
use crate::envelope::Envelope;
use crate::schema::Field;
use crate::schema::Schema;
use crate::types::Error;
use crate::types::Result;
use crate::value::Value;

/// The failure a server reports in place of a reply.
/// Wire shape: `{ 1: message string, 2: type int32 }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationException {
    pub message: String,
    pub kind: i32,
}

impl ApplicationException {
    pub const UNKNOWN_METHOD: i32 = 1;

    pub fn new(message: impl Into<String>, kind: i32) -> Self {
        Self { message: message.into(), kind }
    }

    pub fn schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::object([
                Field::new("message", 1, Schema::String),
                Field::new("type", 2, Schema::Int32),
            ])
        })
    }

    fn to_value(&self) -> Value {
        Value::from_iter([
            ("message", Value::from(self.message.as_str())),
            ("type", Value::Int32(self.kind)),
        ])
    }

    fn from_value(value: &Value) -> Self {
        Self {
            message: value.get("message").and_then(Value::as_str).unwrap_or_default().to_string(),
            kind: match value.get("type") {
                Some(Value::Int32(kind)) => *kind,
                _ => 0,
            },
        }
    }
}

impl From<ApplicationException> for Error {
    fn from(e: ApplicationException) -> Self {
        Error::Remote { message: e.message, kind: e.kind }
    }
}

/// Writes a message header, the envelope body, and the message end.
pub fn write_message<W: ProtocolWriter + ?Sized>(out: &mut W, header: &MessageHeader, body: &Envelope) -> Result<()> {
    out.write_message_begin(header)?;
    body.write_to(out)?;
    out.write_message_end()?;
    Ok(())
}

/// Encodes a call. Format: `[Call, method, seq] args`
pub fn write_call<W: ProtocolWriter + ?Sized>(out: &mut W, method: &str, seq: i32, args: &Envelope) -> Result<()> {
    write_message(out, &MessageHeader::new(method, MessageKind::Call, seq), args)
}

/// Encodes a one-way call, for which no reply is expected.
pub fn write_oneway<W: ProtocolWriter + ?Sized>(out: &mut W, method: &str, seq: i32, args: &Envelope) -> Result<()> {
    write_message(out, &MessageHeader::new(method, MessageKind::Oneway, seq), args)
}

/// Encodes a successful reply. Format: `[Reply, method, seq] result`
pub fn write_reply<W: ProtocolWriter + ?Sized>(out: &mut W, method: &str, seq: i32, result: &Envelope) -> Result<()> {
    write_message(out, &MessageHeader::new(method, MessageKind::Reply, seq), result)
}

/// Encodes a failure reply. Format: `[Exception, method, seq] exception`
pub fn write_exception<W: ProtocolWriter + ?Sized>(
    out: &mut W,
    method: &str,
    seq: i32,
    exception: &ApplicationException,
) -> Result<()> {
    out.write_message_begin(&MessageHeader::new(method, MessageKind::Exception, seq))?;
    encode(ApplicationException::schema(), &exception.to_value(), out)?;
    out.write_message_end()?;
    Ok(())
}

/// Decodes a call (or one-way call) into `args`, returning its header.
pub fn read_call<R: ProtocolReader + ?Sized>(input: &mut R, args: &mut Envelope) -> Result<MessageHeader> {
    let header = input.read_message_begin()?;
    match header.kind {
        MessageKind::Call | MessageKind::Oneway => {
            args.read_from(input)?;
            input.read_message_end()?;
            Ok(header)
        }
        actual => Err(Error::UnexpectedMessage { expected: MessageKind::Call, actual }),
    }
}

/// Decodes a reply into `result`, returning its header.
///
/// An exception reply is decoded and surfaced as `Error::Remote`.
pub fn read_reply<R: ProtocolReader + ?Sized>(input: &mut R, result: &mut Envelope) -> Result<MessageHeader> {
    let header = input.read_message_begin()?;
    match header.kind {
        MessageKind::Reply => {
            result.read_from(input)?;
            input.read_message_end()?;
            Ok(header)
        }
        MessageKind::Exception => {
            let value = decode(ApplicationException::schema(), input)?;
            input.read_message_end()?;
            let exception = ApplicationException::from_value(&value);
            debug!(method = %header.name, seq = header.seq, kind = exception.kind, "remote exception");
            Err(exception.into())
        }
        actual => Err(Error::UnexpectedMessage { expected: MessageKind::Reply, actual }),
    }
}
