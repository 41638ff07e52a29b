//! Core types for the dynpack binary protocol

use std::error;
use std::fmt;

/// Thrift binary type ids, as written in field, list and map headers.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    Stop = 0,
    Bool = 2,
    Byte = 3,
    Double = 4,
    I16 = 6,
    I32 = 8,
    I64 = 10,
    String = 11,
    Struct = 12,
    Map = 13,
    Set = 14,
    List = 15,
}

impl WireType {
    pub const fn from_u8(b: u8) -> Option<Self> {
        match b {
            0 => Some(WireType::Stop),
            2 => Some(WireType::Bool),
            3 => Some(WireType::Byte),
            4 => Some(WireType::Double),
            6 => Some(WireType::I16),
            8 => Some(WireType::I32),
            10 => Some(WireType::I64),
            11 => Some(WireType::String),
            12 => Some(WireType::Struct),
            13 => Some(WireType::Map),
            14 => Some(WireType::Set),
            15 => Some(WireType::List),
            _ => None,
        }
    }
}

/// The kind of an RPC message, carried in the low byte of the version word.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Call = 1,
    Reply = 2,
    Exception = 3,
    Oneway = 4,
}

impl MessageKind {
    pub const fn from_u8(b: u8) -> Option<Self> {
        match b {
            1 => Some(MessageKind::Call),
            2 => Some(MessageKind::Reply),
            3 => Some(MessageKind::Exception),
            4 => Some(MessageKind::Oneway),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    pub name: String,
    pub kind: MessageKind,
    pub seq: i32,
}

impl MessageHeader {
    pub fn new(name: impl Into<String>, kind: MessageKind, seq: i32) -> Self {
        Self { name: name.into(), kind, seq }
    }
}

/// A field frame as reported by a reader.
///
/// The binary format does not carry field names, so readers backed by it
/// always report an empty `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldHeader {
    pub name: String,
    pub wire_type: WireType,
    pub id: i16,
}

impl FieldHeader {
    pub fn stop() -> Self {
        Self { name: String::new(), wire_type: WireType::Stop, id: 0 }
    }

    pub fn is_stop(&self) -> bool {
        self.wire_type == WireType::Stop
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListHeader {
    pub elem: WireType,
    pub len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapHeader {
    pub key: WireType,
    pub value: WireType,
    pub len: usize,
}

/// Upper bounds a reader applies to length prefixes before trusting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum byte length of a single string.
    pub max_string_len: usize,
    /// Maximum element count of a single list or map.
    pub max_container_len: usize,
}

impl Limits {
    pub const DEFAULT_MAX_STRING_LEN: usize = 16 * 1024 * 1024;
    pub const DEFAULT_MAX_CONTAINER_LEN: usize = 1024 * 1024;

    pub fn with_max_string_len(mut self, len: usize) -> Self {
        self.max_string_len = len;
        self
    }

    pub fn with_max_container_len(mut self, len: usize) -> Self {
        self.max_container_len = len;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_string_len: Self::DEFAULT_MAX_STRING_LEN,
            max_container_len: Self::DEFAULT_MAX_CONTAINER_LEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The buffer ended `needed` bytes short of the value being read.
    UnexpectedEnd { needed: usize },
    /// Byte does not correspond to a valid `WireType`.
    InvalidWireType(u8),
    /// Byte does not correspond to a valid `MessageKind`.
    InvalidMessageKind(u8),
    /// A strict message header carried an unknown version word.
    BadVersion(u32),
    /// String data is not valid UTF-8.
    InvalidUtf8,
    /// A length prefix was negative.
    NegativeLength(i32),
    /// A length prefix exceeded the reader's `Limits`.
    LengthLimit { len: usize, limit: usize },
    /// A string or container is too long to be framed with an `i32` length.
    TooLarge(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnexpectedEnd { needed } => write!(f, "Unexpected end of buffer: {} more bytes needed", needed),
            Error::InvalidWireType(b) => write!(f, "Invalid wire type byte: {:#04x}", b),
            Error::InvalidMessageKind(b) => write!(f, "Invalid message kind: {}", b),
            Error::BadVersion(v) => write!(f, "Bad message version: {:#010x}", v),
            Error::LengthLimit { len, limit } => write!(f, "Length {} exceeds limit {}", len, limit),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
