// crates/dynrpc/src/types.rs
use std::error;
use std::fmt;

use dynpack::Error as PackError;
use dynpack::MessageKind;
use dynpack::WireType;

use crate::schema::Kind;

pub type Result<T> = core::result::Result<T, Error>;

/// A schema document that could not be turned into a schema tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The document is not valid JSON or does not have the document shape.
    Document(String),
    /// The `type` token is not one of the known kinds or aliases.
    UnknownType(String),
    /// An array or map description has no `element`.
    MissingElement(Kind),
    /// A field id does not fit the 16-bit wire identity.
    FieldIdOutOfRange { field: String, id: i64 },
    /// Strict mode: field ids must be positive.
    NonPositiveFieldId { field: String, id: i16 },
    /// Strict mode: two fields of one object share an id.
    DuplicateFieldId { field: String, id: i16 },
    /// Strict mode: two fields of one object share a name.
    DuplicateFieldName(String),
    /// Strict mode: an object declares no fields.
    EmptyObject,
    /// The tree nests deeper than the configured `max_depth`.
    TooDeep { depth: usize, limit: usize },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::Document(msg) => write!(f, "Invalid schema document: {}", msg),
            SchemaError::UnknownType(token) => write!(f, "Unknown schema type: {:?}", token),
            SchemaError::MissingElement(kind) => write!(f, "Schema of kind {} has no element", kind),
            SchemaError::FieldIdOutOfRange { field, id } => write!(f, "Field {} has out of range id {}", field, id),
            SchemaError::NonPositiveFieldId { field, id } => write!(f, "Field {} has non-positive id {}", field, id),
            SchemaError::DuplicateFieldId { field, id } => write!(f, "Field {} reuses id {}", field, id),
            SchemaError::DuplicateFieldName(name) => write!(f, "Duplicate field name: {}", name),
            SchemaError::EmptyObject => write!(f, "Object schema declares no fields"),
            SchemaError::TooDeep { depth, limit } => write!(f, "Schema nests {} levels deep, limit is {}", depth, limit),
        }
    }
}

impl error::Error for SchemaError {}

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The schema document was rejected.
    Schema(SchemaError),
    /// A value did not have the shape the schema node requires.
    TypeMismatch {
        expected: Kind,
        actual: &'static str,
    },
    /// A width-less integer did not fit the width the schema node requires.
    OutOfRange {
        expected: Kind,
        value: i64,
    },
    /// The wire reported a different field id than the schema declares at this position.
    FieldIdentityMismatch {
        field: String,
        expected: i16,
        actual: i16,
    },
    /// The wire type of a field or container element disagrees with the schema.
    WireTypeMismatch {
        expected: WireType,
        actual: WireType,
    },
    /// The wire carried a field after the last one the schema declares.
    UnexpectedField {
        id: i16,
        wire_type: WireType,
    },
    /// A message of the wrong kind arrived.
    UnexpectedMessage {
        expected: MessageKind,
        actual: MessageKind,
    },
    /// The schema is nested deeper than the configured limit.
    RecursionLimitExceeded,
    /// The remote side answered with an application exception.
    Remote {
        message: String,
        kind: i32,
    },
    /// An error occurred within the underlying protocol.
    Protocol(PackError),
}

impl From<PackError> for Error {
    fn from(err: PackError) -> Self {
        Error::Protocol(err)
    }
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        Error::Schema(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Schema(e) => write!(f, "Schema error: {}", e),
            Error::TypeMismatch { expected, actual } => write!(f, "Type mismatch: expected {}, got {}", expected, actual),
            Error::OutOfRange { expected, value } => write!(f, "Integer {} does not fit {}", value, expected),
            Error::FieldIdentityMismatch { field, expected, actual } => {
                write!(f, "Field {} expects id {}, got {}", field, expected, actual)
            }
            Error::WireTypeMismatch { expected, actual } => {
                write!(f, "Wire type mismatch: expected {:?}, got {:?}", expected, actual)
            }
            Error::UnexpectedField { id, wire_type } => write!(f, "Unexpected trailing field {} ({:?})", id, wire_type),
            Error::UnexpectedMessage { expected, actual } => {
                write!(f, "Unexpected message: expected {:?}, got {:?}", expected, actual)
            }
            Error::RecursionLimitExceeded => write!(f, "Recursion limit exceeded"),
            Error::Remote { message, kind } => write!(f, "Remote error ({}): {}", kind, message),
            Error::Protocol(e) => write!(f, "Protocol error: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Schema(e) => Some(e),
            Error::Protocol(e) => Some(e),
            _ => None,
        }
    }
}
