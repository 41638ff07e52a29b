//! # Dynpack
//!
//! The protocol layer underneath `dynrpc`: a reader/writer trait pair for
//! primitive values and struct/list/map framing, plus a Thrift binary
//! compatible implementation over byte buffers.
//!
//! ## Format
//!
//! - **Integers**: big-endian, fixed width (`i16`, `i32`, `i64`)
//! - **Double**: big-endian IEEE-754 bits
//! - **String**: `[Len: i32][UTF-8: Len]`
//! - **Field**: `[WireType: 1b][Id: i16]`, terminated by a single `Stop` byte
//! - **List**: `[Elem: 1b][Len: i32]`
//! - **Map**: `[Key: 1b][Value: 1b][Len: i32]`
//! - **Message**: `[0x8001_0000 | Kind: i32][Name: String][Seq: i32]`

mod macros;

pub mod types;
pub mod traits;
pub mod cursor;
pub mod encoder;
pub mod decoder;

pub use types::Result;
pub use types::Error;
pub use types::WireType;
pub use types::MessageKind;
pub use types::MessageHeader;
pub use types::FieldHeader;
pub use types::ListHeader;
pub use types::MapHeader;
pub use types::Limits;

pub use traits::ProtocolWriter;
pub use traits::ProtocolReader;
pub use traits::Protocol;

pub use cursor::Cursor;
pub use encoder::BinaryWriter;
pub use decoder::BinaryReader;
