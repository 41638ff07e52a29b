// crates/dynrpc/src/lib.rs
//! Schema-driven RPC encoding of dynamic values over dynpack.
//!
//! A schema document is parsed once into a [`Schema`]; [`encode`] and
//! [`decode`] then walk that schema together with a [`Value`] tree or a
//! protocol stream. [`Envelope`] binds a schema to one value slot for use by
//! an RPC layer.

mod config;
mod decode;
mod encode;
mod envelope;
mod json;
mod message;
mod schema;
mod types;
mod value;


pub use dynpack;

pub use crate::types::Result;
pub use crate::types::Error;
pub use crate::types::SchemaError;

pub use crate::config::Config;

pub use crate::schema::Kind;
pub use crate::schema::Schema;
pub use crate::schema::Field;

pub use crate::value::Value;

pub use crate::encode::encode;
pub use crate::encode::encode_with;

pub use crate::decode::decode;
pub use crate::decode::decode_with;
pub use crate::decode::decode_into;

pub use crate::envelope::Envelope;

pub use crate::message::ApplicationException;
pub use crate::message::write_message;
pub use crate::message::write_call;
pub use crate::message::write_oneway;
pub use crate::message::write_reply;
pub use crate::message::write_exception;
pub use crate::message::read_call;
pub use crate::message::read_reply;
