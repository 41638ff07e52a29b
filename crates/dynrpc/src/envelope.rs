use dynpack::ProtocolReader;
use dynpack::ProtocolWriter;

use crate::config::Config;
use crate::decode::decode_into;
use crate::encode::encode_with;
use crate::schema::Schema;
use crate::types::Result;
use crate::value::Value;
use crate::value::NULL;

/// A schema-bound value slot handed to an RPC layer.
///
/// An envelope is built per message, either around an outgoing value
/// ([`Envelope::for_write`]) or empty, waiting for [`Envelope::read_from`]
/// ([`Envelope::for_read`]). The schema is borrowed, so one parsed schema can
/// back any number of envelopes.
#[derive(Debug, Clone)]
pub struct Envelope<'a> {
    schema: &'a Schema,
    value: Option<Value>,
    config: Config,
}

impl<'a> Envelope<'a> {
    pub fn for_write(schema: &'a Schema, value: impl Into<Value>) -> Self {
        Self { schema, value: Some(value.into()), config: Config::default() }
    }

    pub fn for_read(schema: &'a Schema) -> Self {
        Self { schema, value: None, config: Config::default() }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// The bound value; `None` for a read envelope that has not been read yet.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<Value> {
        self.value
    }

    /// Encode the bound value. An envelope without a value writes the
    /// schema's zero value.
    pub fn write_to<W: ProtocolWriter + ?Sized>(&self, out: &mut W) -> Result<()> {
        let value = self.value.as_ref().unwrap_or(&NULL);
        encode_with(self.schema, value, out, &self.config)
    }

    /// Decode into the slot. After a failure the slot holds the partial value.
    pub fn read_from<R: ProtocolReader + ?Sized>(&mut self, input: &mut R) -> Result<()> {
        let slot = self.value.insert(Value::Null);
        decode_into(self.schema, input, slot, &self.config)
    }
}
