//! # Schema
//!
//! The schema tree and the parser for the declarative documents that
//! describe it.
//!
//! A document is a JSON object with a `type` and, depending on the type,
//! either `fields` (objects) or `element` (arrays and maps):
//!
//! ```json
//! {
//!     "type": "Object",
//!     "fields": [
//!         { "name": "age",   "id": 1, "description": { "type": "int32" } },
//!         { "name": "alias", "id": 2, "description": { "type": "string" } }
//!     ]
//! }
//! ```
//!
//! ## Invariants
//! - **Field order**: an object's field order is the order fields are written in.
//! - **Elements**: arrays and maps always carry an element schema; map keys are strings.
//! - **Immutability**: a parsed tree is never mutated and can be shared freely.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use dynpack::WireType;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::types::SchemaError;

/// The closed set of schema node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Int16,
    Int32,
    Int64,
    Double,
    Bool,
    String,
    Object,
    Array,
    Map,
}

impl Kind {
    /// Matches a document `type` token, ignoring case and accepting aliases.
    pub fn from_name(name: &str) -> Option<Kind> {
        match name.to_ascii_lowercase().as_str() {
            "int16" => Some(Kind::Int16),
            "int" | "int32" => Some(Kind::Int32),
            "int64" => Some(Kind::Int64),
            "double" => Some(Kind::Double),
            "bool" => Some(Kind::Bool),
            "string" => Some(Kind::String),
            "object" => Some(Kind::Object),
            "array" | "list" => Some(Kind::Array),
            "map" => Some(Kind::Map),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Double => "double",
            Kind::Bool => "bool",
            Kind::String => "string",
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::Map => "map",
        }
    }

    /// The wire type announced in field, list and map headers for this kind.
    pub const fn wire_type(self) -> WireType {
        match self {
            Kind::Int16 => WireType::I16,
            Kind::Int32 => WireType::I32,
            Kind::Int64 => WireType::I64,
            Kind::Double => WireType::Double,
            Kind::Bool => WireType::Bool,
            Kind::String => WireType::String,
            Kind::Object => WireType::Struct,
            Kind::Array => WireType::List,
            Kind::Map => WireType::Map,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::from_name(s).ok_or_else(|| SchemaError::UnknownType(s.to_string()))
    }
}

/// A node of the schema tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    Int16,
    Int32,
    Int64,
    Double,
    Bool,
    String,
    /// Fields in write order.
    Object(Vec<Field>),
    Array(Box<Schema>),
    /// String-keyed map; the box holds the value schema.
    Map(Box<Schema>),
}

/// A named, identified slot of an object schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub id: i16,
    pub ty: Schema,
}

impl Field {
    pub fn new(name: impl Into<String>, id: i16, ty: Schema) -> Self {
        Self { name: name.into(), id, ty }
    }
}

impl Schema {
    pub fn object(fields: impl IntoIterator<Item = Field>) -> Self {
        Schema::Object(fields.into_iter().collect())
    }

    pub fn array(element: Schema) -> Self {
        Schema::Array(Box::new(element))
    }

    pub fn map(element: Schema) -> Self {
        Schema::Map(Box::new(element))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Schema::Int16 => Kind::Int16,
            Schema::Int32 => Kind::Int32,
            Schema::Int64 => Kind::Int64,
            Schema::Double => Kind::Double,
            Schema::Bool => Kind::Bool,
            Schema::String => Kind::String,
            Schema::Object(_) => Kind::Object,
            Schema::Array(_) => Kind::Array,
            Schema::Map(_) => Kind::Map,
        }
    }

    pub fn wire_type(&self) -> WireType {
        self.kind().wire_type()
    }

    /// The fields of an object node, empty for every other kind.
    pub fn fields(&self) -> &[Field] {
        match self {
            Schema::Object(fields) => fields,
            _ => &[],
        }
    }

    /// The element schema of an array or map node.
    pub fn element(&self) -> Option<&Schema> {
        match self {
            Schema::Array(element) | Schema::Map(element) => Some(element),
            _ => None,
        }
    }

    /// Container nesting above the deepest leaf; scalars are 0.
    /// This is the deepest level the encoder and decoder walk.
    pub fn depth(&self) -> usize {
        match self {
            Schema::Object(fields) => fields.iter().map(|f| 1 + f.ty.depth()).max().unwrap_or(0),
            Schema::Array(element) | Schema::Map(element) => 1 + element.depth(),
            _ => 0,
        }
    }

    /// Parses a schema document with the default (lenient) configuration.
    ///
    /// Trees nested deeper than [`Config::DEFAULT_MAX_DEPTH`] are rejected
    /// here, so an accepted schema can always be encoded and decoded.
    pub fn parse(document: &str) -> Result<Self, SchemaError> {
        Self::parse_with(document, &Config::default())
    }

    pub fn parse_with(document: &str, config: &Config) -> Result<Self, SchemaError> {
        let doc: Document = serde_json::from_str(document).map_err(|e| SchemaError::Document(e.to_string()))?;
        Self::from_document(doc, config)
    }

    /// Builds a schema from an already parsed JSON document.
    pub fn from_json(document: &serde_json::Value) -> Result<Self, SchemaError> {
        Self::from_json_with(document, &Config::default())
    }

    pub fn from_json_with(document: &serde_json::Value, config: &Config) -> Result<Self, SchemaError> {
        let doc = Document::deserialize(document).map_err(|e| SchemaError::Document(e.to_string()))?;
        Self::from_document(doc, config)
    }

    fn from_document(doc: Document, config: &Config) -> Result<Self, SchemaError> {
        let schema = doc.build()?;
        let depth = schema.depth();
        if depth > config.max_depth {
            return Err(SchemaError::TooDeep { depth, limit: config.max_depth });
        }
        if config.strict_schema {
            schema.validate()?;
        }
        debug!(kind = %schema.kind(), fields = schema.fields().len(), strict = config.strict_schema, "parsed schema");
        Ok(schema)
    }

    /// Checks the cross-field rules the lenient parser does not enforce:
    /// unique positive ids, unique names, and non-empty objects.
    pub fn validate(&self) -> Result<(), SchemaError> {
        match self {
            Schema::Object(fields) => {
                if fields.is_empty() {
                    return Err(SchemaError::EmptyObject);
                }
                let mut ids = HashSet::with_capacity(fields.len());
                let mut names = HashSet::with_capacity(fields.len());
                for field in fields {
                    if field.id <= 0 {
                        return Err(SchemaError::NonPositiveFieldId { field: field.name.clone(), id: field.id });
                    }
                    if !ids.insert(field.id) {
                        return Err(SchemaError::DuplicateFieldId { field: field.name.clone(), id: field.id });
                    }
                    if !names.insert(field.name.as_str()) {
                        return Err(SchemaError::DuplicateFieldName(field.name.clone()));
                    }
                    field.ty.validate()?;
                }
                Ok(())
            }
            Schema::Array(element) | Schema::Map(element) => element.validate(),
            _ => Ok(()),
        }
    }

    /// Renders the schema back into document form.
    pub fn to_json(&self) -> serde_json::Value {
        let mut doc = serde_json::Map::new();
        doc.insert("type".into(), self.kind().name().into());
        match self {
            Schema::Object(fields) => {
                let fields = fields
                    .iter()
                    .map(|f| {
                        serde_json::json!({
                            "name": f.name,
                            "id": f.id,
                            "description": f.ty.to_json(),
                        })
                    })
                    .collect();
                doc.insert("fields".into(), serde_json::Value::Array(fields));
            }
            Schema::Array(element) | Schema::Map(element) => {
                doc.insert("element".into(), element.to_json());
            }
            _ => {}
        }
        serde_json::Value::Object(doc)
    }
}

impl FromStr for Schema {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Schema::parse(s)
    }
}

impl TryFrom<&serde_json::Value> for Schema {
    type Error = SchemaError;

    fn try_from(document: &serde_json::Value) -> Result<Self, Self::Error> {
        Schema::from_json(document)
    }
}

// ============================================================================
//  DOCUMENT FORM
// ============================================================================

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    fields: Option<Vec<FieldDocument>>,
    #[serde(default)]
    element: Option<Box<Document>>,
}

#[derive(Debug, Deserialize)]
struct FieldDocument {
    name: String,
    id: i64,
    description: Document,
}

impl Document {
    fn build(self) -> Result<Schema, SchemaError> {
        let kind = Kind::from_name(&self.ty).ok_or(SchemaError::UnknownType(self.ty))?;
        let schema = match kind {
            Kind::Int16 => Schema::Int16,
            Kind::Int32 => Schema::Int32,
            Kind::Int64 => Schema::Int64,
            Kind::Double => Schema::Double,
            Kind::Bool => Schema::Bool,
            Kind::String => Schema::String,
            Kind::Object => {
                let docs = self.fields.unwrap_or_default();
                let mut fields = Vec::with_capacity(docs.len());
                for field in docs {
                    let id = i16::try_from(field.id)
                        .map_err(|_| SchemaError::FieldIdOutOfRange { field: field.name.clone(), id: field.id })?;
                    fields.push(Field { name: field.name, id, ty: field.description.build()? });
                }
                Schema::Object(fields)
            }
            Kind::Array => Schema::Array(Box::new(Self::element(self.element, kind)?)),
            Kind::Map => Schema::Map(Box::new(Self::element(self.element, kind)?)),
        };
        Ok(schema)
    }

    fn element(element: Option<Box<Document>>, kind: Kind) -> Result<Schema, SchemaError> {
        match element {
            Some(doc) => doc.build(),
            None => Err(SchemaError::MissingElement(kind)),
        }
    }
}
