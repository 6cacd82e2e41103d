//! Wire value model: the tagged representation exchanged over the protocol.

use indexmap::IndexMap;

/// A value in its wire form, one variant per PackStream type.
///
/// Dictionaries preserve insertion order so that re-encoding a decoded value
/// is byte-deterministic.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    /// Absence of a value.
    Null,
    /// Boolean.
    Boolean(bool),
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit IEEE 754 float.
    Float(f64),
    /// Raw octets.
    Bytes(Vec<u8>),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence of values.
    List(Vec<WireValue>),
    /// String-keyed mapping, insertion order preserved.
    Dict(IndexMap<String, WireValue>),
    /// Extension type: tag byte plus fixed-arity fields.
    Structure(WireStructure),
}

/// An extension wire type: a tag byte identifying the type plus an ordered
/// field sequence whose arity the tag dictates.
#[derive(Debug, Clone, PartialEq)]
pub struct WireStructure {
    /// Tag byte, one of the constants in [`crate::marker::tag`].
    pub tag: u8,
    /// Ordered fields.
    pub fields: Vec<WireValue>,
}

impl WireStructure {
    /// Build a structure from a tag and its fields.
    pub fn new(tag: u8, fields: Vec<WireValue>) -> Self {
        Self { tag, fields }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the structure carries no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl WireValue {
    /// Integer payload, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            WireValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// String payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            WireValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// List payload, if this is a list.
    pub fn as_list(&self) -> Option<&[WireValue]> {
        match self {
            WireValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Dictionary payload, if this is a dictionary.
    pub fn as_dict(&self) -> Option<&IndexMap<String, WireValue>> {
        match self {
            WireValue::Dict(entries) => Some(entries),
            _ => None,
        }
    }

    /// Structure payload, if this is a structure.
    pub fn as_structure(&self) -> Option<&WireStructure> {
        match self {
            WireValue::Structure(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the wire type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            WireValue::Null => "Null",
            WireValue::Boolean(_) => "Boolean",
            WireValue::Integer(_) => "Integer",
            WireValue::Float(_) => "Float",
            WireValue::Bytes(_) => "Bytes",
            WireValue::String(_) => "String",
            WireValue::List(_) => "List",
            WireValue::Dict(_) => "Dict",
            WireValue::Structure(_) => "Structure",
        }
    }
}

impl From<WireStructure> for WireValue {
    fn from(s: WireStructure) -> Self {
        WireValue::Structure(s)
    }
}
