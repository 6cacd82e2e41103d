//! Byte-level writer: serializes [`WireValue`]s into a growable buffer.

use bytes::{BufMut, BytesMut};
use indexmap::IndexMap;

use crate::error::{PackError, PackResult};
use crate::marker::{self, TINY_INT_MAX, TINY_INT_MIN, TINY_MAX_LEN};
use crate::wire::{WireStructure, WireValue};

/// Output cursor for wire encoding.
///
/// Writes advance the cursor in place. On failure mid-composite the bytes
/// already written stay in the buffer; discarding them is the caller's job.
pub struct WireWriter {
    buf: BytesMut,
}

impl WireWriter {
    /// Create a writer with a small default capacity.
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a writer with the given initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// View the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Discard everything written so far.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Consume the writer, returning the buffer.
    pub fn into_bytes(self) -> BytesMut {
        self.buf
    }

    /// Write one wire value, dispatching on its variant.
    pub fn write_value(&mut self, value: &WireValue) -> PackResult<()> {
        match value {
            WireValue::Null => {
                self.write_null();
                Ok(())
            }
            WireValue::Boolean(b) => {
                self.write_bool(*b);
                Ok(())
            }
            WireValue::Integer(i) => {
                self.write_int(*i);
                Ok(())
            }
            WireValue::Float(f) => {
                self.write_float(*f);
                Ok(())
            }
            WireValue::Bytes(b) => self.write_bytes(b),
            WireValue::String(s) => self.write_string(s),
            WireValue::List(items) => self.write_list(items),
            WireValue::Dict(entries) => self.write_dict(entries),
            WireValue::Structure(s) => self.write_structure(s),
        }
    }

    /// Write the null marker.
    pub fn write_null(&mut self) {
        self.buf.put_u8(marker::NULL);
    }

    /// Write a boolean using the reserved true/false sentinels.
    pub fn write_bool(&mut self, value: bool) {
        self.buf
            .put_u8(if value { marker::TRUE } else { marker::FALSE });
    }

    /// Write an integer in its smallest wire representation.
    pub fn write_int(&mut self, value: i64) {
        match value {
            TINY_INT_MIN..=TINY_INT_MAX => self.buf.put_u8(value as u8),
            -128..=-17 => {
                self.buf.put_u8(marker::INT_8);
                self.buf.put_i8(value as i8);
            }
            -32_768..=32_767 => {
                self.buf.put_u8(marker::INT_16);
                self.buf.put_i16(value as i16);
            }
            -2_147_483_648..=2_147_483_647 => {
                self.buf.put_u8(marker::INT_32);
                self.buf.put_i32(value as i32);
            }
            _ => {
                self.buf.put_u8(marker::INT_64);
                self.buf.put_i64(value);
            }
        }
    }

    /// Write a float. Always 64-bit; there is no compact form.
    pub fn write_float(&mut self, value: f64) {
        self.buf.put_u8(marker::FLOAT_64);
        self.buf.put_f64(value);
    }

    /// Write a byte array with its length prefix.
    pub fn write_bytes(&mut self, value: &[u8]) -> PackResult<()> {
        // Bytes have no tiny form.
        self.write_length(
            value.len(),
            "bytes",
            None,
            marker::BYTES_8,
            marker::BYTES_16,
            Some(marker::BYTES_32),
        )?;
        self.buf.put_slice(value);
        Ok(())
    }

    /// Write a string, length-prefixed by its UTF-8 byte length.
    pub fn write_string(&mut self, value: &str) -> PackResult<()> {
        let bytes = value.as_bytes();
        self.write_length(
            bytes.len(),
            "string",
            Some(marker::TINY_STRING),
            marker::STRING_8,
            marker::STRING_16,
            Some(marker::STRING_32),
        )?;
        self.buf.put_slice(bytes);
        Ok(())
    }

    /// Write a list: size prefix, then each element in order.
    pub fn write_list(&mut self, items: &[WireValue]) -> PackResult<()> {
        self.write_length(
            items.len(),
            "list",
            Some(marker::TINY_LIST),
            marker::LIST_8,
            marker::LIST_16,
            Some(marker::LIST_32),
        )?;
        for item in items {
            self.write_value(item)?;
        }
        Ok(())
    }

    /// Write a dictionary: size prefix, then key/value pairs in the map's
    /// insertion order, so equal maps encode byte-identically.
    pub fn write_dict(&mut self, entries: &IndexMap<String, WireValue>) -> PackResult<()> {
        self.write_length(
            entries.len(),
            "dict",
            Some(marker::TINY_DICT),
            marker::DICT_8,
            marker::DICT_16,
            Some(marker::DICT_32),
        )?;
        for (key, value) in entries {
            self.write_string(key)?;
            self.write_value(value)?;
        }
        Ok(())
    }

    /// Write a structure: field-count prefix, tag byte, then the fields.
    pub fn write_structure(&mut self, s: &WireStructure) -> PackResult<()> {
        self.write_length(
            s.fields.len(),
            "structure fields",
            Some(marker::TINY_STRUCT),
            marker::STRUCT_8,
            marker::STRUCT_16,
            None,
        )?;
        self.buf.put_u8(s.tag);
        for field in &s.fields {
            self.write_value(field)?;
        }
        Ok(())
    }

    // One ladder for every length-prefixed kind. `tiny` folds lengths up to
    // 15 into the marker nibble when the kind has a tiny form; `m32` is None
    // for structures, which stop at 16-bit counts.
    fn write_length(
        &mut self,
        len: usize,
        what: &'static str,
        tiny: Option<u8>,
        m8: u8,
        m16: u8,
        m32: Option<u8>,
    ) -> PackResult<()> {
        match (tiny, m32) {
            (Some(nibble), _) if len <= TINY_MAX_LEN => {
                self.buf.put_u8(nibble | len as u8);
            }
            _ if len <= u8::MAX as usize => {
                self.buf.put_u8(m8);
                self.buf.put_u8(len as u8);
            }
            _ if len <= u16::MAX as usize => {
                self.buf.put_u8(m16);
                self.buf.put_u16(len as u16);
            }
            (_, Some(m32)) if len <= u32::MAX as usize => {
                self.buf.put_u8(m32);
                self.buf.put_u32(len as u32);
            }
            _ => return Err(PackError::ValueTooLarge { what, size: len }),
        }
        Ok(())
    }
}

impl Default for WireWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a single wire value to bytes.
pub fn write_wire(value: &WireValue) -> PackResult<BytesMut> {
    let mut writer = WireWriter::new();
    writer.write_value(value)?;
    Ok(writer.into_bytes())
}
