//! Byte-level reader: parses marker-tagged bytes into [`WireValue`]s.

use indexmap::IndexMap;

use crate::error::{PackError, PackResult};
use crate::marker::{self, is_tiny_int};
use crate::wire::{WireStructure, WireValue};

// Preallocation cap for wire-claimed lengths.
const MAX_CLAIMED_CAPACITY: usize = 1024;

/// Reads wire values from a byte slice, advancing an internal cursor.
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Create a reader over the given bytes.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Whether the input is fully consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Read the next value.
    pub fn read_value(&mut self) -> PackResult<WireValue> {
        let m = self.read_u8()?;

        if is_tiny_int(m) {
            return Ok(WireValue::Integer(i64::from(m as i8)));
        }

        let nibble_len = usize::from(m & 0x0F);
        match m & 0xF0 {
            marker::TINY_STRING => return self.read_string(nibble_len),
            marker::TINY_LIST => return self.read_list(nibble_len),
            marker::TINY_DICT => return self.read_dict(nibble_len),
            marker::TINY_STRUCT => return self.read_structure(nibble_len),
            _ => {}
        }

        match m {
            marker::NULL => Ok(WireValue::Null),
            marker::TRUE => Ok(WireValue::Boolean(true)),
            marker::FALSE => Ok(WireValue::Boolean(false)),

            marker::FLOAT_64 => Ok(WireValue::Float(f64::from_bits(self.read_u64()?))),

            marker::INT_8 => Ok(WireValue::Integer(i64::from(self.read_u8()? as i8))),
            marker::INT_16 => Ok(WireValue::Integer(i64::from(self.read_u16()? as i16))),
            marker::INT_32 => Ok(WireValue::Integer(i64::from(self.read_u32()? as i32))),
            marker::INT_64 => Ok(WireValue::Integer(self.read_u64()? as i64)),

            marker::BYTES_8 => {
                let len = usize::from(self.read_u8()?);
                self.read_bytes(len)
            }
            marker::BYTES_16 => {
                let len = usize::from(self.read_u16()?);
                self.read_bytes(len)
            }
            marker::BYTES_32 => {
                let len = self.read_u32()? as usize;
                self.read_bytes(len)
            }

            marker::STRING_8 => {
                let len = usize::from(self.read_u8()?);
                self.read_string(len)
            }
            marker::STRING_16 => {
                let len = usize::from(self.read_u16()?);
                self.read_string(len)
            }
            marker::STRING_32 => {
                let len = self.read_u32()? as usize;
                self.read_string(len)
            }

            marker::LIST_8 => {
                let len = usize::from(self.read_u8()?);
                self.read_list(len)
            }
            marker::LIST_16 => {
                let len = usize::from(self.read_u16()?);
                self.read_list(len)
            }
            marker::LIST_32 => {
                let len = self.read_u32()? as usize;
                self.read_list(len)
            }

            marker::DICT_8 => {
                let len = usize::from(self.read_u8()?);
                self.read_dict(len)
            }
            marker::DICT_16 => {
                let len = usize::from(self.read_u16()?);
                self.read_dict(len)
            }
            marker::DICT_32 => {
                let len = self.read_u32()? as usize;
                self.read_dict(len)
            }

            marker::STRUCT_8 => {
                let len = usize::from(self.read_u8()?);
                self.read_structure(len)
            }
            marker::STRUCT_16 => {
                let len = usize::from(self.read_u16()?);
                self.read_structure(len)
            }

            other => Err(PackError::UnknownMarker(other)),
        }
    }

    fn read_bytes(&mut self, len: usize) -> PackResult<WireValue> {
        Ok(WireValue::Bytes(self.take(len)?.to_vec()))
    }

    fn read_string(&mut self, len: usize) -> PackResult<WireValue> {
        let s = std::str::from_utf8(self.take(len)?)?;
        Ok(WireValue::String(s.to_string()))
    }

    fn read_list(&mut self, len: usize) -> PackResult<WireValue> {
        let mut items = Vec::with_capacity(len.min(MAX_CLAIMED_CAPACITY));
        for _ in 0..len {
            items.push(self.read_value()?);
        }
        Ok(WireValue::List(items))
    }

    fn read_dict(&mut self, len: usize) -> PackResult<WireValue> {
        let mut entries = IndexMap::with_capacity(len.min(MAX_CLAIMED_CAPACITY));
        for _ in 0..len {
            let key = match self.read_value()? {
                WireValue::String(s) => s,
                _ => return Err(PackError::InvalidDictKey),
            };
            let value = self.read_value()?;
            entries.insert(key, value);
        }
        Ok(WireValue::Dict(entries))
    }

    fn read_structure(&mut self, field_count: usize) -> PackResult<WireValue> {
        let tag = self.read_u8()?;
        let mut fields = Vec::with_capacity(field_count.min(MAX_CLAIMED_CAPACITY));
        for _ in 0..field_count {
            fields.push(self.read_value()?);
        }
        Ok(WireValue::Structure(WireStructure::new(tag, fields)))
    }

    fn take(&mut self, len: usize) -> PackResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(PackError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_u8(&mut self) -> PackResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_u16(&mut self) -> PackResult<u16> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn read_u32(&mut self) -> PackResult<u32> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_u64(&mut self) -> PackResult<u64> {
        let b = self.take(8)?;
        Ok(u64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }
}

/// Read a single wire value from a byte slice.
pub fn read_wire(data: &[u8]) -> PackResult<WireValue> {
    WireReader::new(data).read_value()
}
