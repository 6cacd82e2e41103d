//! PackStream marker bytes and structure tags.
//!
//! Every wire value starts with a marker byte. Small payloads fold their
//! length into the marker's low nibble ("tiny" forms); larger ones follow the
//! marker with an explicit big-endian length prefix. All markers live in
//! `0x80..=0xEF`; anything outside that range is a tiny integer encoded
//! inline (`0x00..=0x7F` for 0..=127, `0xF0..=0xFF` for -16..=-1).

/// Null marker.
pub const NULL: u8 = 0xC0;

/// Boolean false marker. The wire reserves exactly this byte for false.
pub const FALSE: u8 = 0xC2;
/// Boolean true marker. The wire reserves exactly this byte for true.
pub const TRUE: u8 = 0xC3;

/// 64-bit IEEE 754 float marker.
pub const FLOAT_64: u8 = 0xC1;

/// Integer with an 8-bit payload.
pub const INT_8: u8 = 0xC8;
/// Integer with a 16-bit payload.
pub const INT_16: u8 = 0xC9;
/// Integer with a 32-bit payload.
pub const INT_32: u8 = 0xCA;
/// Integer with a 64-bit payload.
pub const INT_64: u8 = 0xCB;

/// Byte array, 8-bit length prefix.
pub const BYTES_8: u8 = 0xCC;
/// Byte array, 16-bit length prefix.
pub const BYTES_16: u8 = 0xCD;
/// Byte array, 32-bit length prefix.
pub const BYTES_32: u8 = 0xCE;

/// String, 8-bit length prefix.
pub const STRING_8: u8 = 0xD0;
/// String, 16-bit length prefix.
pub const STRING_16: u8 = 0xD1;
/// String, 32-bit length prefix.
pub const STRING_32: u8 = 0xD2;

/// List, 8-bit length prefix.
pub const LIST_8: u8 = 0xD4;
/// List, 16-bit length prefix.
pub const LIST_16: u8 = 0xD5;
/// List, 32-bit length prefix.
pub const LIST_32: u8 = 0xD6;

/// Dictionary, 8-bit entry-count prefix.
pub const DICT_8: u8 = 0xD8;
/// Dictionary, 16-bit entry-count prefix.
pub const DICT_16: u8 = 0xD9;
/// Dictionary, 32-bit entry-count prefix.
pub const DICT_32: u8 = 0xDA;

/// Structure, 8-bit field-count prefix.
pub const STRUCT_8: u8 = 0xDC;
/// Structure, 16-bit field-count prefix. There is no 32-bit form.
pub const STRUCT_16: u8 = 0xDD;

/// High nibble of tiny strings (`0x80..=0x8F`, low nibble = byte length).
pub const TINY_STRING: u8 = 0x80;
/// High nibble of tiny lists (`0x90..=0x9F`, low nibble = item count).
pub const TINY_LIST: u8 = 0x90;
/// High nibble of tiny dictionaries (`0xA0..=0xAF`, low nibble = entry count).
pub const TINY_DICT: u8 = 0xA0;
/// High nibble of tiny structures (`0xB0..=0xBF`, low nibble = field count).
pub const TINY_STRUCT: u8 = 0xB0;

/// Largest length a tiny form can carry in its low nibble.
pub const TINY_MAX_LEN: usize = 0x0F;

/// Smallest integer encodable inline in the marker byte.
pub const TINY_INT_MIN: i64 = -16;
/// Largest integer encodable inline in the marker byte.
pub const TINY_INT_MAX: i64 = 127;

/// Structure tags: the closed enumeration of extension types, shared by the
/// encode and decode paths.
pub mod tag {
    /// Node.
    pub const NODE: u8 = 0x4E;
    /// Relationship bound to its endpoint nodes.
    pub const RELATIONSHIP: u8 = 0x52;
    /// Relationship stripped of its endpoints, as carried inside a path.
    pub const UNBOUND_RELATIONSHIP: u8 = 0x72;
    /// Path.
    pub const PATH: u8 = 0x50;

    /// Date: days since the Unix epoch.
    pub const DATE: u8 = 0x44;
    /// Time of day with a UTC offset.
    pub const TIME: u8 = 0x54;
    /// Time of day without a zone.
    pub const LOCAL_TIME: u8 = 0x74;
    /// Date-time with a fixed UTC offset.
    pub const DATE_TIME: u8 = 0x46;
    /// Date-time with a named time zone.
    pub const DATE_TIME_ZONE_ID: u8 = 0x66;
    /// Date-time without a zone.
    pub const LOCAL_DATE_TIME: u8 = 0x64;
    /// Duration: months, days, seconds, nanoseconds.
    pub const DURATION: u8 = 0x45;

    /// 2D point with SRID.
    pub const POINT_2D: u8 = 0x58;
    /// 3D point with SRID.
    pub const POINT_3D: u8 = 0x59;
}

/// Whether a marker byte is a tiny integer (the only markers outside
/// `0x80..=0xEF`).
#[inline]
pub fn is_tiny_int(marker: u8) -> bool {
    !(0x80..=0xEF).contains(&marker)
}
