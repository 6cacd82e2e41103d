//! The value codec: bidirectional conversion between wire and native values,
//! plus byte-level convenience entry points.
//!
//! Both directions dispatch exhaustively on their closed sum type, so a new
//! variant on either side is a compile error at every dispatch site rather
//! than a runtime fallthrough. Structures go through the extension registry
//! in both directions.

use bytes::BytesMut;
use indexmap::IndexMap;

use crate::error::{PackError, PackResult};
use crate::marker::tag;
use crate::reader::WireReader;
use crate::registry;
use crate::value::Value;
use crate::wire::WireValue;
use crate::writer::WireWriter;

/// Convert a parsed wire value into a native value.
///
/// Total over the wire variant set; the only failures are structure-level
/// (unknown tag, arity or field-shape mismatch). List and dictionary order
/// is preserved.
pub fn from_wire(wire: WireValue) -> PackResult<Value> {
    Ok(match wire {
        WireValue::Null => Value::Null,
        WireValue::Boolean(b) => Value::Boolean(b),
        WireValue::Integer(i) => Value::Integer(i),
        WireValue::Float(f) => Value::Float(f),
        WireValue::Bytes(b) => Value::Bytes(b),
        WireValue::String(s) => Value::String(s),
        WireValue::List(items) => Value::List(
            items
                .into_iter()
                .map(from_wire)
                .collect::<PackResult<Vec<_>>>()?,
        ),
        WireValue::Dict(entries) => Value::Map(
            entries
                .into_iter()
                .map(|(key, value)| Ok((key, from_wire(value)?)))
                .collect::<PackResult<IndexMap<_, _>>>()?,
        ),
        WireValue::Structure(s) => registry::unpack(s)?,
    })
}

/// Convert a native value into its wire form.
///
/// Domain values become structures via the registry entry selected by the
/// variant (and, for points, by coordinate arity). Graph entities are
/// server-owned and fail with [`PackError::Unsupported`].
pub fn to_wire(value: &Value) -> PackResult<WireValue> {
    Ok(match value {
        Value::Null => WireValue::Null,
        Value::Boolean(b) => WireValue::Boolean(*b),
        Value::Integer(i) => WireValue::Integer(*i),
        Value::Float(f) => WireValue::Float(*f),
        Value::Bytes(b) => WireValue::Bytes(b.clone()),
        Value::String(s) => WireValue::String(s.clone()),
        Value::List(items) => WireValue::List(
            items
                .iter()
                .map(to_wire)
                .collect::<PackResult<Vec<_>>>()?,
        ),
        Value::Map(entries) => WireValue::Dict(
            entries
                .iter()
                .map(|(key, value)| Ok((key.clone(), to_wire(value)?)))
                .collect::<PackResult<IndexMap<_, _>>>()?,
        ),
        Value::Date(_) => registry::pack(tag::DATE, value)?,
        Value::LocalTime(_) => registry::pack(tag::LOCAL_TIME, value)?,
        Value::Time(_) => registry::pack(tag::TIME, value)?,
        Value::LocalDateTime(_) => registry::pack(tag::LOCAL_DATE_TIME, value)?,
        Value::DateTime(_) => registry::pack(tag::DATE_TIME, value)?,
        Value::ZonedDateTime(_) => registry::pack(tag::DATE_TIME_ZONE_ID, value)?,
        Value::Duration(_) => registry::pack(tag::DURATION, value)?,
        Value::Point(p) => registry::pack(
            if p.is_3d() { tag::POINT_3D } else { tag::POINT_2D },
            value,
        )?,
        Value::Node(_) | Value::Relationship(_) | Value::Path(_) => {
            return Err(PackError::Unsupported(value.type_name()))
        }
    })
}

/// Decode a single native value from bytes.
pub fn decode(data: &[u8]) -> PackResult<Value> {
    from_wire(WireReader::new(data).read_value()?)
}

/// Encode a native value to a fresh buffer.
pub fn encode(value: &Value) -> PackResult<BytesMut> {
    let mut writer = WireWriter::new();
    encode_into(&mut writer, value)?;
    Ok(writer.into_bytes())
}

/// Encode a native value into an existing writer, advancing its cursor.
///
/// On failure the writer keeps whatever was written before the error;
/// discarding it is the caller's responsibility.
pub fn encode_into(writer: &mut WireWriter, value: &Value) -> PackResult<()> {
    let wire = to_wire(value)?;
    writer.write_value(&wire)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Duration, Node, OffsetTime, Point, ZonedDateTime};
    use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    fn roundtrip(value: &Value) -> Value {
        decode(&encode(value).unwrap()).unwrap()
    }

    #[test]
    fn scalars_roundtrip() {
        for value in [
            Value::Null,
            Value::Boolean(true),
            Value::Boolean(false),
            Value::Integer(0),
            Value::Integer(i64::MIN),
            Value::Integer(i64::MAX),
            Value::Float(0.0),
            Value::Float(-2.75),
            Value::String(String::new()),
            Value::String("hello world".into()),
            Value::Bytes(vec![]),
            Value::Bytes(vec![0xDE, 0xAD]),
        ] {
            assert_eq!(roundtrip(&value), value);
        }
    }

    #[test]
    fn name_age_map_scenario() {
        let mut map = IndexMap::new();
        map.insert("name".to_string(), Value::from("Alice"));
        map.insert("age".to_string(), Value::from(30));
        let value = Value::Map(map);

        let bytes = encode(&value).unwrap();
        assert_eq!(
            bytes.to_vec(),
            [
                0xA2, // dict, 2 entries
                0x84, b'n', b'a', b'm', b'e', // "name"
                0x85, b'A', b'l', b'i', b'c', b'e', // "Alice"
                0x83, b'a', b'g', b'e', // "age"
                0x1E, // 30
            ]
        );

        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, value);
        let keys: Vec<&str> = decoded
            .as_map()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["name", "age"]);
    }

    #[test]
    fn int_list_scenario() {
        let value = Value::List(vec![Value::from(1), Value::from(2), Value::from(3)]);
        let bytes = encode(&value).unwrap();
        assert_eq!(bytes.to_vec(), [0x93, 0x01, 0x02, 0x03]);
        assert_eq!(decode(&bytes).unwrap(), value);
    }

    #[test]
    fn point_scenario() {
        let value = Value::Point(Point::wgs84_2d(13.4, 52.5));
        let bytes = encode(&value).unwrap();
        // Tiny struct of 3 fields, Point2D tag, then srid as INT_16.
        assert_eq!(&bytes[..4], [0xB3, 0x58, 0xC9, 0x10]);
        assert_eq!(decode(&bytes).unwrap(), value);
    }

    #[test]
    fn encode_is_deterministic() {
        let mut map = IndexMap::new();
        map.insert("b".to_string(), Value::from(1));
        map.insert("a".to_string(), Value::from(2));
        let value = Value::Map(map);

        assert_eq!(
            encode(&value).unwrap().to_vec(),
            encode(&value).unwrap().to_vec()
        );
    }

    #[test]
    fn empty_composites_are_valid() {
        for value in [
            Value::List(vec![]),
            Value::Map(IndexMap::new()),
            Value::String(String::new()),
            Value::Bytes(vec![]),
        ] {
            assert_eq!(roundtrip(&value), value);
        }
    }

    #[test]
    fn deep_nesting_roundtrips() {
        let mut inner = IndexMap::new();
        inner.insert(
            "items".to_string(),
            Value::List(vec![Value::from(1), Value::from(2)]),
        );
        let value = Value::List(vec![
            Value::Map(inner.clone()),
            Value::Map(inner),
            Value::Null,
        ]);
        assert_eq!(roundtrip(&value), value);
    }

    #[test]
    fn temporal_values_roundtrip() {
        let values = [
            Value::Date(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()),
            Value::LocalTime(NaiveTime::from_hms_nano_opt(23, 59, 59, 1).unwrap()),
            Value::Time(OffsetTime::new(
                NaiveTime::from_hms_opt(6, 30, 0).unwrap(),
                5 * 3600 + 1800,
            )),
            Value::LocalDateTime(
                DateTime::from_timestamp(1_700_000_000, 42).unwrap().naive_utc(),
            ),
            Value::DateTime(
                DateTime::from_timestamp(1_700_000_000, 42)
                    .unwrap()
                    .with_timezone(&FixedOffset::east_opt(-8 * 3600).unwrap()),
            ),
            Value::ZonedDateTime(ZonedDateTime::new(
                DateTime::from_timestamp(1_700_000_000, 0).unwrap().naive_utc(),
                "Australia/Eucla",
            )),
            Value::Duration(Duration::new(1, 2, 3, 4)),
        ];
        for value in values {
            assert_eq!(roundtrip(&value), value);
        }
    }

    #[test]
    fn points_roundtrip() {
        for value in [
            Value::Point(Point::cartesian_2d(-1.5, 2.5)),
            Value::Point(Point::cartesian_3d(-1.5, 2.5, 99.0)),
            Value::Point(Point::wgs84_3d(13.4, 52.5, 30.0)),
        ] {
            assert_eq!(roundtrip(&value), value);
        }
    }

    #[test]
    fn graph_entities_do_not_encode() {
        let node = Value::Node(Node::new(1, vec!["Person".into()], IndexMap::new()));
        assert_eq!(
            encode(&node).unwrap_err(),
            PackError::Unsupported("Node")
        );
    }

    #[test]
    fn unknown_structure_tag_fails_decode() {
        // Tiny struct, 0 fields, tag 0xEE.
        let err = decode(&[0xB0, 0xEE]).unwrap_err();
        assert_eq!(err, PackError::UnknownStructTag(0xEE));
    }

    #[test]
    fn arity_mismatch_fails_decode() {
        // Date structure with two integer fields.
        let err = decode(&[0xB2, 0x44, 0x01, 0x02]).unwrap_err();
        assert_eq!(
            err,
            PackError::ArityMismatch {
                tag: 0x44,
                expected: &[1],
                actual: 2,
            }
        );
    }

    #[test]
    fn node_decodes_from_bytes() {
        // Node(1, ["Person"], {"name": "Alice"})
        let data = [
            0xB3, 0x4E, // struct 3 fields, NODE
            0x01, // id 1
            0x91, 0x86, b'P', b'e', b'r', b's', b'o', b'n', // ["Person"]
            0xA1, 0x84, b'n', b'a', b'm', b'e', // {"name":
            0x85, b'A', b'l', b'i', b'c', b'e', // "Alice"}
        ];
        let value = decode(&data).unwrap();
        let node = value.as_node().unwrap();
        assert_eq!(node.id, 1);
        assert_eq!(node.labels, ["Person"]);
        assert_eq!(node.get("name"), Some(&Value::from("Alice")));
    }

    #[test]
    fn encode_into_shares_one_cursor() {
        let mut writer = WireWriter::new();
        encode_into(&mut writer, &Value::from(1)).unwrap();
        encode_into(&mut writer, &Value::from("ab")).unwrap();
        assert_eq!(writer.as_bytes(), [0x01, 0x82, b'a', b'b']);
    }

    #[test]
    fn failed_encode_keeps_partial_output() {
        let mut writer = WireWriter::new();
        encode_into(&mut writer, &Value::from(1)).unwrap();
        let node = Value::Node(Node::new(1, vec![], IndexMap::new()));
        assert!(encode_into(&mut writer, &node).is_err());
        // Prior output is untouched; discarding it is the caller's call.
        assert_eq!(writer.as_bytes(), [0x01]);
    }

    #[test]
    fn wire_list_order_survives_conversion() {
        let wire = WireValue::List(vec![
            WireValue::Integer(3),
            WireValue::Integer(1),
            WireValue::Integer(2),
        ]);
        let value = from_wire(wire).unwrap();
        assert_eq!(
            value.as_list().unwrap(),
            [Value::from(3), Value::from(1), Value::from(2)]
        );
    }
}
