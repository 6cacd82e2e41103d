//! Extension type registry: the closed table mapping structure tags to
//! domain values.
//!
//! Each entry declares the field counts it accepts and a pair of pure
//! functions between wire fields and the native value. Both codec directions
//! go through this table, so adding a domain type means adding one entry
//! here, not touching the dispatch in [`crate::codec`].
//!
//! Graph entities (nodes, relationships, paths) are server-owned: their
//! entries decode but carry no encoder.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta, Timelike};
use indexmap::IndexMap;

use crate::codec;
use crate::error::{PackError, PackResult};
use crate::marker::tag;
use crate::value::{
    Duration, Node, OffsetTime, Path, Point, Relationship, UnboundRelationship, Value,
    ZonedDateTime,
};
use crate::wire::{WireStructure, WireValue};

pub(crate) struct StructDef {
    pub tag: u8,
    pub arity: &'static [usize],
    decode: fn(Vec<WireValue>) -> PackResult<Value>,
    encode: Option<fn(&Value) -> PackResult<Vec<WireValue>>>,
}

static DEFS: &[StructDef] = &[
    StructDef {
        tag: tag::DATE,
        arity: &[1],
        decode: decode_date,
        encode: Some(encode_date),
    },
    StructDef {
        tag: tag::TIME,
        arity: &[2],
        decode: decode_time,
        encode: Some(encode_time),
    },
    StructDef {
        tag: tag::LOCAL_TIME,
        arity: &[1],
        decode: decode_local_time,
        encode: Some(encode_local_time),
    },
    StructDef {
        tag: tag::DATE_TIME,
        arity: &[3],
        decode: decode_date_time,
        encode: Some(encode_date_time),
    },
    StructDef {
        tag: tag::DATE_TIME_ZONE_ID,
        arity: &[3],
        decode: decode_zoned_date_time,
        encode: Some(encode_zoned_date_time),
    },
    StructDef {
        tag: tag::LOCAL_DATE_TIME,
        arity: &[2],
        decode: decode_local_date_time,
        encode: Some(encode_local_date_time),
    },
    StructDef {
        tag: tag::DURATION,
        arity: &[4],
        decode: decode_duration,
        encode: Some(encode_duration),
    },
    StructDef {
        tag: tag::POINT_2D,
        arity: &[3],
        decode: decode_point_2d,
        encode: Some(encode_point_2d),
    },
    StructDef {
        tag: tag::POINT_3D,
        arity: &[4],
        decode: decode_point_3d,
        encode: Some(encode_point_3d),
    },
    StructDef {
        tag: tag::NODE,
        arity: &[3, 4],
        decode: decode_node,
        encode: None,
    },
    StructDef {
        tag: tag::RELATIONSHIP,
        arity: &[5, 8],
        decode: decode_relationship,
        encode: None,
    },
    StructDef {
        tag: tag::PATH,
        arity: &[3],
        decode: decode_path,
        encode: None,
    },
];

// Arity of unbound relationships nested inside paths; not a top-level entry
// because the wire never carries one outside a path structure.
const UNBOUND_REL_ARITY: &[usize] = &[3, 4];

pub(crate) fn lookup(tag: u8) -> Option<&'static StructDef> {
    DEFS.iter().find(|def| def.tag == tag)
}

/// Decode a structure through its registry entry. Unknown tags and arity
/// mismatches fail before any field is touched.
pub(crate) fn unpack(s: WireStructure) -> PackResult<Value> {
    let def = lookup(s.tag).ok_or(PackError::UnknownStructTag(s.tag))?;
    (def.decode)(checked_fields(s, def.arity)?)
}

/// Encode a domain value as the structure identified by `tag`.
pub(crate) fn pack(tag: u8, value: &Value) -> PackResult<WireValue> {
    let def = lookup(tag).ok_or(PackError::UnknownStructTag(tag))?;
    let encode = def.encode.ok_or(PackError::Unsupported(value.type_name()))?;
    Ok(WireValue::Structure(WireStructure::new(tag, encode(value)?)))
}

fn checked_fields(s: WireStructure, arity: &'static [usize]) -> PackResult<Vec<WireValue>> {
    if arity.contains(&s.fields.len()) {
        Ok(s.fields)
    } else {
        Err(PackError::ArityMismatch {
            tag: s.tag,
            expected: arity,
            actual: s.fields.len(),
        })
    }
}

// ---------------------------------------------------------------------------
// Field extraction
// ---------------------------------------------------------------------------

fn take_int(tag: u8, index: usize, field: Option<WireValue>) -> PackResult<i64> {
    match field {
        Some(WireValue::Integer(i)) => Ok(i),
        _ => Err(PackError::FieldType {
            tag,
            index,
            expected: "Integer",
        }),
    }
}

fn take_float(tag: u8, index: usize, field: Option<WireValue>) -> PackResult<f64> {
    match field {
        Some(WireValue::Float(f)) => Ok(f),
        _ => Err(PackError::FieldType {
            tag,
            index,
            expected: "Float",
        }),
    }
}

fn take_string(tag: u8, index: usize, field: Option<WireValue>) -> PackResult<String> {
    match field {
        Some(WireValue::String(s)) => Ok(s),
        _ => Err(PackError::FieldType {
            tag,
            index,
            expected: "String",
        }),
    }
}

fn take_list(tag: u8, index: usize, field: Option<WireValue>) -> PackResult<Vec<WireValue>> {
    match field {
        Some(WireValue::List(items)) => Ok(items),
        _ => Err(PackError::FieldType {
            tag,
            index,
            expected: "List",
        }),
    }
}

fn take_string_list(tag: u8, index: usize, field: Option<WireValue>) -> PackResult<Vec<String>> {
    take_list(tag, index, field)?
        .into_iter()
        .map(|item| match item {
            WireValue::String(s) => Ok(s),
            _ => Err(PackError::FieldType {
                tag,
                index,
                expected: "List<String>",
            }),
        })
        .collect()
}

fn take_properties(
    tag: u8,
    index: usize,
    field: Option<WireValue>,
) -> PackResult<IndexMap<String, Value>> {
    match field {
        Some(WireValue::Dict(entries)) => entries
            .into_iter()
            .map(|(k, v)| Ok((k, codec::from_wire(v)?)))
            .collect(),
        _ => Err(PackError::FieldType {
            tag,
            index,
            expected: "Dict",
        }),
    }
}

fn narrow_i32(value: i64, what: &'static str) -> PackResult<i32> {
    i32::try_from(value).map_err(|_| PackError::OutOfRange(what))
}

// ---------------------------------------------------------------------------
// Temporal conversions
// ---------------------------------------------------------------------------

const NANOS_PER_SEC: i64 = 1_000_000_000;

fn epoch_date() -> NaiveDate {
    DateTime::UNIX_EPOCH.date_naive()
}

fn nanos_of_day(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight()) * NANOS_PER_SEC + i64::from(time.nanosecond())
}

fn time_of_day(nanos: i64, what: &'static str) -> PackResult<NaiveTime> {
    if nanos < 0 {
        return Err(PackError::OutOfRange(what));
    }
    let secs = u32::try_from(nanos / NANOS_PER_SEC).map_err(|_| PackError::OutOfRange(what))?;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, (nanos % NANOS_PER_SEC) as u32)
        .ok_or(PackError::OutOfRange(what))
}

fn instant(seconds: i64, nanos: i64, what: &'static str) -> PackResult<DateTime<chrono::Utc>> {
    let nanos = u32::try_from(nanos).map_err(|_| PackError::OutOfRange(what))?;
    DateTime::from_timestamp(seconds, nanos).ok_or(PackError::OutOfRange(what))
}

fn decode_date(fields: Vec<WireValue>) -> PackResult<Value> {
    let mut it = fields.into_iter();
    let days = take_int(tag::DATE, 0, it.next())?;
    let delta = TimeDelta::try_days(days).ok_or(PackError::OutOfRange("date"))?;
    let date = epoch_date()
        .checked_add_signed(delta)
        .ok_or(PackError::OutOfRange("date"))?;
    Ok(Value::Date(date))
}

fn encode_date(value: &Value) -> PackResult<Vec<WireValue>> {
    match value {
        Value::Date(date) => {
            let days = date.signed_duration_since(epoch_date()).num_days();
            Ok(vec![WireValue::Integer(days)])
        }
        other => Err(PackError::Unsupported(other.type_name())),
    }
}

fn decode_time(fields: Vec<WireValue>) -> PackResult<Value> {
    let mut it = fields.into_iter();
    let nanos = take_int(tag::TIME, 0, it.next())?;
    let offset = narrow_i32(take_int(tag::TIME, 1, it.next())?, "utc offset")?;
    Ok(Value::Time(OffsetTime::new(
        time_of_day(nanos, "time of day")?,
        offset,
    )))
}

fn encode_time(value: &Value) -> PackResult<Vec<WireValue>> {
    match value {
        Value::Time(t) => Ok(vec![
            WireValue::Integer(nanos_of_day(t.time)),
            WireValue::Integer(i64::from(t.offset_seconds)),
        ]),
        other => Err(PackError::Unsupported(other.type_name())),
    }
}

fn decode_local_time(fields: Vec<WireValue>) -> PackResult<Value> {
    let mut it = fields.into_iter();
    let nanos = take_int(tag::LOCAL_TIME, 0, it.next())?;
    Ok(Value::LocalTime(time_of_day(nanos, "time of day")?))
}

fn encode_local_time(value: &Value) -> PackResult<Vec<WireValue>> {
    match value {
        Value::LocalTime(t) => Ok(vec![WireValue::Integer(nanos_of_day(*t))]),
        other => Err(PackError::Unsupported(other.type_name())),
    }
}

fn decode_date_time(fields: Vec<WireValue>) -> PackResult<Value> {
    let mut it = fields.into_iter();
    let seconds = take_int(tag::DATE_TIME, 0, it.next())?;
    let nanos = take_int(tag::DATE_TIME, 1, it.next())?;
    let offset_seconds = narrow_i32(take_int(tag::DATE_TIME, 2, it.next())?, "utc offset")?;
    let offset =
        FixedOffset::east_opt(offset_seconds).ok_or(PackError::OutOfRange("utc offset"))?;
    let utc = instant(seconds, nanos, "datetime")?;
    Ok(Value::DateTime(utc.with_timezone(&offset)))
}

fn encode_date_time(value: &Value) -> PackResult<Vec<WireValue>> {
    match value {
        Value::DateTime(dt) => Ok(vec![
            WireValue::Integer(dt.timestamp()),
            WireValue::Integer(i64::from(dt.timestamp_subsec_nanos())),
            WireValue::Integer(i64::from(dt.offset().local_minus_utc())),
        ]),
        other => Err(PackError::Unsupported(other.type_name())),
    }
}

fn decode_zoned_date_time(fields: Vec<WireValue>) -> PackResult<Value> {
    let mut it = fields.into_iter();
    let seconds = take_int(tag::DATE_TIME_ZONE_ID, 0, it.next())?;
    let nanos = take_int(tag::DATE_TIME_ZONE_ID, 1, it.next())?;
    let zone_id = take_string(tag::DATE_TIME_ZONE_ID, 2, it.next())?;
    let utc = instant(seconds, nanos, "datetime")?;
    Ok(Value::ZonedDateTime(ZonedDateTime::new(
        utc.naive_utc(),
        zone_id,
    )))
}

fn encode_zoned_date_time(value: &Value) -> PackResult<Vec<WireValue>> {
    match value {
        Value::ZonedDateTime(z) => {
            let utc = z.datetime.and_utc();
            Ok(vec![
                WireValue::Integer(utc.timestamp()),
                WireValue::Integer(i64::from(utc.timestamp_subsec_nanos())),
                WireValue::String(z.zone_id.clone()),
            ])
        }
        other => Err(PackError::Unsupported(other.type_name())),
    }
}

fn decode_local_date_time(fields: Vec<WireValue>) -> PackResult<Value> {
    let mut it = fields.into_iter();
    let seconds = take_int(tag::LOCAL_DATE_TIME, 0, it.next())?;
    let nanos = take_int(tag::LOCAL_DATE_TIME, 1, it.next())?;
    Ok(Value::LocalDateTime(
        instant(seconds, nanos, "datetime")?.naive_utc(),
    ))
}

fn encode_local_date_time(value: &Value) -> PackResult<Vec<WireValue>> {
    match value {
        Value::LocalDateTime(dt) => {
            let utc = dt.and_utc();
            Ok(vec![
                WireValue::Integer(utc.timestamp()),
                WireValue::Integer(i64::from(utc.timestamp_subsec_nanos())),
            ])
        }
        other => Err(PackError::Unsupported(other.type_name())),
    }
}

fn decode_duration(fields: Vec<WireValue>) -> PackResult<Value> {
    let mut it = fields.into_iter();
    Ok(Value::Duration(Duration::new(
        take_int(tag::DURATION, 0, it.next())?,
        take_int(tag::DURATION, 1, it.next())?,
        take_int(tag::DURATION, 2, it.next())?,
        take_int(tag::DURATION, 3, it.next())?,
    )))
}

fn encode_duration(value: &Value) -> PackResult<Vec<WireValue>> {
    match value {
        Value::Duration(d) => Ok(vec![
            WireValue::Integer(d.months),
            WireValue::Integer(d.days),
            WireValue::Integer(d.seconds),
            WireValue::Integer(d.nanoseconds),
        ]),
        other => Err(PackError::Unsupported(other.type_name())),
    }
}

// ---------------------------------------------------------------------------
// Spatial conversions
// ---------------------------------------------------------------------------

fn decode_point_2d(fields: Vec<WireValue>) -> PackResult<Value> {
    let mut it = fields.into_iter();
    let srid = narrow_i32(take_int(tag::POINT_2D, 0, it.next())?, "srid")?;
    let x = take_float(tag::POINT_2D, 1, it.next())?;
    let y = take_float(tag::POINT_2D, 2, it.next())?;
    Ok(Value::Point(Point::new_2d(srid, x, y)))
}

fn encode_point_2d(value: &Value) -> PackResult<Vec<WireValue>> {
    match value {
        Value::Point(p) if p.z.is_none() => Ok(vec![
            WireValue::Integer(i64::from(p.srid)),
            WireValue::Float(p.x),
            WireValue::Float(p.y),
        ]),
        other => Err(PackError::Unsupported(other.type_name())),
    }
}

fn decode_point_3d(fields: Vec<WireValue>) -> PackResult<Value> {
    let mut it = fields.into_iter();
    let srid = narrow_i32(take_int(tag::POINT_3D, 0, it.next())?, "srid")?;
    let x = take_float(tag::POINT_3D, 1, it.next())?;
    let y = take_float(tag::POINT_3D, 2, it.next())?;
    let z = take_float(tag::POINT_3D, 3, it.next())?;
    Ok(Value::Point(Point::new_3d(srid, x, y, z)))
}

fn encode_point_3d(value: &Value) -> PackResult<Vec<WireValue>> {
    match value {
        Value::Point(p) => match p.z {
            Some(z) => Ok(vec![
                WireValue::Integer(i64::from(p.srid)),
                WireValue::Float(p.x),
                WireValue::Float(p.y),
                WireValue::Float(z),
            ]),
            None => Err(PackError::Unsupported(value.type_name())),
        },
        other => Err(PackError::Unsupported(other.type_name())),
    }
}

// ---------------------------------------------------------------------------
// Graph entities (decode only)
// ---------------------------------------------------------------------------

fn decode_node(fields: Vec<WireValue>) -> PackResult<Value> {
    Ok(Value::Node(node_from_fields(fields)?))
}

fn node_from_fields(fields: Vec<WireValue>) -> PackResult<Node> {
    let has_element_id = fields.len() == 4;
    let mut it = fields.into_iter();
    let mut node = Node::new(
        take_int(tag::NODE, 0, it.next())?,
        take_string_list(tag::NODE, 1, it.next())?,
        take_properties(tag::NODE, 2, it.next())?,
    );
    if has_element_id {
        node.element_id = Some(take_string(tag::NODE, 3, it.next())?);
    }
    Ok(node)
}

fn decode_relationship(fields: Vec<WireValue>) -> PackResult<Value> {
    let has_element_ids = fields.len() == 8;
    let mut it = fields.into_iter();
    let mut rel = Relationship::new(
        take_int(tag::RELATIONSHIP, 0, it.next())?,
        take_int(tag::RELATIONSHIP, 1, it.next())?,
        take_int(tag::RELATIONSHIP, 2, it.next())?,
        take_string(tag::RELATIONSHIP, 3, it.next())?,
        take_properties(tag::RELATIONSHIP, 4, it.next())?,
    );
    if has_element_ids {
        rel.element_id = Some(take_string(tag::RELATIONSHIP, 5, it.next())?);
        rel.start_node_element_id = Some(take_string(tag::RELATIONSHIP, 6, it.next())?);
        rel.end_node_element_id = Some(take_string(tag::RELATIONSHIP, 7, it.next())?);
    }
    Ok(Value::Relationship(rel))
}

fn unbound_rel_from_wire(value: WireValue) -> PackResult<UnboundRelationship> {
    let s = match value {
        WireValue::Structure(s) if s.tag == tag::UNBOUND_RELATIONSHIP => s,
        _ => {
            return Err(PackError::FieldType {
                tag: tag::PATH,
                index: 1,
                expected: "List<UnboundRelationship>",
            })
        }
    };
    let fields = checked_fields(s, UNBOUND_REL_ARITY)?;
    let has_element_id = fields.len() == 4;
    let mut it = fields.into_iter();
    let mut rel = UnboundRelationship {
        id: take_int(tag::UNBOUND_RELATIONSHIP, 0, it.next())?,
        rel_type: take_string(tag::UNBOUND_RELATIONSHIP, 1, it.next())?,
        properties: take_properties(tag::UNBOUND_RELATIONSHIP, 2, it.next())?,
        element_id: None,
    };
    if has_element_id {
        rel.element_id = Some(take_string(tag::UNBOUND_RELATIONSHIP, 3, it.next())?);
    }
    Ok(rel)
}

fn node_from_wire(value: WireValue) -> PackResult<Node> {
    match value {
        WireValue::Structure(s) if s.tag == tag::NODE => {
            node_from_fields(checked_fields(s, &[3, 4])?)
        }
        _ => Err(PackError::FieldType {
            tag: tag::PATH,
            index: 0,
            expected: "List<Node>",
        }),
    }
}

fn decode_path(fields: Vec<WireValue>) -> PackResult<Value> {
    let mut it = fields.into_iter();
    let nodes = take_list(tag::PATH, 0, it.next())?
        .into_iter()
        .map(node_from_wire)
        .collect::<PackResult<Vec<_>>>()?;
    let relationships = take_list(tag::PATH, 1, it.next())?
        .into_iter()
        .map(unbound_rel_from_wire)
        .collect::<PackResult<Vec<_>>>()?;
    let indices = take_list(tag::PATH, 2, it.next())?
        .into_iter()
        .map(|item| {
            item.as_int().ok_or(PackError::FieldType {
                tag: tag::PATH,
                index: 2,
                expected: "List<Integer>",
            })
        })
        .collect::<PackResult<Vec<_>>>()?;
    Ok(Value::Path(Path {
        nodes,
        relationships,
        indices,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn structure(tag: u8, fields: Vec<WireValue>) -> WireStructure {
        WireStructure::new(tag, fields)
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = unpack(structure(0xEE, vec![])).unwrap_err();
        assert_eq!(err, PackError::UnknownStructTag(0xEE));
    }

    #[test]
    fn arity_is_checked_before_fields() {
        let err = unpack(structure(
            tag::DATE,
            vec![WireValue::Integer(1), WireValue::Integer(2)],
        ))
        .unwrap_err();
        assert_eq!(
            err,
            PackError::ArityMismatch {
                tag: tag::DATE,
                expected: &[1],
                actual: 2,
            }
        );
    }

    #[test]
    fn field_type_is_checked() {
        let err = unpack(structure(tag::DATE, vec![WireValue::Float(1.0)])).unwrap_err();
        assert_eq!(
            err,
            PackError::FieldType {
                tag: tag::DATE,
                index: 0,
                expected: "Integer",
            }
        );
    }

    #[test]
    fn date_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let wire = pack(tag::DATE, &Value::Date(date)).unwrap();
        assert_eq!(
            wire.as_structure().unwrap().fields,
            vec![WireValue::Integer(18628)]
        );
        assert_eq!(
            unpack(wire.as_structure().unwrap().clone()).unwrap(),
            Value::Date(date)
        );
    }

    #[test]
    fn pre_epoch_date() {
        let date = NaiveDate::from_ymd_opt(1969, 12, 31).unwrap();
        let wire = pack(tag::DATE, &Value::Date(date)).unwrap();
        assert_eq!(
            wire.as_structure().unwrap().fields,
            vec![WireValue::Integer(-1)]
        );
    }

    #[test]
    fn local_time_roundtrip() {
        let time = NaiveTime::from_hms_nano_opt(13, 37, 42, 999).unwrap();
        let wire = pack(tag::LOCAL_TIME, &Value::LocalTime(time)).unwrap();
        let expected_nanos = ((13 * 3600 + 37 * 60 + 42) as i64) * NANOS_PER_SEC + 999;
        assert_eq!(
            wire.as_structure().unwrap().fields,
            vec![WireValue::Integer(expected_nanos)]
        );
        assert_eq!(
            unpack(wire.as_structure().unwrap().clone()).unwrap(),
            Value::LocalTime(time)
        );
    }

    #[test]
    fn negative_time_of_day_is_rejected() {
        let err = unpack(structure(tag::LOCAL_TIME, vec![WireValue::Integer(-1)])).unwrap_err();
        assert_eq!(err, PackError::OutOfRange("time of day"));
    }

    #[test]
    fn offset_time_roundtrip() {
        let value = Value::Time(OffsetTime::new(
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            -5 * 3600,
        ));
        let wire = pack(tag::TIME, &value).unwrap();
        assert_eq!(unpack(wire.as_structure().unwrap().clone()).unwrap(), value);
    }

    #[test]
    fn date_time_roundtrip() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let dt = DateTime::from_timestamp(1_609_459_200, 500)
            .unwrap()
            .with_timezone(&offset);
        let value = Value::DateTime(dt);
        let wire = pack(tag::DATE_TIME, &value).unwrap();
        assert_eq!(
            wire.as_structure().unwrap().fields,
            vec![
                WireValue::Integer(1_609_459_200),
                WireValue::Integer(500),
                WireValue::Integer(7200),
            ]
        );
        assert_eq!(unpack(wire.as_structure().unwrap().clone()).unwrap(), value);
    }

    #[test]
    fn zoned_date_time_roundtrip() {
        let value = Value::ZonedDateTime(ZonedDateTime::new(
            DateTime::from_timestamp(1_609_459_200, 0).unwrap().naive_utc(),
            "Europe/Berlin",
        ));
        let wire = pack(tag::DATE_TIME_ZONE_ID, &value).unwrap();
        assert_eq!(unpack(wire.as_structure().unwrap().clone()).unwrap(), value);
    }

    #[test]
    fn local_date_time_roundtrip() {
        let dt = DateTime::from_timestamp(86_400, 123).unwrap().naive_utc();
        let value = Value::LocalDateTime(dt);
        let wire = pack(tag::LOCAL_DATE_TIME, &value).unwrap();
        assert_eq!(unpack(wire.as_structure().unwrap().clone()).unwrap(), value);
    }

    #[test]
    fn duration_roundtrip() {
        let value = Value::Duration(Duration::new(12, 30, 3600, 500));
        let wire = pack(tag::DURATION, &value).unwrap();
        assert_eq!(unpack(wire.as_structure().unwrap().clone()).unwrap(), value);
    }

    #[test]
    fn point_2d_roundtrip() {
        let value = Value::Point(Point::wgs84_2d(13.4, 52.5));
        let wire = pack(tag::POINT_2D, &value).unwrap();
        let s = wire.as_structure().unwrap();
        assert_eq!(s.fields[0], WireValue::Integer(4326));
        assert_eq!(unpack(s.clone()).unwrap(), value);
    }

    #[test]
    fn point_3d_roundtrip() {
        let value = Value::Point(Point::cartesian_3d(1.0, 2.0, 3.0));
        let wire = pack(tag::POINT_3D, &value).unwrap();
        assert_eq!(unpack(wire.as_structure().unwrap().clone()).unwrap(), value);
    }

    #[test]
    fn point_coordinates_must_be_floats() {
        let err = unpack(structure(
            tag::POINT_2D,
            vec![
                WireValue::Integer(4326),
                WireValue::Integer(1),
                WireValue::Float(2.0),
            ],
        ))
        .unwrap_err();
        assert_eq!(
            err,
            PackError::FieldType {
                tag: tag::POINT_2D,
                index: 1,
                expected: "Float",
            }
        );
    }

    #[test]
    fn graph_entities_have_no_encoder() {
        let node = Value::Node(Node::new(1, vec![], IndexMap::new()));
        assert_eq!(
            pack(tag::NODE, &node).unwrap_err(),
            PackError::Unsupported("Node")
        );
    }

    fn node_structure(id: i64, label: &str) -> WireValue {
        WireValue::Structure(structure(
            tag::NODE,
            vec![
                WireValue::Integer(id),
                WireValue::List(vec![WireValue::String(label.into())]),
                WireValue::Dict(IndexMap::new()),
            ],
        ))
    }

    #[test]
    fn node_decodes() {
        let mut props = IndexMap::new();
        props.insert("name".to_string(), WireValue::String("Alice".into()));
        let value = unpack(structure(
            tag::NODE,
            vec![
                WireValue::Integer(1),
                WireValue::List(vec![WireValue::String("Person".into())]),
                WireValue::Dict(props),
            ],
        ))
        .unwrap();

        let node = value.as_node().unwrap();
        assert_eq!(node.id, 1);
        assert_eq!(node.labels, ["Person"]);
        assert_eq!(node.get("name"), Some(&Value::from("Alice")));
        assert_eq!(node.element_id, None);
    }

    #[test]
    fn node_with_element_id_decodes() {
        let value = unpack(structure(
            tag::NODE,
            vec![
                WireValue::Integer(1),
                WireValue::List(vec![]),
                WireValue::Dict(IndexMap::new()),
                WireValue::String("4:abc:1".into()),
            ],
        ))
        .unwrap();
        assert_eq!(
            value.as_node().unwrap().element_id.as_deref(),
            Some("4:abc:1")
        );
    }

    #[test]
    fn node_arity_mismatch() {
        let err = unpack(structure(tag::NODE, vec![WireValue::Integer(1)])).unwrap_err();
        assert_eq!(
            err,
            PackError::ArityMismatch {
                tag: tag::NODE,
                expected: &[3, 4],
                actual: 1,
            }
        );
    }

    #[test]
    fn relationship_decodes() {
        let value = unpack(structure(
            tag::RELATIONSHIP,
            vec![
                WireValue::Integer(9),
                WireValue::Integer(1),
                WireValue::Integer(2),
                WireValue::String("KNOWS".into()),
                WireValue::Dict(IndexMap::new()),
            ],
        ))
        .unwrap();

        let rel = value.as_relationship().unwrap();
        assert_eq!(rel.id, 9);
        assert_eq!(rel.start_node_id, 1);
        assert_eq!(rel.end_node_id, 2);
        assert_eq!(rel.rel_type, "KNOWS");
    }

    #[test]
    fn relationship_with_element_ids_decodes() {
        let value = unpack(structure(
            tag::RELATIONSHIP,
            vec![
                WireValue::Integer(9),
                WireValue::Integer(1),
                WireValue::Integer(2),
                WireValue::String("KNOWS".into()),
                WireValue::Dict(IndexMap::new()),
                WireValue::String("5:abc:9".into()),
                WireValue::String("4:abc:1".into()),
                WireValue::String("4:abc:2".into()),
            ],
        ))
        .unwrap();

        let rel = value.as_relationship().unwrap();
        assert_eq!(rel.element_id.as_deref(), Some("5:abc:9"));
        assert_eq!(rel.start_node_element_id.as_deref(), Some("4:abc:1"));
        assert_eq!(rel.end_node_element_id.as_deref(), Some("4:abc:2"));
    }

    #[test]
    fn path_decodes() {
        let unbound = WireValue::Structure(structure(
            tag::UNBOUND_RELATIONSHIP,
            vec![
                WireValue::Integer(9),
                WireValue::String("KNOWS".into()),
                WireValue::Dict(IndexMap::new()),
            ],
        ));
        let value = unpack(structure(
            tag::PATH,
            vec![
                WireValue::List(vec![node_structure(1, "Person"), node_structure(2, "Person")]),
                WireValue::List(vec![unbound]),
                WireValue::List(vec![WireValue::Integer(1), WireValue::Integer(1)]),
            ],
        ))
        .unwrap();

        let path = value.as_path().unwrap();
        assert_eq!(path.nodes.len(), 2);
        assert_eq!(path.relationships.len(), 1);
        assert_eq!(path.relationships[0].rel_type, "KNOWS");
        assert_eq!(path.indices, [1, 1]);
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn path_unbound_relationship_carries_element_id() {
        let unbound = WireValue::Structure(structure(
            tag::UNBOUND_RELATIONSHIP,
            vec![
                WireValue::Integer(9),
                WireValue::String("KNOWS".into()),
                WireValue::Dict(IndexMap::new()),
                WireValue::String("5:abc:9".into()),
            ],
        ));
        let value = unpack(structure(
            tag::PATH,
            vec![
                WireValue::List(vec![node_structure(1, "Person"), node_structure(2, "Person")]),
                WireValue::List(vec![unbound]),
                WireValue::List(vec![WireValue::Integer(1), WireValue::Integer(1)]),
            ],
        ))
        .unwrap();

        let path = value.as_path().unwrap();
        assert_eq!(path.relationships[0].element_id.as_deref(), Some("5:abc:9"));
    }

    #[test]
    fn path_rejects_wrong_nested_structure() {
        let err = unpack(structure(
            tag::PATH,
            vec![
                WireValue::List(vec![WireValue::Integer(1)]),
                WireValue::List(vec![]),
                WireValue::List(vec![]),
            ],
        ))
        .unwrap_err();
        assert_eq!(
            err,
            PackError::FieldType {
                tag: tag::PATH,
                index: 0,
                expected: "List<Node>",
            }
        );
    }

    #[test]
    fn unbound_relationship_is_not_a_top_level_type() {
        let err = unpack(structure(tag::UNBOUND_RELATIONSHIP, vec![])).unwrap_err();
        assert_eq!(err, PackError::UnknownStructTag(tag::UNBOUND_RELATIONSHIP));
    }
}
