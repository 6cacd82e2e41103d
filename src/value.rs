//! Native value model: what decoded wire values become in memory.
//!
//! [`Value`] is a closed sum type; both codec directions dispatch on it with
//! exhaustive matches, so adding a variant forces every dispatch site to be
//! revisited at compile time.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{PackError, PackResult};

/// A decoded value.
///
/// Scalars and collections map one-to-one onto wire types. The remaining
/// variants come from wire structures: temporal and spatial values round-trip
/// through the codec, while graph entities ([`Node`], [`Relationship`],
/// [`Path`]) are produced by decode only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absence of a value.
    Null,
    /// Boolean.
    Boolean(bool),
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit float.
    Float(f64),
    /// Byte array.
    Bytes(Vec<u8>),
    /// UTF-8 string.
    String(String),
    /// Ordered list.
    List(Vec<Value>),
    /// String-keyed map, insertion order preserved.
    Map(IndexMap<String, Value>),
    /// Graph node.
    Node(Node),
    /// Graph relationship.
    Relationship(Relationship),
    /// Graph path.
    Path(Path),
    /// 2D or 3D spatial point.
    Point(Point),
    /// Calendar date.
    Date(NaiveDate),
    /// Time of day without a zone.
    LocalTime(NaiveTime),
    /// Time of day with a UTC offset.
    Time(OffsetTime),
    /// Date-time without a zone.
    LocalDateTime(NaiveDateTime),
    /// Date-time with a fixed UTC offset.
    DateTime(DateTime<FixedOffset>),
    /// Date-time with a named time zone.
    ZonedDateTime(ZonedDateTime),
    /// Calendar-aware duration.
    Duration(Duration),
}

impl Value {
    /// Whether this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Boolean payload, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer payload, if any.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Float payload; integer values are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// String payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Byte-array payload, if any.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// List payload, if any.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Map payload, if any.
    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Node payload, if any.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(n) => Some(n),
            _ => None,
        }
    }

    /// Relationship payload, if any.
    pub fn as_relationship(&self) -> Option<&Relationship> {
        match self {
            Value::Relationship(r) => Some(r),
            _ => None,
        }
    }

    /// Path payload, if any.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Value::Path(p) => Some(p),
            _ => None,
        }
    }

    /// Name of the value kind, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Bytes(_) => "Bytes",
            Value::String(_) => "String",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Node(_) => "Node",
            Value::Relationship(_) => "Relationship",
            Value::Path(_) => "Path",
            Value::Point(_) => "Point",
            Value::Date(_) => "Date",
            Value::LocalTime(_) => "LocalTime",
            Value::Time(_) => "Time",
            Value::LocalDateTime(_) => "LocalDateTime",
            Value::DateTime(_) => "DateTime",
            Value::ZonedDateTime(_) => "ZonedDateTime",
            Value::Duration(_) => "Duration",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Value::String(s) => write!(f, "{s:?}"),
            Value::List(items) => write!(f, "[{} items]", items.len()),
            Value::Map(entries) => write!(f, "{{{} entries}}", entries.len()),
            Value::Node(n) => write!(f, "{n}"),
            Value::Relationship(r) => write!(f, "{r}"),
            Value::Path(p) => write!(f, "{p}"),
            Value::Point(p) => write!(f, "{p}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::LocalTime(t) => write!(f, "{t}"),
            Value::Time(t) => write!(f, "{t}"),
            Value::LocalDateTime(dt) => write!(f, "{dt}"),
            Value::DateTime(dt) => write!(f, "{dt}"),
            Value::ZonedDateTime(dt) => write!(f, "{dt}"),
            Value::Duration(d) => write!(f, "{d}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(v: IndexMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

impl From<Point> for Value {
    fn from(v: Point) -> Self {
        Value::Point(v)
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Value::Duration(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

/// A graph node: identity, labels, and properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// Node id.
    pub id: i64,
    /// Labels, in server order.
    pub labels: Vec<String>,
    /// Properties.
    pub properties: IndexMap<String, Value>,
    /// Element id sent by newer servers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
}

impl Node {
    /// Build a node without an element id.
    pub fn new(id: i64, labels: Vec<String>, properties: IndexMap<String, Value>) -> Self {
        Self {
            id,
            labels,
            properties,
            element_id: None,
        }
    }

    /// Whether the node carries the given label.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Property lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            write!(f, "({})", self.id)
        } else {
            write!(f, "({}:{})", self.id, self.labels.join(":"))
        }
    }
}

/// A graph relationship bound to its endpoint nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relationship {
    /// Relationship id.
    pub id: i64,
    /// Start node id.
    pub start_node_id: i64,
    /// End node id.
    pub end_node_id: i64,
    /// Relationship type.
    #[serde(rename = "type")]
    pub rel_type: String,
    /// Properties.
    pub properties: IndexMap<String, Value>,
    /// Element id sent by newer servers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    /// Start node element id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_node_element_id: Option<String>,
    /// End node element id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_node_element_id: Option<String>,
}

impl Relationship {
    /// Build a relationship without element ids.
    pub fn new(
        id: i64,
        start_node_id: i64,
        end_node_id: i64,
        rel_type: String,
        properties: IndexMap<String, Value>,
    ) -> Self {
        Self {
            id,
            start_node_id,
            end_node_id,
            rel_type,
            properties,
            element_id: None,
            start_node_element_id: None,
            end_node_element_id: None,
        }
    }

    /// Property lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({})-[:{}]->({})",
            self.start_node_id, self.rel_type, self.end_node_id
        )
    }
}

/// A relationship stripped of its endpoints, as paths carry them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnboundRelationship {
    /// Relationship id.
    pub id: i64,
    /// Relationship type.
    #[serde(rename = "type")]
    pub rel_type: String,
    /// Properties.
    pub properties: IndexMap<String, Value>,
    /// Element id sent by newer servers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
}

/// A graph path: the nodes visited, the relationships traversed, and the
/// index sequence describing the traversal order and direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    /// Distinct nodes appearing in the path.
    pub nodes: Vec<Node>,
    /// Distinct relationships appearing in the path, without endpoints.
    pub relationships: Vec<UnboundRelationship>,
    /// Alternating relationship/node indices; negative relationship indices
    /// mark reversed traversal.
    pub indices: Vec<i64>,
}

impl Path {
    /// Path length in relationships traversed.
    pub fn len(&self) -> usize {
        self.indices.len() / 2
    }

    /// Whether the path has no relationships.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// First node of the path.
    pub fn start(&self) -> Option<&Node> {
        self.nodes.first()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<path: {} nodes, {} rels>",
            self.nodes.len(),
            self.relationships.len()
        )
    }
}

/// A spatial point: SRID plus 2 or 3 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// Spatial reference system identifier.
    pub srid: i32,
    /// X coordinate (longitude for geographic SRIDs).
    pub x: f64,
    /// Y coordinate (latitude for geographic SRIDs).
    pub y: f64,
    /// Z coordinate, present only for 3D points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Point {
    /// 2D point.
    pub fn new_2d(srid: i32, x: f64, y: f64) -> Self {
        Self { srid, x, y, z: None }
    }

    /// 3D point.
    pub fn new_3d(srid: i32, x: f64, y: f64, z: f64) -> Self {
        Self {
            srid,
            x,
            y,
            z: Some(z),
        }
    }

    /// Build from a coordinate slice; anything but 2 or 3 coordinates fails.
    pub fn from_coordinates(srid: i32, coordinates: &[f64]) -> PackResult<Self> {
        match *coordinates {
            [x, y] => Ok(Self::new_2d(srid, x, y)),
            [x, y, z] => Ok(Self::new_3d(srid, x, y, z)),
            _ => Err(PackError::InvalidPointArity(coordinates.len())),
        }
    }

    /// WGS84 2D point (longitude, latitude).
    pub fn wgs84_2d(longitude: f64, latitude: f64) -> Self {
        Self::new_2d(4326, longitude, latitude)
    }

    /// WGS84 3D point (longitude, latitude, height).
    pub fn wgs84_3d(longitude: f64, latitude: f64, height: f64) -> Self {
        Self::new_3d(4979, longitude, latitude, height)
    }

    /// Cartesian 2D point.
    pub fn cartesian_2d(x: f64, y: f64) -> Self {
        Self::new_2d(7203, x, y)
    }

    /// Cartesian 3D point.
    pub fn cartesian_3d(x: f64, y: f64, z: f64) -> Self {
        Self::new_3d(9157, x, y, z)
    }

    /// Whether the point has a Z coordinate.
    pub fn is_3d(&self) -> bool {
        self.z.is_some()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.z {
            Some(z) => write!(
                f,
                "point(srid={}, x={}, y={}, z={})",
                self.srid, self.x, self.y, z
            ),
            None => write!(f, "point(srid={}, x={}, y={})", self.srid, self.x, self.y),
        }
    }
}

/// A time of day paired with a UTC offset in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OffsetTime {
    /// Time of day.
    pub time: NaiveTime,
    /// Offset from UTC, seconds east.
    pub offset_seconds: i32,
}

impl OffsetTime {
    /// Pair a time of day with a UTC offset.
    pub fn new(time: NaiveTime, offset_seconds: i32) -> Self {
        Self {
            time,
            offset_seconds,
        }
    }
}

impl fmt::Display for OffsetTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, abs) = if self.offset_seconds < 0 {
            ('-', -self.offset_seconds)
        } else {
            ('+', self.offset_seconds)
        };
        write!(
            f,
            "{}{}{:02}:{:02}",
            self.time,
            sign,
            abs / 3600,
            abs % 3600 / 60
        )
    }
}

/// A wall-clock date-time paired with a named time zone.
///
/// The crate carries the zone as an identifier string rather than resolving
/// it; zone-rule lookup belongs to the layer that owns a tz database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZonedDateTime {
    /// The instant, as a zone-less date-time relative to the Unix epoch.
    pub datetime: NaiveDateTime,
    /// IANA zone identifier, e.g. `"Europe/Berlin"`.
    pub zone_id: String,
}

impl ZonedDateTime {
    /// Pair an instant with a zone identifier.
    pub fn new(datetime: NaiveDateTime, zone_id: impl Into<String>) -> Self {
        Self {
            datetime,
            zone_id: zone_id.into(),
        }
    }
}

impl fmt::Display for ZonedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.datetime, self.zone_id)
    }
}

/// A calendar-aware duration. Months and days are kept separate from the
/// seconds component because their length depends on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Duration {
    /// Months.
    pub months: i64,
    /// Days.
    pub days: i64,
    /// Seconds.
    pub seconds: i64,
    /// Nanosecond adjustment.
    pub nanoseconds: i64,
}

impl Duration {
    /// Build a duration from its four components.
    pub fn new(months: i64, days: i64, seconds: i64, nanoseconds: i64) -> Self {
        Self {
            months,
            days,
            seconds,
            nanoseconds,
        }
    }

    /// Duration of whole seconds.
    pub fn from_seconds(seconds: i64) -> Self {
        Self::new(0, 0, seconds, 0)
    }

    /// Duration of whole days.
    pub fn from_days(days: i64) -> Self {
        Self::new(0, days, 0, 0)
    }

    /// Duration of whole months.
    pub fn from_months(months: i64) -> Self {
        Self::new(months, 0, 0, 0)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P{}M{}DT{}S",
            self.months,
            self.days,
            self.seconds as f64 + self.nanoseconds as f64 / 1e9
        )
    }
}
