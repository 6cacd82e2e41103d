//! # boltpack
//!
//! A PackStream value codec for the Bolt graph database protocol.
//!
//! PackStream is the binary serialization format Bolt uses to carry values
//! between client and server. This crate implements the value layer only:
//! a bidirectional, allocation-only mapping between marker-tagged bytes and
//! an in-memory value model. Message framing, chunking, handshake, and
//! connection state belong to the transport sitting on top of it.
//!
//! ## Features
//!
//! - **Closed type model** - scalars, strings, bytes, lists, and
//!   order-preserving dictionaries, plus the structure-based extension types
//!   (temporal, spatial, graph entities)
//! - **Exhaustive dispatch** - both codec directions match exhaustively over
//!   closed sum types, so unsupported values fail loudly and new variants
//!   cannot be silently mis-encoded
//! - **Deterministic output** - dictionaries encode in insertion order, and
//!   every value takes its smallest wire form
//! - **Pure and synchronous** - no I/O, no shared state; independent
//!   encodes and decodes can run concurrently on independent buffers
//!
//! ## Quick Start
//!
//! ```
//! use boltpack::{codec, Value};
//! use indexmap::IndexMap;
//!
//! # fn main() -> Result<(), boltpack::PackError> {
//! let mut params = IndexMap::new();
//! params.insert("name".to_string(), Value::from("Alice"));
//! params.insert("age".to_string(), Value::from(30));
//!
//! let bytes = codec::encode(&Value::Map(params))?;
//! let value = codec::decode(&bytes)?;
//!
//! assert_eq!(value.as_map().unwrap()["name"], Value::from("Alice"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Temporal and Spatial Values
//!
//! Extension types round-trip through tagged structures:
//!
//! ```
//! use boltpack::{codec, Point, Value};
//! use chrono::NaiveDate;
//!
//! # fn main() -> Result<(), boltpack::PackError> {
//! let date = Value::Date(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
//! assert_eq!(codec::decode(&codec::encode(&date)?)?, date);
//!
//! let point = Value::Point(Point::wgs84_2d(13.4, 52.5));
//! assert_eq!(codec::decode(&codec::encode(&point)?)?, point);
//! # Ok(())
//! # }
//! ```
//!
//! Graph entities ([`Node`], [`Relationship`], [`Path`]) come out of decode
//! but are server-owned: encoding one fails with
//! [`PackError::Unsupported`].
//!
//! ## Modules
//!
//! - [`codec`] - wire/native conversion and the byte-level entry points
//! - [`value`] - the native value model
//! - [`wire`] - the tagged wire model
//! - [`reader`] / [`writer`] - byte-level parsing and serialization
//! - [`marker`] - marker bytes and the structure tag enumeration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod codec;
pub mod error;
pub mod marker;
pub mod reader;
mod registry;
pub mod value;
pub mod wire;
pub mod writer;

pub use codec::{decode, encode, encode_into, from_wire, to_wire};
pub use error::{PackError, PackResult};
pub use reader::WireReader;
pub use value::{
    Duration, Node, OffsetTime, Path, Point, Relationship, UnboundRelationship, Value,
    ZonedDateTime,
};
pub use wire::{WireStructure, WireValue};
pub use writer::WireWriter;
