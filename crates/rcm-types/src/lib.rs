//! Foundation types for the record collection merger (RCM).
//!
//! This crate provides the record data model and its JSON file
//! representation. Every other RCM crate depends on `rcm-types`.
//!
//! # Key Types
//!
//! - [`Record`] —One structured entity, keyed by opaque id
//! - [`DataBlock`] / [`DataEntry`] —Named (name, type, value) triples
//! - [`MetaBlock`] / [`MetaEntry`] —(kind, value) pairs
//! - [`Domain`] —Category/kind classification
//! - [`RecordCollection`] —A parsed collection file, indexed by id
//! - [`ModelError`] —Parse, encode, and I/O failures

pub mod collection;
pub mod error;
pub mod record;

pub use collection::RecordCollection;
pub use error::{ModelError, ModelResult};
pub use record::{
    DataBlock, DataEntry, Domain, MetaBlock, MetaEntry, Record, DEFAULT_FORMAT_VERSION,
};
