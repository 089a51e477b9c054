#![forbid(unsafe_code)]

//! chartedit document model
//!
//! Value-addressed storage for the objects of a music chart: notes, star
//! power, chart events, sections, global events and the tempo map.
//!
//! # Key Components
//!
//! - [`Entity`] - Closed sum type over every document object kind
//! - [`EntityKey`] - Identity of an entity (kind, tick, discriminating fields)
//! - [`SortedCollection`] - Key-ordered storage with value lookup
//! - [`Chart`] / [`Song`] - Chart-local and song-wide stores with derived indices
//! - [`Document`] - Routes insert/remove/locate to the right collection
//!
//! # Identity
//!
//! Nothing in this crate hands out stable references or ids. A clone of an
//! entity taken at any point can re-locate its live counterpart later as long
//! as the kind, position and discriminating fields are unchanged, which is
//! what lets undo history store plain values.

pub mod chart;
pub mod collection;
pub mod document;
pub mod entity;
pub mod song;

pub use chart::Chart;
pub use collection::SortedCollection;
pub use document::Document;
pub use entity::{
    Bpm, ChartEvent, CollectionKind, Discriminator, Entity, EntityKey, EntityKind, Event, Fret,
    Note, NoteFlags, Section, Starpower, Tick, TimeSignature, ViewScope,
};
pub use song::Song;
