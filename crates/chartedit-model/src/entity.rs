#![forbid(unsafe_code)]

//! Document entities.
//!
//! Every object in a chart is an [`Entity`]: a closed sum type over the
//! kinds the editor knows about. Entities carry no identity beyond their
//! value. Two entities refer to the "same" document object when their
//! [`EntityKey`]s are equal, which compares the kind, the tick position and
//! the fields that discriminate objects sharing a tick (the fret of a note,
//! the text of an event). Payload fields such as a note's sustain length are
//! not part of the key.
//!
//! # Routing
//!
//! Each kind maps to exactly one live collection ([`CollectionKind`]) and one
//! view scope ([`ViewScope`]):
//!
//! | Kind            | Collection      | Scope |
//! | :-------------- | :-------------- | :---- |
//! | `Note`          | chart objects   | Chart |
//! | `Starpower`     | chart objects   | Chart |
//! | `ChartEvent`    | chart objects   | Chart |
//! | `Section`       | song events     | Song  |
//! | `Event`         | song events     | Song  |
//! | `Bpm`           | sync track      | Song  |
//! | `TimeSignature` | sync track      | Song  |

use std::cmp::Ordering;
use std::fmt;

use bitflags::bitflags;

/// Position in the chart, in ticks.
pub type Tick = u32;

/// Lane a note is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Fret {
    Green,
    Red,
    Yellow,
    Blue,
    Orange,
    Open,
}

impl Fret {
    /// All frets in lane order.
    pub const ALL: [Fret; 6] = [
        Fret::Green,
        Fret::Red,
        Fret::Yellow,
        Fret::Blue,
        Fret::Orange,
        Fret::Open,
    ];
}

bitflags! {
    /// Per-note playing modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NoteFlags: u8 {
        /// Note is forced to the opposite of its natural strum/hopo state.
        const FORCED = 1 << 0;
        /// Note is a tap note.
        const TAP = 1 << 1;
    }
}

/// A playable note.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Note {
    pub position: Tick,
    pub fret: Fret,
    pub sustain_length: u32,
    pub flags: NoteFlags,
}

impl Note {
    #[must_use]
    pub const fn new(position: Tick, fret: Fret) -> Self {
        Self {
            position,
            fret,
            sustain_length: 0,
            flags: NoteFlags::empty(),
        }
    }

    #[must_use]
    pub const fn with_sustain(mut self, sustain_length: u32) -> Self {
        self.sustain_length = sustain_length;
        self
    }

    #[must_use]
    pub const fn with_flags(mut self, flags: NoteFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// A star power phrase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Starpower {
    pub position: Tick,
    pub length: u32,
}

/// A text event scoped to a single chart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartEvent {
    pub position: Tick,
    pub text: String,
}

/// A named song section ("Verse 1", "Solo").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Section {
    pub position: Tick,
    pub title: String,
}

/// A global song event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Event {
    pub position: Tick,
    pub title: String,
}

/// A tempo marker. `value` is in thousandths of a beat per minute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bpm {
    pub position: Tick,
    pub value: u32,
}

/// A time signature change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeSignature {
    pub position: Tick,
    pub numerator: u32,
    pub denominator: u32,
}

/// Type tag of an [`Entity`]. Declaration order is the sort order of kinds
/// sharing a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Bpm,
    TimeSignature,
    Section,
    Event,
    Note,
    Starpower,
    ChartEvent,
}

/// Live collection an entity is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Notes, star power and chart events of the current chart.
    ChartObjects,
    /// Sections and global events of the song.
    Events,
    /// Tempo and time signature markers of the song.
    SyncTrack,
}

/// Which part of the document the editor is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewScope {
    /// Chart-local objects (notes, star power, chart events).
    #[default]
    Chart,
    /// Song-wide objects (sections, events, tempo map).
    Song,
}

/// A document object, compared and located by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Entity {
    Note(Note),
    Starpower(Starpower),
    ChartEvent(ChartEvent),
    Section(Section),
    Event(Event),
    Bpm(Bpm),
    TimeSignature(TimeSignature),
}

impl Entity {
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Note(_) => EntityKind::Note,
            Self::Starpower(_) => EntityKind::Starpower,
            Self::ChartEvent(_) => EntityKind::ChartEvent,
            Self::Section(_) => EntityKind::Section,
            Self::Event(_) => EntityKind::Event,
            Self::Bpm(_) => EntityKind::Bpm,
            Self::TimeSignature(_) => EntityKind::TimeSignature,
        }
    }

    #[must_use]
    pub fn position(&self) -> Tick {
        match self {
            Self::Note(n) => n.position,
            Self::Starpower(s) => s.position,
            Self::ChartEvent(e) => e.position,
            Self::Section(s) => s.position,
            Self::Event(e) => e.position,
            Self::Bpm(b) => b.position,
            Self::TimeSignature(t) => t.position,
        }
    }

    #[must_use]
    pub fn collection(&self) -> CollectionKind {
        self.kind().collection()
    }

    #[must_use]
    pub fn scope(&self) -> ViewScope {
        self.kind().scope()
    }

    /// Identity key used for value lookup and ordering.
    #[must_use]
    pub fn key(&self) -> EntityKey<'_> {
        let discriminator = match self {
            Self::Note(n) => Discriminator::Fret(n.fret),
            Self::ChartEvent(e) => Discriminator::Text(&e.text),
            Self::Section(s) => Discriminator::Text(&s.title),
            Self::Event(e) => Discriminator::Text(&e.title),
            Self::Starpower(_) | Self::Bpm(_) | Self::TimeSignature(_) => Discriminator::None,
        };
        EntityKey {
            position: self.position(),
            kind: self.kind(),
            discriminator,
        }
    }

    /// Whether `other` denotes the same document object.
    #[must_use]
    pub fn matches(&self, other: &Entity) -> bool {
        self.key() == other.key()
    }

    #[must_use]
    pub fn as_note(&self) -> Option<&Note> {
        match self {
            Self::Note(n) => Some(n),
            _ => None,
        }
    }
}

impl EntityKind {
    #[must_use]
    pub const fn collection(self) -> CollectionKind {
        match self {
            Self::Note | Self::Starpower | Self::ChartEvent => CollectionKind::ChartObjects,
            Self::Section | Self::Event => CollectionKind::Events,
            Self::Bpm | Self::TimeSignature => CollectionKind::SyncTrack,
        }
    }

    #[must_use]
    pub const fn scope(self) -> ViewScope {
        match self.collection() {
            CollectionKind::ChartObjects => ViewScope::Chart,
            CollectionKind::Events | CollectionKind::SyncTrack => ViewScope::Song,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Note(n) => write!(f, "note {:?}@{}", n.fret, n.position),
            Self::Starpower(s) => write!(f, "starpower@{}+{}", s.position, s.length),
            Self::ChartEvent(e) => write!(f, "chart event '{}'@{}", e.text, e.position),
            Self::Section(s) => write!(f, "section '{}'@{}", s.title, s.position),
            Self::Event(e) => write!(f, "event '{}'@{}", e.title, e.position),
            Self::Bpm(b) => write!(f, "bpm {}@{}", b.value, b.position),
            Self::TimeSignature(t) => {
                write!(f, "ts {}/{}@{}", t.numerator, t.denominator, t.position)
            }
        }
    }
}

macro_rules! impl_from_variant {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Entity {
                fn from(value: $ty) -> Self {
                    Self::$ty(value)
                }
            }
        )*
    };
}

impl_from_variant!(Note, Starpower, ChartEvent, Section, Event, Bpm, TimeSignature);

/// Fields that tell apart two objects of the same kind at the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Discriminator<'a> {
    None,
    Fret(Fret),
    Text(&'a str),
}

/// Borrowed identity of an entity: `(position, kind, discriminator)`.
///
/// The derived ordering is the order entities are stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityKey<'a> {
    pub position: Tick,
    pub kind: EntityKind,
    pub discriminator: Discriminator<'a>,
}

impl Ord for EntityKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position
            .cmp(&other.position)
            .then(self.kind.cmp(&other.kind))
            .then(self.discriminator.cmp(&other.discriminator))
    }
}

impl PartialOrd for EntityKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
