#![forbid(unsafe_code)]

//! Song-wide object stores: global events and the tempo map.

use crate::collection::SortedCollection;
use crate::entity::{Bpm, Entity, Event, Section, TimeSignature};

#[derive(Debug, Clone, Default)]
struct SongIndex {
    sections: Vec<usize>,
    events: Vec<usize>,
    bpms: Vec<usize>,
    time_signatures: Vec<usize>,
}

/// Sections, events, and sync track shared by every chart of a song.
///
/// Like [`Chart`](crate::Chart), typed accessors read a derived index that
/// is refreshed by [`rebuild_indices`](Self::rebuild_indices), and equality
/// compares the live collections only.
#[derive(Debug, Clone, Default)]
pub struct Song {
    pub(crate) events: SortedCollection,
    pub(crate) sync_track: SortedCollection,
    index: SongIndex,
    stale: bool,
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.events == other.events && self.sync_track == other.sync_track
    }
}

impl Eq for Song {}

impl Song {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &SortedCollection {
        &self.events
    }

    #[must_use]
    pub fn sync_track(&self) -> &SortedCollection {
        &self.sync_track
    }

    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub(crate) fn mark_stale(&mut self) {
        self.stale = true;
    }

    pub fn rebuild_indices(&mut self) {
        let mut index = SongIndex::default();
        for (i, entity) in self.events.iter().enumerate() {
            match entity {
                Entity::Section(_) => index.sections.push(i),
                Entity::Event(_) => index.events.push(i),
                _ => {}
            }
        }
        for (i, entity) in self.sync_track.iter().enumerate() {
            match entity {
                Entity::Bpm(_) => index.bpms.push(i),
                Entity::TimeSignature(_) => index.time_signatures.push(i),
                _ => {}
            }
        }
        self.index = index;
        self.stale = false;
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> + '_ {
        self.index
            .sections
            .iter()
            .filter_map(|&i| match self.events.get(i) {
                Some(Entity::Section(s)) => Some(s),
                _ => None,
            })
    }

    pub fn global_events(&self) -> impl Iterator<Item = &Event> + '_ {
        self.index
            .events
            .iter()
            .filter_map(|&i| match self.events.get(i) {
                Some(Entity::Event(e)) => Some(e),
                _ => None,
            })
    }

    pub fn bpms(&self) -> impl Iterator<Item = &Bpm> + '_ {
        self.index
            .bpms
            .iter()
            .filter_map(|&i| match self.sync_track.get(i) {
                Some(Entity::Bpm(b)) => Some(b),
                _ => None,
            })
    }

    pub fn time_signatures(&self) -> impl Iterator<Item = &TimeSignature> + '_ {
        self.index
            .time_signatures
            .iter()
            .filter_map(|&i| match self.sync_track.get(i) {
                Some(Entity::TimeSignature(t)) => Some(t),
                _ => None,
            })
    }
}
