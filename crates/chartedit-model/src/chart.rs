#![forbid(unsafe_code)]

//! Chart-local object store.

use crate::collection::SortedCollection;
use crate::entity::{ChartEvent, Entity, Note, Starpower, Tick};

/// Typed views over the chart object list, as indices into it.
#[derive(Debug, Clone, Default)]
struct ChartIndex {
    notes: Vec<usize>,
    starpower: Vec<usize>,
    events: Vec<usize>,
}

/// Notes, star power phrases and chart events of one difficulty.
///
/// The typed accessors ([`notes`](Self::notes) and friends) read the derived
/// index, which goes stale on every mutation until
/// [`rebuild_indices`](Self::rebuild_indices) runs. Equality compares the
/// object list only.
#[derive(Debug, Clone, Default)]
pub struct Chart {
    pub(crate) objects: SortedCollection,
    index: ChartIndex,
    stale: bool,
}

impl PartialEq for Chart {
    fn eq(&self, other: &Self) -> bool {
        self.objects == other.objects
    }
}

impl Eq for Chart {}

impl Chart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn objects(&self) -> &SortedCollection {
        &self.objects
    }

    /// Whether the typed views lag behind the object list.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub(crate) fn mark_stale(&mut self) {
        self.stale = true;
    }

    pub fn rebuild_indices(&mut self) {
        let mut index = ChartIndex::default();
        for (i, entity) in self.objects.iter().enumerate() {
            match entity {
                Entity::Note(_) => index.notes.push(i),
                Entity::Starpower(_) => index.starpower.push(i),
                Entity::ChartEvent(_) => index.events.push(i),
                _ => {}
            }
        }
        self.index = index;
        self.stale = false;
    }

    pub fn notes(&self) -> impl Iterator<Item = &Note> + '_ {
        self.index
            .notes
            .iter()
            .filter_map(|&i| self.objects.get(i).and_then(Entity::as_note))
    }

    pub fn starpower(&self) -> impl Iterator<Item = &Starpower> + '_ {
        self.index
            .starpower
            .iter()
            .filter_map(|&i| match self.objects.get(i) {
                Some(Entity::Starpower(sp)) => Some(sp),
                _ => None,
            })
    }

    pub fn events(&self) -> impl Iterator<Item = &ChartEvent> + '_ {
        self.index
            .events
            .iter()
            .filter_map(|&i| match self.objects.get(i) {
                Some(Entity::ChartEvent(ev)) => Some(ev),
                _ => None,
            })
    }

    /// All notes sharing `position`, in fret order. Reads the live object
    /// list, so it is accurate even while the index is stale.
    #[must_use]
    pub fn chord_at(&self, position: Tick) -> Vec<&Note> {
        self.objects
            .at_position(position)
            .iter()
            .filter_map(Entity::as_note)
            .collect()
    }

    /// First note strictly after `position`, regardless of fret.
    #[must_use]
    pub fn next_note_after(&self, position: Tick) -> Option<&Note> {
        let start = self
            .objects
            .as_slice()
            .partition_point(|e| e.position() <= position);
        self.objects.as_slice()[start..]
            .iter()
            .find_map(Entity::as_note)
    }
}
