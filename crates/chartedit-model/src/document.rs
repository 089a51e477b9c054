#![forbid(unsafe_code)]

//! The edited document: one song and its current chart.
//!
//! [`Document`] is the single mutation surface for entities. It routes every
//! call by the entity's [`CollectionKind`] so callers never pick a
//! collection by hand.

use crate::chart::Chart;
use crate::collection::SortedCollection;
use crate::entity::{CollectionKind, Entity};
use crate::song::Song;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub song: Song,
    pub chart: Chart,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection that stores entities of `kind`.
    #[must_use]
    pub fn collection(&self, kind: CollectionKind) -> &SortedCollection {
        match kind {
            CollectionKind::ChartObjects => &self.chart.objects,
            CollectionKind::Events => &self.song.events,
            CollectionKind::SyncTrack => &self.song.sync_track,
        }
    }

    fn collection_mut(&mut self, kind: CollectionKind) -> &mut SortedCollection {
        match kind {
            CollectionKind::ChartObjects => {
                self.chart.mark_stale();
                &mut self.chart.objects
            }
            CollectionKind::Events => {
                self.song.mark_stale();
                &mut self.song.events
            }
            CollectionKind::SyncTrack => {
                self.song.mark_stale();
                &mut self.song.sync_track
            }
        }
    }

    /// Index of the live entity matching `entity` in its collection.
    #[must_use]
    pub fn locate(&self, entity: &Entity) -> Option<usize> {
        self.collection(entity.collection()).locate(entity)
    }

    /// The live entity matching `entity`, if present.
    #[must_use]
    pub fn find(&self, entity: &Entity) -> Option<&Entity> {
        let collection = self.collection(entity.collection());
        collection.locate(entity).and_then(|i| collection.get(i))
    }

    #[must_use]
    pub fn contains(&self, entity: &Entity) -> bool {
        self.locate(entity).is_some()
    }

    /// Insert `entity` into its collection, replacing any entity with the
    /// same key. Returns the replaced entity.
    pub fn insert(&mut self, entity: Entity) -> Option<Entity> {
        let replaced = self.collection_mut(entity.collection()).insert(entity);
        if let Some(old) = &replaced {
            tracing::trace!(target: "chartedit.model", entity = %old, "replaced live entity");
        }
        replaced
    }

    /// Remove the live entity matching `entity`. Returns it, or `None` when
    /// nothing matched. A miss leaves the derived indices untouched.
    pub fn remove(&mut self, entity: &Entity) -> Option<Entity> {
        let kind = entity.collection();
        self.collection(kind).locate(entity)?;
        self.collection_mut(kind).remove(entity)
    }

    /// Rebuild the derived indices of both the chart and the song.
    pub fn rebuild_indices(&mut self) {
        self.chart.rebuild_indices();
        self.song.rebuild_indices();
    }

    /// Total number of live entities across all collections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chart.objects.len() + self.song.events.len() + self.song.sync_track.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Entity> for Document {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut doc = Self::new();
        for entity in iter {
            doc.insert(entity);
        }
        doc.rebuild_indices();
        doc
    }
}
