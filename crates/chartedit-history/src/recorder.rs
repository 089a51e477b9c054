#![forbid(unsafe_code)]

//! Builder that turns one user gesture into one history entry.
//!
//! Editing commands mutate the document directly and describe what they did
//! to a [`GroupRecorder`]. When the gesture ends, [`GroupRecorder::commit`]
//! hands the accumulated actions to the timeline as a single group, or does
//! nothing if the gesture turned out to be a no-op.
//!
//! ```rust,ignore
//! let mut rec = GroupRecorder::new().with_description("Set sustain");
//! for note in chord {
//!     let edited = note.clone().with_sustain(length);
//!     rec.modify_if_changed(&note.into(), &edited.into());
//! }
//! rec.commit(&mut timeline);
//! ```

use chartedit_model::Entity;

use crate::action::Action;
use crate::clock::Clock;
use crate::group::ActionGroup;
use crate::timeline::Timeline;

/// Accumulates actions for one gesture.
#[derive(Debug, Clone, Default)]
pub struct GroupRecorder {
    actions: Vec<Action>,
    description: Option<String>,
}

impl GroupRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Label the resulting group.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Record an already-inserted entity.
    pub fn add(&mut self, entity: &Entity) -> &mut Self {
        self.push(Action::add(entity))
    }

    /// Record an already-removed entity.
    pub fn delete(&mut self, entity: &Entity) -> &mut Self {
        self.push(Action::delete(entity))
    }

    /// Record a replacement of `before` by `after`.
    pub fn modify(&mut self, before: &Entity, after: &Entity) -> &mut Self {
        self.push(Action::modify(before, after))
    }

    /// Like [`modify`](Self::modify), skipped when the snapshots are equal.
    pub fn modify_if_changed(&mut self, before: &Entity, after: &Entity) -> &mut Self {
        if before != after {
            self.modify(before, after);
        }
        self
    }

    /// Record every `before` entity as deleted, then every `after` entity
    /// as added. Empty slices contribute nothing.
    pub fn replace_all(&mut self, before: &[Entity], after: &[Entity]) -> &mut Self {
        if let Ok(action) = Action::delete_all(before) {
            self.push(action);
        }
        if let Ok(action) = Action::add_all(after) {
            self.push(action);
        }
        self
    }

    /// Append a prebuilt action.
    pub fn push(&mut self, action: Action) -> &mut Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// The recorded group, or `None` when nothing was recorded.
    #[must_use]
    pub fn finish(self) -> Option<ActionGroup> {
        let group = ActionGroup::new(self.actions).ok()?;
        Some(match self.description {
            Some(description) => group.with_description(description),
            None => group,
        })
    }

    /// Insert the recorded group into `timeline`. Returns `false` and leaves
    /// the timeline untouched when nothing was recorded.
    pub fn commit<C: Clock>(self, timeline: &mut Timeline<C>) -> bool {
        match self.finish() {
            Some(group) => {
                timeline.insert(group);
                true
            }
            None => {
                tracing::trace!(target: "chartedit.history", "empty gesture not recorded");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionKind;
    use crate::clock::ManualClock;
    use crate::config::HistoryConfig;
    use crate::context::EditorSession;
    use chartedit_model::{Document, Fret, Note, NoteFlags};

    fn timeline() -> Timeline<ManualClock> {
        Timeline::with_clock(HistoryConfig::default(), ManualClock::new())
    }

    fn chord(position: u32, frets: &[Fret]) -> Vec<Entity> {
        frets
            .iter()
            .map(|&f| Entity::from(Note::new(position, f)))
            .collect()
    }

    /// Apply a sustain edit to every note of the chord at `position`,
    /// recording only notes whose length changes.
    fn set_chord_sustain(doc: &mut Document, rec: &mut GroupRecorder, position: u32, length: u32) {
        let before: Vec<Entity> = doc
            .chart
            .chord_at(position)
            .into_iter()
            .cloned()
            .map(Entity::from)
            .collect();
        for entity in before {
            let Some(note) = entity.as_note() else {
                continue;
            };
            let after = Entity::from(note.clone().with_sustain(length));
            doc.insert(after.clone());
            rec.modify_if_changed(&entity, &after);
        }
    }

    #[test]
    fn empty_recorder_commits_nothing() {
        let mut t = timeline();
        assert!(GroupRecorder::new().finish().is_none());
        assert!(!GroupRecorder::new().commit(&mut t));
        assert!(t.is_empty());
    }

    #[test]
    fn unchanged_modify_is_skipped() {
        let n = Entity::from(Note::new(0, Fret::Red));
        let mut rec = GroupRecorder::new();
        rec.modify_if_changed(&n, &n.clone());
        assert!(rec.is_empty());
    }

    #[test]
    fn sustain_edit_records_only_changed_chord_notes() {
        let mut doc: Document = chord(96, &[Fret::Green, Fret::Red])
            .into_iter()
            .collect();
        // Red already has the target length.
        doc.insert(Entity::from(Note::new(96, Fret::Red).with_sustain(48)));
        let original = doc.clone();

        let mut rec = GroupRecorder::new().with_description("Set sustain");
        set_chord_sustain(&mut doc, &mut rec, 96, 48);
        assert_eq!(rec.len(), 1);

        let mut t = timeline();
        assert!(rec.commit(&mut t));
        assert_eq!(t.next_undo_description(), Some("Set sustain"));

        let mut session = EditorSession::new(doc);
        assert!(t.undo(&mut session));
        assert_eq!(session.document, original);
    }

    #[test]
    fn note_type_edit_replaces_whole_chord() {
        let before = chord(192, &[Fret::Yellow, Fret::Blue]);
        let after: Vec<Entity> = before
            .iter()
            .filter_map(Entity::as_note)
            .map(|n| Entity::from(n.clone().with_flags(NoteFlags::TAP)))
            .collect();
        let original: Document = before.iter().cloned().collect();

        let mut doc = original.clone();
        for e in &before {
            doc.remove(e);
        }
        for e in &after {
            doc.insert(e.clone());
        }

        let mut rec = GroupRecorder::new();
        rec.replace_all(&before, &after);
        let group = rec.finish().unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group.actions()[0].kind(), ActionKind::Delete);
        assert_eq!(group.actions()[1].kind(), ActionKind::Add);

        let mut t = timeline();
        t.insert(group);
        let mut session = EditorSession::new(doc);
        t.undo(&mut session);
        assert_eq!(session.document, original);
        t.redo(&mut session);
        assert_eq!(
            session.document.find(&before[0]).and_then(Entity::as_note).map(|n| n.flags),
            Some(NoteFlags::TAP)
        );
    }

    #[test]
    fn replace_all_with_empty_sides() {
        let mut rec = GroupRecorder::new();
        rec.replace_all(&[], &[]);
        assert!(rec.is_empty());
        rec.replace_all(&[], &chord(0, &[Fret::Open]));
        assert_eq!(rec.len(), 1);
    }

    #[test]
    fn chained_recording() {
        let a = Entity::from(Note::new(0, Fret::Green));
        let b = Entity::from(Note::new(0, Fret::Green).with_sustain(10));
        let mut rec = GroupRecorder::new();
        rec.add(&a).modify(&a, &b).delete(&b);
        let group = rec.finish().unwrap();
        assert_eq!(group.description(), "Add");
        assert_eq!(group.len(), 3);
    }
}
