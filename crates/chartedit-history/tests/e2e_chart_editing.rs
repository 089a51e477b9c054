#![forbid(unsafe_code)]

//! End-to-end editing sessions driven through the public API.
//!
//! Each test plays a sequence of editor gestures (place, erase, sustain drag,
//! note type change, tempo edits) against an [`EditorSession`], records them
//! the way UI commands do and checks the document and view state after undo
//! and redo.

use std::time::Duration;

use chartedit_history::{
    EditorSession, GroupRecorder, HistoryConfig, ManualClock, Timeline, Tool, Viewport,
};
use chartedit_model::{Bpm, Document, Entity, Fret, Note, NoteFlags, Section, ViewScope};

const TICKS_PER_MEASURE: u32 = 192 * 4;

struct Editor {
    session: EditorSession,
    timeline: Timeline<ManualClock>,
    clock: ManualClock,
}

impl Editor {
    fn new(config: HistoryConfig) -> Self {
        let clock = ManualClock::new();
        Self {
            session: EditorSession::new(Document::new()).with_viewport(Viewport {
                position: 0,
                span: TICKS_PER_MEASURE * 2,
            }),
            timeline: Timeline::with_clock(config, clock.clone()),
            clock,
        }
    }

    fn at(&mut self, secs: f64) -> &mut Self {
        self.clock.set_secs(secs);
        self
    }

    fn place(&mut self, entity: Entity) {
        self.session.document.insert(entity.clone());
        let mut rec = GroupRecorder::new().with_description("Place");
        rec.add(&entity);
        rec.commit(&mut self.timeline);
    }

    fn erase(&mut self, entity: &Entity) {
        let Some(live) = self.session.document.remove(entity) else {
            return;
        };
        let mut rec = GroupRecorder::new().with_description("Erase");
        rec.delete(&live);
        rec.commit(&mut self.timeline);
    }

    /// Set the sustain of every note in the chord at `position`, capped so
    /// it ends at the next chord.
    fn set_sustain(&mut self, position: u32, length: u32) -> bool {
        let chart = &self.session.document.chart;
        let length = match chart.next_note_after(position) {
            Some(next) => length.min(next.position - position),
            None => length,
        };
        let chord: Vec<Note> = chart.chord_at(position).into_iter().cloned().collect();
        let mut rec = GroupRecorder::new().with_description("Set sustain");
        for note in chord {
            let before = Entity::from(note.clone());
            let after = Entity::from(note.with_sustain(length));
            self.session.document.insert(after.clone());
            rec.modify_if_changed(&before, &after);
        }
        rec.commit(&mut self.timeline)
    }

    /// Apply `flags` to the whole chord at `position`.
    fn set_note_type(&mut self, position: u32, flags: NoteFlags) -> bool {
        let before: Vec<Entity> = self
            .session
            .document
            .chart
            .chord_at(position)
            .into_iter()
            .cloned()
            .map(Entity::from)
            .collect();
        let after: Vec<Entity> = before
            .iter()
            .filter_map(Entity::as_note)
            .map(|n| Entity::from(n.clone().with_flags(flags)))
            .collect();
        if before == after {
            return false;
        }
        for e in &before {
            self.session.document.remove(e);
        }
        for e in &after {
            self.session.document.insert(e.clone());
        }
        let mut rec = GroupRecorder::new().with_description("Set note type");
        rec.replace_all(&before, &after);
        rec.commit(&mut self.timeline)
    }

    fn undo(&mut self) -> bool {
        self.timeline.undo(&mut self.session)
    }

    fn redo(&mut self) -> bool {
        self.timeline.redo(&mut self.session)
    }

    fn sustain_of(&self, position: u32, fret: Fret) -> Option<u32> {
        self.session
            .document
            .find(&Entity::from(Note::new(position, fret)))
            .and_then(Entity::as_note)
            .map(|n| n.sustain_length)
    }
}

fn note(position: u32, fret: Fret) -> Entity {
    Entity::from(Note::new(position, fret))
}

#[test]
fn rapid_placement_undoes_as_one_step() {
    let mut ed = Editor::new(HistoryConfig::default());
    ed.at(0.0).place(note(100, Fret::Green));
    ed.at(0.05).place(note(110, Fret::Green));

    assert!(ed.undo());
    assert!(ed.session.document.is_empty());
    assert!(!ed.undo());

    assert!(ed.redo());
    assert_eq!(ed.session.document.len(), 2);
    assert!(!ed.redo());
}

#[test]
fn sustain_drag_round_trip() {
    let mut ed = Editor::new(HistoryConfig::default());
    ed.at(0.0).place(note(50, Fret::Red));
    ed.at(1.0);
    assert!(ed.set_sustain(50, 100));
    assert_eq!(ed.sustain_of(50, Fret::Red), Some(100));

    assert!(ed.undo());
    assert_eq!(ed.sustain_of(50, Fret::Red), Some(0));
    assert!(ed.redo());
    assert_eq!(ed.sustain_of(50, Fret::Red), Some(100));
}

#[test]
fn sustain_is_capped_at_next_chord() {
    let mut ed = Editor::new(HistoryConfig::default());
    ed.at(0.0).place(note(0, Fret::Green));
    ed.at(0.01).place(note(0, Fret::Red));
    ed.at(0.02).place(note(192, Fret::Blue));
    ed.at(1.0);
    assert!(ed.set_sustain(0, 1_000));
    assert_eq!(ed.sustain_of(0, Fret::Green), Some(192));
    assert_eq!(ed.sustain_of(0, Fret::Red), Some(192));

    // Already at the cap: nothing new to record.
    ed.at(2.0);
    assert!(!ed.set_sustain(0, 500));

    assert!(ed.undo());
    assert_eq!(ed.sustain_of(0, Fret::Green), Some(0));
    assert_eq!(ed.sustain_of(0, Fret::Red), Some(0));

    // The last chord has nothing after it.
    ed.at(3.0);
    assert!(ed.set_sustain(192, 1_000));
    assert_eq!(ed.sustain_of(192, Fret::Blue), Some(1_000));
}

#[test]
fn unchanged_sustain_is_not_recorded() {
    let mut ed = Editor::new(HistoryConfig::default());
    ed.at(0.0).place(note(50, Fret::Red));
    let depth = ed.timeline.undo_depth();
    ed.at(1.0);
    assert!(!ed.set_sustain(50, 0));
    assert_eq!(ed.timeline.undo_depth(), depth);
}

#[test]
fn chord_note_type_change_undoes_whole_chord() {
    let mut ed = Editor::new(HistoryConfig::default());
    ed.at(0.0).place(note(384, Fret::Green));
    ed.at(0.1).place(note(384, Fret::Yellow));
    ed.at(2.0);
    assert!(ed.set_note_type(384, NoteFlags::TAP));
    assert!(!ed.set_note_type(384, NoteFlags::TAP));

    let flags = |ed: &Editor| -> Vec<NoteFlags> {
        ed.session.document.chart.chord_at(384).iter().map(|n| n.flags).collect()
    };
    assert_eq!(flags(&ed), [NoteFlags::TAP, NoteFlags::TAP]);

    assert!(ed.undo());
    assert_eq!(flags(&ed), [NoteFlags::empty(), NoteFlags::empty()]);
    assert!(ed.redo());
    assert_eq!(flags(&ed), [NoteFlags::TAP, NoteFlags::TAP]);
}

#[test]
fn undo_survives_external_deletion() {
    let mut ed = Editor::new(HistoryConfig::default());
    ed.at(0.0).place(note(0, Fret::Orange));
    ed.at(0.01).place(note(0, Fret::Blue));

    // A tool that bypasses history.
    ed.session.document.remove(&note(0, Fret::Orange));

    assert!(ed.undo());
    assert!(ed.session.document.is_empty());
}

#[test]
fn new_edit_after_undo_drops_redo_branch() {
    let mut ed = Editor::new(HistoryConfig::default());
    ed.at(0.0).place(note(0, Fret::Green));
    ed.at(1.0).place(note(192, Fret::Green));
    assert!(ed.undo());
    ed.at(2.0).erase(&note(0, Fret::Green));

    assert!(!ed.timeline.can_redo());
    assert!(!ed.redo());
    assert_eq!(ed.timeline.undo_descriptions(10), ["Erase", "Place"]);

    assert!(ed.undo());
    assert!(ed.session.document.contains(&note(0, Fret::Green)));
    assert!(!ed.session.document.contains(&note(192, Fret::Green)));
}

#[test]
fn tempo_edit_switches_scope_and_scrolls() {
    let mut ed = Editor::new(HistoryConfig::default());
    let far = TICKS_PER_MEASURE * 20;
    ed.at(0.0).place(Entity::from(Bpm {
        position: far,
        value: 150_000,
    }));
    ed.session.view_scope = ViewScope::Chart;
    ed.session.tool = Tool::Bpm;
    ed.session.selection.select(Entity::from(Bpm {
        position: far,
        value: 150_000,
    }));

    let report = ed.timeline.undo_step(&mut ed.session).unwrap();
    assert_eq!(report.focus.position(), far);
    assert_eq!(ed.session.view_scope, ViewScope::Song);
    assert_eq!(ed.session.viewport.position, far);
    assert!(ed.session.selection.is_empty());
    assert!(ed.session.document.song.bpms().next().is_none());
}

#[test]
fn note_tool_keeps_selection_and_scope_can_stay_put() {
    let config = HistoryConfig::default().with_sync_view_scope(false);
    let mut ed = Editor::new(config);
    ed.session.tool = Tool::Note;
    ed.at(0.0).place(Entity::from(Section {
        position: 0,
        title: "Intro".into(),
    }));
    ed.session.selection.select(note(0, Fret::Green));

    assert!(ed.undo());
    assert_eq!(ed.session.view_scope, ViewScope::Chart);
    assert_eq!(ed.session.selection.entities().len(), 1);
}

#[test]
fn wider_window_merges_more() {
    let config = HistoryConfig::default().with_action_window(Duration::from_secs(1));
    let mut ed = Editor::new(config);
    ed.at(0.0).place(note(0, Fret::Green));
    ed.at(0.5).place(note(1, Fret::Green));
    ed.at(0.9).place(note(2, Fret::Green));
    ed.at(3.0).place(note(3, Fret::Green));

    let report = ed.timeline.undo_step(&mut ed.session).unwrap();
    assert_eq!(report.groups, 1);
    let report = ed.timeline.undo_step(&mut ed.session).unwrap();
    assert_eq!(report.groups, 3);
    assert!(ed.session.document.is_empty());
}

#[test]
fn edit_flag_and_indices_track_undo() {
    let mut ed = Editor::new(HistoryConfig::default());
    ed.at(0.0).place(note(0, Fret::Green));
    ed.at(1.0).place(Entity::from(Bpm {
        position: 0,
        value: 120_000,
    }));
    assert!(!ed.session.edit_occurred());

    ed.undo();
    assert!(ed.session.take_edit_occurred());
    assert_eq!(ed.session.document.chart.notes().count(), 1);
    assert_eq!(ed.session.document.song.bpms().count(), 0);

    ed.redo();
    assert!(ed.session.take_edit_occurred());
    assert_eq!(ed.session.document.song.bpms().count(), 1);
}
