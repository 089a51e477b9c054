#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use chartedit_history::{
    Action, EditorSession, GroupRecorder, HistoryConfig, ManualClock, Timeline, Tool,
};
use chartedit_model::{Bpm, Document, Entity, Fret, Note, Section};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    PlaceNote { position: u16, fret: u8, sustain: u8 },
    PlaceBpm { position: u16, value: u16 },
    PlaceSection { position: u16, title: u8 },
    Erase { index: u8 },
    Sustain { index: u8, length: u8 },
    Undo,
    Redo,
    Wait { ms: u16 },
    SwitchTool,
}

#[derive(Debug, Arbitrary)]
struct Input {
    window_ms: u8,
    ops: Vec<Op>,
}

fn live(doc: &Document) -> Vec<Entity> {
    doc.song
        .sync_track()
        .iter()
        .chain(doc.song.events().iter())
        .chain(doc.chart.objects().iter())
        .cloned()
        .collect()
}

fn place(entity: Entity, session: &mut EditorSession, timeline: &mut Timeline<ManualClock>) {
    if session.document.contains(&entity) {
        return;
    }
    session.document.insert(entity.clone());
    let mut rec = GroupRecorder::new();
    rec.add(&entity);
    rec.commit(timeline);
}

fuzz_target!(|input: Input| {
    let clock = ManualClock::new();
    let config = HistoryConfig::default()
        .with_action_window(Duration::from_millis(u64::from(input.window_ms.max(1))));
    let mut timeline = Timeline::with_clock(config, clock.clone());
    let mut session = EditorSession::new(Document::new());

    for op in input.ops.iter().take(256) {
        match *op {
            Op::PlaceNote {
                position,
                fret,
                sustain,
            } => {
                let fret = Fret::ALL[usize::from(fret) % Fret::ALL.len()];
                let note = Note::new(u32::from(position), fret).with_sustain(u32::from(sustain));
                place(Entity::from(note), &mut session, &mut timeline);
            }
            Op::PlaceBpm { position, value } => {
                let bpm = Bpm {
                    position: u32::from(position),
                    value: u32::from(value),
                };
                place(Entity::from(bpm), &mut session, &mut timeline);
            }
            Op::PlaceSection { position, title } => {
                let section = Section {
                    position: u32::from(position),
                    title: format!("s{}", title % 4),
                };
                place(Entity::from(section), &mut session, &mut timeline);
            }
            Op::Erase { index } => {
                let live = live(&session.document);
                if let Some(target) = live.get(usize::from(index) % live.len().max(1)) {
                    session.document.remove(target);
                    timeline.insert_action(Action::delete(target));
                }
            }
            Op::Sustain { index, length } => {
                let notes: Vec<Note> = session
                    .document
                    .chart
                    .objects()
                    .iter()
                    .filter_map(Entity::as_note)
                    .cloned()
                    .collect();
                if let Some(note) = notes.get(usize::from(index) % notes.len().max(1)) {
                    let before = Entity::from(note.clone());
                    let length = match session.document.chart.next_note_after(note.position) {
                        Some(next) => u32::from(length).min(next.position - note.position),
                        None => u32::from(length),
                    };
                    let after = Entity::from(note.clone().with_sustain(length));
                    session.document.insert(after.clone());
                    let mut rec = GroupRecorder::new();
                    rec.modify_if_changed(&before, &after);
                    rec.commit(&mut timeline);
                }
            }
            Op::Undo => {
                let could = timeline.can_undo();
                assert_eq!(timeline.undo(&mut session), could);
            }
            Op::Redo => {
                let could = timeline.can_redo();
                assert_eq!(timeline.redo(&mut session), could);
            }
            Op::Wait { ms } => clock.advance(Duration::from_millis(u64::from(ms))),
            Op::SwitchTool => {
                session.tool = if session.tool == Tool::Note {
                    Tool::Cursor
                } else {
                    Tool::Note
                };
            }
        }

        assert_eq!(timeline.undo_depth() + timeline.redo_depth(), timeline.len());
        if let Some(point) = timeline.history_point() {
            assert!(point < timeline.len());
        }
    }

    // Walking the whole history back must land on the empty starting document.
    while timeline.undo(&mut session) {}
    assert!(
        session.document.is_empty(),
        "undo-all left {} entities",
        session.document.len()
    );
});
