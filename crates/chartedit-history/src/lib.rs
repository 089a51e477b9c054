#![forbid(unsafe_code)]

//! Undo/redo history for the chartedit chart editor.
//!
//! Every mutation of a [`Document`](chartedit_model::Document) is described by
//! an [`Action`] holding value snapshots of the entities it touched. One user
//! gesture becomes one [`ActionGroup`], which the [`Timeline`] records with
//! the session time it was inserted at. Undo and redo merge runs of groups
//! inserted close together, so a burst of small edits reverses as one step.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Timeline                            │
//! │                                                              │
//! │   G0@0.00   G1@0.05   G2@1.30   G3@1.40   G4@4.00            │
//! │   ───────── done ─────────────────────┤  ├── redo-able ──    │
//! │                                   history_point              │
//! │                                                              │
//! │   undo(): revert G3, G2 (within window of G3)                │
//! │   redo(): replay G2, G3 (within window of G2)                │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ &mut dyn EditorContext
//!                                ▼
//!   Document ── rebuild_indices ── Selection ── Viewport ── ViewScope
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use chartedit_history::{EditorSession, GroupRecorder, HistoryConfig, Timeline};
//! use chartedit_model::{Document, Entity, Fret, Note};
//!
//! let mut session = EditorSession::new(Document::new());
//! let mut timeline = Timeline::new(HistoryConfig::default());
//!
//! let note = Entity::from(Note::new(192, Fret::Green));
//! session.document.insert(note.clone());
//! let mut rec = GroupRecorder::new().with_description("Place note");
//! rec.add(&note);
//! rec.commit(&mut timeline);
//!
//! assert!(timeline.undo(&mut session));
//! assert!(session.document.is_empty());
//! ```
//!
//! # Module Structure
//!
//! - [`action`]: invertible Add / Delete / Modify edits
//! - [`group`]: ordered, non-empty action batches
//! - [`timeline`]: the history cursor and window merge
//! - [`recorder`]: gesture-to-group builder
//! - [`context`]: editor state resynchronized after undo/redo
//! - [`clock`]: session clocks
//! - [`config`]: tunables, loadable from TOML/JSON with the `config` feature
//!
//! # Logging
//!
//! Timeline events are emitted with `tracing` under the `chartedit.history`
//! target. The crate never installs a subscriber.

pub mod action;
pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod group;
pub mod recorder;
pub mod timeline;

pub use action::{Action, ActionKind};
pub use clock::{Clock, ManualClock, SessionClock};
pub use config::{DEFAULT_ACTION_WINDOW_MS, HistoryConfig};
pub use context::{EditorContext, EditorSession, Selection, Tool, Viewport};
pub use error::{ConfigError, HistoryError, Result};
pub use group::ActionGroup;
pub use recorder::GroupRecorder;
pub use timeline::{StepReport, Timeline};
