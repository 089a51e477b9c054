#![forbid(unsafe_code)]

//! Linear undo/redo timeline with time-window step merging.
//!
//! The [`Timeline`] keeps every inserted [`ActionGroup`] together with the
//! session time it was inserted at, plus a cursor splitting the entries into
//! a "done" prefix and an "undone" suffix.
//!
//! # Invariants
//!
//! 1. `-1 <= history_point < len` (stored as `done = history_point + 1`)
//! 2. Entries above the cursor are redo-able and are discarded wholesale by
//!    the next insert; there is no branching.
//! 3. Timestamps never decrease from one entry to the next.
//!
//! # Window merge
//!
//! UI code often submits several small groups in quick succession for what
//! the user sees as one edit. Undo and redo therefore take a whole run of
//! entries whose timestamps lie within the action window of the first entry
//! of the run:
//!
//! ```text
//! entries:  G1@0.00  G2@0.05  G3@0.15  G4@1.00
//!                                      ^ cursor
//! undo()  -> reverts G4              (G3 is 0.85s away)
//! undo()  -> reverts G3, G2, G1      (all within 0.2s of G3)
//! redo()  -> replays G1, G2, G3      (all within 0.2s of G1)
//! ```
//!
//! The window is anchored at the first entry of the run, not chained from
//! entry to entry.
//!
//! # Resynchronization
//!
//! After every effective undo or redo the timeline raises the edit flag,
//! rebuilds the document's derived indices, clears the selection unless the
//! note tool is active, recenters the viewport on the focus entity when it
//! is off screen, and (with [`HistoryConfig::sync_view_scope`]) switches the
//! view scope to the focus entity's scope.

use std::fmt;
use std::time::Duration;

use chartedit_model::Entity;

use crate::action::Action;
use crate::clock::{Clock, SessionClock, duration_micros};
use crate::config::HistoryConfig;
use crate::context::{EditorContext, Tool};
use crate::group::ActionGroup;

#[derive(Debug, Clone)]
struct Entry {
    group: ActionGroup,
    timestamp: Duration,
}

/// What one merged undo or redo gesture did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Number of history entries reverted or replayed.
    pub groups: usize,
    /// Number of actions revoked or invoked across those entries.
    pub actions: usize,
    /// Entity the view was focused on.
    pub focus: Entity,
}

/// Undo/redo history for one editing session.
pub struct Timeline<C: Clock = SessionClock> {
    entries: Vec<Entry>,
    /// Number of entries in the "done" region (`history_point + 1`).
    done: usize,
    config: HistoryConfig,
    clock: C,
}

impl<C: Clock> fmt::Debug for Timeline<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("len", &self.entries.len())
            .field("history_point", &self.history_point())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl Timeline {
    /// Create an empty timeline timed by a fresh [`SessionClock`].
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self::with_clock(config, SessionClock::new())
    }
}

impl<C: Clock> Timeline<C> {
    /// Create an empty timeline timed by `clock`.
    #[must_use]
    pub fn with_clock(config: HistoryConfig, clock: C) -> Self {
        Self {
            entries: Vec::new(),
            done: 0,
            config,
            clock,
        }
    }

    // ========================================================================
    // Core Operations
    // ========================================================================

    /// Record an already-applied group.
    ///
    /// Discards every redo-able entry, then appends `group` stamped with the
    /// current session time.
    pub fn insert(&mut self, group: ActionGroup) {
        let discarded = self.entries.len() - self.done;
        self.entries.truncate(self.done);

        let now = self.clock.now();
        let timestamp = match self.entries.last() {
            Some(last) => now.max(last.timestamp),
            None => now,
        };
        let actions = group.len();
        self.entries.push(Entry { group, timestamp });
        self.done += 1;

        tracing::debug!(
            target: "chartedit.history",
            actions,
            discarded,
            history_point = self.done - 1,
            timestamp_us = duration_micros(timestamp),
            "history insert"
        );
    }

    /// Record a single already-applied action as its own group.
    pub fn insert_action(&mut self, action: Action) {
        self.insert(ActionGroup::from(action));
    }

    /// Revert the most recent run of entries. Returns `false` when there is
    /// nothing to undo.
    pub fn undo<X: EditorContext + ?Sized>(&mut self, ctx: &mut X) -> bool {
        self.undo_step(ctx).is_some()
    }

    /// Replay the next run of undone entries. Returns `false` when there is
    /// nothing to redo.
    pub fn redo<X: EditorContext + ?Sized>(&mut self, ctx: &mut X) -> bool {
        self.redo_step(ctx).is_some()
    }

    /// [`undo`](Self::undo), reporting what was reverted.
    pub fn undo_step<X: EditorContext + ?Sized>(&mut self, ctx: &mut X) -> Option<StepReport> {
        let Some(latest) = self.done.checked_sub(1) else {
            tracing::debug!(target: "chartedit.history", actions = 0u64, "undo: nothing to undo");
            return None;
        };
        let _span = tracing::debug_span!("history.undo", from = latest).entered();

        ctx.mark_edit_occurred();
        let window = self.config.action_window();
        let anchor = self.entries[latest].timestamp;

        let mut groups = 0usize;
        let mut actions = 0usize;
        let mut focus = None;
        while let Some(index) = self.done.checked_sub(1) {
            let entry = &self.entries[index];
            if groups > 0 && entry.timestamp.abs_diff(anchor) >= window {
                break;
            }
            focus = Some(entry.group.revert(ctx.document_mut()));
            groups += 1;
            actions += entry.group.len();
            self.done = index;
        }

        // The anchor entry is always reverted, so a focus exists.
        let focus = focus?.clone();
        resync(&self.config, ctx, &focus);

        tracing::debug!(
            target: "chartedit.history",
            groups,
            actions,
            history_point = ?self.history_point(),
            focus = %focus,
            "undo applied"
        );
        Some(StepReport {
            groups,
            actions,
            focus,
        })
    }

    /// [`redo`](Self::redo), reporting what was replayed.
    pub fn redo_step<X: EditorContext + ?Sized>(&mut self, ctx: &mut X) -> Option<StepReport> {
        if !self.can_redo() {
            tracing::debug!(target: "chartedit.history", actions = 0u64, "redo: nothing to redo");
            return None;
        }
        let _span = tracing::debug_span!("history.redo", from = self.done).entered();

        ctx.mark_edit_occurred();
        let window = self.config.action_window();
        let anchor = self.entries[self.done].timestamp;

        let mut groups = 0usize;
        let mut actions = 0usize;
        let mut focus = None;
        while let Some(entry) = self.entries.get(self.done) {
            if groups > 0 && entry.timestamp.abs_diff(anchor) >= window {
                break;
            }
            self.done += 1;
            focus = Some(entry.group.apply(ctx.document_mut()));
            groups += 1;
            actions += entry.group.len();
        }

        let focus = focus?.clone();
        resync(&self.config, ctx, &focus);

        tracing::debug!(
            target: "chartedit.history",
            groups,
            actions,
            history_point = ?self.history_point(),
            focus = %focus,
            "redo applied"
        );
        Some(StepReport {
            groups,
            actions,
            focus,
        })
    }

    /// Whether there is a done entry to revert.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.done > 0
    }

    /// Whether there is an undone entry to replay.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.done < self.entries.len()
    }

    // ========================================================================
    // Info
    // ========================================================================

    /// Index of the most recent done entry; `None` before the first entry.
    #[must_use]
    pub fn history_point(&self) -> Option<usize> {
        self.done.checked_sub(1)
    }

    /// Number of entries that can be undone.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.done
    }

    /// Number of entries that can be redone.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.entries.len() - self.done
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert timestamps of all entries, oldest first.
    pub fn timestamps(&self) -> impl Iterator<Item = Duration> + '_ {
        self.entries.iter().map(|e| e.timestamp)
    }

    /// Descriptions of undo-able entries, most recent first.
    pub fn undo_descriptions(&self, limit: usize) -> Vec<&str> {
        self.entries[..self.done]
            .iter()
            .rev()
            .take(limit)
            .map(|e| e.group.description())
            .collect()
    }

    /// Descriptions of redo-able entries, next redo first.
    pub fn redo_descriptions(&self, limit: usize) -> Vec<&str> {
        self.entries[self.done..]
            .iter()
            .take(limit)
            .map(|e| e.group.description())
            .collect()
    }

    #[must_use]
    pub fn next_undo_description(&self) -> Option<&str> {
        self.history_point()
            .map(|i| self.entries[i].group.description())
    }

    #[must_use]
    pub fn next_redo_description(&self) -> Option<&str> {
        self.entries.get(self.done).map(|e| e.group.description())
    }

    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Drop all history.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.done = 0;
    }
}

/// Bring derived editor state in line with the document after undo/redo.
fn resync<X: EditorContext + ?Sized>(config: &HistoryConfig, ctx: &mut X, focus: &Entity) {
    ctx.document_mut().rebuild_indices();

    if ctx.active_tool() != Tool::Note {
        ctx.clear_selection();
    }

    let position = focus.position();
    if !ctx.visible_range().contains(&position) {
        ctx.set_viewport_position(position);
    }

    let scope = focus.scope();
    if config.sync_view_scope && ctx.view_scope() != scope {
        ctx.set_view_scope(scope);
    }
}

// ============================================================================
// Tests
// ============================================================================
