#![forbid(unsafe_code)]

//! Editor state the timeline resynchronizes after undo and redo.
//!
//! The timeline never reaches for global state. Everything it needs besides
//! its own entries comes through an [`EditorContext`] passed by `&mut` into
//! [`Timeline::undo`](crate::Timeline::undo) and
//! [`Timeline::redo`](crate::Timeline::redo). [`EditorSession`] is the
//! concrete context an editing session owns for its whole lifetime.

use std::ops::RangeInclusive;

use chartedit_model::{Document, Entity, Tick, ViewScope};

/// Editing tool selected in the tool pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    #[default]
    Cursor,
    Eraser,
    /// Note placement. Undo/redo keep the selection while it is active.
    Note,
    Starpower,
    Bpm,
    TimeSignature,
    Section,
    Event,
}

/// Currently selected entities, as value snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    entities: Vec<Entity>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, entity: Entity) {
        if !self.entities.iter().any(|e| e.matches(&entity)) {
            self.entities.push(entity);
        }
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Visible window of the chart.
///
/// `position` is the tick under the strikeline; the view shows `span` ticks
/// ahead of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub position: Tick,
    pub span: Tick,
}

impl Default for Viewport {
    fn default() -> Self {
        // Four 4/4 measures at 192 ticks per beat.
        Self {
            position: 0,
            span: 192 * 16,
        }
    }
}

impl Viewport {
    #[must_use]
    pub fn visible_range(&self) -> RangeInclusive<Tick> {
        self.position..=self.position.saturating_add(self.span)
    }
}

/// Collaborator interface consumed by the timeline.
pub trait EditorContext {
    fn document(&self) -> &Document;

    fn document_mut(&mut self) -> &mut Document;

    fn active_tool(&self) -> Tool;

    fn clear_selection(&mut self);

    /// Ticks currently on screen.
    fn visible_range(&self) -> RangeInclusive<Tick>;

    /// Move the strikeline to `position`.
    fn set_viewport_position(&mut self, position: Tick);

    fn view_scope(&self) -> ViewScope;

    fn set_view_scope(&mut self, scope: ViewScope);

    /// Raise the "an edit happened" flag.
    fn mark_edit_occurred(&mut self);
}

/// Concrete per-session editor state.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    pub document: Document,
    pub selection: Selection,
    pub tool: Tool,
    pub viewport: Viewport,
    pub view_scope: ViewScope,
    edit_occurred: bool,
}

impl EditorSession {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tool = tool;
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_view_scope(mut self, scope: ViewScope) -> Self {
        self.view_scope = scope;
        self
    }

    #[must_use]
    pub fn edit_occurred(&self) -> bool {
        self.edit_occurred
    }

    /// Read and reset the edit flag.
    pub fn take_edit_occurred(&mut self) -> bool {
        std::mem::take(&mut self.edit_occurred)
    }
}

impl EditorContext for EditorSession {
    fn document(&self) -> &Document {
        &self.document
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    fn active_tool(&self) -> Tool {
        self.tool
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn visible_range(&self) -> RangeInclusive<Tick> {
        self.viewport.visible_range()
    }

    fn set_viewport_position(&mut self, position: Tick) {
        self.viewport.position = position;
    }

    fn view_scope(&self) -> ViewScope {
        self.view_scope
    }

    fn set_view_scope(&mut self, scope: ViewScope) {
        self.view_scope = scope;
    }

    fn mark_edit_occurred(&mut self) {
        self.edit_occurred = true;
    }
}
