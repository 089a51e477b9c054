#![forbid(unsafe_code)]

//! Invertible edits over entity snapshots.
//!
//! An [`Action`] owns deep clones of the entities it touches, taken when the
//! action is built. Nothing hands out mutable access to those clones, so
//! later in-place edits of live document objects cannot reach history.
//!
//! # Primitives
//!
//! Only [`ActionKind::Add`] and [`ActionKind::Delete`] touch collections.
//! [`ActionKind::Modify`] is always lowered to a delete of one snapshot
//! followed by an add of the other:
//!
//! ```text
//! Modify.invoke  = Delete(before); Add(after)
//! Modify.revoke  = Delete(after);  Add(before)
//! ```
//!
//! # Invariants
//!
//! - The snapshot array is non-empty; a Modify holds exactly `[before, after]`.
//! - `revoke(invoke(doc)) == doc` for every action whose snapshot keys are
//!   absent from `doc` (Add) or present in `doc` (Delete, Modify).
//!
//! # Failure Modes
//!
//! - **Missing live entity**: a Delete whose snapshot no longer matches
//!   anything in the document skips that entity and carries on with the
//!   rest. The document was edited outside history; the delete is treated
//!   as already satisfied.

use std::slice;

use chartedit_model::{Document, Entity};

use crate::error::{HistoryError, Result};

/// Which edit an [`Action`] performs when invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Add,
    Delete,
    Modify,
}

impl ActionKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Delete => "Delete",
            Self::Modify => "Modify",
        }
    }
}

/// An atomic, invertible edit.
///
/// Inversion is exact only when an Add's snapshot keys are not live at
/// invoke time. Inserting over a live key replaces that entity, and the
/// revoke of such an overwriting Add deletes the key outright: the replaced
/// entity is dropped, not restored. Record a Modify when overwriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    kind: ActionKind,
    entities: Box<[Entity]>,
}

impl Action {
    /// Record the insertion of a single entity.
    #[must_use]
    pub fn add(entity: &Entity) -> Self {
        Self::single(ActionKind::Add, entity)
    }

    /// Record the insertion of several entities as one action.
    pub fn add_all<'a>(entities: impl IntoIterator<Item = &'a Entity>) -> Result<Self> {
        Self::many(ActionKind::Add, entities)
    }

    /// Record the removal of a single entity.
    #[must_use]
    pub fn delete(entity: &Entity) -> Self {
        Self::single(ActionKind::Delete, entity)
    }

    /// Record the removal of several entities as one action.
    pub fn delete_all<'a>(entities: impl IntoIterator<Item = &'a Entity>) -> Result<Self> {
        Self::many(ActionKind::Delete, entities)
    }

    /// Record the replacement of `before` by `after`.
    #[must_use]
    pub fn modify(before: &Entity, after: &Entity) -> Self {
        Self {
            kind: ActionKind::Modify,
            entities: Box::new([before.clone(), after.clone()]),
        }
    }

    fn single(kind: ActionKind, entity: &Entity) -> Self {
        Self {
            kind,
            entities: Box::new([entity.clone()]),
        }
    }

    fn many<'a>(kind: ActionKind, entities: impl IntoIterator<Item = &'a Entity>) -> Result<Self> {
        let entities: Box<[Entity]> = entities.into_iter().cloned().collect();
        if entities.is_empty() {
            return Err(HistoryError::EmptySnapshot);
        }
        Ok(Self { kind, entities })
    }

    #[must_use]
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    /// The stored snapshots. For a Modify this is `[before, after]`.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// The action that undoes this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        match self.kind {
            ActionKind::Add => Self {
                kind: ActionKind::Delete,
                entities: self.entities.clone(),
            },
            ActionKind::Delete => Self {
                kind: ActionKind::Add,
                entities: self.entities.clone(),
            },
            ActionKind::Modify => {
                let (before, after) = self.pair();
                Self::modify(after, before)
            }
        }
    }

    /// Apply the edit forward. Returns the focus entity.
    pub fn invoke(&self, doc: &mut Document) -> &Entity {
        match self.kind {
            ActionKind::Add => add_entities(doc, &self.entities),
            ActionKind::Delete => delete_entities(doc, &self.entities),
            ActionKind::Modify => {
                let (before, after) = self.pair();
                delete_entities(doc, slice::from_ref(before));
                add_entities(doc, slice::from_ref(after))
            }
        }
    }

    /// Apply the edit backward. Returns the focus entity.
    pub fn revoke(&self, doc: &mut Document) -> &Entity {
        match self.kind {
            ActionKind::Add => delete_entities(doc, &self.entities),
            ActionKind::Delete => add_entities(doc, &self.entities),
            ActionKind::Modify => {
                let (before, after) = self.pair();
                delete_entities(doc, slice::from_ref(after));
                add_entities(doc, slice::from_ref(before))
            }
        }
    }

    fn pair(&self) -> (&Entity, &Entity) {
        (&self.entities[0], &self.entities[1])
    }
}

/// Insert fresh clones of `snapshots`; returns the first snapshot.
fn add_entities<'a>(doc: &mut Document, snapshots: &'a [Entity]) -> &'a Entity {
    for snapshot in snapshots {
        doc.insert(snapshot.clone());
    }
    &snapshots[0]
}

/// Remove the live match of each snapshot, skipping missing ones; returns
/// the first snapshot.
fn delete_entities<'a>(doc: &mut Document, snapshots: &'a [Entity]) -> &'a Entity {
    for snapshot in snapshots {
        if doc.remove(snapshot).is_none() {
            tracing::trace!(
                target: "chartedit.history",
                entity = %snapshot,
                "delete skipped: no live match"
            );
        }
    }
    &snapshots[0]
}
