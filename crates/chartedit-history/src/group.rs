#![forbid(unsafe_code)]

//! Ordered batches of actions that apply and revert as one edit.

use std::fmt;

use chartedit_model::{Document, Entity};

use crate::action::Action;
use crate::error::{HistoryError, Result};

/// A non-empty sequence of actions recorded for one user gesture.
///
/// Applying runs actions first to last; reverting runs them last to first.
#[derive(Clone, PartialEq, Eq)]
pub struct ActionGroup {
    actions: Vec<Action>,
    description: Option<String>,
}

impl fmt::Debug for ActionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionGroup")
            .field("actions_count", &self.actions.len())
            .field("description", &self.description())
            .finish()
    }
}

impl ActionGroup {
    /// Build a group. Fails with [`HistoryError::EmptyGroup`] when `actions`
    /// is empty.
    pub fn new(actions: Vec<Action>) -> Result<Self> {
        if actions.is_empty() {
            return Err(HistoryError::EmptyGroup);
        }
        Ok(Self {
            actions,
            description: None,
        })
    }

    /// Attach a human-readable label for history listings.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The attached label, or the kind of the first action.
    #[must_use]
    pub fn description(&self) -> &str {
        match &self.description {
            Some(d) => d,
            None => self.actions[0].kind().name(),
        }
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Always `false`; groups are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Invoke every action in order. Returns the focus of the last action.
    pub fn apply(&self, doc: &mut Document) -> &Entity {
        let (last, rest) = self.split_last();
        for action in rest {
            action.invoke(doc);
        }
        last.invoke(doc)
    }

    /// Revoke every action in reverse order. Returns the focus of the first
    /// action, which is processed last.
    pub fn revert(&self, doc: &mut Document) -> &Entity {
        let (first, rest) = self.split_first();
        for action in rest.iter().rev() {
            action.revoke(doc);
        }
        first.revoke(doc)
    }

    fn split_first(&self) -> (&Action, &[Action]) {
        let (first, rest) = self.actions.split_at(1);
        (&first[0], rest)
    }

    fn split_last(&self) -> (&Action, &[Action]) {
        let (rest, last) = self.actions.split_at(self.actions.len() - 1);
        (&last[0], rest)
    }
}

impl From<Action> for ActionGroup {
    fn from(action: Action) -> Self {
        Self {
            actions: vec![action],
            description: None,
        }
    }
}

impl TryFrom<Vec<Action>> for ActionGroup {
    type Error = HistoryError;

    fn try_from(actions: Vec<Action>) -> Result<Self> {
        Self::new(actions)
    }
}
