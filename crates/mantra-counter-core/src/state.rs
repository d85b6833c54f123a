//! Counter state and its transitions.
//!
//! Every operation takes the current state by reference and returns the next
//! state together with the side effects the shell must carry out. Mutations
//! always request a `Persist`; the target-reached check runs only on
//! increment.

use serde::{Deserialize, Serialize};

use crate::effect::{Alert, AlertKind, Effect};
use crate::error::{DecodeIssue, TargetError};
use crate::record::{PersistedRecord, Snapshot};
use crate::types::Target;

/// Whether the target is being edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    #[default]
    Idle,
    Editing,
}

/// The in-memory counter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    count: u64,
    target: Target,
    mode: EditMode,
}

/// The outcome of an operation: the next state plus requested effects.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Transition {
    pub state: CounterState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn persisted(state: CounterState) -> Self {
        Self {
            state,
            effects: vec![Effect::Persist(state.snapshot())],
        }
    }

    fn quiet(state: CounterState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    /// Check if this transition fired the target-reached event.
    pub fn reached_target(&self) -> bool {
        self.effects
            .iter()
            .any(|e| matches!(e, Effect::Alert(a) if a.kind == AlertKind::TargetReached))
    }
}

impl CounterState {
    /// Create an idle state.
    pub fn new(count: u64, target: Target) -> Self {
        Self {
            count,
            target,
            mode: EditMode::Idle,
        }
    }

    /// Rebuild state from what storage returned.
    pub fn restore(record: &PersistedRecord, default_target: Target) -> (Self, Vec<DecodeIssue>) {
        let (snapshot, issues) = record.decode(default_target);
        (Self::from(snapshot), issues)
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    /// The durable part of the state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            count: self.count,
            target: self.target,
        }
    }

    /// Add one to the count.
    ///
    /// Fires the target-reached event only when the new count lands exactly
    /// on the target. Counts already past the target never fire.
    pub fn increment(&self) -> Transition {
        let before = self.count;
        let next = Self {
            count: before.saturating_add(1),
            ..*self
        };

        let mut transition = Transition::persisted(next);
        let target = self.target.get();
        if next.count > before && next.count == target {
            transition.effects.push(Effect::Vibrate);
            transition
                .effects
                .push(Effect::Alert(Alert::target_reached(target)));
        }
        transition
    }

    /// Set the count back to zero. Never fires the target-reached event.
    pub fn reset(&self) -> Transition {
        Transition::persisted(Self { count: 0, ..*self })
    }

    /// Enter editing mode.
    pub fn begin_edit(&self) -> Transition {
        Transition::quiet(Self {
            mode: EditMode::Editing,
            ..*self
        })
    }

    /// Leave editing mode without changing the target.
    pub fn cancel_edit(&self) -> Transition {
        Transition::quiet(Self {
            mode: EditMode::Idle,
            ..*self
        })
    }

    /// Commit a new target from user text.
    ///
    /// On error the caller keeps the current state unchanged.
    pub fn submit_target(&self, candidate: &str) -> Result<Transition, TargetError> {
        let target = Target::parse(candidate)?;
        Ok(Transition::persisted(Self {
            target,
            mode: EditMode::Idle,
            ..*self
        }))
    }
}

impl Default for CounterState {
    fn default() -> Self {
        Self::new(0, Target::default())
    }
}

impl From<Snapshot> for CounterState {
    fn from(snapshot: Snapshot) -> Self {
        Self::new(snapshot.count, snapshot.target)
    }
}
