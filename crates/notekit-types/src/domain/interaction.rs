use serde::{Deserialize, Serialize};
use std::fmt;

use super::subject::SubjectId;

/// Toggle-style interaction a viewer can perform on a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Like,
    Collect,
    Follow,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 3] = [Self::Like, Self::Collect, Self::Follow];

    /// Follow relationships carry no public counter.
    pub fn has_counter(self) -> bool {
        !matches!(self, Self::Follow)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Collect => "collect",
            Self::Follow => "follow",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The viewer's flag plus the public counter for one interaction kind.
///
/// `count` is unsigned, so a negative counter cannot be represented; it is
/// `None` for kinds without a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionState {
    pub active: bool,
    pub count: Option<u64>,
}

impl InteractionState {
    pub fn flag(active: bool) -> Self {
        Self {
            active,
            count: None,
        }
    }

    pub fn counted(active: bool, count: u64) -> Self {
        Self {
            active,
            count: Some(count),
        }
    }

    /// Expected state after one toggle. Counters are floored at zero.
    pub fn toggled(self) -> Self {
        let active = !self.active;
        let count = self.count.map(|count| {
            if active {
                count.saturating_add(1)
            } else {
                count.saturating_sub(1)
            }
        });
        Self { active, count }
    }
}

/// Identity plus state of one (subject, kind) pair at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectSnapshot {
    pub id: SubjectId,
    pub kind: InteractionKind,
    pub state: InteractionState,
}

/// State-change notification broadcast to every holder of a subject copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum InteractionEvent {
    /// Optimistic state was applied; `previous` is what it replaced.
    Applied {
        current: SubjectSnapshot,
        previous: SubjectSnapshot,
    },
    /// Confirmation failed; `current` is the restored state and `previous`
    /// the optimistic state being undone.
    Reverted {
        current: SubjectSnapshot,
        previous: SubjectSnapshot,
    },
}

impl InteractionEvent {
    pub fn current(&self) -> &SubjectSnapshot {
        match self {
            Self::Applied { current, .. } | Self::Reverted { current, .. } => current,
        }
    }

    pub fn previous(&self) -> &SubjectSnapshot {
        match self {
            Self::Applied { previous, .. } | Self::Reverted { previous, .. } => previous,
        }
    }

    pub fn is_revert(&self) -> bool {
        matches!(self, Self::Reverted { .. })
    }
}

/// View state that can be driven by the interaction controller.
pub trait Interactive {
    /// Identifier the interaction of `kind` is keyed by. For a note this is
    /// the note id, except for `Follow`, which targets the author.
    fn subject_id(&self, kind: InteractionKind) -> &SubjectId;

    /// Current state, or `None` when the subject does not support `kind`.
    fn interaction(&self, kind: InteractionKind) -> Option<InteractionState>;

    fn set_interaction(&mut self, kind: InteractionKind, state: InteractionState);

    fn snapshot(&self, kind: InteractionKind) -> Option<SubjectSnapshot> {
        self.interaction(kind).map(|state| SubjectSnapshot {
            id: self.subject_id(kind).clone(),
            kind,
            state,
        })
    }
}

/// Apply a notification to every entry of a collection holding the same
/// subject. Entries with other ids, or that do not support the kind, are left
/// untouched. Returns the number of entries updated.
pub fn reconcile<S: Interactive>(items: &mut [S], event: &InteractionEvent) -> usize {
    let current = event.current();
    let mut updated = 0;
    for item in items.iter_mut() {
        if item.interaction(current.kind).is_none() {
            continue;
        }
        if item.subject_id(current.kind) == &current.id {
            item.set_interaction(current.kind, current.state);
            updated += 1;
        }
    }
    updated
}

/// Follow relationship between the viewer and another user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowTarget {
    pub user_id: SubjectId,
    pub is_following: bool,
}

impl FollowTarget {
    pub fn new(user_id: impl Into<SubjectId>, is_following: bool) -> Self {
        Self {
            user_id: user_id.into(),
            is_following,
        }
    }
}

impl Interactive for FollowTarget {
    fn subject_id(&self, _kind: InteractionKind) -> &SubjectId {
        &self.user_id
    }

    fn interaction(&self, kind: InteractionKind) -> Option<InteractionState> {
        match kind {
            InteractionKind::Follow => Some(InteractionState::flag(self.is_following)),
            _ => None,
        }
    }

    fn set_interaction(&mut self, kind: InteractionKind, state: InteractionState) {
        if kind == InteractionKind::Follow {
            self.is_following = state.active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_on_increments() {
        let next = InteractionState::counted(false, 3).toggled();
        assert_eq!(next, InteractionState::counted(true, 4));
    }

    #[test]
    fn test_toggle_off_floors_at_zero() {
        let next = InteractionState::counted(true, 0).toggled();
        assert_eq!(next, InteractionState::counted(false, 0));
    }

    #[test]
    fn test_toggle_twice_is_symmetric() {
        for n in [0u64, 1, 7, 1_000] {
            let start = InteractionState::counted(false, n);
            assert_eq!(start.toggled().toggled(), start);
        }
    }

    #[test]
    fn test_flag_only_state_keeps_no_counter() {
        let next = InteractionState::flag(false).toggled();
        assert_eq!(next, InteractionState::flag(true));
    }

    #[test]
    fn test_follow_target_rejects_other_kinds() {
        let target = FollowTarget::new("u1", false);
        assert!(target.interaction(InteractionKind::Like).is_none());
        assert_eq!(
            target.interaction(InteractionKind::Follow),
            Some(InteractionState::flag(false))
        );
    }

    #[test]
    fn test_reconcile_only_touches_matching_ids() {
        let mut targets = vec![
            FollowTarget::new("u1", false),
            FollowTarget::new("u2", false),
            FollowTarget::new("u1", false),
        ];
        let snapshot = |active| SubjectSnapshot {
            id: SubjectId::new("u1"),
            kind: InteractionKind::Follow,
            state: InteractionState::flag(active),
        };
        let event = InteractionEvent::Applied {
            current: snapshot(true),
            previous: snapshot(false),
        };

        assert_eq!(reconcile(&mut targets, &event), 2);
        assert!(targets[0].is_following);
        assert!(!targets[1].is_following);
        assert!(targets[2].is_following);
    }
}
