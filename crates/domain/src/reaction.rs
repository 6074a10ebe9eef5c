use crate::models::{ReactionKind, UserReactionState};

/// Outcome of one toggle step: the user's new standing plus the
/// counter deltas that must land together with the record change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub new_state: UserReactionState,
    pub approve_delta: i64,
    pub disapprove_delta: i64,
}

/// The toggle state machine:
/// none + K      -> K     (count[K] += 1)
/// K + K         -> none  (count[K] -= 1)
/// K + J (J != K)-> J     (count[K] -= 1, count[J] += 1)
pub fn transition(current: UserReactionState, requested: ReactionKind) -> Transition {
    let mut approve_delta = 0;
    let mut disapprove_delta = 0;

    match current {
        UserReactionState::Approve => approve_delta -= 1,
        UserReactionState::Disapprove => disapprove_delta -= 1,
        UserReactionState::None => {}
    }

    let new_state = if current == UserReactionState::from(requested) {
        UserReactionState::None
    } else {
        match requested {
            ReactionKind::Approve => approve_delta += 1,
            ReactionKind::Disapprove => disapprove_delta += 1,
        }
        requested.into()
    };

    Transition { new_state, approve_delta, disapprove_delta }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReactionKind::{Approve, Disapprove};
    use UserReactionState as S;

    #[test]
    fn fresh_reaction_increments_its_counter() {
        let t = transition(S::None, Approve);
        assert_eq!(t.new_state, S::Approve);
        assert_eq!((t.approve_delta, t.disapprove_delta), (1, 0));

        let t = transition(S::None, Disapprove);
        assert_eq!(t.new_state, S::Disapprove);
        assert_eq!((t.approve_delta, t.disapprove_delta), (0, 1));
    }

    #[test]
    fn repeating_the_kind_cancels() {
        let t = transition(S::Approve, Approve);
        assert_eq!(t.new_state, S::None);
        assert_eq!((t.approve_delta, t.disapprove_delta), (-1, 0));

        let t = transition(S::Disapprove, Disapprove);
        assert_eq!(t.new_state, S::None);
        assert_eq!((t.approve_delta, t.disapprove_delta), (0, -1));
    }

    #[test]
    fn opposite_kind_switches_both_counters() {
        let t = transition(S::Approve, Disapprove);
        assert_eq!(t.new_state, S::Disapprove);
        assert_eq!((t.approve_delta, t.disapprove_delta), (-1, 1));

        let t = transition(S::Disapprove, Approve);
        assert_eq!(t.new_state, S::Approve);
        assert_eq!((t.approve_delta, t.disapprove_delta), (1, -1));
    }

    #[test]
    fn toggle_twice_is_a_no_op_on_counters() {
        let first = transition(S::None, Approve);
        let second = transition(first.new_state, Approve);
        assert_eq!(second.new_state, S::None);
        assert_eq!(first.approve_delta + second.approve_delta, 0);
        assert_eq!(first.disapprove_delta + second.disapprove_delta, 0);
    }
}
