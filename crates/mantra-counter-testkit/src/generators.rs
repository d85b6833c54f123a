//! Proptest generators for property-based testing.

use proptest::prelude::*;

use mantra_counter_core::{CounterState, Target, TargetError, Transition};

/// Generate a valid target.
pub fn target() -> impl Strategy<Value = Target> {
    (1u64..=10_000).prop_map(|n| Target::new(n).unwrap())
}

/// Generate text that parses as a positive target.
pub fn valid_target_text() -> impl Strategy<Value = String> {
    (1u64..=1_000_000, " {0,2}", "([a-z .][a-z0-9 .]{0,6})?")
        .prop_map(|(n, before, rest)| format!("{}{}{}", before, n, rest))
}

/// Generate text that must be rejected as a target.
pub fn invalid_target_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("0".to_string()),
        (1i64..=1_000_000).prop_map(|n| format!("-{}", n)),
        "[a-zA-Z][a-zA-Z0-9 ]{0,10}",
        Just(String::new()),
        (1u32..100).prop_map(|n| format!("0.{}", n)),
    ]
}

/// A user action against the counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Increment,
    Reset,
    BeginEdit,
    CancelEdit,
    SetTarget(String),
}

impl Op {
    /// Apply to a pure state. Rejected targets return `Err`.
    pub fn apply(&self, state: &CounterState) -> Result<Transition, TargetError> {
        match self {
            Op::Increment => Ok(state.increment()),
            Op::Reset => Ok(state.reset()),
            Op::BeginEdit => Ok(state.begin_edit()),
            Op::CancelEdit => Ok(state.cancel_edit()),
            Op::SetTarget(text) => state.submit_target(text),
        }
    }
}

impl Arbitrary for Op {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            8 => Just(Op::Increment),
            1 => Just(Op::Reset),
            1 => Just(Op::BeginEdit),
            1 => Just(Op::CancelEdit),
            1 => (1u64..=20).prop_map(|n| Op::SetTarget(n.to_string())),
            1 => invalid_target_text().prop_map(Op::SetTarget),
        ]
        .boxed()
    }
}

/// Generate a sequence of user actions.
pub fn ops(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(any::<Op>(), 0..=max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_valid_text_parses(text in valid_target_text()) {
            prop_assert!(Target::parse(&text).is_ok());
        }

        #[test]
        fn test_invalid_text_rejected(text in invalid_target_text()) {
            prop_assert!(Target::parse(&text).is_err());
        }

        #[test]
        fn test_fires_only_on_landing(ops in ops(200)) {
            let mut state = CounterState::default();
            for op in &ops {
                let before = state;
                match op.apply(&state) {
                    Ok(t) => {
                        let expected = *op == Op::Increment
                            && before.count() + 1 == before.target().get();
                        prop_assert_eq!(t.reached_target(), expected);
                        state = t.state;
                    }
                    Err(_) => prop_assert!(matches!(op, Op::SetTarget(_))),
                }
                prop_assert!(state.target().get() >= 1);
            }
        }
    }
}
