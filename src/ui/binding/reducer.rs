//! Reducer for per-wrapper update state.

use crate::ui::mvi::Reducer;

use super::intent::BindingIntent;
use super::state::{BindingState, Settlement};

pub struct BindingReducer;

impl Reducer for BindingReducer {
    type State = BindingState;
    type Intent = BindingIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            BindingIntent::Submit {
                previous,
                requested,
            } => BindingState::Pending {
                previous,
                requested,
                in_flight: state.in_flight() + 1,
            },

            BindingIntent::Succeeded { quantity } => {
                settle(state, Settlement::Success { quantity })
            }

            BindingIntent::Failed { restored, message } => settle(
                state,
                Settlement::Rollback {
                    restored,
                    error: message,
                },
            ),
        }
    }
}

/// One outstanding call returned. Stay pending while others remain.
fn settle(state: BindingState, outcome: Settlement) -> BindingState {
    match state {
        BindingState::Pending {
            previous,
            requested,
            in_flight,
        } if in_flight > 1 => BindingState::Pending {
            previous,
            requested,
            in_flight: in_flight - 1,
        },
        BindingState::Pending { .. } => BindingState::Settled(outcome),
        // A result without a matching submit: nothing was in flight.
        other => other,
    }
}
