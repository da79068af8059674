//! Reducer trait.

use super::intent::Intent;
use super::state::UiState;

/// The only place where state transitions happen.
///
/// Must be pure: (State, Intent) -> State, no I/O and no timers.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
