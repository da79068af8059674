//! Interaction state of one quantity-control wrapper.

use crate::ui::mvi::UiState;

/// How the last update for a wrapper ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    Success { quantity: u32 },
    Rollback { restored: u32, error: String },
}

/// `Idle → Pending → Settled(Success | Rollback)`
///
/// Updates are not cancelled once sent, so a wrapper can have more than one
/// call outstanding; it settles when the last of them returns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BindingState {
    /// Never submitted an update.
    #[default]
    Idle,

    /// At least one update call is outstanding.
    Pending {
        previous: u32,
        requested: u32,
        in_flight: u32,
    },

    /// All calls have returned; holds the outcome of the last one.
    Settled(Settlement),
}

impl UiState for BindingState {}

impl BindingState {
    /// Drives the wrapper's `--loading` class.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    pub fn in_flight(&self) -> u32 {
        match self {
            Self::Pending { in_flight, .. } => *in_flight,
            _ => 0,
        }
    }

    pub fn settlement(&self) -> Option<&Settlement> {
        match self {
            Self::Settled(settlement) => Some(settlement),
            _ => None,
        }
    }
}
