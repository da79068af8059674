//! Model-View-Intent (MVI) primitives.
//!
//! Per-wrapper interaction state moves only through reducers:
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ page flags (loading)
//!    ↑                              │
//!    └──── cart call settles ───────┘
//! ```
//!
//! - **State**: immutable value describing one wrapper's interaction
//! - **Intent**: a gesture submitted or a cart call settling
//! - **Reducer**: pure function from (State, Intent) to State

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
