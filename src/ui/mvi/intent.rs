//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents are either user gestures that reached the network layer or
/// results coming back from it.
pub trait Intent: Send + 'static {}
