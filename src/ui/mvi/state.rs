//! Base trait for UI state.

/// Marker trait for UI state objects.
///
/// States are plain values: cloned to derive new ones, compared to detect
/// changes, and `Default` is the resting state.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
