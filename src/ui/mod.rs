//! Per-wrapper interaction state.

pub mod binding;
pub mod mvi;
