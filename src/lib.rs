//! Client-side cart synchronisation.
//!
//! Keeps every cart surface of a storefront page (header badge, product-card
//! quantity steppers, the mini-cart drawer) in step with the server cart.
//! The server is the only source of truth: every successful call returns a
//! full cart snapshot and the whole page is re-rendered from it.

pub mod alert;
pub mod cart;
pub mod config;
pub mod controller;
pub mod logging;
pub mod page;
pub mod render;
pub mod ui;
