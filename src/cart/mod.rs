//! Cart resource: snapshot model, endpoint client, errors.

mod client;
mod error;
mod model;

pub use client::{CartApi, HttpCartClient};
pub use error::{CartError, CartOperation};
pub use model::{CartSnapshot, LineItem, VariantId};
