//! Intents for one quantity-control wrapper.

use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum BindingIntent {
    /// An update call was issued after the input was set optimistically.
    Submit {
        /// Value shown before the optimistic change.
        previous: u32,
        /// Value sent to the server.
        requested: u32,
    },

    /// The server accepted an update.
    Succeeded {
        /// Quantity the wrapper settled on.
        quantity: u32,
    },

    /// An update failed and the input was rolled back.
    Failed {
        /// Value the input was restored to.
        restored: u32,
        /// Message shown to the shopper.
        message: String,
    },
}

impl Intent for BindingIntent {}
