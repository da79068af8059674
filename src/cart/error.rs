//! Error types for cart endpoint calls.
//!
//! Every failure carries a best-effort human readable message for the
//! shopper (`user_message`) while `Display` keeps the technical detail for
//! logs.

use thiserror::Error;

/// Which cart endpoint a call went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Fetch,
    Update,
    Clear,
}

impl CartOperation {
    /// Message shown when the server gave nothing better.
    pub fn generic_message(self) -> &'static str {
        match self {
            CartOperation::Fetch => "Failed to fetch cart",
            CartOperation::Update => "Could not update cart.",
            CartOperation::Clear => "Could not clear cart",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CartOperation::Fetch => "fetch",
            CartOperation::Update => "update",
            CartOperation::Clear => "clear",
        }
    }
}

impl std::fmt::Display for CartOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while talking to the cart endpoints.
#[derive(Debug, Error)]
pub enum CartError {
    /// Request never produced a response (DNS, connect, reset, ...).
    #[error("Cart {operation} request failed: {source}")]
    Transport {
        operation: CartOperation,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success status with a JSON body naming the problem.
    #[error("Cart {operation} rejected with status {status}: {message}")]
    Rejected {
        operation: CartOperation,
        status: u16,
        message: String,
    },

    /// Non-success status without a usable error body.
    #[error("Cart {operation} failed with status {status}")]
    Status { operation: CartOperation, status: u16 },

    /// Success status but the body was not a cart snapshot.
    #[error("Cart {operation} returned an unreadable body: {reason}")]
    Decode {
        operation: CartOperation,
        reason: String,
    },

    /// HTTP client could not be constructed.
    #[error("Failed to build cart HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Store URL could not be joined with an endpoint path.
    #[error("Invalid cart endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

impl CartError {
    pub fn operation(&self) -> Option<CartOperation> {
        match self {
            CartError::Transport { operation, .. }
            | CartError::Rejected { operation, .. }
            | CartError::Status { operation, .. }
            | CartError::Decode { operation, .. } => Some(*operation),
            CartError::Client(_) | CartError::InvalidEndpoint { .. } => None,
        }
    }

    /// Message suitable for a user-facing alert.
    pub fn user_message(&self) -> String {
        match self {
            CartError::Rejected { message, .. } => message.clone(),
            other => other
                .operation()
                .unwrap_or(CartOperation::Update)
                .generic_message()
                .to_string(),
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            CartError::Rejected { status, .. } | CartError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
