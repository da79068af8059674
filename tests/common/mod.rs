//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use cartsync::alert::RecordedAlerts;
use cartsync::cart::{CartApi, CartError, CartOperation, CartSnapshot, LineItem, VariantId};
use cartsync::config::Config;
use cartsync::controller::CartController;
use cartsync::page::{Page, SharedPage};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Unit price the fake store charges for every variant, in minor units.
pub const UNIT_PRICE: u64 = 500;

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

// -- Snapshot builders ---------------------------------------------------------

pub fn line(variant: &str, quantity: u32) -> LineItem {
    LineItem {
        variant_id: VariantId::from(variant),
        quantity,
        product_title: format!("Product {}", variant),
        url: format!("/products/{}", variant.to_lowercase()),
        image: None,
        final_line_price: UNIT_PRICE * u64::from(quantity),
    }
}

/// Consistent snapshot for `(variant, quantity)` pairs, zero lines dropped.
pub fn snapshot(lines: &[(&str, u32)]) -> CartSnapshot {
    let items: Vec<LineItem> = lines
        .iter()
        .filter(|(_, quantity)| *quantity > 0)
        .map(|(variant, quantity)| line(variant, *quantity))
        .collect();
    CartSnapshot {
        item_count: items.iter().map(|item| item.quantity).sum(),
        total_price: items.iter().map(|item| item.final_line_price).sum(),
        items,
    }
}

// -- Fake cart -----------------------------------------------------------------

/// A call the fake received, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Fetch,
    Update { variant: String, quantity: u32 },
    Clear,
}

/// How the fake should fail a scripted call.
#[derive(Debug, Clone)]
pub enum Failure {
    /// Server refused with a readable message (stock limit etc.).
    Rejected(String),
    /// Server answered with a bare status.
    Status(u16),
}

/// Behaviour of the next call, consumed in order.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    pub delay: Duration,
    pub failure: Option<Failure>,
}

impl Scripted {
    pub fn delay_ms(ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(ms),
            failure: None,
        }
    }

    pub fn rejected(message: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            failure: Some(Failure::Rejected(message.to_string())),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            delay: Duration::ZERO,
            failure: Some(Failure::Status(status)),
        }
    }
}

#[derive(Default)]
struct FakeState {
    lines: Mutex<Vec<(String, u32)>>,
    calls: Mutex<Vec<Call>>,
    script: Mutex<VecDeque<Scripted>>,
}

/// In-memory store. Applies writes when a call arrives and answers with the
/// snapshot taken at that moment, after the scripted delay.
#[derive(Clone, Default)]
pub struct FakeCart {
    state: Arc<FakeState>,
}

impl FakeCart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lines(lines: &[(&str, u32)]) -> Self {
        let cart = Self::new();
        *cart.state.lines.lock() = lines
            .iter()
            .filter(|(_, quantity)| *quantity > 0)
            .map(|(variant, quantity)| (variant.to_string(), *quantity))
            .collect();
        cart
    }

    pub fn script(&self, next: Scripted) {
        self.state.script.lock().push_back(next);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.calls.lock().clone()
    }

    pub fn update_calls(&self) -> Vec<(String, u32)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Update { variant, quantity } => Some((variant, quantity)),
                _ => None,
            })
            .collect()
    }

    pub fn server_snapshot(&self) -> CartSnapshot {
        let lines = self.state.lines.lock();
        let pairs: Vec<(&str, u32)> = lines.iter().map(|(v, q)| (v.as_str(), *q)).collect();
        snapshot(&pairs)
    }

    /// Record the call and, unless it is scripted to fail, apply it.
    fn arrive(&self, call: Call) -> (Scripted, CartSnapshot) {
        self.state.calls.lock().push(call.clone());
        let scripted = self.state.script.lock().pop_front().unwrap_or_default();

        if scripted.failure.is_none() {
            let mut lines = self.state.lines.lock();
            match call {
                Call::Fetch => {}
                Call::Clear => lines.clear(),
                Call::Update { variant, quantity } => {
                    match lines.iter().position(|(v, _)| *v == variant) {
                        Some(pos) if quantity == 0 => {
                            lines.remove(pos);
                        }
                        Some(pos) => lines[pos].1 = quantity,
                        None if quantity > 0 => lines.push((variant, quantity)),
                        None => {}
                    }
                }
            }
        }

        (scripted, self.server_snapshot())
    }

    async fn answer(
        &self,
        operation: CartOperation,
        call: Call,
    ) -> Result<CartSnapshot, CartError> {
        let (scripted, snapshot) = self.arrive(call);
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        match scripted.failure {
            None => Ok(snapshot),
            Some(Failure::Rejected(message)) => Err(CartError::Rejected {
                operation,
                status: 422,
                message,
            }),
            Some(Failure::Status(status)) => Err(CartError::Status { operation, status }),
        }
    }
}

impl CartApi for FakeCart {
    async fn fetch_cart(&self) -> Result<CartSnapshot, CartError> {
        self.answer(CartOperation::Fetch, Call::Fetch).await
    }

    async fn set_variant_quantity(
        &self,
        variant_id: &VariantId,
        quantity: u32,
    ) -> Result<CartSnapshot, CartError> {
        let call = Call::Update {
            variant: variant_id.to_string(),
            quantity,
        };
        self.answer(CartOperation::Update, call).await
    }

    async fn clear_cart(&self) -> Result<CartSnapshot, CartError> {
        self.answer(CartOperation::Clear, Call::Clear).await
    }
}

// -- Controller builders -------------------------------------------------------

pub struct Harness {
    pub controller: CartController<FakeCart>,
    pub cart: FakeCart,
    pub alerts: Arc<RecordedAlerts>,
    pub page: SharedPage,
}

/// Controller over `cart` and `page` with default timings.
pub fn harness(cart: FakeCart, page: Page) -> Harness {
    let page = page.into_shared();
    let alerts = Arc::new(RecordedAlerts::new());
    let controller = CartController::new(
        cart.clone(),
        Arc::clone(&page),
        alerts.clone(),
        &Config::default(),
    );
    Harness {
        controller,
        cart,
        alerts,
        page,
    }
}
