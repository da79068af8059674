//! Interaction controller.
//!
//! Turns gestures into cart calls. Quantity changes are applied to the page
//! optimistically, the wrapper is flagged loading while the call is out, and
//! the outcome either re-renders every surface from the returned snapshot or
//! rolls the input back and alerts the shopper.
//!
//! Must be used from within a tokio runtime: typed input and transient
//! flags are driven by spawned timer tasks.

pub mod dispatch;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::alert::Alert;
use crate::cart::{CartApi, CartSnapshot, VariantId};
use crate::config::Config;
use crate::page::{BindingId, BindingKind, PageView, SharedPage, ViewCartLink};
use crate::render::{apply_cart_to_ui, MoneyFormat};
use crate::ui::binding::{BindingIntent, BindingReducer, BindingState};
use crate::ui::mvi::Reducer;

pub use dispatch::{route, Action, Gesture, GestureOutcome, Route, Target};

const SETTLE_POLL: Duration = Duration::from_millis(10);
const VIEW_CART_LABEL: &str = "View Cart";

/// Run a reducer over a slot's state in place.
macro_rules! dispatch_mvi {
    ($slot:expr, $reducer:ty, $intent:expr) => {
        $slot.state = <$reducer>::reduce(std::mem::take(&mut $slot.state), $intent);
    };
}

/// Debounced typed quantity waiting to be sent.
struct PendingInput {
    generation: u64,
    /// Input value before the first keystroke of this burst.
    rollback_to: u32,
    handle: JoinHandle<()>,
}

/// Controller-owned runtime state of one wrapper.
///
/// Created on first interaction. Dropped once its wrapper has left the page
/// and it has no armed debounce or outstanding call.
#[derive(Default)]
struct BindingSlot {
    state: BindingState,
    debounce: Option<PendingInput>,
    generation: u64,
    ok_timer: Option<JoinHandle<()>>,
    message_timer: Option<JoinHandle<()>>,
}

impl BindingSlot {
    fn is_busy(&self) -> bool {
        self.debounce.is_some() || self.state.is_pending()
    }

    fn replace_ok_timer(&mut self, handle: JoinHandle<()>) {
        if let Some(old) = self.ok_timer.replace(handle) {
            old.abort();
        }
    }

    fn replace_message_timer(&mut self, handle: JoinHandle<()>) {
        if let Some(old) = self.message_timer.replace(handle) {
            old.abort();
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Timing {
    debounce: Duration,
    ok_flash: Duration,
    message_visible: Duration,
}

struct Inner<C> {
    client: C,
    page: SharedPage,
    alert: Arc<dyn Alert>,
    money: MoneyFormat,
    timing: Timing,
    view_cart_href: String,
    slots: Mutex<HashMap<BindingId, BindingSlot>>,
}

/// Cheap to clone; clones share the page and all per-wrapper state.
pub struct CartController<C> {
    inner: Arc<Inner<C>>,
}

impl<C> Clone for CartController<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Transient message for a settled quantity.
pub fn qty_message_text(quantity: u32) -> String {
    match quantity {
        0 => "Item removed".to_string(),
        1 => "1 × Item added".to_string(),
        n => format!("{} × Items added", n),
    }
}

impl<C: CartApi> CartController<C> {
    pub fn new(client: C, page: SharedPage, alert: Arc<dyn Alert>, config: &Config) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                page,
                alert,
                money: MoneyFormat::new(&config.money),
                timing: Timing {
                    debounce: config.debounce(),
                    ok_flash: config.ok_flash(),
                    message_visible: config.message_visible(),
                },
                view_cart_href: format!("{}cart", config.store.normalized_root()),
                slots: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn page(&self) -> SharedPage {
        Arc::clone(&self.inner.page)
    }

    pub fn view(&self) -> PageView {
        self.inner.page.lock().view()
    }

    pub fn binding_state(&self, binding: BindingId) -> BindingState {
        self.inner
            .slots
            .lock()
            .get(&binding)
            .map(|slot| slot.state.clone())
            .unwrap_or_default()
    }

    /// Number of wrappers with controller-side state.
    pub fn tracked_bindings(&self) -> usize {
        self.inner.slots.lock().len()
    }

    /// Whether any debounce timer is armed or any update call is outstanding.
    pub fn has_pending_work(&self) -> bool {
        self.inner
            .slots
            .lock()
            .values()
            .any(BindingSlot::is_busy)
    }

    /// Wait until every debounced input has fired and every update returned.
    pub async fn settled(&self) {
        while self.has_pending_work() {
            tokio::time::sleep(SETTLE_POLL).await;
        }
    }

    /// Page-load sync. Failures keep the server-rendered page as is.
    pub async fn hydrate(&self) {
        match self.inner.client.fetch_cart().await {
            Ok(cart) => self.render(&cart),
            Err(err) => {
                tracing::debug!(error = %err, "Cart hydration failed, keeping rendered state");
            }
        }
    }

    /// Route a gesture and run its handler.
    ///
    /// Click handlers complete before this returns; typed input only arms the
    /// wrapper's debounce timer.
    pub async fn handle(&self, gesture: Gesture) -> GestureOutcome {
        let Some(route) = dispatch::route(gesture) else {
            return GestureOutcome::Ignored;
        };

        match route.action {
            Action::Step { binding, step } => self.step(binding, step).await,
            Action::TypeQuantity { binding, value } => self.type_quantity(binding, &value),
            Action::OpenDrawer => self.open_drawer().await,
            Action::CloseDrawer => self.close_drawer(),
            Action::ClearCart => self.clear_cart().await,
            Action::RemoveLine { variant_id } => self.remove_line(&variant_id).await,
        }

        GestureOutcome::Handled {
            prevent_default: route.prevent_default,
        }
    }

    /// `+`/`-` stepper: `max(min, current + step)`, no call when unchanged.
    pub async fn step(&self, binding: BindingId, step: i64) {
        let (variant_id, previous, requested) = {
            let mut page = self.inner.page.lock();
            let Some(wrapper) = page.binding_mut(binding) else {
                return;
            };
            let (Some(variant_id), Some(input)) =
                (wrapper.variant_id.clone(), wrapper.input.as_mut())
            else {
                return;
            };
            let previous = input.value;
            let next = input.stepped(step);
            if next == previous {
                return;
            }
            input.value = next;
            (variant_id, previous, next)
        };

        self.transition(
            binding,
            BindingIntent::Submit {
                previous,
                requested,
            },
        );
        self.send_update(binding, variant_id, previous, requested).await;
    }

    /// Keystroke in a quantity input: normalise now, send after the debounce.
    pub fn type_quantity(&self, binding: BindingId, raw: &str) {
        let (variant_id, before, value) = {
            let mut page = self.inner.page.lock();
            let Some(wrapper) = page.binding_mut(binding) else {
                return;
            };
            let (Some(variant_id), Some(input)) =
                (wrapper.variant_id.clone(), wrapper.input.as_mut())
            else {
                return;
            };
            let before = input.value;
            let value = input.normalize(raw);
            input.value = value;
            (variant_id, before, value)
        };

        let mut slots = self.inner.slots.lock();
        let slot = slots.entry(binding).or_default();
        let rollback_to = match slot.debounce.take() {
            Some(pending) => {
                pending.handle.abort();
                tracing::trace!(%binding, "Debounce restarted");
                pending.rollback_to
            }
            None => before,
        };
        slot.generation += 1;
        let generation = slot.generation;

        let controller = self.clone();
        let delay = self.inner.timing.debounce;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if controller.fire_debounce(binding, generation, rollback_to, value) {
                controller
                    .send_update(binding, variant_id, rollback_to, value)
                    .await;
            }
        });

        slot.debounce = Some(PendingInput {
            generation,
            rollback_to,
            handle,
        });
    }

    /// Fetch the latest cart, render it, then open the drawer.
    pub async fn open_drawer(&self) {
        match self.inner.client.fetch_cart().await {
            Ok(cart) => self.render(&cart),
            Err(err) => {
                tracing::warn!(error = %err, "Could not refresh cart before opening drawer");
                self.inner.alert.alert(&err.user_message());
            }
        }

        if let Some(drawer) = self.inner.page.lock().drawer.as_mut() {
            drawer.open();
        }
    }

    pub fn close_drawer(&self) {
        if let Some(drawer) = self.inner.page.lock().drawer.as_mut() {
            drawer.close();
        }
    }

    pub async fn clear_cart(&self) {
        match self.inner.client.clear_cart().await {
            Ok(cart) => self.render(&cart),
            Err(err) => {
                tracing::warn!(error = %err, "Clearing cart failed");
                self.inner.alert.alert(&err.user_message());
            }
        }
    }

    /// Drawer trash button: set the line to 0 with the button disabled.
    pub async fn remove_line(&self, variant_id: &VariantId) {
        self.set_remove_disabled(variant_id, true);

        match self.inner.client.set_variant_quantity(variant_id, 0).await {
            Ok(cart) => self.render(&cart),
            Err(err) => {
                tracing::warn!(%variant_id, error = %err, "Removing cart line failed");
                self.inner.alert.alert(&err.user_message());
            }
        }

        self.set_remove_disabled(variant_id, false);
    }

    fn render(&self, cart: &CartSnapshot) {
        let live: HashSet<BindingId> = {
            let mut page = self.inner.page.lock();
            apply_cart_to_ui(&mut page, cart, &self.inner.money);
            page.bindings().map(|wrapper| wrapper.id).collect()
        };

        // Drawer re-renders replace line wrappers; forget the idle ones.
        self.inner
            .slots
            .lock()
            .retain(|id, slot| live.contains(id) || slot.is_busy());
    }

    async fn send_update(
        &self,
        binding: BindingId,
        variant_id: VariantId,
        previous: u32,
        requested: u32,
    ) {
        match self
            .inner
            .client
            .set_variant_quantity(&variant_id, requested)
            .await
        {
            Ok(cart) => {
                self.render(&cart);
                self.show_qty_message(binding, requested);
                self.flash_ok(binding);
                self.transition(
                    binding,
                    BindingIntent::Succeeded {
                        quantity: cart.quantity_of(variant_id.as_str()),
                    },
                );
            }
            Err(err) => {
                tracing::warn!(%variant_id, requested, error = %err, "Quantity update failed");
                let message = err.user_message();
                self.inner.alert.alert(&message);
                self.restore_input(binding, previous);
                self.transition(
                    binding,
                    BindingIntent::Failed {
                        restored: previous,
                        message,
                    },
                );
            }
        }
    }

    /// Claim the debounce slot for `generation` and mark the wrapper pending.
    ///
    /// Returns false when a newer keystroke replaced this timer.
    fn fire_debounce(
        &self,
        binding: BindingId,
        generation: u64,
        previous: u32,
        requested: u32,
    ) -> bool {
        let loading = {
            let mut slots = self.inner.slots.lock();
            let Some(slot) = slots.get_mut(&binding) else {
                return false;
            };
            if slot.debounce.as_ref().map(|pending| pending.generation) != Some(generation) {
                return false;
            }
            slot.debounce = None;
            dispatch_mvi!(
                slot,
                BindingReducer,
                BindingIntent::Submit {
                    previous,
                    requested,
                }
            );
            slot.state.is_pending()
        };

        self.set_loading(binding, loading);
        true
    }

    fn transition(&self, binding: BindingId, intent: BindingIntent) {
        let (loading, busy) = {
            let mut slots = self.inner.slots.lock();
            let slot = slots.entry(binding).or_default();
            dispatch_mvi!(slot, BindingReducer, intent);
            (slot.state.is_pending(), slot.is_busy())
        };

        if !self.set_loading(binding, loading) && !busy {
            // Settled on a wrapper the last render replaced.
            self.inner.slots.lock().remove(&binding);
        }
    }

    /// Returns false when the wrapper is no longer on the page.
    fn set_loading(&self, binding: BindingId, loading: bool) -> bool {
        match self.inner.page.lock().binding_mut(binding) {
            Some(wrapper) => {
                wrapper.loading = loading;
                true
            }
            None => false,
        }
    }

    fn restore_input(&self, binding: BindingId, value: u32) {
        if let Some(input) = self
            .inner
            .page
            .lock()
            .binding_mut(binding)
            .and_then(|wrapper| wrapper.input.as_mut())
        {
            input.value = value;
        }
    }

    fn set_remove_disabled(&self, variant_id: &VariantId, disabled: bool) {
        let mut page = self.inner.page.lock();
        if let Some(line) = page
            .drawer
            .as_mut()
            .and_then(|drawer| drawer.line_mut(variant_id.as_str()))
        {
            line.remove_disabled = disabled;
        }
    }

    /// Product cards only; drawer lines have no message element.
    fn show_qty_message(&self, binding: BindingId, quantity: u32) {
        {
            let mut page = self.inner.page.lock();
            let Some(wrapper) = page.binding_mut(binding) else {
                return;
            };
            if wrapper.kind != BindingKind::ProductCard {
                return;
            }
            let Some(message) = wrapper.message.as_mut() else {
                return;
            };
            message.text = qty_message_text(quantity);
            message.link = Some(ViewCartLink {
                href: self.inner.view_cart_href.clone(),
                label: VIEW_CART_LABEL.to_string(),
            });
            message.visible = true;
        }

        let controller = self.clone();
        let delay = self.inner.timing.message_visible;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut page = controller.inner.page.lock();
            if let Some(message) = page
                .binding_mut(binding)
                .and_then(|wrapper| wrapper.message.as_mut())
            {
                message.visible = false;
            }
        });
        self.inner
            .slots
            .lock()
            .entry(binding)
            .or_default()
            .replace_message_timer(handle);
    }

    fn flash_ok(&self, binding: BindingId) {
        {
            let mut page = self.inner.page.lock();
            let Some(wrapper) = page.binding_mut(binding) else {
                return;
            };
            wrapper.ok = true;
        }

        let controller = self.clone();
        let delay = self.inner.timing.ok_flash;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(wrapper) = controller.inner.page.lock().binding_mut(binding) {
                wrapper.ok = false;
            }
        });
        self.inner
            .slots
            .lock()
            .entry(binding)
            .or_default()
            .replace_ok_timer(handle);
    }
}
