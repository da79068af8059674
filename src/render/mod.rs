//! Snapshot-to-page rendering.
//!
//! [`apply_cart_to_ui`] is a total re-render: every surface is derived from
//! the snapshot alone, so applying the same snapshot twice leaves the page
//! exactly as applying it once. The page is only consulted to find targets.

mod markup;
mod money;

use std::collections::HashMap;

use crate::cart::CartSnapshot;
use crate::page::{BindingKind, Drawer, DrawerLine, Page, QtyBinding, QtyInput};

pub use markup::{drawer_items_html, escape_html, EMPTY_DRAWER_HTML};
pub use money::MoneyFormat;

/// Re-render every cart surface from `cart`.
///
/// Each step only touches the elements it owns and skips what the page does
/// not have, so a missing element never prevents later steps.
pub fn apply_cart_to_ui(page: &mut Page, cart: &CartSnapshot, money: &MoneyFormat) {
    if !cart.is_consistent() {
        tracing::warn!(
            item_count = cart.item_count,
            lines = cart.items.len(),
            "Cart item_count does not match line quantities"
        );
    }

    render_header_count(page, cart);
    render_drawer(page, cart, money);

    let quantities = cart.quantities();
    sync_quantity_inputs(page, &quantities);
    reset_messages_for_zero(page, &quantities);

    tracing::debug!(
        item_count = cart.item_count,
        lines = cart.items.len(),
        "Applied cart to page"
    );
}

fn render_header_count(page: &mut Page, cart: &CartSnapshot) {
    if let Some(count) = page.header_count.as_mut() {
        *count = cart.item_count.to_string();
    }
}

fn render_drawer(page: &mut Page, cart: &CartSnapshot, money: &MoneyFormat) {
    let Some(drawer) = page.drawer.as_mut() else {
        return;
    };
    render_drawer_totals(drawer, cart, money);

    if drawer.items_html.is_none() {
        return;
    }
    let lines: Vec<DrawerLine> = cart
        .items
        .iter()
        .map(|item| DrawerLine {
            variant_id: item.variant_id.clone(),
            qty: QtyBinding::new(
                page.next_binding_id(),
                BindingKind::DrawerLine,
                item.variant_id.clone(),
                QtyInput::new(item.quantity, 0),
            ),
            remove_disabled: false,
        })
        .collect();

    if let Some(drawer) = page.drawer.as_mut() {
        drawer.items_html = Some(drawer_items_html(cart, money));
        drawer.lines = lines;
    }
}

fn render_drawer_totals(drawer: &mut Drawer, cart: &CartSnapshot, money: &MoneyFormat) {
    if let Some(count) = drawer.count_text.as_mut() {
        *count = cart.item_count.to_string();
    }
    if let Some(total) = drawer.total_text.as_mut() {
        *total = money.format(cart.total_price);
    }
}

fn sync_quantity_inputs(page: &mut Page, quantities: &HashMap<&str, u32>) {
    for binding in page.bindings_mut() {
        let Some(variant_id) = binding.variant_id.as_ref() else {
            continue;
        };
        let quantity = quantities.get(variant_id.as_str()).copied().unwrap_or(0);
        if let Some(input) = binding.input.as_mut() {
            input.value = quantity;
        }
    }
}

/// Undo "item added" messages the server has since corrected to zero.
fn reset_messages_for_zero(page: &mut Page, quantities: &HashMap<&str, u32>) {
    for binding in page.bindings_mut() {
        let Some(variant_id) = binding.variant_id.as_ref() else {
            continue;
        };
        if quantities.get(variant_id.as_str()).copied().unwrap_or(0) != 0 {
            continue;
        }
        if let Some(message) = binding.message.as_mut() {
            message.clear();
        }
    }
}
