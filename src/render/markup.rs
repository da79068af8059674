//! Drawer line markup.
//!
//! Catalog text (titles in particular) is untrusted: it is escaped before it
//! lands in text or attribute position.

use std::borrow::Cow;

use crate::cart::{CartSnapshot, LineItem};
use crate::render::money::MoneyFormat;

pub const EMPTY_DRAWER_HTML: &str = r#"<p class="minicart-drawer__empty">Your basket is empty.</p>"#;

/// Escape `& < > " '` for text and double-quoted attribute contexts.
pub fn escape_html(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 16);
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Markup for the drawer's `.js-cart-items` container.
pub fn drawer_items_html(cart: &CartSnapshot, money: &MoneyFormat) -> String {
    if cart.items.is_empty() {
        return EMPTY_DRAWER_HTML.to_string();
    }

    let mut html = String::new();
    for item in &cart.items {
        line_html(&mut html, item, money);
    }
    html
}

fn line_html(out: &mut String, item: &LineItem, money: &MoneyFormat) {
    let id = escape_html(item.variant_id.as_str());
    let title = escape_html(&item.product_title);
    let url = escape_html(&item.url);
    let image = item
        .image
        .as_deref()
        .map(|src| format!(r#"<img src="{}" alt="{}">"#, escape_html(src), title))
        .unwrap_or_default();
    let price = escape_html(&money.format(item.final_line_price)).into_owned();

    out.push_str(&format!(
        r##"<div class="minicart-line" data-variant-id="{id}">
  <div class="minicart-line__media">{image}</div>
  <div class="minicart-item_title__wrapper">
    <p class="minicart-line__title"><a href="{url}">{title}</a></p>
  </div>
  <div class="minicart-line__actions">
    <button class="minicart-line__remove" type="button" aria-label="Remove" data-remove-variant="{id}">
      <svg class="icon icon--trash" width="20" height="20" aria-hidden="true" focusable="false"><use href="#icon-trash"></use></svg>
    </button>
  </div>
  <div class="minicart-line__info">
    <div class="minicart-line__price">{price}</div>
    <div class="minicart-line__qty card-qty" data-variant-id="{id}" data-product-title="{title}">
      <button type="button" class="qty__btn" data-step="-1" aria-label="Decrease quantity">−</button>
      <input class="qty__input" type="number" min="0" value="{quantity}" inputmode="numeric" pattern="[0-9]*" aria-label="Quantity for {title}">
      <button type="button" class="qty__btn" data-step="1" aria-label="Increase quantity">+</button>
    </div>
  </div>
</div>
"##,
        quantity = item.quantity,
    ));
}
