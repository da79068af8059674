//! Quantity-control wrappers (`.product-card_qty` / `.card-qty`).

use std::fmt;

use crate::cart::VariantId;

/// Page-unique identity of one wrapper element.
///
/// Re-rendering the drawer creates new wrappers with new ids, the same way
/// replacing `innerHTML` creates new elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(pub(crate) u64);

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which surface a wrapper belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// Stepper on a product card; shows the transient added/removed message.
    ProductCard,
    /// Stepper on a drawer line.
    DrawerLine,
}

impl BindingKind {
    /// BEM block name used for the wrapper's state classes.
    pub fn class_block(self) -> &'static str {
        match self {
            BindingKind::ProductCard => "product-card_qty",
            BindingKind::DrawerLine => "card-qty",
        }
    }
}

/// Numeric `<input type="number">` inside a wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QtyInput {
    pub value: u32,
    pub min: u32,
}

impl QtyInput {
    pub fn new(value: u32, min: u32) -> Self {
        Self {
            value: value.max(min),
            min,
        }
    }

    /// Stepper arithmetic: `max(min, value + step)`.
    pub fn stepped(&self, step: i64) -> u32 {
        let next = i64::from(self.value).saturating_add(step);
        let clamped = next.max(i64::from(self.min)).max(0);
        u32::try_from(clamped).unwrap_or(u32::MAX)
    }

    /// Normalise typed text to `max(min, floor(value))`.
    ///
    /// Empty or non-numeric text counts as 0 before clamping.
    pub fn normalize(&self, raw: &str) -> u32 {
        let trimmed = raw.trim();
        let parsed = if trimmed.is_empty() {
            0.0
        } else {
            trimmed.parse::<f64>().unwrap_or(0.0)
        };
        let floored = if parsed.is_finite() { parsed.floor() } else { 0.0 };
        let value = if floored <= 0.0 {
            0
        } else if floored >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            floored as u32
        };
        value.max(self.min)
    }
}

/// Link appended to the quantity message; it is itself a `.js-open-cart` trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewCartLink {
    pub href: String,
    pub label: String,
}

/// `.product-card_qty__msg`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QtyMessage {
    pub text: String,
    pub link: Option<ViewCartLink>,
    pub visible: bool,
}

impl QtyMessage {
    pub fn clear(&mut self) {
        self.text.clear();
        self.link = None;
        self.visible = false;
    }
}

/// One quantity-control wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct QtyBinding {
    pub id: BindingId,
    pub kind: BindingKind,
    pub variant_id: Option<VariantId>,
    pub input: Option<QtyInput>,
    pub message: Option<QtyMessage>,
    pub loading: bool,
    pub ok: bool,
}

impl QtyBinding {
    pub fn new(id: BindingId, kind: BindingKind, variant_id: VariantId, input: QtyInput) -> Self {
        Self {
            id,
            kind,
            variant_id: Some(variant_id),
            input: Some(input),
            message: match kind {
                BindingKind::ProductCard => Some(QtyMessage::default()),
                BindingKind::DrawerLine => None,
            },
            loading: false,
            ok: false,
        }
    }

    pub fn quantity(&self) -> Option<u32> {
        self.input.map(|input| input.value)
    }

    pub fn is_bound_to(&self, variant_id: &str) -> bool {
        self.variant_id
            .as_ref()
            .is_some_and(|id| id.as_str() == variant_id)
    }

    /// Class list as it would appear on the wrapper element.
    pub fn class_list(&self) -> Vec<String> {
        let block = self.kind.class_block();
        let mut classes = vec![block.to_string()];
        if self.loading {
            classes.push(format!("{}--loading", block));
        }
        if self.ok {
            classes.push(format!("{}--ok", block));
        }
        classes
    }
}
