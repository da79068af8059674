//! In-memory model of the page markup the cart component drives.
//!
//! Only the parts named by the markup contract are modelled: the header
//! badge, every quantity-control wrapper and the mini-cart drawer. Optional
//! fields stand for elements the theme may leave out.

mod binding;
mod drawer;

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cart::VariantId;

pub use binding::{BindingId, BindingKind, QtyBinding, QtyInput, QtyMessage, ViewCartLink};
pub use drawer::{Drawer, DrawerLine};

/// Page shared between the controller and its timer tasks.
pub type SharedPage = Arc<Mutex<Page>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// `.site-header__cart-count` text; `None` when the header has no badge.
    pub header_count: Option<String>,
    /// Product-card wrappers, in document order.
    pub cards: Vec<QtyBinding>,
    pub drawer: Option<Drawer>,
    next_binding: u64,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page with a header badge and an empty, closed drawer.
    pub fn storefront() -> Self {
        Self {
            header_count: Some("0".to_string()),
            drawer: Some(Drawer::default()),
            ..Self::default()
        }
    }

    pub fn into_shared(self) -> SharedPage {
        Arc::new(Mutex::new(self))
    }

    /// Allocate an id for a wrapper that is about to be created.
    pub fn next_binding_id(&mut self) -> BindingId {
        self.next_binding += 1;
        BindingId(self.next_binding)
    }

    /// Add a product-card stepper for `variant_id`.
    pub fn add_product_card(&mut self, variant_id: impl Into<VariantId>, min: u32) -> BindingId {
        let id = self.next_binding_id();
        self.cards.push(QtyBinding::new(
            id,
            BindingKind::ProductCard,
            variant_id.into(),
            QtyInput::new(min, min),
        ));
        id
    }

    /// Every wrapper on the page: product cards first, then drawer lines.
    pub fn bindings(&self) -> impl Iterator<Item = &QtyBinding> {
        let drawer_lines = self
            .drawer
            .iter()
            .flat_map(|drawer| drawer.lines.iter().map(|line| &line.qty));
        self.cards.iter().chain(drawer_lines)
    }

    pub fn bindings_mut(&mut self) -> impl Iterator<Item = &mut QtyBinding> {
        let drawer_lines = self
            .drawer
            .iter_mut()
            .flat_map(|drawer| drawer.lines.iter_mut().map(|line| &mut line.qty));
        self.cards.iter_mut().chain(drawer_lines)
    }

    pub fn binding(&self, id: BindingId) -> Option<&QtyBinding> {
        self.bindings().find(|binding| binding.id == id)
    }

    pub fn binding_mut(&mut self, id: BindingId) -> Option<&mut QtyBinding> {
        self.bindings_mut().find(|binding| binding.id == id)
    }

    /// All wrappers bound to one variant, across surfaces.
    pub fn bindings_for<'a>(&'a self, variant_id: &'a str) -> impl Iterator<Item = &'a QtyBinding> {
        self.bindings()
            .filter(move |binding| binding.is_bound_to(variant_id))
    }

    /// Product card for a variant, if one is on the page.
    pub fn card_for(&self, variant_id: &str) -> Option<BindingId> {
        self.cards
            .iter()
            .find(|card| card.is_bound_to(variant_id))
            .map(|card| card.id)
    }

    pub fn drawer_line(&self, variant_id: &str) -> Option<&DrawerLine> {
        self.drawer.as_ref()?.line(variant_id)
    }

    /// Comparable projection of everything a shopper can see.
    pub fn view(&self) -> PageView {
        PageView {
            header_count: self.header_count.clone(),
            cards: self.cards.iter().map(BindingView::from).collect(),
            drawer: self.drawer.as_ref().map(|drawer| DrawerView {
                open: drawer.is_open,
                count_text: drawer.count_text.clone(),
                total_text: drawer.total_text.clone(),
                items_html: drawer.items_html.clone(),
                lines: drawer
                    .lines
                    .iter()
                    .map(|line| BindingView::from(&line.qty))
                    .collect(),
            }),
        }
    }
}

/// Identity-free view of a wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingView {
    pub variant_id: Option<String>,
    pub quantity: Option<u32>,
    pub message: Option<String>,
    pub classes: Vec<String>,
}

impl From<&QtyBinding> for BindingView {
    fn from(binding: &QtyBinding) -> Self {
        Self {
            variant_id: binding.variant_id.as_ref().map(|id| id.to_string()),
            quantity: binding.quantity(),
            message: binding
                .message
                .as_ref()
                .filter(|message| message.visible)
                .map(|message| message.text.clone()),
            classes: binding.class_list(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerView {
    pub open: bool,
    pub count_text: Option<String>,
    pub total_text: Option<String>,
    pub items_html: Option<String>,
    pub lines: Vec<BindingView>,
}

/// Identity-free projection of a [`Page`]; two renders of the same cart
/// produce equal views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub header_count: Option<String>,
    pub cards: Vec<BindingView>,
    pub drawer: Option<DrawerView>,
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "header: {}",
            self.header_count.as_deref().unwrap_or("(no badge)")
        )?;
        for card in &self.cards {
            write_binding(f, "card", card)?;
        }
        match &self.drawer {
            Some(drawer) => {
                writeln!(
                    f,
                    "drawer: {} | items {} | total {}",
                    if drawer.open { "open" } else { "closed" },
                    drawer.count_text.as_deref().unwrap_or("-"),
                    drawer.total_text.as_deref().unwrap_or("-"),
                )?;
                if drawer.lines.is_empty() {
                    writeln!(f, "  (empty)")?;
                }
                for line in &drawer.lines {
                    write_binding(f, "line", line)?;
                }
            }
            None => writeln!(f, "drawer: (none)")?,
        }
        Ok(())
    }
}

fn write_binding(f: &mut fmt::Formatter<'_>, label: &str, binding: &BindingView) -> fmt::Result {
    write!(
        f,
        "  {} {} qty={}",
        label,
        binding.variant_id.as_deref().unwrap_or("?"),
        binding
            .quantity
            .map_or_else(|| "-".to_string(), |q| q.to_string()),
    )?;
    if let Some(message) = &binding.message {
        write!(f, " \"{}\"", message)?;
    }
    writeln!(f)
}
