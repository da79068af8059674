//! `#minicart-drawer`: totals, rendered line list and open/close state.

use crate::cart::VariantId;
use crate::page::binding::QtyBinding;

/// One rendered `.minicart-line`.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawerLine {
    pub variant_id: VariantId,
    /// The line's `.card-qty` stepper.
    pub qty: QtyBinding,
    /// `[data-remove-variant]` button state.
    pub remove_disabled: bool,
}

/// The slide-out mini cart.
///
/// `count_text`, `total_text` and `items_html` are `None` when the markup
/// does not contain the matching element; rendering skips what is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawer {
    pub count_text: Option<String>,
    pub total_text: Option<String>,
    pub items_html: Option<String>,
    pub lines: Vec<DrawerLine>,
    /// Whether `.minicart-drawer__wrapper` exists to receive focus.
    pub has_panel: bool,
    pub is_open: bool,
    pub aria_hidden: bool,
    pub panel_focused: bool,
}

impl Default for Drawer {
    fn default() -> Self {
        Self {
            count_text: Some(String::new()),
            total_text: Some(String::new()),
            items_html: Some(String::new()),
            lines: Vec::new(),
            has_panel: true,
            is_open: false,
            aria_hidden: true,
            panel_focused: false,
        }
    }
}

impl Drawer {
    /// Show the panel and move focus into it.
    pub fn open(&mut self) {
        self.is_open = true;
        self.aria_hidden = false;
        if self.has_panel {
            self.panel_focused = true;
        }
        tracing::debug!("Cart drawer opened");
    }

    /// Hide the panel. Focus is left where it is.
    pub fn close(&mut self) {
        self.is_open = false;
        self.aria_hidden = true;
        tracing::debug!("Cart drawer closed");
    }

    /// Class list of the drawer root.
    pub fn class_list(&self) -> Vec<&'static str> {
        if self.is_open {
            vec!["minicart-drawer", "is-open"]
        } else {
            vec!["minicart-drawer"]
        }
    }

    pub fn line(&self, variant_id: &str) -> Option<&DrawerLine> {
        self.lines
            .iter()
            .find(|line| line.variant_id.as_str() == variant_id)
    }

    pub fn line_mut(&mut self, variant_id: &str) -> Option<&mut DrawerLine> {
        self.lines
            .iter_mut()
            .find(|line| line.variant_id.as_str() == variant_id)
    }
}
