//! Gesture routing.
//!
//! The host reports where a click or input landed, resolved to the closest
//! element the cart cares about. Routing never looks at element identity
//! beyond that, so wrappers rendered after load (drawer lines) are handled
//! exactly like the ones present at load.

use crate::cart::VariantId;
use crate::page::BindingId;

/// Element a gesture landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// `.product-card_qty__button` / `.qty__btn`, carrying `data-step`.
    StepButton { binding: BindingId, step: i64 },
    /// `.product-card_qty__input` / `.qty__input`.
    QtyInput { binding: BindingId },
    /// `.js-open-cart`, including the "View Cart" link in quantity messages.
    OpenCart,
    /// `[data-cart-close]`
    CloseCart,
    /// `.js-cart-clear`
    ClearCart,
    /// `[data-remove-variant]`
    RemoveVariant { variant_id: VariantId },
    /// Anything the cart does not handle.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    Click(Target),
    /// `input` event; `value` is the raw text of the field.
    Input { target: Target, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Step { binding: BindingId, step: i64 },
    TypeQuantity { binding: BindingId, value: String },
    OpenDrawer,
    CloseDrawer,
    ClearCart,
    RemoveLine { variant_id: VariantId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub action: Action,
    /// Whether the host must suppress the element's default navigation.
    pub prevent_default: bool,
}

/// What the host should do with the original event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Ignored,
    Handled { prevent_default: bool },
}

/// Map a gesture to the action that handles it.
pub fn route(gesture: Gesture) -> Option<Route> {
    let (action, prevent_default) = match gesture {
        Gesture::Click(Target::StepButton { binding, step }) => {
            (Action::Step { binding, step }, false)
        }
        Gesture::Click(Target::OpenCart) => (Action::OpenDrawer, true),
        Gesture::Click(Target::CloseCart) => (Action::CloseDrawer, true),
        Gesture::Click(Target::ClearCart) => (Action::ClearCart, true),
        Gesture::Click(Target::RemoveVariant { variant_id }) => {
            (Action::RemoveLine { variant_id }, false)
        }
        Gesture::Input {
            target: Target::QtyInput { binding },
            value,
        } => (Action::TypeQuantity { binding, value }, false),
        _ => return None,
    };

    Some(Route {
        action,
        prevent_default,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawer_triggers_prevent_default() {
        for target in [Target::OpenCart, Target::CloseCart, Target::ClearCart] {
            let route = route(Gesture::Click(target)).unwrap();
            assert!(route.prevent_default);
        }
    }

    #[test]
    fn steppers_and_inputs_route_to_their_binding() {
        let binding = BindingId(7);
        assert_eq!(
            route(Gesture::Click(Target::StepButton { binding, step: -1 })),
            Some(Route {
                action: Action::Step { binding, step: -1 },
                prevent_default: false,
            })
        );
        assert_eq!(
            route(Gesture::Input {
                target: Target::QtyInput { binding },
                value: "4".into(),
            })
            .map(|r| r.action),
            Some(Action::TypeQuantity {
                binding,
                value: "4".into(),
            })
        );
    }

    #[test]
    fn mismatched_gestures_are_ignored() {
        assert_eq!(route(Gesture::Click(Target::Other)), None);
        assert_eq!(
            route(Gesture::Click(Target::QtyInput {
                binding: BindingId(1)
            })),
            None
        );
        assert_eq!(
            route(Gesture::Input {
                target: Target::OpenCart,
                value: String::new(),
            }),
            None
        );
    }

    #[test]
    fn remove_routes_by_variant() {
        let variant_id = VariantId::from("V2");
        assert_eq!(
            route(Gesture::Click(Target::RemoveVariant {
                variant_id: variant_id.clone()
            }))
            .map(|r| r.action),
            Some(Action::RemoveLine { variant_id })
        );
    }
}
