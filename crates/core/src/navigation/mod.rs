//! Navigation module - asks before leaving a page with an unsaved form.

mod navigation_guard;
mod navigation_model;

pub use navigation_guard::NavigationGuard;
pub use navigation_model::{
    Confirm, ElementKind, Interaction, NavigationDecision, NavigationEvent,
};
