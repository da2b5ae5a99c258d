use log::debug;

use super::{Confirm, Interaction, NavigationDecision, NavigationEvent};
use crate::constants::LEAVE_PAGE_MESSAGE;

/// Page-session state deciding whether leaving needs confirmation.
///
/// Until the user has activated a link, button or input on the page, any
/// attempt to navigate away is intercepted and confirmed. Once set, the
/// `has_interacted` latch stays set for the rest of the session.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    has_interacted: bool,
    message: String,
}

impl NavigationGuard {
    pub fn new() -> Self {
        Self::with_message(LEAVE_PAGE_MESSAGE)
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            has_interacted: false,
            message: message.into(),
        }
    }

    pub fn has_interacted(&self) -> bool {
        self.has_interacted
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Records an activation. Only trusted activations of interactive
    /// elements count.
    pub fn record_interaction(&mut self, interaction: Interaction) {
        if self.has_interacted || !interaction.trusted || !interaction.kind.is_interactive() {
            return;
        }
        debug!("First trusted {:?} activation, navigation guard released", interaction.kind);
        self.has_interacted = true;
    }

    /// Decides whether a navigation attempt may go ahead, prompting
    /// through `confirm` when the guard is still armed.
    pub fn on_navigate(&self, event: NavigationEvent, confirm: &dyn Confirm) -> NavigationDecision {
        let href = match event {
            NavigationEvent::OutboundLink { href } => Some(href),
            NavigationEvent::Unload => None,
        };

        if self.has_interacted || confirm.confirm(&self.message) {
            NavigationDecision::Proceed { href }
        } else {
            debug!("User chose to stay on the page");
            NavigationDecision::Stay
        }
    }
}

impl Default for NavigationGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::navigation::ElementKind;

    struct CountingConfirm {
        answer: bool,
        asked: Cell<usize>,
    }

    impl CountingConfirm {
        fn new(answer: bool) -> Self {
            Self {
                answer,
                asked: Cell::new(0),
            }
        }
    }

    impl Confirm for CountingConfirm {
        fn confirm(&self, _message: &str) -> bool {
            self.asked.set(self.asked.get() + 1);
            self.answer
        }
    }

    fn link(href: &str) -> NavigationEvent {
        NavigationEvent::OutboundLink {
            href: href.to_string(),
        }
    }

    #[test]
    fn test_armed_guard_asks_and_honours_yes() {
        let guard = NavigationGuard::new();
        let confirm = CountingConfirm::new(true);

        let decision = guard.on_navigate(link("/project/"), &confirm);
        assert_eq!(
            decision,
            NavigationDecision::Proceed {
                href: Some("/project/".to_string())
            }
        );
        assert_eq!(confirm.asked.get(), 1);
    }

    #[test]
    fn test_armed_guard_honours_no() {
        let guard = NavigationGuard::new();
        let confirm = CountingConfirm::new(false);

        assert_eq!(guard.on_navigate(link("/"), &confirm), NavigationDecision::Stay);
        assert_eq!(
            guard.on_navigate(NavigationEvent::Unload, &confirm),
            NavigationDecision::Stay
        );
        assert_eq!(confirm.asked.get(), 2);
    }

    #[test]
    fn test_trusted_interaction_releases_guard_for_good() {
        let mut guard = NavigationGuard::new();
        guard.record_interaction(Interaction::trusted(ElementKind::Button));
        assert!(guard.has_interacted());

        // Later interactions of any kind never re-arm it.
        guard.record_interaction(Interaction::synthetic(ElementKind::Other));
        assert!(guard.has_interacted());

        let confirm = CountingConfirm::new(false);
        assert_eq!(
            guard.on_navigate(NavigationEvent::Unload, &confirm),
            NavigationDecision::Proceed { href: None }
        );
        assert_eq!(confirm.asked.get(), 0);
    }

    #[test]
    fn test_released_guard_follows_link_without_asking() {
        let mut guard = NavigationGuard::new();
        guard.record_interaction(Interaction::trusted(ElementKind::Input));
        let confirm = CountingConfirm::new(false);

        assert_eq!(
            guard.on_navigate(link("/allocation/7/"), &confirm),
            NavigationDecision::Proceed {
                href: Some("/allocation/7/".to_string())
            }
        );
        assert_eq!(confirm.asked.get(), 0);
    }

    #[test]
    fn test_untrusted_or_non_interactive_activations_are_ignored() {
        let mut guard = NavigationGuard::new();
        guard.record_interaction(Interaction::synthetic(ElementKind::Link));
        guard.record_interaction(Interaction::trusted(ElementKind::Other));
        assert!(!guard.has_interacted());

        for kind in [ElementKind::Link, ElementKind::Input] {
            let mut guard = NavigationGuard::new();
            guard.record_interaction(Interaction::trusted(kind));
            assert!(guard.has_interacted());
        }
    }

    #[test]
    fn test_prompt_uses_leave_message() {
        let guard = NavigationGuard::new();
        let seen = std::cell::RefCell::new(String::new());
        let confirm = |message: &str| {
            seen.replace(message.to_string());
            true
        };

        guard.on_navigate(NavigationEvent::Unload, &confirm);
        assert_eq!(*seen.borrow(), LEAVE_PAGE_MESSAGE);

        let custom = NavigationGuard::with_message("Discard changes?");
        custom.on_navigate(NavigationEvent::Unload, &confirm);
        assert_eq!(*seen.borrow(), "Discard changes?");
    }
}
