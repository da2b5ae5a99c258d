use serde::{Deserialize, Serialize};

/// Kind of page element the user activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Link,
    Button,
    Input,
    Other,
}

impl ElementKind {
    pub fn is_interactive(&self) -> bool {
        !matches!(self, ElementKind::Other)
    }
}

/// A click or activation observed on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interaction {
    pub kind: ElementKind,
    /// Whether the event came from the user rather than a script.
    pub trusted: bool,
}

impl Interaction {
    pub fn trusted(kind: ElementKind) -> Self {
        Self {
            kind,
            trusted: true,
        }
    }

    pub fn synthetic(kind: ElementKind) -> Self {
        Self {
            kind,
            trusted: false,
        }
    }
}

/// An attempt to leave the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// Click on a link pointing away from the form.
    OutboundLink { href: String },
    /// The page is being unloaded (reload, tab close, typed URL).
    Unload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Let the navigation continue; for links, go to `href`.
    Proceed { href: Option<String> },
    /// Cancel the default action and keep the user on the page.
    Stay,
}

/// Blocking yes/no prompt provided by the host environment.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}
