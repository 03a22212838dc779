//! External notification types.
//!
//! The form reports a small, fixed vocabulary of transitions to the host.
//! Every notification travels on the [`INPUT_EVENT`] topic and names its
//! [`ExternalEvent`] type.

use serde::{Deserialize, Serialize};

/// Topic every input notification is published on.
pub const INPUT_EVENT: &str = "card-fields:INPUT_EVENT";

/// A transition reported to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExternalEvent {
    /// A field gained focus.
    Focus,
    /// A field lost focus.
    Blur,
    /// A field's value became empty.
    Empty,
    /// A field's value stopped being empty.
    NotEmpty,
    /// A field's `isValid` or `isPotentiallyValid` flipped.
    ValidityChange,
    /// The candidate brand list changed.
    CardTypeChange,
}

impl ExternalEvent {
    /// The wire name of this event.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ExternalEvent::Focus => "focus",
            ExternalEvent::Blur => "blur",
            ExternalEvent::Empty => "empty",
            ExternalEvent::NotEmpty => "notEmpty",
            ExternalEvent::ValidityChange => "validityChange",
            ExternalEvent::CardTypeChange => "cardTypeChange",
        }
    }

    /// Focus or blur, depending on the new focus state.
    #[must_use]
    pub const fn for_focus(is_focused: bool) -> Self {
        if is_focused {
            ExternalEvent::Focus
        } else {
            ExternalEvent::Blur
        }
    }

    /// Empty or not-empty, depending on the new emptiness.
    #[must_use]
    pub const fn for_emptiness(is_empty: bool) -> Self {
        if is_empty {
            ExternalEvent::Empty
        } else {
            ExternalEvent::NotEmpty
        }
    }
}

impl std::fmt::Display for ExternalEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
