// Copyright 2026 the Arrowwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine's event protocol.
//!
//! Every focus transition announces itself through events the host delivers
//! to the affected elements (in a browser host these become `sn:`-prefixed
//! custom DOM events). The `will-*` events and the enter-key events are
//! cancellable: when any handler prevents the default, the transition
//! aborts as normal flow control, not as an error. The remaining events
//! are notifications and their dispatch result is ignored.
//!
//! Ordering within one move is fixed:
//! `will-unfocus → on_blur hook → unfocused → will-focus → on_focus hook →
//! focused`.

use alloc::string::String;

use arrowwood_elect::Direction;

/// What triggered a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cause {
    /// An arrow-key press handled by the navigator.
    Keydown,
    /// A programmatic `move_focus` call.
    Api,
}

/// An engine event, delivered to a specific element through
/// [`FocusBackend::dispatch`](crate::host::FocusBackend::dispatch).
#[derive(Clone, Debug, PartialEq)]
pub enum Event<K> {
    /// A directional move is about to be attempted from this element.
    /// Cancellable.
    WillMove {
        /// Requested direction.
        direction: Direction,
        /// Section owning the source element.
        section_id: String,
        /// What triggered the move.
        cause: Cause,
    },
    /// This element is about to receive focus. Cancellable.
    WillFocus {
        /// The element losing focus, when the change was initiated by the
        /// engine.
        previous: Option<K>,
        /// Section owning the element gaining focus.
        section_id: String,
        /// Direction of the move, when directional.
        direction: Option<Direction>,
        /// Whether this change originated from a native focus event.
        native: bool,
    },
    /// This element received focus. Notification.
    Focused {
        /// See [`Event::WillFocus`].
        previous: Option<K>,
        /// Section owning the element.
        section_id: String,
        /// Direction of the move, when directional.
        direction: Option<Direction>,
        /// Whether the change originated from a native focus event.
        native: bool,
    },
    /// This element is about to lose focus. Cancellable.
    WillUnfocus {
        /// The element gaining focus next, when known.
        next: Option<K>,
        /// Section owning that next element, when known.
        next_section_id: Option<String>,
        /// Direction of the move, when directional.
        direction: Option<Direction>,
        /// Whether this change originated from a native blur event.
        native: bool,
    },
    /// This element lost focus. Notification.
    Unfocused {
        /// See [`Event::WillUnfocus`].
        next: Option<K>,
        /// Section owning that next element, when known.
        next_section_id: Option<String>,
        /// Direction of the move, when directional.
        direction: Option<Direction>,
        /// Whether the change originated from a native blur event.
        native: bool,
    },
    /// No candidate could be focused in the requested direction.
    /// Notification.
    NavigateFailed {
        /// Requested direction, when the failure came from a move.
        direction: Option<Direction>,
        /// What triggered the attempt.
        cause: Cause,
    },
    /// Enter was pressed while a tracked element was focused. Cancellable;
    /// cancellation asks the host to prevent the key's default action.
    EnterDown,
    /// Enter was released while a tracked element was focused. Cancellable.
    EnterUp,
}

impl<K> Event<K> {
    /// The wire name of this event (the custom-event type a browser host
    /// dispatches).
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::WillMove { .. } => "sn:willmove",
            Self::WillFocus { .. } => "sn:willfocus",
            Self::Focused { .. } => "sn:focused",
            Self::WillUnfocus { .. } => "sn:willunfocus",
            Self::Unfocused { .. } => "sn:unfocused",
            Self::NavigateFailed { .. } => "sn:navigatefailed",
            Self::EnterDown => "sn:enter-down",
            Self::EnterUp => "sn:enter-up",
        }
    }

    /// Whether a handler may veto the transition this event announces.
    #[must_use]
    pub fn cancellable(&self) -> bool {
        matches!(
            self,
            Self::WillMove { .. }
                | Self::WillFocus { .. }
                | Self::WillUnfocus { .. }
                | Self::EnterDown
                | Self::EnterUp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_prefixed() {
        let event: Event<u32> = Event::EnterDown;
        assert_eq!(event.name(), "sn:enter-down");
        let event: Event<u32> = Event::NavigateFailed {
            direction: Some(Direction::Left),
            cause: Cause::Keydown,
        };
        assert_eq!(event.name(), "sn:navigatefailed");
    }

    #[test]
    fn only_will_and_enter_events_are_cancellable() {
        let cancellable: [Event<u32>; 2] = [
            Event::WillMove {
                direction: Direction::Up,
                section_id: String::from("s"),
                cause: Cause::Api,
            },
            Event::EnterUp,
        ];
        for event in &cancellable {
            assert!(event.cancellable(), "{} must be cancellable", event.name());
        }

        let notifications: [Event<u32>; 2] = [
            Event::Focused {
                previous: None,
                section_id: String::from("s"),
                direction: None,
                native: true,
            },
            Event::NavigateFailed {
                direction: None,
                cause: Cause::Api,
            },
        ];
        for event in &notifications {
            assert!(!event.cancellable(), "{} is a notification", event.name());
        }
    }
}
