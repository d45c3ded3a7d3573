// Copyright 2026 the Arrowwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host boundary.
//!
//! The engine never touches a real UI tree. Everything host-specific sits
//! behind two traits: [`ElementLookup`] is the read-only view (queries,
//! geometry, attributes) and [`FocusBackend`] is the effect side (native
//! focus and blur, event delivery, deferred scheduling). A browser host
//! implements them over the DOM; tests implement them over plain structs.
//!
//! ## Query failures
//!
//! Selector resolution may fail (malformed selector, detached tree). That
//! is a recoverable condition: implementations return [`QueryError`], the
//! engine logs it and proceeds as if the query matched nothing. The engine
//! never panics on the key-handling path.
//!
//! ## Synchronous handler side-effects
//!
//! In a browser, event handlers run synchronously inside the dispatch and
//! may call back into the engine — the classic feedback loop between
//! `focus()` and focus/blur listeners. Under Rust ownership the host cannot
//! re-enter a borrowed navigator, so the dispatch result carries the
//! request instead: [`Dispatched::follow_up`] names an element a handler
//! asked to focus. The navigator executes the request right after the
//! dispatch returns; if a focus change is already in flight, the
//! re-entrancy guard degrades it to a silent, event-free focus move.
//!
//! ## Deferred actions
//!
//! Two transitions must not complete synchronously: re-focusing after a
//! rejected native blur (the blur has to finish first) and focusing an
//! element marked as non-scrollable (batched with the next frame to keep
//! engines from auto-scrolling it into view). The engine hands the host a
//! [`Deferred`] action together with its required [`DeferredTiming`]; the
//! host schedules it and feeds it back through
//! [`Navigator::run_deferred`](crate::navigator::Navigator::run_deferred).

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use arrowwood_elect::Direction;
use kurbo::Rect;

use crate::config::Selector;
use crate::events::Event;

/// A failed selector resolution at the host boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryError {
    /// The selector that failed to resolve.
    pub selector: String,
    /// Host-provided reason.
    pub reason: String,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "query {:?} failed: {}", self.selector, self.reason)
    }
}

impl core::error::Error for QueryError {}

/// When a [`Deferred`] action must run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeferredTiming {
    /// Next macro-task (after the current native event settles).
    MacroTask,
    /// Next animation frame (batched with layout).
    AnimationFrame,
}

/// An action the engine asks the host to schedule.
#[derive(Clone, Debug, PartialEq)]
pub enum Deferred<K> {
    /// Restore focus to an element whose native blur was rejected.
    Refocus(K),
    /// Perform the native focus deferred by the non-scrollable marker.
    NativeFocus(K),
}

impl<K> Deferred<K> {
    /// The scheduling slot this action requires.
    #[must_use]
    pub fn timing(&self) -> DeferredTiming {
        match self {
            Self::Refocus(_) => DeferredTiming::MacroTask,
            Self::NativeFocus(_) => DeferredTiming::AnimationFrame,
        }
    }
}

/// Result of delivering one event.
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatched<K> {
    /// False when a handler prevented the default of a cancellable event.
    /// Ignored for notifications.
    pub proceed: bool,
    /// An element a handler synchronously asked the engine to focus.
    pub follow_up: Option<K>,
}

impl<K> Dispatched<K> {
    /// The event ran to completion.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            proceed: true,
            follow_up: None,
        }
    }

    /// A handler prevented the default.
    #[must_use]
    pub const fn canceled() -> Self {
        Self {
            proceed: false,
            follow_up: None,
        }
    }

    /// Attach a synchronous focus request.
    #[must_use]
    pub fn with_follow_up(mut self, element: K) -> Self {
        self.follow_up = Some(element);
        self
    }
}

/// Read-only view of the host UI tree.
pub trait ElementLookup<K> {
    /// Resolve a selector string to elements, in tree order.
    fn query(&self, selector: &str) -> Result<Vec<K>, QueryError>;

    /// Resolve a selector string to at most one element.
    fn query_one(&self, selector: &str) -> Result<Option<K>, QueryError> {
        Ok(self.query(selector)?.into_iter().next())
    }

    /// Whether `element` matches a selector string.
    fn matches(&self, element: &K, selector: &str) -> bool;

    /// The element's bounding rectangle in viewport coordinates, or `None`
    /// when the element is gone. A zero-area rectangle is a valid
    /// measurement.
    fn bounds(&self, element: &K) -> Option<Rect>;

    /// Whether the element occupies any space (offset width or height > 0).
    fn is_visible(&self, element: &K) -> bool;

    /// Whether the element carries the `disabled` attribute.
    fn is_disabled(&self, element: &K) -> bool;

    /// The element's per-direction override attribute
    /// (`data-sn-<direction>`). `Some("")` means "explicitly block moves in
    /// this direction".
    fn nav_override(&self, element: &K, direction: Direction) -> Option<String>;

    /// Whether the element already has an explicit tab-index attribute.
    fn has_tab_index(&self, element: &K) -> bool;

    /// Whether the element is marked non-scrollable, deferring its native
    /// focus to the next animation frame.
    fn defers_scroll(&self, element: &K) -> bool;
}

/// Effect side of the host: native focus and event delivery.
pub trait FocusBackend<K> {
    /// Natively focus the element.
    fn focus(&mut self, element: &K);

    /// Natively blur the element.
    fn blur(&mut self, element: &K);

    /// The currently focused element, if any element other than the root
    /// carries focus.
    fn focused(&self) -> Option<K>;

    /// Assign an explicit tab-index attribute.
    fn set_tab_index(&mut self, element: &K, value: i32);

    /// Deliver an event to `target`, running any registered handlers.
    fn dispatch(&mut self, target: &K, event: &Event<K>) -> Dispatched<K>;

    /// Schedule a deferred action; see [`Deferred::timing`] for when it must
    /// be fed back into the navigator.
    fn defer(&mut self, action: Deferred<K>);
}

/// Resolve an extended selector to elements. Query failures are logged and
/// yield nothing; an empty query string resolves to nothing.
pub(crate) fn resolve<K: Clone, H: ElementLookup<K> + ?Sized>(
    host: &H,
    selector: &Selector<K>,
) -> Vec<K> {
    match selector {
        Selector::Css(css) if css.is_empty() => Vec::new(),
        Selector::Css(css) => match host.query(css) {
            Ok(found) => found,
            Err(error) => {
                log::warn!("{error}");
                Vec::new()
            }
        },
        Selector::Handle(handle) => vec![handle.clone()],
        Selector::Many(handles) => handles.clone(),
    }
}

/// Resolve an extended selector to at most one element, logging failures.
pub(crate) fn resolve_one<K: Clone, H: ElementLookup<K> + ?Sized>(
    host: &H,
    selector: &str,
) -> Option<K> {
    match host.query_one(selector) {
        Ok(found) => found,
        Err(error) => {
            log::warn!("{error}");
            None
        }
    }
}

/// Whether `element` matches an extended selector.
pub(crate) fn selector_matches<K: PartialEq, H: ElementLookup<K> + ?Sized>(
    host: &H,
    selector: &Selector<K>,
    element: &K,
) -> bool {
    match selector {
        Selector::Css(css) => !css.is_empty() && host.matches(element, css),
        Selector::Handle(handle) => handle == element,
        Selector::Many(handles) => handles.contains(element),
    }
}
