// Copyright 2026 the Arrowwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arrowwood Engine: a multi-section spatial focus coordinator.
//!
//! This crate wraps the pure election from [`arrowwood_elect`] in the state
//! machine a real UI needs: named **sections** of focusable elements with
//! per-section configuration and focus memory, a **navigator** that turns
//! arrow keys into directional moves, and a cancellable **event protocol**
//! announcing every transition to the host.
//!
//! The engine is host-agnostic. Everything that touches a real UI tree —
//! selector queries, geometry measurement, native focus and blur, event
//! delivery, deferred scheduling — sits behind the two traits in [`host`]:
//! [`ElementLookup`] (read side) and [`FocusBackend`] (effect side). A
//! browser host maps them onto the DOM and `sn:*` custom events; a test
//! host maps them onto plain structs.
//!
//! ## Minimal example
//!
//! Drive a two-element host with arrow keys:
//!
//! ```rust
//! use arrowwood_engine::{
//!     Deferred, Direction, Dispatched, ElementLookup, Event, FocusBackend, Modifiers,
//!     Navigator, QueryError, SectionConfig, Selector,
//! };
//! use kurbo::Rect;
//!
//! // A host with two buttons side by side.
//! struct TwoButtons {
//!     focused: Option<u32>,
//! }
//!
//! impl ElementLookup<u32> for TwoButtons {
//!     fn query(&self, selector: &str) -> Result<Vec<u32>, QueryError> {
//!         Ok(if selector == ".button" { vec![1, 2] } else { vec![] })
//!     }
//!     fn matches(&self, element: &u32, selector: &str) -> bool {
//!         selector == ".button" && (*element == 1 || *element == 2)
//!     }
//!     fn bounds(&self, element: &u32) -> Option<Rect> {
//!         let x = f64::from(*element - 1) * 100.0;
//!         Some(Rect::new(x, 0.0, x + 50.0, 50.0))
//!     }
//!     fn is_visible(&self, _: &u32) -> bool {
//!         true
//!     }
//!     fn is_disabled(&self, _: &u32) -> bool {
//!         false
//!     }
//!     fn nav_override(&self, _: &u32, _: Direction) -> Option<String> {
//!         None
//!     }
//!     fn has_tab_index(&self, _: &u32) -> bool {
//!         false
//!     }
//!     fn defers_scroll(&self, _: &u32) -> bool {
//!         false
//!     }
//! }
//!
//! impl FocusBackend<u32> for TwoButtons {
//!     fn focus(&mut self, element: &u32) {
//!         self.focused = Some(*element);
//!     }
//!     fn blur(&mut self, element: &u32) {
//!         if self.focused == Some(*element) {
//!             self.focused = None;
//!         }
//!     }
//!     fn focused(&self) -> Option<u32> {
//!         self.focused
//!     }
//!     fn set_tab_index(&mut self, _: &u32, _: i32) {}
//!     fn dispatch(&mut self, _: &u32, _: &Event<u32>) -> Dispatched<u32> {
//!         Dispatched::ok()
//!     }
//!     fn defer(&mut self, _: Deferred<u32>) {}
//! }
//!
//! let mut nav = Navigator::new(TwoButtons { focused: None });
//! nav.init();
//! nav.add_section(SectionConfig::for_selector(Selector::css(".button")));
//!
//! // Nothing focused yet: the first key press lands in the section.
//! assert!(nav.on_key_down(39, Modifiers::empty()));
//! assert_eq!(nav.focused_element(), Some(1));
//!
//! // Right arrow moves to the neighbor.
//! assert!(nav.on_key_down(39, Modifiers::empty()));
//! assert_eq!(nav.focused_element(), Some(2));
//! ```
//!
//! ## Layering
//!
//! - [`config`] — global defaults plus per-section overlays; unset keys
//!   fall through at read time.
//! - [`events`] — the `sn:*` protocol payloads; `will-*` events are
//!   cancellable vetoes, the rest are notifications.
//! - [`host`] — the boundary traits, query errors (logged and treated as
//!   "no match"), and deferred actions.
//! - [`section`] — navigability predicates, default/last-focused/primary
//!   resolution, and the three-valued leave-for outcome.
//! - [`navigator`] — intake, scoped election, the focus-change protocol,
//!   and the re-entrancy guard.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod events;
pub mod host;
pub mod navigator;
pub mod section;

pub use arrowwood_elect::{Direction, NavRect, PreviousFocus};

pub use config::{
    FocusPriority, LeaveFor, LeaveTarget, NavConfig, NavigableFilter, Restrict, SectionConfig,
    SectionHook, Selector,
};
pub use events::{Cause, Event};
pub use host::{
    Deferred, DeferredTiming, Dispatched, ElementLookup, FocusBackend, QueryError,
};
pub use navigator::{KEY_ENTER, Modifiers, Navigator};
pub use section::{LeaveOutcome, Section};
