// Copyright 2026 the Arrowwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The navigator: the engine's front door.
//!
//! A [`Navigator`] owns the host and an insertion-ordered set of
//! [`Section`]s, turns key and native focus events into directional moves,
//! runs the election with the source section's scope policy, and drives the
//! cancellable focus-change protocol.
//!
//! ## The shape of a move
//!
//! 1. **Intake** — suppressed when uninitialised, paused, sectionless, or
//!    any modifier key is down. Arrow keys map to directions; Enter raises
//!    its own event pair.
//! 2. **Source resolution** — the focused element, else the last-active
//!    section's remembered element, else focus any section and stop.
//! 3. **Veto** — a cancellable `will-move` on the source.
//! 4. **Override** — a `data-sn-<direction>` attribute short-circuits the
//!    election; the empty string blocks the move outright.
//! 5. **Election** — candidates gathered from every section, scoped by the
//!    source section's restrict policy.
//! 6. **Transition** — cross-section moves consult the source's leave-for
//!    override and the destination's priority strategy, then the focus
//!    change runs: `will-unfocus → on_blur hook → unfocused → will-focus →
//!    on_focus hook → focused`.
//!
//! Failures to find any destination are reported through the
//! `navigate-failed` notification, never as errors; the key-handling path
//! does not panic.
//!
//! ## Re-entrancy
//!
//! `during_focus_change` guards the focus routine against the feedback
//! loop between the engine and native focus/blur handlers. While a change
//! is in flight, any nested focus request — a handler
//! [follow-up](crate::host::Dispatched::follow_up), a native event echo —
//! degrades to a silent blur+focus with no events. A rejected native blur
//! keeps the guard up until the host runs the deferred re-focus.

use alloc::borrow::ToOwned;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use arrowwood_elect::{Direction, ElectOpts, NavRect, elect};
use bitflags::bitflags;
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::config::{LeaveTarget, NavConfig, Restrict, SectionConfig, SectionHook, Selector};
use crate::events::{Cause, Event};
use crate::host::{Deferred, ElementLookup, FocusBackend, resolve, resolve_one, selector_matches};
use crate::section::{LeaveOutcome, Section};

/// Key code of the Enter key.
pub const KEY_ENTER: u32 = 13;

bitflags! {
    /// Keyboard modifier state at intake time. Any set flag suppresses
    /// spatial handling of the key.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        /// Alt/Option.
        const ALT = 1;
        /// Control.
        const CTRL = 1 << 1;
        /// Meta/Command.
        const META = 1 << 2;
        /// Shift.
        const SHIFT = 1 << 3;
    }
}

/// Multi-section focus coordinator.
///
/// Generic over the element key `K` and a host `H` implementing both sides
/// of the host boundary. Multiple navigators may coexist, each with its own
/// host, sections, and defaults; they share nothing.
#[derive(Debug)]
pub struct Navigator<K, H> {
    host: H,
    global: NavConfig<K>,
    sections: Vec<Section<K>>,
    index_by_id: HashMap<String, usize>,
    default_section_id: Option<String>,
    last_section_id: Option<String>,
    id_seed: u32,
    ready: bool,
    paused: bool,
    during_focus_change: bool,
}

impl<K, H> Navigator<K, H>
where
    K: Clone + PartialEq,
    H: ElementLookup<K> + FocusBackend<K>,
{
    /// Create a navigator over `host` with default global configuration.
    pub fn new(host: H) -> Self {
        Self {
            host,
            global: NavConfig::default(),
            sections: Vec::new(),
            index_by_id: HashMap::new(),
            default_section_id: None,
            last_section_id: None,
            id_seed: 0,
            ready: false,
            paused: false,
            during_focus_change: false,
        }
    }

    /// Read access to the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // --- Lifecycle ---

    /// Start handling events. Idempotent; the host is expected to attach
    /// its listeners alongside.
    pub fn init(&mut self) {
        self.ready = true;
    }

    /// Stop handling events and drop all state, including sections and the
    /// generated-id seed.
    pub fn uninit(&mut self) {
        self.ready = false;
        self.paused = false;
        self.id_seed = 0;
        self.clear();
    }

    /// Remove every section and all per-section state. The global
    /// configuration is kept.
    pub fn clear(&mut self) {
        self.sections.clear();
        self.index_by_id.clear();
        self.default_section_id = None;
        self.last_section_id = None;
        self.during_focus_change = false;
    }

    /// Suspend event handling. Focus changes made while paused are silent.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume event handling.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whether listeners are considered attached.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Whether event handling is suspended.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    // --- Configuration ---

    /// The navigator-held global defaults.
    pub fn config(&self) -> &NavConfig<K> {
        &self.global
    }

    /// Apply a partial configuration: onto the named section, or onto the
    /// global defaults when `section_id` is `None`.
    ///
    /// # Panics
    ///
    /// Panics on an unknown section id or an out-of-range
    /// `straight_overlap_threshold`.
    pub fn set_config(&mut self, config: SectionConfig<K>, section_id: Option<&str>) {
        match section_id {
            None => self.global.apply(config),
            Some(id) => {
                let Some(&index) = self.index_by_id.get(id) else {
                    panic!("section {id:?} doesn't exist");
                };
                self.sections[index].config_mut().overlay(config);
            }
        }
    }

    // --- Section management ---

    /// Register a section. When the configuration names no id, one is
    /// generated (`section-1`, `section-2`, …).
    ///
    /// # Panics
    ///
    /// Panics when the id is already taken or the configuration is invalid.
    pub fn add_section(&mut self, config: SectionConfig<K>) -> &Section<K> {
        config.validate();
        let id = match config.id.clone() {
            Some(id) => {
                assert!(
                    !self.index_by_id.contains_key(&id),
                    "section {id:?} already exists"
                );
                id
            }
            None => self.generate_id(),
        };
        let index = self.sections.len();
        self.sections.push(Section::new(id.clone(), config));
        self.index_by_id.insert(id, index);
        &self.sections[index]
    }

    fn generate_id(&mut self) -> String {
        loop {
            self.id_seed += 1;
            let id = format!("section-{}", self.id_seed);
            if !self.index_by_id.contains_key(&id) {
                return id;
            }
        }
    }

    /// Unregister a section. Returns whether one was removed.
    ///
    /// # Panics
    ///
    /// Panics on an empty id (a sign of a caller bug, distinct from a
    /// merely unknown id).
    pub fn remove_section(&mut self, section_id: &str) -> bool {
        assert!(!section_id.is_empty(), "a section id must be given");
        let Some(index) = self.index_by_id.remove(section_id) else {
            return false;
        };
        self.sections.remove(index);
        for (slot, section) in self.sections.iter().enumerate().skip(index) {
            self.index_by_id.insert(section.id().to_owned(), slot);
        }
        if self.last_section_id.as_deref() == Some(section_id) {
            self.last_section_id = None;
        }
        true
    }

    /// Disable a section: its elements stop being navigable and the section
    /// is skipped by lookups. Returns whether the section exists.
    pub fn disable_section(&mut self, section_id: &str) -> bool {
        self.set_section_disabled(section_id, true)
    }

    /// Re-enable a disabled section. Returns whether the section exists.
    pub fn enable_section(&mut self, section_id: &str) -> bool {
        self.set_section_disabled(section_id, false)
    }

    fn set_section_disabled(&mut self, section_id: &str, disabled: bool) -> bool {
        match self.index_by_id.get(section_id) {
            Some(&index) => {
                self.sections[index].set_disabled(disabled);
                true
            }
            None => false,
        }
    }

    /// Nominate the section `focus()` tries first. `None` clears the
    /// nomination.
    ///
    /// # Panics
    ///
    /// Panics on an unknown id.
    pub fn set_default_section(&mut self, section_id: Option<&str>) {
        match section_id {
            None => self.default_section_id = None,
            Some(id) => {
                assert!(
                    self.index_by_id.contains_key(id),
                    "section {id:?} doesn't exist"
                );
                self.default_section_id = Some(id.to_owned());
            }
        }
    }

    /// Look up a section by id.
    pub fn section(&self, section_id: &str) -> Option<&Section<K>> {
        self.index_by_id
            .get(section_id)
            .map(|&index| &self.sections[index])
    }

    /// The sections, in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = &Section<K>> {
        self.sections.iter()
    }

    /// Number of registered sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// The section that most recently held focus.
    pub fn last_section(&self) -> Option<&Section<K>> {
        self.last_section_id
            .as_deref()
            .and_then(|id| self.section(id))
    }

    /// The first enabled section containing `element`, in insertion order.
    pub fn find_section(&self, element: &K) -> Option<&Section<K>> {
        self.sections.iter().find(|section| {
            !section.is_disabled()
                && selector_matches(&self.host, section.selector(&self.global), element)
        })
    }

    fn section_id_of(&self, element: &K) -> Option<String> {
        self.find_section(element).map(|s| s.id().to_owned())
    }

    /// Give every section member without an explicit tab index a tab index
    /// of −1, skipping elements on the tab-index ignore list. Applies to
    /// one section, or to all of them when `section_id` is `None`.
    ///
    /// # Panics
    ///
    /// Panics on an unknown id.
    pub fn make_focusable(&mut self, section_id: Option<&str>) {
        match section_id {
            Some(id) => {
                let Some(&index) = self.index_by_id.get(id) else {
                    panic!("section {id:?} doesn't exist");
                };
                self.make_section_focusable(index);
            }
            None => {
                for index in 0..self.sections.len() {
                    self.make_section_focusable(index);
                }
            }
        }
    }

    fn make_section_focusable(&mut self, index: usize) {
        let section = &self.sections[index];
        let ignore = section.tab_index_ignore_list(&self.global).to_owned();
        let members = resolve(&self.host, section.selector(&self.global));
        for element in members {
            if !self.host.matches(&element, &ignore) && !self.host.has_tab_index(&element) {
                self.host.set_tab_index(&element, -1);
            }
        }
    }

    // --- Focus ---

    /// The currently focused element, as reported by the host.
    pub fn focused_element(&self) -> Option<K> {
        self.host.focused()
    }

    /// Focus a section by the fallback ordering: default section, then the
    /// last-active section, then all remaining sections in insertion order.
    pub fn focus(&mut self) -> bool {
        self.focus_with(None, false)
    }

    /// [`Navigator::focus`] without emitting any events.
    pub fn focus_silently(&mut self) -> bool {
        self.focus_with(None, true)
    }

    /// Focus a section id, or anything an extended selector can name.
    pub fn focus_target(&mut self, target: &str, silent: bool) -> bool {
        self.focus_with(Some(target), silent)
    }

    /// Focus a specific element handle, resolving its section first.
    pub fn focus_handle(&mut self, element: &K, silent: bool) -> bool {
        let auto_pause = !self.paused && silent;
        if auto_pause {
            self.paused = true;
        }
        let result = match self.section_id_of(element) {
            Some(section_id) => self.focus_element(element, &section_id, None),
            None => false,
        };
        if auto_pause {
            self.paused = false;
        }
        result
    }

    fn focus_with(&mut self, target: Option<&str>, silent: bool) -> bool {
        let auto_pause = !self.paused && silent;
        if auto_pause {
            self.paused = true;
        }
        let result = match target {
            None => self.focus_section(None),
            Some(target) => {
                if self.index_by_id.contains_key(target) {
                    self.focus_section(Some(target))
                } else {
                    self.focus_extended_selector(target, None)
                }
            }
        };
        if auto_pause {
            self.paused = false;
        }
        result
    }

    /// Focus through an extended selector: `@` focuses the default/last/any
    /// section, `@foo` focuses section `foo`, anything else is resolved to
    /// at most one element which must be navigable in its section.
    pub fn focus_extended_selector(
        &mut self,
        selector: &str,
        direction: Option<Direction>,
    ) -> bool {
        if let Some(section_ref) = selector.strip_prefix('@') {
            if section_ref.is_empty() {
                self.focus_section(None)
            } else {
                self.focus_section(Some(section_ref))
            }
        } else {
            let Some(element) = resolve_one(&self.host, selector) else {
                return false;
            };
            let Some(section_id) = self.section_id_of(&element) else {
                return false;
            };
            let index = self.index_by_id[&section_id];
            if !self.sections[index].is_navigable(&self.host, &self.global, &element, false) {
                return false;
            }
            self.focus_element(&element, &section_id, direction)
        }
    }

    /// Focus a section: the given one, or the first accepting section in
    /// the fallback ordering.
    pub fn focus_section(&mut self, section_id: Option<&str>) -> bool {
        let mut range: SmallVec<[String; 4]> = SmallVec::new();
        match section_id {
            Some(id) => {
                if self.section_enabled(id) {
                    range.push(id.to_owned());
                }
            }
            None => {
                if let Some(id) = self.default_section_id.clone()
                    && self.section_enabled(&id)
                {
                    range.push(id);
                }
                if let Some(id) = self.last_section_id.clone()
                    && self.section_enabled(&id)
                    && !range.contains(&id)
                {
                    range.push(id);
                }
                for section in &self.sections {
                    if !section.is_disabled() && !range.iter().any(|id| id == section.id()) {
                        range.push(section.id().to_owned());
                    }
                }
            }
        }

        for id in range {
            let index = self.index_by_id[&id];
            let Some(candidate) = self.sections[index].entry_candidate(&self.host, &self.global)
            else {
                continue;
            };
            if self.focus_element(&candidate, &id, None) {
                return true;
            }
        }
        false
    }

    fn section_enabled(&self, section_id: &str) -> bool {
        self.index_by_id
            .get(section_id)
            .is_some_and(|&index| !self.sections[index].is_disabled())
    }

    /// Run the focus-change protocol toward `element`.
    ///
    /// Nested invocations (the re-entrancy guard is up) and paused
    /// navigators perform a silent blur+focus with no events.
    pub fn focus_element(
        &mut self,
        element: &K,
        section_id: &str,
        direction: Option<Direction>,
    ) -> bool {
        if self.during_focus_change {
            self.silent_focus(element, section_id);
            return true;
        }
        self.during_focus_change = true;
        if self.paused {
            self.silent_focus(element, section_id);
            self.during_focus_change = false;
            return true;
        }

        let current = self.host.focused();
        let current_section_id = current.as_ref().and_then(|el| self.section_id_of(el));
        let crossing = current_section_id.as_deref() != Some(section_id);

        if let Some(current_element) = current.clone() {
            let will_unfocus = Event::WillUnfocus {
                next: Some(element.clone()),
                next_section_id: Some(section_id.to_owned()),
                direction,
                native: false,
            };
            if !self.fire(&current_element, &will_unfocus) {
                self.during_focus_change = false;
                return false;
            }
            self.host.blur(&current_element);
            if crossing
                && let Some(source_id) = current_section_id.as_deref()
                && let Some(hook) = self.blur_hook_of(source_id)
            {
                hook(&current_element);
            }
            let unfocused = Event::Unfocused {
                next: Some(element.clone()),
                next_section_id: Some(section_id.to_owned()),
                direction,
                native: false,
            };
            self.fire_notification(&current_element, &unfocused);
        }

        let will_focus = Event::WillFocus {
            previous: current.clone(),
            section_id: section_id.to_owned(),
            direction,
            native: false,
        };
        if !self.fire(element, &will_focus) {
            self.during_focus_change = false;
            return false;
        }
        if self.host.defers_scroll(element) {
            self.host.defer(Deferred::NativeFocus(element.clone()));
        } else {
            self.host.focus(element);
        }
        if crossing
            && let Some(hook) = self.focus_hook_of(section_id)
        {
            hook(element);
        }
        let focused = Event::Focused {
            previous: current,
            section_id: section_id.to_owned(),
            direction,
            native: false,
        };
        self.fire_notification(element, &focused);
        self.during_focus_change = false;
        self.focus_changed(element, Some(section_id));
        true
    }

    /// Attempt a directional move from the focused element, or from the
    /// element a selector names.
    pub fn move_focus(&mut self, direction: Direction, selector: Option<&str>) -> bool {
        let element = match selector {
            Some(selector) => match resolve_one(&self.host, selector) {
                Some(element) => element,
                None => return false,
            },
            None => match self.host.focused() {
                Some(element) => element,
                None => return false,
            },
        };
        let Some(section_id) = self.section_id_of(&element) else {
            return false;
        };
        let will_move = Event::WillMove {
            direction,
            section_id: section_id.clone(),
            cause: Cause::Api,
        };
        if !self.fire(&element, &will_move) {
            return false;
        }
        self.focus_next(direction, &element, &section_id, Cause::Api)
    }

    // --- Key and native-event intake ---

    /// Handle a key-down. Returns whether the host should prevent the key's
    /// default action.
    pub fn on_key_down(&mut self, key_code: u32, modifiers: Modifiers) -> bool {
        if !self.ready || self.sections.is_empty() || self.paused || !modifiers.is_empty() {
            return false;
        }

        let Some(direction) = Direction::from_key_code(key_code) else {
            if key_code == KEY_ENTER
                && let Some(current) = self.host.focused()
                && self.section_id_of(&current).is_some()
                && !self.fire(&current, &Event::EnterDown)
            {
                return true;
            }
            return false;
        };

        let current = self.host.focused().or_else(|| {
            self.last_section_id
                .as_deref()
                .and_then(|id| self.section(id))
                .and_then(|section| section.last_focused_navigable(&self.host, &self.global))
        });
        let Some(current) = current else {
            self.focus_section(None);
            return true;
        };
        let Some(section_id) = self.section_id_of(&current) else {
            return false;
        };

        let will_move = Event::WillMove {
            direction,
            section_id: section_id.clone(),
            cause: Cause::Keydown,
        };
        if self.fire(&current, &will_move) {
            self.focus_next(direction, &current, &section_id, Cause::Keydown);
        }
        true
    }

    /// Handle a key-up. Returns whether the host should prevent the key's
    /// default action (only ever true for a cancelled Enter release).
    pub fn on_key_up(&mut self, key_code: u32, modifiers: Modifiers) -> bool {
        if !modifiers.is_empty() {
            return false;
        }
        if !self.ready || self.paused || self.sections.is_empty() || key_code != KEY_ENTER {
            return false;
        }
        if let Some(current) = self.host.focused()
            && self.section_id_of(&current).is_some()
        {
            return !self.fire(&current, &Event::EnterUp);
        }
        false
    }

    /// Handle a native focus event on a tracked element.
    ///
    /// Ignored while a focus change is in flight (our own native focus call
    /// echoing back). While paused only the bookkeeping runs. A handler
    /// cancelling `will-focus` gets the element blurred again.
    pub fn on_native_focus(&mut self, element: &K) {
        if !self.ready || self.sections.is_empty() || self.during_focus_change {
            return;
        }
        let Some(section_id) = self.section_id_of(element) else {
            return;
        };
        if self.paused {
            self.focus_changed(element, Some(&section_id));
            return;
        }
        let will_focus = Event::WillFocus {
            previous: None,
            section_id: section_id.clone(),
            direction: None,
            native: true,
        };
        if !self.fire(element, &will_focus) {
            self.during_focus_change = true;
            self.host.blur(element);
            self.during_focus_change = false;
        } else {
            let focused = Event::Focused {
                previous: None,
                section_id: section_id.clone(),
                direction: None,
                native: true,
            };
            self.fire_notification(element, &focused);
            self.focus_changed(element, Some(&section_id));
        }
    }

    /// Handle a native focus event landing on the window or document
    /// rather than an element: restore section focus.
    pub fn on_window_focus(&mut self) {
        if self.ready {
            self.focus_section(None);
        }
    }

    /// Handle a native blur event on a tracked element.
    ///
    /// A handler cancelling `will-unfocus` schedules a deferred re-focus;
    /// the re-entrancy guard stays up until [`Navigator::run_deferred`]
    /// executes it, so intervening focus changes stay silent.
    pub fn on_native_blur(&mut self, element: &K) {
        if !self.ready
            || self.paused
            || self.sections.is_empty()
            || self.during_focus_change
            || self.section_id_of(element).is_none()
        {
            return;
        }
        let will_unfocus = Event::WillUnfocus {
            next: None,
            next_section_id: None,
            direction: None,
            native: true,
        };
        if !self.fire(element, &will_unfocus) {
            self.during_focus_change = true;
            self.host.defer(Deferred::Refocus(element.clone()));
        } else {
            let unfocused = Event::Unfocused {
                next: None,
                next_section_id: None,
                direction: None,
                native: true,
            };
            self.fire_notification(element, &unfocused);
        }
    }

    /// Execute a deferred action previously handed to the host.
    pub fn run_deferred(&mut self, action: Deferred<K>) {
        match action {
            Deferred::Refocus(element) => {
                self.host.focus(&element);
                self.during_focus_change = false;
            }
            Deferred::NativeFocus(element) => {
                self.host.focus(&element);
            }
        }
    }

    // --- Internals ---

    fn focus_next(
        &mut self,
        direction: Direction,
        current: &K,
        current_section_id: &str,
        cause: Cause,
    ) -> bool {
        // Per-element override: empty blocks, anything else routes through
        // the extended-selector path.
        if let Some(override_selector) = self.host.nav_override(current, direction) {
            if override_selector.is_empty()
                || !self.focus_extended_selector(&override_selector, Some(direction))
            {
                self.fire_navigate_failed(current, Some(direction), cause);
                return false;
            }
            return true;
        }

        let Some(&current_index) = self.index_by_id.get(current_section_id) else {
            return false;
        };

        let mut per_section: Vec<Vec<K>> = Vec::with_capacity(self.sections.len());
        for section in &self.sections {
            per_section.push(section.navigable_elements(&self.host, &self.global));
        }

        let next: Option<K> = {
            let section = &self.sections[current_index];
            let restrict = section.restrict(&self.global);
            let opts = ElectOpts {
                straight_only: section.straight_only(&self.global),
                straight_overlap_threshold: section.straight_overlap_threshold(&self.global),
                remember_source: section.remember_source(&self.global),
                previous_focus: section.previous_focus(),
            };
            let host = &self.host;
            let target = host
                .bounds(current)
                .map(|bounds| NavRect::new(current.clone(), bounds));
            let elect_among = |candidates: Vec<K>| -> Option<K> {
                let target = target.as_ref()?;
                let rects: Vec<NavRect<K>> = candidates
                    .into_iter()
                    .filter_map(|element| {
                        host.bounds(&element)
                            .map(|bounds| NavRect::new(element, bounds))
                    })
                    .collect();
                elect(target, direction, &rects, &opts)
                    .map(|winner| rects[winner].element.clone())
            };

            match restrict {
                Restrict::SelfOnly | Restrict::SelfFirst => {
                    let own: Vec<K> = per_section[current_index]
                        .iter()
                        .filter(|element| *element != current)
                        .cloned()
                        .collect();
                    let mut winner = elect_among(own);
                    if winner.is_none() && restrict == Restrict::SelfFirst {
                        let own_list = &per_section[current_index];
                        let others: Vec<K> = per_section
                            .iter()
                            .enumerate()
                            .filter(|(index, _)| *index != current_index)
                            .flat_map(|(_, list)| list.iter())
                            .filter(|element| !own_list.contains(*element))
                            .cloned()
                            .collect();
                        winner = elect_among(others);
                    }
                    winner
                }
                Restrict::None => {
                    let all: Vec<K> = per_section
                        .iter()
                        .flatten()
                        .filter(|element| *element != current)
                        .cloned()
                        .collect();
                    elect_among(all)
                }
            }
        };

        if let Some(next_element) = next {
            self.sections[current_index].save_previous_focus(
                current.clone(),
                next_element.clone(),
                direction.reverse(),
            );

            let next_section_id = self.section_id_of(&next_element);
            let mut destination = next_element;
            if next_section_id.as_deref() != Some(current_section_id) {
                match self.goto_leave_for(current_index, direction) {
                    LeaveOutcome::Handled => return true,
                    LeaveOutcome::Suppressed => {
                        self.fire_navigate_failed(current, Some(direction), cause);
                        return false;
                    }
                    LeaveOutcome::NotApplicable => {
                        if let Some(id) = next_section_id.as_deref()
                            && let Some(section) = self.section(id)
                            && let Some(primary) =
                                section.primary_element(&self.host, &self.global)
                        {
                            destination = primary;
                        }
                    }
                }
            }

            let focus_section_id =
                next_section_id.unwrap_or_else(|| current_section_id.to_owned());
            self.focus_element(&destination, &focus_section_id, Some(direction))
        } else {
            match self.goto_leave_for(current_index, direction) {
                LeaveOutcome::Handled => true,
                LeaveOutcome::Suppressed | LeaveOutcome::NotApplicable => {
                    self.fire_navigate_failed(current, Some(direction), cause);
                    false
                }
            }
        }
    }

    /// Consult the source section's leave-for override for `direction`.
    fn goto_leave_for(&mut self, section_index: usize, direction: Direction) -> LeaveOutcome {
        let target = {
            let section = &self.sections[section_index];
            match section.leave_target(&self.global, direction) {
                None => return LeaveOutcome::NotApplicable,
                Some(LeaveTarget::Compute(produce)) => {
                    let produce = *produce;
                    match produce(direction) {
                        Some(resolved) => resolved,
                        None => return LeaveOutcome::NotApplicable,
                    }
                }
                Some(fixed) => fixed.clone(),
            }
        };
        match target {
            LeaveTarget::Sel(Selector::Css(css)) => {
                if css.is_empty() {
                    LeaveOutcome::Suppressed
                } else if self.focus_extended_selector(&css, Some(direction)) {
                    LeaveOutcome::Handled
                } else {
                    LeaveOutcome::NotApplicable
                }
            }
            // Handles, collections, and unresolved computations fall
            // through to the normal election result.
            _ => LeaveOutcome::NotApplicable,
        }
    }

    fn silent_focus(&mut self, element: &K, section_id: &str) {
        if let Some(current) = self.host.focused() {
            self.host.blur(&current);
        }
        self.host.focus(element);
        self.focus_changed(element, Some(section_id));
    }

    fn focus_changed(&mut self, element: &K, section_id: Option<&str>) {
        let id = match section_id {
            Some(id) => Some(id.to_owned()),
            None => self.section_id_of(element),
        };
        if let Some(id) = id
            && let Some(&index) = self.index_by_id.get(&id)
        {
            self.sections[index].note_focused(element);
            self.last_section_id = Some(id);
        }
    }

    /// Deliver a cancellable event; returns whether to proceed. A handler's
    /// synchronous focus request is honored before returning.
    fn fire(&mut self, target: &K, event: &Event<K>) -> bool {
        debug_assert!(event.cancellable());
        let outcome = self.host.dispatch(target, event);
        if let Some(follow_up) = outcome.follow_up {
            self.handle_follow_up(follow_up);
        }
        outcome.proceed
    }

    /// Deliver a notification; the dispatch result's cancellation flag is
    /// ignored.
    fn fire_notification(&mut self, target: &K, event: &Event<K>) {
        let outcome = self.host.dispatch(target, event);
        if let Some(follow_up) = outcome.follow_up {
            self.handle_follow_up(follow_up);
        }
    }

    /// A handler asked for focus from inside a dispatch. Under an open
    /// focus change the guard turns this into a silent move.
    fn handle_follow_up(&mut self, element: K) {
        if let Some(section_id) = self.section_id_of(&element) {
            self.focus_element(&element, &section_id, None);
        }
    }

    fn fire_navigate_failed(&mut self, target: &K, direction: Option<Direction>, cause: Cause) {
        let event = Event::NavigateFailed { direction, cause };
        self.fire_notification(target, &event);
    }

    fn blur_hook_of(&self, section_id: &str) -> Option<SectionHook<K>> {
        self.section(section_id)
            .and_then(|section| section.on_blur_hook(&self.global))
    }

    fn focus_hook_of(&self, section_id: &str) -> Option<SectionHook<K>> {
        self.section(section_id)
            .and_then(|section| section.on_focus_hook(&self.global))
    }
}
