// Copyright 2026 the Arrowwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration: global defaults and per-section overlays.
//!
//! Every behavioral knob exists twice: as a concrete value in [`NavConfig`]
//! (the navigator-held defaults) and as an `Option` in [`SectionConfig`]
//! (the per-section overlay). An unset section key falls through to the
//! global value at read time; an unset key is therefore *not* the same as a
//! key set to the default value, and overlaying never erases keys.

use alloc::string::String;
use alloc::vec::Vec;

use arrowwood_elect::Direction;

/// Predicate deciding whether an element may receive focus, layered on top
/// of the built-in visibility and disabled checks. A section-level filter
/// replaces the global one entirely.
pub type NavigableFilter<K> = fn(&K) -> bool;

/// Notification hook invoked when focus enters or leaves a section.
pub type SectionHook<K> = fn(&K);

/// Scope policy for the election step of a move.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Restrict {
    /// Only elements of the source section compete.
    SelfOnly,
    /// The source section competes first; other sections are consulted only
    /// when it yields nothing.
    #[default]
    SelfFirst,
    /// All sections compete at once.
    None,
}

/// How a section picks its entry element when focus moves into it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FocusPriority {
    /// No preference; the elected element stands.
    #[default]
    None,
    /// Prefer the element that was focused when the section was last left.
    LastFocused,
    /// Prefer the section's configured default element.
    DefaultElement,
}

/// What belongs to a section, or where a leave-for override points.
///
/// A selector is either a query string resolved through the host, a direct
/// element handle, or an explicit collection of handles.
#[derive(Clone, Debug, PartialEq)]
pub enum Selector<K> {
    /// A query string, resolved through [`ElementLookup::query`]
    /// (empty resolves to nothing).
    ///
    /// [`ElementLookup::query`]: crate::host::ElementLookup::query
    Css(String),
    /// A single element handle.
    Handle(K),
    /// An explicit collection of element handles.
    Many(Vec<K>),
}

impl<K> Selector<K> {
    /// Shorthand for a query-string selector.
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }
}

/// One leave-for override target.
///
/// Only string selectors actually navigate: an empty string suppresses the
/// move outright, a non-empty string is routed through the extended-selector
/// focus path (so `@`-prefixed section references work). Handles and
/// collections are accepted for schema compatibility but fall through to the
/// normal election result. A callable is invoked at lookup time to produce
/// one of the former.
#[derive(Clone, Debug)]
pub enum LeaveTarget<K> {
    /// A fixed selector.
    Sel(Selector<K>),
    /// Computed at lookup time from the requested direction.
    Compute(fn(Direction) -> Option<LeaveTarget<K>>),
}

impl<K> LeaveTarget<K> {
    /// Shorthand for a query-string target.
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Sel(Selector::Css(selector.into()))
    }
}

/// Partial per-direction map of leave-for overrides.
///
/// A direction with no entry means "no override"; an entry pointing at an
/// empty string means "explicitly block moves in this direction".
#[derive(Clone, Debug, Default)]
pub struct LeaveFor<K> {
    /// Override for upward moves.
    pub up: Option<LeaveTarget<K>>,
    /// Override for downward moves.
    pub down: Option<LeaveTarget<K>>,
    /// Override for leftward moves.
    pub left: Option<LeaveTarget<K>>,
    /// Override for rightward moves.
    pub right: Option<LeaveTarget<K>>,
}

impl<K> LeaveFor<K> {
    /// The override for `direction`, if one is configured.
    pub fn get(&self, direction: Direction) -> Option<&LeaveTarget<K>> {
        match direction {
            Direction::Up => self.up.as_ref(),
            Direction::Down => self.down.as_ref(),
            Direction::Left => self.left.as_ref(),
            Direction::Right => self.right.as_ref(),
        }
    }

    /// Builder-style insertion.
    #[must_use]
    pub fn with(mut self, direction: Direction, target: LeaveTarget<K>) -> Self {
        match direction {
            Direction::Up => self.up = Some(target),
            Direction::Down => self.down = Some(target),
            Direction::Left => self.left = Some(target),
            Direction::Right => self.right = Some(target),
        }
        self
    }
}

/// The navigator-held defaults every section read falls back to.
#[derive(Clone, Debug)]
pub struct NavConfig<K> {
    /// Default membership selector for sections that set none.
    pub selector: Selector<K>,
    /// Drop the diagonal priority class from elections.
    pub straight_only: bool,
    /// Overlap fraction in `[0, 1]` for the partition spill rule.
    pub straight_overlap_threshold: f64,
    /// Snap back to the source element on direction reversal.
    pub remember_source: bool,
    /// Entry-element preference when focus moves into a section.
    pub priority: FocusPriority,
    /// Default leave-for overrides.
    pub leave_for: Option<LeaveFor<K>>,
    /// Election scope policy.
    pub restrict: Restrict,
    /// Elements matching this selector keep their tab order untouched by
    /// `make_focusable`.
    pub tab_index_ignore_list: String,
    /// Additional navigability predicate.
    pub navigable_filter: Option<NavigableFilter<K>>,
    /// Hook invoked when focus enters a section from another section.
    pub on_focus: Option<SectionHook<K>>,
    /// Hook invoked when focus leaves a section for another section.
    pub on_blur: Option<SectionHook<K>>,
}

impl<K> Default for NavConfig<K> {
    fn default() -> Self {
        Self {
            selector: Selector::Css(String::new()),
            straight_only: false,
            straight_overlap_threshold: 0.5,
            remember_source: false,
            priority: FocusPriority::None,
            leave_for: None,
            restrict: Restrict::SelfFirst,
            tab_index_ignore_list: String::from(
                "a, input, select, textarea, button, iframe, [contenteditable=true]",
            ),
            navigable_filter: None,
            on_focus: None,
            on_blur: None,
        }
    }
}

impl<K: Clone> NavConfig<K> {
    /// Apply a partial configuration onto the defaults. Unset keys are left
    /// alone; section-only keys (`id`, `default_element_selector`) are
    /// ignored here.
    pub fn apply(&mut self, patch: SectionConfig<K>) {
        patch.validate();
        let SectionConfig {
            id: _,
            default_element_selector: _,
            selector,
            straight_only,
            straight_overlap_threshold,
            remember_source,
            priority,
            leave_for,
            restrict,
            tab_index_ignore_list,
            navigable_filter,
            on_focus,
            on_blur,
        } = patch;
        if let Some(value) = selector {
            self.selector = value;
        }
        if let Some(value) = straight_only {
            self.straight_only = value;
        }
        if let Some(value) = straight_overlap_threshold {
            self.straight_overlap_threshold = value;
        }
        if let Some(value) = remember_source {
            self.remember_source = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = leave_for {
            self.leave_for = Some(value);
        }
        if let Some(value) = restrict {
            self.restrict = value;
        }
        if let Some(value) = tab_index_ignore_list {
            self.tab_index_ignore_list = value;
        }
        if let Some(value) = navigable_filter {
            self.navigable_filter = Some(value);
        }
        if let Some(value) = on_focus {
            self.on_focus = Some(value);
        }
        if let Some(value) = on_blur {
            self.on_blur = Some(value);
        }
    }
}

/// Partial configuration: what a section sets for itself.
///
/// Every key is optional; reads resolve through the owning navigator's
/// [`NavConfig`]. `id` and `default_element_selector` exist only at the
/// section level.
#[derive(Clone, Debug)]
pub struct SectionConfig<K> {
    /// Section id; generated by the navigator when absent.
    pub id: Option<String>,
    /// Selector for the section's entry element under
    /// [`FocusPriority::DefaultElement`].
    pub default_element_selector: Option<String>,
    /// What belongs to this section.
    pub selector: Option<Selector<K>>,
    /// See [`NavConfig::straight_only`].
    pub straight_only: Option<bool>,
    /// See [`NavConfig::straight_overlap_threshold`].
    pub straight_overlap_threshold: Option<f64>,
    /// See [`NavConfig::remember_source`].
    pub remember_source: Option<bool>,
    /// See [`NavConfig::priority`].
    pub priority: Option<FocusPriority>,
    /// See [`NavConfig::leave_for`].
    pub leave_for: Option<LeaveFor<K>>,
    /// See [`NavConfig::restrict`].
    pub restrict: Option<Restrict>,
    /// See [`NavConfig::tab_index_ignore_list`].
    pub tab_index_ignore_list: Option<String>,
    /// See [`NavConfig::navigable_filter`].
    pub navigable_filter: Option<NavigableFilter<K>>,
    /// See [`NavConfig::on_focus`].
    pub on_focus: Option<SectionHook<K>>,
    /// See [`NavConfig::on_blur`].
    pub on_blur: Option<SectionHook<K>>,
}

impl<K> Default for SectionConfig<K> {
    fn default() -> Self {
        Self {
            id: None,
            default_element_selector: None,
            selector: None,
            straight_only: None,
            straight_overlap_threshold: None,
            remember_source: None,
            priority: None,
            leave_for: None,
            restrict: None,
            tab_index_ignore_list: None,
            navigable_filter: None,
            on_focus: None,
            on_blur: None,
        }
    }
}

impl<K> SectionConfig<K> {
    /// Shorthand for the common case: a section defined by a selector.
    pub fn for_selector(selector: Selector<K>) -> Self {
        Self {
            selector: Some(selector),
            ..Self::default()
        }
    }

    /// Overlay another partial configuration onto this one. Keys the patch
    /// leaves unset are untouched.
    pub fn overlay(&mut self, patch: SectionConfig<K>) {
        patch.validate();
        macro_rules! take {
            ($($field:ident),+ $(,)?) => {
                $(if patch.$field.is_some() {
                    self.$field = patch.$field;
                })+
            };
        }
        take!(
            id,
            default_element_selector,
            selector,
            straight_only,
            straight_overlap_threshold,
            remember_source,
            priority,
            leave_for,
            restrict,
            tab_index_ignore_list,
            navigable_filter,
            on_focus,
            on_blur,
        );
    }

    /// Reject out-of-range values.
    ///
    /// # Panics
    ///
    /// Panics when `straight_overlap_threshold` lies outside `[0, 1]`.
    pub fn validate(&self) {
        if let Some(threshold) = self.straight_overlap_threshold {
            assert!(
                (0.0..=1.0).contains(&threshold),
                "straight_overlap_threshold must lie in [0, 1], got {threshold}"
            );
        }
    }
}
