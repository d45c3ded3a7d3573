// Copyright 2026 the Arrowwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sections: named regions of focusable elements.
//!
//! A section bundles a membership selector with behavioral configuration
//! and per-section state — which element was focused last, and the record
//! of the most recent move out of it. Sections are created and owned by a
//! [`Navigator`](crate::navigator::Navigator); they hold no reference back
//! to it, and every operation that needs the host takes it as a parameter.

use alloc::string::String;
use alloc::vec::Vec;

use arrowwood_elect::{Direction, PreviousFocus};

use crate::config::{
    FocusPriority, LeaveTarget, NavConfig, NavigableFilter, Restrict, SectionConfig, SectionHook,
    Selector,
};
use crate::host::{ElementLookup, resolve, resolve_one, selector_matches};

/// Result of consulting a section's leave-for override.
///
/// This is deliberately three-valued: `Handled` means the override focused
/// something and the move is complete; `Suppressed` means the override is an
/// explicit empty selector and the move must fail without fallback;
/// `NotApplicable` means no override applied and the caller falls through
/// to the normal result.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// The override focused its target.
    Handled,
    /// An explicit empty override blocked the move.
    Suppressed,
    /// No override applies; fall through.
    NotApplicable,
}

/// A named region of the UI sharing configuration and focus memory.
#[derive(Clone, Debug)]
pub struct Section<K> {
    id: String,
    config: SectionConfig<K>,
    disabled: bool,
    last_focused: Option<K>,
    previous_focus: Option<PreviousFocus<K>>,
}

impl<K: Clone + PartialEq> Section<K> {
    pub(crate) fn new(id: String, config: SectionConfig<K>) -> Self {
        Self {
            id,
            config,
            disabled: false,
            last_focused: None,
            previous_focus: None,
        }
    }

    /// The section's id. Fixed at construction.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the section is currently disabled. Disabled sections have no
    /// navigable elements and are skipped by section lookups.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// The section's own (partial) configuration.
    #[must_use]
    pub fn config(&self) -> &SectionConfig<K> {
        &self.config
    }

    pub(crate) fn config_mut(&mut self) -> &mut SectionConfig<K> {
        &mut self.config
    }

    /// The element focused when this section last held focus, regardless of
    /// whether it is still navigable.
    #[must_use]
    pub fn last_focused(&self) -> Option<&K> {
        self.last_focused.as_ref()
    }

    pub(crate) fn note_focused(&mut self, element: &K) {
        self.last_focused = Some(element.clone());
    }

    /// The most recent recorded move out of this section.
    #[must_use]
    pub fn previous_focus(&self) -> Option<&PreviousFocus<K>> {
        self.previous_focus.as_ref()
    }

    /// Record a completed move so that reversing the direction snaps back.
    pub(crate) fn save_previous_focus(&mut self, target: K, destination: K, reverse: Direction) {
        self.previous_focus = Some(PreviousFocus {
            target,
            destination,
            reverse,
        });
    }

    // --- Resolved configuration reads (section key over global default) ---

    pub(crate) fn selector<'a>(&'a self, global: &'a NavConfig<K>) -> &'a Selector<K> {
        self.config.selector.as_ref().unwrap_or(&global.selector)
    }

    pub(crate) fn straight_only(&self, global: &NavConfig<K>) -> bool {
        self.config.straight_only.unwrap_or(global.straight_only)
    }

    pub(crate) fn straight_overlap_threshold(&self, global: &NavConfig<K>) -> f64 {
        self.config
            .straight_overlap_threshold
            .unwrap_or(global.straight_overlap_threshold)
    }

    pub(crate) fn remember_source(&self, global: &NavConfig<K>) -> bool {
        self.config
            .remember_source
            .unwrap_or(global.remember_source)
    }

    pub(crate) fn priority(&self, global: &NavConfig<K>) -> FocusPriority {
        self.config.priority.unwrap_or(global.priority)
    }

    pub(crate) fn restrict(&self, global: &NavConfig<K>) -> Restrict {
        self.config.restrict.unwrap_or(global.restrict)
    }

    pub(crate) fn tab_index_ignore_list<'a>(&'a self, global: &'a NavConfig<K>) -> &'a str {
        self.config
            .tab_index_ignore_list
            .as_deref()
            .unwrap_or(&global.tab_index_ignore_list)
    }

    pub(crate) fn navigable_filter(&self, global: &NavConfig<K>) -> Option<NavigableFilter<K>> {
        self.config.navigable_filter.or(global.navigable_filter)
    }

    pub(crate) fn on_focus_hook(&self, global: &NavConfig<K>) -> Option<SectionHook<K>> {
        self.config.on_focus.or(global.on_focus)
    }

    pub(crate) fn on_blur_hook(&self, global: &NavConfig<K>) -> Option<SectionHook<K>> {
        self.config.on_blur.or(global.on_blur)
    }

    pub(crate) fn leave_target<'a>(
        &'a self,
        global: &'a NavConfig<K>,
        direction: Direction,
    ) -> Option<&'a LeaveTarget<K>> {
        self.config
            .leave_for
            .as_ref()
            .or(global.leave_for.as_ref())?
            .get(direction)
    }

    // --- Navigability ---

    /// Whether `element` may receive focus within this section.
    ///
    /// A disabled section has no navigable elements. Zero-area elements and
    /// elements carrying a `disabled` attribute are never navigable. With
    /// `verify_selector`, membership in the section's selector is checked
    /// too. A configured filter (section-level overriding global) gets the
    /// final word.
    pub fn is_navigable<H: ElementLookup<K>>(
        &self,
        host: &H,
        global: &NavConfig<K>,
        element: &K,
        verify_selector: bool,
    ) -> bool {
        if self.disabled {
            return false;
        }
        if !host.is_visible(element) || host.is_disabled(element) {
            return false;
        }
        if verify_selector && !selector_matches(host, self.selector(global), element) {
            return false;
        }
        match self.navigable_filter(global) {
            Some(filter) => filter(element),
            None => true,
        }
    }

    /// Materialise the section's navigable elements, in tree order. Empty
    /// when the section is disabled.
    pub fn navigable_elements<H: ElementLookup<K>>(
        &self,
        host: &H,
        global: &NavConfig<K>,
    ) -> Vec<K> {
        if self.disabled {
            return Vec::new();
        }
        resolve(host, self.selector(global))
            .into_iter()
            .filter(|element| self.is_navigable(host, global, element, false))
            .collect()
    }

    /// The configured default element, re-checked for navigability (with
    /// selector verification) at read time.
    pub fn default_element<H: ElementLookup<K>>(
        &self,
        host: &H,
        global: &NavConfig<K>,
    ) -> Option<K> {
        let selector = self.config.default_element_selector.as_deref()?;
        if selector.is_empty() {
            return None;
        }
        resolve_one(host, selector).filter(|element| self.is_navigable(host, global, element, true))
    }

    /// The remembered last-focused element, re-checked for navigability
    /// (with selector verification) at read time.
    pub fn last_focused_navigable<H: ElementLookup<K>>(
        &self,
        host: &H,
        global: &NavConfig<K>,
    ) -> Option<K> {
        self.last_focused
            .clone()
            .filter(|element| self.is_navigable(host, global, element, true))
    }

    /// The element entering focus should land on, per the section's
    /// priority strategy. `None` when the strategy expresses no preference
    /// or its preferred element is gone.
    pub fn primary_element<H: ElementLookup<K>>(
        &self,
        host: &H,
        global: &NavConfig<K>,
    ) -> Option<K> {
        match self.priority(global) {
            FocusPriority::LastFocused => self
                .last_focused_navigable(host, global)
                .or_else(|| self.default_element(host, global)),
            FocusPriority::DefaultElement => self.default_element(host, global),
            FocusPriority::None => None,
        }
    }

    /// The element to land on when this section is focused as a whole:
    /// the priority strategy's pick, falling back to the first navigable
    /// element. `None` refuses the focus (disabled or empty section).
    pub(crate) fn entry_candidate<H: ElementLookup<K>>(
        &self,
        host: &H,
        global: &NavConfig<K>,
    ) -> Option<K> {
        if self.disabled {
            return None;
        }
        let picked = match self.priority(global) {
            FocusPriority::LastFocused => self
                .last_focused_navigable(host, global)
                .or_else(|| self.default_element(host, global)),
            _ => self
                .default_element(host, global)
                .or_else(|| self.last_focused_navigable(host, global)),
        };
        picked.or_else(|| self.navigable_elements(host, global).into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use alloc::borrow::ToOwned;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::Rect;

    use super::*;
    use crate::config::LeaveFor;
    use crate::host::QueryError;

    /// A tiny host: elements are numbered 1..=3 and all belong to ".item";
    /// element 2 is invisible, element 3 carries the disabled attribute.
    struct Fixture;

    impl ElementLookup<u32> for Fixture {
        fn query(&self, selector: &str) -> Result<Vec<u32>, QueryError> {
            match selector {
                ".item" => Ok(vec![1, 2, 3]),
                "#first" => Ok(vec![1]),
                "#hidden" => Ok(vec![2]),
                _ => Ok(Vec::new()),
            }
        }

        fn matches(&self, element: &u32, selector: &str) -> bool {
            match selector {
                ".item" => (1..=3).contains(element),
                "#first" => *element == 1,
                _ => false,
            }
        }

        fn bounds(&self, _element: &u32) -> Option<Rect> {
            Some(Rect::new(0.0, 0.0, 10.0, 10.0))
        }

        fn is_visible(&self, element: &u32) -> bool {
            *element != 2
        }

        fn is_disabled(&self, element: &u32) -> bool {
            *element == 3
        }

        fn nav_override(&self, _element: &u32, _direction: Direction) -> Option<String> {
            None
        }

        fn has_tab_index(&self, _element: &u32) -> bool {
            false
        }

        fn defers_scroll(&self, _element: &u32) -> bool {
            false
        }
    }

    fn section(config: SectionConfig<u32>) -> Section<u32> {
        Section::new("items".to_owned(), config)
    }

    fn items_section() -> Section<u32> {
        section(SectionConfig::for_selector(Selector::css(".item")))
    }

    #[test]
    fn navigability_requires_visibility_and_enablement() {
        let section = items_section();
        let global = NavConfig::default();
        assert!(section.is_navigable(&Fixture, &global, &1, true));
        assert!(!section.is_navigable(&Fixture, &global, &2, true)); // invisible
        assert!(!section.is_navigable(&Fixture, &global, &3, true)); // disabled attr
    }

    #[test]
    fn navigability_verifies_the_selector_on_request() {
        let section = items_section();
        let global = NavConfig::default();
        // 9 matches nothing; without verification only the element checks run.
        assert!(section.is_navigable(&Fixture, &global, &9, false));
        assert!(!section.is_navigable(&Fixture, &global, &9, true));
    }

    #[test]
    fn section_filter_overrides_the_global_filter() {
        fn veto_everything(_element: &u32) -> bool {
            false
        }
        fn allow_everything(_element: &u32) -> bool {
            true
        }

        let mut global = NavConfig::default();
        global.navigable_filter = Some(veto_everything);

        let plain = items_section();
        assert!(!plain.is_navigable(&Fixture, &global, &1, true));

        let permissive = section(SectionConfig {
            selector: Some(Selector::css(".item")),
            navigable_filter: Some(allow_everything),
            ..SectionConfig::default()
        });
        assert!(permissive.is_navigable(&Fixture, &global, &1, true));
    }

    #[test]
    fn disabled_sections_have_no_navigables() {
        let mut section = items_section();
        let global = NavConfig::default();
        assert_eq!(section.navigable_elements(&Fixture, &global), vec![1]);

        section.set_disabled(true);
        assert!(section.navigable_elements(&Fixture, &global).is_empty());
        assert!(!section.is_navigable(&Fixture, &global, &1, true));
    }

    #[test]
    fn default_element_is_rechecked_at_read_time() {
        let global = NavConfig::default();
        let healthy = section(SectionConfig {
            selector: Some(Selector::css(".item")),
            default_element_selector: Some("#first".to_owned()),
            ..SectionConfig::default()
        });
        assert_eq!(healthy.default_element(&Fixture, &global), Some(1));

        // An invisible default resolves but fails the navigability check.
        let hidden = section(SectionConfig {
            selector: Some(Selector::css(".item")),
            default_element_selector: Some("#hidden".to_owned()),
            ..SectionConfig::default()
        });
        assert_eq!(hidden.default_element(&Fixture, &global), None);
    }

    #[test]
    fn stale_last_focused_is_ignored() {
        let global = NavConfig::default();
        let mut section = items_section();
        section.note_focused(&2); // invisible element
        assert_eq!(section.last_focused(), Some(&2));
        assert_eq!(section.last_focused_navigable(&Fixture, &global), None);

        section.note_focused(&1);
        assert_eq!(section.last_focused_navigable(&Fixture, &global), Some(1));
    }

    #[test]
    fn primary_element_dispatches_on_priority() {
        let global = NavConfig::default();
        let mut section = section(SectionConfig {
            selector: Some(Selector::css(".item")),
            default_element_selector: Some("#first".to_owned()),
            priority: Some(FocusPriority::LastFocused),
            ..SectionConfig::default()
        });

        // No memory yet: last-focused falls back to the default element.
        assert_eq!(section.primary_element(&Fixture, &global), Some(1));

        section.note_focused(&1);
        assert_eq!(section.primary_element(&Fixture, &global), Some(1));

        section.config_mut().priority = Some(FocusPriority::None);
        assert_eq!(section.primary_element(&Fixture, &global), None);
    }

    #[test]
    fn entry_candidate_orders_by_priority_strategy() {
        let global = NavConfig::default();

        // Default strategy prefers the default element over the memory.
        let mut section = section(SectionConfig {
            selector: Some(Selector::css(".item")),
            default_element_selector: Some("#first".to_owned()),
            ..SectionConfig::default()
        });
        section.note_focused(&1);
        assert_eq!(section.entry_candidate(&Fixture, &global), Some(1));

        // Without default or memory, the first navigable element stands in.
        let bare = items_section();
        assert_eq!(bare.entry_candidate(&Fixture, &global), Some(1));

        // A disabled section refuses.
        let mut disabled = items_section();
        disabled.set_disabled(true);
        assert_eq!(disabled.entry_candidate(&Fixture, &global), None);
    }

    #[test]
    fn previous_focus_round_trip() {
        let mut section = items_section();
        assert!(section.previous_focus().is_none());
        section.save_previous_focus(1, 5, Direction::Left);
        let record = section.previous_focus().expect("record saved");
        assert_eq!(record.target, 1);
        assert_eq!(record.destination, 5);
        assert_eq!(record.reverse, Direction::Left);
    }

    #[test]
    fn leave_target_falls_back_to_global() {
        let mut global = NavConfig::default();
        global.leave_for =
            Some(LeaveFor::default().with(Direction::Up, LeaveTarget::css("@header")));

        let section = items_section();
        assert!(section.leave_target(&global, Direction::Up).is_some());
        assert!(section.leave_target(&global, Direction::Down).is_none());

        // A section-level map shadows the global one entirely.
        let own = Section::new(
            String::from("own"),
            SectionConfig {
                leave_for: Some(
                    LeaveFor::default().with(Direction::Down, LeaveTarget::css("#below")),
                ),
                ..SectionConfig::default()
            },
        );
        assert!(own.leave_target(&global, Direction::Down).is_some());
        assert!(own.leave_target(&global, Direction::Up).is_none());
    }
}
