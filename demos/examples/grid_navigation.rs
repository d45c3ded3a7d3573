// Copyright 2026 the Arrowwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arrow keys over a 3×3 grid plus a sidebar, on a toy in-memory host.
//!
//! This demo shows the pieces a real host wires together:
//! - an [`ElementLookup`]/[`FocusBackend`] implementation over plain data,
//! - two sections with different scope policies,
//! - the event protocol printed as it fires.
//!
//! Run:
//! - `cargo run -p arrowwood_demos --example grid_navigation`

use std::collections::HashMap;

use arrowwood_engine::{
    Deferred, Direction, Dispatched, ElementLookup, Event, FocusBackend, Modifiers, Navigator,
    QueryError, Restrict, SectionConfig, Selector,
};
use kurbo::Rect;

/// A named box on the screen.
#[derive(Clone, Debug)]
struct Tile {
    label: &'static str,
    rect: Rect,
    class: &'static str,
}

/// The whole "document": boxes keyed by id, plus focus state.
struct Screen {
    boxes: HashMap<u32, Tile>,
    focused: Option<u32>,
}

impl Screen {
    fn label(&self, id: u32) -> &'static str {
        self.boxes.get(&id).map_or("?", |b| b.label)
    }
}

impl ElementLookup<u32> for Screen {
    fn query(&self, selector: &str) -> Result<Vec<u32>, QueryError> {
        let class = selector.trim_start_matches('.');
        let mut found: Vec<u32> = self
            .boxes
            .iter()
            .filter(|(_, b)| b.class == class)
            .map(|(&id, _)| id)
            .collect();
        found.sort_unstable();
        Ok(found)
    }

    fn matches(&self, element: &u32, selector: &str) -> bool {
        let class = selector.trim_start_matches('.');
        self.boxes.get(element).is_some_and(|b| b.class == class)
    }

    fn bounds(&self, element: &u32) -> Option<Rect> {
        self.boxes.get(element).map(|b| b.rect)
    }

    fn is_visible(&self, element: &u32) -> bool {
        self.boxes.contains_key(element)
    }

    fn is_disabled(&self, _element: &u32) -> bool {
        false
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

impl FocusBackend<u32> for Screen {
    fn focus(&mut self, element: &u32) {
        self.focused = Some(*element);
    }

    fn blur(&mut self, element: &u32) {
        if self.focused == Some(*element) {
            self.focused = None;
        }
    }

    fn focused(&self) -> Option<u32> {
        self.focused
    }

    fn set_tab_index(&mut self, _element: &u32, _value: i32) {}

    fn dispatch(&mut self, target: &u32, event: &Event<u32>) -> Dispatched<u32> {
        println!("    {} → {}", event.name(), self.label(*target));
        Dispatched::ok()
    }

    fn defer(&mut self, _action: Deferred<u32>) {}
}

fn main() {
    let mut boxes = HashMap::new();
    // A 3×3 grid of cells, 80×80 each with a 20px gutter.
    let labels = ["a1", "a2", "a3", "b1", "b2", "b3", "c1", "c2", "c3"];
    for (index, label) in (0u32..).zip(labels) {
        let col = f64::from(index % 3);
        let row = f64::from(index / 3);
        boxes.insert(
            index,
            Tile {
                label,
                rect: Rect::new(
                    col * 100.0,
                    row * 100.0,
                    col * 100.0 + 80.0,
                    row * 100.0 + 80.0,
                ),
                class: "cell",
            },
        );
    }
    // A sidebar to the right of the grid.
    boxes.insert(
        100,
        Tile {
            label: "sidebar",
            rect: Rect::new(340.0, 0.0, 420.0, 280.0),
            class: "side",
        },
    );

    let mut nav = Navigator::new(Screen {
        boxes,
        focused: None,
    });
    nav.init();
    nav.add_section(SectionConfig {
        id: Some("grid".to_owned()),
        selector: Some(Selector::css(".cell")),
        restrict: Some(Restrict::SelfFirst),
        ..SectionConfig::default()
    });
    nav.add_section(SectionConfig {
        id: Some("side".to_owned()),
        selector: Some(Selector::css(".side")),
        ..SectionConfig::default()
    });
    nav.set_default_section(Some("grid"));

    println!("focus the default section:");
    nav.focus();

    let script = [
        ("right", 39),
        ("right", 39),
        ("down", 40),
        ("left", 37),
        ("right", 39),
        ("right", 39), // leaves the grid into the sidebar
        ("left", 37),
    ];
    for (name, key_code) in script {
        let from = nav
            .focused_element()
            .map_or("nothing", |id| nav.host().label(id));
        println!("\npress {name} (focus on {from}):");
        nav.on_key_down(key_code, Modifiers::empty());
    }

    let final_label = nav
        .focused_element()
        .map_or("nothing", |id| nav.host().label(id));
    println!("\nfinal focus: {final_label}");
}
