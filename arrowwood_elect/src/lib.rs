// Copyright 2026 the Arrowwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arrowwood Elect: directional election for spatial focus navigation.
//!
//! Given the rectangle of the currently focused element and an arrow-key
//! direction, this crate picks the "best" next element from a set of
//! candidate rectangles. It is the pure, host-agnostic core of the Arrowwood
//! engine: no element tree, no events, no focus state — just geometry.
//!
//! The election runs in three steps:
//!
//! - **Snapshot** ([`NavRect`]): each candidate is captured as an immutable
//!   rectangle plus its center point, measured once per navigation round.
//! - **Partition** ([`partition`]): candidates are grouped into nine zones
//!   relative to the reference rectangle (a 3×3 grid with the reference in
//!   the middle cell), with an overlap-threshold rule that lets candidates
//!   in a corner zone *spill* into the adjacent straight zone when they
//!   overlap the reference enough.
//! - **Elect** ([`elect`]): per direction, an ordered list of priority
//!   classes is consulted — straight-and-overlapping first, then straight,
//!   then diagonal — and the first non-empty class is sorted by a chain of
//!   distance meters compared lexicographically.
//!
//! The crate is generic over the element key `K`, so callers can use any
//! small handle (a DOM node id, a widget slot, an application key).
//!
//! ## Minimal example
//!
//! Three boxes in a row; moving right from the first elects the middle one:
//!
//! ```rust
//! use arrowwood_elect::{Direction, ElectOpts, NavRect, elect};
//! use kurbo::Rect;
//!
//! let source = NavRect::new('a', Rect::new(0.0, 0.0, 50.0, 50.0));
//! let candidates = vec![
//!     NavRect::new('b', Rect::new(100.0, 0.0, 150.0, 50.0)),
//!     NavRect::new('c', Rect::new(200.0, 0.0, 250.0, 50.0)),
//! ];
//!
//! let winner = elect(&source, Direction::Right, &candidates, &ElectOpts::default());
//! assert_eq!(winner, Some(0)); // index of 'b'
//! ```
//!
//! ## Direction reversal and "snap back"
//!
//! [`PreviousFocus`] records a completed move so that reversing the
//! direction returns to the exact element the user came from, even when
//! another candidate scores better. Pass it via [`ElectOpts::previous_focus`]
//! with [`ElectOpts::remember_source`] set.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod elect;
mod partition;
mod rect;

pub use elect::{ElectOpts, PreviousFocus, elect};
pub use partition::{GROUP_COUNT, Groups, partition};
pub use rect::{
    Meter, NavRect, bottommost, horizon_gap, left_edge_gap, leftmost, plumb_line_gap, rightmost,
    top_edge_gap, topmost,
};

/// Direction of a spatial navigation move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Move upward (decreasing y).
    Up,
    /// Move downward (increasing y).
    Down,
    /// Move left (decreasing x).
    Left,
    /// Move right (increasing x).
    Right,
}

impl Direction {
    /// All four directions, in keymap order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Up, Self::Right, Self::Down];

    /// The opposite direction: `Up↔Down`, `Left↔Right`.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Map a keyboard key code to a direction. Arrow keys only.
    #[must_use]
    pub const fn from_key_code(key_code: u32) -> Option<Self> {
        match key_code {
            37 => Some(Self::Left),
            38 => Some(Self::Up),
            39 => Some(Self::Right),
            40 => Some(Self::Down),
            _ => None,
        }
    }

    /// Lowercase name used in per-element override attributes
    /// (`data-sn-left` and friends).
    #[must_use]
    pub const fn attribute_suffix(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_is_involutive() {
        for dir in Direction::ALL {
            assert_eq!(dir.reverse().reverse(), dir);
        }
    }

    #[test]
    fn key_codes_map_to_arrows_only() {
        assert_eq!(Direction::from_key_code(37), Some(Direction::Left));
        assert_eq!(Direction::from_key_code(38), Some(Direction::Up));
        assert_eq!(Direction::from_key_code(39), Some(Direction::Right));
        assert_eq!(Direction::from_key_code(40), Some(Direction::Down));
        assert_eq!(Direction::from_key_code(13), None);
        assert_eq!(Direction::from_key_code(0), None);
    }

    #[test]
    fn attribute_suffixes() {
        assert_eq!(Direction::Up.attribute_suffix(), "up");
        assert_eq!(Direction::Down.attribute_suffix(), "down");
        assert_eq!(Direction::Left.attribute_suffix(), "left");
        assert_eq!(Direction::Right.attribute_suffix(), "right");
    }
}
