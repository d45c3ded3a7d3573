// Copyright 2026 the Arrowwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The directional election.
//!
//! Per direction, candidates are consulted in up to three priority classes:
//!
//! 1. **Inside** — candidates whose centers fall within the reference
//!    rectangle, re-partitioned around the reference's center point and
//!    restricted to the requested side.
//! 2. **Straight** — the middle group on the requested side of the 3×3
//!    partition (including corner candidates that spilled in by overlap).
//! 3. **Diagonal** — the two corner groups on the requested side. Skipped
//!    entirely when `straight_only` is set.
//!
//! The first class with any members wins. Its members are ordered by the
//! class's meter chain, compared lexicographically: a zero delta falls
//! through to the next meter, and a full tie keeps input order (the sort is
//! stable). When direction-reversal memory applies, the remembered element
//! overrides the sort winner.

use core::cmp::Ordering;

use smallvec::SmallVec;

use crate::Direction;
use crate::partition::partition;
use crate::rect::{
    Meter, NavRect, bottommost, horizon_gap, left_edge_gap, leftmost, plumb_line_gap, rightmost,
    top_edge_gap, topmost,
};

/// A completed move, recorded so that reversing the direction snaps back.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviousFocus<K> {
    /// The element that was focused before the move.
    pub target: K,
    /// The element the move landed on.
    pub destination: K,
    /// The direction that leads from `destination` back to `target`.
    pub reverse: Direction,
}

/// Options steering one election round.
#[derive(Clone, Debug)]
pub struct ElectOpts<'a, K> {
    /// Drop the diagonal priority class entirely.
    pub straight_only: bool,
    /// Overlap fraction in `[0, 1]` for the partition spill rule.
    pub straight_overlap_threshold: f64,
    /// Honor `previous_focus` on direction reversal.
    pub remember_source: bool,
    /// The most recent move out of the source's section, if any.
    pub previous_focus: Option<&'a PreviousFocus<K>>,
}

impl<K> Default for ElectOpts<'_, K> {
    fn default() -> Self {
        Self {
            straight_only: false,
            straight_overlap_threshold: 0.5,
            remember_source: false,
            previous_focus: None,
        }
    }
}

struct PriorityClass<K> {
    members: SmallVec<[usize; 8]>,
    meters: SmallVec<[Meter<K>; 3]>,
}

/// Elect the best candidate in `direction` from `target`.
///
/// Returns an index into `candidates`, or `None` when no candidate lies in
/// the requested direction (subject to `straight_only`).
pub fn elect<K: PartialEq>(
    target: &NavRect<K>,
    direction: Direction,
    candidates: &[NavRect<K>],
    opts: &ElectOpts<'_, K>,
) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }

    let threshold = opts.straight_overlap_threshold;
    let groups = partition(candidates, &target.bounds, threshold);

    // Candidates whose centers fell inside the target compete among
    // themselves around the target's center point.
    let inside: SmallVec<[NavRect<&K>; 4]> = groups[4]
        .iter()
        .map(|&index| NavRect {
            element: &candidates[index].element,
            bounds: candidates[index].bounds,
            center: candidates[index].center,
        })
        .collect();
    let internal_groups = partition(&inside, &target.center_as_rect(), threshold);
    // Map internal indices back to candidate indices.
    let internal = |zones: [usize; 3]| -> SmallVec<[usize; 8]> {
        zones
            .iter()
            .flat_map(|&zone| internal_groups[zone].iter())
            .map(|&inner| groups[4][inner])
            .collect()
    };
    let straight = |zone: usize| -> SmallVec<[usize; 8]> { groups[zone].iter().copied().collect() };
    let diagonal = |zones: [usize; 2]| -> SmallVec<[usize; 8]> {
        zones
            .iter()
            .flat_map(|&zone| groups[zone].iter())
            .copied()
            .collect()
    };

    let mut classes: SmallVec<[PriorityClass<K>; 3]> = SmallVec::new();
    match direction {
        Direction::Left => {
            let meters: SmallVec<[Meter<K>; 3]> =
                SmallVec::from_slice(&[plumb_line_gap, topmost]);
            classes.push(PriorityClass {
                members: internal([0, 3, 6]),
                meters: meters.clone(),
            });
            classes.push(PriorityClass {
                members: straight(3),
                meters,
            });
            classes.push(PriorityClass {
                members: diagonal([0, 6]),
                meters: SmallVec::from_slice(&[horizon_gap, rightmost, top_edge_gap]),
            });
        }
        Direction::Right => {
            let meters: SmallVec<[Meter<K>; 3]> =
                SmallVec::from_slice(&[plumb_line_gap, topmost]);
            classes.push(PriorityClass {
                members: internal([2, 5, 8]),
                meters: meters.clone(),
            });
            classes.push(PriorityClass {
                members: straight(5),
                meters,
            });
            classes.push(PriorityClass {
                members: diagonal([2, 8]),
                meters: SmallVec::from_slice(&[horizon_gap, leftmost, top_edge_gap]),
            });
        }
        Direction::Up => {
            let meters: SmallVec<[Meter<K>; 3]> =
                SmallVec::from_slice(&[horizon_gap, leftmost]);
            classes.push(PriorityClass {
                members: internal([0, 1, 2]),
                meters: meters.clone(),
            });
            classes.push(PriorityClass {
                members: straight(1),
                meters,
            });
            classes.push(PriorityClass {
                members: diagonal([0, 2]),
                meters: SmallVec::from_slice(&[plumb_line_gap, bottommost, left_edge_gap]),
            });
        }
        Direction::Down => {
            let meters: SmallVec<[Meter<K>; 3]> =
                SmallVec::from_slice(&[horizon_gap, leftmost]);
            classes.push(PriorityClass {
                members: internal([6, 7, 8]),
                meters: meters.clone(),
            });
            classes.push(PriorityClass {
                members: straight(7),
                meters,
            });
            classes.push(PriorityClass {
                members: diagonal([6, 8]),
                meters: SmallVec::from_slice(&[plumb_line_gap, topmost, left_edge_gap]),
            });
        }
    }
    if opts.straight_only {
        classes.pop();
    }

    let winner = classes.iter_mut().find(|class| !class.members.is_empty())?;

    let meters = &winner.meters;
    winner.members.sort_by(|&a, &b| {
        for meter in meters {
            let delta = meter(target, &candidates[a]) - meter(target, &candidates[b]);
            match delta.partial_cmp(&0.0) {
                Some(Ordering::Less) => return Ordering::Less,
                Some(Ordering::Greater) => return Ordering::Greater,
                _ => {}
            }
        }
        Ordering::Equal
    });

    if opts.remember_source
        && let Some(previous) = opts.previous_focus
        && previous.destination == target.element
        && previous.reverse == direction
        && let Some(&remembered) = winner
            .members
            .iter()
            .find(|&&index| candidates[index].element == previous.target)
    {
        return Some(remembered);
    }

    winner.members.first().copied()
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::Rect;

    use super::*;

    fn nav(element: char, x: f64, y: f64, w: f64, h: f64) -> NavRect<char> {
        NavRect::new(element, Rect::new(x, y, x + w, y + h))
    }

    fn elected(
        target: &NavRect<char>,
        direction: Direction,
        candidates: &[NavRect<char>],
        opts: &ElectOpts<'_, char>,
    ) -> Option<char> {
        elect(target, direction, candidates, opts).map(|index| candidates[index].element)
    }

    #[test]
    fn empty_candidates_elect_nothing() {
        let source = nav('a', 0.0, 0.0, 50.0, 50.0);
        assert_eq!(
            elect(&source, Direction::Right, &[], &ElectOpts::default()),
            None
        );
    }

    /// Three horizontally aligned boxes: right from A reaches B, then C.
    #[test]
    fn walks_a_row_left_to_right() {
        let a = nav('a', 0.0, 0.0, 50.0, 50.0);
        let b = nav('b', 100.0, 0.0, 50.0, 50.0);
        let c = nav('c', 200.0, 0.0, 50.0, 50.0);

        let candidates = vec![b.clone(), c.clone()];
        assert_eq!(
            elected(&a, Direction::Right, &candidates, &ElectOpts::default()),
            Some('b')
        );

        let candidates = vec![a.clone(), c.clone()];
        assert_eq!(
            elected(&b, Direction::Right, &candidates, &ElectOpts::default()),
            Some('c')
        );
        assert_eq!(
            elected(&b, Direction::Left, &candidates, &ElectOpts::default()),
            Some('a')
        );
    }

    /// A column: down elects the lower box, up the upper one.
    #[test]
    fn walks_a_column() {
        let a = nav('a', 0.0, 0.0, 50.0, 50.0);
        let u = nav('u', 0.0, -100.0, 50.0, 50.0);
        let d = nav('d', 0.0, 100.0, 50.0, 50.0);

        let candidates = vec![u.clone(), d.clone()];
        assert_eq!(
            elected(&a, Direction::Down, &candidates, &ElectOpts::default()),
            Some('d')
        );
        assert_eq!(
            elected(&a, Direction::Up, &candidates, &ElectOpts::default()),
            Some('u')
        );
        assert_eq!(
            elected(&a, Direction::Left, &candidates, &ElectOpts::default()),
            None
        );
    }

    /// Diagonal-only candidates are reachable unless `straight_only` is set.
    #[test]
    fn straight_only_excludes_diagonals() {
        let a = nav('a', 0.0, 0.0, 50.0, 50.0);
        let x = nav('x', 200.0, 200.0, 50.0, 50.0);
        let candidates = vec![x.clone()];

        let strict = ElectOpts {
            straight_only: true,
            ..ElectOpts::default()
        };
        assert_eq!(elected(&a, Direction::Right, &candidates, &strict), None);
        assert_eq!(elected(&a, Direction::Down, &candidates, &strict), None);

        let loose = ElectOpts::default();
        assert_eq!(
            elected(&a, Direction::Right, &candidates, &loose),
            Some('x')
        );
        assert_eq!(elected(&a, Direction::Down, &candidates, &loose), Some('x'));
    }

    /// The straight class outranks diagonals even when the diagonal is
    /// closer by raw distance.
    #[test]
    fn straight_class_beats_closer_diagonal() {
        let a = nav('a', 0.0, 100.0, 50.0, 50.0);
        let diagonal = nav('d', 60.0, 0.0, 50.0, 50.0);
        let straight = nav('s', 300.0, 100.0, 50.0, 50.0);
        let candidates = vec![diagonal, straight];

        assert_eq!(
            elected(&a, Direction::Right, &candidates, &ElectOpts::default()),
            Some('s')
        );
    }

    /// Candidates whose centers are inside the target outrank everything.
    #[test]
    fn inside_candidates_win_first() {
        let target = nav('t', 0.0, 0.0, 200.0, 200.0);
        // Center (130, 100) is inside the target, right of its center (100, 100).
        let inner = nav('i', 120.0, 90.0, 20.0, 20.0);
        let outer = nav('o', 300.0, 90.0, 20.0, 20.0);
        let candidates = vec![outer, inner];

        assert_eq!(
            elected(&target, Direction::Right, &candidates, &ElectOpts::default()),
            Some('i')
        );
        // Leftward, only the outside candidate qualifies... and it is on the
        // wrong side, so nothing is elected.
        assert_eq!(
            elected(&target, Direction::Left, &candidates, &ElectOpts::default()),
            None
        );
    }

    /// Ties on the primary meter fall through to the chain's next meter.
    #[test]
    fn meter_chain_breaks_ties() {
        let a = nav('a', 100.0, 100.0, 50.0, 50.0);
        // Both candidates sit at the same horizontal distance, so the
        // plumb-line gap ties; the upper one wins on the secondary meter.
        let upper = nav('u', 200.0, 80.0, 50.0, 80.0);
        let lower = nav('l', 200.0, 100.0, 50.0, 80.0);
        let candidates = vec![lower, upper];

        assert_eq!(
            elected(&a, Direction::Right, &candidates, &ElectOpts::default()),
            Some('u')
        );
    }

    /// Reversing a remembered move returns to its source even when another
    /// candidate sorts first.
    #[test]
    fn remember_source_snaps_back() {
        let b = nav('b', 100.0, 0.0, 50.0, 50.0);
        let a = nav('a', 0.0, 0.0, 50.0, 50.0);
        // A decoy that beats A under the leftward ordering: same row,
        // nearer to B.
        let decoy = nav('z', 40.0, 0.0, 50.0, 50.0);
        let candidates = vec![a.clone(), decoy.clone()];

        let record = PreviousFocus {
            target: 'a',
            destination: 'b',
            reverse: Direction::Left,
        };
        let opts = ElectOpts {
            remember_source: true,
            previous_focus: Some(&record),
            ..ElectOpts::default()
        };
        assert_eq!(elected(&b, Direction::Left, &candidates, &opts), Some('a'));

        // Without the memory, the decoy wins.
        assert_eq!(
            elected(&b, Direction::Left, &candidates, &ElectOpts::default()),
            Some('z')
        );

        // Memory only applies on the recorded reverse direction.
        let wrong_direction = ElectOpts {
            remember_source: true,
            previous_focus: Some(&PreviousFocus {
                target: 'a',
                destination: 'b',
                reverse: Direction::Up,
            }),
            ..ElectOpts::default()
        };
        assert_eq!(
            elected(&b, Direction::Left, &candidates, &wrong_direction),
            Some('z')
        );
    }

    /// With `straight_only`, an elected candidate's center must sit inside
    /// the directional strip through the source.
    #[test]
    fn straight_only_winner_lies_in_the_strip() {
        let source = nav('a', 100.0, 100.0, 50.0, 50.0);
        let candidates: Vec<NavRect<char>> = vec![
            nav('b', 200.0, 90.0, 50.0, 50.0),
            nav('c', 200.0, 180.0, 50.0, 50.0),
            nav('d', 400.0, 110.0, 50.0, 50.0),
        ];
        let opts = ElectOpts {
            straight_only: true,
            ..ElectOpts::default()
        };

        if let Some(index) = elect(&source, Direction::Right, &candidates, &opts) {
            let winner = &candidates[index];
            assert!(winner.center.y >= source.bounds.y0);
            assert!(winner.center.y <= source.bounds.y1);
        } else {
            panic!("a straight candidate exists");
        }
    }

    #[test]
    fn stable_order_resolves_full_ties() {
        let a = nav('a', 0.0, 0.0, 50.0, 50.0);
        // Two identical rectangles; the first by input order wins.
        let first = nav('1', 100.0, 0.0, 50.0, 50.0);
        let second = nav('2', 100.0, 0.0, 50.0, 50.0);
        let candidates = vec![first, second];
        assert_eq!(
            elected(&a, Direction::Right, &candidates, &ElectOpts::default()),
            Some('1')
        );
    }
}
