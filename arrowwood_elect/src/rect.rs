// Copyright 2026 the Arrowwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry snapshots and the distance meters used as election sort keys.
//!
//! A [`NavRect`] is an immutable capture of one element's bounding box taken
//! at the start of a navigation round. The eight meter functions each score
//! a candidate rectangle against a reference rectangle; smaller is better,
//! and ties fall through to the next meter in a priority class's chain.

use kurbo::{Point, Rect};

/// A distance meter: scores `candidate` against `reference`, smaller wins.
///
/// Meters are plain function pointers so priority classes can carry them as
/// data and chain them lexicographically.
pub type Meter<K> = fn(reference: &NavRect<K>, candidate: &NavRect<K>) -> f64;

/// Snapshot of a focusable element's geometry.
///
/// Created once per navigation round from a live measurement and never
/// mutated. The center is biased to the pixel grid: both coordinates are
/// floored after halving, matching integer element coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct NavRect<K> {
    /// The owning element handle.
    pub element: K,
    /// Bounds in viewport coordinates.
    pub bounds: Rect,
    /// Center point, `(x0 + ⌊width/2⌋, y0 + ⌊height/2⌋)`.
    pub center: Point,
}

impl<K> NavRect<K> {
    /// Capture an element's measured bounds.
    pub fn new(element: K, bounds: Rect) -> Self {
        let center = Point::new(
            bounds.x0 + floor_half(bounds.width()),
            bounds.y0 + floor_half(bounds.height()),
        );
        Self {
            element,
            bounds,
            center,
        }
    }

    /// A zero-area rectangle at this snapshot's center.
    ///
    /// Used to re-partition candidates whose centers fell inside the
    /// reference: the center point itself becomes the new reference.
    #[must_use]
    pub fn center_as_rect(&self) -> Rect {
        Rect::new(self.center.x, self.center.y, self.center.x, self.center.y)
    }
}

/// `⌊v / 2⌋` without `std`.
///
/// The cast truncates toward zero; widths and heights are non-negative, so
/// truncation and flooring agree.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Element extents are far below 2^53; the cast is exact for the integer part."
)]
#[inline]
fn floor_half(v: f64) -> f64 {
    (v / 2.0) as i64 as f64
}

/// Horizontal gap between the candidate and the vertical line through the
/// reference center. Zero when the candidate straddles that line.
pub fn plumb_line_gap<K>(reference: &NavRect<K>, candidate: &NavRect<K>) -> f64 {
    if candidate.center.x < reference.center.x {
        (reference.center.x - candidate.bounds.x1).max(0.0)
    } else {
        (candidate.bounds.x0 - reference.center.x).max(0.0)
    }
}

/// Vertical gap between the candidate and the horizontal line through the
/// reference center. Zero when the candidate straddles that line.
pub fn horizon_gap<K>(reference: &NavRect<K>, candidate: &NavRect<K>) -> f64 {
    if candidate.center.y < reference.center.y {
        (reference.center.y - candidate.bounds.y1).max(0.0)
    } else {
        (candidate.bounds.y0 - reference.center.y).max(0.0)
    }
}

/// Horizontal gap between the candidate and the reference's left edge.
pub fn left_edge_gap<K>(reference: &NavRect<K>, candidate: &NavRect<K>) -> f64 {
    if candidate.center.x < reference.center.x {
        (reference.bounds.x0 - candidate.bounds.x1).max(0.0)
    } else {
        (candidate.bounds.x0 - reference.bounds.x0).max(0.0)
    }
}

/// Vertical gap between the candidate and the reference's top edge.
pub fn top_edge_gap<K>(reference: &NavRect<K>, candidate: &NavRect<K>) -> f64 {
    if candidate.center.y < reference.center.y {
        (reference.bounds.y0 - candidate.bounds.y1).max(0.0)
    } else {
        (candidate.bounds.y0 - reference.bounds.y0).max(0.0)
    }
}

/// Prefers candidates with a smaller top edge (higher on screen).
pub fn topmost<K>(_reference: &NavRect<K>, candidate: &NavRect<K>) -> f64 {
    candidate.bounds.y0
}

/// Prefers candidates with a larger bottom edge (lower on screen).
pub fn bottommost<K>(_reference: &NavRect<K>, candidate: &NavRect<K>) -> f64 {
    -candidate.bounds.y1
}

/// Prefers candidates with a smaller left edge.
pub fn leftmost<K>(_reference: &NavRect<K>, candidate: &NavRect<K>) -> f64 {
    candidate.bounds.x0
}

/// Prefers candidates with a larger right edge.
pub fn rightmost<K>(_reference: &NavRect<K>, candidate: &NavRect<K>) -> f64 {
    -candidate.bounds.x1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(element: u32, x: f64, y: f64, w: f64, h: f64) -> NavRect<u32> {
        NavRect::new(element, Rect::new(x, y, x + w, y + h))
    }

    #[test]
    fn center_uses_floored_half_extents() {
        let r = nav(1, 0.0, 0.0, 51.0, 33.0);
        assert_eq!(r.center, Point::new(25.0, 16.0));

        let odd_origin = nav(2, 10.0, 20.0, 50.0, 50.0);
        assert_eq!(odd_origin.center, Point::new(35.0, 45.0));
    }

    #[test]
    fn center_as_rect_has_zero_area() {
        let r = nav(1, 0.0, 0.0, 50.0, 50.0);
        let c = r.center_as_rect();
        assert_eq!(c.width(), 0.0);
        assert_eq!(c.height(), 0.0);
        assert_eq!(c.origin(), r.center);
    }

    #[test]
    fn plumb_line_gap_zero_when_straddling() {
        let reference = nav(0, 100.0, 0.0, 50.0, 50.0);
        // Candidate spans the reference center's x (125).
        let straddling = nav(1, 110.0, 100.0, 40.0, 40.0);
        assert_eq!(plumb_line_gap(&reference, &straddling), 0.0);

        // Candidate entirely left of the plumb line.
        let left = nav(2, 0.0, 100.0, 50.0, 50.0);
        assert_eq!(plumb_line_gap(&reference, &left), 75.0);

        // Candidate entirely right of the plumb line.
        let right = nav(3, 200.0, 100.0, 50.0, 50.0);
        assert_eq!(plumb_line_gap(&reference, &right), 75.0);
    }

    #[test]
    fn horizon_gap_mirrors_plumb_line() {
        let reference = nav(0, 0.0, 100.0, 50.0, 50.0);
        let above = nav(1, 100.0, 0.0, 50.0, 50.0);
        let below = nav(2, 100.0, 200.0, 50.0, 50.0);
        assert_eq!(horizon_gap(&reference, &above), 75.0);
        assert_eq!(horizon_gap(&reference, &below), 75.0);
    }

    #[test]
    fn edge_gaps_measure_from_reference_edges() {
        let reference = nav(0, 100.0, 100.0, 50.0, 50.0);
        // Left of the reference's left edge by 20.
        let west = nav(1, 30.0, 100.0, 50.0, 50.0);
        assert_eq!(left_edge_gap(&reference, &west), 20.0);
        // Right of the left edge: distance from candidate left to reference left.
        let east = nav(2, 160.0, 100.0, 50.0, 50.0);
        assert_eq!(left_edge_gap(&reference, &east), 60.0);
        // Above the reference's top edge by 10.
        let north = nav(3, 100.0, 40.0, 50.0, 50.0);
        assert_eq!(top_edge_gap(&reference, &north), 10.0);
    }

    /// The absolute meters must be monotonic in the edge they rank.
    #[test]
    fn absolute_meters_are_monotonic() {
        let reference = nav(0, 0.0, 0.0, 10.0, 10.0);
        let a = nav(1, 5.0, 5.0, 10.0, 10.0);
        let b = nav(2, 8.0, 9.0, 12.0, 14.0);

        assert_eq!(
            topmost(&reference, &a) < topmost(&reference, &b),
            a.bounds.y0 < b.bounds.y0
        );
        assert_eq!(
            bottommost(&reference, &a) < bottommost(&reference, &b),
            a.bounds.y1 > b.bounds.y1
        );
        assert_eq!(
            leftmost(&reference, &a) < leftmost(&reference, &b),
            a.bounds.x0 < b.bounds.x0
        );
        assert_eq!(
            rightmost(&reference, &a) < rightmost(&reference, &b),
            a.bounds.x1 > b.bounds.x1
        );
    }

    #[test]
    fn meters_are_first_class_values() {
        let chain: [Meter<u32>; 2] = [plumb_line_gap, topmost];
        let reference = nav(0, 0.0, 0.0, 10.0, 10.0);
        let candidate = nav(1, 20.0, 30.0, 10.0, 10.0);
        assert_eq!(chain[0](&reference, &candidate), 15.0);
        assert_eq!(chain[1](&reference, &candidate), 30.0);
    }
}
