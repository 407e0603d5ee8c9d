//! Path simplification using perpendicular-distance (Ramer-Douglas-
//! Peucker) reduction.
//!
//! Removes points that are within a given tolerance of the chord
//! between their neighbors, always keeping the first and last point.
//! The split recursion is rewritten as an explicit work stack of
//! segment index pairs, so stack depth stays O(1) per frame regardless
//! of input length.
//!
//! A density safety valve handles pathological inputs: when a very long
//! path simplifies away more than 90% of its points, the result is
//! replaced by a uniform every-k-th subsample (~1000 points) with the
//! final point force-appended. This trades shape fidelity for bounded
//! output on extremely long, near-straight traversals. The subsample is
//! not a fixed point of [`simplify`]: a second pass falls below the
//! length gate and reduces it further, after which the result is stable.

use crate::types::{Point, Polyline};

/// Inputs shorter than this never trigger the subsampling valve; short
/// collinear paths are supposed to collapse to their endpoints.
const VALVE_MIN_POINTS: usize = 10_000;

/// Approximate output size of the subsampling valve.
const VALVE_TARGET_POINTS: usize = 1_000;

/// Simplify a polyline with tolerance `tolerance` (pixels, >= 0).
///
/// Points whose perpendicular deviation from the current chord is at
/// most `tolerance` are dropped. Polylines with fewer than 3 points are
/// returned unchanged, and the first and last point always survive.
#[must_use = "returns the simplified polyline"]
pub fn simplify(polyline: &Polyline, tolerance: f64) -> Polyline {
    let points = polyline.points();
    if points.len() < 3 {
        return polyline.clone();
    }

    let mut kept = vec![false; points.len()];
    kept[0] = true;
    kept[points.len() - 1] = true;

    // Explicit work stack of (start, end) segment bounds replaces the
    // recursive split.
    let mut segments = vec![(0, points.len() - 1)];
    while let Some((start, end)) = segments.pop() {
        if end <= start + 1 {
            continue;
        }

        let mut max_dist = 0.0;
        let mut max_idx = start;
        for i in (start + 1)..end {
            let d = perpendicular_distance(points[i], points[start], points[end]);
            if d > max_dist {
                max_dist = d;
                max_idx = i;
            }
        }

        if max_dist > tolerance {
            kept[max_idx] = true;
            segments.push((start, max_idx));
            segments.push((max_idx, end));
        }
    }

    let simplified: Vec<Point> = points
        .iter()
        .zip(&kept)
        .filter(|&(_, k)| *k)
        .map(|(&p, _)| p)
        .collect();

    if points.len() >= VALVE_MIN_POINTS && simplified.len() * 10 < points.len() {
        return subsample(points);
    }

    Polyline::new(simplified)
}

/// Uniform every-k-th subsample targeting roughly
/// [`VALVE_TARGET_POINTS`] points, with the final point force-appended
/// when the stride drops it.
fn subsample(points: &[Point]) -> Polyline {
    let step = (points.len() / VALVE_TARGET_POINTS).max(1);
    let mut sampled: Vec<Point> = points.iter().copied().step_by(step).collect();
    if let Some(&last) = points.last()
        && sampled.last() != Some(&last)
    {
        sampled.push(last);
    }
    Polyline::new(sampled)
}

/// Perpendicular distance from point `p` to the line defined by `a` and `b`.
///
/// Uses the formula: |cross(b-a, p-a)| / |b-a|.
/// When `a` and `b` coincide, returns the distance from `p` to `a`.
fn perpendicular_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = f64::from(b.x - a.x);
    let dy = f64::from(b.y - a.y);
    let length_sq = dx.mul_add(dx, dy * dy);

    if length_sq == 0.0 {
        return p.distance(a);
    }

    let cross = dx.mul_add(f64::from(a.y - p.y), -(dy * f64::from(a.x - p.x)));
    cross.abs() / length_sq.sqrt()
}
