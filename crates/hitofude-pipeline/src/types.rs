//! Shared types for the hitofude path planning pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can reference binary masks
/// without depending on `image` directly.
pub use image::GrayImage;

/// A pixel coordinate in image space.
///
/// Identity is positional: two points with the same coordinates are the
/// same point (`Eq` + `Hash`), which is what lets the graph builder key
/// vertices by coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: i32,
    /// Vertical position (pixels from top edge).
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    ///
    /// For 8-neighbor pixels this is 1.0 (axis-aligned) or sqrt(2)
    /// (diagonal), which is exactly the edge weight used by the graph.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// An ordered sequence of pixel coordinates: the order in which the pen
/// visits points.
///
/// Consecutive entries are connected in the skeleton graph or by an
/// explicitly inserted detour subsequence. The empty polyline is a valid
/// terminal state ("nothing to draw").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polyline(Vec<Point>);

impl Polyline {
    /// Create a new polyline from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the polyline has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the polyline.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point> {
        self.0.first()
    }

    /// Returns the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.0.last()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the polyline and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Configuration for the tracing pipeline.
///
/// All parameters have defaults matching the reference behavior for
/// scanned pen drawings (dark ink on light paper).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceConfig {
    /// Binarization threshold (0-255). Pixels darker than this become
    /// foreground; see [`binarize`](crate::binarize).
    pub threshold: u8,

    /// Flip binarization polarity (light strokes on dark background).
    pub invert: bool,

    /// Apply a 3x3 morphological close before skeletonization to bridge
    /// small gaps in strokes.
    pub close_gaps: bool,

    /// Perpendicular-distance simplification tolerance in pixels.
    /// Higher values remove more points, producing simpler paths.
    pub simplify_tolerance: f64,
}

impl TraceConfig {
    /// Default binarization threshold.
    pub const DEFAULT_THRESHOLD: u8 = 128;
    /// Default simplification tolerance in pixels.
    pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 1.0;
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            invert: false,
            close_gaps: true,
            simplify_tolerance: Self::DEFAULT_SIMPLIFY_TOLERANCE,
        }
    }
}

/// Which traversal strategy produced the final path.
///
/// The pipeline tries strategies in order and falls through on
/// "not applicable": Eulerian first, Route Inspection when parity or
/// connectivity rules it out, depth-first as the last resort for
/// edge-free graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Traversal {
    /// Every vertex even, connected: closed circuit covering each edge once.
    EulerianCircuit,
    /// Exactly two odd vertices, connected: open path covering each edge once.
    EulerianPath,
    /// Greedy covering walk with shortest-path detours (edges may repeat).
    RouteInspection,
    /// Depth-first vertex walk; used when the graph has no edges at all.
    DepthFirst,
}

/// Counters describing one tracing run.
///
/// Returned alongside the path so callers (the CLI, tests) can inspect
/// graph shape and coverage without re-deriving it. A covered-edge count
/// below `edges` signals an unreachable disconnected component, which is
/// expected for multi-component skeletons and not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceDiagnostics {
    /// Skeleton graph vertex count (foreground pixels).
    pub vertices: usize,
    /// Skeleton graph edge count.
    pub edges: usize,
    /// Vertices of odd degree.
    pub odd_vertices: usize,
    /// Connected components, ignoring isolated vertices.
    pub components: usize,
    /// Edges walked at least once by the chosen traversal.
    pub edges_covered: usize,
    /// Which traversal strategy ran.
    pub traversal: Traversal,
    /// Point count before simplification.
    pub raw_points: usize,
}

/// Result of a tracing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceResult {
    /// The single continuous path, already simplified.
    pub path: Polyline,

    /// Dimensions of the source mask in pixels.
    ///
    /// Export serializers use this to set coordinate spaces
    /// (e.g., SVG `viewBox`, G-code bed scaling).
    pub dimensions: Dimensions,

    /// Graph and coverage counters for this run.
    pub diagnostics: TraceDiagnostics,
}

/// Errors that can occur during tracing.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The mask has no foreground pixels, so there is nothing to draw.
    #[error("mask contains no foreground pixels")]
    EmptyMask,
}
