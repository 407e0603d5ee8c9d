//! hitofude-pipeline: single-stroke path planning (sans-IO).
//!
//! Converts a binary skeleton mask into one ordered point sequence that
//! traces every stroke with minimal pen-up/pen-down repetition:
//! mask -> skeleton graph -> Eulerian traversal (or route inspection,
//! or depth-first fallback) -> simplification.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! pixel data and returns structured results. File handling and format
//! serialization live in the `hitofude` CLI and `hitofude-export`.

pub mod binarize;
pub mod euler;
pub mod graph;
pub mod postman;
pub mod simplify;
pub mod skeleton;
pub mod traverse;
pub mod types;

pub use graph::SkeletonGraph;
pub use types::{
    Dimensions, GrayImage, Point, Polyline, TraceConfig, TraceDiagnostics, TraceError,
    TraceResult, Traversal,
};

/// Trace a binary skeleton mask (nonzero = foreground) into a single
/// continuous path.
///
/// # Traversal selection
///
/// 1. Build the skeleton graph (8-connectivity, Euclidean weights).
/// 2. If the graph is Eulerian or semi-Eulerian, extract the exact
///    single traversal (every edge exactly once).
/// 3. Otherwise run the route inspection approximation (every reachable
///    edge at least once, minimal retracing).
/// 4. Otherwise (no edges at all) fall back to a depth-first vertex
///    walk, which is non-empty whenever the mask has a foreground pixel.
/// 5. Simplify the raw point sequence with the configured tolerance.
///
/// Disconnected masks are not errors: the path covers the component
/// reachable from the chosen start and `diagnostics.edges_covered`
/// reports the shortfall.
///
/// # Errors
///
/// Returns [`TraceError::EmptyMask`] if the mask has no foreground
/// pixels.
pub fn trace_mask(mask: &GrayImage, config: &TraceConfig) -> Result<TraceResult, TraceError> {
    let dimensions = Dimensions {
        width: mask.width(),
        height: mask.height(),
    };

    let graph = SkeletonGraph::from_mask(mask);
    if graph.node_count() == 0 {
        return Err(TraceError::EmptyMask);
    }

    let (nodes, traversal, edges_covered) =
        if let Some((nodes, kind)) = euler::eulerian_path(&graph) {
            let covered = graph.edge_count();
            let traversal = match kind {
                euler::EulerianKind::Circuit => Traversal::EulerianCircuit,
                euler::EulerianKind::OpenPath => Traversal::EulerianPath,
            };
            (nodes, traversal, covered)
        } else if let Some(result) = postman::route_inspection(&graph) {
            (result.path, Traversal::RouteInspection, result.edges_covered)
        } else {
            // No edges anywhere: isolated pixels. Start vertex exists
            // because the graph is non-empty.
            let start = graph.start_vertex().ok_or(TraceError::EmptyMask)?;
            (traverse::depth_first_path(&graph, start), Traversal::DepthFirst, 0)
        };

    let raw = Polyline::new(nodes.iter().map(|&n| graph.point(n)).collect());
    let diagnostics = TraceDiagnostics {
        vertices: graph.node_count(),
        edges: graph.edge_count(),
        odd_vertices: graph.odd_vertices().len(),
        components: graph.component_count(),
        edges_covered,
        traversal,
        raw_points: raw.len(),
    };

    let path = simplify::simplify(&raw, config.simplify_tolerance);

    Ok(TraceResult {
        path,
        dimensions,
        diagnostics,
    })
}

/// Run the full pipeline from raw image bytes.
///
/// Decodes the image, thresholds it into an ink mask, optionally closes
/// one-pixel gaps, skeletonizes, and then calls [`trace_mask`].
///
/// # Errors
///
/// Returns [`TraceError::EmptyInput`] if `image_bytes` is empty,
/// [`TraceError::ImageDecode`] if the image cannot be decoded, and
/// [`TraceError::EmptyMask`] if thresholding leaves no foreground.
pub fn trace_image(image_bytes: &[u8], config: &TraceConfig) -> Result<TraceResult, TraceError> {
    let gray = binarize::decode_and_grayscale(image_bytes)?;
    let mask = binarize::threshold_mask(&gray, config.threshold, config.invert);

    if skeleton::count_foreground(&mask) == 0 {
        return Err(TraceError::EmptyMask);
    }

    let mask = if config.close_gaps {
        skeleton::close_gaps(&mask)
    } else {
        mask
    };
    let skeleton = skeleton::skeletonize(&mask);

    trace_mask(&skeleton, config)
}
