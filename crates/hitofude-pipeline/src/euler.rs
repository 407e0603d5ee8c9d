//! Eulerian circuit / path extraction.
//!
//! A connected graph (ignoring isolated vertices) with all-even degrees
//! has an Eulerian circuit; with exactly two odd-degree vertices it has
//! an open Eulerian path between them. Anything else is "not
//! applicable" and the caller falls through to the route inspection
//! solver. Not-applicable is control flow (`None`), never an error.
//!
//! Construction uses Hierholzer's algorithm with an explicit stack and
//! an edge-use bitvec, so every edge is consumed exactly once.

use petgraph::graph::NodeIndex;

use crate::graph::{EdgeUse, SkeletonGraph};

/// Which kind of Eulerian traversal the graph admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EulerianKind {
    /// All degrees even: closed circuit, first vertex == last vertex.
    Circuit,
    /// Exactly two odd vertices: open path between them.
    OpenPath,
}

/// Check the Eulerian / semi-Eulerian conditions.
///
/// Returns `None` when the graph has no edges, is disconnected, or has
/// more than two odd-degree vertices.
#[must_use]
pub fn classify(graph: &SkeletonGraph) -> Option<EulerianKind> {
    if graph.edge_count() == 0 || !graph.is_connected() {
        return None;
    }
    match graph.odd_vertices().len() {
        0 => Some(EulerianKind::Circuit),
        2 => Some(EulerianKind::OpenPath),
        _ => None,
    }
}

/// Extract a full single-traversal circuit or path, if one exists.
///
/// Returns the vertex sequence together with its kind, or `None` when
/// the graph fails [`classify`]. A circuit repeats its start vertex at
/// the end; an open path starts at one odd vertex (preferring degree 1)
/// and ends at the other.
#[must_use]
pub fn eulerian_path(graph: &SkeletonGraph) -> Option<(Vec<NodeIndex>, EulerianKind)> {
    let kind = classify(graph)?;

    let start = match kind {
        EulerianKind::OpenPath => {
            let odd = graph.odd_vertices();
            odd.iter().copied().find(|&n| graph.degree(n) == 1).or_else(|| odd.first().copied())?
        }
        // All degrees even; start anywhere on the edge-bearing component
        // so isolated vertices cannot strand the walk.
        EulerianKind::Circuit => graph
            .inner()
            .node_indices()
            .find(|&n| graph.degree(n) > 0)?,
    };

    Some((hierholzer(graph, start), kind))
}

/// Hierholzer's algorithm: consume every edge exactly once starting
/// from `start`, using an explicit stack.
///
/// Assumes the Eulerian conditions already hold for the component
/// containing `start`.
fn hierholzer(graph: &SkeletonGraph, start: NodeIndex) -> Vec<NodeIndex> {
    let mut walked = EdgeUse::new(graph);
    let mut stack = vec![start];
    let mut path = Vec::with_capacity(graph.edge_count() + 1);

    while let Some(&current) = stack.last() {
        if let Some((edge, target)) = walked.next_incident(graph, current) {
            walked.mark(edge);
            stack.push(target);
        } else {
            path.push(current);
            stack.pop();
        }
    }

    path.reverse();
    path
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Point;

    /// Hand-built square: 4 vertices in a cycle, all degree 2.
    fn square_graph() -> SkeletonGraph {
        SkeletonGraph::from_parts(
            &[
                Point::new(0, 0),
                Point::new(2, 0),
                Point::new(2, 2),
                Point::new(0, 2),
            ],
            &[(0, 1), (1, 2), (2, 3), (3, 0)],
        )
    }

    /// Count how often each unordered vertex pair appears consecutively.
    fn edge_multiset(path: &[NodeIndex]) -> std::collections::HashMap<(usize, usize), usize> {
        let mut counts = std::collections::HashMap::new();
        for window in path.windows(2) {
            let (a, b) = (window[0].index(), window[1].index());
            let key = (a.min(b), a.max(b));
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn empty_graph_not_applicable() {
        let graph = SkeletonGraph::from_parts(&[], &[]);
        assert!(classify(&graph).is_none());
        assert!(eulerian_path(&graph).is_none());
    }

    #[test]
    fn edgeless_graph_not_applicable() {
        let graph = SkeletonGraph::from_parts(&[Point::new(0, 0), Point::new(5, 5)], &[]);
        assert!(classify(&graph).is_none());
    }

    #[test]
    fn square_is_circuit() {
        let graph = square_graph();
        assert_eq!(classify(&graph), Some(EulerianKind::Circuit));

        let (path, kind) = eulerian_path(&graph).unwrap();
        assert_eq!(kind, EulerianKind::Circuit);
        // 4 edges -> 5 vertices with repeated start/end.
        assert_eq!(path.len(), 5);
        assert_eq!(path.first(), path.last());

        // Every edge exactly once, no omissions or duplicates.
        let counts = edge_multiset(&path);
        assert_eq!(counts.len(), 4);
        assert!(counts.values().all(|&c| c == 1));
    }

    #[test]
    fn open_chain_is_path_between_odd_vertices() {
        // A - B - C: A and C odd.
        let graph = SkeletonGraph::from_parts(
            &[Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)],
            &[(0, 1), (1, 2)],
        );
        assert_eq!(classify(&graph), Some(EulerianKind::OpenPath));

        let (path, kind) = eulerian_path(&graph).unwrap();
        assert_eq!(kind, EulerianKind::OpenPath);
        assert_eq!(path.len(), 3);
        let ends = [path[0].index(), path[2].index()];
        assert!(ends.contains(&0) && ends.contains(&2));
    }

    #[test]
    fn open_path_starts_at_degree_one_vertex() {
        // Lollipop: triangle 1-2-3 plus a tail 0-1. Odd vertices are 0
        // (degree 1) and 1 (degree 3); the walk must start or end at the
        // tail tip, and starting prefers it.
        let graph = SkeletonGraph::from_parts(
            &[
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(1, 1),
            ],
            &[(0, 1), (1, 2), (2, 3), (3, 1)],
        );
        let (path, kind) = eulerian_path(&graph).unwrap();
        assert_eq!(kind, EulerianKind::OpenPath);
        assert_eq!(path[0].index(), 0);
        assert_eq!(path.len(), 5);
        let counts = edge_multiset(&path);
        assert!(counts.values().all(|&c| c == 1));
    }

    #[test]
    fn four_odd_vertices_not_applicable() {
        // Two crossing strokes sharing a center: 4 tips of degree 1.
        let graph = SkeletonGraph::from_parts(
            &[
                Point::new(1, 1),
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(1, 0),
                Point::new(1, 2),
            ],
            &[(0, 1), (0, 2), (0, 3), (0, 4)],
        );
        assert!(classify(&graph).is_none());
    }

    #[test]
    fn disconnected_even_graph_not_applicable() {
        // Two separate squares: each Eulerian on its own, but no single
        // traversal covers both.
        let graph = SkeletonGraph::from_parts(
            &[
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(1, 1),
                Point::new(0, 1),
                Point::new(10, 0),
                Point::new(11, 0),
                Point::new(11, 1),
                Point::new(10, 1),
            ],
            &[
                (0, 1),
                (1, 2),
                (2, 3),
                (3, 0),
                (4, 5),
                (5, 6),
                (6, 7),
                (7, 4),
            ],
        );
        assert!(classify(&graph).is_none());
    }

    #[test]
    fn circuit_with_isolated_vertex_still_applies() {
        // Connectivity ignores the isolated vertex; the walk must start
        // on the cycle, not on the stray point.
        let graph = SkeletonGraph::from_parts(
            &[
                Point::new(0, 0),
                Point::new(2, 0),
                Point::new(2, 2),
                Point::new(0, 2),
                Point::new(50, 50),
            ],
            &[(0, 1), (1, 2), (2, 3), (3, 0)],
        );
        let (path, kind) = eulerian_path(&graph).unwrap();
        assert_eq!(kind, EulerianKind::Circuit);
        assert_eq!(path.len(), 5);
        assert!(path.iter().all(|n| n.index() != 4));
    }

    #[test]
    fn figure_eight_circuit_covers_all_edges() {
        // Two triangles sharing vertex 0: degree 4 at the join, 2
        // elsewhere. Classic Hierholzer sub-circuit splice case.
        let graph = SkeletonGraph::from_parts(
            &[
                Point::new(0, 0),
                Point::new(1, 1),
                Point::new(1, -1),
                Point::new(-1, 1),
                Point::new(-1, -1),
            ],
            &[(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0)],
        );
        let (path, kind) = eulerian_path(&graph).unwrap();
        assert_eq!(kind, EulerianKind::Circuit);
        assert_eq!(path.len(), 7);
        assert_eq!(path.first(), path.last());
        let counts = edge_multiset(&path);
        assert_eq!(counts.len(), 6);
        assert!(counts.values().all(|&c| c == 1));
    }
}
