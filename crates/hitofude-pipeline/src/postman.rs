//! Route inspection (Chinese Postman) approximation.
//!
//! Covers every edge of the graph at least once when the Eulerian
//! conditions fail (more than two odd-degree vertices, or multiple
//! components). The approach is a greedy nearest-unwalked-edge walk:
//! consume unwalked incident edges in discovery order, and when stuck,
//! backtrack via the weighted shortest path to the most recent visited
//! vertex that still has unwalked edges. Detour vertices are duplicate
//! visits, not new edge consumption.
//!
//! This is a heuristic, not an exact minimum-duplication solution; the
//! exact variant needs minimum-weight perfect matching over odd-degree
//! vertex pairs, which this module deliberately avoids for performance.
//! Unreachable components simply stay uncovered (expected for
//! multi-component skeletons): the partial path plus a covered-edge
//! count is a valid outcome, not an error.

use petgraph::algo::dijkstra;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::graph::{EdgeUse, SkeletonGraph};

/// Outcome of the greedy covering walk.
#[derive(Debug, Clone)]
pub struct RouteInspection {
    /// Ordered vertex sequence, including duplicated detour visits.
    pub path: Vec<NodeIndex>,
    /// Edges walked at least once. Less than the graph's edge count
    /// when a component was unreachable from the start vertex.
    pub edges_covered: usize,
}

/// Walk the graph covering as many edges as possible from a preferred
/// start vertex.
///
/// Returns `None` when the graph has no edges (nothing to cover); the
/// caller falls through to the depth-first fallback.
#[must_use]
pub fn route_inspection(graph: &SkeletonGraph) -> Option<RouteInspection> {
    if graph.edge_count() == 0 {
        return None;
    }

    // Degree-1 tips make the best pen-down points; otherwise any odd
    // vertex, otherwise anywhere on an edge-bearing vertex.
    let start = graph
        .start_vertex()
        .filter(|&n| graph.degree(n) > 0)
        .or_else(|| graph.inner().node_indices().find(|&n| graph.degree(n) > 0))?;

    let mut walked = EdgeUse::new(graph);
    let mut path = vec![start];
    let mut current = start;

    // Each successful detour lands on a vertex with an unwalked edge, so
    // more detours than edges means the walk is livelocked.
    let max_detours = graph.edge_count();
    let mut detours = 0;

    while walked.remaining() > 0 {
        if let Some((edge, next)) = walked.next_incident(graph, current) {
            walked.mark(edge);
            path.push(next);
            current = next;
            continue;
        }

        // Stuck: search backward through the visited path for the most
        // recent vertex with unwalked incident edges that is reachable
        // from here over the full original graph.
        let Some(detour) = find_detour(graph, &walked, &path, current) else {
            break; // Remaining edges are unreachable: report the partial path.
        };

        // Splice in the detour (skipping `current`, already in the path).
        path.extend_from_slice(&detour[1..]);
        current = detour[detour.len() - 1];

        detours += 1;
        if detours > max_detours {
            break;
        }
    }

    Some(RouteInspection {
        edges_covered: graph.edge_count() - walked.remaining(),
        path,
    })
}

/// Find a shortest detour from `current` back to the most recent
/// visited vertex that still has unwalked incident edges.
///
/// Vertices are tried in reverse visit order; unreachable candidates
/// are skipped. Returns the full vertex sequence `[current, ..., target]`,
/// or `None` when no reachable candidate exists.
fn find_detour(
    graph: &SkeletonGraph,
    walked: &EdgeUse,
    path: &[NodeIndex],
    current: NodeIndex,
) -> Option<Vec<NodeIndex>> {
    let mut tried = std::collections::HashSet::new();
    for &candidate in path.iter().rev() {
        if candidate == current || !tried.insert(candidate) {
            continue;
        }
        if !walked.has_incident(graph, candidate) {
            continue;
        }
        if let Some(detour) = shortest_path(graph, current, candidate) {
            return Some(detour);
        }
    }
    None
}

/// Reconstruct the weighted shortest path from `start` to `end` over
/// the full (undirected, full-weight) graph.
///
/// Runs petgraph's Dijkstra for costs, then walks backward from `end`
/// picking a neighbor whose cost plus the connecting edge weight equals
/// the current cost. A visited set guards against oscillation on cost
/// ties. Returns `None` when `end` is unreachable.
fn shortest_path(
    graph: &SkeletonGraph,
    start: NodeIndex,
    end: NodeIndex,
) -> Option<Vec<NodeIndex>> {
    let costs = dijkstra(graph.inner(), start, Some(end), |e| *e.weight());
    if !costs.contains_key(&end) {
        return None;
    }

    let mut visited = std::collections::HashSet::new();
    let mut path = vec![end];
    visited.insert(end);
    let mut current = end;

    while current != start {
        let current_cost = costs.get(&current).copied()?;
        let mut next = None;
        for edge in graph.inner().edges(current) {
            let neighbor = edge.target();
            if visited.contains(&neighbor) {
                continue;
            }
            let Some(&neighbor_cost) = costs.get(&neighbor) else {
                continue;
            };
            if (neighbor_cost + *edge.weight() - current_cost).abs() < 1e-10 {
                next = Some(neighbor);
                break;
            }
        }
        let next = next?;
        path.push(next);
        visited.insert(next);
        current = next;
    }

    path.reverse();
    Some(path)
}
