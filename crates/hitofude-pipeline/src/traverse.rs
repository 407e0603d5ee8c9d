//! Depth-first fallback traversal.
//!
//! Last-resort path production for graphs where both the Eulerian
//! solver and the route inspection solver report "not applicable"
//! (in practice: graphs with vertices but no edges, such as isolated
//! skeleton pixels). Guarantees a non-empty path whenever the graph has
//! at least one vertex.

use petgraph::graph::NodeIndex;

use crate::graph::{EdgeUse, SkeletonGraph};

/// Iterative depth-first walk from `start` using an explicit stack.
///
/// At each step, if the top-of-stack vertex has an unwalked incident
/// edge, the neighbor is pushed and recorded; otherwise the stack pops.
/// Vertices are recorded on push only, so the output lists each reached
/// vertex in first-visit order.
#[must_use]
pub fn depth_first_path(graph: &SkeletonGraph, start: NodeIndex) -> Vec<NodeIndex> {
    let mut walked = EdgeUse::new(graph);
    let mut path = vec![start];
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        if let Some((edge, next)) = walked.next_incident(graph, current) {
            walked.mark(edge);
            path.push(next);
            stack.push(next);
        } else {
            stack.pop();
        }
    }

    path
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Point;

    #[test]
    fn single_vertex_yields_one_point_path() {
        let graph = SkeletonGraph::from_parts(&[Point::new(3, 3)], &[]);
        let path = depth_first_path(&graph, NodeIndex::new(0));
        assert_eq!(path, vec![NodeIndex::new(0)]);
    }

    #[test]
    fn chain_is_walked_in_order() {
        let graph = SkeletonGraph::from_parts(
            &[Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)],
            &[(0, 1), (1, 2)],
        );
        let path = depth_first_path(&graph, NodeIndex::new(0));
        assert_eq!(
            path,
            vec![NodeIndex::new(0), NodeIndex::new(1), NodeIndex::new(2)],
        );
    }

    #[test]
    fn every_edge_is_walked_once() {
        // Triangle: 3 edges. The walk consumes each edge pair once, so
        // the path has exactly 4 entries. DFS ends back where it can pop.
        let graph = SkeletonGraph::from_parts(
            &[Point::new(0, 0), Point::new(1, 0), Point::new(0, 1)],
            &[(0, 1), (1, 2), (2, 0)],
        );
        let path = depth_first_path(&graph, NodeIndex::new(0));
        assert_eq!(path.len(), 4);
        let visited: std::collections::HashSet<usize> = path.iter().map(|n| n.index()).collect();
        assert_eq!(visited.len(), 3);
    }

    #[test]
    fn unreachable_component_stays_unvisited() {
        let graph = SkeletonGraph::from_parts(
            &[
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(10, 10),
                Point::new(11, 10),
            ],
            &[(0, 1), (2, 3)],
        );
        let path = depth_first_path(&graph, NodeIndex::new(0));
        assert!(path.iter().all(|n| n.index() < 2));
        assert!(!path.is_empty());
    }
}
