//! Skeleton graph construction from a binary mask.
//!
//! Every foreground pixel becomes a vertex (even if isolated) and every
//! pair of 8-neighboring foreground pixels becomes one undirected edge
//! weighted by Euclidean distance: 1.0 for axis-aligned neighbors,
//! sqrt(2) for diagonals. Construction is a single O(H*W) scan; edges
//! are deduplicated by only linking each pixel to its forward neighbors
//! (east, south-west, south, south-east).
//!
//! The graph is immutable once built. Traversals mark edge consumption
//! through a separate [`EdgeUse`] bitvec keyed by petgraph edge ids, so
//! the weighted adjacency stays available for shortest-path detours.

use image::GrayImage;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;

use crate::types::Point;

/// Forward 8-neighbor offsets relative to the current pixel.
///
/// Scanning row-major and linking only forward guarantees each unordered
/// neighbor pair is added exactly once.
const FORWARD_NEIGHBORS: [(i32, i32); 4] = [(1, 0), (-1, 1), (0, 1), (1, 1)];

/// An undirected weighted graph over skeleton pixels.
///
/// Node indices are dense (0..vertex count) and `coords` maps each node
/// back to its pixel coordinate.
#[derive(Debug, Clone)]
pub struct SkeletonGraph {
    graph: UnGraph<(), f64>,
    coords: Vec<Point>,
}

impl SkeletonGraph {
    /// Build the graph from a binary mask (nonzero = foreground).
    ///
    /// An empty or all-background mask produces an empty graph; the
    /// caller decides whether that is reportable.
    #[must_use]
    pub fn from_mask(mask: &GrayImage) -> Self {
        let (width, height) = mask.dimensions();
        let mut graph = UnGraph::<(), f64>::new_undirected();
        let mut coords = Vec::new();

        // Pixel -> node lookup grid. O(W*H) memory bounds the whole
        // construction to the input size.
        let mut nodes: Vec<Option<NodeIndex>> =
            vec![None; (width as usize).saturating_mul(height as usize)];
        let at = |x: u32, y: u32| (y as usize) * (width as usize) + (x as usize);

        for y in 0..height {
            for x in 0..width {
                if mask.get_pixel(x, y).0[0] == 0 {
                    continue;
                }
                let idx = graph.add_node(());
                #[allow(clippy::cast_possible_wrap)]
                coords.push(Point::new(x as i32, y as i32));
                nodes[at(x, y)] = Some(idx);
            }
        }

        for y in 0..height {
            for x in 0..width {
                let Some(node) = nodes[at(x, y)] else {
                    continue;
                };
                #[allow(clippy::cast_possible_wrap)]
                let here = Point::new(x as i32, y as i32);

                for (dx, dy) in FORWARD_NEIGHBORS {
                    #[allow(clippy::cast_possible_wrap)]
                    let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                    if nx < 0 || ny < 0 {
                        continue;
                    }
                    #[allow(clippy::cast_sign_loss)]
                    let (nx_u, ny_u) = (nx as u32, ny as u32);
                    if nx_u >= width || ny_u >= height {
                        continue;
                    }
                    if let Some(neighbor) = nodes[at(nx_u, ny_u)] {
                        let weight = here.distance(Point::new(nx, ny));
                        graph.add_edge(node, neighbor, weight);
                    }
                }
            }
        }

        Self { graph, coords }
    }

    /// Number of vertices (foreground pixels).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Pixel coordinate of a vertex.
    #[must_use]
    pub fn point(&self, node: NodeIndex) -> Point {
        self.coords[node.index()]
    }

    /// Number of edges incident to a vertex.
    #[must_use]
    pub fn degree(&self, node: NodeIndex) -> usize {
        self.graph.edges(node).count()
    }

    /// Vertices with odd degree. Parity drives traversal selection.
    #[must_use]
    pub fn odd_vertices(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&n| self.degree(n) % 2 == 1)
            .collect()
    }

    /// Preferred start vertex: degree 1 if present, else any odd-degree
    /// vertex, else any vertex. `None` only for the empty graph.
    #[must_use]
    pub fn start_vertex(&self) -> Option<NodeIndex> {
        self.graph
            .node_indices()
            .find(|&n| self.degree(n) == 1)
            .or_else(|| self.graph.node_indices().find(|&n| self.degree(n) % 2 == 1))
            .or_else(|| self.graph.node_indices().next())
    }

    /// Connected components, ignoring isolated (degree-0) vertices.
    ///
    /// Zero when the graph has no edges at all.
    #[must_use]
    pub fn component_count(&self) -> usize {
        let mut uf = UnionFind::<usize>::new(self.graph.node_count());
        for edge in self.graph.edge_references() {
            uf.union(edge.source().index(), edge.target().index());
        }
        let mut roots: Vec<usize> = self
            .graph
            .node_indices()
            .filter(|&n| self.degree(n) > 0)
            .map(|n| uf.find_mut(n.index()))
            .collect();
        roots.sort_unstable();
        roots.dedup();
        roots.len()
    }

    /// Whether all edge-bearing vertices lie in one component.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.component_count() <= 1
    }

    /// Underlying petgraph structure, for traversal modules.
    pub(crate) const fn inner(&self) -> &UnGraph<(), f64> {
        &self.graph
    }

    /// Test helper: build a graph from explicit vertices and edges,
    /// bypassing the mask scan. Weights are Euclidean distances.
    #[cfg(test)]
    pub(crate) fn from_parts(points: &[Point], edges: &[(usize, usize)]) -> Self {
        let mut graph = UnGraph::<(), f64>::new_undirected();
        let nodes: Vec<NodeIndex> = points.iter().map(|_| graph.add_node(())).collect();
        for &(a, b) in edges {
            let weight = points[a].distance(points[b]);
            graph.add_edge(nodes[a], nodes[b], weight);
        }
        Self {
            graph,
            coords: points.to_vec(),
        }
    }
}

/// Edge consumption tracker for a traversal over one [`SkeletonGraph`].
///
/// Marking an edge walked is the moral equivalent of removing it from a
/// working copy of the graph, without invalidating petgraph indices.
#[derive(Debug, Clone)]
pub(crate) struct EdgeUse {
    used: Vec<bool>,
    remaining: usize,
}

impl EdgeUse {
    pub(crate) fn new(graph: &SkeletonGraph) -> Self {
        Self {
            used: vec![false; graph.edge_count()],
            remaining: graph.edge_count(),
        }
    }

    pub(crate) fn is_used(&self, edge: EdgeIndex) -> bool {
        self.used[edge.index()]
    }

    pub(crate) fn mark(&mut self, edge: EdgeIndex) {
        if !self.used[edge.index()] {
            self.used[edge.index()] = true;
            self.remaining -= 1;
        }
    }

    /// Edges not yet walked.
    pub(crate) const fn remaining(&self) -> usize {
        self.remaining
    }

    /// First unwalked edge incident to `node`, in discovery order.
    pub(crate) fn next_incident(
        &self,
        graph: &SkeletonGraph,
        node: NodeIndex,
    ) -> Option<(EdgeIndex, NodeIndex)> {
        graph.inner().edges(node).find_map(|e| {
            if self.is_used(e.id()) {
                None
            } else {
                Some((e.id(), e.target()))
            }
        })
    }

    /// Whether `node` still has any unwalked incident edge.
    pub(crate) fn has_incident(&self, graph: &SkeletonGraph, node: NodeIndex) -> bool {
        self.next_incident(graph, node).is_some()
    }
}
