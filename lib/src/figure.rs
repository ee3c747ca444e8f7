use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use ndarray::Array2;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use unordered_pair::UnorderedPair;

use crate::location::{Location, GRID_DIM};

/// One case's drawn figure: the undirected multigraph of linked grid
/// points, plus the bookkeeping the solver components share.
///
/// A [`Figure`] is built fresh per case by a
/// [`FigureBuilder`](crate::builder::FigureBuilder) and dropped when the
/// case is answered; no state survives from one case to the next.
pub struct Figure {
    pub(crate) graph: UnGraph<Location, f64>,
    /// Lazily filled `Location -> NodeIndex` slots; a point untouched by
    /// any segment never owns a vertex.
    slots: Array2<Option<NodeIndex>>,
    /// Vertices still participating in the figure. Dissolution removes a
    /// vertex from here; the last survivor of a collapsed cycle stays,
    /// even at degree zero, and counts as its own component.
    active: Vec<NodeIndex>,
    /// Cell pairs already linked. A stroke retracing an existing link
    /// draws nothing new.
    linked: HashSet<UnorderedPair<Location>>,
    length: f64,
}

impl Default for Figure {
    fn default() -> Self {
        Self {
            graph: UnGraph::with_capacity(
                GRID_DIM * GRID_DIM,
                // orthogonal unit edges in both grid directions, plus the
                // two diagonal families
                2 * GRID_DIM * (GRID_DIM - 1) + 2 * (GRID_DIM - 1) * (GRID_DIM - 1),
            ),
            slots: Array2::from_elem((GRID_DIM, GRID_DIM), None),
            active: Vec::new(),
            linked: HashSet::new(),
            length: 0.0,
        }
    }
}

impl Figure {
    /// Link two grid points with an undirected edge of the given length,
    /// creating either vertex on first touch. Re-linking an already drawn
    /// pair is absorbed without effect.
    pub(crate) fn link(&mut self, a: Location, b: Location, dist: f64) {
        if !self.linked.insert(UnorderedPair::from((a, b))) {
            return;
        }
        let (na, nb) = (self.vertex_at(a), self.vertex_at(b));
        self.graph.add_edge(na, nb, dist);
        self.length += dist;
    }

    fn vertex_at(&mut self, location: Location) -> NodeIndex {
        if let Some(vertex) = self.slots[location.as_index()] {
            return vertex;
        }
        let vertex = self.graph.add_node(location);
        self.slots[location.as_index()] = Some(vertex);
        self.active.push(vertex);
        vertex
    }

    pub(crate) fn degree(&self, vertex: NodeIndex) -> usize {
        self.graph.edges(vertex).count()
    }

    /// Total length drawn so far. Accumulated once per undirected edge at
    /// build time; reduction never changes it.
    pub fn drawn_length(&self) -> f64 {
        self.length
    }

    /// Number of vertices still in the figure.
    pub fn vertex_count(&self) -> usize {
        self.active.len()
    }

    pub(crate) fn active_vertices(&self) -> &[NodeIndex] {
        &self.active
    }

    /// Dissolve every pass-through vertex (degree exactly 2), merging its
    /// two edges into one of summed length, until none remains.
    ///
    /// When both edges lead to the same neighbor the pair forms a
    /// collapsed cycle: both edges are deleted outright instead of merged,
    /// which drops the neighbor's degree by 2 and so preserves its parity.
    /// Deletions can return an earlier vertex to degree 2, hence the
    /// fixpoint loop rather than a single sweep.
    pub fn reduce(&mut self) {
        loop {
            let Some(position) = self
                .active
                .iter()
                .position(|&vertex| self.degree(vertex) == 2)
            else {
                break;
            };
            let vertex = self.active[position];

            let incident: Vec<_> = self
                .graph
                .edges(vertex)
                .map(|edge| (edge.id(), edge.target(), *edge.weight()))
                .collect();
            let [(first_edge, first_end, first_len), (second_edge, second_end, second_len)] =
                incident[..]
            else {
                unreachable!()
            };

            // remove the higher-indexed edge first; removal swaps the last
            // edge index into the vacated slot
            let (upper, lower) = if first_edge.index() > second_edge.index() {
                (first_edge, second_edge)
            } else {
                (second_edge, first_edge)
            };
            self.graph.remove_edge(upper);
            self.graph.remove_edge(lower);

            if first_end != second_end {
                self.graph.add_edge(first_end, second_end, first_len + second_len);
            }
            self.active.swap_remove(position);
        }
    }

    /// Whether every vertex of the figure is reachable from any one of
    /// them. A blank figure is trivially connected.
    pub fn is_connected(&self) -> bool {
        let Some(&start) = self.active.first() else {
            return true;
        };
        let mut visited = vec![false; self.graph.node_count()];
        let mut stack = vec![start];
        visited[start.index()] = true;
        let mut seen = 0usize;
        while let Some(vertex) = stack.pop() {
            seen += 1;
            for edge in self.graph.edges(vertex) {
                let next = edge.target();
                if !visited[next.index()] {
                    visited[next.index()] = true;
                    stack.push(next);
                }
            }
        }
        seen == self.active.len()
    }

    /// The vertices of odd degree.
    pub(crate) fn odd_vertices(&self) -> Vec<NodeIndex> {
        self.active
            .iter()
            .copied()
            .filter(|&vertex| self.degree(vertex) % 2 == 1)
            .collect()
    }
}

impl Display for Figure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity(GRID_DIM * (GRID_DIM + 1));
        for row in 0..GRID_DIM {
            for col in 0..GRID_DIM {
                out.push(match self.slots[(row, col)] {
                    Some(vertex) if self.active.contains(&vertex) => {
                        if self.degree(vertex) >= 3 {
                            '+'
                        } else {
                            'o'
                        }
                    }
                    _ => '.',
                });
            }
            out.push('\n');
        }
        write!(f, "{}", out)
    }
}
