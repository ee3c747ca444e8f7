use std::collections::VecDeque;

use itertools::Itertools;
use ndarray::Array2;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::figure::Figure;

/// Verdict for one case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The figure splits into more than one component; no single walk can
    /// draw it.
    Disconnected,
    /// Minimum length of a walk traversing every drawn segment at least
    /// once. Equals the drawn length when an Eulerian path exists,
    /// otherwise the drawn length plus the cheapest re-traversal.
    Drawable(f64),
}

/// Classify and measure one figure.
///
/// Reduces the figure, checks connectivity, then decides between the
/// Eulerian case (0 or 2 odd vertices, where the drawn length is already
/// the answer) and the postman case, where the odd vertices are paired at
/// minimum shortest-path cost and the cheapest pairing is added on.
pub fn solve(mut figure: Figure) -> Outcome {
    if figure.vertex_count() == 0 {
        return Outcome::Drawable(0.0);
    }
    figure.reduce();
    if !figure.is_connected() {
        return Outcome::Disconnected;
    }

    let odd = figure.odd_vertices();
    // handshake lemma; an odd count here means the builder miscounted
    debug_assert_eq!(odd.len() % 2, 0);
    if odd.len() <= 2 {
        return Outcome::Drawable(figure.drawn_length());
    }

    let matrix = pair_distances(&figure, &odd);
    Outcome::Drawable(figure.drawn_length() + minimum_pairing(&matrix))
}

/// Shortest-path distances between every pair of odd vertices, as a
/// symmetric matrix indexed by position in `odd`.
fn pair_distances(figure: &Figure, odd: &[NodeIndex]) -> Array2<f64> {
    let mut matrix = Array2::from_elem((odd.len(), odd.len()), f64::INFINITY);
    // the last vertex's row fills in by symmetry
    for (i, &source) in odd.iter().enumerate().take(odd.len() - 1) {
        let dist = relax_from(figure, source);
        for (j, &target) in odd.iter().enumerate().skip(i + 1) {
            matrix[(i, j)] = dist[target.index()];
            matrix[(j, i)] = dist[target.index()];
        }
    }
    matrix
}

/// Label-correcting shortest paths from `source` over the reduced graph.
///
/// A FIFO relaxation queue is enough for these nonnegative weights; no
/// priority order is needed. A vertex is re-enqueued only while it can
/// still shorten someone else's path, which a leaf (degree 1) never can.
fn relax_from(figure: &Figure, source: NodeIndex) -> Vec<f64> {
    let mut dist = vec![f64::INFINITY; figure.graph.node_count()];
    dist[source.index()] = 0.0;
    let mut queue = VecDeque::from([source]);
    while let Some(vertex) = queue.pop_front() {
        let reach = dist[vertex.index()];
        for edge in figure.graph.edges(vertex) {
            let next = edge.target();
            let relaxed = reach + edge.weight();
            if relaxed < dist[next.index()] {
                dist[next.index()] = relaxed;
                if figure.degree(next) > 1 {
                    queue.push_back(next);
                }
            }
        }
    }
    dist
}

/// Minimum extra traversal over all perfect pairings of the odd vertices.
///
/// Exhaustive backtracking over the (2k-1)!! pairings; exact, and
/// affordable only because a 25-point figure keeps k small. The longest
/// pair of any complete pairing is forgiven (the walk may start at one of
/// its ends and finish at the other), so each candidate scores as its sum
/// minus its longest pair.
fn minimum_pairing(matrix: &Array2<f64>) -> f64 {
    let remaining = (0..matrix.nrows()).collect_vec();
    let mut best = f64::INFINITY;
    pair_up(matrix, &remaining, 0.0, 0.0, &mut best);
    best
}

fn pair_up(matrix: &Array2<f64>, remaining: &[usize], sum: f64, longest: f64, best: &mut f64) {
    if let [first, second] = remaining {
        let span = matrix[(*first, *second)];
        let candidate = sum + span - longest.max(span);
        if candidate < *best {
            *best = candidate;
        }
        return;
    }

    let first = remaining[0];
    for partner in remaining[1..].iter().copied() {
        let rest = remaining[1..]
            .iter()
            .copied()
            .filter(|&other| other != partner)
            .collect_vec();
        let span = matrix[(first, partner)];
        pair_up(matrix, &rest, sum + span, longest.max(span), best);
    }
}
