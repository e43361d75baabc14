//! Reachability, shortest-path and clustering passes over an adjacency list.
//!
//! All traversals are iterative so deep graphs never exhaust the call stack.

use std::collections::VecDeque;

use tracing::trace;

use crate::point::Point;

/// Marks every point reachable from `root` and returns how many points were
/// newly visited. Depth-first with an explicit stack.
pub(super) fn visit_from(points: &[Point], root: usize, visited: &mut [bool]) -> usize {
    if visited[root] {
        return 0;
    }
    visited[root] = true;
    let mut reached = 1;
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        for &neighbour in points[node].neighbours() {
            if !visited[neighbour] {
                visited[neighbour] = true;
                reached += 1;
                stack.push(neighbour);
            }
        }
    }
    reached
}

/// Connectivity check: an isolated point settles the answer immediately, a
/// complete graph is trivially connected, otherwise a single traversal from
/// point 0 must reach every point.
pub(super) fn is_connected(points: &[Point], surely_disconnected: bool, complete: bool) -> bool {
    if surely_disconnected {
        return false;
    }
    if complete {
        return true;
    }
    let mut visited = vec![false; points.len()];
    let reached = visit_from(points, 0, &mut visited);
    trace!(reached, total = points.len(), "single-root reachability scan finished");
    reached == points.len()
}

/// Number of connected components (traversal roots needed to cover every
/// point).
pub(super) fn count_components(points: &[Point]) -> usize {
    let mut visited = vec![false; points.len()];
    (0..points.len())
        .filter(|&root| visit_from(points, root, &mut visited) > 0)
        .count()
}

/// Breadth-first hop counts from `root`; `None` marks unreachable points.
pub(super) fn hop_distances(points: &[Point], root: usize) -> Vec<Option<usize>> {
    let mut distances = vec![None; points.len()];
    distances[root] = Some(0);
    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        let next = distances[node].map_or(0, |hops| hops + 1);
        for &neighbour in points[node].neighbours() {
            if distances[neighbour].is_none() {
                distances[neighbour] = Some(next);
                queue.push_back(neighbour);
            }
        }
    }
    distances
}

/// Twice the mean finite hop distance over unordered pairs. Unreachable pairs
/// contribute zero to the sum but still count in the denominator.
pub(super) fn average_path_length(points: &[Point]) -> f64 {
    let n = points.len();
    let total: usize = (0..n)
        .map(|root| {
            hop_distances(points, root)
                .iter()
                .skip(root + 1)
                .flatten()
                .sum::<usize>()
        })
        .sum();
    2.0 * total as f64 / (n * (n - 1)) as f64
}

/// Sum over all points of the number of connected neighbour pairs, divided by
/// the number of points.
pub(super) fn grouping_factor(points: &[Point]) -> f64 {
    let mut marked = vec![false; points.len()];
    let mut connected_pairs = 0_usize;
    for point in points {
        for &neighbour in point.neighbours() {
            marked[neighbour] = true;
        }
        for &first in point.neighbours() {
            connected_pairs += points[first]
                .neighbours()
                .iter()
                .filter(|&&second| second > first && marked[second])
                .count();
        }
        for &neighbour in point.neighbours() {
            marked[neighbour] = false;
        }
    }
    connected_pairs as f64 / points.len() as f64
}
