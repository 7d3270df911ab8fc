//! Minimal graph adapter trait and bounded reachability.

/// A graph view that can return **borrowed** neighbor slices.
///
/// This is the “cache-friendly” adapter: it avoids allocating a new `Vec`
/// on every step of a random walk.
pub trait GraphRef {
    fn node_count(&self) -> usize;
    fn neighbors_ref(&self, node: usize) -> &[usize];
    fn out_degree(&self, node: usize) -> usize {
        self.neighbors_ref(node).len()
    }
}

/// Nodes reachable from `start` in at most `depth` steps, `start` included,
/// in breadth-first discovery order.
///
/// Edges are interpreted as `u -> v` (directed). Out-of-range neighbor ids are ignored.
pub fn reachable_within<G: GraphRef>(graph: &G, start: usize, depth: usize) -> Vec<usize> {
    let n = graph.node_count();
    if start >= n {
        return Vec::new();
    }

    let mut visited = vec![false; n];
    visited[start] = true;
    let mut order = vec![start];
    let mut frontier_start = 0usize;

    for _ in 0..depth {
        let frontier_end = order.len();
        if frontier_start == frontier_end {
            break;
        }
        for i in frontier_start..frontier_end {
            let cur = order[i];
            for &nx in graph.neighbors_ref(cur) {
                if nx < n && !visited[nx] {
                    visited[nx] = true;
                    order.push(nx);
                }
            }
        }
        frontier_start = frontier_end;
    }
    order
}
