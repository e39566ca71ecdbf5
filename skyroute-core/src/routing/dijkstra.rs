use fixedbitset::FixedBitSet;
use petgraph::graph::NodeIndex;

use crate::ConstellationGraph;

/// Tentative distances and parent pointers of a finished search
#[derive(Debug, Clone)]
pub(crate) struct SearchState {
    pub(crate) distances: Vec<f64>,
    pub(crate) parents: Vec<Option<NodeIndex>>,
}

/// Dijkstra's algorithm with congestion charged on entry.
///
/// Relaxing an edge into a node costs the edge weight plus the node cost
/// of the node being entered, never the cost of the node being left, so
/// the source pays nothing for itself. Nodes are selected by a linear
/// scan in graph order, the first node with the minimum tentative
/// distance wins, and the search only ends once every node is settled.
///
/// Settled nodes are never relaxed again. Node costs may be negative, so
/// this keeps every parent pointer on a node settled earlier and the
/// parent walk from any node terminates.
pub(crate) fn congestion_dijkstra(graph: &ConstellationGraph, source: NodeIndex) -> SearchState {
    let node_count = graph.node_count();
    let mut distances = vec![f64::INFINITY; node_count];
    let mut parents: Vec<Option<NodeIndex>> = vec![None; node_count];
    let mut settled = FixedBitSet::with_capacity(node_count);

    distances[source.index()] = 0.0;

    while let Some(current) = closest_unsettled(&distances, &settled) {
        let base = distances[current];

        for (next, weight) in graph.adjacent(NodeIndex::new(current)) {
            if settled.contains(next.index()) {
                continue;
            }
            let candidate = base + weight + graph.node_cost_by_index(next);
            if candidate < distances[next.index()] {
                distances[next.index()] = candidate;
                parents[next.index()] = Some(NodeIndex::new(current));
            }
        }

        settled.insert(current);
    }

    SearchState { distances, parents }
}

fn closest_unsettled(distances: &[f64], settled: &FixedBitSet) -> Option<usize> {
    let mut best: Option<usize> = None;
    for node in settled.zeroes() {
        match best {
            Some(b) if distances[node] >= distances[b] => {}
            _ => best = Some(node),
        }
    }
    best
}

/// Walks parent pointers back from `destination`.
///
/// Returns the node sequence starting at `source` and whether the walk
/// actually reached it. The source is always the first element, so an
/// interrupted walk yields the source followed by a disconnected tail.
pub(crate) fn reconstruct_path(
    state: &SearchState,
    source: NodeIndex,
    destination: NodeIndex,
) -> (Vec<NodeIndex>, bool) {
    let mut path = Vec::new();
    let mut current = destination;
    let mut reached = true;

    while current != source {
        path.push(current);

        match state.parents[current.index()] {
            Some(parent) => current = parent,
            None => {
                reached = false;
                break;
            }
        }
    }

    path.push(source);
    path.reverse();
    (path, reached)
}
