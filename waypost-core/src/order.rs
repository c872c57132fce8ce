// Topological ordering of AI-returned route graphs

use crate::model::{NodeId, RouteEdge, RouteNode};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Build a graph whose node indices follow input order. Edges naming an
/// unknown id are skipped; a duplicated id binds to its first node.
pub fn build_route_graph(nodes: &[RouteNode], edges: &[RouteEdge]) -> DiGraph<NodeId, usize> {
    let mut graph = DiGraph::with_capacity(nodes.len(), edges.len());
    let mut index_of: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(nodes.len());

    for node in nodes {
        let ix = graph.add_node(node.id);
        index_of.entry(node.id).or_insert(ix);
    }

    for (position, edge) in edges.iter().enumerate() {
        match (index_of.get(&edge.from), index_of.get(&edge.to)) {
            (Some(&from), Some(&to)) => {
                graph.add_edge(from, to, position);
            }
            _ => debug!("Skipping edge {} -> {}: unknown endpoint", edge.from, edge.to),
        }
    }

    graph
}

/// Order `nodes` so that, where edges exist, sources come before targets.
///
/// Kahn's algorithm with a FIFO queue seeded in input order. When the queue
/// drains early (cycles, or nodes only reachable from a cycle) the first
/// unvisited node in input order restarts the traversal. Always returns every
/// input node exactly once.
pub fn order_nodes(nodes: &[RouteNode], edges: &[RouteEdge]) -> Vec<RouteNode> {
    order_indices(nodes, edges)
        .into_iter()
        .map(|i| nodes[i].clone())
        .collect()
}

/// Same as [`order_nodes`] but yields positions into `nodes`.
pub fn order_indices(nodes: &[RouteNode], edges: &[RouteEdge]) -> Vec<usize> {
    let graph = build_route_graph(nodes, edges);
    let count = graph.node_count();

    let mut in_degree: Vec<usize> = graph
        .node_indices()
        .map(|ix| graph.edges_directed(ix, Direction::Incoming).count())
        .collect();
    let mut queued = vec![false; count];
    let mut queue: VecDeque<NodeIndex> = VecDeque::new();
    let mut ordered = Vec::with_capacity(count);

    for ix in graph.node_indices() {
        if in_degree[ix.index()] == 0 {
            queued[ix.index()] = true;
            queue.push_back(ix);
        }
    }

    let mut next_unvisited = 0;
    while ordered.len() < count {
        let Some(ix) = queue.pop_front() else {
            // Queue drained with nodes left over: restart from the first
            // one in input order.
            while queued[next_unvisited] {
                next_unvisited += 1;
            }
            debug!(
                "Ordering restarted at node {} ({} of {} placed)",
                graph[NodeIndex::new(next_unvisited)],
                ordered.len(),
                count
            );
            queued[next_unvisited] = true;
            queue.push_back(NodeIndex::new(next_unvisited));
            continue;
        };

        ordered.push(ix.index());

        // petgraph walks adjacency newest-first; visit in edge input order
        let mut outgoing: Vec<(usize, NodeIndex)> = graph
            .edges_directed(ix, Direction::Outgoing)
            .map(|e| (*e.weight(), e.target()))
            .collect();
        outgoing.sort_unstable_by_key(|(position, _)| *position);

        for (_, target) in outgoing {
            let degree = &mut in_degree[target.index()];
            *degree = degree.saturating_sub(1);
            if *degree == 0 && !queued[target.index()] {
                queued[target.index()] = true;
                queue.push_back(target);
            }
        }
    }

    ordered
}
