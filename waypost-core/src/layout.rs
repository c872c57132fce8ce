// Placement of ordered route nodes for a node-graph view

use crate::model::{NodeId, Point, RouteEdge, RouteNode, TransportMode};
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub origin: Point,
    pub spacing_y: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            origin: Point::new(250.0, 50.0),
            spacing_y: 150.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    pub id: NodeId,
    pub name: String,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connector {
    pub from: NodeId,
    pub to: NodeId,
    pub start: Point,
    pub end: Point,
    pub mode: TransportMode,
    pub label: String,
    /// Target sits above its source in the column.
    pub backward: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLayout {
    pub nodes: Vec<PositionedNode>,
    pub connectors: Vec<Connector>,
}

/// Stack `ordered` top to bottom and attach a connector per drawable edge.
pub fn layout_route(
    ordered: &[RouteNode],
    edges: &[RouteEdge],
    options: &LayoutOptions,
) -> RouteLayout {
    let nodes: Vec<PositionedNode> = ordered
        .iter()
        .enumerate()
        .map(|(i, node)| PositionedNode {
            id: node.id,
            name: node.name.clone(),
            position: Point::new(
                options.origin.x,
                options.origin.y + i as f64 * options.spacing_y,
            ),
        })
        .collect();

    let mut positions: HashMap<NodeId, Point> = HashMap::with_capacity(nodes.len());
    for node in &nodes {
        positions.entry(node.id).or_insert(node.position);
    }

    let mut connectors = Vec::with_capacity(edges.len());
    for edge in edges {
        let (Some(&start), Some(&end)) = (positions.get(&edge.from), positions.get(&edge.to)) else {
            warn!("Dropping edge {} -> {} with no placed endpoint", edge.from, edge.to);
            continue;
        };

        let label = match edge.details.as_deref() {
            Some(details) if !details.is_empty() => format!("{} · {}", edge.duration, details),
            _ => edge.duration.clone(),
        };

        connectors.push(Connector {
            from: edge.from,
            to: edge.to,
            start,
            end,
            mode: edge.transport_mode,
            label,
            backward: end.y < start.y,
        });
    }

    RouteLayout { nodes, connectors }
}
