use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::connect::{self, ConnectionRejected};
use super::kind::NodeKind;

/// A point in world-space, the coordinate system nodes live in regardless of
/// the current pan/zoom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
}

/// One production node. `position` is its top-left corner in world-space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub position: Point,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub data: NodeData,
}

/// A directed connection between two nodes. Never mutated after creation;
/// removed when either endpoint goes away.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// The serialized copy of a graph crossing the persistence boundary. Matches
/// the layout endpoint's wire body; absent arrays read as empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// Structural invariant violation found while installing a loaded graph.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidGraph {
    #[error("duplicate node id {0}")]
    DuplicateNodeId(String),
    #[error("duplicate edge id {0}")]
    DuplicateEdgeId(String),
    #[error("edge {edge} references unknown node {node}")]
    UnknownEndpoint { edge: String, node: String },
}

/// One factory layout: nodes in insertion order (rendering stacking order)
/// plus the edges between them.
///
/// Invariants: node ids are unique, edge ids are unique, and every edge's
/// endpoints exist among the nodes. `replace` is the only entry point for
/// foreign data and checks all three before touching the live graph.
#[derive(Clone, Debug, Default)]
pub struct FactoryGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    next_node_id: u64,
    next_edge_id: u64,
}

impl FactoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Append a node with a freshly allocated id.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        position: Point,
        label: impl Into<String>,
    ) -> &Node {
        let id = self.alloc_node_id();
        self.nodes.push(Node {
            id,
            position,
            kind,
            data: NodeData {
                label: label.into(),
            },
        });
        &self.nodes[self.nodes.len() - 1]
    }

    /// Admit an edge after validation; rejection is an observable value, and
    /// the graph is unchanged in that case.
    pub fn add_edge(&mut self, source: &str, target: &str) -> Result<&Edge, ConnectionRejected> {
        connect::validate(self, source, target)?;

        let id = self.alloc_edge_id();
        self.edges.push(Edge {
            id,
            source: source.to_owned(),
            target: target.to_owned(),
        });
        Ok(&self.edges[self.edges.len() - 1])
    }

    /// Remove a node and every edge referencing it. Returns whether the node
    /// existed.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|node| node.id != id);
        if self.nodes.len() == before {
            return false;
        }

        self.edges
            .retain(|edge| edge.source != id && edge.target != id);
        true
    }

    pub fn move_node(&mut self, id: &str, position: Point) -> bool {
        match self.nodes.iter_mut().find(|node| node.id == id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    /// Atomically swap in a loaded graph. On any invariant violation the
    /// current graph stays exactly as it was.
    pub fn replace(&mut self, snapshot: LayoutSnapshot) -> Result<(), InvalidGraph> {
        validate_snapshot(&snapshot)?;

        self.nodes = snapshot.nodes;
        self.edges = snapshot.edges;
        // Reseed past the installed ids; allocation also skips collisions, so
        // non-numeric foreign ids stay safe too.
        self.next_node_id = highest_numeric_id(self.nodes.iter().map(|node| node.id.as_str()), "");
        self.next_edge_id = highest_numeric_id(self.edges.iter().map(|edge| edge.id.as_str()), "e");
        Ok(())
    }

    /// Detached copy for the persistence boundary; the live graph is never
    /// handed out.
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    fn alloc_node_id(&mut self) -> String {
        loop {
            self.next_node_id += 1;
            let id = self.next_node_id.to_string();
            if self.node(&id).is_none() {
                return id;
            }
        }
    }

    fn alloc_edge_id(&mut self) -> String {
        loop {
            self.next_edge_id += 1;
            let id = format!("e{}", self.next_edge_id);
            if !self.edges.iter().any(|edge| edge.id == id) {
                return id;
            }
        }
    }
}

/// Check a snapshot against the graph invariants without installing it.
pub fn validate_snapshot(snapshot: &LayoutSnapshot) -> Result<(), InvalidGraph> {
    let mut node_ids = HashSet::with_capacity(snapshot.nodes.len());
    for node in &snapshot.nodes {
        if !node_ids.insert(node.id.as_str()) {
            return Err(InvalidGraph::DuplicateNodeId(node.id.clone()));
        }
    }

    let mut edge_ids = HashSet::with_capacity(snapshot.edges.len());
    for edge in &snapshot.edges {
        if !edge_ids.insert(edge.id.as_str()) {
            return Err(InvalidGraph::DuplicateEdgeId(edge.id.clone()));
        }
        for endpoint in [&edge.source, &edge.target] {
            if !node_ids.contains(endpoint.as_str()) {
                return Err(InvalidGraph::UnknownEndpoint {
                    edge: edge.id.clone(),
                    node: endpoint.clone(),
                });
            }
        }
    }

    Ok(())
}

fn highest_numeric_id<'a>(ids: impl Iterator<Item = &'a str>, prefix: &str) -> u64 {
    ids.filter_map(|id| id.strip_prefix(prefix)?.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
}
