//! Road network graph.
//!
//! Turns a flat list of road records into a directed graph. Location names
//! are interned once into dense [`NodeId`]s so the search can keep its
//! per-node state in plain vectors instead of maps keyed by name.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::domain::{Road, RouteError};

/// Dense index of a location in a [`RoadGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Index of an edge in a [`RoadGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub usize);

/// A directed road segment between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: NodeId,
    pub destination: NodeId,
    /// Travel time in hours
    pub cost: f64,
    pub length: u32,
    pub road_name: String,
}

/// A directed, travel-time weighted road network.
///
/// Built once from road records and read-only afterwards, so a single
/// graph can serve any number of searches, including from several threads.
///
/// # Invariants
///
/// - Every node is an endpoint of at least one edge
/// - Each distinct location name maps to exactly one node
/// - Edge costs are finite and non-negative
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    names: Vec<String>,
    index: HashMap<String, NodeId>,
    edges: Vec<Edge>,
    /// Edge indices leaving each node, in input order.
    outgoing: Vec<Vec<usize>>,
}

impl RoadGraph {
    /// Build a graph from road records.
    ///
    /// Nodes are numbered in order of first appearance. Each road yields
    /// exactly one edge, so parallel roads between the same pair of
    /// locations are all kept.
    ///
    /// # Errors
    ///
    /// Returns `RouteError::InvalidRoad` for the first road that fails
    /// validation; no partial graph is produced.
    ///
    /// # Examples
    ///
    /// ```
    /// use road_router::domain::Road;
    /// use road_router::graph::RoadGraph;
    ///
    /// let roads = vec![
    ///     Road::new("R1", "TEHRAN", "QOM", 150, 100),
    ///     Road::new("R2", "QOM", "TEHRAN", 150, 100),
    /// ];
    /// let graph = RoadGraph::build(&roads).unwrap();
    /// assert_eq!(graph.node_count(), 2);
    /// assert_eq!(graph.edge_count(), 2);
    /// ```
    pub fn build(roads: &[Road]) -> Result<Self, RouteError> {
        let mut graph = Self::default();

        for road in roads {
            road.validate()?;
            let cost = road.travel_hours().ok_or_else(|| RouteError::InvalidRoad {
                road_name: road.road_name.clone(),
                reason: "speed limit must be positive",
            })?;

            let source = graph.intern(&road.source);
            let destination = graph.intern(&road.destination);

            graph.outgoing[source.0].push(graph.edges.len());
            graph.edges.push(Edge {
                source,
                destination,
                cost,
                length: road.length,
                road_name: road.road_name.clone(),
            });
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built road graph"
        );

        Ok(graph)
    }

    /// Returns the node for `name`, adding it if this is its first use.
    fn intern(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = NodeId(self.names.len());
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        self.outgoing.push(Vec::new());
        id
    }

    /// Look up a node by location name.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Look up a node by location name, failing with `UnknownNode`.
    pub fn resolve(&self, name: &str) -> Result<NodeId, RouteError> {
        self.node_id(name)
            .ok_or_else(|| RouteError::UnknownNode(name.to_string()))
    }

    /// Returns the location name of a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    pub fn node_name(&self, id: NodeId) -> &str {
        &self.names[id.0]
    }

    /// Returns true if `id` belongs to this graph.
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.names.len()
    }

    /// Iterate over all nodes with their names.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (NodeId(i), name.as_str()))
    }

    /// All edges in input order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the edge with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// Ids of the edges leaving `node`, in input order.
    pub fn outgoing_ids(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.outgoing
            .get(node.0)
            .into_iter()
            .flatten()
            .map(|&i| EdgeId(i))
    }

    /// Edges leaving `node`.
    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.outgoing_ids(node).map(|id| self.edge(id))
    }

    /// Returns the number of distinct locations.
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Returns the number of directed road segments.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Display for RoadGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Edges:")?;
        for edge in &self.edges {
            writeln!(
                f,
                "{} -> {} = {:.6}",
                self.node_name(edge.source),
                self.node_name(edge.destination),
                edge.cost
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Nodes: {}", self.names.join(", "))
    }
}
