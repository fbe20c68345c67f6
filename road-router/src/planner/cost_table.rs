//! Per-search cost table.
//!
//! One entry per graph node holding the best known travel time from the
//! start, the predecessor on that path, the edge used to arrive, and the
//! wall-clock arrival time. A table is owned by a single search and never
//! shared back into the graph.

use tracing::{trace, warn};

use crate::domain::{ClockTime, RouteError};
use crate::graph::{Edge, EdgeId, NodeId, RoadGraph};

/// Cost of a node no path has reached yet.
pub const UNREACHED: f64 = f64::INFINITY;

/// Best known way to reach one node.
#[derive(Debug, Clone, PartialEq)]
pub struct CostEntry {
    /// Cumulative travel hours from the start node.
    pub cost: f64,
    /// Node this one was reached from; `None` for the start and unreached nodes.
    pub predecessor: Option<NodeId>,
    /// Edge used to arrive here.
    pub via: Option<EdgeId>,
    /// Start time plus `cost`; `None` when that instant is past the
    /// representable calendar.
    pub arrival: Option<ClockTime>,
}

impl CostEntry {
    fn unreached(start_time: ClockTime) -> Self {
        Self {
            cost: UNREACHED,
            predecessor: None,
            via: None,
            arrival: Some(start_time),
        }
    }

    fn origin(start_time: ClockTime) -> Self {
        Self {
            cost: 0.0,
            predecessor: None,
            via: None,
            arrival: Some(start_time),
        }
    }

    /// Returns true if some path reaches this node.
    pub fn is_reached(&self) -> bool {
        self.cost.is_finite()
    }

    /// Returns the arrival time, failing with `TimeOverflow` if it could
    /// not be represented.
    pub fn arrival_time(&self) -> Result<ClockTime, RouteError> {
        self.arrival.ok_or(RouteError::TimeOverflow)
    }
}

/// Cost table for one search from a fixed start node and departure time.
#[derive(Debug, Clone)]
pub struct CostTable<'g> {
    graph: &'g RoadGraph,
    start_node: NodeId,
    start_time: ClockTime,
    entries: Vec<CostEntry>,
}

impl<'g> CostTable<'g> {
    /// Create a table with the start node at cost 0 and every other node
    /// unreached. All arrival times begin at `start_time`.
    ///
    /// # Errors
    ///
    /// Returns `RouteError::UnknownNode` if `start_node` is not in `graph`.
    pub fn new(
        graph: &'g RoadGraph,
        start_node: NodeId,
        start_time: ClockTime,
    ) -> Result<Self, RouteError> {
        if !graph.contains(start_node) {
            return Err(RouteError::UnknownNode(format!("node #{}", start_node.0)));
        }

        let mut entries = vec![CostEntry::unreached(start_time); graph.node_count()];
        entries[start_node.0] = CostEntry::origin(start_time);

        Ok(Self {
            graph,
            start_node,
            start_time,
            entries,
        })
    }

    /// Offer a path to `edge.destination` through `edge_id` costing `candidate` hours.
    ///
    /// The entry is only updated if `candidate` is strictly cheaper than the
    /// recorded cost, so costs never increase. The arrival time is computed
    /// from the start time, not accumulated. An arrival past the end of the
    /// calendar is left unset while the cost is still recorded. Returns
    /// whether the entry changed.
    pub(super) fn relax(&mut self, edge_id: EdgeId, candidate: f64) -> bool {
        let graph = self.graph;
        let edge: &Edge = graph.edge(edge_id);
        let entry = &mut self.entries[edge.destination.0];
        if candidate >= entry.cost {
            return false;
        }

        let arrival = self.start_time.after_hours(candidate);
        if arrival.is_none() {
            warn!(
                to = %graph.node_name(edge.destination),
                cost = candidate,
                "Arrival time out of range"
            );
        }

        trace!(
            from = %graph.node_name(edge.source),
            to = %graph.node_name(edge.destination),
            road = %edge.road_name,
            cost = candidate,
            "Relaxed"
        );

        *entry = CostEntry {
            cost: candidate,
            predecessor: Some(edge.source),
            via: Some(edge_id),
            arrival,
        };
        true
    }

    /// The graph this table was built over.
    pub fn graph(&self) -> &'g RoadGraph {
        self.graph
    }

    /// Returns the node the search started from.
    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    /// Returns the departure time of the search.
    pub fn start_time(&self) -> ClockTime {
        self.start_time
    }

    /// Returns the entry for `node`, if it belongs to the graph.
    pub fn entry(&self, node: NodeId) -> Option<&CostEntry> {
        self.entries.get(node.0)
    }

    /// Returns the recorded cost of `node`, or [`UNREACHED`] for foreign nodes.
    pub fn cost(&self, node: NodeId) -> f64 {
        self.entry(node).map_or(UNREACHED, |e| e.cost)
    }

    /// Returns the road name of the edge used to reach `node`.
    pub fn road_name(&self, node: NodeId) -> Option<&'g str> {
        let graph = self.graph;
        self.entry(node)?
            .via
            .map(|id| graph.edge(id).road_name.as_str())
    }

    /// Returns true if some path from the start reaches `node`.
    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.entry(node).is_some_and(CostEntry::is_reached)
    }

    /// Iterate over all entries by node.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &CostEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (NodeId(i), e))
    }

    /// Returns the number of nodes reached from the start (including it).
    pub fn reachable_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_reached()).count()
    }

    /// Returns the number of entries (one per graph node).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for CostTable<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph)
            && self.start_node == other.start_node
            && self.start_time == other.start_time
            && self.entries == other.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Road;
    use chrono::NaiveDate;

    fn time(s: &str) -> ClockTime {
        ClockTime::parse_hhmm(s, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()).unwrap()
    }

    fn graph() -> RoadGraph {
        RoadGraph::build(&[
            Road::new("R1", "A", "B", 100, 50),
            Road::new("R2", "B", "C", 60, 30),
        ])
        .unwrap()
    }

    #[test]
    fn new_table_initial_state() {
        let graph = graph();
        let table = CostTable::new(&graph, NodeId(0), time("08:00")).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.start_node(), NodeId(0));
        assert_eq!(table.start_time(), time("08:00"));

        let start = table.entry(NodeId(0)).unwrap();
        assert_eq!(start.cost, 0.0);
        assert_eq!(start.predecessor, None);
        assert_eq!(start.arrival, Some(time("08:00")));

        for node in [NodeId(1), NodeId(2)] {
            let entry = table.entry(node).unwrap();
            assert_eq!(entry.cost, UNREACHED);
            assert_eq!(entry.predecessor, None);
            assert_eq!(entry.arrival, Some(time("08:00")));
            assert!(!table.is_reachable(node));
        }
        assert_eq!(table.reachable_count(), 1);
    }

    #[test]
    fn new_rejects_foreign_start() {
        let graph = graph();
        let err = CostTable::new(&graph, NodeId(7), time("08:00")).unwrap_err();
        assert_eq!(err, RouteError::UnknownNode("node #7".into()));
    }

    #[test]
    fn relax_updates_only_when_cheaper() {
        let graph = graph();
        let mut table = CostTable::new(&graph, NodeId(0), time("08:00")).unwrap();

        assert!(table.relax(EdgeId(0), 2.0));
        let b = table.entry(NodeId(1)).unwrap();
        assert_eq!(b.cost, 2.0);
        assert_eq!(b.predecessor, Some(NodeId(0)));
        assert_eq!(b.arrival_time(), Ok(time("10:00")));
        assert_eq!(table.road_name(NodeId(1)), Some("R1"));

        // Equal and dearer offers are ignored
        assert!(!table.relax(EdgeId(0), 2.0));
        assert!(!table.relax(EdgeId(0), 3.0));
        assert_eq!(table.cost(NodeId(1)), 2.0);

        // Cheaper offer recomputes arrival from the start time
        assert!(table.relax(EdgeId(0), 1.5));
        assert_eq!(table.entry(NodeId(1)).unwrap().arrival, Some(time("09:30")));
    }

    #[test]
    fn relax_out_of_range_arrival_keeps_cost() {
        let graph = graph();
        let mut table = CostTable::new(&graph, NodeId(0), time("08:00")).unwrap();

        assert!(table.relax(EdgeId(0), 1e300));
        let b = table.entry(NodeId(1)).unwrap();
        assert!(table.is_reachable(NodeId(1)));
        assert_eq!(b.cost, 1e300);
        assert_eq!(b.predecessor, Some(NodeId(0)));
        assert_eq!(b.arrival, None);
        assert_eq!(b.arrival_time(), Err(RouteError::TimeOverflow));

        // A later cheaper offer restores a real arrival time
        assert!(table.relax(EdgeId(0), 2.0));
        assert_eq!(table.entry(NodeId(1)).unwrap().arrival, Some(time("10:00")));
    }

    #[test]
    fn foreign_node_lookups() {
        let graph = graph();
        let table = CostTable::new(&graph, NodeId(0), time("08:00")).unwrap();

        assert!(table.entry(NodeId(42)).is_none());
        assert_eq!(table.cost(NodeId(42)), UNREACHED);
        assert_eq!(table.road_name(NodeId(42)), None);
        assert!(!table.is_reachable(NodeId(42)));
    }
}
