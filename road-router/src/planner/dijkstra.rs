//! Single-source shortest travel times over a road graph.
//!
//! Classic Dijkstra: settle the cheapest unvisited node, relax its outgoing
//! roads, repeat until every node is settled or only unreachable nodes
//! remain. Edge costs are travel hours and always non-negative, which the
//! graph builder guarantees.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use super::config::{SearchConfig, Selection};
use super::cost_table::CostTable;
use crate::domain::{ClockTime, RouteError};
use crate::graph::{NodeId, RoadGraph};

/// Heap entry: a node and the cost it was queued with.
#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeId,
}

impl Eq for State {}

// Min-heap by cost, then by node index so ties pop deterministically
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute travel times from the location named `start` to every node.
///
/// Uses the default [`SearchConfig`].
///
/// # Errors
///
/// Returns `RouteError::UnknownNode` if `start` is not a location in `graph`.
///
/// # Examples
///
/// ```
/// use road_router::domain::{ClockTime, Road};
/// use road_router::graph::RoadGraph;
/// use road_router::planner::shortest_paths;
/// use chrono::NaiveDate;
///
/// let graph = RoadGraph::build(&[Road::new("R1", "A", "B", 100, 50)]).unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let table = shortest_paths(&graph, "A", ClockTime::parse("8:00AM", date).unwrap()).unwrap();
///
/// let b = graph.node_id("B").unwrap();
/// assert_eq!(table.cost(b), 2.0);
/// assert_eq!(table.entry(b).unwrap().arrival_time().unwrap().to_string(), "10:00AM");
/// ```
pub fn shortest_paths<'g>(
    graph: &'g RoadGraph,
    start: &str,
    start_time: ClockTime,
) -> Result<CostTable<'g>, RouteError> {
    let start = graph.resolve(start)?;
    shortest_paths_with(graph, start, start_time, &SearchConfig::default())
}

/// Compute travel times from `start` to every node with explicit configuration.
///
/// The returned table covers every node in the graph. Nodes with no path
/// from `start` keep an infinite cost and no predecessor. A node whose
/// arrival falls past the representable calendar still gets its cost and
/// predecessor, with the arrival left unset. The graph is never modified.
pub fn shortest_paths_with<'g>(
    graph: &'g RoadGraph,
    start: NodeId,
    start_time: ClockTime,
    config: &SearchConfig,
) -> Result<CostTable<'g>, RouteError> {
    let mut table = CostTable::new(graph, start, start_time)?;

    debug!(
        start = %graph.node_name(start),
        departure = %start_time,
        selection = %config.selection,
        nodes = graph.node_count(),
        "Starting shortest-path search"
    );

    let settled = match config.selection {
        Selection::LinearScan => run_linear_scan(graph, &mut table),
        Selection::BinaryHeap => run_binary_heap(graph, start, &mut table),
    };

    debug!(
        start = %graph.node_name(start),
        settled,
        unreachable = graph.node_count() - settled,
        "Shortest-path search complete"
    );

    Ok(table)
}

/// Settle nodes by scanning for the cheapest unvisited one each round.
///
/// Returns the number of nodes settled with a finite cost.
fn run_linear_scan(graph: &RoadGraph, table: &mut CostTable<'_>) -> usize {
    let mut visited = vec![false; graph.node_count()];
    let mut settled = 0;

    for _ in 0..graph.node_count() {
        let Some(node) = closest_unvisited(table, &visited) else {
            break;
        };
        visited[node.0] = true;

        // Every remaining node is unreachable; relaxing from infinity changes nothing
        if !table.is_reachable(node) {
            break;
        }
        settled += 1;

        relax_outgoing(graph, table, &visited, node);
    }

    settled
}

/// Returns the unvisited node with the lowest recorded cost.
///
/// Ties, including among unreached nodes, go to the lowest node index.
fn closest_unvisited(table: &CostTable<'_>, visited: &[bool]) -> Option<NodeId> {
    table
        .iter()
        .filter(|(node, _)| !visited[node.0])
        .fold(None, |best: Option<(NodeId, f64)>, (node, entry)| match best {
            Some((_, best_cost)) if best_cost <= entry.cost => best,
            _ => Some((node, entry.cost)),
        })
        .map(|(node, _)| node)
}

/// Settle nodes in cost order using a min-heap with lazy deletion.
///
/// Returns the number of nodes settled with a finite cost.
fn run_binary_heap(graph: &RoadGraph, start: NodeId, table: &mut CostTable<'_>) -> usize {
    let mut visited = vec![false; graph.node_count()];
    let mut settled = 0;
    let mut heap = BinaryHeap::with_capacity(graph.node_count());

    heap.push(State {
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node }) = heap.pop() {
        // Skip stale entries superseded by a cheaper push
        if visited[node.0] || cost > table.cost(node) {
            continue;
        }
        visited[node.0] = true;
        settled += 1;

        for edge_id in graph.outgoing_ids(node) {
            let edge = graph.edge(edge_id);
            if visited[edge.destination.0] {
                continue;
            }
            let candidate = cost + edge.cost;
            if table.relax(edge_id, candidate) {
                heap.push(State {
                    cost: candidate,
                    node: edge.destination,
                });
            }
        }
    }

    settled
}

/// Relax every road leaving `node` towards a node not yet settled.
fn relax_outgoing(graph: &RoadGraph, table: &mut CostTable<'_>, visited: &[bool], node: NodeId) {
    let base = table.cost(node);
    for edge_id in graph.outgoing_ids(node) {
        let edge = graph.edge(edge_id);
        if visited[edge.destination.0] {
            continue;
        }
        table.relax(edge_id, base + edge.cost);
    }
}
