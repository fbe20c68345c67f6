//! Travel planning over a road graph.
//!
//! Ties the shortest-path engine and path reconstruction together for a
//! single travel request.

use tracing::info;

use super::config::SearchConfig;
use super::dijkstra::shortest_paths_with;
use super::itinerary::Itinerary;
use super::reconstruct::reconstruct_node;
use crate::domain::{RouteError, TravelRequest};
use crate::graph::RoadGraph;

/// Plans fastest trips over a fixed road graph.
///
/// The planner only borrows the graph, so one graph can back many planners,
/// each answering requests on its own thread.
pub struct Planner<'a> {
    graph: &'a RoadGraph,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a RoadGraph, config: &'a SearchConfig) -> Self {
        Self { graph, config }
    }

    /// Find the fastest itinerary for `request`.
    ///
    /// Both endpoints are resolved before searching, so a misspelt
    /// destination is reported as `UnknownNode` rather than `Unreachable`.
    ///
    /// # Examples
    ///
    /// ```
    /// use road_router::domain::{ClockTime, Road, TravelRequest};
    /// use road_router::graph::RoadGraph;
    /// use road_router::planner::{Planner, SearchConfig};
    /// use chrono::NaiveDate;
    ///
    /// let graph = RoadGraph::build(&[
    ///     Road::new("R1", "A", "B", 100, 50),
    ///     Road::new("R2", "B", "C", 60, 30),
    ///     Road::new("R3", "A", "C", 200, 40),
    /// ])
    /// .unwrap();
    /// let config = SearchConfig::default();
    /// let planner = Planner::new(&graph, &config);
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let request = TravelRequest::new("A", "C", ClockTime::parse("8:00AM", date).unwrap());
    /// let itinerary = planner.plan(&request).unwrap();
    ///
    /// assert_eq!(itinerary.len(), 2);
    /// assert_eq!(itinerary.arrival_time().to_string(), "12:00PM");
    /// ```
    pub fn plan(&self, request: &TravelRequest) -> Result<Itinerary, RouteError> {
        let source = self.graph.resolve(&request.source)?;
        let destination = self.graph.resolve(&request.destination)?;

        let table = shortest_paths_with(self.graph, source, request.departure_time, self.config)?;
        let itinerary =
            reconstruct_node(&table, destination)?.with_passengers(request.passengers.clone());

        info!(
            from = %request.source,
            to = %request.destination,
            departure = %itinerary.start_time(),
            arrival = %itinerary.arrival_time(),
            segments = itinerary.len(),
            "Planned trip"
        );

        Ok(itinerary)
    }
}
