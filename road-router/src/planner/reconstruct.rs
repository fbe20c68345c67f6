//! Path reconstruction from a completed cost table.
//!
//! Follows predecessor links from the destination back to the start,
//! collecting one segment per road, then reverses them into travel order.

use tracing::debug;

use super::cost_table::CostTable;
use super::itinerary::{Itinerary, PathSegment, RouteLeg};
use crate::domain::RouteError;
use crate::graph::NodeId;

/// Build the itinerary to the location named `destination`.
///
/// # Errors
///
/// - `RouteError::UnknownNode` if `destination` is not in the graph
/// - `RouteError::Unreachable` if no path leads there from the start
/// - `RouteError::TimeOverflow` if the arrival there cannot be represented
pub fn reconstruct(table: &CostTable<'_>, destination: &str) -> Result<Itinerary, RouteError> {
    let node = table.graph().resolve(destination)?;
    reconstruct_node(table, node)
}

/// Build the itinerary to `destination`.
///
/// Reconstructing to the start node itself yields an empty itinerary whose
/// start and arrival times are both the search's departure time.
pub fn reconstruct_node(
    table: &CostTable<'_>,
    destination: NodeId,
) -> Result<Itinerary, RouteError> {
    let graph = table.graph();
    let start = table.start_node();

    let target = table.entry(destination).ok_or_else(|| {
        RouteError::UnknownNode(format!("node #{}", destination.0))
    })?;

    if destination == start {
        return Ok(Itinerary::stationary(table.start_time()));
    }

    let unreachable = || RouteError::Unreachable {
        from: graph.node_name(start).to_string(),
        to: graph.node_name(destination).to_string(),
    };

    if !target.is_reached() {
        return Err(unreachable());
    }
    let arrival_time = target.arrival_time()?;

    let mut segments = Vec::new();
    let mut current = destination;

    while current != start {
        // A well-formed table never needs more steps than there are nodes
        if segments.len() >= table.len() {
            return Err(unreachable());
        }

        let entry = table.entry(current).ok_or_else(unreachable)?;
        let (Some(previous), Some(via)) = (entry.predecessor, entry.via) else {
            return Err(unreachable());
        };
        let departure_time = table.entry(previous).ok_or_else(unreachable)?.arrival_time()?;
        let edge = graph.edge(via);

        segments.push(PathSegment {
            road_name: edge.road_name.clone(),
            length: edge.length,
            route: RouteLeg {
                source: graph.node_name(previous).to_string(),
                destination: graph.node_name(current).to_string(),
                departure_time,
                arrival_time: entry.arrival_time()?,
            },
        });

        current = previous;
    }

    segments.reverse();

    debug!(
        from = %graph.node_name(start),
        to = %graph.node_name(destination),
        segments = segments.len(),
        arrival = %arrival_time,
        "Reconstructed itinerary"
    );

    Ok(Itinerary::new(segments, table.start_time(), arrival_time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, Road};
    use crate::graph::RoadGraph;
    use crate::planner::shortest_paths;
    use chrono::{Duration, NaiveDate};

    fn time(s: &str) -> ClockTime {
        ClockTime::parse(s, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()).unwrap()
    }

    fn triangle() -> RoadGraph {
        RoadGraph::build(&[
            Road::new("R1", "A", "B", 100, 50),
            Road::new("R2", "B", "C", 60, 30),
            Road::new("R3", "A", "C", 200, 40),
        ])
        .unwrap()
    }

    #[test]
    fn two_segment_itinerary_in_travel_order() {
        let graph = triangle();
        let table = shortest_paths(&graph, "A", time("8:00AM")).unwrap();
        let itinerary = reconstruct(&table, "C").unwrap();

        assert_eq!(itinerary.start_time(), time("08:00"));
        assert_eq!(itinerary.arrival_time(), time("12:00"));
        assert_eq!(itinerary.len(), 2);

        let first = &itinerary.segments()[0];
        assert_eq!(first.road_name, "R1");
        assert_eq!(first.route.source, "A");
        assert_eq!(first.route.destination, "B");
        assert_eq!(first.route.departure_time, time("08:00"));
        assert_eq!(first.route.arrival_time, time("10:00"));
        assert_eq!(first.length, 100);

        let second = &itinerary.segments()[1];
        assert_eq!(second.road_name, "R2");
        assert_eq!(second.route.source, "B");
        assert_eq!(second.route.destination, "C");
        assert_eq!(second.route.departure_time, time("10:00"));
        assert_eq!(second.route.arrival_time, time("12:00"));

        assert_eq!(itinerary.total_duration(), Duration::hours(4));
    }

    #[test]
    fn destination_equal_to_start_is_empty() {
        let graph = triangle();
        let table = shortest_paths(&graph, "B", time("3:04PM")).unwrap();
        let itinerary = reconstruct(&table, "B").unwrap();

        assert!(itinerary.is_empty());
        assert_eq!(itinerary.start_time(), time("3:04PM"));
        assert_eq!(itinerary.arrival_time(), time("3:04PM"));
    }

    #[test]
    fn unreachable_destination_fails() {
        let graph = triangle();
        let table = shortest_paths(&graph, "B", time("08:00")).unwrap();

        assert_eq!(
            reconstruct(&table, "A"),
            Err(RouteError::Unreachable {
                from: "B".into(),
                to: "A".into(),
            })
        );
    }

    #[test]
    fn unknown_destination_fails() {
        let graph = triangle();
        let table = shortest_paths(&graph, "A", time("08:00")).unwrap();

        assert_eq!(
            reconstruct(&table, "Z"),
            Err(RouteError::UnknownNode("Z".into()))
        );
        assert!(matches!(
            reconstruct_node(&table, NodeId(10)),
            Err(RouteError::UnknownNode(_))
        ));
    }

    #[test]
    fn out_of_range_arrival_fails_only_for_that_destination() {
        let graph = RoadGraph::build(&[
            Road::new("Near", "A", "B", 60, 60),
            Road::new("Endless", "A", "C", 4_000_000_000, 1),
        ])
        .unwrap();
        let table = shortest_paths(&graph, "A", time("08:00")).unwrap();

        let near = reconstruct(&table, "B").unwrap();
        assert_eq!(near.arrival_time(), time("09:00"));
        assert_eq!(near.len(), 1);

        assert_eq!(reconstruct(&table, "C"), Err(RouteError::TimeOverflow));
    }

    #[test]
    fn segments_connect() {
        let graph = RoadGraph::build(&[
            Road::new("R1", "A", "B", 30, 60),
            Road::new("R2", "B", "C", 30, 60),
            Road::new("R3", "C", "D", 30, 60),
            Road::new("R4", "D", "E", 30, 60),
            Road::new("Shortcut", "B", "D", 90, 60),
        ])
        .unwrap();
        let table = shortest_paths(&graph, "A", time("11:00PM")).unwrap();
        let itinerary = reconstruct(&table, "E").unwrap();

        let names: Vec<&str> = itinerary.segments().iter().map(|s| s.road_name.as_str()).collect();
        assert_eq!(names, vec!["R1", "R2", "R3", "R4"]);

        for pair in itinerary.segments().windows(2) {
            assert_eq!(pair[0].route.destination, pair[1].route.source);
            assert_eq!(pair[0].route.arrival_time, pair[1].route.departure_time);
        }
        assert_eq!(itinerary.arrival_time().to_string(), "1:00AM");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{ClockTime, Road};
    use crate::graph::RoadGraph;
    use crate::planner::{SearchConfig, shortest_paths_with};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    const NAMES: [&str; 5] = ["A", "B", "C", "D", "E"];

    fn arb_roads() -> impl Strategy<Value = Vec<Road>> {
        prop::collection::vec((0usize..5, 0usize..5, 0u32..300, 1u32..100), 1..10).prop_map(
            |specs| {
                specs
                    .into_iter()
                    .enumerate()
                    .map(|(i, (s, d, length, speed))| {
                        Road::new(format!("R{i}"), NAMES[s], NAMES[d], length, speed)
                    })
                    .collect()
            },
        )
    }

    proptest! {
        /// Reachable destinations give a connected itinerary from start to
        /// destination; unreachable ones fail without a partial result
        #[test]
        fn itinerary_well_formed(roads in arb_roads(), from in 0usize..5, to in 0usize..5) {
            let graph = RoadGraph::build(&roads).unwrap();
            let start = NodeId(from % graph.node_count());
            let dest = NodeId(to % graph.node_count());
            let departure = ClockTime::parse_hhmm("08:00", NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()).unwrap();
            let table = shortest_paths_with(&graph, start, departure, &SearchConfig::default()).unwrap();

            match reconstruct_node(&table, dest) {
                Ok(itinerary) => {
                    prop_assert!(table.is_reachable(dest));
                    prop_assert_eq!(itinerary.start_time(), departure);
                    prop_assert_eq!(Some(itinerary.arrival_time()), table.entry(dest).unwrap().arrival);
                    if start == dest {
                        prop_assert!(itinerary.is_empty());
                    } else {
                        let segments = itinerary.segments();
                        prop_assert!(!segments.is_empty());
                        prop_assert_eq!(segments[0].route.source.as_str(), graph.node_name(start));
                        prop_assert_eq!(segments[0].route.departure_time, departure);
                        let last = &segments[segments.len() - 1];
                        prop_assert_eq!(last.route.destination.as_str(), graph.node_name(dest));
                        prop_assert_eq!(last.route.arrival_time, itinerary.arrival_time());
                        for pair in segments.windows(2) {
                            prop_assert_eq!(&pair[0].route.destination, &pair[1].route.source);
                        }
                    }
                }
                Err(err) => {
                    prop_assert!(!table.is_reachable(dest));
                    let is_unreachable = matches!(err, RouteError::Unreachable { .. });
                    prop_assert!(is_unreachable);
                }
            }
        }
    }
}
