//! Fastest-route planning over a road network.
//!
//! This module implements the core routing algorithm that answers:
//! "If I leave here now, which roads get me there soonest, and when
//! do I reach each place along the way?"
//!
//! The engine runs Dijkstra's algorithm from the start location to fill a
//! per-search cost table, then walks that table backwards from the
//! destination to produce a time-annotated itinerary.

mod config;
mod cost_table;
mod dijkstra;
mod itinerary;
mod reconstruct;
mod search;

pub use config::{InvalidSelection, SearchConfig, Selection};
pub use cost_table::{CostEntry, CostTable, UNREACHED};
pub use dijkstra::{shortest_paths, shortest_paths_with};
pub use itinerary::{Itinerary, PathSegment, RouteLeg};
pub use reconstruct::{reconstruct, reconstruct_node};
pub use search::Planner;
