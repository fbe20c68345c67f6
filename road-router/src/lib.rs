//! Road trip router.
//!
//! Finds the fastest route through a directed road network, where each
//! road costs its travel time (length over speed limit), and reports an
//! itinerary with the clock time at every stop.

pub mod domain;
pub mod graph;
pub mod input;
pub mod planner;
