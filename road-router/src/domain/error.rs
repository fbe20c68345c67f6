//! Routing error types.
//!
//! These errors cover bad road data, requests naming places the network
//! does not know, and destinations the search cannot reach. They are
//! distinct from I/O and JSON errors raised while loading input files.

/// Errors from graph construction, search and path reconstruction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// A road record cannot become an edge (e.g. zero speed limit)
    #[error("invalid road {road_name:?}: {reason}")]
    InvalidRoad {
        road_name: String,
        reason: &'static str,
    },

    /// A location name does not appear in the road network
    #[error("unknown location: {0}")]
    UnknownNode(String),

    /// No chain of roads leads from the start to the destination
    #[error("no route from {from} to {to}")]
    Unreachable { from: String, to: String },

    /// An arrival time falls outside the representable calendar
    #[error("arrival time out of range")]
    TimeOverflow,
}
