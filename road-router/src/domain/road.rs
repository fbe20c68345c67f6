//! Road records.

use serde::Deserialize;

use super::RouteError;

/// One directed road between two named locations.
///
/// A road from A to B is only travelled A to B; a two-way road needs a
/// second record with the endpoints swapped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Road {
    /// Free-text label shown in itineraries
    pub road_name: String,
    /// Name of the location the road leaves from
    pub source: String,
    /// Name of the location the road arrives at
    pub destination: String,
    /// Length in distance units
    pub length: u32,
    /// Speed limit in distance units per hour; missing means 0
    #[serde(default)]
    pub speed_limit: u32,
}

impl Road {
    /// Creates a new road record.
    pub fn new(
        road_name: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
        length: u32,
        speed_limit: u32,
    ) -> Self {
        Self {
            road_name: road_name.into(),
            source: source.into(),
            destination: destination.into(),
            length,
            speed_limit,
        }
    }

    /// Checks that this record can become a graph edge.
    ///
    /// # Errors
    ///
    /// Returns `RouteError::InvalidRoad` if the speed limit is zero or
    /// either endpoint name is empty.
    pub fn validate(&self) -> Result<(), RouteError> {
        let reason = if self.speed_limit == 0 {
            "speed limit must be positive"
        } else if self.source.is_empty() {
            "source name is empty"
        } else if self.destination.is_empty() {
            "destination name is empty"
        } else {
            return Ok(());
        };

        Err(RouteError::InvalidRoad {
            road_name: self.road_name.clone(),
            reason,
        })
    }

    /// Travel time along this road in hours (`length / speed_limit`).
    ///
    /// Returns `None` when the speed limit is zero.
    pub fn travel_hours(&self) -> Option<f64> {
        if self.speed_limit == 0 {
            return None;
        }
        Some(f64::from(self.length) / f64::from(self.speed_limit))
    }
}
