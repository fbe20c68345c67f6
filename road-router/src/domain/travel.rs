//! Travel requests.

use super::ClockTime;

/// A request to travel between two named locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelRequest {
    /// Where the trip starts.
    pub source: String,

    /// Where the trip ends.
    pub destination: String,

    /// When the traveller leaves `source`.
    pub departure_time: ClockTime,

    /// Descriptive passenger data carried through to the itinerary.
    /// Has no effect on routing.
    pub passengers: Vec<u32>,
}

impl TravelRequest {
    /// Create a new travel request with no passenger data.
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        departure_time: ClockTime,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            departure_time,
            passengers: Vec::new(),
        }
    }

    /// Attach passenger data.
    pub fn with_passengers(mut self, passengers: Vec<u32>) -> Self {
        self.passengers = passengers;
        self
    }
}
