//! Itinerary types.
//!
//! An `Itinerary` is the answer to a travel request: the roads to drive,
//! in order, with the clock time at each end of every road.

use std::fmt;

use chrono::Duration;

use crate::domain::ClockTime;

/// Separator printed after each segment.
const SEGMENT_SEPARATOR: &str = "********************";

/// Endpoints and times of one road segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLeg {
    pub source: String,
    pub destination: String,
    /// When the traveller leaves `source`
    pub departure_time: ClockTime,
    /// When the traveller reaches `destination`
    pub arrival_time: ClockTime,
}

impl RouteLeg {
    /// Time spent on this leg.
    pub fn duration(&self) -> Duration {
        self.arrival_time.signed_duration_since(self.departure_time)
    }
}

impl fmt::Display for RouteLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({})-->{}({})",
            self.source, self.departure_time, self.destination, self.arrival_time
        )
    }
}

/// One road driven as part of an itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    /// Name of the road used.
    pub road_name: String,
    /// Raw length of the road.
    pub length: u32,
    pub route: RouteLeg,
}

impl PathSegment {
    /// Time spent on this segment.
    pub fn duration(&self) -> Duration {
        self.route.duration()
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "type: Road")?;
        writeln!(f, "reference: {}", self.road_name)?;
        writeln!(f, "route: {}", self.route)?;
        writeln!(f, "duration {} minutes", self.duration().num_minutes())?;
        writeln!(f, "{SEGMENT_SEPARATOR}")
    }
}

/// A complete trip from source to destination.
///
/// # Invariants
///
/// - Segments run source-to-destination
/// - Consecutive segments connect (destination of one = source of next)
/// - An empty itinerary means the trip starts at its destination, so
///   `start_time == arrival_time`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    segments: Vec<PathSegment>,
    start_time: ClockTime,
    arrival_time: ClockTime,
    passengers: Vec<u32>,
}

impl Itinerary {
    /// Create an itinerary from ordered segments.
    pub fn new(segments: Vec<PathSegment>, start_time: ClockTime, arrival_time: ClockTime) -> Self {
        Self {
            segments,
            start_time,
            arrival_time,
            passengers: Vec::new(),
        }
    }

    /// An itinerary for a trip that is already at its destination.
    pub fn stationary(at: ClockTime) -> Self {
        Self::new(Vec::new(), at, at)
    }

    /// Attach descriptive passenger data.
    pub fn with_passengers(mut self, passengers: Vec<u32>) -> Self {
        self.passengers = passengers;
        self
    }

    /// Returns the segments in travel order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the departure time.
    pub fn start_time(&self) -> ClockTime {
        self.start_time
    }

    /// Returns the arrival time at the destination.
    pub fn arrival_time(&self) -> ClockTime {
        self.arrival_time
    }

    /// Returns the passenger data carried from the request.
    pub fn passengers(&self) -> &[u32] {
        &self.passengers
    }

    /// Returns the total time from departure to arrival.
    pub fn total_duration(&self) -> Duration {
        self.arrival_time.signed_duration_since(self.start_time)
    }

    /// Returns the summed raw length of all roads driven.
    pub fn total_length(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.length)).sum()
    }

    /// Returns the number of road segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if no road needs to be driven.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        writeln!(f, "Total duration: {} minutes", self.total_duration().num_minutes())?;
        write!(f, "Passengers: {}", self.passengers.len())
    }
}
