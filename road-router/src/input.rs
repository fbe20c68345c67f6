//! JSON input files.
//!
//! Road networks arrive as `{"road_details": [...]}` and travel requests as
//! a single object with a clock-time departure. This module reads both and
//! converts them into domain types.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{ClockTime, Road, TimeError, TravelRequest};

/// Errors that can occur while reading input files.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File contents are not the expected JSON shape
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Departure time is not a valid clock time
    #[error("invalid departure time {value:?}: {source}")]
    Time { value: String, source: TimeError },
}

/// Top-level shape of a roads file.
#[derive(Debug, Deserialize)]
struct RoadsFile {
    road_details: Vec<Road>,
}

/// Travel request as it appears on disk.
#[derive(Debug, Clone, Deserialize)]
struct TravelDto {
    source: String,
    destination: String,
    departure_time: String,
    #[serde(default)]
    passengers: Vec<u32>,
}

/// Parse road records from JSON text.
///
/// Records are returned as written; validation happens when the graph is built.
pub fn parse_roads(json: &str) -> Result<Vec<Road>, InputError> {
    let file: RoadsFile = serde_json::from_str(json)?;
    Ok(file.road_details)
}

/// Read road records from a JSON file.
pub fn load_roads(path: impl AsRef<Path>) -> Result<Vec<Road>, InputError> {
    let path = path.as_ref();
    let roads = parse_roads(&read(path)?)?;
    debug!(path = %path.display(), roads = roads.len(), "Loaded roads");
    Ok(roads)
}

/// Parse a travel request from JSON text, anchoring its departure to `date`.
///
/// # Examples
///
/// ```
/// use road_router::input::parse_travel;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let json = r#"{"source": "A", "destination": "C", "departure_time": "8:00AM"}"#;
/// let request = parse_travel(json, date).unwrap();
///
/// assert_eq!(request.source, "A");
/// assert_eq!(request.departure_time.hour(), 8);
/// assert!(request.passengers.is_empty());
/// ```
pub fn parse_travel(json: &str, date: NaiveDate) -> Result<TravelRequest, InputError> {
    let dto: TravelDto = serde_json::from_str(json)?;
    let departure_time =
        ClockTime::parse(&dto.departure_time, date).map_err(|source| InputError::Time {
            value: dto.departure_time.clone(),
            source,
        })?;

    Ok(TravelRequest::new(dto.source, dto.destination, departure_time)
        .with_passengers(dto.passengers))
}

/// Read a travel request from a JSON file, anchoring its departure to `date`.
pub fn load_travel(path: impl AsRef<Path>, date: NaiveDate) -> Result<TravelRequest, InputError> {
    let path = path.as_ref();
    let request = parse_travel(&read(path)?, date)?;
    debug!(
        path = %path.display(),
        from = %request.source,
        to = %request.destination,
        "Loaded travel request"
    );
    Ok(request)
}

fn read(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}
