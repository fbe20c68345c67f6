//! Domain types for the road router.
//!
//! Road records, travel requests and date-aware clock times, plus the
//! error type shared by graph construction, search and reconstruction.

mod error;
mod road;
mod time;
mod travel;

pub use error::RouteError;
pub use road::Road;
pub use time::{ClockTime, TimeError};
pub use travel::TravelRequest;
