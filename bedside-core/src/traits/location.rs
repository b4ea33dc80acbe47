//! Location lookup collaborator

use heapless::String;

/// Maximum city name length kept for display
pub const MAX_CITY_LEN: usize = 24;

/// Result of a location lookup, passed through to the display
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocationData {
    /// Seconds since the Unix epoch at lookup time
    pub unix_time: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String<MAX_CITY_LEN>,
}

/// Errors from the location lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LookupError {
    /// No network uplink on this board
    Unavailable,
    /// The request failed or timed out
    RequestFailed,
    /// The response could not be understood
    BadResponse,
}

/// On-demand location lookup
///
/// Called only on an explicit user request, never from the periodic path.
pub trait LocationProvider {
    fn fetch_location(&mut self) -> Result<LocationData, LookupError>;
}

/// Location provider for boards without a network uplink
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLocationService;

impl LocationProvider for NoLocationService {
    fn fetch_location(&mut self) -> Result<LocationData, LookupError> {
        Err(LookupError::Unavailable)
    }
}
