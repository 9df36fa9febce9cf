//! Coordinate handling for location-aware answers

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::LocationConfig;
use crate::error::{Result, SahaayError};

/// A WGS84 coordinate pair used to bias map lookups toward the user.
///
/// Serializes with `latitude`/`longitude` field names, which is also the
/// shape the model API expects for retrieval biasing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair, rejecting values outside the valid ranges
    /// (latitude -90..=90, longitude -180..=180).
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(
                SahaayError::Location(format!("latitude out of range: {}", latitude)).into(),
            );
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(
                SahaayError::Location(format!("longitude out of range: {}", longitude)).into(),
            );
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parses a `"lat,lon"` pair as accepted by the `--location` flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use sahaay::location::Coordinates;
    ///
    /// let coords = Coordinates::parse("19.07, 72.87").unwrap();
    /// assert_eq!(coords.latitude, 19.07);
    /// assert_eq!(coords.longitude, 72.87);
    /// ```
    pub fn parse(value: &str) -> Result<Self> {
        let mut parts = value.splitn(2, ',');
        let lat = parts.next().map(str::trim).unwrap_or_default();
        let lon = parts.next().map(str::trim).unwrap_or_default();
        if lat.is_empty() || lon.is_empty() {
            return Err(SahaayError::Location(format!(
                "expected \"lat,lon\", got \"{}\"",
                value
            ))
            .into());
        }
        let latitude = lat
            .parse::<f64>()
            .map_err(|_| SahaayError::Location(format!("invalid latitude: {}", lat)))?;
        let longitude = lon
            .parse::<f64>()
            .map_err(|_| SahaayError::Location(format!("invalid longitude: {}", lon)))?;
        Self::new(latitude, longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Resolves the session coordinates from layered configuration.
///
/// Location is best-effort: a missing, half-specified, or out-of-range pair
/// logs a warning and yields `None`, and the chat continues without a
/// location bias.
pub fn resolve(config: &LocationConfig) -> Option<Coordinates> {
    let (latitude, longitude) = match (config.latitude, config.longitude) {
        (Some(lat), Some(lon)) => (lat, lon),
        (None, None) => return None,
        _ => {
            tracing::warn!("Ignoring half-specified location, set both latitude and longitude");
            return None;
        }
    };

    match Coordinates::new(latitude, longitude) {
        Ok(coords) => {
            tracing::info!("Location bias active at {}", coords);
            Some(coords)
        }
        Err(e) => {
            tracing::warn!("Ignoring configured location: {}", e);
            None
        }
    }
}
