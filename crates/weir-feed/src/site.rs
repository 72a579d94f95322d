//! Fetch targets.

use std::fmt;

/// A place to fetch readings for: a display name plus coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Site {
    /// Name delivered alongside the payload (first tuple slot).
    pub name: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Site {
    /// Build a site.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}, {:.2})", self.name, self.latitude, self.longitude)
    }
}
