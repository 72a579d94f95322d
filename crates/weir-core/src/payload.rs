//! The payload mapping delivered by external producers.

use std::fmt;

use indexmap::IndexMap;

/// An immutable mapping from measurement key to numeric value, or the
/// explicit empty-result marker for a failed acquisition.
///
/// A payload is captured once per delivery and owned exclusively by the
/// delivering call until the engine consumes it. Iteration order is the
/// insertion order of the entries — that order is the order in which
/// the entries cross the engine boundary.
///
/// Data sources never hand over an absent value: any acquisition
/// failure (transport error, bad status, unparseable body) becomes
/// [`Payload::Unavailable`].
///
/// # Examples
///
/// ```
/// use weir_core::Payload;
///
/// let p = Payload::from_entries([
///     ("current_weather_temperature".to_string(), 59.0),
///     ("current_weather_windspeed".to_string(), 10.0),
/// ]);
/// assert_eq!(p.len(), 2);
/// assert_eq!(p.get("current_weather_windspeed"), Some(10.0));
///
/// let missing = Payload::Unavailable;
/// assert!(missing.is_unavailable());
/// assert_eq!(missing.len(), 0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Readings keyed by measurement name, in insertion order.
    Readings(IndexMap<String, f64>),
    /// Explicit empty-result marker for a failed acquisition.
    Unavailable,
}

impl Payload {
    /// Build a payload from key/value entries, preserving their order.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self::Readings(entries.into_iter().collect())
    }

    /// Whether this is the empty-result marker.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    /// Number of readings. Zero for [`Payload::Unavailable`].
    pub fn len(&self) -> usize {
        match self {
            Self::Readings(map) => map.len(),
            Self::Unavailable => 0,
        }
    }

    /// Whether there are no readings.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a reading by key.
    pub fn get(&self, key: &str) -> Option<f64> {
        match self {
            Self::Readings(map) => map.get(key).copied(),
            Self::Unavailable => None,
        }
    }

    /// Iterate over the readings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        let map = match self {
            Self::Readings(map) => Some(map),
            Self::Unavailable => None,
        };
        map.into_iter()
            .flat_map(|m| m.iter().map(|(k, v)| (k.as_str(), *v)))
    }
}

impl FromIterator<(String, f64)> for Payload {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Readings(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Self::Unavailable => write!(f, "<unavailable>"),
        }
    }
}
