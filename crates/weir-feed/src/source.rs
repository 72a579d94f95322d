//! The data-source boundary and the Open-Meteo implementation.

use std::time::Duration;

use weir_core::Payload;

use crate::site::Site;

/// A source of readings for a site.
///
/// Total by contract: transport errors, bad statuses, and unparseable
/// bodies all map to [`Payload::Unavailable`]. The synchronization
/// core downstream relies on never seeing an absent value.
pub trait DataSource: Send + Sync {
    /// Acquire the latest readings for `site`.
    fn fetch(&self, site: &Site) -> Payload;
}

/// Readings from the Open-Meteo forecast API.
///
/// Issues one blocking GET per fetch and flattens the response into a
/// payload: every numeric top-level field keyed as-is, every numeric
/// field of the `current_weather` object keyed
/// `current_weather_<key>`, in document order.
pub struct OpenMeteo {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl OpenMeteo {
    /// Source against the public Open-Meteo endpoint.
    pub fn new() -> Self {
        Self::with_base_url("https://api.open-meteo.com")
    }

    /// Source against a different endpoint, for tests and mirrors.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl Default for OpenMeteo {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSource for OpenMeteo {
    fn fetch(&self, site: &Site) -> Payload {
        let url = format!(
            "{}/v1/forecast?latitude={:.2}&longitude={:.2}&current_weather=true",
            self.base_url, site.latitude, site.longitude
        );
        let response = match self.client.get(&url).send() {
            Ok(response) => response,
            Err(_) => return Payload::Unavailable,
        };
        if !response.status().is_success() {
            return Payload::Unavailable;
        }
        let body = match response.text() {
            Ok(body) => body,
            Err(_) => return Payload::Unavailable,
        };
        flatten_readings(&body).unwrap_or(Payload::Unavailable)
    }
}

/// Flatten a forecast response body into payload entries.
///
/// Returns `None` when the body is not a JSON object. Non-numeric
/// fields are skipped; entry order follows the document.
fn flatten_readings(body: &str) -> Option<Payload> {
    let root: serde_json::Value = serde_json::from_str(body).ok()?;
    let root = root.as_object()?;

    let mut entries = Vec::new();
    for (key, value) in root {
        if let Some(n) = value.as_f64() {
            entries.push((key.clone(), n));
        }
    }
    if let Some(current) = root.get("current_weather").and_then(|v| v.as_object()) {
        for (key, value) in current {
            if let Some(n) = value.as_f64() {
                entries.push((format!("current_weather_{key}"), n));
            }
        }
    }
    Some(Payload::from_entries(entries))
}
