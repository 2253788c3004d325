use serde::{Deserialize, Serialize};

/// Geographic coordinates as returned by the city catalog.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// City metadata from the catalog's insights endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityInsights {
    pub coordinates: Coordinates,
    pub population: u64,
    pub known_for: Vec<String>,
}

/// Which day a weather prediction covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionDay {
    Today,
    Tomorrow,
}

impl PredictionDay {
    /// The wire tag for this day.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
        }
    }
}

/// A single min/max temperature prediction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeatherPrediction {
    pub when: PredictionDay,
    pub min: f64,
    pub max: f64,
}

/// Merged city and weather view produced by the aggregator.
///
/// `predictions` always holds exactly two entries, today then tomorrow.
#[derive(Debug, Clone)]
pub struct CityBundle {
    /// (latitude, longitude)
    pub coordinates: (f64, f64),
    pub population: u64,
    pub known_for: Vec<String>,
    pub predictions: Vec<WeatherPrediction>,
}

/// Upstream service errors.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("City \"{0}\" not found")]
    CityNotFound(String),

    #[error("Weather unavailable: {0}")]
    WeatherUnavailable(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_city_insights_deserialization() {
        let insights: CityInsights = serde_json::from_str(
            r#"{
                "coordinates": {"latitude": 48.8566, "longitude": 2.3522},
                "population": 2161000,
                "knownFor": ["croissants", "art"]
            }"#,
        )
        .unwrap();

        assert_eq!(insights.coordinates.latitude, 48.8566);
        assert_eq!(insights.coordinates.longitude, 2.3522);
        assert_eq!(insights.population, 2161000);
        assert_eq!(insights.known_for, vec!["croissants", "art"]);
    }

    #[test]
    fn test_prediction_serialization_uses_lowercase_tags() {
        let prediction = WeatherPrediction {
            when: PredictionDay::Today,
            min: 8.0,
            max: 16.0,
        };

        let json = serde_json::to_string(&prediction).unwrap();
        assert_eq!(json, r#"{"when":"today","min":8.0,"max":16.0}"#);
    }

    #[test]
    fn test_prediction_day_wire_tags() {
        assert_eq!(PredictionDay::Today.as_str(), "today");
        assert_eq!(PredictionDay::Tomorrow.as_str(), "tomorrow");
    }
}
