//! Outbound clients for the external city catalog and weather forecast
//! services, plus the merged city/weather view the API serves.

pub mod client;
pub mod types;

pub use client::UpstreamClient;
pub use types::{
    CityBundle, CityInsights, Coordinates, PredictionDay, UpstreamError, WeatherPrediction,
};
