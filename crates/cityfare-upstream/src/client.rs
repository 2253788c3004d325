//! HTTP client for the city catalog and weather forecast services.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::types::{CityBundle, CityInsights, PredictionDay, UpstreamError, WeatherPrediction};

/// Wire shape of one entry in the weather predictions response.
#[derive(Debug, Deserialize)]
struct WeatherReport {
    predictions: Vec<RawPrediction>,
}

#[derive(Debug, Deserialize)]
struct RawPrediction {
    when: String,
    min: f64,
    max: f64,
}

/// Client for the external city catalog and weather forecast services.
///
/// Every call is made fresh: no caching, no retries. The shared client
/// carries a bounded request timeout; a timeout surfaces as the same
/// `Network` failure as any other transport error.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    base_url: Url,
    client: Arc<Client>,
    api_key: String,
}

impl UpstreamClient {
    /// Create a new upstream client.
    ///
    /// # Errors
    /// Returns `UpstreamError::Network` if the HTTP client cannot be built.
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            client: Arc::new(client),
            api_key: api_key.into(),
        })
    }

    /// Fetch catalog metadata for a city.
    ///
    /// # Errors
    /// Returns `UpstreamError::CityNotFound` for any non-success status,
    /// `InvalidResponse` for an unparseable body, and `Network` for
    /// transport failures.
    pub async fn city_insights(&self, city_id: &str) -> Result<CityInsights, UpstreamError> {
        let response = self.fetch_city(city_id).await?;

        let insights: CityInsights = response
            .json()
            .await
            .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))?;

        Ok(insights)
    }

    /// Check that a city exists in the upstream catalog.
    ///
    /// The catalog is the single source of truth for valid city identifiers;
    /// the check is performed fresh on every call.
    ///
    /// # Errors
    /// Returns `UpstreamError::CityNotFound` if the catalog does not answer
    /// with success, and `Network` for transport failures.
    pub async fn city_exists(&self, city_id: &str) -> Result<(), UpstreamError> {
        self.fetch_city(city_id).await.map(|_| ())
    }

    /// Fetch today's and tomorrow's temperature predictions for a city.
    ///
    /// The result is exactly `[today, tomorrow]` regardless of the order the
    /// service reports them in.
    ///
    /// # Errors
    /// Returns `UpstreamError::WeatherUnavailable` for a non-success status
    /// or a body missing either day, and `Network` for transport failures.
    pub async fn weather_predictions(
        &self,
        city_id: &str,
    ) -> Result<Vec<WeatherPrediction>, UpstreamError> {
        tracing::debug!("Fetching weather predictions for city {}", city_id);

        let url = self.endpoint("weather-predictions")?;
        let response = self
            .client
            .get(url)
            .query(&[("cityId", city_id), ("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Weather fetch for {} returned {}", city_id, status);
            return Err(UpstreamError::WeatherUnavailable(format!(
                "weather service returned {}",
                status
            )));
        }

        let reports: Vec<WeatherReport> = response
            .json()
            .await
            .map_err(|e| UpstreamError::WeatherUnavailable(e.to_string()))?;

        let report = reports.into_iter().next().ok_or_else(|| {
            UpstreamError::WeatherUnavailable(format!("no weather data for city {}", city_id))
        })?;

        let today = find_prediction(&report.predictions, PredictionDay::Today)?;
        let tomorrow = find_prediction(&report.predictions, PredictionDay::Tomorrow)?;

        Ok(vec![today, tomorrow])
    }

    /// Fetch the merged city and weather view.
    ///
    /// Insights first, then weather; either failure aborts the merge.
    ///
    /// # Errors
    /// Propagates `CityNotFound`, `WeatherUnavailable`, `InvalidResponse`,
    /// and `Network` from the two underlying calls.
    pub async fn fetch_city_bundle(&self, city_id: &str) -> Result<CityBundle, UpstreamError> {
        let insights = self.city_insights(city_id).await?;
        let predictions = self.weather_predictions(city_id).await?;

        Ok(CityBundle {
            coordinates: (insights.coordinates.latitude, insights.coordinates.longitude),
            population: insights.population,
            known_for: insights.known_for,
            predictions,
        })
    }

    /// Issue the city catalog request and map non-success to `CityNotFound`.
    async fn fetch_city(&self, city_id: &str) -> Result<reqwest::Response, UpstreamError> {
        tracing::debug!("Fetching insights for city {}", city_id);

        let url = self.endpoint(&format!("cities/{}/insights", city_id))?;
        let response = self
            .client
            .get(url)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("City lookup for {} returned {}", city_id, status);
            return Err(UpstreamError::CityNotFound(city_id.to_string()));
        }

        Ok(response)
    }

    fn endpoint(&self, path: &str) -> Result<Url, UpstreamError> {
        self.base_url
            .join(path)
            .map_err(|e| UpstreamError::InvalidResponse(format!("invalid request URL: {}", e)))
    }
}

fn find_prediction(
    predictions: &[RawPrediction],
    day: PredictionDay,
) -> Result<WeatherPrediction, UpstreamError> {
    predictions
        .iter()
        .find(|prediction| prediction.when == day.as_str())
        .map(|prediction| WeatherPrediction {
            when: day,
            min: prediction.min,
            max: prediction.max,
        })
        .ok_or_else(|| {
            UpstreamError::WeatherUnavailable(format!("missing {} prediction", day.as_str()))
        })
}
