use super::WeatherProvider;
use crate::domain::error::{AppError, Result};
use crate::domain::weather::WeatherSnapshot;
use async_trait::async_trait;
use std::time::Duration;

/// Client for the weatherapi.com forecast endpoint.
pub struct WeatherApiClient {
    client: reqwest::Client,
    base_url: String,
    days: u8,
}

impl WeatherApiClient {
    pub fn new(base_url: impl Into<String>, days: u8, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: base_url.into(),
            days,
        }
    }

    fn forecast_url(&self, api_key: &str, location: &str) -> Result<url::Url> {
        let base_url = self.base_url.trim_end_matches('/');
        let mut url = url::Url::parse(&format!("{}/forecast.json", base_url))
            .map_err(|e| AppError::ConfigError(format!("Invalid weather base_url: {}", e)))?;

        url.query_pairs_mut()
            .append_pair("key", api_key)
            .append_pair("q", location)
            .append_pair("days", &self.days.to_string())
            .append_pair("aqi", "yes");

        Ok(url)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    async fn forecast(&self, api_key: &str, location: &str) -> Result<WeatherSnapshot> {
        let url = self.forecast_url(api_key, location)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::WeatherError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %text, "Weather API error");
            return Err(AppError::WeatherError(format!(
                "Weather API error: {}",
                status.as_u16()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::WeatherError(format!("Failed to parse JSON: {}", e)))?;

        Ok(WeatherSnapshot(json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_url_encodes_location() {
        let client = WeatherApiClient::new(
            "https://api.weatherapi.com/v1/",
            3,
            Duration::from_secs(5),
        );
        let url = client.forecast_url("k3y", "Puri, Odisha").unwrap();

        assert_eq!(url.path(), "/v1/forecast.json");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("key".to_string(), "k3y".to_string()),
                ("q".to_string(), "Puri, Odisha".to_string()),
                ("days".to_string(), "3".to_string()),
                ("aqi".to_string(), "yes".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let client = WeatherApiClient::new("not a url", 3, Duration::from_secs(5));
        assert!(matches!(
            client.forecast_url("k", "Puri"),
            Err(AppError::ConfigError(_))
        ));
    }
}
