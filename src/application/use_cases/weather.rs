use crate::domain::error::{AppError, Result};
use crate::domain::weather::{WeatherRequest, WeatherSnapshot};
use crate::infrastructure::config::WEATHER_API_KEY_VAR;
use crate::infrastructure::weather::WeatherProvider;
use std::sync::Arc;

pub struct WeatherUseCase {
    provider: Arc<dyn WeatherProvider + Send + Sync>,
    api_key: Option<String>,
}

impl WeatherUseCase {
    pub fn new(provider: Arc<dyn WeatherProvider + Send + Sync>, api_key: Option<String>) -> Self {
        Self { provider, api_key }
    }

    /// Forecast for the requested location, relayed as-is. Nothing is
    /// sent upstream when the key is missing.
    pub async fn fetch(&self, request: &WeatherRequest) -> Result<WeatherSnapshot> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::WeatherError(format!("{} is not configured", WEATHER_API_KEY_VAR))
        })?;

        let location = request.resolved_location();
        tracing::info!(location = %location, "Fetching weather");

        self.provider.forecast(api_key, location).await
    }
}
