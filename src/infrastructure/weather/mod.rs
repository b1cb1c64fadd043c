pub mod weatherapi;

use crate::domain::error::Result;
use crate::domain::weather::WeatherSnapshot;
use async_trait::async_trait;

pub use weatherapi::WeatherApiClient;

#[async_trait]
pub trait WeatherProvider {
    /// Current conditions plus a short forecast for a free-text location.
    async fn forecast(&self, api_key: &str, location: &str) -> Result<WeatherSnapshot>;
}
