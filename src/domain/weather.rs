use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_LOCATION: &str = "Bhubaneswar";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherRequest {
    #[serde(default)]
    pub location: Option<String>,
}

impl WeatherRequest {
    pub fn for_location(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
        }
    }

    /// Requested location, or the default city when absent or blank.
    pub fn resolved_location(&self) -> &str {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
            .unwrap_or(DEFAULT_LOCATION)
    }
}

/// Upstream forecast payload, passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherSnapshot(pub Value);

/// The handful of current-condition fields the advisories read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub feelslike_c: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_kph: Option<f64>,
    pub precip_mm: Option<f64>,
    pub condition: Option<String>,
}

impl WeatherSnapshot {
    pub fn current(&self) -> Option<CurrentConditions> {
        let current = self.0.get("current")?;
        let number = |key: &str| current.get(key).and_then(Value::as_f64);

        Some(CurrentConditions {
            temp_c: number("temp_c")?,
            feelslike_c: number("feelslike_c"),
            humidity: number("humidity"),
            wind_kph: number("wind_kph"),
            precip_mm: number("precip_mm"),
            condition: current
                .pointer("/condition/text")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    /// Chance of rain for the first forecast day, in percent.
    pub fn chance_of_rain_today(&self) -> Option<f64> {
        self.0
            .pointer("/forecast/forecastday/0/day/daily_chance_of_rain")
            .and_then(Value::as_f64)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WeatherResponse {
    pub weather: WeatherSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_location() {
        assert_eq!(WeatherRequest::default().resolved_location(), "Bhubaneswar");
        assert_eq!(
            WeatherRequest::for_location("  ").resolved_location(),
            "Bhubaneswar"
        );
        assert_eq!(
            WeatherRequest::for_location("Puri, Odisha").resolved_location(),
            "Puri, Odisha"
        );
    }

    #[test]
    fn test_optional_field_access() {
        let snapshot = WeatherSnapshot(json!({
            "current": {
                "temp_c": 31.5,
                "humidity": 70,
                "condition": { "text": "Partly cloudy" }
            },
            "forecast": { "forecastday": [ { "day": { "daily_chance_of_rain": 84 } } ] }
        }));

        let current = snapshot.current().unwrap();
        assert_eq!(current.temp_c, 31.5);
        assert_eq!(current.humidity, Some(70.0));
        assert_eq!(current.wind_kph, None);
        assert_eq!(current.condition.as_deref(), Some("Partly cloudy"));
        assert_eq!(snapshot.chance_of_rain_today(), Some(84.0));
    }

    #[test]
    fn test_missing_sections() {
        let snapshot = WeatherSnapshot(json!({ "location": { "name": "Puri" } }));
        assert!(snapshot.current().is_none());
        assert!(snapshot.chance_of_rain_today().is_none());
    }
}
