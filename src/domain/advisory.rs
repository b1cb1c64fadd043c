use serde::{Deserialize, Serialize};

use super::farm::FarmerData;
use super::prediction::{DistrictComparison, YieldEstimate};

/// Language of the advisory texts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    /// Odia
    Od,
    Hi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suitability {
    Favorable,
    Neutral,
    Unfavorable,
}

/// Irrigation availability as offered on the recommendations form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Irrigation {
    #[serde(rename = "Available")]
    Available,
    #[serde(rename = "Medium")]
    Medium,
    #[serde(rename = "Not Available")]
    NotAvailable,
}

impl Default for Irrigation {
    fn default() -> Self {
        Irrigation::Available
    }
}

/// One entry of the static crop catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropProfile {
    pub crop: String,
    pub season: String,
    pub water_req: String,
    pub duration: String,
    #[serde(rename = "yield")]
    pub yield_range: String,
    pub suitability: String,
    pub tips: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRecommendation {
    #[serde(flatten)]
    pub profile: CropProfile,
    pub fit: Suitability,
}

/// Query of the recommendations page. Temperature is free text and only its
/// whole-degree prefix counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationQuery {
    pub temperature: String,
    pub irrigation: Irrigation,
}

impl Default for RecommendationQuery {
    fn default() -> Self {
        Self {
            temperature: "25".to_string(),
            irrigation: Irrigation::Available,
        }
    }
}

/// Farm details plus the language the advisories are written in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardRequest {
    #[serde(flatten)]
    pub farmer: FarmerData,
    #[serde(default)]
    pub language: Language,
}

/// Where the weather advisory text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisorySource {
    Live,
    Seasonal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAdvisory {
    pub source: AdvisorySource,
    pub text: String,
}

/// Everything the advisory dashboard shows for one set of farm details.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub estimate: YieldEstimate,
    pub comparison: DistrictComparison,
    pub weather_advisory: WeatherAdvisory,
    pub soil_recommendation: String,
    pub fertilizer_plan: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_request_language() {
        let request: DashboardRequest =
            serde_json::from_str(r#"{"crop":"Rice","soilPH":"6.5","language":"od"}"#).unwrap();
        assert_eq!(request.language, Language::Od);
        assert_eq!(request.farmer.crop, "Rice");
        assert_eq!(request.farmer.soil_ph, "6.5");

        let request: DashboardRequest = serde_json::from_str(r#"{"crop":"Maize"}"#).unwrap();
        assert_eq!(request.language, Language::En);
    }
}
