use serde::{Deserialize, Serialize};
use validator::Validate;

/// Farm details submitted from the advisory form. Every field is free text
/// and must be non-empty before the request is accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct FarmerData {
    #[validate(length(min = 1))]
    pub user_type: String,
    #[validate(length(min = 1))]
    pub district: String,
    #[validate(length(min = 1))]
    pub crop: String,
    #[validate(length(min = 1))]
    pub season: String,
    #[validate(length(min = 1))]
    pub soil_type: String,
    #[serde(rename = "soilPH")]
    #[validate(length(min = 1))]
    pub soil_ph: String,
    #[validate(length(min = 1))]
    pub area: String,
}

/// Input of the multi-factor yield simulation. Rainfall, temperature and
/// fertilizer are optional; an empty string means "not supplied".
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvancedYieldInput {
    #[validate(length(min = 1))]
    pub crop_type: String,
    #[validate(length(min = 1))]
    pub land_area: String,
    #[validate(length(min = 1))]
    pub district: String,
    #[validate(length(min = 1))]
    pub season: String,
    #[validate(length(min = 1))]
    pub soil_type: String,
    pub rainfall: String,
    pub temperature: String,
    pub fertilizer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimizationInput {
    #[validate(length(min = 1))]
    pub crop_type: String,
    #[validate(length(min = 1))]
    pub land_area: String,
    #[validate(length(min = 1))]
    pub water_available: String,
    pub fertilizer_cost: String,
    pub labor_cost: String,
}

/// Crops with a calibrated base yield. Anything else is `Unspecified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crop {
    Rice,
    ArharTur,
    Groundnut,
    Wheat,
    Maize,
    Unspecified,
}

impl Crop {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Rice" => Crop::Rice,
            "Arhar/Tur" => Crop::ArharTur,
            "Groundnut" => Crop::Groundnut,
            "Wheat" => Crop::Wheat,
            "Maize" => Crop::Maize,
            _ => Crop::Unspecified,
        }
    }

    /// Base yield in quintal per hectare.
    pub fn base_yield(self) -> f64 {
        match self {
            Crop::Rice => 28.5,
            Crop::ArharTur => 8.2,
            Crop::Groundnut => 12.4,
            Crop::Wheat => 22.1,
            Crop::Maize => 24.3,
            Crop::Unspecified => 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Kharif,
    Rabi,
    Zaid,
    Unspecified,
}

impl Season {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Kharif" => Season::Kharif,
            "Rabi" => Season::Rabi,
            "Zaid" => Season::Zaid,
            _ => Season::Unspecified,
        }
    }

    /// Multiplier used by the baseline yield estimate.
    pub fn yield_multiplier(self) -> f64 {
        match self {
            Season::Kharif => 1.1,
            Season::Rabi => 1.05,
            Season::Zaid | Season::Unspecified => 0.95,
        }
    }

    /// Multiplier used by the yield simulation. Zaid is not boosted.
    pub fn simulation_multiplier(self) -> f64 {
        match self {
            Season::Kharif => 1.2,
            Season::Rabi => 1.1,
            Season::Zaid | Season::Unspecified => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoilKind {
    Alluvial,
    Unspecified,
}

impl SoilKind {
    pub fn from_label(label: &str) -> Self {
        match label {
            "ALLUVIAL SOIL" => SoilKind::Alluvial,
            _ => SoilKind::Unspecified,
        }
    }

    pub fn simulation_multiplier(self) -> f64 {
        match self {
            SoilKind::Alluvial => 1.15,
            SoilKind::Unspecified => 1.0,
        }
    }
}
