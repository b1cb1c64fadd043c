use serde::{Deserialize, Serialize};

/// Multipliers that produced a baseline yield estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldFactors {
    pub base: f64,
    pub season: f64,
    pub ph: f64,
}

/// Baseline yield in quintal per hectare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldEstimate {
    pub value: f64,
    pub formatted: String,
    pub factors: YieldFactors,
}

/// Predicted yield against the fixed-ratio district average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictComparison {
    pub district_average: f64,
    pub formatted: String,
    pub above_average_pct: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldReport {
    pub estimate: YieldEstimate,
    pub comparison: DistrictComparison,
}

/// Multipliers applied on top of the random base of the yield simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationFactors {
    pub random_base: f64,
    pub season: f64,
    pub soil: f64,
    pub rainfall: f64,
    pub temperature: f64,
}

impl SimulationFactors {
    /// Product of the input-driven multipliers, without the random base.
    pub fn multiplier(&self) -> f64 {
        self.season * self.soil * self.rainfall * self.temperature
    }

    pub fn per_hectare(&self) -> f64 {
        self.random_base * self.season * self.soil * self.rainfall * self.temperature
    }
}

/// Total simulated yield for the land area. `range` is the span the value
/// can take for the same inputs, since the base is drawn at random.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedYieldResult {
    pub total_yield: f64,
    pub formatted: String,
    pub range: (f64, f64),
    pub factors: SimulationFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub water_efficiency: String,
    pub estimated_yield: String,
    pub total_cost: f64,
    pub revenue: String,
    pub profit: String,
    pub recommendations: Vec<String>,
}
