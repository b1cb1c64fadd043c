//! Heuristic yield and profitability estimates.
//!
//! The baseline estimate is deterministic. The simulation and optimization
//! paths draw a random base in `[3, 8)` quintal per hectare, so for a fixed
//! input they describe a range rather than a point; the engine owns a
//! seedable RNG so runs can be reproduced.

use crate::domain::error::Result;
use crate::domain::farm::{
    AdvancedYieldInput, Crop, FarmerData, OptimizationInput, Season, SoilKind,
};
use crate::domain::prediction::{
    AdvancedYieldResult, DistrictComparison, OptimizationResult, SimulationFactors,
    YieldEstimate, YieldFactors, YieldReport,
};
use crate::shared::numeric::{format_fixed, parse_float, parse_optional, round_to};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use std::sync::Mutex;
use validator::Validate;

/// District average is a fixed share of the predicted yield.
pub const DISTRICT_AVERAGE_RATIO: f64 = 0.85;

/// Market price used for revenue, per quintal.
pub const PRICE_PER_QUINTAL: f64 = 2000.0;

/// Span of the random per-hectare base, in quintal.
pub const RANDOM_BASE_RANGE: Range<f64> = 3.0..8.0;

pub const OPTIMIZATION_RECOMMENDATIONS: [&str; 4] = [
    "Consider drip irrigation to save 30% water",
    "Apply organic fertilizer for better soil health",
    "Rotate crops to maintain soil nutrients",
    "Use weather-based irrigation scheduling",
];

/// 1.15 inside the optimal band, 1.05 in the tolerable band, 0.9 otherwise.
/// NaN falls through to 0.9.
pub fn ph_multiplier(ph: f64) -> f64 {
    if (6.0..=7.0).contains(&ph) {
        1.15
    } else if (5.5..=7.5).contains(&ph) {
        1.05
    } else {
        0.9
    }
}

pub fn predict_yield(data: &FarmerData) -> YieldEstimate {
    let factors = YieldFactors {
        base: Crop::from_label(&data.crop).base_yield(),
        season: Season::from_label(&data.season).yield_multiplier(),
        ph: ph_multiplier(parse_float(&data.soil_ph)),
    };
    let value = factors.base * factors.season * factors.ph;

    YieldEstimate {
        value,
        formatted: format_fixed(value, 2),
        factors,
    }
}

/// Compare a displayed (two-decimal) prediction with the district average.
pub fn district_comparison(predicted: &str) -> DistrictComparison {
    let predicted = parse_float(predicted);
    let district_average = round_to(predicted * DISTRICT_AVERAGE_RATIO, 2);
    let formatted = format_fixed(district_average, 2);
    let above = (predicted - district_average) / district_average * 100.0;

    DistrictComparison {
        district_average,
        formatted,
        above_average_pct: format_fixed(above, 1),
    }
}

pub fn simulate_yield<R: Rng + ?Sized>(
    input: &AdvancedYieldInput,
    rng: &mut R,
) -> AdvancedYieldResult {
    let random_base = rng.gen_range(RANDOM_BASE_RANGE);

    let rainfall = match parse_optional(&input.rainfall) {
        Some(mm) if mm > 100.0 && mm < 200.0 => 1.1,
        _ => 1.0,
    };
    let temperature = match parse_optional(&input.temperature) {
        Some(celsius) if celsius > 20.0 && celsius < 30.0 => 1.05,
        _ => 1.0,
    };

    let factors = SimulationFactors {
        random_base,
        season: Season::from_label(&input.season).simulation_multiplier(),
        soil: SoilKind::from_label(&input.soil_type).simulation_multiplier(),
        rainfall,
        temperature,
    };

    let area = parse_float(&input.land_area);
    let total_yield = area * factors.per_hectare();
    let scale = area * factors.multiplier();

    AdvancedYieldResult {
        total_yield,
        formatted: format_fixed(total_yield, 2),
        range: (scale * RANDOM_BASE_RANGE.start, scale * RANDOM_BASE_RANGE.end),
        factors,
    }
}

pub fn optimize_resources<R: Rng + ?Sized>(
    input: &OptimizationInput,
    rng: &mut R,
) -> OptimizationResult {
    let area = parse_float(&input.land_area);
    let water = parse_float(&input.water_available);
    let fertilizer = parse_optional(&input.fertilizer_cost).unwrap_or(0.0);
    let labor = parse_optional(&input.labor_cost).unwrap_or(0.0);

    let estimated_yield = format_fixed(area * rng.gen_range(RANDOM_BASE_RANGE), 2);
    let total_cost = fertilizer + labor;
    let revenue = parse_float(&estimated_yield) * PRICE_PER_QUINTAL;
    let profit = revenue - total_cost;

    OptimizationResult {
        water_efficiency: format_fixed(water / area, 2),
        estimated_yield,
        total_cost,
        revenue: format_fixed(revenue, 2),
        profit: format_fixed(profit, 2),
        recommendations: OPTIMIZATION_RECOMMENDATIONS
            .iter()
            .map(|r| r.to_string())
            .collect(),
    }
}

/// Validating front door to the heuristics. Invalid input never reaches a
/// formula or the RNG.
pub struct PredictionEngine {
    rng: Mutex<StdRng>,
}

impl PredictionEngine {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn yield_report(&self, data: &FarmerData) -> Result<YieldReport> {
        data.validate()?;
        let estimate = predict_yield(data);
        let comparison = district_comparison(&estimate.formatted);

        tracing::debug!(
            crop = %data.crop,
            season = %data.season,
            predicted = %estimate.formatted,
            "Yield estimated"
        );

        Ok(YieldReport {
            estimate,
            comparison,
        })
    }

    pub fn advanced_yield(&self, input: &AdvancedYieldInput) -> Result<AdvancedYieldResult> {
        input.validate()?;
        let result = simulate_yield(input, &mut *self.lock_rng());

        tracing::debug!(
            crop = %input.crop_type,
            total = %result.formatted,
            "Yield simulated"
        );

        Ok(result)
    }

    pub fn optimize(&self, input: &OptimizationInput) -> Result<OptimizationResult> {
        input.validate()?;
        Ok(optimize_resources(input, &mut *self.lock_rng()))
    }

    fn lock_rng(&self) -> std::sync::MutexGuard<'_, StdRng> {
        // A poisoned RNG is still a valid RNG.
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;

    fn farmer(crop: &str, season: &str, ph: &str) -> FarmerData {
        FarmerData {
            user_type: "Farmer".into(),
            district: "Khordha".into(),
            crop: crop.into(),
            season: season.into(),
            soil_type: "RED SOIL".into(),
            soil_ph: ph.into(),
            area: "2".into(),
        }
    }

    fn advanced() -> AdvancedYieldInput {
        AdvancedYieldInput {
            crop_type: "Rice".into(),
            land_area: "2".into(),
            district: "Puri".into(),
            season: "Kharif".into(),
            soil_type: "ALLUVIAL SOIL".into(),
            rainfall: "150".into(),
            temperature: "25".into(),
            fertilizer: String::new(),
        }
    }

    #[test]
    fn test_rice_kharif_optimal_ph() {
        let estimate = predict_yield(&farmer("Rice", "Kharif", "6.5"));
        assert!((estimate.value - 36.0525).abs() < 1e-9);
        assert_eq!(estimate.formatted, "36.05");
        assert_eq!(
            estimate.factors,
            YieldFactors {
                base: 28.5,
                season: 1.1,
                ph: 1.15
            }
        );
    }

    #[test]
    fn test_unknown_crop_zaid_acidic() {
        let estimate = predict_yield(&farmer("UnknownCrop", "Zaid", "4.0"));
        assert!((estimate.value - 12.825).abs() < 1e-9);
        assert_eq!(estimate.formatted, "12.83");
    }

    #[test]
    fn test_ph_bands() {
        assert_eq!(ph_multiplier(6.0), 1.15);
        assert_eq!(ph_multiplier(7.0), 1.15);
        assert_eq!(ph_multiplier(5.5), 1.05);
        assert_eq!(ph_multiplier(7.5), 1.05);
        assert_eq!(ph_multiplier(7.51), 0.9);
        assert_eq!(ph_multiplier(f64::NAN), 0.9);
    }

    #[test]
    fn test_non_numeric_ph_is_not_rejected() {
        let estimate = predict_yield(&farmer("Wheat", "Rabi", "acidic"));
        assert_eq!(estimate.factors.ph, 0.9);
        assert_eq!(estimate.formatted, format_fixed(22.1 * 1.05 * 0.9, 2));
    }

    #[test]
    fn test_district_average() {
        let comparison = district_comparison("36.05");
        assert_eq!(comparison.district_average, 30.64);
        assert_eq!(comparison.formatted, "30.64");
        assert_eq!(comparison.above_average_pct, "17.7");
    }

    #[test]
    fn test_district_average_of_nan() {
        let comparison = district_comparison("NaN");
        assert_eq!(comparison.formatted, "NaN");
        assert_eq!(comparison.above_average_pct, "NaN");
    }

    #[test]
    fn test_simulation_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let input = advanced();
        let per_hectare_scale = 1.2 * 1.15 * 1.1 * 1.05;

        for _ in 0..200 {
            let result = simulate_yield(&input, &mut rng);
            assert!(result.total_yield >= 2.0 * 3.0 * per_hectare_scale - 1e-9);
            assert!(result.total_yield <= 2.0 * 8.0 * per_hectare_scale + 1e-9);
            assert!((result.range.0 - 2.0 * 3.0 * per_hectare_scale).abs() < 1e-9);
            assert!((result.range.1 - 2.0 * 8.0 * per_hectare_scale).abs() < 1e-9);
        }
    }

    #[test]
    fn test_simulation_multipliers() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut input = advanced();
        input.season = "Zaid".into();
        input.soil_type = "RED SOIL".into();
        input.rainfall = "200".into();
        input.temperature = String::new();

        let result = simulate_yield(&input, &mut rng);
        assert_eq!(result.factors.season, 1.0);
        assert_eq!(result.factors.soil, 1.0);
        assert_eq!(result.factors.rainfall, 1.0);
        assert_eq!(result.factors.temperature, 1.0);
        assert!((result.total_yield - 2.0 * result.factors.random_base).abs() < 1e-9);
    }

    #[test]
    fn test_optimization_arithmetic() {
        let mut rng = StdRng::seed_from_u64(3);
        let input = OptimizationInput {
            crop_type: "Rice".into(),
            land_area: "5".into(),
            water_available: "10000".into(),
            fertilizer_cost: "5000".into(),
            labor_cost: String::new(),
        };

        let result = optimize_resources(&input, &mut rng);
        let estimated = parse_float(&result.estimated_yield);
        assert!((15.0..=40.0).contains(&estimated));
        assert_eq!(result.water_efficiency, "2000.00");
        assert_eq!(result.total_cost, 5000.0);
        assert_eq!(result.revenue, format_fixed(estimated * 2000.0, 2));
        assert_eq!(result.profit, format_fixed(estimated * 2000.0 - 5000.0, 2));
        assert_eq!(result.recommendations.len(), 4);
    }

    #[test]
    fn test_seeded_engines_agree() {
        let a = PredictionEngine::new(Some(42));
        let b = PredictionEngine::new(Some(42));
        let input = advanced();

        for _ in 0..5 {
            assert_eq!(
                a.advanced_yield(&input).unwrap(),
                b.advanced_yield(&input).unwrap()
            );
        }
    }

    #[test]
    fn test_invalid_input_never_draws() {
        let a = PredictionEngine::new(Some(9));
        let b = PredictionEngine::new(Some(9));

        let mut incomplete = advanced();
        incomplete.district.clear();
        let err = a.advanced_yield(&incomplete).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        // `a` skipped a draw, so both engines still produce the same value.
        assert_eq!(
            a.advanced_yield(&advanced()).unwrap(),
            b.advanced_yield(&advanced()).unwrap()
        );
    }

    #[test]
    fn test_yield_report_rejects_empty_field() {
        let engine = PredictionEngine::new(None);
        let mut data = farmer("Rice", "Kharif", "6.5");
        data.area.clear();
        assert!(engine.yield_report(&data).unwrap_err().is_validation());

        data.area = "1.5".into();
        let report = engine.yield_report(&data).unwrap();
        assert_eq!(report.estimate.formatted, "36.05");
        assert_eq!(report.comparison.formatted, "30.64");
    }
}
