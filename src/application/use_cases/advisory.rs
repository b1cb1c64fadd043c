use crate::application::use_cases::prediction::PredictionEngine;
use crate::application::use_cases::weather::WeatherUseCase;
use crate::domain::advisory::{
    AdvisorySource, CropProfile, CropRecommendation, DashboardReport, DashboardRequest, Irrigation,
    Language, RecommendationQuery, Suitability, WeatherAdvisory,
};
use crate::domain::error::Result;
use crate::domain::farm::{Crop, Season};
use crate::domain::weather::{WeatherRequest, WeatherSnapshot};
use crate::shared::numeric::{parse_float, parse_int};
use std::sync::Arc;

pub fn season_advisory(season: Season, language: Language) -> &'static str {
    match (language, season) {
        (Language::En, Season::Rabi) => "Dry winter conditions. Temperature range 15-28°C. Irrigate every 7-10 days. Watch for frost in January.",
        (Language::En, Season::Zaid) => "Summer crop season. High temperatures expected (32-38°C). Increase irrigation frequency to 5-7 days.",
        (Language::En, Season::Kharif | Season::Unspecified) => "Monsoon season active. Moderate rainfall expected (120-150mm this week). Maintain proper drainage to prevent waterlogging.",
        (Language::Od, Season::Rabi) => "ଶୁଷ୍କ ଶୀତ ପରିସ୍ଥିତି। ତାପମାତ୍ରା ପରିସର 15-28°C। ପ୍ରତି 7-10 ଦିନରେ ସେଚନ କରନ୍ତୁ। ଜାନୁଆରୀରେ ହିମ ପାଇଁ ସତର୍କ ରହନ୍ତୁ।",
        (Language::Od, Season::Zaid) => "ଗ୍ରୀଷ୍ମ ଫସଲ ଋତୁ। ଉଚ୍ଚ ତାପମାତ୍ରା ଆଶା କରାଯାଉଛି (32-38°C)। ସେଚନ ଆବୃତ୍ତି 5-7 ଦିନକୁ ବୃଦ୍ଧି କରନ୍ତୁ।",
        (Language::Od, Season::Kharif | Season::Unspecified) => "ମୌସୁମୀ ଋତୁ ସକ୍ରିୟ। ମଧ୍ୟମ ବୃଷ୍ଟିପାତ ଆଶା କରାଯାଉଛି (ଏହି ସପ୍ତାହରେ 120-150mm)। ଜଳଜମା ରୋକିବା ପାଇଁ ଉପଯୁକ୍ତ ଜଳ ନିଷ୍କାସନ ବଜାୟ ରଖନ୍ତୁ।",
        (Language::Hi, Season::Rabi) => "शुष्क सर्दी की स्थिति। तापमान सीमा 15-28°C। हर 7-10 दिनों में सिंचाई करें। जनवरी में पाले के लिए सावधान रहें।",
        (Language::Hi, Season::Zaid) => "गर्मी की फसल का मौसम। उच्च तापमान की उम्मीद (32-38°C)। सिंचाई की आवृत्ति 5-7 दिनों तक बढ़ाएं।",
        (Language::Hi, Season::Kharif | Season::Unspecified) => "मानसून सीजन सक्रिय। मध्यम वर्षा की उम्मीद (इस सप्ताह 120-150mm)। जलभराव को रोकने के लिए उचित जल निकासी बनाए रखें।",
    }
}

enum PhBand {
    Acidic,
    Alkaline,
    Balanced,
}

/// Amendment advice from soil pH. Unparseable pH reads as balanced.
pub fn soil_recommendation(ph: &str, language: Language) -> &'static str {
    let ph = parse_float(ph);
    let band = if ph < 6.0 {
        PhBand::Acidic
    } else if ph > 7.5 {
        PhBand::Alkaline
    } else {
        PhBand::Balanced
    };

    match (language, band) {
        (Language::En, PhBand::Acidic) => "Soil is acidic. Add lime compost (250kg/hectare). Increase organic fertilizer application.",
        (Language::En, PhBand::Alkaline) => "Soil is alkaline. Apply gypsum (200kg/hectare). Add farmyard manure to balance pH.",
        (Language::En, PhBand::Balanced) => "Soil health is excellent! pH is well balanced. Continue regular organic matter addition.",
        (Language::Od, PhBand::Acidic) => "ମାଟି ଅମ୍ଳୀୟ। ଚୂନ କମ୍ପୋଷ୍ଟ ଯୋଗ କରନ୍ତୁ (250kg/ହେକ୍ଟର)। ଜୈବିକ ସାର ବୃଦ୍ଧି କରନ୍ତୁ।",
        (Language::Od, PhBand::Alkaline) => "ମାଟି କ୍ଷାରୀୟ। ଜିପସମ୍ ପ୍ରୟୋଗ କରନ୍ତୁ (200kg/ହେକ୍ଟର)। ଗୋବର ସାର ଯୋଗ କରନ୍ତୁ।",
        (Language::Od, PhBand::Balanced) => "ମାଟି ସ୍ୱାସ୍ଥ୍ୟ ଉତ୍ତମ! pH ସନ୍ତୁଳିତ ଅଛି। ନିୟମିତ ଜୈବିକ ପଦାର୍ଥ ଯୋଗ ଜାରି ରଖନ୍ତୁ।",
        (Language::Hi, PhBand::Acidic) => "मिट्टी अम्लीय है। चूना कम्पोस्ट जोड़ें (250kg/हेक्टेयर)। जैविक उर्वरक बढ़ाएं।",
        (Language::Hi, PhBand::Alkaline) => "मिट्टी क्षारीय है। जिप्सम डालें (200kg/हेक्टेयर)। गोबर की खाद जोड़ें।",
        (Language::Hi, PhBand::Balanced) => "मिट्टी स्वास्थ्य उत्कृष्ट है! pH अच्छी तरह संतुलित है। नियमित जैविक पदार्थ जोड़ना जारी रखें।",
    }
}

pub fn fertilizer_plan(crop: Crop, language: Language) -> &'static str {
    match (language, crop) {
        (Language::En, Crop::Rice) => "Week 1: Apply Urea 60kg/ha + DAP 50kg/ha. Week 4: Top dress with Urea 40kg/ha. Week 8: Apply Potash 30kg/ha.",
        (Language::En, _) => "Week 1: Apply NPK (20:20:20) at 100kg/ha. Week 3: Top dress with Urea 40kg/ha. Irrigate every 7-10 days.",
        (Language::Od, Crop::Rice) => "ସପ୍ତାହ 1: ୟୁରିଆ 60kg/ହେକ୍ଟର + DAP 50kg/ହେକ୍ଟର ପ୍ରୟୋଗ କରନ୍ତୁ। ସପ୍ତାହ 4: ୟୁରିଆ 40kg/ହେକ୍ଟର ଟପ୍ ଡ୍ରେସ୍ କରନ୍ତୁ। ସପ୍ତାହ 8: ପୋଟାଶ୍ 30kg/ହେକ୍ଟର ପ୍ରୟୋଗ କରନ୍ତୁ।",
        (Language::Od, _) => "ସପ୍ତାହ 1: NPK (20:20:20) 100kg/ହେକ୍ଟର ପ୍ରୟୋଗ କରନ୍ତୁ। ସପ୍ତାହ 3: ୟୁରିଆ 40kg/ହେକ୍ଟର ଟପ୍ ଡ୍ରେସ୍ କରନ୍ତୁ। ପ୍ରତି 7-10 ଦିନରେ ସେଚନ କରନ୍ତୁ।",
        (Language::Hi, Crop::Rice) => "सप्ताह 1: यूरिया 60kg/हेक्टेयर + DAP 50kg/हेक्टेयर लगाएं। सप्ताह 4: यूरिया 40kg/हेक्टेयर से टॉप ड्रेस करें। सप्ताह 8: पोटाश 30kg/हेक्टेयर लगाएं।",
        (Language::Hi, _) => "सप्ताह 1: NPK (20:20:20) 100kg/हेक्टेयर पर लगाएं। सप्ताह 3: यूरिया 40kg/हेक्टेयर से टॉप ड्रेस करें। हर 7-10 दिनों में सिंचाई करें।",
    }
}

/// One-line advisory from live conditions, or `None` when the snapshot
/// lacks current conditions or today's forecast. Hindi uses the English line.
pub fn live_weather_advisory(snapshot: &WeatherSnapshot, language: Language) -> Option<String> {
    let current = snapshot.current()?;
    let rain = snapshot.chance_of_rain_today()?;

    let condition = current.condition.as_deref().unwrap_or("Clear conditions");
    let humidity = current
        .humidity
        .map(|h| h.to_string())
        .unwrap_or_else(|| "-".to_string());

    let text = match language {
        Language::Od => {
            let advice = if current.temp_c > 35.0 {
                "ସେଚନ ଆବୃତ୍ତି ବୃଦ୍ଧି କରନ୍ତୁ।"
            } else if current.temp_c < 15.0 {
                "ହିମ ପାଇଁ ସତର୍କ ରହନ୍ତୁ।"
            } else {
                "ଫସଲ ପାଇଁ ଉପଯୁକ୍ତ ପରିସ୍ଥିତି।"
            };
            format!(
                "ବର୍ତ୍ତମାନ: {}°C, {}. ବୃଷ୍ଟିର ସମ୍ଭାବନା: {}%. ଆର୍ଦ୍ରତା: {}%. {}",
                current.temp_c, condition, rain, humidity, advice
            )
        }
        Language::En | Language::Hi => {
            let advice = if current.temp_c > 35.0 {
                "Increase irrigation frequency."
            } else if current.temp_c < 15.0 {
                "Watch for frost damage."
            } else {
                "Favorable conditions for crops."
            };
            format!(
                "Current: {}°C, {}. Rain chance: {}%. Humidity: {}%. {}",
                current.temp_c, condition, rain, humidity, advice
            )
        }
    };

    Some(text)
}

pub fn crop_catalogue() -> Vec<CropProfile> {
    let entry = |crop: &str,
                 season: &str,
                 water_req: &str,
                 duration: &str,
                 yield_range: &str,
                 suitability: &str,
                 tips: &str| CropProfile {
        crop: crop.to_string(),
        season: season.to_string(),
        water_req: water_req.to_string(),
        duration: duration.to_string(),
        yield_range: yield_range.to_string(),
        suitability: suitability.to_string(),
        tips: tips.to_string(),
    };

    vec![
        entry("Rice", "Kharif", "High", "120-150 days", "40-50 quintals/acre", "Excellent",
            "Best for monsoon season. Requires flooded fields. Recommended varieties: Swarna, MTU-1010"),
        entry("Maize", "Rabi", "Medium", "90-110 days", "30-40 quintals/acre", "Good",
            "Drought tolerant. Good for diversification. Recommended varieties: DHM-117, Hybrid-123"),
        entry("Pulses (Arhar)", "Kharif", "Low", "150-180 days", "8-12 quintals/acre", "Very Good",
            "Nitrogen-fixing crop. Improves soil health. Ideal for mixed cropping."),
        entry("Vegetables", "All Season", "Medium", "60-90 days", "80-120 quintals/acre", "Excellent",
            "High market value. Requires regular care. Good for small landholdings."),
        entry("Sugarcane", "Annual", "High", "12-18 months", "300-400 quintals/acre", "Good",
            "Long duration crop. Requires consistent irrigation. Good returns on investment."),
        entry("Cotton", "Kharif", "Medium", "150-180 days", "15-20 quintals/acre", "Good",
            "Cash crop with good market. Monitor for pest control. Recommended for black soil."),
    ]
}

pub fn suitability(crop: &str, temperature: f64, irrigation: Irrigation) -> Suitability {
    match crop {
        "Rice"
            if (20.0..=35.0).contains(&temperature) && irrigation == Irrigation::Available =>
        {
            Suitability::Favorable
        }
        "Maize" if (18.0..=32.0).contains(&temperature) && irrigation == Irrigation::Medium => {
            Suitability::Favorable
        }
        "Cotton" if temperature > 35.0 => Suitability::Unfavorable,
        "Sugarcane" if irrigation == Irrigation::NotAvailable => Suitability::Unfavorable,
        _ => Suitability::Neutral,
    }
}

/// Temperature counts in whole degrees; text without a leading number
/// matches no rule.
pub fn recommend_crops(query: &RecommendationQuery) -> Vec<CropRecommendation> {
    let temperature = parse_int(&query.temperature);
    crop_catalogue()
        .into_iter()
        .map(|profile| {
            let fit = suitability(&profile.crop, temperature, query.irrigation);
            CropRecommendation { profile, fit }
        })
        .collect()
}

/// Assembles the advisory dashboard: baseline yield, district comparison,
/// soil and fertilizer advice, and a weather advisory that falls back to
/// seasonal text when live weather is unavailable.
pub struct AdvisoryUseCase {
    engine: Arc<PredictionEngine>,
    weather: Arc<WeatherUseCase>,
}

impl AdvisoryUseCase {
    pub fn new(engine: Arc<PredictionEngine>, weather: Arc<WeatherUseCase>) -> Self {
        Self { engine, weather }
    }

    pub async fn dashboard(&self, request: &DashboardRequest) -> Result<DashboardReport> {
        let data = &request.farmer;
        let language = request.language;
        let report = self.engine.yield_report(data)?;
        let season = Season::from_label(&data.season);

        let request = WeatherRequest::for_location(data.district.clone());
        let weather_advisory = match self.weather.fetch(&request).await {
            Ok(snapshot) => match live_weather_advisory(&snapshot, language) {
                Some(text) => WeatherAdvisory {
                    source: AdvisorySource::Live,
                    text,
                },
                None => seasonal(season, language),
            },
            Err(err) => {
                tracing::warn!(
                    district = %data.district,
                    error = %err,
                    "Live weather unavailable, using seasonal advisory"
                );
                seasonal(season, language)
            }
        };

        Ok(DashboardReport {
            estimate: report.estimate,
            comparison: report.comparison,
            weather_advisory,
            soil_recommendation: soil_recommendation(&data.soil_ph, language).to_string(),
            fertilizer_plan: fertilizer_plan(Crop::from_label(&data.crop), language).to_string(),
        })
    }
}

fn seasonal(season: Season, language: Language) -> WeatherAdvisory {
    WeatherAdvisory {
        source: AdvisorySource::Seasonal,
        text: season_advisory(season, language).to_string(),
    }
}
