use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{LLMConfig, LLMProvider};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "agri-advisor.toml";
pub const CONFIG_PATH_VAR: &str = "AGRI_ADVISOR_CONFIG";
pub const WEATHER_API_KEY_VAR: &str = "WEATHER_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsSettings {
    /// URL or filesystem path of the reference CSV.
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSettings {
    pub base_url: String,
    pub days: u8,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSettings {
    pub provider: LLMProvider,
    /// Empty means the provider's public endpoint.
    pub base_url: String,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionSettings {
    /// Fixed seed for the simulated yield draws; unset draws from entropy.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub options: OptionsSettings,
    pub weather: WeatherSettings,
    pub chat: ChatSettings,
    pub prediction: PredictionSettings,
    pub logging: LoggingSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 3001,
            },
            options: OptionsSettings {
                source: "data/odisha-crop-data.csv".to_string(),
            },
            weather: WeatherSettings {
                base_url: "https://api.weatherapi.com/v1".to_string(),
                days: 3,
                timeout_secs: 30,
            },
            chat: ChatSettings {
                provider: LLMProvider::Gemini,
                base_url: String::new(),
                model: "gemini-2.5-flash".to_string(),
                max_tokens: Some(1024),
                temperature: Some(0.7),
                timeout_secs: 120,
            },
            prediction: PredictionSettings::default(),
            logging: LoggingSettings {
                filter: "info".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Defaults, then the TOML file, then `AGRI_*` environment variables
    /// (`__` separates nested keys, e.g. `AGRI_SERVER__PORT=8080`).
    pub fn figment(config_path: Option<PathBuf>) -> Figment {
        let path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("AGRI_").split("__"))
    }

    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
        Self::figment(path)
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))
    }
}

/// Server-side secrets. API keys never come from config files or clients.
pub struct ConfigService {
    config: AppConfig,
}

impl ConfigService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Load `.env` (if any), then the layered configuration.
    pub fn from_environment() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Ok(Self::new(AppConfig::load()?))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn weather_api_key(&self) -> Option<String> {
        read_secret(WEATHER_API_KEY_VAR)
    }

    pub fn llm_config(&self) -> LLMConfig {
        let chat = &self.config.chat;
        let base_url = if chat.base_url.trim().is_empty() {
            chat.provider.default_base_url().to_string()
        } else {
            chat.base_url.clone()
        };

        LLMConfig {
            provider: chat.provider,
            base_url,
            model: chat.model.clone(),
            api_key: read_secret(chat.provider.api_key_var()),
            max_tokens: chat.max_tokens,
            temperature: chat.temperature,
        }
    }
}

fn read_secret(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.weather.days, 3);
        assert_eq!(config.chat.provider, LLMProvider::Gemini);
        assert!(config.prediction.seed.is_none());
    }

    #[test]
    fn test_toml_and_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "advisor.toml",
                r#"
                [server]
                port = 8080

                [options]
                source = "https://example.org/data/odisha-crop-data.csv"

                [chat]
                provider = "openrouter"
                "#,
            )?;
            jail.set_env("AGRI_PREDICTION__SEED", "42");
            jail.set_env("AGRI_SERVER__HOST", "0.0.0.0");

            let config: AppConfig = AppConfig::figment(Some("advisor.toml".into())).extract()?;
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.prediction.seed, Some(42));
            assert_eq!(config.chat.provider, LLMProvider::OpenRouter);
            assert_eq!(config.weather.base_url, "https://api.weatherapi.com/v1");
            Ok(())
        });
    }

    #[test]
    fn test_llm_config_uses_provider_endpoint() {
        let mut config = AppConfig::default();
        config.chat.provider = LLMProvider::OpenRouter;
        let llm = ConfigService::new(config).llm_config();
        assert_eq!(llm.base_url, "https://openrouter.ai/api/v1");
    }
}
