use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::application::{
    AdvisoryUseCase, ChatUseCase, OptionLoaderUseCase, PredictionEngine, WeatherUseCase,
};
use crate::domain::error::Result;
use crate::infrastructure::config::ConfigService;
use crate::infrastructure::csv::{source_for, SourceLocation};
use crate::infrastructure::llm_clients::RouterClient;
use crate::infrastructure::logging::init_tracing;
use crate::infrastructure::weather::WeatherApiClient;
use crate::interfaces::http::{start_server, LogEntry};

/// Shared services, built once at startup and handed to every request.
pub struct AppContext {
    pub option_loader: OptionLoaderUseCase,
    pub engine: Arc<PredictionEngine>,
    pub weather: Arc<WeatherUseCase>,
    pub chat: ChatUseCase,
    pub advisory: AdvisoryUseCase,
}

impl AppContext {
    pub fn from_config(config_service: &ConfigService) -> Result<Self> {
        let config = config_service.config();

        let location = SourceLocation::parse(&config.options.source)?;
        let option_loader = OptionLoaderUseCase::new(source_for(&location, reqwest::Client::new()));

        let engine = Arc::new(PredictionEngine::new(config.prediction.seed));

        let weather_client = WeatherApiClient::new(
            config.weather.base_url.clone(),
            config.weather.days,
            Duration::from_secs(config.weather.timeout_secs),
        );
        let weather = Arc::new(WeatherUseCase::new(
            Arc::new(weather_client),
            config_service.weather_api_key(),
        ));

        let llm_client = Arc::new(RouterClient::new(Duration::from_secs(
            config.chat.timeout_secs,
        )));
        let chat = ChatUseCase::new(llm_client, config_service.llm_config());

        let advisory = AdvisoryUseCase::new(engine.clone(), weather.clone());

        Ok(Self {
            option_loader,
            engine,
            weather,
            chat,
            advisory,
        })
    }
}

pub async fn run() -> std::io::Result<()> {
    let config_service = ConfigService::from_environment()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    init_tracing(&config_service.config().logging.filter);

    let context = AppContext::from_config(&config_service)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    let server = &config_service.config().server;
    if config_service.weather_api_key().is_none() {
        tracing::warn!("WEATHER_API_KEY is not set; live weather is disabled");
    }
    if context.chat.config().api_key.is_none() {
        tracing::warn!(
            provider = %context.chat.config().provider,
            "{} is not set; chat is disabled",
            context.chat.config().provider.api_key_var()
        );
    }

    tracing::info!(
        host = %server.host,
        port = server.port,
        options = %config_service.config().options.source,
        "Starting agri-advisor"
    );

    let logs: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));
    start_server(Arc::new(context), logs, &server.host, server.port)?.await
}
