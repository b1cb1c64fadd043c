pub mod use_cases;

pub use use_cases::advisory::AdvisoryUseCase;
pub use use_cases::chat::ChatUseCase;
pub use use_cases::option_loader::OptionLoaderUseCase;
pub use use_cases::prediction::PredictionEngine;
pub use use_cases::weather::WeatherUseCase;
