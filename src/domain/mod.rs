pub mod advisory;
pub mod error;
pub mod farm;
pub mod llm_config;
pub mod options;
pub mod prediction;
pub mod weather;

// Reference dataset parsing
pub mod csv;
