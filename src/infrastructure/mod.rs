pub mod config;
pub mod csv;
pub mod llm_clients;
pub mod logging;
pub mod response;
pub mod weather;
