pub mod advisory;
pub mod chat;
pub mod option_loader;
pub mod prediction;
pub mod weather;
