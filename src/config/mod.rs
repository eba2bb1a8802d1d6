pub mod env;
mod loader;

pub use env::{AppConfig, DetectorConfig, DirectoryConfig};
pub use loader::load_config;
