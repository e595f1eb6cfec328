// Env-driven configuration and logging init.
mod logging;
mod settings;

pub use logging::init_logging;
pub use settings::{AppSettings, ConfigError};
