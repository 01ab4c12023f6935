pub mod app_config;
pub mod config;
pub mod load_state;
pub mod location;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_API_URL};
pub use load_state::LoadState;
pub use location::{Coordinates, Location, LocationError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
