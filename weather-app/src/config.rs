use common::errors::AppError;
use std::env;

pub struct Config {
    pub port: u16,
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// The provider credential is required; everything else has a default.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = env::var("OPENWEATHERMAP_API_KEY")
            .map_err(|_| AppError::config("OPENWEATHERMAP_API_KEY is required"))?;

        Ok(Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            api_key,
            base_url: env::var("OPENWEATHERMAP_URL")
                .unwrap_or_else(|_| "https://api.openweathermap.org/data/2.5".to_string()),
        })
    }
}
