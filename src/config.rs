//! Runtime configuration loaded from environment variables.

use std::path::PathBuf;

use crate::store::Latency;

/// Default city for the weather widget. The JSON API has its own default,
/// `store::DEFAULT_WEATHER_CITY`.
pub const DEFAULT_CITY: &str = "Ciudad de México";

/// Default port for `edumanage serve`.
pub const DEFAULT_PORT: u16 = 17020;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Multiplier for simulated store delays (from EDUMANAGE_LATENCY_SCALE).
    /// `0` disables the delays entirely.
    pub latency: Latency,
    /// Where the session record lives (from EDUMANAGE_SESSION_PATH).
    /// Falls back to the platform data directory.
    pub session_path: Option<PathBuf>,
    /// City shown by the weather widget (from EDUMANAGE_CITY)
    pub city: String,
    /// Port for the JSON API (from EDUMANAGE_PORT)
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let latency = std::env::var("EDUMANAGE_LATENCY_SCALE")
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|scale| scale.is_finite() && *scale >= 0.0)
            .map(Latency::scaled)
            .unwrap_or_default();

        let session_path = std::env::var("EDUMANAGE_SESSION_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let city = std::env::var("EDUMANAGE_CITY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CITY.to_string());

        let port = std::env::var("EDUMANAGE_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            latency,
            session_path,
            city,
            port,
        }
    }

    /// Configuration with delays switched off (for tests).
    pub fn instant() -> Self {
        Self {
            latency: Latency::none(),
            session_path: None,
            city: DEFAULT_CITY.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
