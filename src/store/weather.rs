use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::models::WeatherData;

use super::Latency;

const CURRENT_DELAY: Duration = Duration::from_millis(800);
const FORECAST_DELAY: Duration = Duration::from_millis(1000);

/// Number of days in a forecast when the caller does not say.
pub const DEFAULT_FORECAST_DAYS: usize = 5;

/// Longest forecast the API will produce.
pub const MAX_FORECAST_DAYS: usize = 16;

/// City the service reports for when the caller names none.
pub const DEFAULT_WEATHER_CITY: &str = "Mexico City";

/// Condition labels paired with their icon glyph.
pub const CONDITIONS: [(&str, &str); 7] = [
    ("Soleado", "☀️"),
    ("Parcialmente nublado", "🌤️"),
    ("Nublado", "☁️"),
    ("Lluvia ligera", "🌦️"),
    ("Lluvia", "🌧️"),
    ("Tormenta", "⛈️"),
    ("Niebla", "🌫️"),
];

/// Synthetic weather source.
///
/// Nothing is fetched: every reading is drawn uniformly at random within
/// fixed ranges. Temperature 18..=32 °C, humidity 40..=79 %, wind
/// 5..=24 km/h.
#[derive(Clone)]
pub struct WeatherStore {
    rng: Arc<Mutex<StdRng>>,
    latency: Latency,
}

impl WeatherStore {
    pub fn new(latency: Latency) -> Self {
        Self {
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
            latency,
        }
    }

    /// A store whose readings are reproducible.
    pub fn with_seed(seed: u64, latency: Latency) -> Self {
        Self {
            rng: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
            latency,
        }
    }

    pub async fn current_weather(&self, city: &str) -> Result<WeatherData> {
        self.latency.wait(CURRENT_DELAY).await;
        Ok(self.reading(city))
    }

    /// `days` independent readings; consecutive days are not correlated.
    pub async fn weather_forecast(&self, city: &str, days: usize) -> Result<Vec<WeatherData>> {
        self.latency.wait(FORECAST_DELAY).await;
        Ok((0..days).map(|_| self.reading(city)).collect())
    }

    fn reading(&self, city: &str) -> WeatherData {
        let mut rng = self.rng.lock().expect("weather rng lock poisoned");
        let (condition, icon) = CONDITIONS[rng.gen_range(0..CONDITIONS.len())];

        WeatherData {
            temperature: rng.gen_range(18..33),
            condition: condition.to_string(),
            humidity: rng.gen_range(40..80),
            wind_speed: rng.gen_range(5..25),
            city: city.to_string(),
            icon: icon.to_string(),
        }
    }
}
