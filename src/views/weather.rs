use crate::error::Result;
use crate::models::WeatherData;
use crate::store::WeatherStore;

use super::{View, ViewContext};

/// Generic message shown when the reading could not be loaded.
pub const WEATHER_ERROR: &str = "Error al cargar el clima";

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherState {
    Loading,
    Ready(WeatherData),
    Failed(String),
}

/// Current-conditions card. The only view with a visible error state and a
/// manual retry.
#[derive(Debug, Clone)]
pub struct WeatherWidget {
    state: WeatherState,
    city: String,
}

impl WeatherWidget {
    pub fn new() -> Self {
        Self {
            state: WeatherState::Loading,
            city: String::new(),
        }
    }

    pub fn state(&self) -> &WeatherState {
        &self.state
    }

    pub async fn fetch(&mut self, store: &WeatherStore, city: &str) {
        self.city = city.to_string();
        self.state = WeatherState::Loading;
        let result = store.current_weather(city).await;
        self.settle(result);
    }

    /// Fetch again for the same city after a failure.
    pub async fn retry(&mut self, store: &WeatherStore) {
        let city = self.city.clone();
        self.fetch(store, &city).await;
    }

    /// Record the outcome of a fetch. Error details go to the log only.
    pub fn settle(&mut self, result: Result<WeatherData>) {
        self.state = match result {
            Ok(data) => WeatherState::Ready(data),
            Err(e) => {
                tracing::error!("Error fetching weather: {}", e);
                WeatherState::Failed(WEATHER_ERROR.to_string())
            }
        };
    }
}

impl Default for WeatherWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl View for WeatherWidget {
    async fn mount(&mut self, ctx: &ViewContext<'_>) {
        self.fetch(&ctx.stores.weather, ctx.city).await;
    }

    fn render(&self) -> String {
        match &self.state {
            WeatherState::Loading => "Clima\nCargando...\n".to_string(),
            WeatherState::Failed(message) => format!("Clima\n☁ {}\n[Reintentar]\n", message),
            WeatherState::Ready(w) => format!(
                "Clima · {}\n{} {}°C  {}\nHumedad: {}%  Viento: {} km/h\n",
                w.city, w.icon, w.temperature, w.condition, w.humidity, w.wind_speed
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::Latency;

    #[tokio::test]
    async fn fetch_shows_reading_for_city() {
        let store = WeatherStore::with_seed(7, Latency::none());
        let mut widget = WeatherWidget::new();

        widget.fetch(&store, "Ciudad de México").await;

        let WeatherState::Ready(data) = widget.state() else {
            panic!("expected a reading, got {:?}", widget.state());
        };
        assert_eq!(data.city, "Ciudad de México");
        assert!(widget.render().starts_with("Clima · Ciudad de México\n"));
    }

    #[tokio::test]
    async fn failure_shows_generic_message_and_retry_recovers() {
        let store = WeatherStore::with_seed(7, Latency::none());
        let mut widget = WeatherWidget::new();
        widget.fetch(&store, "Guadalajara").await;

        widget.settle(Err(Error::not_found("Weather", "Guadalajara")));
        assert_eq!(
            widget.state(),
            &WeatherState::Failed(WEATHER_ERROR.to_string())
        );
        assert!(widget.render().contains("[Reintentar]"));

        widget.retry(&store).await;
        assert!(matches!(widget.state(), WeatherState::Ready(w) if w.city == "Guadalajara"));
    }
}
