use std::time::Duration;

/// Scale factor applied to every simulated store delay.
///
/// `Latency::default()` keeps the nominal timings; `Latency::none()`
/// resolves every operation immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Latency {
    scale: f64,
}

impl Latency {
    pub const fn none() -> Self {
        Self { scale: 0.0 }
    }

    pub const fn realistic() -> Self {
        Self { scale: 1.0 }
    }

    /// Negative or non-finite scales are treated as zero.
    pub fn scaled(scale: f64) -> Self {
        let scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
        Self { scale }
    }

    pub fn is_disabled(&self) -> bool {
        self.scale == 0.0
    }

    /// The delay actually applied for a nominal `base` delay.
    pub fn effective(&self, base: Duration) -> Duration {
        if self.is_disabled() {
            Duration::ZERO
        } else {
            base.mul_f64(self.scale)
        }
    }

    /// Sleep for the scaled `base` delay.
    pub async fn wait(&self, base: Duration) {
        let delay = self.effective(base);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::realistic()
    }
}
