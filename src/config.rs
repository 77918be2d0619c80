//! Simulation parameters.
//!
//! The grid spacing and the time step are both fixed to one, so the wave
//! speed is also the Courant number of the scheme.

use std::str::FromStr;

use crate::error::{Error, Result};

/// Environment variable overriding [`SimConfig::wave_speed`].
pub const ENV_WAVE_SPEED: &str = "INFO_WAVE_SPEED";
/// Environment variable overriding [`SimConfig::sample_count`].
pub const ENV_SAMPLE_COUNT: &str = "INFO_WAVE_SAMPLES";
/// Environment variable overriding [`SimConfig::step_count`].
pub const ENV_STEP_COUNT: &str = "INFO_WAVE_STEPS";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// Propagation speed `c`.
    pub wave_speed: f64,
    /// Number of samples on the ring, spread evenly over `[-2, 2]`.
    pub sample_count: usize,
    /// Number of leapfrog steps, one energy value each.
    pub step_count: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            wave_speed: 1.0,
            sample_count: 400,
            step_count: 800,
        }
    }
}

impl SimConfig {
    pub fn new(wave_speed: f64, sample_count: usize, step_count: usize) -> Self {
        Self {
            wave_speed,
            sample_count,
            step_count,
        }
    }

    pub fn with_wave_speed(mut self, wave_speed: f64) -> Self {
        self.wave_speed = wave_speed;
        self
    }

    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn with_step_count(mut self, step_count: usize) -> Self {
        self.step_count = step_count;
        self
    }

    /// Validate configuration.
    ///
    /// Only a non-finite wave speed is rejected. Stability is not checked,
    /// see [`SimConfig::is_courant_stable`].
    pub fn validate(&self) -> Result<()> {
        if !self.wave_speed.is_finite() {
            return Err(Error::InvalidWaveSpeed(self.wave_speed));
        }
        Ok(())
    }

    /// The coefficient of the second derivative in the update, `c²τ²/h²`.
    pub fn mu(&self) -> f64 {
        self.wave_speed * self.wave_speed
    }

    /// `cτ/h`.
    pub fn courant_number(&self) -> f64 {
        self.wave_speed.abs()
    }

    /// Whether the explicit scheme stays bounded for this wave speed (CFL ≤ 1).
    pub fn is_courant_stable(&self) -> bool {
        self.courant_number() <= 1.
    }

    /// Defaults overridden by whatever `lookup` returns for the `INFO_WAVE_*` keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_WAVE_SPEED) {
            config.wave_speed = parse(ENV_WAVE_SPEED, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SAMPLE_COUNT) {
            config.sample_count = parse(ENV_SAMPLE_COUNT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_STEP_COUNT) {
            config.step_count = parse(ENV_STEP_COUNT, &raw)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

fn parse<T>(name: &'static str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| Error::InvalidParameter {
        name,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
