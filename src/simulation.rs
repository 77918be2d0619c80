//! Time loop of the leapfrog scheme and energy bookkeeping.

use std::mem;

use log::{debug, info, warn};
use ndarray::{Array1, ArrayView1};

use crate::config::SimConfig;
use crate::error::Result;

/// Half-width of the spatial domain; samples span `[-DOMAIN_HALF_WIDTH, DOMAIN_HALF_WIDTH]`.
pub const DOMAIN_HALF_WIDTH: f64 = 2.0;
/// Sharpness of the initial pulse `exp(-k x²)`.
pub const PULSE_SHARPNESS: f64 = 4.0;

/// Gaussian pulse `exp(-4 x²)` sampled at `x`.
pub fn gaussian_pulse(x: &Array1<f64>) -> Array1<f64> {
    x.mapv(|x| (-PULSE_SHARPNESS * x * x).exp())
}

/// State of a single run: the field at step `n - 1`, the field at step `n`,
/// and a scratch buffer receiving step `n + 1`.
///
/// The three buffers rotate on every step, nothing is allocated after
/// construction.
#[derive(Debug, Clone)]
pub struct Simulation {
    mu: f64,
    coordinates: Array1<f64>,
    previous: Vec<f64>,
    current: Vec<f64>,
    next: Vec<f64>,
    steps_taken: usize,
    initial_energy: f64,
}

impl Simulation {
    /// Gaussian pulse at rest on a ring of `config.sample_count` samples.
    ///
    /// The previous field equals the current one, i.e. zero initial velocity.
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let n = config.sample_count;
        let coordinates = Array1::linspace(-DOMAIN_HALF_WIDTH, DOMAIN_HALF_WIDTH, n);
        let current = gaussian_pulse(&coordinates).to_vec();
        let initial_energy = crate::energy(&current);
        Ok(Self {
            mu: config.mu(),
            coordinates,
            previous: current.clone(),
            current,
            next: vec![0.; n],
            steps_taken: 0,
            initial_energy,
        })
    }

    /// Advances by one step and returns the energy of the new field.
    pub fn step(&mut self) -> f64 {
        #[cfg(feature = "rayon")]
        crate::wave_step_parallel(&self.previous, &self.current, &mut self.next, self.mu);
        #[cfg(not(feature = "rayon"))]
        crate::wave_step(&self.previous, &self.current, &mut self.next, self.mu);

        let energy = crate::energy(&self.next);

        // previous <- current, current <- next, next <- stale previous
        mem::swap(&mut self.previous, &mut self.current);
        mem::swap(&mut self.current, &mut self.next);
        self.steps_taken += 1;
        energy
    }

    /// Runs `steps` more steps, appending one energy per step to `history`.
    pub fn advance(&mut self, steps: usize, history: &mut Vec<f64>) {
        history.reserve(steps);
        let mut reported_divergence = false;
        for _ in 0..steps {
            let energy = self.step();
            if !energy.is_finite() && !reported_divergence {
                warn!("energy became non-finite at step {}: {}", self.steps_taken, energy);
                reported_divergence = true;
            }
            history.push(energy);
        }
    }

    /// Field after the last step.
    pub fn field(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(&self.current[..])
    }

    /// Field one step before [`Simulation::field`].
    pub fn previous(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(&self.previous[..])
    }

    pub fn coordinates(&self) -> &Array1<f64> {
        &self.coordinates
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Energy of the initial pulse, before any step.
    pub fn initial_energy(&self) -> f64 {
        self.initial_energy
    }
}

/// Runs a full simulation and returns its energy history, one value per step.
pub fn run(config: &SimConfig) -> Result<Vec<f64>> {
    run_to_end(config).map(|(_, history)| history)
}

/// Same as [`run`], also handing back the final state.
pub fn run_to_end(config: &SimConfig) -> Result<(Simulation, Vec<f64>)> {
    let mut sim = Simulation::new(config)?;
    if !config.is_courant_stable() {
        warn!("wave speed {} exceeds the Courant limit of 1, the field will diverge",
              config.wave_speed);
    }
    debug!("starting run: c = {}, N = {}, steps = {}",
           config.wave_speed,
           config.sample_count,
           config.step_count);

    let mut history = Vec::new();
    sim.advance(config.step_count, &mut history);

    info!("finished {} steps on {} samples, initial energy {}, final energy {:?}",
          sim.steps_taken(),
          config.sample_count,
          sim.initial_energy(),
          history.last());
    Ok((sim, history))
}

/// [`run`] with the parameters spelled out.
pub fn simulate(wave_speed: f64, sample_count: usize, step_count: usize) -> Result<Vec<f64>> {
    run(&SimConfig::new(wave_speed, sample_count, step_count))
}
