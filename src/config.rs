//! Search configuration.
//!
//! Builder-style, serde-loadable parameters for one ACO run. Every field
//! has a default, so a JSON document only needs the fields it overrides.
//!
//! # Example
//! ```
//! use u_aco::config::{AcoConfig, UpdateStrategy};
//!
//! let config = AcoConfig::default()
//!     .with_ants(10)
//!     .with_alpha(3.875)
//!     .with_evaporation(0.7)
//!     .with_strategy(UpdateStrategy::min_max())
//!     .with_seed(42);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{AcoError, Result};

/// Default `p_best` for min–max bounds.
pub const DEFAULT_P_BEST: f64 = 0.05;

/// Pheromone update rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpdateStrategy {
    /// Evaporate, then deposit along every ant's path.
    #[default]
    Standard,
    /// Same deposits, with every cell clamped into `[tau_min, tau_max]`
    /// derived from the best makespan found so far.
    ElitistMinMax {
        /// Target probability of rebuilding the best path once converged.
        p_best: f64,
    },
}

impl UpdateStrategy {
    /// Min–max with the default `p_best`.
    pub fn min_max() -> Self {
        Self::ElitistMinMax {
            p_best: DEFAULT_P_BEST,
        }
    }
}

/// Parameters for one ACO search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcoConfig {
    /// Ants (candidate paths) per iteration.
    pub ants: usize,
    /// Pheromone exponent (α).
    pub alpha: f64,
    /// Heuristic (inverse duration) exponent (β).
    pub beta: f64,
    /// Evaporation coefficient (ρ), in (0, 1].
    pub evaporation: f64,
    /// Deposit constant (Q).
    pub q: f64,
    /// Pheromone on every cell at start (τ₀).
    pub initial_pheromone: f64,
    /// Hard iteration cap.
    pub max_iterations: usize,
    /// Makespan change below which an iteration counts as stalled.
    pub tolerance: f64,
    /// Consecutive stalled iterations before stopping.
    pub patience: usize,
    /// Update rule.
    pub strategy: UpdateStrategy,
    /// Extra deposit on the global-best path, as a multiple of a regular
    /// ant deposit. 0 disables it.
    pub elitist_weight: f64,
    /// RNG seed. `None` draws a fresh seed (reported in the result).
    pub seed: Option<u64>,
    /// Build ant paths on the rayon pool.
    pub parallel: bool,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            ants: 5,
            alpha: 1.0,
            beta: 1.0,
            evaporation: 0.5,
            q: 10.0,
            initial_pheromone: 0.1,
            max_iterations: 100,
            tolerance: 1e-5,
            patience: 20,
            strategy: UpdateStrategy::Standard,
            elitist_weight: 0.0,
            seed: None,
            parallel: false,
        }
    }
}

impl AcoConfig {
    /// Sets the ant count.
    pub fn with_ants(mut self, ants: usize) -> Self {
        self.ants = ants;
        self
    }

    /// Sets α.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets β.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets ρ.
    pub fn with_evaporation(mut self, evaporation: f64) -> Self {
        self.evaporation = evaporation;
        self
    }

    /// Sets Q.
    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    /// Sets τ₀.
    pub fn with_initial_pheromone(mut self, tau: f64) -> Self {
        self.initial_pheromone = tau;
        self
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the patience.
    pub fn with_patience(mut self, patience: usize) -> Self {
        self.patience = patience;
        self
    }

    /// Sets the update rule.
    pub fn with_strategy(mut self, strategy: UpdateStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the global-best deposit weight.
    pub fn with_elitist_weight(mut self, weight: f64) -> Self {
        self.elitist_weight = weight;
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel path construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Rejects parameter values the search cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.ants == 0 {
            return Err(AcoError::config("ants must be at least 1"));
        }
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(AcoError::config(format!("alpha must be finite and >= 0, got {}", self.alpha)));
        }
        if !(self.beta.is_finite() && self.beta >= 0.0) {
            return Err(AcoError::config(format!("beta must be finite and >= 0, got {}", self.beta)));
        }
        if !(self.evaporation > 0.0 && self.evaporation <= 1.0) {
            return Err(AcoError::config(format!(
                "evaporation must be in (0, 1], got {}",
                self.evaporation
            )));
        }
        if !(self.q > 0.0 && self.q.is_finite()) {
            return Err(AcoError::config(format!("q must be positive, got {}", self.q)));
        }
        if !(self.initial_pheromone > 0.0 && self.initial_pheromone.is_finite()) {
            return Err(AcoError::config(format!(
                "initial pheromone must be positive, got {}",
                self.initial_pheromone
            )));
        }
        if self.max_iterations == 0 {
            return Err(AcoError::config("max_iterations must be at least 1"));
        }
        if !(self.tolerance >= 0.0) {
            return Err(AcoError::config(format!("tolerance must be >= 0, got {}", self.tolerance)));
        }
        if self.patience == 0 {
            return Err(AcoError::config("patience must be at least 1"));
        }
        if !(self.elitist_weight.is_finite() && self.elitist_weight >= 0.0) {
            return Err(AcoError::config(format!(
                "elitist weight must be finite and >= 0, got {}",
                self.elitist_weight
            )));
        }
        if let UpdateStrategy::ElitistMinMax { p_best } = self.strategy {
            if !(p_best > 0.0 && p_best < 1.0) {
                return Err(AcoError::config(format!("p_best must be in (0, 1), got {p_best}")));
            }
        }
        Ok(())
    }
}
