use std::f64::consts::PI;

use super::convergence::{has_converged, should_continue};
use super::types::{Opponent, RatingState};
use crate::config::settings::RatingSettings;

// Conversion between the public scale and the Glicko-2 internal scale
const SCALE: f64 = 173.7178;
const CENTER: f64 = 1500.0;

/// Glicko-2 rating-period updates (Glickman, "Example of the Glicko-2 system")
#[derive(Debug, Clone)]
pub struct RatingEngine {
    prior: RatingState,
    tau: f64,
    tolerance: f64,
    max_iterations: usize,
}

impl RatingEngine {
    pub fn new(settings: &RatingSettings) -> Self {
        Self {
            prior: settings.prior(),
            tau: settings.tau,
            tolerance: settings.convergence_tolerance,
            max_iterations: settings.max_iterations,
        }
    }

    pub fn default_rating(&self) -> RatingState {
        self.prior
    }

    /// Applies one rating period. With no observations the player only decays.
    pub fn update_with_observations<O: Opponent>(
        &self,
        current: RatingState,
        observations: &[O],
    ) -> RatingState {
        if observations.is_empty() {
            return self.decay(current);
        }

        let mu = to_mu(current.rating);
        let phi = to_phi(current.deviation);

        let (variance, improvement_sum) = estimate_variance(mu, observations);
        let delta = variance * improvement_sum;

        let sigma = self.new_volatility(phi, current.volatility, variance, delta);

        let phi_star = pre_period_phi(phi, sigma);
        let new_phi = 1.0 / (1.0 / phi_star.powi(2) + 1.0 / variance).sqrt();
        let new_mu = mu + new_phi.powi(2) * improvement_sum;

        RatingState {
            rating: from_mu(new_mu),
            deviation: from_phi(new_phi),
            volatility: sigma,
        }
    }

    /// No-contest period: deviation grows, rating and volatility stay put
    pub fn decay(&self, current: RatingState) -> RatingState {
        let phi = to_phi(current.deviation);
        RatingState {
            deviation: from_phi(pre_period_phi(phi, current.volatility)),
            ..current
        }
    }

    fn new_volatility(&self, phi: f64, sigma: f64, variance: f64, delta: f64) -> f64 {
        let a = (sigma * sigma).ln();
        let f = |x: f64| volatility_objective(x, a, delta, phi, variance, self.tau);

        let mut lower = a;
        let mut upper = self.initial_upper_bound(a, delta, phi, variance, &f);
        let mut f_lower = f(lower);
        let mut f_upper = f(upper);

        // Illinois variant of regula falsi
        let mut iteration = 0;
        while !has_converged(lower, upper, self.tolerance)
            && should_continue(iteration, self.max_iterations)
        {
            let candidate = lower + (lower - upper) * f_lower / (f_upper - f_lower);
            let f_candidate = f(candidate);

            if f_candidate * f_upper <= 0.0 {
                lower = upper;
                f_lower = f_upper;
            } else {
                f_lower /= 2.0;
            }

            upper = candidate;
            f_upper = f_candidate;
            iteration += 1;
        }

        (lower / 2.0).exp()
    }

    fn initial_upper_bound<F: Fn(f64) -> f64>(
        &self,
        a: f64,
        delta: f64,
        phi: f64,
        variance: f64,
        f: &F,
    ) -> f64 {
        let excess = delta * delta - phi * phi - variance;
        if excess > 0.0 {
            return excess.ln();
        }

        let mut k = 1.0;
        let mut iteration = 0;
        while f(a - k * self.tau) < 0.0 && should_continue(iteration, self.max_iterations) {
            k += 1.0;
            iteration += 1;
        }
        a - k * self.tau
    }
}

impl Default for RatingEngine {
    fn default() -> Self {
        Self::new(&RatingSettings::default())
    }
}

/// Returns the estimated variance `v` and the sum of `g(φj)(sj - E)` over the period
fn estimate_variance<O: Opponent>(mu: f64, observations: &[O]) -> (f64, f64) {
    let mut information = 0.0;
    let mut improvement_sum = 0.0;

    for observation in observations {
        let mu_j = to_mu(observation.rating());
        let g_j = g(to_phi(observation.deviation()));
        let expected = expected_score(mu, mu_j, g_j);

        information += g_j * g_j * expected * (1.0 - expected);
        improvement_sum += g_j * (observation.outcome() - expected);
    }

    (1.0 / information, improvement_sum)
}

fn volatility_objective(x: f64, a: f64, delta: f64, phi: f64, variance: f64, tau: f64) -> f64 {
    let ex = x.exp();
    let phi_sq = phi * phi;
    let numerator = ex * (delta * delta - phi_sq - variance - ex);
    let denominator = 2.0 * (phi_sq + variance + ex).powi(2);
    numerator / denominator - (x - a) / (tau * tau)
}

fn pre_period_phi(phi: f64, sigma: f64) -> f64 {
    (phi * phi + sigma * sigma).sqrt()
}

fn g(phi: f64) -> f64 {
    1.0 / (1.0 + 3.0 * phi * phi / (PI * PI)).sqrt()
}

fn expected_score(mu: f64, mu_j: f64, g_j: f64) -> f64 {
    1.0 / (1.0 + (-g_j * (mu - mu_j)).exp())
}

fn to_mu(rating: f64) -> f64 {
    (rating - CENTER) / SCALE
}

fn to_phi(deviation: f64) -> f64 {
    deviation / SCALE
}

fn from_mu(mu: f64) -> f64 {
    mu * SCALE + CENTER
}

fn from_phi(phi: f64) -> f64 {
    phi * SCALE
}
