use std::f64::consts::{PI, SQRT_2};

use crate::{
    error::RatingError,
    model::{
        constants::{BETA, DRAW_PROBABILITY, MU, SIGMA, TAU},
        structures::rating::Rating
    }
};

/// A pairwise Bayesian skill model.
///
/// Implementations must be pure and deterministic: the engine replays the
/// same history into several pools and expects identical inputs to produce
/// identical outputs.
pub trait RatingModel: Send + Sync {
    /// Prior assigned to a player the first time they are seen in a pool.
    fn default_rating(&self) -> Rating;

    /// Updates both ratings after `winner` beat `loser`.
    fn rate_1vs1(&self, winner: &Rating, loser: &Rating) -> Result<(Rating, Rating), RatingError>;

    /// Conservative scalar skill estimate used for ranking.
    fn expose(&self, rating: &Rating) -> f64;
}

/// # TrueSkill
///
/// Two-player TrueSkill update using the reference environment constants
/// and the reference library's numerical helpers (its `erfc` approximation
/// and Newton-refined `erfcinv`), so ratings agree with stored reference
/// outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrueSkill {
    pub mu: f64,
    pub sigma: f64,
    /// Performance variance
    pub beta: f64,
    /// Dynamics factor added to sigma before every update
    pub tau: f64,
    pub draw_probability: f64
}

impl Default for TrueSkill {
    fn default() -> Self {
        TrueSkill {
            mu: MU,
            sigma: SIGMA,
            beta: BETA,
            tau: TAU,
            draw_probability: DRAW_PROBABILITY
        }
    }
}

impl TrueSkill {
    /// Draw margin for a match between `size` players in total.
    pub fn draw_margin(&self, size: usize) -> f64 {
        ppf((self.draw_probability + 1.0) / 2.0) * (size as f64).sqrt() * self.beta
    }
}

impl RatingModel for TrueSkill {
    fn default_rating(&self) -> Rating {
        Rating::new(self.mu, self.sigma)
    }

    fn rate_1vs1(&self, winner: &Rating, loser: &Rating) -> Result<(Rating, Rating), RatingError> {
        let tau_squared = self.tau.powi(2);
        let winner_variance = winner.sigma.powi(2) + tau_squared;
        let loser_variance = loser.sigma.powi(2) + tau_squared;

        let c_squared = winner_variance + loser_variance + 2.0 * self.beta.powi(2);
        let c = c_squared.sqrt();

        let t = (winner.mu - loser.mu) / c;
        let epsilon = self.draw_margin(2) / c;

        let v = v_win(t, epsilon);
        let w = w_win(t, epsilon)?;

        let new_winner = Rating::new(
            winner.mu + winner_variance / c * v,
            (winner_variance * (1.0 - winner_variance / c_squared * w)).sqrt()
        );
        let new_loser = Rating::new(
            loser.mu - loser_variance / c * v,
            (loser_variance * (1.0 - loser_variance / c_squared * w)).sqrt()
        );

        Ok((new_winner, new_loser))
    }

    fn expose(&self, rating: &Rating) -> f64 {
        let k = self.mu / self.sigma;
        rating.mu - k * rating.sigma
    }
}

/// Mean additive truncated-Gaussian correction for a win.
fn v_win(diff: f64, draw_margin: f64) -> f64 {
    let x = diff - draw_margin;
    let denom = cdf(x);

    if denom != 0.0 {
        pdf(x) / denom
    } else {
        -x
    }
}

/// Variance multiplicative truncated-Gaussian correction for a win.
fn w_win(diff: f64, draw_margin: f64) -> Result<f64, RatingError> {
    let x = diff - draw_margin;
    let v = v_win(diff, draw_margin);
    let w = v * (v + x);

    if 0.0 < w && w < 1.0 {
        Ok(w)
    } else {
        Err(RatingError::Unstable { w })
    }
}

/// Complementary error function (Numerical Recipes approximation).
fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + z / 2.0);
    let r = t * (-z * z - 1.26551223
        + t * (1.00002368
            + t * (0.37409196
                + t * (0.09678418
                    + t * (-0.18628806
                        + t * (0.27886807
                            + t * (-1.13520398 + t * (1.48851587 + t * (-0.82215223 + t * 0.17087277)))))))))
        .exp();

    if x < 0.0 {
        2.0 - r
    } else {
        r
    }
}

fn erfcinv(y: f64) -> f64 {
    if y >= 2.0 {
        return -100.0;
    } else if y <= 0.0 {
        return 100.0;
    }

    let zero_point = y < 1.0;
    let y = if zero_point { y } else { 2.0 - y };

    let t = (-2.0 * (y / 2.0).ln()).sqrt();
    let mut x = -0.70711 * ((2.30753 + t * 0.27061) / (1.0 + t * (0.99229 + t * 0.04481)) - t);

    for _ in 0..2 {
        let err = erfc(x) - y;
        x += err / (1.12837916709551257 * (-(x * x)).exp() - x * err);
    }

    if zero_point {
        x
    } else {
        -x
    }
}

/// Standard normal cumulative distribution function
fn cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal probability density function
fn pdf(x: f64) -> f64 {
    1.0 / (2.0 * PI).sqrt() * (-(x * x) / 2.0).exp()
}

/// Standard normal quantile function
fn ppf(x: f64) -> f64 {
    -SQRT_2 * erfcinv(2.0 * x)
}
