//! Synthetic cost / price observation generation.
//!
//! The "true" economy is a quadratic cost curve and a power-law demand curve.
//! Observations are drawn at random quantities and perturbed with multiplicative
//! lognormal noise, then written out in the `quantity,value` text format the
//! parser consumes. Everything is driven by a seeded `StdRng`, so a seed fully
//! determines the sample.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::ModelKind;
use crate::error::AppError;
use crate::models::predict;

/// Parameters of the synthetic economy and the draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    pub seed: u64,
    /// Observations per block.
    pub count: usize,
    pub q_min: f64,
    pub q_max: f64,
    /// Quadratic cost `[a, b, c]`.
    pub cost_params: [f64; 3],
    /// Power-law price `[a, b]`.
    pub price_params: [f64; 2],
    /// Log-volatility of the multiplicative noise (0 = exact).
    pub noise: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            count: 12,
            q_min: 1.0,
            q_max: 40.0,
            cost_params: [0.15, 2.0, 40.0],
            price_params: [60.0, -0.25],
            noise: 0.04,
        }
    }
}

/// Generated observation blocks, ready for `compute`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleData {
    pub cost_text: String,
    pub revenue_text: String,
}

pub fn generate_sample(config: &SampleConfig) -> Result<SampleData, AppError> {
    if config.count < ModelKind::QuadraticCost.param_len() {
        return Err(AppError::Compute(format!(
            "Sample count must be >= {}.",
            ModelKind::QuadraticCost.param_len()
        )));
    }
    if !(config.q_min.is_finite() && config.q_max.is_finite() && config.q_min > 0.0 && config.q_max > config.q_min) {
        return Err(AppError::Compute("Invalid quantity range for sample generation.".to_string()));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::Compute("Sample noise must be finite and >= 0.".to_string()));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::Compute(format!("Noise distribution error: {e}")))?;

    let cost_text = draw_block(&mut rng, &normal, config, ModelKind::QuadraticCost, &config.cost_params);
    let revenue_text = draw_block(&mut rng, &normal, config, ModelKind::PowerLawPrice, &config.price_params);

    Ok(SampleData {
        cost_text,
        revenue_text,
    })
}

fn draw_block(
    rng: &mut StdRng,
    normal: &Normal<f64>,
    config: &SampleConfig,
    model: ModelKind,
    params: &[f64],
) -> String {
    let mut quantities: Vec<f64> = (0..config.count)
        .map(|_| round_1dp(rng.gen_range(config.q_min..=config.q_max)))
        .collect();
    quantities.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    // Mean-corrected lognormal: E[exp(σz - σ²/2)] = 1.
    let correction = 0.5 * config.noise * config.noise;
    quantities
        .iter()
        .map(|&q| {
            let z = normal.sample(rng);
            let value = predict(model, q, params) * (config.noise * z - correction).exp();
            format!("{q:.1},{value:.2}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn round_1dp(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::{COST_BLOCK, REVENUE_BLOCK, parse_observations};

    #[test]
    fn same_seed_same_sample() {
        let config = SampleConfig::default();
        assert_eq!(generate_sample(&config).unwrap(), generate_sample(&config).unwrap());

        let other = SampleConfig { seed: 7, ..config.clone() };
        assert_ne!(generate_sample(&config).unwrap(), generate_sample(&other).unwrap());
    }

    #[test]
    fn sample_parses_into_sorted_blocks() {
        let config = SampleConfig::default();
        let sample = generate_sample(&config).unwrap();
        let cost = parse_observations(COST_BLOCK, &sample.cost_text).unwrap();
        let price = parse_observations(REVENUE_BLOCK, &sample.revenue_text).unwrap();
        assert_eq!(cost.len(), config.count);
        assert_eq!(price.len(), config.count);
        assert!(cost.quantities.windows(2).all(|w| w[0] <= w[1]));
        assert!(price.quantities.iter().all(|&q| q >= config.q_min && q <= config.q_max));
    }

    #[test]
    fn noiseless_sample_matches_models() {
        let config = SampleConfig {
            noise: 0.0,
            ..SampleConfig::default()
        };
        let sample = generate_sample(&config).unwrap();
        let cost = parse_observations(COST_BLOCK, &sample.cost_text).unwrap();
        for (q, y) in cost.iter() {
            let expected = predict(ModelKind::QuadraticCost, q, &config.cost_params);
            assert!((y - expected).abs() <= 0.005 + 1e-9, "q={q} y={y} expected={expected}");
        }
    }

    #[test]
    fn rejects_too_small_count() {
        let config = SampleConfig {
            count: 2,
            ..SampleConfig::default()
        };
        assert!(generate_sample(&config).is_err());
    }

    #[test]
    fn default_sample_runs_through_pipeline() {
        let sample = generate_sample(&SampleConfig::default()).unwrap();
        let out = crate::app::pipeline::compute(&sample.cost_text, &sample.revenue_text, 0, 60).unwrap();
        assert!(out.summary.max_profit.is_finite());
        assert!(!out.summary.break_evens.is_empty());
    }
}
