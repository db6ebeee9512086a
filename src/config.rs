//! Environment overrides for grid and solver settings.
//!
//! `.env` is loaded (if present) before reading:
//!
//! - `PC_MAX_ITERATIONS`: optimizer iteration cap
//! - `PC_SCAN_MAX`: upper bound of the break-even scan grid
//! - `PC_SCAN_POINTS`: scan grid resolution
//! - `PC_DISPLAY_POINTS`: display grid resolution
//!
//! Unset variables keep the defaults from `ComputeConfig::default()`.

use std::fmt::Display;
use std::str::FromStr;

use tracing::debug;

use crate::domain::ComputeConfig;
use crate::error::ParseError;

impl ComputeConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ParseError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults with overrides from an arbitrary variable lookup.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ParseError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = read::<usize, _>(&lookup, "PC_MAX_ITERATIONS")? {
            config.solver.max_iterations = v;
        }
        if let Some(v) = read::<f64, _>(&lookup, "PC_SCAN_MAX")? {
            config.scan_max = v;
        }
        if let Some(v) = read::<usize, _>(&lookup, "PC_SCAN_POINTS")? {
            config.scan_points = v;
        }
        if let Some(v) = read::<usize, _>(&lookup, "PC_DISPLAY_POINTS")? {
            config.display_points = v;
        }

        config.validate()?;
        debug!(?config, "compute config resolved");
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.solver.max_iterations == 0 {
            return Err(invalid("PC_MAX_ITERATIONS", self.solver.max_iterations, "must be >= 1"));
        }
        if !(self.scan_max.is_finite() && self.scan_max > self.scan_min) {
            return Err(invalid(
                "PC_SCAN_MAX",
                self.scan_max,
                &format!("must be finite and > {}", self.scan_min),
            ));
        }
        if self.scan_points < 2 {
            return Err(invalid("PC_SCAN_POINTS", self.scan_points, "must be >= 2"));
        }
        if self.display_points < 2 {
            return Err(invalid("PC_DISPLAY_POINTS", self.display_points, "must be >= 2"));
        }
        Ok(())
    }
}

fn read<T, L>(lookup: &L, name: &'static str) -> Result<Option<T>, ParseError>
where
    T: FromStr,
    T::Err: Display,
    L: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|e| invalid(name, raw.as_str(), &e.to_string()))
}

fn invalid(name: &'static str, value: impl Display, reason: &str) -> ParseError {
    ParseError::InvalidSetting {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = ComputeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ComputeConfig::default());
        assert_eq!(config.scan_points, 2000);
        assert_eq!(config.display_points, 400);
    }

    #[test]
    fn overrides_are_applied() {
        let config = ComputeConfig::from_lookup(lookup(&[
            ("PC_MAX_ITERATIONS", "50"),
            ("PC_SCAN_MAX", "500"),
            ("PC_SCAN_POINTS", " 500 "),
            ("PC_DISPLAY_POINTS", "100"),
        ]))
        .unwrap();
        assert_eq!(config.solver.max_iterations, 50);
        assert_eq!(config.scan_max, 500.0);
        assert_eq!(config.scan_points, 500);
        assert_eq!(config.display_points, 100);
    }

    #[test]
    fn unparsable_value_is_rejected() {
        let err = ComputeConfig::from_lookup(lookup(&[("PC_SCAN_POINTS", "lots")])).unwrap_err();
        assert!(matches!(err, ParseError::InvalidSetting { name: "PC_SCAN_POINTS", .. }));
    }

    #[test]
    fn degenerate_grid_is_rejected() {
        assert!(ComputeConfig::from_lookup(lookup(&[("PC_DISPLAY_POINTS", "1")])).is_err());
        assert!(ComputeConfig::from_lookup(lookup(&[("PC_SCAN_MAX", "0.5")])).is_err());
    }
}
