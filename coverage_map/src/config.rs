// THEORY:
// A batch run probes the same screen location on every map of a week, because all
// maps share one projection and layout. That location and the resolver's tunables are
// the whole configuration. It is a plain struct the caller builds, optionally
// overridden from environment variables the way the engine's runners read theirs.

use crate::core_modules::pixel_buffer::Point;
use crate::core_modules::resolver::ResolverConfig;
use crate::core_modules::ring::RingMetric;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// A point inside the Philadelphia market on the standard map layout.
pub const DEFAULT_QUERY: Point = Point::new(1065, 327);

pub const QUERY_X_VAR: &str = "COVERAGE_QUERY_X";
pub const QUERY_Y_VAR: &str = "COVERAGE_QUERY_Y";
pub const SEARCH_RADIUS_VAR: &str = "COVERAGE_SEARCH_RADIUS";
pub const RING_METRIC_VAR: &str = "COVERAGE_RING_METRIC";

/// Configuration for one batch over all maps of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// The pixel probed on every map.
    pub query: Point,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::with_query(DEFAULT_QUERY)
    }
}

impl BatchConfig {
    pub fn with_query(query: Point) -> Self {
        Self {
            query,
            resolver: ResolverConfig::default(),
        }
    }

    /// Applies `COVERAGE_*` environment overrides on top of `defaults`.
    pub fn from_env(defaults: BatchConfig) -> Result<Self, ConfigError> {
        Self::from_lookup(defaults, |name| std::env::var(name).ok())
    }

    /// Like `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(defaults: BatchConfig, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = defaults;

        if let Some(value) = lookup(QUERY_X_VAR) {
            config.query.x = parse_u32(QUERY_X_VAR, &value)?;
        }
        if let Some(value) = lookup(QUERY_Y_VAR) {
            config.query.y = parse_u32(QUERY_Y_VAR, &value)?;
        }
        if let Some(value) = lookup(SEARCH_RADIUS_VAR) {
            config.resolver.search_radius_limit = parse_u32(SEARCH_RADIUS_VAR, &value)?;
        }
        if let Some(value) = lookup(RING_METRIC_VAR) {
            config.resolver.metric =
                value
                    .parse::<RingMetric>()
                    .map_err(|_| ConfigError::InvalidMetric {
                        var: RING_METRIC_VAR,
                        value: value.clone(),
                    })?;
        }

        Ok(config)
    }
}

fn parse_u32(var: &'static str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidInteger {
        var,
        value: value.to_string(),
    })
}
