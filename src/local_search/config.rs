//! Local search configuration.

use serde::{Deserialize, Serialize};

use super::Reconnection;
use crate::error::TspError;

/// Settings shared by every fixed-point local search.
///
/// # Examples
///
/// ```
/// use u_tsp::local_search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_max_passes(50)
///     .with_closed(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of full neighborhood scans. 0 = no limit.
    pub max_passes: usize,

    /// Whether the edge closing the tour (last node back to the first)
    /// takes part in the neighborhood.
    ///
    /// With `false` only the open path edges `(i, i+1)`, `i < n-1`, are
    /// exchanged, although [`Tour::distance`](crate::models::Tour::distance)
    /// still counts the closing edge.
    pub closed: bool,

    /// Minimum length reduction for a move to count as improving.
    pub min_gain: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_passes: 0,
            closed: true,
            min_gain: 1e-10,
        }
    }
}

impl SearchConfig {
    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.max_passes = n;
        self
    }

    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    pub fn with_min_gain(mut self, gain: f64) -> Self {
        self.min_gain = gain;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), TspError> {
        if !self.min_gain.is_finite() || self.min_gain < 0.0 {
            return Err(TspError::InvalidConfig(format!(
                "min_gain must be finite and non-negative, got {}",
                self.min_gain
            )));
        }
        Ok(())
    }

    /// Returns `true` once `passes` reaches the configured limit.
    pub(crate) fn pass_limit_reached(&self, passes: usize) -> bool {
        self.max_passes > 0 && passes >= self.max_passes
    }

    /// Number of edges the neighborhood enumerates for a tour of `n` nodes.
    ///
    /// Edge `e` joins positions `e` and `e + 1` (mod `n`).
    pub(crate) fn edge_count(&self, n: usize) -> usize {
        if self.closed {
            n
        } else {
            n.saturating_sub(1)
        }
    }
}

/// Configuration for [`ThreeOpt`](super::ThreeOpt).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreeOptConfig {
    /// Fixed-point loop settings.
    pub search: SearchConfig,

    /// Reconnections evaluated for every edge triple. The best improving
    /// one is applied.
    pub reconnections: Vec<Reconnection>,
}

impl Default for ThreeOptConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            reconnections: vec![Reconnection::SegmentSwap],
        }
    }
}

impl ThreeOptConfig {
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_reconnections(mut self, reconnections: &[Reconnection]) -> Self {
        self.reconnections = reconnections.to_vec();
        self
    }

    /// Evaluates all seven reconnection patterns.
    pub fn full_neighborhood(self) -> Self {
        self.with_reconnections(&Reconnection::ALL)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), TspError> {
        self.search.validate()?;
        if self.reconnections.is_empty() {
            return Err(TspError::InvalidConfig(
                "at least one reconnection is required".into(),
            ));
        }
        Ok(())
    }
}

/// How the affinity-guided phase perturbs the tour before the 2-opt cleanup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AffinityStrategy {
    /// Rebuild the tour from a random node, appending the unplaced node of
    /// highest affinity when it clears the dynamic threshold.
    #[default]
    Construction,

    /// 2-opt whose improving exchanges are only accepted when the affinity
    /// of the new edges clears a threshold that relaxes to zero when a scan
    /// row finds nothing.
    GatedExchange,
}

/// Configuration for [`AffinityTwoOpt`](super::AffinityTwoOpt).
///
/// # Examples
///
/// ```
/// use u_tsp::local_search::{AffinityConfig, AffinityStrategy};
///
/// let config = AffinityConfig::default()
///     .with_initial_threshold(0.8)
///     .with_strategy(AffinityStrategy::GatedExchange);
/// assert!(config.validate().is_ok());
/// assert!(config.with_initial_threshold(1.5).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffinityConfig {
    /// Settings for the 2-opt phases.
    pub search: SearchConfig,

    /// Starting affinity threshold, in `[0, 1]`.
    pub initial_threshold: f64,

    /// Perturbation strategy.
    pub strategy: AffinityStrategy,
}

impl Default for AffinityConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            initial_threshold: 0.9,
            strategy: AffinityStrategy::default(),
        }
    }
}

impl AffinityConfig {
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_initial_threshold(mut self, threshold: f64) -> Self {
        self.initial_threshold = threshold;
        self
    }

    pub fn with_strategy(mut self, strategy: AffinityStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), TspError> {
        self.search.validate()?;
        if !(0.0..=1.0).contains(&self.initial_threshold) {
            return Err(TspError::InvalidConfig(format!(
                "initial_threshold must be in [0, 1], got {}",
                self.initial_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.max_passes, 0);
        assert!(config.closed);
        assert!((config.min_gain - 1e-10).abs() < 1e-20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_min_gain() {
        assert!(SearchConfig::default().with_min_gain(-1.0).validate().is_err());
        assert!(SearchConfig::default()
            .with_min_gain(f64::NAN)
            .validate()
            .is_err());
        assert!(SearchConfig::default().with_min_gain(0.0).validate().is_ok());
    }

    #[test]
    fn test_pass_limit() {
        let unlimited = SearchConfig::default();
        assert!(!unlimited.pass_limit_reached(1_000_000));

        let capped = SearchConfig::default().with_max_passes(3);
        assert!(!capped.pass_limit_reached(2));
        assert!(capped.pass_limit_reached(3));
    }

    #[test]
    fn test_edge_count() {
        assert_eq!(SearchConfig::default().edge_count(5), 5);
        assert_eq!(SearchConfig::default().with_closed(false).edge_count(5), 4);
        assert_eq!(SearchConfig::default().with_closed(false).edge_count(0), 0);
    }

    #[test]
    fn test_three_opt_config() {
        let config = ThreeOptConfig::default();
        assert_eq!(config.reconnections, vec![Reconnection::SegmentSwap]);
        assert!(config.validate().is_ok());

        let full = ThreeOptConfig::default().full_neighborhood();
        assert_eq!(full.reconnections.len(), 7);

        let empty = ThreeOptConfig::default().with_reconnections(&[]);
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_affinity_config_threshold_range() {
        assert!(AffinityConfig::default().validate().is_ok());
        assert!(AffinityConfig::default()
            .with_initial_threshold(-0.1)
            .validate()
            .is_err());
        assert!(AffinityConfig::default()
            .with_initial_threshold(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: AffinityConfig =
            serde_json::from_str(r#"{"strategy":"gated-exchange","search":{"max_passes":10}}"#)
                .expect("deserialize");
        assert_eq!(config.strategy, AffinityStrategy::GatedExchange);
        assert_eq!(config.search.max_passes, 10);
        assert!(config.search.closed);
        assert!((config.initial_threshold - 0.9).abs() < 1e-12);

        let three: ThreeOptConfig =
            serde_json::from_str(r#"{"reconnections":["segment-swap","reverse-both"]}"#)
                .expect("deserialize");
        assert_eq!(
            three.reconnections,
            vec![Reconnection::SegmentSwap, Reconnection::ReverseBoth]
        );
    }
}
