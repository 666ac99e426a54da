//! Learned confidence adjustments derived from repeated human corrections.

use serde::{Deserialize, Serialize};

use super::collections::FxHashMap;
use crate::constants::{LEARNING_STEP, MAX_LEARNED_DELTA, MIN_LEARNING_OBSERVATIONS};

/// Direction of an observed disagreement between the validator and a human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Observation {
    /// Human accepted a role the validator scored low.
    Promote,
    /// Human rejected a role the validator accepted.
    Demote,
}

impl Observation {
    pub fn sign(&self) -> f64 {
        match self {
            Self::Promote => 1.0,
            Self::Demote => -1.0,
        }
    }
}

/// Bounded, frequency-gated confidence adjustment keyed by normalized text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedPattern {
    pub pattern_key: String,
    /// Always within [-MAX_LEARNED_DELTA, +MAX_LEARNED_DELTA].
    pub confidence_delta: f64,
    pub observation_count: u32,
}

impl LearnedPattern {
    pub fn new(pattern_key: impl Into<String>) -> Self {
        Self {
            pattern_key: pattern_key.into(),
            confidence_delta: 0.0,
            observation_count: 0,
        }
    }

    /// Record one observation with the default step and bound.
    pub fn observe(&mut self, observation: Observation) {
        self.observe_with(observation, LEARNING_STEP, MAX_LEARNED_DELTA);
    }

    /// Record one observation. An observation against the current direction
    /// restarts the series at count 1.
    pub fn observe_with(&mut self, observation: Observation, step: f64, max_delta: f64) {
        let sign = observation.sign();
        let opposes = self.confidence_delta != 0.0 && self.confidence_delta.signum() != sign;
        if opposes {
            self.observation_count = 1;
            self.confidence_delta = (sign * step).clamp(-max_delta, max_delta);
        } else {
            self.observation_count = self.observation_count.saturating_add(1);
            self.confidence_delta =
                (self.confidence_delta + sign * step).clamp(-max_delta, max_delta);
        }
    }

    /// Delta that scoring may apply: zero until `min_observations` is reached.
    pub fn effective_delta(&self, min_observations: u32) -> f64 {
        if self.observation_count >= min_observations {
            self.confidence_delta
                .clamp(-MAX_LEARNED_DELTA, MAX_LEARNED_DELTA)
        } else {
            0.0
        }
    }
}

/// Snapshot of all learned patterns, consulted by the validator.
#[derive(Debug, Clone, PartialEq)]
pub struct LearnedPatternTable {
    patterns: FxHashMap<String, LearnedPattern>,
    min_observations: u32,
}

impl Default for LearnedPatternTable {
    fn default() -> Self {
        Self::new(MIN_LEARNING_OBSERVATIONS)
    }
}

impl LearnedPatternTable {
    pub fn new(min_observations: u32) -> Self {
        Self {
            patterns: FxHashMap::default(),
            min_observations: min_observations.max(1),
        }
    }

    pub fn from_patterns(patterns: impl IntoIterator<Item = LearnedPattern>, min_observations: u32) -> Self {
        let mut table = Self::new(min_observations);
        for p in patterns {
            table.insert(p);
        }
        table
    }

    pub fn insert(&mut self, pattern: LearnedPattern) {
        self.patterns.insert(pattern.pattern_key.clone(), pattern);
    }

    pub fn get(&self, pattern_key: &str) -> Option<&LearnedPattern> {
        self.patterns.get(pattern_key)
    }

    /// Delta to apply for `pattern_key`, honoring the observation gate.
    pub fn effective_delta(&self, pattern_key: &str) -> f64 {
        self.patterns
            .get(pattern_key)
            .map_or(0.0, |p| p.effective_delta(self.min_observations))
    }

    pub fn min_observations(&self) -> u32 {
        self.min_observations
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LearnedPattern> {
        self.patterns.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_observation_has_no_effect() {
        let mut p = LearnedPattern::new("quality lead");
        p.observe(Observation::Demote);
        assert_eq!(p.observation_count, 1);
        assert_eq!(p.effective_delta(2), 0.0);
    }

    #[test]
    fn second_observation_applies() {
        let mut p = LearnedPattern::new("quality lead");
        p.observe(Observation::Demote);
        p.observe(Observation::Demote);
        assert!((p.effective_delta(2) + 0.10).abs() < 1e-9);
    }

    #[test]
    fn delta_is_bounded() {
        let mut p = LearnedPattern::new("x");
        for _ in 0..20 {
            p.observe(Observation::Promote);
        }
        assert!((p.confidence_delta - MAX_LEARNED_DELTA).abs() < 1e-9);
    }

    #[test]
    fn opposite_observation_restarts_series() {
        let mut p = LearnedPattern::new("x");
        p.observe(Observation::Promote);
        p.observe(Observation::Promote);
        p.observe(Observation::Demote);
        assert_eq!(p.observation_count, 1);
        assert_eq!(p.effective_delta(2), 0.0);
    }
}
