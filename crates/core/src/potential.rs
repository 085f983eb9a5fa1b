//! Inverse-square potential summed over a set of point sources.
//!
//! Each source at distance `d` from the query point contributes `1 / d²`.
//! A query point that coincides exactly with a source is handled by the
//! evaluator's [`CoincidencePolicy`], which applies uniformly to every
//! source and every query.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::source::PointSource;

/// Treatment of a source that sits exactly on the query point (`d² = 0`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoincidencePolicy {
    /// The coincident source contributes nothing.
    #[default]
    Skip,
    /// Every denominator is `d² + f64::EPSILON`, so a coincident source
    /// contributes a very large but finite value.
    Epsilon,
}

impl CoincidencePolicy {
    fn contribution(self, distance_sq: f64) -> f64 {
        match self {
            CoincidencePolicy::Skip if distance_sq > 0.0 => 1.0 / distance_sq,
            CoincidencePolicy::Skip => 0.0,
            CoincidencePolicy::Epsilon => 1.0 / (distance_sq + f64::EPSILON),
        }
    }
}

/// Field evaluator: coincidence policy plus an optional ceiling on the sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Potential {
    pub policy: CoincidencePolicy,
    /// When set, results are clamped to at most this value.
    #[serde(default)]
    pub ceiling: Option<f64>,
}

impl Potential {
    pub fn new(policy: CoincidencePolicy) -> Self {
        Self {
            policy,
            ceiling: None,
        }
    }

    pub fn with_ceiling(mut self, ceiling: f64) -> Self {
        self.ceiling = Some(ceiling);
        self
    }

    /// Total potential at `query`. Always non-negative.
    pub fn evaluate<'a>(
        &self,
        query: DVec2,
        sources: impl IntoIterator<Item = &'a PointSource>,
    ) -> f64 {
        let sum = potential(query, sources, self.policy);
        match self.ceiling {
            Some(ceiling) => sum.min(ceiling),
            None => sum,
        }
    }
}

/// Sum of `1 / d²` over all sources, with `policy` deciding the `d² = 0` case.
pub fn potential<'a>(
    query: DVec2,
    sources: impl IntoIterator<Item = &'a PointSource>,
    policy: CoincidencePolicy,
) -> f64 {
    sources
        .into_iter()
        .map(|s| policy.contribution(query.distance_squared(s.0)))
        .sum()
}
