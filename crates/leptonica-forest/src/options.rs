//! Options and FeatureBudget
//!
//! The original's `RandomForestNewOptions` couples `resample_count_` and
//! `bootstrap_sampling_` through a pair of setters that silently disable
//! each other. That coupling is made explicit here as a single
//! [`SamplingPolicy`] tag instead of two setters with hidden side effects.

use crate::error::ForestResult;
use crate::scorer::SplitMetric;

/// How many features to consider per node, as a function of the total
/// feature count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureBudget {
    Sqrt,
    Log,
    All,
    Const(usize),
}

impl FeatureBudget {
    /// Number of features to draw out of `total` available.
    pub fn evaluate(self, total: usize) -> usize {
        match self {
            FeatureBudget::Sqrt => (total as f64).sqrt().ceil() as usize,
            FeatureBudget::Log => (total as f64).ln().ceil() as usize,
            FeatureBudget::All => total,
            FeatureBudget::Const(k) => k,
        }
    }
}

/// Whether each tree resamples via bootstrap, or a fixed sample count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingPolicy {
    Bootstrap,
    Fixed(usize),
}

/// Immutable, builder-configured training options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    tree_count: usize,
    features_per_node: FeatureBudget,
    sampling: SamplingPolicy,
    split: SplitMetric,
    max_depth: usize,
    node_complexity_tau: Option<f64>,
    min_num_instances: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tree_count: 256,
            features_per_node: FeatureBudget::Sqrt,
            sampling: SamplingPolicy::Bootstrap,
            split: SplitMetric::Gini,
            max_depth: 0,
            node_complexity_tau: None,
            min_num_instances: 1,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree_count(mut self, n: usize) -> Self {
        self.tree_count = n;
        self
    }

    pub fn features_per_node(mut self, budget: FeatureBudget) -> Self {
        self.features_per_node = budget;
        self
    }

    /// Turns on bootstrap sampling, turning off any fixed resample count.
    pub fn bootstrap_sampling(mut self) -> Self {
        self.sampling = SamplingPolicy::Bootstrap;
        self
    }

    /// Resamples a fixed count per tree, turning off bootstrap sampling.
    pub fn resample_count(mut self, n: usize) -> Self {
        self.sampling = SamplingPolicy::Fixed(n);
        self
    }

    pub fn split(mut self, metric: SplitMetric) -> Self {
        self.split = metric;
        self
    }

    /// `0` means unbounded depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// `None` disables the node-complexity stop.
    pub fn node_complexity_tau(mut self, tau: Option<f64>) -> Self {
        self.node_complexity_tau = tau;
        self
    }

    pub fn min_num_instances(mut self, n: usize) -> Self {
        self.min_num_instances = n;
        self
    }

    pub fn tree_count_value(&self) -> usize {
        self.tree_count
    }

    pub fn sampling(&self) -> SamplingPolicy {
        self.sampling
    }

    pub fn split_metric(&self) -> SplitMetric {
        self.split
    }

    pub fn max_depth_value(&self) -> usize {
        self.max_depth
    }

    pub fn node_complexity_tau_value(&self) -> Option<f64> {
        self.node_complexity_tau
    }

    pub fn min_num_instances_value(&self) -> usize {
        self.min_num_instances
    }

    /// Number of features to draw per node out of `total` available.
    pub fn features_per_node_for(&self, total: usize) -> ForestResult<usize> {
        Ok(self.features_per_node.evaluate(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_contract() {
        let opts = Options::new();
        assert_eq!(opts.tree_count_value(), 256);
        assert_eq!(opts.sampling(), SamplingPolicy::Bootstrap);
        assert_eq!(opts.split_metric(), SplitMetric::Gini);
        assert_eq!(opts.max_depth_value(), 0);
        assert_eq!(opts.node_complexity_tau_value(), None);
        assert_eq!(opts.min_num_instances_value(), 1);
    }

    #[test]
    fn resample_count_and_bootstrap_sampling_are_mutually_exclusive() {
        let opts = Options::new().resample_count(50);
        assert_eq!(opts.sampling(), SamplingPolicy::Fixed(50));
        let opts = opts.bootstrap_sampling();
        assert_eq!(opts.sampling(), SamplingPolicy::Bootstrap);
    }

    #[test]
    fn property_9_feature_budget_table() {
        let cases = [(1usize, 1usize), (2, 2), (4, 2), (9, 3), (16, 4)];
        for (total, expected) in cases {
            assert_eq!(FeatureBudget::Sqrt.evaluate(total), expected);
        }
    }

    #[test]
    fn s6_feature_budget_sqrt_and_log_at_100() {
        assert_eq!(FeatureBudget::Sqrt.evaluate(100), 10);
        assert_eq!(FeatureBudget::Log.evaluate(100), 5);
    }

    #[test]
    fn feature_budget_all_and_const() {
        assert_eq!(FeatureBudget::All.evaluate(37), 37);
        assert_eq!(FeatureBudget::Const(7).evaluate(1000), 7);
    }
}
