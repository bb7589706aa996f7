//! leptonica-forest - Random forest training primitives
//!
//! Split scorers, stop predicates, option validation, and posterior
//! accumulators used while growing a single decision tree. Ensemble-level
//! concerns (bagging, parallel tree construction, serialization) live
//! outside this crate; it operates purely on caller-supplied feature,
//! label, and weight slices.

mod accumulators;
mod error;
mod options;
mod scorer;
mod stop;

pub use accumulators::{ArgMaxAcc, ArgMaxVectorAcc};
pub use error::{ForestError, ForestResult};
pub use options::{FeatureBudget, Options, SamplingPolicy};
pub use scorer::{
    FeatureMatrix, FeatureRow, LessEqualTest, SplitDirection, SplitMetric, SplitResult,
    SplitScorer,
};
pub use stop::{NodeComplexityStop, NodeDescription, StopPredicate, is_pure};
