//! Employee attrition risk and performance prediction engine
//!
//! This crate is the prediction core behind an HR analytics service:
//! - Deterministic feature construction from raw employee attributes
//! - Scaling-consistent invocation of a binary attrition classifier and a
//!   performance regressor
//! - Probability-to-tier thresholding for coarse risk buckets
//! - A rule-based synthetic corpus generator for bootstrapping training data
//! - A trainer that persists the fitted artifact set atomically
//!
//! The web layer, record persistence and CLI tooling are external
//! collaborators: they construct a [`ModelArtifactSet`] once at startup and
//! pass it into a [`PredictionPipeline`] explicitly.
//!
//! ```no_run
//! use hr_attrition_engine::{
//!     CorpusRecord, EmployeeRecord, PredictionPipeline, SyntheticLabelGenerator, Trainer,
//! };
//!
//! # fn main() -> hr_attrition_engine::Result<()> {
//! // Bootstrap a corpus, train and persist the artifact set
//! let mut generator = SyntheticLabelGenerator::with_seed(42);
//! let corpus: Vec<CorpusRecord> =
//!     generator.generate(500).iter().map(CorpusRecord::from).collect();
//! Trainer::default().train_and_save(&corpus, "data/artifacts")?;
//!
//! // Serve predictions over the persisted set
//! let pipeline = PredictionPipeline::load("data/artifacts")?;
//! let employee = EmployeeRecord::new(30, 5, 45_000.0, "IT").with_satisfaction(0.2);
//! let prediction = pipeline.predict_one(&employee)?;
//! println!("{} ({:?})", prediction.attrition_probability, prediction.risk_tier);
//! # Ok(())
//! # }
//! ```

pub mod artifacts;
pub mod config;
pub mod corpus;
pub mod error;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod risk;
pub mod scaling;
pub mod synthetic;
pub mod training;

pub use artifacts::ModelArtifactSet;
pub use config::{CoreConfig, GeneratorSettings, TrainingSettings};
pub use corpus::{read_corpus_csv, write_corpus_csv, CorpusDiagnostics, CorpusRecord};
pub use error::{EngineError, Result};
pub use features::{
    DepartmentEncoding, EmployeeRecord, FeatureDefaults, FeatureEncoder, FEATURE_COLUMNS,
    FEATURE_COUNT,
};
pub use model::{AttritionClassifier, Model, PerformanceRegressor, TrainingMetrics};
pub use pipeline::{PredictionPipeline, PredictionResult};
pub use risk::{AttritionLabel, RiskTier};
pub use scaling::StandardScaler;
pub use synthetic::{RiskArchetype, SyntheticLabelGenerator, SyntheticRecord};
pub use training::Trainer;
