use thiserror::Error;

/// Engine error types
#[derive(Error, Debug)]
pub enum EngineError {
    /// Department missing from the fitted encoding
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    /// Persisted artifact set is missing or structurally incompatible
    #[error("Artifact load error: {0}")]
    ArtifactLoad(String),

    /// Caller-supplied value outside its documented domain
    #[error("Invalid feature range: {0}")]
    InvalidFeatureRange(String),

    /// Training corpus too small or degenerate
    #[error(
        "Training data insufficient: {records} records ({leave} leave / {stay} stay), \
         need at least {min_records} records and {min_per_class} per class"
    )]
    TrainingDataInsufficient {
        records: usize,
        leave: usize,
        stay: usize,
        min_records: usize,
        min_per_class: usize,
    },

    /// Underlying model fit or predict failure
    #[error("Model error: {0}")]
    Model(String),

    /// Corpus file errors
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EngineError {
    /// Get error code string (stable identifiers for the web layer)
    pub fn error_code(&self) -> &str {
        match self {
            EngineError::UnknownDepartment(_) => "UNKNOWN_DEPARTMENT",
            EngineError::ArtifactLoad(_) => "ARTIFACT_LOAD_ERROR",
            EngineError::InvalidFeatureRange(_) => "INVALID_FEATURE_RANGE",
            EngineError::TrainingDataInsufficient { .. } => "TRAINING_DATA_INSUFFICIENT",
            EngineError::Model(_) => "MODEL_ERROR",
            EngineError::Corpus(_) => "CORPUS_ERROR",
            EngineError::Io(_) => "IO_ERROR",
            EngineError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

/// Conversion from validator::ValidationErrors
impl From<validator::ValidationErrors> for EngineError {
    fn from(err: validator::ValidationErrors) -> Self {
        EngineError::InvalidFeatureRange(err.to_string())
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}

/// Conversion from bincode::Error
impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}

/// Conversion from csv::Error
impl From<csv::Error> for EngineError {
    fn from(err: csv::Error) -> Self {
        EngineError::Corpus(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            EngineError::UnknownDepartment("Quantum".to_string()).error_code(),
            "UNKNOWN_DEPARTMENT"
        );
        assert_eq!(
            EngineError::ArtifactLoad("missing".to_string()).error_code(),
            "ARTIFACT_LOAD_ERROR"
        );
        assert_eq!(
            EngineError::InvalidFeatureRange("salary".to_string()).error_code(),
            "INVALID_FEATURE_RANGE"
        );
    }

    #[test]
    fn test_training_data_error_message_carries_diagnostics() {
        let err = EngineError::TrainingDataInsufficient {
            records: 12,
            leave: 12,
            stay: 0,
            min_records: 30,
            min_per_class: 5,
        };
        let message = err.to_string();
        assert!(message.contains("12 records"));
        assert!(message.contains("0 stay"));
    }
}
