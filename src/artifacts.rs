use crate::error::{EngineError, Result};
use crate::features::FeatureEncoder;
use crate::model::{AttritionClassifier, Model, PerformanceRegressor};
use crate::scaling::StandardScaler;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::info;

pub const ENCODER_FILE: &str = "department_encoding.json";
pub const ATTRITION_SCALER_FILE: &str = "attrition_scaler.json";
pub const ATTRITION_MODEL_FILE: &str = "attrition_model.bin";
pub const PERFORMANCE_SCALER_FILE: &str = "performance_scaler.json";
pub const PERFORMANCE_MODEL_FILE: &str = "performance_model.bin";

/// The complete fitted bundle required to serve predictions
///
/// Produced once by the trainer, loaded once per process and never mutated
/// afterwards; all parts are persisted together and loaded together, and a
/// partial set on disk is a load error rather than a fallback.
#[derive(Serialize, Deserialize)]
pub struct ModelArtifactSet {
    pub encoder: FeatureEncoder,
    pub attrition_scaler: StandardScaler,
    pub attrition_model: AttritionClassifier,
    pub performance_scaler: StandardScaler,
    pub performance_model: PerformanceRegressor,
}

impl ModelArtifactSet {
    /// Persist all five artifacts, replacing any previous set atomically
    ///
    /// Files are written into a staging sibling of the target directory and
    /// renamed into place only once every write succeeded, so an interrupted
    /// run can never be picked up as a half-written set.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        self.validate()?;

        let staging = staging_path(dir)?;
        if staging.exists() {
            fs::remove_dir_all(&staging)?;
        }
        fs::create_dir_all(&staging)?;

        write_json(&staging.join(ENCODER_FILE), &self.encoder)?;
        write_json(&staging.join(ATTRITION_SCALER_FILE), &self.attrition_scaler)?;
        write_bincode(&staging.join(ATTRITION_MODEL_FILE), &self.attrition_model)?;
        write_json(
            &staging.join(PERFORMANCE_SCALER_FILE),
            &self.performance_scaler,
        )?;
        write_bincode(
            &staging.join(PERFORMANCE_MODEL_FILE),
            &self.performance_model,
        )?;

        if dir.exists() {
            fs::remove_dir_all(dir)?;
        }
        if let Some(parent) = dir.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::rename(&staging, dir)?;

        info!(dir = %dir.display(), "Artifact set saved");
        Ok(())
    }

    /// Load and cross-check a persisted artifact set
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(EngineError::ArtifactLoad(format!(
                "Artifact directory not found: {}",
                dir.display()
            )));
        }

        let set = Self {
            encoder: read_json(&dir.join(ENCODER_FILE))?,
            attrition_scaler: read_json(&dir.join(ATTRITION_SCALER_FILE))?,
            attrition_model: read_bincode(&dir.join(ATTRITION_MODEL_FILE))?,
            performance_scaler: read_json(&dir.join(PERFORMANCE_SCALER_FILE))?,
            performance_model: read_bincode(&dir.join(PERFORMANCE_MODEL_FILE))?,
        };

        set.validate()?;

        info!(
            dir = %dir.display(),
            departments = set.encoder.departments().len(),
            "Artifact set loaded"
        );

        Ok(set)
    }

    /// Verify the five parts agree on feature count and are actually trained
    fn validate(&self) -> Result<()> {
        let expected = self.encoder.n_features();

        for model in [
            &self.attrition_model as &dyn Model,
            &self.performance_model as &dyn Model,
        ] {
            match model.n_features() {
                Some(n) if n == expected => {}
                Some(n) => {
                    return Err(EngineError::ArtifactLoad(format!(
                        "{} expects {} features, encoder produces {}",
                        model.name(),
                        n,
                        expected
                    )))
                }
                None => {
                    return Err(EngineError::ArtifactLoad(format!(
                        "{} is not trained",
                        model.name()
                    )))
                }
            }
        }

        for (name, scaler) in [
            ("attrition scaler", &self.attrition_scaler),
            ("performance scaler", &self.performance_scaler),
        ] {
            if scaler.n_features() != expected {
                return Err(EngineError::ArtifactLoad(format!(
                    "{} fit on {} features, encoder produces {}",
                    name,
                    scaler.n_features(),
                    expected
                )));
            }
        }

        if self.encoder.departments().is_empty() {
            return Err(EngineError::ArtifactLoad(
                "Department encoding is empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn staging_path(dir: &Path) -> Result<PathBuf> {
    let name = dir
        .file_name()
        .ok_or_else(|| {
            EngineError::ArtifactLoad(format!("Invalid artifact directory: {}", dir.display()))
        })?
        .to_string_lossy();

    Ok(dir.with_file_name(format!("{}.staging", name)))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| {
        EngineError::ArtifactLoad(format!("Missing artifact {}: {}", path.display(), e))
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        EngineError::ArtifactLoad(format!("Corrupt artifact {}: {}", path.display(), e))
    })
}

fn write_bincode<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    bincode::serialize_into(BufWriter::new(file), value)?;
    Ok(())
}

fn read_bincode<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| {
        EngineError::ArtifactLoad(format!("Missing artifact {}: {}", path.display(), e))
    })?;
    bincode::deserialize_from(BufReader::new(file)).map_err(|e| {
        EngineError::ArtifactLoad(format!("Corrupt artifact {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusRecord;
    use crate::synthetic::SyntheticLabelGenerator;
    use crate::training::Trainer;

    fn trained_artifacts() -> ModelArtifactSet {
        let mut generator = SyntheticLabelGenerator::with_seed(42);
        let corpus: Vec<CorpusRecord> =
            generator.generate(150).iter().map(CorpusRecord::from).collect();
        let (artifacts, _) = Trainer::default().train(&corpus).unwrap();
        artifacts
    }

    #[test]
    fn test_save_load_round_trip() {
        let artifacts = trained_artifacts();
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("artifacts");

        artifacts.save(&target).unwrap();
        let loaded = ModelArtifactSet::load(&target).unwrap();

        assert_eq!(loaded.encoder, artifacts.encoder);
        assert_eq!(loaded.attrition_scaler, artifacts.attrition_scaler);
        assert!(loaded.attrition_model.is_trained());
        assert!(loaded.performance_model.is_trained());
    }

    #[test]
    fn test_save_replaces_previous_set() {
        let artifacts = trained_artifacts();
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("artifacts");

        artifacts.save(&target).unwrap();
        artifacts.save(&target).unwrap();

        assert!(ModelArtifactSet::load(&target).is_ok());
        assert!(!dir.path().join("artifacts.staging").exists());
    }

    #[test]
    fn test_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nothing-here");

        assert!(matches!(
            ModelArtifactSet::load(&missing),
            Err(EngineError::ArtifactLoad(_))
        ));
    }

    #[test]
    fn test_partial_set_fails() {
        let artifacts = trained_artifacts();
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("artifacts");

        artifacts.save(&target).unwrap();
        fs::remove_file(target.join(ATTRITION_MODEL_FILE)).unwrap();

        match ModelArtifactSet::load(&target) {
            Err(EngineError::ArtifactLoad(message)) => {
                assert!(message.contains(ATTRITION_MODEL_FILE));
            }
            _ => panic!("expected ArtifactLoad for missing model file"),
        }
    }

    #[test]
    fn test_corrupt_file_fails() {
        let artifacts = trained_artifacts();
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("artifacts");

        artifacts.save(&target).unwrap();
        fs::write(target.join(ATTRITION_SCALER_FILE), "not json").unwrap();

        assert!(matches!(
            ModelArtifactSet::load(&target),
            Err(EngineError::ArtifactLoad(_))
        ));
    }

    #[test]
    fn test_untrained_set_is_rejected_before_save() {
        let mut artifacts = trained_artifacts();
        artifacts.attrition_model = AttritionClassifier::new();

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("artifacts");

        assert!(matches!(
            artifacts.save(&target),
            Err(EngineError::ArtifactLoad(_))
        ));
        assert!(!target.exists());
    }
}
