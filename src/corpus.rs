use crate::error::Result;
use crate::features::EmployeeRecord;
use crate::risk::AttritionLabel;
use crate::synthetic::SyntheticRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One row of the tabular training corpus
///
/// Field names match the CSV header of the interchange format; the attrition
/// column uses the `Y`/`N` flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusRecord {
    pub age: u32,
    pub experience: u32,
    pub salary: f64,
    pub department: String,
    pub satisfaction_level: f64,
    pub last_evaluation_score: f64,
    pub project_count: u32,
    pub work_hours: u32,
    pub performance_score: f64,
    #[serde(with = "attrition_flag")]
    pub attrition: AttritionLabel,
    pub attrition_probability: f64,
}

impl CorpusRecord {
    /// View this row as a fully-specified employee for encoding
    pub fn to_employee(&self) -> EmployeeRecord {
        EmployeeRecord::new(self.age, self.experience, self.salary, self.department.clone())
            .with_satisfaction(self.satisfaction_level)
            .with_last_evaluation(self.last_evaluation_score)
            .with_project_count(self.project_count)
            .with_work_hours(self.work_hours)
    }
}

impl From<&SyntheticRecord> for CorpusRecord {
    fn from(record: &SyntheticRecord) -> Self {
        Self {
            age: record.age,
            experience: record.experience,
            salary: record.salary,
            department: record.department.clone(),
            satisfaction_level: record.satisfaction,
            last_evaluation_score: record.last_evaluation,
            project_count: record.project_count,
            work_hours: record.work_hours,
            performance_score: record.performance_score,
            attrition: record.attrition,
            attrition_probability: record.attrition_probability,
        }
    }
}

mod attrition_flag {
    use crate::risk::AttritionLabel;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        label: &AttritionLabel,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(label.as_flag())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<AttritionLabel, D::Error> {
        let flag = String::deserialize(deserializer)?;
        AttritionLabel::from_flag(&flag)
            .ok_or_else(|| D::Error::custom(format!("invalid attrition flag: {}", flag)))
    }
}

/// Class balance summary used for training gates and diagnostics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusDiagnostics {
    pub records: usize,
    pub leave: usize,
    pub stay: usize,
    pub departments: usize,
}

impl CorpusDiagnostics {
    pub fn describe(records: &[CorpusRecord]) -> Self {
        let leave = records
            .iter()
            .filter(|r| r.attrition == AttritionLabel::Leave)
            .count();
        let departments = records
            .iter()
            .map(|r| r.department.as_str())
            .collect::<std::collections::BTreeSet<_>>()
            .len();

        Self {
            records: records.len(),
            leave,
            stay: records.len() - leave,
            departments,
        }
    }
}

/// Read a corpus file, failing on the first malformed row
pub fn read_corpus_csv(path: impl AsRef<Path>) -> Result<Vec<CorpusRecord>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }

    info!(
        path = %path.as_ref().display(),
        records = records.len(),
        "Loaded training corpus"
    );

    Ok(records)
}

/// Write a corpus file with the interchange header
pub fn write_corpus_csv(path: impl AsRef<Path>, records: &[CorpusRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!(
        path = %path.as_ref().display(),
        records = records.len(),
        "Wrote training corpus"
    );

    Ok(())
}
