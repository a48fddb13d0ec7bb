use crate::dataset::DEFAULT_DELIMITER;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A dataset to classify and where its predictions go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetTarget {
    pub path: PathBuf,
    pub output: PathBuf,
}

impl DatasetTarget {
    pub fn new(path: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            output: output.into(),
        }
    }
}

/// Which datasets a run covers, loadable from YAML:
///
/// ```yaml
/// delimiter: "|"
/// datasets:
///   - path: data/validation/actual_validation.csv
///     output: predictions_actual.json
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunPlan {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    pub datasets: Vec<DatasetTarget>,
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

impl Default for RunPlan {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            datasets: vec![
                DatasetTarget::new(
                    "data/validation/actual_validation.csv",
                    "predictions_actual.json",
                ),
                DatasetTarget::new(
                    "data/validation/synthetic_validation.csv",
                    "predictions_synthetic.json",
                ),
            ],
        }
    }
}

impl RunPlan {
    /// Plan covering a single dataset
    pub fn single(target: DatasetTarget, delimiter: char) -> Self {
        Self {
            delimiter,
            datasets: vec![target],
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read run plan {}", path.display()))?;
        let plan: RunPlan = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse run plan {}", path.display()))?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn validate(&self) -> Result<()> {
        if self.datasets.is_empty() {
            anyhow::bail!("Run plan lists no datasets");
        }

        for (i, target) in self.datasets.iter().enumerate() {
            if target.path == target.output {
                anyhow::bail!(
                    "Dataset #{} would overwrite its own input {}",
                    i + 1,
                    target.path.display()
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_plan() {
        let plan = RunPlan::default();
        assert_eq!(plan.delimiter, '|');
        assert_eq!(plan.datasets.len(), 2);
        assert_eq!(plan.datasets[0].output, PathBuf::from("predictions_actual.json"));
        assert_eq!(plan.datasets[1].output, PathBuf::from("predictions_synthetic.json"));
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_load_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.yaml");
        fs::write(
            &path,
            "datasets:\n  - path: data/a.csv\n    output: out/a.json\n  - path: data/b.csv\n    output: out/b.json\n",
        )
        .unwrap();

        let plan = RunPlan::load(&path).unwrap();
        assert_eq!(plan.delimiter, '|');
        assert_eq!(plan.datasets[1], DatasetTarget::new("data/b.csv", "out/b.json"));
    }

    #[test]
    fn test_load_yaml_custom_delimiter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.yaml");
        fs::write(&path, "delimiter: \";\"\ndatasets:\n  - path: a.csv\n    output: a.json\n").unwrap();

        assert_eq!(RunPlan::load(&path).unwrap().delimiter, ';');
    }

    #[test]
    fn test_rejects_empty_and_self_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.yaml");
        fs::write(&path, "datasets: []\n").unwrap();
        assert!(RunPlan::load(&path).is_err());

        let plan = RunPlan::single(DatasetTarget::new("a.csv", "a.csv"), '|');
        assert!(plan.validate().unwrap_err().to_string().contains("overwrite"));
    }
}
