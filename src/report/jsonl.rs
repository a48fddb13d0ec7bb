use super::ReportResult;
use crate::prediction::Prediction;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes predictions as JSON lines, one object per line
pub struct JsonlWriter<W: Write> {
    writer: W,
    written: usize,
}

impl JsonlWriter<BufWriter<File>> {
    /// Create (or truncate) the file at `path`
    pub fn create(path: &Path) -> ReportResult<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonlWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn write(&mut self, prediction: &Prediction) -> ReportResult<()> {
        serde_json::to_writer(&mut self.writer, prediction)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and return the underlying writer
    pub fn finish(mut self) -> ReportResult<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::{ErrorType, Severity};
    use std::fs;
    use tempfile::TempDir;

    fn sample() -> Vec<Prediction> {
        vec![
            Prediction::new(
                "[child init 1 -2]",
                Some(ErrorType::Runtime),
                Some(Severity::Error),
                Some("Child init failed".to_string()),
                Some("Check dependencies".to_string()),
            ),
            Prediction::fallback("odd line"),
        ]
    }

    #[test]
    fn test_writes_one_object_per_line() {
        let mut writer = JsonlWriter::new(Vec::new());
        for prediction in sample() {
            writer.write(&prediction).unwrap();
        }
        assert_eq!(writer.written(), 2);

        let bytes = writer.finish().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            r#"{"input":"odd line","error_type":"no_error","severity":"notice","description":"","solution":""}"#
        );

        let first: Prediction = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, sample()[0]);
    }

    #[test]
    fn test_create_truncates_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("predictions_actual.json");
        fs::write(&path, "stale\nstale\nstale\n").unwrap();

        let mut writer = JsonlWriter::create(&path).unwrap();
        writer.write(&sample()[0]).unwrap();
        writer.finish().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.ends_with('\n'));
        assert!(content.contains("\"error_type\":\"runtime\""));
    }
}
