use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Default column separator of the validation files
pub const DEFAULT_DELIMITER: char = '|';

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dataset {0} contains no rows")]
    Empty(PathBuf),
}

/// One labelled log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRow {
    /// 1-based line number in the source file
    pub line_number: usize,
    pub input: String,
    /// Remaining columns, the expected labels
    pub expected: Vec<String>,
}

/// A delimited file of log lines and their expected labels
#[derive(Debug, Clone)]
pub struct Dataset {
    path: PathBuf,
    rows: Vec<DatasetRow>,
    skipped: usize,
}

impl Dataset {
    /// Read the file line by line, classifying each row as it is read
    pub fn load(path: impl AsRef<Path>, delimiter: char) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let io_error = |source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        };

        let reader = BufReader::new(File::open(path).map_err(io_error)?);
        let mut builder = RowBuilder::new(delimiter);
        for (index, line) in reader.lines().enumerate() {
            builder.push_line(index + 1, &line.map_err(io_error)?);
        }

        let dataset = builder.finish(path);
        if dataset.rows.is_empty() {
            return Err(DatasetError::Empty(path.to_path_buf()));
        }

        info!(
            "Loaded {} rows from {} ({} skipped)",
            dataset.rows.len(),
            path.display(),
            dataset.skipped
        );
        Ok(dataset)
    }

    /// Parse delimited content held in memory
    pub fn parse(path: impl AsRef<Path>, content: &str, delimiter: char) -> Self {
        let mut builder = RowBuilder::new(delimiter);
        for (index, line) in content.lines().enumerate() {
            builder.push_line(index + 1, line);
        }
        builder.finish(path.as_ref())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows dropped for lacking an input column
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Accumulates rows one line at a time. A leading header whose first column
/// is `input` is dropped, blank lines are ignored, rows without an input are
/// counted as skipped.
struct RowBuilder {
    delimiter: char,
    rows: Vec<DatasetRow>,
    skipped: usize,
    seen_first: bool,
}

impl RowBuilder {
    fn new(delimiter: char) -> Self {
        Self {
            delimiter,
            rows: Vec::new(),
            skipped: 0,
            seen_first: false,
        }
    }

    fn push_line(&mut self, line_number: usize, line: &str) {
        if line.trim().is_empty() {
            return;
        }

        let mut columns = split_columns(line, self.delimiter).into_iter();
        let input = columns.next().unwrap_or_default();

        if !self.seen_first {
            self.seen_first = true;
            if input.eq_ignore_ascii_case("input") {
                debug!("Skipping header row");
                return;
            }
        }

        if input.is_empty() {
            debug!("Skipping row {} without input", line_number);
            self.skipped += 1;
            return;
        }

        self.rows.push(DatasetRow {
            line_number,
            input,
            expected: columns.collect(),
        });
    }

    fn finish(self, path: &Path) -> Dataset {
        Dataset {
            path: path.to_path_buf(),
            rows: self.rows,
            skipped: self.skipped,
        }
    }
}

/// Split one line into columns. A column opening with `"` runs to the
/// matching closing quote, so it may contain the delimiter; `""` inside it
/// is a literal quote. Unquoted columns are trimmed. Quoted columns cannot
/// span lines.
fn split_columns(line: &str, delimiter: char) -> Vec<String> {
    let mut columns = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    // Length of the quoted text once its closing quote was seen
    let mut quoted_len: Option<usize> = None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c != '"' {
                current.push(c);
            } else if chars.peek() == Some(&'"') {
                chars.next();
                current.push('"');
            } else {
                in_quotes = false;
                quoted_len = Some(current.len());
            }
        } else if c == delimiter {
            columns.push(finish_column(&current, quoted_len));
            current.clear();
            quoted_len = None;
        } else if c == '"' && quoted_len.is_none() && current.trim().is_empty() {
            current.clear();
            in_quotes = true;
        } else {
            current.push(c);
        }
    }

    // An unterminated quote keeps everything after it
    if in_quotes {
        quoted_len = Some(current.len());
    }
    columns.push(finish_column(&current, quoted_len));
    columns
}

fn finish_column(text: &str, quoted_len: Option<usize>) -> String {
    match quoted_len {
        Some(len) => format!("{}{}", &text[..len], text[len..].trim()),
        None => text.trim().to_string(),
    }
}
