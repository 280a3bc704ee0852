pub mod csv;
pub mod json;
pub mod spreadsheet;

use crate::model::{Party, RawTable};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error on line {line}: {message}")]
    Csv { line: usize, message: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("Spreadsheet has no worksheets: {0}")]
    EmptyWorkbook(String),
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),
    #[error("Unrecognized JSON shape: {0}")]
    UnrecognizedShape(String),
}

pub type Result<T> = std::result::Result<T, FormatError>;

/// Tabular formats understood by the readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
    Spreadsheet,
}

impl Format {
    fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(Format::Csv),
            "json" => Some(Format::Json),
            "xlsx" | "xlsm" | "xls" | "ods" => Some(Format::Spreadsheet),
            _ => None,
        }
    }

    /// Detect the format of `path`, looking through a trailing `.gz`.
    /// Returns the format and whether the file is gzip-compressed.
    pub fn detect(path: &Path) -> Result<(Format, bool)> {
        let unsupported = || FormatError::UnsupportedFormat(path.display().to_string());
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(unsupported)?;

        if ext.eq_ignore_ascii_case("gz") {
            let inner = path
                .file_stem()
                .map(Path::new)
                .and_then(|stem| stem.extension())
                .and_then(|e| e.to_str())
                .and_then(Format::from_extension)
                .ok_or_else(unsupported)?;
            if inner == Format::Spreadsheet {
                return Err(unsupported());
            }
            return Ok((inner, true));
        }

        Format::from_extension(ext)
            .map(|f| (f, false))
            .ok_or_else(unsupported)
    }
}

/// Output formats for the (name, votes) export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format: {}", other)),
        }
    }
}

impl ExportFormat {
    /// Guess from an output file name, defaulting to CSV.
    pub fn for_path(path: &Path) -> ExportFormat {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }

    pub fn render(self, parties: &[Party]) -> Result<String> {
        match self {
            ExportFormat::Csv => Ok(csv::to_csv(parties)),
            ExportFormat::Json => json::to_json(parties),
        }
    }
}

fn read_text(path: &Path, compressed: bool) -> Result<String> {
    let mut contents = String::new();
    let file = File::open(path)?;
    if compressed {
        GzDecoder::new(file).read_to_string(&mut contents)?;
    } else {
        let mut file = file;
        file.read_to_string(&mut contents)?;
    }
    Ok(contents)
}

/// Read a raw table from `path`, choosing the reader by file extension.
pub fn read_table(path: &Path) -> Result<RawTable> {
    let (format, compressed) = Format::detect(path)?;
    tracing::debug!(path = %path.display(), ?format, compressed, "reading table");

    match format {
        Format::Csv => csv::parse_csv(&read_text(path, compressed)?),
        Format::Json => json::parse_json(&read_text(path, compressed)?),
        Format::Spreadsheet => spreadsheet::read_spreadsheet(path),
    }
}

/// Write the (name, votes) pairs of `parties` to `path`.
pub fn write_table(path: &Path, parties: &[Party], format: ExportFormat) -> Result<()> {
    let contents = format.render(parties)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_formats() {
        let detect = |p: &str| Format::detect(&PathBuf::from(p)).ok();
        assert_eq!(detect("votes.csv"), Some((Format::Csv, false)));
        assert_eq!(detect("votes.JSON"), Some((Format::Json, false)));
        assert_eq!(detect("votes.xlsx"), Some((Format::Spreadsheet, false)));
        assert_eq!(detect("votes.csv.gz"), Some((Format::Csv, true)));
        assert_eq!(detect("votes.xlsx.gz"), None);
        assert_eq!(detect("votes.txt"), None);
        assert_eq!(detect("votes"), None);
    }

    #[test]
    fn export_format_from_str() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("json".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
