use vigia_core::{AppError, AppResult};

/// Semicolon-delimited CSV rendering.
pub(crate) mod tabular;

/// XLSX workbook rendering.
pub(crate) mod spreadsheet;

/// Paginated PDF document rendering.
pub(crate) mod document;

/// Supported export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Semicolon-delimited UTF-8 CSV.
    Csv,
    /// XLSX workbook with a single `Logs` sheet.
    Spreadsheet,
    /// Paginated A4 PDF report.
    Document,
}

impl ExportFormat {
    /// Parses a transport format selector.
    ///
    /// Any value outside `csv` / `excel` / `pdf` is rejected with
    /// [`AppError::UnsupportedFormat`] and no byte stream is produced.
    pub fn from_transport(value: &str) -> AppResult<Self> {
        match value {
            "csv" => Ok(Self::Csv),
            "excel" => Ok(Self::Spreadsheet),
            "pdf" => Ok(Self::Document),
            other => Err(AppError::UnsupportedFormat(other.to_owned())),
        }
    }
}

/// A rendered export ready to be served as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Download filename.
    pub filename: &'static str,
    /// MIME content type.
    pub content_type: &'static str,
    /// Rendered bytes.
    pub bytes: Vec<u8>,
}

/// Flattened row shape shared by every export format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExportRow {
    pub id: i64,
    pub actor: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: i64,
    pub previous_data: Option<String>,
    pub new_data: Option<String>,
    /// Timestamp preformatted as `DD/MM/YYYY HH:MM:SS`.
    pub recorded_at: String,
}

/// Column headers shared by the tabular formats.
pub(crate) const EXPORT_HEADER: [&str; 8] = [
    "ID",
    "User",
    "Action",
    "Entity",
    "Entity ID",
    "Previous Data",
    "New Data",
    "Timestamp",
];

#[cfg(test)]
mod tests {
    use vigia_core::AppError;

    use super::ExportFormat;

    #[test]
    fn known_transport_values_parse() {
        assert_eq!(
            ExportFormat::from_transport("csv").ok(),
            Some(ExportFormat::Csv)
        );
        assert_eq!(
            ExportFormat::from_transport("excel").ok(),
            Some(ExportFormat::Spreadsheet)
        );
        assert_eq!(
            ExportFormat::from_transport("pdf").ok(),
            Some(ExportFormat::Document)
        );
    }

    #[test]
    fn unknown_transport_value_is_unsupported() {
        let result = ExportFormat::from_transport("xml");
        assert!(matches!(result, Err(AppError::UnsupportedFormat(_))));
    }
}
