use csv::WriterBuilder;

use vigia_core::{AppError, AppResult};

use super::{EXPORT_HEADER, ExportFile, ExportRow};

/// Renders the row set as semicolon-delimited UTF-8 CSV with a header
/// row. An empty set yields a header-only document.
pub(crate) fn render(rows: &[ExportRow]) -> AppResult<ExportFile> {
    let mut writer = WriterBuilder::new().delimiter(b';').from_writer(Vec::new());

    writer
        .write_record(EXPORT_HEADER)
        .map_err(|error| AppError::Internal(format!("failed to write csv header: {error}")))?;

    for row in rows {
        writer
            .write_record([
                row.id.to_string().as_str(),
                row.actor.as_str(),
                row.action.as_str(),
                row.entity_type.as_str(),
                row.entity_id.to_string().as_str(),
                row.previous_data.as_deref().unwrap_or(""),
                row.new_data.as_deref().unwrap_or(""),
                row.recorded_at.as_str(),
            ])
            .map_err(|error| AppError::Internal(format!("failed to write csv row: {error}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| AppError::Internal(format!("failed to finish csv export: {error}")))?;

    Ok(ExportFile {
        filename: "logs.csv",
        content_type: "text/csv; charset=utf-8",
        bytes,
    })
}
