use rust_xlsxwriter::Workbook;

use vigia_core::{AppError, AppResult};

use super::{EXPORT_HEADER, ExportFile, ExportRow};

/// Renders the row set as an XLSX workbook with a single sheet named
/// `Logs`. An empty set yields a header-only sheet.
pub(crate) fn render(rows: &[ExportRow]) -> AppResult<ExportFile> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet
        .set_name("Logs")
        .map_err(|error| AppError::Internal(format!("failed to name export sheet: {error}")))?;

    for (column, header) in EXPORT_HEADER.iter().enumerate() {
        worksheet
            .write_string(0, column as u16, *header)
            .map_err(|error| AppError::Internal(format!("failed to write header: {error}")))?;
    }

    for (index, row) in rows.iter().enumerate() {
        let sheet_row = index as u32 + 1;
        let cells = [
            row.id.to_string(),
            row.actor.clone(),
            row.action.clone(),
            row.entity_type.clone(),
            row.entity_id.to_string(),
            row.previous_data.clone().unwrap_or_default(),
            row.new_data.clone().unwrap_or_default(),
            row.recorded_at.clone(),
        ];
        for (column, cell) in cells.iter().enumerate() {
            worksheet
                .write_string(sheet_row, column as u16, cell)
                .map_err(|error| {
                    AppError::Internal(format!("failed to write export cell: {error}"))
                })?;
        }
    }

    let bytes = workbook
        .save_to_buffer()
        .map_err(|error| AppError::Internal(format!("failed to finish xlsx export: {error}")))?;

    Ok(ExportFile {
        filename: "logs.xlsx",
        content_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        bytes,
    })
}
