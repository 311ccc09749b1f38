use std::io::BufWriter;

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};

use vigia_core::{AppError, AppResult};

use super::{ExportFile, ExportRow};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const LEFT_MARGIN: f32 = 15.0;
const BOTTOM_MARGIN: f32 = 20.0;
const HEADING_Y: f32 = 280.0;
const TOP_CURSOR: f32 = 268.0;
const LINE_HEIGHT: f32 = 4.5;
const WRAP_WIDTH: usize = 100;

/// Renders the row set as a paginated A4 PDF report.
///
/// Each record contributes a summary line, labeled before/after blocks
/// when present and non-empty, and a separator. Blocks flow across page
/// breaks; a block heading is never emitted without checking room first.
/// An empty set yields a title-only document.
pub(crate) fn render(rows: &[ExportRow]) -> AppResult<ExportFile> {
    let (document, first_page, first_layer) =
        PdfDocument::new("Audit Report", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");

    let regular = document
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|error| AppError::Internal(format!("failed to load report font: {error}")))?;
    let bold = document
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|error| AppError::Internal(format!("failed to load report font: {error}")))?;

    {
        let mut cursor = PageCursor {
            document: &document,
            layer: document.get_page(first_page).get_layer(first_layer),
            regular,
            bold,
            y: TOP_CURSOR,
        };

        cursor
            .layer
            .use_text("Audit Report", 16.0, Mm(LEFT_MARGIN), Mm(HEADING_Y), &cursor.bold);

        for row in rows {
            cursor.record(row);
        }
    }

    let mut bytes = Vec::new();
    let mut writer = BufWriter::new(&mut bytes);
    document
        .save(&mut writer)
        .map_err(|error| AppError::Internal(format!("failed to finish pdf export: {error}")))?;
    writer
        .into_inner()
        .map_err(|error| AppError::Internal(format!("failed to flush pdf export: {error}")))?;

    Ok(ExportFile {
        filename: "logs.pdf",
        content_type: "application/pdf",
        bytes,
    })
}

struct PageCursor<'a> {
    document: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PageCursor<'_> {
    fn record(&mut self, row: &ExportRow) {
        self.ensure_room(LINE_HEIGHT);
        let summary = format!(
            "{} - {} - {} - {} (id: {})",
            row.recorded_at, row.actor, row.action, row.entity_type, row.entity_id
        );
        self.bold_line(summary.as_str(), 10.0);

        self.block("Previous Data:", row.previous_data.as_deref());
        self.block("New Data:", row.new_data.as_deref());

        self.separator();
    }

    fn block(&mut self, label: &str, text: Option<&str>) {
        let Some(text) = text.filter(|value| !value.trim().is_empty()) else {
            return;
        };

        // Room for the heading plus at least one wrapped line.
        self.ensure_room(LINE_HEIGHT * 2.0);
        self.bold_line(label, 9.0);

        for line in wrap(text, WRAP_WIDTH) {
            self.line(line.as_str(), 9.0);
        }
    }

    fn line(&mut self, text: &str, size: f32) {
        if self.y < BOTTOM_MARGIN {
            self.new_page();
        }
        self.layer
            .use_text(text, size, Mm(LEFT_MARGIN), Mm(self.y), &self.regular);
        self.y -= LINE_HEIGHT;
    }

    fn bold_line(&mut self, text: &str, size: f32) {
        if self.y < BOTTOM_MARGIN {
            self.new_page();
        }
        self.layer
            .use_text(text, size, Mm(LEFT_MARGIN), Mm(self.y), &self.bold);
        self.y -= LINE_HEIGHT;
    }

    fn separator(&mut self) {
        self.ensure_room(LINE_HEIGHT);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(LEFT_MARGIN), Mm(self.y)), false),
                (Point::new(Mm(PAGE_WIDTH - LEFT_MARGIN), Mm(self.y)), false),
            ],
            is_closed: false,
        });
        self.y -= LINE_HEIGHT;
    }

    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed < BOTTOM_MARGIN {
            self.new_page();
        }
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .document
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");
        self.layer = self.document.get_page(page).get_layer(layer);
        self.layer.use_text(
            "Audit Report (continued)",
            12.0,
            Mm(LEFT_MARGIN),
            Mm(HEADING_Y),
            &self.bold,
        );
        self.y = TOP_CURSOR;
    }
}

/// Word-wraps text to the report width, preserving existing line breaks
/// and hard-splitting words longer than one line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for source_line in text.lines() {
        if source_line.chars().count() <= width {
            lines.push(source_line.to_owned());
            continue;
        }

        let mut current = String::new();
        for word in source_line.split_whitespace() {
            let word_length = word.chars().count();

            if !current.is_empty() && current.chars().count() + 1 + word_length > width {
                lines.push(std::mem::take(&mut current));
            }

            if word_length > width {
                // Hard-split oversized tokens.
                let mut chunk = String::new();
                for character in word.chars() {
                    chunk.push(character);
                    if chunk.chars().count() == width {
                        lines.push(std::mem::take(&mut chunk));
                    }
                }
                current = chunk;
                continue;
            }

            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::wrap;

    #[test]
    fn short_lines_pass_through() {
        assert_eq!(wrap("name: Clerk", 100), vec!["name: Clerk".to_owned()]);
    }

    #[test]
    fn long_lines_break_at_word_boundaries() {
        let text = "alpha beta gamma delta";
        let lines = wrap(text, 11);
        assert_eq!(
            lines,
            vec!["alpha beta".to_owned(), "gamma delta".to_owned()]
        );
    }

    #[test]
    fn oversized_tokens_are_hard_split() {
        let lines = wrap("abcdefghij", 4);
        assert_eq!(
            lines,
            vec!["abcd".to_owned(), "efgh".to_owned(), "ij".to_owned()]
        );
    }
}
