//! PDF output via `printpdf` builtin Helvetica fonts.
//!
//! Builtin fonts carry no metrics, so text width is estimated from the
//! character count. Good enough for the fixed report grammar, which never
//! relies on tight fitting.

use std::io::BufWriter;

use printpdf::path::PaintMode;
use printpdf::*;

use dermassist_report::ReportDocument;
use dermassist_report::document::{
    Align, Bar, Block, Cell, Columns, FieldGrid, Panel, Section, TextBlock, TextSize, TextStyle,
};
use dermassist_report::visual::palette;

use crate::error::ExportError;
use crate::renderer::{ExportFormat, Renderer};
use crate::styles::DocumentStyles;

const PT_TO_MM: f32 = 0.352_778;
const LINE_SPACING: f32 = 1.4;
// Average Helvetica advance as a share of the font size.
const CHAR_WIDTH: f32 = 0.5;
const PANEL_PADDING: f32 = 4.0;
const CELL_PADDING: f32 = 2.0;
const SECTION_GAP: f32 = 4.0;
const BORDER_WIDTH: f32 = 0.4;
const BAR_HEIGHT: f32 = 2.5;

#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    styles: DocumentStyles,
}

impl PdfRenderer {
    pub fn new(styles: DocumentStyles) -> Self {
        Self { styles }
    }
}

impl Renderer for PdfRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, ExportError> {
        let bytes = generate_pdf(document, &self.styles)?;
        tracing::debug!(report_id = %document.report_id, bytes = bytes.len(), "rendered PDF");
        Ok(bytes)
    }
}

/// Generate a PDF from a composed report. Returns PDF bytes.
pub fn generate_pdf(
    document: &ReportDocument,
    styles: &DocumentStyles,
) -> Result<Vec<u8>, ExportError> {
    let (doc, page1, layer1) = PdfDocument::new(
        &document.title,
        Mm(styles.page_width_mm),
        Mm(styles.page_height_mm),
        "Layer 1",
    );
    let layer = doc.get_page(page1).get_layer(layer1);
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;

    let mut painter = Painter {
        layer,
        regular,
        bold,
        styles,
        y: styles.page_height_mm - styles.margin_mm,
        pages: 1,
    };

    for section in &document.sections {
        painter.section(&doc, section);
    }
    tracing::trace!(pages = painter.pages, "PDF layout complete");

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ExportError::Pdf(format!("buffer error: {e}")))
}

struct Painter<'a> {
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    styles: &'a DocumentStyles,
    /// Top of the next content, in mm from the page bottom.
    y: f32,
    pages: usize,
}

impl Painter<'_> {
    fn left(&self) -> f32 {
        self.styles.margin_mm
    }

    fn width(&self) -> f32 {
        self.styles.content_width_mm()
    }

    fn size_pt(&self, size: TextSize) -> f32 {
        self.styles.size_pt(size)
    }

    fn line_height(&self, size: TextSize) -> f32 {
        self.size_pt(size) * LINE_SPACING * PT_TO_MM
    }

    fn wrap(&self, text: &str, size: TextSize, width: f32) -> Vec<String> {
        let char_mm = self.size_pt(size) * CHAR_WIDTH * PT_TO_MM;
        let max_chars = ((width / char_mm).floor() as usize).max(1);
        wrap_text(&pdf_text(text), max_chars)
    }

    fn text_height(&self, block: &TextBlock, width: f32) -> f32 {
        self.wrap(&block.text, block.style.size, width).len() as f32
            * self.line_height(block.style.size)
    }

    /// Start a new page when fewer than `needed` mm remain.
    fn ensure(&mut self, doc: &PdfDocumentReference, needed: f32) {
        if self.y - needed >= self.styles.margin_mm {
            return;
        }
        let (page, layer) = doc.add_page(
            Mm(self.styles.page_width_mm),
            Mm(self.styles.page_height_mm),
            format!("Layer {}", self.pages + 1),
        );
        self.layer = doc.get_page(page).get_layer(layer);
        self.y = self.styles.page_height_mm - self.styles.margin_mm;
        self.pages += 1;
    }

    fn fill_rect(
        &self,
        x: f32,
        top: f32,
        width: f32,
        height: f32,
        color: dermassist_report::visual::Color,
    ) {
        let (r, g, b) = color.unit_rgb();
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
        let rect = Rect::new(Mm(x), Mm(top - height), Mm(x + width), Mm(top))
            .with_mode(PaintMode::Fill);
        self.layer.add_rect(rect);
    }

    fn panel(&self, panel: &Panel, top: f32, height: f32) {
        let (x, width) = (self.left(), self.width());
        match panel.border {
            Some(border) => {
                self.fill_rect(x, top, width, height, border);
                self.fill_rect(
                    x + BORDER_WIDTH,
                    top - BORDER_WIDTH,
                    width - 2.0 * BORDER_WIDTH,
                    height - 2.0 * BORDER_WIDTH,
                    panel.background,
                );
            }
            None => self.fill_rect(x, top, width, height, panel.background),
        }
    }

    /// Draw wrapped text inside `[x, x + width]` starting at `top`.
    /// Returns the height used.
    fn text(&self, block: &TextBlock, x: f32, top: f32, width: f32) -> f32 {
        let style = &block.style;
        let size = self.size_pt(style.size);
        let line_h = self.line_height(style.size);
        let char_mm = size * CHAR_WIDTH * PT_TO_MM;
        let font = if style.bold { &self.bold } else { &self.regular };

        let (r, g, b) = style.color.unit_rgb();
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));

        let lines = self.wrap(&block.text, style.size, width);
        for (i, line) in lines.iter().enumerate() {
            let text_w = line.chars().count() as f32 * char_mm;
            let line_x = match style.align {
                Align::Left => x,
                Align::Center => x + ((width - text_w) / 2.0).max(0.0),
                Align::Right => x + (width - text_w).max(0.0),
            };
            let baseline = top - (i as f32 * line_h) - line_h * 0.75;
            self.layer
                .use_text(line.as_str(), size, Mm(line_x), Mm(baseline), font);
        }
        lines.len() as f32 * line_h
    }

    fn section(&mut self, doc: &PdfDocumentReference, section: &Section) {
        let inner_width = self.width()
            - if section.panel.is_some() {
                2.0 * PANEL_PADDING
            } else {
                0.0
            };
        let title_h = if section.title.is_some() {
            self.line_height(TextSize::Heading) + 1.5
        } else {
            0.0
        };
        let blocks_h: f32 = section
            .blocks
            .iter()
            .map(|b| self.block_height(b, inner_width))
            .sum();
        let body_h = blocks_h
            + if section.panel.is_some() {
                2.0 * PANEL_PADDING
            } else {
                0.0
            };

        self.ensure(doc, title_h + body_h);

        if let Some(title) = &section.title {
            let heading = TextBlock::new(
                title.as_str(),
                TextStyle::new(TextSize::Heading, palette::BRAND_DARK).bold(),
            );
            self.text(&heading, self.left(), self.y, self.width());
            self.y -= title_h;
        }

        let mut top = self.y;
        let mut x = self.left();
        if let Some(panel) = &section.panel {
            self.panel(panel, top, body_h);
            top -= PANEL_PADDING;
            x += PANEL_PADDING;
        }

        for block in &section.blocks {
            top -= self.block(block, x, top, inner_width);
        }

        self.y -= body_h + SECTION_GAP;
    }

    fn block_height(&self, block: &Block, width: f32) -> f32 {
        match block {
            Block::Text(text) => self.text_height(text, width),
            Block::Columns(columns) => self.columns_height(columns, width),
            Block::Fields(grid) => {
                let rows = grid.fields.len().div_ceil(usize::from(grid.columns.max(1)));
                rows as f32 * self.field_row_height()
            }
            Block::Table(table) => {
                self.table_row_height(TextSize::Small)
                    + table.rows.len() as f32 * self.table_row_height(TextSize::Body)
            }
            Block::Rule => 3.0,
        }
    }

    fn block(&self, block: &Block, x: f32, top: f32, width: f32) -> f32 {
        match block {
            Block::Text(text) => self.text(text, x, top, width),
            Block::Columns(columns) => self.columns(columns, x, top, width),
            Block::Fields(grid) => self.fields(grid, x, top, width),
            Block::Table(table) => self.table(table, x, top, width),
            Block::Rule => {
                self.fill_rect(x, top - 1.0, width, 0.3, palette::BRAND_BORDER);
                3.0
            }
        }
    }

    fn column_widths(columns: &Columns, width: f32) -> Vec<f32> {
        let total: u32 = columns.columns.iter().map(|c| u32::from(c.weight)).sum();
        columns
            .columns
            .iter()
            .map(|c| width * f32::from(c.weight) / total.max(1) as f32)
            .collect()
    }

    fn columns_height(&self, columns: &Columns, width: f32) -> f32 {
        Self::column_widths(columns, width)
            .iter()
            .zip(&columns.columns)
            .map(|(w, column)| {
                let inner = w - 2.0 * CELL_PADDING;
                column
                    .lines
                    .iter()
                    .map(|l| self.text_height(l, inner))
                    .sum::<f32>()
                    + 2.0 * CELL_PADDING
            })
            .fold(0.0, f32::max)
    }

    fn columns(&self, columns: &Columns, x: f32, top: f32, width: f32) -> f32 {
        let height = self.columns_height(columns, width);
        let mut col_x = x;
        for (w, column) in Self::column_widths(columns, width).iter().zip(&columns.columns) {
            if let Some(bg) = column.background {
                self.fill_rect(col_x, top, *w, height, bg);
            }
            let inner = w - 2.0 * CELL_PADDING;
            let mut line_top = top - CELL_PADDING;
            for line in &column.lines {
                line_top -= self.text(line, col_x + CELL_PADDING, line_top, inner);
            }
            col_x += w;
        }
        height
    }

    fn field_row_height(&self) -> f32 {
        self.line_height(TextSize::Caption) + self.line_height(TextSize::Large) + 2.0 * CELL_PADDING
    }

    fn fields(&self, grid: &FieldGrid, x: f32, top: f32, width: f32) -> f32 {
        let per_row = usize::from(grid.columns.max(1));
        let col_w = width / per_row as f32;
        let row_h = self.field_row_height();
        let label_style = TextStyle::new(TextSize::Caption, palette::BRAND_GRAY).bold();
        let value_style = TextStyle::new(TextSize::Large, palette::BRAND_DARK).bold();

        for (i, field) in grid.fields.iter().enumerate() {
            let row = i / per_row;
            let cell_x = x + (i % per_row) as f32 * col_w + CELL_PADDING;
            let cell_top = top - row as f32 * row_h - CELL_PADDING;
            let inner = col_w - 2.0 * CELL_PADDING;

            let label = TextBlock::new(field.label.as_str(), label_style);
            let used = self.text(&label, cell_x, cell_top, inner);
            // Values are single-line; long ones are truncated by the wrap.
            let value = TextBlock::new(
                self.wrap(&field.value, TextSize::Large, inner)
                    .into_iter()
                    .next()
                    .unwrap_or_default(),
                value_style,
            );
            self.text(&value, cell_x, cell_top - used, inner);
        }

        grid.fields.len().div_ceil(per_row) as f32 * row_h
    }

    fn table_row_height(&self, size: TextSize) -> f32 {
        self.line_height(size) + 2.0 * CELL_PADDING
    }

    fn table(
        &self,
        table: &dermassist_report::document::Table,
        x: f32,
        top: f32,
        width: f32,
    ) -> f32 {
        let total: u32 = table.columns.iter().map(|c| u32::from(c.weight)).sum();
        let widths: Vec<f32> = table
            .columns
            .iter()
            .map(|c| width * f32::from(c.weight) / total.max(1) as f32)
            .collect();

        let header_h = self.table_row_height(TextSize::Small);
        self.fill_rect(x, top, width, header_h, table.header_background);
        let header_style = TextStyle::new(TextSize::Small, palette::WHITE).bold();
        let mut col_x = x;
        for (w, column) in widths.iter().zip(&table.columns) {
            let title = TextBlock::new(column.title.as_str(), header_style);
            self.text(&title, col_x + CELL_PADDING, top - CELL_PADDING, w - 2.0 * CELL_PADDING);
            col_x += w;
        }

        let row_h = self.table_row_height(TextSize::Body);
        let mut row_top = top - header_h;
        for (i, row) in table.rows.iter().enumerate() {
            let background = row.background.unwrap_or(if i % 2 == 0 {
                palette::WHITE
            } else {
                palette::BRAND_LIGHT
            });
            self.fill_rect(x, row_top, width, row_h, background);

            let mut col_x = x;
            for (w, cell) in widths.iter().zip(&row.cells) {
                let inner = w - 2.0 * CELL_PADDING;
                match cell {
                    Cell::Text(text) => {
                        self.text(text, col_x + CELL_PADDING, row_top - CELL_PADDING, inner);
                    }
                    Cell::Bar(bar) => self.bar(bar, col_x + CELL_PADDING, row_top, row_h, inner),
                }
                col_x += w;
            }
            row_top -= row_h;
        }

        header_h + table.rows.len() as f32 * row_h
    }

    fn bar(&self, bar: &Bar, x: f32, row_top: f32, row_h: f32, width: f32) {
        let top = row_top - (row_h - BAR_HEIGHT) / 2.0;
        self.fill_rect(x, top, width, BAR_HEIGHT, bar.track);
        let filled = width * bar.fraction.clamp(0.0, 1.0) as f32;
        if filled > 0.0 {
            self.fill_rect(x, top, filled, BAR_HEIGHT, bar.fill);
        }
    }
}

/// Replace glyphs the builtin fonts cannot encode and drop `**` markers.
fn pdf_text(text: &str) -> String {
    text.replace("**", "")
        .chars()
        .map(|c| match c {
            '\u{2014}' | '\u{2013}' | '\u{2500}' => '-',
            '\u{00d7}' => 'x',
            '\u{00b7}' => '|',
            other => other,
        })
        .collect()
}

/// Simple word-wrap helper for PDF text rendering.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let current_len = current.chars().count();
        if current_len + word.chars().count() + 1 > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
