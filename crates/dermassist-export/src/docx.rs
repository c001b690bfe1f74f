use std::io::Cursor;

use docx_rs::{
    AlignmentType, Docx, Paragraph, Run, RunFonts, Shading, Style, StyleType, Table, TableCell,
    TableRow,
};

use dermassist_report::ReportDocument;
use dermassist_report::document::{
    Align, Bar, Block, Cell, Columns, FieldGrid, Section, TextBlock, TextSize, TextStyle,
};
use dermassist_report::visual::{Color, palette};

use crate::error::ExportError;
use crate::markdown::text_bar;
use crate::renderer::{ExportFormat, Renderer};
use crate::styles::DocumentStyles;

const BAR_SLOTS: usize = 20;

/// Lays the report out as a Word document, one table per grid-like block.
#[derive(Debug, Clone, Default)]
pub struct DocxRenderer {
    styles: DocumentStyles,
}

impl DocxRenderer {
    pub fn new(styles: DocumentStyles) -> Self {
        Self { styles }
    }
}

impl Renderer for DocxRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Docx
    }

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, ExportError> {
        let bytes = generate_docx(document, &self.styles)?;
        tracing::debug!(report_id = %document.report_id, bytes = bytes.len(), "rendered DOCX");
        Ok(bytes)
    }
}

/// Generate a DOCX document from a composed report.
pub fn generate_docx(
    document: &ReportDocument,
    styles: &DocumentStyles,
) -> Result<Vec<u8>, ExportError> {
    let mut buf = Cursor::new(Vec::new());
    build_docx(document, styles)
        .build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

/// Lay the report out as an unpacked [`Docx`].
pub fn build_docx(document: &ReportDocument, styles: &DocumentStyles) -> Docx {
    let heading_pt = styles.size_pt(TextSize::Heading);
    let mut docx = Docx::new().add_style(heading_style("Heading2", "heading 2", heading_pt));

    for section in &document.sections {
        docx = add_section(docx, section, styles);
    }
    docx
}

fn add_section(mut docx: Docx, section: &Section, styles: &DocumentStyles) -> Docx {
    if let Some(title) = &section.title {
        docx = docx.add_paragraph(heading_paragraph(title, styles));
    }
    let panel = section.panel.map(|p| p.background);

    for block in &section.blocks {
        docx = match block {
            Block::Text(text) => match panel {
                // A single-cell table gives body text its panel background.
                Some(bg) => docx.add_table(Table::new(vec![TableRow::new(vec![shaded(
                    TableCell::new().add_paragraph(text_paragraph(text, styles)),
                    Some(bg),
                )])])),
                None => docx.add_paragraph(text_paragraph(text, styles)),
            },
            Block::Columns(columns) => docx.add_table(columns_table(columns, panel, styles)),
            Block::Fields(grid) => docx.add_table(fields_table(grid, panel, styles)),
            Block::Table(table) => docx.add_table(data_table(table, styles)),
            Block::Rule => docx.add_paragraph(rule_paragraph(styles)),
        };
    }

    docx.add_paragraph(Paragraph::new())
}

fn heading_style(style_id: &str, name: &str, size_pt: f32) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(half_points(size_pt)) // OOXML uses half-points
}

fn half_points(size_pt: f32) -> usize {
    (size_pt * 2.0).round() as usize
}

fn heading_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let style = TextStyle::new(TextSize::Heading, palette::BRAND_DARK).bold();
    Paragraph::new()
        .style("Heading2")
        .add_run(
            styled_run(text, &style, false, styles)
                .fonts(RunFonts::new().ascii(&styles.heading_font)),
        )
}

fn alignment(align: Align) -> AlignmentType {
    match align {
        Align::Left => AlignmentType::Left,
        Align::Center => AlignmentType::Center,
        Align::Right => AlignmentType::Right,
    }
}

fn text_paragraph(block: &TextBlock, styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new().align(alignment(block.style.align));
    for run in parse_inline(&block.text, &block.style, styles) {
        para = para.add_run(run);
    }
    para
}

fn styled_run(text: &str, style: &TextStyle, force_bold: bool, styles: &DocumentStyles) -> Run {
    let mut run = Run::new()
        .add_text(text)
        .size(half_points(styles.size_pt(style.size)))
        .color(style.color.hex_digits())
        .fonts(RunFonts::new().ascii(&styles.body_font));
    if style.bold || force_bold {
        run = run.bold();
    }
    run
}

/// Parse simple inline formatting: **bold** segments.
fn parse_inline(text: &str, style: &TextStyle, styles: &DocumentStyles) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut remaining = text;

    while let Some(start) = remaining.find("**") {
        let before = &remaining[..start];
        if !before.is_empty() {
            runs.push(styled_run(before, style, false, styles));
        }

        let after_start = &remaining[start + 2..];
        if let Some(end) = after_start.find("**") {
            runs.push(styled_run(&after_start[..end], style, true, styles));
            remaining = &after_start[end + 2..];
        } else {
            // No closing **, treat rest as normal text
            runs.push(styled_run(remaining, style, false, styles));
            return runs;
        }
    }

    if !remaining.is_empty() {
        runs.push(styled_run(remaining, style, false, styles));
    }

    runs
}

fn shaded(cell: TableCell, background: Option<Color>) -> TableCell {
    match background {
        Some(bg) => cell.shading(Shading::new().fill(bg.hex_digits())),
        None => cell,
    }
}

fn columns_table(columns: &Columns, panel: Option<Color>, styles: &DocumentStyles) -> Table {
    let cells = columns
        .columns
        .iter()
        .map(|column| {
            let mut cell = TableCell::new();
            for line in &column.lines {
                cell = cell.add_paragraph(text_paragraph(line, styles));
            }
            shaded(cell, column.background.or(panel))
        })
        .collect();
    Table::new(vec![TableRow::new(cells)])
}

fn fields_table(grid: &FieldGrid, panel: Option<Color>, styles: &DocumentStyles) -> Table {
    let label_style = TextStyle::new(TextSize::Caption, palette::BRAND_GRAY).bold();
    let value_style = TextStyle::new(TextSize::Large, palette::BRAND_DARK).bold();
    let per_row = usize::from(grid.columns.max(1));

    let rows = grid
        .fields
        .chunks(per_row)
        .map(|chunk| {
            let cells = chunk
                .iter()
                .map(|field| {
                    let cell = TableCell::new()
                        .add_paragraph(
                            Paragraph::new().add_run(styled_run(
                                &field.label,
                                &label_style,
                                false,
                                styles,
                            )),
                        )
                        .add_paragraph(
                            Paragraph::new().add_run(styled_run(
                                &field.value,
                                &value_style,
                                false,
                                styles,
                            )),
                        );
                    shaded(cell, panel)
                })
                .collect();
            TableRow::new(cells)
        })
        .collect();

    Table::new(rows)
}

fn data_table(table: &dermassist_report::document::Table, styles: &DocumentStyles) -> Table {
    let header_style = TextStyle::new(TextSize::Small, palette::WHITE).bold();
    let header = TableRow::new(
        table
            .columns
            .iter()
            .map(|column| {
                shaded(
                    TableCell::new().add_paragraph(
                        Paragraph::new().add_run(styled_run(
                            &column.title,
                            &header_style,
                            false,
                            styles,
                        )),
                    ),
                    Some(table.header_background),
                )
            })
            .collect(),
    );

    let mut rows = vec![header];
    for row in &table.rows {
        let cells = row
            .cells
            .iter()
            .map(|cell| {
                let para = match cell {
                    Cell::Text(text) => text_paragraph(text, styles),
                    Cell::Bar(bar) => bar_paragraph(bar, styles),
                };
                shaded(TableCell::new().add_paragraph(para), row.background)
            })
            .collect();
        rows.push(TableRow::new(cells));
    }

    Table::new(rows)
}

fn bar_paragraph(bar: &Bar, styles: &DocumentStyles) -> Paragraph {
    let glyphs = text_bar(bar.fraction, BAR_SLOTS);
    let filled: String = glyphs.chars().take_while(|c| *c == '\u{2588}').collect();
    let track: String = glyphs.chars().skip(filled.chars().count()).collect();

    let mut para = Paragraph::new();
    if !filled.is_empty() {
        para = para.add_run(styled_run(
            &filled,
            &TextStyle::new(TextSize::Small, bar.fill),
            false,
            styles,
        ));
    }
    if !track.is_empty() {
        para = para.add_run(styled_run(
            &track,
            &TextStyle::new(TextSize::Small, bar.track),
            false,
            styles,
        ));
    }
    para
}

fn rule_paragraph(styles: &DocumentStyles) -> Paragraph {
    Paragraph::new().add_run(styled_run(
        &"\u{2500}".repeat(60),
        &TextStyle::new(TextSize::Caption, palette::BRAND_BORDER),
        false,
        styles,
    ))
}
