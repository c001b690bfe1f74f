//! Renderer-agnostic report model.
//!
//! A [`ReportDocument`] is an ordered list of sections, each a flat list of
//! styled blocks. Nothing here knows about pages, fonts or byte formats; the
//! export crate maps sizes and colors onto a concrete backend.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use dermassist_core::RiskTier;

use crate::timestamp::ScanMoment;
use crate::visual::Color;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportDocument {
    pub title: String,
    pub author: String,
    /// `RPT-` followed by the scan id zero-padded to six digits.
    pub report_id: String,
    pub generated_at: String,
    pub scan: ScanMoment,
    pub primary_tier: RiskTier,
    pub sections: Vec<Section>,
}

impl ReportDocument {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

/// Fixed section grammar, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SectionKind {
    Header,
    PatientInfo,
    PrimaryResult,
    AboutDiagnosis,
    Differential,
    Recommendation,
    Footer,
}

impl SectionKind {
    pub const ORDER: [SectionKind; 7] = [
        SectionKind::Header,
        SectionKind::PatientInfo,
        SectionKind::PrimaryResult,
        SectionKind::AboutDiagnosis,
        SectionKind::Differential,
        SectionKind::Recommendation,
        SectionKind::Footer,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Section {
    pub kind: SectionKind,
    /// Heading printed above the section body, if any.
    pub title: Option<String>,
    /// Box drawn behind the section body.
    pub panel: Option<Panel>,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Panel {
    #[ts(type = "string")]
    pub background: Color,
    #[ts(type = "string | null")]
    pub border: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum Block {
    Text(TextBlock),
    /// Side-by-side stacks of text.
    Columns(Columns),
    Fields(FieldGrid),
    Table(Table),
    Rule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TextBlock {
    pub text: String,
    pub style: TextStyle,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TextStyle {
    pub size: TextSize,
    pub bold: bool,
    #[ts(type = "string")]
    pub color: Color,
    pub align: Align,
}

impl TextStyle {
    pub fn new(size: TextSize, color: Color) -> Self {
        Self {
            size,
            bold: false,
            color,
            align: Align::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn weight(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Semantic text size; renderers map each to a point size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TextSize {
    /// Headline figure (confidence score).
    Display,
    /// Brand name in the header banner.
    Title,
    /// Primary diagnosis name.
    Lead,
    /// Risk tier label.
    Emphasis,
    /// Section headings.
    Heading,
    /// Field values, recommendation text.
    Large,
    Body,
    Small,
    /// Field labels and fine print.
    Caption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Columns {
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Column {
    /// Relative width.
    pub weight: u16,
    #[ts(type = "string | null")]
    pub background: Option<Color>,
    pub lines: Vec<TextBlock>,
}

/// Labelled values laid out row-major in a fixed number of columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldGrid {
    pub columns: u8,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Field {
    pub label: String,
    pub value: String,
    /// True when `value` is a placeholder for missing data.
    pub missing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Table {
    pub columns: Vec<TableColumn>,
    #[ts(type = "string")]
    pub header_background: Color,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TableColumn {
    pub title: String,
    /// Relative width.
    pub weight: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TableRow {
    pub cells: Vec<Cell>,
    pub emphasized: bool,
    #[ts(type = "string | null")]
    pub background: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum Cell {
    Text(TextBlock),
    Bar(Bar),
}

/// Horizontal bar: a filled portion over a full-width track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bar {
    /// Filled share of the track, always within `[0, 1]`.
    pub fraction: f64,
    #[ts(type = "string")]
    pub fill: Color,
    #[ts(type = "string")]
    pub track: Color,
}
