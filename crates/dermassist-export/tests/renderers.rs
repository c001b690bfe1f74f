use dermassist_core::{ClassificationResult, PatientProfile};
use dermassist_export::docx::build_docx;
use dermassist_export::markdown::{MarkdownRenderer, text_bar};
use dermassist_export::{DocumentStyles, ExportError, ExportFormat, Renderer, renderer_for};
use dermassist_report::document::SectionKind;
use dermassist_report::{FixedClock, ReportComposer, ReportDocument, ReportSettings};
use jiff::civil;
use serde_json::json;

fn document() -> ReportDocument {
    let clock = FixedClock(civil::date(2025, 3, 5).at(16, 45, 0, 0));
    let scan = ClassificationResult {
        id: 7,
        predicted_label: "bcc".to_string(),
        confidence_score: 0.64,
        raw_scores: json!({
            "mel": 0.12, "bcc": 0.64, "akiec": 0.05, "bkl": 0.08,
            "df": 0.03, "vasc": 0.02, "nv": 0.06
        }),
        created_at: Some("2025-03-05T09:15:00".to_string()),
    };
    let patient = PatientProfile {
        full_name: Some("Jo Mensah".to_string()),
        ..Default::default()
    };
    ReportComposer::with_clock(ReportSettings::default(), clock)
        .compose(&scan, &patient)
        .expect("compose")
}

#[test]
fn export_format_parses_known_names() {
    assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
    assert_eq!("DOCX".parse::<ExportFormat>().unwrap(), ExportFormat::Docx);
    assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
    assert_eq!(
        "markdown".parse::<ExportFormat>().unwrap(),
        ExportFormat::Markdown
    );
    assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
    assert!(matches!(
        "html".parse::<ExportFormat>(),
        Err(ExportError::UnsupportedFormat(f)) if f == "html"
    ));
}

#[test]
fn export_format_extension_and_content_type() {
    assert_eq!(ExportFormat::Markdown.extension(), "md");
    assert_eq!(ExportFormat::Pdf.to_string(), "pdf");
    assert_eq!(ExportFormat::Json.content_type(), "application/json");
}

#[test]
fn renderer_for_matches_requested_format() {
    let styles = DocumentStyles::default();
    for format in [
        ExportFormat::Pdf,
        ExportFormat::Docx,
        ExportFormat::Markdown,
        ExportFormat::Json,
    ] {
        assert_eq!(renderer_for(format, &styles).format(), format);
    }
}

#[test]
fn text_bar_clamps_and_fills() {
    assert_eq!(text_bar(0.5, 4), "\u{2588}\u{2588}\u{2591}\u{2591}");
    assert_eq!(text_bar(1.7, 3), "\u{2588}\u{2588}\u{2588}");
    assert_eq!(text_bar(-0.2, 3), "\u{2591}\u{2591}\u{2591}");
    assert_eq!(text_bar(f64::NAN, 2), "\u{2591}\u{2591}");
}

#[test]
fn markdown_contains_every_titled_section() {
    let doc = document();
    let md = MarkdownRenderer::default().render_string(&doc).unwrap();

    assert!(md.starts_with(&format!("# {}", doc.title)));
    for section in &doc.sections {
        if let Some(title) = &section.title {
            assert!(md.contains(title.as_str()), "missing {title}");
        }
    }
    assert!(md.contains("RPT-000007"));
    assert!(md.contains("Basal Cell Carcinoma"));
}

#[test]
fn markdown_custom_template() {
    let renderer = MarkdownRenderer::with_template("id.md", "{{ report_id }} / {{ scan.date }}");
    let md = renderer.render_string(&document()).unwrap();
    assert_eq!(md, "RPT-000007 / 05 March 2025");
}

#[test]
fn markdown_bad_template_is_parse_error() {
    let renderer = MarkdownRenderer::with_template("bad.md", "{% for x in %}");
    assert!(matches!(
        renderer.render_string(&document()),
        Err(ExportError::TemplateParse(_))
    ));
}

#[test]
fn json_output_keeps_document_structure() {
    let doc = document();
    let bytes = renderer_for(ExportFormat::Json, &DocumentStyles::default())
        .render(&doc)
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(parsed["report_id"], "RPT-000007");
    assert_eq!(parsed["primary_tier"], "high");
    let kinds: Vec<&str> = parsed["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["kind"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        SectionKind::ORDER
            .iter()
            .map(|k| serde_json::to_value(k).unwrap().as_str().unwrap().to_string())
            .collect::<Vec<_>>()
    );
}

#[test]
fn json_output_round_trips_to_equal_document() {
    let doc = document();
    let bytes = renderer_for(ExportFormat::Json, &DocumentStyles::default())
        .render(&doc)
        .unwrap();
    let back: ReportDocument = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn docx_is_a_zip_package() {
    let bytes = renderer_for(ExportFormat::Docx, &DocumentStyles::default())
        .render(&document())
        .unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn pdf_has_pdf_header() {
    let bytes = renderer_for(ExportFormat::Pdf, &DocumentStyles::default())
        .render(&document())
        .unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn pdf_survives_missing_scores_and_tiny_pages() {
    let clock = FixedClock(civil::date(2025, 1, 1).at(0, 0, 0, 0));
    let scan = ClassificationResult {
        id: 1,
        predicted_label: "zzz".to_string(),
        confidence_score: f64::NAN,
        raw_scores: serde_json::Value::Null,
        created_at: None,
    };
    let doc = ReportComposer::with_clock(ReportSettings::default(), clock)
        .compose(&scan, &PatientProfile::default())
        .unwrap();
    let styles = DocumentStyles {
        page_height_mm: 120.0,
        ..DocumentStyles::default()
    };
    let bytes = renderer_for(ExportFormat::Pdf, &styles).render(&doc).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn docx_headings_use_heading_font() {
    let styles = DocumentStyles {
        heading_font: "Georgia".to_string(),
        ..DocumentStyles::default()
    };
    let layout = build_docx(&document(), &styles).json();
    assert!(layout.contains("Georgia"));
    assert!(layout.contains("Helvetica"));
}
