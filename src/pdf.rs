//! PDF rendering of analysis results.
//!
//! Layout only. Everything shown comes from the `AnalysisResult` as-is.

use crate::error::{Result, SoilCheckError};
use crate::models::{AnalysisResult, Suitability};
use chrono::{DateTime, Local};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_X: f32 = 20.0;
const MARGIN_TOP: f32 = 18.0;
const MARGIN_BOTTOM: f32 = 18.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN_X;
const PT_TO_MM: f32 = 0.3528;

const NAVY: (u8, u8, u8) = (0x1e, 0x3a, 0x5f);
const SLATE: (u8, u8, u8) = (0x4a, 0x55, 0x68);
const INK: (u8, u8, u8) = (0x1a, 0x1a, 0x1a);
const GREY: (u8, u8, u8) = (0x71, 0x80, 0x96);
const RULE: (u8, u8, u8) = (0xe2, 0xe8, 0xf0);
const GREEN: (u8, u8, u8) = (0x2d, 0x6a, 0x4f);
const AMBER: (u8, u8, u8) = (0xf3, 0x9c, 0x12);
const RED: (u8, u8, u8) = (0xc0, 0x39, 0x2b);

const DISCLAIMER: &str = "DISCLAIMER: This report provides preliminary geotechnical analysis for \
    reference purposes. Professional site investigation and licensed engineer review are \
    required before construction.";
const FOOTER: &str = "This report is generated by automated analysis. For construction projects, \
    consult a licensed geotechnical engineer.";

/// Identifying details printed in the report header.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub report_id: String,
    pub generated_at: DateTime<Local>,
}

impl ReportMeta {
    pub fn now() -> Self {
        Self::at(Local::now())
    }

    /// Report stamped with `generated_at`, identified by that timestamp.
    pub fn at(generated_at: DateTime<Local>) -> Self {
        Self {
            report_id: generated_at.format("%Y%m%d_%H%M%S").to_string(),
            generated_at,
        }
    }

    pub fn with_report_id(mut self, report_id: impl Into<String>) -> Self {
        self.report_id = report_id.into();
        self
    }

    pub fn filename(&self) -> String {
        format!("soil_report_{}.pdf", self.generated_at.format("%Y%m%d_%H%M%S"))
    }
}

fn suitability_color(suitability: Suitability) -> (u8, u8, u8) {
    match suitability {
        Suitability::Suitable => GREEN,
        Suitability::ModeratelySuitable => AMBER,
        Suitability::Unsuitable => RED,
    }
}

/// Greedy word wrap on an approximate character budget.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > max_chars && !current.is_empty() {
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

    lines
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    y: f32,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| SoilCheckError::Pdf(e.to_string()))?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| SoilCheckError::Pdf(e.to_string()))?,
        };
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            fonts,
            y: PAGE_HEIGHT - MARGIN_TOP,
        })
    }

    fn ensure_space(&mut self, height: f32) {
        if self.y - height < MARGIN_BOTTOM {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN_TOP;
        }
    }

    fn line_height(size: f32) -> f32 {
        size * PT_TO_MM * 1.4
    }

    fn text_at(&self, text: &str, size: f32, bold: bool, color: (u8, u8, u8), x: f32) {
        let font = if bold { &self.fonts.bold } else { &self.fonts.regular };
        self.layer.set_fill_color(rgb(color));
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    /// Write a wrapped paragraph starting at `indent` and advance the cursor.
    fn paragraph(&mut self, text: &str, size: f32, bold: bool, color: (u8, u8, u8), indent: f32) {
        // Helvetica averages roughly half an em per character
        let char_width = size * PT_TO_MM * 0.5;
        let max_chars = ((CONTENT_WIDTH - indent) / char_width) as usize;
        let height = Self::line_height(size);

        for line in wrap_text(text, max_chars) {
            self.ensure_space(height);
            self.y -= height;
            self.text_at(&line, size, bold, color, MARGIN_X + indent);
        }
    }

    fn centered(&mut self, text: &str, size: f32, bold: bool, color: (u8, u8, u8)) {
        let width = text.chars().count() as f32 * size * PT_TO_MM * 0.5;
        let height = Self::line_height(size);
        self.ensure_space(height);
        self.y -= height;
        let x = MARGIN_X + ((CONTENT_WIDTH - width) / 2.0).max(0.0);
        self.text_at(text, size, bold, color, x);
    }

    fn rule(&mut self, color: (u8, u8, u8)) {
        self.ensure_space(3.0);
        self.y -= 2.0;
        self.layer.set_outline_color(rgb(color));
        self.layer.set_outline_thickness(0.75);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN_X), Mm(self.y)), false),
                (Point::new(Mm(PAGE_WIDTH - MARGIN_X), Mm(self.y)), false),
            ],
            is_closed: false,
        });
    }

    fn spacer(&mut self, height: f32) {
        self.y -= height;
    }

    fn heading(&mut self, text: &str) {
        // Keep a heading together with at least its first line of content
        self.ensure_space(16.0);
        self.spacer(4.0);
        self.paragraph(text, 12.0, true, NAVY, 0.0);
        self.rule(RULE);
        self.spacer(1.0);
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| SoilCheckError::Pdf(e.to_string()))
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

/// Render a full geotechnical report as PDF bytes.
pub fn render(result: &AnalysisResult, meta: &ReportMeta) -> Result<Vec<u8>> {
    let mut pdf = PdfWriter::new("Geotechnical Analysis Report")?;

    pdf.centered("GEOTECHNICAL ANALYSIS REPORT", 22.0, true, NAVY);
    pdf.rule(NAVY);
    pdf.spacer(2.0);

    pdf.y -= PdfWriter::line_height(9.0);
    pdf.text_at(
        &format!("Report Date: {}", meta.generated_at.format("%B %d, %Y")),
        9.0,
        false,
        SLATE,
        MARGIN_X,
    );
    pdf.text_at(
        &format!("Report ID: {}", meta.report_id),
        9.0,
        false,
        SLATE,
        PAGE_WIDTH / 2.0 + 10.0,
    );
    pdf.spacer(3.0);

    pdf.paragraph(DISCLAIMER, 8.5, false, RED, 0.0);
    pdf.spacer(2.0);

    pdf.heading("1. SOIL CLASSIFICATION");
    pdf.paragraph(result.classification.as_str(), 10.5, true, INK, 4.0);

    pdf.heading("2. LABORATORY TEST RESULTS");
    let row_height = PdfWriter::line_height(9.0);
    pdf.ensure_space(row_height);
    pdf.y -= row_height;
    pdf.text_at("Parameter", 9.5, true, NAVY, MARGIN_X + 2.0);
    pdf.text_at("Value", 9.5, true, NAVY, MARGIN_X + 110.0);
    pdf.text_at("Unit", 9.5, true, NAVY, MARGIN_X + 145.0);
    pdf.rule(RULE);
    for (label, value, unit) in result.parameters.table_rows() {
        pdf.ensure_space(row_height);
        pdf.y -= row_height;
        pdf.text_at(label, 9.0, false, INK, MARGIN_X + 2.0);
        pdf.text_at(&value.to_string(), 9.0, false, INK, MARGIN_X + 110.0);
        pdf.text_at(unit, 9.0, false, INK, MARGIN_X + 145.0);
    }

    pdf.heading("3. SUITABILITY ASSESSMENT");
    let verdict_color = suitability_color(result.suitability);
    pdf.paragraph(result.suitability.as_str(), 12.0, true, verdict_color, 4.0);
    pdf.paragraph(&result.suitability_text, 9.5, false, INK, 4.0);

    pdf.heading("4. SOIL BEHAVIOR CHARACTERISTICS");
    for behavior in &result.behavior {
        pdf.paragraph(&format!("- {}", behavior), 9.5, false, INK, 4.0);
    }

    pdf.heading("5. CONSTRUCTION RISKS");
    for risk in &result.risks {
        pdf.paragraph(&format!("- {}", risk), 9.5, false, RED, 4.0);
    }

    pdf.heading("6. ENGINEERING RECOMMENDATIONS");
    for (i, rec) in result.recommendations.iter().enumerate() {
        pdf.paragraph(&format!("{}. {}", i + 1, rec), 9.5, false, GREEN, 6.0);
    }

    pdf.spacer(6.0);
    pdf.rule(RULE);
    pdf.centered("Geotechnical Analysis Platform", 9.0, true, NAVY);
    pdf.paragraph(FOOTER, 8.0, false, GREY, 10.0);

    pdf.finish()
}
