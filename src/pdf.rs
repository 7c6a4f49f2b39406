//!
//! # Shift report rendering
//!
//! Builds the downloadable PDF for `GET /api/export/pdf`: an A4 document
//! with the company name as a colored title and one table row per shift.
//! Uses the PDF builtin Helvetica fonts so no font files ship with the
//! binary, and renders entirely in memory.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};

use crate::error::AppError;
use crate::models::DEFAULT_COLOR;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 14.0;
const ROW_STEP_MM: f32 = 8.0;
const BOTTOM_LIMIT_MM: f32 = 20.0;

// Column left edges, chosen for the builtin Helvetica metrics.
const COL_DATE: f32 = MARGIN_MM;
const COL_HOURS: f32 = 46.0;
const COL_NOTES: f32 = 82.0;
const COL_WORKER: f32 = 138.0;
const COL_COLOR: f32 = 178.0;

/// One table row of the report; all cells are display strings.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub date: String,
    pub hours: String,
    pub notes: String,
    pub worker: String,
    pub color: String,
}

/// Parses a `#RRGGBB` string into unit-range RGB components.
/// Returns `None` for anything else; callers fall back to the default blue.
fn parse_hex_color(hex: &str) -> Option<(f32, f32, f32)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
    ))
}

fn fill_color(hex: &str) -> Color {
    let (r, g, b) = parse_hex_color(hex)
        .or_else(|| parse_hex_color(DEFAULT_COLOR))
        .unwrap_or((0.0, 0.0, 0.0));
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

/// Clips cell text so long notes do not run into the next column.
fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let clipped: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", clipped)
}

fn draw_rule(layer: &PdfLayerReference, y: f32) {
    let rule = Line {
        points: vec![
            (Point::new(Mm(MARGIN_MM), Mm(y)), false),
            (Point::new(Mm(PAGE_WIDTH_MM - MARGIN_MM), Mm(y)), false),
        ],
        is_closed: false,
    };
    layer.set_outline_thickness(0.4);
    layer.add_line(rule);
}

/// Draws the column headers plus a rule, returning the y of the first data row.
fn draw_table_header(layer: &PdfLayerReference, bold: &IndirectFontRef, y: f32) -> f32 {
    layer.set_fill_color(black());
    layer.use_text("Date", 11.0, Mm(COL_DATE), Mm(y), bold);
    layer.use_text("Hours", 11.0, Mm(COL_HOURS), Mm(y), bold);
    layer.use_text("Notes", 11.0, Mm(COL_NOTES), Mm(y), bold);
    layer.use_text("Worker", 11.0, Mm(COL_WORKER), Mm(y), bold);
    layer.use_text("Color", 11.0, Mm(COL_COLOR), Mm(y), bold);
    draw_rule(layer, y - 2.0);
    y - ROW_STEP_MM
}

/// Renders the company's shift table as PDF bytes.
///
/// The title is set in the company color (falling back to the default blue
/// for malformed values already in the database). Rows flow across as many
/// pages as needed; each page repeats the column headers. An empty `rows`
/// slice still produces a valid document with the headers alone.
pub fn render_shift_report(
    company_name: &str,
    company_color: &str,
    rows: &[ReportRow],
) -> Result<Vec<u8>, AppError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Shift report",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    layer.set_fill_color(fill_color(company_color));
    layer.use_text(company_name, 20.0, Mm(MARGIN_MM), Mm(275.0), &bold);
    layer.set_fill_color(black());
    layer.use_text("Shift report", 12.0, Mm(MARGIN_MM), Mm(267.0), &font);

    let mut y = draw_table_header(&layer, &bold, 257.0);

    for row in rows {
        if y < BOTTOM_LIMIT_MM {
            let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
            y = draw_table_header(&layer, &bold, 275.0);
        }

        layer.use_text(row.date.as_str(), 10.0, Mm(COL_DATE), Mm(y), &font);
        layer.use_text(clip(&row.hours, 18), 10.0, Mm(COL_HOURS), Mm(y), &font);
        layer.use_text(clip(&row.notes, 30), 10.0, Mm(COL_NOTES), Mm(y), &font);
        layer.use_text(clip(&row.worker, 20), 10.0, Mm(COL_WORKER), Mm(y), &font);
        layer.use_text(row.color.as_str(), 10.0, Mm(COL_COLOR), Mm(y), &font);
        y -= ROW_STEP_MM;
    }

    let bytes = doc.save_to_bytes()?;
    Ok(bytes)
}
