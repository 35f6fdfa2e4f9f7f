//! PDF report writer backed by pdfium.
//!
//! Lines arrive already laid out; this module wraps them to the page width,
//! paginates, and places text objects. Without a custom font the standard Helvetica pair is used,
//! which covers Latin-1 only; a TrueType font passed in covers everything
//! else (bold spans then use the same face).

use crate::pipeline::engine::bind_pdfium;
use crate::report::layout::{paginate, wrap, LineStyle, PageGeometry, ReportLine, INDENT_PT};
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::debug;

/// Gap inserted where a span boundary had whitespace, as a fraction of the
/// font size. pdfium's object bounds exclude trailing spaces.
const SPACE_EM: f32 = 0.28;

/// Write `lines` to a new PDF at `path`.
pub fn write_pdf(lines: &[ReportLine], path: &Path, font: Option<&Path>) -> Result<(), String> {
    let pdfium = bind_pdfium().map_err(|e| e.to_string())?;
    let geometry = PageGeometry::default();

    let mut document = pdfium.create_new_pdf().map_err(|e| format!("{e:?}"))?;

    let (regular, bold) = match font {
        Some(font_path) => {
            let token = document
                .fonts_mut()
                .load_true_type_from_file(font_path, true)
                .map_err(|e| format!("cannot load font '{}': {e:?}", font_path.display()))?;
            (token, token)
        }
        None => {
            let fonts = document.fonts_mut();
            (fonts.helvetica(), fonts.helvetica_bold())
        }
    };

    let lines = wrap(lines, &geometry);
    let pages = paginate(&lines, &geometry);
    debug!("Report layout: {} lines on {} pages", lines.len(), pages.len());

    for page_lines in &pages {
        let mut page = document
            .pages_mut()
            .create_page_at_end(PdfPagePaperSize::from_points(
                PdfPoints::new(geometry.width),
                PdfPoints::new(geometry.height),
            ))
            .map_err(|e| format!("{e:?}"))?;

        let mut top = geometry.height - geometry.margin;
        for line in page_lines {
            let baseline = top - line.baseline_offset();
            draw_line(&mut page, line, baseline, &geometry, regular, bold)
                .map_err(|e| format!("{e:?}"))?;
            top -= line.height();
        }
    }

    document.save_to_file(path).map_err(|e| format!("{e:?}"))
}

/// Place one line's spans left to right starting at its indent.
fn draw_line(
    page: &mut PdfPage,
    line: &ReportLine,
    baseline: f32,
    geometry: &PageGeometry,
    regular: PdfFontToken,
    bold: PdfFontToken,
) -> Result<(), PdfiumError> {
    let size = line.style.font_size();
    let gap = size * SPACE_EM;
    let start = geometry.margin + f32::from(line.indent) * INDENT_PT;
    let mut x = start;

    for span in &line.spans {
        if span.text.starts_with(char::is_whitespace) && x > start {
            x += gap;
        }
        let text = span.text.trim();
        if !text.is_empty() {
            let font = if span.bold || line.style != LineStyle::Body {
                bold
            } else {
                regular
            };
            let mut object = page.objects_mut().create_text_object(
                PdfPoints::new(x),
                PdfPoints::new(baseline),
                text,
                font,
                PdfPoints::new(size),
            )?;
            let width = object.width()?.value;

            if line.style == LineStyle::Title {
                let centered = (geometry.width - width) / 2.0;
                object.translate(PdfPoints::new(centered - x), PdfPoints::ZERO)?;
            }
            x += width;
        }
        if span.text.ends_with(char::is_whitespace) {
            x += gap;
        }
    }

    Ok(())
}
