use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use tracing::info;

use crate::export::font_metrics::{FontMetricTable, PageLayout, HELVETICA};
use crate::export::{ensure_encodable, DocumentRenderer, ExportError};

const DOCUMENT_TITLE: &str = "Diet and Workout Plan";
const LAYER_NAME: &str = "Layer 1";
/// Baseline offset below the cell's vertical centre, as a fraction of the font size.
const BASELINE_FACTOR: f32 = 0.3;

/// Plain-text PDF writer: one builtin font, one size, word-wrapped lines,
/// new pages when the bottom margin is reached.
pub struct PdfRenderer {
    layout: PageLayout,
    metrics: &'static FontMetricTable,
}

impl PdfRenderer {
    pub fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            metrics: &HELVETICA,
        }
    }

    fn add_page(&self, doc: &PdfDocumentReference) -> PdfLayerReference {
        let (page, layer) = doc.add_page(
            Mm(self.layout.page_width_mm),
            Mm(self.layout.page_height_mm),
            LAYER_NAME,
        );
        doc.get_page(page).get_layer(layer)
    }

    /// Wraps the text and groups the lines into pages.
    fn paginate(&self, text: &str) -> Vec<Vec<String>> {
        let lines = self.metrics.wrap_lines(text, self.layout.text_width_em());
        lines
            .chunks(self.layout.lines_per_page())
            .map(<[String]>::to_vec)
            .collect()
    }

    fn draw_lines(&self, layer: &PdfLayerReference, lines: &[String], font: &IndirectFontRef) {
        let layout = &self.layout;
        let x = layout.margin_mm + layout.cell_padding_mm;
        for (row, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let cell_top = layout.margin_mm + row as f32 * layout.line_height_mm;
            let baseline = cell_top
                + layout.line_height_mm / 2.0
                + BASELINE_FACTOR * layout.font_size_mm();
            layer.use_text(
                line.as_str(),
                layout.font_size_pt,
                Mm(x),
                Mm(layout.page_height_mm - baseline),
                font,
            );
        }
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, text: &str) -> Result<Vec<u8>, ExportError> {
        ensure_encodable(text)?;

        let pages = self.paginate(text);

        let (doc, first_page, first_layer) = PdfDocument::new(
            DOCUMENT_TITLE,
            Mm(self.layout.page_width_mm),
            Mm(self.layout.page_height_mm),
            LAYER_NAME,
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Render(e.to_string()))?;

        let mut first = Some(doc.get_page(first_page).get_layer(first_layer));
        for page_lines in &pages {
            let layer = match first.take() {
                Some(layer) => layer,
                None => self.add_page(&doc),
            };
            self.draw_lines(&layer, page_lines, &font);
        }

        let bytes = doc
            .save_to_bytes()
            .map_err(|e| ExportError::Render(e.to_string()))?;

        info!(pages = pages.len(), bytes = bytes.len(), "Rendered plan PDF");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::default_page_layout;
    use printpdf::lopdf::{content::Content, Document, Object};

    fn renderer() -> PdfRenderer {
        PdfRenderer::new(default_page_layout())
    }

    /// Text drawn on each page, one entry per show-text operation, in stream order.
    fn shown_lines(bytes: &[u8]) -> Vec<Vec<String>> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|page_id| {
                let content = Content::decode(&doc.get_page_content(*page_id).unwrap()).unwrap();
                content
                    .operations
                    .iter()
                    .filter(|op| op.operator == "Tj" || op.operator == "TJ")
                    .map(|op| {
                        let mut line = String::new();
                        collect_strings(&op.operands, &mut line);
                        line
                    })
                    .collect()
            })
            .collect()
    }

    fn collect_strings(operands: &[Object], out: &mut String) {
        for operand in operands {
            match operand {
                // WinAnsi and Latin-1 agree on every byte the renderer accepts.
                Object::String(bytes, _) => out.extend(bytes.iter().map(|b| *b as char)),
                Object::Array(items) => collect_strings(items, out),
                _ => {}
            }
        }
    }

    #[test]
    fn test_wrapped_lines_are_written_in_order() {
        let text = "Diet Plan:\n\n- Breakfast: crème fraîche with oats\n- Lunch: lentil soup";
        let bytes = renderer().render(text).unwrap();
        let pages = shown_lines(&bytes);
        assert_eq!(pages.len(), 1);
        assert_eq!(
            pages[0],
            vec![
                "Diet Plan:",
                "- Breakfast: crème fraîche with oats",
                "- Lunch: lentil soup"
            ]
        );
    }

    #[test]
    fn test_second_page_starts_with_line_27() {
        let text = (1..=60)
            .map(|day| format!("Day {day}: stretch"))
            .collect::<Vec<_>>()
            .join("\n");
        let pages = shown_lines(&renderer().render(&text).unwrap());
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 26);
        assert_eq!(pages[0][0], "Day 1: stretch");
        assert_eq!(pages[1][0], "Day 27: stretch");
        assert_eq!(pages[2].last().map(String::as_str), Some("Day 60: stretch"));
    }

    #[test]
    fn test_render_rejects_characters_the_font_cannot_draw() {
        for text in ["a\u{1}b", "a\u{9c}b"] {
            let err = renderer().render(text).unwrap_err();
            assert!(matches!(
                err,
                ExportError::UnsupportedCharacter { position: 1, .. }
            ));
        }
    }

    #[test]
    fn test_render_starts_with_pdf_signature() {
        let bytes = renderer()
            .render("Diet Plan:\n- Breakfast: oats with berries\n- Lunch: lentil soup")
            .unwrap();
        assert!(!bytes.is_empty());
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_render_accepts_latin1_accents() {
        let bytes = renderer().render("Crème fraîche, piñata, 25°C").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_render_empty_text_still_produces_document() {
        let bytes = renderer().render("").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_render_rejects_unsupported_characters() {
        let err = renderer().render("Stay strong 💪").unwrap_err();
        assert!(matches!(
            err,
            ExportError::UnsupportedCharacter { ch: '💪', position: 12 }
        ));
    }

    #[test]
    fn test_long_advice_spills_onto_more_pages() {
        let text = (1..=60)
            .map(|day| format!("Day {day}: 30 minutes brisk walking and a light salad"))
            .collect::<Vec<_>>()
            .join("\n");
        let pages = renderer().paginate(&text);
        assert_eq!(pages.len(), 3, "60 lines at 26 per page need 3 pages");
        assert_eq!(pages[0].len(), 26);
        assert_eq!(pages[2].len(), 8);

        let short = renderer().render("Day 1: walk").unwrap();
        let long = renderer().render(&text).unwrap();
        assert!(long.starts_with(b"%PDF-"));
        assert!(long.len() > short.len());
    }

    #[test]
    fn test_empty_text_is_one_page() {
        assert_eq!(renderer().paginate("").len(), 1);
    }
}
