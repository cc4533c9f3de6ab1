//! Document export: advice text → downloadable PDF bytes.
//!
//! Handlers depend on the `DocumentRenderer` trait; `PdfRenderer` is the only
//! backend and is built on `printpdf` with a builtin Type 1 font.

use thiserror::Error;

pub mod font_metrics;
pub mod pdf;

pub use font_metrics::default_page_layout;
pub use pdf::PdfRenderer;

pub const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("character {ch:?} at position {position} cannot be written with the builtin PDF font")]
    UnsupportedCharacter { ch: char, position: usize },

    #[error("PDF rendering failed: {0}")]
    Render(String),
}

/// Renders plain text into an opaque document byte stream.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, text: &str) -> Result<Vec<u8>, ExportError>;
}

/// Whether the builtin fonts' WinAnsi encoding can draw `c`.
///
/// Printable Latin-1 only: C0 controls other than `\t`, `\n` and `\r` (which the
/// line wrapper consumes), DEL and the C1 block have no glyph and would be dropped.
pub fn is_encodable(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => true,
        '\u{0}'..='\u{1F}' | '\u{7F}'..='\u{9F}' => false,
        c => (c as u32) <= 0xFF,
    }
}

/// Fails on the first character the renderer could not write.
pub fn ensure_encodable(text: &str) -> Result<(), ExportError> {
    match text.chars().enumerate().find(|(_, c)| !is_encodable(*c)) {
        Some((position, ch)) => Err(ExportError::UnsupportedCharacter { ch, position }),
        None => Ok(()),
    }
}

/// Suggested download name for a user's plan.
///
/// The name is kept as typed; only characters that would break a quoted
/// `Content-Disposition` filename are replaced.
pub fn plan_filename(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| match c {
            '"' | '\\' | '/' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("diet_and_workout_plan_for_{safe}.pdf")
}
