//! Helvetica width table and greedy line wrapping for the PDF exporter.
//!
//! Widths are the standard Helvetica AFM advances divided by 1000, so one
//! unit is one em at the configured font size. The table covers ASCII
//! 0x20..=0x7E; other Latin-1 characters fall back to `average_char_width`.
//! Index = (char as usize) - 32.

// ────────────────────────────────────────────────────────────────────────────
// Page layout
// ────────────────────────────────────────────────────────────────────────────

const MM_PER_PT: f32 = 25.4 / 72.0;

/// Geometry of the exported page, all lengths in millimetres.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    /// Left, right and top margin.
    pub margin_mm: f32,
    /// Distance from the page bottom at which a new page is started.
    pub bottom_margin_mm: f32,
    /// Horizontal padding inside the text cell on each side.
    pub cell_padding_mm: f32,
    pub line_height_mm: f32,
    pub font_size_pt: f32,
}

/// A4 portrait, 12pt Helvetica, 10mm margins and line height, 20mm bottom margin.
pub fn default_page_layout() -> PageLayout {
    PageLayout {
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        margin_mm: 10.0,
        bottom_margin_mm: 20.0,
        cell_padding_mm: 1.0,
        line_height_mm: 10.0,
        font_size_pt: 12.0,
    }
}

impl PageLayout {
    pub fn font_size_mm(&self) -> f32 {
        self.font_size_pt * MM_PER_PT
    }

    /// Usable line width in em units at the configured font size.
    pub fn text_width_em(&self) -> f32 {
        let width_mm = self.page_width_mm - 2.0 * self.margin_mm - 2.0 * self.cell_padding_mm;
        width_mm / self.font_size_mm()
    }

    /// Number of full lines that fit between the top margin and the page-break line.
    pub fn lines_per_page(&self) -> usize {
        let usable = self.page_height_mm - self.margin_mm - self.bottom_margin_mm;
        ((usable / self.line_height_mm).floor() as usize).max(1)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a builtin font.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [f32; 95],
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }

    /// Word-wraps `text` into lines no wider than `max_width_em`.
    ///
    /// Each `\n` starts a new line and blank input lines are kept as empty
    /// strings. Words wider than a whole line are split between characters.
    pub fn wrap_lines(&self, text: &str, max_width_em: f32) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let paragraph: String = paragraph
                .chars()
                .filter(|c| *c != '\r')
                .map(|c| if c == '\t' { ' ' } else { c })
                .collect();
            self.wrap_paragraph(&paragraph, max_width_em, &mut lines);
        }
        lines
    }

    fn wrap_paragraph(&self, paragraph: &str, max_width_em: f32, lines: &mut Vec<String>) {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            return;
        }

        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in words {
            let word_w = self.measure_str(word);

            if word_w > max_width_em {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current_width = 0.0;
                for c in word.chars() {
                    let w = self.char_width(c);
                    if !current.is_empty() && current_width + w > max_width_em {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0.0;
                    }
                    current.push(c);
                    current_width += w;
                }
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + self.space_width + word_w > max_width_em {
                lines.push(std::mem::replace(&mut current, word.to_string()));
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += self.space_width + word_w;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }
}

/// Helvetica (PDF standard 14 font), regular weight.
pub static HELVETICA: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
};
