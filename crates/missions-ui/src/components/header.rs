use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Dashboard header rendering three lines:
///
/// 1. Application title with sparkle decorations.
/// 2. A 60-column `=` separator.
/// 3. `[ section | N launches | first–last ]`.
pub struct Header<'a> {
    /// Title of the section being shown.
    pub section: &'a str,
    pub records: usize,
    /// Earliest and latest launch year, `None` for an empty table.
    pub year_span: Option<(i32, i32)>,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(
        section: &'a str,
        records: usize,
        year_span: Option<(i32, i32)>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            section,
            records,
            year_span,
            theme,
        }
    }

    /// Render the header as exactly three lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);
        let span = match self.year_span {
            Some((first, last)) => format!("{first}–{last}"),
            None => "no data".to_string(),
        };

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" SPACE MISSIONS ANALYSIS ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.section.to_lowercase(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(format!("{} launches", self.records), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(span, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
