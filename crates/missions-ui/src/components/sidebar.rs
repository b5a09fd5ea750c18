use missions_core::models::Section;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use crate::themes::Theme;

/// Width of the sidebar including borders.
pub const SIDEBAR_WIDTH: u16 = 26;

/// Navigation list of the nine sections with the current one highlighted.
pub struct Sidebar<'a> {
    pub selected: Section,
    pub theme: &'a Theme,
}

impl<'a> Sidebar<'a> {
    pub fn new(selected: Section, theme: &'a Theme) -> Self {
        Self { selected, theme }
    }

    /// Item labels in sidebar order.
    pub fn labels() -> Vec<String> {
        Section::ALL
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{} {}", i + 1, s.title()))
            .collect()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = Self::labels()
            .into_iter()
            .map(|label| ListItem::new(Span::styled(format!(" {label}"), self.theme.sidebar_item)))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Navigation ")
                    .border_style(self.theme.border_focus),
            )
            .highlight_style(self.theme.sidebar_selected)
            .highlight_symbol("▶");

        let mut state = ListState::default();
        state.select(Some(self.selected.index()));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_labels_are_numbered_in_order() {
        let labels = Sidebar::labels();
        assert_eq!(labels.len(), 9);
        assert_eq!(labels[0], "1 Home");
        assert_eq!(labels[4], "5 The Cold War");
        assert_eq!(labels[8], "9 Reference");
    }

    #[test]
    fn test_render_highlights_selection() {
        let backend = TestBackend::new(SIDEBAR_WIDTH, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                Sidebar::new(Section::ColdWar, &theme).render(frame, frame.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let row: String = (0..SIDEBAR_WIDTH)
            .map(|x| buffer[(x, 5)].symbol().to_string())
            .collect();
        assert!(row.contains("▶"), "row 5 = {row:?}");
        assert!(row.contains("Cold War"), "row 5 = {row:?}");
    }
}
