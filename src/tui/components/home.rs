//! Landing screen: a short banner and the three sections of the app.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::core::state::Screen;
use crate::tui::component::Component;

pub struct HomeEntry {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub screen: Screen,
}

pub const HOME_ENTRIES: [HomeEntry; 3] = [
    HomeEntry {
        title: "Noble Quran",
        subtitle: "114 chapters with English or Tamil translation",
        screen: Screen::ChapterList,
    },
    HomeEntry {
        title: "Hadith Collections",
        subtitle: "The six books and the classical references",
        screen: Screen::CollectionHub,
    },
    HomeEntry {
        title: "Resources",
        subtitle: "PDF libraries and research material",
        screen: Screen::ResourceList,
    },
];

pub struct Home<'a> {
    pub state: &'a mut ListState,
}

impl Component for Home<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [banner_area, _, menu_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(HOME_ENTRIES.len() as u16 * 3),
        ])
        .flex(Flex::Center)
        .areas(area);
        let [menu_area] = Layout::horizontal([Constraint::Max(60)])
            .flex(Flex::Center)
            .areas(menu_area);

        let banner = vec![
            Line::styled(
                "بِسْمِ ٱللَّٰهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ",
                Style::default().fg(Color::Yellow),
            ),
            Line::styled(
                "Sacred Nur",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                "Read, reflect and study the chain",
                Style::default().fg(Color::DarkGray),
            ),
            Line::styled(
                format!("v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        frame.render_widget(
            Paragraph::new(banner).alignment(Alignment::Center),
            banner_area,
        );

        let items: Vec<ListItem> = HOME_ENTRIES
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!("{} ", i + 1), Style::default().fg(Color::DarkGray)),
                        Span::styled(entry.title, Style::default().add_modifier(Modifier::BOLD)),
                    ]),
                    Line::styled(
                        format!("  {}", entry.subtitle),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Line::default(),
                ])
            })
            .collect();

        if self.state.selected().is_none() {
            self.state.select(Some(0));
        }
        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Green))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, menu_area, self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_home_lists_sections() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = ListState::default();

        terminal
            .draw(|f| Home { state: &mut state }.render(f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Sacred Nur"));
        for entry in &HOME_ENTRIES {
            assert!(text.contains(entry.title));
        }
        assert_eq!(state.selected(), Some(0));
    }
}
