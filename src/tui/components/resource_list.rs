use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};

use crate::core::catalog::RESOURCES;
use crate::tui::component::Component;

/// External reading library, tagged by category.
pub struct ResourceList<'a> {
    pub state: &'a mut ListState,
}

impl Component for ResourceList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = RESOURCES
            .iter()
            .map(|r| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            format!("[{}] ", r.category),
                            Style::default().fg(Color::Cyan),
                        ),
                        Span::styled(r.title, Style::default().add_modifier(Modifier::BOLD)),
                    ]),
                    Line::styled(format!("    {}", r.url), Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect();

        if self.state.selected().is_none() {
            self.state.select(Some(0));
        }
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Resources ")
                    .title_bottom(Line::from(" Enter Open  Esc Back ").centered())
                    .padding(Padding::horizontal(1)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, self.state);
    }
}
