use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::components::centered_rect;

/// Blocking alert for a failed fetch. Dismissed with Enter or Esc.
pub struct NoticePopup<'a> {
    pub message: &'a str,
}

impl Component for NoticePopup<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Notice ")
            .title_bottom(Line::from(" Enter OK ").centered())
            .padding(Padding::uniform(1));

        frame.render_widget(
            Paragraph::new(self.message)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block),
            popup,
        );
    }
}
