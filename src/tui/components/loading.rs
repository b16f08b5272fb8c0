use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_glyph(frame_index: usize) -> &'static str {
    SPINNER[frame_index % SPINNER.len()]
}

/// Centered spinner with a label.
pub struct Loading<'a> {
    pub label: &'a str,
    pub frame_index: usize,
}

impl Component for Loading<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [row] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(area);
        let text = format!("{} {}", spinner_glyph(self.frame_index), self.label);
        frame.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center),
            row,
        );
    }
}
