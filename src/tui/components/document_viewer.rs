use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::core::state::Document;
use crate::tui::component::Component;

/// Shows where an external document lives. A terminal can't embed a PDF,
/// so the link is printed for the user to open.
pub struct DocumentViewer {
    pub document: Option<Document>,
}

impl Component for DocumentViewer {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title_bottom(Line::from(" Esc Back ").centered())
            .padding(Padding::uniform(1));

        let Some(document) = self.document else {
            frame.render_widget(Paragraph::new("No document selected.").block(block), area);
            return;
        };

        let mut lines = vec![
            Line::styled(
                document.title(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Line::default(),
        ];
        if let Document::Collection(collection) = document {
            lines.push(Line::from(collection.description));
            if let Some(author) = collection.author {
                lines.push(Line::styled(author, Style::default().fg(Color::DarkGray)));
            }
            lines.push(Line::default());
        }
        match document.url() {
            Some(url) => {
                lines.push(Line::from("Open this link in your browser:"));
                lines.push(Line::styled(
                    url,
                    Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
                ));
            }
            None => lines.push(Line::styled(
                "No online copy is linked for this work.",
                Style::default().fg(Color::DarkGray),
            )),
        }

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block.title(" Document ")),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{RESOURCES, find_collection};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(document: Option<Document>) -> String {
        let backend = TestBackend::new(100, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| DocumentViewer { document }.render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_resource_link() {
        let text = draw(Some(Document::Resource(&RESOURCES[0])));
        assert!(text.contains(RESOURCES[0].title));
        assert!(text.contains(RESOURCES[0].url));
    }

    #[test]
    fn test_reference_work() {
        let collection = find_collection("tahdhib").unwrap();
        let text = draw(Some(Document::Collection(collection)));
        assert!(text.contains(collection.name));
        assert!(text.contains("Open this link"));
    }

    #[test]
    fn test_nothing_selected() {
        assert!(draw(None).contains("No document selected"));
    }
}
